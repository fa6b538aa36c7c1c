//! User-facing canvas settings and the clamping applied before they reach
//! the geometry.

use crate::camera::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use crate::catalog::{nearest_catalog_length, MAX_LENGTH_MM, MIN_LENGTH_MM};
use crate::error::ConfigResult;
use crate::tools::{ComponentSelection, DrawingTool};
use serde::{Deserialize, Serialize};

/// Smallest tool size in canvas pixels.
pub const MIN_TOOL_SIZE: f64 = 1.0;

/// Largest tool size in canvas pixels.
pub const MAX_TOOL_SIZE: f64 = 20.0;

/// Bay height used when none is configured.
pub const DEFAULT_BAY_HEIGHT_MM: u32 = 902;

/// Settings for one canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default)]
    pub tool: DrawingTool,
    #[serde(default = "default_bay_height")]
    pub bay_height_mm: u32,
    /// Component identifier such as `h-beam-902` or `platform`.
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_show_grid")]
    pub show_grid: bool,
}

fn default_bay_height() -> u32 {
    DEFAULT_BAY_HEIGHT_MM
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

fn default_show_grid() -> bool {
    true
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            tool: DrawingTool::default(),
            bay_height_mm: DEFAULT_BAY_HEIGHT_MM,
            component: None,
            zoom: DEFAULT_ZOOM,
            show_grid: true,
        }
    }
}

impl CanvasConfig {
    /// Copy with every numeric field pulled into its documented range.
    ///
    /// The bay height also snaps to the nearest catalog length.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        let size = if config.tool.size.is_finite() {
            config.tool.size.clamp(MIN_TOOL_SIZE, MAX_TOOL_SIZE)
        } else {
            DrawingTool::default().size
        };
        if size != config.tool.size {
            log::warn!("tool size {} clamped to {}", config.tool.size, size);
            config.tool.size = size;
        }

        let zoom = if config.zoom.is_finite() {
            config.zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            DEFAULT_ZOOM
        };
        if zoom != config.zoom {
            log::warn!("zoom {} clamped to {}", config.zoom, zoom);
            config.zoom = zoom;
        }

        let bay = nearest_catalog_length(f64::from(
            config.bay_height_mm.clamp(MIN_LENGTH_MM, MAX_LENGTH_MM),
        ));
        if bay != config.bay_height_mm {
            log::warn!("bay height {}mm adjusted to {}mm", config.bay_height_mm, bay);
            config.bay_height_mm = bay;
        }

        config
    }

    /// Resolve the component identifier.
    pub fn try_component_selection(&self) -> ConfigResult<ComponentSelection> {
        match &self.component {
            Some(id) => id.parse(),
            None => Ok(ComponentSelection::Freeform),
        }
    }

    /// Resolve the component identifier, falling back to freeform if it is
    /// not recognized.
    pub fn component_selection(&self) -> ComponentSelection {
        self.try_component_selection().unwrap_or_else(|err| {
            log::warn!("{err}; using freeform");
            ComponentSelection::Freeform
        })
    }
}
