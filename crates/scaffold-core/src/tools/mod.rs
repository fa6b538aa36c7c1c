//! Tool configuration read by every gesture.

use crate::catalog::is_catalog_length;
use crate::error::ConfigError;
use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    /// Freehand ink, or straight members when a line mode is on.
    #[default]
    Pen,
    /// Drag one side of a bay to build a full rectangular structure.
    ScaffoldMode,
    /// Drag across strokes and posts to remove them.
    LineEraser,
    /// Drag to pan the view.
    Select,
}

/// Snapshot of the active tool settings, passed by value into each gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawingTool {
    #[serde(rename = "type")]
    pub kind: ToolKind,
    /// Stroke width in canvas pixels.
    pub size: f64,
    pub color: SerializableColor,
    /// Pen drags become straight, catalog-decomposed members.
    pub straight_line_mode: bool,
    /// Drags are forced horizontal or vertical.
    pub right_angle_mode: bool,
    /// Drag endpoints snap to existing stroke endpoints.
    pub snap_to_endpoints: bool,
}

impl Default for DrawingTool {
    fn default() -> Self {
        Self {
            kind: ToolKind::Pen,
            size: 2.0,
            color: SerializableColor::new(0x25, 0x63, 0xeb, 255),
            straight_line_mode: false,
            right_angle_mode: false,
            snap_to_endpoints: false,
        }
    }
}

impl DrawingTool {
    /// Create a tool of the given kind with default settings.
    pub fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Whether a drag with this tool produces a straight line rather than ink.
    pub fn draws_straight(&self) -> bool {
        match self.kind {
            ToolKind::ScaffoldMode => true,
            ToolKind::Pen => self.straight_line_mode || self.right_angle_mode,
            ToolKind::LineEraser | ToolKind::Select => false,
        }
    }
}

/// Pre-selected scaffold component, resolved once from its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComponentSelection {
    /// No fixed length; drags are decomposed against the catalog.
    #[default]
    Freeform,
    /// One horizontal member of this length along the drag direction.
    FixedHorizontal(u32),
    /// One vertical member as tall as the configured bay height.
    FixedVertical,
    /// A 600 × 300 mm work platform.
    Platform,
}

impl ComponentSelection {
    /// Fixed member length for this selection, if it has one.
    pub fn fixed_length_mm(self, bay_height_mm: u32) -> Option<u32> {
        match self {
            ComponentSelection::FixedHorizontal(mm) => Some(mm),
            ComponentSelection::FixedVertical => Some(bay_height_mm),
            ComponentSelection::Freeform | ComponentSelection::Platform => None,
        }
    }
}

impl FromStr for ComponentSelection {
    type Err = ConfigError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        match id {
            "v-beam" => Ok(ComponentSelection::FixedVertical),
            "platform" => Ok(ComponentSelection::Platform),
            "diagonal" | "joint" => Ok(ComponentSelection::Freeform),
            _ => {
                let digits = id
                    .strip_prefix("h-beam-")
                    .or_else(|| id.strip_prefix("horizontal-"))
                    .ok_or_else(|| ConfigError::UnknownComponent(id.to_string()))?;
                let mm: u32 = digits
                    .parse()
                    .map_err(|_| ConfigError::UnknownComponent(id.to_string()))?;
                if is_catalog_length(mm) {
                    Ok(ComponentSelection::FixedHorizontal(mm))
                } else {
                    Err(ConfigError::NonCatalogLength(mm))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_defaults() {
        let tool = DrawingTool::default();
        assert_eq!(tool.kind, ToolKind::Pen);
        assert!(!tool.draws_straight());
        assert!(DrawingTool::new(ToolKind::ScaffoldMode).draws_straight());
        assert!(!DrawingTool::new(ToolKind::Select).draws_straight());
    }

    #[test]
    fn test_pen_line_modes_draw_straight() {
        let mut tool = DrawingTool::default();
        tool.straight_line_mode = true;
        assert!(tool.draws_straight());
        tool.straight_line_mode = false;
        tool.right_angle_mode = true;
        assert!(tool.draws_straight());
    }

    #[test]
    fn test_tool_json_shape() {
        let tool: DrawingTool = serde_json::from_str(
            r##"{"type":"scaffold-mode","snapToEndpoints":true,"color":"#ff0000"}"##,
        )
        .unwrap();
        assert_eq!(tool.kind, ToolKind::ScaffoldMode);
        assert!(tool.snap_to_endpoints);
        assert_eq!(tool.color, SerializableColor::new(255, 0, 0, 255));
        assert!((tool.size - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_component_parsing() {
        assert_eq!(
            "h-beam-902".parse::<ComponentSelection>(),
            Ok(ComponentSelection::FixedHorizontal(902))
        );
        assert_eq!(
            "horizontal-902".parse::<ComponentSelection>(),
            Ok(ComponentSelection::FixedHorizontal(902))
        );
        assert_eq!(
            "horizontal-900".parse::<ComponentSelection>(),
            Err(ConfigError::NonCatalogLength(900))
        );
        assert_eq!("v-beam".parse::<ComponentSelection>(), Ok(ComponentSelection::FixedVertical));
        assert_eq!("platform".parse::<ComponentSelection>(), Ok(ComponentSelection::Platform));
        assert_eq!("joint".parse::<ComponentSelection>(), Ok(ComponentSelection::Freeform));
        assert_eq!(
            "h-beam-1".parse::<ComponentSelection>(),
            Err(ConfigError::NonCatalogLength(1))
        );
        assert!(matches!(
            "h-beam-x".parse::<ComponentSelection>(),
            Err(ConfigError::UnknownComponent(_))
        ));
        assert!(matches!(
            "ladder".parse::<ComponentSelection>(),
            Err(ConfigError::UnknownComponent(_))
        ));
    }

    #[test]
    fn test_fixed_length() {
        assert_eq!(ComponentSelection::FixedHorizontal(598).fixed_length_mm(902), Some(598));
        assert_eq!(ComponentSelection::FixedVertical.fixed_length_mm(1207), Some(1207));
        assert_eq!(ComponentSelection::Freeform.fixed_length_mm(902), None);
        assert_eq!(ComponentSelection::Platform.fixed_length_mm(902), None);
    }
}
