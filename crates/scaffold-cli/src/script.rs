//! Gesture scripts: a canvas configuration plus a sequence of pointer and
//! settings events, replayed headlessly.

use kurbo::{Point, Size};
use scaffold_core::canvas::{Canvas, ScaffoldDocument};
use scaffold_core::config::CanvasConfig;
use scaffold_core::error::ConfigError;
use scaffold_core::tools::DrawingTool;
use scaffold_render::{DisplayList, RenderContext, RendererError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while loading, replaying or writing a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("render failed: {0}")]
    Render(#[from] RendererError),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One scripted event. Pointer positions are in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Event {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    Tool { tool: DrawingTool },
    BayHeight { mm: u32 },
    Component { id: Option<String> },
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Clear,
}

fn default_viewport() -> Size {
    Size::new(800.0, 600.0)
}

/// A replayable session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: CanvasConfig,
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            config: CanvasConfig::default(),
            viewport: default_viewport(),
            events: Vec::new(),
        }
    }
}

impl Script {
    /// Parse a script from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ScriptError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Run every event against a fresh canvas.
    pub fn replay(&self) -> Result<Canvas, ScriptError> {
        let mut canvas = Canvas::new(self.config.clone());
        canvas.set_viewport_size(self.viewport.width, self.viewport.height);

        for (index, event) in self.events.iter().enumerate() {
            log::trace!("event {index}: {event:?}");
            match event {
                Event::Down { x, y } => canvas.pointer_down(Point::new(*x, *y)),
                Event::Move { x, y } => canvas.pointer_move(Point::new(*x, *y)),
                Event::Up => canvas.pointer_up(),
                Event::Leave => canvas.pointer_leave(),
                Event::Tool { tool } => canvas.set_tool(tool.clone()),
                Event::BayHeight { mm } => canvas.set_bay_height(*mm),
                Event::Component { id } => canvas.set_component(id.as_deref())?,
                Event::ZoomIn => canvas.camera.zoom_in(),
                Event::ZoomOut => canvas.camera.zoom_out(),
                Event::ResetZoom => canvas.camera.reset_zoom(),
                Event::Clear => canvas.clear(),
            }
        }

        log::debug!(
            "replayed {} events: {} strokes, {} structures, {} posts",
            self.events.len(),
            canvas.document.strokes.len(),
            canvas.document.structures.len(),
            canvas.document.posts.len()
        );
        Ok(canvas)
    }
}

/// What the replay prints.
#[derive(Debug, Serialize)]
pub struct ReplayOutput<'a> {
    pub layout: &'a ScaffoldDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_list: Option<DisplayList>,
}

/// Serialize the replayed layout, optionally with the display list of the
/// final frame.
pub fn render_output(canvas: &Canvas, with_display_list: bool) -> Result<String, ScriptError> {
    let display_list = if with_display_list {
        let ctx = RenderContext::new(canvas, canvas.viewport_size);
        Some(DisplayList::from_context(&ctx)?)
    } else {
        None
    };
    let output = ReplayOutput {
        layout: &canvas.document,
        display_list,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Write `contents` to `path`.
pub fn write_output(path: &Path, contents: &str) -> Result<(), ScriptError> {
    std::fs::write(path, contents).map_err(|source| ScriptError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_core::units::mm_to_pixels;
    use std::io::Write;

    fn write_script(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn scaffold_drag(from_mm: f64, to_mm: f64) -> Vec<Event> {
        vec![
            Event::Down {
                x: mm_to_pixels(from_mm),
                y: 100.0,
            },
            Event::Move {
                x: mm_to_pixels(to_mm),
                y: 100.0,
            },
            Event::Up,
        ]
    }

    #[test]
    fn test_load_and_replay() {
        let x = mm_to_pixels(1817.0);
        let json = format!(
            r#"{{
                "config": {{ "tool": {{ "type": "scaffold-mode" }}, "show_grid": false }},
                "events": [
                    {{ "op": "down", "x": 0, "y": 100 }},
                    {{ "op": "move", "x": {x}, "y": 100 }},
                    {{ "op": "up" }}
                ]
            }}"#
        );
        let file = write_script(&json);
        let script = Script::load(file.path()).unwrap();
        assert_eq!(script.viewport, Size::new(800.0, 600.0));

        let canvas = script.replay().unwrap();
        assert_eq!(canvas.document.structures.len(), 1);
        assert_eq!(canvas.document.strokes.len(), 4);
        assert_eq!(canvas.document.posts.len(), 4);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Script::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
    }

    #[test]
    fn test_bad_json() {
        let file = write_script(r#"{ "events": [ { "op": "jump" } ] }"#);
        let err = Script::load(file.path()).unwrap_err();
        assert!(matches!(err, ScriptError::Json { .. }));
        assert!(err.to_string().starts_with("invalid script"));
    }

    #[test]
    fn test_bad_component_fails_replay() {
        let script = Script {
            events: vec![Event::Component {
                id: Some("h-beam-1000".to_string()),
            }],
            ..Script::default()
        };
        assert!(matches!(
            script.replay(),
            Err(ScriptError::Config(ConfigError::NonCatalogLength(1000)))
        ));
    }

    #[test]
    fn test_settings_events() {
        let mut events = vec![
            Event::Tool {
                tool: DrawingTool::new(scaffold_core::tools::ToolKind::ScaffoldMode),
            },
            Event::BayHeight { mm: 1200 },
        ];
        events.extend(scaffold_drag(0.0, 1817.0));
        events.push(Event::ZoomIn);
        let script = Script {
            events,
            ..Script::default()
        };
        let canvas = script.replay().unwrap();
        assert_eq!(canvas.config().bay_height_mm, 1207);
        assert_eq!(canvas.document.structures[0].height_mm, 1207);
        assert!((canvas.camera.zoom - 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_clear_and_leave() {
        let mut events = vec![Event::Tool {
            tool: DrawingTool::new(scaffold_core::tools::ToolKind::ScaffoldMode),
        }];
        events.extend(scaffold_drag(0.0, 1817.0));
        events.push(Event::Clear);
        events.push(Event::Down { x: 0.0, y: 0.0 });
        events.push(Event::Move { x: 600.0, y: 0.0 });
        events.push(Event::Leave);
        events.push(Event::Up);
        let script = Script {
            events,
            ..Script::default()
        };
        assert!(script.replay().unwrap().document.is_empty());
    }

    #[test]
    fn test_output_round_trip_to_file() {
        let mut events = vec![Event::Tool {
            tool: DrawingTool::new(scaffold_core::tools::ToolKind::ScaffoldMode),
        }];
        events.extend(scaffold_drag(0.0, 902.0));
        let script = Script {
            events,
            ..Script::default()
        };
        let canvas = script.replay().unwrap();

        let plain = render_output(&canvas, false).unwrap();
        assert!(!plain.contains("display_list"));

        let full = render_output(&canvas, true).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        write_output(&path, &full).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["layout"]["structures"].as_array().unwrap().len(), 1);
        assert!(!value["display_list"]["commands"].as_array().unwrap().is_empty());
    }
}
