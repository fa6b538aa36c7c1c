//! Scaffold Core Library
//!
//! Geometry engine for laying out modular scaffolding: drags are turned into
//! catalog-length members, rectangular bays and support posts.

pub mod camera;
pub mod canvas;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gesture;
pub mod scaffold;
pub mod shapes;
pub mod snap;
pub mod tools;
pub mod units;

pub use camera::Camera;
pub use canvas::{Canvas, ScaffoldDocument};
pub use config::CanvasConfig;
pub use error::{ConfigError, ConfigResult};
pub use gesture::{CommitResult, GestureController, GestureEffect, GestureState, Preview};
pub use scaffold::{build_structure, decompose, Segment, Structure, SupportPost};
pub use shapes::{Platform, SerializableColor, Stroke};
pub use tools::{ComponentSelection, DrawingTool, ToolKind};
