//! Scaffold Render Library
//!
//! Renderer abstraction for scaffold layouts. The bundled backend records a
//! flat display list that any drawing surface can replay.

mod display_list;
mod renderer;

pub use display_list::{DisplayList, DrawCommand, GRID_SPACING, LABEL_OFFSET};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
