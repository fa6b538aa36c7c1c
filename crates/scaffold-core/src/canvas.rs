//! Scaffold document and canvas state.

use crate::camera::Camera;
use crate::catalog::nearest_catalog_length;
use crate::config::CanvasConfig;
use crate::error::ConfigResult;
use crate::gesture::{CommitResult, GestureContext, GestureController, GestureEffect, Preview};
use crate::scaffold::{PostId, Structure, SupportPost};
use crate::shapes::{Stroke, StrokeId};
use crate::tools::{ComponentSelection, DrawingTool};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The committed layout: strokes, structures and support posts.
///
/// Each collection is kept in insertion order, which is also paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldDocument {
    pub strokes: Vec<Stroke>,
    pub structures: Vec<Structure>,
    pub posts: Vec<SupportPost>,
}

impl ScaffoldDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append everything a gesture produced.
    pub fn apply_commit(&mut self, result: CommitResult) {
        self.strokes.extend(result.strokes);
        self.structures.extend(result.structure);
        self.posts.extend(result.posts);
    }

    /// Remove a stroke by ID.
    pub fn remove_stroke(&mut self, id: StrokeId) -> Option<Stroke> {
        let index = self.strokes.iter().position(|s| s.id == id)?;
        log::debug!("erased stroke {id}");
        Some(self.strokes.remove(index))
    }

    /// Remove a support post by ID.
    pub fn remove_post(&mut self, id: PostId) -> Option<SupportPost> {
        let index = self.posts.iter().position(|p| p.id == id)?;
        log::debug!("erased post {id}");
        Some(self.posts.remove(index))
    }

    /// Clear strokes, structures and posts.
    pub fn clear(&mut self) {
        log::debug!(
            "clearing {} strokes, {} structures, {} posts",
            self.strokes.len(),
            self.structures.len(),
            self.posts.len()
        );
        self.strokes.clear();
        self.structures.clear();
        self.posts.clear();
    }

    /// Check if the document has nothing in it.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.structures.is_empty() && self.posts.is_empty()
    }

    /// Bounding box of all strokes and posts.
    pub fn bounds(&self) -> Option<Rect> {
        let strokes = self.strokes.iter().filter_map(Stroke::bounds);
        let posts = self
            .posts
            .iter()
            .map(|p| Rect::from_center_size(p.center, (p.radius_px * 2.0, p.radius_px * 2.0)));
        strokes.chain(posts).reduce(|a, b| a.union(b))
    }

    /// Serialize the layout to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Runtime canvas state: the document plus everything needed to edit it.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The layout being edited.
    pub document: ScaffoldDocument,
    /// Camera for view transform.
    pub camera: Camera,
    /// Settings, always within their documented ranges.
    config: CanvasConfig,
    /// Component resolved from `config.component`.
    component: ComponentSelection,
    gesture: GestureController,
    /// Viewport size in screen pixels.
    pub viewport_size: kurbo::Size,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    /// Create a canvas with an empty document.
    pub fn new(config: CanvasConfig) -> Self {
        let config = config.sanitized();
        Self {
            document: ScaffoldDocument::new(),
            camera: Camera::with_zoom(config.zoom),
            component: config.component_selection(),
            config,
            gesture: GestureController::new(),
            viewport_size: kurbo::Size::new(800.0, 600.0),
        }
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = kurbo::Size::new(width, height);
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn tool(&self) -> &DrawingTool {
        &self.config.tool
    }

    pub fn component(&self) -> ComponentSelection {
        self.component
    }

    pub fn show_grid(&self) -> bool {
        self.config.show_grid
    }

    /// Replace the active tool. Any gesture in progress is abandoned.
    pub fn set_tool(&mut self, tool: DrawingTool) {
        self.gesture.cancel();
        self.config.tool = tool;
        self.config = self.config.sanitized();
    }

    /// Set the bay height, snapped to the nearest catalog length.
    pub fn set_bay_height(&mut self, mm: u32) {
        self.config.bay_height_mm = nearest_catalog_length(f64::from(mm));
    }

    /// Select a component by identifier, or clear the selection with `None`.
    ///
    /// An unrecognized identifier leaves the current selection unchanged.
    pub fn set_component(&mut self, id: Option<&str>) -> ConfigResult<()> {
        self.component = match id {
            Some(id) => id.parse()?,
            None => ComponentSelection::Freeform,
        };
        self.config.component = id.map(str::to_string);
        Ok(())
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.config.show_grid = show;
    }

    /// Pointer pressed at a screen position.
    pub fn pointer_down(&mut self, screen: Point) {
        let point = self.camera.screen_to_canvas(screen);
        let ctx = gesture_context(&self.config, self.component, &self.camera, &self.document);
        let effect = self.gesture.start(point, screen, &ctx);
        self.apply(effect);
    }

    /// Pointer moved to a screen position.
    pub fn pointer_move(&mut self, screen: Point) {
        let point = self.camera.screen_to_canvas(screen);
        let ctx = gesture_context(&self.config, self.component, &self.camera, &self.document);
        let effect = self.gesture.move_to(point, screen, &ctx);
        self.apply(effect);
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        let ctx = gesture_context(&self.config, self.component, &self.camera, &self.document);
        let effect = self.gesture.end(&ctx);
        self.apply(effect);
    }

    /// Pointer left the surface; the gesture in progress is dropped.
    pub fn pointer_leave(&mut self) {
        self.gesture.cancel();
    }

    /// Geometry of the gesture in progress.
    pub fn preview(&self) -> Option<Preview> {
        let ctx = gesture_context(&self.config, self.component, &self.camera, &self.document);
        self.gesture.preview(&ctx)
    }

    /// Clear the whole layout.
    pub fn clear(&mut self) {
        self.gesture.cancel();
        self.document.clear();
    }

    fn apply(&mut self, effect: GestureEffect) {
        match effect {
            GestureEffect::None => {}
            GestureEffect::Pan(delta) => self.camera.pan(delta),
            GestureEffect::Erase { stroke, post } => {
                if let Some(id) = stroke {
                    self.document.remove_stroke(id);
                }
                if let Some(id) = post {
                    self.document.remove_post(id);
                }
            }
            GestureEffect::Commit(result) => self.document.apply_commit(result),
        }
    }
}

fn gesture_context<'a>(
    config: &'a CanvasConfig,
    component: ComponentSelection,
    camera: &Camera,
    document: &'a ScaffoldDocument,
) -> GestureContext<'a> {
    GestureContext {
        tool: &config.tool,
        bay_height_mm: config.bay_height_mm,
        component,
        zoom: camera.zoom,
        strokes: &document.strokes,
        posts: &document.posts,
    }
}
