//! Pointer gesture state machine.
//!
//! Every gesture is a strictly sequential `start → move × N → end`. The
//! controller holds only the in-progress state; the committed collections
//! are passed in through [`GestureContext`] and changes come back out as a
//! [`GestureEffect`] for the caller to apply.

use crate::scaffold::{
    build_structure, create_all_support_posts, decompose, PostId, Segment, Structure, SupportPost,
};
use crate::shapes::{Platform, Stroke, StrokeId};
use crate::snap::{
    calculate_right_angle_point, find_nearest_endpoint, find_stroke_at_point,
    find_support_post_at_point,
};
use crate::tools::{ComponentSelection, DrawingTool, ToolKind};
use kurbo::{Point, Vec2};

/// Read-only inputs for one gesture event.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext<'a> {
    pub tool: &'a DrawingTool,
    pub bay_height_mm: u32,
    pub component: ComponentSelection,
    pub zoom: f64,
    pub strokes: &'a [Stroke],
    pub posts: &'a [SupportPost],
}

/// What is being drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Ink following the pointer.
    Freehand(Vec<Point>),
    /// A straight drag from `start` to `current`.
    Drag { start: Point, current: Point },
}

/// State of the gesture controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing(DrawingState),
    /// Panning the view; tracks the last pointer position in screen space.
    Panning { last_screen: Point },
    Erasing,
}

/// Everything a finished gesture adds to the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommitResult {
    pub strokes: Vec<Stroke>,
    pub structure: Option<Structure>,
    pub posts: Vec<SupportPost>,
}

impl CommitResult {
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.structure.is_none() && self.posts.is_empty()
    }
}

/// Change requested by a gesture event.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureEffect {
    #[default]
    None,
    /// Move the view by a screen-space delta.
    Pan(Vec2),
    /// Remove these items.
    Erase {
        stroke: Option<StrokeId>,
        post: Option<PostId>,
    },
    /// Append these items.
    Commit(CommitResult),
}

/// Geometry of the in-progress gesture, for painting.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Freehand(Vec<Point>),
    /// Straight drag too short for any member.
    Line { start: Point, end: Point },
    Segments(Vec<Segment>),
    Structure {
        structure: Structure,
        posts: Vec<SupportPost>,
    },
    Platform(Platform),
}

/// Drives [`GestureState`] from pointer events.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    /// Pointer pressed at `point` (canvas space) / `screen` (screen space).
    pub fn start(
        &mut self,
        point: Point,
        screen: Point,
        ctx: &GestureContext<'_>,
    ) -> GestureEffect {
        match ctx.tool.kind {
            ToolKind::Select => {
                self.state = GestureState::Panning {
                    last_screen: screen,
                };
                GestureEffect::None
            }
            ToolKind::LineEraser => {
                self.state = GestureState::Erasing;
                erase_at(point, ctx)
            }
            ToolKind::Pen | ToolKind::ScaffoldMode => {
                let point = snap(point, ctx);
                let drawing = if ctx.tool.draws_straight() {
                    DrawingState::Drag {
                        start: point,
                        current: point,
                    }
                } else {
                    DrawingState::Freehand(vec![point])
                };
                self.state = GestureState::Drawing(drawing);
                GestureEffect::None
            }
        }
    }

    /// Pointer moved to `point` / `screen`.
    pub fn move_to(
        &mut self,
        point: Point,
        screen: Point,
        ctx: &GestureContext<'_>,
    ) -> GestureEffect {
        match &mut self.state {
            GestureState::Idle => GestureEffect::None,
            GestureState::Panning { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                GestureEffect::Pan(delta)
            }
            GestureState::Erasing => erase_at(point, ctx),
            GestureState::Drawing(DrawingState::Freehand(points)) => {
                points.push(snap(point, ctx));
                GestureEffect::None
            }
            GestureState::Drawing(DrawingState::Drag { start, current }) => {
                let mut next = snap(point, ctx);
                if ctx.tool.right_angle_mode {
                    next = calculate_right_angle_point(*start, next);
                }
                *current = next;
                log::trace!(
                    "drag ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                    start.x,
                    start.y,
                    next.x,
                    next.y
                );
                GestureEffect::None
            }
        }
    }

    /// Pointer released: commit whatever the gesture produced.
    pub fn end(&mut self, ctx: &GestureContext<'_>) -> GestureEffect {
        let GestureState::Drawing(drawing) = std::mem::take(&mut self.state) else {
            return GestureEffect::None;
        };

        let result = match drawing {
            DrawingState::Freehand(points) => commit_freehand(points, ctx.tool),
            DrawingState::Drag { start, current } => commit_drag(start, current, ctx),
        };

        if result.is_empty() {
            log::debug!("gesture ended with nothing to commit");
            GestureEffect::None
        } else {
            log::debug!(
                "commit: {} strokes, {} posts, structure {:?}",
                result.strokes.len(),
                result.posts.len(),
                result.structure.as_ref().map(|s| s.id)
            );
            GestureEffect::Commit(result)
        }
    }

    /// Abandon the gesture (pointer left the surface).
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    /// What the in-progress gesture would commit, if anything.
    pub fn preview(&self, ctx: &GestureContext<'_>) -> Option<Preview> {
        let GestureState::Drawing(drawing) = &self.state else {
            return None;
        };
        match drawing {
            DrawingState::Freehand(points) => Some(Preview::Freehand(points.clone())),
            DrawingState::Drag { start, current } => Some(drag_preview(*start, *current, ctx)),
        }
    }
}

fn snap(point: Point, ctx: &GestureContext<'_>) -> Point {
    find_nearest_endpoint(point, ctx.strokes, ctx.tool.snap_to_endpoints, ctx.zoom).unwrap_or(point)
}

fn erase_at(point: Point, ctx: &GestureContext<'_>) -> GestureEffect {
    let stroke = find_stroke_at_point(point, ctx.strokes, ctx.zoom).map(|i| ctx.strokes[i].id);
    let post = find_support_post_at_point(point, ctx.posts, ctx.zoom).map(|i| ctx.posts[i].id);
    if stroke.is_none() && post.is_none() {
        GestureEffect::None
    } else {
        GestureEffect::Erase { stroke, post }
    }
}

fn commit_freehand(points: Vec<Point>, tool: &DrawingTool) -> CommitResult {
    if points.len() < 2 {
        return CommitResult::default();
    }
    CommitResult {
        strokes: vec![Stroke::from_points(points, tool.color, tool.size)],
        ..CommitResult::default()
    }
}

fn commit_drag(start: Point, end: Point, ctx: &GestureContext<'_>) -> CommitResult {
    let size = ctx.tool.size;

    if ctx.component == ComponentSelection::Platform {
        return CommitResult {
            strokes: Platform::new(start).to_strokes(size),
            ..CommitResult::default()
        };
    }

    if ctx.tool.kind == ToolKind::ScaffoldMode {
        let structure = build_structure(start, end, ctx.bay_height_mm, ctx.component);
        if structure.is_empty() {
            return CommitResult::default();
        }
        let posts = create_all_support_posts(&structure, ctx.posts, ctx.strokes);
        return CommitResult {
            strokes: structure.segments().map(|s| s.to_stroke(size)).collect(),
            structure: Some(structure),
            posts,
        };
    }

    CommitResult {
        strokes: decompose(start, end, ctx.component, ctx.bay_height_mm)
            .iter()
            .map(|s| s.to_stroke(size))
            .collect(),
        ..CommitResult::default()
    }
}

fn drag_preview(start: Point, end: Point, ctx: &GestureContext<'_>) -> Preview {
    if ctx.component == ComponentSelection::Platform {
        return Preview::Platform(Platform::new(start));
    }

    if ctx.tool.kind == ToolKind::ScaffoldMode {
        let structure = build_structure(start, end, ctx.bay_height_mm, ctx.component);
        if structure.is_empty() {
            return Preview::Line { start, end };
        }
        let posts = create_all_support_posts(&structure, ctx.posts, ctx.strokes);
        return Preview::Structure { structure, posts };
    }

    let segments = decompose(start, end, ctx.component, ctx.bay_height_mm);
    if segments.is_empty() {
        Preview::Line { start, end }
    } else {
        Preview::Segments(segments)
    }
}
