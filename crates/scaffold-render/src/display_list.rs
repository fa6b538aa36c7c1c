//! Display-list backend: records draw commands in paint order.

use crate::renderer::{RenderContext, RenderResult, Renderer};
use kurbo::{Affine, Line, Point, Rect};
use peniko::Color;
use scaffold_core::catalog::{length_color, length_label};
use scaffold_core::gesture::Preview;
use scaffold_core::scaffold::{Segment, SupportPost};
use scaffold_core::shapes::{SerializableColor, Stroke, PLATFORM_COLOR};
use scaffold_core::units::MM_PER_PIXEL;
use serde::{Serialize, Serializer};

/// Grid spacing in canvas pixels (300 mm).
pub const GRID_SPACING: f64 = 300.0 / MM_PER_PIXEL;

/// Distance of a length label above its member, in screen pixels.
pub const LABEL_OFFSET: f64 = 8.0;

const STRUCTURE_PREVIEW_ALPHA: f32 = 0.7;
const SEGMENT_PREVIEW_ALPHA: f32 = 0.8;
const LINE_PREVIEW_ALPHA: f32 = 0.5;

fn serialize_color<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&SerializableColor::from(*color).to_hex())
}

/// One drawing primitive, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    GridLine {
        line: Line,
    },
    Line {
        line: Line,
        #[serde(serialize_with = "serialize_color")]
        color: Color,
        width: f64,
        dashed: bool,
    },
    Polyline {
        points: Vec<Point>,
        #[serde(serialize_with = "serialize_color")]
        color: Color,
        width: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        #[serde(serialize_with = "serialize_color")]
        color: Color,
        width: f64,
    },
    Label {
        position: Point,
        text: String,
        #[serde(serialize_with = "serialize_color")]
        color: Color,
    },
}

/// Recorded frame.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayList {
    /// Canvas-to-screen transform for the frame.
    pub transform: Affine,
    pub commands: Vec<DrawCommand>,
    #[serde(skip)]
    zoom: f64,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            transform: Affine::IDENTITY,
            commands: Vec::new(),
            zoom: 1.0,
        }
    }

    /// Build a display list for one frame.
    pub fn from_context(ctx: &RenderContext) -> RenderResult<Self> {
        let mut list = Self::new();
        list.build_scene(ctx)?;
        Ok(list)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Line width for a stroke of `size`, never thinner than two screen pixels.
    fn line_width(&self, size: f64) -> f64 {
        size.max(2.0 / self.zoom)
    }

    fn push_grid(&mut self, visible: Rect) {
        let start_x = (visible.x0 / GRID_SPACING).floor() * GRID_SPACING;
        let start_y = (visible.y0 / GRID_SPACING).floor() * GRID_SPACING;
        let end_x = (visible.x1 / GRID_SPACING).ceil() * GRID_SPACING;
        let end_y = (visible.y1 / GRID_SPACING).ceil() * GRID_SPACING;

        // Vertical lines
        let mut x = start_x;
        while x <= end_x {
            self.commands.push(DrawCommand::GridLine {
                line: Line::new((x, start_y), (x, end_y)),
            });
            x += GRID_SPACING;
        }

        // Horizontal lines
        let mut y = start_y;
        while y <= end_y {
            self.commands.push(DrawCommand::GridLine {
                line: Line::new((start_x, y), (end_x, y)),
            });
            y += GRID_SPACING;
        }
    }

    fn push_label(&mut self, start: Point, end: Point, length_mm: u32, color: Color) {
        let mid = start.midpoint(end);
        self.commands.push(DrawCommand::Label {
            position: Point::new(mid.x, mid.y - LABEL_OFFSET / self.zoom),
            text: length_label(length_mm),
            color,
        });
    }

    fn push_stroke(&mut self, stroke: &Stroke, alpha: f32) {
        let color = Color::from(stroke.color).multiply_alpha(alpha);
        let width = self.line_width(stroke.size);
        match stroke.points.as_slice() {
            [start, end] => {
                self.commands.push(DrawCommand::Line {
                    line: Line::new(*start, *end),
                    color,
                    width,
                    dashed: false,
                });
                if let Some(length_mm) = stroke.length_mm() {
                    self.push_label(*start, *end, length_mm, color);
                }
            }
            points => self.commands.push(DrawCommand::Polyline {
                points: points.to_vec(),
                color,
                width,
            }),
        }
    }

    fn push_post(&mut self, post: &SupportPost, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center: post.center,
            radius: post.radius_px,
            color: Color::from_rgba8(0, 0, 0, 255).multiply_alpha(alpha),
            width: 2.0 / self.zoom,
        });
    }

    fn push_segment(&mut self, segment: &Segment, size: f64, alpha: f32, labelled: bool) {
        let color = Color::from(length_color(segment.length_mm)).multiply_alpha(alpha);
        self.commands.push(DrawCommand::Line {
            line: Line::new(segment.start, segment.end),
            color,
            width: self.line_width(size),
            dashed: false,
        });
        if labelled {
            self.push_label(segment.start, segment.end, segment.length_mm, color);
        }
    }

    fn push_preview(&mut self, preview: &Preview, size: f64, tool_color: Color) {
        match preview {
            Preview::Freehand(points) => self.commands.push(DrawCommand::Polyline {
                points: points.clone(),
                color: tool_color,
                width: self.line_width(size),
            }),
            Preview::Line { start, end } => self.commands.push(DrawCommand::Line {
                line: Line::new(*start, *end),
                color: tool_color.multiply_alpha(LINE_PREVIEW_ALPHA),
                width: self.line_width(size),
                dashed: true,
            }),
            Preview::Segments(segments) => {
                for segment in segments {
                    self.push_segment(segment, size, SEGMENT_PREVIEW_ALPHA, true);
                }
            }
            Preview::Structure { structure, posts } => {
                for segment in structure.segments() {
                    self.push_segment(segment, size, STRUCTURE_PREVIEW_ALPHA, false);
                }
                for post in posts {
                    self.push_post(post, STRUCTURE_PREVIEW_ALPHA);
                }
            }
            Preview::Platform(platform) => {
                let color = Color::from(PLATFORM_COLOR).multiply_alpha(STRUCTURE_PREVIEW_ALPHA);
                let corners = platform.corners();
                for i in 0..4 {
                    self.commands.push(DrawCommand::Line {
                        line: Line::new(corners[i], corners[(i + 1) % 4]),
                        color,
                        width: self.line_width(size),
                        dashed: false,
                    });
                }
            }
        }
    }
}

impl Renderer for DisplayList {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let canvas = ctx.canvas;
        self.commands.clear();
        self.transform = canvas.camera.transform();
        self.zoom = canvas.camera.zoom;

        if ctx.show_grid {
            let visible = Rect::from_points(
                canvas.camera.screen_to_canvas(Point::ZERO),
                canvas.camera.screen_to_canvas(Point::new(
                    ctx.viewport_size.width,
                    ctx.viewport_size.height,
                )),
            );
            self.push_grid(visible);
        }

        for stroke in &canvas.document.strokes {
            self.push_stroke(stroke, 1.0);
        }

        for post in &canvas.document.posts {
            self.push_post(post, 1.0);
        }

        if let Some(preview) = canvas.preview() {
            let tool = canvas.tool();
            self.push_preview(&preview, tool.size, Color::from(tool.color));
        }

        log::trace!("display list: {} commands", self.commands.len());
        Ok(())
    }
}
