use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8};

/// Where a text op's anchor sits on the laid-out text box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TextAnchor {
    TopLeft,
    BottomLeft,
    BottomRight,
}

/// A backend-agnostic drawing instruction in canvas coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum DrawOp {
    /// Fill `rect` after applying `transform` (used for rotated diamonds).
    FillRect {
        rect: Rect,
        transform: Affine,
        color: Rgba8,
    },
    StrokeRect {
        rect: Rect,
        width: f64,
        color: Rgba8,
    },
    /// Straight segments, already clipped, stroked with a constant width.
    StrokeLines {
        lines: Vec<(Point, Point)>,
        width: f64,
        color: Rgba8,
    },
    Text {
        text: String,
        anchor: Point,
        align: TextAnchor,
        size_px: f32,
        color: Rgba8,
    },
}

/// A full drawing: canvas size, background and ordered ops (later ops paint over earlier ones).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Scene {
    pub canvas: Canvas,
    pub background: Rgba8,
    pub ops: Vec<DrawOp>,
}

impl Scene {
    pub fn new(canvas: Canvas, background: Rgba8) -> Self {
        Self {
            canvas,
            background,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.push(DrawOp::FillRect {
            rect,
            transform: Affine::IDENTITY,
            color,
        });
    }

    /// Axis-aligned square of side `size` rotated 45 degrees around `center`.
    pub fn fill_diamond(&mut self, center: Point, size: f64, color: Rgba8) {
        let half = size / 2.0;
        self.push(DrawOp::FillRect {
            rect: Rect::new(-half, -half, half, half),
            transform: Affine::translate(center.to_vec2()) * Affine::rotate(std::f64::consts::FRAC_PI_4),
            color,
        });
    }

    pub fn text_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
    }
}
