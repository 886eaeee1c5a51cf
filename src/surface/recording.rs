use crate::{color::Color, foundation::core::Point, surface::DrawingSurface};

/// One primitive call observed by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    /// Stroke with the style that was current at the time of the call.
    Stroke(Color),
    SetStrokeStyle(Color),
}

/// Headless surface that logs every primitive instead of producing pixels.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    style: Color,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::with_style(Color::BLACK)
    }

    pub fn with_style(style: Color) -> Self {
        Self {
            ops: Vec::new(),
            style,
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Only the `MoveTo`/`LineTo` operations, in call order.
    pub fn path_ops(&self) -> Vec<SurfaceOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::MoveTo(_) | SurfaceOp::LineTo(_)))
            .cloned()
            .collect()
    }

    /// Every point passed to `move_to` or `line_to`, in call order.
    pub fn points(&self) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::MoveTo(p) | SurfaceOp::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// Styles each `stroke` call used.
    pub fn strokes(&self) -> Vec<Color> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Stroke(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(SurfaceOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(SurfaceOp::LineTo(p));
    }

    fn stroke(&mut self) {
        self.ops.push(SurfaceOp::Stroke(self.style));
    }

    fn stroke_style(&self) -> Color {
        self.style
    }

    fn set_stroke_style(&mut self, style: Color) {
        self.ops.push(SurfaceOp::SetStrokeStyle(style));
        self.style = style;
    }
}
