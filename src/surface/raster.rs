use std::path::Path;

use anyhow::Context as _;
use vello_cpu::{kurbo as cpu_kurbo, peniko};

use crate::{
    color::Color,
    foundation::{
        core::Point,
        error::{CellGlyphError, CellGlyphResult},
    },
    surface::DrawingSurface,
};

pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

const STROKE_WIDTH_ENV: &str = "CELLGLYPH_STROKE_WIDTH";

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    /// Straight RGBA8 background; `None` leaves the canvas transparent.
    pub clear_rgba: Option<[u8; 4]>,
    pub stroke_width: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: Some([255, 255, 255, 255]),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl RenderSettings {
    /// Defaults, with `CELLGLYPH_STROKE_WIDTH` applied when it holds a positive number.
    pub fn from_env() -> Self {
        let raw = std::env::var(STROKE_WIDTH_ENV).ok();
        Self {
            stroke_width: stroke_width_override(raw.as_deref()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> CellGlyphResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(CellGlyphError::validation(format!(
                "stroke width must be a positive number, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }
}

/// Straight (non-premultiplied) RGBA8 pixels, row-major.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn save_png(&self, path: &Path) -> CellGlyphResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }

        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// CPU raster host backed by `vello_cpu`.
///
/// Path building follows canvas rules: a `line_to` with no current point only moves.
/// `stroke` does not consume the path; `begin_path` does.
pub struct RasterSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    path: cpu_kurbo::BezPath,
    has_current_point: bool,
    style: Color,
    stroke_width: f64,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, settings: &RenderSettings) -> CellGlyphResult<Self> {
        settings.validate()?;
        if width == 0 || height == 0 {
            return Err(CellGlyphError::validation("surface must be at least 1x1"));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| CellGlyphError::validation("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| CellGlyphError::validation("surface height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        if let Some([r, g, b, a]) = settings.clear_rgba {
            ctx.set_paint(peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&cpu_kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width_u16),
                f64::from(height_u16),
            ));
        }

        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx,
            path: cpu_kurbo::BezPath::new(),
            has_current_point: false,
            style: Color::BLACK,
            stroke_width: settings.stroke_width,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Rasterize everything stroked so far.
    pub fn finish(mut self) -> FrameRGBA {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);

        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
        }
    }
}

impl DrawingSurface for RasterSurface {
    fn begin_path(&mut self) {
        self.path = cpu_kurbo::BezPath::new();
        self.has_current_point = false;
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(point_to_cpu(p));
        self.has_current_point = true;
    }

    fn line_to(&mut self, p: Point) {
        if self.has_current_point {
            self.path.line_to(point_to_cpu(p));
        } else {
            self.move_to(p);
        }
    }

    fn stroke(&mut self) {
        if self.path.elements().is_empty() {
            return;
        }
        let [r, g, b, a] = self.style.to_rgba8();
        self.ctx.set_paint(peniko::Color::from_rgba8(r, g, b, a));
        self.ctx
            .set_stroke(cpu_kurbo::Stroke::new(self.stroke_width));
        self.ctx.stroke_path(&self.path);
    }

    fn stroke_style(&self) -> Color {
        self.style
    }

    fn set_stroke_style(&mut self, style: Color) {
        self.style = style;
    }
}

fn stroke_width_override(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return DEFAULT_STROKE_WIDTH;
    };
    match raw.trim().parse::<f64>() {
        Ok(w) if w.is_finite() && w > 0.0 => w,
        _ => {
            tracing::warn!(
                value = raw,
                default = DEFAULT_STROKE_WIDTH,
                "ignoring invalid {STROKE_WIDTH_ENV}"
            );
            DEFAULT_STROKE_WIDTH
        }
    }
}

fn point_to_cpu(p: Point) -> cpu_kurbo::Point {
    cpu_kurbo::Point::new(p.x, p.y)
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            let straight = (u16::from(*c) * 255 + a / 2) / a;
            *c = straight.min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/raster.rs"]
mod tests;
