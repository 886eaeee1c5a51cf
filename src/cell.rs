//! Cell drawing operations.
//!
//! The stroked operations share one protocol: validate and resolve the glyph, take the
//! surface's stroke-style slot, begin a path, replay glyph then border box, stroke, and
//! hand the slot back. Validation happens before the slot is taken, so a rejected call
//! leaves the surface untouched.

use crate::{
    color::Color,
    foundation::{
        core::Point,
        error::{CellGlyphError, CellGlyphResult},
    },
    glyph::{BORDER_BOX, Digit, GlyphSet, Symbol, lookup},
    path::{Instruction, replay},
    surface::{DrawingSurface, StrokeStyleGuard},
};

/// Append the border box outline to the current path.
///
/// Does not begin a path, stroke, or touch the stroke style; callers compose it.
pub fn draw_box<S: DrawingSurface + ?Sized>(surface: &mut S, origin: Point, scale: f64) {
    replay(surface, origin, scale, BORDER_BOX);
}

/// Draw a revealed count with its border.
///
/// Fails with `UnknownSymbol` unless `digit` converts to `1..=8`; nothing is drawn then.
pub fn draw_number<S, D>(
    surface: &mut S,
    origin: Point,
    digit: D,
    color: Color,
    scale: f64,
) -> CellGlyphResult<()>
where
    S: DrawingSurface + ?Sized,
    D: TryInto<Digit>,
    CellGlyphError: From<D::Error>,
{
    let digit: Digit = digit.try_into()?;
    stroke_cell(surface, origin, lookup(Symbol::Number(digit)), color, scale);
    Ok(())
}

pub fn draw_bomb<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    origin: Point,
    color: Color,
    scale: f64,
) {
    stroke_cell(surface, origin, lookup(Symbol::Mine), color, scale);
}

/// Hidden cell: border box only.
pub fn draw_undiscovered<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    origin: Point,
    color: Color,
    scale: f64,
) {
    stroke_cell(surface, origin, &[], color, scale);
}

pub fn draw_symbol<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    origin: Point,
    symbol: Symbol,
    color: Color,
    scale: f64,
) {
    stroke_cell(surface, origin, lookup(symbol), color, scale);
}

fn stroke_cell<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    origin: Point,
    glyph: &[Instruction],
    color: Color,
    scale: f64,
) {
    let mut guard = StrokeStyleGuard::acquire(surface, color);
    guard.begin_path();
    replay(&mut *guard, origin, scale, glyph);
    draw_box(&mut *guard, origin, scale);
    guard.stroke();
}

/// Cell renderer over an arbitrary (possibly data-loaded) glyph set.
#[derive(Clone, Debug, Default)]
pub struct CellRenderer {
    glyphs: GlyphSet,
}

impl CellRenderer {
    pub fn new(glyphs: GlyphSet) -> Self {
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &GlyphSet {
        &self.glyphs
    }

    pub fn draw_number<S, D>(
        &self,
        surface: &mut S,
        origin: Point,
        digit: D,
        color: Color,
        scale: f64,
    ) -> CellGlyphResult<()>
    where
        S: DrawingSurface + ?Sized,
        D: TryInto<Digit>,
        CellGlyphError: From<D::Error>,
    {
        let digit: Digit = digit.try_into()?;
        self.draw_symbol(surface, origin, Symbol::Number(digit), color, scale);
        Ok(())
    }

    pub fn draw_bomb<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        origin: Point,
        color: Color,
        scale: f64,
    ) {
        self.draw_symbol(surface, origin, Symbol::Mine, color, scale);
    }

    pub fn draw_undiscovered<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        origin: Point,
        color: Color,
        scale: f64,
    ) {
        draw_undiscovered(surface, origin, color, scale);
    }

    pub fn draw_symbol<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        origin: Point,
        symbol: Symbol,
        color: Color,
        scale: f64,
    ) {
        stroke_cell(surface, origin, self.glyphs.get(symbol), color, scale);
    }
}

#[cfg(test)]
#[path = "../tests/unit/cell/draw.rs"]
mod tests;
