//! Drawing surface capability and hosts.
//!
//! A surface is owned by the caller. Renderers only append path segments, stroke, and
//! borrow the stroke-style slot for the duration of one draw call through
//! [`StrokeStyleGuard`].

use std::ops::{Deref, DerefMut};

use crate::{color::Color, foundation::core::Point};

pub mod raster;
pub mod recording;

/// The five path/style primitives a 2D host must provide.
pub trait DrawingSurface {
    /// Discard the current path and start an empty one.
    fn begin_path(&mut self);

    /// Start a new subpath at `p` without drawing.
    fn move_to(&mut self, p: Point);

    /// Append a straight segment from the current point to `p`.
    fn line_to(&mut self, p: Point);

    /// Stroke the current path with the current stroke style.
    fn stroke(&mut self);

    fn stroke_style(&self) -> Color;

    fn set_stroke_style(&mut self, style: Color);
}

/// Scoped ownership of a surface's stroke-style slot.
///
/// Acquiring swaps in a new style and remembers the previous one; dropping the guard
/// puts the previous style back, on normal return, early `?` return, or unwinding.
pub struct StrokeStyleGuard<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
    saved: Color,
}

impl<'a, S: DrawingSurface + ?Sized> StrokeStyleGuard<'a, S> {
    pub fn acquire(surface: &'a mut S, style: Color) -> Self {
        let saved = surface.stroke_style();
        surface.set_stroke_style(style);
        Self { surface, saved }
    }

    /// Style that will be restored on drop.
    pub fn saved(&self) -> Color {
        self.saved
    }
}

impl<S: DrawingSurface + ?Sized> Deref for StrokeStyleGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for StrokeStyleGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> Drop for StrokeStyleGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_stroke_style(self.saved);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/guard.rs"]
mod tests;
