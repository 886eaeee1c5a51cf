//! cellglyph draws grid-game cell symbols as stroke paths.
//!
//! Digits 1–8, a mine marker and a hidden-cell border are defined as short move/line
//! programs over a 40×40-unit cell. Drawing replays a program at a pixel origin and
//! scale onto any host implementing [`DrawingSurface`].
//!
//! # Layers
//!
//! 1. **Glyphs**: static stroke tables ([`glyph`]) and the move/line interpreter ([`path`]).
//! 2. **Cells**: [`draw_number`], [`draw_bomb`], [`draw_undiscovered`] and [`draw_box`].
//!    Each stroked call borrows the surface's stroke style and always gives it back.
//! 3. **Hosts**: [`RecordingSurface`] (headless, logs primitives) and [`RasterSurface`]
//!    (CPU pixels via `vello_cpu`, PNG export).
//! 4. **Board**: cell layout, JSON board documents and palettes.
//!
//! The [`leaderboard`] module carries the score service protocol used by the game client.
#![forbid(unsafe_code)]

mod foundation;

pub mod board;
pub mod cell;
pub mod color;
pub mod glyph;
pub mod leaderboard;
pub mod path;
pub mod surface;

pub use board::{
    Board, BoardDoc, CellView, Palette, board_size_px, cell_origin, draw_board, draw_cell,
    render_board,
};
pub use cell::{
    CellRenderer, draw_bomb, draw_box, draw_number, draw_symbol, draw_undiscovered,
};
pub use color::Color;
pub use foundation::core::{BOX_UNITS, CELL_UNITS, Point, Vec2, cell_px};
pub use foundation::error::{CellGlyphError, CellGlyphResult};
pub use glyph::{Digit, GlyphSet, Symbol, lookup, lookup_key};
pub use path::{Instruction, RawInstruction};
pub use surface::raster::{FrameRGBA, RasterSurface, RenderSettings};
pub use surface::recording::{RecordingSurface, SurfaceOp};
pub use surface::{DrawingSurface, StrokeStyleGuard};
