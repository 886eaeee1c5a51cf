//! Board-level layout and rendering: one cell draw per grid position.

use serde::{Deserialize, Serialize};

use crate::{
    cell::CellRenderer,
    color::Color,
    foundation::{
        core::{Point, cell_px},
        error::{CellGlyphError, CellGlyphResult},
    },
    glyph::Digit,
    surface::{
        DrawingSurface,
        raster::{FrameRGBA, RasterSurface, RenderSettings},
    },
};

/// Pixel origin (top-left corner) of the cell at `(col, row)`.
pub fn cell_origin(col: u32, row: u32, scale: f64) -> Point {
    Point::new(f64::from(col) * cell_px(scale), f64::from(row) * cell_px(scale))
}

/// Smallest whole-pixel canvas holding `cols × rows` cells.
pub fn board_size_px(cols: u32, rows: u32, scale: f64) -> (u32, u32) {
    let w = (f64::from(cols) * cell_px(scale)).ceil();
    let h = (f64::from(rows) * cell_px(scale)).ceil();
    (w as u32, h as u32)
}

/// What the game layer decided a cell should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    /// Revealed with this many adjacent mines; `0` shows an empty bordered cell.
    Revealed(u8),
    Mine,
}

impl CellView {
    pub fn from_char(c: char) -> CellGlyphResult<Self> {
        match c {
            '#' => Ok(Self::Hidden),
            '.' | '0' => Ok(Self::Revealed(0)),
            '*' => Ok(Self::Mine),
            '1'..='8' => Ok(Self::Revealed(c as u8 - b'0')),
            _ => Err(CellGlyphError::validation(format!(
                "unknown board cell '{c}' (expected one of # . 0-8 *)"
            ))),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Revealed(0) => '.',
            Self::Revealed(n) => char::from(b'0' + n.min(9)),
            Self::Mine => '*',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub hidden: Color,
    pub revealed: Color,
    pub mine: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            hidden: Color::rgb(128, 128, 128),
            revealed: Color::rgb(20, 20, 20),
            mine: Color::rgb(200, 30, 30),
        }
    }
}

/// Row-major grid of cell views.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cols: u32,
    rows: u32,
    cells: Vec<CellView>,
}

impl Board {
    pub fn new(cols: u32, rows: u32, cells: Vec<CellView>) -> CellGlyphResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(CellGlyphError::validation("board must have at least one cell"));
        }
        let expected = (cols as usize)
            .checked_mul(rows as usize)
            .ok_or_else(|| CellGlyphError::validation("board dimensions overflow"))?;
        if cells.len() != expected {
            return Err(CellGlyphError::validation(format!(
                "board is {cols}x{rows} but has {} cells",
                cells.len()
            )));
        }
        Ok(Self { cols, rows, cells })
    }

    pub fn filled(cols: u32, rows: u32, view: CellView) -> CellGlyphResult<Self> {
        let n = (cols as usize).saturating_mul(rows as usize);
        Self::new(cols, rows, vec![view; n])
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn get(&self, col: u32, row: u32) -> Option<CellView> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }

    pub fn set(&mut self, col: u32, row: u32, view: CellView) -> CellGlyphResult<()> {
        if col >= self.cols || row >= self.rows {
            return Err(CellGlyphError::validation(format!(
                "cell ({col}, {row}) is outside a {}x{} board",
                self.cols, self.rows
            )));
        }
        self.cells[row as usize * self.cols as usize + col as usize] = view;
        Ok(())
    }

    /// Cells with their `(col, row)`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, CellView)> + '_ {
        let cols = self.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &view)| ((i % cols) as u32, (i / cols) as u32, view))
    }

    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols as usize)
            .map(|row| row.iter().map(|v| v.to_char()).collect())
            .collect()
    }
}

fn one() -> f64 {
    1.0
}

/// JSON board document.
///
/// Rows are strings of `#` (hidden), `.` or `0` (revealed, no neighbours),
/// `1`–`8` (revealed count) and `*` (mine).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardDoc {
    #[serde(default = "one")]
    pub scale: f64,
    #[serde(default)]
    pub palette: Palette,
    pub rows: Vec<String>,
}

impl BoardDoc {
    pub fn from_json(json: &str) -> CellGlyphResult<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn validate(&self) -> CellGlyphResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(CellGlyphError::validation(format!(
                "board scale must be a positive number, got {}",
                self.scale
            )));
        }
        self.board().map(|_| ())
    }

    pub fn board(&self) -> CellGlyphResult<Board> {
        let rows = u32::try_from(self.rows.len())
            .map_err(|_| CellGlyphError::validation("too many board rows"))?;
        let cols = self.rows.first().map_or(0, |r| r.chars().count());

        let mut cells = Vec::with_capacity(cols * self.rows.len());
        for (y, row) in self.rows.iter().enumerate() {
            let n = row.chars().count();
            if n != cols {
                return Err(CellGlyphError::validation(format!(
                    "board row {y} has {n} cells, expected {cols}"
                )));
            }
            for c in row.chars() {
                cells.push(CellView::from_char(c)?);
            }
        }

        let cols = u32::try_from(cols)
            .map_err(|_| CellGlyphError::validation("too many board columns"))?;
        Board::new(cols, rows, cells)
    }
}

/// Draw one cell. Only invalid revealed counts (above 8) can fail.
pub fn draw_cell<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    renderer: &CellRenderer,
    origin: Point,
    view: CellView,
    palette: &Palette,
    scale: f64,
) -> CellGlyphResult<()> {
    match view {
        CellView::Hidden => renderer.draw_undiscovered(surface, origin, palette.hidden, scale),
        CellView::Revealed(0) => {
            renderer.draw_undiscovered(surface, origin, palette.revealed, scale)
        }
        CellView::Revealed(n) => {
            renderer.draw_number(surface, origin, Digit::new(n)?, palette.revealed, scale)?
        }
        CellView::Mine => renderer.draw_bomb(surface, origin, palette.mine, scale),
    }
    Ok(())
}

/// Draw every cell of `board`, row-major, anchored at the surface origin.
#[tracing::instrument(skip_all, fields(cols = board.cols(), rows = board.rows(), scale = scale))]
pub fn draw_board<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    renderer: &CellRenderer,
    board: &Board,
    palette: &Palette,
    scale: f64,
) -> CellGlyphResult<()> {
    for (col, row, view) in board.iter() {
        draw_cell(
            surface,
            renderer,
            cell_origin(col, row, scale),
            view,
            palette,
            scale,
        )?;
    }
    tracing::debug!(cells = board.cells.len(), "board drawn");
    Ok(())
}

/// Rasterize a board document onto a fresh canvas sized to fit it.
pub fn render_board(
    doc: &BoardDoc,
    renderer: &CellRenderer,
    settings: &RenderSettings,
) -> CellGlyphResult<FrameRGBA> {
    doc.validate()?;
    let board = doc.board()?;
    let (w, h) = board_size_px(board.cols(), board.rows(), doc.scale);
    tracing::debug!(width = w, height = h, "rendering board");

    let mut surface = RasterSurface::new(w, h, settings)?;
    draw_board(&mut surface, renderer, &board, &doc.palette, doc.scale)?;
    Ok(surface.finish())
}

#[cfg(test)]
#[path = "../tests/unit/board/layout.rs"]
mod tests;
