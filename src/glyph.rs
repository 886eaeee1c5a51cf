//! Fixed stroke tables for digits 1–8, the mine marker and the border box.
//!
//! Digit strokes run between the anchors of a 3×3 sub-grid (x, y ∈ {5, 20, 35}), in the
//! manner of a seven-segment display. The tables are literal data.

use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{
    foundation::{
        core::BOX_UNITS,
        error::{CellGlyphError, CellGlyphResult},
    },
    path::{Instruction, RawInstruction, decode_all},
};

const fn m(x: f64, y: f64) -> Instruction {
    Instruction::move_to(x, y)
}

const fn l(x: f64, y: f64) -> Instruction {
    Instruction::line_to(x, y)
}

const ONE: &[Instruction] = &[m(20.0, 5.0), l(20.0, 35.0)];

const TWO: &[Instruction] = &[
    m(5.0, 5.0),
    l(35.0, 5.0),
    l(35.0, 20.0),
    l(5.0, 20.0),
    l(5.0, 35.0),
    l(35.0, 35.0),
];

const THREE: &[Instruction] = &[
    m(5.0, 5.0),
    l(35.0, 5.0),
    l(35.0, 20.0),
    l(20.0, 20.0),
    l(35.0, 20.0),
    l(35.0, 35.0),
    l(5.0, 35.0),
];

const FOUR: &[Instruction] = &[
    m(5.0, 5.0),
    l(5.0, 20.0),
    l(35.0, 20.0),
    m(35.0, 5.0),
    l(35.0, 35.0),
];

const FIVE: &[Instruction] = &[
    m(35.0, 5.0),
    l(5.0, 5.0),
    l(5.0, 20.0),
    l(35.0, 20.0),
    l(35.0, 35.0),
    l(5.0, 35.0),
];

const SIX: &[Instruction] = &[
    m(35.0, 5.0),
    l(5.0, 5.0),
    l(5.0, 35.0),
    l(35.0, 35.0),
    l(35.0, 20.0),
    l(5.0, 20.0),
];

const SEVEN: &[Instruction] = &[m(5.0, 5.0), l(35.0, 5.0), l(5.0, 35.0)];

const EIGHT: &[Instruction] = &[
    m(5.0, 5.0),
    l(35.0, 5.0),
    l(35.0, 35.0),
    l(5.0, 35.0),
    l(5.0, 5.0),
    m(5.0, 20.0),
    l(35.0, 20.0),
];

/// Stroke tables for digits 1..=8, index `digit - 1`.
pub static DIGIT_GLYPHS: [&[Instruction]; 8] = [ONE, TWO, THREE, FOUR, FIVE, SIX, SEVEN, EIGHT];

/// Four-stroke cross: vertical, horizontal, then both diagonals.
pub static MINE_GLYPH: &[Instruction] = &[
    m(20.0, 5.0),
    l(20.0, 35.0),
    m(5.0, 20.0),
    l(35.0, 20.0),
    m(5.0, 5.0),
    l(35.0, 35.0),
    m(35.0, 5.0),
    l(5.0, 35.0),
];

/// Closed square outline appended to every cell.
pub static BORDER_BOX: &[Instruction] = &[
    m(0.0, 0.0),
    l(BOX_UNITS, 0.0),
    l(BOX_UNITS, BOX_UNITS),
    l(0.0, BOX_UNITS),
    l(0.0, 0.0),
];

/// A revealed-cell count in `1..=8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

impl Digit {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(value: u8) -> CellGlyphResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CellGlyphError::unknown_symbol(value.to_string()))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = CellGlyphError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Digit {
    type Error = CellGlyphError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| CellGlyphError::unknown_symbol(value.to_string()))
            .and_then(Self::new)
    }
}

impl TryFrom<i32> for Digit {
    type Error = CellGlyphError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<f64> for Digit {
    type Error = CellGlyphError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.fract() != 0.0 || !(1.0..=8.0).contains(&value) {
            return Err(CellGlyphError::unknown_symbol(value.to_string()));
        }
        Self::new(value as u8)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything a revealed or exploded cell can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Number(Digit),
    Mine,
}

impl Symbol {
    pub const MINE_KEY: &'static str = "mine";

    /// All nine symbols: digits ascending, then the mine.
    pub fn all() -> [Symbol; 9] {
        let mut out = [Symbol::Mine; 9];
        for (slot, n) in out.iter_mut().zip(Digit::MIN..=Digit::MAX) {
            *slot = Symbol::Number(Digit(n));
        }
        out
    }

    fn index(self) -> usize {
        match self {
            Symbol::Number(d) => usize::from(d.get() - 1),
            Symbol::Mine => 8,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Number(d) => write!(f, "{d}"),
            Symbol::Mine => f.write_str(Self::MINE_KEY),
        }
    }
}

impl FromStr for Symbol {
    type Err = CellGlyphError;

    /// Accepts exactly `"1"`..`"8"` and `"mine"`; no padding, signs or leading zeros.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::MINE_KEY {
            return Ok(Symbol::Mine);
        }
        match s.as_bytes() {
            [b @ b'1'..=b'8'] => Ok(Symbol::Number(Digit(b - b'0'))),
            _ => Err(CellGlyphError::unknown_symbol(s)),
        }
    }
}

impl From<Digit> for Symbol {
    fn from(d: Digit) -> Self {
        Symbol::Number(d)
    }
}

/// Built-in stroke table for a symbol (border box excluded).
pub fn lookup(symbol: Symbol) -> &'static [Instruction] {
    match symbol {
        Symbol::Number(d) => DIGIT_GLYPHS[usize::from(d.get() - 1)],
        Symbol::Mine => MINE_GLYPH,
    }
}

/// [`lookup`] by text key (`"1"`..`"8"` or `"mine"`).
pub fn lookup_key(key: &str) -> CellGlyphResult<&'static [Instruction]> {
    key.parse().map(lookup)
}

/// A complete, validated glyph table that may come from data files.
///
/// Holds exactly one stroke list per symbol. Every coordinate lies inside the border
/// box, so glyphs from a set never draw outside their cell.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphSet {
    glyphs: [Vec<Instruction>; 9],
}

impl GlyphSet {
    pub fn builtin() -> Self {
        Self {
            glyphs: Symbol::all().map(|s| lookup(s).to_vec()),
        }
    }

    pub fn get(&self, symbol: Symbol) -> &[Instruction] {
        &self.glyphs[symbol.index()]
    }

    pub fn get_key(&self, key: &str) -> CellGlyphResult<&[Instruction]> {
        Ok(self.get(key.parse()?))
    }

    /// Load from `{"1": [{"command": "move", "x": 20, "y": 5}, ...], ..., "mine": [...]}`.
    pub fn from_json(json: &str) -> CellGlyphResult<Self> {
        let raw: BTreeMap<String, Vec<RawInstruction>> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Keys must be exactly `"1"`..`"8"` or `"mine"`, and all nine must be present.
    pub fn from_raw(raw: BTreeMap<String, Vec<RawInstruction>>) -> CellGlyphResult<Self> {
        let mut slots: [Option<Vec<Instruction>>; 9] = Default::default();

        for (key, instructions) in raw {
            let symbol: Symbol = key.parse()?;
            let decoded = decode_all(&instructions)?;
            validate_glyph(symbol, &decoded)?;
            let slot = &mut slots[symbol.index()];
            if slot.is_some() {
                return Err(CellGlyphError::validation(format!(
                    "glyph set defines '{symbol}' more than once"
                )));
            }
            *slot = Some(decoded);
        }

        let mut missing = Vec::new();
        for symbol in Symbol::all() {
            if slots[symbol.index()].is_none() {
                missing.push(symbol.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(CellGlyphError::validation(format!(
                "glyph set is missing symbols: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            glyphs: slots.map(Option::unwrap_or_default),
        })
    }

    pub fn to_raw(&self) -> BTreeMap<String, Vec<RawInstruction>> {
        Symbol::all()
            .into_iter()
            .map(|s| {
                let raw = self.get(s).iter().copied().map(RawInstruction::from).collect();
                (s.to_string(), raw)
            })
            .collect()
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_glyph(symbol: Symbol, instructions: &[Instruction]) -> CellGlyphResult<()> {
    if instructions.is_empty() {
        return Err(CellGlyphError::validation(format!(
            "glyph \"{symbol}\" has no instructions"
        )));
    }
    for i in instructions {
        let d = i.offset();
        let inside = |v: f64| v.is_finite() && (0.0..=BOX_UNITS).contains(&v);
        if !inside(d.x) || !inside(d.y) {
            return Err(CellGlyphError::validation(format!(
                "glyph \"{symbol}\" point ({}, {}) lies outside 0..={BOX_UNITS}",
                d.x, d.y
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/glyph/table.rs"]
mod tests;
