//! Move/line instruction set over the normalized 40×40 cell space.

use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{Point, Vec2},
        error::{CellGlyphError, CellGlyphResult},
    },
    surface::DrawingSurface,
};

/// One path command with its offset in normalized cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instruction {
    MoveTo(Vec2),
    LineTo(Vec2),
}

impl Instruction {
    pub const fn move_to(dx: f64, dy: f64) -> Self {
        Self::MoveTo(Vec2::new(dx, dy))
    }

    pub const fn line_to(dx: f64, dy: f64) -> Self {
        Self::LineTo(Vec2::new(dx, dy))
    }

    pub fn offset(self) -> Vec2 {
        match self {
            Self::MoveTo(d) | Self::LineTo(d) => d,
        }
    }

    /// Surface-space point: `origin + offset * scale`, unrounded.
    pub fn target(self, origin: Point, scale: f64) -> Point {
        origin + self.offset() * scale
    }
}

/// Untyped instruction as found in glyph data files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawInstruction {
    pub command: String,
    pub x: f64,
    pub y: f64,
}

impl TryFrom<RawInstruction> for Instruction {
    type Error = CellGlyphError;

    fn try_from(raw: RawInstruction) -> Result<Self, Self::Error> {
        match raw.command.as_str() {
            "move" => Ok(Self::move_to(raw.x, raw.y)),
            "line" => Ok(Self::line_to(raw.x, raw.y)),
            _ => Err(CellGlyphError::unknown_instruction(raw.command)),
        }
    }
}

impl From<Instruction> for RawInstruction {
    fn from(instruction: Instruction) -> Self {
        let (command, d) = match instruction {
            Instruction::MoveTo(d) => ("move", d),
            Instruction::LineTo(d) => ("line", d),
        };
        Self {
            command: command.to_owned(),
            x: d.x,
            y: d.y,
        }
    }
}

/// Apply one instruction to the surface's current path.
pub fn execute<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    origin: Point,
    scale: f64,
    instruction: Instruction,
) {
    let p = instruction.target(origin, scale);
    match instruction {
        Instruction::MoveTo(_) => surface.move_to(p),
        Instruction::LineTo(_) => surface.line_to(p),
    }
}

pub fn replay<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    origin: Point,
    scale: f64,
    instructions: &[Instruction],
) {
    for &instruction in instructions {
        execute(surface, origin, scale, instruction);
    }
}

/// Decode and apply untyped instructions, failing on the first unknown command.
///
/// Every instruction is decoded before any of them touches the surface.
pub fn replay_raw<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    origin: Point,
    scale: f64,
    raw: &[RawInstruction],
) -> CellGlyphResult<()> {
    let decoded = decode_all(raw)?;
    replay(surface, origin, scale, &decoded);
    Ok(())
}

pub fn decode_all(raw: &[RawInstruction]) -> CellGlyphResult<Vec<Instruction>> {
    raw.iter().cloned().map(Instruction::try_from).collect()
}
