/// Convenience result type used across cellglyph.
pub type CellGlyphResult<T> = Result<T, CellGlyphError>;

/// Top-level error taxonomy used by rendering, board and leaderboard APIs.
#[derive(thiserror::Error, Debug)]
pub enum CellGlyphError {
    /// A digit outside `1..=8`, or a glyph key that is neither a digit nor `mine`.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// A path command outside the closed `move`/`line` set.
    #[error("unknown instruction: {0}")]
    UnknownInstruction(String),

    /// Malformed user-provided data (board documents, colors, settings).
    #[error("validation error: {0}")]
    Validation(String),

    /// A leaderboard lookup that did not match any stored user.
    #[error("unknown user: {0}")]
    UnknownUser(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CellGlyphError {
    /// Build a [`CellGlyphError::UnknownSymbol`] value.
    pub fn unknown_symbol(key: impl Into<String>) -> Self {
        Self::UnknownSymbol(key.into())
    }

    /// Build a [`CellGlyphError::UnknownInstruction`] value.
    pub fn unknown_instruction(command: impl Into<String>) -> Self {
        Self::UnknownInstruction(command.into())
    }

    /// Build a [`CellGlyphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CellGlyphError::UnknownUser`] value.
    pub fn unknown_user(who: impl Into<String>) -> Self {
        Self::UnknownUser(who.into())
    }

    /// Build a [`CellGlyphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CellGlyphError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

impl From<std::convert::Infallible> for CellGlyphError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
