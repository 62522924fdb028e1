use thiserror::Error;

/// Rejection of a raw value that does not name any member of a schema enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized internal Type representation: {0}")]
    UnknownType(u8),
    #[error("unrecognized internal Stat representation: {0}")]
    UnknownStat(u8),
    #[error("unrecognized internal Status representation: {0}")]
    UnknownStatus(u8),
    #[error("unrecognized internal MoveCategory representation: {0}")]
    UnknownMoveCategory(u8),
    #[error("not a nature: '{0}'")]
    UnknownNature(String),
    #[error("invalid gender representation: '{0}'")]
    UnknownGender(String),
}

/// Type alias for Results using ParseError
pub type ParseResult<T> = Result<T, ParseError>;
