use schema::{ParseError, StatType};
use thiserror::Error;

/// Main error type for the pokesim battle engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleEngineError {
    /// Error related to move data lookup or processing
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    /// Error related to species data lookup or processing
    #[error("Species data error: {0}")]
    SpeciesData(#[from] SpeciesDataError),
    /// Error related to configuring a Pokemon for battle
    #[error("Pokemon error: {0}")]
    Pokemon(#[from] PokemonError),
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// Error related to rendering battle state for display
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),
    /// Error related to loading battle configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// A raw enumerated value could not be recognised
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to move data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveDataError {
    /// The specified move was not found in the catalogue
    #[error("Move not found: {0}")]
    MoveNotFound(String),
    /// Move data is malformed or incomplete
    #[error("Malformed move data: {0}")]
    MalformedData(String),
}

/// Errors related to species data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesDataError {
    /// The specified species was not found in the catalogue
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    /// Species data is malformed or incomplete
    #[error("Malformed species data: {0}")]
    MalformedData(String),
}

/// Errors raised while setting a Pokemon up for battle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PokemonError {
    #[error("{0} is not a valid level!")]
    InvalidLevel(u8),
    #[error("{0} does not accept effort values")]
    NotAnEvStat(StatType),
    #[error("{amount} EVs would overflow {stat}! (max 252)")]
    EvStatOverflow { stat: StatType, amount: u16 },
    #[error("a total of {total} EVs is more than the 510 available")]
    EvTotalOverflow { total: u16 },
    #[error("{0} has no stat stage")]
    NotStageable(StatType),
    #[error("move slot {0} does not exist")]
    InvalidMoveSlot(usize),
    #[error("{species} cannot learn {move_name} at level {level}")]
    MoveNotLearnable {
        species: String,
        move_name: String,
        level: u8,
    },
    #[error("{0} already knows {1}!")]
    DuplicateMove(String, String),
    #[error("Nickname cannot be blank!")]
    EmptyNickname,
    #[error("Nickname too long! ({0} characters, max 48)")]
    NicknameTooLong(usize),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors related to player actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Move slot is out of bounds or empty
    #[error("Invalid move index: {0}")]
    InvalidMoveIndex(usize),
    /// The chosen move has no PP left
    #[error("{0} is out of PP!")]
    OutOfPp(String),
    /// Action is not valid in the current battle state
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Errors raised while rendering Pokemon side by side
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    #[error("Pokemon information is different lengths ({left} vs {right} lines)")]
    LineCountMismatch { left: usize, right: usize },
}

/// Errors raised while loading a battle configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("malformed battle configuration: {0}")]
    Malformed(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using PokemonError
pub type PokemonResult<T> = Result<T, PokemonError>;

/// Type alias for Results using MoveDataError
pub type MoveDataResult<T> = Result<T, MoveDataError>;

/// Type alias for Results using SpeciesDataError
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;
