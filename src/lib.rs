//! pokesim battle engine
//!
//! One-on-one creature battles resolved turn by turn. Every random draw goes
//! through an injectable [`BattleRng`], so a seeded battle replays exactly.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod display;
pub mod errors;
pub mod moves;
pub mod pokemon;
pub mod prefab;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, Gender, MoveCategory, Nature, PokemonSpecies, PokemonType, StatType,
    StatusCondition, Target,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::ai::{Behavior, FixedMoveBehavior, RandomBehavior};
pub use battle::conditions::{InertStatusHook, StatusHook};
pub use battle::engine::{decide_order, get_valid_actions, resolve_turn};
pub use battle::rng::{BattleRng, ScriptedRng, SeededRng};
pub use battle::runner::{Battle, BattleOutcome};
pub use battle::state::{BattleEvent, BattleState, EventBus, GameState, PlayerAction, Side};

// Core runtime types for a battle.
pub use config::{BattleConfig, CombatantConfig};
pub use errors::{BattleEngineError, BattleResult};
pub use moves::{MoveData, MoveInstance};
pub use pokemon::PokemonInst;

// Primary data access functions.
pub use display::dump_pokemon;
pub use prefab::{get_move, get_species};
