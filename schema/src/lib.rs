// pokesim Schema - Shared type definitions
// This crate contains the closed enumerations and species records that are
// shared between the battle engine and whatever loads data for it. Every enum
// here can be validated from its raw integer or string representation.

// Re-export the main types
pub use battle_data::*;
pub use errors::*;
pub use nature::*;
pub use pokemon_types::*;
pub use species_data::*;
pub use stat_types::*;

pub mod battle_data;
pub mod errors;
pub mod nature;
pub mod pokemon_types;
pub mod species_data;
pub mod stat_types;
