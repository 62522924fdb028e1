use crate::{PokemonType, StatType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    /// The base value for one of the six real stats; zero for the
    /// stage-only stats, which have no base value.
    pub fn get(&self, stat: StatType) -> u8 {
        match stat {
            StatType::Hitpoints => self.hp,
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpecialAttack => self.sp_attack,
            StatType::SpecialDefense => self.sp_defense,
            StatType::Speed => self.speed,
            StatType::CriticalRatio | StatType::Accuracy | StatType::Evasiveness => 0,
        }
    }
}

/// A move a species can learn, and the level it becomes available at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnableMove {
    pub name: String,
    pub level: u8,
}

/// Already-parsed species data, as handed to the engine by whatever owns
/// the on-disk format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub name: String,
    pub primary_type: PokemonType,
    pub secondary_type: PokemonType,
    pub gendered: bool,
    /// Meters.
    pub height: f32,
    /// Kilograms.
    pub weight: f32,
    pub base_stats: BaseStats,
    pub abilities: Vec<String>,
    pub learnset: Vec<LearnableMove>,
}

impl PokemonSpecies {
    pub fn can_learn_move(&self, move_name: &str, level: u8) -> bool {
        self.learnset
            .iter()
            .any(|learnable| learnable.name.eq_ignore_ascii_case(move_name) && learnable.level <= level)
    }
}
