use crate::battle::runner::DEFAULT_MAX_TURNS;
use crate::errors::{BattleResult, ConfigError};
use crate::pokemon::PokemonInst;
use crate::prefab::{get_move, get_species, DEFAULT_EVS, DEFAULT_MOVESET};
use schema::{Nature, StatType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

fn default_level() -> u8 {
    50
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

/// How to set up one combatant before battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantConfig {
    /// A species from the built-in catalogue.
    pub species: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub nature: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Missing means the default spread of 252 HP, 252 Attack, 6 Defense.
    #[serde(default)]
    pub evs: Option<Vec<(StatType, u16)>>,
    /// Empty means the debug moveset, which skips the learnset check.
    #[serde(default)]
    pub moves: Vec<String>,
}

impl CombatantConfig {
    pub fn new(species: &str) -> Self {
        Self {
            species: species.to_string(),
            nickname: None,
            level: default_level(),
            nature: None,
            gender: None,
            evs: None,
            moves: Vec::new(),
        }
    }

    /// Builds a battle-ready combatant with stats derived and HP full.
    pub fn build(&self) -> BattleResult<PokemonInst> {
        let species = get_species(&self.species)?;
        let mut pokemon = PokemonInst::new(&species);

        if let Some(nickname) = &self.nickname {
            pokemon.set_nickname(nickname)?;
        }
        pokemon.set_level(self.level)?;
        if let Some(nature) = &self.nature {
            pokemon.set_nature(Nature::parse(nature)?);
        }
        if let Some(gender) = &self.gender {
            pokemon.set_gender(gender)?;
        }

        match &self.evs {
            Some(evs) => {
                for (stat, amount) in evs {
                    pokemon.set_ev(*stat, *amount)?;
                }
            }
            None => {
                for (stat, amount) in DEFAULT_EVS {
                    pokemon.set_ev(stat, amount)?;
                }
            }
        }
        pokemon.calculate_stats();

        if self.moves.is_empty() {
            for (slot, name) in DEFAULT_MOVESET.iter().enumerate() {
                pokemon.set_move(slot, get_move(name)?)?;
            }
        } else {
            for (slot, name) in self.moves.iter().enumerate() {
                pokemon.learn_move(slot, get_move(name)?)?;
            }
        }

        debug!(pokemon = pokemon.name(), level = pokemon.level, "combatant configured");
        Ok(pokemon)
    }
}

/// Everything needed to run an unattended battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Fixed seed for reproducible battles; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    pub player: CombatantConfig,
    pub opponent: CombatantConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        let mut opponent = CombatantConfig::new("Charmander");
        opponent.moves = vec![
            "Scratch".to_string(),
            "Growl".to_string(),
            "Ember".to_string(),
            "Swords Dance".to_string(),
        ];

        Self {
            seed: Some(0),
            max_turns: DEFAULT_MAX_TURNS,
            player: CombatantConfig::new("Bulbasaur"),
            opponent,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|err| ConfigError::Malformed(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_ron_str(&source)
    }

    /// Both combatants, player first.
    pub fn build_combatants(&self) -> BattleResult<(PokemonInst, PokemonInst)> {
        Ok((self.player.build()?, self.opponent.build()?))
    }
}
