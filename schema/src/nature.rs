use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::errors::ParseError;
use crate::stat_types::StatType;

/// One of the 25 natures. A nature is either neutral or boosts one
/// nature-affected stat by 10% while reducing another by 10%.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Nature {
    Hardy,
    Docile,
    Serious,
    Bashful,
    Quirky,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
}

/// How a nature treats one particular stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NatureModifier {
    Boosted,
    Reduced,
    Neutral,
}

impl NatureModifier {
    /// Applies the modifier to a computed stat, rounding down.
    pub fn apply(self, value: u32) -> u32 {
        match self {
            NatureModifier::Boosted => value * 11 / 10,
            NatureModifier::Reduced => value * 9 / 10,
            NatureModifier::Neutral => value,
        }
    }
}

impl Nature {
    /// The (boosted, reduced) stat pair, or `None` for the neutral natures.
    pub fn stat_changes(self) -> Option<(StatType, StatType)> {
        use StatType::*;

        match self {
            Nature::Hardy | Nature::Docile | Nature::Serious | Nature::Bashful | Nature::Quirky => {
                None
            }
            Nature::Lonely => Some((Attack, Defense)),
            Nature::Brave => Some((Attack, Speed)),
            Nature::Adamant => Some((Attack, SpecialAttack)),
            Nature::Naughty => Some((Attack, SpecialDefense)),
            Nature::Bold => Some((Defense, Attack)),
            Nature::Relaxed => Some((Defense, Speed)),
            Nature::Impish => Some((Defense, SpecialAttack)),
            Nature::Lax => Some((Defense, SpecialDefense)),
            Nature::Timid => Some((Speed, Attack)),
            Nature::Hasty => Some((Speed, Defense)),
            Nature::Jolly => Some((Speed, SpecialAttack)),
            Nature::Naive => Some((Speed, SpecialDefense)),
            Nature::Modest => Some((SpecialAttack, Attack)),
            Nature::Mild => Some((SpecialAttack, Defense)),
            Nature::Quiet => Some((SpecialAttack, Speed)),
            Nature::Rash => Some((SpecialAttack, SpecialDefense)),
            Nature::Calm => Some((SpecialDefense, Attack)),
            Nature::Gentle => Some((SpecialDefense, Defense)),
            Nature::Sassy => Some((SpecialDefense, Speed)),
            Nature::Careful => Some((SpecialDefense, SpecialAttack)),
        }
    }

    pub fn modifier_for(self, stat: StatType) -> NatureModifier {
        match self.stat_changes() {
            Some((boosted, _)) if boosted == stat => NatureModifier::Boosted,
            Some((_, reduced)) if reduced == stat => NatureModifier::Reduced,
            _ => NatureModifier::Neutral,
        }
    }

    /// Parses a nature name, naming the rejected input on failure.
    pub fn parse(name: &str) -> Result<Self, ParseError> {
        Nature::from_str(name.trim()).map_err(|_| ParseError::UnknownNature(name.to_string()))
    }

    /// One line per nature: "Lonely: +Attack; -Defense" or "Hardy: No effects".
    pub fn listing() -> Vec<String> {
        Nature::iter()
            .map(|nature| match nature.stat_changes() {
                Some((boosted, reduced)) => format!("{}: +{}; -{}", nature, boosted, reduced),
                None => format!("{}: No effects", nature),
            })
            .collect()
    }
}
