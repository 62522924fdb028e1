use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, FromRepr};

use crate::errors::ParseError;

/// The lowest stage any stageable stat can reach.
pub const MIN_STAGE: i8 = -6;
/// The highest stage any stageable stat can reach.
pub const MAX_STAGE: i8 = 6;

/// A Pokemon's stats.
///
/// Three overlapping subsets matter during battle:
/// - stageable stats (everything but `Hitpoints`) carry a modifier stage,
/// - EV stats (the six "real" stats) accept effort values,
/// - nature-affected stats are the five non-HP real stats.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    FromRepr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum StatType {
    /// The amount of damage a Pokemon can take before fainting.
    Hitpoints = 0,
    Attack = 1,
    Defense = 2,
    #[strum(to_string = "Special Attack", serialize = "SpecialAttack")]
    SpecialAttack = 3,
    #[strum(to_string = "Special Defense", serialize = "SpecialDefense")]
    SpecialDefense = 4,
    Speed = 5,
    /// Affects the likelihood of critical hits.
    #[strum(to_string = "Critical Ratio", serialize = "CriticalRatio")]
    CriticalRatio = 6,
    Accuracy = 7,
    #[strum(to_string = "Evasiveness", serialize = "Evasion")]
    Evasiveness = 8,
}

impl TryFrom<u8> for StatType {
    type Error = ParseError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        StatType::from_repr(raw).ok_or(ParseError::UnknownStat(raw))
    }
}

impl StatType {
    /// Whether the stat can carry a modifier stage.
    pub fn is_stageable(self) -> bool {
        !matches!(self, StatType::Hitpoints)
    }

    /// Whether the stat accepts effort-value investment.
    pub fn is_ev_stat(self) -> bool {
        !matches!(
            self,
            StatType::Accuracy | StatType::CriticalRatio | StatType::Evasiveness
        )
    }

    /// Whether a nature can boost or reduce the stat.
    pub fn is_nature_affected(self) -> bool {
        self.is_stageable() && self.is_ev_stat()
    }
}

/// Selects the flavor text for a stage change of `amount` stages.
pub fn stat_change_flavor_text(amount: i8) -> &'static str {
    match amount {
        a if a >= 3 => "rose drastically!",
        2 => "rose sharply!",
        1 => "rose!",
        -1 => "fell!",
        -2 => "harshly fell!",
        a if a <= -3 => "severely fell!",
        _ => "didn't change!",
    }
}
