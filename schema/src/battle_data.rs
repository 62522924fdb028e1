use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, FromRepr};

use crate::errors::ParseError;

/// A persistent status condition. At most one applies to a Pokemon at a time;
/// "no status" is modelled as `Option::None` by the holders of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, FromRepr)]
#[repr(u8)]
pub enum StatusCondition {
    /// Speed is lowered and may be unable to act.
    Paralysis = 1,
    /// Taking periodic damage.
    Poison = 2,
    /// Attack is lowered, and taking periodic damage.
    Burn = 3,
    /// Unable to act.
    Sleep = 4,
    /// Unable to act.
    Freeze = 5,
}

impl StatusCondition {
    /// Parses the raw form, where 0 means "no status".
    pub fn from_raw(raw: u8) -> Result<Option<Self>, ParseError> {
        match raw {
            0 => Ok(None),
            _ => StatusCondition::from_repr(raw)
                .map(Some)
                .ok_or(ParseError::UnknownStatus(raw)),
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            StatusCondition::Paralysis => "PAR",
            StatusCondition::Poison => "PSN",
            StatusCondition::Burn => "BRN",
            StatusCondition::Sleep => "SLP",
            StatusCondition::Freeze => "FRZ",
        }
    }
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// The "kind" of a move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum MoveCategory {
    /// A move that doesn't deal direct damage.
    Status = 0,
    /// Uses Special Attack and Special Defense for damage calculation.
    Special = 1,
    /// Uses Attack and Defense for damage calculation.
    Physical = 2,
}

impl TryFrom<u8> for MoveCategory {
    type Error = ParseError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        MoveCategory::from_repr(raw).ok_or(ParseError::UnknownMoveCategory(raw))
    }
}

/// Who a status move's stage changes land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Target {
    User,
    Opponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "b" | "boy" | "man" | "masculine" => Ok(Gender::Male),
            "f" | "female" | "g" | "girl" | "woman" | "feminine" => Ok(Gender::Female),
            _ => Err(ParseError::UnknownGender(s.to_string())),
        }
    }
}
