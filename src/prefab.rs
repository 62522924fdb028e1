use crate::errors::{MoveDataError, MoveDataResult, SpeciesDataError, SpeciesDataResult};
use crate::moves::MoveData;
use schema::{MoveCategory, PokemonSpecies, StatType};

const SPECIES_RON: &str = include_str!("../data/species.ron");
const MOVES_RON: &str = include_str!("../data/moves.ron");

/// The moveset handed to a combatant whose configuration names none.
pub const DEFAULT_MOVESET: [&str; 4] = ["Growl", "Sweet Scent", "Razor Leaf", "Vine Whip"];

/// The EV spread handed to a combatant whose configuration names none.
pub const DEFAULT_EVS: [(StatType, u16); 3] = [
    (StatType::Hitpoints, 252),
    (StatType::Attack, 252),
    (StatType::Defense, 6),
];

/// Every built-in species, in catalogue order.
pub fn species_catalogue() -> SpeciesDataResult<Vec<PokemonSpecies>> {
    ron::from_str(SPECIES_RON).map_err(|err| SpeciesDataError::MalformedData(err.to_string()))
}

/// Every built-in move, in catalogue order.
pub fn move_catalogue() -> MoveDataResult<Vec<MoveData>> {
    let moves: Vec<MoveData> =
        ron::from_str(MOVES_RON).map_err(|err| MoveDataError::MalformedData(err.to_string()))?;
    for move_data in &moves {
        validate_move(move_data)?;
    }
    Ok(moves)
}

/// Checks the invariants deserialization alone cannot.
fn validate_move(move_data: &MoveData) -> MoveDataResult<()> {
    if move_data.accuracy > 100 {
        return Err(MoveDataError::MalformedData(format!(
            "{} has accuracy {}",
            move_data.name, move_data.accuracy
        )));
    }
    if move_data.category == MoveCategory::Status {
        if let Some(change) = move_data
            .stage_changes
            .iter()
            .find(|change| !change.stat.is_stageable())
        {
            return Err(MoveDataError::MalformedData(format!(
                "{} changes the stage of {}, which has no stage",
                move_data.name, change.stat
            )));
        }
    } else if move_data.power == 0 {
        return Err(MoveDataError::MalformedData(format!(
            "{} is a damaging move without power",
            move_data.name
        )));
    }
    Ok(())
}

/// Looks a species up by name, ignoring case.
pub fn get_species(name: &str) -> SpeciesDataResult<PokemonSpecies> {
    species_catalogue()?
        .into_iter()
        .find(|species| species.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| SpeciesDataError::SpeciesNotFound(name.to_string()))
}

/// Looks a move up by name, ignoring case.
pub fn get_move(name: &str) -> MoveDataResult<MoveData> {
    move_catalogue()?
        .into_iter()
        .find(|move_data| move_data.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| MoveDataError::MoveNotFound(name.to_string()))
}

pub fn species_names() -> SpeciesDataResult<Vec<String>> {
    Ok(species_catalogue()?
        .into_iter()
        .map(|species| species.name)
        .collect())
}
