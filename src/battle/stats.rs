use crate::battle::rng::BattleRng;
use crate::moves::MoveData;
use crate::pokemon::PokemonInst;
use schema::{StatType, StatusCondition};
use tracing::debug;

/// Multiplier for a regular stat at stage `stage`: `(2+s)/2` above zero,
/// `2/(2-s)` below.
pub fn stage_multiplier(stage: i8) -> f64 {
    let stage = stage as f64;
    if stage > 0.0 {
        (2.0 + stage) / 2.0
    } else if stage < 0.0 {
        2.0 / (2.0 - stage)
    } else {
        1.0
    }
}

/// Apply a stage multiplier to a stat value.
pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> f64 {
    base_stat as f64 * stage_multiplier(stage)
}

/// Accuracy stage as an exact `(numerator, denominator)`: `(3+s)/3` above
/// zero, `3/(3+s)` below.
///
/// The denominator reaches zero at -3 and goes negative past it; the
/// resulting infinite or negative thresholds are kept as they are.
pub fn accuracy_stage_ratio(stage: i8) -> (i64, i64) {
    let stage = stage as i64;
    match stage.signum() {
        1 => (3 + stage, 3),
        -1 => (3, 3 + stage),
        _ => (1, 1),
    }
}

/// Evasiveness stage as an exact `(numerator, denominator)`: `(3+s)/3` above
/// zero, `3/(3-s)` below.
pub fn evasion_stage_ratio(stage: i8) -> (i64, i64) {
    let stage = stage as i64;
    match stage.signum() {
        1 => (3 + stage, 3),
        -1 => (3, 3 - stage),
        _ => (1, 1),
    }
}

/// Calculate effective speed including stat stages and paralysis
pub fn effective_speed(pokemon: &PokemonInst) -> f64 {
    let mut speed = apply_stat_stage_multiplier(pokemon.stats.speed, pokemon.stage(StatType::Speed));

    if pokemon.status == Some(StatusCondition::Paralysis) {
        speed /= 2.0;
    }

    speed
}

/// The hit threshold for `move_data` used by `attacker` against `defender`,
/// already floored. Computed on integers so equal stages cancel exactly.
///
/// An accuracy stage of -3 has a zero denominator and yields an infinite
/// threshold, so every roll hits.
pub fn effective_accuracy(attacker: &PokemonInst, move_data: &MoveData, defender: &PokemonInst) -> f64 {
    let (accuracy_num, accuracy_den) = accuracy_stage_ratio(attacker.stage(StatType::Accuracy));
    let (evasion_num, evasion_den) = evasion_stage_ratio(defender.stage(StatType::Evasiveness));

    let mut numerator = move_data.accuracy as i64 * accuracy_num * evasion_den;
    let mut denominator = accuracy_den * evasion_num;
    if denominator == 0 {
        return f64::INFINITY;
    }
    if denominator < 0 {
        numerator = -numerator;
        denominator = -denominator;
    }
    numerator.div_euclid(denominator) as f64
}

/// Rolls an integer in `0..=100`; the move lands unless the roll is above the
/// effective accuracy, so a roll equal to it still hits.
pub fn move_hits(
    attacker: &PokemonInst,
    move_data: &MoveData,
    defender: &PokemonInst,
    rng: &mut dyn BattleRng,
) -> bool {
    let threshold = effective_accuracy(attacker, move_data, defender);
    let roll = rng.next_in_range(0, 100, "Accuracy Check");
    let hit = !(roll as f64 > threshold);
    debug!(
        attacker = attacker.name(),
        move_name = %move_data.name,
        roll,
        threshold,
        hit,
        "accuracy check"
    );
    hit
}
