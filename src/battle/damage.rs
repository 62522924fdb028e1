use crate::battle::rng::BattleRng;
use crate::battle::state::BattleEvent;
use crate::battle::stats::stage_multiplier;
use crate::moves::MoveData;
use crate::pokemon::PokemonInst;
use ordered_float::OrderedFloat;
use schema::{MoveCategory, PokemonType, StatType, StatusCondition};
use tracing::debug;

pub const CRITICAL_HIT_MULTIPLIER: f64 = 1.5;
pub const SAME_TYPE_BONUS: f64 = 1.5;

/// Result of one damage calculation. The target is untouched; applying
/// `damage` is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub critical: bool,
    pub effectiveness: f64,
    pub events: Vec<BattleEvent>,
}

impl DamageOutcome {
    pub fn narration(&self) -> String {
        self.events
            .iter()
            .filter_map(BattleEvent::format)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Critical hit check. The move's crit stage and the attacker's Critical
/// Ratio stage add up; above 3 the hit always crits without a roll.
pub fn roll_critical_hit(attacker: &PokemonInst, move_data: &MoveData, rng: &mut dyn BattleRng) -> bool {
    let effective_stage = move_data.crit_stage as i32 + attacker.stage(StatType::CriticalRatio) as i32;
    if effective_stage > 3 {
        debug!(effective_stage, "guaranteed critical hit");
        return true;
    }

    let ratio = 1.0 / 2f64.powi(4 - effective_stage);
    let roll = rng.next_unit("Critical Hit");
    let critical = ratio > roll;
    debug!(effective_stage, ratio, roll, critical, "critical hit roll");
    critical
}

/// Combined multiplier of `move_data` against `defender`.
///
/// Shadow moves skip the chart: 0.5 against a shadow defender, 2.0 otherwise.
/// Everything else multiplies all four attack/defense type pairings, with
/// `Typeless` contributing 1.0.
pub fn type_effectiveness(move_data: &MoveData, defender: &PokemonInst) -> f64 {
    if move_data.is_shadow() {
        return PokemonType::shadow_effectiveness(defender.is_shadow());
    }

    move_data
        .types()
        .iter()
        .flat_map(|&attack| {
            defender
                .types
                .iter()
                .map(move |&defense| PokemonType::type_effectiveness(attack, defense))
        })
        .product()
}

/// 1.5 for each of the move's types the attacker shares; 2.25 when both do.
pub fn same_type_bonus(attacker: &PokemonInst, move_data: &MoveData) -> f64 {
    move_data
        .types()
        .iter()
        .filter(|&&move_type| attacker.has_type(move_type))
        .fold(1.0, |bonus, _| bonus * SAME_TYPE_BONUS)
}

/// Attack and defense after stages. A critical hit ignores the attacker's
/// negative attack stage and the defender's positive defense stage.
fn effective_attack_and_defense(
    attacker: &PokemonInst,
    move_data: &MoveData,
    defender: &PokemonInst,
    critical: bool,
) -> (f64, f64) {
    let (attack_stat, defense_stat) = match move_data.category {
        MoveCategory::Physical => (StatType::Attack, StatType::Defense),
        MoveCategory::Special | MoveCategory::Status => {
            (StatType::SpecialAttack, StatType::SpecialDefense)
        }
    };

    let mut attack = attacker.stats.get(attack_stat) as f64;
    let attack_stage = attacker.stage(attack_stat);
    if attack_stage > 0 || (attack_stage < 0 && !critical) {
        attack *= stage_multiplier(attack_stage);
    }

    let mut defense = defender.stats.get(defense_stat) as f64;
    let defense_stage = defender.stage(defense_stat);
    if (defense_stage > 0 && !critical) || defense_stage < 0 {
        defense *= stage_multiplier(defense_stage);
    }

    (attack, defense)
}

/// Damage dealt by a damaging move, with its narration.
///
/// Draw order: critical hit roll (unless guaranteed), then damage variance.
pub fn calculate_damage(
    attacker: &PokemonInst,
    move_data: &MoveData,
    defender: &PokemonInst,
    rng: &mut dyn BattleRng,
) -> DamageOutcome {
    let mut events = Vec::new();

    let mut damage = (2.0 * attacker.level as f64 / 5.0 + 2.0) * move_data.power as f64;

    let critical = roll_critical_hit(attacker, move_data, rng);
    if critical {
        events.push(BattleEvent::CriticalHit {
            attacker: attacker.name().to_string(),
        });
    }

    let (attack, defense) = effective_attack_and_defense(attacker, move_data, defender, critical);
    damage *= attack / defense;
    damage /= 50.0;
    damage += 2.0;

    let mut modifier = 0.85 + 0.15 * rng.next_unit("Damage Variance");
    modifier *= same_type_bonus(attacker, move_data);

    if attacker.status == Some(StatusCondition::Burn) && move_data.category == MoveCategory::Physical {
        modifier /= 2.0;
    }

    let effectiveness = type_effectiveness(move_data, defender);
    modifier *= effectiveness;
    events.push(BattleEvent::Effectiveness {
        multiplier: OrderedFloat(effectiveness),
    });

    let crit_multiplier = if critical { CRITICAL_HIT_MULTIPLIER } else { 1.0 };
    damage *= modifier * crit_multiplier;

    let damage = damage.floor().clamp(0.0, u16::MAX as f64) as u16;
    debug!(
        attacker = attacker.name(),
        defender = defender.name(),
        move_name = %move_data.name,
        attack,
        defense,
        modifier,
        critical,
        damage,
        "damage calculated"
    );

    DamageOutcome {
        damage,
        critical,
        effectiveness,
        events,
    }
}
