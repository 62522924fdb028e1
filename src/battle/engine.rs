use crate::battle::conditions::StatusHook;
use crate::battle::damage::calculate_damage;
use crate::battle::rng::BattleRng;
use crate::battle::state::{
    BattleEvent, BattleState, EventBus, GameState, MoveReport, PlayerAction, Side,
};
use crate::battle::stats::{effective_speed, move_hits};
use crate::errors::{ActionError, BattleResult};
use crate::moves::MoveData;
use crate::pokemon::PokemonInst;
use ordered_float::OrderedFloat;
use schema::Target;
use std::cmp::Ordering;
use tracing::{debug, info};

impl PokemonInst {
    /// Uses the move in `slot` against `target`.
    ///
    /// One PP is spent whether or not the move lands. The caller is trusted
    /// to have checked PP; an empty pool just stays empty. A damaging hit
    /// lowers the target's HP, a status hit changes stages on this Pokemon or
    /// the target depending on the move.
    pub fn use_move(
        &mut self,
        slot: usize,
        target: &mut PokemonInst,
        rng: &mut dyn BattleRng,
    ) -> BattleResult<MoveReport> {
        let move_data = {
            let instance = self
                .moves
                .get_mut(slot)
                .and_then(Option::as_mut)
                .ok_or(ActionError::InvalidMoveIndex(slot))?;
            instance.spend_pp();
            instance.data.clone()
        };

        let mut report = MoveReport::default();

        if !move_hits(self, &move_data, target, rng) {
            let attacker = self.name().to_string();
            let move_name = move_data.name.clone();
            report.events.push(if move_data.is_damaging() {
                BattleEvent::MoveMissed {
                    attacker,
                    move_name,
                }
            } else {
                BattleEvent::MoveFailed {
                    attacker,
                    move_name,
                }
            });
            return Ok(report);
        }

        if move_data.is_damaging() {
            let outcome = calculate_damage(self, &move_data, target, rng);
            target.take_damage(outcome.damage);
            report.events.extend(outcome.events);
            report.events.push(BattleEvent::DamageDealt {
                target: target.name().to_string(),
                damage: outcome.damage,
                remaining_hp: target.hp,
            });
            return Ok(report);
        }

        for change in &move_data.stage_changes {
            let recipient: &mut PokemonInst = match move_data.target {
                Target::User => &mut *self,
                Target::Opponent => &mut *target,
            };
            report
                .events
                .push(recipient.change_stage(change.stat, change.delta)?);
        }
        Ok(report)
    }
}

/// Decides which side acts first this turn.
///
/// Higher move priority wins outright. Otherwise the faster Pokemon, by
/// effective speed, goes first; an exact tie is a coin flip.
pub fn decide_order(
    player: &PokemonInst,
    player_move: &MoveData,
    opponent: &PokemonInst,
    opponent_move: &MoveData,
    rng: &mut dyn BattleRng,
) -> Side {
    match player_move.priority.cmp(&opponent_move.priority) {
        Ordering::Greater => return Side::Player,
        Ordering::Less => return Side::Opponent,
        Ordering::Equal => {}
    }

    let player_speed = OrderedFloat(effective_speed(player));
    let opponent_speed = OrderedFloat(effective_speed(opponent));
    let first = match player_speed.cmp(&opponent_speed) {
        Ordering::Greater => Side::Player,
        Ordering::Less => Side::Opponent,
        Ordering::Equal => {
            if rng.coin_flip("Speed Tie") {
                Side::Player
            } else {
                Side::Opponent
            }
        }
    };
    debug!(
        player_speed = player_speed.into_inner(),
        opponent_speed = opponent_speed.into_inner(),
        ?first,
        "turn order decided"
    );
    first
}

/// Checks a move choice the way a player-facing menu would: the slot must
/// hold a move and the move must have PP left.
pub fn validate_move_choice(pokemon: &PokemonInst, move_index: usize) -> Result<(), ActionError> {
    let instance = pokemon
        .move_slot(move_index)
        .ok_or(ActionError::InvalidMoveIndex(move_index))?;
    if instance.pp == 0 {
        return Err(ActionError::OutOfPp(instance.name().to_string()));
    }
    Ok(())
}

/// Every action the side can legally take right now.
pub fn get_valid_actions(state: &BattleState, side: Side) -> Vec<PlayerAction> {
    let pokemon = state.combatant(side);
    let moves: Vec<PlayerAction> = pokemon
        .usable_move_slots()
        .into_iter()
        .map(|move_index| PlayerAction::UseMove { move_index })
        .collect();
    if moves.is_empty() {
        vec![PlayerAction::Forfeit]
    } else {
        moves
    }
}

fn validate_action(state: &BattleState, side: Side, action: PlayerAction) -> Result<(), ActionError> {
    match action {
        PlayerAction::UseMove { move_index } => {
            validate_move_choice(state.combatant(side), move_index)
        }
        PlayerAction::Forfeit => Ok(()),
    }
}

/// Main entry point for turn resolution.
///
/// Takes both sides' actions (indexed by [`Side::index`]), executes one
/// complete turn and returns the events it produced. A turn ends as soon as
/// either Pokemon faints; the second actor does not act.
pub fn resolve_turn(
    battle_state: &mut BattleState,
    actions: [PlayerAction; 2],
    rng: &mut dyn BattleRng,
    status_hook: &dyn StatusHook,
) -> BattleResult<EventBus> {
    if battle_state.game_state.is_finished() {
        return Err(ActionError::InvalidAction("the battle is already over".to_string()).into());
    }
    for side in [Side::Player, Side::Opponent] {
        validate_action(battle_state, side, actions[side.index()])?;
    }

    let mut bus = EventBus::new();
    initialize_turn(battle_state, &mut bus);

    if let Some(forfeits) = resolve_forfeits(battle_state, actions, &mut bus) {
        battle_state.game_state = forfeits;
        return Ok(bus);
    }

    let order = determine_action_order(battle_state, actions, rng)?;
    for side in order {
        let PlayerAction::UseMove { move_index } = actions[side.index()] else {
            continue;
        };
        execute_move(battle_state, side, move_index, rng, &mut bus)?;

        if battle_state.anyone_fainted() {
            break;
        }
    }

    if check_win_conditions(battle_state, &mut bus) {
        return Ok(bus);
    }

    execute_end_turn_phase(battle_state, status_hook, rng, &mut bus);
    if check_win_conditions(battle_state, &mut bus) {
        return Ok(bus);
    }

    finalize_turn(battle_state, &mut bus);
    Ok(bus)
}

fn initialize_turn(battle_state: &mut BattleState, bus: &mut EventBus) {
    battle_state.game_state = GameState::TurnInProgress;
    bus.push(BattleEvent::TurnStarted {
        turn_number: battle_state.turn_number,
    });
}

/// A side with nothing left to use gives up. Returns the finished game state
/// if anyone forfeited.
fn resolve_forfeits(
    battle_state: &BattleState,
    actions: [PlayerAction; 2],
    bus: &mut EventBus,
) -> Option<GameState> {
    let forfeited: Vec<Side> = [Side::Player, Side::Opponent]
        .into_iter()
        .filter(|side| actions[side.index()] == PlayerAction::Forfeit)
        .collect();

    for side in &forfeited {
        bus.push(BattleEvent::NoUsableMoves {
            pokemon: battle_state.combatant(*side).name().to_string(),
        });
    }

    let (game_state, winner) = match forfeited.as_slice() {
        [] => return None,
        [Side::Player] => (GameState::OpponentWin, Some(Side::Opponent)),
        [Side::Opponent] => (GameState::PlayerWin, Some(Side::Player)),
        _ => (GameState::Draw, None),
    };
    bus.push(BattleEvent::BattleEnded {
        winner: winner.map(|side| battle_state.combatant(side).name().to_string()),
    });
    Some(game_state)
}

/// Order in which the two sides act. Only meaningful when both use moves.
pub fn determine_action_order(
    battle_state: &BattleState,
    actions: [PlayerAction; 2],
    rng: &mut dyn BattleRng,
) -> BattleResult<[Side; 2]> {
    let chosen_move = |side: Side| -> BattleResult<MoveData> {
        match actions[side.index()] {
            PlayerAction::UseMove { move_index } => Ok(battle_state
                .combatant(side)
                .move_slot(move_index)
                .ok_or(ActionError::InvalidMoveIndex(move_index))?
                .data
                .clone()),
            PlayerAction::Forfeit => {
                Err(ActionError::InvalidAction("a forfeit has no turn order".to_string()).into())
            }
        }
    };
    let player_move = chosen_move(Side::Player)?;
    let opponent_move = chosen_move(Side::Opponent)?;

    let first = decide_order(
        battle_state.combatant(Side::Player),
        &player_move,
        battle_state.combatant(Side::Opponent),
        &opponent_move,
        rng,
    );
    Ok([first, first.other()])
}

fn execute_move(
    battle_state: &mut BattleState,
    side: Side,
    move_index: usize,
    rng: &mut dyn BattleRng,
    bus: &mut EventBus,
) -> BattleResult<()> {
    let (attacker, defender) = battle_state.actor_and_target(side);
    let move_name = attacker
        .move_slot(move_index)
        .map(|instance| instance.name().to_string())
        .ok_or(ActionError::InvalidMoveIndex(move_index))?;

    bus.push(BattleEvent::MoveUsed {
        pokemon: attacker.name().to_string(),
        move_name,
    });
    let report = attacker.use_move(move_index, defender, rng)?;
    bus.extend(report.events);
    Ok(())
}

/// Ends the battle if someone fainted. Returns true when it did.
fn check_win_conditions(battle_state: &mut BattleState, bus: &mut EventBus) -> bool {
    let player_fainted = battle_state.combatant(Side::Player).is_fainted();
    let opponent_fainted = battle_state.combatant(Side::Opponent).is_fainted();

    let (game_state, winner) = match (player_fainted, opponent_fainted) {
        (false, false) => return false,
        (true, true) => (GameState::Draw, None),
        (true, false) => (GameState::OpponentWin, Some(Side::Opponent)),
        (false, true) => (GameState::PlayerWin, Some(Side::Player)),
    };

    for side in [Side::Player, Side::Opponent] {
        let pokemon = battle_state.combatant(side);
        if pokemon.is_fainted() {
            bus.push(BattleEvent::PokemonFainted {
                pokemon: pokemon.name().to_string(),
            });
        }
    }
    let winner_name = winner.map(|side| battle_state.combatant(side).name().to_string());
    info!(?game_state, winner = ?winner_name, "battle finished");
    bus.push(BattleEvent::BattleEnded {
        winner: winner_name,
    });
    battle_state.game_state = game_state;
    true
}

fn execute_end_turn_phase(
    battle_state: &mut BattleState,
    status_hook: &dyn StatusHook,
    rng: &mut dyn BattleRng,
    bus: &mut EventBus,
) {
    for side in [Side::Player, Side::Opponent] {
        let pokemon = battle_state.combatant_mut(side);
        if !pokemon.is_fainted() {
            bus.extend(status_hook.end_of_turn(pokemon, rng));
        }
    }
}

fn finalize_turn(battle_state: &mut BattleState, bus: &mut EventBus) {
    bus.push(BattleEvent::TurnEnded);
    battle_state.turn_number += 1;
    battle_state.game_state = GameState::WaitingForActions;
}
