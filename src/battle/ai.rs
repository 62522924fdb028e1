//! A module for defining AI behaviors for battle opponents.

use crate::battle::engine::get_valid_actions;
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleState, PlayerAction, Side};

/// A trait for any system that can decide on a battle action.
/// This provides a common interface for different AI strategies.
pub trait Behavior {
    /// Inspects the battle state and decides on the next action for the given side.
    fn decide_action(&self, side: Side, battle_state: &BattleState, rng: &mut dyn BattleRng) -> PlayerAction;
}

/// Picks uniformly among the moves that still have PP, and forfeits when
/// there are none.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBehavior;

impl RandomBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomBehavior {
    fn decide_action(&self, side: Side, battle_state: &BattleState, rng: &mut dyn BattleRng) -> PlayerAction {
        let valid_actions = get_valid_actions(battle_state, side);
        match valid_actions.as_slice() {
            [] => PlayerAction::Forfeit,
            [only] => *only,
            actions => {
                let last = (actions.len() - 1) as u32;
                let choice = rng.next_in_range(0, last, "AI Move Choice") as usize;
                actions[choice]
            }
        }
    }
}

/// Always uses the move in one slot. Handy for scripted battles.
#[derive(Debug, Clone, Copy)]
pub struct FixedMoveBehavior {
    pub move_index: usize,
}

impl Behavior for FixedMoveBehavior {
    fn decide_action(&self, side: Side, battle_state: &BattleState, _rng: &mut dyn BattleRng) -> PlayerAction {
        let action = PlayerAction::UseMove {
            move_index: self.move_index,
        };
        if get_valid_actions(battle_state, side).contains(&action) {
            action
        } else {
            PlayerAction::Forfeit
        }
    }
}
