use crate::pokemon::PokemonInst;
use ordered_float::OrderedFloat;
use schema::StatType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Copy)]
pub enum GameState {
    WaitingForActions,
    TurnInProgress,
    PlayerWin,
    OpponentWin,
    Draw,
}

impl GameState {
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            GameState::PlayerWin | GameState::OpponentWin | GameState::Draw
        )
    }
}

/// One of the two sides of a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    // The index refers to the move's position (0-3) in the Pokémon's move list.
    UseMove { move_index: usize },

    Forfeit,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Move Events
    MoveUsed {
        pokemon: String,
        move_name: String,
    },
    MoveMissed {
        attacker: String,
        move_name: String,
    },
    MoveFailed {
        attacker: String,
        move_name: String,
    },
    CriticalHit {
        attacker: String,
    },
    Effectiveness {
        multiplier: OrderedFloat<f64>,
    },

    // Damage
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },

    // Stat Stages
    StageChanged {
        target: String,
        stat: StatType,
        delta: i8,
        old_stage: i8,
        new_stage: i8,
    },
    StageCapped {
        target: String,
        stat: StatType,
        rising: bool,
    },

    // Battle Flow
    NoUsableMoves {
        pokemon: String,
    },
    PokemonFainted {
        pokemon: String,
    },
    BattleEnded {
        winner: Option<String>,
    },
}

impl BattleEvent {
    /// Format this event into human-readable text.
    /// Returns `None` for events that should not be displayed.
    pub fn format(&self) -> Option<String> {
        match self {
            // === Turn Management Events ===
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => None,

            // === Move Events ===
            BattleEvent::MoveUsed { pokemon, move_name } => {
                Some(format!("{} used {}!", pokemon, move_name))
            }
            BattleEvent::MoveMissed { .. } => Some("... but it missed!".to_string()),
            BattleEvent::MoveFailed { .. } => Some("... but it failed!".to_string()),
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::Effectiveness { multiplier } => {
                let multiplier = multiplier.into_inner();
                if multiplier <= 0.0 {
                    Some("But it had no effect!".to_string())
                } else if multiplier < 1.0 {
                    Some("It's not very effective...".to_string())
                } else if multiplier > 1.0 {
                    Some("It's super effective!".to_string())
                } else {
                    None // Neutral hits carry no extra line
                }
            }

            // === Damage Events ===
            BattleEvent::DamageDealt { damage, .. } => {
                Some(format!("It dealt {} damage!", damage))
            }

            // === Stat Stage Events ===
            BattleEvent::StageChanged {
                target,
                stat,
                delta,
                ..
            } => Some(format!(
                "{}'s {} {}",
                target,
                stat,
                schema::stat_change_flavor_text(*delta)
            )),
            BattleEvent::StageCapped {
                target,
                stat,
                rising,
            } => Some(format!(
                "{}'s {} won't go any {}!",
                target,
                stat,
                if *rising { "higher" } else { "lower" }
            )),

            // === Battle Flow Events ===
            BattleEvent::NoUsableMoves { pokemon } => {
                Some(format!("{} has no moves left to use!", pokemon))
            }
            BattleEvent::PokemonFainted { pokemon } => Some(format!("{} fainted.", pokemon)),
            BattleEvent::BattleEnded { winner } => match winner {
                Some(winner) => Some(format!("{} wins the battle!", winner)),
                None => Some("The battle ended in a draw.".to_string()),
            },
        }
    }
}

/// Ordered collection of the events one turn (or one action) produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = BattleEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// The displayable lines of every event, in order.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }
}

/// What one use of a move did, as events.
///
/// The target has already been mutated by the time a report exists; the
/// report is the narration of that mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveReport {
    pub events: Vec<BattleEvent>,
}

impl MoveReport {
    pub fn hit(&self) -> bool {
        !self.events.iter().any(|event| {
            matches!(
                event,
                BattleEvent::MoveMissed { .. } | BattleEvent::MoveFailed { .. }
            )
        })
    }

    /// Damage dealt by this move, zero for misses and status moves.
    pub fn damage(&self) -> u16 {
        self.events
            .iter()
            .find_map(|event| match event {
                BattleEvent::DamageDealt { damage, .. } => Some(*damage),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// The multi-line text a player sees for this move.
    pub fn narration(&self) -> String {
        self.events
            .iter()
            .filter_map(BattleEvent::format)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.narration())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub combatants: [PokemonInst; 2],
    pub turn_number: u32,
    pub game_state: GameState,
}

impl BattleState {
    pub fn new(player: PokemonInst, opponent: PokemonInst) -> Self {
        Self {
            combatants: [player, opponent],
            turn_number: 1,
            game_state: GameState::WaitingForActions,
        }
    }

    pub fn combatant(&self, side: Side) -> &PokemonInst {
        &self.combatants[side.index()]
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut PokemonInst {
        &mut self.combatants[side.index()]
    }

    /// The acting combatant mutably, alongside its opponent mutably.
    pub fn actor_and_target(&mut self, actor: Side) -> (&mut PokemonInst, &mut PokemonInst) {
        let [player, opponent] = &mut self.combatants;
        match actor {
            Side::Player => (player, opponent),
            Side::Opponent => (opponent, player),
        }
    }

    pub fn anyone_fainted(&self) -> bool {
        self.combatants.iter().any(PokemonInst::is_fainted)
    }
}
