use crate::battle::ai::Behavior;
use crate::battle::conditions::StatusHook;
use crate::battle::engine::resolve_turn;
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleState, EventBus, GameState, PlayerAction, Side};
use crate::errors::{ActionError, BattleResult};
use crate::pokemon::PokemonInst;
use schema::StatusCondition;
use serde::Serialize;
use tracing::{debug, info};

/// Turn limit for unattended battles that never specify one.
pub const DEFAULT_MAX_TURNS: u32 = 200;

/// A one-on-one battle between two configured Pokemon, played turn by turn
/// until one faints, one side runs out of moves, or the turn limit passes.
#[derive(Debug, Clone)]
pub struct Battle {
    battle_state: BattleState,
    max_turns: u32,
    accumulated_events: Vec<BattleEvent>,
}

/// Information about a Pokemon for API queries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonInfo {
    pub species: String,
    pub name: String,
    pub level: u8,
    pub current_hp: u16,
    pub max_hp: u16,
    pub is_fainted: bool,
    pub status: Option<StatusCondition>,
}

impl From<&PokemonInst> for PokemonInfo {
    fn from(pokemon: &PokemonInst) -> Self {
        Self {
            species: pokemon.species.clone(),
            name: pokemon.name().to_string(),
            level: pokemon.level,
            current_hp: pokemon.hp,
            max_hp: pokemon.max_hp(),
            is_fainted: pokemon.is_fainted(),
            status: pokemon.status,
        }
    }
}

/// Result of executing a battle turn
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub events: EventBus,
    pub new_game_state: GameState,
    pub battle_ended: bool,
    pub winner: Option<Side>,
}

/// How a finished battle ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleOutcome {
    pub winner: Option<Side>,
    pub winner_name: Option<String>,
    /// Turns begun before the battle ended. The deciding turn counts even
    /// when it was a forfeit; the draw declared at the turn limit does not.
    pub turns_played: u32,
    pub combatants: [PokemonInfo; 2],
}

fn winner_of(game_state: GameState) -> Option<Side> {
    match game_state {
        GameState::PlayerWin => Some(Side::Player),
        GameState::OpponentWin => Some(Side::Opponent),
        _ => None,
    }
}

impl Battle {
    pub fn new(player: PokemonInst, opponent: PokemonInst) -> Self {
        Self {
            battle_state: BattleState::new(player, opponent),
            max_turns: DEFAULT_MAX_TURNS,
            accumulated_events: Vec::new(),
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn state(&self) -> &BattleState {
        &self.battle_state
    }

    pub fn is_finished(&self) -> bool {
        self.battle_state.game_state.is_finished()
    }

    /// Every event since the battle began, in order.
    pub fn events(&self) -> &[BattleEvent] {
        &self.accumulated_events
    }

    pub fn info(&self) -> [PokemonInfo; 2] {
        [
            PokemonInfo::from(self.battle_state.combatant(Side::Player)),
            PokemonInfo::from(self.battle_state.combatant(Side::Opponent)),
        ]
    }

    /// Resolves one turn with both sides' chosen actions.
    pub fn play_turn(
        &mut self,
        actions: [PlayerAction; 2],
        rng: &mut dyn BattleRng,
        status_hook: &dyn StatusHook,
    ) -> BattleResult<ExecutionResult> {
        if self.is_finished() {
            return Err(ActionError::InvalidAction("the battle is already over".to_string()).into());
        }

        let bus = if self.turn_limit_reached() {
            self.declare_draw()
        } else {
            resolve_turn(&mut self.battle_state, actions, rng, status_hook)?
        };
        Ok(self.record(bus))
    }

    fn turn_limit_reached(&self) -> bool {
        self.battle_state.turn_number > self.max_turns
    }

    fn declare_draw(&mut self) -> EventBus {
        info!(max_turns = self.max_turns, "turn limit reached");
        self.battle_state.game_state = GameState::Draw;
        let mut bus = EventBus::new();
        bus.push(BattleEvent::BattleEnded { winner: None });
        bus
    }

    fn record(&mut self, bus: EventBus) -> ExecutionResult {
        self.accumulated_events.extend(bus.events().iter().cloned());

        let new_game_state = self.battle_state.game_state;
        ExecutionResult {
            events: bus,
            new_game_state,
            battle_ended: new_game_state.is_finished(),
            winner: winner_of(new_game_state),
        }
    }

    /// Lets two behaviors fight until the battle ends, calling `on_turn`
    /// with each turn's events as they happen.
    pub fn run_with<F>(
        &mut self,
        player_ai: &dyn Behavior,
        opponent_ai: &dyn Behavior,
        rng: &mut dyn BattleRng,
        status_hook: &dyn StatusHook,
        mut on_turn: F,
    ) -> BattleResult<BattleOutcome>
    where
        F: FnMut(&EventBus),
    {
        while !self.is_finished() {
            // No actions are chosen for a turn that will never be played
            if self.turn_limit_reached() {
                let bus = self.declare_draw();
                on_turn(&self.record(bus).events);
                break;
            }

            let actions = [
                player_ai.decide_action(Side::Player, &self.battle_state, rng),
                opponent_ai.decide_action(Side::Opponent, &self.battle_state, rng),
            ];
            debug!(turn = self.battle_state.turn_number, ?actions, "actions chosen");
            let result = self.play_turn(actions, rng, status_hook)?;
            on_turn(&result.events);
        }
        Ok(self.outcome())
    }

    /// Lets two behaviors fight until the battle ends.
    pub fn run_to_completion(
        &mut self,
        player_ai: &dyn Behavior,
        opponent_ai: &dyn Behavior,
        rng: &mut dyn BattleRng,
        status_hook: &dyn StatusHook,
    ) -> BattleResult<BattleOutcome> {
        self.run_with(player_ai, opponent_ai, rng, status_hook, |_| {})
    }

    pub fn outcome(&self) -> BattleOutcome {
        let winner = winner_of(self.battle_state.game_state);
        BattleOutcome {
            winner,
            winner_name: winner.map(|side| self.battle_state.combatant(side).name().to_string()),
            // turn_number only advances past turns that did not end the battle
            turns_played: self.battle_state.turn_number.min(self.max_turns),
            combatants: self.info(),
        }
    }
}
