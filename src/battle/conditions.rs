use crate::battle::rng::BattleRng;
use crate::battle::state::BattleEvent;
use crate::pokemon::PokemonInst;

/// Per-turn effects of persistent status conditions.
///
/// Called once at the end of every turn that did not end the battle, for each
/// combatant still standing. Burn and paralysis already act through damage
/// and turn order; poison, sleep and freeze have no behaviour until a hook
/// gives them one.
pub trait StatusHook {
    fn end_of_turn(&self, pokemon: &mut PokemonInst, rng: &mut dyn BattleRng) -> Vec<BattleEvent>;
}

/// A hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertStatusHook;

impl StatusHook for InertStatusHook {
    fn end_of_turn(&self, _pokemon: &mut PokemonInst, _rng: &mut dyn BattleRng) -> Vec<BattleEvent> {
        Vec::new()
    }
}
