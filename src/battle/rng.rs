use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::trace;

/// The single source of randomness for a battle.
///
/// Every draw carries a `reason` so a replayed or exhausted sequence can be
/// traced back to the roll that consumed it.
pub trait BattleRng {
    /// A uniform draw in `[0, 1)`.
    fn next_unit(&mut self, reason: &str) -> f64;

    /// A uniform integer in `low..=high`.
    fn next_in_range(&mut self, low: u32, high: u32, reason: &str) -> u32;

    /// A fair coin flip.
    fn coin_flip(&mut self, reason: &str) -> bool {
        self.next_in_range(0, 1, reason) == 0
    }
}

/// A seedable generator for real battles.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: StdRng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl BattleRng for SeededRng {
    fn next_unit(&mut self, reason: &str) -> f64 {
        let outcome: f64 = self.rng.random();
        trace!(outcome, reason, "rng draw");
        outcome
    }

    fn next_in_range(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        let outcome = self.rng.random_range(low..=high);
        trace!(outcome, reason, "rng draw");
        outcome
    }
}

/// Replays queued outcomes in order, for tests.
///
/// Unit and integer draws come from separate queues so a scenario can script
/// "always hit" and "never crit" independently.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    units: VecDeque<f64>,
    ints: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new_for_test(units: Vec<f64>, ints: Vec<u32>) -> Self {
        Self {
            units: units.into(),
            ints: ints.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.units.len() + self.ints.len()
    }
}

impl BattleRng for ScriptedRng {
    fn next_unit(&mut self, reason: &str) -> f64 {
        let Some(outcome) = self.units.pop_front() else {
            panic!(
                "ScriptedRng exhausted! Tried to get a unit value for: '{}'. Need more random values.",
                reason
            );
        };

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        trace!(outcome, reason, "scripted rng draw");
        outcome
    }

    fn next_in_range(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        let Some(outcome) = self.ints.pop_front() else {
            panic!(
                "ScriptedRng exhausted! Tried to get an integer for: '{}'. Need more random values.",
                reason
            );
        };
        assert!(
            (low..=high).contains(&outcome),
            "scripted outcome {} for '{}' is outside {}..={}",
            outcome,
            reason,
            low,
            high
        );

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        trace!(outcome, reason, "scripted rng draw");
        outcome
    }
}
