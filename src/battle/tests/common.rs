use crate::battle::rng::ScriptedRng;
use crate::battle::state::BattleState;
use crate::errors::BattleResult;
use crate::moves::MoveData;
use crate::pokemon::PokemonInst;
use crate::prefab::{get_move, get_species};
use schema::{StatType, StatusCondition};

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu", 25)
///     .with_moves(&["Tackle"])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species: String,
    level: u8,
    moves: Vec<MoveData>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
    stages: Vec<(StatType, i8)>,
    stat_overrides: Vec<(StatType, u16)>,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given species and level.
    pub fn new(species: &str, level: u8) -> Self {
        Self {
            species: species.to_string(),
            level,
            moves: Vec::new(),
            status: None,
            current_hp: None,
            stages: Vec::new(),
            stat_overrides: Vec::new(),
        }
    }

    /// Catalogue moves by name. The learnset is not consulted.
    pub fn with_moves(mut self, names: &[&str]) -> Self {
        for name in names {
            let move_data = match get_move(name) {
                Ok(data) => data,
                Err(err) => panic!("Failed to load move {}: {}", name, err),
            };
            self.moves.push(move_data);
        }
        self
    }

    /// A hand-built move, for scenarios the catalogue does not cover.
    pub fn with_move_data(mut self, move_data: MoveData) -> Self {
        self.moves.push(move_data);
        self
    }

    /// Sets the status condition for the test Pokemon.
    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_stage(mut self, stat: StatType, stage: i8) -> Self {
        self.stages.push((stat, stage));
        self
    }

    /// Forces a derived stat after the normal calculation.
    pub fn with_stat(mut self, stat: StatType, value: u16) -> Self {
        self.stat_overrides.push((stat, value));
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self) -> PokemonInst {
        let species_data = match get_species(&self.species) {
            Ok(data) => data,
            Err(err) => panic!("Failed to load species data for {}: {}", self.species, err),
        };

        let mut pokemon = PokemonInst::new(&species_data);
        assert_ok(pokemon.set_level(self.level).map_err(Into::into));
        pokemon.calculate_stats();

        for (stat, value) in self.stat_overrides {
            let slot = match stat {
                StatType::Hitpoints => &mut pokemon.stats.max_hp,
                StatType::Attack => &mut pokemon.stats.attack,
                StatType::Defense => &mut pokemon.stats.defense,
                StatType::SpecialAttack => &mut pokemon.stats.sp_attack,
                StatType::SpecialDefense => &mut pokemon.stats.sp_defense,
                StatType::Speed => &mut pokemon.stats.speed,
                other => panic!("{} is not a derived stat", other),
            };
            *slot = value;
        }
        pokemon.hp = pokemon.stats.max_hp;

        for (slot, move_data) in self.moves.into_iter().enumerate() {
            assert_ok(pokemon.set_move(slot, move_data).map_err(Into::into));
        }
        for (stat, stage) in self.stages {
            assert_ok(pokemon.stages.set(stat, stage).map_err(Into::into));
        }

        pokemon.status = self.status;
        if let Some(hp) = self.current_hp {
            pokemon.hp = hp;
        }
        pokemon
    }
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(player: PokemonInst, opponent: PokemonInst) -> BattleState {
    BattleState::new(player, opponent)
}

/// A `ScriptedRng` where every accuracy check hits, no critical hit lands,
/// damage variance is near maximal and speed ties go to the player.
/// Useful for tests where the specific RNG outcome is not important.
pub fn predictable_rng() -> ScriptedRng {
    ScriptedRng::new_for_test(vec![0.99; 100], vec![0; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
