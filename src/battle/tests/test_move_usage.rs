#[cfg(test)]
mod tests {
    use crate::battle::rng::ScriptedRng;
    use crate::battle::state::BattleEvent;
    use crate::battle::tests::common::{assert_ok, predictable_rng, TestPokemonBuilder};
    use crate::errors::{ActionError, BattleEngineError};
    use pretty_assertions::assert_eq;
    use schema::StatType;

    #[test]
    fn test_missed_move_still_spends_pp() {
        let mut bulbasaur = TestPokemonBuilder::new("Bulbasaur", 50)
            .with_moves(&["Razor Leaf"])
            .build();
        let mut squirtle = TestPokemonBuilder::new("Squirtle", 50).build();

        // Razor Leaf has 95 accuracy; 96 is the first roll that misses.
        let mut rng = ScriptedRng::new_for_test(vec![], vec![96]);
        let report = assert_ok(bulbasaur.use_move(0, &mut squirtle, &mut rng));

        assert!(!report.hit());
        assert_eq!(
            report.events,
            vec![BattleEvent::MoveMissed {
                attacker: "Bulbasaur".to_string(),
                move_name: "Razor Leaf".to_string(),
            }]
        );
        assert_eq!(report.narration(), "... but it missed!");
        assert_eq!(bulbasaur.move_slot(0).map(|known| known.pp), Some(24));
        assert_eq!(squirtle.hp, squirtle.max_hp());
    }

    #[test]
    fn test_status_move_against_raised_evasion_fails() {
        let mut charmander = TestPokemonBuilder::new("Charmander", 50)
            .with_moves(&["Growl"])
            .build();
        let mut squirtle = TestPokemonBuilder::new("Squirtle", 50)
            .with_stage(StatType::Evasiveness, 1)
            .build();

        // 100 accuracy against +1 evasion leaves a threshold of 75.
        let mut rng = ScriptedRng::new_for_test(vec![], vec![76]);
        let report = assert_ok(charmander.use_move(0, &mut squirtle, &mut rng));

        assert_eq!(report.narration(), "... but it failed!");
        assert_eq!(squirtle.stage(StatType::Attack), 0);
        assert_eq!(charmander.move_slot(0).map(|known| known.pp), Some(39));
    }

    #[test]
    fn test_self_targeting_move_changes_own_stage() {
        let mut bulbasaur = TestPokemonBuilder::new("Bulbasaur", 50)
            .with_moves(&["Swords Dance"])
            .build();
        let mut charmander = TestPokemonBuilder::new("Charmander", 50).build();

        let report = assert_ok(bulbasaur.use_move(0, &mut charmander, &mut predictable_rng()));

        assert_eq!(bulbasaur.stage(StatType::Attack), 2);
        assert_eq!(charmander.stage(StatType::Attack), 0);
        assert_eq!(report.narration(), "Bulbasaur's Attack rose sharply!");
    }

    #[test]
    fn test_opponent_targeting_move_changes_their_stage() {
        let mut bulbasaur = TestPokemonBuilder::new("Bulbasaur", 50)
            .with_moves(&["Sweet Scent"])
            .build();
        let mut charmander = TestPokemonBuilder::new("Charmander", 50).build();

        let report = assert_ok(bulbasaur.use_move(0, &mut charmander, &mut predictable_rng()));

        assert_eq!(bulbasaur.stage(StatType::Evasiveness), 0);
        assert_eq!(charmander.stage(StatType::Evasiveness), -2);
        assert_eq!(
            report.events,
            vec![BattleEvent::StageChanged {
                target: "Charmander".to_string(),
                stat: StatType::Evasiveness,
                delta: -2,
                old_stage: 0,
                new_stage: -2,
            }]
        );
    }

    #[test]
    fn test_stage_change_past_the_cap_is_reported() {
        let mut bulbasaur = TestPokemonBuilder::new("Bulbasaur", 50)
            .with_moves(&["Swords Dance"])
            .with_stage(StatType::Attack, 5)
            .build();
        let mut charmander = TestPokemonBuilder::new("Charmander", 50).build();

        let mut rng = predictable_rng();
        let first = assert_ok(bulbasaur.use_move(0, &mut charmander, &mut rng));
        assert!(matches!(
            first.events.as_slice(),
            [BattleEvent::StageChanged { old_stage: 5, new_stage: 6, .. }]
        ));

        let second = assert_ok(bulbasaur.use_move(0, &mut charmander, &mut rng));
        assert_eq!(second.narration(), "Bulbasaur's Attack won't go any higher!");
        assert_eq!(bulbasaur.stage(StatType::Attack), 6);
    }

    #[test]
    fn test_empty_slot_is_rejected() {
        let mut bulbasaur = TestPokemonBuilder::new("Bulbasaur", 50)
            .with_moves(&["Tackle"])
            .build();
        let mut charmander = TestPokemonBuilder::new("Charmander", 50).build();

        assert_eq!(
            bulbasaur.use_move(2, &mut charmander, &mut predictable_rng()),
            Err(BattleEngineError::Action(ActionError::InvalidMoveIndex(2)))
        );
    }
}
