#[cfg(test)]
mod tests {
    use crate::battle::engine::{decide_order, determine_action_order};
    use crate::battle::rng::{ScriptedRng, SeededRng};
    use crate::battle::state::{PlayerAction, Side};
    use crate::battle::tests::common::{assert_ok, create_test_battle, TestPokemonBuilder};
    use crate::pokemon::PokemonInst;
    use crate::prefab::get_move;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{StatType, StatusCondition};

    fn pikachu() -> TestPokemonBuilder {
        TestPokemonBuilder::new("Pikachu", 50).with_moves(&["Tackle", "Quick Attack"])
    }

    fn squirtle() -> TestPokemonBuilder {
        TestPokemonBuilder::new("Squirtle", 50).with_moves(&["Tackle", "Quick Attack"])
    }

    fn order_with(player: PokemonInst, opponent: PokemonInst, actions: [usize; 2]) -> [Side; 2] {
        let state = create_test_battle(player, opponent);
        // Untied speeds and priorities make no draws.
        let mut rng = ScriptedRng::new_for_test(vec![], vec![]);
        assert_ok(determine_action_order(
            &state,
            [
                PlayerAction::UseMove { move_index: actions[0] },
                PlayerAction::UseMove { move_index: actions[1] },
            ],
            &mut rng,
        ))
    }

    #[test]
    fn test_faster_pokemon_moves_first() {
        assert_eq!(
            order_with(pikachu().build(), squirtle().build(), [0, 0]),
            [Side::Player, Side::Opponent]
        );
        assert_eq!(
            order_with(squirtle().build(), pikachu().build(), [0, 0]),
            [Side::Opponent, Side::Player]
        );
    }

    #[test]
    fn test_priority_beats_speed() {
        assert_eq!(
            order_with(pikachu().build(), squirtle().build(), [0, 1]),
            [Side::Opponent, Side::Player]
        );
    }

    #[test]
    fn test_paralysis_halves_speed() {
        // 110 speed halved to 55 falls behind 63.
        let paralyzed = pikachu().with_status(StatusCondition::Paralysis).build();
        assert_eq!(
            order_with(paralyzed, squirtle().build(), [0, 0]),
            [Side::Opponent, Side::Player]
        );
    }

    #[test]
    fn test_speed_stages_apply() {
        let slowed = pikachu().with_stage(StatType::Speed, -2).build();
        assert_eq!(
            order_with(slowed, squirtle().build(), [0, 0]),
            [Side::Opponent, Side::Player]
        );
    }

    #[rstest]
    #[case(0, Side::Player)]
    #[case(1, Side::Opponent)]
    fn test_speed_tie_is_a_coin_flip(#[case] flip: u32, #[case] expected: Side) {
        let left = pikachu().build();
        let right = pikachu().build();
        let tackle = get_move("Tackle").unwrap();

        let mut rng = ScriptedRng::new_for_test(vec![], vec![flip]);
        assert_eq!(decide_order(&left, &tackle, &right, &tackle, &mut rng), expected);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_speed_tie_is_roughly_fair() {
        let left = pikachu().build();
        let right = pikachu().build();
        let tackle = get_move("Tackle").unwrap();

        let mut rng = SeededRng::from_seed(7);
        let player_first = (0..1000)
            .filter(|_| decide_order(&left, &tackle, &right, &tackle, &mut rng) == Side::Player)
            .count();
        assert!(
            (400..=600).contains(&player_first),
            "player went first {} times out of 1000",
            player_first
        );
    }
}
