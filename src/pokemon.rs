use crate::battle::state::BattleEvent;
use crate::errors::{PokemonError, PokemonResult};
use crate::moves::{MoveData, MoveInstance};
use schema::{
    BaseStats, Gender, LearnableMove, Nature, NatureModifier, PokemonSpecies, PokemonType,
    StatType, StatusCondition, MAX_STAGE, MIN_STAGE,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Every Pokemon is assumed to have perfect individual values.
pub const PERFECT_IV: u32 = 31;
pub const MAX_EVS_PER_STAT: u16 = 252;
pub const MAX_TOTAL_EVS: u16 = 510;
pub const MAX_NICKNAME_LENGTH: usize = 48;
pub const MAX_LEVEL: u8 = 100;

/// Effort value investment in the six real stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EffortValues {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl EffortValues {
    pub fn get(&self, stat: StatType) -> u16 {
        match stat {
            StatType::Hitpoints => self.hp,
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpecialAttack => self.sp_attack,
            StatType::SpecialDefense => self.sp_defense,
            StatType::Speed => self.speed,
            StatType::CriticalRatio | StatType::Accuracy | StatType::Evasiveness => 0,
        }
    }

    fn slot_mut(&mut self, stat: StatType) -> Option<&mut u16> {
        match stat {
            StatType::Hitpoints => Some(&mut self.hp),
            StatType::Attack => Some(&mut self.attack),
            StatType::Defense => Some(&mut self.defense),
            StatType::SpecialAttack => Some(&mut self.sp_attack),
            StatType::SpecialDefense => Some(&mut self.sp_defense),
            StatType::Speed => Some(&mut self.speed),
            StatType::CriticalRatio | StatType::Accuracy | StatType::Evasiveness => None,
        }
    }

    pub fn total(&self) -> u16 {
        self.hp + self.attack + self.defense + self.sp_attack + self.sp_defense + self.speed
    }

    /// Replaces the investment in `stat`, keeping both EV caps.
    pub fn set(&mut self, stat: StatType, amount: u16) -> PokemonResult<()> {
        if amount > MAX_EVS_PER_STAT {
            return Err(PokemonError::EvStatOverflow { stat, amount });
        }
        let others = self.total() - self.get(stat);
        let slot = self.slot_mut(stat).ok_or(PokemonError::NotAnEvStat(stat))?;
        if others + amount > MAX_TOTAL_EVS {
            return Err(PokemonError::EvTotalOverflow {
                total: others + amount,
            });
        }
        *slot = amount;
        Ok(())
    }
}

/// Battle-ready stats, derived once at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleStats {
    pub max_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BattleStats {
    pub fn get(&self, stat: StatType) -> u16 {
        match stat {
            StatType::Hitpoints => self.max_hp,
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpecialAttack => self.sp_attack,
            StatType::SpecialDefense => self.sp_defense,
            StatType::Speed => self.speed,
            StatType::CriticalRatio | StatType::Accuracy | StatType::Evasiveness => 0,
        }
    }
}

/// Modifier stages, one per stageable stat, each kept in `MIN_STAGE..=MAX_STAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatStages {
    pub attack: i8,
    pub defense: i8,
    pub sp_attack: i8,
    pub sp_defense: i8,
    pub speed: i8,
    pub critical_ratio: i8,
    pub accuracy: i8,
    pub evasiveness: i8,
}

impl StatStages {
    /// Stage for a stat; `Hitpoints` has none and always reads 0.
    pub fn get(&self, stat: StatType) -> i8 {
        match stat {
            StatType::Hitpoints => 0,
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpecialAttack => self.sp_attack,
            StatType::SpecialDefense => self.sp_defense,
            StatType::Speed => self.speed,
            StatType::CriticalRatio => self.critical_ratio,
            StatType::Accuracy => self.accuracy,
            StatType::Evasiveness => self.evasiveness,
        }
    }

    fn slot_mut(&mut self, stat: StatType) -> Option<&mut i8> {
        match stat {
            StatType::Hitpoints => None,
            StatType::Attack => Some(&mut self.attack),
            StatType::Defense => Some(&mut self.defense),
            StatType::SpecialAttack => Some(&mut self.sp_attack),
            StatType::SpecialDefense => Some(&mut self.sp_defense),
            StatType::Speed => Some(&mut self.speed),
            StatType::CriticalRatio => Some(&mut self.critical_ratio),
            StatType::Accuracy => Some(&mut self.accuracy),
            StatType::Evasiveness => Some(&mut self.evasiveness),
        }
    }

    /// Set stage for a stat (clamped to -6..+6)
    pub fn set(&mut self, stat: StatType, value: i8) -> PokemonResult<()> {
        let slot = self
            .slot_mut(stat)
            .ok_or(PokemonError::NotStageable(stat))?;
        *slot = value.clamp(MIN_STAGE, MAX_STAGE);
        Ok(())
    }
}

/// A combatant: species identity plus everything that changes in battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub species: String,
    nickname: Option<String>,
    pub types: [PokemonType; 2],
    pub gendered: bool,
    gender: Gender,
    /// Meters.
    pub height: f32,
    /// Kilograms.
    pub weight: f32,
    pub abilities: Vec<String>,
    pub learnset: Vec<LearnableMove>,
    pub level: u8,
    pub nature: Option<Nature>,
    pub base_stats: BaseStats,
    pub evs: EffortValues,
    pub stats: BattleStats,
    pub hp: u16,
    pub status: Option<StatusCondition>,
    pub stages: StatStages,
    pub moves: [Option<MoveInstance>; 4],
}

/// `(2 * base + IV + EV / 4) * level / 100`, the part every stat shares.
fn scaled_stat(base: u8, ev: u16, level: u8) -> u32 {
    (2 * base as u32 + PERFECT_IV + ev as u32 / 4) * level as u32 / 100
}

/// Derives a non-HP stat, nature included.
pub fn calculate_stat(base: u8, ev: u16, level: u8, nature: NatureModifier) -> u16 {
    let raw = scaled_stat(base, ev, level) + 5;
    nature.apply(raw).min(u16::MAX as u32) as u16
}

/// Derives max HP. Natures never touch HP.
pub fn calculate_hp(base: u8, ev: u16, level: u8) -> u16 {
    let raw = scaled_stat(base, ev, level) + level as u32 + 10;
    raw.min(u16::MAX as u32) as u16
}

impl PokemonInst {
    /// Builds a combatant from already-parsed species data, at level 100 with
    /// no nature, no EVs and no moves. Stats are derived immediately.
    pub fn new(species: &PokemonSpecies) -> Self {
        let mut pokemon = PokemonInst {
            species: species.name.clone(),
            nickname: None,
            types: [species.primary_type, species.secondary_type],
            gendered: species.gendered,
            gender: Gender::Male,
            height: species.height,
            weight: species.weight,
            abilities: species.abilities.clone(),
            learnset: species.learnset.clone(),
            level: MAX_LEVEL,
            nature: None,
            base_stats: species.base_stats,
            evs: EffortValues::default(),
            stats: BattleStats::default(),
            hp: 0,
            status: None,
            stages: StatStages::default(),
            moves: [const { None }; 4],
        };
        pokemon.calculate_stats();
        pokemon
    }

    /// Display name: the nickname if one is set, else the species.
    pub fn name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.species)
    }

    pub fn set_nickname(&mut self, nickname: &str) -> PokemonResult<()> {
        if nickname.is_empty() {
            return Err(PokemonError::EmptyNickname);
        }
        let length = nickname.chars().count();
        if length > MAX_NICKNAME_LENGTH {
            return Err(PokemonError::NicknameTooLong(length));
        }
        self.nickname = Some(nickname.to_string());
        Ok(())
    }

    pub fn clear_nickname(&mut self) {
        self.nickname = None;
    }

    pub fn set_level(&mut self, level: u8) -> PokemonResult<()> {
        if !(1..=MAX_LEVEL).contains(&level) {
            return Err(PokemonError::InvalidLevel(level));
        }
        self.level = level;
        Ok(())
    }

    pub fn set_nature(&mut self, nature: Nature) {
        self.nature = Some(nature);
    }

    /// Parses and applies a gender. A no-op for genderless species, which
    /// accept any input.
    pub fn set_gender(&mut self, raw: &str) -> PokemonResult<()> {
        if !self.gendered {
            return Ok(());
        }
        self.gender = raw.parse::<Gender>()?;
        Ok(())
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gendered.then_some(self.gender)
    }

    pub fn gender_label(&self) -> String {
        match self.gender() {
            Some(gender) => gender.to_string(),
            None => "Genderless".to_string(),
        }
    }

    pub fn set_ev(&mut self, stat: StatType, amount: u16) -> PokemonResult<()> {
        self.evs.set(stat, amount)
    }

    /// Recomputes every battle stat from base stats, level, EVs and nature,
    /// and restores HP to the new maximum.
    pub fn calculate_stats(&mut self) {
        let nature_for = |stat: StatType| {
            self.nature
                .map_or(NatureModifier::Neutral, |nature| nature.modifier_for(stat))
        };
        let derive = |stat: StatType| {
            calculate_stat(
                self.base_stats.get(stat),
                self.evs.get(stat),
                self.level,
                nature_for(stat),
            )
        };

        let stats = BattleStats {
            max_hp: calculate_hp(
                self.base_stats.hp,
                self.evs.get(StatType::Hitpoints),
                self.level,
            ),
            attack: derive(StatType::Attack),
            defense: derive(StatType::Defense),
            sp_attack: derive(StatType::SpecialAttack),
            sp_defense: derive(StatType::SpecialDefense),
            speed: derive(StatType::Speed),
        };
        self.stats = stats;
        self.hp = stats.max_hp;
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.max_hp
    }

    /// Places `move_data` in `slot`, refusing a move already known in
    /// another slot.
    pub fn set_move(&mut self, slot: usize, move_data: MoveData) -> PokemonResult<()> {
        if slot >= self.moves.len() {
            return Err(PokemonError::InvalidMoveSlot(slot));
        }
        let duplicate = self.moves.iter().enumerate().any(|(index, known)| {
            index != slot
                && known
                    .as_ref()
                    .is_some_and(|known| known.name().eq_ignore_ascii_case(&move_data.name))
        });
        if duplicate {
            return Err(PokemonError::DuplicateMove(
                self.name().to_string(),
                move_data.name,
            ));
        }
        self.moves[slot] = Some(MoveInstance::new(move_data));
        Ok(())
    }

    /// Like [`PokemonInst::set_move`], but only for moves the species learns
    /// by the current level.
    pub fn learn_move(&mut self, slot: usize, move_data: MoveData) -> PokemonResult<()> {
        let learnable = self.learnset.iter().any(|learnable| {
            learnable.name.eq_ignore_ascii_case(&move_data.name) && learnable.level <= self.level
        });
        if !learnable {
            return Err(PokemonError::MoveNotLearnable {
                species: self.species.clone(),
                move_name: move_data.name,
                level: self.level,
            });
        }
        self.set_move(slot, move_data)
    }

    /// Moves this Pokemon could learn right now, excluding ones it knows.
    pub fn available_moves(&self) -> Vec<&str> {
        self.learnset
            .iter()
            .filter(|learnable| learnable.level <= self.level)
            .map(|learnable| learnable.name.as_str())
            .filter(|name| {
                !self
                    .moves
                    .iter()
                    .flatten()
                    .any(|known| known.name().eq_ignore_ascii_case(name))
            })
            .collect()
    }

    pub fn move_slot(&self, slot: usize) -> Option<&MoveInstance> {
        self.moves.get(slot).and_then(Option::as_ref)
    }

    /// Indices of slots holding a move with PP left.
    pub fn usable_move_slots(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(|m| m.pp > 0))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        pokemon_type != PokemonType::Typeless && self.types.contains(&pokemon_type)
    }

    pub fn is_shadow(&self) -> bool {
        self.types.contains(&PokemonType::Shadow)
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn status_label(&self) -> String {
        self.status
            .map_or_else(|| "Healthy".to_string(), |status| status.to_string())
    }

    /// Subtracts `damage` from current HP, stopping at zero.
    pub fn take_damage(&mut self, damage: u16) {
        self.hp = self.hp.saturating_sub(damage);
    }

    pub fn stage(&self, stat: StatType) -> i8 {
        self.stages.get(stat)
    }

    /// Moves a stat stage by `delta`, clamping at the bounds.
    ///
    /// A push past a bound the stage already sits on leaves it there and
    /// reports a capped change instead.
    pub fn change_stage(&mut self, stat: StatType, delta: i8) -> PokemonResult<BattleEvent> {
        if !stat.is_stageable() {
            return Err(PokemonError::NotStageable(stat));
        }
        let old_stage = self.stages.get(stat);

        let capped = (delta > 0 && old_stage >= MAX_STAGE) || (delta < 0 && old_stage <= MIN_STAGE);
        if capped {
            warn!(
                pokemon = self.name(),
                %stat,
                delta,
                stage = old_stage,
                "stage change blocked at the cap"
            );
            return Ok(BattleEvent::StageCapped {
                target: self.name().to_string(),
                stat,
                rising: delta > 0,
            });
        }

        let new_stage = old_stage.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
        self.stages.set(stat, new_stage)?;
        Ok(BattleEvent::StageChanged {
            target: self.name().to_string(),
            stat,
            delta,
            old_stage,
            new_stage,
        })
    }

    /// A fixed-layout block meant for developers, one field per line.
    pub fn debug_string(&self) -> String {
        let second_type = if self.types[1] == PokemonType::Typeless {
            " ".repeat(18)
        } else {
            format!("/{:<17}", self.types[1].to_string())
        };
        let nature = self
            .nature
            .map_or_else(|| "unset".to_string(), |nature| nature.to_string());

        let mut lines = vec![
            format!("Lv. {:>3} {:<22}", self.level, self.name()),
            format!("Type: {:>8}{}", self.types[0].to_string(), second_type),
            format!("Height: {:>4.1}m{}", self.height, " ".repeat(19)),
            format!("Weight: {:>5.1}kg{}", self.weight, " ".repeat(17)),
            format!("Gender: {:<24}", self.gender_label()),
            format!("Nature: {:<24}", nature),
            format!("Status: {:<24}", self.status_label()),
            format!("MaxHP/CurrentHP: {:>4}/{:<4}      ", self.hp, self.max_hp()),
            format!(
                "Attack: {:>3} (Stage: {:+}){}",
                self.stats.attack,
                self.stages.attack,
                " ".repeat(9)
            ),
            format!(
                "Defense: {:>3} (Stage: {:+}){}",
                self.stats.defense,
                self.stages.defense,
                " ".repeat(8)
            ),
            format!(
                "Special Attack: {:>3} (Stage: {:+}) ",
                self.stats.sp_attack, self.stages.sp_attack
            ),
            format!(
                "Special Defense: {:>3} (Stage: {:+})",
                self.stats.sp_defense, self.stages.sp_defense
            ),
            format!(
                "Speed: {:>3} (Stage: {:+}){}",
                self.stats.speed,
                self.stages.speed,
                " ".repeat(10)
            ),
            format!("Crit Stage: {:+}{}", self.stages.critical_ratio, " ".repeat(18)),
            format!("Accuracy Stage: {:+}{}", self.stages.accuracy, " ".repeat(14)),
            format!(
                "Evasiveness Stage: {:+}{}",
                self.stages.evasiveness,
                " ".repeat(11)
            ),
            format!("        Moves{}", " ".repeat(19)),
            format!("====================={}", " ".repeat(11)),
        ];
        lines.extend(
            self.moves
                .iter()
                .flatten()
                .map(|known| format!("  {:<30}", known.name())),
        );
        lines.join("\n")
    }
}

impl fmt::Display for PokemonInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{MoveCategory, Target};

    fn bulbasaur() -> PokemonSpecies {
        PokemonSpecies {
            name: "Bulbasaur".to_string(),
            primary_type: PokemonType::Grass,
            secondary_type: PokemonType::Poison,
            gendered: true,
            height: 0.7,
            weight: 6.9,
            base_stats: BaseStats {
                hp: 45,
                attack: 49,
                defense: 49,
                sp_attack: 65,
                sp_defense: 65,
                speed: 45,
            },
            abilities: vec!["Overgrow".to_string()],
            learnset: vec![
                LearnableMove {
                    name: "Tackle".to_string(),
                    level: 1,
                },
                LearnableMove {
                    name: "Vine Whip".to_string(),
                    level: 7,
                },
            ],
        }
    }

    fn tackle() -> MoveData {
        MoveData::damaging(
            "Tackle",
            PokemonType::Normal,
            MoveCategory::Physical,
            40,
            100,
            35,
        )
    }

    #[test]
    fn test_stat_formulas() {
        // Level 100, no EVs: (2*49 + 31) * 100/100 + 5
        assert_eq!(calculate_stat(49, 0, 100, NatureModifier::Neutral), 134);
        assert_eq!(calculate_stat(49, 0, 100, NatureModifier::Boosted), 147);
        assert_eq!(calculate_stat(49, 0, 100, NatureModifier::Reduced), 120);
        // (2*45 + 31 + 63) * 50/100 + 50 + 10
        assert_eq!(calculate_hp(45, 252, 50), 152);
    }

    #[rstest]
    #[case(NatureModifier::Neutral)]
    #[case(NatureModifier::Boosted)]
    #[case(NatureModifier::Reduced)]
    fn test_stats_are_monotonic_in_level_and_evs(#[case] nature: NatureModifier) {
        for base in [5, 49, 80, 130] {
            let mut previous = 0;
            for level in 1..=100 {
                let stat = calculate_stat(base, 0, level, nature);
                assert!(stat >= previous, "level {} decreased base {} under {:?}", level, base, nature);
                previous = stat;
            }

            let mut previous = 0;
            for ev in 0..=252 {
                let stat = calculate_stat(base, ev, 50, nature);
                assert!(stat >= previous, "{} EVs decreased base {} under {:?}", ev, base, nature);
                previous = stat;
            }
        }
    }

    #[test]
    fn test_hp_is_monotonic_in_level_and_evs() {
        for (base, ev) in [(1, 0), (45, 0), (45, 252), (255, 252)] {
            let mut previous = 0;
            for level in 1..=100 {
                let hp = calculate_hp(base, ev, level);
                assert!(hp >= previous, "level {} decreased HP for base {}", level, base);
                previous = hp;
            }
        }

        let mut previous = 0;
        for ev in 0..=252 {
            let hp = calculate_hp(80, ev, 50);
            assert!(hp >= previous, "{} EVs decreased HP", ev);
            previous = hp;
        }
    }

    #[test]
    fn test_new_pokemon_defaults() {
        let pokemon = PokemonInst::new(&bulbasaur());
        assert_eq!(pokemon.level, 100);
        assert_eq!(pokemon.name(), "Bulbasaur");
        assert_eq!(pokemon.hp, pokemon.max_hp());
        assert_eq!(pokemon.max_hp(), 231);
        assert_eq!(pokemon.gender_label(), "Male");
        assert_eq!(pokemon.status_label(), "Healthy");
        assert_eq!(pokemon.stages, StatStages::default());
    }

    #[test]
    fn test_nature_applies_on_recalculation() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        pokemon.set_nature(Nature::Modest);
        pokemon.calculate_stats();
        assert_eq!(pokemon.stats.sp_attack, calculate_stat(65, 0, 100, NatureModifier::Boosted));
        assert_eq!(pokemon.stats.attack, calculate_stat(49, 0, 100, NatureModifier::Reduced));
    }

    #[test]
    fn test_ev_caps() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        assert_eq!(
            pokemon.set_ev(StatType::Attack, 253),
            Err(PokemonError::EvStatOverflow {
                stat: StatType::Attack,
                amount: 253
            })
        );
        assert_eq!(
            pokemon.set_ev(StatType::Accuracy, 4),
            Err(PokemonError::NotAnEvStat(StatType::Accuracy))
        );

        pokemon.set_ev(StatType::Hitpoints, 252).unwrap();
        pokemon.set_ev(StatType::Attack, 252).unwrap();
        pokemon.set_ev(StatType::Defense, 6).unwrap();
        assert_eq!(pokemon.evs.total(), 510);
        assert_eq!(
            pokemon.set_ev(StatType::Speed, 1),
            Err(PokemonError::EvTotalOverflow { total: 511 })
        );

        // Replacing an existing allocation counts only the new amount.
        pokemon.set_ev(StatType::Defense, 4).unwrap();
        pokemon.set_ev(StatType::Speed, 2).unwrap();
        assert_eq!(pokemon.evs.total(), 510);
    }

    #[test]
    fn test_level_bounds() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        assert_eq!(pokemon.set_level(0), Err(PokemonError::InvalidLevel(0)));
        assert_eq!(pokemon.set_level(101), Err(PokemonError::InvalidLevel(101)));
        assert_eq!(pokemon.set_level(1), Ok(()));
    }

    #[test]
    fn test_nickname_rules() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        assert_eq!(pokemon.set_nickname(""), Err(PokemonError::EmptyNickname));
        let long = "x".repeat(49);
        assert_eq!(
            pokemon.set_nickname(&long),
            Err(PokemonError::NicknameTooLong(49))
        );
        pokemon.set_nickname(&"x".repeat(48)).unwrap();
        pokemon.set_nickname("Bulby").unwrap();
        assert_eq!(pokemon.name(), "Bulby");
        assert_eq!(pokemon.to_string(), "Bulby");
        pokemon.clear_nickname();
        assert_eq!(pokemon.name(), "Bulbasaur");
    }

    #[test]
    fn test_gender_on_genderless_species_is_ignored() {
        let mut species = bulbasaur();
        species.gendered = false;
        let mut pokemon = PokemonInst::new(&species);
        assert_eq!(pokemon.set_gender("nonsense"), Ok(()));
        assert_eq!(pokemon.gender(), None);
        assert_eq!(pokemon.gender_label(), "Genderless");
    }

    #[test]
    fn test_gender_rejects_unknown_strings() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        assert!(matches!(
            pokemon.set_gender("nonsense"),
            Err(PokemonError::Parse(_))
        ));
        pokemon.set_gender("girl").unwrap();
        assert_eq!(pokemon.gender_label(), "Female");
    }

    #[test]
    fn test_move_slots() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        assert_eq!(
            pokemon.set_move(4, tackle()),
            Err(PokemonError::InvalidMoveSlot(4))
        );
        pokemon.set_move(0, tackle()).unwrap();
        assert_eq!(
            pokemon.set_move(1, tackle()),
            Err(PokemonError::DuplicateMove(
                "Bulbasaur".to_string(),
                "Tackle".to_string()
            ))
        );
        // Re-setting the same slot is allowed.
        pokemon.set_move(0, tackle()).unwrap();
        assert_eq!(pokemon.usable_move_slots(), vec![0]);
        assert_eq!(pokemon.available_moves(), vec!["Vine Whip"]);
    }

    #[test]
    fn test_learn_move_respects_level() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        pokemon.set_level(5).unwrap();
        let vine_whip = MoveData::damaging(
            "Vine Whip",
            PokemonType::Grass,
            MoveCategory::Physical,
            45,
            100,
            25,
        );
        assert_eq!(
            pokemon.learn_move(0, vine_whip.clone()),
            Err(PokemonError::MoveNotLearnable {
                species: "Bulbasaur".to_string(),
                move_name: "Vine Whip".to_string(),
                level: 5
            })
        );
        pokemon.set_level(7).unwrap();
        assert_eq!(pokemon.learn_move(0, vine_whip), Ok(()));
    }

    #[rstest]
    #[case(0, 1, 1)]
    #[case(0, 3, 3)]
    #[case(5, 3, 6)]
    #[case(-5, -3, -6)]
    #[case(2, -4, -2)]
    #[case(0, 0, 0)]
    fn test_change_stage_clamps(#[case] start: i8, #[case] delta: i8, #[case] expected: i8) {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        pokemon.stages.set(StatType::Speed, start).unwrap();
        let event = pokemon.change_stage(StatType::Speed, delta).unwrap();
        assert_eq!(pokemon.stage(StatType::Speed), expected);
        assert!(matches!(event, BattleEvent::StageChanged { .. }));
    }

    #[test]
    fn test_change_stage_at_cap() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        pokemon.stages.set(StatType::Attack, 6).unwrap();
        let event = pokemon.change_stage(StatType::Attack, 2).unwrap();
        assert_eq!(pokemon.stage(StatType::Attack), 6);
        assert_eq!(
            event.format().unwrap(),
            "Bulbasaur's Attack won't go any higher!"
        );

        pokemon.stages.set(StatType::Accuracy, -6).unwrap();
        let event = pokemon.change_stage(StatType::Accuracy, -1).unwrap();
        assert_eq!(pokemon.stage(StatType::Accuracy), -6);
        assert_eq!(
            event.format().unwrap(),
            "Bulbasaur's Accuracy won't go any lower!"
        );

        // Moving away from the cap is always allowed.
        let event = pokemon.change_stage(StatType::Accuracy, 1).unwrap();
        assert_eq!(event.format().unwrap(), "Bulbasaur's Accuracy rose!");
    }

    #[test]
    fn test_change_stage_round_trip_only_without_clamping() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        pokemon.change_stage(StatType::Defense, 2).unwrap();
        pokemon.change_stage(StatType::Defense, -2).unwrap();
        assert_eq!(pokemon.stage(StatType::Defense), 0);

        pokemon.change_stage(StatType::Defense, 5).unwrap();
        pokemon.change_stage(StatType::Defense, 5).unwrap();
        pokemon.change_stage(StatType::Defense, -5).unwrap();
        assert_eq!(pokemon.stage(StatType::Defense), 1);
    }

    #[test]
    fn test_change_stage_rejects_hitpoints() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        assert_eq!(
            pokemon.change_stage(StatType::Hitpoints, 1),
            Err(PokemonError::NotStageable(StatType::Hitpoints))
        );
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        pokemon.take_damage(10);
        assert_eq!(pokemon.hp, pokemon.max_hp() - 10);
        pokemon.take_damage(u16::MAX);
        assert_eq!(pokemon.hp, 0);
        assert!(pokemon.is_fainted());
    }

    #[test]
    fn test_debug_string_layout() {
        let mut pokemon = PokemonInst::new(&bulbasaur());
        pokemon.set_level(50).unwrap();
        pokemon.calculate_stats();
        pokemon.set_move(0, tackle()).unwrap();
        let growl = MoveData::status(
            "Growl",
            PokemonType::Normal,
            100,
            40,
            vec![crate::moves::StageChange {
                stat: StatType::Attack,
                delta: -1,
            }],
            Target::Opponent,
        )
        .unwrap();
        pokemon.set_move(2, growl).unwrap();
        pokemon.stages.set(StatType::Speed, -2).unwrap();

        let debug = pokemon.debug_string();
        let lines: Vec<&str> = debug.lines().collect();
        assert_eq!(lines.len(), 20);
        assert_eq!(lines[0], format!("Lv.  50 {:<22}", "Bulbasaur"));
        assert_eq!(lines[1], format!("Type:    Grass/{:<17}", "Poison"));
        assert_eq!(lines[2], format!("Height:  0.7m{}", " ".repeat(19)));
        assert_eq!(lines[3], format!("Weight:   6.9kg{}", " ".repeat(17)));
        assert_eq!(lines[5], format!("Nature: {:<24}", "unset"));
        assert_eq!(lines[7], format!("MaxHP/CurrentHP:  120/{:<4}{}", 120, " ".repeat(6)));
        assert_eq!(lines[12], format!("Speed:  65 (Stage: -2){}", " ".repeat(10)));
        assert_eq!(lines[13], format!("Crit Stage: +0{}", " ".repeat(18)));
        assert_eq!(lines[18], format!("  {:<30}", "Tackle"));
        assert_eq!(lines[19], format!("  {:<30}", "Growl"));

        // Every line of the fixed template has the same printed width.
        for line in &lines[1..] {
            assert_eq!(line.chars().count(), 32, "line {:?}", line);
        }
    }
}
