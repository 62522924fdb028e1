use schema::{MoveCategory, PokemonType, StatType, Target};
use serde::{Deserialize, Serialize};

use crate::errors::{MoveDataError, MoveDataResult};

/// One stage adjustment applied by a status move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageChange {
    pub stat: StatType,
    pub delta: i8,
}

/// The immutable definition of a move.
///
/// `power` and `crit_stage` only mean something for damaging moves;
/// `stage_changes` and `target` only for status moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub primary_type: PokemonType,
    /// `Typeless` for single-typed moves.
    pub secondary_type: PokemonType,
    pub category: MoveCategory,
    pub contact: bool,
    pub power: u16,
    /// Percent, 0-100.
    pub accuracy: u8,
    pub crit_stage: i8,
    pub priority: i8,
    pub max_pp: u8,
    pub stage_changes: Vec<StageChange>,
    pub target: Target,
}

impl MoveData {
    /// A damaging move with the common defaults: single-typed, no crit
    /// bonus, normal priority.
    pub fn damaging(
        name: &str,
        move_type: PokemonType,
        category: MoveCategory,
        power: u16,
        accuracy: u8,
        max_pp: u8,
    ) -> Self {
        Self {
            name: name.to_string(),
            primary_type: move_type,
            secondary_type: PokemonType::Typeless,
            category,
            contact: category == MoveCategory::Physical,
            power,
            accuracy,
            crit_stage: 0,
            priority: 0,
            max_pp,
            stage_changes: Vec::new(),
            target: Target::Opponent,
        }
    }

    /// A status move applying `stage_changes`, in order, to `target`.
    pub fn status(
        name: &str,
        move_type: PokemonType,
        accuracy: u8,
        max_pp: u8,
        stage_changes: Vec<StageChange>,
        target: Target,
    ) -> MoveDataResult<Self> {
        if let Some(change) = stage_changes.iter().find(|c| !c.stat.is_stageable()) {
            return Err(MoveDataError::MalformedData(format!(
                "{} changes the stage of {}, which has no stage",
                name, change.stat
            )));
        }

        Ok(Self {
            name: name.to_string(),
            primary_type: move_type,
            secondary_type: PokemonType::Typeless,
            category: MoveCategory::Status,
            contact: false,
            power: 0,
            accuracy,
            crit_stage: 0,
            priority: 0,
            max_pp,
            stage_changes,
            target,
        })
    }

    pub fn with_secondary_type(mut self, secondary_type: PokemonType) -> Self {
        self.secondary_type = secondary_type;
        self
    }

    pub fn with_crit_stage(mut self, crit_stage: i8) -> Self {
        self.crit_stage = crit_stage;
        self
    }

    pub fn types(&self) -> [PokemonType; 2] {
        [self.primary_type, self.secondary_type]
    }

    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status
    }

    /// Shadow moves ignore the type chart.
    pub fn is_shadow(&self) -> bool {
        self.types().contains(&PokemonType::Shadow)
    }

    /// A multi-line description meant for developers.
    pub fn debug_string(&self, pp: u8) -> String {
        let mut type_line = format!("Type: {}", self.primary_type);
        if self.secondary_type != PokemonType::Typeless {
            type_line.push_str(&format!("/{}", self.secondary_type));
        }

        let mut lines = vec![
            self.name.clone(),
            type_line,
            self.category.to_string(),
            format!("Accuracy: {}", self.accuracy),
        ];
        if self.is_damaging() {
            lines.push(format!("Power: {}", self.power));
            lines.push(format!(
                "Does {} contact",
                if self.contact { "make" } else { "not make" }
            ));
        }
        lines.push(format!("PP: {}/{}", pp, self.max_pp));
        lines.join("\n")
    }
}

/// A known move: its definition plus the only mutable part, remaining PP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub data: MoveData,
    pub pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(data: MoveData) -> Self {
        let pp = data.max_pp;
        MoveInstance { data, pp }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Spend one PP. Never fails; an empty pool stays empty.
    pub fn spend_pp(&mut self) {
        self.pp = self.pp.saturating_sub(1);
    }

    pub fn debug_string(&self) -> String {
        self.data.debug_string(self.pp)
    }
}
