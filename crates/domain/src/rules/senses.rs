//! Vision, imprecise senses and creature size.

use serde::{Deserialize, Serialize};

/// Visual sense quality. Better vision replaces worse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Vision {
    #[default]
    Normal,
    LowLight,
    Darkvision,
    GreaterDarkvision,
}

impl Vision {
    /// Vision one step better (low-light becomes darkvision).
    pub fn upgrade(self) -> Self {
        match self {
            Vision::Normal => Vision::LowLight,
            Vision::LowLight => Vision::Darkvision,
            Vision::Darkvision | Vision::GreaterDarkvision => Vision::GreaterDarkvision,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenseKind {
    Scent,
    Tremorsense,
    Echolocation,
    WildEmpathy,
}

/// An imprecise or vague sense with a range in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sense {
    pub kind: SenseKind,
    pub range: u16,
}

impl Sense {
    pub fn new(kind: SenseKind, range: u16) -> Self {
        Self { kind, range }
    }
}

/// Merge a sense into a list, keeping the longest range per kind.
pub fn merge_sense(senses: &mut Vec<Sense>, sense: Sense) {
    match senses.iter_mut().find(|s| s.kind == sense.kind) {
        Some(existing) => existing.range = existing.range.max(sense.range),
        None => {
            senses.push(sense);
            senses.sort();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
}
