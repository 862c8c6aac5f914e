//! Familiar and animal companion reference data.

use serde::Serialize;

use crate::rules::{Sense, SenseKind, Size, Vision};

/// Familiar hit points per character level.
pub const FAMILIAR_HP_PER_LEVEL: i32 = 5;

/// Familiar abilities chosen each day before feats add more.
pub const FAMILIAR_BASE_ABILITIES: u8 = 2;

/// Hit points an animal companion gains per level, before Con.
pub const COMPANION_HP_PER_LEVEL: i32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanionSpecies {
    pub id: &'static str,
    pub name: &'static str,
    pub base_hp: i32,
    pub size: Size,
    pub speed: u16,
    pub vision: Vision,
    pub senses: &'static [Sense],
    /// Con modifier of a young companion
    pub con_modifier: i32,
}

const SCENT_30: &[Sense] = &[Sense {
    kind: SenseKind::Scent,
    range: 30,
}];

pub const COMPANION_SPECIES: &[CompanionSpecies] = &[
    CompanionSpecies {
        id: "badger",
        name: "Badger",
        base_hp: 8,
        size: Size::Small,
        speed: 25,
        vision: Vision::LowLight,
        senses: SCENT_30,
        con_modifier: 2,
    },
    CompanionSpecies {
        id: "bear",
        name: "Bear",
        base_hp: 8,
        size: Size::Small,
        speed: 35,
        vision: Vision::LowLight,
        senses: SCENT_30,
        con_modifier: 2,
    },
    CompanionSpecies {
        id: "bird",
        name: "Bird",
        base_hp: 4,
        size: Size::Small,
        speed: 10,
        vision: Vision::LowLight,
        senses: &[],
        con_modifier: 1,
    },
    CompanionSpecies {
        id: "cat",
        name: "Cat",
        base_hp: 4,
        size: Size::Small,
        speed: 35,
        vision: Vision::LowLight,
        senses: SCENT_30,
        con_modifier: 1,
    },
    CompanionSpecies {
        id: "horse",
        name: "Horse",
        base_hp: 8,
        size: Size::Medium,
        speed: 40,
        vision: Vision::LowLight,
        senses: SCENT_30,
        con_modifier: 2,
    },
    CompanionSpecies {
        id: "wolf",
        name: "Wolf",
        base_hp: 6,
        size: Size::Small,
        speed: 40,
        vision: Vision::LowLight,
        senses: SCENT_30,
        con_modifier: 1,
    },
];

pub fn companion_species(id: &str) -> Option<&'static CompanionSpecies> {
    COMPANION_SPECIES.iter().find(|s| s.id == id)
}
