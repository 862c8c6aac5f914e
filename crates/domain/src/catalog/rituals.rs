//! Ritual catalog: primary check skills and the proficiency they need.

use serde::Serialize;

use crate::rules::{ProficiencyRank, Skill};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ritual {
    pub id: &'static str,
    pub name: &'static str,
    pub rank: u8,
    /// The primary caster may attempt the check with any of these
    pub primary_skills: &'static [Skill],
    pub min_proficiency: ProficiencyRank,
}

pub const RITUALS: &[Ritual] = &[
    Ritual {
        id: "animate-object",
        name: "Animate Object",
        rank: 2,
        primary_skills: &[Skill::Crafting],
        min_proficiency: ProficiencyRank::Expert,
    },
    Ritual {
        id: "consecrate",
        name: "Consecrate",
        rank: 2,
        primary_skills: &[Skill::Religion],
        min_proficiency: ProficiencyRank::Expert,
    },
    Ritual {
        id: "create-undead",
        name: "Create Undead",
        rank: 2,
        primary_skills: &[Skill::Arcana, Skill::Occultism, Skill::Religion],
        min_proficiency: ProficiencyRank::Expert,
    },
    Ritual {
        id: "inveigle",
        name: "Inveigle",
        rank: 2,
        primary_skills: &[Skill::Occultism],
        min_proficiency: ProficiencyRank::Expert,
    },
    Ritual {
        id: "geas",
        name: "Geas",
        rank: 3,
        primary_skills: &[Skill::Arcana, Skill::Occultism, Skill::Religion],
        min_proficiency: ProficiencyRank::Expert,
    },
    Ritual {
        id: "blight",
        name: "Blight",
        rank: 4,
        primary_skills: &[Skill::Nature],
        min_proficiency: ProficiencyRank::Expert,
    },
    Ritual {
        id: "resurrect",
        name: "Resurrect",
        rank: 5,
        primary_skills: &[Skill::Religion],
        min_proficiency: ProficiencyRank::Master,
    },
    Ritual {
        id: "commune",
        name: "Commune",
        rank: 6,
        primary_skills: &[Skill::Occultism, Skill::Religion],
        min_proficiency: ProficiencyRank::Master,
    },
    Ritual {
        id: "planar-binding",
        name: "Planar Binding",
        rank: 6,
        primary_skills: &[Skill::Arcana, Skill::Nature, Skill::Occultism, Skill::Religion],
        min_proficiency: ProficiencyRank::Master,
    },
];

pub fn ritual_by_id(id: &str) -> Option<&'static Ritual> {
    RITUALS.iter().find(|r| r.id == id)
}
