//! Pathfinder 2e core arithmetic.
//!
//! Ability scores, proficiency ranks, skills, saves and senses. Everything
//! here is a plain value type; the recalculation pipeline combines them.

mod ability;
mod categories;
mod proficiency;
mod senses;
mod skill;

pub use ability::{ability_modifier, Ability, AbilityScores, BOOST_SOFT_CAP};
pub use categories::{
    ArmorCategory, CastingStyle, ProficiencyTarget, Tradition, WeaponCategory,
};
pub use proficiency::{
    determine_success, multiple_attack_penalty, untrained_improvisation_bonus, DegreeOfSuccess,
    ProficiencyRank,
};
pub use senses::{merge_sense, Sense, SenseKind, Size, Vision};
pub use skill::{Save, Skill, SkillRef};
