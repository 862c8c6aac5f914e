//! Pathsheet domain: Pathfinder 2e rules data, characters and the
//! recalculation pipeline that derives a sheet from a character's choices.
//!
//! Nothing in this crate performs I/O. Persistence, clocks and logging live
//! in the engine, which feeds characters in and stores the derived results.

pub mod catalog;
pub mod character;
pub mod error;
pub mod feats;
pub mod ids;
pub mod recalc;
pub mod rules;
pub mod ruleset;

pub use error::DomainError;

// Re-export ID types
pub use ids::CharacterId;

// Re-export the character aggregate and its choice types
pub use character::{
    AnimalCompanionChoice, Armor, BoostChoices, Character, CharacterChoices, CharacterName,
    ChoiceUpdate, CompanionChoices, DailyUses, Equipment, FamiliarChoice, FeatSelection,
    MaterialChoice, Shield, SpellcastingChoices, Weapon,
};

// Re-export feat resolution and eligibility
pub use feats::{
    daily_limit, eligible_feats, is_eligible, resolve_feats, ActiveFeat, FeatEffect, FeatKey,
    FeatSource, UnmetPrerequisite,
};

// Re-export the pipeline and its output
pub use recalc::{
    CharacterSnapshot, NoteLevel, RecalcNote, RecalcStep, Recalculation, Recalculator,
};

pub use rules::{Ability, AbilityScores, ProficiencyRank, Skill, SkillRef};
pub use ruleset::{FeatCategory, Ruleset, RulesetDocument};
