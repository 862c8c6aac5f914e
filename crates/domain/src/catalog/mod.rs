//! Static reference data for Pathfinder 2e items and options.
//!
//! Hardcoded tables for runes, precious materials, innate spell grants,
//! class specializations, rituals and companions, each with small lookup
//! helpers. None of this depends on the loaded ruleset.

pub mod companions;
pub mod innate_spells;
pub mod materials;
pub mod rituals;
pub mod runes;
pub mod specializations;

pub use companions::{
    companion_species, CompanionSpecies, COMPANION_HP_PER_LEVEL, COMPANION_SPECIES,
    FAMILIAR_BASE_ABILITIES, FAMILIAR_HP_PER_LEVEL,
};
pub use innate_spells::{
    innate_sources, innate_spells_from, InnateChoice, InnateFrequency, InnateSpellGrant,
    InnateSpellKind, INNATE_SPELLS,
};
pub use materials::{
    grade_info, material_by_id, materials_for, GradeInfo, ItemKind, Material, MaterialGrade,
    MATERIALS,
};
pub use rituals::{ritual_by_id, Ritual, RITUALS};
pub use runes::{
    max_property_runes, property_runes_for, rune_by_id, runes_up_to_level, striking_dice, Rune,
    RuneDamage, RuneKind, RuneSlot, RUNES,
};
pub use specializations::{
    specialization_by_id, specializations_for_class, Specialization, SPECIALIZATIONS,
};
