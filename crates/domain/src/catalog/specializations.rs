//! Class specializations
//!
//! The level-1 subclass choice of each class: rogue rackets, sorcerer
//! bloodlines, cleric doctrines, bard muses, ranger hunter's edges and
//! wizard arcane theses. A specialization may train skills, set the
//! spellcasting tradition, widen key ability options or grant feats.

use serde::Serialize;

use crate::rules::{
    Ability, ArmorCategory, ProficiencyRank, ProficiencyTarget, Save, Skill, Tradition,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Specialization {
    pub class_id: &'static str,
    pub id: &'static str,
    pub name: &'static str,
    /// Extra key ability option offered by the specialization
    pub key_ability: Option<Ability>,
    pub trained_skills: &'static [Skill],
    pub tradition: Option<Tradition>,
    pub proficiencies: &'static [(ProficiencyTarget, ProficiencyRank)],
    pub granted_feats: &'static [&'static str],
}

const fn spec(class_id: &'static str, id: &'static str, name: &'static str) -> Specialization {
    Specialization {
        class_id,
        id,
        name,
        key_ability: None,
        trained_skills: &[],
        tradition: None,
        proficiencies: &[],
        granted_feats: &[],
    }
}

const fn bloodline(
    id: &'static str,
    name: &'static str,
    tradition: Tradition,
    trained_skills: &'static [Skill],
) -> Specialization {
    Specialization {
        class_id: "sorcerer",
        id,
        name,
        key_ability: None,
        trained_skills,
        tradition: Some(tradition),
        proficiencies: &[],
        granted_feats: &[],
    }
}

pub const SPECIALIZATIONS: &[Specialization] = &[
    // Rogue rackets
    Specialization {
        key_ability: Some(Ability::Str),
        trained_skills: &[Skill::Intimidation],
        proficiencies: &[(
            ProficiencyTarget::Armor(ArmorCategory::Medium),
            ProficiencyRank::Trained,
        )],
        ..spec("rogue", "ruffian", "Ruffian")
    },
    Specialization {
        key_ability: Some(Ability::Cha),
        trained_skills: &[Skill::Deception, Skill::Diplomacy],
        ..spec("rogue", "scoundrel", "Scoundrel")
    },
    Specialization {
        trained_skills: &[Skill::Thievery],
        ..spec("rogue", "thief", "Thief")
    },
    Specialization {
        key_ability: Some(Ability::Int),
        trained_skills: &[Skill::Society],
        ..spec("rogue", "mastermind", "Mastermind")
    },
    // Sorcerer bloodlines
    bloodline("aberrant", "Aberrant", Tradition::Occult, &[Skill::Intimidation, Skill::Occultism]),
    bloodline("angelic", "Angelic", Tradition::Divine, &[Skill::Diplomacy, Skill::Religion]),
    bloodline("demonic", "Demonic", Tradition::Divine, &[Skill::Intimidation, Skill::Religion]),
    bloodline("draconic", "Draconic", Tradition::Arcane, &[Skill::Arcana, Skill::Intimidation]),
    bloodline("elemental", "Elemental", Tradition::Primal, &[Skill::Intimidation, Skill::Nature]),
    bloodline("fey", "Fey", Tradition::Primal, &[Skill::Deception, Skill::Nature]),
    bloodline("imperial", "Imperial", Tradition::Arcane, &[Skill::Arcana, Skill::Society]),
    bloodline("undead", "Undead", Tradition::Divine, &[Skill::Intimidation, Skill::Religion]),
    // Cleric doctrines
    Specialization {
        granted_feats: &["domain-initiate"],
        ..spec("cleric", "cloistered-cleric", "Cloistered Cleric")
    },
    Specialization {
        proficiencies: &[
            (ProficiencyTarget::Armor(ArmorCategory::Light), ProficiencyRank::Trained),
            (ProficiencyTarget::Armor(ArmorCategory::Medium), ProficiencyRank::Trained),
            (ProficiencyTarget::Save(Save::Fortitude), ProficiencyRank::Expert),
        ],
        granted_feats: &["shield-block"],
        ..spec("cleric", "warpriest", "Warpriest")
    },
    // Bard muses
    Specialization {
        granted_feats: &["bardic-lore"],
        ..spec("bard", "enigma", "Enigma")
    },
    Specialization {
        granted_feats: &["lingering-composition"],
        ..spec("bard", "maestro", "Maestro")
    },
    Specialization {
        granted_feats: &["versatile-performance"],
        ..spec("bard", "polymath", "Polymath")
    },
    // Ranger hunter's edges
    spec("ranger", "flurry", "Flurry"),
    spec("ranger", "precision", "Precision"),
    spec("ranger", "outwit", "Outwit"),
    // Wizard arcane theses
    spec("wizard", "spell-blending", "Spell Blending"),
    spec("wizard", "spell-substitution", "Spell Substitution"),
    spec("wizard", "staff-nexus", "Staff Nexus"),
    spec("wizard", "improved-familiar-attunement", "Improved Familiar Attunement"),
    spec("wizard", "experimental-spellshaping", "Experimental Spellshaping"),
];

/// All specializations offered by a class
pub fn specializations_for_class(class_id: &str) -> Vec<&'static Specialization> {
    SPECIALIZATIONS
        .iter()
        .filter(|s| s.class_id == class_id)
        .collect()
}

/// Get a specialization by id
pub fn specialization_by_id(id: &str) -> Option<&'static Specialization> {
    SPECIALIZATIONS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bloodlines_set_tradition() {
        let draconic = specialization_by_id("draconic").unwrap();
        assert_eq!(draconic.class_id, "sorcerer");
        assert_eq!(draconic.tradition, Some(Tradition::Arcane));
        assert!(draconic.trained_skills.contains(&Skill::Arcana));
    }

    #[test]
    fn rogue_has_four_rackets() {
        let rackets = specializations_for_class("rogue");
        assert_eq!(rackets.len(), 4);
        assert!(rackets.iter().any(|r| r.key_ability == Some(Ability::Cha)));
    }

    #[test]
    fn fighter_has_no_specialization() {
        assert!(specializations_for_class("fighter").is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = SPECIALIZATIONS.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SPECIALIZATIONS.len());
    }
}
