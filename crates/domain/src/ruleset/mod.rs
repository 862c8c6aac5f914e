//! Normalized ruleset data.
//!
//! The ancestry/heritage/background/class/feat/spell records the pipeline
//! reads. Upstream data is expected to be normalized already; this module
//! only fixes its serde shape and indexes it by id. A small built-in core
//! ruleset is available through [`Ruleset::core`].

mod core;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::rules::{
    Ability, CastingStyle, ProficiencyRank, ProficiencyTarget, Sense, Size, Skill, SkillRef,
    Tradition, Vision,
};

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AncestryData {
    pub id: String,
    pub name: String,
    pub hp: i32,
    #[serde(default)]
    pub size: Size,
    pub speed: i32,
    /// Fixed ability boosts
    #[serde(default)]
    pub boosts: Vec<Ability>,
    /// Number of free boosts on top of the fixed ones
    #[serde(default)]
    pub free_boosts: u8,
    #[serde(default)]
    pub flaws: Vec<Ability>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub bonus_languages: Vec<String>,
    #[serde(default)]
    pub vision: Vision,
    #[serde(default)]
    pub senses: Vec<Sense>,
    #[serde(default)]
    pub traits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeritageData {
    pub id: String,
    pub ancestry_id: String,
    pub name: String,
    /// Replaces the ancestry's vision when better
    #[serde(default)]
    pub vision: Option<Vision>,
    #[serde(default)]
    pub senses: Vec<Sense>,
    #[serde(default)]
    pub hp_bonus: i32,
    /// Extra feat slots at level 1 (e.g. versatile heritages)
    #[serde(default)]
    pub bonus_feat_slots: Vec<FeatCategory>,
}

/// A feat granted outright, with an optional preset selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatGrant {
    pub feat_id: String,
    #[serde(default)]
    pub selector: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundData {
    pub id: String,
    pub name: String,
    /// The player picks one of these plus one free boost
    #[serde(default)]
    pub boost_options: Vec<Ability>,
    #[serde(default)]
    pub trained_skill: Option<Skill>,
    #[serde(default)]
    pub trained_lore: Option<String>,
    #[serde(default)]
    pub skill_feat: Option<FeatGrant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProficiencyGrant {
    pub target: ProficiencyTarget,
    pub rank: ProficiencyRank,
}

/// A class feature that raises a proficiency at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionStep {
    pub level: u8,
    pub target: ProficiencyTarget,
    pub rank: ProficiencyRank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSpellcasting {
    /// Fixed tradition; `None` when the specialization decides
    #[serde(default)]
    pub tradition: Option<Tradition>,
    pub style: CastingStyle,
    pub ability: Ability,
    /// Extra slots per spell rank on top of the standard progression
    #[serde(default)]
    pub extra_slots: u8,
    /// Level at which signature spells unlock (spontaneous casters)
    #[serde(default)]
    pub signature_spells_level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassData {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub key_abilities: Vec<Ability>,
    #[serde(default)]
    pub initial_proficiencies: Vec<ProficiencyGrant>,
    #[serde(default)]
    pub trained_skills: Vec<Skill>,
    /// Skills of the player's choice, before the Int modifier
    #[serde(default)]
    pub additional_skills: u8,
    #[serde(default)]
    pub skill_increase_levels: Vec<u8>,
    #[serde(default)]
    pub class_feat_levels: Vec<u8>,
    #[serde(default)]
    pub skill_feat_levels: Vec<u8>,
    #[serde(default)]
    pub progression: Vec<ProgressionStep>,
    #[serde(default)]
    pub spellcasting: Option<ClassSpellcasting>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatCategory {
    Ancestry,
    Class,
    Skill,
    General,
    Archetype,
}

impl fmt::Display for FeatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatCategory::Ancestry => "ancestry",
            FeatCategory::Class => "class",
            FeatCategory::Skill => "skill",
            FeatCategory::General => "general",
            FeatCategory::Archetype => "archetype",
        };
        f.write_str(name)
    }
}

/// What kind of value a feat's selector holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    Skill,
    Lore,
    SaveOrPerception,
    Ancestry,
    Spell,
    Armor,
    Language,
    Feat,
}

/// A prerequisite for taking a feat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Prerequisite {
    /// Minimum character level
    MinLevel { level: u8 },
    /// Minimum ability score
    MinAbility { ability: Ability, score: i32 },
    /// Rank in a skill or lore
    SkillRank { skill: SkillRef, rank: ProficiencyRank },
    /// Rank in the skill named by the feat's own selector
    SelectedSkillRank { rank: ProficiencyRank },
    /// Must have another feat
    HasFeat { feat_id: String },
    /// Must be of an ancestry (Adopted Ancestry counts)
    Ancestry { ancestry_id: String },
    /// Must have a heritage
    Heritage { heritage_id: String },
    /// Must have a class
    Class { class_id: String },
    /// Must have a spellcasting class
    Spellcaster,
    /// Any one of the listed prerequisites
    AnyOf { options: Vec<Prerequisite> },
    /// Free text; never checked automatically
    Custom { description: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatData {
    pub id: String,
    pub name: String,
    pub level: u8,
    pub category: FeatCategory,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default)]
    pub selector: Option<SelectorKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellData {
    pub id: String,
    pub name: String,
    /// Spell rank, 0 for cantrips
    pub rank: u8,
    pub traditions: Vec<Tradition>,
    #[serde(default)]
    pub traits: Vec<String>,
}

impl SpellData {
    pub fn is_cantrip(&self) -> bool {
        self.rank == 0
    }
}

// =============================================================================
// Ruleset
// =============================================================================

/// Shape of a normalized ruleset document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesetDocument {
    #[serde(default)]
    pub ancestries: Vec<AncestryData>,
    #[serde(default)]
    pub heritages: Vec<HeritageData>,
    #[serde(default)]
    pub backgrounds: Vec<BackgroundData>,
    #[serde(default)]
    pub classes: Vec<ClassData>,
    #[serde(default)]
    pub feats: Vec<FeatData>,
    #[serde(default)]
    pub spells: Vec<SpellData>,
}

/// Rules data indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    ancestries: BTreeMap<String, AncestryData>,
    heritages: BTreeMap<String, HeritageData>,
    backgrounds: BTreeMap<String, BackgroundData>,
    classes: BTreeMap<String, ClassData>,
    feats: BTreeMap<String, FeatData>,
    spells: BTreeMap<String, SpellData>,
}

impl Ruleset {
    /// Index a document. Later records with a duplicate id replace earlier ones.
    pub fn from_document(doc: RulesetDocument) -> Self {
        fn index<T>(items: Vec<T>, id: impl Fn(&T) -> String) -> BTreeMap<String, T> {
            items.into_iter().map(|item| (id(&item), item)).collect()
        }

        Self {
            ancestries: index(doc.ancestries, |a| a.id.clone()),
            heritages: index(doc.heritages, |h| h.id.clone()),
            backgrounds: index(doc.backgrounds, |b| b.id.clone()),
            classes: index(doc.classes, |c| c.id.clone()),
            feats: index(doc.feats, |f| f.id.clone()),
            spells: index(doc.spells, |s| s.id.clone()),
        }
    }

    /// Parse a normalized ruleset document.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let doc: RulesetDocument = serde_json::from_str(json)
            .map_err(|e| DomainError::parse(format!("Invalid ruleset document: {}", e)))?;
        Ok(Self::from_document(doc))
    }

    /// The built-in core ruleset.
    pub fn core() -> Self {
        Self::from_document(core::core_document())
    }

    pub fn ancestry(&self, id: &str) -> Option<&AncestryData> {
        self.ancestries.get(id)
    }

    pub fn heritage(&self, id: &str) -> Option<&HeritageData> {
        self.heritages.get(id)
    }

    pub fn background(&self, id: &str) -> Option<&BackgroundData> {
        self.backgrounds.get(id)
    }

    pub fn class(&self, id: &str) -> Option<&ClassData> {
        self.classes.get(id)
    }

    pub fn feat(&self, id: &str) -> Option<&FeatData> {
        self.feats.get(id)
    }

    pub fn spell(&self, id: &str) -> Option<&SpellData> {
        self.spells.get(id)
    }

    pub fn ancestries(&self) -> impl Iterator<Item = &AncestryData> {
        self.ancestries.values()
    }

    pub fn heritages_for(&self, ancestry_id: &str) -> Vec<&HeritageData> {
        self.heritages
            .values()
            .filter(|h| h.ancestry_id == ancestry_id)
            .collect()
    }

    pub fn backgrounds(&self) -> impl Iterator<Item = &BackgroundData> {
        self.backgrounds.values()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassData> {
        self.classes.values()
    }

    pub fn feats(&self) -> impl Iterator<Item = &FeatData> {
        self.feats.values()
    }

    /// Spells of a tradition, optionally restricted to one rank.
    pub fn spells_for(&self, tradition: Tradition, rank: Option<u8>) -> Vec<&SpellData> {
        self.spells
            .values()
            .filter(|s| s.traditions.contains(&tradition))
            .filter(|s| rank.map_or(true, |r| s.rank == r))
            .collect()
    }
}
