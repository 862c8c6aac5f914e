//! Character aggregate: raw build choices plus the last derived snapshot.
//!
//! Only choices live here. Everything computed from them (scores, skills,
//! AC, strikes, ...) is produced by the recalculation pipeline and stored in
//! `derived` as a cache that is replaced on every recalculation.

mod daily;
mod equipment;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use daily::DailyUses;
pub use equipment::{Armor, Equipment, MaterialChoice, Shield, Weapon};

use crate::catalog::{companion_species, ritual_by_id, specialization_by_id};
use crate::error::DomainError;
use crate::feats::{spell_tradition, validate_selector, FeatKey};
use crate::ids::CharacterId;
use crate::recalc::CharacterSnapshot;
use crate::rules::{Ability, SkillRef};
use crate::ruleset::Ruleset;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 20;

/// Levels that grant four free ability boosts.
pub const BOOST_LEVELS: [u8; 4] = [5, 10, 15, 20];

const MAX_NAME_LENGTH: usize = 200;

// ============================================================================
// CharacterName
// ============================================================================

/// A validated character name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Character name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

// ============================================================================
// Choices
// ============================================================================

/// Every ability boost the player picked, grouped by source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostChoices {
    /// Free ancestry boosts (or both boosts when using alternate boosts)
    #[serde(default)]
    pub ancestry: Vec<Ability>,
    /// Replace the ancestry's fixed boosts and flaws with two free boosts
    #[serde(default)]
    pub alternate_ancestry_boosts: bool,
    /// One of the background's options followed by one free boost
    #[serde(default)]
    pub background: Vec<Ability>,
    /// The four free boosts at 1st level
    #[serde(default)]
    pub free: Vec<Ability>,
    /// Four boosts at each of 5th, 10th, 15th and 20th level
    #[serde(default)]
    pub levels: BTreeMap<u8, Vec<Ability>>,
}

impl BoostChoices {
    fn validate(&self) -> Result<(), DomainError> {
        check_boost_set("ancestry", &self.ancestry, 3)?;
        check_boost_set("background", &self.background, 2)?;
        check_boost_set("level 1", &self.free, 4)?;
        for (level, set) in &self.levels {
            if !BOOST_LEVELS.contains(level) {
                return Err(DomainError::validation(format!(
                    "No ability boosts are gained at level {}",
                    level
                )));
            }
            check_boost_set(&format!("level {}", level), set, 4)?;
        }
        Ok(())
    }
}

fn check_boost_set(source: &str, set: &[Ability], max: usize) -> Result<(), DomainError> {
    if set.len() > max {
        return Err(DomainError::validation(format!(
            "Too many {} boosts: {} (max {})",
            source,
            set.len(),
            max
        )));
    }
    for (i, ability) in set.iter().enumerate() {
        if set[..i].contains(ability) {
            return Err(DomainError::validation(format!(
                "{} boosts must target different abilities ({} repeated)",
                source, ability
            )));
        }
    }
    Ok(())
}

/// A feat the player took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatSelection {
    pub feat_id: String,
    /// The player's choice attached to the feat (skill, lore topic, spell, ...)
    #[serde(default)]
    pub selector: Option<String>,
    /// Character level at which the feat was taken
    pub level: u8,
}

impl FeatSelection {
    pub fn new(feat_id: impl Into<String>, level: u8) -> Self {
        Self {
            feat_id: feat_id.into(),
            selector: None,
            level,
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn key(&self) -> FeatKey {
        FeatKey::new(&self.feat_id, self.selector.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingChoices {
    /// Spells known by a spontaneous caster, cantrips included
    #[serde(default)]
    pub repertoire: Vec<String>,
    /// Spells in a prepared caster's spellbook
    #[serde(default)]
    pub spellbook: Vec<String>,
    #[serde(default)]
    pub signature_spells: Vec<String>,
    /// Innate spell picked for each choice grant, keyed by grant source
    #[serde(default)]
    pub innate: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamiliarChoice {
    pub name: String,
    #[serde(default)]
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalCompanionChoice {
    pub name: String,
    pub species_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionChoices {
    #[serde(default)]
    pub familiar: Option<FamiliarChoice>,
    #[serde(default)]
    pub animal_companion: Option<AnimalCompanionChoice>,
}

/// The raw build of a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterChoices {
    #[serde(default)]
    pub ancestry_id: Option<String>,
    #[serde(default)]
    pub heritage_id: Option<String>,
    #[serde(default)]
    pub background_id: Option<String>,
    #[serde(default)]
    pub class_id: Option<String>,
    #[serde(default)]
    pub specialization_id: Option<String>,
    #[serde(default)]
    pub key_ability: Option<Ability>,
    #[serde(default)]
    pub boosts: BoostChoices,
    /// Skills trained through the class's free skill picks
    #[serde(default)]
    pub class_skills: Vec<SkillRef>,
    /// Skill increase chosen at each level
    #[serde(default)]
    pub skill_increases: BTreeMap<u8, SkillRef>,
    #[serde(default)]
    pub feats: Vec<FeatSelection>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub spellcasting: SpellcastingChoices,
    #[serde(default)]
    pub companions: CompanionChoices,
    #[serde(default)]
    pub rituals: Vec<String>,
}

// ============================================================================
// Choice updates
// ============================================================================

/// One edit to a character's choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChoiceUpdate {
    Rename { name: String },
    SetLevel { level: u8 },
    SetAncestry { ancestry_id: Option<String> },
    SetHeritage { heritage_id: Option<String> },
    SetBackground { background_id: Option<String> },
    SetClass { class_id: Option<String> },
    SetSpecialization { specialization_id: Option<String> },
    SetKeyAbility { ability: Option<Ability> },
    SetBoosts { boosts: BoostChoices },
    SetClassSkills { skills: Vec<SkillRef> },
    SetSkillIncrease { level: u8, skill: Option<SkillRef> },
    AddFeat { feat: FeatSelection },
    RemoveFeat { feat_id: String, selector: Option<String> },
    SetLanguages { languages: Vec<String> },
    SetEquipment { equipment: Equipment },
    SetSpellcasting { spellcasting: SpellcastingChoices },
    SetCompanions { companions: CompanionChoices },
    SetRituals { ritual_ids: Vec<String> },
}

fn validate_level(level: u8) -> Result<(), DomainError> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(DomainError::validation(format!(
            "Level must be between {} and {}, got {}",
            MIN_LEVEL, MAX_LEVEL, level
        )));
    }
    Ok(())
}

// ============================================================================
// Character
// ============================================================================

/// A player character.
///
/// # Invariants
///
/// - `level` is always within 1..=20
/// - `name` is non-empty (enforced by `CharacterName`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    id: CharacterId,
    name: CharacterName,
    level: u8,
    #[serde(default)]
    choices: CharacterChoices,
    #[serde(default)]
    daily: DailyUses,
    #[serde(default)]
    derived: Option<CharacterSnapshot>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Character {
    pub fn new(name: CharacterName, now: DateTime<Utc>) -> Self {
        Self {
            id: CharacterId::new(),
            name,
            level: MIN_LEVEL,
            choices: CharacterChoices::default(),
            daily: DailyUses::default(),
            derived: None,
            created_at: now,
            updated_at: now,
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_level(mut self, level: u8) -> Result<Self, DomainError> {
        validate_level(level)?;
        self.level = level;
        Ok(self)
    }

    /// Replace the raw choices without checking them against a ruleset.
    pub fn with_choices(mut self, choices: CharacterChoices) -> Self {
        self.choices = choices;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub fn choices(&self) -> &CharacterChoices {
        &self.choices
    }

    #[inline]
    pub fn daily(&self) -> &DailyUses {
        &self.daily
    }

    pub fn daily_mut(&mut self) -> &mut DailyUses {
        &mut self.daily
    }

    #[inline]
    pub fn derived(&self) -> Option<&CharacterSnapshot> {
        self.derived.as_ref()
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Store a freshly derived snapshot, replacing the old one.
    pub fn set_derived(&mut self, snapshot: CharacterSnapshot) {
        self.derived = Some(snapshot);
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Validate an edit against the ruleset and apply it.
    ///
    /// The derived snapshot is left untouched; callers recalculate after
    /// applying a batch of updates.
    pub fn apply(
        &mut self,
        update: ChoiceUpdate,
        ruleset: &Ruleset,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let choices = &mut self.choices;
        match update {
            ChoiceUpdate::Rename { name } => {
                self.name = CharacterName::new(name)?;
            }
            ChoiceUpdate::SetLevel { level } => {
                validate_level(level)?;
                self.level = level;
            }
            ChoiceUpdate::SetAncestry { ancestry_id } => {
                if let Some(id) = &ancestry_id {
                    ruleset
                        .ancestry(id)
                        .ok_or_else(|| DomainError::not_found("Ancestry", id.clone()))?;
                }
                if choices.ancestry_id != ancestry_id {
                    choices.heritage_id = None;
                    choices.boosts.ancestry.clear();
                }
                choices.ancestry_id = ancestry_id;
            }
            ChoiceUpdate::SetHeritage { heritage_id } => {
                if let Some(id) = &heritage_id {
                    let heritage = ruleset
                        .heritage(id)
                        .ok_or_else(|| DomainError::not_found("Heritage", id.clone()))?;
                    if choices.ancestry_id.as_deref() != Some(heritage.ancestry_id.as_str()) {
                        return Err(DomainError::constraint(format!(
                            "{} is not a heritage of the chosen ancestry",
                            heritage.name
                        )));
                    }
                }
                choices.heritage_id = heritage_id;
            }
            ChoiceUpdate::SetBackground { background_id } => {
                if let Some(id) = &background_id {
                    ruleset
                        .background(id)
                        .ok_or_else(|| DomainError::not_found("Background", id.clone()))?;
                }
                if choices.background_id != background_id {
                    choices.boosts.background.clear();
                }
                choices.background_id = background_id;
            }
            ChoiceUpdate::SetClass { class_id } => {
                let class = match &class_id {
                    Some(id) => Some(
                        ruleset
                            .class(id)
                            .ok_or_else(|| DomainError::not_found("Class", id.clone()))?,
                    ),
                    None => None,
                };
                let keeps_specialization = choices
                    .specialization_id
                    .as_deref()
                    .and_then(specialization_by_id)
                    .is_some_and(|s| Some(s.class_id) == class_id.as_deref());
                if !keeps_specialization {
                    choices.specialization_id = None;
                }
                let keeps_key = choices
                    .key_ability
                    .is_some_and(|k| class.is_some_and(|c| c.key_abilities.contains(&k)));
                if !keeps_key {
                    choices.key_ability = None;
                }
                choices.class_id = class_id;
            }
            ChoiceUpdate::SetSpecialization { specialization_id } => {
                if let Some(id) = &specialization_id {
                    let spec = specialization_by_id(id)
                        .ok_or_else(|| DomainError::not_found("Specialization", id.clone()))?;
                    if choices.class_id.as_deref() != Some(spec.class_id) {
                        return Err(DomainError::constraint(format!(
                            "{} is not a specialization of the chosen class",
                            spec.name
                        )));
                    }
                }
                choices.specialization_id = specialization_id;
            }
            ChoiceUpdate::SetKeyAbility { ability } => {
                if let Some(ability) = ability {
                    let class_id = choices
                        .class_id
                        .as_deref()
                        .ok_or_else(|| DomainError::validation("Choose a class first"))?;
                    let class = ruleset
                        .class(class_id)
                        .ok_or_else(|| DomainError::not_found("Class", class_id))?;
                    let from_spec = choices
                        .specialization_id
                        .as_deref()
                        .and_then(specialization_by_id)
                        .and_then(|s| s.key_ability);
                    if !class.key_abilities.contains(&ability) && from_spec != Some(ability) {
                        return Err(DomainError::constraint(format!(
                            "{} is not a key ability option for {}",
                            ability, class.name
                        )));
                    }
                }
                choices.key_ability = ability;
            }
            ChoiceUpdate::SetBoosts { boosts } => {
                boosts.validate()?;
                choices.boosts = boosts;
            }
            ChoiceUpdate::SetClassSkills { skills } => {
                for (i, skill) in skills.iter().enumerate() {
                    if skills[..i].contains(skill) {
                        return Err(DomainError::validation(format!(
                            "{} chosen twice",
                            skill
                        )));
                    }
                }
                choices.class_skills = skills;
            }
            ChoiceUpdate::SetSkillIncrease { level, skill } => {
                validate_level(level)?;
                match skill {
                    Some(skill) => {
                        choices.skill_increases.insert(level, skill);
                    }
                    None => {
                        choices.skill_increases.remove(&level);
                    }
                }
            }
            ChoiceUpdate::AddFeat { feat } => {
                validate_level(feat.level)?;
                let data = ruleset
                    .feat(&feat.feat_id)
                    .ok_or_else(|| DomainError::not_found("Feat", feat.feat_id.clone()))?;
                validate_selector(
                    data,
                    feat.selector.as_deref(),
                    spell_tradition(choices, ruleset),
                    ruleset,
                )?;
                let key = feat.key();
                if choices.feats.iter().any(|f| f.key() == key) {
                    return Err(DomainError::constraint(format!(
                        "{} is already taken",
                        data.name
                    )));
                }
                if !data.repeatable && choices.feats.iter().any(|f| f.feat_id == feat.feat_id) {
                    return Err(DomainError::constraint(format!(
                        "{} cannot be taken more than once",
                        data.name
                    )));
                }
                choices.feats.push(feat);
            }
            ChoiceUpdate::RemoveFeat { feat_id, selector } => {
                let key = FeatKey::new(&feat_id, selector.as_deref());
                let before = choices.feats.len();
                choices.feats.retain(|f| f.key() != key);
                if choices.feats.len() == before {
                    return Err(DomainError::not_found("Feat selection", key.to_string()));
                }
            }
            ChoiceUpdate::SetLanguages { languages } => {
                let mut cleaned: Vec<String> = Vec::with_capacity(languages.len());
                for language in languages {
                    let language = language.trim().to_lowercase();
                    if !language.is_empty() && !cleaned.contains(&language) {
                        cleaned.push(language);
                    }
                }
                choices.languages = cleaned;
            }
            ChoiceUpdate::SetEquipment { equipment } => {
                equipment.validate()?;
                choices.equipment = equipment;
            }
            ChoiceUpdate::SetSpellcasting { spellcasting } => {
                let all_spells = spellcasting
                    .repertoire
                    .iter()
                    .chain(&spellcasting.spellbook)
                    .chain(&spellcasting.signature_spells)
                    .chain(spellcasting.innate.values());
                for spell_id in all_spells {
                    ruleset
                        .spell(spell_id)
                        .ok_or_else(|| DomainError::not_found("Spell", spell_id.clone()))?;
                }
                choices.spellcasting = spellcasting;
            }
            ChoiceUpdate::SetCompanions { companions } => {
                if let Some(companion) = &companions.animal_companion {
                    companion_species(&companion.species_id).ok_or_else(|| {
                        DomainError::not_found("Companion species", companion.species_id.clone())
                    })?;
                }
                choices.companions = companions;
            }
            ChoiceUpdate::SetRituals { ritual_ids } => {
                for id in &ritual_ids {
                    ritual_by_id(id).ok_or_else(|| DomainError::not_found("Ritual", id.clone()))?;
                }
                choices.rituals = ritual_ids;
            }
        }
        self.updated_at = now;
        Ok(())
    }
}
