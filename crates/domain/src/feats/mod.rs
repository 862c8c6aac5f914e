//! Feat resolution and feat rules
//!
//! Feats enter the pipeline from three places: the player's own selections,
//! the background's granted skill feat and the specialization's granted
//! feats. [`resolve_feats`] merges them into the active set: selections
//! above the current level are dropped, duplicates are collapsed by
//! [`FeatKey`] keeping the earliest level, and the result is sorted by the
//! level it was taken at.
//!
//! Each supported feat has a [`FeatRule`] that turns an active feat into
//! [`FeatEffect`]s the recalculation steps consume.

mod ancestry;
mod daily;
mod effects;
mod eligibility;
mod general;
mod skill;
mod spells;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use daily::daily_limit;
pub use effects::FeatEffect;
pub use eligibility::{
    check_prerequisites, eligible_feats, is_eligible, validate_selector, UnmetPrerequisite,
};
pub use spells::{cantrip_options, feat_spell_options, spell_tradition};

use crate::catalog::specialization_by_id;
use crate::character::Character;
use crate::error::DomainError;
use crate::recalc::{RecalcNote, RecalcStep};
use crate::ruleset::Ruleset;

/// Identity of an active feat: the feat id and its selector.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatKey {
    pub feat_id: String,
    #[serde(default)]
    pub selector: Option<String>,
}

impl FeatKey {
    pub fn new(feat_id: &str, selector: Option<&str>) -> Self {
        Self {
            feat_id: feat_id.to_string(),
            selector: selector.map(|s| s.trim().to_lowercase()),
        }
    }
}

impl fmt::Display for FeatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selector {
            Some(selector) => write!(f, "{} ({})", self.feat_id, selector),
            None => write!(f, "{}", self.feat_id),
        }
    }
}

/// Where an active feat came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatSource {
    Chosen,
    Background,
    Specialization,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFeat {
    pub key: FeatKey,
    pub level: u8,
    pub source: FeatSource,
    /// False when the ruleset has no record of this feat
    pub known: bool,
}

impl ActiveFeat {
    pub fn id(&self) -> &str {
        &self.key.feat_id
    }

    pub fn selector(&self) -> Option<&str> {
        self.key.selector.as_deref()
    }
}

/// Active feats plus notes about the selections that were dropped.
#[derive(Debug, Clone, Default)]
pub struct FeatResolution {
    pub active: Vec<ActiveFeat>,
    pub notes: Vec<RecalcNote>,
}

/// Merge granted and chosen feats into the active set.
pub fn resolve_feats(character: &Character, ruleset: &Ruleset) -> FeatResolution {
    let level = character.level();
    let choices = character.choices();
    let mut candidates: Vec<ActiveFeat> = Vec::new();
    let mut notes = Vec::new();

    let background_grant = choices
        .background_id
        .as_deref()
        .and_then(|id| ruleset.background(id))
        .and_then(|bg| bg.skill_feat.as_ref());
    if let Some(grant) = background_grant {
        candidates.push(ActiveFeat {
            key: FeatKey::new(&grant.feat_id, grant.selector.as_deref()),
            level: 1,
            source: FeatSource::Background,
            known: true,
        });
    }

    let specialization = choices
        .specialization_id
        .as_deref()
        .and_then(specialization_by_id);
    if let Some(spec) = specialization {
        for feat_id in spec.granted_feats {
            candidates.push(ActiveFeat {
                key: FeatKey::new(feat_id, None),
                level: 1,
                source: FeatSource::Specialization,
                known: true,
            });
        }
    }

    for selection in &choices.feats {
        if selection.level > level {
            notes.push(RecalcNote::info(
                RecalcStep::Feats,
                format!(
                    "{} was taken at level {}, above current level {}",
                    selection.feat_id, selection.level, level
                ),
            ));
            continue;
        }
        candidates.push(ActiveFeat {
            key: selection.key(),
            level: selection.level,
            source: FeatSource::Chosen,
            known: true,
        });
    }

    // Earliest first so dedup keeps the earliest level
    candidates.sort_by(|a, b| a.level.cmp(&b.level));

    let mut active: Vec<ActiveFeat> = Vec::with_capacity(candidates.len());
    for mut feat in candidates {
        if active.iter().any(|f| f.key == feat.key) {
            notes.push(RecalcNote::warn(
                RecalcStep::Feats,
                format!("{} is taken more than once; keeping the earliest", feat.key),
            ));
            continue;
        }

        match ruleset.feat(feat.id()) {
            Some(data) => {
                if !data.repeatable && active.iter().any(|f| f.id() == feat.id()) {
                    notes.push(RecalcNote::warn(
                        RecalcStep::Feats,
                        format!("{} is not repeatable; dropping {}", data.name, feat.key),
                    ));
                    continue;
                }
            }
            None => {
                feat.known = false;
                notes.push(RecalcNote::warn(
                    RecalcStep::Feats,
                    format!("Unknown feat {}", feat.key),
                ));
            }
        }
        active.push(feat);
    }

    active.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.key.cmp(&b.key)));
    FeatResolution { active, notes }
}

/// Active feats, without the notes.
pub fn active_feats(character: &Character, ruleset: &Ruleset) -> Vec<ActiveFeat> {
    resolve_feats(character, ruleset).active
}

/// Whether the character currently has a feat, under any selector.
pub fn has_feat(character: &Character, ruleset: &Ruleset, feat_id: &str) -> bool {
    active_feats(character, ruleset)
        .iter()
        .any(|f| f.id() == feat_id)
}

/// Whether a resolved feat list contains a feat, under any selector.
pub fn contains_feat(feats: &[ActiveFeat], feat_id: &str) -> bool {
    feats.iter().any(|f| f.id() == feat_id)
}

// =============================================================================
// Feat rules
// =============================================================================

/// What a feat rule can see while producing effects.
#[derive(Debug, Clone, Copy)]
pub struct FeatContext<'a> {
    pub feat: &'a ActiveFeat,
    /// Current character level
    pub level: u8,
}

impl<'a> FeatContext<'a> {
    pub fn selector(&self) -> Option<&'a str> {
        self.feat.selector()
    }

    /// The selector, or a validation error naming the feat.
    pub fn require_selector(&self) -> Result<&'a str, DomainError> {
        self.selector().ok_or_else(|| {
            DomainError::validation(format!("{} needs a selection", self.feat.id()))
        })
    }
}

pub type EffectFn = fn(&FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError>;

/// Effect producer for one feat.
pub struct FeatRule {
    pub feat_id: &'static str,
    pub effects: EffectFn,
}

impl fmt::Debug for FeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatRule")
            .field("feat_id", &self.feat_id)
            .finish()
    }
}

fn rule_tables() -> [&'static [FeatRule]; 4] {
    [general::RULES, skill::RULES, ancestry::RULES, spells::RULES]
}

/// The rule for a feat, if it has mechanical effects.
pub fn rule_for(feat_id: &str) -> Option<&'static FeatRule> {
    rule_tables()
        .into_iter()
        .flat_map(|table| table.iter())
        .find(|rule| rule.feat_id == feat_id)
}

/// Effects of one active feat at the given character level.
pub fn effects_for(feat: &ActiveFeat, level: u8) -> Result<Vec<FeatEffect>, DomainError> {
    match rule_for(feat.id()) {
        Some(rule) => (rule.effects)(&FeatContext { feat, level }),
        None => Ok(Vec::new()),
    }
}

/// Ancestries the character counts as for prerequisites and weapon familiarity.
pub fn effective_ancestries(character: &Character, feats: &[ActiveFeat]) -> Vec<String> {
    let mut ancestries: Vec<String> = character.choices().ancestry_id.iter().cloned().collect();
    for feat in feats.iter().filter(|f| f.id() == "adopted-ancestry") {
        if let Some(adopted) = feat.selector() {
            if !ancestries.iter().any(|a| a == adopted) {
                ancestries.push(adopted.to_string());
            }
        }
    }
    ancestries
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::character::{CharacterChoices, CharacterName, FeatSelection};

    fn character(level: u8, choices: CharacterChoices) -> Character {
        Character::new(CharacterName::new("Test").unwrap(), Utc::now())
            .with_level(level)
            .unwrap()
            .with_choices(choices)
    }

    #[test]
    fn feats_above_current_level_are_inactive() {
        let choices = CharacterChoices {
            feats: vec![
                FeatSelection::new("toughness", 1),
                FeatSelection::new("untrained-improvisation", 3),
            ],
            ..Default::default()
        };
        let resolution = resolve_feats(&character(2, choices), &Ruleset::core());
        let ids: Vec<_> = resolution.active.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["toughness"]);
        assert_eq!(resolution.notes.len(), 1);
    }

    #[test]
    fn duplicates_keep_earliest_level() {
        let choices = CharacterChoices {
            feats: vec![
                FeatSelection::new("skill-training", 5).with_selector("Arcana"),
                FeatSelection::new("skill-training", 1).with_selector("arcana"),
            ],
            ..Default::default()
        };
        let active = active_feats(&character(5, choices), &Ruleset::core());
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].level, 1);
        assert_eq!(active[0].selector(), Some("arcana"));
    }

    #[test]
    fn non_repeatable_feat_keeps_first_selector() {
        let choices = CharacterChoices {
            feats: vec![
                FeatSelection::new("canny-acumen", 1).with_selector("will"),
                FeatSelection::new("canny-acumen", 3).with_selector("reflex"),
            ],
            ..Default::default()
        };
        let resolution = resolve_feats(&character(3, choices), &Ruleset::core());
        assert_eq!(resolution.active.len(), 1);
        assert_eq!(resolution.active[0].selector(), Some("will"));
        assert!(!resolution.notes.is_empty());
    }

    #[test]
    fn granted_feats_are_active() {
        let choices = CharacterChoices {
            background_id: Some("farmhand".to_string()),
            class_id: Some("cleric".to_string()),
            specialization_id: Some("warpriest".to_string()),
            ..Default::default()
        };
        let active = active_feats(&character(1, choices), &Ruleset::core());
        assert!(active
            .iter()
            .any(|f| f.id() == "assurance" && f.source == FeatSource::Background));
        assert!(contains_feat(&active, "shield-block"));
    }

    #[test]
    fn unknown_feats_are_kept_but_flagged() {
        let choices = CharacterChoices {
            feats: vec![FeatSelection::new("homebrew-feat", 1)],
            ..Default::default()
        };
        let resolution = resolve_feats(&character(1, choices), &Ruleset::core());
        assert_eq!(resolution.active.len(), 1);
        assert!(!resolution.active[0].known);
        assert_eq!(resolution.notes.len(), 1);
    }

    #[test]
    fn has_feat_honors_level() {
        let choices = CharacterChoices {
            feats: vec![FeatSelection::new("fleet", 3)],
            ..Default::default()
        };
        let rules = Ruleset::core();
        assert!(!has_feat(&character(2, choices.clone()), &rules, "fleet"));
        assert!(has_feat(&character(3, choices), &rules, "fleet"));
    }

    #[test]
    fn adopted_ancestry_adds_an_effective_ancestry() {
        let choices = CharacterChoices {
            ancestry_id: Some("human".to_string()),
            feats: vec![
                FeatSelection::new("adopted-ancestry", 1).with_selector("elf"),
                FeatSelection::new("halfling-luck", 1),
            ],
            ..Default::default()
        };
        let c = character(1, choices);
        let active = active_feats(&c, &Ruleset::core());
        assert!(contains_feat(&active, "adopted-ancestry"));
        assert!(contains_feat(&active, "halfling-luck"));
        assert!(!contains_feat(&active, "toughness"));
        assert_eq!(effective_ancestries(&c, &active), vec!["human", "elf"]);
    }

    #[test]
    fn feats_without_rules_have_no_effects() {
        let feat = ActiveFeat {
            key: FeatKey::new("power-attack", None),
            level: 1,
            source: FeatSource::Chosen,
            known: true,
        };
        assert!(effects_for(&feat, 1).unwrap().is_empty());
    }
}
