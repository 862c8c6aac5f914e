//! Feat prerequisites and selector validation.

use serde::Serialize;

use super::{contains_feat, effective_ancestries, feat_spell_options};
use crate::character::Character;
use crate::error::DomainError;
use crate::recalc::CharacterSnapshot;
use crate::rules::{ArmorCategory, ProficiencyRank, Save, SkillRef, Tradition};
use crate::ruleset::{FeatCategory, FeatData, Prerequisite, Ruleset, SelectorKind};

/// A prerequisite the character does not meet, with a readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmetPrerequisite {
    pub prerequisite: Prerequisite,
    pub reason: String,
}

/// Unmet prerequisites of a feat for a character.
///
/// `selector` is the choice the feat would be taken with; prerequisites
/// that depend on it are met by any candidate when it is `None`.
/// Free-text prerequisites are never reported.
pub fn check_prerequisites(
    feat: &FeatData,
    selector: Option<&str>,
    character: &Character,
    snapshot: &CharacterSnapshot,
    ruleset: &Ruleset,
) -> Vec<UnmetPrerequisite> {
    let checker = Checker {
        selector,
        character,
        snapshot,
        ruleset,
    };

    let mut unmet = Vec::new();
    if feat.level > character.level() {
        unmet.push(UnmetPrerequisite {
            prerequisite: Prerequisite::MinLevel { level: feat.level },
            reason: format!("requires level {}", feat.level),
        });
    }
    for prerequisite in &feat.prerequisites {
        if !checker.met(prerequisite) {
            unmet.push(UnmetPrerequisite {
                prerequisite: prerequisite.clone(),
                reason: describe(prerequisite),
            });
        }
    }
    unmet
}

/// Whether the character could take the feat now.
pub fn is_eligible(
    feat: &FeatData,
    character: &Character,
    snapshot: &CharacterSnapshot,
    ruleset: &Ruleset,
) -> bool {
    if !feat.repeatable && contains_feat(&snapshot.active_feats, &feat.id) {
        return false;
    }
    check_prerequisites(feat, None, character, snapshot, ruleset).is_empty()
}

/// Feats the character could take now, optionally of one category.
pub fn eligible_feats<'r>(
    character: &Character,
    snapshot: &CharacterSnapshot,
    ruleset: &'r Ruleset,
    category: Option<FeatCategory>,
) -> Vec<&'r FeatData> {
    ruleset
        .feats()
        .filter(|f| category.map_or(true, |c| f.category == c))
        .filter(|f| is_eligible(f, character, snapshot, ruleset))
        .collect()
}

struct Checker<'a> {
    selector: Option<&'a str>,
    character: &'a Character,
    snapshot: &'a CharacterSnapshot,
    ruleset: &'a Ruleset,
}

impl Checker<'_> {
    fn met(&self, prerequisite: &Prerequisite) -> bool {
        let choices = self.character.choices();
        match prerequisite {
            Prerequisite::MinLevel { level } => self.character.level() >= *level,
            Prerequisite::MinAbility { ability, score } => {
                self.snapshot.abilities.score(*ability) >= *score
            }
            Prerequisite::SkillRank { skill, rank } => self.snapshot.skill_rank(skill) >= *rank,
            Prerequisite::SelectedSkillRank { rank } => match self.selector {
                Some(selector) => selector
                    .parse::<SkillRef>()
                    .is_ok_and(|skill| self.snapshot.skill_rank(&skill) >= *rank),
                None => {
                    self.snapshot.skills.iter().any(|s| s.rank >= *rank)
                        || self.snapshot.lores.values().any(|r| r >= rank)
                }
            },
            Prerequisite::HasFeat { feat_id } => {
                contains_feat(&self.snapshot.active_feats, feat_id)
            }
            Prerequisite::Ancestry { ancestry_id } => {
                effective_ancestries(self.character, &self.snapshot.active_feats)
                    .iter()
                    .any(|a| a == ancestry_id)
            }
            Prerequisite::Heritage { heritage_id } => {
                choices.heritage_id.as_deref() == Some(heritage_id.as_str())
            }
            Prerequisite::Class { class_id } => {
                choices.class_id.as_deref() == Some(class_id.as_str())
            }
            Prerequisite::Spellcaster => {
                self.snapshot.spellcasting.is_some()
                    || choices
                        .class_id
                        .as_deref()
                        .and_then(|id| self.ruleset.class(id))
                        .is_some_and(|c| c.spellcasting.is_some())
            }
            Prerequisite::AnyOf { options } => options.iter().any(|p| self.met(p)),
            Prerequisite::Custom { .. } => true,
        }
    }
}

fn describe(prerequisite: &Prerequisite) -> String {
    match prerequisite {
        Prerequisite::MinLevel { level } => format!("requires level {}", level),
        Prerequisite::MinAbility { ability, score } => {
            format!("requires {} {}", ability.name(), score)
        }
        Prerequisite::SkillRank { skill, rank } => format!("requires {} in {}", rank, skill),
        Prerequisite::SelectedSkillRank { rank } => {
            format!("requires {} in the selected skill", rank)
        }
        Prerequisite::HasFeat { feat_id } => format!("requires the {} feat", feat_id),
        Prerequisite::Ancestry { ancestry_id } => format!("requires the {} ancestry", ancestry_id),
        Prerequisite::Heritage { heritage_id } => format!("requires the {} heritage", heritage_id),
        Prerequisite::Class { class_id } => format!("requires the {} class", class_id),
        Prerequisite::Spellcaster => "requires a spellcasting class".to_string(),
        Prerequisite::AnyOf { options } => {
            let parts: Vec<String> = options.iter().map(describe).collect();
            format!("one of: {}", parts.join("; "))
        }
        Prerequisite::Custom { description } => description.clone(),
    }
}

/// Check a feat's selector against what the feat expects.
///
/// Spell selections must come from [`feat_spell_options`], which depends on
/// the character's own spell tradition.
pub fn validate_selector(
    feat: &FeatData,
    selector: Option<&str>,
    own_tradition: Option<Tradition>,
    ruleset: &Ruleset,
) -> Result<(), DomainError> {
    let selector = selector.map(str::trim).filter(|s| !s.is_empty());
    let Some(kind) = feat.selector else {
        return match selector {
            Some(_) => Err(DomainError::validation(format!(
                "{} does not take a selection",
                feat.name
            ))),
            None => Ok(()),
        };
    };

    let value = match (kind, selector) {
        (SelectorKind::Armor, None) => return Ok(()),
        (_, None) => {
            return Err(DomainError::validation(format!(
                "{} needs a selection",
                feat.name
            )))
        }
        (_, Some(value)) => value,
    };

    match kind {
        SelectorKind::Skill => match value.parse::<SkillRef>()? {
            SkillRef::Core(_) => Ok(()),
            SkillRef::Lore(_) => Err(DomainError::validation(format!(
                "{} must select a core skill",
                feat.name
            ))),
        },
        SelectorKind::Lore | SelectorKind::Language => Ok(()),
        SelectorKind::SaveOrPerception => {
            if value.eq_ignore_ascii_case("perception") {
                Ok(())
            } else {
                value.parse::<Save>().map(|_| ())
            }
        }
        SelectorKind::Ancestry => ruleset
            .ancestry(value)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Ancestry", value)),
        SelectorKind::Spell => {
            let spell = ruleset
                .spell(value)
                .ok_or_else(|| DomainError::not_found("Spell", value))?;
            if feat_spell_options(&feat.id, own_tradition, ruleset)
                .iter()
                .any(|option| option.id == spell.id)
            {
                Ok(())
            } else {
                Err(DomainError::validation(format!(
                    "{} cannot select {}",
                    feat.name, spell.name
                )))
            }
        }
        SelectorKind::Feat => ruleset
            .feat(value)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Feat", value)),
        SelectorKind::Armor => match value.parse::<ArmorCategory>()? {
            ArmorCategory::Unarmored => Err(DomainError::validation(
                "Armor Proficiency must select light, medium or heavy armor",
            )),
            _ => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::character::{CharacterChoices, CharacterName};
    use crate::feats::{ActiveFeat, FeatKey, FeatSource};
    use crate::rules::{Ability, ProficiencyTarget, Skill};

    fn character(level: u8, choices: CharacterChoices) -> Character {
        Character::new(CharacterName::new("Test").unwrap(), Utc::now())
            .with_level(level)
            .unwrap()
            .with_choices(choices)
    }

    fn chosen(id: &str, selector: Option<&str>) -> ActiveFeat {
        ActiveFeat {
            key: FeatKey::new(id, selector),
            level: 1,
            source: FeatSource::Chosen,
            known: true,
        }
    }

    fn human() -> CharacterChoices {
        CharacterChoices {
            ancestry_id: Some("human".to_string()),
            class_id: Some("fighter".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn skill_rank_prerequisite() {
        let rules = Ruleset::core();
        let feat = rules.feat("battle-medicine").unwrap();
        let c = character(1, human());

        let mut snapshot = CharacterSnapshot::default();
        let unmet = check_prerequisites(feat, None, &c, &snapshot, &rules);
        assert_eq!(unmet.len(), 1);
        assert_eq!(unmet[0].reason, "requires trained in medicine");

        snapshot.proficiencies.grant(
            ProficiencyTarget::Skill(Skill::Medicine),
            ProficiencyRank::Trained,
        );
        assert!(check_prerequisites(feat, None, &c, &snapshot, &rules).is_empty());
    }

    #[test]
    fn level_is_always_checked() {
        let rules = Ruleset::core();
        let feat = rules.feat("untrained-improvisation").unwrap();
        let snapshot = CharacterSnapshot::default();
        assert!(!is_eligible(feat, &character(2, human()), &snapshot, &rules));
        assert!(is_eligible(feat, &character(3, human()), &snapshot, &rules));
    }

    #[test]
    fn adopted_ancestry_counts_for_ancestry_feats() {
        let rules = Ruleset::core();
        let feat = rules.feat("nimble-elf").unwrap();
        let c = character(1, human());

        let mut snapshot = CharacterSnapshot::default();
        assert!(!is_eligible(feat, &c, &snapshot, &rules));

        snapshot.active_feats = vec![chosen("adopted-ancestry", Some("elf"))];
        assert!(is_eligible(feat, &c, &snapshot, &rules));
    }

    #[test]
    fn any_of_prerequisite() {
        let rules = Ruleset::core();
        let feat = rules.feat("orc-sight").unwrap();
        let snapshot = CharacterSnapshot::default();

        let mut choices = human();
        assert!(!is_eligible(feat, &character(1, choices.clone()), &snapshot, &rules));
        choices.heritage_id = Some("half-orc".to_string());
        assert!(is_eligible(feat, &character(1, choices), &snapshot, &rules));
    }

    #[test]
    fn taken_feats_are_not_eligible_unless_repeatable() {
        let rules = Ruleset::core();
        let c = character(1, human());
        let mut snapshot = CharacterSnapshot::default();
        snapshot.abilities.set(Ability::Int, 12);
        snapshot.active_feats = vec![
            chosen("toughness", None),
            chosen("skill-training", Some("arcana")),
        ];

        assert!(!is_eligible(rules.feat("toughness").unwrap(), &c, &snapshot, &rules));
        assert!(is_eligible(
            rules.feat("skill-training").unwrap(),
            &c,
            &snapshot,
            &rules
        ));
    }

    #[test]
    fn ability_prerequisite() {
        let rules = Ruleset::core();
        let feat = rules.feat("skill-training").unwrap();
        let c = character(1, human());
        let snapshot = CharacterSnapshot::default();
        let unmet = check_prerequisites(feat, Some("arcana"), &c, &snapshot, &rules);
        assert_eq!(unmet.len(), 1);
        assert_eq!(unmet[0].reason, "requires Intelligence 12");
    }

    #[test]
    fn eligible_feats_filters_category() {
        let rules = Ruleset::core();
        let c = character(1, human());
        let snapshot = CharacterSnapshot::default();
        let ancestry = eligible_feats(&c, &snapshot, &rules, Some(FeatCategory::Ancestry));
        assert!(ancestry.iter().any(|f| f.id == "natural-ambition"));
        assert!(ancestry.iter().all(|f| f.category == FeatCategory::Ancestry));
        assert!(!ancestry.iter().any(|f| f.id == "nimble-elf"));
    }

    #[test]
    fn selectors_are_validated_by_kind() {
        let rules = Ruleset::core();
        let feat = |id| rules.feat(id).unwrap();

        assert!(validate_selector(feat("skill-training"), Some("arcana"), None, &rules).is_ok());
        assert!(validate_selector(feat("skill-training"), Some("lore:sailing"), None, &rules).is_err());
        assert!(validate_selector(feat("skill-training"), None, None, &rules).is_err());
        assert!(validate_selector(feat("canny-acumen"), Some("perception"), None, &rules).is_ok());
        assert!(validate_selector(feat("canny-acumen"), Some("fort"), None, &rules).is_ok());
        assert!(validate_selector(feat("adopted-ancestry"), Some("dragon"), None, &rules).is_err());
        assert!(validate_selector(feat("adapted-cantrip"), Some("divine-lance"), None, &rules).is_ok());
        assert!(validate_selector(feat("armor-proficiency"), None, None, &rules).is_ok());
        assert!(validate_selector(feat("toughness"), Some("extra"), None, &rules).is_err());
    }

    #[test]
    fn adapted_cantrip_needs_a_cantrip_from_another_tradition() {
        let rules = Ruleset::core();
        let feat = rules.feat("adapted-cantrip").unwrap();
        let arcane = Some(Tradition::Arcane);

        assert!(validate_selector(feat, Some("divine-lance"), arcane, &rules).is_ok());
        // electric arc is arcane as well as primal
        let err = validate_selector(feat, Some("electric-arc"), arcane, &rules).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(validate_selector(feat, Some("fireball"), arcane, &rules).is_err());
        assert!(validate_selector(feat, Some("no-such-spell"), arcane, &rules).is_err());
    }
}
