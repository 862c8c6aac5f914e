//! Skill feats with effects on proficiency or languages.

use super::{FeatContext, FeatEffect, FeatRule};
use crate::error::DomainError;
use crate::rules::{ProficiencyRank, Skill, SkillRef};

pub(super) const RULES: &[FeatRule] = &[
    FeatRule {
        feat_id: "skill-training",
        effects: trained_in_selected_skill,
    },
    FeatRule {
        feat_id: "assurance",
        effects: assurance,
    },
    FeatRule {
        feat_id: "additional-lore",
        effects: additional_lore,
    },
    FeatRule {
        feat_id: "multilingual",
        effects: multilingual,
    },
    FeatRule {
        feat_id: "bardic-lore",
        effects: bardic_lore,
    },
];

/// Parse a selector naming a core skill.
pub(super) fn selected_skill(ctx: &FeatContext<'_>) -> Result<Skill, DomainError> {
    match ctx.require_selector()?.parse::<SkillRef>()? {
        SkillRef::Core(skill) => Ok(skill),
        SkillRef::Lore(_) => Err(DomainError::validation(format!(
            "{} must select a core skill, not a lore",
            ctx.feat.id()
        ))),
    }
}

/// Rank for lores that grow with level: expert at `expert_at`, master at
/// 7th and legendary at 15th.
pub(super) fn growing_lore_rank(level: u8, expert_at: u8) -> ProficiencyRank {
    match level {
        l if l >= 15 => ProficiencyRank::Legendary,
        l if l >= 7 => ProficiencyRank::Master,
        l if l >= expert_at => ProficiencyRank::Expert,
        _ => ProficiencyRank::Trained,
    }
}

/// Strip an optional `lore:` prefix from a lore selector.
pub(super) fn lore_topic(selector: &str) -> String {
    let topic = match selector.split_once(':') {
        Some((prefix, topic)) if prefix.eq_ignore_ascii_case("lore") => topic,
        _ => selector,
    };
    topic.trim().to_lowercase()
}

pub(super) fn trained_in_selected_skill(
    ctx: &FeatContext<'_>,
) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::SkillRank {
        skill: selected_skill(ctx)?,
        rank: ProficiencyRank::Trained,
    }])
}

fn assurance(ctx: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::Assurance {
        skill: selected_skill(ctx)?,
    }])
}

fn additional_lore(ctx: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::LoreRank {
        topic: lore_topic(ctx.require_selector()?),
        rank: growing_lore_rank(ctx.level, 3),
    }])
}

fn multilingual(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::ExtraLanguages { count: 2 }])
}

fn bardic_lore(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::LoreRank {
        topic: "bardic".to_string(),
        rank: ProficiencyRank::Trained,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feats::{effects_for, ActiveFeat, FeatKey, FeatSource};

    fn feat(id: &str, selector: &str) -> ActiveFeat {
        ActiveFeat {
            key: FeatKey::new(id, Some(selector)),
            level: 1,
            source: FeatSource::Chosen,
            known: true,
        }
    }

    #[test]
    fn additional_lore_grows_with_level() {
        let lore = feat("additional-lore", "lore:Sailing");
        let rank_at = |level| match effects_for(&lore, level).unwrap().remove(0) {
            FeatEffect::LoreRank { topic, rank } => {
                assert_eq!(topic, "sailing");
                rank
            }
            other => panic!("unexpected effect {:?}", other),
        };
        assert_eq!(rank_at(1), ProficiencyRank::Trained);
        assert_eq!(rank_at(3), ProficiencyRank::Expert);
        assert_eq!(rank_at(7), ProficiencyRank::Master);
        assert_eq!(rank_at(15), ProficiencyRank::Legendary);
    }

    #[test]
    fn skill_training_rejects_lores() {
        assert!(effects_for(&feat("skill-training", "lore:farming"), 1).is_err());
        assert_eq!(
            effects_for(&feat("skill-training", "stealth"), 1).unwrap(),
            vec![FeatEffect::SkillRank {
                skill: Skill::Stealth,
                rank: ProficiencyRank::Trained
            }]
        );
    }

    #[test]
    fn assurance_names_the_selected_skill() {
        assert_eq!(
            effects_for(&feat("assurance", "Athletics"), 1).unwrap(),
            vec![FeatEffect::Assurance {
                skill: Skill::Athletics
            }]
        );
        assert!(effects_for(&feat("assurance", "lore:farming"), 1).is_err());
    }

    #[test]
    fn lore_topic_accepts_bare_names() {
        assert_eq!(lore_topic("Engineering"), "engineering");
        assert_eq!(lore_topic("lore: Engineering "), "engineering");
    }
}
