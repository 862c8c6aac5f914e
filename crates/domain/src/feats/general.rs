//! General feats.

use super::{FeatContext, FeatEffect, FeatRule};
use crate::error::DomainError;
use crate::rules::{ArmorCategory, ProficiencyRank, Save};

pub(super) const RULES: &[FeatRule] = &[
    FeatRule {
        feat_id: "toughness",
        effects: toughness,
    },
    FeatRule {
        feat_id: "fleet",
        effects: fleet,
    },
    FeatRule {
        feat_id: "canny-acumen",
        effects: canny_acumen,
    },
    FeatRule {
        feat_id: "diehard",
        effects: diehard,
    },
    FeatRule {
        feat_id: "armor-proficiency",
        effects: armor_proficiency,
    },
    FeatRule {
        feat_id: "untrained-improvisation",
        effects: untrained_improvisation,
    },
    FeatRule {
        feat_id: "incredible-initiative",
        effects: incredible_initiative,
    },
];

fn toughness(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::HitPointsPerLevel { amount: 1 }])
}

fn fleet(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::Speed { amount: 5 }])
}

/// Expert in a save or Perception, master from 17th level.
fn canny_acumen(ctx: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    let rank = if ctx.level >= 17 {
        ProficiencyRank::Master
    } else {
        ProficiencyRank::Expert
    };
    let selector = ctx.require_selector()?;
    if selector.eq_ignore_ascii_case("perception") {
        return Ok(vec![FeatEffect::PerceptionRank { rank }]);
    }
    let save: Save = selector.parse()?;
    Ok(vec![FeatEffect::SaveRank { save, rank }])
}

fn diehard(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::DyingThreshold { value: 5 }])
}

/// Trained in the selected armor category, light when none is given.
fn armor_proficiency(ctx: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    let category = match ctx.selector() {
        Some(s) => s.parse()?,
        None => ArmorCategory::Light,
    };
    if category == ArmorCategory::Unarmored {
        return Err(DomainError::validation(
            "Armor Proficiency must select light, medium or heavy armor",
        ));
    }
    Ok(vec![FeatEffect::ArmorRank {
        category,
        rank: ProficiencyRank::Trained,
    }])
}

fn untrained_improvisation(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::UntrainedImprovisation])
}

fn incredible_initiative(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::Initiative { amount: 2 }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feats::{effects_for, ActiveFeat, FeatKey, FeatSource};

    fn feat(id: &str, selector: Option<&str>) -> ActiveFeat {
        ActiveFeat {
            key: FeatKey::new(id, selector),
            level: 1,
            source: FeatSource::Chosen,
            known: true,
        }
    }

    #[test]
    fn canny_acumen_scales_at_17() {
        let will = feat("canny-acumen", Some("will"));
        assert_eq!(
            effects_for(&will, 16).unwrap(),
            vec![FeatEffect::SaveRank {
                save: Save::Will,
                rank: ProficiencyRank::Expert
            }]
        );
        assert_eq!(
            effects_for(&will, 17).unwrap(),
            vec![FeatEffect::SaveRank {
                save: Save::Will,
                rank: ProficiencyRank::Master
            }]
        );

        let perception = feat("canny-acumen", Some("Perception"));
        assert_eq!(
            effects_for(&perception, 1).unwrap(),
            vec![FeatEffect::PerceptionRank {
                rank: ProficiencyRank::Expert
            }]
        );
    }

    #[test]
    fn canny_acumen_requires_a_selection() {
        assert!(effects_for(&feat("canny-acumen", None), 1).is_err());
        assert!(effects_for(&feat("canny-acumen", Some("luck")), 1).is_err());
    }

    #[test]
    fn armor_proficiency_defaults_to_light() {
        assert_eq!(
            effects_for(&feat("armor-proficiency", None), 1).unwrap(),
            vec![FeatEffect::ArmorRank {
                category: ArmorCategory::Light,
                rank: ProficiencyRank::Trained
            }]
        );
        assert!(effects_for(&feat("armor-proficiency", Some("unarmored")), 1).is_err());
    }
}
