//! Feats that grant spells or familiar abilities, and the spell lists
//! their selections are drawn from.

use super::{FeatContext, FeatEffect, FeatRule};
use crate::catalog::{innate_spells_from, specialization_by_id, InnateSpellKind};
use crate::character::CharacterChoices;
use crate::error::DomainError;
use crate::rules::Tradition;
use crate::ruleset::{Ruleset, SpellData};

pub(super) const RULES: &[FeatRule] = &[
    FeatRule {
        feat_id: "adapted-cantrip",
        effects: adapted_cantrip,
    },
    FeatRule {
        feat_id: "otherworldly-magic",
        effects: innate_grant,
    },
    FeatRule {
        feat_id: "otherworldly-acumen",
        effects: innate_grant,
    },
    FeatRule {
        feat_id: "first-world-magic",
        effects: innate_grant,
    },
    FeatRule {
        feat_id: "first-world-adept",
        effects: innate_grant,
    },
    FeatRule {
        feat_id: "enhanced-familiar",
        effects: enhanced_familiar,
    },
];

fn adapted_cantrip(ctx: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::ClassCantrip {
        spell_id: ctx.require_selector()?.to_string(),
    }])
}

/// Innate spells come from the catalog entry named after the feat.
fn innate_grant(ctx: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::InnateSpell {
        source: ctx.feat.id().to_string(),
    }])
}

fn enhanced_familiar(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::FamiliarAbilities { count: 2 }])
}

/// Tradition of the class's spellcasting, falling back to the
/// specialization's when the class leaves it open.
pub fn spell_tradition(choices: &CharacterChoices, ruleset: &Ruleset) -> Option<Tradition> {
    let casting = choices
        .class_id
        .as_deref()
        .and_then(|id| ruleset.class(id))?
        .spellcasting
        .as_ref()?;
    casting.tradition.or_else(|| {
        choices
            .specialization_id
            .as_deref()
            .and_then(specialization_by_id)
            .and_then(|s| s.tradition)
    })
}

/// Cantrips on a tradition's list.
pub fn cantrip_options(tradition: Tradition, ruleset: &Ruleset) -> Vec<&SpellData> {
    ruleset.spells_for(tradition, Some(0))
}

/// Spells a feat's selection may name.
///
/// Adapted Cantrip takes any cantrip that is not on the character's own
/// tradition; innate-spell feats use the filter of their catalog grant.
/// Feats that pick no spell return an empty list.
pub fn feat_spell_options<'r>(
    feat_id: &str,
    own_tradition: Option<Tradition>,
    ruleset: &'r Ruleset,
) -> Vec<&'r SpellData> {
    if feat_id == "adapted-cantrip" {
        let mut options: Vec<&SpellData> = [
            Tradition::Arcane,
            Tradition::Divine,
            Tradition::Occult,
            Tradition::Primal,
        ]
        .into_iter()
        .filter(|t| Some(*t) != own_tradition)
        .flat_map(|t| cantrip_options(t, ruleset))
        .filter(|s| own_tradition.map_or(true, |own| !s.traditions.contains(&own)))
        .collect();
        options.sort_by(|a, b| a.id.cmp(&b.id));
        options.dedup_by(|a, b| a.id == b.id);
        return options;
    }

    innate_spells_from(feat_id)
        .into_iter()
        .find_map(|grant| match grant.spell {
            InnateSpellKind::Choice(choice) => Some(choice),
            InnateSpellKind::Fixed { .. } => None,
        })
        .map(|choice| ruleset.spells_for(choice.tradition, Some(choice.rank)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_world_magic_offers_primal_cantrips() {
        let rules = Ruleset::core();
        let options = feat_spell_options("first-world-magic", None, &rules);
        assert!(!options.is_empty());
        assert!(options
            .iter()
            .all(|s| s.is_cantrip() && s.traditions.contains(&Tradition::Primal)));
    }

    #[test]
    fn otherworldly_magic_offers_arcane_cantrips() {
        let rules = Ruleset::core();
        let options = feat_spell_options("otherworldly-magic", None, &rules);
        assert!(options.iter().any(|s| s.id == "electric-arc"));
        assert!(!options.iter().any(|s| s.id == "divine-lance"));
    }

    #[test]
    fn adapted_cantrip_excludes_own_tradition() {
        let rules = Ruleset::core();
        let options = feat_spell_options("adapted-cantrip", Some(Tradition::Arcane), &rules);
        assert!(options.iter().any(|s| s.id == "divine-lance"));
        assert!(options.iter().any(|s| s.id == "guidance"));
        assert!(!options.iter().any(|s| s.id == "detect-magic"));
        assert!(!options.iter().any(|s| s.id == "electric-arc"));
    }

    #[test]
    fn spell_tradition_comes_from_class_or_specialization() {
        let rules = Ruleset::core();
        let mut choices = CharacterChoices {
            class_id: Some("wizard".to_string()),
            ..Default::default()
        };
        assert_eq!(spell_tradition(&choices, &rules), Some(Tradition::Arcane));

        choices.class_id = Some("sorcerer".to_string());
        assert_eq!(spell_tradition(&choices, &rules), None);
        choices.specialization_id = Some("imperial".to_string());
        assert_eq!(spell_tradition(&choices, &rules), Some(Tradition::Arcane));

        choices.class_id = Some("fighter".to_string());
        assert_eq!(spell_tradition(&choices, &rules), None);
    }

    #[test]
    fn feats_without_spells_have_no_options() {
        let rules = Ruleset::core();
        assert!(feat_spell_options("toughness", None, &rules).is_empty());
    }
}
