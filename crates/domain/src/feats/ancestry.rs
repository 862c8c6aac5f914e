//! Ancestry feats.

use super::skill::{growing_lore_rank, lore_topic, trained_in_selected_skill};
use super::{FeatContext, FeatEffect, FeatRule};
use crate::error::DomainError;
use crate::rules::Vision;
use crate::ruleset::FeatCategory;

pub(super) const RULES: &[FeatRule] = &[
    FeatRule {
        feat_id: "natural-ambition",
        effects: natural_ambition,
    },
    FeatRule {
        feat_id: "general-training",
        effects: general_training,
    },
    FeatRule {
        feat_id: "ancestral-longevity",
        effects: trained_in_selected_skill,
    },
    FeatRule {
        feat_id: "nimble-elf",
        effects: nimble_elf,
    },
    FeatRule {
        feat_id: "elven-weapon-familiarity",
        effects: elven_weapon_familiarity,
    },
    FeatRule {
        feat_id: "dwarven-weapon-familiarity",
        effects: dwarven_weapon_familiarity,
    },
    FeatRule {
        feat_id: "unburdened-iron",
        effects: unburdened_iron,
    },
    FeatRule {
        feat_id: "rock-runner",
        effects: no_effects,
    },
    FeatRule {
        feat_id: "gnome-obsession",
        effects: gnome_obsession,
    },
    FeatRule {
        feat_id: "halfling-luck",
        effects: no_effects,
    },
    FeatRule {
        feat_id: "orc-sight",
        effects: orc_sight,
    },
];

/// Situational feats tracked only for prerequisites and daily uses.
fn no_effects(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(Vec::new())
}

fn natural_ambition(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::ExtraFeatSlot {
        category: FeatCategory::Class,
    }])
}

fn general_training(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::ExtraFeatSlot {
        category: FeatCategory::General,
    }])
}

fn nimble_elf(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::Speed { amount: 5 }])
}

fn elven_weapon_familiarity(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::WeaponFamiliarity {
        ancestry: "elf".to_string(),
    }])
}

fn dwarven_weapon_familiarity(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::WeaponFamiliarity {
        ancestry: "dwarf".to_string(),
    }])
}

fn unburdened_iron(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::IgnoreArmorSpeedPenalty])
}

/// Trained in a lore, expert at 2nd, master at 7th, legendary at 15th.
fn gnome_obsession(ctx: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::LoreRank {
        topic: lore_topic(ctx.require_selector()?),
        rank: growing_lore_rank(ctx.level, 2),
    }])
}

fn orc_sight(_: &FeatContext<'_>) -> Result<Vec<FeatEffect>, DomainError> {
    Ok(vec![FeatEffect::Vision {
        vision: Vision::Darkvision,
    }])
}
