//! Step 13: feat slots available and used per category.
//!
//! Granted feats (background, specialization) take no slot. Skill feats
//! spill into general slots once the skill slots are full, and archetype
//! feats use class slots.

use std::collections::BTreeMap;

use super::{FeatSlotUsage, Pass, RecalcStep};
use crate::feats::{FeatEffect, FeatSource};
use crate::ruleset::FeatCategory;

const ANCESTRY_FEAT_LEVELS: [u8; 5] = [1, 5, 9, 13, 17];
const GENERAL_FEAT_LEVELS: [u8; 5] = [3, 7, 11, 15, 19];

fn reached(levels: &[u8], level: u8) -> u8 {
    levels.iter().filter(|l| **l <= level).count() as u8
}

pub(super) fn run(pass: &mut Pass<'_>) {
    let level = pass.level();
    let mut slots: BTreeMap<FeatCategory, FeatSlotUsage> = BTreeMap::new();
    let mut add = |category: FeatCategory, count: u8| {
        slots.entry(category).or_default().available += count;
    };

    add(FeatCategory::Ancestry, reached(&ANCESTRY_FEAT_LEVELS, level));
    add(FeatCategory::General, reached(&GENERAL_FEAT_LEVELS, level));
    match pass.class {
        Some(class) => {
            add(FeatCategory::Class, reached(&class.class_feat_levels, level));
            add(FeatCategory::Skill, reached(&class.skill_feat_levels, level));
        }
        None => {
            add(FeatCategory::Class, 0);
            add(FeatCategory::Skill, 0);
        }
    }
    for category in pass.heritage.map(|h| h.bonus_feat_slots.as_slice()).unwrap_or_default() {
        add(*category, 1);
    }
    for effect in &pass.effects {
        if let FeatEffect::ExtraFeatSlot { category } = effect {
            add(*category, 1);
        }
    }

    let chosen: Vec<(String, FeatCategory)> = pass
        .snapshot
        .active_feats
        .iter()
        .filter(|f| f.source == FeatSource::Chosen && f.known)
        .filter_map(|f| {
            pass.ruleset
                .feat(f.id())
                .map(|data| (f.key.to_string(), data.category))
        })
        .collect();

    for (feat, category) in chosen {
        let category = match category {
            FeatCategory::Archetype => FeatCategory::Class,
            other => other,
        };
        let mut slot = category;
        if category == FeatCategory::Skill && open(&slots, FeatCategory::Skill) == 0 {
            slot = FeatCategory::General;
        }
        if open(&slots, slot) == 0 {
            pass.note(
                RecalcStep::FeatSlots,
                format!("No open {} feat slot for {}", category, feat),
            );
        }
        slots.entry(slot).or_default().used += 1;
    }

    pass.snapshot.feat_slots = slots;
}

fn open(slots: &BTreeMap<FeatCategory, FeatSlotUsage>, category: FeatCategory) -> u8 {
    slots.get(&category).map_or(0, FeatSlotUsage::open)
}
