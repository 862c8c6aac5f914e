//! Step 10: Armor Class, shield, class DC and dying threshold.

use super::{Defenses, Pass, ShieldStats};
use crate::feats::FeatEffect;
use crate::rules::{Ability, ArmorCategory, ProficiencyRank, ProficiencyTarget};

const BASE_DYING_THRESHOLD: i32 = 4;

/// Check penalty from worn armor, 0 when the Strength requirement is met.
pub(super) fn armor_check_penalty(pass: &Pass<'_>) -> i32 {
    let strength = pass.snapshot.abilities.score(Ability::Str);
    match &pass.character.choices().equipment.armor {
        Some(armor) if !armor.strength_met(strength) => armor.check_penalty,
        _ => 0,
    }
}

pub(super) fn run(pass: &mut Pass<'_>) {
    let level = pass.level();
    let equipment = &pass.character.choices().equipment;
    let dex = pass.modifier(Ability::Dex);

    let (category, item_bonus, dex_cap, potency) = match &equipment.armor {
        Some(armor) => (
            armor.category,
            armor.ac_bonus,
            armor.dex_cap,
            armor.potency() as i32,
        ),
        None => (ArmorCategory::Unarmored, 0, None, 0),
    };
    let rank = pass
        .snapshot
        .proficiencies
        .rank(ProficiencyTarget::Armor(category));
    let dex_bonus = dex_cap.map_or(dex, |cap| dex.min(cap));
    let base_ac = 10 + dex_bonus + rank.proficiency_bonus(level) + item_bonus + potency;

    let shield = equipment.shield.as_ref().map(|s| ShieldStats {
        name: s.name.clone(),
        ac_bonus: s.ac_bonus,
        hardness: s.hardness,
        hit_points: s.hit_points,
        raised: s.raised,
    });
    let ac_shield_raised = base_ac + shield.as_ref().map_or(0, |s| s.ac_bonus);
    let ac = match &shield {
        Some(s) if s.raised => ac_shield_raised,
        _ => base_ac,
    };

    let class_dc = pass.snapshot.key_ability.and_then(|key| {
        let rank = pass.snapshot.proficiencies.rank(ProficiencyTarget::ClassDc);
        (rank > ProficiencyRank::Untrained)
            .then(|| 10 + pass.modifier(key) + rank.proficiency_bonus(level))
    });

    let dying_threshold = pass
        .effects
        .iter()
        .filter_map(|e| match e {
            FeatEffect::DyingThreshold { value } => Some(*value),
            _ => None,
        })
        .fold(BASE_DYING_THRESHOLD, i32::max);

    pass.snapshot.defenses = Defenses {
        ac,
        armor_category: category,
        armor_check_penalty: armor_check_penalty(pass),
        shield,
        ac_shield_raised,
        class_dc,
        dying_threshold,
    };
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::Recalculator;
    use crate::character::{FeatSelection, Shield};
    use crate::rules::ArmorCategory;
    use crate::ruleset::Ruleset;

    fn steel_shield(raised: bool) -> Shield {
        Shield {
            name: "Steel Shield".to_string(),
            ac_bonus: 2,
            hardness: 5,
            hit_points: 20,
            raised,
            material: None,
        }
    }

    #[test]
    fn dex_cap_limits_armor_ac() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        choices.equipment.armor = None;
        let unarmored = Recalculator::new(&rules)
            .recalculate(&character(5, choices))
            .snapshot;
        // Dex 14 at level 5, trained unarmored
        assert_eq!(unarmored.defenses.ac, 10 + 2 + 7);
        assert_eq!(unarmored.defenses.armor_category, ArmorCategory::Unarmored);

        let armored = Recalculator::new(&rules)
            .recalculate(&character(5, fighter_choices()))
            .snapshot;
        assert_eq!(armored.defenses.ac, 10 + 1 + 7 + 4);
    }

    #[test]
    fn raised_shield_adds_its_bonus() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        choices.equipment.shield = Some(steel_shield(false));
        let lowered = Recalculator::new(&rules)
            .recalculate(&character(1, choices.clone()))
            .snapshot;
        assert_eq!(lowered.defenses.ac, 18);
        assert_eq!(lowered.defenses.ac_shield_raised, 20);

        choices.equipment.shield = Some(steel_shield(true));
        let raised = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        assert_eq!(raised.defenses.ac, 20);
    }

    #[test]
    fn potency_rune_adds_item_bonus() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        if let Some(armor) = choices.equipment.armor.as_mut() {
            armor.runes = vec!["armor-potency-1".to_string()];
        }
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        assert_eq!(sheet.defenses.ac, 19);
    }

    #[test]
    fn diehard_raises_dying_threshold() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        choices.feats.push(FeatSelection::new("diehard", 3));
        let recalc = Recalculator::new(&rules);
        assert_eq!(
            recalc
                .recalculate(&character(1, choices.clone()))
                .snapshot
                .defenses
                .dying_threshold,
            4
        );
        assert_eq!(
            recalc
                .recalculate(&character(3, choices))
                .snapshot
                .defenses
                .dying_threshold,
            5
        );
    }
}
