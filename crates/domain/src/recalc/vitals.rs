//! Steps 6 and 7: hit points, Speed and size.

use super::{Pass, RecalcStep};
use crate::feats::FeatEffect;
use crate::rules::Ability;

/// Speed used when no ancestry is chosen.
const DEFAULT_SPEED: i32 = 25;
const MIN_SPEED: i32 = 5;

pub(super) fn hit_points(pass: &mut Pass<'_>) {
    let level = pass.level() as i32;
    let ancestry = pass.ancestry.map_or(0, |a| a.hp);
    let heritage = pass.heritage.map_or(0, |h| h.hp_bonus);
    let class = pass
        .class
        .map_or(0, |c| (c.hp + pass.modifier(Ability::Con)) * level);
    let per_level = pass.sum_effects(|e| match e {
        FeatEffect::HitPointsPerLevel { amount } => Some(*amount),
        _ => None,
    });
    let flat = pass.sum_effects(|e| match e {
        FeatEffect::HitPoints { amount } => Some(*amount),
        _ => None,
    });

    let total = ancestry + heritage + class + per_level * level + flat;
    if total < 1 {
        pass.info(RecalcStep::HitPoints, "Hit points raised to the minimum of 1");
    }
    pass.snapshot.hit_points = total.max(1);
}

pub(super) fn speed(pass: &mut Pass<'_>) {
    let base = pass.ancestry.map_or(DEFAULT_SPEED, |a| a.speed);
    let bonus = pass.sum_effects(|e| match e {
        FeatEffect::Speed { amount } => Some(*amount),
        _ => None,
    });

    let strength = pass.snapshot.abilities.score(Ability::Str);
    let armor_penalty = match &pass.character.choices().equipment.armor {
        _ if pass.has_effect(&FeatEffect::IgnoreArmorSpeedPenalty) => 0,
        Some(armor) if armor.strength_met(strength) => (armor.speed_penalty + 5).min(0),
        Some(armor) => armor.speed_penalty,
        None => 0,
    };

    pass.snapshot.speed = (base + bonus + armor_penalty).max(MIN_SPEED);
    pass.snapshot.size = pass.ancestry.map(|a| a.size).unwrap_or_default();
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::Recalculator;
    use crate::character::{CharacterChoices, FeatSelection};
    use crate::rules::{Ability, Size};
    use crate::ruleset::Ruleset;

    #[test]
    fn heritage_hit_points_add_once() {
        let rules = Ruleset::core();
        let choices = CharacterChoices {
            ancestry_id: Some("goblin".to_string()),
            heritage_id: Some("unbreakable-goblin".to_string()),
            class_id: Some("rogue".to_string()),
            ..Default::default()
        };
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(3, choices))
            .snapshot;
        // 6 + 4 + 8 * 3
        assert_eq!(sheet.hit_points, 34);
        assert_eq!(sheet.size, Size::Small);
    }

    #[test]
    fn toughness_scales_with_level() {
        let rules = Ruleset::core();
        let recalc = Recalculator::new(&rules);
        let mut without = fighter_choices();
        without.feats.clear();
        let base = recalc.recalculate(&character(4, without)).snapshot;
        let tough = recalc.recalculate(&character(4, fighter_choices())).snapshot;
        assert_eq!(tough.hit_points - base.hit_points, 4);
    }

    #[test]
    fn armor_speed_penalty_depends_on_strength() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        choices.boosts.free = vec![Ability::Dex, Ability::Con, Ability::Wis, Ability::Int];
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        assert_eq!(sheet.abilities.score(Ability::Str), 16);
        assert_eq!(sheet.speed, 25);

        let mut heavy = fighter_choices();
        if let Some(armor) = heavy.equipment.armor.as_mut() {
            armor.strength = Some(20);
        }
        let slowed = Recalculator::new(&rules)
            .recalculate(&character(1, heavy))
            .snapshot;
        assert_eq!(slowed.speed, 20);
    }

    #[test]
    fn unburdened_iron_ignores_armor_speed() {
        let rules = Ruleset::core();
        let mut choices = CharacterChoices {
            ancestry_id: Some("dwarf".to_string()),
            class_id: Some("fighter".to_string()),
            feats: vec![FeatSelection::new("unburdened-iron", 1)],
            ..Default::default()
        };
        choices.equipment.armor = Some(chain_mail());
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        assert_eq!(sheet.speed, 20);
    }

    #[test]
    fn fleet_adds_five_feet() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        choices.equipment.armor = None;
        choices.feats = vec![FeatSelection::new("fleet", 1)];
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        assert_eq!(sheet.speed, 30);
    }
}
