//! Step 11: attack and damage for each weapon and the fist.

use super::{Pass, Strike};
use crate::catalog::striking_dice;
use crate::character::Weapon;
use crate::feats::FeatEffect;
use crate::rules::{multiple_attack_penalty, Ability, ProficiencyTarget, WeaponCategory};

fn fist() -> Weapon {
    Weapon {
        name: "Fist".to_string(),
        category: WeaponCategory::Unarmed,
        damage_die: 4,
        damage_type: "bludgeoning".to_string(),
        ranged: false,
        traits: vec![
            "agile".to_string(),
            "finesse".to_string(),
            "nonlethal".to_string(),
            "unarmed".to_string(),
        ],
        runes: Vec::new(),
        material: None,
    }
}

pub(super) fn run(pass: &mut Pass<'_>) {
    let familiar_traits: Vec<&str> = pass
        .effects
        .iter()
        .filter_map(|e| match e {
            FeatEffect::WeaponFamiliarity { ancestry } => Some(ancestry.as_str()),
            _ => None,
        })
        .collect();

    let view: &Pass<'_> = pass;
    let weapons = &view.character.choices().equipment.weapons;
    let strikes: Vec<Strike> = std::iter::once(&fist())
        .chain(weapons.iter())
        .map(|weapon| strike(view, weapon, &familiar_traits))
        .collect();
    pass.snapshot.strikes = strikes;
}

fn strike(pass: &Pass<'_>, weapon: &Weapon, familiar_traits: &[&str]) -> Strike {
    let level = pass.level();
    let str_mod = pass.modifier(Ability::Str);
    let dex_mod = pass.modifier(Ability::Dex);

    let category = if familiar_traits.iter().any(|t| weapon.has_trait(t)) {
        weapon.category.familiar()
    } else {
        weapon.category
    };
    let rank = pass
        .snapshot
        .proficiencies
        .rank(ProficiencyTarget::Weapon(category));

    let ability = if weapon.ranged || (weapon.has_trait("finesse") && dex_mod > str_mod) {
        Ability::Dex
    } else {
        Ability::Str
    };
    let attack_bonus =
        pass.modifier(ability) + rank.proficiency_bonus(level) + weapon.potency() as i32;

    let agile = weapon.has_trait("agile");
    let attack_sequence = [1, 2, 3].map(|n| attack_bonus + multiple_attack_penalty(n, agile));

    let damage_bonus = if !weapon.ranged || weapon.has_trait("thrown") {
        str_mod
    } else {
        0
    };

    let extra_damage = weapon
        .property_runes()
        .iter()
        .filter_map(|rune| rune.damage)
        .map(|d| format!("{}d{} {}", d.dice, d.die, d.damage_type))
        .collect();

    Strike {
        name: weapon.name.clone(),
        ability,
        rank,
        attack_bonus,
        attack_sequence,
        damage_dice: striking_dice(weapon.striking_rune()),
        damage_die: weapon.damage_die,
        damage_bonus,
        damage_type: weapon.damage_type.clone(),
        extra_damage,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::Recalculator;
    use crate::character::{CharacterChoices, Equipment, FeatSelection, Weapon};
    use crate::rules::{Ability, ProficiencyRank, WeaponCategory};
    use crate::ruleset::Ruleset;

    fn shortbow() -> Weapon {
        Weapon {
            name: "Shortbow".to_string(),
            category: WeaponCategory::Martial,
            damage_die: 6,
            damage_type: "piercing".to_string(),
            ranged: true,
            traits: vec!["deadly d10".to_string()],
            runes: Vec::new(),
            material: None,
        }
    }

    #[test]
    fn fist_is_always_available_and_agile() {
        let rules = Ruleset::core();
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, fighter_choices()))
            .snapshot;
        let fist = &sheet.strikes[0];
        assert_eq!(fist.name, "Fist");
        // Str 18 beats Dex 12 for a finesse weapon
        assert_eq!(fist.ability, Ability::Str);
        assert_eq!(fist.attack_sequence, [9, 5, 1]);
        assert_eq!(fist.damage_text(), "1d4+4 bludgeoning");
    }

    #[test]
    fn runes_add_dice_and_item_bonus() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        choices.equipment.weapons[0].runes = vec![
            "weapon-potency-1".to_string(),
            "striking".to_string(),
            "flaming".to_string(),
        ];
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        let sword = &sheet.strikes[1];
        assert_eq!(sword.attack_bonus, 10);
        assert_eq!(sword.damage_text(), "2d8+4 slashing");
        assert_eq!(sword.extra_damage, vec!["1d6 fire".to_string()]);
    }

    #[test]
    fn ranged_weapons_use_dex_without_strength_damage() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        choices.equipment.weapons = vec![shortbow()];
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        let bow = &sheet.strikes[1];
        assert_eq!(bow.ability, Ability::Dex);
        assert_eq!(bow.attack_bonus, 1 + 5);
        assert_eq!(bow.damage_bonus, 0);
    }

    #[test]
    fn ancestral_familiarity_lowers_the_category() {
        let rules = Ruleset::core();
        let mut sword = longsword();
        sword.name = "Elven Curve Blade".to_string();
        sword.category = WeaponCategory::Advanced;
        sword.traits = vec!["elf".to_string(), "finesse".to_string(), "forceful".to_string()];

        let choices = CharacterChoices {
            ancestry_id: Some("elf".to_string()),
            class_id: Some("rogue".to_string()),
            feats: vec![FeatSelection::new("elven-weapon-familiarity", 1)],
            equipment: Equipment {
                weapons: vec![sword],
                armor: None,
                shield: None,
            },
            ..Default::default()
        };
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        // rogue is trained in martial weapons, untrained in advanced
        assert_eq!(sheet.strikes[1].rank, ProficiencyRank::Trained);
    }
}
