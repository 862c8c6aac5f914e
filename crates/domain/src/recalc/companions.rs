//! Step 14: familiar, animal companion and ritual checks.

use super::{CompanionStats, FamiliarStats, Pass, RecalcStep, RitualCheck};
use crate::catalog::{
    companion_species, ritual_by_id, COMPANION_HP_PER_LEVEL, FAMILIAR_BASE_ABILITIES,
    FAMILIAR_HP_PER_LEVEL,
};
use crate::feats::FeatEffect;
use crate::rules::SkillRef;

const STEP: RecalcStep = RecalcStep::CompanionsAndRituals;

pub(super) fn run(pass: &mut Pass<'_>) {
    pass.snapshot.familiar = familiar(pass);
    pass.snapshot.animal_companion = animal_companion(pass);
    pass.snapshot.rituals = rituals(pass);
}

fn familiar(pass: &mut Pass<'_>) -> Option<FamiliarStats> {
    let character = pass.character;
    let choice = character.choices().companions.familiar.as_ref()?;
    let level = pass.level() as i32;

    let extra: u8 = pass
        .effects
        .iter()
        .filter_map(|e| match e {
            FeatEffect::FamiliarAbilities { count } => Some(*count),
            _ => None,
        })
        .sum();
    let capacity = FAMILIAR_BASE_ABILITIES + extra;

    let mut abilities: Vec<String> = Vec::new();
    for ability in &choice.abilities {
        if abilities.contains(ability) {
            continue;
        }
        if abilities.len() >= capacity as usize {
            pass.note(
                STEP,
                format!(
                    "{} can only have {} abilities; {} skipped",
                    choice.name, capacity, ability
                ),
            );
            continue;
        }
        abilities.push(ability.clone());
    }

    Some(FamiliarStats {
        name: choice.name.clone(),
        hit_points: FAMILIAR_HP_PER_LEVEL * level,
        ability_capacity: capacity,
        abilities,
    })
}

fn animal_companion(pass: &mut Pass<'_>) -> Option<CompanionStats> {
    let character = pass.character;
    let choice = character.choices().companions.animal_companion.as_ref()?;
    let Some(species) = companion_species(&choice.species_id) else {
        pass.note(STEP, format!("Unknown companion species {}", choice.species_id));
        return None;
    };
    let level = pass.level() as i32;

    Some(CompanionStats {
        name: choice.name.clone(),
        species_id: species.id.to_string(),
        hit_points: species.base_hp + (COMPANION_HP_PER_LEVEL + species.con_modifier) * level,
        size: species.size,
        speed: species.speed,
        vision: species.vision,
        senses: species.senses.to_vec(),
    })
}

fn rituals(pass: &mut Pass<'_>) -> Vec<RitualCheck> {
    let character = pass.character;
    let mut checks = Vec::new();

    for ritual_id in &character.choices().rituals {
        let Some(ritual) = ritual_by_id(ritual_id) else {
            pass.note(STEP, format!("Unknown ritual {}", ritual_id));
            continue;
        };

        // Best modifier among the qualifying skills, else among all of them.
        let candidates: Vec<_> = ritual
            .primary_skills
            .iter()
            .filter_map(|skill| pass.snapshot.skill(&SkillRef::Core(*skill)))
            .collect();
        let qualifying: Vec<_> = candidates
            .iter()
            .filter(|entry| entry.rank >= ritual.min_proficiency)
            .collect();
        let best = if qualifying.is_empty() {
            candidates.iter().max_by_key(|entry| entry.modifier)
        } else {
            qualifying.into_iter().max_by_key(|entry| entry.modifier)
        };

        checks.push(RitualCheck {
            ritual_id: ritual.id.to_string(),
            skill: best.and_then(|entry| match entry.skill {
                SkillRef::Core(skill) => Some(skill),
                SkillRef::Lore(_) => None,
            }),
            modifier: best.map_or(0, |entry| entry.modifier),
            qualified: best.is_some_and(|entry| entry.rank >= ritual.min_proficiency),
        });
    }
    checks
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::Recalculator;
    use crate::character::{
        AnimalCompanionChoice, CharacterChoices, FamiliarChoice, FeatSelection,
    };
    use crate::rules::{Skill, SkillRef};
    use crate::ruleset::Ruleset;

    #[test]
    fn familiar_capacity_grows_with_enhanced_familiar() {
        let rules = Ruleset::core();
        let mut choices = CharacterChoices {
            class_id: Some("wizard".to_string()),
            ..Default::default()
        };
        choices.companions.familiar = Some(FamiliarChoice {
            name: "Pip".to_string(),
            abilities: vec![
                "darkvision".to_string(),
                "flier".to_string(),
                "speech".to_string(),
            ],
        });
        let recalc = Recalculator::new(&rules);

        let plain = recalc
            .recalculate(&character(2, choices.clone()))
            .snapshot
            .familiar
            .unwrap();
        assert_eq!(plain.hit_points, 10);
        assert_eq!(plain.ability_capacity, 2);
        assert_eq!(plain.abilities, vec!["darkvision", "flier"]);

        choices.feats = vec![FeatSelection::new("enhanced-familiar", 2)];
        let enhanced = recalc
            .recalculate(&character(2, choices))
            .snapshot
            .familiar
            .unwrap();
        assert_eq!(enhanced.ability_capacity, 4);
        assert_eq!(enhanced.abilities.len(), 3);
    }

    #[test]
    fn animal_companion_uses_species_data() {
        let rules = Ruleset::core();
        let mut choices = CharacterChoices {
            class_id: Some("ranger".to_string()),
            ..Default::default()
        };
        choices.companions.animal_companion = Some(AnimalCompanionChoice {
            name: "Fang".to_string(),
            species_id: "wolf".to_string(),
        });
        let wolf = Recalculator::new(&rules)
            .recalculate(&character(3, choices))
            .snapshot
            .animal_companion
            .unwrap();
        // 6 + (6 + 1) * 3
        assert_eq!(wolf.hit_points, 27);
        assert_eq!(wolf.speed, 40);
    }

    #[test]
    fn unknown_species_is_noted() {
        let rules = Ruleset::core();
        let mut choices = CharacterChoices::default();
        choices.companions.animal_companion = Some(AnimalCompanionChoice {
            name: "Hoot".to_string(),
            species_id: "owlbear".to_string(),
        });
        let result = Recalculator::new(&rules).recalculate(&character(1, choices));
        assert!(result.snapshot.animal_companion.is_none());
        assert!(result.warnings().any(|n| n.message.contains("owlbear")));
    }

    #[test]
    fn ritual_picks_the_best_qualifying_skill() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        choices.class_skills = vec![
            SkillRef::Core(Skill::Religion),
            SkillRef::Core(Skill::Arcana),
            SkillRef::Core(Skill::Medicine),
        ];
        choices
            .skill_increases
            .insert(3, SkillRef::Core(Skill::Religion));
        choices.rituals = vec!["create-undead".to_string(), "resurrect".to_string()];
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(3, choices))
            .snapshot;

        let create = &sheet.rituals[0];
        assert_eq!(create.skill, Some(Skill::Religion));
        assert!(create.qualified);
        // Wis 12 + expert at 3
        assert_eq!(create.modifier, 1 + 7);

        let resurrect = &sheet.rituals[1];
        assert!(!resurrect.qualified);
    }
}
