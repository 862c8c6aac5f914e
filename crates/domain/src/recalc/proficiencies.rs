//! Steps 3 to 5: proficiency ranks and the modifiers built on them.

use super::defenses::armor_check_penalty;
use super::{Pass, RecalcStep, SkillEntry, StatEntry};
use crate::feats::FeatEffect;
use crate::rules::{
    untrained_improvisation_bonus, Ability, ProficiencyRank, ProficiencyTarget, Save, Skill,
    SkillRef,
};

/// Step 3: class, specialization, background, feat and skill-increase ranks.
pub(super) fn proficiencies(pass: &mut Pass<'_>) {
    const STEP: RecalcStep = RecalcStep::Proficiencies;
    let level = pass.level();
    let character = pass.character;
    let choices = character.choices();

    if let Some(class) = pass.class {
        for grant in &class.initial_proficiencies {
            pass.snapshot.proficiencies.grant(grant.target, grant.rank);
        }
        for step in class.progression.iter().filter(|s| s.level <= level) {
            pass.snapshot.proficiencies.grant(step.target, step.rank);
        }
        for skill in &class.trained_skills {
            train(pass, SkillRef::Core(*skill));
        }
    }

    if let Some(spec) = pass.specialization {
        for (target, rank) in spec.proficiencies {
            pass.snapshot.proficiencies.grant(*target, *rank);
        }
        for skill in spec.trained_skills {
            train(pass, SkillRef::Core(*skill));
        }
    }

    if let Some(background) = pass.background {
        if let Some(skill) = background.trained_skill {
            train(pass, SkillRef::Core(skill));
        }
        if let Some(topic) = &background.trained_lore {
            train(pass, SkillRef::lore(topic));
        }
    }

    if let Some(class) = pass.class {
        let int = pass.modifier(Ability::Int).max(0) as usize;
        let capacity = class.additional_skills as usize + int;
        for (i, skill) in choices.class_skills.iter().enumerate() {
            if i >= capacity {
                pass.note(
                    STEP,
                    format!("Only {} class skills allowed; {} skipped", capacity, skill),
                );
                continue;
            }
            if pass.snapshot.skill_rank(skill) >= ProficiencyRank::Trained {
                pass.info(STEP, format!("{} was already trained", skill));
            }
            train(pass, skill.clone());
        }
    }

    let grants: Vec<(Option<ProficiencyTarget>, Option<String>, ProficiencyRank)> = pass
        .effects
        .iter()
        .filter_map(|effect| match effect {
            FeatEffect::SkillRank { skill, rank } => {
                Some((Some(ProficiencyTarget::Skill(*skill)), None, *rank))
            }
            FeatEffect::SaveRank { save, rank } => {
                Some((Some(ProficiencyTarget::Save(*save)), None, *rank))
            }
            FeatEffect::PerceptionRank { rank } => {
                Some((Some(ProficiencyTarget::Perception), None, *rank))
            }
            FeatEffect::ArmorRank { category, rank } => {
                Some((Some(ProficiencyTarget::Armor(*category)), None, *rank))
            }
            FeatEffect::LoreRank { topic, rank } => Some((None, Some(topic.clone()), *rank)),
            _ => None,
        })
        .collect();
    for (target, topic, rank) in grants {
        match (target, topic) {
            (Some(target), _) => pass.snapshot.proficiencies.grant(target, rank),
            (None, Some(topic)) => grant_lore(pass, &topic, rank),
            (None, None) => {}
        }
    }

    let increase_levels = pass
        .class
        .map(|c| c.skill_increase_levels.clone())
        .unwrap_or_default();
    for (at, skill) in choices.skill_increases.range(..=level) {
        if !increase_levels.contains(at) {
            pass.note(STEP, format!("No skill increase at level {}", at));
            continue;
        }
        let current = pass.snapshot.skill_rank(skill);
        let next = current.raise();
        if next == current {
            pass.note(STEP, format!("{} is already legendary", skill));
            continue;
        }
        if next.skill_level_requirement() > *at {
            pass.note(
                STEP,
                format!("{} cannot become {} at level {}", skill, next, at),
            );
            continue;
        }
        match skill {
            SkillRef::Core(core) => {
                pass.snapshot.proficiencies.raise(ProficiencyTarget::Skill(*core));
            }
            SkillRef::Lore(topic) => grant_lore(pass, topic, next),
        }
    }
}

fn train(pass: &mut Pass<'_>, skill: SkillRef) {
    match skill {
        SkillRef::Core(core) => pass
            .snapshot
            .proficiencies
            .grant(ProficiencyTarget::Skill(core), ProficiencyRank::Trained),
        SkillRef::Lore(topic) => grant_lore(pass, &topic, ProficiencyRank::Trained),
    }
}

fn grant_lore(pass: &mut Pass<'_>, topic: &str, rank: ProficiencyRank) {
    let entry = pass
        .snapshot
        .lores
        .entry(topic.trim().to_lowercase())
        .or_default();
    if rank > *entry {
        *entry = rank;
    }
}

/// Modifier for a check using `rank`, with Untrained Improvisation applied.
fn check_modifier(pass: &Pass<'_>, ability: Ability, rank: ProficiencyRank) -> i32 {
    let level = pass.level();
    let proficiency = if rank == ProficiencyRank::Untrained
        && pass.has_effect(&FeatEffect::UntrainedImprovisation)
    {
        untrained_improvisation_bonus(level)
    } else {
        rank.proficiency_bonus(level)
    };
    pass.modifier(ability) + proficiency
}

/// Step 4: skill and lore modifiers.
pub(super) fn skills(pass: &mut Pass<'_>) {
    let penalty = armor_check_penalty(pass);
    let mut entries = Vec::with_capacity(Skill::ALL.len() + pass.snapshot.lores.len());

    for skill in Skill::ALL {
        let skill_ref = SkillRef::Core(skill);
        let rank = pass.snapshot.skill_rank(&skill_ref);
        let armor_penalty = if skill.takes_armor_check_penalty() {
            penalty
        } else {
            0
        };
        let assurance = pass
            .has_effect(&FeatEffect::Assurance { skill })
            .then(|| 10 + rank.proficiency_bonus(pass.level()));
        entries.push(SkillEntry {
            ability: skill.ability(),
            rank,
            modifier: check_modifier(pass, skill.ability(), rank) + armor_penalty,
            armor_penalty,
            assurance,
            skill: skill_ref,
        });
    }

    for (topic, rank) in &pass.snapshot.lores {
        entries.push(SkillEntry {
            skill: SkillRef::Lore(topic.clone()),
            ability: Ability::Int,
            rank: *rank,
            modifier: check_modifier(pass, Ability::Int, *rank),
            armor_penalty: 0,
            assurance: None,
        });
    }

    pass.snapshot.skills = entries;
}

/// Step 5: saving throws, Perception and initiative.
pub(super) fn saves_and_perception(pass: &mut Pass<'_>) {
    let level = pass.level();
    let resilient = pass
        .character
        .choices()
        .equipment
        .armor
        .as_ref()
        .map_or(0, |armor| armor.resilient_tier() as i32);

    for save in Save::ALL {
        let rank = pass
            .snapshot
            .proficiencies
            .rank(ProficiencyTarget::Save(save));
        let modifier = pass.modifier(save.ability()) + rank.proficiency_bonus(level) + resilient;
        pass.snapshot.saves.insert(save, StatEntry { rank, modifier });
    }

    let rank = pass.snapshot.proficiencies.rank(ProficiencyTarget::Perception);
    let perception = StatEntry {
        rank,
        modifier: check_modifier(pass, Ability::Wis, rank),
    };
    let bonus = pass.sum_effects(|e| match e {
        FeatEffect::Initiative { amount } => Some(*amount),
        _ => None,
    });
    pass.snapshot.perception = perception;
    pass.snapshot.initiative = perception.modifier + bonus;
}
