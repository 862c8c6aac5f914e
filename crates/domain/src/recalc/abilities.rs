//! Step 2: ability scores from boosts and flaws.

use super::{Pass, RecalcStep};
use crate::character::BOOST_LEVELS;
use crate::rules::{Ability, AbilityScores};

const STEP: RecalcStep = RecalcStep::Abilities;

pub(super) fn run(pass: &mut Pass<'_>) {
    let mut scores = AbilityScores::default();
    let character = pass.character;
    let boosts = &character.choices().boosts;

    ancestry(pass, &mut scores);

    if let Some(background) = pass.background {
        let chosen = distinct(pass, "background", &boosts.background, 2);
        match chosen.first() {
            Some(first) if !background.boost_options.contains(first) => {
                pass.note(
                    STEP,
                    format!(
                        "{} is not a boost option of {}; background boosts skipped",
                        first.name(),
                        background.name
                    ),
                );
            }
            _ => chosen.iter().for_each(|a| scores.boost(*a)),
        }
    }

    let key = key_ability(pass);
    if let Some(key) = key {
        scores.boost(key);
    }

    let free = distinct(pass, "free", &boosts.free, 4);
    free.iter().for_each(|a| scores.boost(*a));

    let level = pass.level();
    for (at, chosen) in &boosts.levels {
        if !BOOST_LEVELS.contains(at) {
            pass.note(STEP, format!("No ability boosts at level {}", at));
            continue;
        }
        if *at > level {
            continue;
        }
        let chosen = distinct(pass, &format!("level {}", at), chosen, 4);
        chosen.iter().for_each(|a| scores.boost(*a));
    }

    pass.snapshot.abilities = scores;
    pass.snapshot.key_ability = key;
}

fn ancestry(pass: &mut Pass<'_>, scores: &mut AbilityScores) {
    let Some(ancestry) = pass.ancestry else {
        return;
    };
    let character = pass.character;
    let boosts = &character.choices().boosts;

    if boosts.alternate_ancestry_boosts {
        // Two free boosts replace the fixed boosts and flaws.
        let chosen = distinct(pass, "ancestry", &boosts.ancestry, 2);
        chosen.iter().for_each(|a| scores.boost(*a));
        return;
    }

    for flaw in &ancestry.flaws {
        scores.flaw(*flaw);
    }
    let mut applied = ancestry.boosts.clone();
    let free = distinct(pass, "ancestry", &boosts.ancestry, ancestry.free_boosts as usize);
    for ability in free {
        if applied.contains(&ability) {
            pass.note(
                STEP,
                format!("{} already boosted by {}; skipped", ability.name(), ancestry.name),
            );
            continue;
        }
        applied.push(ability);
    }
    applied.iter().for_each(|a| scores.boost(*a));
}

/// The first `limit` distinct abilities of a boost set, noting the rest.
fn distinct(pass: &mut Pass<'_>, set: &str, chosen: &[Ability], limit: usize) -> Vec<Ability> {
    let mut kept: Vec<Ability> = Vec::with_capacity(limit);
    for ability in chosen {
        if kept.contains(ability) {
            pass.note(
                STEP,
                format!("{} boosted twice in the {} set; skipped", ability.name(), set),
            );
        } else if kept.len() == limit {
            pass.note(
                STEP,
                format!("Too many {} boosts; {} skipped", set, ability.name()),
            );
        } else {
            kept.push(*ability);
        }
    }
    kept
}

fn key_ability(pass: &mut Pass<'_>) -> Option<Ability> {
    let class = pass.class?;
    let mut options = class.key_abilities.clone();
    if let Some(extra) = pass.specialization.and_then(|s| s.key_ability) {
        if !options.contains(&extra) {
            options.push(extra);
        }
    }

    let chosen = pass.character.choices().key_ability;
    match chosen {
        Some(chosen) if options.contains(&chosen) => Some(chosen),
        Some(chosen) => {
            pass.note(
                STEP,
                format!("{} is not a key ability of {}", chosen.name(), class.name),
            );
            None
        }
        None if options.len() == 1 => options.first().copied(),
        None => {
            pass.info(STEP, format!("No key ability chosen for {}", class.name));
            None
        }
    }
}
