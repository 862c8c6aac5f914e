//! Steps 8 and 9: languages, vision and senses.

use super::{LanguageSummary, Pass, RecalcStep};
use crate::feats::FeatEffect;
use crate::rules::{merge_sense, Ability};

pub(super) fn languages(pass: &mut Pass<'_>) {
    const STEP: RecalcStep = RecalcStep::Languages;
    let character = pass.character;

    let mut known: Vec<String> = pass
        .ancestry
        .map(|a| a.languages.clone())
        .unwrap_or_default();
    let slots = pass.modifier(Ability::Int).max(0)
        + pass.sum_effects(|e| match e {
            FeatEffect::ExtraLanguages { count } => Some(*count),
            _ => None,
        });

    let mut used = 0;
    for language in &character.choices().languages {
        let language = language.trim().to_lowercase();
        if known.contains(&language) {
            pass.info(STEP, format!("{} is already known", language));
            continue;
        }
        if used >= slots {
            pass.note(
                STEP,
                format!("No language slot left for {}; skipped", language),
            );
            continue;
        }
        known.push(language);
        used += 1;
    }

    pass.snapshot.languages = LanguageSummary { known, slots };
}

pub(super) fn senses(pass: &mut Pass<'_>) {
    let mut vision = pass.ancestry.map(|a| a.vision).unwrap_or_default();
    if let Some(granted) = pass.heritage.and_then(|h| h.vision) {
        vision = vision.max(granted);
    }

    let mut senses = Vec::new();
    let inherent = pass
        .ancestry
        .map(|a| a.senses.as_slice())
        .unwrap_or_default()
        .iter()
        .chain(pass.heritage.map(|h| h.senses.as_slice()).unwrap_or_default());
    for sense in inherent {
        merge_sense(&mut senses, *sense);
    }

    for effect in &pass.effects {
        match effect {
            FeatEffect::Vision { vision: granted } => vision = vision.max(*granted),
            FeatEffect::Sense { sense } => merge_sense(&mut senses, *sense),
            _ => {}
        }
    }

    pass.snapshot.vision = vision;
    pass.snapshot.senses = senses;
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::Recalculator;
    use crate::character::{CharacterChoices, FeatSelection};
    use crate::rules::{Ability, SenseKind, Vision};
    use crate::ruleset::Ruleset;

    #[test]
    fn intelligence_and_feats_add_language_slots() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        choices.boosts.free = vec![Ability::Str, Ability::Dex, Ability::Con, Ability::Int];
        choices.languages = vec![
            "Elven".to_string(),
            "common".to_string(),
            "dwarven".to_string(),
        ];
        let result = Recalculator::new(&rules).recalculate(&character(1, choices));
        let languages = &result.snapshot.languages;

        assert_eq!(languages.slots, 1);
        assert_eq!(languages.known, vec!["common", "elven"]);
        assert!(result.warnings().any(|n| n.message.contains("dwarven")));
    }

    #[test]
    fn multilingual_grants_two_more() {
        let rules = Ruleset::core();
        let mut choices = fighter_choices();
        choices.feats.push(FeatSelection::new("multilingual", 2));
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(2, choices))
            .snapshot;
        assert_eq!(sheet.languages.slots, 2);
    }

    #[test]
    fn heritage_improves_vision() {
        let rules = Ruleset::core();
        let choices = CharacterChoices {
            ancestry_id: Some("elf".to_string()),
            heritage_id: Some("cavern-elf".to_string()),
            ..Default::default()
        };
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        assert_eq!(sheet.vision, Vision::Darkvision);
    }

    #[test]
    fn badlands_orc_has_scent() {
        let rules = Ruleset::core();
        let choices = CharacterChoices {
            ancestry_id: Some("orc".to_string()),
            heritage_id: Some("badlands-orc".to_string()),
            ..Default::default()
        };
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        assert_eq!(sheet.vision, Vision::Darkvision);
        assert_eq!(sheet.senses.len(), 1);
        assert_eq!(sheet.senses[0].kind, SenseKind::Scent);
        assert_eq!(sheet.senses[0].range, 30);
    }

    #[test]
    fn half_orc_with_orc_sight_sees_in_the_dark() {
        let rules = Ruleset::core();
        let choices = CharacterChoices {
            ancestry_id: Some("human".to_string()),
            heritage_id: Some("half-orc".to_string()),
            feats: vec![FeatSelection::new("orc-sight", 1)],
            ..Default::default()
        };
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        assert_eq!(sheet.vision, Vision::Darkvision);
    }
}
