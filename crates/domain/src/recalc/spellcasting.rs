//! Step 12: class spellcasting and innate spells.
//!
//! Slot counts follow the class tables: a spell rank opens at level
//! `2 * rank - 1` with two slots and gains a third at the next level.
//! Rank 10 only ever has one slot. Spontaneous casters know as many
//! spells per rank as they have slots.

use std::collections::BTreeMap;

use super::{InnateSpell, Pass, RecalcStep, SpellRankCount, SpellcastingSummary};
use crate::catalog::{innate_spells_from, InnateSpellKind};
use crate::feats::FeatEffect;
use crate::rules::{Ability, CastingStyle, ProficiencyRank, ProficiencyTarget, Tradition};

const STEP: RecalcStep = RecalcStep::Spellcasting;
const CANTRIPS: u8 = 5;
const MAX_RANK: u8 = 10;

/// Highest spell rank a full caster can cast at `level`.
pub fn max_spell_rank(level: u8) -> u8 {
    level.div_ceil(2).min(MAX_RANK)
}

/// Slots per rank, cantrips (rank 0) included.
pub fn spell_slots(level: u8, extra_slots: u8) -> Vec<SpellRankCount> {
    let mut slots = vec![SpellRankCount {
        rank: 0,
        count: CANTRIPS,
    }];
    for rank in 1..=max_spell_rank(level) {
        let count = if rank == MAX_RANK {
            1
        } else if level >= 2 * rank {
            3 + extra_slots
        } else {
            2 + extra_slots
        };
        slots.push(SpellRankCount { rank, count });
    }
    slots
}

pub(super) fn run(pass: &mut Pass<'_>) {
    pass.snapshot.spellcasting = class_spellcasting(pass);
    pass.snapshot.innate_spells = innate_spells(pass);
}

fn class_spellcasting(pass: &mut Pass<'_>) -> Option<SpellcastingSummary> {
    let class = pass.class?;
    let casting = class.spellcasting.as_ref()?;
    let Some(tradition) = casting
        .tradition
        .or_else(|| pass.specialization.and_then(|s| s.tradition))
    else {
        pass.info(
            STEP,
            format!("{} needs a specialization to pick a tradition", class.name),
        );
        return None;
    };

    let level = pass.level();
    let rank = pass
        .snapshot
        .proficiencies
        .rank(ProficiencyTarget::Spellcasting);
    let modifier = pass.modifier(casting.ability);
    let bonus = rank.proficiency_bonus(level);
    let max_rank = max_spell_rank(level);
    let slots = spell_slots(level, casting.extra_slots);
    let spontaneous = casting.style == CastingStyle::Spontaneous;

    let bonus_cantrips = bonus_cantrips(pass, tradition);
    let capacity = spontaneous.then_some(&slots);
    let known_spells = known_spells(pass, tradition, max_rank, capacity, &bonus_cantrips);
    let signature_spells = match casting.signature_spells_level {
        Some(unlock) if spontaneous && level >= unlock => signature_spells(pass, &known_spells),
        _ => {
            let chosen = &pass.character.choices().spellcasting.signature_spells;
            if !chosen.is_empty() {
                pass.info(STEP, format!("{} has no signature spells yet", class.name));
            }
            Vec::new()
        }
    };

    Some(SpellcastingSummary {
        tradition,
        style: casting.style,
        ability: casting.ability,
        rank,
        spell_dc: 10 + modifier + bonus,
        spell_attack: modifier + bonus,
        max_spell_rank: max_rank,
        repertoire_capacity: if spontaneous { slots.clone() } else { Vec::new() },
        slots,
        known_spells,
        bonus_cantrips,
        signature_spells,
    })
}

/// Cantrips from other traditions added by feats like Adapted Cantrip.
fn bonus_cantrips(pass: &mut Pass<'_>, tradition: Tradition) -> Vec<String> {
    let requested: Vec<String> = pass
        .effects
        .iter()
        .filter_map(|e| match e {
            FeatEffect::ClassCantrip { spell_id } => Some(spell_id.clone()),
            _ => None,
        })
        .collect();

    let mut cantrips = Vec::new();
    for spell_id in requested {
        match pass.ruleset.spell(&spell_id) {
            Some(spell) if !spell.is_cantrip() => {
                pass.note(STEP, format!("{} is not a cantrip", spell.name))
            }
            Some(spell) if spell.traditions.contains(&tradition) => pass.note(
                STEP,
                format!("{} is already on the {} list", spell.name, tradition),
            ),
            Some(_) => cantrips.push(spell_id),
            None => pass.note(STEP, format!("Unknown spell {}", spell_id)),
        }
    }
    cantrips
}

/// Repertoire or spellbook entries that are valid for this caster.
fn known_spells(
    pass: &mut Pass<'_>,
    tradition: Tradition,
    max_rank: u8,
    capacity: Option<&Vec<SpellRankCount>>,
    bonus_cantrips: &[String],
) -> Vec<String> {
    let character = pass.character;
    let choices = &character.choices().spellcasting;
    let listed = if capacity.is_some() {
        &choices.repertoire
    } else {
        &choices.spellbook
    };

    let mut per_rank: BTreeMap<u8, u8> = BTreeMap::new();
    let mut known: Vec<String> = Vec::new();
    for spell_id in listed {
        if known.contains(spell_id) {
            continue;
        }
        let Some(spell) = pass.ruleset.spell(spell_id) else {
            pass.note(STEP, format!("Unknown spell {}", spell_id));
            continue;
        };
        if !spell.traditions.contains(&tradition) && !bonus_cantrips.contains(spell_id) {
            pass.note(
                STEP,
                format!("{} is not on the {} list", spell.name, tradition),
            );
            continue;
        }
        if spell.rank > max_rank {
            pass.note(
                STEP,
                format!("{} is rank {}, above rank {}", spell.name, spell.rank, max_rank),
            );
            continue;
        }
        if let Some(capacity) = capacity {
            let limit = capacity
                .iter()
                .find(|c| c.rank == spell.rank)
                .map_or(0, |c| c.count);
            let used = per_rank.entry(spell.rank).or_default();
            if *used >= limit {
                pass.note(
                    STEP,
                    format!("Repertoire is full at rank {}; {} skipped", spell.rank, spell.name),
                );
                continue;
            }
            *used += 1;
        }
        known.push(spell_id.clone());
    }
    known
}

/// At most one signature spell per rank, chosen from the repertoire.
fn signature_spells(pass: &mut Pass<'_>, known: &[String]) -> Vec<String> {
    let character = pass.character;
    let mut taken_ranks: Vec<u8> = Vec::new();
    let mut signature = Vec::new();

    for spell_id in &character.choices().spellcasting.signature_spells {
        if !known.contains(spell_id) {
            pass.note(STEP, format!("{} is not in the repertoire", spell_id));
            continue;
        }
        let Some(spell) = pass.ruleset.spell(spell_id) else {
            continue;
        };
        if spell.is_cantrip() {
            pass.note(STEP, format!("{} is a cantrip", spell.name));
            continue;
        }
        if taken_ranks.contains(&spell.rank) {
            pass.note(
                STEP,
                format!("Already a signature spell at rank {}; {} skipped", spell.rank, spell.name),
            );
            continue;
        }
        taken_ranks.push(spell.rank);
        signature.push(spell_id.clone());
    }
    signature
}

fn innate_spells(pass: &mut Pass<'_>) -> Vec<InnateSpell> {
    let character = pass.character;
    let level = pass.level();

    let mut sources: Vec<String> = pass.heritage.map(|h| h.id.clone()).into_iter().collect();
    for effect in &pass.effects {
        if let FeatEffect::InnateSpell { source } = effect {
            if !sources.contains(source) {
                sources.push(source.clone());
            }
        }
    }

    let rank = pass
        .snapshot
        .proficiencies
        .rank(ProficiencyTarget::Spellcasting)
        .max(ProficiencyRank::Trained);
    let cha = pass.modifier(Ability::Cha);
    let attack = cha + rank.proficiency_bonus(level);

    let mut spells = Vec::new();
    for source in sources {
        for grant in innate_spells_from(&source) {
            let spell_id = match grant.spell {
                InnateSpellKind::Fixed { spell_id } => Some(spell_id.to_string()),
                InnateSpellKind::Choice(filter) => {
                    let picked = character.choices().spellcasting.innate.get(&source);
                    match picked.map(|id| (id, pass.ruleset.spell(id))) {
                        Some((_, Some(spell)))
                            if spell.rank == filter.rank
                                && spell.traditions.contains(&filter.tradition) =>
                        {
                            Some(spell.id.clone())
                        }
                        Some((id, _)) => {
                            pass.note(
                                STEP,
                                format!("{} cannot be chosen for {}", id, source),
                            );
                            None
                        }
                        None => {
                            pass.info(STEP, format!("No innate spell chosen for {}", source));
                            None
                        }
                    }
                }
            };
            spells.push(InnateSpell {
                source: source.clone(),
                spell_id,
                tradition: grant.tradition,
                frequency: grant.frequency,
                dc: 10 + attack,
                attack,
            });
        }
    }
    spells
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::Recalculator;
    use super::*;
    use crate::catalog::InnateFrequency;
    use crate::character::{BoostChoices, CharacterChoices, FeatSelection};
    use crate::ruleset::Ruleset;

    fn count(slots: &[SpellRankCount], rank: u8) -> u8 {
        slots.iter().find(|s| s.rank == rank).map_or(0, |s| s.count)
    }

    #[test]
    fn slot_table() {
        assert_eq!(max_spell_rank(1), 1);
        assert_eq!(max_spell_rank(3), 2);
        assert_eq!(max_spell_rank(20), 10);

        let one = spell_slots(1, 0);
        assert_eq!(count(&one, 0), 5);
        assert_eq!(count(&one, 1), 2);

        let three = spell_slots(3, 0);
        assert_eq!(count(&three, 1), 3);
        assert_eq!(count(&three, 2), 2);

        let sorcerer = spell_slots(3, 1);
        assert_eq!(count(&sorcerer, 1), 4);
        assert_eq!(count(&sorcerer, 2), 3);

        assert_eq!(count(&spell_slots(20, 1), 10), 1);
    }

    fn wizard() -> CharacterChoices {
        CharacterChoices {
            ancestry_id: Some("elf".to_string()),
            background_id: Some("scholar".to_string()),
            class_id: Some("wizard".to_string()),
            key_ability: Some(Ability::Int),
            boosts: BoostChoices {
                ancestry: vec![Ability::Wis],
                background: vec![Ability::Int, Ability::Wis],
                free: vec![Ability::Int, Ability::Dex, Ability::Con, Ability::Wis],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn wizard_spell_dc_and_spellbook() {
        let rules = Ruleset::core();
        let mut choices = wizard();
        choices.spellcasting.spellbook = vec![
            "detect-magic".to_string(),
            "magic-missile".to_string(),
            "heal".to_string(),
            "fireball".to_string(),
        ];
        let result = Recalculator::new(&rules).recalculate(&character(3, choices));
        let casting = result.snapshot.spellcasting.as_ref().unwrap();

        assert_eq!(result.snapshot.abilities.score(Ability::Int), 18);
        assert_eq!(casting.tradition, Tradition::Arcane);
        assert_eq!(casting.spell_dc, 10 + 4 + 5);
        assert_eq!(casting.spell_attack, 9);
        assert_eq!(casting.max_spell_rank, 2);
        assert_eq!(casting.known_spells, vec!["detect-magic", "magic-missile"]);
        assert!(casting.repertoire_capacity.is_empty());
        assert!(result.warnings().any(|n| n.message.contains("Heal")));
        assert!(result.warnings().any(|n| n.message.contains("Fireball")));
    }

    #[test]
    fn sorcerer_needs_a_bloodline() {
        let rules = Ruleset::core();
        let choices = CharacterChoices {
            class_id: Some("sorcerer".to_string()),
            ..Default::default()
        };
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        assert!(sheet.spellcasting.is_none());
    }

    #[test]
    fn signature_spells_one_per_rank() {
        let rules = Ruleset::core();
        let mut choices = CharacterChoices {
            class_id: Some("sorcerer".to_string()),
            specialization_id: Some("imperial".to_string()),
            ..Default::default()
        };
        choices.spellcasting.repertoire = vec![
            "detect-magic".to_string(),
            "magic-missile".to_string(),
            "mage-armor".to_string(),
            "invisibility".to_string(),
        ];
        choices.spellcasting.signature_spells = vec![
            "magic-missile".to_string(),
            "mage-armor".to_string(),
            "detect-magic".to_string(),
            "invisibility".to_string(),
        ];
        let casting = Recalculator::new(&rules)
            .recalculate(&character(3, choices.clone()))
            .snapshot
            .spellcasting
            .unwrap();
        assert_eq!(casting.signature_spells, vec!["magic-missile", "invisibility"]);
        assert_eq!(count(&casting.repertoire_capacity, 1), 4);

        let early = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot
            .spellcasting
            .unwrap();
        assert!(early.signature_spells.is_empty());
    }

    #[test]
    fn adapted_cantrip_joins_the_spell_list() {
        let rules = Ruleset::core();
        let mut choices = wizard();
        choices.ancestry_id = Some("human".to_string());
        choices.boosts.ancestry = vec![Ability::Int, Ability::Dex];
        choices.feats =
            vec![FeatSelection::new("adapted-cantrip", 1).with_selector("divine-lance")];
        choices.spellcasting.spellbook = vec!["divine-lance".to_string()];
        let casting = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot
            .spellcasting
            .unwrap();
        assert_eq!(casting.bonus_cantrips, vec!["divine-lance"]);
        assert_eq!(casting.known_spells, vec!["divine-lance"]);
    }

    #[test]
    fn adapted_cantrip_from_own_tradition_is_dropped() {
        let rules = Ruleset::core();
        let recalc = Recalculator::new(&rules);
        let adapted = |spell: &str| {
            let mut choices = wizard();
            choices.ancestry_id = Some("human".to_string());
            choices.boosts.ancestry = vec![Ability::Int, Ability::Dex];
            choices.feats = vec![FeatSelection::new("adapted-cantrip", 1).with_selector(spell)];
            recalc.recalculate(&character(3, choices))
        };

        let own = adapted("electric-arc");
        assert!(own.snapshot.spellcasting.as_ref().unwrap().bonus_cantrips.is_empty());
        assert!(own
            .warnings()
            .any(|n| n.message.contains("Electric Arc is already on the arcane list")));

        let ranked = adapted("fireball");
        assert!(ranked.snapshot.spellcasting.as_ref().unwrap().bonus_cantrips.is_empty());
        assert!(ranked
            .warnings()
            .any(|n| n.message.contains("Fireball is not a cantrip")));
    }

    #[test]
    fn seer_elf_has_detect_magic_at_will() {
        let rules = Ruleset::core();
        let mut choices = wizard();
        choices.heritage_id = Some("seer-elf".to_string());
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices))
            .snapshot;
        let innate = &sheet.innate_spells[0];
        assert_eq!(innate.source, "seer-elf");
        assert_eq!(innate.spell_id.as_deref(), Some("detect-magic"));
        assert_eq!(innate.frequency, InnateFrequency::AtWill);
        // Cha 10, trained at level 1
        assert_eq!(innate.dc, 13);
    }

    #[test]
    fn innate_choice_must_match_its_filter() {
        let rules = Ruleset::core();
        let mut choices = CharacterChoices {
            ancestry_id: Some("gnome".to_string()),
            heritage_id: Some("fey-touched-gnome".to_string()),
            ..Default::default()
        };
        choices
            .spellcasting
            .innate
            .insert("fey-touched-gnome".to_string(), "tanglefoot".to_string());
        let sheet = Recalculator::new(&rules)
            .recalculate(&character(1, choices.clone()))
            .snapshot;
        assert_eq!(sheet.innate_spells[0].spell_id.as_deref(), Some("tanglefoot"));

        choices
            .spellcasting
            .innate
            .insert("fey-touched-gnome".to_string(), "divine-lance".to_string());
        let result = Recalculator::new(&rules).recalculate(&character(1, choices));
        assert_eq!(result.snapshot.innate_spells[0].spell_id, None);
        assert!(result.warnings().any(|n| n.message.contains("divine-lance")));
    }
}
