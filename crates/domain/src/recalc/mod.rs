//! Character recalculation pipeline
//!
//! Derives every statistic of a character from its raw choices and the
//! ruleset. The pipeline is a fixed sequence of steps; each step reads the
//! choices, static tables and the outputs of earlier steps, and writes its
//! own part of the [`CharacterSnapshot`].
//!
//! Recalculation never fails. Missing ruleset records and invalid choices
//! are skipped and reported as [`RecalcNote`]s, so a half-built character
//! still produces a usable sheet. Running it twice on the same input yields
//! the same snapshot.

mod abilities;
mod companions;
mod defenses;
mod feat_slots;
mod knowledge;
mod proficiencies;
mod snapshot;
mod spellcasting;
mod strikes;
mod vitals;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use snapshot::{
    CharacterSnapshot, CompanionStats, Defenses, FamiliarStats, FeatSlotUsage, InnateSpell,
    LanguageSummary, Proficiencies, RitualCheck, ShieldStats, SkillEntry, SpellRankCount,
    SpellcastingSummary, StatEntry, Strike,
};

use crate::catalog::{specialization_by_id, Specialization};
use crate::character::Character;
use crate::feats::{effects_for, resolve_feats, FeatEffect};
use crate::rules::Ability;
use crate::ruleset::{AncestryData, BackgroundData, ClassData, HeritageData, Ruleset};

/// Pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecalcStep {
    Inputs,
    Feats,
    Abilities,
    Proficiencies,
    Skills,
    SavesAndPerception,
    HitPoints,
    Speed,
    Languages,
    Senses,
    Defenses,
    Strikes,
    Spellcasting,
    FeatSlots,
    CompanionsAndRituals,
}

impl fmt::Display for RecalcStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecalcStep::Inputs => "inputs",
            RecalcStep::Feats => "feats",
            RecalcStep::Abilities => "abilities",
            RecalcStep::Proficiencies => "proficiencies",
            RecalcStep::Skills => "skills",
            RecalcStep::SavesAndPerception => "saves_and_perception",
            RecalcStep::HitPoints => "hit_points",
            RecalcStep::Speed => "speed",
            RecalcStep::Languages => "languages",
            RecalcStep::Senses => "senses",
            RecalcStep::Defenses => "defenses",
            RecalcStep::Strikes => "strikes",
            RecalcStep::Spellcasting => "spellcasting",
            RecalcStep::FeatSlots => "feat_slots",
            RecalcStep::CompanionsAndRituals => "companions_and_rituals",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteLevel {
    /// Expected situation, e.g. a feat taken above the current level
    Info,
    /// An input was ignored because it is invalid or incomplete
    Warning,
}

/// Something the pipeline skipped or adjusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalcNote {
    pub step: RecalcStep,
    pub level: NoteLevel,
    pub message: String,
}

impl RecalcNote {
    pub fn info(step: RecalcStep, message: impl Into<String>) -> Self {
        Self {
            step,
            level: NoteLevel::Info,
            message: message.into(),
        }
    }

    pub fn warn(step: RecalcStep, message: impl Into<String>) -> Self {
        Self {
            step,
            level: NoteLevel::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for RecalcNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.step, self.message)
    }
}

/// Result of one recalculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recalculation {
    pub snapshot: CharacterSnapshot,
    pub notes: Vec<RecalcNote>,
}

impl Recalculation {
    pub fn warnings(&self) -> impl Iterator<Item = &RecalcNote> {
        self.notes.iter().filter(|n| n.level == NoteLevel::Warning)
    }
}

/// Runs the pipeline against one ruleset.
#[derive(Debug, Clone, Copy)]
pub struct Recalculator<'r> {
    ruleset: &'r Ruleset,
}

type StepFn = fn(&mut Pass<'_>);

const PIPELINE: [(RecalcStep, StepFn); 14] = [
    (RecalcStep::Feats, feats),
    (RecalcStep::Abilities, abilities::run),
    (RecalcStep::Proficiencies, proficiencies::proficiencies),
    (RecalcStep::Skills, proficiencies::skills),
    (RecalcStep::SavesAndPerception, proficiencies::saves_and_perception),
    (RecalcStep::HitPoints, vitals::hit_points),
    (RecalcStep::Speed, vitals::speed),
    (RecalcStep::Languages, knowledge::languages),
    (RecalcStep::Senses, knowledge::senses),
    (RecalcStep::Defenses, defenses::run),
    (RecalcStep::Strikes, strikes::run),
    (RecalcStep::Spellcasting, spellcasting::run),
    (RecalcStep::FeatSlots, feat_slots::run),
    (RecalcStep::CompanionsAndRituals, companions::run),
];

impl<'r> Recalculator<'r> {
    pub fn new(ruleset: &'r Ruleset) -> Self {
        Self { ruleset }
    }

    /// Derive a fresh snapshot from the character's choices.
    pub fn recalculate(&self, character: &Character) -> Recalculation {
        let mut pass = Pass::new(character, self.ruleset);
        for (_, step) in PIPELINE {
            step(&mut pass);
        }
        Recalculation {
            snapshot: pass.snapshot,
            notes: pass.notes,
        }
    }

    /// Step names in execution order.
    pub fn steps() -> impl Iterator<Item = RecalcStep> {
        PIPELINE.into_iter().map(|(step, _)| step)
    }
}

/// Working state shared by the steps of one recalculation.
pub(crate) struct Pass<'a> {
    pub character: &'a Character,
    pub ruleset: &'a Ruleset,
    pub ancestry: Option<&'a AncestryData>,
    pub heritage: Option<&'a HeritageData>,
    pub background: Option<&'a BackgroundData>,
    pub class: Option<&'a ClassData>,
    pub specialization: Option<&'static Specialization>,
    pub effects: Vec<FeatEffect>,
    pub snapshot: CharacterSnapshot,
    pub notes: Vec<RecalcNote>,
}

impl<'a> Pass<'a> {
    fn new(character: &'a Character, ruleset: &'a Ruleset) -> Self {
        let choices = character.choices();
        let mut notes = Vec::new();

        fn lookup<'r, T: ?Sized>(
            kind: &str,
            id: Option<&str>,
            find: impl Fn(&str) -> Option<&'r T>,
            notes: &mut Vec<RecalcNote>,
        ) -> Option<&'r T> {
            let id = id?;
            let found = find(id);
            if found.is_none() {
                notes.push(RecalcNote::warn(
                    RecalcStep::Inputs,
                    format!("Unknown {} {}; skipped", kind, id),
                ));
            }
            found
        }

        let ancestry = lookup(
            "ancestry",
            choices.ancestry_id.as_deref(),
            |id| ruleset.ancestry(id),
            &mut notes,
        );
        let heritage = lookup(
            "heritage",
            choices.heritage_id.as_deref(),
            |id| ruleset.heritage(id),
            &mut notes,
        );
        let background = lookup(
            "background",
            choices.background_id.as_deref(),
            |id| ruleset.background(id),
            &mut notes,
        );
        let class = lookup(
            "class",
            choices.class_id.as_deref(),
            |id| ruleset.class(id),
            &mut notes,
        );
        let specialization = lookup(
            "specialization",
            choices.specialization_id.as_deref(),
            specialization_by_id,
            &mut notes,
        );

        Self {
            character,
            ruleset,
            ancestry,
            heritage,
            background,
            class,
            specialization,
            effects: Vec::new(),
            snapshot: CharacterSnapshot {
                level: character.level(),
                ..Default::default()
            },
            notes,
        }
    }

    pub fn level(&self) -> u8 {
        self.character.level()
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.snapshot.abilities.modifier(ability)
    }

    pub fn note(&mut self, step: RecalcStep, message: impl Into<String>) {
        self.notes.push(RecalcNote::warn(step, message));
    }

    pub fn info(&mut self, step: RecalcStep, message: impl Into<String>) {
        self.notes.push(RecalcNote::info(step, message));
    }

    pub fn has_effect(&self, wanted: &FeatEffect) -> bool {
        self.effects.iter().any(|e| e == wanted)
    }

    /// Sum an integer field over matching effects.
    pub fn sum_effects(&self, pick: impl Fn(&FeatEffect) -> Option<i32>) -> i32 {
        self.effects.iter().filter_map(pick).sum()
    }
}

/// Step 1: resolve active feats and collect their effects.
fn feats(pass: &mut Pass<'_>) {
    let resolution = resolve_feats(pass.character, pass.ruleset);
    pass.notes.extend(resolution.notes);

    let level = pass.level();
    for feat in &resolution.active {
        match effects_for(feat, level) {
            Ok(effects) => pass.effects.extend(effects),
            Err(e) => pass.notes.push(RecalcNote::warn(
                RecalcStep::Feats,
                format!("{} has no effect: {}", feat.key, e),
            )),
        }
    }
    pass.snapshot.active_feats = resolution.active;
}
