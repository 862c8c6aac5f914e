//! Built-in core rules data.
//!
//! A compact subset of the core ancestries, backgrounds, classes, feats and
//! spells. Enough to build and level real characters without an external
//! ruleset file.

use super::{
    AncestryData, BackgroundData, ClassData, ClassSpellcasting, FeatCategory, FeatData,
    FeatGrant, HeritageData, Prerequisite, ProficiencyGrant, ProgressionStep, RulesetDocument,
    SelectorKind, SpellData,
};
use crate::rules::{
    Ability, ArmorCategory, CastingStyle, ProficiencyRank, ProficiencyTarget, Save, Sense,
    SenseKind, Size, Skill, SkillRef, Tradition, Vision, WeaponCategory,
};

use Ability::{Cha, Con, Dex, Int, Str, Wis};
use ProficiencyRank::{Expert, Legendary, Master, Trained};
use ProficiencyTarget as T;
use Tradition::{Arcane, Divine, Occult, Primal};

pub(super) fn core_document() -> RulesetDocument {
    RulesetDocument {
        ancestries: ancestries(),
        heritages: heritages(),
        backgrounds: backgrounds(),
        classes: classes(),
        feats: feats(),
        spells: spells(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Ancestries & heritages
// =============================================================================

fn ancestry(
    id: &str,
    name: &str,
    hp: i32,
    size: Size,
    speed: i32,
    boosts: &[Ability],
    flaws: &[Ability],
    languages: &[&str],
    vision: Vision,
) -> AncestryData {
    AncestryData {
        id: id.to_string(),
        name: name.to_string(),
        hp,
        size,
        speed,
        boosts: boosts.to_vec(),
        free_boosts: 1,
        flaws: flaws.to_vec(),
        languages: strings(languages),
        bonus_languages: strings(&["draconic", "dwarven", "elven", "gnomish", "goblin", "halfling", "jotun", "orcish", "sylvan"]),
        vision,
        senses: Vec::new(),
        traits: strings(&[id, "humanoid"]),
    }
}

fn ancestries() -> Vec<AncestryData> {
    vec![
        AncestryData {
            free_boosts: 2,
            ..ancestry("human", "Human", 8, Size::Medium, 25, &[], &[], &["common"], Vision::Normal)
        },
        ancestry("elf", "Elf", 6, Size::Medium, 30, &[Dex, Int], &[Con], &["common", "elven"], Vision::LowLight),
        ancestry("dwarf", "Dwarf", 10, Size::Medium, 20, &[Con, Wis], &[Cha], &["common", "dwarven"], Vision::Darkvision),
        ancestry("gnome", "Gnome", 8, Size::Small, 25, &[Con, Cha], &[Str], &["common", "gnomish", "sylvan"], Vision::LowLight),
        ancestry("goblin", "Goblin", 6, Size::Small, 25, &[Dex, Cha], &[Wis], &["common", "goblin"], Vision::Darkvision),
        ancestry("halfling", "Halfling", 6, Size::Small, 25, &[Dex, Wis], &[Str], &["common", "halfling"], Vision::Normal),
        AncestryData {
            free_boosts: 2,
            ..ancestry("orc", "Orc", 10, Size::Medium, 25, &[], &[], &["common", "orcish"], Vision::Darkvision)
        },
    ]
}

fn heritage(id: &str, ancestry_id: &str, name: &str) -> HeritageData {
    HeritageData {
        id: id.to_string(),
        ancestry_id: ancestry_id.to_string(),
        name: name.to_string(),
        vision: None,
        senses: Vec::new(),
        hp_bonus: 0,
        bonus_feat_slots: Vec::new(),
    }
}

fn heritages() -> Vec<HeritageData> {
    vec![
        HeritageData {
            bonus_feat_slots: vec![FeatCategory::General],
            ..heritage("versatile-human", "human", "Versatile Heritage")
        },
        HeritageData {
            vision: Some(Vision::LowLight),
            ..heritage("half-elf", "human", "Half-Elf")
        },
        HeritageData {
            vision: Some(Vision::LowLight),
            ..heritage("half-orc", "human", "Half-Orc")
        },
        HeritageData {
            vision: Some(Vision::Darkvision),
            ..heritage("cavern-elf", "elf", "Cavern Elf")
        },
        heritage("seer-elf", "elf", "Seer Elf"),
        heritage("whisper-elf", "elf", "Whisper Elf"),
        heritage("rock-dwarf", "dwarf", "Rock Dwarf"),
        heritage("strong-blooded-dwarf", "dwarf", "Strong-Blooded Dwarf"),
        heritage("fey-touched-gnome", "gnome", "Fey-Touched Gnome"),
        HeritageData {
            vision: Some(Vision::Darkvision),
            ..heritage("umbral-gnome", "gnome", "Umbral Gnome")
        },
        HeritageData {
            hp_bonus: 4,
            ..heritage("unbreakable-goblin", "goblin", "Unbreakable Goblin")
        },
        heritage("razortooth-goblin", "goblin", "Razortooth Goblin"),
        heritage("gutsy-halfling", "halfling", "Gutsy Halfling"),
        HeritageData {
            vision: Some(Vision::LowLight),
            ..heritage("twilight-halfling", "halfling", "Twilight Halfling")
        },
        HeritageData {
            hp_bonus: 2,
            ..heritage("hold-scarred-orc", "orc", "Hold-Scarred Orc")
        },
        HeritageData {
            senses: vec![Sense::new(SenseKind::Scent, 30)],
            ..heritage("badlands-orc", "orc", "Badlands Orc")
        },
    ]
}

// =============================================================================
// Backgrounds
// =============================================================================

fn background(
    id: &str,
    name: &str,
    boost_options: [Ability; 2],
    skill: Skill,
    lore: &str,
    feat: (&str, Option<&str>),
) -> BackgroundData {
    BackgroundData {
        id: id.to_string(),
        name: name.to_string(),
        boost_options: boost_options.to_vec(),
        trained_skill: Some(skill),
        trained_lore: Some(lore.to_string()),
        skill_feat: Some(FeatGrant {
            feat_id: feat.0.to_string(),
            selector: feat.1.map(str::to_string),
        }),
    }
}

fn backgrounds() -> Vec<BackgroundData> {
    vec![
        background("acolyte", "Acolyte", [Int, Wis], Skill::Religion, "scribing", ("student-of-the-canon", None)),
        background("acrobat", "Acrobat", [Str, Dex], Skill::Acrobatics, "circus", ("steady-balance", None)),
        background("criminal", "Criminal", [Dex, Int], Skill::Stealth, "underworld", ("experienced-smuggler", None)),
        background("farmhand", "Farmhand", [Con, Wis], Skill::Athletics, "farming", ("assurance", Some("athletics"))),
        background("guard", "Guard", [Str, Cha], Skill::Intimidation, "legal", ("quick-coercion", None)),
        background("herbalist", "Herbalist", [Con, Wis], Skill::Medicine, "herbalism", ("natural-medicine", None)),
        background("scholar", "Scholar", [Int, Wis], Skill::Arcana, "academia", ("assurance", Some("arcana"))),
        background("warrior", "Warrior", [Str, Con], Skill::Intimidation, "warfare", ("intimidating-glare", None)),
    ]
}

// =============================================================================
// Classes
// =============================================================================

fn grants(items: &[(ProficiencyTarget, ProficiencyRank)]) -> Vec<ProficiencyGrant> {
    items
        .iter()
        .map(|&(target, rank)| ProficiencyGrant { target, rank })
        .collect()
}

fn steps(items: &[(u8, ProficiencyTarget, ProficiencyRank)]) -> Vec<ProgressionStep> {
    items
        .iter()
        .map(|&(level, target, rank)| ProgressionStep {
            level,
            target,
            rank,
        })
        .collect()
}

fn odd_levels() -> Vec<u8> {
    (3..=19).step_by(2).collect()
}

fn even_levels() -> Vec<u8> {
    (2..=20).step_by(2).collect()
}

fn martial_feat_levels() -> Vec<u8> {
    std::iter::once(1).chain(even_levels()).collect()
}

const FORT: ProficiencyTarget = T::Save(Save::Fortitude);
const REF: ProficiencyTarget = T::Save(Save::Reflex);
const WILL: ProficiencyTarget = T::Save(Save::Will);
const UNARMED: ProficiencyTarget = T::Weapon(WeaponCategory::Unarmed);
const SIMPLE: ProficiencyTarget = T::Weapon(WeaponCategory::Simple);
const MARTIAL: ProficiencyTarget = T::Weapon(WeaponCategory::Martial);
const ADVANCED: ProficiencyTarget = T::Weapon(WeaponCategory::Advanced);
const UNARMORED: ProficiencyTarget = T::Armor(ArmorCategory::Unarmored);
const LIGHT: ProficiencyTarget = T::Armor(ArmorCategory::Light);
const MEDIUM: ProficiencyTarget = T::Armor(ArmorCategory::Medium);
const HEAVY: ProficiencyTarget = T::Armor(ArmorCategory::Heavy);

fn caster_steps(first_save: ProficiencyTarget, second_save: ProficiencyTarget) -> Vec<ProgressionStep> {
    steps(&[
        (5, first_save, Expert),
        (7, T::Spellcasting, Expert),
        (7, T::ClassDc, Expert),
        (9, second_save, Expert),
        (11, T::Perception, Expert),
        (11, SIMPLE, Expert),
        (11, UNARMED, Expert),
        (13, UNARMORED, Expert),
        (15, T::Spellcasting, Master),
        (15, T::ClassDc, Master),
        (17, WILL, Master),
        (19, T::Spellcasting, Legendary),
        (19, T::ClassDc, Legendary),
    ])
}

fn caster_initial() -> Vec<ProficiencyGrant> {
    grants(&[
        (T::Perception, Trained),
        (FORT, Trained),
        (REF, Trained),
        (WILL, Expert),
        (UNARMED, Trained),
        (SIMPLE, Trained),
        (UNARMORED, Trained),
        (T::ClassDc, Trained),
        (T::Spellcasting, Trained),
    ])
}

fn classes() -> Vec<ClassData> {
    vec![
        ClassData {
            id: "fighter".to_string(),
            name: "Fighter".to_string(),
            hp: 10,
            key_abilities: vec![Str, Dex],
            initial_proficiencies: grants(&[
                (T::Perception, Expert),
                (FORT, Expert),
                (REF, Expert),
                (WILL, Trained),
                (UNARMED, Expert),
                (SIMPLE, Expert),
                (MARTIAL, Expert),
                (ADVANCED, Trained),
                (UNARMORED, Trained),
                (LIGHT, Trained),
                (MEDIUM, Trained),
                (HEAVY, Trained),
                (T::ClassDc, Trained),
            ]),
            trained_skills: vec![Skill::Athletics],
            additional_skills: 3,
            skill_increase_levels: odd_levels(),
            class_feat_levels: martial_feat_levels(),
            skill_feat_levels: even_levels(),
            progression: steps(&[
                (3, WILL, Expert),
                (5, UNARMED, Master),
                (5, SIMPLE, Master),
                (5, MARTIAL, Master),
                (5, ADVANCED, Expert),
                (7, T::Perception, Master),
                (9, FORT, Master),
                (11, UNARMORED, Expert),
                (11, LIGHT, Expert),
                (11, MEDIUM, Expert),
                (11, HEAVY, Expert),
                (11, T::ClassDc, Expert),
                (13, UNARMED, Legendary),
                (13, SIMPLE, Legendary),
                (13, MARTIAL, Legendary),
                (13, ADVANCED, Master),
                (15, REF, Master),
                (17, UNARMORED, Master),
                (17, LIGHT, Master),
                (17, MEDIUM, Master),
                (17, HEAVY, Master),
                (19, ADVANCED, Legendary),
                (19, T::ClassDc, Master),
            ]),
            spellcasting: None,
        },
        ClassData {
            id: "rogue".to_string(),
            name: "Rogue".to_string(),
            hp: 8,
            key_abilities: vec![Dex],
            initial_proficiencies: grants(&[
                (T::Perception, Expert),
                (FORT, Trained),
                (REF, Expert),
                (WILL, Expert),
                (UNARMED, Trained),
                (SIMPLE, Trained),
                (MARTIAL, Trained),
                (UNARMORED, Trained),
                (LIGHT, Trained),
                (T::ClassDc, Trained),
            ]),
            trained_skills: vec![Skill::Stealth],
            additional_skills: 7,
            skill_increase_levels: (2..=20).collect(),
            class_feat_levels: martial_feat_levels(),
            skill_feat_levels: (1..=20).collect(),
            progression: steps(&[
                (5, UNARMED, Expert),
                (5, SIMPLE, Expert),
                (5, MARTIAL, Expert),
                (7, REF, Master),
                (7, T::Perception, Master),
                (9, FORT, Expert),
                (11, T::ClassDc, Expert),
                (13, REF, Legendary),
                (13, T::Perception, Legendary),
                (13, UNARMORED, Expert),
                (13, LIGHT, Expert),
                (13, UNARMED, Master),
                (13, SIMPLE, Master),
                (13, MARTIAL, Master),
                (17, WILL, Master),
                (19, UNARMORED, Master),
                (19, LIGHT, Master),
                (19, T::ClassDc, Master),
            ]),
            spellcasting: None,
        },
        ClassData {
            id: "ranger".to_string(),
            name: "Ranger".to_string(),
            hp: 10,
            key_abilities: vec![Str, Dex],
            initial_proficiencies: grants(&[
                (T::Perception, Expert),
                (FORT, Expert),
                (REF, Expert),
                (WILL, Trained),
                (UNARMED, Trained),
                (SIMPLE, Trained),
                (MARTIAL, Trained),
                (UNARMORED, Trained),
                (LIGHT, Trained),
                (MEDIUM, Trained),
                (T::ClassDc, Trained),
            ]),
            trained_skills: vec![Skill::Nature, Skill::Survival],
            additional_skills: 4,
            skill_increase_levels: odd_levels(),
            class_feat_levels: martial_feat_levels(),
            skill_feat_levels: even_levels(),
            progression: steps(&[
                (3, WILL, Expert),
                (5, UNARMED, Expert),
                (5, SIMPLE, Expert),
                (5, MARTIAL, Expert),
                (7, REF, Master),
                (7, T::Perception, Master),
                (9, T::ClassDc, Expert),
                (11, FORT, Master),
                (11, UNARMORED, Expert),
                (11, LIGHT, Expert),
                (11, MEDIUM, Expert),
                (13, UNARMED, Master),
                (13, SIMPLE, Master),
                (13, MARTIAL, Master),
                (15, REF, Legendary),
                (15, T::Perception, Legendary),
                (17, T::ClassDc, Master),
                (19, UNARMORED, Master),
                (19, LIGHT, Master),
                (19, MEDIUM, Master),
            ]),
            spellcasting: None,
        },
        ClassData {
            id: "wizard".to_string(),
            name: "Wizard".to_string(),
            hp: 6,
            key_abilities: vec![Int],
            initial_proficiencies: caster_initial(),
            trained_skills: vec![Skill::Arcana],
            additional_skills: 2,
            skill_increase_levels: odd_levels(),
            class_feat_levels: even_levels(),
            skill_feat_levels: even_levels(),
            progression: caster_steps(REF, FORT),
            spellcasting: Some(ClassSpellcasting {
                tradition: Some(Arcane),
                style: CastingStyle::Prepared,
                ability: Int,
                extra_slots: 0,
                signature_spells_level: None,
            }),
        },
        ClassData {
            id: "sorcerer".to_string(),
            name: "Sorcerer".to_string(),
            hp: 6,
            key_abilities: vec![Cha],
            initial_proficiencies: caster_initial(),
            trained_skills: Vec::new(),
            additional_skills: 2,
            skill_increase_levels: odd_levels(),
            class_feat_levels: even_levels(),
            skill_feat_levels: even_levels(),
            progression: caster_steps(FORT, REF),
            spellcasting: Some(ClassSpellcasting {
                tradition: None,
                style: CastingStyle::Spontaneous,
                ability: Cha,
                extra_slots: 1,
                signature_spells_level: Some(3),
            }),
        },
        ClassData {
            id: "cleric".to_string(),
            name: "Cleric".to_string(),
            hp: 8,
            key_abilities: vec![Wis],
            initial_proficiencies: caster_initial(),
            trained_skills: vec![Skill::Religion],
            additional_skills: 2,
            skill_increase_levels: odd_levels(),
            class_feat_levels: even_levels(),
            skill_feat_levels: even_levels(),
            progression: steps(&[
                (5, T::Perception, Expert),
                (7, T::Spellcasting, Expert),
                (9, WILL, Master),
                (11, REF, Expert),
                (11, FORT, Expert),
                (13, UNARMORED, Expert),
                (13, SIMPLE, Expert),
                (15, T::Spellcasting, Master),
                (19, T::Spellcasting, Legendary),
            ]),
            spellcasting: Some(ClassSpellcasting {
                tradition: Some(Divine),
                style: CastingStyle::Prepared,
                ability: Wis,
                extra_slots: 0,
                signature_spells_level: None,
            }),
        },
        ClassData {
            id: "bard".to_string(),
            name: "Bard".to_string(),
            hp: 8,
            key_abilities: vec![Cha],
            initial_proficiencies: grants(&[
                (T::Perception, Expert),
                (FORT, Trained),
                (REF, Trained),
                (WILL, Expert),
                (UNARMED, Trained),
                (SIMPLE, Trained),
                (UNARMORED, Trained),
                (LIGHT, Trained),
                (T::ClassDc, Trained),
                (T::Spellcasting, Trained),
            ]),
            trained_skills: vec![Skill::Occultism, Skill::Performance],
            additional_skills: 4,
            skill_increase_levels: odd_levels(),
            class_feat_levels: even_levels(),
            skill_feat_levels: even_levels(),
            progression: steps(&[
                (7, T::Spellcasting, Expert),
                (9, FORT, Expert),
                (9, WILL, Master),
                (11, UNARMED, Expert),
                (11, SIMPLE, Expert),
                (11, T::Perception, Master),
                (13, UNARMORED, Expert),
                (13, LIGHT, Expert),
                (13, REF, Expert),
                (15, T::Spellcasting, Master),
                (17, WILL, Legendary),
                (19, T::Spellcasting, Legendary),
            ]),
            spellcasting: Some(ClassSpellcasting {
                tradition: Some(Occult),
                style: CastingStyle::Spontaneous,
                ability: Cha,
                extra_slots: 0,
                signature_spells_level: Some(3),
            }),
        },
    ]
}

// =============================================================================
// Feats
// =============================================================================

fn feat(id: &str, name: &str, level: u8, category: FeatCategory) -> FeatData {
    FeatData {
        id: id.to_string(),
        name: name.to_string(),
        level,
        category,
        traits: Vec::new(),
        prerequisites: Vec::new(),
        repeatable: false,
        selector: None,
    }
}

fn ancestry_feat(id: &str, name: &str, level: u8, ancestry_id: &str) -> FeatData {
    FeatData {
        traits: strings(&[ancestry_id]),
        prerequisites: vec![Prerequisite::Ancestry {
            ancestry_id: ancestry_id.to_string(),
        }],
        ..feat(id, name, level, FeatCategory::Ancestry)
    }
}

fn class_feat(id: &str, name: &str, level: u8, class_ids: &[&str]) -> FeatData {
    let mut options: Vec<Prerequisite> = class_ids
        .iter()
        .map(|c| Prerequisite::Class {
            class_id: c.to_string(),
        })
        .collect();
    let prerequisite = if options.len() == 1 {
        options.remove(0)
    } else {
        Prerequisite::AnyOf { options }
    };
    FeatData {
        traits: strings(class_ids),
        prerequisites: vec![prerequisite],
        ..feat(id, name, level, FeatCategory::Class)
    }
}

fn skill_feat(id: &str, name: &str, skill: Skill) -> FeatData {
    FeatData {
        traits: strings(&["general", "skill"]),
        prerequisites: vec![Prerequisite::SkillRank {
            skill: SkillRef::Core(skill),
            rank: Trained,
        }],
        ..feat(id, name, 1, FeatCategory::Skill)
    }
}

fn feats() -> Vec<FeatData> {
    use FeatCategory::General;

    vec![
        // General
        feat("toughness", "Toughness", 1, General),
        feat("fleet", "Fleet", 1, General),
        FeatData {
            selector: Some(SelectorKind::SaveOrPerception),
            ..feat("canny-acumen", "Canny Acumen", 1, General)
        },
        feat("diehard", "Diehard", 1, General),
        FeatData {
            repeatable: true,
            selector: Some(SelectorKind::Armor),
            ..feat("armor-proficiency", "Armor Proficiency", 1, General)
        },
        feat("incredible-initiative", "Incredible Initiative", 1, General),
        feat("shield-block", "Shield Block", 1, General),
        FeatData {
            selector: Some(SelectorKind::Ancestry),
            ..feat("adopted-ancestry", "Adopted Ancestry", 1, General)
        },
        feat("untrained-improvisation", "Untrained Improvisation", 3, General),
        // Skill
        FeatData {
            repeatable: true,
            selector: Some(SelectorKind::Skill),
            prerequisites: vec![Prerequisite::MinAbility {
                ability: Int,
                score: 12,
            }],
            ..feat("skill-training", "Skill Training", 1, FeatCategory::Skill)
        },
        FeatData {
            repeatable: true,
            selector: Some(SelectorKind::Lore),
            ..skill_feat("additional-lore", "Additional Lore", Skill::Society)
        },
        FeatData {
            repeatable: true,
            selector: Some(SelectorKind::Language),
            ..skill_feat("multilingual", "Multilingual", Skill::Society)
        },
        FeatData {
            repeatable: true,
            selector: Some(SelectorKind::Skill),
            prerequisites: vec![Prerequisite::SelectedSkillRank { rank: Trained }],
            ..feat("assurance", "Assurance", 1, FeatCategory::Skill)
        },
        skill_feat("battle-medicine", "Battle Medicine", Skill::Medicine),
        skill_feat("student-of-the-canon", "Student of the Canon", Skill::Religion),
        skill_feat("steady-balance", "Steady Balance", Skill::Acrobatics),
        skill_feat("experienced-smuggler", "Experienced Smuggler", Skill::Stealth),
        skill_feat("quick-coercion", "Quick Coercion", Skill::Intimidation),
        skill_feat("intimidating-glare", "Intimidating Glare", Skill::Intimidation),
        skill_feat("natural-medicine", "Natural Medicine", Skill::Nature),
        skill_feat("titan-wrestler", "Titan Wrestler", Skill::Athletics),
        // Human
        FeatData {
            selector: Some(SelectorKind::Feat),
            ..ancestry_feat("natural-ambition", "Natural Ambition", 1, "human")
        },
        FeatData {
            repeatable: true,
            selector: Some(SelectorKind::Feat),
            ..ancestry_feat("general-training", "General Training", 1, "human")
        },
        FeatData {
            selector: Some(SelectorKind::Spell),
            prerequisites: vec![
                Prerequisite::Ancestry {
                    ancestry_id: "human".to_string(),
                },
                Prerequisite::Spellcaster,
            ],
            ..ancestry_feat("adapted-cantrip", "Adapted Cantrip", 1, "human")
        },
        // Elf
        FeatData {
            selector: Some(SelectorKind::Skill),
            prerequisites: vec![
                Prerequisite::Ancestry {
                    ancestry_id: "elf".to_string(),
                },
                Prerequisite::Custom {
                    description: "at least 100 years old".to_string(),
                },
            ],
            ..ancestry_feat("ancestral-longevity", "Ancestral Longevity", 1, "elf")
        },
        ancestry_feat("nimble-elf", "Nimble Elf", 1, "elf"),
        ancestry_feat("otherworldly-magic", "Otherworldly Magic", 1, "elf"),
        ancestry_feat("elven-weapon-familiarity", "Elven Weapon Familiarity", 1, "elf"),
        FeatData {
            prerequisites: vec![
                Prerequisite::Ancestry {
                    ancestry_id: "elf".to_string(),
                },
                Prerequisite::HasFeat {
                    feat_id: "otherworldly-magic".to_string(),
                },
            ],
            ..ancestry_feat("otherworldly-acumen", "Otherworldly Acumen", 9, "elf")
        },
        // Dwarf
        ancestry_feat("dwarven-weapon-familiarity", "Dwarven Weapon Familiarity", 1, "dwarf"),
        ancestry_feat("unburdened-iron", "Unburdened Iron", 1, "dwarf"),
        ancestry_feat("rock-runner", "Rock Runner", 1, "dwarf"),
        // Gnome
        ancestry_feat("first-world-magic", "First World Magic", 1, "gnome"),
        FeatData {
            selector: Some(SelectorKind::Lore),
            ..ancestry_feat("gnome-obsession", "Gnome Obsession", 1, "gnome")
        },
        FeatData {
            prerequisites: vec![
                Prerequisite::Ancestry {
                    ancestry_id: "gnome".to_string(),
                },
                Prerequisite::AnyOf {
                    options: vec![
                        Prerequisite::HasFeat {
                            feat_id: "first-world-magic".to_string(),
                        },
                        Prerequisite::Heritage {
                            heritage_id: "fey-touched-gnome".to_string(),
                        },
                    ],
                },
            ],
            ..ancestry_feat("first-world-adept", "First World Adept", 9, "gnome")
        },
        // Halfling
        ancestry_feat("halfling-luck", "Halfling Luck", 1, "halfling"),
        // Orc
        FeatData {
            traits: strings(&["orc"]),
            prerequisites: vec![Prerequisite::AnyOf {
                options: vec![
                    Prerequisite::Ancestry {
                        ancestry_id: "orc".to_string(),
                    },
                    Prerequisite::Heritage {
                        heritage_id: "half-orc".to_string(),
                    },
                ],
            }],
            ..feat("orc-sight", "Orc Sight", 1, FeatCategory::Ancestry)
        },
        // Class
        class_feat("power-attack", "Power Attack", 1, &["fighter"]),
        class_feat("sudden-charge", "Sudden Charge", 1, &["fighter"]),
        class_feat("reactive-shield", "Reactive Shield", 1, &["fighter"]),
        class_feat("nimble-dodge", "Nimble Dodge", 1, &["rogue"]),
        class_feat("trap-finder", "Trap Finder", 1, &["rogue"]),
        class_feat("hunted-shot", "Hunted Shot", 1, &["ranger"]),
        class_feat("monster-hunter", "Monster Hunter", 1, &["ranger"]),
        class_feat("reach-spell", "Reach Spell", 1, &["bard", "cleric", "sorcerer", "wizard"]),
        class_feat("domain-initiate", "Domain Initiate", 1, &["cleric"]),
        class_feat("bardic-lore", "Bardic Lore", 1, &["bard"]),
        class_feat("lingering-composition", "Lingering Composition", 1, &["bard"]),
        class_feat("versatile-performance", "Versatile Performance", 1, &["bard"]),
        FeatData {
            prerequisites: vec![
                Prerequisite::AnyOf {
                    options: vec![
                        Prerequisite::Class {
                            class_id: "wizard".to_string(),
                        },
                        Prerequisite::Class {
                            class_id: "sorcerer".to_string(),
                        },
                    ],
                },
                Prerequisite::Custom {
                    description: "a familiar".to_string(),
                },
            ],
            ..class_feat("enhanced-familiar", "Enhanced Familiar", 2, &["sorcerer", "wizard"])
        },
    ]
}

// =============================================================================
// Spells
// =============================================================================

fn spell(id: &str, name: &str, rank: u8, traditions: &[Tradition]) -> SpellData {
    SpellData {
        id: id.to_string(),
        name: name.to_string(),
        rank,
        traditions: traditions.to_vec(),
        traits: if rank == 0 {
            strings(&["cantrip"])
        } else {
            Vec::new()
        },
    }
}

fn spells() -> Vec<SpellData> {
    vec![
        spell("detect-magic", "Detect Magic", 0, &[Arcane, Divine, Occult, Primal]),
        spell("light", "Light", 0, &[Arcane, Divine, Occult, Primal]),
        spell("prestidigitation", "Prestidigitation", 0, &[Arcane, Divine, Occult, Primal]),
        spell("electric-arc", "Electric Arc", 0, &[Arcane, Primal]),
        spell("ignition", "Ignition", 0, &[Arcane, Primal]),
        spell("tanglefoot", "Tanglefoot", 0, &[Arcane, Primal]),
        spell("shield", "Shield", 0, &[Arcane, Divine, Occult]),
        spell("daze", "Daze", 0, &[Arcane, Divine, Occult]),
        spell("divine-lance", "Divine Lance", 0, &[Divine]),
        spell("guidance", "Guidance", 0, &[Divine, Occult, Primal]),
        spell("telekinetic-projectile", "Telekinetic Projectile", 0, &[Arcane, Occult]),
        spell("magic-missile", "Magic Missile", 1, &[Arcane, Occult]),
        spell("heal", "Heal", 1, &[Divine, Primal]),
        spell("fear", "Fear", 1, &[Arcane, Divine, Occult, Primal]),
        spell("soothe", "Soothe", 1, &[Occult]),
        spell("grease", "Grease", 1, &[Arcane, Primal]),
        spell("mage-armor", "Mage Armor", 1, &[Arcane, Occult]),
        spell("sanctuary", "Sanctuary", 1, &[Divine, Occult]),
        spell("charm", "Charm", 1, &[Arcane, Occult, Primal]),
        spell("faerie-fire", "Faerie Fire", 2, &[Divine, Occult, Primal]),
        spell("invisibility", "Invisibility", 2, &[Arcane, Occult]),
        spell("see-invisibility", "See Invisibility", 2, &[Arcane, Divine, Occult]),
        spell("dispel-magic", "Dispel Magic", 2, &[Arcane, Divine, Occult, Primal]),
        spell("spiritual-weapon", "Spiritual Weapon", 2, &[Divine, Occult]),
        spell("fireball", "Fireball", 3, &[Arcane, Primal]),
        spell("haste", "Haste", 3, &[Arcane, Occult, Primal]),
        spell("heroism", "Heroism", 3, &[Divine, Occult]),
        spell("fly", "Fly", 4, &[Arcane, Occult, Primal]),
    ]
}
