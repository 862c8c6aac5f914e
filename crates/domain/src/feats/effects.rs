use serde::{Deserialize, Serialize};

use crate::rules::{ArmorCategory, ProficiencyRank, Save, Sense, Skill, Vision};
use crate::ruleset::FeatCategory;

/// A mechanical change a feat makes to derived statistics.
///
/// Rank effects never lower an existing rank; the proficiency step takes
/// the maximum of what the class and the feats grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatEffect {
    SkillRank { skill: Skill, rank: ProficiencyRank },
    LoreRank { topic: String, rank: ProficiencyRank },
    SaveRank { save: Save, rank: ProficiencyRank },
    PerceptionRank { rank: ProficiencyRank },
    ArmorRank { category: ArmorCategory, rank: ProficiencyRank },
    /// Weapons with this ancestry trait use the next lower category
    WeaponFamiliarity { ancestry: String },
    HitPointsPerLevel { amount: i32 },
    HitPoints { amount: i32 },
    Speed { amount: i32 },
    IgnoreArmorSpeedPenalty,
    ExtraLanguages { count: i32 },
    Vision { vision: Vision },
    Sense { sense: Sense },
    ExtraFeatSlot { category: FeatCategory },
    /// Innate spells listed in the catalog under this source
    InnateSpell { source: String },
    /// A cantrip added to the character's own spell list
    ClassCantrip { spell_id: String },
    UntrainedImprovisation,
    /// Fixed result of 10 + proficiency bonus on checks with this skill
    Assurance { skill: Skill },
    FamiliarAbilities { count: u8 },
    /// Dying value at which the character dies
    DyingThreshold { value: i32 },
    Initiative { amount: i32 },
}
