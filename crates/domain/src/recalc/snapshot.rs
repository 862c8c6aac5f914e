//! The derived half of a character.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::InnateFrequency;
use crate::feats::ActiveFeat;
use crate::rules::{
    Ability, AbilityScores, ArmorCategory, CastingStyle, ProficiencyRank, ProficiencyTarget, Save,
    Sense, Size, Skill, SkillRef, Tradition, Vision,
};
use crate::ruleset::{FeatCategory, ProficiencyGrant};

/// Ranks per proficiency target. Serialized as a list of grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProficiencyGrant>", into = "Vec<ProficiencyGrant>")]
pub struct Proficiencies {
    ranks: BTreeMap<ProficiencyTarget, ProficiencyRank>,
}

impl Proficiencies {
    pub fn rank(&self, target: ProficiencyTarget) -> ProficiencyRank {
        self.ranks.get(&target).copied().unwrap_or_default()
    }

    /// Raise a target to at least `rank`. Never lowers.
    pub fn grant(&mut self, target: ProficiencyTarget, rank: ProficiencyRank) {
        let entry = self.ranks.entry(target).or_default();
        if rank > *entry {
            *entry = rank;
        }
    }

    /// Move a target up exactly one rank.
    pub fn raise(&mut self, target: ProficiencyTarget) -> ProficiencyRank {
        let entry = self.ranks.entry(target).or_default();
        *entry = entry.raise();
        *entry
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProficiencyTarget, ProficiencyRank)> + '_ {
        self.ranks.iter().map(|(t, r)| (*t, *r))
    }
}

impl From<Vec<ProficiencyGrant>> for Proficiencies {
    fn from(grants: Vec<ProficiencyGrant>) -> Self {
        let mut profs = Proficiencies::default();
        for grant in grants {
            profs.grant(grant.target, grant.rank);
        }
        profs
    }
}

impl From<Proficiencies> for Vec<ProficiencyGrant> {
    fn from(profs: Proficiencies) -> Self {
        profs
            .ranks
            .into_iter()
            .map(|(target, rank)| ProficiencyGrant { target, rank })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatEntry {
    pub rank: ProficiencyRank,
    pub modifier: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub skill: SkillRef,
    pub ability: Ability,
    pub rank: ProficiencyRank,
    pub modifier: i32,
    /// Armor check penalty already included in `modifier`
    pub armor_penalty: i32,
    /// Assurance result, when a feat grants it for this skill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assurance: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSummary {
    pub known: Vec<String>,
    /// Languages the character may choose beyond the ancestry's
    pub slots: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldStats {
    pub name: String,
    pub ac_bonus: i32,
    pub hardness: i32,
    pub hit_points: i32,
    pub raised: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defenses {
    /// AC with the shield as currently raised (or not)
    pub ac: i32,
    pub armor_category: ArmorCategory,
    pub armor_check_penalty: i32,
    #[serde(default)]
    pub shield: Option<ShieldStats>,
    /// AC while the shield is raised
    pub ac_shield_raised: i32,
    #[serde(default)]
    pub class_dc: Option<i32>,
    /// Dying value at which the character dies
    pub dying_threshold: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strike {
    pub name: String,
    pub ability: Ability,
    pub rank: ProficiencyRank,
    pub attack_bonus: i32,
    /// Attack bonus for the first, second and third attack in a turn
    pub attack_sequence: [i32; 3],
    pub damage_dice: u8,
    pub damage_die: u8,
    pub damage_bonus: i32,
    pub damage_type: String,
    /// Extra damage from property runes, e.g. "1d6 fire"
    #[serde(default)]
    pub extra_damage: Vec<String>,
}

impl Strike {
    /// Damage as written on a sheet, e.g. "2d8+4 slashing".
    pub fn damage_text(&self) -> String {
        let bonus = match self.damage_bonus {
            0 => String::new(),
            b if b > 0 => format!("+{}", b),
            b => b.to_string(),
        };
        format!(
            "{}d{}{} {}",
            self.damage_dice, self.damage_die, bonus, self.damage_type
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellRankCount {
    pub rank: u8,
    pub count: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingSummary {
    pub tradition: Tradition,
    pub style: CastingStyle,
    pub ability: Ability,
    pub rank: ProficiencyRank,
    pub spell_dc: i32,
    pub spell_attack: i32,
    pub max_spell_rank: u8,
    pub slots: Vec<SpellRankCount>,
    /// Spells a spontaneous caster may know per rank
    #[serde(default)]
    pub repertoire_capacity: Vec<SpellRankCount>,
    /// Repertoire or spellbook spells that are valid for this caster
    #[serde(default)]
    pub known_spells: Vec<String>,
    /// Cantrips from other lists added by feats
    #[serde(default)]
    pub bonus_cantrips: Vec<String>,
    #[serde(default)]
    pub signature_spells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnateSpell {
    pub source: String,
    /// `None` while a choice grant has no valid pick
    pub spell_id: Option<String>,
    pub tradition: Tradition,
    pub frequency: InnateFrequency,
    pub dc: i32,
    pub attack: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatSlotUsage {
    pub available: u8,
    pub used: u8,
}

impl FeatSlotUsage {
    pub fn open(&self) -> u8 {
        self.available.saturating_sub(self.used)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamiliarStats {
    pub name: String,
    pub hit_points: i32,
    pub ability_capacity: u8,
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionStats {
    pub name: String,
    pub species_id: String,
    pub hit_points: i32,
    pub size: Size,
    pub speed: u16,
    pub vision: Vision,
    pub senses: Vec<Sense>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualCheck {
    pub ritual_id: String,
    /// Best primary skill for the check, if any
    pub skill: Option<Skill>,
    pub modifier: i32,
    /// Whether the character meets the minimum proficiency
    pub qualified: bool,
}

/// Every statistic derived from a character's choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSnapshot {
    pub level: u8,
    pub abilities: AbilityScores,
    pub key_ability: Option<Ability>,
    pub active_feats: Vec<ActiveFeat>,
    pub proficiencies: Proficiencies,
    pub lores: BTreeMap<String, ProficiencyRank>,
    pub skills: Vec<SkillEntry>,
    pub saves: BTreeMap<Save, StatEntry>,
    pub perception: StatEntry,
    pub initiative: i32,
    pub hit_points: i32,
    pub speed: i32,
    pub size: Size,
    pub languages: LanguageSummary,
    pub vision: Vision,
    pub senses: Vec<Sense>,
    pub defenses: Defenses,
    pub strikes: Vec<Strike>,
    pub spellcasting: Option<SpellcastingSummary>,
    pub innate_spells: Vec<InnateSpell>,
    pub feat_slots: BTreeMap<FeatCategory, FeatSlotUsage>,
    pub familiar: Option<FamiliarStats>,
    pub animal_companion: Option<CompanionStats>,
    pub rituals: Vec<RitualCheck>,
}

impl CharacterSnapshot {
    pub fn skill_rank(&self, skill: &SkillRef) -> ProficiencyRank {
        match skill {
            SkillRef::Core(skill) => self.proficiencies.rank(ProficiencyTarget::Skill(*skill)),
            SkillRef::Lore(topic) => self.lores.get(topic).copied().unwrap_or_default(),
        }
    }

    pub fn skill(&self, skill: &SkillRef) -> Option<&SkillEntry> {
        self.skills.iter().find(|s| &s.skill == skill)
    }

    pub fn save(&self, save: Save) -> StatEntry {
        self.saves.get(&save).copied().unwrap_or_default()
    }
}
