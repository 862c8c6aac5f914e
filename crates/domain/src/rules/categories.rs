//! Equipment categories, magical traditions and proficiency targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::skill::{Save, Skill};
use crate::error::DomainError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ArmorCategory {
    #[default]
    Unarmored,
    Light,
    Medium,
    Heavy,
}

impl ArmorCategory {
    pub const ALL: [ArmorCategory; 4] = [
        ArmorCategory::Unarmored,
        ArmorCategory::Light,
        ArmorCategory::Medium,
        ArmorCategory::Heavy,
    ];

    /// The next heavier category (used by Armor Proficiency).
    pub fn heavier(self) -> Option<Self> {
        match self {
            ArmorCategory::Unarmored => Some(ArmorCategory::Light),
            ArmorCategory::Light => Some(ArmorCategory::Medium),
            ArmorCategory::Medium => Some(ArmorCategory::Heavy),
            ArmorCategory::Heavy => None,
        }
    }
}

impl FromStr for ArmorCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unarmored" => Ok(ArmorCategory::Unarmored),
            "light" => Ok(ArmorCategory::Light),
            "medium" => Ok(ArmorCategory::Medium),
            "heavy" => Ok(ArmorCategory::Heavy),
            other => Err(DomainError::parse(format!("Unknown armor category: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponCategory {
    Unarmed,
    Simple,
    Martial,
    Advanced,
}

impl WeaponCategory {
    pub const ALL: [WeaponCategory; 4] = [
        WeaponCategory::Unarmed,
        WeaponCategory::Simple,
        WeaponCategory::Martial,
        WeaponCategory::Advanced,
    ];

    /// Category used for proficiency under ancestral weapon familiarity:
    /// martial counts as simple and advanced as martial.
    pub fn familiar(self) -> Self {
        match self {
            WeaponCategory::Martial => WeaponCategory::Simple,
            WeaponCategory::Advanced => WeaponCategory::Martial,
            other => other,
        }
    }
}

/// Magical tradition of a spell list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tradition {
    Arcane,
    Divine,
    Occult,
    Primal,
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tradition::Arcane => "arcane",
            Tradition::Divine => "divine",
            Tradition::Occult => "occult",
            Tradition::Primal => "primal",
        };
        f.write_str(name)
    }
}

impl FromStr for Tradition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arcane" => Ok(Tradition::Arcane),
            "divine" => Ok(Tradition::Divine),
            "occult" => Ok(Tradition::Occult),
            "primal" => Ok(Tradition::Primal),
            other => Err(DomainError::parse(format!("Unknown tradition: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastingStyle {
    Prepared,
    Spontaneous,
}

/// Anything a class, specialization or feat can grant a rank in.
///
/// Lore skills are handled separately since their topics are free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ProficiencyTarget {
    Perception,
    Save(Save),
    Skill(Skill),
    Armor(ArmorCategory),
    Weapon(WeaponCategory),
    ClassDc,
    Spellcasting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_familiarity_downgrades_category() {
        assert_eq!(WeaponCategory::Martial.familiar(), WeaponCategory::Simple);
        assert_eq!(WeaponCategory::Advanced.familiar(), WeaponCategory::Martial);
        assert_eq!(WeaponCategory::Simple.familiar(), WeaponCategory::Simple);
    }

    #[test]
    fn armor_category_parses_case_insensitively() {
        assert_eq!("Medium".parse::<ArmorCategory>().unwrap(), ArmorCategory::Medium);
        assert!("plate".parse::<ArmorCategory>().is_err());
    }

    #[test]
    fn armor_heavier_chain_ends_at_heavy() {
        assert_eq!(ArmorCategory::Unarmored.heavier(), Some(ArmorCategory::Light));
        assert_eq!(ArmorCategory::Heavy.heavier(), None);
    }

    #[test]
    fn proficiency_target_json_shape() {
        let target = ProficiencyTarget::Save(Save::Will);
        let json = serde_json::to_value(target).unwrap();
        assert_eq!(json, serde_json::json!({"type": "save", "value": "will"}));

        let perception: ProficiencyTarget =
            serde_json::from_value(serde_json::json!({"type": "perception"})).unwrap();
        assert_eq!(perception, ProficiencyTarget::Perception);
    }
}
