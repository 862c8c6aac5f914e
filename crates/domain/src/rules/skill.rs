//! Skills, lore skills and saving throws.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ability::Ability;
use crate::error::DomainError;

/// The sixteen core PF2e skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Acrobatics,
    Arcana,
    Athletics,
    Crafting,
    Deception,
    Diplomacy,
    Intimidation,
    Medicine,
    Nature,
    Occultism,
    Performance,
    Religion,
    Society,
    Stealth,
    Survival,
    Thievery,
}

impl Skill {
    pub const ALL: [Skill; 16] = [
        Skill::Acrobatics,
        Skill::Arcana,
        Skill::Athletics,
        Skill::Crafting,
        Skill::Deception,
        Skill::Diplomacy,
        Skill::Intimidation,
        Skill::Medicine,
        Skill::Nature,
        Skill::Occultism,
        Skill::Performance,
        Skill::Religion,
        Skill::Society,
        Skill::Stealth,
        Skill::Survival,
        Skill::Thievery,
    ];

    /// Key ability for the skill.
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Acrobatics | Skill::Stealth | Skill::Thievery => Ability::Dex,
            Skill::Athletics => Ability::Str,
            Skill::Arcana | Skill::Crafting | Skill::Occultism | Skill::Society => Ability::Int,
            Skill::Medicine | Skill::Nature | Skill::Religion | Skill::Survival => Ability::Wis,
            Skill::Deception | Skill::Diplomacy | Skill::Intimidation | Skill::Performance => {
                Ability::Cha
            }
        }
    }

    /// Whether the armor check penalty applies to this skill.
    pub fn takes_armor_check_penalty(&self) -> bool {
        matches!(self.ability(), Ability::Str | Ability::Dex)
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = format!("{:?}", self).to_lowercase();
        f.write_str(&name)
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Skill::ALL
            .iter()
            .copied()
            .find(|skill| skill.to_string() == wanted)
            .ok_or_else(|| DomainError::parse(format!("Unknown skill: {}", s)))
    }
}

/// A core skill or a named lore.
///
/// Text form is the skill name (`"athletics"`) or `"lore:<topic>"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SkillRef {
    Core(Skill),
    Lore(String),
}

impl SkillRef {
    pub fn lore(topic: impl Into<String>) -> Self {
        SkillRef::Lore(topic.into().trim().to_lowercase())
    }

    pub fn ability(&self) -> Ability {
        match self {
            SkillRef::Core(skill) => skill.ability(),
            SkillRef::Lore(_) => Ability::Int,
        }
    }
}

impl From<Skill> for SkillRef {
    fn from(skill: Skill) -> Self {
        SkillRef::Core(skill)
    }
}

impl fmt::Display for SkillRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillRef::Core(skill) => write!(f, "{}", skill),
            SkillRef::Lore(topic) => write!(f, "lore:{}", topic),
        }
    }
}

impl FromStr for SkillRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once(':') {
            Some((prefix, topic)) if prefix.eq_ignore_ascii_case("lore") => {
                if topic.trim().is_empty() {
                    Err(DomainError::parse("Lore skill needs a topic"))
                } else {
                    Ok(SkillRef::lore(topic))
                }
            }
            _ => s.parse::<Skill>().map(SkillRef::Core),
        }
    }
}

impl TryFrom<String> for SkillRef {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SkillRef> for String {
    fn from(value: SkillRef) -> Self {
        value.to_string()
    }
}

/// The three saving throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Save {
    Fortitude,
    Reflex,
    Will,
}

impl Save {
    pub const ALL: [Save; 3] = [Save::Fortitude, Save::Reflex, Save::Will];

    pub fn ability(&self) -> Ability {
        match self {
            Save::Fortitude => Ability::Con,
            Save::Reflex => Ability::Dex,
            Save::Will => Ability::Wis,
        }
    }
}

impl FromStr for Save {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fortitude" | "fort" => Ok(Save::Fortitude),
            "reflex" | "ref" => Ok(Save::Reflex),
            "will" => Ok(Save::Will),
            other => Err(DomainError::parse(format!("Unknown save: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_abilities_correct() {
        assert_eq!(Skill::Acrobatics.ability(), Ability::Dex);
        assert_eq!(Skill::Athletics.ability(), Ability::Str);
        assert_eq!(Skill::Arcana.ability(), Ability::Int);
        assert_eq!(Skill::Diplomacy.ability(), Ability::Cha);
        assert_eq!(Skill::Medicine.ability(), Ability::Wis);
    }

    #[test]
    fn armor_check_penalty_only_for_str_and_dex() {
        assert!(Skill::Stealth.takes_armor_check_penalty());
        assert!(Skill::Athletics.takes_armor_check_penalty());
        assert!(!Skill::Arcana.takes_armor_check_penalty());
    }

    #[test]
    fn skill_ref_parses_lore_topics() {
        let lore: SkillRef = "Lore:Warfare".parse().unwrap();
        assert_eq!(lore, SkillRef::Lore("warfare".to_string()));
        assert_eq!(lore.ability(), Ability::Int);
        assert_eq!(lore.to_string(), "lore:warfare");
        assert!("lore:".parse::<SkillRef>().is_err());
    }

    #[test]
    fn skill_ref_serializes_as_plain_text() {
        let json = serde_json::to_string(&SkillRef::Core(Skill::Stealth)).unwrap();
        assert_eq!(json, "\"stealth\"");
        let back: SkillRef = serde_json::from_str("\"lore:sailing\"").unwrap();
        assert_eq!(back, SkillRef::lore("sailing"));
    }

    #[test]
    fn save_abilities() {
        assert_eq!(Save::Fortitude.ability(), Ability::Con);
        assert_eq!("ref".parse::<Save>().unwrap(), Save::Reflex);
    }
}
