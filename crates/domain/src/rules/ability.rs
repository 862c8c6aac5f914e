//! Ability scores and the PF2e boost/flaw arithmetic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The six PF2e abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Str => "Strength",
            Ability::Dex => "Dexterity",
            Ability::Con => "Constitution",
            Ability::Int => "Intelligence",
            Ability::Wis => "Wisdom",
            Ability::Cha => "Charisma",
        }
    }

    fn index(&self) -> usize {
        match self {
            Ability::Str => 0,
            Ability::Dex => 1,
            Ability::Con => 2,
            Ability::Int => 3,
            Ability::Wis => 4,
            Ability::Cha => 5,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Ability::Str => "str",
            Ability::Dex => "dex",
            Ability::Con => "con",
            Ability::Int => "int",
            Ability::Wis => "wis",
            Ability::Cha => "cha",
        };
        f.write_str(code)
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "str" | "strength" => Ok(Ability::Str),
            "dex" | "dexterity" => Ok(Ability::Dex),
            "con" | "constitution" => Ok(Ability::Con),
            "int" | "intelligence" => Ok(Ability::Int),
            "wis" | "wisdom" => Ok(Ability::Wis),
            "cha" | "charisma" => Ok(Ability::Cha),
            other => Err(DomainError::parse(format!("Unknown ability: {}", other))),
        }
    }
}

/// Score at which a boost only adds +1.
pub const BOOST_SOFT_CAP: i32 = 18;

/// Ability modifier for a score: floor((score - 10) / 2).
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// The six ability scores of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores([i32; 6]);

impl Default for AbilityScores {
    fn default() -> Self {
        Self([10; 6])
    }
}

impl AbilityScores {
    pub fn score(&self, ability: Ability) -> i32 {
        self.0[ability.index()]
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.score(ability))
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        self.0[ability.index()] = score;
    }

    /// Apply a boost: +2, or +1 once the score is already 18 or more.
    pub fn boost(&mut self, ability: Ability) {
        let current = self.score(ability);
        let step = if current < BOOST_SOFT_CAP { 2 } else { 1 };
        self.set(ability, current + step);
    }

    /// Apply a flaw: -2.
    pub fn flaw(&mut self, ability: Ability) {
        let current = self.score(ability);
        self.set(ability, current - 2);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.iter().map(move |a| (*a, self.score(*a)))
    }
}
