//! Proficiency ranks, degrees of success and attack penalties.
//!
//! PF2e uses a d20 + modifier vs DC system with four degrees of success.
//! Proficiency is level-dependent: a trained or better character adds
//! their level plus the rank bonus, an untrained one adds nothing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Pathfinder 2e proficiency ranks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyRank {
    /// Not trained
    #[default]
    Untrained,
    /// Basic training (+2 + level)
    Trained,
    /// Advanced training (+4 + level)
    Expert,
    /// Mastery (+6 + level)
    Master,
    /// Ultimate mastery (+8 + level)
    Legendary,
}

impl ProficiencyRank {
    /// Get the rank bonus (before adding level).
    pub fn rank_bonus(&self) -> i32 {
        match self {
            ProficiencyRank::Untrained => 0,
            ProficiencyRank::Trained => 2,
            ProficiencyRank::Expert => 4,
            ProficiencyRank::Master => 6,
            ProficiencyRank::Legendary => 8,
        }
    }

    /// Calculate full proficiency bonus including level.
    pub fn proficiency_bonus(&self, level: u8) -> i32 {
        match self {
            ProficiencyRank::Untrained => 0, // Untrained doesn't add level
            _ => self.rank_bonus() + level as i32,
        }
    }

    /// The next rank up, saturating at legendary.
    pub fn raise(self) -> Self {
        match self {
            ProficiencyRank::Untrained => ProficiencyRank::Trained,
            ProficiencyRank::Trained => ProficiencyRank::Expert,
            ProficiencyRank::Expert => ProficiencyRank::Master,
            ProficiencyRank::Master | ProficiencyRank::Legendary => ProficiencyRank::Legendary,
        }
    }

    /// Minimum character level at which a skill may be raised to this rank.
    pub fn skill_level_requirement(&self) -> u8 {
        match self {
            ProficiencyRank::Untrained | ProficiencyRank::Trained => 1,
            ProficiencyRank::Expert => 2,
            ProficiencyRank::Master => 7,
            ProficiencyRank::Legendary => 15,
        }
    }
}

impl fmt::Display for ProficiencyRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProficiencyRank::Untrained => "untrained",
            ProficiencyRank::Trained => "trained",
            ProficiencyRank::Expert => "expert",
            ProficiencyRank::Master => "master",
            ProficiencyRank::Legendary => "legendary",
        };
        f.write_str(name)
    }
}

impl FromStr for ProficiencyRank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "untrained" => Ok(ProficiencyRank::Untrained),
            "trained" => Ok(ProficiencyRank::Trained),
            "expert" => Ok(ProficiencyRank::Expert),
            "master" => Ok(ProficiencyRank::Master),
            "legendary" => Ok(ProficiencyRank::Legendary),
            other => Err(DomainError::parse(format!("Unknown proficiency rank: {}", other))),
        }
    }
}

/// Bonus an untrained check receives under Untrained Improvisation.
///
/// Half the character's level, or the full level from 7th level on.
pub fn untrained_improvisation_bonus(level: u8) -> i32 {
    if level >= 7 {
        level as i32
    } else {
        level as i32 / 2
    }
}

/// Four degrees of success in PF2e.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeOfSuccess {
    /// Beat DC by 10+ OR natural 20 that succeeds
    CriticalSuccess,
    /// Meet or beat DC
    Success,
    /// Below DC
    Failure,
    /// Miss DC by 10+ OR natural 1 that fails
    CriticalFailure,
}

impl DegreeOfSuccess {
    /// Upgrade the degree by one step (e.g., nat 20).
    pub fn upgrade(self) -> Self {
        match self {
            DegreeOfSuccess::CriticalFailure => DegreeOfSuccess::Failure,
            DegreeOfSuccess::Failure => DegreeOfSuccess::Success,
            DegreeOfSuccess::Success | DegreeOfSuccess::CriticalSuccess => {
                DegreeOfSuccess::CriticalSuccess
            }
        }
    }

    /// Downgrade the degree by one step (e.g., nat 1).
    pub fn downgrade(self) -> Self {
        match self {
            DegreeOfSuccess::CriticalSuccess => DegreeOfSuccess::Success,
            DegreeOfSuccess::Success => DegreeOfSuccess::Failure,
            DegreeOfSuccess::Failure | DegreeOfSuccess::CriticalFailure => {
                DegreeOfSuccess::CriticalFailure
            }
        }
    }
}

/// Determine success level for a PF2e roll.
pub fn determine_success(
    roll: i32,
    modifier: i32,
    dc: i32,
    is_nat_20: bool,
    is_nat_1: bool,
) -> DegreeOfSuccess {
    let diff = roll + modifier - dc;

    let base = if diff >= 0 {
        DegreeOfSuccess::Success
    } else {
        DegreeOfSuccess::Failure
    };

    // +/- 10 rule
    let adjusted = if diff >= 10 {
        base.upgrade()
    } else if diff <= -10 {
        base.downgrade()
    } else {
        base
    };

    if is_nat_20 {
        adjusted.upgrade()
    } else if is_nat_1 {
        adjusted.downgrade()
    } else {
        adjusted
    }
}

/// Multiple attack penalty for the nth attack in a turn (1-based).
pub fn multiple_attack_penalty(attack_number: u8, agile: bool) -> i32 {
    match (attack_number, agile) {
        (0 | 1, _) => 0,
        (2, false) => -5,
        (2, true) => -4,
        (_, false) => -10,
        (_, true) => -8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proficiency_bonus_adds_level_when_trained() {
        assert_eq!(ProficiencyRank::Untrained.proficiency_bonus(5), 0);
        assert_eq!(ProficiencyRank::Trained.proficiency_bonus(1), 3);
        assert_eq!(ProficiencyRank::Expert.proficiency_bonus(5), 9);
        assert_eq!(ProficiencyRank::Master.proficiency_bonus(10), 16);
        assert_eq!(ProficiencyRank::Legendary.proficiency_bonus(20), 28);
    }

    #[test]
    fn ranks_are_ordered() {
        assert!(ProficiencyRank::Untrained < ProficiencyRank::Trained);
        assert!(ProficiencyRank::Master < ProficiencyRank::Legendary);
        assert_eq!(ProficiencyRank::Legendary.raise(), ProficiencyRank::Legendary);
        assert_eq!(ProficiencyRank::Trained.raise(), ProficiencyRank::Expert);
    }

    #[test]
    fn rank_round_trips_through_text() {
        let rank: ProficiencyRank = "Master".parse().unwrap();
        assert_eq!(rank, ProficiencyRank::Master);
        assert_eq!(rank.to_string(), "master");
        assert!("grandmaster".parse::<ProficiencyRank>().is_err());
    }

    #[test]
    fn untrained_improvisation_scales_with_level() {
        assert_eq!(untrained_improvisation_bonus(1), 0);
        assert_eq!(untrained_improvisation_bonus(6), 3);
        assert_eq!(untrained_improvisation_bonus(7), 7);
    }

    #[test]
    fn degree_of_success_basic() {
        assert_eq!(determine_success(10, 5, 15, false, false), DegreeOfSuccess::Success);
        assert_eq!(determine_success(5, 5, 15, false, false), DegreeOfSuccess::Failure);
        assert_eq!(
            determine_success(15, 10, 15, false, false),
            DegreeOfSuccess::CriticalSuccess
        );
        assert_eq!(
            determine_success(2, 0, 15, false, false),
            DegreeOfSuccess::CriticalFailure
        );
    }

    #[test]
    fn natural_twenty_and_one_shift_degree() {
        // Nat 20 that would fail becomes a success
        assert_eq!(determine_success(20, 0, 25, true, false), DegreeOfSuccess::Success);
        // Nat 1 that would succeed becomes a failure
        assert_eq!(determine_success(1, 20, 15, false, true), DegreeOfSuccess::Failure);
    }

    #[test]
    fn multiple_attack_penalty_values() {
        assert_eq!(multiple_attack_penalty(1, false), 0);
        assert_eq!(multiple_attack_penalty(2, false), -5);
        assert_eq!(multiple_attack_penalty(3, false), -10);
        assert_eq!(multiple_attack_penalty(1, true), 0);
        assert_eq!(multiple_attack_penalty(2, true), -4);
        assert_eq!(multiple_attack_penalty(4, true), -8);
    }
}
