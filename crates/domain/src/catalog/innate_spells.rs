//! Innate spells granted by heritages and ancestry feats.
//!
//! A grant either names a fixed spell or lets the player pick one that
//! matches a filter (tradition + rank, rank 0 meaning cantrip).

use serde::{Deserialize, Serialize};

use crate::rules::Tradition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnateFrequency {
    AtWill,
    OncePerDay,
}

/// Constraint on a player-chosen innate spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InnateChoice {
    pub tradition: Tradition,
    pub rank: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InnateSpellKind {
    Fixed { spell_id: &'static str },
    Choice(InnateChoice),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InnateSpellGrant {
    /// Heritage or feat id that grants the spell
    pub source: &'static str,
    pub tradition: Tradition,
    pub frequency: InnateFrequency,
    pub spell: InnateSpellKind,
}

impl InnateSpellGrant {
    pub fn is_choice(&self) -> bool {
        matches!(self.spell, InnateSpellKind::Choice(_))
    }
}

pub const INNATE_SPELLS: &[InnateSpellGrant] = &[
    InnateSpellGrant {
        source: "seer-elf",
        tradition: Tradition::Arcane,
        frequency: InnateFrequency::AtWill,
        spell: InnateSpellKind::Fixed {
            spell_id: "detect-magic",
        },
    },
    InnateSpellGrant {
        source: "fey-touched-gnome",
        tradition: Tradition::Primal,
        frequency: InnateFrequency::AtWill,
        spell: InnateSpellKind::Choice(InnateChoice {
            tradition: Tradition::Primal,
            rank: 0,
        }),
    },
    InnateSpellGrant {
        source: "first-world-magic",
        tradition: Tradition::Primal,
        frequency: InnateFrequency::AtWill,
        spell: InnateSpellKind::Choice(InnateChoice {
            tradition: Tradition::Primal,
            rank: 0,
        }),
    },
    InnateSpellGrant {
        source: "otherworldly-magic",
        tradition: Tradition::Arcane,
        frequency: InnateFrequency::AtWill,
        spell: InnateSpellKind::Choice(InnateChoice {
            tradition: Tradition::Arcane,
            rank: 0,
        }),
    },
    InnateSpellGrant {
        source: "otherworldly-acumen",
        tradition: Tradition::Arcane,
        frequency: InnateFrequency::OncePerDay,
        spell: InnateSpellKind::Choice(InnateChoice {
            tradition: Tradition::Arcane,
            rank: 2,
        }),
    },
    InnateSpellGrant {
        source: "first-world-adept",
        tradition: Tradition::Primal,
        frequency: InnateFrequency::OncePerDay,
        spell: InnateSpellKind::Fixed {
            spell_id: "faerie-fire",
        },
    },
    InnateSpellGrant {
        source: "first-world-adept",
        tradition: Tradition::Primal,
        frequency: InnateFrequency::OncePerDay,
        spell: InnateSpellKind::Fixed {
            spell_id: "invisibility",
        },
    },
];

/// Grants that come from one heritage or feat
pub fn innate_spells_from(source: &str) -> Vec<&'static InnateSpellGrant> {
    INNATE_SPELLS.iter().filter(|g| g.source == source).collect()
}

/// Every heritage/feat id that grants innate spells
pub fn innate_sources() -> Vec<&'static str> {
    let mut sources: Vec<_> = INNATE_SPELLS.iter().map(|g| g.source).collect();
    sources.sort();
    sources.dedup();
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_world_adept_grants_two_fixed_spells() {
        let grants = innate_spells_from("first-world-adept");
        assert_eq!(grants.len(), 2);
        assert!(grants.iter().all(|g| !g.is_choice()));
        assert!(grants
            .iter()
            .all(|g| g.frequency == InnateFrequency::OncePerDay));
    }

    #[test]
    fn unknown_source_grants_nothing() {
        assert!(innate_spells_from("toughness").is_empty());
    }

    #[test]
    fn sources_are_deduplicated() {
        let sources = innate_sources();
        assert_eq!(
            sources.iter().filter(|s| **s == "first-world-adept").count(),
            1
        );
        assert!(sources.contains(&"seer-elf"));
    }
}
