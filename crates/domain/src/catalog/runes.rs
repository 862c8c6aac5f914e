//! Rune catalog
//!
//! Fundamental and property runes for weapons and armor, with item level
//! and price. Potency and striking/resilient runes are "fundamental"; a
//! weapon or armor can carry as many property runes as its potency value.

use serde::Serialize;

/// Which kind of item a rune is etched onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuneSlot {
    Weapon,
    Armor,
}

/// What a rune does mechanically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "tier", rename_all = "snake_case")]
pub enum RuneKind {
    /// Item bonus to attack rolls or AC equal to the tier
    Potency(u8),
    /// Extra weapon damage dice equal to the tier
    Striking(u8),
    /// Item bonus to saves equal to the tier
    Resilient(u8),
    Property,
}

/// Extra damage added by a property rune on a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuneDamage {
    pub dice: u8,
    pub die: u8,
    pub damage_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rune {
    pub id: &'static str,
    pub name: &'static str,
    pub level: u8,
    pub price_gp: u32,
    pub slot: RuneSlot,
    pub kind: RuneKind,
    pub damage: Option<RuneDamage>,
}

impl Rune {
    pub fn is_fundamental(&self) -> bool {
        !matches!(self.kind, RuneKind::Property)
    }
}

const fn fundamental(
    id: &'static str,
    name: &'static str,
    level: u8,
    price_gp: u32,
    slot: RuneSlot,
    kind: RuneKind,
) -> Rune {
    Rune {
        id,
        name,
        level,
        price_gp,
        slot,
        kind,
        damage: None,
    }
}

const fn property(
    id: &'static str,
    name: &'static str,
    level: u8,
    price_gp: u32,
    slot: RuneSlot,
    damage: Option<RuneDamage>,
) -> Rune {
    Rune {
        id,
        name,
        level,
        price_gp,
        slot,
        kind: RuneKind::Property,
        damage,
    }
}

const fn energy(damage_type: &'static str) -> Option<RuneDamage> {
    Some(RuneDamage {
        dice: 1,
        die: 6,
        damage_type,
    })
}

// ============================================================================
// Catalog
// ============================================================================

pub const RUNES: &[Rune] = &[
    // Weapon fundamentals
    fundamental("weapon-potency-1", "+1 Weapon Potency", 2, 35, RuneSlot::Weapon, RuneKind::Potency(1)),
    fundamental("weapon-potency-2", "+2 Weapon Potency", 10, 935, RuneSlot::Weapon, RuneKind::Potency(2)),
    fundamental("weapon-potency-3", "+3 Weapon Potency", 16, 8935, RuneSlot::Weapon, RuneKind::Potency(3)),
    fundamental("striking", "Striking", 4, 65, RuneSlot::Weapon, RuneKind::Striking(1)),
    fundamental("greater-striking", "Greater Striking", 12, 1065, RuneSlot::Weapon, RuneKind::Striking(2)),
    fundamental("major-striking", "Major Striking", 19, 31065, RuneSlot::Weapon, RuneKind::Striking(3)),
    // Armor fundamentals
    fundamental("armor-potency-1", "+1 Armor Potency", 5, 160, RuneSlot::Armor, RuneKind::Potency(1)),
    fundamental("armor-potency-2", "+2 Armor Potency", 11, 1060, RuneSlot::Armor, RuneKind::Potency(2)),
    fundamental("armor-potency-3", "+3 Armor Potency", 18, 20560, RuneSlot::Armor, RuneKind::Potency(3)),
    fundamental("resilient", "Resilient", 8, 340, RuneSlot::Armor, RuneKind::Resilient(1)),
    fundamental("greater-resilient", "Greater Resilient", 14, 3440, RuneSlot::Armor, RuneKind::Resilient(2)),
    fundamental("major-resilient", "Major Resilient", 20, 49440, RuneSlot::Armor, RuneKind::Resilient(3)),
    // Weapon property runes
    property("returning", "Returning", 3, 55, RuneSlot::Weapon, None),
    property("ghost-touch", "Ghost Touch", 4, 75, RuneSlot::Weapon, None),
    property("disrupting", "Disrupting", 5, 150, RuneSlot::Weapon, energy("vitality")),
    property("shifting", "Shifting", 6, 225, RuneSlot::Weapon, None),
    property("wounding", "Wounding", 7, 340, RuneSlot::Weapon, energy("bleed")),
    property("corrosive", "Corrosive", 8, 500, RuneSlot::Weapon, energy("acid")),
    property("flaming", "Flaming", 8, 500, RuneSlot::Weapon, energy("fire")),
    property("frost", "Frost", 8, 500, RuneSlot::Weapon, energy("cold")),
    property("shock", "Shock", 8, 500, RuneSlot::Weapon, energy("electricity")),
    property("thundering", "Thundering", 8, 500, RuneSlot::Weapon, energy("sonic")),
    property("grievous", "Grievous", 9, 700, RuneSlot::Weapon, None),
    property("holy", "Holy", 11, 1400, RuneSlot::Weapon, energy("spirit")),
    property("unholy", "Unholy", 11, 1400, RuneSlot::Weapon, energy("spirit")),
    property("keen", "Keen", 13, 3000, RuneSlot::Weapon, None),
    property("speed", "Speed", 16, 10000, RuneSlot::Weapon, None),
    property("vorpal", "Vorpal", 17, 15000, RuneSlot::Weapon, None),
    // Armor property runes
    property("slick", "Slick", 5, 45, RuneSlot::Armor, None),
    property("shadow", "Shadow", 5, 55, RuneSlot::Armor, None),
    property("glamered", "Glamered", 5, 140, RuneSlot::Armor, None),
    property("ready", "Ready", 6, 200, RuneSlot::Armor, None),
    property("energy-resistant", "Energy-Resistant", 8, 420, RuneSlot::Armor, None),
    property("invisibility", "Invisibility", 8, 500, RuneSlot::Armor, None),
    property("fortification", "Fortification", 12, 2000, RuneSlot::Armor, None),
];

// ============================================================================
// Lookups
// ============================================================================

/// Get a rune by id
pub fn rune_by_id(id: &str) -> Option<&'static Rune> {
    RUNES.iter().find(|r| r.id == id)
}

/// All property runes that fit a slot, ordered by level
pub fn property_runes_for(slot: RuneSlot) -> Vec<&'static Rune> {
    let mut runes: Vec<_> = RUNES
        .iter()
        .filter(|r| r.slot == slot && r.kind == RuneKind::Property)
        .collect();
    runes.sort_by_key(|r| (r.level, r.id));
    runes
}

/// Runes a character of the given level could craft or buy
pub fn runes_up_to_level(level: u8) -> Vec<&'static Rune> {
    RUNES.iter().filter(|r| r.level <= level).collect()
}

/// Number of property runes an item with this potency can hold
pub fn max_property_runes(potency: u8) -> usize {
    potency as usize
}

/// Weapon damage dice granted by a striking rune (1 without one)
pub fn striking_dice(rune: Option<&Rune>) -> u8 {
    match rune.map(|r| r.kind) {
        Some(RuneKind::Striking(tier)) => 1 + tier,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rune_ids_are_unique() {
        let mut ids: Vec<_> = RUNES.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), RUNES.len());
    }

    #[test]
    fn lookup_by_id() {
        let striking = rune_by_id("greater-striking").unwrap();
        assert_eq!(striking.level, 12);
        assert!(striking.is_fundamental());
        assert!(rune_by_id("mythic-striking").is_none());
    }

    #[test]
    fn property_runes_are_filtered_by_slot() {
        let armor = property_runes_for(RuneSlot::Armor);
        assert!(armor.iter().all(|r| r.slot == RuneSlot::Armor));
        assert!(armor.iter().any(|r| r.id == "slick"));
        assert!(!armor.iter().any(|r| r.id == "flaming"));
        assert!(armor.windows(2).all(|w| w[0].level <= w[1].level));
    }

    #[test]
    fn striking_dice_by_tier() {
        assert_eq!(striking_dice(None), 1);
        assert_eq!(striking_dice(rune_by_id("striking")), 2);
        assert_eq!(striking_dice(rune_by_id("major-striking")), 4);
        // A non-striking rune adds nothing
        assert_eq!(striking_dice(rune_by_id("flaming")), 1);
    }

    #[test]
    fn low_level_runes() {
        let runes = runes_up_to_level(3);
        let ids: Vec<_> = runes.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["weapon-potency-1", "returning"]);
        assert_eq!(max_property_runes(2), 2);
    }
}
