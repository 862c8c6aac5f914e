//! Worn and wielded equipment with runes and precious materials.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    grade_info, material_by_id, max_property_runes, rune_by_id, ItemKind, MaterialGrade, Rune,
    RuneKind, RuneSlot,
};
use crate::error::DomainError;
use crate::rules::{ArmorCategory, WeaponCategory};

/// A precious material and its grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialChoice {
    pub material_id: String,
    pub grade: MaterialGrade,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub name: String,
    pub category: WeaponCategory,
    /// Die size of one weapon damage die (4, 6, 8, ...)
    pub damage_die: u8,
    pub damage_type: String,
    #[serde(default)]
    pub ranged: bool,
    /// Weapon traits: `agile`, `finesse`, `thrown`, ancestry names, ...
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub runes: Vec<String>,
    #[serde(default)]
    pub material: Option<MaterialChoice>,
}

impl Weapon {
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    pub fn potency(&self) -> u8 {
        potency_of(&self.runes)
    }

    pub fn striking_rune(&self) -> Option<&'static Rune> {
        resolved(&self.runes).find(|r| matches!(r.kind, RuneKind::Striking(_)))
    }

    pub fn property_runes(&self) -> Vec<&'static Rune> {
        property_runes(&self.runes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Armor {
    pub name: String,
    pub category: ArmorCategory,
    pub ac_bonus: i32,
    #[serde(default)]
    pub dex_cap: Option<i32>,
    /// Armor check penalty as a negative number
    #[serde(default)]
    pub check_penalty: i32,
    /// Speed penalty as a negative number
    #[serde(default)]
    pub speed_penalty: i32,
    /// Strength score that removes the check penalty and reduces the speed penalty
    #[serde(default)]
    pub strength: Option<i32>,
    #[serde(default)]
    pub runes: Vec<String>,
    #[serde(default)]
    pub material: Option<MaterialChoice>,
}

impl Armor {
    pub fn potency(&self) -> u8 {
        potency_of(&self.runes)
    }

    pub fn resilient_tier(&self) -> u8 {
        resolved(&self.runes)
            .find_map(|r| match r.kind {
                RuneKind::Resilient(tier) => Some(tier),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn property_runes(&self) -> Vec<&'static Rune> {
        property_runes(&self.runes)
    }

    /// Whether a Strength score meets the armor's requirement.
    pub fn strength_met(&self, strength: i32) -> bool {
        self.strength.map_or(true, |required| strength >= required)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shield {
    pub name: String,
    pub ac_bonus: i32,
    pub hardness: i32,
    pub hit_points: i32,
    #[serde(default)]
    pub raised: bool,
    #[serde(default)]
    pub material: Option<MaterialChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub armor: Option<Armor>,
    #[serde(default)]
    pub shield: Option<Shield>,
}

impl Equipment {
    /// Check runes and materials on every item.
    pub fn validate(&self) -> Result<(), DomainError> {
        for weapon in &self.weapons {
            validate_runes(&weapon.name, RuneSlot::Weapon, &weapon.runes)?;
            validate_material(&weapon.name, ItemKind::Weapon, weapon.material.as_ref())?;
        }
        if let Some(armor) = &self.armor {
            validate_runes(&armor.name, RuneSlot::Armor, &armor.runes)?;
            validate_material(&armor.name, ItemKind::Armor, armor.material.as_ref())?;
        }
        if let Some(shield) = &self.shield {
            validate_material(&shield.name, ItemKind::Shield, shield.material.as_ref())?;
        }
        Ok(())
    }
}

fn resolved(ids: &[String]) -> impl Iterator<Item = &'static Rune> + '_ {
    ids.iter().filter_map(|id| rune_by_id(id))
}

fn potency_of(ids: &[String]) -> u8 {
    resolved(ids)
        .find_map(|r| match r.kind {
            RuneKind::Potency(tier) => Some(tier),
            _ => None,
        })
        .unwrap_or(0)
}

fn property_runes(ids: &[String]) -> Vec<&'static Rune> {
    resolved(ids)
        .filter(|r| matches!(r.kind, RuneKind::Property))
        .collect()
}

fn validate_runes(item: &str, slot: RuneSlot, ids: &[String]) -> Result<(), DomainError> {
    let mut seen: Vec<&str> = Vec::with_capacity(ids.len());
    let mut potency = 0u8;
    let mut potency_count = 0;
    let mut secondary_count = 0;
    let mut property_count = 0;

    for id in ids {
        if seen.contains(&id.as_str()) {
            return Err(DomainError::constraint(format!(
                "{}: rune {} etched twice",
                item, id
            )));
        }
        seen.push(id);

        let rune = rune_by_id(id).ok_or_else(|| DomainError::not_found("Rune", id.clone()))?;
        if rune.slot != slot {
            return Err(DomainError::constraint(format!(
                "{}: {} cannot be etched onto this item",
                item, rune.name
            )));
        }
        match rune.kind {
            RuneKind::Potency(tier) => {
                potency = tier;
                potency_count += 1;
            }
            RuneKind::Striking(_) | RuneKind::Resilient(_) => secondary_count += 1,
            RuneKind::Property => property_count += 1,
        }
    }

    if potency_count > 1 || secondary_count > 1 {
        return Err(DomainError::constraint(format!(
            "{}: only one rune of each fundamental kind is allowed",
            item
        )));
    }
    let allowed = max_property_runes(potency);
    if property_count > allowed {
        return Err(DomainError::constraint(format!(
            "{}: {} property runes exceed the potency limit of {}",
            item, property_count, allowed
        )));
    }
    Ok(())
}

fn validate_material(
    item: &str,
    kind: ItemKind,
    choice: Option<&MaterialChoice>,
) -> Result<(), DomainError> {
    let Some(choice) = choice else {
        return Ok(());
    };
    let material = material_by_id(&choice.material_id)
        .ok_or_else(|| DomainError::not_found("Material", choice.material_id.clone()))?;
    if !material.accepts(kind) {
        return Err(DomainError::constraint(format!(
            "{}: {} cannot be used for this item",
            item, material.name
        )));
    }
    if grade_info(material, kind, choice.grade).is_none() {
        return Err(DomainError::constraint(format!(
            "{}: {} has no {} grade",
            item, material.name, choice.grade
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn longsword(runes: &[&str]) -> Weapon {
        Weapon {
            name: "Longsword".to_string(),
            category: WeaponCategory::Martial,
            damage_die: 8,
            damage_type: "slashing".to_string(),
            ranged: false,
            traits: vec!["versatile p".to_string()],
            runes: runes.iter().map(|r| r.to_string()).collect(),
            material: None,
        }
    }

    fn equipped(weapon: Weapon) -> Equipment {
        Equipment {
            weapons: vec![weapon],
            ..Default::default()
        }
    }

    #[test]
    fn potency_limits_property_runes() {
        let ok = equipped(longsword(&["weapon-potency-1", "striking", "flaming"]));
        assert!(ok.validate().is_ok());

        let too_many = equipped(longsword(&["weapon-potency-1", "flaming", "frost"]));
        assert!(matches!(
            too_many.validate(),
            Err(DomainError::Constraint(_))
        ));
    }

    #[test]
    fn property_runes_need_potency() {
        let eq = equipped(longsword(&["flaming"]));
        assert!(matches!(eq.validate(), Err(DomainError::Constraint(_))));
    }

    #[test]
    fn armor_runes_rejected_on_weapons() {
        let eq = equipped(longsword(&["armor-potency-1"]));
        assert!(matches!(eq.validate(), Err(DomainError::Constraint(_))));
    }

    #[test]
    fn duplicate_and_unknown_runes_rejected() {
        let dup = equipped(longsword(&["weapon-potency-2", "flaming", "flaming"]));
        assert!(matches!(dup.validate(), Err(DomainError::Constraint(_))));

        let unknown = equipped(longsword(&["mystery-rune"]));
        assert!(matches!(unknown.validate(), Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn two_potency_runes_rejected() {
        let eq = equipped(longsword(&["weapon-potency-1", "weapon-potency-2"]));
        assert!(matches!(eq.validate(), Err(DomainError::Constraint(_))));
    }

    #[test]
    fn weapon_rune_accessors() {
        let sword = longsword(&["weapon-potency-2", "greater-striking", "flaming", "frost"]);
        assert_eq!(sword.potency(), 2);
        assert_eq!(sword.striking_rune().map(|r| r.id), Some("greater-striking"));
        assert_eq!(sword.property_runes().len(), 2);
    }

    #[test]
    fn dragonhide_cannot_make_weapons() {
        let mut sword = longsword(&[]);
        sword.material = Some(MaterialChoice {
            material_id: "dragonhide".to_string(),
            grade: MaterialGrade::Standard,
        });
        assert!(matches!(
            equipped(sword).validate(),
            Err(DomainError::Constraint(_))
        ));
    }

    #[test]
    fn armor_strength_requirement() {
        let armor = Armor {
            name: "Full Plate".to_string(),
            category: ArmorCategory::Heavy,
            ac_bonus: 6,
            dex_cap: Some(0),
            check_penalty: -3,
            speed_penalty: -10,
            strength: Some(18),
            runes: vec!["armor-potency-1".to_string(), "resilient".to_string()],
            material: None,
        };
        assert!(armor.strength_met(18));
        assert!(!armor.strength_met(16));
        assert_eq!(armor.potency(), 1);
        assert_eq!(armor.resilient_tier(), 1);
    }
}
