//! Precious material catalog
//!
//! Each material lists the grades it comes in per item kind, with the
//! item level and price of a standard item made of it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialGrade {
    Low,
    Standard,
    High,
}

impl FromStr for MaterialGrade {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "low-grade" => Ok(MaterialGrade::Low),
            "standard" | "standard-grade" => Ok(MaterialGrade::Standard),
            "high" | "high-grade" => Ok(MaterialGrade::High),
            other => Err(DomainError::parse(format!("Unknown material grade: {}", other))),
        }
    }
}

impl fmt::Display for MaterialGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaterialGrade::Low => "low",
            MaterialGrade::Standard => "standard",
            MaterialGrade::High => "high",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Shield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeInfo {
    pub grade: MaterialGrade,
    pub kind: ItemKind,
    pub level: u8,
    pub price_gp: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Material {
    pub id: &'static str,
    pub name: &'static str,
    /// Hardness of a standard-grade shield made of the material
    pub hardness: u8,
    pub grades: &'static [GradeInfo],
}

impl Material {
    pub fn accepts(&self, kind: ItemKind) -> bool {
        self.grades.iter().any(|g| g.kind == kind)
    }
}

const fn grade(grade: MaterialGrade, kind: ItemKind, level: u8, price_gp: u32) -> GradeInfo {
    GradeInfo {
        grade,
        kind,
        level,
        price_gp,
    }
}

use ItemKind::{Armor, Shield, Weapon};
use MaterialGrade::{High, Low, Standard};

pub const MATERIALS: &[Material] = &[
    Material {
        id: "adamantine",
        name: "Adamantine",
        hardness: 10,
        grades: &[
            grade(Standard, Weapon, 8, 350),
            grade(High, Weapon, 16, 6000),
            grade(Standard, Armor, 12, 1600),
            grade(High, Armor, 19, 32000),
            grade(Standard, Shield, 8, 440),
            grade(High, Shield, 16, 8800),
        ],
    },
    Material {
        id: "cold-iron",
        name: "Cold Iron",
        hardness: 5,
        grades: &[
            grade(Low, Weapon, 2, 40),
            grade(Standard, Weapon, 10, 880),
            grade(High, Weapon, 16, 9000),
            grade(Low, Armor, 5, 140),
            grade(Standard, Armor, 11, 1200),
            grade(High, Armor, 18, 20000),
            grade(Low, Shield, 2, 34),
            grade(Standard, Shield, 7, 340),
        ],
    },
    Material {
        id: "silver",
        name: "Silver",
        hardness: 3,
        grades: &[
            grade(Low, Weapon, 2, 40),
            grade(Standard, Weapon, 10, 880),
            grade(High, Weapon, 16, 9000),
            grade(Low, Armor, 5, 140),
            grade(Standard, Armor, 11, 1200),
            grade(High, Armor, 18, 20000),
            grade(Low, Shield, 2, 34),
            grade(Standard, Shield, 7, 340),
        ],
    },
    Material {
        id: "dawnsilver",
        name: "Dawnsilver",
        hardness: 5,
        grades: &[
            grade(Standard, Weapon, 8, 500),
            grade(High, Weapon, 16, 8000),
            grade(Standard, Armor, 12, 1600),
            grade(High, Armor, 20, 32000),
            grade(Standard, Shield, 8, 440),
            grade(High, Shield, 16, 8800),
        ],
    },
    Material {
        id: "duskwood",
        name: "Duskwood",
        hardness: 5,
        grades: &[
            grade(Standard, Weapon, 8, 350),
            grade(High, Weapon, 16, 6000),
            grade(Standard, Armor, 12, 1600),
            grade(High, Armor, 19, 32000),
            grade(Standard, Shield, 8, 440),
            grade(High, Shield, 16, 8800),
        ],
    },
    Material {
        id: "dragonhide",
        name: "Dragonhide",
        hardness: 4,
        grades: &[
            grade(Standard, Armor, 12, 1600),
            grade(High, Armor, 19, 32000),
            grade(Standard, Shield, 8, 440),
            grade(High, Shield, 16, 8800),
        ],
    },
    Material {
        id: "orichalcum",
        name: "Orichalcum",
        hardness: 16,
        grades: &[
            grade(High, Weapon, 17, 10000),
            grade(High, Armor, 20, 55000),
            grade(High, Shield, 17, 10000),
        ],
    },
];

/// Get a material by id
pub fn material_by_id(id: &str) -> Option<&'static Material> {
    MATERIALS.iter().find(|m| m.id == id)
}

/// Materials that can be used for an item kind
pub fn materials_for(kind: ItemKind) -> Vec<&'static Material> {
    MATERIALS.iter().filter(|m| m.accepts(kind)).collect()
}

/// Level and price of a material grade for an item kind
pub fn grade_info(material: &Material, kind: ItemKind, grade: MaterialGrade) -> Option<GradeInfo> {
    material
        .grades
        .iter()
        .find(|g| g.kind == kind && g.grade == grade)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragonhide_is_not_a_weapon_material() {
        let dragonhide = material_by_id("dragonhide").unwrap();
        assert!(!dragonhide.accepts(ItemKind::Weapon));
        assert!(dragonhide.accepts(ItemKind::Armor));
        assert!(!materials_for(ItemKind::Weapon)
            .iter()
            .any(|m| m.id == "dragonhide"));
    }

    #[test]
    fn grade_lookup() {
        let iron = material_by_id("cold-iron").unwrap();
        let low = grade_info(iron, ItemKind::Weapon, MaterialGrade::Low).unwrap();
        assert_eq!(low.level, 2);
        assert_eq!(low.price_gp, 40);
        assert!(grade_info(iron, ItemKind::Shield, MaterialGrade::High).is_none());
    }

    #[test]
    fn orichalcum_only_comes_in_high_grade() {
        let ori = material_by_id("orichalcum").unwrap();
        assert!(ori.grades.iter().all(|g| g.grade == MaterialGrade::High));
    }

    #[test]
    fn grade_parses_long_names() {
        assert_eq!("High-Grade".parse::<MaterialGrade>().unwrap(), MaterialGrade::High);
        assert!("mythic".parse::<MaterialGrade>().is_err());
    }
}
