//! Reward sites and their categories.
//!
//! Categories are a closed set; the value of a category is a pure function of
//! [`LootWeights`], so no per-object weight table is needed.

use crate::geometry::Point;

/// Kind of valuable thing sitting at a reward site.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LootCategory {
    /// Elite monster carrying runic rewards
    HighValueMonster,
    /// Ordinary monster marker
    StandardMonster,
    /// Chest holding artifacts
    HighValueChest,
    /// Any other chest
    StandardChest,
}

/// Broad grouping used by relics that affect "all monsters" or "all chests".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LootClass {
    Monster,
    Chest,
}

impl LootCategory {
    pub const fn class(self) -> LootClass {
        match self {
            Self::HighValueMonster | Self::StandardMonster => LootClass::Monster,
            Self::HighValueChest | Self::StandardChest => LootClass::Chest,
        }
    }

    pub const fn is_monster(self) -> bool {
        matches!(self.class(), LootClass::Monster)
    }

    pub const fn is_chest(self) -> bool {
        matches!(self.class(), LootClass::Chest)
    }
}

/// Base weight of every loot category.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootWeights {
    pub high_value_monster: f64,
    pub standard_monster: f64,
    pub high_value_chest: f64,
    pub standard_chest: f64,
}

impl LootWeights {
    pub const DEFAULT_HIGH_VALUE_MONSTER: f64 = 3.0;
    pub const DEFAULT_STANDARD_MONSTER: f64 = 1.0;
    pub const DEFAULT_HIGH_VALUE_CHEST: f64 = 3.0;
    pub const DEFAULT_STANDARD_CHEST: f64 = 1.0;

    /// Every category weighted equally.
    pub const fn uniform(weight: f64) -> Self {
        Self {
            high_value_monster: weight,
            standard_monster: weight,
            high_value_chest: weight,
            standard_chest: weight,
        }
    }

    pub const fn weight(&self, category: LootCategory) -> f64 {
        match category {
            LootCategory::HighValueMonster => self.high_value_monster,
            LootCategory::StandardMonster => self.standard_monster,
            LootCategory::HighValueChest => self.high_value_chest,
            LootCategory::StandardChest => self.standard_chest,
        }
    }

    pub fn set(&mut self, category: LootCategory, weight: f64) {
        let slot = match category {
            LootCategory::HighValueMonster => &mut self.high_value_monster,
            LootCategory::StandardMonster => &mut self.standard_monster,
            LootCategory::HighValueChest => &mut self.high_value_chest,
            LootCategory::StandardChest => &mut self.standard_chest,
        };
        *slot = weight;
    }

    #[must_use]
    pub fn with(mut self, category: LootCategory, weight: f64) -> Self {
        self.set(category, weight);
        self
    }
}

impl Default for LootWeights {
    fn default() -> Self {
        Self {
            high_value_monster: Self::DEFAULT_HIGH_VALUE_MONSTER,
            standard_monster: Self::DEFAULT_STANDARD_MONSTER,
            high_value_chest: Self::DEFAULT_HIGH_VALUE_CHEST,
            standard_chest: Self::DEFAULT_STANDARD_CHEST,
        }
    }
}

/// A collectible reward at a fixed position.
///
/// Several sites may share a position; each is still collected separately.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardSite {
    pub position: Point,
    pub category: LootCategory,
}

impl RewardSite {
    pub const fn new(position: Point, category: LootCategory) -> Self {
        Self { position, category }
    }
}
