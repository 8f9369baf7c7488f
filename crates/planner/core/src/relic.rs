//! Positional modifiers ("relics") that reshape the value of collected loot.
//!
//! A relic becomes active once any path point comes within the activation
//! radius of its site. From then on it contributes a multiplier and an
//! additive bonus to every reward collected at the same or a later point:
//!
//! ```text
//! value = weight(category) * Π multiplier_i * (1 + Σ bonus_i)
//! ```

use crate::geometry::Point;
use crate::loot::{LootCategory, LootClass};

/// Scoring effect of one relic on one loot category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contribution {
    pub multiplier: f64,
    pub bonus: f64,
}

impl Contribution {
    pub const NEUTRAL: Self = Self::new(1.0, 0.0);
    pub const NULLIFY: Self = Self::new(0.0, 0.0);

    pub const fn new(multiplier: f64, bonus: f64) -> Self {
        Self { multiplier, bonus }
    }

    pub const fn multiplier(multiplier: f64) -> Self {
        Self::new(multiplier, 0.0)
    }

    pub const fn bonus(bonus: f64) -> Self {
        Self::new(1.0, bonus)
    }

    /// Folds contributions: multipliers multiply, bonuses add.
    pub fn combine(self, other: Self) -> Self {
        Self::new(self.multiplier * other.multiplier, self.bonus + other.bonus)
    }

    /// Factor applied to a base weight.
    pub fn factor(self) -> f64 {
        self.multiplier * (1.0 + self.bonus)
    }
}

impl Default for Contribution {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl FromIterator<Contribution> for Contribution {
    fn from_iter<I: IntoIterator<Item = Contribution>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NEUTRAL, Self::combine)
    }
}

/// Which loot a [`Relic::Custom`] applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelicTarget {
    All,
    Class(LootClass),
    Category(LootCategory),
}

impl RelicTarget {
    pub fn matches(self, category: LootCategory) -> bool {
        match self {
            Self::All => true,
            Self::Class(LootClass::Monster) => category.is_monster(),
            Self::Class(LootClass::Chest) => category.is_chest(),
            Self::Category(target) => target == category,
        }
    }
}

/// Closed catalogue of relic effects.
#[derive(Clone, Copy, Debug, PartialEq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Relic {
    /// High-value monsters are duplicated
    DoubledHighValueMonsters,
    IncreasedMonsterLoot,
    IncreasedMonsterArtifacts,
    IncreasedChestLoot,
    IncreasedChestArtifacts,
    MinorMonster,
    MinorChest,
    GoodMonster,
    GoodChest,
    LogbookMonster,
    LogbookChest,
    FracturedMonster,
    FracturedChest,
    PackSizeMonster,
    /// Disqualifier: nullifies everything collected while active
    Warning,
    Custom {
        target: RelicTarget,
        multiplier: f64,
        bonus: f64,
    },
}

impl Relic {
    /// Effect of this relic on `category`; neutral for unaffected loot.
    pub fn contribution(self, category: LootCategory) -> Contribution {
        let (target, effect) = match self {
            Self::DoubledHighValueMonsters => (
                RelicTarget::Category(LootCategory::HighValueMonster),
                Contribution::multiplier(2.0),
            ),
            Self::IncreasedMonsterLoot | Self::IncreasedMonsterArtifacts => (
                RelicTarget::Class(LootClass::Monster),
                Contribution::bonus(0.4),
            ),
            Self::IncreasedChestLoot => {
                (RelicTarget::Class(LootClass::Chest), Contribution::bonus(0.4))
            }
            Self::IncreasedChestArtifacts => (
                RelicTarget::Category(LootCategory::HighValueChest),
                Contribution::bonus(0.4),
            ),
            Self::MinorMonster => (
                RelicTarget::Class(LootClass::Monster),
                Contribution::bonus(0.15),
            ),
            Self::MinorChest => (
                RelicTarget::Class(LootClass::Chest),
                Contribution::bonus(0.15),
            ),
            Self::GoodMonster => (
                RelicTarget::Class(LootClass::Monster),
                Contribution::bonus(0.25),
            ),
            Self::GoodChest => (
                RelicTarget::Class(LootClass::Chest),
                Contribution::bonus(0.25),
            ),
            Self::LogbookMonster => (
                RelicTarget::Class(LootClass::Monster),
                Contribution::multiplier(1.5),
            ),
            Self::LogbookChest => (
                RelicTarget::Class(LootClass::Chest),
                Contribution::multiplier(1.5),
            ),
            Self::FracturedMonster => (
                RelicTarget::Class(LootClass::Monster),
                Contribution::multiplier(1.3),
            ),
            Self::FracturedChest => (
                RelicTarget::Class(LootClass::Chest),
                Contribution::multiplier(1.3),
            ),
            Self::PackSizeMonster => (
                RelicTarget::Class(LootClass::Monster),
                Contribution::multiplier(1.25),
            ),
            Self::Warning => (RelicTarget::All, Contribution::NULLIFY),
            Self::Custom {
                target,
                multiplier,
                bonus,
            } => (target, Contribution::new(multiplier, bonus)),
        };

        if target.matches(category) {
            effect
        } else {
            Contribution::NEUTRAL
        }
    }

    pub const fn is_disqualifier(self) -> bool {
        matches!(self, Self::Warning)
    }
}

/// A relic placed in the workspace.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSite {
    pub position: Point,
    pub relic: Relic,
}

impl ModifierSite {
    pub const fn new(position: Point, relic: Relic) -> Self {
        Self { position, relic }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn warning_nullifies_every_category() {
        for category in LootCategory::iter() {
            assert_eq!(Relic::Warning.contribution(category), Contribution::NULLIFY);
        }
    }

    #[test]
    fn class_relics_leave_other_class_untouched() {
        assert_eq!(
            Relic::LogbookMonster.contribution(LootCategory::StandardChest),
            Contribution::NEUTRAL
        );
        assert_eq!(
            Relic::LogbookMonster.contribution(LootCategory::StandardMonster),
            Contribution::multiplier(1.5)
        );
    }

    #[test]
    fn doubled_monsters_only_hits_high_value_monsters() {
        assert_eq!(
            Relic::DoubledHighValueMonsters.contribution(LootCategory::HighValueMonster),
            Contribution::multiplier(2.0)
        );
        assert_eq!(
            Relic::DoubledHighValueMonsters.contribution(LootCategory::StandardMonster),
            Contribution::NEUTRAL
        );
    }

    #[test]
    fn combined_contribution_multiplies_and_sums() {
        let combined: Contribution = [
            Contribution::multiplier(2.0),
            Contribution::bonus(0.5),
            Contribution::bonus(0.25),
        ]
        .into_iter()
        .collect();

        assert_eq!(combined, Contribution::new(2.0, 0.75));
        assert_eq!(combined.factor(), 3.5);
    }

    #[test]
    fn custom_relic_respects_target() {
        let relic = Relic::Custom {
            target: RelicTarget::Category(LootCategory::StandardChest),
            multiplier: 3.0,
            bonus: 0.0,
        };
        assert_eq!(
            relic.contribution(LootCategory::StandardChest),
            Contribution::multiplier(3.0)
        );
        assert_eq!(
            relic.contribution(LootCategory::HighValueChest),
            Contribution::NEUTRAL
        );
    }
}
