//! Order-sensitive path scoring.
//!
//! Walks the action points in path order while tracking two monotonic sets:
//! the relics activated so far and the reward sites already collected.
//! At each point relics in range are activated first, then every uncollected
//! reward in range is collected and valued with the relics active *at that
//! moment*. Relics reached by later points never touch earlier collections.
//!
//! A relic exactly on the activation radius is activated; a reward exactly on
//! it is not collected.

use crate::env::Environment;
use crate::geometry::Point;
use crate::loot::LootWeights;
use crate::relic::{Contribution, Relic};

/// Pure scoring function parameterized by category weights.
#[derive(Clone, Debug, Default)]
pub struct Scorer {
    weights: LootWeights,
}

impl Scorer {
    pub fn new(weights: LootWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &LootWeights {
        &self.weights
    }

    /// Total value of `path` in `env`. Deterministic; zero for empty paths.
    pub fn score(&self, path: &[Point], env: &Environment) -> f64 {
        let radius = env.activation_radius();
        let relic_sites = env.modifier_sites();
        let reward_sites = env.reward_sites();

        let mut activated = vec![false; relic_sites.len()];
        let mut active: Vec<Relic> = Vec::with_capacity(relic_sites.len());
        let mut collected = vec![false; reward_sites.len()];
        let mut score = 0.0;

        for &point in path {
            for (index, site) in relic_sites.iter().enumerate() {
                if !activated[index] && site.position.within(point, radius) {
                    activated[index] = true;
                    active.push(site.relic);
                }
            }

            for (index, site) in reward_sites.iter().enumerate() {
                if collected[index] || !site.position.strictly_within(point, radius) {
                    continue;
                }
                collected[index] = true;

                let contribution: Contribution = active
                    .iter()
                    .map(|relic| relic.contribution(site.category))
                    .collect();
                score += self.weights.weight(site.category) * contribution.factor();
            }
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loot::{LootCategory, RewardSite};
    use crate::oracle::AlwaysValid;

    fn env_with(rewards: &[(Point, LootCategory)], relics: &[(Point, Relic)]) -> Environment {
        let mut builder = Environment::builder()
            .oracle(AlwaysValid)
            .step_range(10.0)
            .activation_radius(5.0)
            .path_length(3);
        for &(position, category) in rewards {
            builder = builder.reward_site(position, category);
        }
        for &(position, relic) in relics {
            builder = builder.modifier_site(position, relic);
        }
        builder.build().unwrap()
    }

    fn scorer() -> Scorer {
        Scorer::new(LootWeights::uniform(1.0))
    }

    #[test]
    fn empty_path_scores_zero() {
        let env = env_with(&[(Point::new(1.0, 0.0), LootCategory::StandardMonster)], &[]);
        assert_eq!(scorer().score(&[], &env), 0.0);
    }

    #[test]
    fn path_out_of_range_scores_zero() {
        let env = env_with(
            &[(Point::new(100.0, 0.0), LootCategory::StandardMonster)],
            &[(Point::new(0.0, 0.0), Relic::LogbookMonster)],
        );
        assert_eq!(scorer().score(&[Point::ORIGIN], &env), 0.0);
    }

    #[test]
    fn reward_is_counted_at_most_once() {
        let site = Point::new(8.0, 0.0);
        let env = env_with(&[(site, LootCategory::StandardMonster)], &[]);
        let scorer = scorer();

        let lingering = [site, Point::new(7.0, 0.0), Point::new(9.0, 1.0)];
        let single = [site, Point::new(30.0, 0.0), Point::new(40.0, 0.0)];

        assert_eq!(scorer.score(&lingering, &env), 1.0);
        assert_eq!(scorer.score(&lingering, &env), scorer.score(&single, &env));
    }

    #[test]
    fn later_relic_does_not_affect_earlier_collection() {
        let env = env_with(
            &[(Point::new(0.0, 0.0), LootCategory::StandardMonster)],
            &[(Point::new(20.0, 0.0), Relic::LogbookMonster)],
        );
        let path = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(20.0, 0.0)];

        assert_eq!(scorer().score(&path, &env), 1.0);
    }

    #[test]
    fn earlier_relic_boosts_later_collection() {
        let env = env_with(
            &[(Point::new(20.0, 0.0), LootCategory::StandardMonster)],
            &[(Point::new(0.0, 0.0), Relic::LogbookMonster)],
        );
        let path = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(20.0, 0.0)];

        assert_eq!(scorer().score(&path, &env), 1.5);
    }

    #[test]
    fn relic_at_same_point_applies_regardless_of_list_order() {
        let site = Point::new(5.0, 5.0);
        let env = env_with(
            &[(site, LootCategory::HighValueMonster)],
            &[
                (Point::new(50.0, 50.0), Relic::GoodChest),
                (site, Relic::DoubledHighValueMonsters),
            ],
        );

        assert_eq!(scorer().score(&[site], &env), 2.0);
    }

    #[test]
    fn multipliers_and_bonuses_compose() {
        let site = Point::new(0.0, 0.0);
        let env = env_with(
            &[(site, LootCategory::StandardMonster)],
            &[
                (site, Relic::LogbookMonster),
                (site, Relic::Custom {
                    target: crate::relic::RelicTarget::All,
                    multiplier: 1.0,
                    bonus: 0.5,
                }),
                (site, Relic::LogbookChest),
            ],
        );

        // 1.0 * 1.5 * (1 + 0.5); the chest relic is neutral for monsters
        assert_eq!(scorer().score(&[site], &env), 2.25);
    }

    #[test]
    fn disqualifier_zeroes_only_later_collections() {
        let env = env_with(
            &[
                (Point::new(0.0, 0.0), LootCategory::StandardChest),
                (Point::new(20.0, 0.0), LootCategory::StandardChest),
            ],
            &[(Point::new(10.0, 0.0), Relic::Warning)],
        );
        let path = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(20.0, 0.0)];

        assert_eq!(scorer().score(&path, &env), 1.0);
    }

    #[test]
    fn reward_on_the_radius_is_not_collected() {
        let env = env_with(&[(Point::new(3.0, 4.0), LootCategory::StandardMonster)], &[]);
        assert_eq!(scorer().score(&[Point::ORIGIN], &env), 0.0);
        assert_eq!(scorer().score(&[Point::new(0.0, 0.1)], &env), 1.0);
    }

    #[test]
    fn relic_on_the_radius_is_activated() {
        let env = env_with(
            &[(Point::ORIGIN, LootCategory::StandardMonster)],
            &[(Point::new(3.0, 4.0), Relic::LogbookMonster)],
        );
        assert_eq!(scorer().score(&[Point::ORIGIN], &env), 1.5);
    }

    #[test]
    fn weights_scale_by_category() {
        let env = env_with(
            &[
                (Point::new(0.0, 0.0), LootCategory::HighValueChest),
                (Point::new(0.0, 1.0), LootCategory::StandardChest),
            ],
            &[],
        );
        let scorer = Scorer::new(
            LootWeights::uniform(1.0).with(LootCategory::HighValueChest, 4.0),
        );

        assert_eq!(scorer.score(&[Point::ORIGIN], &env), 5.0);
    }

    #[test]
    fn score_is_deterministic_and_ignores_reward_list_order() {
        let sites = [
            RewardSite::new(Point::new(1.0, 1.0), LootCategory::HighValueMonster),
            RewardSite::new(Point::new(9.0, 2.0), LootCategory::StandardChest),
            RewardSite::new(Point::new(14.0, -3.0), LootCategory::StandardMonster),
            RewardSite::new(Point::new(3.0, 2.0), LootCategory::HighValueChest),
        ];
        let relics = [
            (Point::new(2.0, 0.0), Relic::IncreasedMonsterLoot),
            (Point::new(10.0, 0.0), Relic::FracturedChest),
        ];
        let build = |rewards: Vec<RewardSite>| {
            let mut builder = Environment::builder()
                .oracle(AlwaysValid)
                .step_range(10.0)
                .activation_radius(5.0)
                .path_length(3)
                .reward_sites(rewards);
            for &(position, relic) in &relics {
                builder = builder.modifier_site(position, relic);
            }
            builder.build().unwrap()
        };

        let forward = build(sites.to_vec());
        let reversed = build(sites.iter().rev().copied().collect());
        let scorer = Scorer::default();
        let path = [Point::new(2.0, 0.0), Point::new(10.0, 0.0), Point::new(14.0, -2.0)];

        let first = scorer.score(&path, &forward);
        assert_eq!(first.to_bits(), scorer.score(&path, &forward).to_bits());
        assert!((first - scorer.score(&path, &reversed)).abs() < 1e-9);
        assert!(first > 0.0);
    }
}
