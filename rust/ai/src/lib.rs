//! # felt-ai: bot strategies for the felt engine
//!
//! Implements the four table personalities on top of
//! [`felt_engine::strategy::PlayerStrategy`]:
//!
//! - `TightAggressive` - narrow ranges, aggressive with made hands
//! - `LooseAggressive` - wide ranges, frequent continuation bets and bluffs
//! - `UltraTight` - folds almost everything; regression baseline
//! - `Maniac` - aggressive across the board with randomized sizing
//!
//! Strategies are created by name through [`create_strategy`] or mixed by a
//! [`StrategyAssigner`] following a [`TableProfile`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use felt_engine::strategy::{PlayerStrategy, TableProfile};

mod base;
pub mod loose_aggressive;
pub mod maniac;
pub mod tight_aggressive;
pub mod ultra_tight;

pub use loose_aggressive::LooseAggressiveStrategy;
pub use maniac::ManiacStrategy;
pub use tight_aggressive::TightAggressiveStrategy;
pub use ultra_tight::UltraTightStrategy;

/// Creates a strategy by its registered name. `seed` feeds styles that draw
/// random numbers.
pub fn create_strategy(name: &str, seed: u64) -> Option<Box<dyn PlayerStrategy>> {
    match name {
        "TightAggressive" => Some(Box::new(TightAggressiveStrategy::new())),
        "LooseAggressive" => Some(Box::new(LooseAggressiveStrategy::new())),
        "UltraTight" => Some(Box::new(UltraTightStrategy::new())),
        "Maniac" => Some(Box::new(ManiacStrategy::new(seed))),
        _ => None,
    }
}

pub fn strategy_names() -> [&'static str; 4] {
    ["TightAggressive", "LooseAggressive", "UltraTight", "Maniac"]
}

/// Deals bot styles out according to a table profile. In the random profile
/// each style is capped at a third of the bots so one personality cannot
/// dominate the table.
pub struct StrategyAssigner {
    profile: TableProfile,
    max_per_type: usize,
    count_maniac: usize,
    count_ultra_tight: usize,
    count_loose: usize,
    count_tight: usize,
    rng: SmallRng,
}

impl StrategyAssigner {
    pub fn new(profile: TableProfile, bot_count: usize, seed: u64) -> StrategyAssigner {
        StrategyAssigner {
            profile,
            max_per_type: (bot_count / 3).max(1),
            count_maniac: 0,
            count_ultra_tight: 0,
            count_loose: 0,
            count_tight: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn choose_strategy(&mut self) -> Box<dyn PlayerStrategy> {
        let roll: u32 = self.rng.random_range(0..12);
        let maniac_seed: u64 = self.rng.random();

        match self.profile {
            TableProfile::TightAggressiveOpponents => {
                if roll % 2 == 0 {
                    Box::new(TightAggressiveStrategy::new())
                } else {
                    Box::new(UltraTightStrategy::new())
                }
            }
            TableProfile::LooseAggressiveOpponents => {
                if roll % 2 == 0 {
                    Box::new(LooseAggressiveStrategy::new())
                } else {
                    Box::new(ManiacStrategy::new(maniac_seed))
                }
            }
            TableProfile::RandomOpponents => {
                if roll < 3 && self.count_maniac < self.max_per_type {
                    self.count_maniac += 1;
                    return Box::new(ManiacStrategy::new(maniac_seed));
                }
                if roll < 5 && self.count_ultra_tight < self.max_per_type {
                    self.count_ultra_tight += 1;
                    return Box::new(UltraTightStrategy::new());
                }
                if roll < 9 && self.count_loose < self.max_per_type {
                    self.count_loose += 1;
                    return Box::new(LooseAggressiveStrategy::new());
                }
                if self.count_tight < self.max_per_type {
                    self.count_tight += 1;
                    return Box::new(TightAggressiveStrategy::new());
                }
                Box::new(UltraTightStrategy::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_knows_every_registered_name() {
        for name in strategy_names() {
            let strategy = create_strategy(name, 42).unwrap();
            assert_eq!(strategy.name(), name);
        }
        assert!(create_strategy("Unknown", 42).is_none());
    }

    #[test]
    fn random_profile_caps_each_style() {
        let mut assigner = StrategyAssigner::new(TableProfile::RandomOpponents, 9, 42);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..9 {
            let strategy = assigner.choose_strategy();
            *counts.entry(strategy.name().to_string()).or_insert(0usize) += 1;
        }
        for (name, count) in &counts {
            // UltraTight also serves as the overflow fallback
            if name != "UltraTight" {
                assert!(*count <= 3, "{} assigned {} times", name, count);
            }
        }
    }

    #[test]
    fn tight_profile_only_deals_tight_styles() {
        let mut assigner =
            StrategyAssigner::new(TableProfile::TightAggressiveOpponents, 5, 7);
        for _ in 0..5 {
            let strategy = assigner.choose_strategy();
            assert!(matches!(
                strategy.name(),
                "TightAggressive" | "UltraTight"
            ));
        }
    }
}
