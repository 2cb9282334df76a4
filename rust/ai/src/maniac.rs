//! Maniac style: aggressive everywhere, with randomized sizing.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use felt_engine::actions::PlayerAction;
use felt_engine::context::CurrentHandContext;
use felt_engine::strategy::PlayerStrategy;

use crate::base::{self, compute_preflop_raise_amount, preflop_strength, StreetTactics};

#[derive(Debug)]
pub struct ManiacStrategy {
    rng: SmallRng,
}

impl ManiacStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        self.rng.random_range(0..denominator) < numerator
    }
}

impl StreetTactics for ManiacStrategy {
    fn preflop_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        preflop_strength(ctx) >= 2 || self.chance(1, 2)
    }

    fn preflop_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        // raises most hands, sizing between 2 and 6 big blinds
        if preflop_strength(ctx) >= 4 || self.chance(2, 3) {
            let sized = ctx.big_blind() * self.rng.random_range(2..=6);
            sized.max(compute_preflop_raise_amount(ctx))
        } else {
            0
        }
    }

    fn flop_could_bet(&mut self, ctx: &CurrentHandContext) -> u32 {
        if self.chance(3, 4) {
            ctx.betting.pot * self.rng.random_range(1..=3) / 2
        } else {
            0
        }
    }

    fn flop_could_call(&mut self, _ctx: &CurrentHandContext) -> bool {
        true
    }

    fn flop_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        if self.chance(1, 3) {
            ctx.betting.highest_set * self.rng.random_range(2..=4)
        } else {
            0
        }
    }

    fn turn_could_bet(&mut self, ctx: &CurrentHandContext) -> u32 {
        if self.chance(2, 3) {
            ctx.betting.pot * self.rng.random_range(1..=2)
        } else {
            0
        }
    }

    fn turn_could_call(&mut self, _ctx: &CurrentHandContext) -> bool {
        true
    }

    fn turn_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        if self.chance(1, 4) {
            ctx.betting.highest_set * 3
        } else {
            0
        }
    }

    fn river_could_bet(&mut self, ctx: &CurrentHandContext) -> u32 {
        if self.chance(1, 2) {
            ctx.betting.pot
        } else {
            0
        }
    }

    fn river_could_call(&mut self, _ctx: &CurrentHandContext) -> bool {
        true
    }

    fn river_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        if self.chance(1, 5) {
            ctx.betting.highest_set * 3
        } else {
            0
        }
    }
}

impl PlayerStrategy for ManiacStrategy {
    fn name(&self) -> &str {
        "Maniac"
    }

    fn decide(&mut self, ctx: &CurrentHandContext) -> PlayerAction {
        base::decide(self, ctx)
    }
}
