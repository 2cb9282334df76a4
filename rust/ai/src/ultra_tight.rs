//! Ultra-tight style: folds almost everything. Serves as the regression
//! baseline; its decisions barely depend on the table.

use felt_engine::actions::PlayerAction;
use felt_engine::context::CurrentHandContext;
use felt_engine::strategy::PlayerStrategy;

use crate::base::{self, compute_preflop_raise_amount, preflop_strength, StreetTactics};

#[derive(Debug, Default)]
pub struct UltraTightStrategy;

impl UltraTightStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl StreetTactics for UltraTightStrategy {
    fn preflop_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        preflop_strength(ctx) >= 9
    }

    fn preflop_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        if preflop_strength(ctx) >= 10 {
            compute_preflop_raise_amount(ctx)
        } else {
            0
        }
    }

    fn flop_could_bet(&mut self, ctx: &CurrentHandContext) -> u32 {
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_full_house || flags.is_quads || flags.is_flush || flags.is_straight {
            ctx.betting.pot / 2
        } else {
            0
        }
    }

    fn flop_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        ctx.personal.post_flop_flags.is_nut_made_hand()
    }

    fn flop_could_raise(&mut self, _ctx: &CurrentHandContext) -> u32 {
        0
    }

    fn turn_could_bet(&mut self, ctx: &CurrentHandContext) -> u32 {
        self.flop_could_bet(ctx)
    }

    fn turn_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        ctx.personal.post_flop_flags.is_nut_made_hand()
    }

    fn turn_could_raise(&mut self, _ctx: &CurrentHandContext) -> u32 {
        0
    }

    fn river_could_bet(&mut self, ctx: &CurrentHandContext) -> u32 {
        self.flop_could_bet(ctx)
    }

    fn river_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        ctx.personal.post_flop_flags.is_nut_made_hand()
    }

    fn river_could_raise(&mut self, _ctx: &CurrentHandContext) -> u32 {
        0
    }
}

impl PlayerStrategy for UltraTightStrategy {
    fn name(&self) -> &str {
        "UltraTight"
    }

    fn decide(&mut self, ctx: &CurrentHandContext) -> PlayerAction {
        base::decide(self, ctx)
    }
}
