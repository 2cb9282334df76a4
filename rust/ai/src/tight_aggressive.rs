//! Tight-aggressive style: narrow opening ranges, aggressive continuation,
//! pot control on marginal made hands.

use felt_engine::actions::PlayerAction;
use felt_engine::context::CurrentHandContext;
use felt_engine::strategy::PlayerStrategy;

use crate::base::{
    self, compute_preflop_raise_amount, is_possible_to_bluff, preflop_strength,
    should_pot_control, StreetTactics,
};

#[derive(Debug, Default)]
pub struct TightAggressiveStrategy;

impl TightAggressiveStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl StreetTactics for TightAggressiveStrategy {
    fn preflop_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        let strength = preflop_strength(ctx);
        if strength >= 7 {
            return true;
        }
        // set-mine and speculate only when the price is small
        strength >= 5
            && ctx.betting.preflop_raises_number <= 1
            && ctx.personal.to_call <= 2 * ctx.big_blind()
    }

    fn preflop_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        let strength = preflop_strength(ctx);
        let open = ctx.betting.preflop_raises_number == 0;
        if strength >= 9 || (strength >= 8 && open) {
            compute_preflop_raise_amount(ctx)
        } else {
            0
        }
    }

    fn flop_could_bet(&mut self, ctx: &CurrentHandContext) -> u32 {
        if should_pot_control(ctx) {
            return 0;
        }
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_nut_made_hand() || flags.is_over_pair || flags.is_top_pair {
            return ctx.betting.pot * 2 / 3;
        }
        // continuation bet heads-up or three-way
        if ctx.personal.is_preflop_aggressor && ctx.players.opponents.len() <= 2 {
            return ctx.betting.pot / 2;
        }
        0
    }

    fn flop_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        let flags = &ctx.personal.post_flop_flags;
        flags.has_made_hand() || (flags.has_draw() && ctx.personal.to_call * 3 <= ctx.betting.pot)
    }

    fn flop_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_nut_made_hand() {
            ctx.betting.highest_set * 3
        } else {
            0
        }
    }

    fn turn_could_bet(&mut self, ctx: &CurrentHandContext) -> u32 {
        if should_pot_control(ctx) {
            return 0;
        }
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_nut_made_hand() || flags.is_over_pair || flags.is_top_pair {
            ctx.betting.pot * 2 / 3
        } else {
            0
        }
    }

    fn turn_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        let flags = &ctx.personal.post_flop_flags;
        flags.is_nut_made_hand()
            || flags.is_over_pair
            || flags.is_top_pair
            || (flags.has_draw() && ctx.personal.to_call * 4 <= ctx.betting.pot)
    }

    fn turn_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_nut_made_hand() && !should_pot_control(ctx) {
            ctx.betting.highest_set * 3
        } else {
            0
        }
    }

    fn river_could_bet(&mut self, ctx: &CurrentHandContext) -> u32 {
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_nut_made_hand() {
            return ctx.betting.pot * 2 / 3;
        }
        if flags.is_two_pair || flags.is_over_pair {
            return ctx.betting.pot / 2;
        }
        // a rare thin bluff when the table can fold
        if !flags.has_made_hand() && ctx.personal.is_preflop_aggressor && is_possible_to_bluff(ctx)
        {
            return ctx.betting.pot / 2;
        }
        0
    }

    fn river_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_nut_made_hand() || flags.is_two_pair {
            return true;
        }
        (flags.is_over_pair || flags.is_top_pair) && ctx.personal.to_call * 2 <= ctx.betting.pot
    }

    fn river_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        let flags = &ctx.personal.post_flop_flags;
        let strong = flags.is_full_house
            || flags.is_quads
            || ((flags.is_straight || flags.is_flush) && !flags.is_full_house_possible);
        if strong {
            ctx.betting.highest_set * 3
        } else {
            0
        }
    }
}

impl PlayerStrategy for TightAggressiveStrategy {
    fn name(&self) -> &str {
        "TightAggressive"
    }

    fn decide(&mut self, ctx: &CurrentHandContext) -> PlayerAction {
        base::decide(self, ctx)
    }
}
