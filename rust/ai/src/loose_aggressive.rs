//! Loose-aggressive style: wide opening ranges, frequent continuation bets,
//! large bluffs when the table can actually fold.

use felt_engine::actions::PlayerAction;
use felt_engine::context::CurrentHandContext;
use felt_engine::position::Position;
use felt_engine::strategy::PlayerStrategy;

use crate::base::{
    self, compute_preflop_raise_amount, is_possible_to_bluff, preflop_strength,
    should_pot_control, StreetTactics,
};

#[derive(Debug, Default)]
pub struct LooseAggressiveStrategy;

impl LooseAggressiveStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl StreetTactics for LooseAggressiveStrategy {
    fn preflop_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        let strength = preflop_strength(ctx);
        let late = ctx.personal.position >= Position::Cutoff;
        if ctx.betting.preflop_raises_number >= 2 {
            return strength >= 6;
        }
        strength >= 4 || (late && strength >= 3)
    }

    fn preflop_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        let strength = preflop_strength(ctx);
        let late = ctx.personal.position >= Position::Cutoff;
        let open = ctx.betting.preflop_raises_number == 0;
        let value = strength >= 7 || (open && late && strength >= 5);
        // the occasional light three-bet, but only against folders
        let bluff = ctx.betting.preflop_raises_number == 1
            && strength >= 6
            && is_possible_to_bluff(ctx);
        if value || bluff {
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
        if flags.has_made_hand() || flags.has_draw() {
            return ctx.betting.pot * 2 / 3;
        }
        // wide continuation range
        if ctx.personal.is_preflop_aggressor {
            return ctx.betting.pot / 2;
        }
        if is_possible_to_bluff(ctx) && ctx.players.opponents.len() == 1 {
            return ctx.betting.pot / 2;
        }
        0
    }

    fn flop_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        let flags = &ctx.personal.post_flop_flags;
        flags.has_made_hand() || flags.has_draw()
    }

    fn flop_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_nut_made_hand() || (flags.is_flush_draw && flags.is_straight_draw) {
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
        if flags.has_made_hand() {
            return ctx.betting.pot * 2 / 3;
        }
        if flags.has_draw() || (ctx.personal.is_preflop_aggressor && is_possible_to_bluff(ctx)) {
            return ctx.betting.pot / 2;
        }
        0
    }

    fn turn_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        let flags = &ctx.personal.post_flop_flags;
        flags.has_made_hand()
            || (flags.has_draw() && ctx.personal.to_call * 3 <= ctx.betting.pot)
    }

    fn turn_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_nut_made_hand() {
            ctx.betting.highest_set * 3
        } else {
            0
        }
    }

    fn river_could_bet(&mut self, ctx: &CurrentHandContext) -> u32 {
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_nut_made_hand() || flags.is_two_pair || flags.is_over_pair {
            return ctx.betting.pot * 3 / 4;
        }
        if flags.is_top_pair {
            return ctx.betting.pot / 2;
        }
        // missed draws become bluffs against opponents who can fold
        if !flags.has_made_hand() && is_possible_to_bluff(ctx) {
            return ctx.betting.pot * 3 / 4;
        }
        0
    }

    fn river_could_call(&mut self, ctx: &CurrentHandContext) -> bool {
        let flags = &ctx.personal.post_flop_flags;
        flags.has_made_hand() && ctx.personal.to_call <= ctx.betting.pot
    }

    fn river_could_raise(&mut self, ctx: &CurrentHandContext) -> u32 {
        let flags = &ctx.personal.post_flop_flags;
        if flags.is_nut_made_hand() {
            ctx.betting.highest_set * 3
        } else {
            0
        }
    }
}

impl PlayerStrategy for LooseAggressiveStrategy {
    fn name(&self) -> &str {
        "LooseAggressive"
    }

    fn decide(&mut self, ctx: &CurrentHandContext) -> PlayerAction {
        base::decide(self, ctx)
    }
}
