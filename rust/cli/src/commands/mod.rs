mod cfg;
mod deal;
mod play;
mod replay;
mod sim;
mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::{handle_play_command, PlayOptions};
pub use replay::handle_replay_command;
pub use sim::{handle_sim_command, SimOptions};
pub use stats::handle_stats_command;
