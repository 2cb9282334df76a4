//! Shows the resolved configuration and where each value came from.

use std::io::Write;

use crate::config::{load_with_sources, profile_name, ValueSource};
use crate::error::CliError;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = load_with_sources().map_err(|e| CliError::Config(e.to_string()))?;
    let cfg = &resolved.config;
    let sources = &resolved.sources;

    writeln!(out, "Configuration:")?;
    writeln!(
        out,
        "  players       = {:<20} ({})",
        cfg.players,
        source_name(sources.players)
    )?;
    writeln!(
        out,
        "  small_blind   = {:<20} ({})",
        cfg.small_blind,
        source_name(sources.small_blind)
    )?;
    writeln!(
        out,
        "  start_cash    = {:<20} ({})",
        cfg.start_cash,
        source_name(sources.start_cash)
    )?;
    writeln!(
        out,
        "  seed          = {:<20} ({})",
        cfg.seed.map(|s| s.to_string()).unwrap_or_else(|| "clock".into()),
        source_name(sources.seed)
    )?;
    writeln!(
        out,
        "  table_profile = {:<20} ({})",
        profile_name(cfg.table_profile),
        source_name(sources.table_profile)
    )?;
    writeln!(
        out,
        "  db_path       = {:<20} ({})",
        cfg.db_path,
        source_name(sources.db_path)
    )?;
    Ok(())
}

fn source_name(source: ValueSource) -> &'static str {
    match source {
        ValueSource::Default => "default",
        ValueSource::File => "file",
        ValueSource::Env => "env",
    }
}
