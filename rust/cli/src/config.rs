//! Table configuration: TOML file merged with environment overrides.
//!
//! The file path comes from `FELT_CONFIG`; individual values can then be
//! overridden with `FELT_SEED`, `FELT_PLAYERS`, `FELT_SMALL_BLIND`,
//! `FELT_STACK`, `FELT_PROFILE` and `FELT_DB`. Every value remembers where
//! it came from so `felt cfg` can show the provenance.

use serde::{Deserialize, Serialize};
use std::fs;

use felt_engine::strategy::TableProfile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub players: usize,
    pub small_blind: u32,
    pub start_cash: u32,
    pub seed: Option<u64>,
    pub table_profile: TableProfile,
    pub db_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: 6,
            small_blind: 10,
            start_cash: 1000,
            seed: None,
            table_profile: TableProfile::RandomOpponents,
            db_path: "felt_statistics.db".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub small_blind: ValueSource,
    pub start_cash: ValueSource,
    pub seed: ValueSource,
    pub table_profile: ValueSource,
    pub db_path: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            small_blind: ValueSource::Default,
            start_cash: ValueSource::Default,
            seed: ValueSource::Default,
            table_profile: ValueSource::Default,
            db_path: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("FELT_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.start_cash {
            cfg.start_cash = v;
            sources.start_cash = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.table_profile {
            cfg.table_profile = parse_profile(&v)
                .ok_or_else(|| ConfigError::Invalid("Invalid table_profile".into()))?;
            sources.table_profile = ValueSource::File;
        }
        if let Some(v) = f.db_path {
            cfg.db_path = v;
            sources.db_path = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("FELT_SEED") {
        if !seed.is_empty() {
            cfg.seed = Some(
                seed.parse()
                    .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
            );
            sources.seed = ValueSource::Env;
        }
    }
    if let Ok(players) = std::env::var("FELT_PLAYERS") {
        if !players.is_empty() {
            cfg.players = players
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid players".into()))?;
            sources.players = ValueSource::Env;
        }
    }
    if let Ok(blind) = std::env::var("FELT_SMALL_BLIND") {
        if !blind.is_empty() {
            cfg.small_blind = blind
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid small_blind".into()))?;
            sources.small_blind = ValueSource::Env;
        }
    }
    if let Ok(stack) = std::env::var("FELT_STACK") {
        if !stack.is_empty() {
            cfg.start_cash = stack
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid stack".into()))?;
            sources.start_cash = ValueSource::Env;
        }
    }
    if let Ok(profile) = std::env::var("FELT_PROFILE") {
        if !profile.is_empty() {
            cfg.table_profile = parse_profile(&profile)
                .ok_or_else(|| ConfigError::Invalid("Invalid profile".into()))?;
            sources.table_profile = ValueSource::Env;
        }
    }
    if let Ok(db) = std::env::var("FELT_DB") {
        if !db.is_empty() {
            cfg.db_path = db;
            sources.db_path = ValueSource::Env;
        }
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

pub fn parse_profile(s: &str) -> Option<TableProfile> {
    match s.to_ascii_lowercase().as_str() {
        "tight" | "tight_aggressive" => Some(TableProfile::TightAggressiveOpponents),
        "loose" | "loose_aggressive" => Some(TableProfile::LooseAggressiveOpponents),
        "random" => Some(TableProfile::RandomOpponents),
        _ => None,
    }
}

pub fn profile_name(profile: TableProfile) -> &'static str {
    match profile {
        TableProfile::TightAggressiveOpponents => "tight",
        TableProfile::LooseAggressiveOpponents => "loose",
        TableProfile::RandomOpponents => "random",
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    start_cash: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    table_profile: Option<String>,
    #[serde(default)]
    db_path: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(2..=10).contains(&cfg.players) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: players must be in 2..=10".into(),
        ));
    }
    if cfg.small_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must be >0".into(),
        ));
    }
    if cfg.start_cash == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: start_cash must be >0".into(),
        ));
    }
    Ok(())
}
