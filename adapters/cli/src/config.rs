//! Layered configuration: defaults, then the TOML file, then CLI flags.
//!
//! The file is optional. When `--config` is not given, `twenty48.toml` in the
//! working directory is read if it exists.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use serde::Deserialize;
use twenty48_core::SpawnPolicy;
use twenty48_rendering::KeyBindings;

const DEFAULT_CONFIG_FILE: &str = "twenty48.toml";
const DEFAULT_LOG_FILE: &str = "twenty48.log";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Parser)]
#[command(name = "twenty48", about = "Slide-and-merge 2048 in the terminal")]
pub(crate) struct Args {
    /// TOML config file (defaults to ./twenty48.toml when present)
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Seed for tile spawning; drawn at random when omitted
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Whether a move that changes nothing still spawns a tile
    #[arg(long, value_enum)]
    pub(crate) spawn_policy: Option<SpawnPolicyArg>,

    /// File that receives the session log
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long)]
    pub(crate) log_level: Option<LevelFilter>,

    /// Draw tiles without ANSI colors
    #[arg(long)]
    pub(crate) no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SpawnPolicyArg {
    Always,
    OnChange,
}

impl From<SpawnPolicyArg> for SpawnPolicy {
    fn from(value: SpawnPolicyArg) -> Self {
        match value {
            SpawnPolicyArg::Always => SpawnPolicy::Always,
            SpawnPolicyArg::OnChange => SpawnPolicy::OnChange,
        }
    }
}

// ============================================================================
// File layout (every field optional so the TOML can stay sparse)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FileConfig {
    #[serde(default)]
    game: GameSection,
    #[serde(default)]
    keys: KeySection,
    #[serde(default)]
    display: DisplaySection,
    #[serde(default)]
    log: LogSection,
}

#[derive(Debug, Default, Deserialize)]
struct GameSection {
    seed: Option<u64>,
    spawn_policy: Option<SpawnPolicy>,
}

#[derive(Debug, Default, Deserialize)]
struct KeySection {
    up: Option<char>,
    down: Option<char>,
    left: Option<char>,
    right: Option<char>,
    quit: Option<char>,
    redraw: Option<char>,
}

#[derive(Debug, Default, Deserialize)]
struct DisplaySection {
    color: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LogSection {
    file: Option<PathBuf>,
    level: Option<String>,
}

impl FileConfig {
    /// Reads the explicit config file, or the default one if it exists.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::read(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

// ============================================================================
// Resolved config (concrete values, no Options except the seed)
// ============================================================================

#[derive(Debug)]
pub(crate) struct ResolvedConfig {
    /// `None` means draw a fresh seed at startup.
    pub(crate) seed: Option<u64>,
    pub(crate) spawn_policy: SpawnPolicy,
    pub(crate) bindings: KeyBindings,
    pub(crate) colored: bool,
    pub(crate) log_file: PathBuf,
    pub(crate) log_level: LevelFilter,
}

impl ResolvedConfig {
    pub(crate) fn resolve(file: FileConfig, args: &Args) -> Result<Self> {
        let defaults = KeyBindings::default();
        let keys = file.keys;
        let bindings = KeyBindings::new(
            keys.up.unwrap_or(defaults.up),
            keys.down.unwrap_or(defaults.down),
            keys.left.unwrap_or(defaults.left),
            keys.right.unwrap_or(defaults.right),
            keys.quit.unwrap_or(defaults.quit),
            keys.redraw.unwrap_or(defaults.redraw),
        )
        .context("invalid [keys] section")?;

        let file_level = file
            .log
            .level
            .as_deref()
            .map(str::parse::<LevelFilter>)
            .transpose()
            .context("invalid [log] level")?;

        Ok(Self {
            seed: args.seed.or(file.game.seed),
            spawn_policy: args
                .spawn_policy
                .map(SpawnPolicy::from)
                .or(file.game.spawn_policy)
                .unwrap_or_default(),
            bindings,
            colored: !args.no_color && file.display.color.unwrap_or(true),
            log_file: args
                .log_file
                .clone()
                .or(file.log.file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            log_level: args.log_level.or(file_level).unwrap_or(DEFAULT_LOG_LEVEL),
        })
    }
}
