use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::game::{GameError, Player};

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub display: DisplayConfig,
    pub journal: JournalConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Number of players when none are given on the command line.
    pub players: usize,
    /// Default player names, in turn order.
    pub names: Vec<String>,
    /// Fixed dice seed for reproducible games.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 2,
            names: Vec::new(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Players for a new game. The count comes from `players`, else from
    /// the number of `names`, else from the config; names given on the
    /// command line replace the configured ones.
    pub fn roster(&self, players: Option<usize>, names: &[String]) -> Result<Vec<Player>, GameError> {
        let count = players
            .or((!names.is_empty()).then_some(names.len()))
            .unwrap_or(self.players);
        let names: &[String] = if names.is_empty() { &self.names } else { names };
        Player::roster(count, names)
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use ANSI colors (NO_COLOR still wins).
    pub color: bool,
    /// Draw dice with Unicode box characters instead of ASCII.
    pub unicode: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            unicode: true,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct JournalConfig {
    /// Record every game as a JSONL journal.
    pub enabled: bool,
    /// Custom games directory. Defaults to ~/.local/share/yahtzee/games/.
    pub games_dir: Option<String>,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            games_dir: None,
        }
    }
}

impl JournalConfig {
    /// Resolve the games directory, using the configured path or the XDG default.
    pub fn resolve_games_dir(&self) -> PathBuf {
        if let Some(ref custom) = self.games_dir {
            return PathBuf::from(custom);
        }

        let base = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".local").join("share")
            });
        base.join("yahtzee").join("games")
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// tracing filter directive; `RUST_LOG` overrides it.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or the default location when `None`. A missing file
    /// yields defaults; a malformed one yields defaults plus a warning.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                // Logging isn't up yet; this has to go straight to stderr.
                eprintln!("warning: failed to parse {}: {e}", path.display());
                Config::default()
            }),
            Err(_) => Config::default(),
        }
    }
}

pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("yahtzee").join("config.toml")
}
