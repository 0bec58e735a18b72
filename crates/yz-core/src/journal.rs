//! Append-only game journal backed by a JSONL file.
//!
//! Each game writes one JSON object per line, recording every event the
//! engine emits. A journal is enough to rebuild the game exactly: rolls are
//! stored as the faces that came up, not as RNG state.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use yz_protocol::{Category, GameEvent};

use crate::dice::Dice;
use crate::game::{Game, GameError, Player};

/// Seconds since Unix epoch.
pub fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Generate a short game ID from PID and timestamp.
pub fn generate_game_id() -> String {
    let pid = std::process::id();
    let ts = epoch_secs();
    format!("g{ts}-{pid:x}")
}

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// A single line in the journal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub ts: u64,
    #[serde(flatten)]
    pub event: GameEvent,
}

impl JournalEntry {
    pub fn now(event: GameEvent) -> Self {
        Self {
            ts: epoch_secs(),
            event,
        }
    }
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal is empty")]
    Empty,
    #[error("journal does not begin with a started event")]
    NotStarted,
    #[error("journal line {line}: {category} recorded {recorded} points but replays as {replayed}")]
    Diverged {
        line: usize,
        category: Category,
        recorded: u32,
        replayed: u32,
    },
    #[error("journal line {line}: {category} recorded bonus Yahtzee {recorded} but replays as {replayed}")]
    BonusDiverged {
        line: usize,
        category: Category,
        recorded: bool,
        replayed: bool,
    },
    #[error("journal line {line}: {source}")]
    Game {
        line: usize,
        #[source]
        source: GameError,
    },
}

/// Append-only game journal backed by a JSONL file.
pub struct GameJournal {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl GameJournal {
    /// Create/open a JSONL journal file. Creates parent directories.
    pub fn new(path: PathBuf) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self::from_file(file, path))
    }

    /// Create a journal file for a new game inside `dir`. Never reuses an
    /// existing file: games started within the same second get a numeric
    /// suffix.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let id = generate_game_id();
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                format!("{id}.jsonl")
            } else {
                format!("{id}-{attempt}.jsonl")
            };
            let path = dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok(Self::from_file(file, path)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free journal name for {id} in {}", dir.display()),
        ))
    }

    fn from_file(file: File, path: PathBuf) -> Self {
        Self {
            writer: BufWriter::new(file),
            path,
        }
    }

    /// Append one entry, flush immediately. Failures are logged, not fatal.
    pub fn append(&mut self, entry: &JournalEntry) {
        let result = serde_json::to_string(entry)
            .map_err(io::Error::from)
            .and_then(|line| {
                writeln!(self.writer, "{line}")?;
                self.writer.flush()
            });
        if let Err(e) = result {
            warn!(path = %self.path.display(), "failed to write journal entry: {e}");
        }
    }

    pub fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            self.append(&JournalEntry::now(event.clone()));
        }
    }

    /// Read all entries from the journal file.
    pub fn read_all(&self) -> Vec<JournalEntry> {
        read_entries(&self.path).unwrap_or_default()
    }

    /// Get the journal file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read a journal file, skipping blank and malformed lines.
pub fn read_entries(path: &Path) -> io::Result<Vec<JournalEntry>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(reader
        .lines()
        .map_while(Result::ok)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(&line).ok())
        .collect())
}

/// Read a journal file and rebuild its game.
pub fn replay_file(path: &Path) -> Result<Game, JournalError> {
    replay(&read_entries(path)?)
}

/// Rebuild a game from its journal.
pub fn replay(entries: &[JournalEntry]) -> Result<Game, JournalError> {
    let (first, rest) = entries.split_first().ok_or(JournalError::Empty)?;
    let GameEvent::Started { players } = &first.event else {
        return Err(JournalError::NotStarted);
    };
    let players = players.iter().map(Player::new).collect();
    let mut game = Game::new(players, Dice::seeded(0)).map_err(|source| JournalError::Game {
        line: 1,
        source,
    })?;

    for (i, entry) in rest.iter().enumerate() {
        let line = i + 2;
        let at_line = |source| JournalError::Game { line, source };
        match &entry.event {
            GameEvent::Started { .. } => return Err(at_line(GameError::GameOver)),
            GameEvent::Rolled {
                dice,
                rolls_remaining,
                ..
            } => game.restore_roll(*dice, *rolls_remaining).map_err(at_line)?,
            GameEvent::Held { die, held, .. } => game.set_held(*die, *held).map_err(at_line)?,
            GameEvent::Scored {
                category,
                points,
                bonus_yahtzee,
                ..
            } => {
                let player = game.whose_turn();
                let bonuses = game.card(player).bonus_yahtzees();
                let replayed = game.score(*category).map_err(at_line)?;
                if replayed != *points {
                    return Err(JournalError::Diverged {
                        line,
                        category: *category,
                        recorded: *points,
                        replayed,
                    });
                }
                let replayed_bonus = game.card(player).bonus_yahtzees() > bonuses;
                if replayed_bonus != *bonus_yahtzee {
                    return Err(JournalError::BonusDiverged {
                        line,
                        category: *category,
                        recorded: *bonus_yahtzee,
                        replayed: replayed_bonus,
                    });
                }
            }
            GameEvent::Finished { .. } => {}
        }
    }
    game.take_events();
    Ok(game)
}
