//! Command loop.
//!
//! The loop reads one command per line from any `BufRead`, so the same code
//! drives an interactive terminal and a piped script. Every command drains
//! the game's events into the journal before anything is redrawn.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use yz_protocol::GameEvent;

use crate::command::Command;
use crate::dice::Dice;
use crate::game::{Game, GameError, Player};
use crate::journal::{replay_file, GameJournal, JournalError};
use crate::renderer::Renderer;

/// Settings the loop needs beyond the renderer.
#[derive(Debug, Clone, Default)]
pub struct ReplOptions {
    /// Players for the first game and for `new` without names.
    pub roster: Vec<Player>,
    /// Fixed dice seed; each new game in the session offsets it by one.
    pub seed: Option<u64>,
    /// Directory for game journals, or `None` to disable journaling.
    pub journal_dir: Option<PathBuf>,
    /// Show a prompt before each command.
    pub interactive: bool,
}

/// What happened during a session, for callers and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub games_started: u32,
    pub games_finished: u32,
    /// Journal file of the most recent game, if one was written.
    pub last_journal: Option<PathBuf>,
}

struct Session<'a, W: Write> {
    options: &'a ReplOptions,
    renderer: &'a mut Renderer<W>,
    game: Game,
    journal: Option<GameJournal>,
    summary: SessionSummary,
}

impl<'a, W: Write> Session<'a, W> {
    fn start(options: &'a ReplOptions, renderer: &'a mut Renderer<W>) -> Result<Self, GameError> {
        let game = new_game(options, options.roster.clone(), 0)?;
        let mut session = Self {
            options,
            renderer,
            game,
            journal: None,
            summary: SessionSummary::default(),
        };
        session.begin();
        Ok(session)
    }

    /// Open the journal for the current game and show the opening roll.
    fn begin(&mut self) {
        self.summary.games_started += 1;
        self.journal = self.options.journal_dir.as_ref().and_then(|dir| {
            GameJournal::create_in(dir)
                .map_err(|e| {
                    warn!(dir = %dir.display(), "journal disabled: {e}");
                })
                .ok()
        });
        if let Some(journal) = &self.journal {
            info!(path = %journal.path().display(), "journaling game");
            self.summary.last_journal = Some(journal.path().to_path_buf());
        }
        self.flush_events();
        self.renderer.emit_turn(&self.game);
        self.renderer
            .emit_dice(self.game.dice(), self.game.rolls_remaining());
    }

    fn restart(&mut self, names: Vec<String>) {
        let roster = if names.is_empty() {
            Ok(self.options.roster.clone())
        } else {
            Player::roster(names.len(), &names)
        };
        let seed_offset = u64::from(self.summary.games_started);
        match roster.and_then(|r| new_game(self.options, r, seed_offset)) {
            Ok(game) => {
                self.game = game;
                self.begin();
            }
            Err(e) => self.renderer.emit_error(&e.to_string()),
        }
    }

    fn flush_events(&mut self) -> Vec<GameEvent> {
        let events = self.game.take_events();
        if let Some(journal) = &mut self.journal {
            journal.record(&events);
        }
        events
    }

    fn execute(&mut self, command: Command) -> Result<(), GameError> {
        match command {
            Command::Roll => {
                self.game.roll()?;
                self.show_dice();
            }
            Command::Hold(dice) => {
                for die in dice {
                    self.game.set_held(die, true)?;
                }
                self.show_dice();
            }
            Command::Release(dice) => {
                for die in dice {
                    self.game.set_held(die, false)?;
                }
                self.show_dice();
            }
            Command::ReleaseAll => {
                for die in 0..yz_protocol::DICE_COUNT {
                    if self.game.dice().is_held(die) {
                        self.game.set_held(die, false)?;
                    }
                }
                self.show_dice();
            }
            Command::Toggle(dice) => {
                for die in dice {
                    self.game.toggle_held(die)?;
                }
                self.show_dice();
            }
            Command::Score(category) => {
                self.game.score(category)?;
                self.after_score();
            }
            Command::Table => self.renderer.emit_table(&self.game),
            Command::Dice => self.show_dice(),
            Command::Hint => {
                if self.game.is_finished() {
                    return Err(GameError::GameOver);
                }
                self.renderer.emit_hint(self.game.best_category());
            }
            Command::New(names) => self.restart(names),
            Command::Help => self.renderer.emit_help(),
            Command::Quit => {}
        }
        Ok(())
    }

    fn show_dice(&mut self) {
        if self.game.is_finished() {
            self.renderer.emit_info("the game is over, type 'new' to play again");
            return;
        }
        self.renderer
            .emit_dice(self.game.dice(), self.game.rolls_remaining());
    }

    fn after_score(&mut self) {
        for event in self.flush_events() {
            match event {
                GameEvent::Scored {
                    player,
                    category,
                    points,
                    bonus_yahtzee,
                } => {
                    let name = self.game.players()[player].name.clone();
                    self.renderer
                        .emit_scored(&name, category, points, bonus_yahtzee);
                }
                GameEvent::Finished { totals } => {
                    info!(?totals, "game finished");
                    self.summary.games_finished += 1;
                }
                _ => {}
            }
        }

        if self.game.is_finished() {
            self.renderer.emit_table(&self.game);
            self.renderer.emit_game_over(&self.game);
        } else {
            self.renderer.emit_turn(&self.game);
            self.show_dice();
        }
    }
}

fn new_game(options: &ReplOptions, roster: Vec<Player>, seed_offset: u64) -> Result<Game, GameError> {
    let dice = match options.seed {
        Some(seed) => Dice::seeded(seed.wrapping_add(seed_offset)),
        None => Dice::new(),
    };
    Game::new(roster, dice)
}

/// Run the command loop until `quit` or end of input.
pub fn run_repl<R: BufRead, W: Write>(
    options: &ReplOptions,
    mut input: R,
    renderer: &mut Renderer<W>,
) -> io::Result<SessionSummary> {
    let mut session = Session::start(options, renderer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut line = String::new();
    loop {
        if options.interactive {
            let name = session.game.current_player().name.clone();
            session.renderer.emit_prompt(&name);
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(c) => c,
            Err(e) => {
                session.renderer.emit_error(&e.to_string());
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(e) = session.execute(command) {
            session.renderer.emit_error(&e.to_string());
        }
        // Anything not already drained (holds, rolls) still belongs in the journal.
        session.flush_events();
    }

    session.flush_events();
    let _ = session.renderer.writer.flush();
    Ok(session.summary)
}

/// Rebuild the game recorded at `path` and print its score table, plus the
/// result when the game was played to the end.
pub fn show_replay<W: Write>(path: &Path, renderer: &mut Renderer<W>) -> Result<(), JournalError> {
    let game = replay_file(path)?;
    renderer.emit_table(&game);
    if game.is_finished() {
        renderer.emit_game_over(&game);
    }
    Ok(())
}
