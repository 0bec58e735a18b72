//! The turn state machine.
//!
//! A `Game` owns the dice and one score card per player. Every mutation
//! queues `GameEvent`s which the front end drains with `take_events()` to
//! feed the journal and decide what to redraw.

use thiserror::Error;
use tracing::debug;
use yz_protocol::{Category, GameEvent, DICE_COUNT};

use crate::dice::{Dice, DiceError};
use crate::scorecard::ScoreCard;
use crate::scoring;

pub const MAX_PLAYERS: usize = 10;
pub const ROLLS_PER_TURN: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("a game takes at most 10 players, not {0}")]
    TooManyPlayers(usize),
    #[error("player {0} has a blank name")]
    BlankName(usize),
    #[error("{player} is out of rolls, pick a category to score")]
    OutOfRolls { player: String },
    #[error("{player} has already played {category}")]
    CategoryTaken { player: String, category: Category },
    #[error("the game is over")]
    GameOver,
    #[error(transparent)]
    Dice(#[from] DiceError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name given to the player in `slot` (0-based) when none is supplied.
    pub fn default_name(slot: usize) -> String {
        format!("Player {}", slot + 1)
    }

    /// Build a roster of `count` players, taking names in order and filling
    /// the rest with defaults. Extra names beyond `count` are ignored.
    pub fn roster(count: usize, names: &[String]) -> Result<Vec<Player>, GameError> {
        if count == 0 {
            return Err(GameError::NoPlayers);
        }
        if count > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers(count));
        }
        Ok((0..count)
            .map(|i| match names.get(i) {
                Some(name) => Player::new(name.trim()),
                None => Player::new(Player::default_name(i)),
            })
            .collect())
    }
}

#[derive(Debug)]
pub struct Game {
    players: Vec<Player>,
    cards: Vec<ScoreCard>,
    dice: Dice,
    whose_turn: usize,
    rolls_remaining: u8,
    finished: bool,
    events: Vec<GameEvent>,
}

impl Game {
    /// Start a game. The first player's opening roll has already happened.
    pub fn new(players: Vec<Player>, dice: Dice) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if players.len() > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers(players.len()));
        }
        if let Some(i) = players.iter().position(|p| p.name.trim().is_empty()) {
            return Err(GameError::BlankName(i + 1));
        }

        let cards = vec![ScoreCard::new(); players.len()];
        let mut game = Self {
            players,
            cards,
            dice,
            whose_turn: 0,
            rolls_remaining: ROLLS_PER_TURN,
            finished: false,
            events: Vec::new(),
        };
        game.events.push(GameEvent::Started {
            players: game.players.iter().map(|p| p.name.clone()).collect(),
        });
        game.push_rolled();
        debug!(players = game.players.len(), "game started");
        Ok(game)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Score card of the player at `player` in turn order.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not below `players().len()`.
    pub fn card(&self, player: usize) -> &ScoreCard {
        &self.cards[player]
    }

    pub fn whose_turn(&self) -> usize {
        self.whose_turn
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.whose_turn]
    }

    pub fn rolls_remaining(&self) -> u8 {
        self.rolls_remaining
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Grand total of the player at `player`, bonuses included.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not below `players().len()`.
    pub fn total(&self, player: usize) -> u32 {
        self.cards[player].grand_total()
    }

    /// Indices of every player sharing the highest total.
    pub fn winners(&self) -> Vec<usize> {
        let best = (0..self.players.len())
            .map(|i| self.total(i))
            .max()
            .unwrap_or(0);
        (0..self.players.len())
            .filter(|&i| self.total(i) == best)
            .collect()
    }

    /// Drain the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reroll the unheld dice.
    pub fn roll(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        if self.rolls_remaining == 0 {
            return Err(GameError::OutOfRolls {
                player: self.current_player().name.clone(),
            });
        }
        self.dice.roll();
        self.rolls_remaining -= 1;
        self.push_rolled();
        debug!(
            player = self.whose_turn,
            dice = ?self.dice.values(),
            rolls_remaining = self.rolls_remaining,
            "rolled"
        );
        Ok(())
    }

    /// Hold or release a die (0-based).
    pub fn set_held(&mut self, die: usize, held: bool) -> Result<(), GameError> {
        self.ensure_running()?;
        self.dice.set_held(die, held)?;
        self.events.push(GameEvent::Held {
            player: self.whose_turn,
            die,
            held,
        });
        Ok(())
    }

    pub fn toggle_held(&mut self, die: usize) -> Result<bool, GameError> {
        self.ensure_running()?;
        let held = self.dice.toggle_held(die)?;
        self.events.push(GameEvent::Held {
            player: self.whose_turn,
            die,
            held,
        });
        Ok(held)
    }

    /// Overwrite the dice faces without using a roll.
    pub fn set_dice(&mut self, values: [u8; DICE_COUNT]) -> Result<(), GameError> {
        self.ensure_running()?;
        self.dice.set_values(values)?;
        self.push_rolled();
        Ok(())
    }

    /// Restore dice and roll count exactly as recorded.
    pub(crate) fn restore_roll(
        &mut self,
        values: [u8; DICE_COUNT],
        rolls_remaining: u8,
    ) -> Result<(), GameError> {
        self.ensure_running()?;
        self.dice.set_values(values)?;
        self.rolls_remaining = rolls_remaining.min(ROLLS_PER_TURN);
        self.push_rolled();
        Ok(())
    }

    /// What the current player would score in `category` right now.
    pub fn potential(&self, category: Category) -> Option<u32> {
        let card = &self.cards[self.whose_turn];
        if self.finished || card.is_filled(category) {
            return None;
        }
        Some(scoring::score(category, &self.dice.values(), card))
    }

    /// The open category worth the most right now; ties go to the earlier box.
    pub fn best_category(&self) -> Option<(Category, u32)> {
        Category::ALL
            .into_iter()
            .filter_map(|c| self.potential(c).map(|p| (c, p)))
            .fold(None, |best, (c, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((c, p)),
            })
    }

    /// Commit the dice to `category` for the current player and pass the
    /// turn on. Returns the points recorded in the box.
    pub fn score(&mut self, category: Category) -> Result<u32, GameError> {
        self.ensure_running()?;
        let player = self.whose_turn;
        let dice = self.dice.values();
        let card = &self.cards[player];
        if card.is_filled(category) {
            return Err(GameError::CategoryTaken {
                player: self.players[player].name.clone(),
                category,
            });
        }

        let points = scoring::score(category, &dice, card);
        let bonus_yahtzee = scoring::earns_bonus_yahtzee(&dice, card);

        let card = &mut self.cards[player];
        card.record(category, points);
        if bonus_yahtzee {
            card.add_bonus_yahtzee();
        }
        self.events.push(GameEvent::Scored {
            player,
            category,
            points,
            bonus_yahtzee,
        });
        debug!(player, %category, points, bonus_yahtzee, "scored");

        if self.cards.iter().all(ScoreCard::is_complete) {
            self.finished = true;
            self.dice.clear_held();
            let totals = (0..self.players.len()).map(|i| self.total(i)).collect();
            self.events.push(GameEvent::Finished { totals });
            debug!("game finished");
        } else {
            self.whose_turn = (self.whose_turn + 1) % self.players.len();
            self.dice.clear_held();
            self.dice.roll();
            self.rolls_remaining = ROLLS_PER_TURN;
            self.push_rolled();
        }
        Ok(points)
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.finished {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn push_rolled(&mut self) {
        self.events.push(GameEvent::Rolled {
            player: self.whose_turn,
            dice: self.dice.values(),
            rolls_remaining: self.rolls_remaining,
        });
    }
}
