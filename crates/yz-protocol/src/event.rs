//! Game events emitted by the engine.

use serde::{Deserialize, Serialize};

use crate::Category;

/// Number of dice in play.
pub const DICE_COUNT: usize = 5;

/// A single state change in a game, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new game began with these players, in turn order.
    #[serde(rename = "started")]
    Started { players: Vec<String> },
    /// The dice were rolled (or set) for `player`.
    #[serde(rename = "rolled")]
    Rolled {
        player: usize,
        dice: [u8; DICE_COUNT],
        rolls_remaining: u8,
    },
    /// A die was held or released. `die` is 0-based.
    #[serde(rename = "held")]
    Held {
        player: usize,
        die: usize,
        held: bool,
    },
    /// `player` committed the dice to `category`.
    #[serde(rename = "scored")]
    Scored {
        player: usize,
        category: Category,
        points: u32,
        #[serde(default)]
        bonus_yahtzee: bool,
    },
    /// Every score card is complete.
    #[serde(rename = "finished")]
    Finished { totals: Vec<u32> },
}
