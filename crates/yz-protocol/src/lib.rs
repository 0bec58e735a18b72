//! yz-protocol: Shared types for the Yahtzee game.
//!
//! This crate defines the score-card vocabulary and the event records
//! exchanged between the game engine, the journal and any front end.

pub mod category;
pub mod event;

pub use category::{Category, ParseCategoryError, Section};
pub use event::{GameEvent, DICE_COUNT};
