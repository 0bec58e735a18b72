//! Score-card categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which half of the score card a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Upper,
    Lower,
}

/// One box on the score card, in score-card order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Aces,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    pub const UPPER: [Category; 6] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    pub const LOWER: [Category; 7] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// Display name as printed on the score card.
    pub fn name(self) -> &'static str {
        match self {
            Category::Aces => "Aces",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "Three of a kind",
            Category::FourOfAKind => "Four of a kind",
            Category::FullHouse => "Full house",
            Category::SmallStraight => "Small straight",
            Category::LargeStraight => "Large straight",
            Category::Yahtzee => "Yahtzee",
            Category::Chance => "Chance",
        }
    }

    pub fn section(self) -> Section {
        if self.upper_face().is_some() {
            Section::Upper
        } else {
            Section::Lower
        }
    }

    /// Position on the score card, 0..13.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The die face counted by an upper-section box.
    pub fn upper_face(self) -> Option<u8> {
        match self {
            Category::Aces => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    /// The upper-section box that counts `face`.
    pub fn for_face(face: u8) -> Option<Category> {
        Category::UPPER
            .iter()
            .copied()
            .find(|c| c.upper_face() == Some(face))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        let category = match key.as_str() {
            "aces" | "ones" | "1s" => Category::Aces,
            "twos" | "2s" => Category::Twos,
            "threes" | "3s" => Category::Threes,
            "fours" | "4s" => Category::Fours,
            "fives" | "5s" => Category::Fives,
            "sixes" | "6s" => Category::Sixes,
            "threeofakind" | "3k" | "3ofakind" => Category::ThreeOfAKind,
            "fourofakind" | "4k" | "4ofakind" => Category::FourOfAKind,
            "fullhouse" | "fh" => Category::FullHouse,
            "smallstraight" | "ss" => Category::SmallStraight,
            "largestraight" | "ls" => Category::LargeStraight,
            "yahtzee" | "yz" | "y" => Category::Yahtzee,
            "chance" | "ch" => Category::Chance,
            _ => return Err(ParseCategoryError(s.trim().to_string())),
        };
        Ok(category)
    }
}
