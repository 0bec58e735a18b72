//! Scoring rules.
//!
//! Everything here is a pure function of the dice and, for the Joker rule,
//! the player's score card.

use yz_protocol::{Category, DICE_COUNT};

use crate::scorecard::ScoreCard;

pub const FULL_HOUSE_POINTS: u32 = 25;
pub const SMALL_STRAIGHT_POINTS: u32 = 30;
pub const LARGE_STRAIGHT_POINTS: u32 = 40;
pub const YAHTZEE_POINTS: u32 = 50;
pub const BONUS_YAHTZEE_POINTS: u32 = 100;
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS_POINTS: u32 = 35;

type Roll = [u8; DICE_COUNT];

/// How many dice show each face; index 0 is unused.
fn face_counts(dice: &Roll) -> [u8; 7] {
    let mut counts = [0u8; 7];
    for &d in dice {
        if (1..=6).contains(&d) {
            counts[d as usize] += 1;
        }
    }
    counts
}

fn sum(dice: &Roll) -> u32 {
    dice.iter().map(|&d| u32::from(d)).sum()
}

fn has_of_a_kind(dice: &Roll, n: u8) -> bool {
    face_counts(dice).iter().any(|&c| c >= n)
}

/// Length of the longest run of consecutive distinct faces.
fn longest_run(dice: &Roll) -> usize {
    let counts = face_counts(dice);
    let mut best = 0;
    let mut run = 0;
    for face in 1..=6 {
        if counts[face] > 0 {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

pub fn is_yahtzee(dice: &Roll) -> bool {
    dice.iter().all(|&d| d == dice[0])
}

/// Points for `category` on face value alone, with no Joker.
pub fn base_score(category: Category, dice: &Roll) -> u32 {
    match category {
        Category::Chance => sum(dice),
        Category::ThreeOfAKind if has_of_a_kind(dice, 3) => sum(dice),
        Category::FourOfAKind if has_of_a_kind(dice, 4) => sum(dice),
        Category::FullHouse => {
            let mut present: Vec<u8> = face_counts(dice).into_iter().filter(|&c| c > 0).collect();
            present.sort_unstable();
            if present == [2, 3] {
                FULL_HOUSE_POINTS
            } else {
                0
            }
        }
        Category::SmallStraight if longest_run(dice) >= 4 => SMALL_STRAIGHT_POINTS,
        Category::LargeStraight if longest_run(dice) == 5 => LARGE_STRAIGHT_POINTS,
        Category::Yahtzee if is_yahtzee(dice) => YAHTZEE_POINTS,
        c => match c.upper_face() {
            Some(face) => dice
                .iter()
                .filter(|&&d| d == face)
                .map(|&d| u32::from(d))
                .sum(),
            None => 0,
        },
    }
}

/// The dice are a Yahtzee, the Yahtzee box already holds 50 and the
/// matching upper box is filled.
pub fn joker_applies(dice: &Roll, card: &ScoreCard) -> bool {
    if !is_yahtzee(dice) || card.get(Category::Yahtzee) != Some(YAHTZEE_POINTS) {
        return false;
    }
    Category::for_face(dice[0]).is_some_and(|upper| card.is_filled(upper))
}

/// Committing these dice earns a bonus Yahtzee.
pub fn earns_bonus_yahtzee(dice: &Roll, card: &ScoreCard) -> bool {
    is_yahtzee(dice) && card.get(Category::Yahtzee) == Some(YAHTZEE_POINTS)
}

/// Points `card` would receive for committing `dice` to `category`.
pub fn score(category: Category, dice: &Roll, card: &ScoreCard) -> u32 {
    if joker_applies(dice, card) {
        match category {
            Category::FullHouse => return FULL_HOUSE_POINTS,
            Category::SmallStraight => return SMALL_STRAIGHT_POINTS,
            Category::LargeStraight => return LARGE_STRAIGHT_POINTS,
            _ => {}
        }
    }
    base_score(category, dice)
}
