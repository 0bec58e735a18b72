//! A single player's score card.

use yz_protocol::{Category, Section};

use crate::scoring::{BONUS_YAHTZEE_POINTS, UPPER_BONUS_POINTS, UPPER_BONUS_THRESHOLD};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreCard {
    boxes: [Option<u32>; 13],
    bonus_yahtzees: u32,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<u32> {
        self.boxes[category.index()]
    }

    pub fn is_filled(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    /// Fill a box. The caller checks it was open.
    pub fn record(&mut self, category: Category, points: u32) {
        self.boxes[category.index()] = Some(points);
    }

    pub fn add_bonus_yahtzee(&mut self) {
        self.bonus_yahtzees += 1;
    }

    pub fn bonus_yahtzees(&self) -> u32 {
        self.bonus_yahtzees
    }

    pub fn bonus_yahtzee_score(&self) -> u32 {
        self.bonus_yahtzees * BONUS_YAHTZEE_POINTS
    }

    fn section_sum(&self, section: Section) -> u32 {
        Category::ALL
            .iter()
            .filter(|c| c.section() == section)
            .filter_map(|c| self.get(*c))
            .sum()
    }

    pub fn upper_subtotal(&self) -> u32 {
        self.section_sum(Section::Upper)
    }

    pub fn upper_bonus(&self) -> u32 {
        if self.upper_subtotal() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS_POINTS
        } else {
            0
        }
    }

    pub fn upper_total(&self) -> u32 {
        self.upper_subtotal() + self.upper_bonus()
    }

    pub fn lower_subtotal(&self) -> u32 {
        self.section_sum(Section::Lower)
    }

    /// Lower boxes plus bonus Yahtzees.
    pub fn lower_total(&self) -> u32 {
        self.lower_subtotal() + self.bonus_yahtzee_score()
    }

    pub fn grand_total(&self) -> u32 {
        self.upper_total() + self.lower_total()
    }

    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |c| !self.is_filled(*c))
    }

    pub fn is_complete(&self) -> bool {
        self.boxes.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_card() {
        let card = ScoreCard::new();
        assert_eq!(card.grand_total(), 0);
        assert!(!card.is_complete());
        assert_eq!(card.open_categories().count(), 13);
    }

    #[test]
    fn upper_bonus_at_threshold() {
        let mut card = ScoreCard::new();
        card.record(Category::Aces, 3);
        card.record(Category::Twos, 6);
        card.record(Category::Threes, 9);
        card.record(Category::Fours, 12);
        card.record(Category::Fives, 15);
        card.record(Category::Sixes, 17);
        assert_eq!(card.upper_subtotal(), 62);
        assert_eq!(card.upper_bonus(), 0);

        card.record(Category::Sixes, 18);
        assert_eq!(card.upper_subtotal(), 63);
        assert_eq!(card.upper_bonus(), 35);
        assert_eq!(card.upper_total(), 98);
    }

    #[test]
    fn bonus_yahtzees_count_in_lower_total() {
        let mut card = ScoreCard::new();
        card.record(Category::Yahtzee, 50);
        card.record(Category::FullHouse, 25);
        card.add_bonus_yahtzee();
        card.add_bonus_yahtzee();
        assert_eq!(card.bonus_yahtzees(), 2);
        assert_eq!(card.lower_subtotal(), 75);
        assert_eq!(card.lower_total(), 275);
        assert_eq!(card.grand_total(), 275);
    }

    #[test]
    fn complete_after_thirteen_boxes() {
        let mut card = ScoreCard::new();
        for c in Category::ALL {
            assert!(!card.is_complete());
            card.record(c, 0);
        }
        assert!(card.is_complete());
        assert_eq!(card.open_categories().count(), 0);
    }
}
