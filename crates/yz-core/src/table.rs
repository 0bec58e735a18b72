//! Score table: a row/column projection of a game for display.

use yz_protocol::Category;

use crate::game::Game;
use crate::scorecard::ScoreCard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Category,
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// A recorded score or computed total.
    Value(u32),
    /// What the current player would get for this open box.
    Potential(u32),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub style: RowStyle,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTable {
    /// One header per player; the current player is prefixed `* `.
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl ScoreTable {
    pub fn build(game: &Game) -> Self {
        let headers = game
            .players()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if !game.is_finished() && i == game.whose_turn() {
                    format!("* {}", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect();

        let mut rows = Vec::with_capacity(Category::ALL.len() + 6);
        for category in Category::UPPER {
            rows.push(category_row(game, category));
        }
        rows.push(total_row(game, "Upper section bonus", ScoreCard::upper_bonus));
        rows.push(total_row(game, "Upper section total", ScoreCard::upper_total));
        for category in Category::LOWER {
            rows.push(category_row(game, category));
        }
        rows.push(Row {
            label: "Bonus Yahtzees".to_string(),
            style: RowStyle::Category,
            cells: per_player(game, |card| Cell::Value(card.bonus_yahtzees())),
        });
        rows.push(Row {
            label: "Bonus Yahtzee score".to_string(),
            style: RowStyle::Category,
            cells: per_player(game, |card| Cell::Value(card.bonus_yahtzee_score())),
        });
        rows.push(total_row(game, "Lower section score", ScoreCard::lower_total));
        rows.push(total_row(game, "Grand total", ScoreCard::grand_total));

        Self { headers, rows }
    }

    pub fn row(&self, label: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.label == label)
    }
}

fn per_player(game: &Game, f: impl Fn(&ScoreCard) -> Cell) -> Vec<Cell> {
    (0..game.players().len()).map(|i| f(game.card(i))).collect()
}

fn total_row(game: &Game, label: &str, total: fn(&ScoreCard) -> u32) -> Row {
    Row {
        label: label.to_string(),
        style: RowStyle::Total,
        cells: per_player(game, |card| Cell::Value(total(card))),
    }
}

fn category_row(game: &Game, category: Category) -> Row {
    let cells = (0..game.players().len())
        .map(|i| match game.card(i).get(category) {
            Some(points) => Cell::Value(points),
            None if i == game.whose_turn() => {
                game.potential(category).map_or(Cell::Empty, Cell::Potential)
            }
            None => Cell::Empty,
        })
        .collect();
    Row {
        label: category.name().to_string(),
        style: RowStyle::Category,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Dice;
    use crate::game::Player;

    fn game() -> Game {
        let players = vec![Player::new("Ann"), Player::new("Bob")];
        Game::new(players, Dice::seeded(2)).unwrap()
    }

    #[test]
    fn row_layout() {
        let table = ScoreTable::build(&game());
        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels.len(), 19);
        assert_eq!(labels[0], "Aces");
        assert_eq!(labels[6], "Upper section bonus");
        assert_eq!(labels[7], "Upper section total");
        assert_eq!(labels[8], "Three of a kind");
        assert_eq!(labels[14], "Chance");
        assert_eq!(&labels[15..], &["Bonus Yahtzees", "Bonus Yahtzee score", "Lower section score", "Grand total"]);
    }

    #[test]
    fn current_player_header_is_marked() {
        let mut game = game();
        let table = ScoreTable::build(&game);
        assert_eq!(table.headers, vec!["* Ann", "Bob"]);

        game.score(Category::Chance).unwrap();
        let table = ScoreTable::build(&game);
        assert_eq!(table.headers, vec!["Ann", "* Bob"]);
    }

    #[test]
    fn cells_show_scores_and_potentials() {
        let mut game = game();
        game.set_dice([3, 3, 3, 2, 2]).unwrap();
        let table = ScoreTable::build(&game);
        let full_house = table.row("Full house").unwrap();
        assert_eq!(full_house.cells, vec![Cell::Potential(25), Cell::Empty]);

        game.score(Category::FullHouse).unwrap();
        game.set_dice([1, 1, 1, 1, 2]).unwrap();
        let table = ScoreTable::build(&game);
        let full_house = table.row("Full house").unwrap();
        assert_eq!(full_house.cells, vec![Cell::Value(25), Cell::Potential(0)]);
        let grand = table.row("Grand total").unwrap();
        assert_eq!(grand.style, RowStyle::Total);
        assert_eq!(grand.cells, vec![Cell::Value(25), Cell::Value(0)]);
    }
}
