//! Testable game display output.
//!
//! `Renderer<W: Write>` centralizes all formatting for the REPL so tests can
//! render into a `Vec<u8>` and assert on plain text.

use std::io::Write;

use yz_protocol::{Category, DICE_COUNT};

use crate::dice::Dice;
use crate::game::Game;
use crate::style::{pad_left, pad_right, visible_width, Style};
use crate::table::{Cell, RowStyle, ScoreTable};

/// Characters used to draw a die.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
    pip: char,
}

impl Glyphs {
    pub const UNICODE: Glyphs = Glyphs {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
        pip: '●',
    };

    pub const ASCII: Glyphs = Glyphs {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
        pip: 'o',
    };
}

// Pip positions on a 3x3 grid, row-major: TL, TC, TR, ML, C, MR, BL, BC, BR.
const PIPS: [[bool; 9]; 6] = [
    [false, false, false, false, true, false, false, false, false],
    [true, false, false, false, false, false, false, false, true],
    [true, false, false, false, true, false, false, false, true],
    [true, false, true, false, false, false, true, false, true],
    [true, false, true, false, true, false, true, false, true],
    [true, false, true, true, false, true, true, false, true],
];

/// Width of one drawn die, borders included.
const DIE_WIDTH: usize = 9;

/// The five text lines of a single die face.
pub fn die_face(value: u8, glyphs: &Glyphs) -> [String; 5] {
    let pips = PIPS[usize::from(value.clamp(1, 6)) - 1];
    let border = glyphs.horizontal.to_string().repeat(DIE_WIDTH - 2);
    let row = |r: usize| {
        let spot = |c: usize| if pips[r * 3 + c] { glyphs.pip } else { ' ' };
        format!(
            "{v} {} {} {} {v}",
            spot(0),
            spot(1),
            spot(2),
            v = glyphs.vertical
        )
    };
    [
        format!("{}{border}{}", glyphs.top_left, glyphs.top_right),
        row(0),
        row(1),
        row(2),
        format!("{}{border}{}", glyphs.bottom_left, glyphs.bottom_right),
    ]
}

pub struct Renderer<W: Write> {
    pub writer: W,
    style: Style,
    glyphs: Glyphs,
    term_width: u16,
}

impl<W: Write> Renderer<W> {
    pub fn new(writer: W, style: Style, glyphs: Glyphs) -> Self {
        let term_width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(80);
        Self {
            writer,
            style,
            glyphs,
            term_width,
        }
    }

    pub fn new_with_width(writer: W, style: Style, glyphs: Glyphs, width: u16) -> Self {
        Self {
            writer,
            style,
            glyphs,
            term_width: width,
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Dice drawn side by side when the terminal is wide enough, otherwise
    /// one compact line.
    pub fn emit_dice(&mut self, dice: &Dice, rolls_remaining: u8) {
        let s = &self.style;
        let gap = 2;
        let sep = " ".repeat(gap);
        let wide = DIE_WIDTH * DICE_COUNT + gap * (DICE_COUNT - 1);

        if usize::from(self.term_width) >= wide {
            let faces: Vec<[String; 5]> = dice
                .values()
                .iter()
                .map(|&v| die_face(v, &self.glyphs))
                .collect();
            for line in 0..5 {
                let parts: Vec<String> = (0..DICE_COUNT)
                    .map(|i| {
                        if dice.is_held(i) {
                            format!("{}{}{}", s.yellow_start(), faces[i][line], s.reset())
                        } else {
                            faces[i][line].clone()
                        }
                    })
                    .collect();
                let _ = writeln!(self.writer, "{}", parts.join(sep.as_str()));
            }
            let labels: Vec<String> = (0..DICE_COUNT)
                .map(|i| {
                    let label = if dice.is_held(i) {
                        format!("{} held", i + 1)
                    } else {
                        format!("{}", i + 1)
                    };
                    center(&label, DIE_WIDTH)
                })
                .collect();
            let _ = writeln!(self.writer, "{}", labels.join(sep.as_str()));
        } else {
            let parts: Vec<String> = dice
                .values()
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    if dice.is_held(i) {
                        format!("{}[{v}]{}", s.yellow_start(), s.reset())
                    } else {
                        format!(" {v} ")
                    }
                })
                .collect();
            let _ = writeln!(self.writer, "{}", parts.join(" "));
        }

        let _ = writeln!(
            self.writer,
            "{}{} left{}",
            s.dim_start(),
            plural(rolls_remaining.into(), "roll"),
            s.reset()
        );
        let _ = self.writer.flush();
    }

    /// Whose turn it is.
    pub fn emit_turn(&mut self, game: &Game) {
        let s = &self.style;
        let _ = writeln!(
            self.writer,
            "\n{}{}── {}'s turn ──{}",
            s.bold_start(),
            s.cyan_start(),
            game.current_player().name,
            s.reset()
        );
    }

    pub fn emit_table(&mut self, game: &Game) {
        let table = ScoreTable::build(game);
        let s = &self.style;

        let label_width = table
            .rows
            .iter()
            .map(|r| visible_width(&r.label))
            .max()
            .unwrap_or(0);
        let col_widths: Vec<usize> = table
            .headers
            .iter()
            .map(|h| visible_width(h).max(5))
            .collect();

        let mut header = pad_right("", label_width);
        for (h, w) in table.headers.iter().zip(&col_widths) {
            header.push_str("  ");
            header.push_str(&pad_left(h, *w));
        }
        let _ = writeln!(
            self.writer,
            "{}{}{}",
            s.bold_start(),
            header.trim_end(),
            s.reset()
        );

        for row in &table.rows {
            let mut line = String::new();
            let bold = row.style == RowStyle::Total;
            if bold {
                line.push_str(s.bold_start());
            }
            line.push_str(&pad_right(&row.label, label_width));
            if bold {
                line.push_str(s.reset());
            }
            for (cell, w) in row.cells.iter().zip(&col_widths) {
                let text = match cell {
                    Cell::Value(v) if bold => format!("{}{v}{}", s.bold_start(), s.reset()),
                    Cell::Value(v) => v.to_string(),
                    Cell::Potential(v) => format!("{}({v}){}", s.dim_start(), s.reset()),
                    Cell::Empty => String::new(),
                };
                line.push_str("  ");
                line.push_str(&pad_left(&text, *w));
            }
            let _ = writeln!(self.writer, "{}", line.trim_end());
        }
        let _ = self.writer.flush();
    }

    pub fn emit_scored(&mut self, player: &str, category: Category, points: u32, bonus: bool) {
        let s = &self.style;
        let _ = write!(
            self.writer,
            "{}{player} scored {} in {category}{}",
            s.green_start(),
            plural(points, "point"),
            s.reset()
        );
        if bonus {
            let _ = write!(
                self.writer,
                " {}+ bonus Yahtzee!{}",
                s.bold_start(),
                s.reset()
            );
        }
        let _ = writeln!(self.writer);
    }

    pub fn emit_hint(&mut self, best: Option<(Category, u32)>) {
        let s = &self.style;
        let _ = match best {
            Some((category, points)) => writeln!(
                self.writer,
                "{}hint: {category} for {}{}",
                s.dim_start(),
                plural(points, "point"),
                s.reset()
            ),
            None => writeln!(self.writer, "no open categories"),
        };
    }

    pub fn emit_game_over(&mut self, game: &Game) {
        let s = &self.style;
        let winners = game.winners();
        let names: Vec<&str> = winners
            .iter()
            .map(|&i| game.players()[i].name.as_str())
            .collect();
        let top = winners.first().map(|&i| game.total(i)).unwrap_or(0);
        let verdict = if game.players().len() == 1 {
            format!("{} finished with {}", names.join(""), plural(top, "point"))
        } else if names.len() > 1 {
            format!("tie between {} at {}", names.join(" and "), plural(top, "point"))
        } else {
            format!("{} wins with {}", names.join(""), plural(top, "point"))
        };
        let _ = writeln!(
            self.writer,
            "\n{}{}Game over: {verdict}{}",
            s.bold_start(),
            s.green_start(),
            s.reset()
        );
        let _ = writeln!(self.writer, "type 'new' to play again or 'quit' to leave");
    }

    pub fn emit_info(&mut self, msg: &str) {
        let _ = writeln!(self.writer, "{msg}");
    }

    pub fn emit_error(&mut self, msg: &str) {
        let _ = writeln!(
            self.writer,
            "{}error:{} {msg}",
            self.style.red_start(),
            self.style.reset()
        );
        let _ = self.writer.flush();
    }

    pub fn emit_prompt(&mut self, player: &str) {
        let _ = write!(
            self.writer,
            "{}{player} ❯{} ",
            self.style.cyan_start(),
            self.style.reset()
        );
        let _ = self.writer.flush();
    }

    pub fn emit_help(&mut self) {
        let s = &self.style;
        let _ = writeln!(self.writer, "{}Commands{}", s.bold_start(), s.reset());
        for (cmd, what) in HELP {
            let _ = writeln!(self.writer, "  {}  {what}", pad_right(cmd, 18));
        }
        let _ = writeln!(
            self.writer,
            "{}categories: aces..sixes (1s..6s), 3k, 4k, fh, ss, ls, yahtzee, chance{}",
            s.dim_start(),
            s.reset()
        );
    }
}

const HELP: &[(&str, &str)] = &[
    ("roll, r", "reroll the dice you are not holding"),
    ("hold N..., h", "hold dice, e.g. 'hold 1 3 5'"),
    ("release N|all, u", "release held dice"),
    ("toggle N..., t", "flip held dice; a bare '135' does the same"),
    ("score CAT, s", "score the dice, e.g. 'score full house'"),
    ("table, card", "show the score table"),
    ("dice", "show the dice"),
    ("hint", "suggest the best open category"),
    ("new [NAME...]", "start a new game"),
    ("help, ?", "show this help"),
    ("quit, q", "leave"),
];

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn center(s: &str, width: usize) -> String {
    let len = visible_width(s);
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(len + left);
    format!("{}{s}{}", " ".repeat(left), " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    fn renderer(width: u16) -> Renderer<Vec<u8>> {
        Renderer::new_with_width(Vec::new(), Style::disabled(), Glyphs::ASCII, width)
    }

    fn output(r: &Renderer<Vec<u8>>) -> String {
        String::from_utf8_lossy(&r.writer).to_string()
    }

    fn solo(name: &str) -> Game {
        Game::new(vec![Player::new(name)], Dice::seeded(9)).unwrap()
    }

    #[test]
    fn die_faces() {
        let one = die_face(1, &Glyphs::ASCII);
        assert_eq!(one[0], "+-------+");
        assert_eq!(one[1], "|       |");
        assert_eq!(one[2], "|   o   |");
        assert_eq!(one[3], "|       |");

        let six = die_face(6, &Glyphs::ASCII);
        assert_eq!(six[1], "| o   o |");
        assert_eq!(six[2], "| o   o |");
        assert_eq!(six[3], "| o   o |");

        let five = die_face(5, &Glyphs::UNICODE);
        assert_eq!(five[0], "┌───────┐");
        assert_eq!(five[2], "│   ●   │");
        assert_eq!(five[4], "└───────┘");
    }

    #[test]
    fn pip_counts_match_faces() {
        for v in 1..=6u8 {
            let pips: usize = die_face(v, &Glyphs::ASCII)[1..4]
                .iter()
                .map(|l| l.matches('o').count())
                .sum();
            assert_eq!(pips, usize::from(v));
        }
    }

    #[test]
    fn wide_dice_show_held_labels() {
        let mut game = solo("Ann");
        game.set_dice([1, 2, 3, 4, 5]).unwrap();
        game.set_held(1, true).unwrap();
        let mut r = renderer(80);
        r.emit_dice(game.dice(), game.rolls_remaining());
        let out = output(&r);
        assert!(out.contains("2 held"));
        assert!(out.contains("2 rolls left"));
        assert_eq!(out.lines().count(), 7);
    }

    #[test]
    fn narrow_dice_are_compact() {
        let mut game = solo("Ann");
        game.set_dice([6, 6, 1, 2, 3]).unwrap();
        game.set_held(0, true).unwrap();
        game.roll().unwrap();
        let mut r = renderer(30);
        r.emit_dice(game.dice(), game.rolls_remaining());
        let out = output(&r);
        assert!(out.starts_with("[6]"));
        assert!(out.contains("1 roll left"));
    }

    #[test]
    fn table_aligns_columns() {
        let mut game = Game::new(
            vec![Player::new("Ann"), Player::new("Bob")],
            Dice::seeded(4),
        )
        .unwrap();
        game.set_dice([2, 2, 2, 3, 3]).unwrap();
        game.score(Category::FullHouse).unwrap();
        let mut r = renderer(80);
        r.emit_table(&game);
        let out = output(&r);
        let header = out.lines().next().unwrap();
        assert!(header.contains("Ann"));
        assert!(header.contains("* Bob"));
        let full_house = out.lines().find(|l| l.starts_with("Full house")).unwrap();
        assert!(full_house.contains("25"));
        let grand = out.lines().find(|l| l.starts_with("Grand total")).unwrap();
        assert!(grand.contains("25"));
        assert!(out.lines().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn table_aligns_wide_names() {
        let mut game = Game::new(
            vec![Player::new("山田太郎"), Player::new("Bob")],
            Dice::seeded(4),
        )
        .unwrap();
        game.set_dice([2, 2, 2, 3, 3]).unwrap();
        game.score(Category::FullHouse).unwrap();
        let mut r = renderer(80);
        r.emit_table(&game);
        let out = output(&r);
        let header = out.lines().next().unwrap();
        let grand = out.lines().find(|l| l.starts_with("Grand total")).unwrap();
        assert_eq!(visible_width(header), visible_width(grand));
        let name_end = header.find("山田太郎").unwrap() + "山田太郎".len();
        let first_cell_end = visible_width(&header[..name_end]);
        assert_eq!(visible_width(grand.split("25").next().unwrap()) + 2, first_cell_end);
    }

    #[test]
    fn scored_message_mentions_bonus() {
        let mut r = renderer(80);
        r.emit_scored("Ann", Category::FullHouse, 25, true);
        assert_eq!(output(&r), "Ann scored 25 points in Full house + bonus Yahtzee!\n");
    }

    #[test]
    fn game_over_names_winner() {
        let mut game = solo("Ann");
        for c in Category::ALL {
            game.set_dice([1, 1, 1, 1, 1]).unwrap();
            game.score(c).unwrap();
        }
        let mut r = renderer(80);
        r.emit_game_over(&game);
        let out = output(&r);
        assert!(out.contains("Game over: Ann finished with"));
    }

    #[test]
    fn errors_and_hints() {
        let mut r = renderer(80);
        r.emit_error("bad things");
        r.emit_hint(Some((Category::Chance, 1)));
        r.emit_hint(None);
        assert_eq!(
            output(&r),
            "error: bad things\nhint: Chance for 1 point\nno open categories\n"
        );
    }
}
