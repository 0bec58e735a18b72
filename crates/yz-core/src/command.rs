//! Parsing of REPL input lines.

use thiserror::Error;
use yz_protocol::{Category, ParseCategoryError, DICE_COUNT};

/// A parsed player command. Die indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Roll,
    Hold(Vec<usize>),
    Release(Vec<usize>),
    ReleaseAll,
    Toggle(Vec<usize>),
    Score(Category),
    Table,
    Dice,
    Hint,
    New(Vec<String>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("type a command, or 'help'")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{0}' needs at least one die number (1-5)")]
    MissingDice(String),
    #[error("'{0}' is not a die number, dice are numbered 1-5")]
    BadDie(String),
    #[error("which category? e.g. 'score full house'")]
    MissingCategory,
    #[error(transparent)]
    Category(#[from] ParseCategoryError),
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };
        let rest: Vec<&str> = words.collect();
        let verb_lower = verb.to_ascii_lowercase();

        let command = match verb_lower.as_str() {
            "roll" | "r" => Command::Roll,
            "hold" | "h" | "keep" => Command::Hold(parse_dice(verb, &rest)?),
            "release" | "u" | "unhold" => {
                if rest.len() == 1 && rest[0].eq_ignore_ascii_case("all") {
                    Command::ReleaseAll
                } else {
                    Command::Release(parse_dice(verb, &rest)?)
                }
            }
            "toggle" | "t" => Command::Toggle(parse_dice(verb, &rest)?),
            "score" | "s" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingCategory);
                }
                Command::Score(rest.join(" ").parse()?)
            }
            "table" | "card" => Command::Table,
            "dice" => Command::Dice,
            "hint" => Command::Hint,
            "new" => Command::New(rest.iter().map(|s| s.to_string()).collect()),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ if rest.is_empty() && verb.chars().all(|c| c.is_ascii_digit()) => {
                Command::Toggle(parse_dice(verb, &[verb])?)
            }
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };
        Ok(command)
    }
}

/// Accept "1 3 5", "1,3,5" or "135"; duplicates collapse.
fn parse_dice(verb: &str, args: &[&str]) -> Result<Vec<usize>, CommandError> {
    let mut dice = Vec::new();
    for arg in args {
        for token in arg.split(',').filter(|t| !t.is_empty()) {
            let digits: Vec<char> = if token.chars().all(|c| c.is_ascii_digit()) {
                token.chars().collect()
            } else {
                return Err(CommandError::BadDie(token.to_string()));
            };
            for d in digits {
                let n = d.to_digit(10).unwrap_or(0) as usize;
                if n == 0 || n > DICE_COUNT {
                    return Err(CommandError::BadDie(d.to_string()));
                }
                if !dice.contains(&(n - 1)) {
                    dice.push(n - 1);
                }
            }
        }
    }
    if dice.is_empty() {
        return Err(CommandError::MissingDice(verb.to_string()));
    }
    Ok(dice)
}
