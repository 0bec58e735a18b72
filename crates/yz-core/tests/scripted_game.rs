//! Integration tests that play whole games through the command loop.
//!
//! Dice are seeded, but the tests only rely on rule invariants, never on
//! particular faces coming up.

use std::io::Cursor;

use yz_core::game::Player;
use yz_core::journal::{read_entries, replay};
use yz_core::renderer::{Glyphs, Renderer};
use yz_core::repl::{run_repl, ReplOptions, SessionSummary};
use yz_core::style::Style;
use yz_core::table::{Cell, ScoreTable};
use yz_protocol::{Category, GameEvent};

fn play(options: &ReplOptions, script: &str) -> (SessionSummary, String) {
    let mut renderer = Renderer::new_with_width(Vec::new(), Style::disabled(), Glyphs::UNICODE, 100);
    let summary = run_repl(options, Cursor::new(script.to_string()), &mut renderer)
        .expect("session failed");
    (summary, String::from_utf8_lossy(&renderer.writer).to_string())
}

/// Every player fills the card top to bottom, holding and rolling on the way.
fn full_game_script(players: usize) -> String {
    let mut script = String::new();
    for category in Category::ALL {
        for _ in 0..players {
            script.push_str("hold 1 2\nroll\nrelease all\nroll\n");
            script.push_str(&format!("score {}\n", category.name()));
        }
    }
    script
}

#[test]
fn two_player_game_journals_and_replays() {
    let dir = tempfile::tempdir().unwrap();
    let options = ReplOptions {
        roster: vec![Player::new("Patrick"), Player::new("James")],
        seed: Some(2024),
        journal_dir: Some(dir.path().to_path_buf()),
        interactive: false,
    };

    let (summary, out) = play(&options, &full_game_script(2));
    assert_eq!(summary.games_started, 1);
    assert_eq!(summary.games_finished, 1);
    assert!(out.contains("Game over:"));
    assert!(!out.contains("error:"), "unexpected error in:\n{out}");

    let path = summary.last_journal.expect("journal written");
    let entries = read_entries(&path).unwrap();
    let recorded_totals = entries
        .iter()
        .find_map(|e| match &e.event {
            GameEvent::Finished { totals } => Some(totals.clone()),
            _ => None,
        })
        .expect("finished event");

    let game = replay(&entries).unwrap();
    assert!(game.is_finished());
    assert_eq!(vec![game.total(0), game.total(1)], recorded_totals);

    let table = ScoreTable::build(&game);
    assert_eq!(table.headers, vec!["Patrick", "James"]);
    let grand = table.row("Grand total").unwrap();
    assert_eq!(
        grand.cells,
        recorded_totals.iter().map(|&t| Cell::Value(t)).collect::<Vec<_>>()
    );
}

#[test]
fn totals_add_up_on_every_card() {
    let dir = tempfile::tempdir().unwrap();
    let options = ReplOptions {
        roster: Player::roster(3, &[]).unwrap(),
        seed: Some(7),
        journal_dir: Some(dir.path().to_path_buf()),
        interactive: false,
    };
    let (summary, _) = play(&options, &full_game_script(3));
    let entries = read_entries(&summary.last_journal.unwrap()).unwrap();
    let game = replay(&entries).unwrap();

    for i in 0..3 {
        let card = game.card(i);
        assert!(card.is_complete());
        let boxes: u32 = Category::ALL.iter().filter_map(|c| card.get(*c)).sum();
        let expected = boxes + card.upper_bonus() + card.bonus_yahtzee_score();
        assert_eq!(card.grand_total(), expected);
        assert!(card.upper_bonus() == 0 || card.upper_subtotal() >= 63);
    }
}

#[test]
fn second_game_gets_its_own_journal() {
    let dir = tempfile::tempdir().unwrap();
    let options = ReplOptions {
        roster: vec![Player::new("Solo")],
        seed: Some(1),
        journal_dir: Some(dir.path().to_path_buf()),
        interactive: false,
    };
    let script = format!("{}new Again\nscore chance\n", full_game_script(1));
    let (summary, out) = play(&options, &script);
    assert_eq!(summary.games_started, 2);
    assert_eq!(summary.games_finished, 1);
    assert!(out.contains("Again's turn"));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);

    let entries = read_entries(&summary.last_journal.unwrap()).unwrap();
    assert!(matches!(
        &entries[0].event,
        GameEvent::Started { players } if players == &vec!["Again".to_string()]
    ));
    let started = entries
        .iter()
        .filter(|e| matches!(e.event, GameEvent::Started { .. }))
        .count();
    assert_eq!(started, 1);
    let game = replay(&entries).unwrap();
    assert!(game.card(0).is_filled(Category::Chance));
    assert_eq!(game.card(0).open_categories().count(), 12);
}

#[test]
fn quick_restart_journals_each_game_separately() {
    let dir = tempfile::tempdir().unwrap();
    let options = ReplOptions {
        roster: vec![Player::new("Solo")],
        seed: Some(5),
        journal_dir: Some(dir.path().to_path_buf()),
        interactive: false,
    };
    let (summary, _) = play(&options, "score chance\nnew Again\nscore chance\n");
    assert_eq!(summary.games_started, 2);

    let mut paths: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    paths.sort();
    assert_eq!(paths.len(), 2);
    for path in &paths {
        let entries = read_entries(path).unwrap();
        let game = replay(&entries).unwrap();
        assert!(game.card(0).is_filled(Category::Chance));
    }
}

#[test]
fn errors_do_not_end_the_session() {
    let options = ReplOptions {
        roster: vec![Player::new("Solo")],
        seed: Some(3),
        journal_dir: None,
        interactive: false,
    };
    let (_, out) = play(&options, "score chance\nscore chance\nbogus\nhint\n");
    assert!(out.contains("error: Solo has already played Chance"));
    assert!(out.contains("error: unknown command 'bogus'"));
    assert!(out.contains("hint: "));
}
