use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, error};
use yz_core::config::Config;
use yz_core::renderer::{Glyphs, Renderer};
use yz_core::repl::{run_repl, show_replay, ReplOptions};
use yz_core::style::Style;

/// Yahtzee in the terminal for one to ten players.
///
/// Commands are read one per line, so a game can also be piped in:
/// `printf 'roll\nscore chance\n' | yahtzee -p 1`
#[derive(Parser, Debug)]
#[command(name = "yahtzee", version)]
struct Cli {
    /// Number of players (1-10).
    #[arg(short, long, value_name = "N")]
    players: Option<usize>,

    /// Player name; repeat for each player in turn order.
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    names: Vec<String>,

    /// Seed the dice for a reproducible game.
    #[arg(long, env = "YAHTZEE_SEED")]
    seed: Option<u64>,

    /// Read configuration from FILE instead of ~/.config/yahtzee/config.toml.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not write a game journal.
    #[arg(long)]
    no_journal: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,

    /// Rebuild a recorded game from its journal, print its score table and exit.
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref());
    yz_core::init_logging(&config.log.level);

    let stdout_is_tty = io::stdout().is_terminal();
    let style = Style::with_color(config.display.color && !cli.no_color && stdout_is_tty);
    let glyphs = if config.display.unicode {
        Glyphs::UNICODE
    } else {
        Glyphs::ASCII
    };
    let mut renderer = Renderer::new(io::stdout(), style, glyphs);

    if let Some(path) = cli.replay {
        let code = match show_replay(&path, &mut renderer) {
            Ok(()) => 0,
            Err(e) => {
                error!(path = %path.display(), "replay failed: {e}");
                eprintln!("error: {}: {e}", path.display());
                1
            }
        };
        std::process::exit(code);
    }

    let roster = match config.game.roster(cli.players, &cli.names) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    let journal_dir =
        (config.journal.enabled && !cli.no_journal).then(|| config.journal.resolve_games_dir());
    let options = ReplOptions {
        roster,
        seed: cli.seed.or(config.game.seed),
        journal_dir,
        interactive: io::stdin().is_terminal(),
    };
    debug!(?options, "starting session");

    if options.interactive {
        renderer.emit_info("Yahtzee! Type 'help' for commands.");
    }

    match run_repl(&options, io::stdin().lock(), &mut renderer) {
        Ok(summary) => {
            debug!(?summary, "session ended");
            if let Some(path) = summary.last_journal.filter(|_| options.interactive) {
                renderer.emit_info(&format!("journal: {}", path.display()));
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
