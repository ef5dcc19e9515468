//! Supercheckers in the terminal
//!
//! Two people share one terminal and take turns entering moves.

mod console;

use std::env;
use std::io;
use std::process;

use supercheckers_core::{Game, GameError, Outcome, PlayerError, Team};
use tracing_subscriber::EnvFilter;

use crate::console::{render, ConsolePlayer, HELP};

const USAGE: &str = "\
Usage: supercheckers [--no-rulers]

  --no-rulers   print the board as bare rows of symbols
  -h, --help    show this text

Set RUST_LOG (for example RUST_LOG=debug) to see the referee's log on stderr.";

fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return;
    }
    if let Some(unknown) = args.iter().find(|a| *a != "--no-rulers") {
        eprintln!("Unknown argument: {}\n\n{}", unknown, USAGE);
        process::exit(2);
    }
    let rulers = args.is_empty();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    ctrlc::set_handler(|| {
        println!("\n\nInterrupted, game abandoned.");
        process::exit(130);
    })
    .expect("Error setting Ctrl-C handler");

    println!("Supercheckers");
    println!("=============");
    println!("{} moves first. Both sides open by stepping into the court.", Team::A);
    println!();
    println!("{}", HELP);

    let mut game = Game::new();
    let mut a = ConsolePlayer::new(Team::A, rulers);
    let mut b = ConsolePlayer::new(Team::B, rulers);

    match game.play(&mut a, &mut b) {
        Ok(outcome) => {
            println!();
            println!("{}", render(game.board(), rulers));
            println!();
            match outcome {
                Outcome::Won(team) => println!("{} wins after {} moves!", team, game.plies()),
                Outcome::Tie => println!("The court is empty. It's a tie."),
            }
        }
        Err(GameError::Player(PlayerError::Quit)) => {
            println!("\nGame abandoned.");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
