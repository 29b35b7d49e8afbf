//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac::Difficulty;

/// Tic-tac-toe against an unbeatable computer player
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe with a minimax computer player", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Http {
        /// Host to bind to (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config file and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to server config file
        #[arg(short, long, default_value = "tictac.toml")]
        config: PathBuf,

        /// Computer strength for new sessions: unbeatable or casual
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },

    /// Play in the terminal
    Play {
        /// Computer strength: unbeatable or casual
        #[arg(short, long, default_value = "unbeatable")]
        difficulty: Difficulty,

        /// Let the computer open the first game
        #[arg(long)]
        computer_first: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_flags_are_optional() {
        let cli = Cli::try_parse_from(["tictac", "http"]).expect("parse");
        match cli.command {
            Command::Http {
                host,
                port,
                config,
                difficulty,
            } => {
                assert_eq!(host, None);
                assert_eq!(port, None);
                assert_eq!(config, PathBuf::from("tictac.toml"));
                assert_eq!(difficulty, None);
            }
            other => panic!("expected http command, got {:?}", other),
        }
    }

    #[test]
    fn test_play_parses_difficulty() {
        let cli = Cli::try_parse_from([
            "tictac",
            "play",
            "--difficulty",
            "Casual",
            "--computer-first",
        ])
        .expect("parse");
        match cli.command {
            Command::Play {
                difficulty,
                computer_first,
            } => {
                assert_eq!(difficulty, Difficulty::Casual);
                assert!(computer_first);
            }
            other => panic!("expected play command, got {:?}", other),
        }
    }
}
