//! Runtime configuration for the console driver and the self-play binary.
//!
//! Every option can be given on the command line or through its environment
//! variable; the command line wins.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::Color;
use crate::search::minimax::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerColor {
    White,
    Black,
}

impl From<PlayerColor> for Color {
    fn from(value: PlayerColor) -> Self {
        match value {
            PlayerColor::White => Color::White,
            PlayerColor::Black => Color::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    Minimax,
    Random,
}

#[derive(Debug, Parser)]
#[command(name = "chess_duel", version, about = "Play chess against a minimax opponent")]
pub struct Cli {
    /// Search depth of the minimax opponent, in plies.
    #[arg(
        long,
        env = "CHESS_AI_DEPTH",
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(1..=6)
    )]
    pub depth: u8,

    /// Side played by the human at the console.
    #[arg(long, env = "CHESS_HUMAN_COLOR", value_enum, default_value_t = PlayerColor::White)]
    pub human_color: PlayerColor,

    #[arg(long, env = "CHESS_OPPONENT", value_enum, default_value_t = OpponentKind::Minimax)]
    pub opponent: OpponentKind,

    /// Seed for the random opponent.
    #[arg(long, env = "CHESS_AI_SEED")]
    pub seed: Option<u64>,

    /// Write the game log to this file instead of stderr.
    #[arg(long, env = "CHESS_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub search: SearchConfig,
    pub human_color: Color,
    pub opponent: OpponentKind,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            human_color: Color::White,
            opponent: OpponentKind::Minimax,
            seed: None,
            log_file: None,
        }
    }
}

impl From<Cli> for GameConfig {
    fn from(cli: Cli) -> Self {
        Self {
            search: SearchConfig { depth: cli.depth },
            human_color: cli.human_color.into(),
            opponent: cli.opponent,
            seed: cli.seed,
            log_file: cli.log_file,
        }
    }
}

impl GameConfig {
    #[inline]
    pub fn ai_color(&self) -> Color {
        self.human_color.opposite()
    }

    pub fn build_engine(&self) -> Box<dyn Engine> {
        match self.opponent {
            OpponentKind::Minimax => Box::new(MinimaxEngine::new(self.search)),
            OpponentKind::Random => match self.seed {
                Some(seed) => Box::new(RandomEngine::with_seed(seed)),
                None => Box::new(RandomEngine::new()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GameConfig::default();
        assert_eq!(config.search.depth, 3);
        assert_eq!(config.human_color, Color::White);
        assert_eq!(config.ai_color(), Color::Black);
        assert_eq!(config.opponent, OpponentKind::Minimax);
        assert_eq!(config.build_engine().name(), "Minimax");
    }

    #[test]
    fn cli_flags_map_into_config() {
        let cli = Cli::try_parse_from([
            "chess_duel",
            "--depth",
            "4",
            "--human-color",
            "black",
            "--opponent",
            "random",
            "--seed",
            "11",
        ])
        .expect("flags should parse");
        let config = GameConfig::from(cli);
        assert_eq!(config.search.depth, 4);
        assert_eq!(config.human_color, Color::Black);
        assert_eq!(config.ai_color(), Color::White);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.build_engine().name(), "Random");
    }

    #[test]
    fn depth_outside_range_is_rejected() {
        assert!(Cli::try_parse_from(["chess_duel", "--depth", "0"]).is_err());
        assert!(Cli::try_parse_from(["chess_duel", "--depth", "7"]).is_err());
    }
}
