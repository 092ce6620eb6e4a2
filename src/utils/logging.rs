//! `tracing` subscriber setup shared by the binaries.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::chess_errors::ChessResult;

const DEFAULT_FILTER: &str = "chess_duel=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// With a log file the output is appended to it without ANSI colours,
/// otherwise it goes to stderr so it does not interleave with the board.
pub fn init_logging(log_file: Option<&Path>) -> ChessResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}
