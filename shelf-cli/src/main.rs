//! Shelf: interactive in-memory library catalog.
//!
//! # Usage
//!
//! ```text
//! shelf [--no-seed] [--strict-returns] [-v...]
//! ```
//!
//! Logs go to stderr; `RUST_LOG` overrides the level chosen with `-v`.

mod prompt;
mod shell;

use std::io;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use shelf_core::{seed, LibraryService, ReturnPolicy};

use crate::shell::Shell;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "shelf",
    version,
    about = "Track books, users and loans from a text menu",
    long_about = None,
)]
struct Cli {
    /// Start with an empty catalog instead of the sample books and users.
    #[arg(long)]
    no_seed: bool,

    /// Refuse returns whose transaction is unknown, already returned, or for
    /// another book. By default such returns still put a copy back.
    #[arg(long)]
    strict_returns: bool,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn return_policy(&self) -> ReturnPolicy {
        if self.strict_returns {
            ReturnPolicy::Strict
        } else {
            ReturnPolicy::Permissive
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let mut service = LibraryService::new().with_policy(cli.return_policy());
    if !cli.no_seed {
        seed::preload(&mut service);
    }
    tracing::info!(policy = ?service.policy(), seeded = !cli.no_seed, "shelf starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut service, stdin.lock(), stdout.lock())
        .run()
        .context("interactive shell failed")?;
    Ok(())
}

fn init_tracing(default_level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_select_policy_and_level() {
        let cli = Cli::parse_from(["shelf", "--strict-returns", "-vv"]);
        assert_eq!(cli.return_policy(), ReturnPolicy::Strict);
        assert_eq!(cli.log_level(), "debug");

        let cli = Cli::parse_from(["shelf"]);
        assert_eq!(cli.return_policy(), ReturnPolicy::Permissive);
        assert_eq!(cli.log_level(), "warn");
        assert!(!cli.no_seed);
    }
}
