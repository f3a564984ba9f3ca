//! the args for running zoopi

use log::LevelFilter;
use std::path::PathBuf;
use zoop_cli_common::LoggingArgs;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Runs a zoop program")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// Sets the logging level directly, overriding `-v` and `-q`
    #[clap(long = "log-level", env = "RUST_LOG")]
    log: Option<LevelFilter>,

    /// The zoop file to run
    #[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Prints an intermediate form of the program before running it
    #[clap(long, value_enum)]
    pub emit: Option<Emit>,
}

/// What `--emit` prints
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum Emit {
    /// The token stream
    Tokens,
    /// The syntax tree
    Program,
}

impl Args {
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log
            .unwrap_or_else(|| self.logging.log_level_filter())
    }
}
