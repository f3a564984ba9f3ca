#![doc = include_str!("../README.md")]

use clap::{value_parser, ArgAction, Args};

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LoggingArgs {
    /// Log more, can be repeated
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Log less, can be repeated
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// How far the flags move the level away from the default. Positive is more verbose.
    pub fn offset(&self) -> i8 {
        self.verbose.min(2) as i8 - self.quiet.min(2) as i8
    }

    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used.
    /// With neither, only warnings and errors are logged.
    #[cfg(feature = "log")]
    pub fn log_level_filter(&self) -> log::LevelFilter {
        use log::LevelFilter;
        match self.offset() {
            -2 => LevelFilter::Off,
            -1 => LevelFilter::Error,
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
