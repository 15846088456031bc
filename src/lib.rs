//! Stateless JSON-lines row transforms used between entity-linking pipeline
//! stages. Each filter reads one object per line and writes zero or more
//! objects per line.

pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod filters;
pub mod input;
pub mod output;
pub mod record;
pub mod runner;

pub use config::{ErrorPolicy, FilterConfig};
pub use encoding::InputEncoding;
pub use error::{FilterError, LineError, RunError, SourceName};
pub use filters::{FilterKind, combine_round1, mention_unigrams, pass_through_round2, resolve_ambiguous};
pub use output::{AsciiJsonFormatter, write_row};
pub use record::{CandidateLink, LabeledCandidate, MentionToken, OutputRow, Record};
pub use runner::{RunStats, execute, init_tracing, run};

use std::process::ExitCode;

use clap::Parser;

/// Entry point of the single-purpose executables: positional files only,
/// default configuration.
pub fn run_standalone(kind: FilterKind) -> ExitCode {
    let cli = cli::StandaloneCli::parse();
    init_tracing();
    execute(kind, &FilterConfig::default(), &cli.input.files)
}
