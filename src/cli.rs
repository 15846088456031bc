use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ErrorPolicy;
use crate::encoding::InputEncoding;
use crate::filters::FilterKind;

#[derive(Parser)]
#[command(name = "el-udf")]
#[command(about = "Row transforms between entity-linking pipeline stages (JSON lines in, JSON lines out)", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON config file (input_encoding, on_error)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// How input bytes are decoded before JSON parsing
    #[arg(long, global = true, value_enum)]
    pub input_encoding: Option<InputEncoding>,
    /// What to do with a malformed line
    #[arg(long, global = true, value_enum)]
    pub on_error: Option<ErrorPolicy>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// mention.id, canonical_entity.id -> {entity_id, mention_id}
    LocationAmbiguous(InputFiles),

    /// mention.id, mention.text -> one {mention_id, value} per whitespace token
    #[command(name = "mention-ngram1")]
    MentionNgram1(InputFiles),

    /// mention_id, entity_id -> {entity_id, mention_id, is_correct: null}
    #[command(name = "combine-round1")]
    CombineRound1(InputFiles),

    /// el_candidate_link.mention_id, el_candidate_link.entity_id -> {entity_id, mention_id, is_correct: null}
    #[command(name = "pass-through-round2")]
    PassThroughRound2(InputFiles),
}

impl Command {
    pub fn into_parts(self) -> (FilterKind, Vec<PathBuf>) {
        match self {
            Command::LocationAmbiguous(args) => (FilterKind::LocationAmbiguous, args.files),
            Command::MentionNgram1(args) => (FilterKind::MentionNgram1, args.files),
            Command::CombineRound1(args) => (FilterKind::CombineRound1, args.files),
            Command::PassThroughRound2(args) => (FilterKind::PassThroughRound2, args.files),
        }
    }
}

/// Input files read in order; stdin when none are given, `-` for stdin.
#[derive(Args, Debug, Clone, Default)]
pub struct InputFiles {
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Argument surface of the single-purpose executables.
#[derive(Parser, Debug)]
#[command(version)]
pub struct StandaloneCli {
    #[command(flatten)]
    pub input: InputFiles,
}
