use crate::error::Result;
use crate::record::{CandidateLink, LabeledCandidate, MentionToken, OutputRow, Record};

pub(crate) const MENTION_ID: &str = "mention.id";
pub(crate) const MENTION_TEXT: &str = "mention.text";
pub(crate) const CANONICAL_ENTITY_ID: &str = "canonical_entity.id";
pub(crate) const ROUND1_MENTION_ID: &str = "mention_id";
pub(crate) const ROUND1_ENTITY_ID: &str = "entity_id";
pub(crate) const ROUND2_MENTION_ID: &str = "el_candidate_link.mention_id";
pub(crate) const ROUND2_ENTITY_ID: &str = "el_candidate_link.entity_id";

/// The row transforms run between entity-linking pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// `mention.id`, `canonical_entity.id` -> `{entity_id, mention_id}`
    LocationAmbiguous,
    /// `mention.id`, `mention.text` -> one `{mention_id, value}` per token
    MentionNgram1,
    /// `mention_id`, `entity_id` -> `{entity_id, mention_id, is_correct: null}`
    CombineRound1,
    /// Round-2 candidate links, same output as round 1.
    PassThroughRound2,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::LocationAmbiguous,
        FilterKind::MentionNgram1,
        FilterKind::CombineRound1,
        FilterKind::PassThroughRound2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::LocationAmbiguous => "location_ambiguous",
            FilterKind::MentionNgram1 => "mention_text_ngram1",
            FilterKind::CombineRound1 => "combine_round_1_tables",
            FilterKind::PassThroughRound2 => "pass_through",
        }
    }

    pub fn apply(self, record: &Record) -> Result<Vec<OutputRow>> {
        match self {
            FilterKind::LocationAmbiguous => {
                resolve_ambiguous(record).map(|link| vec![OutputRow::Link(link)])
            }
            FilterKind::MentionNgram1 => Ok(mention_unigrams(record)?
                .into_iter()
                .map(OutputRow::Token)
                .collect()),
            FilterKind::CombineRound1 => {
                combine_round1(record).map(|row| vec![OutputRow::Labeled(row)])
            }
            FilterKind::PassThroughRound2 => {
                pass_through_round2(record).map(|row| vec![OutputRow::Labeled(row)])
            }
        }
    }
}

pub fn resolve_ambiguous(record: &Record) -> Result<CandidateLink> {
    let mention_id = record.int_field(MENTION_ID)?;
    let entity_id = record.int_field(CANONICAL_ENTITY_ID)?;
    Ok(CandidateLink {
        entity_id,
        mention_id,
    })
}

pub fn mention_unigrams(record: &Record) -> Result<Vec<MentionToken>> {
    let mention_id = record.int_field(MENTION_ID)?;
    let text = record.str_field(MENTION_TEXT)?;
    Ok(text
        .split(is_token_separator)
        .filter(|token| !token.is_empty())
        .map(|token| MentionToken {
            mention_id,
            value: token.to_string(),
        })
        .collect())
}

/// Unicode whitespace plus the ASCII information separators (U+001C..U+001F),
/// which upstream tokenizers also split on.
fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

pub fn combine_round1(record: &Record) -> Result<LabeledCandidate> {
    unlabeled(record, ROUND1_MENTION_ID, ROUND1_ENTITY_ID)
}

pub fn pass_through_round2(record: &Record) -> Result<LabeledCandidate> {
    unlabeled(record, ROUND2_MENTION_ID, ROUND2_ENTITY_ID)
}

fn unlabeled(record: &Record, mention_key: &str, entity_key: &str) -> Result<LabeledCandidate> {
    let mention_id = record.int_field(mention_key)?;
    let entity_id = record.int_field(entity_key)?;
    Ok(LabeledCandidate {
        entity_id,
        mention_id,
        is_correct: None,
    })
}
