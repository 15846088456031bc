use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::encoding::InputEncoding;
use crate::error::{FilterError, Result, json_kind};

/// One input row: column names qualified by their table (`mention.id`) mapped
/// to loosely typed values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(FilterError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Transcode one raw input line and parse it as a JSON object.
    pub fn parse_line(bytes: &[u8], encoding: InputEncoding) -> Result<Self> {
        let text = encoding.decode(bytes)?;
        let value: Value = serde_json::from_str(&text)?;
        Self::from_value(value)
    }

    pub fn field(&self, key: &str) -> Result<&Value> {
        self.fields.get(key).ok_or_else(|| FilterError::missing(key))
    }

    pub fn str_field(&self, key: &str) -> Result<&str> {
        let value = self.field(key)?;
        value.as_str().ok_or_else(|| FilterError::WrongType {
            field: key.to_string(),
            expected: "string",
            found: json_kind(value),
        })
    }

    pub fn int_field(&self, key: &str) -> Result<i64> {
        let value = self.field(key)?;
        coerce_int(value).ok_or_else(|| FilterError::InvalidInteger {
            field: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Integer coercion as the pipeline's upstream loaders expect it: numeric
/// strings with optional sign and surrounding whitespace, integral JSON
/// numbers, and finite floats truncated toward zero.
pub(crate) fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            let float = number.as_f64()?;
            // i64::MAX is not representable, so compare against 2^63
            if float.is_finite() && float >= i64::MIN as f64 && float < 9_223_372_036_854_775_808.0 {
                Some(float.trunc() as i64)
            } else {
                None
            }
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Resolver output: a (mention, entity) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateLink {
    pub entity_id: i64,
    pub mention_id: i64,
}

/// Candidate link awaiting a label. `is_correct` stays `null` until the
/// labelling stage fills it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledCandidate {
    pub entity_id: i64,
    pub mention_id: i64,
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionToken {
    pub mention_id: i64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutputRow {
    Link(CandidateLink),
    Labeled(LabeledCandidate),
    Token(MentionToken),
}
