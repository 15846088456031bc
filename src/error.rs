use std::fmt;
use std::path::PathBuf;

pub type Result<T, E = FilterError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Input bytes are not valid in the configured input encoding.
    #[error("input is not valid utf-8 (valid up to byte {valid_up_to})")]
    Transcode { valid_up_to: usize },

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a json object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` must be a {expected}, got {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field `{field}` is not an integer: {value}")]
    InvalidInteger { field: String, value: String },

    #[error("config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl FilterError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }
}

/// Where a line came from: a named file or standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceName {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceName::Stdin => f.write_str("<stdin>"),
            SourceName::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A per-record failure tagged with its input position.
#[derive(Debug, thiserror::Error)]
#[error("{source_name}:{line}: {error}")]
pub struct LineError {
    pub source_name: SourceName,
    /// 1-based.
    pub line: u64,
    #[source]
    pub error: FilterError,
}

/// Anything that ends a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Line(#[from] LineError),

    #[error("cannot open {path}: {error}")]
    Open {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("cannot write output: {0}")]
    Output(#[source] std::io::Error),
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
