use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::encoding::InputEncoding;
use crate::error::{FilterError, Result};

/// What to do with a line that fails to decode, parse or project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first bad line and fail the run.
    #[default]
    Abort,
    /// Log the bad line and keep going.
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub input_encoding: InputEncoding,
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

impl FilterConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|err| FilterError::Config {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        serde_json::from_str(&data).map_err(|err| FilterError::Config {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    /// Command-line values win over whatever the file said.
    pub fn with_overrides(
        mut self,
        input_encoding: Option<InputEncoding>,
        on_error: Option<ErrorPolicy>,
    ) -> Self {
        if let Some(encoding) = input_encoding {
            self.input_encoding = encoding;
        }
        if let Some(policy) = on_error {
            self.on_error = policy;
        }
        self
    }
}
