use std::borrow::Cow;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// How raw input bytes become text before JSON parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputEncoding {
    /// ISO-8859-1: each byte is the code point of the same value.
    #[default]
    Latin1,
    Utf8,
}

impl InputEncoding {
    pub fn decode<'a>(self, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
        match self {
            InputEncoding::Latin1 => Ok(decode_latin1(bytes)),
            InputEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|err| FilterError::Transcode {
                    valid_up_to: err.valid_up_to(),
                }),
        }
    }
}

pub(crate) fn decode_latin1(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        // ASCII reads the same either way
        Ok(text) if bytes.is_ascii() => Cow::Borrowed(text),
        _ => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}
