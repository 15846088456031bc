use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{RunError, SourceName};

/// `-` on the command line stands for standard input.
pub const STDIN_ARG: &str = "-";

/// One entry of the "every named file, else stdin" input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputArg {
    Stdin,
    Path(PathBuf),
}

impl InputArg {
    pub fn name(&self) -> SourceName {
        match self {
            InputArg::Stdin => SourceName::Stdin,
            InputArg::Path(path) => SourceName::File(path.clone()),
        }
    }
}

pub fn input_args(files: &[PathBuf]) -> Vec<InputArg> {
    if files.is_empty() {
        return vec![InputArg::Stdin];
    }
    files
        .iter()
        .map(|path| {
            if path.as_os_str() == STDIN_ARG {
                InputArg::Stdin
            } else {
                InputArg::Path(path.clone())
            }
        })
        .collect()
}

pub(crate) fn open_file(path: &Path) -> Result<Box<dyn BufRead>, RunError> {
    let file = File::open(path).map_err(|error| RunError::Open {
        path: path.to_path_buf(),
        error,
    })?;
    Ok(Box::new(BufReader::new(file)))
}
