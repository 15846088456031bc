use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ErrorPolicy, FilterConfig};
use crate::error::{FilterError, LineError, RunError, SourceName};
use crate::filters::FilterKind;
use crate::input::{InputArg, input_args, open_file};
use crate::output::write_row;
use crate::record::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines: u64,
    pub emitted: u64,
    pub skipped: u64,
}

/// Log to stderr so stdout carries nothing but rows. `RUST_LOG` overrides
/// the default `warn` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Run `kind` over every named file in order (stdin when none are given)
/// and write the resulting rows to `out`.
pub fn run<W: Write>(
    kind: FilterKind,
    config: &FilterConfig,
    files: &[PathBuf],
    stdin: &mut dyn BufRead,
    out: &mut W,
) -> Result<RunStats, RunError> {
    let mut stats = RunStats::default();
    for arg in input_args(files) {
        let name = arg.name();
        debug!(filter = kind.name(), source = %name, "reading input");
        match arg {
            InputArg::Stdin => process_reader(kind, config, &name, stdin, out, &mut stats)?,
            InputArg::Path(path) => {
                let mut reader = open_file(&path)?;
                process_reader(kind, config, &name, reader.as_mut(), out, &mut stats)?;
            }
        }
    }
    out.flush().map_err(RunError::Output)?;
    Ok(stats)
}

pub fn process_reader<W: Write>(
    kind: FilterKind,
    config: &FilterConfig,
    name: &SourceName,
    reader: &mut dyn BufRead,
    out: &mut W,
    stats: &mut RunStats,
) -> Result<(), RunError> {
    let mut buf = Vec::new();
    let mut line = 0u64;
    loop {
        buf.clear();
        line += 1;
        let read = reader.read_until(b'\n', &mut buf).map_err(|err| LineError {
            source_name: name.clone(),
            line,
            error: FilterError::Io(err),
        })?;
        if read == 0 {
            return Ok(());
        }
        stats.lines += 1;

        let rows = Record::parse_line(&buf, config.input_encoding).and_then(|rec| kind.apply(&rec));
        match rows {
            Ok(rows) => {
                for row in &rows {
                    write_row(out, row).map_err(RunError::Output)?;
                }
                stats.emitted += rows.len() as u64;
            }
            Err(error) => {
                let err = LineError {
                    source_name: name.clone(),
                    line,
                    error,
                };
                match config.on_error {
                    ErrorPolicy::Abort => return Err(err.into()),
                    ErrorPolicy::Skip => {
                        warn!(filter = kind.name(), error = %err, "skipping line");
                        stats.skipped += 1;
                    }
                }
            }
        }
    }
}

/// Process entry point shared by every executable: stdin/stdout wiring,
/// summary logging and the exit code.
pub fn execute(kind: FilterKind, config: &FilterConfig, files: &[PathBuf]) -> ExitCode {
    let mut stdin = io::stdin().lock();
    let mut out = BufWriter::new(io::stdout().lock());

    match run(kind, config, files, &mut stdin, &mut out) {
        Ok(stats) => {
            info!(
                filter = kind.name(),
                lines = stats.lines,
                emitted = stats.emitted,
                skipped = stats.skipped,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(filter = kind.name(), "{err}");
            ExitCode::FAILURE
        }
    }
}
