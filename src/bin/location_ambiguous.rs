use std::process::ExitCode;

use el_udf::{FilterKind, run_standalone};

fn main() -> ExitCode {
    run_standalone(FilterKind::LocationAmbiguous)
}
