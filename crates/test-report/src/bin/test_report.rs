//! Write `public/test-report.json` from the latest test run.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use mockable::DefaultClock;
use test_report::{ReportError, generate_report};

/// Build the dashboard test report.
#[derive(Debug, Parser)]
#[command(name = "test-report", version, about)]
struct Cli {
    /// Project root containing `coverage/` and `public/`.
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(path) => {
            if let Err(err) = writeln!(io::stdout().lock(), "Test report created at {path}") {
                drop(err);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Utf8PathBuf, ReportError> {
    generate_report(&cli.root, &DefaultClock)
}
