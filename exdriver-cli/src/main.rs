//! CLI entry point for the exdriver example launcher.
//!
//! Initialises logging, registers the bundled examples, dispatches the
//! command line, and exits with the dispatched status. Start-up failures use
//! the same `-1` status as faults raised during dispatch.

use std::io::{self, Write};
use std::{env, process};

use anyhow::{Context, Result};
use exdriver_cli::{
    catalog::build_registry,
    cli::{Cli, run_cli},
    launcher::Launcher,
    logging,
};
use exdriver_core::{EXIT_DISPATCH_FAULT, RegistryError};
use tracing::{debug, error, field};

/// Parse arguments, build the catalog, and dispatch.
fn try_main() -> Result<i32> {
    let cli = Cli::try_parse_verbatim(env::args_os())
        .context("failed to read command line")?;
    let launcher = Launcher::from_env();
    debug!(program_dir = ?launcher.program_dir(), "launcher configured");
    let registry = build_registry(&launcher).context("failed to register examples")?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    let code = run_cli(&cli, &registry, &mut out, &mut err);
    out.flush().context("failed to flush output")?;
    Ok(code)
}

fn main() {
    if let Err(err) = logging::init_logging() {
        report_startup_error(&err);
        process::exit(EXIT_DISPATCH_FAULT);
    }

    let code = match try_main() {
        Ok(code) => code,
        Err(err) => {
            let code_field = startup_error_code(&err).map(field::display);
            error!(error = %err, code = code_field, "startup failed");
            report_startup_error(&*err);
            EXIT_DISPATCH_FAULT
        }
    };
    process::exit(code);
}

/// Stable code of a registration failure, if `err` carries one.
fn startup_error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<RegistryError>()
        .map(|registry_error| registry_error.code().as_str())
}

#[expect(
    clippy::print_stderr,
    reason = "Startup diagnostics must reach the terminal even without a subscriber"
)]
fn report_startup_error(err: &(dyn std::error::Error + 'static)) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
