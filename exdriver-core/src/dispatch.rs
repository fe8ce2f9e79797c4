//! Routes an argument vector to a registered example.

use std::{
    any::Any,
    error::Error as StdError,
    io::Write,
    iter,
    panic::{self, AssertUnwindSafe},
};

use tracing::{error, info, instrument, warn};

use crate::{
    error::{DispatchError, UnknownCommandError},
    registry::{ExampleDescriptor, Registry},
};

/// Exit status returned when no example was selected or the name is unknown.
pub const EXIT_USAGE: i32 = 1;

/// Exit status returned when dispatch itself faulted.
///
/// Distinct from any status an example returns on its own so scripts can tell
/// usage mistakes and example failures apart from internal errors.
pub const EXIT_DISPATCH_FAULT: i32 = -1;

/// Resolves the first argument against a [`Registry`] and runs the match.
///
/// # Examples
/// ```
/// use exdriver_core::{Dispatcher, RegistryBuilder};
///
/// let registry = RegistryBuilder::new()
///     .register("echo", "Returns its argument count.", |args| Ok(args.len() as i32))?
///     .build();
/// let dispatcher = Dispatcher::new(&registry);
/// let args = vec!["echo".to_owned(), "a".to_owned(), "b".to_owned()];
/// let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
/// assert_eq!(dispatcher.dispatch(&args, &mut out, &mut err), 2);
/// # Ok::<(), exdriver_core::RegistryError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
}

impl<'r> Dispatcher<'r> {
    /// Creates a dispatcher over a sealed registry.
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Dispatches `args` and returns the process exit status.
    ///
    /// - no arguments: the usage listing goes to `out`, returns [`EXIT_USAGE`];
    /// - unknown name: the error and valid names go to `err`, returns
    ///   [`EXIT_USAGE`];
    /// - known name: returns exactly what the entry point returned;
    /// - any fault: the diagnostic goes to `err`, returns
    ///   [`EXIT_DISPATCH_FAULT`].
    pub fn dispatch<O, E>(&self, args: &[String], out: &mut O, err: &mut E) -> i32
    where
        O: Write,
        E: Write,
    {
        match self.try_dispatch(args, out, err) {
            Ok(code) => code,
            Err(fault) => {
                error!(error = %fault, code = %fault.code(), "dispatch failed");
                if let Err(write_err) = write_fault(&fault, err) {
                    error!(error = %write_err, "failed to report dispatch fault");
                }
                EXIT_DISPATCH_FAULT
            }
        }
    }

    /// Dispatches `args`, surfacing faults instead of mapping them to
    /// [`EXIT_DISPATCH_FAULT`].
    ///
    /// # Errors
    /// Returns [`DispatchError`] when the entry point returns an error or
    /// panics, or when writing to `out` or `err` fails.
    pub fn try_dispatch<O, E>(
        &self,
        args: &[String],
        out: &mut O,
        err: &mut E,
    ) -> Result<i32, DispatchError>
    where
        O: Write,
        E: Write,
    {
        let Some((name, forwarded)) = args.split_first() else {
            writeln!(out, "An example program must be given as the first argument.")?;
            write_program_listing(self.registry, out)?;
            return Ok(EXIT_USAGE);
        };

        let Some(example) = self.registry.get(name) else {
            let unknown = UnknownCommandError { name: name.clone() };
            warn!(example = name.as_str(), "unknown example requested");
            writeln!(err, "{unknown}")?;
            write_program_listing(self.registry, err)?;
            return Ok(EXIT_USAGE);
        };

        run_example(example, forwarded)
    }
}

/// Writes the valid example names and descriptions in registration order.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn write_program_listing<W: Write>(
    registry: &Registry,
    writer: &mut W,
) -> std::io::Result<()> {
    writeln!(writer, "Valid program names are:")?;
    for example in registry.iter() {
        writeln!(writer, "  {}: {}", example.name(), example.description())?;
    }
    Ok(())
}

#[instrument(
    name = "dispatch.run",
    err,
    skip(example, forwarded),
    fields(example = example.name(), forwarded = forwarded.len()),
)]
fn run_example(example: &ExampleDescriptor, forwarded: &[String]) -> Result<i32, DispatchError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| example.invoke(forwarded)));
    match outcome {
        Ok(Ok(code)) => {
            info!(exit_code = code, "example completed");
            Ok(code)
        }
        Ok(Err(source)) => Err(DispatchError::EntryPoint {
            name: example.name().to_owned(),
            source,
        }),
        Err(payload) => Err(DispatchError::Panicked {
            name: example.name().to_owned(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }
    payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_else(|| "<non-string panic payload>".to_owned())
}

fn write_fault<E: Write>(fault: &DispatchError, err: &mut E) -> std::io::Result<()> {
    writeln!(err, "error: {fault}")?;
    let causes = iter::successors(fault.source(), |cause| (*cause).source());
    for cause in causes {
        writeln!(err, "  caused by: {cause}")?;
    }
    err.flush()
}

#[cfg(test)]
mod tests;
