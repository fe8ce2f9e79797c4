//! Argument capture and dispatch for the exdriver CLI.

use std::{ffi::OsString, io::Write, iter};

use clap::Parser;
use exdriver_core::{Dispatcher, Registry};
use tracing::{Span, field, instrument};

/// Raw command line captured by [`clap`].
///
/// Help and version flags are disabled so flags such as `--help` reach the
/// example program instead of the launcher. Build it with
/// [`Cli::try_parse_verbatim`] so a leading `--` stays part of `argv`.
#[derive(Debug, Parser, Clone, Default, PartialEq, Eq)]
#[command(
    name = "exdriver",
    about = "Run one of the bundled map/reduce example programs.",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Example name followed by the arguments forwarded to it.
    #[arg(
        value_name = "NAME [ARGS]",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub argv: Vec<String>,
}

impl Cli {
    /// Parses a process argument list, program name first, keeping every
    /// argument after the program name verbatim.
    ///
    /// clap treats the first `--` as its end-of-options marker and drops it.
    /// A marker is inserted ahead of the user's arguments so theirs survive.
    ///
    /// # Errors
    /// Returns [`clap::Error`] when an argument is not valid UTF-8.
    ///
    /// # Examples
    /// ```
    /// use exdriver_cli::cli::Cli;
    ///
    /// let cli = Cli::try_parse_verbatim(["exdriver", "--", "sort"])?;
    /// assert_eq!(cli.argv, ["--", "sort"]);
    /// # Ok::<(), clap::Error>(())
    /// ```
    pub fn try_parse_verbatim<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().unwrap_or_else(|| OsString::from("exdriver"));
        Self::try_parse_from(
            iter::once(program)
                .chain(iter::once(OsString::from("--")))
                .chain(args),
        )
    }

    /// Returns the example name, if one was given.
    #[must_use]
    pub fn example(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }
}

/// Dispatches `cli` against `registry` and returns the process exit status.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use exdriver_cli::cli::{Cli, run_cli};
/// use exdriver_core::RegistryBuilder;
///
/// let registry = RegistryBuilder::new()
///     .register("mrrsleep", "MRR Sleep Job", |args| Ok(args.len() as i32))?
///     .build();
/// let cli = Cli::try_parse_verbatim(["exdriver", "mrrsleep", "-m", "2"])?;
/// let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
/// assert_eq!(run_cli(&cli, &registry, &mut out, &mut err), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "cli.run",
    skip_all,
    fields(example = field::Empty, exit_code = field::Empty),
)]
pub fn run_cli<O, E>(cli: &Cli, registry: &Registry, out: &mut O, err: &mut E) -> i32
where
    O: Write,
    E: Write,
{
    let span = Span::current();
    if let Some(example) = cli.example() {
        span.record("example", field::display(example));
    }
    let code = Dispatcher::new(registry).dispatch(&cli.argv, out, err);
    span.record("exit_code", code);
    code
}
