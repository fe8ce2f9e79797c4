//! Runs example programs as child processes.
//!
//! Each catalog entry is an executable named `exdriver-<example>`. The
//! launcher inherits the terminal, forwards arguments verbatim, and returns
//! the child's exit code unchanged.

use std::{
    env,
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::Command,
};

use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Environment variable naming the directory that holds example programs.
pub const PROGRAM_DIR_ENV: &str = "EXDRIVER_PROGRAM_DIR";

/// File name prefix shared by every example program.
pub const PROGRAM_PREFIX: &str = "exdriver-";

/// Errors raised while running an example program.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// The program could not be started.
    #[error("failed to start `{}`", .program.display())]
    Spawn {
        /// Program that failed to start.
        program: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The program ended without an exit code, typically because a signal
    /// terminated it.
    #[error("`{}` terminated without an exit code", .program.display())]
    Terminated {
        /// Program that was terminated.
        program: PathBuf,
    },
}

/// Locates and runs `exdriver-<example>` programs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Launcher {
    program_dir: Option<PathBuf>,
}

impl Launcher {
    /// Resolves programs through `PATH`.
    #[must_use]
    pub const fn new() -> Self {
        Self { program_dir: None }
    }

    /// Resolves programs inside `dir` instead of `PATH`.
    #[must_use]
    pub fn with_program_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            program_dir: Some(dir.into()),
        }
    }

    /// Builds a launcher from `EXDRIVER_PROGRAM_DIR`. An unset or empty
    /// variable falls back to `PATH` lookup.
    #[must_use]
    pub fn from_env() -> Self {
        env::var_os(PROGRAM_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map_or_else(Self::new, Self::with_program_dir)
    }

    /// Returns the configured program directory, if any.
    #[must_use]
    pub fn program_dir(&self) -> Option<&Path> {
        self.program_dir.as_deref()
    }

    /// Returns the program that [`Launcher::run`] starts for `example`.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use exdriver_cli::launcher::Launcher;
    ///
    /// let launcher = Launcher::with_program_dir("/opt/exdriver/bin");
    /// assert_eq!(
    ///     launcher.program_for("terasort"),
    ///     Path::new("/opt/exdriver/bin/exdriver-terasort"),
    /// );
    /// assert_eq!(Launcher::new().program_for("sort"), Path::new("exdriver-sort"));
    /// ```
    #[must_use]
    pub fn program_for(&self, example: &str) -> PathBuf {
        let mut file_name = OsString::from(PROGRAM_PREFIX);
        file_name.push(example);
        match &self.program_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Runs the program for `example` with `args` and waits for it.
    ///
    /// # Errors
    /// Returns [`LauncherError::Spawn`] when the program cannot be started and
    /// [`LauncherError::Terminated`] when it exits without a status code.
    #[instrument(
        name = "launcher.run",
        err,
        skip(self, args),
        fields(program = field::Empty, args = args.len()),
    )]
    pub fn run(&self, example: &str, args: &[String]) -> Result<i32, LauncherError> {
        let program = self.program_for(example);
        Span::current().record("program", field::display(program.display()));

        let status = Command::new(&program)
            .args(args)
            .status()
            .map_err(|source| LauncherError::Spawn {
                program: program.clone(),
                source,
            })?;

        let code = status
            .code()
            .ok_or(LauncherError::Terminated { program })?;
        info!(exit_code = code, "example program exited");
        Ok(code)
    }
}
