//! Error types for the exdriver core library.
//!
//! Separates registration defects, user input errors, and faults raised while
//! dispatching so callers can map each family to a distinct exit code.

use std::{error::Error as StdError, fmt, io};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type returned by example entry points.
///
/// An `Err` from an entry point is a fault in the program or its launch, not
/// an ordinary failure status; ordinary failures are reported through the
/// returned exit code instead.
pub type ExampleFault = Box<dyn StdError + Send + Sync + 'static>;

/// Error raised while populating a [`crate::RegistryBuilder`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RegistryError {
    /// An example with the same name was already registered.
    #[error("example `{name}` is already registered")]
    DuplicateName {
        /// Name that was registered twice.
        name: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`RegistryError`] variants.
    enum RegistryErrorCode for RegistryError {
        /// An example with the same name was already registered.
        DuplicateName => DuplicateName { .. } => "REGISTRY_DUPLICATE_NAME",
    }
}

/// The first argument did not name a registered example.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("Unknown program '{name}' chosen.")]
pub struct UnknownCommandError {
    /// Name supplied on the command line.
    pub name: String,
}

/// Fault surfaced at the outer boundary of [`crate::Dispatcher`].
///
/// Every variant maps to [`crate::EXIT_DISPATCH_FAULT`]; none of them is an
/// exit status produced by the example itself.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The entry point returned an error instead of an exit status.
    #[error("example `{name}` raised a fault")]
    EntryPoint {
        /// Example whose entry point failed.
        name: String,
        /// Error returned by the entry point.
        #[source]
        source: ExampleFault,
    },
    /// The entry point panicked.
    #[error("example `{name}` panicked: {message}")]
    Panicked {
        /// Example whose entry point panicked.
        name: String,
        /// Panic payload rendered as text.
        message: String,
    },
    /// Writing the usage or error listing failed.
    #[error("failed to write dispatcher output")]
    Output {
        /// Underlying stream error.
        #[source]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`DispatchError`] variants.
    enum DispatchErrorCode for DispatchError {
        /// The entry point returned an error instead of an exit status.
        EntryPoint => EntryPoint { .. } => "DISPATCH_ENTRY_POINT_FAULT",
        /// The entry point panicked.
        Panicked => Panicked { .. } => "DISPATCH_ENTRY_POINT_PANIC",
        /// Writing the usage or error listing failed.
        Output => Output { .. } => "DISPATCH_OUTPUT_FAILURE",
    }
}

impl From<io::Error> for DispatchError {
    fn from(source: io::Error) -> Self {
        Self::Output { source }
    }
}
