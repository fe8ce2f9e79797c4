//! Core of the exdriver example launcher.
//!
//! Provides the sealed example [`Registry`], the [`Dispatcher`] that routes
//! a command line to one example, and [`render_status`] for reporting the
//! progress of map, intermediate, and final reduce pipeline stages.

mod dispatch;
mod error;
mod progress;
mod registry;

pub use crate::{
    dispatch::{Dispatcher, EXIT_DISPATCH_FAULT, EXIT_USAGE, write_program_listing},
    error::{
        DispatchError, DispatchErrorCode, ExampleFault, RegistryError, RegistryErrorCode,
        UnknownCommandError,
    },
    progress::{
        Percentage, PipelineState, PipelineStatus, STAGE_DISPLAY_TABLE, StageDisplay,
        StageProgress, StatusSnapshot, render_status, stage_display_name,
    },
    registry::{EntryPoint, ExampleDescriptor, Registry, RegistryBuilder},
};
