//! Production adapters for the hwhook parameter hook.
//!
//! This crate provides:
//!
//! - **Parameter source**: [`ProcfsSource`] reads `hw_params` records from
//!   `/proc/asound` (or any directory laid out the same way)
//! - **Command runner**: [`ShellRunner`] runs command lines through a shell,
//!   blocking until they exit
//! - **Host simulation**: [`SimulatedHost`] and [`FixedStream`] stand in for
//!   the audio framework when exercising a hook outside of it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hwhook_core::ParamsHook;
//! use hwhook_io::{FixedStream, ProcfsSource, ShellRunner, SimulatedHost};
//!
//! let mut host = SimulatedHost::new();
//! let mut hook = ParamsHook::install(
//!     &mut host,
//!     &config.hook_args,
//!     ShellRunner::new("/bin/sh"),
//!     ProcfsSource::new("/proc/asound"),
//! )?;
//! hook.on_params_ready(Some(&FixedStream::device(device)))?;
//! ```

mod host;
mod procfs;
mod shell;

pub use host::{FixedStream, Registration, SimulatedHost};
pub use procfs::{DEFAULT_PROC_ROOT, ProcfsSource};
pub use shell::{DEFAULT_SHELL, ShellRunner, exit_status_code};

use std::path::PathBuf;

/// Error types for adapter operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A directory could not be listed.
    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The hook rejected an operation.
    #[error("hook error: {0}")]
    Hook(#[from] hwhook_core::HookError),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for adapter operations.
pub type Result<T> = std::result::Result<T, Error>;
