//! Command-line front end for the `rlex_core` R tokenizer.
//!
//! The library half holds everything the binary does, so integration tests
//! can drive the commands without spawning a process:
//!
//! - [`SourceFile`] maps input files read-only.
//! - [`commands`] implements `lex`, `check` and `strings`.
//! - [`init_tracing`] installs a `RUST_LOG`-driven subscriber.

pub mod commands;
mod source_file;
mod tracing_setup;

pub use source_file::{SourceError, SourceFile};
pub use tracing_setup::init_tracing;
