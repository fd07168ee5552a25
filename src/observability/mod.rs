//! Structured logging to a rotating file.
//!
//! The console owns stdout, so `tracing` output goes to
//! `<data_dir>/petdesk.log` instead. Files rotate at 10 MiB with three
//! backups.
//!
//! # Configuration
//!
//! The level is controlled by:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the configuration file or `--trace-level`
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer

pub mod file_writer;
mod init;

pub use file_writer::RotatingFileWriter;
pub use init::{init_tracing, init_tracing_at};
