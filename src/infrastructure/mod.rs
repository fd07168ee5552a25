//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{config_path, data_dir, expand_tilde, log_path};
