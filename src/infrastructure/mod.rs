//! Infrastructure layer for filesystem and environment interactions.
//!
//! Platform directories come from the `dirs` crate so data and configuration
//! land where each OS expects them.

pub mod paths;

pub use paths::{default_config_file, get_config_dir, get_data_dir, trace_file};
