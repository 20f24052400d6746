//! Filesystem and environment helpers.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
