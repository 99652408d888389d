//! Filesystem adapters.

pub mod path_guard;
