//! Interactive shell.

pub mod repl;
