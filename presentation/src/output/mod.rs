//! Output formatting for administration commands

pub mod console;
