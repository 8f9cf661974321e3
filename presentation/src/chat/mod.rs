//! Interactive chat module
//!
//! Provides a readline-based chat and the single-turn runner shared with
//! `grove ask`.

mod repl;
mod turn;

pub use repl::ChatRepl;
pub use turn::run_turn;
