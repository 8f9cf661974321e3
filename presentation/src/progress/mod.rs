//! Live feedback while an answer streams in

pub mod stream;
