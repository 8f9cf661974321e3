//! Application-level configuration.
//!
//! - [`ChatDefaults`]: request parameters applied when the caller omits them

pub mod chat_defaults;

pub use chat_defaults::ChatDefaults;
