//! Core domain concepts shared across all subdomains.
//!
//! - [`id`]: typed identities for models, conversations and messages
//! - [`error::DomainError`]: domain-level validation errors
//! - [`string`]: log-friendly text helpers

pub mod error;
pub mod id;
pub mod string;
