//! # Wareguard Shared
//!
//! Common types used across all Wareguard crates: permission tuples,
//! the warehouse catalog, user records and configuration.

pub mod catalog;
pub mod config;
pub mod error;
pub mod permission;
pub mod user;

// Re-exports
pub use config::*;
pub use error::*;
pub use permission::*;
pub use user::*;
