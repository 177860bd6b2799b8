//! # Wareguard Audit
//!
//! Bounded audit trail of access decisions and role assignments.

mod audit_logger;

pub use audit_logger::{AuditEntry, AuditEventType, AuditLogger, AuditStats};
