//! Core types for the badref ownership audit.
//!
//! This module contains the foundational pieces shared by every stage:
//! - Object records and owner references
//! - Error types
//! - Run configuration

pub mod config;
pub mod error;
pub mod object;

// Re-export commonly used types
pub use config::{AuditConfig, OutputFormat};
pub use error::{BadrefError, ConfigError, EnumerationError, ListError, Uid};
pub use object::{ObjectDescriptor, ObjectRecord, OwnerRef, RawObject};
