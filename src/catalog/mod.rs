//! Catalog module for indexing discovered objects.
//!
//! The catalog is built once from the enumerated records and is read-only
//! for the rest of the run.

pub mod builder;
pub mod structure;

// Re-export commonly used types
pub use builder::CatalogBuilder;
pub use structure::ObjectCatalog;
