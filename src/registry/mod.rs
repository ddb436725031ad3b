//! RubyGems registry access
//!
//! This module provides:
//! - Wire document types for the two RubyGems API endpoints
//! - A per-endpoint HTTP reader with a shared connection pool
//! - A fallback router that blacklists failed endpoints for the run

mod metadata;
mod reader;
mod router;

pub use metadata::{GemDocument, RegistryMetadata, VersionRecord};
pub use reader::{HttpReader, HttpReaderFactory, ReaderFactory, RegistryReader};
pub use router::SourceRouter;
