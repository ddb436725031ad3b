//! gemfresh - Gemfile freshness checker library
//!
//! This library provides the core functionality for checking the gems pinned
//! in a `Gemfile.lock` against their RubyGems sources:
//! - Lockfile parsing and requirement matching
//! - Registry access with per-run source routing
//! - Freshness classification, age buckets, and branch suggestions
//! - Text and JSON report formatting

pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod reconcile;
pub mod registry;
