//! Core domain models for gemfresh
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency information resolved from the Gemfile/lockfile
//! - Gem version requirement parsing and matching
//! - Freshness classification and age bucket types

mod dependency;
mod freshness;
mod requirement;

pub use dependency::Dependency;
pub use freshness::{AgeBucket, Classification};
pub use requirement::{compare_versions, Constraint, ConstraintOp, Requirement};
