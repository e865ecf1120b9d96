//! Test Helper Utilities
//!
//! Shared utilities for testing feddit-analyzer

#![allow(dead_code)]

pub mod mocks;

// Re-export commonly used items
#[allow(unused_imports)]
pub use mocks::{comment, entity, scores, MockScorer, MockSource};
