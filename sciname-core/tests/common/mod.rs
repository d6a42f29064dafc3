//! Test infrastructure for the name parser
//!
//! Provides fixture loading, stochastic test generation, and assertion helpers.

#![allow(dead_code)]

mod generators;
mod harness;
mod loader;

pub use generators::Gen;
pub use harness::{run_test, run_with_variations, TestResult};
pub use loader::{load_fixtures_by_name, Expected, NameCase};
