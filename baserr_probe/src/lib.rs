//! Probe harness for the `baserr` ancestry mechanism.
//!
//! Builds errors from a demonstration family, routes each one through a
//! catch table in a configured order and reports which clause caught it.
//!
//! # Module Structure
//!
//! - [`config`] - Probe file loading and validation
//! - [`family`] - Demonstration error family assembled by composition
//! - [`probe`] - Probe execution and reporting

pub mod config;
pub mod family;
pub mod probe;
