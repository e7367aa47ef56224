#![deny(unsafe_code)]

//! Shared test utilities for the Précis workspace.
//!
//! Provides sample documents, config builders, and tracing helpers so that
//! individual crate tests stay concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! precis-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod documents;
pub mod tracing_setup;
