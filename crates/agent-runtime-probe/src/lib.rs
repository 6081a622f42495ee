//! Shared bootstrap for the probe binaries.
//!
//! Each binary is a single-shot diagnostic, not a resilient client: load the
//! environment, invoke once, print what happened, exit normally.

/// Environment loading and probe configuration.
pub mod config;
/// Console logging setup.
pub mod logger;
/// Fixed banner output shared by both binaries.
pub mod report;
