//! # hookrun - declarative pre-commit hook runner
//!
//! hookrun reads a YAML hook execution policy, installs itself as git
//! lifecycle hooks, and on each triggering event selects applicable hooks
//! by file-type filter and filename regex, runs them as external processes,
//! and aggregates pass/fail results.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a starter policy
//! hookrun init
//!
//! # Install the hook scripts
//! hookrun install
//!
//! # Run a stage by hand
//! hookrun run pre-commit --all-files
//! ```

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod git;
pub mod shared;
pub mod store;

pub use cli::{Cli, Output};
pub use config::{Policy, PolicyError};

/// Result type alias for hookrun operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
