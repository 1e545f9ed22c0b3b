//! Subcommand handlers
//!
//! Each handler orchestrates the registry and the transformer for one CLI
//! subcommand. Failures are logged with their full context chain and
//! replaced by a generic command-level message for the user.

pub mod add;
pub mod list;
pub mod remove;
pub mod switch;
pub mod sync;

use anyhow::anyhow;
use tracing::error;

/// Log the full error chain, hand the user a generic message
fn surface(err: anyhow::Error, message: &'static str) -> anyhow::Error {
    error!("{err:#}");
    anyhow!(message)
}
