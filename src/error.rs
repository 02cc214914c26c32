//! Error types for the claim agent
//!
//! Uses `eyre` for process-fatal errors with context, and typed enums for
//! configuration and per-wallet submission failures.

use thiserror::Error;

pub use eyre::{eyre, Context, Report, Result};

/// Configuration loading or validation failure. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but its value cannot be parsed.
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Why a single wallet's submission attempt failed.
///
/// These are isolated per wallet: one wallet failing never blocks or
/// cancels a sibling wallet's submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The wallet's private key could not be parsed into a valid key.
    #[error("invalid wallet key: {0}")]
    InvalidKey(String),

    /// The target chain node could not be reached or did not answer.
    #[error("chain unavailable: {0}")]
    ChainUnavailable(String),

    /// A transfer was attempted from a wallet holding no tokens; nothing
    /// was broadcast.
    #[error("token balance is zero, nothing to transfer")]
    ZeroBalance,

    /// The node rejected the signed transaction.
    #[error("transaction rejected: {0}")]
    Rejected(String),
}

/// Unrecognized mode argument on the command line.
#[derive(Debug, Error)]
#[error("unknown mode `{0}`, expected `live`, `claim` or `transfer`")]
pub struct UnknownMode(pub String);
