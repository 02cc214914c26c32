//! Block-triggered claim agent for the ARB token distributor
//!
//! Watches the trigger chain for a target block height and, once it
//! lands, fires one claim transaction per configured wallet on the
//! target chain, with a one-shot retry at the following block. Two
//! standalone modes skip the watch step and immediately claim or sweep
//! balances per wallet.
//!
//! # Modes
//!
//! - `live` - subscribe to trigger-chain heads and claim at the target block
//! - `claim` - submit a claim from every wallet immediately
//! - `transfer` - sweep each wallet's full token balance to the receive address
//!
//! # Example
//!
//! ```rust,ignore
//! use arb_claimer::{run, Config, Mode};
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let config = Config::from_env()?;
//!     run(Mode::Claim, config).await
//! }
//! ```

pub mod agent;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod dispatcher;
pub mod error;
pub mod signer;
pub mod submitter;
pub mod watcher;

// Re-export main types for convenience
pub use agent::{run, Mode, USAGE};
pub use config::{Config, GasSettings};
pub use dispatcher::BatchDispatcher;
pub use error::{ConfigError, Result, SubmitError, UnknownMode};
pub use signer::Wallet;
pub use submitter::{Operation, Submit, SubmissionOutcome, TxSubmitter};
pub use watcher::{BlockWatcher, Dispatcher, TriggerWindow};
