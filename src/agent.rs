//! Mode selection and component wiring

use crate::config::Config;
use crate::dispatcher::BatchDispatcher;
use crate::error::{ConfigError, Context, Result, UnknownMode};
use crate::submitter::{Operation, SubmissionOutcome, TxSubmitter};
use crate::watcher::BlockWatcher;
use alloy::network::Ethereum;
use alloy::providers::{ProviderBuilder, WsConnect};
use alloy::transports::http::reqwest::Url;
use std::str::FromStr;

/// Process run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Watch the trigger chain and claim once the target block lands.
    Live,
    /// Submit a claim from every configured wallet immediately.
    Claim,
    /// Sweep each wallet's full token balance to the receive address.
    Transfer,
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(Mode::Live),
            "claim" => Ok(Mode::Claim),
            "transfer" => Ok(Mode::Transfer),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Command-line help printed on a missing or unrecognized mode.
pub const USAGE: &str = "\
usage: arb-claimer <mode>

modes:
  live      watch the trigger chain and claim once the target block lands
  claim     submit a claim from every configured wallet immediately
  transfer  sweep each wallet's full token balance to the receive address";

/// Wire the components for the selected mode and run it to completion.
///
/// `live` runs until the watcher fails; `claim` and `transfer` run one
/// batch and return. Mode-specific configuration is checked before any
/// network connection is attempted.
pub async fn run(mode: Mode, config: Config) -> Result<()> {
    let url: Url = config
        .target_rpc_http
        .parse()
        .context("invalid target chain RPC URL")?;
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<Ethereum>()
        .connect_http(url);
    let submitter = TxSubmitter::new(provider, config.distributor, config.token, config.gas);

    match mode {
        Mode::Live => {
            let target_block = config
                .target_block
                .ok_or(ConfigError::Missing("TARGET_BLOCK"))?;
            let ws_url = config
                .trigger_rpc_ws
                .as_deref()
                .ok_or(ConfigError::Missing("TRIGGER_RPC_WSS"))?;
            let dispatcher =
                BatchDispatcher::new(submitter, config.wallet_keys.clone(), Operation::Claim);

            let trigger = ProviderBuilder::new()
                .disable_recommended_fillers()
                .network::<Ethereum>()
                .connect_ws(WsConnect::new(ws_url))
                .await
                .context("failed to connect to trigger chain")?;

            tracing::info!(target_block, wallets = dispatcher.wallet_count(), "starting live mode");
            BlockWatcher::new(target_block, dispatcher).watch(trigger).await
        }
        Mode::Claim => {
            let dispatcher =
                BatchDispatcher::new(submitter, config.wallet_keys.clone(), Operation::Claim);
            tracing::info!(wallets = dispatcher.wallet_count(), "starting claim mode");
            report(&dispatcher.submit_all().await);
            Ok(())
        }
        Mode::Transfer => {
            let receive = config
                .receive_address
                .ok_or(ConfigError::Missing("RECEIVE_ADDRESS"))?;
            let dispatcher = BatchDispatcher::new(
                submitter,
                config.wallet_keys.clone(),
                Operation::Transfer { receive },
            );
            tracing::info!(
                wallets = dispatcher.wallet_count(),
                receive = %receive,
                "starting transfer mode"
            );
            report(&dispatcher.submit_all().await);
            Ok(())
        }
    }
}

fn report(outcomes: &[SubmissionOutcome]) {
    let sent = outcomes.iter().filter(|o| o.result.is_ok()).count();
    tracing::info!(
        total = outcomes.len(),
        sent,
        failed = outcomes.len() - sent,
        "batch complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parses_recognized_values() {
        assert_eq!("live".parse::<Mode>().unwrap(), Mode::Live);
        assert_eq!("claim".parse::<Mode>().unwrap(), Mode::Claim);
        assert_eq!("transfer".parse::<Mode>().unwrap(), Mode::Transfer);
    }

    #[test]
    fn test_mode_rejects_anything_else() {
        for bad in ["", "Live", "CLAIM", "watch", "transfer "] {
            assert!(bad.parse::<Mode>().is_err(), "{bad:?}");
        }
    }
}
