//! Agent configuration sourced from the environment
//!
//! All values are read once at startup into an immutable [`Config`] that
//! the rest of the agent shares read-only. Variables:
//!
//! - `DISTRIBUTOR_ADDRESS` - token distributor contract on the target chain
//! - `TOKEN_ADDRESS` - token contract on the target chain
//! - `WALLET_PRIVATE_KEYS` - comma-separated hex private keys
//! - `TARGET_RPC_HTTP` - HTTP endpoint of the target chain
//! - `TRIGGER_RPC_WSS` - websocket endpoint of the trigger chain (`live`)
//! - `TARGET_BLOCK` - trigger-chain block height that fires the batch (`live`)
//! - `RECEIVE_ADDRESS` - sweep destination (`transfer`)
//! - `GAS_LIMIT`, `GAS_PRICE_GWEI` - optional gas overrides

use crate::constants::{gwei_to_wei, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE_GWEI};
use crate::error::ConfigError;
use alloy::primitives::Address;
use std::env;

/// Fixed gas parameters applied to every submission.
#[derive(Debug, Clone, Copy)]
pub struct GasSettings {
    pub limit: u64,
    pub price_wei: u128,
}

impl Default for GasSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_GAS_LIMIT,
            price_wei: gwei_to_wei(DEFAULT_GAS_PRICE_GWEI),
        }
    }
}

/// Validated agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token distributor contract on the target chain.
    pub distributor: Address,
    /// Token contract on the target chain.
    pub token: Address,
    /// Hex-encoded wallet private keys, one submission task each.
    pub wallet_keys: Vec<String>,
    /// Websocket endpoint of the trigger chain. Required in `live` mode.
    pub trigger_rpc_ws: Option<String>,
    /// HTTP endpoint of the target chain.
    pub target_rpc_http: String,
    /// Sweep destination. Required in `transfer` mode.
    pub receive_address: Option<Address>,
    /// Trigger-chain block height that fires the claim batch. Required in
    /// `live` mode.
    pub target_block: Option<u64>,
    /// Gas parameters for every submission.
    pub gas: GasSettings,
}

impl Config {
    /// Read and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let distributor = parse_address("DISTRIBUTOR_ADDRESS", &require("DISTRIBUTOR_ADDRESS")?)?;
        let token = parse_address("TOKEN_ADDRESS", &require("TOKEN_ADDRESS")?)?;
        let wallet_keys = parse_wallet_keys(&require("WALLET_PRIVATE_KEYS")?)?;
        let target_rpc_http = require("TARGET_RPC_HTTP")?;
        let trigger_rpc_ws = optional("TRIGGER_RPC_WSS");
        let receive_address = optional("RECEIVE_ADDRESS")
            .map(|v| parse_address("RECEIVE_ADDRESS", &v))
            .transpose()?;
        let target_block = optional("TARGET_BLOCK")
            .map(|v| parse_u64("TARGET_BLOCK", &v))
            .transpose()?;

        let gas = GasSettings {
            limit: optional("GAS_LIMIT")
                .map(|v| parse_u64("GAS_LIMIT", &v))
                .transpose()?
                .unwrap_or(DEFAULT_GAS_LIMIT),
            price_wei: optional("GAS_PRICE_GWEI")
                .map(|v| parse_u64("GAS_PRICE_GWEI", &v))
                .transpose()?
                .map(gwei_to_wei)
                .unwrap_or_else(|| gwei_to_wei(DEFAULT_GAS_PRICE_GWEI)),
        };

        Ok(Self {
            distributor,
            token,
            wallet_keys,
            trigger_rpc_ws,
            target_rpc_http,
            receive_address,
            target_block,
            gas,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional(name: &'static str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_address(name: &'static str, value: &str) -> Result<Address, ConfigError> {
    value.parse::<Address>().map_err(|err| ConfigError::Invalid {
        name,
        reason: err.to_string(),
    })
}

fn parse_u64(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|err| ConfigError::Invalid {
        name,
        reason: err.to_string(),
    })
}

/// Split a comma-separated key list, trimming entries. The list must
/// contain at least one non-empty key.
fn parse_wallet_keys(raw: &str) -> Result<Vec<String>, ConfigError> {
    let keys: Vec<String> = raw
        .split(',')
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .collect();

    if keys.is_empty() {
        return Err(ConfigError::Invalid {
            name: "WALLET_PRIVATE_KEYS",
            reason: "no wallet keys configured".to_string(),
        });
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wallet_keys() {
        let keys = parse_wallet_keys("aa, bb ,cc").unwrap();
        assert_eq!(keys, vec!["aa", "bb", "cc"]);
    }

    #[test]
    fn test_parse_wallet_keys_single() {
        assert_eq!(parse_wallet_keys("aa").unwrap(), vec!["aa"]);
    }

    #[test]
    fn test_parse_wallet_keys_rejects_empty() {
        assert!(parse_wallet_keys("").is_err());
        assert!(parse_wallet_keys(" , ,").is_err());
    }

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("TARGET_BLOCK", "16890400").unwrap(), 16890400);
        assert!(parse_u64("TARGET_BLOCK", "-1").is_err());
        assert!(parse_u64("TARGET_BLOCK", "not-a-number").is_err());
    }

    #[test]
    fn test_parse_address() {
        let addr = parse_address(
            "DISTRIBUTOR_ADDRESS",
            "0x67a24CE4321aB3aF51c2D0a4801c3E111D88C9d9",
        )
        .unwrap();
        assert_eq!(
            addr.to_string().to_lowercase(),
            "0x67a24ce4321ab3af51c2d0a4801c3e111d88c9d9"
        );
        assert!(parse_address("DISTRIBUTOR_ADDRESS", "0x1234").is_err());
    }

    #[test]
    fn test_default_gas_settings() {
        let gas = GasSettings::default();
        assert_eq!(gas.limit, 300_000);
        assert_eq!(gas.price_wei, 20_000_000_000);
    }
}
