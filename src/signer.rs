//! Wallet key handling and chain-bound signing
//!
//! A raw private key maps deterministically to exactly one address.
//! Derivation is a pure function of the input; keys are never logged.

use crate::error::SubmitError;
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

/// A wallet derived from a hex-encoded private key.
#[derive(Debug, Clone)]
pub struct Wallet {
    address: Address,
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Parse a hex-encoded private key, with or without `0x` prefix.
    ///
    /// Fails with [`SubmitError::InvalidKey`] when the hex does not
    /// decode into a valid key.
    pub fn from_hex_key(key: &str) -> Result<Self, SubmitError> {
        let key = key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);

        let signer: PrivateKeySigner = key
            .parse::<PrivateKeySigner>()
            .map_err(|err| SubmitError::InvalidKey(err.to_string()))?;
        let address = signer.address();

        Ok(Self { address, signer })
    }

    /// The address derived from the key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Bind the signing capability to a chain id, producing the wallet
    /// that authorizes transactions from the derived address.
    pub fn bound_to_chain(&self, chain_id: u64) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone().with_chain_id(Some(chain_id)))
    }
}
