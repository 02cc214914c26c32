//! Per-wallet transaction construction and broadcast
//!
//! Each submission attempt is independent: it derives its own signing
//! capability, binds it to the target chain, and broadcasts exactly one
//! transaction on success. Gas parameters are fixed configuration inputs,
//! never discovered.

use crate::config::GasSettings;
use crate::contracts::{IERC20, ITokenDistributor};
use crate::error::SubmitError;
use crate::signer::Wallet;
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;

/// Which contract operation a submission performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Claim the wallet's owed tokens from the distributor.
    Claim,
    /// Sweep the wallet's full token balance to `receive`.
    Transfer { receive: Address },
}

impl Operation {
    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Claim => "claim",
            Operation::Transfer { .. } => "transfer",
        }
    }
}

/// Outcome of one wallet's submission attempt.
#[derive(Debug)]
pub struct SubmissionOutcome {
    /// Derived sender address. `None` when the key itself was invalid.
    pub wallet: Option<Address>,
    pub operation: Operation,
    pub result: Result<TxHash, SubmitError>,
}

impl SubmissionOutcome {
    /// Wallet address for log lines.
    pub fn wallet_label(&self) -> String {
        self.wallet
            .map(|address| address.to_string())
            .unwrap_or_else(|| "<invalid key>".to_string())
    }
}

/// One submission attempt per call, isolated from all sibling wallets.
pub trait Submit: Send + Sync {
    /// Derive the wallet from `key` and perform one `operation` attempt.
    fn submit(
        &self,
        key: String,
        operation: Operation,
    ) -> impl std::future::Future<Output = SubmissionOutcome> + Send;
}

/// Builds, signs and broadcasts claim and transfer transactions on the
/// target chain.
pub struct TxSubmitter<P> {
    provider: P,
    distributor: Address,
    token: Address,
    gas: GasSettings,
}

impl<P> TxSubmitter<P> {
    pub fn new(provider: P, distributor: Address, token: Address, gas: GasSettings) -> Self {
        Self {
            provider,
            distributor,
            token,
            gas,
        }
    }
}

impl<P: Provider> TxSubmitter<P> {
    /// Query the wallet's token balance via `eth_call`.
    async fn token_balance(&self, owner: Address) -> Result<U256, SubmitError> {
        let call = IERC20::balanceOfCall { account: owner };

        let raw = self
            .provider
            .call(
                TransactionRequest::default()
                    .with_to(self.token)
                    .with_input(call.abi_encode()),
            )
            .await
            .map_err(|err| SubmitError::ChainUnavailable(err.to_string()))?;

        IERC20::balanceOfCall::abi_decode_returns(&raw)
            .map_err(|err| SubmitError::ChainUnavailable(err.to_string()))
    }

    async fn try_submit(&self, wallet: &Wallet, operation: Operation) -> Result<TxHash, SubmitError> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|err| SubmitError::ChainUnavailable(err.to_string()))?;
        let nonce = self
            .provider
            .get_transaction_count(wallet.address())
            .await
            .map_err(|err| SubmitError::ChainUnavailable(err.to_string()))?;

        let (to, input) = match operation {
            Operation::Claim => (self.distributor, ITokenDistributor::claimCall {}.abi_encode()),
            Operation::Transfer { receive } => {
                let balance = self.token_balance(wallet.address()).await?;
                if balance.is_zero() {
                    return Err(SubmitError::ZeroBalance);
                }
                tracing::debug!(
                    from = %wallet.address(),
                    to = %receive,
                    amount = %balance,
                    "sweeping full balance"
                );
                (
                    self.token,
                    IERC20::transferCall {
                        to: receive,
                        amount: balance,
                    }
                    .abi_encode(),
                )
            }
        };

        let request = TransactionRequest::default()
            .with_from(wallet.address())
            .with_to(to)
            .with_input(input)
            .with_nonce(nonce)
            .with_chain_id(chain_id)
            .with_gas_limit(self.gas.limit)
            .with_gas_price(self.gas.price_wei);

        let signer = wallet.bound_to_chain(chain_id);
        let signed = request
            .build(&signer)
            .await
            .map_err(|err| SubmitError::Rejected(err.to_string()))?;

        let pending = self
            .provider
            .send_raw_transaction(&signed.encoded_2718())
            .await
            .map_err(|err| SubmitError::Rejected(err.to_string()))?;

        Ok(*pending.tx_hash())
    }
}

impl<P: Provider> Submit for TxSubmitter<P> {
    async fn submit(&self, key: String, operation: Operation) -> SubmissionOutcome {
        let wallet = match Wallet::from_hex_key(&key) {
            Ok(wallet) => wallet,
            Err(err) => {
                return SubmissionOutcome {
                    wallet: None,
                    operation,
                    result: Err(err),
                }
            }
        };

        let result = self.try_submit(&wallet, operation).await;

        SubmissionOutcome {
            wallet: Some(wallet.address()),
            operation,
            result,
        }
    }
}
