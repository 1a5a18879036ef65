//! Alloy-backed gateway implementation
//!
//! Implements [`OftGateway`] over the inline contract bindings, with
//! preflight as an `eth_call` dry run followed by gas estimation, and
//! confirmation as a receipt-polling loop.

use alloy_network::Ethereum;
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use super::{OftBinder, OftGateway, TxStatus};
use crate::contracts::{OftV1Contract, OftV2Contract, SendParam};
use crate::error::Result;
use crate::protocol::FeeQuote;

/// Seconds between receipt polls while awaiting confirmation
const CONFIRMATION_POLL_SECS: u64 = 4;

/// [`OftGateway`] implementation over an alloy [`Provider`]
///
/// Holds both ABI bindings at the same address; which pair of entrypoints
/// is exercised is the controller's variant decision, made once at load.
pub struct AlloyOftGateway<P: Provider<Ethereum> + Clone> {
    address: Address,
    v1: OftV1Contract<P>,
    v2: OftV2Contract<P>,
    provider: P,
}

impl<P: Provider<Ethereum> + Clone> AlloyOftGateway<P> {
    /// Create a gateway bound to the contract at `address`
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            address,
            v1: OftV1Contract::new(address, provider.clone()),
            v2: OftV2Contract::new(address, provider.clone()),
            provider,
        }
    }
}

#[async_trait]
impl<P: Provider<Ethereum> + Clone> OftGateway for AlloyOftGateway<P> {
    fn contract_address(&self) -> Address {
        self.address
    }

    async fn token_name(&self) -> Result<String> {
        Ok(self.v1.name().await?)
    }

    async fn token_symbol(&self) -> Result<String> {
        Ok(self.v1.symbol().await?)
    }

    async fn token_decimals(&self) -> Result<u8> {
        Ok(self.v1.decimals().await?)
    }

    async fn estimate_send_fee(
        &self,
        dst_chain_id: u16,
        to_address: Bytes,
        amount: U256,
        use_zro: bool,
        adapter_params: Bytes,
    ) -> Result<FeeQuote> {
        Ok(self
            .v1
            .estimate_send_fee(dst_chain_id, to_address, amount, use_zro, adapter_params)
            .await?)
    }

    async fn quote_send(&self, send_param: SendParam, pay_in_lz_token: bool) -> Result<FeeQuote> {
        Ok(self.v2.quote_send(send_param, pay_in_lz_token).await?)
    }

    fn send_from_transaction(
        &self,
        from: Address,
        dst_chain_id: u16,
        to_address: Bytes,
        amount: U256,
        refund_address: Address,
        zro_payment_address: Address,
        adapter_params: Bytes,
        value: U256,
    ) -> TransactionRequest {
        self.v1.send_from_transaction(
            from,
            dst_chain_id,
            to_address,
            amount,
            refund_address,
            zro_payment_address,
            adapter_params,
            value,
        )
    }

    fn send_v2_transaction(
        &self,
        from: Address,
        send_param: SendParam,
        fee: FeeQuote,
        refund_address: Address,
    ) -> TransactionRequest {
        self.v2.send_transaction(from, send_param, fee, refund_address)
    }

    async fn preflight(&self, tx: &TransactionRequest) -> Result<u64> {
        // Dry run first so revert reasons surface before gas estimation.
        self.provider.call(tx.clone()).await?;
        let gas = self.provider.estimate_gas(tx.clone()).await?;

        debug!(
            contract_address = %self.address,
            gas_estimate = gas,
            event = "preflight_succeeded"
        );
        Ok(gas)
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<TxHash> {
        let pending_tx = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending_tx.tx_hash();

        info!(
            tx_hash = %tx_hash,
            contract_address = %self.address,
            event = "bridge_transaction_sent"
        );
        Ok(tx_hash)
    }

    async fn await_confirmation(&self, tx_hash: TxHash) -> Result<TxStatus> {
        loop {
            if let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? {
                let status = if receipt.status() {
                    TxStatus::Confirmed
                } else {
                    TxStatus::Failed
                };
                info!(
                    tx_hash = %tx_hash,
                    confirmed = matches!(status, TxStatus::Confirmed),
                    event = "bridge_transaction_mined"
                );
                return Ok(status);
            }
            debug!(tx_hash = %tx_hash, event = "receipt_not_yet_available");
            sleep(Duration::from_secs(CONFIRMATION_POLL_SECS)).await;
        }
    }
}

/// [`OftBinder`] implementation that binds [`AlloyOftGateway`]s over a
/// shared provider
#[derive(Clone)]
pub struct AlloyOftBinder<P: Provider<Ethereum> + Clone> {
    provider: P,
}

impl<P: Provider<Ethereum> + Clone> AlloyOftBinder<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider<Ethereum> + Clone> OftBinder for AlloyOftBinder<P> {
    type Gateway = AlloyOftGateway<P>;

    fn bind(&self, address: Address) -> Self::Gateway {
        debug!(
            contract_address = %address,
            event = "oft_gateway_bound"
        );
        AlloyOftGateway::new(address, self.provider.clone())
    }
}
