//! Legacy OFT contract bindings and wrapper
//!
//! Bindings for the legacy (endpoint v1) OFT interface: `estimateSendFee`
//! for fee quotation and `sendFrom` for the payable bridge call, plus the
//! ERC20 metadata views used by the contract probe.

use alloy_network::Ethereum;
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::sol;
use tracing::{debug, info};

use crate::protocol::FeeQuote;
use crate::spans;
use OftV1::OftV1Instance;

/// Wrapper for a legacy OFT (or OFT adapter) contract
pub struct OftV1Contract<P: Provider<Ethereum>> {
    instance: OftV1Instance<P>,
}

impl<P: Provider<Ethereum>> OftV1Contract<P> {
    /// Create a new OftV1Contract
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "oft_v1_contract_initialized"
        );
        Self {
            instance: OftV1Instance::new(address, provider),
        }
    }

    /// Token name view call
    pub async fn name(&self) -> Result<String, alloy_contract::Error> {
        self.instance.name().call().await
    }

    /// Token symbol view call
    pub async fn symbol(&self) -> Result<String, alloy_contract::Error> {
        self.instance.symbol().call().await
    }

    /// Token decimals view call
    pub async fn decimals(&self) -> Result<u8, alloy_contract::Error> {
        self.instance.decimals().call().await
    }

    /// Quote the fee for a bridge call via `estimateSendFee`
    ///
    /// Read-only; repeatable. The returned quote is only valid for exactly
    /// these arguments.
    pub async fn estimate_send_fee(
        &self,
        dst_chain_id: u16,
        to_address: Bytes,
        amount: U256,
        use_zro: bool,
        adapter_params: Bytes,
    ) -> Result<FeeQuote, alloy_contract::Error> {
        debug!(
            dst_chain_id = dst_chain_id,
            amount = %amount,
            use_zro = use_zro,
            contract_address = %self.instance.address(),
            event = "estimate_send_fee_called"
        );

        let fees = self
            .instance
            .estimateSendFee(dst_chain_id, to_address, amount, use_zro, adapter_params)
            .call()
            .await?;

        Ok(FeeQuote {
            native_fee: fees.nativeFee,
            lz_token_fee: fees.zroFee,
        })
    }

    /// Create the transaction request for the payable `sendFrom` call
    ///
    /// `value` is the native fee to attach; the caller decides it from a
    /// quote or an explicit override.
    #[allow(clippy::too_many_arguments)]
    pub fn send_from_transaction(
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
        let span = spans::send_bridge(&from, dst_chain_id as u32, &amount, &value);
        let _guard = span.enter();

        info!(
            from = %from,
            dst_chain_id = dst_chain_id,
            amount = %amount,
            value = %value,
            contract_address = %self.instance.address(),
            version = "v1",
            event = "send_from_transaction_created"
        );

        self.instance
            .sendFrom(
                from,
                dst_chain_id,
                to_address,
                amount,
                refund_address,
                zro_payment_address,
                adapter_params,
            )
            .from(from)
            .value(value)
            .into_transaction_request()
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

// Minimal legacy OFT interface: fee quote, payable send, metadata views
sol!(
    #[allow(clippy::too_many_arguments)]
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract OftV1 {
        function estimateSendFee(uint16 dstChainId, bytes toAddress, uint256 amount, bool useZro, bytes adapterParams) external view returns (uint256 nativeFee, uint256 zroFee);
        function sendFrom(address from, uint16 dstChainId, bytes toAddress, uint256 amount, address refundAddress, address zroPaymentAddress, bytes adapterParams) external payable;
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
    }
);
