//! OFT v2 contract bindings and wrapper
//!
//! Bindings for the v2 endpoint's OFT interface. V2 reshapes the call
//! surface: the destination is a `uint32` endpoint id, the recipient is a
//! zero-padded `bytes32` word, slippage is explicit as `minAmountLD`, and
//! the fee quote comes back as a `MessagingFee` struct from `quoteSend`.

use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::sol;
use tracing::{debug, info};

use crate::protocol::FeeQuote;
use crate::spans;
use OftV2::OftV2Instance;

pub use OftV2::{MessagingFee, SendParam};

/// Wrapper for an OFT v2 contract
pub struct OftV2Contract<P: Provider<Ethereum>> {
    instance: OftV2Instance<P>,
}

impl<P: Provider<Ethereum>> OftV2Contract<P> {
    /// Create a new OftV2Contract
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "oft_v2_contract_initialized"
        );
        Self {
            instance: OftV2Instance::new(address, provider),
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

    /// Quote the fee for a bridge call via `quoteSend`
    pub async fn quote_send(
        &self,
        send_param: SendParam,
        pay_in_lz_token: bool,
    ) -> Result<FeeQuote, alloy_contract::Error> {
        debug!(
            dst_eid = send_param.dstEid,
            amount_ld = %send_param.amountLD,
            pay_in_lz_token = pay_in_lz_token,
            contract_address = %self.instance.address(),
            event = "quote_send_called"
        );

        let fee = self
            .instance
            .quoteSend(send_param, pay_in_lz_token)
            .call()
            .await?;

        Ok(FeeQuote {
            native_fee: fee.nativeFee,
            lz_token_fee: fee.lzTokenFee,
        })
    }

    /// Create the transaction request for the payable `send` call
    ///
    /// The attached `value` and the `fee` argument both come from the same
    /// [`FeeQuote`]; the contract checks them against each other.
    pub fn send_transaction(
        &self,
        from: Address,
        send_param: SendParam,
        fee: FeeQuote,
        refund_address: Address,
    ) -> TransactionRequest {
        let span = spans::send_bridge(&from, send_param.dstEid, &send_param.amountLD, &fee.native_fee);
        let _guard = span.enter();

        info!(
            from = %from,
            dst_eid = send_param.dstEid,
            amount_ld = %send_param.amountLD,
            min_amount_ld = %send_param.minAmountLD,
            native_fee = %fee.native_fee,
            contract_address = %self.instance.address(),
            version = "v2",
            event = "send_transaction_created"
        );

        let value = fee.native_fee;
        let messaging_fee = MessagingFee {
            nativeFee: fee.native_fee,
            lzTokenFee: fee.lz_token_fee,
        };

        self.instance
            .send(send_param, messaging_fee, refund_address)
            .from(from)
            .value(value)
            .into_transaction_request()
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

// Minimal OFT v2 interface: quote, payable send, metadata views. Return
// values of `send` are omitted; the selector only depends on the inputs and
// the workflow never decodes the send result.
sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract OftV2 {
        struct SendParam {
            uint32 dstEid;
            bytes32 to;
            uint256 amountLD;
            uint256 minAmountLD;
            bytes extraOptions;
            bytes composeMsg;
            bytes oftCmd;
        }

        struct MessagingFee {
            uint256 nativeFee;
            uint256 lzTokenFee;
        }

        function quoteSend(SendParam sendParam, bool payInLzToken) external view returns (MessagingFee fee);
        function send(SendParam sendParam, MessagingFee fee, address refundAddress) external payable;
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
    }
);
