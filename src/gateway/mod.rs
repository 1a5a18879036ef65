//! Gateway trait abstractions for the bridge workflow
//!
//! The workflow controller never talks to a wallet or a chain directly; it
//! goes through two capability-typed gateways. [`WalletGateway`] covers
//! session acquisition and network switching, [`OftGateway`] covers every
//! contract interaction (metadata views, fee quotes, preflight, submission,
//! confirmation), and [`OftBinder`] binds a gateway at a validated contract
//! address. Abstracting these behind traits is what makes the controller
//! testable against fakes, including the adversarial scenarios (preflight
//! reverts, mid-flight session changes) that never come up on a happy path.
//!
//! # Example: wiring the real gateway
//!
//! ```rust,no_run
//! use oft_rs::{AlloyOftBinder, OftBinder};
//! use alloy_provider::ProviderBuilder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ProviderBuilder::new().connect_http("http://localhost:8545".parse()?);
//! let binder = AlloyOftBinder::new(provider);
//! let gateway = binder.bind("0x742d35Cc6634C0532925a3b844Bc9e7595f8fA0d".parse()?);
//! # Ok(())
//! # }
//! ```

mod alloy;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;

use crate::chain::NetworkDescriptor;
use crate::contracts::SendParam;
use crate::error::Result;
use crate::protocol::FeeQuote;

pub use alloy::{AlloyOftBinder, AlloyOftGateway};

/// A wallet session: the connected account and the chain it is on
///
/// Owned by the controller, read-only to everything else. Invalidated by
/// disconnect and updated in place by account/network change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub address: Address,
    pub chain_id: u64,
}

/// Asynchronous wallet notifications
///
/// The embedding layer subscribes to the wallet's own event stream and
/// forwards each notification into
/// [`OftBridge::handle_session_event`](crate::OftBridge::handle_session_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The selected account changed; `None` means no account remains
    AccountsChanged(Option<Address>),
    /// The wallet moved to a different network
    ChainChanged(u64),
    /// The wallet disconnected entirely
    Disconnected,
}

/// Confirmation status of a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

/// Handle for a submitted bridge transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxHandle {
    pub tx_hash: TxHash,
    pub status: TxStatus,
}

impl TxHandle {
    pub(crate) const fn pending(tx_hash: TxHash) -> Self {
        Self {
            tx_hash,
            status: TxStatus::Pending,
        }
    }

    /// Returns true while the transaction awaits confirmation
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, TxStatus::Pending)
    }
}

/// Wallet/session gateway
///
/// Connect, inspect, and steer the user's wallet. Implementations translate
/// user rejection into [`OftError::UserRejected`](crate::OftError::UserRejected)
/// or [`OftError::NetworkSwitchRejected`](crate::OftError::NetworkSwitchRejected),
/// and report a network the wallet has never seen as
/// [`OftError::UnknownNetwork`](crate::OftError::UnknownNetwork) so the
/// controller can fall back to an add-network request.
#[async_trait]
pub trait WalletGateway: Send + Sync {
    /// Request a session from the wallet
    async fn connect(&self) -> Result<Session>;

    /// Returns the current session, if any
    async fn current_session(&self) -> Result<Option<Session>>;

    /// Ask the wallet to switch to the given network
    async fn switch_network(&self, chain_id: u64) -> Result<()>;

    /// Ask the wallet to add a network from a static preset
    async fn add_network(&self, descriptor: &NetworkDescriptor) -> Result<()>;
}

/// Contract-call gateway for a bound OFT contract
///
/// One gateway instance is bound per contract address. The quote calls and
/// transaction builders exist in both ABI shapes; the controller picks the
/// pair matching the variant detected at load time.
#[async_trait]
pub trait OftGateway: Send + Sync {
    /// The address this gateway is bound to
    fn contract_address(&self) -> Address;

    /// Token name view call
    async fn token_name(&self) -> Result<String>;

    /// Token symbol view call
    async fn token_symbol(&self) -> Result<String>;

    /// Token decimals view call
    async fn token_decimals(&self) -> Result<u8>;

    /// Legacy fee quote (`estimateSendFee`)
    async fn estimate_send_fee(
        &self,
        dst_chain_id: u16,
        to_address: Bytes,
        amount: U256,
        use_zro: bool,
        adapter_params: Bytes,
    ) -> Result<FeeQuote>;

    /// V2 fee quote (`quoteSend`)
    async fn quote_send(&self, send_param: SendParam, pay_in_lz_token: bool) -> Result<FeeQuote>;

    /// Build the legacy payable `sendFrom` transaction
    #[allow(clippy::too_many_arguments)]
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
    ) -> TransactionRequest;

    /// Build the v2 payable `send` transaction
    fn send_v2_transaction(
        &self,
        from: Address,
        send_param: SendParam,
        fee: FeeQuote,
        refund_address: Address,
    ) -> TransactionRequest;

    /// Simulate the transaction and estimate its gas without submitting
    ///
    /// Returns the gas estimate on success. Any failure means the real
    /// transaction would revert; the controller surfaces it as
    /// [`OftError::PreflightReverted`](crate::OftError::PreflightReverted)
    /// and does not submit.
    async fn preflight(&self, tx: &TransactionRequest) -> Result<u64>;

    /// Submit the transaction and return its hash
    async fn submit(&self, tx: TransactionRequest) -> Result<TxHash>;

    /// Wait for the submitted transaction's receipt
    ///
    /// Unbounded: cancellation is the transport's concern.
    async fn await_confirmation(&self, tx_hash: TxHash) -> Result<TxStatus>;
}

/// Binds an [`OftGateway`] at a contract address
pub trait OftBinder: Send + Sync {
    type Gateway: OftGateway;

    /// Bind a gateway for the contract at `address`
    ///
    /// Pure construction; the first network traffic happens when the
    /// controller probes metadata and capabilities.
    fn bind(&self, address: Address) -> Self::Gateway;
}
