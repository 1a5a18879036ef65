//! Test utilities and fake gateway implementations
//!
//! Fake implementations of the gateway traits that let the workflow
//! controller be exercised without a wallet or a chain, including the
//! adversarial scenarios that matter most here: absent capabilities,
//! preflight reverts, failed submissions, and session changes racing an
//! in-flight quote.
//!
//! Every fake is `Clone` and shares its state through `Arc`, so a test can
//! keep a handle for scripting and assertions while the controller owns
//! another.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;

use crate::chain::NetworkDescriptor;
use crate::contracts::SendParam;
use crate::error::{OftError, Result};
use crate::gateway::{OftBinder, OftGateway, Session, TxStatus, WalletGateway};
use crate::protocol::FeeQuote;

// ============================================================================
// Fake wallet gateway
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum ConnectFailure {
    Unavailable,
    Rejected,
}

/// A fake wallet that returns a scripted session and network behavior.
///
/// This allows testing scenarios like:
/// - Missing provider / user rejection on connect
/// - Network switches against known and unknown chains
/// - User rejection of a switch or an add-network request
#[derive(Clone, Default)]
pub struct FakeWalletGateway {
    session: Arc<Mutex<Option<Session>>>,
    connect_failure: Arc<Mutex<Option<ConnectFailure>>>,
    known_chains: Arc<Mutex<HashSet<u64>>>,
    reject_switch: Arc<Mutex<bool>>,
    reject_add: Arc<Mutex<bool>>,
    switch_calls: Arc<Mutex<Vec<u64>>>,
    added_networks: Arc<Mutex<Vec<NetworkDescriptor>>>,
}

impl FakeWalletGateway {
    /// A wallet that will connect as `session`, already on a known chain
    pub fn with_session(session: Session) -> Self {
        let wallet = Self::default();
        *wallet.session.lock().unwrap() = Some(session);
        wallet.add_known_chain(session.chain_id);
        wallet
    }

    /// Configure connect() to fail as if no provider were injected
    pub fn fail_connect_unavailable(&self) {
        *self.connect_failure.lock().unwrap() = Some(ConnectFailure::Unavailable);
    }

    /// Configure connect() to fail as if the user declined
    pub fn fail_connect_rejected(&self) {
        *self.connect_failure.lock().unwrap() = Some(ConnectFailure::Rejected);
    }

    /// Mark a chain as known to the wallet
    pub fn add_known_chain(&self, chain_id: u64) {
        self.known_chains.lock().unwrap().insert(chain_id);
    }

    /// Configure switch_network() to fail as if the user declined
    pub fn reject_switch(&self) {
        *self.reject_switch.lock().unwrap() = true;
    }

    /// Configure add_network() to fail as if the user declined
    pub fn reject_add(&self) {
        *self.reject_add.lock().unwrap() = true;
    }

    /// Chain ids passed to switch_network(), in call order
    pub fn switch_calls(&self) -> Vec<u64> {
        self.switch_calls.lock().unwrap().clone()
    }

    /// Descriptors passed to add_network(), in call order
    pub fn added_networks(&self) -> Vec<NetworkDescriptor> {
        self.added_networks.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletGateway for FakeWalletGateway {
    async fn connect(&self) -> Result<Session> {
        match *self.connect_failure.lock().unwrap() {
            Some(ConnectFailure::Unavailable) => return Err(OftError::WalletUnavailable),
            Some(ConnectFailure::Rejected) => return Err(OftError::UserRejected),
            None => {}
        }
        self.session
            .lock()
            .unwrap()
            .ok_or(OftError::WalletUnavailable)
    }

    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(*self.session.lock().unwrap())
    }

    async fn switch_network(&self, chain_id: u64) -> Result<()> {
        self.switch_calls.lock().unwrap().push(chain_id);
        if *self.reject_switch.lock().unwrap() {
            return Err(OftError::NetworkSwitchRejected);
        }
        if !self.known_chains.lock().unwrap().contains(&chain_id) {
            return Err(OftError::UnknownNetwork(chain_id));
        }
        if let Some(session) = self.session.lock().unwrap().as_mut() {
            session.chain_id = chain_id;
        }
        Ok(())
    }

    async fn add_network(&self, descriptor: &NetworkDescriptor) -> Result<()> {
        self.added_networks.lock().unwrap().push(descriptor.clone());
        if *self.reject_add.lock().unwrap() {
            return Err(OftError::NetworkSwitchRejected);
        }
        self.known_chains.lock().unwrap().insert(descriptor.chain_id);
        Ok(())
    }
}

// ============================================================================
// Fake contract gateway
// ============================================================================

/// Scripted behavior for one quote entrypoint
#[derive(Debug, Clone)]
enum QuoteBehavior {
    /// The entrypoint is absent: every call reverts
    Unsupported,
    /// The entrypoint exists but the call fails (e.g. missing peer route)
    Fails(String),
    /// The entrypoint returns this quote
    Returns(FeeQuote),
}

impl QuoteBehavior {
    fn resolve(&self) -> Result<FeeQuote> {
        match self {
            Self::Unsupported => Err(OftError::ContractCall(
                "execution reverted: function selector not recognized".to_string(),
            )),
            Self::Fails(reason) => Err(OftError::ContractCall(reason.clone())),
            Self::Returns(fee) => Ok(*fee),
        }
    }
}

#[derive(Debug, Clone)]
enum PreflightBehavior {
    Succeeds(u64),
    Reverts(String),
}

/// A fake OFT gateway with scripted metadata, quotes, and preflight.
///
/// The default constructed via [`FakeOftGateway::new`] is a healthy v2
/// contract: metadata resolves, `quote_send` returns a fixed quote,
/// preflight succeeds, submissions are accepted and confirm. Individual
/// `fail_*` / `unsupported_*` configurators break one behavior at a time.
#[derive(Clone)]
pub struct FakeOftGateway {
    address: Arc<Mutex<Address>>,
    name: Arc<Mutex<Option<String>>>,
    symbol: Arc<Mutex<Option<String>>>,
    decimals: Arc<Mutex<Option<u8>>>,
    v1_quote: Arc<Mutex<QuoteBehavior>>,
    v2_quote: Arc<Mutex<QuoteBehavior>>,
    quote_calls: Arc<Mutex<u32>>,
    preflight: Arc<Mutex<PreflightBehavior>>,
    preflight_calls: Arc<Mutex<u32>>,
    submit_failure: Arc<Mutex<Option<String>>>,
    submissions: Arc<Mutex<Vec<TransactionRequest>>>,
    confirmation: Arc<Mutex<TxStatus>>,
}

impl FakeOftGateway {
    /// A healthy v2 contract quoting a fixed fee of 1000 wei
    pub fn new() -> Self {
        Self {
            address: Arc::new(Mutex::new(Address::ZERO)),
            name: Arc::new(Mutex::new(Some("Omni Token".to_string()))),
            symbol: Arc::new(Mutex::new(Some("OMNI".to_string()))),
            decimals: Arc::new(Mutex::new(Some(18))),
            v1_quote: Arc::new(Mutex::new(QuoteBehavior::Unsupported)),
            v2_quote: Arc::new(Mutex::new(QuoteBehavior::Returns(FeeQuote::native(
                U256::from(1000u64),
            )))),
            quote_calls: Arc::new(Mutex::new(0)),
            preflight: Arc::new(Mutex::new(PreflightBehavior::Succeeds(120_000))),
            preflight_calls: Arc::new(Mutex::new(0)),
            submit_failure: Arc::new(Mutex::new(None)),
            submissions: Arc::new(Mutex::new(Vec::new())),
            confirmation: Arc::new(Mutex::new(TxStatus::Confirmed)),
        }
    }

    /// Reshape into a legacy contract: v1 quotes work, v2 quotes revert
    pub fn as_v1(&self, fee: FeeQuote) -> &Self {
        *self.v1_quote.lock().unwrap() = QuoteBehavior::Returns(fee);
        *self.v2_quote.lock().unwrap() = QuoteBehavior::Unsupported;
        self
    }

    /// Set the quote returned by the v2 entrypoint
    pub fn set_quote(&self, fee: FeeQuote) {
        *self.v2_quote.lock().unwrap() = QuoteBehavior::Returns(fee);
    }

    /// Make both quote entrypoints revert as if absent
    pub fn unsupported_quotes(&self) {
        *self.v1_quote.lock().unwrap() = QuoteBehavior::Unsupported;
        *self.v2_quote.lock().unwrap() = QuoteBehavior::Unsupported;
    }

    /// Make the active v2 entrypoint fail with a reason (e.g. no peer)
    pub fn fail_quotes(&self, reason: &str) {
        *self.v2_quote.lock().unwrap() = QuoteBehavior::Fails(reason.to_string());
    }

    /// Make the name probe fail
    pub fn fail_name(&self) {
        *self.name.lock().unwrap() = None;
    }

    /// Make the symbol probe fail
    pub fn fail_symbol(&self) {
        *self.symbol.lock().unwrap() = None;
    }

    /// Make the decimals probe fail
    pub fn fail_decimals(&self) {
        *self.decimals.lock().unwrap() = None;
    }

    /// Set the token decimals returned by the metadata probe
    pub fn set_decimals(&self, decimals: u8) {
        *self.decimals.lock().unwrap() = Some(decimals);
    }

    /// Make preflight revert with the given reason
    pub fn revert_preflight(&self, reason: &str) {
        *self.preflight.lock().unwrap() = PreflightBehavior::Reverts(reason.to_string());
    }

    /// Restore a succeeding preflight
    pub fn pass_preflight(&self, gas: u64) {
        *self.preflight.lock().unwrap() = PreflightBehavior::Succeeds(gas);
    }

    /// Make submission fail with the given reason
    pub fn fail_submit(&self, reason: &str) {
        *self.submit_failure.lock().unwrap() = Some(reason.to_string());
    }

    /// Script the confirmation outcome for submitted transactions
    pub fn set_confirmation(&self, status: TxStatus) {
        *self.confirmation.lock().unwrap() = status;
    }

    /// Total quote calls across both entrypoints (probes included)
    pub fn quote_call_count(&self) -> u32 {
        *self.quote_calls.lock().unwrap()
    }

    /// Number of preflight simulations run
    pub fn preflight_call_count(&self) -> u32 {
        *self.preflight_calls.lock().unwrap()
    }

    /// Transactions actually submitted, in order
    pub fn submissions(&self) -> Vec<TransactionRequest> {
        self.submissions.lock().unwrap().clone()
    }
}

impl Default for FakeOftGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OftGateway for FakeOftGateway {
    fn contract_address(&self) -> Address {
        *self.address.lock().unwrap()
    }

    async fn token_name(&self) -> Result<String> {
        self.name
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| OftError::ContractCall("name() reverted".to_string()))
    }

    async fn token_symbol(&self) -> Result<String> {
        self.symbol
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| OftError::ContractCall("symbol() reverted".to_string()))
    }

    async fn token_decimals(&self) -> Result<u8> {
        self.decimals
            .lock()
            .unwrap()
            .ok_or_else(|| OftError::ContractCall("decimals() reverted".to_string()))
    }

    async fn estimate_send_fee(
        &self,
        _dst_chain_id: u16,
        _to_address: Bytes,
        _amount: U256,
        _use_zro: bool,
        _adapter_params: Bytes,
    ) -> Result<FeeQuote> {
        *self.quote_calls.lock().unwrap() += 1;
        self.v1_quote.lock().unwrap().resolve()
    }

    async fn quote_send(&self, _send_param: SendParam, _pay_in_lz_token: bool) -> Result<FeeQuote> {
        *self.quote_calls.lock().unwrap() += 1;
        self.v2_quote.lock().unwrap().resolve()
    }

    fn send_from_transaction(
        &self,
        from: Address,
        _dst_chain_id: u16,
        _to_address: Bytes,
        _amount: U256,
        _refund_address: Address,
        _zro_payment_address: Address,
        _adapter_params: Bytes,
        value: U256,
    ) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(from)
            .with_to(self.contract_address())
            .with_value(value)
    }

    fn send_v2_transaction(
        &self,
        from: Address,
        _send_param: SendParam,
        fee: FeeQuote,
        _refund_address: Address,
    ) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(from)
            .with_to(self.contract_address())
            .with_value(fee.native_fee)
    }

    async fn preflight(&self, _tx: &TransactionRequest) -> Result<u64> {
        *self.preflight_calls.lock().unwrap() += 1;
        match &*self.preflight.lock().unwrap() {
            PreflightBehavior::Succeeds(gas) => Ok(*gas),
            PreflightBehavior::Reverts(reason) => Err(OftError::ContractCall(reason.clone())),
        }
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<TxHash> {
        if let Some(reason) = self.submit_failure.lock().unwrap().clone() {
            return Err(OftError::ContractCall(reason));
        }
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(tx);
        Ok(TxHash::with_last_byte(submissions.len() as u8))
    }

    async fn await_confirmation(&self, _tx_hash: TxHash) -> Result<TxStatus> {
        Ok(*self.confirmation.lock().unwrap())
    }
}

// ============================================================================
// Fake binder
// ============================================================================

/// An [`OftBinder`] that hands out clones of one scripted gateway
#[derive(Clone)]
pub struct FakeOftBinder {
    gateway: FakeOftGateway,
    bound: Arc<Mutex<Vec<Address>>>,
}

impl FakeOftBinder {
    pub fn new(gateway: FakeOftGateway) -> Self {
        Self {
            gateway,
            bound: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Addresses bind() was called with, in order
    pub fn bound_addresses(&self) -> Vec<Address> {
        self.bound.lock().unwrap().clone()
    }
}

impl OftBinder for FakeOftBinder {
    type Gateway = FakeOftGateway;

    fn bind(&self, address: Address) -> Self::Gateway {
        self.bound.lock().unwrap().push(address);
        *self.gateway.address.lock().unwrap() = address;
        self.gateway.clone()
    }
}
