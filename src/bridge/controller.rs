//! The bridge workflow controller
//!
//! [`OftBridge`] owns the workflow state with a defined lifecycle: the
//! wallet session, the loaded contract with its probed metadata and
//! capabilities, the current request, the cached fee quote, and the
//! pending transaction handle. Each user action maps to one async method;
//! all chain traffic goes through the gateways.

use alloy_chains::NamedChain;
use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes, U256};
use tracing::{debug, info, warn};

use super::capabilities::{Capability, CapabilitySet, OftVariant};
use super::request::{BridgeRequest, RequestDraft};
use crate::chain::LayerZeroChain;
use crate::contracts::SendParam;
use crate::error::{OftError, Result};
use crate::gateway::{OftBinder, OftGateway, Session, SessionEvent, TxHandle, TxStatus, WalletGateway};
use crate::protocol::{EndpointId, FeeQuote};
use crate::spans;

/// Decimals assumed when the metadata probe cannot read them
const DEFAULT_DECIMALS: u8 = 18;

/// Token amount used for the defensive capability probe
const PROBE_AMOUNT: u64 = 1;

/// Token metadata probed at contract load
///
/// Each field degrades independently: a failed `name`/`symbol` call leaves
/// an empty string, a failed `decimals` call leaves 18.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// A loaded contract: address, metadata, and the capability probe result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedContract {
    pub address: Address,
    pub metadata: TokenMetadata,
    pub capabilities: CapabilitySet,
    pub variant: Option<OftVariant>,
}

impl LoadedContract {
    /// Returns the ABI variant if `capability` was detected at load
    ///
    /// This is the pre-network-call gate: an unsupported operation fails
    /// here, before any RPC traffic.
    fn require(&self, capability: Capability) -> Result<OftVariant> {
        if !self.capabilities.supports(capability) {
            return Err(OftError::CapabilityUnavailable(capability));
        }
        self.variant
            .ok_or(OftError::CapabilityUnavailable(capability))
    }
}

/// Phase of the current bridge attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgePhase {
    Idle,
    RequestBuilt,
    Quoted,
    Preflighted,
    Submitted,
    Confirmed,
    Failed,
}

/// A fee quote pinned to the request and session state that produced it
#[derive(Debug, Clone)]
struct CachedQuote {
    fee: FeeQuote,
    request: BridgeRequest,
    session_epoch: u64,
}

#[derive(Debug, Clone)]
struct PendingSend {
    request: BridgeRequest,
    handle: TxHandle,
}

struct Binding<G> {
    gateway: G,
    contract: LoadedContract,
}

/// Bridge workflow controller
///
/// Generic over the wallet gateway and the contract binder, so the same
/// controller runs against a real alloy provider or against the fakes in
/// [`crate::testing`].
///
/// A single bridge attempt moves through
/// `Idle → RequestBuilt → Quoted → Preflighted → Submitted →
/// Confirmed | Failed`; validation failures leave the state untouched,
/// preflight failures fall back to `Quoted` without submitting.
///
/// # Example
///
/// ```rust,no_run
/// use oft_rs::{AlloyOftBinder, EndpointId, OftBridge, RequestDraft};
/// # use oft_rs::testing::FakeWalletGateway;
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example(wallet: FakeWalletGateway) -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect_http("http://localhost:8545".parse()?);
/// let mut bridge = OftBridge::new(wallet, AlloyOftBinder::new(provider));
///
/// bridge.connect().await?;
/// bridge.load_contract("0x9f3B8679c73C2Fef8b59B4f3444d4e156fb70AA5").await?;
/// bridge.build_request(&RequestDraft::builder()
///     .destination(EndpointId::Arbitrum)
///     .amount("1.0")
///     .slippage_bps(50)
///     .build())?;
///
/// let fee = bridge.quote().await?;
/// println!("native fee: {} wei", fee.native_fee);
///
/// let handle = bridge.send(None).await?;
/// let handle = bridge.await_confirmation().await?;
/// println!("bridged in {}", handle.tx_hash);
/// # Ok(())
/// # }
/// ```
pub struct OftBridge<W: WalletGateway, B: OftBinder> {
    wallet: W,
    binder: B,
    session: Option<Session>,
    session_epoch: u64,
    binding: Option<Binding<B::Gateway>>,
    request: Option<BridgeRequest>,
    quote: Option<CachedQuote>,
    pending: Option<PendingSend>,
    phase: BridgePhase,
}

impl<W: WalletGateway, B: OftBinder> OftBridge<W, B> {
    /// Create a controller over the given gateways
    pub fn new(wallet: W, binder: B) -> Self {
        Self {
            wallet,
            binder,
            session: None,
            session_epoch: 0,
            binding: None,
            request: None,
            quote: None,
            pending: None,
            phase: BridgePhase::Idle,
        }
    }

    /// The current wallet session, if connected
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The currently loaded contract, if any
    pub fn contract(&self) -> Option<&LoadedContract> {
        self.binding.as_ref().map(|b| &b.contract)
    }

    /// The current validated request, if one was built
    pub fn request(&self) -> Option<&BridgeRequest> {
        self.request.as_ref()
    }

    /// Phase of the current bridge attempt
    pub fn phase(&self) -> BridgePhase {
        self.phase
    }

    /// Request a session from the wallet
    ///
    /// On success the connected address becomes the default recipient for
    /// drafts that omit one.
    ///
    /// # Errors
    ///
    /// [`OftError::WalletUnavailable`] when no provider is present,
    /// [`OftError::UserRejected`] when the user declines.
    pub async fn connect(&mut self) -> Result<Session> {
        let span = spans::connect_wallet();
        let _guard = span.enter();

        let session = self.wallet.connect().await.map_err(|e| {
            spans::record_error(&e);
            e
        })?;

        info!(
            address = %session.address,
            chain_id = session.chain_id,
            event = "wallet_connected"
        );
        self.session = Some(session);
        self.session_epoch += 1;
        Ok(session)
    }

    /// Apply an asynchronous wallet notification
    ///
    /// Bumps the session epoch so quotes computed under the previous
    /// session are discarded instead of silently reused; an in-flight
    /// request itself is left untouched.
    pub fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::AccountsChanged(Some(address)) => {
                if let Some(session) = &mut self.session {
                    session.address = address;
                }
            }
            SessionEvent::AccountsChanged(None) | SessionEvent::Disconnected => {
                self.session = None;
            }
            SessionEvent::ChainChanged(chain_id) => {
                if let Some(session) = &mut self.session {
                    session.chain_id = chain_id;
                }
            }
        }
        self.session_epoch += 1;

        debug!(
            session = ?self.session,
            session_epoch = self.session_epoch,
            event = "session_event_applied"
        );
    }

    /// Make sure the wallet is on the given source chain
    ///
    /// No-ops when the session already is. Otherwise requests a switch,
    /// and when the wallet reports the network as unknown, asks it to add
    /// the network from the static preset first.
    ///
    /// # Errors
    ///
    /// [`OftError::NotConnected`] without a session,
    /// [`OftError::UnsupportedChain`] when the chain has no preset,
    /// [`OftError::NetworkSwitchRejected`] when the user declines.
    pub async fn ensure_source_network(&mut self, target: NamedChain) -> Result<()> {
        let session = self.session.ok_or(OftError::NotConnected)?;
        let descriptor = target.network_descriptor()?;

        let span = spans::ensure_source_network(session.chain_id, descriptor.chain_id);
        let _guard = span.enter();

        if session.chain_id == descriptor.chain_id {
            debug!(chain_id = session.chain_id, event = "already_on_source_network");
            return Ok(());
        }

        match self.wallet.switch_network(descriptor.chain_id).await {
            Ok(()) => {}
            Err(OftError::UnknownNetwork(chain_id)) => {
                info!(chain_id, event = "network_unknown_to_wallet");
                self.wallet.add_network(&descriptor).await?;
            }
            Err(e) => {
                spans::record_error(&e);
                return Err(e);
            }
        }

        if let Some(session) = &mut self.session {
            session.chain_id = descriptor.chain_id;
        }
        self.session_epoch += 1;

        info!(chain_id = descriptor.chain_id, event = "source_network_switched");
        Ok(())
    }

    /// Bind the contract at `address` and probe metadata and capabilities
    ///
    /// Individual metadata probes degrade to defaults instead of failing
    /// the load. The capability probe decides the ABI variant once; later
    /// operations check the recorded set and fail with
    /// [`OftError::CapabilityUnavailable`] before any network call.
    ///
    /// Loading a contract resets any request, quote, and pending handle.
    pub async fn load_contract(&mut self, address: &str) -> Result<LoadedContract> {
        let address: Address = address.parse().map_err(|_| OftError::InvalidAddress {
            input: address.to_string(),
        })?;

        let span = spans::load_contract(&address);
        let _guard = span.enter();

        let gateway = self.binder.bind(address);

        let name = match gateway.token_name().await {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, event = "name_probe_failed");
                String::new()
            }
        };
        let symbol = match gateway.token_symbol().await {
            Ok(symbol) => symbol,
            Err(e) => {
                warn!(error = %e, event = "symbol_probe_failed");
                String::new()
            }
        };
        let decimals = match gateway.token_decimals().await {
            Ok(decimals) => decimals,
            Err(e) => {
                warn!(error = %e, event = "decimals_probe_failed");
                DEFAULT_DECIMALS
            }
        };

        let variant = detect_variant(&gateway).await;
        let capabilities = if variant.is_some() {
            CapabilitySet::full()
        } else {
            CapabilitySet::none()
        };

        let contract = LoadedContract {
            address,
            metadata: TokenMetadata {
                name,
                symbol,
                decimals,
            },
            capabilities,
            variant,
        };

        info!(
            contract_address = %address,
            token_name = %contract.metadata.name,
            token_symbol = %contract.metadata.symbol,
            decimals = contract.metadata.decimals,
            variant = ?variant,
            event = "contract_loaded"
        );

        self.binding = Some(Binding { gateway, contract: contract.clone() });
        self.request = None;
        self.quote = None;
        self.pending = None;
        self.phase = BridgePhase::Idle;
        Ok(contract)
    }

    /// Validate a draft into the controller's current request
    ///
    /// Pure construction; failures leave all state untouched. Replacing
    /// the request implicitly invalidates any cached quote through the
    /// fingerprint check at send time.
    pub fn build_request(&mut self, draft: &RequestDraft) -> Result<BridgeRequest> {
        let decimals = self
            .binding
            .as_ref()
            .ok_or(OftError::ContractNotLoaded)?
            .contract
            .metadata
            .decimals;
        let fallback = self.session.map(|s| s.address);

        let request = BridgeRequest::build(draft, decimals, fallback)?;

        debug!(
            destination = %request.destination(),
            amount_ld = %request.amount_ld(),
            min_amount_ld = %request.min_amount_ld(),
            event = "request_built"
        );
        self.request = Some(request.clone());
        self.phase = BridgePhase::RequestBuilt;
        Ok(request)
    }

    /// Quote the fee for the current request
    ///
    /// Read-only and repeatable; identical inputs against unchanged
    /// on-chain configuration yield the same quote. The result is cached
    /// together with the request fingerprint and session epoch for reuse
    /// by [`send`](Self::send).
    ///
    /// # Errors
    ///
    /// [`OftError::CapabilityUnavailable`] when the probe found no
    /// fee-estimation entrypoint (raised before any network call);
    /// [`OftError::QuoteFailed`] on revert or transport error; a missing
    /// peer route on the contract is an expected cause.
    pub async fn quote(&mut self) -> Result<FeeQuote> {
        let request = self
            .request
            .clone()
            .ok_or_else(|| OftError::InvalidRequest {
                reason: "no request built; call build_request() first".to_string(),
            })?;

        let binding = self.binding.as_ref().ok_or(OftError::ContractNotLoaded)?;
        let variant = binding.contract.require(Capability::FeeQuote)?;

        let span = spans::quote_fee(variant, &request.destination(), &request.amount_ld());
        let _guard = span.enter();

        let fee = quote_via(&binding.gateway, variant, &request)
            .await
            .map_err(|e| {
                spans::record_error(&e);
                OftError::QuoteFailed {
                    reason: e.to_string(),
                }
            })?;

        info!(
            native_fee = %fee.native_fee,
            lz_token_fee = %fee.lz_token_fee,
            variant = %variant,
            event = "fee_quoted"
        );

        self.quote = Some(CachedQuote {
            fee,
            request,
            session_epoch: self.session_epoch,
        });
        self.phase = BridgePhase::Quoted;
        Ok(fee)
    }

    /// Preflight and submit the bridge transaction for the current request
    ///
    /// The attached fee is, in order: `override_fee` if given; the cached
    /// quote when its request fingerprint and session epoch still match; a
    /// fresh quote fetched before the send. A fee is never defaulted to
    /// zero: when no quote can be obtained the send fails with
    /// [`OftError::QuoteFailed`] instead of submitting a doomed call.
    ///
    /// A preflight (dry run plus gas estimation) gates the submission: a
    /// revert there aborts with [`OftError::PreflightReverted`] and no
    /// transaction is submitted.
    ///
    /// # Errors
    ///
    /// Besides the above: [`OftError::NotConnected`] without a session,
    /// [`OftError::CapabilityUnavailable`] when the send entrypoint was
    /// not detected, [`OftError::SendInFlight`] while a previous send of
    /// the same request is pending, [`OftError::SubmissionFailed`] when
    /// the submission itself fails.
    pub async fn send(&mut self, override_fee: Option<U256>) -> Result<TxHandle> {
        let session = self.session.ok_or(OftError::NotConnected)?;
        let request = self
            .request
            .clone()
            .ok_or_else(|| OftError::InvalidRequest {
                reason: "no request built; call build_request() first".to_string(),
            })?;

        let variant = {
            let binding = self.binding.as_ref().ok_or(OftError::ContractNotLoaded)?;
            binding.contract.require(Capability::Send)?
        };

        if let Some(pending) = &self.pending {
            if pending.handle.is_pending() && pending.request == request {
                return Err(OftError::SendInFlight);
            }
        }

        let cached_fee = self.quote.as_ref().and_then(|cached| {
            (cached.request == request && cached.session_epoch == self.session_epoch)
                .then_some(cached.fee)
        });
        let fee = match (override_fee, cached_fee) {
            (Some(native_fee), _) => {
                debug!(native_fee = %native_fee, event = "fee_override_used");
                FeeQuote::native(native_fee)
            }
            (None, Some(fee)) => fee,
            (None, None) => {
                debug!(event = "no_fresh_quote_requoting_before_send");
                self.quote().await?
            }
        };

        let mut tx = {
            let binding = self.binding.as_ref().ok_or(OftError::ContractNotLoaded)?;
            match variant {
                OftVariant::V1 => binding.gateway.send_from_transaction(
                    session.address,
                    request.destination().v1_eid(),
                    request.recipient_v1(),
                    request.amount_ld(),
                    session.address,
                    Address::ZERO,
                    request.extra_options().clone(),
                    fee.native_fee,
                ),
                OftVariant::V2 => binding.gateway.send_v2_transaction(
                    session.address,
                    request.to_send_param(),
                    fee,
                    session.address,
                ),
            }
        };

        let preflight_result = {
            let binding = self.binding.as_ref().ok_or(OftError::ContractNotLoaded)?;
            binding.gateway.preflight(&tx).await
        };
        let gas = match preflight_result {
            Ok(gas) => gas,
            Err(e) => {
                warn!(error = %e, event = "preflight_reverted");
                self.phase = BridgePhase::Quoted;
                return Err(OftError::PreflightReverted {
                    reason: e.to_string(),
                });
            }
        };
        tx.set_gas_limit(gas);
        self.phase = BridgePhase::Preflighted;

        let submit_result = {
            let binding = self.binding.as_ref().ok_or(OftError::ContractNotLoaded)?;
            binding.gateway.submit(tx).await
        };
        let tx_hash = match submit_result {
            Ok(tx_hash) => tx_hash,
            Err(e) => {
                self.phase = BridgePhase::Failed;
                return Err(OftError::SubmissionFailed {
                    reason: e.to_string(),
                });
            }
        };

        let handle = TxHandle::pending(tx_hash);
        self.pending = Some(PendingSend { request, handle });
        self.phase = BridgePhase::Submitted;
        Ok(handle)
    }

    /// Await confirmation of the last submitted transaction
    ///
    /// Transitions the handle to `Confirmed` or `Failed`. A failure is
    /// final: resubmission is a fresh user-initiated [`send`](Self::send),
    /// never an automatic retry.
    pub async fn await_confirmation(&mut self) -> Result<TxHandle> {
        let tx_hash = self
            .pending
            .as_ref()
            .ok_or_else(|| OftError::InvalidRequest {
                reason: "no submitted transaction to await".to_string(),
            })?
            .handle
            .tx_hash;

        let confirmation = {
            let binding = self.binding.as_ref().ok_or(OftError::ContractNotLoaded)?;
            binding.gateway.await_confirmation(tx_hash).await
        };

        let status = match confirmation {
            Ok(status) => status,
            Err(e) => {
                if let Some(pending) = &mut self.pending {
                    pending.handle.status = TxStatus::Failed;
                }
                self.phase = BridgePhase::Failed;
                return Err(e);
            }
        };

        let handle = TxHandle { tx_hash, status };
        if let Some(pending) = &mut self.pending {
            pending.handle = handle;
        }
        self.phase = match status {
            TxStatus::Confirmed => BridgePhase::Confirmed,
            _ => BridgePhase::Failed,
        };

        info!(
            tx_hash = %tx_hash,
            status = ?status,
            event = "confirmation_finished"
        );
        Ok(handle)
    }
}

/// Invoke the variant's quote entrypoint for a validated request
async fn quote_via<G: OftGateway>(
    gateway: &G,
    variant: OftVariant,
    request: &BridgeRequest,
) -> Result<FeeQuote> {
    match variant {
        OftVariant::V1 => {
            gateway
                .estimate_send_fee(
                    request.destination().v1_eid(),
                    request.recipient_v1(),
                    request.amount_ld(),
                    request.pay_in_lz_token(),
                    request.extra_options().clone(),
                )
                .await
        }
        OftVariant::V2 => {
            gateway
                .quote_send(request.to_send_param(), request.pay_in_lz_token())
                .await
        }
    }
}

/// Variant probe: try the v2 quote shape, then the legacy one
///
/// Probes with a one-unit quote against the first preset destination; any
/// failure just means the entrypoint is absent or unusable, never a load
/// error.
async fn detect_variant<G: OftGateway>(gateway: &G) -> Option<OftVariant> {
    let probe_dst = EndpointId::Ethereum;

    let v2_param = SendParam {
        dstEid: probe_dst.v2_eid(),
        to: Address::ZERO.into_word(),
        amountLD: U256::from(PROBE_AMOUNT),
        minAmountLD: U256::from(PROBE_AMOUNT),
        extraOptions: Bytes::new(),
        composeMsg: Bytes::new(),
        oftCmd: Bytes::new(),
    };
    if gateway.quote_send(v2_param, false).await.is_ok() {
        return Some(OftVariant::V2);
    }

    let probe_to = Bytes::copy_from_slice(Address::ZERO.as_slice());
    if gateway
        .estimate_send_fee(
            probe_dst.v1_eid(),
            probe_to,
            U256::from(PROBE_AMOUNT),
            false,
            Bytes::new(),
        )
        .await
        .is_ok()
    {
        return Some(OftVariant::V1);
    }

    debug!(event = "no_quote_capability_detected");
    None
}
