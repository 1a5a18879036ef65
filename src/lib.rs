//! # oft-rs
//!
//! A Rust SDK for the LayerZero OFT bridging workflow.
//!
//! This library implements the quote-then-send workflow for OFT-style
//! cross-chain token contracts: connect a wallet session, bind a contract
//! and probe its metadata and capabilities, build a validated bridge
//! request, quote the messaging fee, preflight the transaction, and submit
//! it with confirmation tracking.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oft_rs::{AlloyOftBinder, EndpointId, OftBridge, OftError, RequestDraft};
//! # use oft_rs::testing::FakeWalletGateway;
//! use alloy_provider::ProviderBuilder;
//!
//! # async fn example(wallet: FakeWalletGateway) -> Result<(), Box<dyn std::error::Error>> {
//! // The wallet gateway comes from your embedding; the contract gateway
//! // binds over any alloy provider.
//! let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
//! let mut bridge = OftBridge::new(wallet, AlloyOftBinder::new(provider));
//!
//! bridge.connect().await?;
//! bridge.load_contract("0x9f3B8679c73C2Fef8b59B4f3444d4e156fb70AA5").await?;
//!
//! // Validation happens before any network call; the recipient defaults
//! // to the connected address.
//! bridge.build_request(&RequestDraft::builder()
//!     .destination(EndpointId::Arbitrum)
//!     .amount("1.0")
//!     .slippage_bps(50)
//!     .build())?;
//!
//! let fee = bridge.quote().await?;
//! println!("native fee: {} wei", fee.native_fee);
//!
//! // send() preflights first and never submits a transaction whose
//! // simulation reverts.
//! match bridge.send(None).await {
//!     Ok(handle) => println!("submitted {}", handle.tx_hash),
//!     Err(OftError::PreflightReverted { reason }) => println!("not sent: {reason}"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Two ABI generations** behind one workflow: the legacy
//!   `estimateSendFee`/`sendFrom` interface and the v2
//!   `quoteSend`/`send` interface, detected once per contract load
//! - **Capability probing** at load time, checked before every dependent
//!   operation
//! - **Preflight-before-send**: a dry run plus gas estimation gates every
//!   real submission
//! - **Quote staleness tracking**: a fee quote is pinned to the exact
//!   request and session state that produced it
//! - **Gateway traits** for wallet and contract access, with fakes in
//!   [`testing`] for integration-style tests without a chain
//!
//! ## Public API
//!
//! - [`OftBridge`] - The bridge workflow controller
//! - [`RequestDraft`] and [`BridgeRequest`] - Raw and validated request forms
//! - [`FeeQuote`], [`TxHandle`], [`TxStatus`] - Quote and submission results
//! - [`EndpointId`], [`LayerZeroChain`], [`NetworkDescriptor`] - Static presets
//! - [`WalletGateway`], [`OftGateway`], [`OftBinder`] - Gateway abstractions
//! - [`AlloyOftGateway`], [`AlloyOftBinder`] - The alloy-backed gateway
//! - [`OftError`] and [`Result`] - Error types for error handling

mod bridge;
mod chain;
mod contracts;
mod error;
mod gateway;
mod protocol;

pub use bridge::{
    BridgePhase, BridgeRequest, Capability, CapabilitySet, LoadedContract, OftBridge, OftVariant,
    RequestDraft, TokenMetadata,
};
pub use chain::{LayerZeroChain, NativeCurrency, NetworkDescriptor};
pub use contracts::{MessagingFee, OftV1Contract, OftV2Contract, SendParam};
pub use error::{OftError, Result};
pub use gateway::{
    AlloyOftBinder, AlloyOftGateway, OftBinder, OftGateway, Session, SessionEvent, TxHandle,
    TxStatus, WalletGateway,
};
pub use protocol::{adapter_params_v1, parse_extra_options, EndpointId, FeeQuote};

// Public module for advanced users who need custom instrumentation
pub mod spans;

// Fake gateways for testing embeddings without a wallet or a chain
pub mod testing;
