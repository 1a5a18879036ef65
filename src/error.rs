use thiserror::Error;

use crate::bridge::Capability;

#[derive(Error, Debug)]
pub enum OftError {
    #[error("No wallet provider is available")]
    WalletUnavailable,

    #[error("User rejected the wallet request")]
    UserRejected,

    #[error("No wallet session; call connect() first")]
    NotConnected,

    #[error("Invalid address: {input}")]
    InvalidAddress { input: String },

    #[error("Invalid bridge request: {reason}")]
    InvalidRequest { reason: String },

    #[error("No contract is loaded; call load_contract() first")]
    ContractNotLoaded,

    #[error("Contract does not expose {0}")]
    CapabilityUnavailable(Capability),

    #[error("Fee quote failed: {reason}")]
    QuoteFailed { reason: String },

    #[error("Preflight simulation reverted: {reason}")]
    PreflightReverted { reason: String },

    #[error("User rejected the network switch")]
    NetworkSwitchRejected,

    #[error("Wallet does not know chain id {0}")]
    UnknownNetwork(u64),

    #[error("Transaction submission failed: {reason}")]
    SubmissionFailed { reason: String },

    #[error("A send for this request is already pending")]
    SendInFlight,

    #[error("Chain not supported: {0}")]
    UnsupportedChain(String),

    #[error("Contract call failed: {0}")]
    ContractCall(String),

    #[error("Contract call failed: {0}")]
    Contract(#[from] alloy_contract::Error),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("ABI encoding/decoding error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, OftError>;
