//! Core bridge workflow implementation
//!
//! This module provides the workflow controller and the request/capability
//! types it operates on: session acquisition, contract binding with
//! metadata and capability probing, request validation, fee quotation,
//! preflight simulation, and submission with confirmation tracking.

mod capabilities;
mod controller;
mod request;

pub use capabilities::{Capability, CapabilitySet, OftVariant};
pub use controller::{BridgePhase, LoadedContract, OftBridge, TokenMetadata};
pub use request::{BridgeRequest, RequestDraft};
