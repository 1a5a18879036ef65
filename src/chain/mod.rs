//! Chain configuration for the bridge workflow
//!
//! This module contains the static preset tables: endpoint-id mappings and
//! wallet network-add descriptors for all supported source chains.

mod network;

pub use network::{LayerZeroChain, NativeCurrency, NetworkDescriptor};
