//! Span helpers for bridge workflow operations
//!
//! Orthogonal span instrumentation: static span names, structured
//! attributes, separated from the workflow logic. Used internally by
//! [`OftBridge`](crate::OftBridge) and the gateways, and exposed for
//! embeddings that integrate with an existing tracing/OpenTelemetry setup.

use alloy_primitives::{Address, TxHash, U256};
use tracing::Span;

use crate::bridge::OftVariant;
use crate::EndpointId;

/// Create span for a wallet connect attempt.
///
/// Parent: top-level operation span (auto-attached by tracing)
#[inline]
pub fn connect_wallet() -> Span {
    tracing::info_span!(
        "oft_rs.connect_wallet",
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for loading a contract and probing its capabilities.
#[inline]
pub fn load_contract(address: &Address) -> Span {
    tracing::info_span!(
        "oft_rs.load_contract",
        contract_address = %address,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a fee quote.
///
/// Parent: top-level bridge operation span
/// Children: contract view-call spans (from alloy instrumentation)
#[inline]
pub fn quote_fee(variant: OftVariant, destination: &EndpointId, amount_ld: &U256) -> Span {
    tracing::info_span!(
        "oft_rs.quote_fee",
        variant = %variant,
        destination = %destination,
        amount_ld = %amount_ld,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for building and submitting the bridge transaction.
#[inline]
pub fn send_bridge(from: &Address, dst_eid: u32, amount_ld: &U256, value: &U256) -> Span {
    tracing::info_span!(
        "oft_rs.send_bridge",
        from = %from,
        dst_eid = dst_eid,
        amount_ld = %amount_ld,
        value = %value,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for the preflight simulation.
///
/// Parent: oft_rs.send_bridge
/// Children: provider RPC calls
#[inline]
pub fn preflight(contract_address: &Address) -> Span {
    tracing::debug_span!(
        "oft_rs.preflight",
        contract_address = %contract_address,
    )
}

/// Create span for awaiting a submitted transaction's confirmation.
///
/// Parent: oft_rs.send_bridge or top-level operation
/// Children: provider RPC calls (polling)
#[inline]
pub fn await_confirmation(tx_hash: TxHash) -> Span {
    tracing::debug_span!(
        "oft_rs.await_confirmation",
        tx_hash = %tx_hash,
    )
}

/// Create span for a source-network switch.
#[inline]
pub fn ensure_source_network(current_chain_id: u64, target_chain_id: u64) -> Span {
    tracing::info_span!(
        "oft_rs.ensure_source_network",
        current_chain_id = current_chain_id,
        target_chain_id = target_chain_id,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record error attributes on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking.
pub fn record_error<E: std::error::Error>(error: &E) {
    let current_span = tracing::Span::current();
    current_span.record(
        "error.type",
        error.to_string().split(':').next().unwrap_or("Unknown"),
    );
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");
}
