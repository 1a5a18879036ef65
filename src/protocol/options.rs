//! Adapter parameters / extra options encoding
//!
//! Both endpoint generations accept an opaque byte string instructing the
//! relayer on gas and delivery: "adapter params" on the legacy endpoint,
//! "extra options" on v2. The workflow passes user-supplied hex through
//! unchanged; the only encoding this module knows how to build is the legacy
//! "type 1" shape, `abi.encodePacked(uint16(1), uint256(extraGas))`, which
//! raises the gas limit used for delivery on the destination chain.

use alloy_primitives::{hex, Bytes, U256};

use crate::error::{OftError, Result};

/// Adapter-params encoding version for the gas-limit-only shape
const ADAPTER_PARAMS_TYPE_1: u16 = 1;

/// Parses a user-supplied options hex string, defaulting to empty
///
/// Accepts `None`, the empty string, or `"0x"` as "no options". Anything
/// else must be well-formed `0x`-prefixed hex.
///
/// # Errors
///
/// Returns [`OftError::InvalidRequest`] if the string is not valid hex.
pub fn parse_extra_options(raw: Option<&str>) -> Result<Bytes> {
    let raw = match raw {
        None => return Ok(Bytes::new()),
        Some(s) if s.is_empty() || s == "0x" => return Ok(Bytes::new()),
        Some(s) => s,
    };

    if !raw.starts_with("0x") {
        return Err(OftError::InvalidRequest {
            reason: format!("extra options must be 0x-prefixed hex, got {raw:?}"),
        });
    }

    hex::decode(raw)
        .map(Bytes::from)
        .map_err(|e| OftError::InvalidRequest {
            reason: format!("extra options are not valid hex: {e}"),
        })
}

/// Builds legacy "type 1" adapter params requesting `extra_gas` on delivery
///
/// # Example
///
/// ```rust
/// use oft_rs::adapter_params_v1;
/// use alloy_primitives::U256;
///
/// let params = adapter_params_v1(U256::from(200_000u64));
/// assert_eq!(params.len(), 2 + 32);
/// assert_eq!(&params[..2], &[0x00, 0x01]);
/// ```
pub fn adapter_params_v1(extra_gas: U256) -> Bytes {
    let mut out = Vec::with_capacity(2 + 32);
    out.extend_from_slice(&ADAPTER_PARAMS_TYPE_1.to_be_bytes());
    out.extend_from_slice(&extra_gas.to_be_bytes::<32>());
    Bytes::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_empty() {
        assert_eq!(parse_extra_options(None).unwrap(), Bytes::new());
        assert_eq!(parse_extra_options(Some("")).unwrap(), Bytes::new());
        assert_eq!(parse_extra_options(Some("0x")).unwrap(), Bytes::new());
    }

    #[test]
    fn test_parse_valid_hex() {
        let parsed = parse_extra_options(Some("0x00010203")).unwrap();
        assert_eq!(parsed.as_ref(), &[0x00, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_parse_rejects_unprefixed() {
        let err = parse_extra_options(Some("00010203")).unwrap_err();
        assert!(matches!(err, OftError::InvalidRequest { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        let err = parse_extra_options(Some("0xzz")).unwrap_err();
        assert!(matches!(err, OftError::InvalidRequest { .. }));
    }

    #[test]
    fn test_adapter_params_v1_encoding() {
        let params = adapter_params_v1(U256::from(200_000u64));
        insta::assert_snapshot!(
            hex::encode(&params),
            @"00010000000000000000000000000000000000000000000000000000000000030d40"
        );
    }
}
