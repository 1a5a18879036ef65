//! Fee quote types for OFT bridging

use alloy_primitives::U256;

/// A fee quote for a single bridge request
///
/// Both components are denominated in the smallest unit of the respective
/// asset. `native_fee` is attached as transaction value on send;
/// `lz_token_fee` is only non-zero when the request opts into paying in the
/// protocol's fee token (ZRO on the legacy endpoint, the LZ token on v2).
///
/// A quote is only meaningful for the exact request parameters that produced
/// it; the controller discards it as soon as any of those change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeQuote {
    /// Fee payable in the source chain's native currency (wei)
    pub native_fee: U256,
    /// Fee payable in the protocol fee token, if opted in
    pub lz_token_fee: U256,
}

impl FeeQuote {
    /// Creates a quote with only a native-currency component
    pub const fn native(native_fee: U256) -> Self {
        Self {
            native_fee,
            lz_token_fee: U256::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_only_quote() {
        let quote = FeeQuote::native(U256::from(1500u64));
        assert_eq!(quote.native_fee, U256::from(1500u64));
        assert_eq!(quote.lz_token_fee, U256::ZERO);
    }
}
