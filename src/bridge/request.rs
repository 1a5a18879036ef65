//! Bridge request construction and validation
//!
//! A [`RequestDraft`] carries the raw, string-typed fields as the user
//! supplied them; [`BridgeRequest::build`] validates and scales them into
//! the typed form used for quoting and sending. Everything here is pure:
//! validation failures happen before any network call.

use alloy_primitives::{
    utils::{parse_units, ParseUnits},
    Address, Bytes, FixedBytes, U256,
};
use bon::Builder;

use crate::contracts::SendParam;
use crate::error::{OftError, Result};
use crate::protocol::{parse_extra_options, EndpointId};

/// Basis-point denominator for slippage math
const BPS_DENOMINATOR: u64 = 10_000;

/// Raw request fields as supplied by the user
///
/// # Example
///
/// ```rust
/// use oft_rs::{EndpointId, RequestDraft};
///
/// let draft = RequestDraft::builder()
///     .destination(EndpointId::Arbitrum)
///     .recipient("0x742d35Cc6634C0532925a3b844Bc9e7595f8fA0d")
///     .amount("1.5")
///     .slippage_bps(50)
///     .build();
/// ```
#[derive(Builder, Debug, Clone)]
pub struct RequestDraft {
    /// Destination chain
    destination: EndpointId,
    /// Recipient address string; defaults to the connected address
    #[builder(into)]
    recipient: Option<String>,
    /// Amount in human units, e.g. `"1.5"`
    #[builder(into)]
    amount: String,
    /// Slippage tolerance in basis points
    slippage_bps: Option<u16>,
    /// Adapter params / extra options as 0x-prefixed hex
    #[builder(into)]
    extra_options: Option<String>,
    /// Pay the protocol fee in its fee token instead of native currency
    #[builder(default)]
    pay_in_lz_token: bool,
}

/// A validated bridge request
///
/// Constructed fresh per quote/send action via [`BridgeRequest::build`].
/// Field-for-field equality is the staleness fingerprint for fee quotes: a
/// quote computed for one request must never be attached to a send of
/// another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRequest {
    destination: EndpointId,
    recipient: Address,
    amount_ld: U256,
    min_amount_ld: U256,
    extra_options: Bytes,
    pay_in_lz_token: bool,
}

impl BridgeRequest {
    /// Validates a draft into a request
    ///
    /// `decimals` comes from the loaded token's metadata;
    /// `fallback_recipient` is the connected address, used when the draft
    /// omits a recipient.
    ///
    /// # Errors
    ///
    /// [`OftError::InvalidAddress`] for a malformed recipient,
    /// [`OftError::InvalidRequest`] for everything else (non-positive or
    /// unparseable amount, slippage above 100%, malformed options hex).
    pub fn build(
        draft: &RequestDraft,
        decimals: u8,
        fallback_recipient: Option<Address>,
    ) -> Result<Self> {
        let recipient = match draft.recipient.as_deref() {
            Some(raw) => raw.parse::<Address>().map_err(|_| OftError::InvalidAddress {
                input: raw.to_string(),
            })?,
            None => fallback_recipient.ok_or_else(|| OftError::InvalidRequest {
                reason: "no recipient given and no session to default from".to_string(),
            })?,
        };

        let amount_ld = parse_amount(&draft.amount, decimals)?;
        let min_amount_ld = match draft.slippage_bps {
            Some(bps) => apply_slippage(amount_ld, bps)?,
            None => amount_ld,
        };
        let extra_options = parse_extra_options(draft.extra_options.as_deref())?;

        Ok(Self {
            destination: draft.destination,
            recipient,
            amount_ld,
            min_amount_ld,
            extra_options,
            pay_in_lz_token: draft.pay_in_lz_token,
        })
    }

    pub fn destination(&self) -> EndpointId {
        self.destination
    }

    pub fn recipient(&self) -> Address {
        self.recipient
    }

    pub fn amount_ld(&self) -> U256 {
        self.amount_ld
    }

    pub fn min_amount_ld(&self) -> U256 {
        self.min_amount_ld
    }

    pub fn extra_options(&self) -> &Bytes {
        &self.extra_options
    }

    pub fn pay_in_lz_token(&self) -> bool {
        self.pay_in_lz_token
    }

    /// Recipient in the legacy wire form: the raw 20-byte address
    pub fn recipient_v1(&self) -> Bytes {
        Bytes::copy_from_slice(self.recipient.as_slice())
    }

    /// Recipient in the v2 wire form: zero-padded to a 32-byte word
    pub fn recipient_v2(&self) -> FixedBytes<32> {
        self.recipient.into_word()
    }

    /// The request in the v2 call shape
    pub fn to_send_param(&self) -> SendParam {
        SendParam {
            dstEid: self.destination.v2_eid(),
            to: self.recipient_v2(),
            amountLD: self.amount_ld,
            minAmountLD: self.min_amount_ld,
            extraOptions: self.extra_options.clone(),
            composeMsg: Bytes::new(),
            oftCmd: Bytes::new(),
        }
    }
}

/// Parses a human-units decimal amount and scales it by `decimals`
///
/// The amount must be strictly positive and must not carry more fractional
/// digits than the token has decimals.
fn parse_amount(raw: &str, decimals: u8) -> Result<U256> {
    let parsed = parse_units(raw, decimals).map_err(|e| OftError::InvalidRequest {
        reason: format!("amount {raw:?} is not a valid decimal: {e}"),
    })?;

    let amount = match parsed {
        ParseUnits::U256(value) => value,
        ParseUnits::I256(_) => {
            return Err(OftError::InvalidRequest {
                reason: format!("amount {raw:?} must be positive"),
            })
        }
    };

    if amount.is_zero() {
        return Err(OftError::InvalidRequest {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    Ok(amount)
}

/// Computes `amount - floor(amount * bps / 10000)`
///
/// Bounded at 10000 bps, so the result is never negative.
fn apply_slippage(amount: U256, bps: u16) -> Result<U256> {
    if u64::from(bps) > BPS_DENOMINATOR {
        return Err(OftError::InvalidRequest {
            reason: format!("slippage {bps} bps exceeds 100%"),
        });
    }
    let discount = amount * U256::from(bps) / U256::from(BPS_DENOMINATOR);
    Ok(amount - discount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex};
    use rstest::rstest;

    const RECIPIENT: Address = address!("742d35Cc6634C0532925a3b844Bc9e7595f8fA0d");

    fn draft(amount: &str) -> RequestDraft {
        RequestDraft::builder()
            .destination(EndpointId::Arbitrum)
            .recipient(RECIPIENT.to_string())
            .amount(amount)
            .build()
    }

    #[rstest]
    #[case("1.0", 18, "1000000000000000000")]
    #[case("1", 18, "1000000000000000000")]
    #[case("0.5", 6, "500000")]
    #[case("2.000001", 6, "2000001")]
    #[case("123456789", 0, "123456789")]
    fn test_amount_scaling(#[case] raw: &str, #[case] decimals: u8, #[case] expected: &str) {
        let amount = parse_amount(raw, decimals).unwrap();
        assert_eq!(amount, expected.parse::<U256>().unwrap());
    }

    #[rstest]
    #[case("0")]
    #[case("0.0")]
    #[case("-1")]
    #[case("")]
    #[case("abc")]
    #[case("1.2.3")]
    fn test_amount_rejected(#[case] raw: &str) {
        assert!(parse_amount(raw, 18).is_err());
    }

    #[test]
    fn test_amount_excess_precision_rejected() {
        // 7 fractional digits against 6 decimals
        assert!(parse_amount("1.0000001", 6).is_err());
    }

    #[test]
    fn test_slippage_floor() {
        let amount = U256::from(10).pow(U256::from(18));
        let min = apply_slippage(amount, 50).unwrap();
        assert_eq!(min, "995000000000000000".parse::<U256>().unwrap());
    }

    #[test]
    fn test_slippage_bounds() {
        let amount = U256::from(1000u64);
        assert_eq!(apply_slippage(amount, 0).unwrap(), amount);
        // 100% slippage floors at zero, never below
        assert_eq!(apply_slippage(amount, 10_000).unwrap(), U256::ZERO);
        assert!(apply_slippage(amount, 10_001).is_err());
    }

    #[test]
    fn test_slippage_rounds_in_senders_favor() {
        // floor(1001 * 1 / 10000) = 0, so the minimum stays the full amount
        let min = apply_slippage(U256::from(1001u64), 1).unwrap();
        assert_eq!(min, U256::from(1001u64));
    }

    #[test]
    fn test_build_full_request() {
        let draft = RequestDraft::builder()
            .destination(EndpointId::Base)
            .recipient(RECIPIENT.to_string())
            .amount("1.0")
            .slippage_bps(50)
            .extra_options("0x0001")
            .build();

        let request = BridgeRequest::build(&draft, 18, None).unwrap();
        assert_eq!(request.destination(), EndpointId::Base);
        assert_eq!(request.recipient(), RECIPIENT);
        assert_eq!(
            request.amount_ld(),
            "1000000000000000000".parse::<U256>().unwrap()
        );
        assert_eq!(
            request.min_amount_ld(),
            "995000000000000000".parse::<U256>().unwrap()
        );
        assert_eq!(request.extra_options().as_ref(), &[0x00, 0x01]);
        assert!(!request.pay_in_lz_token());
    }

    #[test]
    fn test_build_rejects_bad_recipient() {
        let draft = RequestDraft::builder()
            .destination(EndpointId::Arbitrum)
            .recipient("not-an-address")
            .amount("1.0")
            .build();

        let err = BridgeRequest::build(&draft, 18, None).unwrap_err();
        assert!(matches!(err, OftError::InvalidAddress { .. }));
    }

    #[test]
    fn test_build_defaults_recipient_to_session() {
        let draft = RequestDraft::builder()
            .destination(EndpointId::Arbitrum)
            .amount("1.0")
            .build();

        let request = BridgeRequest::build(&draft, 18, Some(RECIPIENT)).unwrap();
        assert_eq!(request.recipient(), RECIPIENT);

        let err = BridgeRequest::build(&draft, 18, None).unwrap_err();
        assert!(matches!(err, OftError::InvalidRequest { .. }));
    }

    #[test]
    fn test_recipient_wire_encodings() {
        let request = BridgeRequest::build(&draft("1.0"), 18, None).unwrap();
        assert_eq!(request.recipient_v1().len(), 20);
        insta::assert_snapshot!(
            hex::encode(request.recipient_v2()),
            @"000000000000000000000000742d35cc6634c0532925a3b844bc9e7595f8fa0d"
        );
    }

    #[test]
    fn test_send_param_shape() {
        let request = BridgeRequest::build(&draft("2.5"), 18, None).unwrap();
        let param = request.to_send_param();
        assert_eq!(param.dstEid, 30110);
        assert_eq!(param.amountLD, "2500000000000000000".parse::<U256>().unwrap());
        assert_eq!(param.minAmountLD, param.amountLD);
        assert!(param.extraOptions.is_empty());
        assert!(param.composeMsg.is_empty());
        assert!(param.oftCmd.is_empty());
    }

    #[test]
    fn test_request_equality_is_fingerprint() {
        let a = BridgeRequest::build(&draft("1.0"), 18, None).unwrap();
        let b = BridgeRequest::build(&draft("1.0"), 18, None).unwrap();
        let c = BridgeRequest::build(&draft("2.0"), 18, None).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
