//! Contract capability set recorded at load time
//!
//! The probe happens once when the contract is loaded and the result is
//! checked before each dependent operation, so an unsupported operation
//! fails before any network call is attempted instead of surfacing as an
//! opaque revert.

use std::fmt;

/// The observed OFT ABI generation of a loaded contract
///
/// The two variants differ in parameter shapes and the fee-quote call
/// signature; the variant is detected once at load time and selects the
/// encoding used for every later quote and send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OftVariant {
    /// Legacy interface: `estimateSendFee` / `sendFrom`, `uint16` chain ids,
    /// raw-bytes recipient
    V1,
    /// V2 interface: `quoteSend` / `send`, `uint32` endpoint ids,
    /// `bytes32` recipient
    V2,
}

impl fmt::Display for OftVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
        }
    }
}

/// An operation a loaded contract may or may not expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Fee estimation (`estimateSendFee` / `quoteSend`)
    FeeQuote,
    /// The payable bridge call (`sendFrom` / `send`)
    Send,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FeeQuote => write!(f, "a fee-estimation entrypoint"),
            Self::Send => write!(f, "a send entrypoint"),
        }
    }
}

/// Capabilities detected for a loaded contract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    fee_quote: bool,
    send: bool,
}

impl CapabilitySet {
    /// A set where both workflow capabilities are present
    pub const fn full() -> Self {
        Self {
            fee_quote: true,
            send: true,
        }
    }

    /// A set where neither capability could be detected
    pub const fn none() -> Self {
        Self {
            fee_quote: false,
            send: false,
        }
    }

    /// Returns whether the given capability was detected
    pub const fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::FeeQuote => self.fee_quote,
            Capability::Send => self.send,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_sets() {
        assert!(CapabilitySet::full().supports(Capability::FeeQuote));
        assert!(CapabilitySet::full().supports(Capability::Send));
        assert!(!CapabilitySet::none().supports(Capability::FeeQuote));
        assert!(!CapabilitySet::none().supports(Capability::Send));
        assert_eq!(CapabilitySet::default(), CapabilitySet::none());
    }

    #[test]
    fn test_display() {
        assert_eq!(OftVariant::V1.to_string(), "v1");
        assert_eq!(OftVariant::V2.to_string(), "v2");
    }
}
