//! LayerZero endpoint identifiers for destination chains
//!
//! LayerZero addresses destination chains by endpoint id (EID), a
//! protocol-level number distinct from the chain's native chain id. The
//! legacy endpoint and the v2 endpoint number the same chains differently:
//! v2 ids are the legacy id plus 30000.

use std::fmt;

use crate::bridge::OftVariant;

/// LayerZero endpoint identifier for a destination chain
///
/// Each supported destination has a legacy (v1) endpoint id and a v2
/// endpoint id. This enum provides type-safe representation of both
/// numberings.
///
/// # Example
///
/// ```rust
/// use oft_rs::EndpointId;
///
/// let dst = EndpointId::Arbitrum;
/// assert_eq!(dst.v1_eid(), 110);
/// assert_eq!(dst.v2_eid(), 30110);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum EndpointId {
    /// Ethereum mainnet (legacy EID: 101)
    Ethereum = 101,
    /// BNB Smart Chain (legacy EID: 102)
    Bsc = 102,
    /// Avalanche C-Chain (legacy EID: 106)
    Avalanche = 106,
    /// Polygon PoS (legacy EID: 109)
    Polygon = 109,
    /// Arbitrum One (legacy EID: 110)
    Arbitrum = 110,
    /// Optimism (legacy EID: 111)
    Optimism = 111,
    /// Base (legacy EID: 112)
    Base = 112,
    /// Linea (legacy EID: 115)
    Linea = 115,
}

/// Offset between the v2 and legacy numbering of the same chain.
const V2_EID_OFFSET: u32 = 30000;

impl EndpointId {
    /// Returns the legacy endpoint id
    ///
    /// # Example
    ///
    /// ```rust
    /// use oft_rs::EndpointId;
    ///
    /// assert_eq!(EndpointId::Ethereum.v1_eid(), 101);
    /// assert_eq!(EndpointId::Base.v1_eid(), 112);
    /// ```
    #[inline]
    pub const fn v1_eid(self) -> u16 {
        self as u16
    }

    /// Returns the v2 endpoint id
    ///
    /// # Example
    ///
    /// ```rust
    /// use oft_rs::EndpointId;
    ///
    /// assert_eq!(EndpointId::Ethereum.v2_eid(), 30101);
    /// assert_eq!(EndpointId::Linea.v2_eid(), 30115);
    /// ```
    #[inline]
    pub const fn v2_eid(self) -> u32 {
        self as u16 as u32 + V2_EID_OFFSET
    }

    /// Returns the endpoint id in the numbering of the given ABI variant
    #[inline]
    pub const fn eid_for(self, variant: OftVariant) -> u32 {
        match variant {
            OftVariant::V1 => self.v1_eid() as u32,
            OftVariant::V2 => self.v2_eid(),
        }
    }

    /// Attempts to create an EndpointId from a legacy endpoint id
    ///
    /// # Example
    ///
    /// ```rust
    /// use oft_rs::EndpointId;
    ///
    /// assert_eq!(EndpointId::from_v1_eid(101), Some(EndpointId::Ethereum));
    /// assert_eq!(EndpointId::from_v1_eid(999), None);
    /// ```
    #[inline]
    pub const fn from_v1_eid(value: u16) -> Option<Self> {
        match value {
            101 => Some(Self::Ethereum),
            102 => Some(Self::Bsc),
            106 => Some(Self::Avalanche),
            109 => Some(Self::Polygon),
            110 => Some(Self::Arbitrum),
            111 => Some(Self::Optimism),
            112 => Some(Self::Base),
            115 => Some(Self::Linea),
            _ => None,
        }
    }

    /// Attempts to create an EndpointId from a v2 endpoint id
    ///
    /// # Example
    ///
    /// ```rust
    /// use oft_rs::EndpointId;
    ///
    /// assert_eq!(EndpointId::from_v2_eid(30110), Some(EndpointId::Arbitrum));
    /// assert_eq!(EndpointId::from_v2_eid(110), None);
    /// ```
    #[inline]
    pub const fn from_v2_eid(value: u32) -> Option<Self> {
        if value < V2_EID_OFFSET || value - V2_EID_OFFSET > u16::MAX as u32 {
            return None;
        }
        Self::from_v1_eid((value - V2_EID_OFFSET) as u16)
    }

    /// Returns the chain name as a string
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Bsc => "BSC",
            Self::Avalanche => "Avalanche",
            Self::Polygon => "Polygon",
            Self::Arbitrum => "Arbitrum One",
            Self::Optimism => "Optimism",
            Self::Base => "Base",
            Self::Linea => "Linea",
        }
    }

    /// All supported destinations, in legacy-EID order
    pub const ALL: [Self; 8] = [
        Self::Ethereum,
        Self::Bsc,
        Self::Avalanche,
        Self::Polygon,
        Self::Arbitrum,
        Self::Optimism,
        Self::Base,
        Self::Linea,
    ];
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (EID {})", self.name(), self.v1_eid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EndpointId::Ethereum, 101)]
    #[case(EndpointId::Bsc, 102)]
    #[case(EndpointId::Avalanche, 106)]
    #[case(EndpointId::Polygon, 109)]
    #[case(EndpointId::Arbitrum, 110)]
    #[case(EndpointId::Optimism, 111)]
    #[case(EndpointId::Base, 112)]
    #[case(EndpointId::Linea, 115)]
    fn test_v1_eid_values(#[case] endpoint: EndpointId, #[case] eid: u16) {
        assert_eq!(endpoint.v1_eid(), eid);
        assert_eq!(endpoint.v2_eid(), eid as u32 + 30000);
    }

    #[test]
    fn test_from_v1_eid_invalid() {
        assert_eq!(EndpointId::from_v1_eid(0), None);
        assert_eq!(EndpointId::from_v1_eid(100), None);
        assert_eq!(EndpointId::from_v1_eid(113), None); // Gap
        assert_eq!(EndpointId::from_v1_eid(30101), None); // v2 id in v1 space
    }

    #[test]
    fn test_from_v2_eid() {
        assert_eq!(EndpointId::from_v2_eid(30101), Some(EndpointId::Ethereum));
        assert_eq!(EndpointId::from_v2_eid(30115), Some(EndpointId::Linea));
        assert_eq!(EndpointId::from_v2_eid(101), None); // v1 id in v2 space
        assert_eq!(EndpointId::from_v2_eid(30999), None);
    }

    #[test]
    fn test_eid_for_variant() {
        assert_eq!(EndpointId::Base.eid_for(OftVariant::V1), 112);
        assert_eq!(EndpointId::Base.eid_for(OftVariant::V2), 30112);
    }

    #[test]
    fn test_conversion_roundtrip() {
        for endpoint in EndpointId::ALL {
            assert_eq!(EndpointId::from_v1_eid(endpoint.v1_eid()), Some(endpoint));
            assert_eq!(EndpointId::from_v2_eid(endpoint.v2_eid()), Some(endpoint));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EndpointId::Ethereum), "Ethereum (EID 101)");
        assert_eq!(format!("{}", EndpointId::Arbitrum), "Arbitrum One (EID 110)");
    }
}
