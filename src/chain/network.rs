//! Wallet network-add descriptors for supported source chains
//!
//! When the wallet does not know the requested source network, the
//! controller asks it to add one from these static presets. The serialized
//! shape follows the `wallet_addEthereumChain` parameter object (EIP-3085):
//! hex-encoded chain id, display name, RPC endpoint, native currency.

use alloy_chains::NamedChain;
use serde::Serialize;
use url::Url;

use crate::error::{OftError, Result};
use crate::EndpointId;

/// Native currency metadata for a wallet network-add request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Static descriptor for adding a network to a wallet
///
/// # Example
///
/// ```rust
/// use oft_rs::{LayerZeroChain, NetworkDescriptor};
/// use alloy_chains::NamedChain;
///
/// let descriptor = NamedChain::Base.network_descriptor().unwrap();
/// assert_eq!(descriptor.chain_id, 8453);
/// assert_eq!(descriptor.native_currency.symbol, "ETH");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDescriptor {
    pub chain_id: u64,
    pub chain_name: &'static str,
    pub rpc_url: Url,
    pub native_currency: NativeCurrency,
}

impl NetworkDescriptor {
    /// Serializes the descriptor into the `wallet_addEthereumChain`
    /// parameter object, with the chain id as a 0x-prefixed hex string.
    pub fn as_add_chain_params(&self) -> serde_json::Value {
        serde_json::json!({
            "chainId": format!("0x{:x}", self.chain_id),
            "chainName": self.chain_name,
            "rpcUrls": [self.rpc_url.as_str()],
            "nativeCurrency": self.native_currency,
        })
    }
}

const ETH: NativeCurrency = NativeCurrency {
    name: "Ether",
    symbol: "ETH",
    decimals: 18,
};

fn descriptor(
    chain_id: u64,
    chain_name: &'static str,
    rpc_url: &'static str,
    native_currency: NativeCurrency,
) -> NetworkDescriptor {
    NetworkDescriptor {
        chain_id,
        chain_name,
        // Preset URLs are compile-time constants; a parse failure is a bug
        // in the table, not an input error.
        rpc_url: Url::parse(rpc_url).expect("preset RPC URL is valid"),
        native_currency,
    }
}

/// LayerZero configuration for chains, implemented on [`NamedChain`]
///
/// Maps a chain to its endpoint id in both protocol numberings and to the
/// static wallet network-add descriptor. Chains outside the preset table
/// fail with [`OftError::UnsupportedChain`].
///
/// # Example
///
/// ```rust
/// use oft_rs::LayerZeroChain;
/// use alloy_chains::NamedChain;
///
/// assert!(NamedChain::Arbitrum.is_lz_supported());
/// assert_eq!(NamedChain::Arbitrum.lz_endpoint_id().unwrap().v1_eid(), 110);
/// ```
pub trait LayerZeroChain {
    /// Returns true if this chain is in the preset table
    fn is_lz_supported(&self) -> bool;

    /// Returns the LayerZero endpoint id for this chain
    fn lz_endpoint_id(&self) -> Result<EndpointId>;

    /// Returns the wallet network-add descriptor for this chain
    fn network_descriptor(&self) -> Result<NetworkDescriptor>;
}

impl LayerZeroChain for NamedChain {
    fn is_lz_supported(&self) -> bool {
        use NamedChain::*;

        matches!(
            self,
            Mainnet | BinanceSmartChain | Avalanche | Polygon | Arbitrum | Optimism | Base | Linea
        )
    }

    fn lz_endpoint_id(&self) -> Result<EndpointId> {
        use NamedChain::*;

        match self {
            Mainnet => Ok(EndpointId::Ethereum),
            BinanceSmartChain => Ok(EndpointId::Bsc),
            Avalanche => Ok(EndpointId::Avalanche),
            Polygon => Ok(EndpointId::Polygon),
            Arbitrum => Ok(EndpointId::Arbitrum),
            Optimism => Ok(EndpointId::Optimism),
            Base => Ok(EndpointId::Base),
            Linea => Ok(EndpointId::Linea),
            _ => Err(OftError::UnsupportedChain(self.to_string())),
        }
    }

    fn network_descriptor(&self) -> Result<NetworkDescriptor> {
        use NamedChain::*;

        match self {
            Mainnet => Ok(descriptor(1, "Ethereum", "https://eth.llamarpc.com", ETH)),
            BinanceSmartChain => Ok(descriptor(
                56,
                "BNB Smart Chain",
                "https://bsc-dataseed.bnbchain.org",
                NativeCurrency {
                    name: "BNB",
                    symbol: "BNB",
                    decimals: 18,
                },
            )),
            Avalanche => Ok(descriptor(
                43114,
                "Avalanche C-Chain",
                "https://api.avax.network/ext/bc/C/rpc",
                NativeCurrency {
                    name: "Avalanche",
                    symbol: "AVAX",
                    decimals: 18,
                },
            )),
            Polygon => Ok(descriptor(
                137,
                "Polygon",
                "https://polygon-rpc.com",
                NativeCurrency {
                    name: "POL",
                    symbol: "POL",
                    decimals: 18,
                },
            )),
            Arbitrum => Ok(descriptor(
                42161,
                "Arbitrum One",
                "https://arb1.arbitrum.io/rpc",
                ETH,
            )),
            Optimism => Ok(descriptor(
                10,
                "OP Mainnet",
                "https://mainnet.optimism.io",
                ETH,
            )),
            Base => Ok(descriptor(8453, "Base", "https://mainnet.base.org", ETH)),
            Linea => Ok(descriptor(
                59144,
                "Linea",
                "https://rpc.linea.build",
                ETH,
            )),
            _ => Err(OftError::UnsupportedChain(self.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NamedChain::Mainnet, 1, EndpointId::Ethereum)]
    #[case(NamedChain::BinanceSmartChain, 56, EndpointId::Bsc)]
    #[case(NamedChain::Avalanche, 43114, EndpointId::Avalanche)]
    #[case(NamedChain::Polygon, 137, EndpointId::Polygon)]
    #[case(NamedChain::Arbitrum, 42161, EndpointId::Arbitrum)]
    #[case(NamedChain::Optimism, 10, EndpointId::Optimism)]
    #[case(NamedChain::Base, 8453, EndpointId::Base)]
    #[case(NamedChain::Linea, 59144, EndpointId::Linea)]
    fn test_preset_table(
        #[case] chain: NamedChain,
        #[case] chain_id: u64,
        #[case] endpoint: EndpointId,
    ) {
        assert!(chain.is_lz_supported());
        assert_eq!(chain.lz_endpoint_id().unwrap(), endpoint);

        let descriptor = chain.network_descriptor().unwrap();
        assert_eq!(descriptor.chain_id, chain_id);
        assert_eq!(descriptor.native_currency.decimals, 18);
    }

    #[test]
    fn test_unsupported_chain() {
        let result = NamedChain::Moonbeam.lz_endpoint_id();
        assert!(matches!(result, Err(OftError::UnsupportedChain(_))));
        assert!(!NamedChain::Moonbeam.is_lz_supported());
        assert!(NamedChain::Moonbeam.network_descriptor().is_err());
    }

    #[test]
    fn test_add_chain_params_shape() {
        let params = NamedChain::Base
            .network_descriptor()
            .unwrap()
            .as_add_chain_params();

        // Chain id is hex-encoded per the wallet_addEthereumChain shape
        assert_eq!(params["chainId"], "0x2105");
        assert_eq!(params["chainName"], "Base");
        assert_eq!(params["rpcUrls"][0], "https://mainnet.base.org/");
        assert_eq!(params["nativeCurrency"]["symbol"], "ETH");
        assert_eq!(params["nativeCurrency"]["decimals"], 18);
    }
}
