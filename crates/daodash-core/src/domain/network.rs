//! Supported networks and the chain-id lookup used by the favorites cache.

use crate::{ChainId, DaodashError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A network the dashboard supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Ethereum,
    Goerli,
    Sepolia,
    Polygon,
    Mumbai,
    Base,
    BaseGoerli,
    Arbitrum,
    ArbitrumGoerli,
}

impl Network {
    /// Every supported network.
    pub const ALL: [Self; 9] = [
        Self::Ethereum,
        Self::Goerli,
        Self::Sepolia,
        Self::Polygon,
        Self::Mumbai,
        Self::Base,
        Self::BaseGoerli,
        Self::Arbitrum,
        Self::ArbitrumGoerli,
    ];

    /// Returns the EIP-155 chain id.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        ChainId(match self {
            Self::Ethereum => 1,
            Self::Goerli => 5,
            Self::Sepolia => 11_155_111,
            Self::Polygon => 137,
            Self::Mumbai => 80_001,
            Self::Base => 8453,
            Self::BaseGoerli => 84_531,
            Self::Arbitrum => 42_161,
            Self::ArbitrumGoerli => 421_613,
        })
    }

    /// Looks up the network for a chain id.
    #[must_use]
    pub fn from_chain_id(chain: ChainId) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.chain_id() == chain)
    }

    /// Returns the canonical network name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Goerli => "goerli",
            Self::Sepolia => "sepolia",
            Self::Polygon => "polygon",
            Self::Mumbai => "mumbai",
            Self::Base => "base",
            Self::BaseGoerli => "base-goerli",
            Self::Arbitrum => "arbitrum",
            Self::ArbitrumGoerli => "arbitrum-goerli",
        }
    }

    /// Checks if this is a test network.
    #[must_use]
    pub const fn is_testnet(&self) -> bool {
        matches!(
            self,
            Self::Goerli | Self::Sepolia | Self::Mumbai | Self::BaseGoerli | Self::ArbitrumGoerli
        )
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = DaodashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|n| n.as_str() == name)
            .ok_or_else(|| DaodashError::validation(format!("Unknown network: {}", s)))
    }
}

/// The network of a chain id, or the `unsupported` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainNetwork {
    Supported(Network),
    Unsupported,
}

impl ChainNetwork {
    /// Resolves a chain id, falling back to [`ChainNetwork::Unsupported`].
    #[must_use]
    pub fn from_chain(chain: ChainId) -> Self {
        Network::from_chain_id(chain).map_or(Self::Unsupported, Self::Supported)
    }

    /// Returns the supported network, if any.
    #[must_use]
    pub const fn network(&self) -> Option<Network> {
        match self {
            Self::Supported(network) => Some(*network),
            Self::Unsupported => None,
        }
    }

    /// Returns the network name, or `"unsupported"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Supported(network) => network.as_str(),
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ChainNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
