//! Avatar URL resolution.

use daodash_config::IpfsConfig;
use daodash_core::{ChainNetwork, Interface};
use shaku::Component;

/// Maps a raw avatar reference to a display URL.
///
/// Implementations are pure: the same input always yields the same output.
#[cfg_attr(test, mockall::automock)]
pub trait AvatarResolver: Interface + Send + Sync {
    /// Resolves `avatar` for a DAO on `network`.
    fn resolve(&self, network: ChainNetwork, avatar: &str) -> String;
}

const IPFS_SCHEME: &str = "ipfs://";
const CID_V0_PREFIX: &str = "Qm";
const CID_V0_LEN: usize = 46;
const CID_V1_PREFIX: &str = "bafy";

/// Resolves `ipfs://` references and bare CIDs through an HTTP gateway.
///
/// `http(s)://` and `data:` references, and anything unrecognised, pass
/// through unchanged. Testnets use `testnet_gateway`; mainnets and
/// unsupported chains use `gateway`.
#[derive(Component, Debug, Clone)]
#[shaku(interface = AvatarResolver)]
pub struct IpfsAvatarResolver {
    gateway: String,
    testnet_gateway: String,
}

impl IpfsAvatarResolver {
    /// Creates a resolver over two gateway base URLs.
    #[must_use]
    pub fn new(gateway: impl Into<String>, testnet_gateway: impl Into<String>) -> Self {
        Self {
            gateway: trim_gateway(gateway.into()),
            testnet_gateway: trim_gateway(testnet_gateway.into()),
        }
    }

    /// Creates a resolver from the `ipfs` configuration section.
    #[must_use]
    pub fn from_config(config: &IpfsConfig) -> Self {
        Self::new(config.gateway.clone(), config.testnet_gateway.clone())
    }

    #[must_use]
    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    #[must_use]
    pub fn testnet_gateway(&self) -> &str {
        &self.testnet_gateway
    }

    /// Returns the gateway used for `network`.
    #[must_use]
    pub fn gateway_for(&self, network: ChainNetwork) -> &str {
        match network {
            ChainNetwork::Supported(network) if network.is_testnet() => &self.testnet_gateway,
            _ => &self.gateway,
        }
    }

    fn gateway_url(&self, network: ChainNetwork, path: &str) -> String {
        format!("{}/ipfs/{}", self.gateway_for(network), path)
    }
}

impl AvatarResolver for IpfsAvatarResolver {
    fn resolve(&self, network: ChainNetwork, avatar: &str) -> String {
        let reference = avatar.trim();

        if let Some(path) = reference.strip_prefix(IPFS_SCHEME) {
            let path = path.strip_prefix("ipfs/").unwrap_or(path);
            return self.gateway_url(network, path);
        }

        let cid = reference.split('/').next().unwrap_or_default();
        if is_cid(cid) {
            return self.gateway_url(network, reference);
        }

        avatar.to_string()
    }
}

fn trim_gateway(gateway: String) -> String {
    gateway.trim_end_matches('/').to_string()
}

fn is_cid(candidate: &str) -> bool {
    let alphanumeric = candidate.chars().all(|c| c.is_ascii_alphanumeric());
    if candidate.starts_with(CID_V0_PREFIX) {
        return alphanumeric && candidate.len() == CID_V0_LEN;
    }
    candidate.starts_with(CID_V1_PREFIX)
        && candidate.len() > CID_V1_PREFIX.len()
        && candidate
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
