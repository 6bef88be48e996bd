//! Favorited DAO record.

use crate::validation::rules;
use crate::{ChainId, DaoKey, DaodashError, DaodashResult, ValidateExt};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A DAO the user has marked as a favorite.
///
/// The composite key `(chain, address)` identifies the record; `address`
/// never changes once the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FavoritedDao {
    /// DAO contract address in the chain's native format.
    #[validate(length(min = 1, max = 128))]
    pub address: String,

    /// ENS (or equivalent) alias.
    #[validate(length(max = 255))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ens_domain: Option<String>,

    /// Chain the DAO lives on.
    pub chain: ChainId,

    /// Cached descriptive metadata.
    #[validate(nested)]
    pub metadata: DaoMetadata,

    /// Plugins installed on the DAO, carried as-is.
    #[serde(default)]
    pub plugins: Vec<DaoPlugin>,
}

impl FavoritedDao {
    /// Creates a record with a name and no avatar.
    #[must_use]
    pub fn new(chain: impl Into<ChainId>, address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ens_domain: None,
            chain: chain.into(),
            metadata: DaoMetadata::new(name),
            plugins: Vec::new(),
        }
    }

    /// Sets the raw (unresolved) avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, reference: impl Into<String>) -> Self {
        self.metadata.avatar = Some(DaoAvatar::raw(reference));
        self
    }

    /// Sets the ENS alias.
    #[must_use]
    pub fn with_ens_domain(mut self, ens_domain: impl Into<String>) -> Self {
        self.ens_domain = Some(ens_domain.into());
        self
    }

    /// Returns the composite key.
    #[must_use]
    pub fn key(&self) -> DaoKey {
        DaoKey::new(self.chain, self.address.clone())
    }

    /// Checks whether this record has the given key.
    #[must_use]
    pub fn has_key(&self, key: &DaoKey) -> bool {
        self.chain == key.chain && self.address == key.address
    }

    /// Returns the alias when present, otherwise the address.
    #[must_use]
    pub fn display_handle(&self) -> &str {
        self.ens_domain.as_deref().unwrap_or(&self.address)
    }

    /// Validates the record before it is written.
    pub fn validate_record(&self) -> DaodashResult<()> {
        self.validate_request()?;
        rules::not_blank(&self.address)
            .map_err(|_| DaodashError::validation("address: must not be blank"))?;
        rules::not_blank(&self.metadata.name)
            .map_err(|_| DaodashError::validation("metadata.name: must not be blank"))?;
        Ok(())
    }
}

impl From<&FavoritedDao> for DaoKey {
    fn from(dao: &FavoritedDao) -> Self {
        dao.key()
    }
}

/// Descriptive metadata cached alongside a favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DaoMetadata {
    /// Display name.
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(max = 2048))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Avatar reference, raw or resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<DaoAvatar>,
}

impl DaoMetadata {
    /// Creates metadata with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            avatar: None,
        }
    }
}

/// An avatar reference tagged with whether it has been resolved to a
/// display URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DaoAvatar {
    /// Raw reference (e.g. `ipfs://...`) or resolved display URL.
    pub reference: String,
    /// True once an avatar resolver has produced `reference`.
    #[serde(default)]
    pub resolved: bool,
}

impl DaoAvatar {
    /// Creates an unresolved reference.
    #[must_use]
    pub fn raw(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            resolved: false,
        }
    }

    /// Creates a resolved display reference.
    #[must_use]
    pub fn resolved(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            resolved: true,
        }
    }
}

/// A plugin installed on a DAO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoPlugin {
    /// Plugin repository id (e.g. `token-voting.plugin.dao.eth`).
    pub id: String,
    /// Address of the installed instance.
    pub instance_address: String,
}
