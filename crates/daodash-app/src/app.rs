//! Command layer of the `daodash` binary.
//!
//! Each command runs against a [`FavoritesService`] and renders its
//! result as pretty-printed JSON.

use clap::Subcommand;
use daodash_core::{ChainId, DaoKey, DaodashError, DaodashResult, FavoritedDao, Network};
use daodash_service::FavoritesService;
use serde::Serialize;
use tracing::{debug, info};

/// Favorites commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List favorites from an offset.
    List {
        /// Records to skip.
        #[arg(long, default_value_t = 0)]
        skip: usize,
        /// Maximum records to return.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Load the paged listing until it is exhausted.
    Pages {
        /// Stop after this many pages.
        #[arg(long)]
        max_pages: Option<usize>,
    },
    /// Look up one favorite.
    Get {
        /// Network name, e.g. `ethereum` or `base-goerli`.
        network: Network,
        address: String,
    },
    /// Add a favorite.
    Add {
        /// EIP-155 chain id.
        chain: u64,
        address: String,
        name: String,
        /// Avatar reference (`ipfs://`, bare CID or URL).
        #[arg(long)]
        avatar: Option<String>,
        /// ENS domain.
        #[arg(long)]
        ens: Option<String>,
    },
    /// Remove a favorite.
    Remove {
        /// EIP-155 chain id.
        chain: u64,
        address: String,
    },
    /// Rename an existing favorite.
    Rename {
        network: Network,
        address: String,
        name: String,
    },
    /// Count favorites.
    Count,
}

fn render<T: Serialize>(value: &T) -> DaodashResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Runs `command` and returns its rendered output.
pub async fn execute(service: &dyn FavoritesService, command: Command) -> DaodashResult<String> {
    debug!("Executing {:?}", command);

    match command {
        Command::List { skip, limit } => render(&service.favorited_daos(skip, limit).await?),
        Command::Pages { max_pages } => {
            let data = service.infinite_favorited_daos(max_pages).await?;
            info!("Loaded {} pages", data.pages.len());
            render(&data)
        }
        Command::Get { network, address } => {
            render(&service.favorited_dao(Some(address), Some(network)).await?)
        }
        Command::Add {
            chain,
            address,
            name,
            avatar,
            ens,
        } => {
            let mut dao = FavoritedDao::new(ChainId(chain), address, name);
            if let Some(avatar) = avatar {
                dao = dao.with_avatar(avatar);
            }
            if let Some(ens) = ens {
                dao = dao.with_ens_domain(ens);
            }
            render(&service.add_favorite(dao).await?)
        }
        Command::Remove { chain, address } => {
            let removed = service.remove_favorite(DaoKey::new(ChainId(chain), address)).await?;
            render(&serde_json::json!({ "removed": removed }))
        }
        Command::Rename {
            network,
            address,
            name,
        } => {
            let mut dao = service
                .favorited_dao(Some(address.clone()), Some(network))
                .await?
                .ok_or_else(|| {
                    DaodashError::not_found("FavoritedDao", DaoKey::new(network.chain_id(), address))
                })?;
            dao.metadata.name = name;
            render(&service.update_favorite(dao).await?)
        }
        Command::Count => render(&serde_json::json!({ "count": service.favorites_count().await? })),
    }
}
