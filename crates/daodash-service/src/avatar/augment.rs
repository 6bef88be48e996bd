//! Avatar augmentation of favorites before they reach the presentation layer.

use super::AvatarResolver;
use daodash_core::{ChainNetwork, DaoAvatar, FavoritedDao};

/// Resolves the avatar of one record.
///
/// Records without an avatar, or whose avatar is already resolved, are
/// returned unchanged, so applying this twice equals applying it once.
#[must_use]
pub fn augment_dao(resolver: &dyn AvatarResolver, mut dao: FavoritedDao) -> FavoritedDao {
    let network = ChainNetwork::from_chain(dao.chain);
    if let Some(avatar) = dao.metadata.avatar.as_mut() {
        if !avatar.resolved {
            *avatar = DaoAvatar::resolved(resolver.resolve(network, &avatar.reference));
        }
    }
    dao
}

/// Resolves the avatars of a list of records, keeping order.
#[must_use]
pub fn augment_daos(resolver: &dyn AvatarResolver, daos: Vec<FavoritedDao>) -> Vec<FavoritedDao> {
    daos.into_iter().map(|dao| augment_dao(resolver, dao)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::MockAvatarResolver;
    use daodash_core::Network;
    use mockall::predicate::{always, eq};

    #[test]
    fn test_resolves_raw_avatar_once() {
        let mut resolver = MockAvatarResolver::new();
        resolver
            .expect_resolve()
            .with(eq(ChainNetwork::Supported(Network::Polygon)), eq("ipfs://QmLogo"))
            .times(1)
            .returning(|_, _| "https://gw/ipfs/QmLogo".to_string());

        let dao = FavoritedDao::new(137, "0xabc", "Poly DAO").with_avatar("ipfs://QmLogo");
        let once = augment_dao(&resolver, dao);
        let twice = augment_dao(&resolver, once.clone());

        assert_eq!(once, twice);
        assert_eq!(
            once.metadata.avatar,
            Some(DaoAvatar::resolved("https://gw/ipfs/QmLogo"))
        );
    }

    #[test]
    fn test_unsupported_chain_is_passed_to_resolver() {
        let mut resolver = MockAvatarResolver::new();
        resolver
            .expect_resolve()
            .with(eq(ChainNetwork::Unsupported), always())
            .times(1)
            .returning(|_, avatar| avatar.to_uppercase());

        let dao = FavoritedDao::new(999_999, "0xabc", "Unknown").with_avatar("logo");
        let augmented = augment_dao(&resolver, dao);
        assert_eq!(augmented.metadata.avatar, Some(DaoAvatar::resolved("LOGO")));
    }

    #[test]
    fn test_records_without_avatar_are_unchanged() {
        let mut resolver = MockAvatarResolver::new();
        resolver.expect_resolve().never();

        let daos = vec![
            FavoritedDao::new(1, "0xa", "A"),
            FavoritedDao::new(1, "0xb", "B"),
        ];
        assert_eq!(augment_daos(&resolver, daos.clone()), daos);
    }

    #[test]
    fn test_augment_daos_keeps_order() {
        let mut resolver = MockAvatarResolver::new();
        resolver
            .expect_resolve()
            .returning(|_, avatar| format!("resolved:{}", avatar));

        let daos = vec![
            FavoritedDao::new(1, "0xa", "A").with_avatar("a"),
            FavoritedDao::new(1, "0xb", "B"),
            FavoritedDao::new(1, "0xc", "C").with_avatar("c"),
        ];
        let augmented = augment_daos(&resolver, daos);

        let avatars: Vec<_> = augmented
            .iter()
            .map(|d| d.metadata.avatar.as_ref().map(|a| a.reference.as_str()))
            .collect();
        assert_eq!(avatars, vec![Some("resolved:a"), None, Some("resolved:c")]);
    }
}
