//! Avatar resolution and augmentation.

mod augment;
mod resolver;

pub use augment::{augment_dao, augment_daos};
#[cfg(test)]
pub use resolver::MockAvatarResolver;
pub use resolver::{AvatarResolver, IpfsAvatarResolver, IpfsAvatarResolverParameters};
