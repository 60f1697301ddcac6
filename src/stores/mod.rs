//! Store contracts
//!
//! The engine never talks to a database, browser storage or network
//! directly; it goes through the three contracts in this module. Each
//! contract is deliberately narrow: components get exactly the
//! operations the cart lifecycle needs and nothing else.
//!
//! Two families of implementations ship with the crate:
//!
//! - [`memory`]: mutex-guarded in-memory stores, the default
//!   collaborators for tests and demos.
//! - [`json_file`]: single-document JSON files mirroring what a
//!   browser keeps in local storage for a device-scoped cart.

use thiserror::Error;

use crate::identity::UserId;
use crate::items::{LineItem, PendingItem};

pub mod json_file;
pub mod memory;

/// Errors surfaced by store implementations.
///
/// The engine maps every one of these to a degradation, never to a
/// user-visible failure: reads degrade to an empty store, writes leave
/// the in-memory cart untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing service could not be reached or refused the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Filesystem-level failure on a device-side store.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A stored record could not be decoded into a cart type.
    #[error("malformed stored record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The authoritative cart store for authenticated users.
///
/// Keyed by [`UserId`]; the persistence service behind it owns the
/// durable cart. `replace` is a full overwrite of the user's line
/// list, never an incremental patch.
pub trait RemoteCartStore {
    /// Fetches the persisted cart, empty if the user has none yet.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the persistence service fails.
    async fn fetch(&self, user: &UserId) -> Result<Vec<LineItem>, StoreError>;

    /// Replaces the persisted cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the persistence service fails.
    async fn replace(&self, user: &UserId, items: &[LineItem]) -> Result<(), StoreError>;

    /// Deletes the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the persistence service fails.
    async fn clear(&self, user: &UserId) -> Result<(), StoreError>;
}

/// The transient cart store scoped to the visitor's device.
///
/// Holds the anonymous cart only; after a merge the engine erases it
/// so migrated lines never linger on the device.
pub trait DeviceCartStore {
    /// Reads the device cart, empty if none was saved.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the device medium fails or holds
    /// undecodable data.
    async fn read(&self) -> Result<Vec<LineItem>, StoreError>;

    /// Overwrites the device cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the device medium fails.
    async fn write(&self, items: &[LineItem]) -> Result<(), StoreError>;

    /// Deletes the device cart entirely.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the device medium fails.
    async fn erase(&self) -> Result<(), StoreError>;
}

impl<T: RemoteCartStore> RemoteCartStore for &T {
    async fn fetch(&self, user: &UserId) -> Result<Vec<LineItem>, StoreError> {
        (**self).fetch(user).await
    }

    async fn replace(&self, user: &UserId, items: &[LineItem]) -> Result<(), StoreError> {
        (**self).replace(user, items).await
    }

    async fn clear(&self, user: &UserId) -> Result<(), StoreError> {
        (**self).clear(user).await
    }
}

impl<T: DeviceCartStore> DeviceCartStore for &T {
    async fn read(&self) -> Result<Vec<LineItem>, StoreError> {
        (**self).read().await
    }

    async fn write(&self, items: &[LineItem]) -> Result<(), StoreError> {
        (**self).write(items).await
    }

    async fn erase(&self) -> Result<(), StoreError> {
        (**self).erase().await
    }
}

/// Device-scoped slot holding at most one incomplete add-to-cart
/// attempt, durable across a full-page navigation such as a login
/// redirect.
pub trait PendingItemStore {
    /// Loads the pending item, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the device medium fails or holds
    /// undecodable data.
    async fn load(&self) -> Result<Option<PendingItem>, StoreError>;

    /// Saves the pending item, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the device medium fails.
    async fn save(&self, item: &PendingItem) -> Result<(), StoreError>;

    /// Clears the pending slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the device medium fails.
    async fn clear(&self) -> Result<(), StoreError>;
}

impl<T: PendingItemStore> PendingItemStore for &T {
    async fn load(&self) -> Result<Option<PendingItem>, StoreError> {
        (**self).load().await
    }

    async fn save(&self, item: &PendingItem) -> Result<(), StoreError> {
        (**self).save(item).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        (**self).clear().await
    }
}
