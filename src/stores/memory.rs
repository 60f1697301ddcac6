//! In-memory stores

use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;

use crate::identity::UserId;
use crate::items::{LineItem, PendingItem};
use crate::stores::{DeviceCartStore, PendingItemStore, RemoteCartStore, StoreError};

fn relock<'a, T>(
    guard: Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    guard.unwrap_or_else(PoisonError::into_inner)
}

/// [`RemoteCartStore`] backed by a per-user map in process memory.
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    carts: Mutex<FxHashMap<UserId, Vec<LineItem>>>,
}

impl MemoryRemoteStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a user's cart, for test and demo setup.
    pub fn seed(&self, user: UserId, items: Vec<LineItem>) {
        relock(self.carts.lock()).insert(user, items);
    }
}

impl RemoteCartStore for MemoryRemoteStore {
    async fn fetch(&self, user: &UserId) -> Result<Vec<LineItem>, StoreError> {
        Ok(relock(self.carts.lock()).get(user).cloned().unwrap_or_default())
    }

    async fn replace(&self, user: &UserId, items: &[LineItem]) -> Result<(), StoreError> {
        relock(self.carts.lock()).insert(user.clone(), items.to_vec());
        Ok(())
    }

    async fn clear(&self, user: &UserId) -> Result<(), StoreError> {
        relock(self.carts.lock()).remove(user);
        Ok(())
    }
}

/// [`DeviceCartStore`] backed by a single slot in process memory.
#[derive(Debug, Default)]
pub struct MemoryDeviceStore {
    items: Mutex<Vec<LineItem>>,
}

impl MemoryDeviceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the device cart, for test and demo setup.
    pub fn seed(&self, items: Vec<LineItem>) {
        *relock(self.items.lock()) = items;
    }
}

impl DeviceCartStore for MemoryDeviceStore {
    async fn read(&self) -> Result<Vec<LineItem>, StoreError> {
        Ok(relock(self.items.lock()).clone())
    }

    async fn write(&self, items: &[LineItem]) -> Result<(), StoreError> {
        *relock(self.items.lock()) = items.to_vec();
        Ok(())
    }

    async fn erase(&self) -> Result<(), StoreError> {
        relock(self.items.lock()).clear();
        Ok(())
    }
}

/// [`PendingItemStore`] backed by a single slot in process memory.
#[derive(Debug, Default)]
pub struct MemoryPendingStore {
    slot: Mutex<Option<PendingItem>>,
}

impl MemoryPendingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the pending slot, for test and demo setup.
    pub fn seed(&self, item: PendingItem) {
        *relock(self.slot.lock()) = Some(item);
    }
}

impl PendingItemStore for MemoryPendingStore {
    async fn load(&self) -> Result<Option<PendingItem>, StoreError> {
        Ok(relock(self.slot.lock()).clone())
    }

    async fn save(&self, item: &PendingItem) -> Result<(), StoreError> {
        *relock(self.slot.lock()) = Some(item.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *relock(self.slot.lock()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn line(product_id: u32, size: &str, quantity: u32) -> LineItem {
        LineItem {
            product_id,
            name: format!("Article {product_id}"),
            price: Decimal::new(4500, 2),
            image: format!("/images/{product_id}.jpg"),
            size: size.into(),
            quantity,
        }
    }

    #[tokio::test]
    async fn remote_store_is_keyed_by_user() -> TestResult {
        let store = MemoryRemoteStore::new();
        let alice = UserId::from("alice");
        let bob = UserId::from("bob");

        store.replace(&alice, &[line(1, "M", 2)]).await?;

        assert_eq!(store.fetch(&alice).await?, vec![line(1, "M", 2)]);
        assert_eq!(store.fetch(&bob).await?, vec![]);
        Ok(())
    }

    #[tokio::test]
    async fn remote_clear_removes_the_cart() -> TestResult {
        let store = MemoryRemoteStore::new();
        let user = UserId::from("alice");
        store.seed(user.clone(), vec![line(1, "M", 2)]);

        store.clear(&user).await?;

        assert_eq!(store.fetch(&user).await?, vec![]);
        Ok(())
    }

    #[tokio::test]
    async fn device_store_round_trips_and_erases() -> TestResult {
        let store = MemoryDeviceStore::new();

        store.write(&[line(2, "L", 1)]).await?;
        assert_eq!(store.read().await?, vec![line(2, "L", 1)]);

        store.erase().await?;
        assert_eq!(store.read().await?, vec![]);
        Ok(())
    }

    #[tokio::test]
    async fn pending_store_holds_at_most_one_item() -> TestResult {
        let store = MemoryPendingStore::new();
        let first = PendingItem {
            product_id: 1,
            name: "Tee Oversize".into(),
            price: Decimal::new(4500, 2),
            image: "/images/1.jpg".into(),
        };
        let second = PendingItem { product_id: 2, ..first.clone() };

        store.save(&first).await?;
        store.save(&second).await?;

        assert_eq!(store.load().await?, Some(second));

        store.clear().await?;
        assert_eq!(store.load().await?, None);
        Ok(())
    }
}
