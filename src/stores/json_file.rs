//! JSON-file stores

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::items::{LineItem, PendingItem};
use crate::stores::{DeviceCartStore, PendingItemStore, StoreError};

fn remove_if_present(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// [`DeviceCartStore`] keeping the cart as one JSON document on disk.
///
/// This mirrors what a browser keeps in local storage for the
/// anonymous cart: a single array of `camelCase` line documents. An
/// absent file reads as an empty cart; undecodable content surfaces as
/// [`StoreError::Malformed`] for the engine to degrade on.
#[derive(Debug)]
pub struct JsonFileDeviceStore {
    path: PathBuf,
}

impl JsonFileDeviceStore {
    /// Creates a store reading and writing the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DeviceCartStore for JsonFileDeviceStore {
    async fn read(&self) -> Result<Vec<LineItem>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    async fn write(&self, items: &[LineItem]) -> Result<(), StoreError> {
        let doc = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, doc)?;
        Ok(())
    }

    async fn erase(&self) -> Result<(), StoreError> {
        remove_if_present(&self.path)
    }
}

/// [`PendingItemStore`] keeping the slot as one JSON document on disk.
///
/// File present means a pending item exists; clearing the slot removes
/// the file, so the slot survives process restarts and login redirects
/// exactly as long as the document does.
#[derive(Debug)]
pub struct JsonFilePendingStore {
    path: PathBuf,
}

impl JsonFilePendingStore {
    /// Creates a store reading and writing the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PendingItemStore for JsonFilePendingStore {
    async fn load(&self) -> Result<Option<PendingItem>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_str(&raw)?))
    }

    async fn save(&self, item: &PendingItem) -> Result<(), StoreError> {
        let doc = serde_json::to_string_pretty(item)?;
        fs::write(&self.path, doc)?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        remove_if_present(&self.path)
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
    async fn absent_file_reads_as_empty_cart() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileDeviceStore::new(dir.path().join("cart.json"));

        assert_eq!(store.read().await?, vec![]);
        Ok(())
    }

    #[tokio::test]
    async fn cart_round_trips_through_the_document() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileDeviceStore::new(dir.path().join("cart.json"));
        let items = vec![line(1, "M", 2), line(2, "L", 1)];

        store.write(&items).await?;

        assert_eq!(store.read().await?, items);
        Ok(())
    }

    #[tokio::test]
    async fn document_uses_camel_case_keys() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");
        let store = JsonFileDeviceStore::new(path.clone());

        store.write(&[line(1, "M", 2)]).await?;

        let raw = fs::read_to_string(path)?;
        assert!(raw.contains("\"productId\""), "keys must be camelCase: {raw}");
        Ok(())
    }

    #[tokio::test]
    async fn extra_keys_in_stored_documents_are_tolerated() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");
        fs::write(
            &path,
            r#"[{"productId":1,"name":"Tee","price":"45.00","image":"/i.jpg","size":"M","quantity":2,"addedAt":"2026-08-01T10:00:00Z"}]"#,
        )?;
        let store = JsonFileDeviceStore::new(path);

        let items = store.read().await?;

        assert_eq!(items, vec![LineItem { name: "Tee".into(), image: "/i.jpg".into(), ..line(1, "M", 2) }]);
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_content_is_reported_as_malformed() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");
        fs::write(&path, "{not json")?;
        let store = JsonFileDeviceStore::new(path);

        assert!(
            matches!(store.read().await, Err(StoreError::Malformed(_))),
            "garbage content must surface as Malformed"
        );
        Ok(())
    }

    #[tokio::test]
    async fn erase_removes_the_document_and_is_idempotent() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");
        let store = JsonFileDeviceStore::new(path.clone());
        store.write(&[line(1, "M", 1)]).await?;

        store.erase().await?;
        store.erase().await?;

        assert!(!path.exists(), "document must be gone after erase");
        Ok(())
    }

    #[tokio::test]
    async fn pending_slot_round_trips_and_clears() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFilePendingStore::new(dir.path().join("pending.json"));
        let pending = PendingItem {
            product_id: 7,
            name: "Hoodie Brodé".into(),
            price: Decimal::new(6500, 2),
            image: "/images/hoodie.jpg".into(),
        };

        assert_eq!(store.load().await?, None);

        store.save(&pending).await?;
        assert_eq!(store.load().await?, Some(pending));

        store.clear().await?;
        assert_eq!(store.load().await?, None);
        Ok(())
    }
}
