//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::items::{LineItem, PendingItem};

/// Fixture parsing errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A fixture line carries a non-positive quantity
    #[error("Line for product {product_id} size {size} has quantity 0")]
    ZeroQuantity {
        /// Catalog product reference of the offending line
        product_id: u32,
        /// Size token of the offending line
        size: String,
    },
}

/// A device/persisted cart pair loaded from YAML fixture files.
///
/// Sets live under `fixtures/carts/<name>/` as `device.yml` and
/// `persisted.yml`, each holding a plain list of line documents.
#[derive(Debug)]
pub struct CartFixture {
    base_path: PathBuf,
    device: Vec<LineItem>,
    persisted: Vec<LineItem>,
}

impl CartFixture {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    #[must_use]
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            device: Vec::new(),
            persisted: Vec::new(),
        }
    }

    /// Load a complete cart set by name from the default base path.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if either file cannot be read or
    /// parsed, or if a line carries a zero quantity.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();
        fixture.load_set(name)?;
        Ok(fixture)
    }

    /// Load both cart files of a set into this fixture.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if either file cannot be read or
    /// parsed, or if a line carries a zero quantity.
    pub fn load_set(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        self.device = self.load_cart_file(name, "device")?;
        self.persisted = self.load_cart_file(name, "persisted")?;
        Ok(self)
    }

    /// The device-local cart lines of the loaded set.
    #[must_use]
    pub fn device(&self) -> &[LineItem] {
        &self.device
    }

    /// The persisted cart lines of the loaded set.
    #[must_use]
    pub fn persisted(&self) -> &[LineItem] {
        &self.persisted
    }

    fn load_cart_file(&self, name: &str, side: &str) -> Result<Vec<LineItem>, FixtureError> {
        let file_path = self
            .base_path
            .join("carts")
            .join(name)
            .join(format!("{side}.yml"));

        let raw = fs::read_to_string(file_path)?;
        let lines: Vec<LineItem> = serde_norway::from_str(&raw)?;

        for line in &lines {
            if line.quantity == 0 {
                return Err(FixtureError::ZeroQuantity {
                    product_id: line.product_id,
                    size: line.size.clone(),
                });
            }
        }

        Ok(lines)
    }
}

impl Default for CartFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a pending-item fixture from `fixtures/pending/<name>.yml`.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed.
pub fn load_pending(name: &str) -> Result<PendingItem, FixtureError> {
    let file_path = PathBuf::from("./fixtures")
        .join("pending")
        .join(format!("{name}.yml"));

    let raw = fs::read_to_string(file_path)?;
    Ok(serde_norway::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_set_loads_both_sides() -> TestResult {
        let fixture = CartFixture::from_set("returning_overlap")?;

        assert!(!fixture.device().is_empty(), "device side must have lines");
        assert!(!fixture.persisted().is_empty(), "persisted side must have lines");
        Ok(())
    }

    #[test]
    fn first_purchase_set_has_an_empty_persisted_cart() -> TestResult {
        let fixture = CartFixture::from_set("first_purchase")?;

        assert!(fixture.persisted().is_empty(), "no persisted cart on a first purchase");
        assert_eq!(fixture.device().len(), 1);
        Ok(())
    }

    #[test]
    fn unknown_set_errors_with_io() {
        assert!(
            matches!(CartFixture::from_set("does_not_exist"), Err(FixtureError::Io(_))),
            "missing set must surface the IO error"
        );
    }

    #[test]
    fn pending_fixture_loads() -> TestResult {
        let pending = load_pending("hoodie")?;

        assert_eq!(pending.product_id, 7);
        Ok(())
    }
}
