//! Line items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of a cart line: one product in one size.
///
/// A cart never holds two lines with the same key; a second add for the
/// same key folds into the existing line's quantity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineKey {
    /// Catalog product reference
    pub product_id: u32,
    /// Catalog-defined size token
    pub size: String,
}

/// A single product/size/quantity entry in a cart.
///
/// `name`, `price` and `image` are snapshots taken when the line was
/// added; they are never re-fetched from the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog product reference
    pub product_id: u32,
    /// Display name snapshot
    pub name: String,
    /// Unit price snapshot
    pub price: Decimal,
    /// Image reference snapshot
    pub image: String,
    /// Catalog-defined size token
    pub size: String,
    /// Number of units, always positive
    pub quantity: u32,
}

impl LineItem {
    /// Returns the `(product_id, size)` identity of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id,
            size: self.size.clone(),
        }
    }

    /// Checks whether this line matches the given identity.
    #[must_use]
    pub fn matches(&self, product_id: u32, size: &str) -> bool {
        self.product_id == product_id && self.size == size
    }

    /// Price of the whole line (`price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A line item as submitted by an add-to-cart action: no quantity yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    /// Catalog product reference
    pub product_id: u32,
    /// Display name snapshot
    pub name: String,
    /// Unit price snapshot
    pub price: Decimal,
    /// Image reference snapshot
    pub image: String,
    /// Catalog-defined size token
    pub size: String,
}

impl NewLineItem {
    /// Turns this submission into a stored line with the given quantity.
    #[must_use]
    pub fn into_line(self, quantity: u32) -> LineItem {
        LineItem {
            product_id: self.product_id,
            name: self.name,
            price: self.price,
            image: self.image,
            size: self.size,
            quantity,
        }
    }
}

/// An add-to-cart attempt still missing its size selection.
///
/// At most one pending item exists per device. It is created when a
/// visitor starts an add without choosing a size, survives a login
/// redirect, and is consumed the moment the size is supplied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingItem {
    /// Catalog product reference
    pub product_id: u32,
    /// Display name snapshot
    pub name: String,
    /// Unit price snapshot
    pub price: Decimal,
    /// Image reference snapshot
    pub image: String,
}

impl PendingItem {
    /// Completes the attempt with the chosen size.
    #[must_use]
    pub fn with_size(self, size: impl Into<String>) -> NewLineItem {
        NewLineItem {
            product_id: self.product_id,
            name: self.name,
            price: self.price,
            image: self.image,
            size: size.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tee() -> NewLineItem {
        NewLineItem {
            product_id: 1,
            name: "Tee Oversize".into(),
            price: Decimal::new(4500, 2),
            image: "/images/tee-oversize.jpg".into(),
            size: "M".into(),
        }
    }

    #[test]
    fn into_line_keeps_snapshots() {
        let line = tee().into_line(2);

        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, Decimal::new(4500, 2));
        assert_eq!(
            line.key(),
            LineKey {
                product_id: 1,
                size: "M".into()
            }
        );
    }

    #[test]
    fn line_total_is_price_times_quantity() {
        let line = tee().into_line(3);

        assert_eq!(line.line_total(), Decimal::new(13500, 2));
    }

    #[test]
    fn matches_compares_product_and_size() {
        let line = tee().into_line(1);

        assert!(line.matches(1, "M"), "same product and size must match");
        assert!(!line.matches(1, "L"), "other size must not match");
        assert!(!line.matches(2, "M"), "other product must not match");
    }

    #[test]
    fn pending_item_completes_into_submission() {
        let pending = PendingItem {
            product_id: 7,
            name: "Hoodie Brodé".into(),
            price: Decimal::new(6500, 2),
            image: "/images/hoodie.jpg".into(),
        };

        let submission = pending.with_size("L");

        assert_eq!(submission.size, "L");
        assert_eq!(submission.product_id, 7);
    }
}
