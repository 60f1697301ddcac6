//! Merge

use rustc_hash::FxHashMap;

use crate::items::{LineItem, LineKey};

/// Reconciles a device-local cart into a persisted cart.
///
/// The merged list starts as a copy of the persisted lines, keeping
/// their relative order. Each device line in its original order either
/// folds into the persisted line with the same `(product_id, size)` by
/// quantity summation, or is appended at the end. Quantities are only
/// ever summed, never overwritten.
#[must_use]
pub fn merge_carts(persisted: Vec<LineItem>, device: Vec<LineItem>) -> Vec<LineItem> {
    let mut merged = persisted;

    let mut index: FxHashMap<LineKey, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, line)| (line.key(), i))
        .collect();

    for line in device {
        match index.get(&line.key()) {
            Some(&i) => {
                if let Some(existing) = merged.get_mut(i) {
                    existing.quantity += line.quantity;
                }
            }
            None => {
                index.insert(line.key(), merged.len());
                merged.push(line);
            }
        }
    }

    merged
}
