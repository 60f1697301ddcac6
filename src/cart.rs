//! Cart

use rust_decimal::Decimal;

use crate::items::{LineItem, NewLineItem};

/// An ordered collection of cart lines.
///
/// The cart upholds one invariant: the pair `(product_id, size)` is
/// unique across lines. Adding a matching item increments the existing
/// line's quantity instead of creating a duplicate. Line order is the
/// order of first insertion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from an untrusted list of lines.
    ///
    /// Duplicate `(product_id, size)` pairs are folded together by
    /// quantity summation and zero-quantity lines are dropped, so the
    /// uniqueness invariant holds regardless of what a store handed us.
    #[must_use]
    pub fn from_lines(lines: impl Into<Vec<LineItem>>) -> Self {
        let lines: Vec<LineItem> = lines.into();
        let mut cart = Cart::new();

        for line in lines {
            if line.quantity == 0 {
                continue;
            }

            match cart.position(line.product_id, &line.size) {
                Some(i) => {
                    if let Some(existing) = cart.lines.get_mut(i) {
                        existing.quantity += line.quantity;
                    }
                }
                None => cart.lines.push(line),
            }
        }

        cart
    }

    /// Adds one unit of the submitted item.
    ///
    /// A line with the same `(product_id, size)` already present gains
    /// one unit; otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, item: NewLineItem) {
        match self.position(item.product_id, &item.size) {
            Some(i) => {
                if let Some(existing) = self.lines.get_mut(i) {
                    existing.quantity += 1;
                }
            }
            None => self.lines.push(item.into_line(1)),
        }
    }

    /// Removes the matching line. Silently does nothing when absent.
    pub fn remove(&mut self, product_id: u32, size: &str) {
        self.lines.retain(|line| !line.matches(product_id, size));
    }

    /// Sets the matching line's quantity to an absolute value.
    ///
    /// A quantity of zero removes the line. Silently does nothing when
    /// no line matches.
    pub fn set_quantity(&mut self, product_id: u32, size: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id, size);
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product_id, size))
        {
            line.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Consumes the cart, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<LineItem> {
        self.lines
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Total price across all lines (`Σ price × quantity`).
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: u32, size: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.matches(product_id, size))
    }
}
