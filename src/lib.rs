//! Panier
//!
//! Panier is the cart reconciliation and persistence engine for the "Juste Un Peu" storefront.
//!
//! It presents one consistent shopping cart across anonymous and
//! authenticated sessions, sourcing the cart from a device-local store
//! before sign-in and from the account persistence service after, and
//! performing the one-time guest-to-authenticated merge at the moment
//! the two meet.

pub mod cart;
pub mod engine;
pub mod fixtures;
pub mod identity;
pub mod items;
pub mod merge;
pub mod prelude;
pub mod stores;
