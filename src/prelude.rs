//! Panier prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    engine::{CartEngine, SessionState},
    fixtures::{CartFixture, FixtureError},
    identity::UserId,
    items::{LineItem, LineKey, NewLineItem, PendingItem},
    merge::merge_carts,
    stores::{
        DeviceCartStore, PendingItemStore, RemoteCartStore, StoreError,
        json_file::{JsonFileDeviceStore, JsonFilePendingStore},
        memory::{MemoryDeviceStore, MemoryPendingStore, MemoryRemoteStore},
    },
};
