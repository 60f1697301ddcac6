//! Engine
//!
//! [`CartEngine`] presents one consistent cart to the rest of the
//! application regardless of authentication state. It owns the session
//! state machine, routes persistence to whichever store is currently
//! authoritative, and performs the guest-to-authenticated merge exactly
//! once per sign-in edge.
//!
//! Failures never reach the caller as errors: reads degrade to an
//! empty store and writes leave the optimistic in-memory cart
//! untouched. Every degradation emits a `tracing` warning and failed
//! writes stay observable through
//! [`CartEngine::last_persistence_error`].

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::cart::Cart;
use crate::identity::UserId;
use crate::items::{LineItem, NewLineItem, PendingItem};
use crate::merge::merge_carts;
use crate::stores::{DeviceCartStore, PendingItemStore, RemoteCartStore, StoreError};

/// Which store is authoritative for the cart right now.
///
/// The state is selected once per transition; operations never
/// re-consult the identity provider mid-call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No identity bound; the device store is authoritative.
    Anonymous,
    /// Transient state while a sign-in merge runs to completion.
    Merging,
    /// Identity bound; the persistence service is authoritative.
    Authenticated(UserId),
}

/// The cart reconciliation engine.
///
/// One engine instance is the single logical owner of one cart. All
/// mutating operations take `&mut self`, so a merge always runs to
/// completion before any other mutation can observe cart state.
#[derive(Debug)]
pub struct CartEngine<R, D, P> {
    remote: R,
    device: D,
    pending_store: P,
    cart: Cart,
    pending: Option<PendingItem>,
    state: SessionState,
    last_write_error: Option<StoreError>,
}

impl<R, D, P> CartEngine<R, D, P>
where
    R: RemoteCartStore,
    D: DeviceCartStore,
    P: PendingItemStore,
{
    /// Opens an engine for a new session.
    ///
    /// With an identity already present at load time the engine starts
    /// directly in [`SessionState::Authenticated`] and hydrates from
    /// the persistence service with **no** merge; otherwise it starts
    /// [`SessionState::Anonymous`] and hydrates from the device store.
    /// The pending slot is hydrated either way.
    pub async fn open(remote: R, device: D, pending_store: P, identity: Option<UserId>) -> Self {
        let mut engine = CartEngine {
            remote,
            device,
            pending_store,
            cart: Cart::new(),
            pending: None,
            state: SessionState::Anonymous,
            last_write_error: None,
        };

        match identity {
            Some(user) => {
                let persisted = engine.fetch_persisted(&user).await;
                engine.cart = Cart::from_lines(persisted);
                engine.state = SessionState::Authenticated(user);
            }
            None => {
                let lines = engine.read_device().await;
                engine.cart = Cart::from_lines(lines);
            }
        }

        engine.pending = match engine.pending_store.load().await {
            Ok(pending) => pending,
            Err(err) => {
                warn!(error = %err, "pending item unreadable, treating slot as empty");
                None
            }
        };

        engine
    }

    /// Reacts to the identity provider reporting a signed-in user.
    ///
    /// On a none→identity edge this runs the one-time merge: read the
    /// device cart, fetch the persisted cart (a failed fetch counts as
    /// empty rather than blocking), sum quantities per
    /// `(product_id, size)` with persisted lines keeping positional
    /// priority, write the merged list back as a full replace, and
    /// erase the device cart. Runs even when the device cart is empty.
    ///
    /// A repeated sign-in for the identity already bound is ignored; a
    /// *different* identity without an intervening sign-out rebinds to
    /// that identity's persisted cart with no merge, so one user's
    /// lines never flow into another account.
    pub async fn sign_in(&mut self, user: UserId) {
        match &self.state {
            SessionState::Authenticated(current) if *current == user => {
                debug!(user = %user, "sign-in for already-bound identity ignored");
                return;
            }
            SessionState::Authenticated(previous) => {
                warn!(previous = %previous, user = %user, "identity changed without sign-out, rebinding without merge");
                let persisted = self.fetch_persisted(&user).await;
                self.cart = Cart::from_lines(persisted);
                self.state = SessionState::Authenticated(user);
                return;
            }
            SessionState::Anonymous | SessionState::Merging => {}
        }

        self.state = SessionState::Merging;

        let device_lines = self.read_device().await;
        let persisted = self.fetch_persisted(&user).await;
        let merged = merge_carts(persisted, device_lines);

        self.record_write(self.remote.replace(&user, &merged).await);
        if let Err(err) = self.device.erase().await {
            warn!(error = %err, "device cart erase after merge failed");
        }

        self.cart = Cart::from_lines(merged);
        self.state = SessionState::Authenticated(user);
    }

    /// Reacts to the identity being cleared.
    ///
    /// The next anonymous session starts with an empty cart: the
    /// now-stale authenticated cart is never written to the device
    /// store, and any residue in the device store is erased so it
    /// cannot leak into another visitor's session on a shared device.
    pub async fn sign_out(&mut self) {
        if self.state == SessionState::Anonymous {
            return;
        }

        self.cart = Cart::new();
        self.state = SessionState::Anonymous;

        if let Err(err) = self.device.erase().await {
            warn!(error = %err, "device cart erase on sign-out failed");
        }
    }

    /// Adds one unit of the submitted item and persists the cart.
    pub async fn add_item(&mut self, item: NewLineItem) {
        self.cart.add(item);
        self.persist().await;
    }

    /// Removes the matching line, if present, and persists the cart.
    pub async fn remove_item(&mut self, product_id: u32, size: &str) {
        self.cart.remove(product_id, size);
        self.persist().await;
    }

    /// Sets the matching line's quantity; zero removes the line.
    /// A missing line is a silent no-op. Persists the cart.
    pub async fn update_quantity(&mut self, product_id: u32, size: &str, quantity: u32) {
        self.cart.set_quantity(product_id, size, quantity);
        self.persist().await;
    }

    /// Empties the cart and clears whichever store is authoritative.
    pub async fn clear_cart(&mut self) {
        self.cart.clear();

        let result = match &self.state {
            SessionState::Authenticated(user) => self.remote.clear(user).await,
            SessionState::Anonymous | SessionState::Merging => self.device.erase().await,
        };
        self.record_write(result);
    }

    /// Records an incomplete add-to-cart attempt awaiting its size.
    ///
    /// Replaces any previous pending item; the slot holds at most one.
    pub async fn set_pending_item(&mut self, item: PendingItem) {
        if let Err(err) = self.pending_store.save(&item).await {
            warn!(error = %err, "pending item save failed, keeping in-memory slot");
        }
        self.pending = Some(item);
    }

    /// Abandons the pending attempt, if any.
    pub async fn clear_pending_item(&mut self) {
        self.pending = None;
        if let Err(err) = self.pending_store.clear().await {
            warn!(error = %err, "pending item clear failed");
        }
    }

    /// Completes the pending attempt with the chosen size.
    ///
    /// The item folds into the cart with [`add_item`](Self::add_item)
    /// semantics and the pending slot is cleared. A silent no-op when
    /// no attempt is pending.
    pub async fn complete_pending_item(&mut self, size: impl Into<String>) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        self.add_item(pending.with_size(size)).await;
        if let Err(err) = self.pending_store.clear().await {
            warn!(error = %err, "pending item clear failed");
        }
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        self.cart.lines()
    }

    /// The pending add-to-cart attempt, if any.
    #[must_use]
    pub fn pending_item(&self) -> Option<&PendingItem> {
        self.pending.as_ref()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Total price across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// The current session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether an identity is currently bound.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// The most recent failed persistence write, if the failure has
    /// not been superseded by a successful write since.
    ///
    /// Operations themselves never fail; this is the hook for a
    /// monitoring collaborator to observe degraded persistence.
    #[must_use]
    pub fn last_persistence_error(&self) -> Option<&StoreError> {
        self.last_write_error.as_ref()
    }

    async fn fetch_persisted(&self, user: &UserId) -> Vec<LineItem> {
        match self.remote.fetch(user).await {
            Ok(lines) => lines,
            Err(err) => {
                warn!(user = %user, error = %err, "persisted cart unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    async fn read_device(&self) -> Vec<LineItem> {
        match self.device.read().await {
            Ok(lines) => lines,
            Err(err) => {
                warn!(error = %err, "device cart unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    async fn persist(&mut self) {
        let result = match &self.state {
            SessionState::Authenticated(user) => self.remote.replace(user, self.cart.lines()).await,
            SessionState::Anonymous | SessionState::Merging => {
                self.device.write(self.cart.lines()).await
            }
        };
        self.record_write(result);
    }

    fn record_write(&mut self, result: Result<(), StoreError>) {
        match result {
            Ok(()) => self.last_write_error = None,
            Err(err) => {
                warn!(error = %err, "cart write failed, keeping in-memory state");
                self.last_write_error = Some(err);
            }
        }
    }
}
