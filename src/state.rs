use std::sync::atomic::{AtomicU64, Ordering};

use nft_options_sdk::{
    AddressResolver, Clock, CreationView, DirectoryState, NftOption, NodeError, OptionService,
    OptionsNode, SystemClock, short_address,
};
use serde::Serialize;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

// ============================================================================
// App state (sent to the presentation layer)
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub revision: u64,
    /// Wallet address, empty while unresolved.
    pub address: String,
    pub address_label: String,
    /// `None` until the first listing has completed.
    pub options: Option<Vec<NftOption>>,
    pub creation: CreationView,
    pub updated_at: String,
}

// ============================================================================
// App state manager
// ============================================================================

/// Owns the options node and turns its state into revisioned snapshots.
///
/// Every state-changing command calls [`publish`](Self::publish), which bumps
/// the revision and broadcasts the new snapshot to subscribers.
pub struct AppStateManager<S: ?Sized, R: ?Sized, C = SystemClock> {
    node: OptionsNode<S, R, C>,
    revision: AtomicU64,
    events: broadcast::Sender<AppState>,
}

impl<S, R, C> AppStateManager<S, R, C>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
    C: Clock,
{
    pub fn new(node: OptionsNode<S, R, C>) -> Self {
        let (events, _rx) = broadcast::channel(EVENT_CAPACITY);
        Self {
            node,
            revision: AtomicU64::new(0),
            events,
        }
    }

    pub fn node(&self) -> &OptionsNode<S, R, C> {
        &self.node
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppState> {
        self.events.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn bump_revision(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Result<AppState, NodeError> {
        let address = self.node.identity().current();
        let options = match self.node.directory().current() {
            DirectoryState::NotLoaded => None,
            DirectoryState::Loaded(options) => Some(options),
        };
        Ok(AppState {
            revision: self.revision(),
            address_label: short_address(&address),
            address,
            options,
            creation: self.node.creation_view()?,
            updated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Bump the revision, snapshot, and broadcast.
    pub fn publish(&self) -> Result<AppState, NodeError> {
        self.bump_revision();
        let state = self.snapshot()?;
        // No subscribers is fine.
        let _ = self.events.send(state.clone());
        Ok(state)
    }
}
