use tokio::sync::watch;

use crate::error::ServiceError;
use crate::option::NftOption;
use crate::service::OptionService;

/// Snapshot held by the directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DirectoryState {
    /// No refresh has completed yet.
    #[default]
    NotLoaded,
    /// Result of the last completed refresh, possibly empty.
    Loaded(Vec<NftOption>),
}

impl DirectoryState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, DirectoryState::Loaded(_))
    }

    pub fn options(&self) -> Option<&[NftOption]> {
        match self {
            DirectoryState::NotLoaded => None,
            DirectoryState::Loaded(options) => Some(options),
        }
    }
}

/// Client-side list of persisted options.
///
/// Only `refresh` writes, and it replaces the whole list. Overlapping
/// refreshes are allowed; whichever completes last wins.
#[derive(Debug)]
pub struct OptionDirectory {
    tx: watch::Sender<DirectoryState>,
}

impl Default for OptionDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionDirectory {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DirectoryState::NotLoaded);
        Self { tx }
    }

    pub fn current(&self) -> DirectoryState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DirectoryState> {
        self.tx.subscribe()
    }

    /// Fetch the full list and replace the snapshot. On failure the previous
    /// snapshot is kept.
    pub async fn refresh<S: OptionService + ?Sized>(
        &self,
        service: &S,
    ) -> Result<usize, ServiceError> {
        let options = service.list_options().await?;
        let count = options.len();
        self.tx.send_replace(DirectoryState::Loaded(options));
        log::debug!("option directory refreshed with {count} entries");
        Ok(count)
    }
}
