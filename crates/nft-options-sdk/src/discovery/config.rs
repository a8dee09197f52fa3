use std::time::Duration;

use super::{DEFAULT_RELAYS, NETWORK_TAG};

/// Fetch timeout used when none is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Relay settings for [`NostrOptionService`](super::NostrOptionService).
///
/// `network_tag` partitions the option store: events are published under it
/// and listing ignores events published under any other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub relays: Vec<String>,
    pub network_tag: String,
    pub fetch_timeout: Duration,
}

impl DiscoveryConfig {
    /// Default settings pointed at `relays`.
    pub fn for_relays<I, U>(relays: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        Self {
            relays: relays.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether an event tagged with `network` belongs to this store.
    /// Untagged events are never accepted.
    pub fn accepts_network(&self, network: Option<&str>) -> bool {
        network == Some(self.network_tag.as_str())
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            relays: DEFAULT_RELAYS.iter().map(|s| s.to_string()).collect(),
            network_tag: NETWORK_TAG.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
