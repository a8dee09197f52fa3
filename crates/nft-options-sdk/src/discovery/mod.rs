//! Nostr transport for option records and the local identity.
//!
//! Options travel as NIP-78 application events; listing is a one-shot fetch
//! against the configured relays.

pub(crate) mod config;
pub(crate) mod option_event;
pub(crate) mod service;

use nostr_sdk::prelude::*;

// ---------------------------------------------------------------------------
// Shared constants
// ---------------------------------------------------------------------------

/// Nostr event kind for app-specific data (NIP-78).
pub const APP_EVENT_KIND: Kind = Kind::Custom(30078);

/// Tag value identifying an NFT option announcement.
pub const OPTION_TAG: &str = "nft-option";

/// Tag name carrying the network an option was published for.
pub const NETWORK_TAG_KEY: &str = "network";

/// Default network tag value.
pub const NETWORK_TAG: &str = "ethereum";

/// Default relay URLs.
pub const DEFAULT_RELAYS: &[&str] = &["wss://relay.damus.io", "wss://relay.primal.net"];

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use config::{DEFAULT_FETCH_TIMEOUT, DiscoveryConfig};
pub use option_event::{
    OptionAnnouncement, build_option_event, build_option_filter, event_network,
    parse_option_event,
};
pub use service::{NostrIdentity, NostrOptionService};

// ---------------------------------------------------------------------------
// Relay interaction helpers
// ---------------------------------------------------------------------------

/// Connect a Nostr client to the given relays.
pub async fn connect_client(relays: &[String]) -> Result<Client, String> {
    if relays.is_empty() {
        return Err("no relays configured".to_string());
    }
    let client = Client::default();
    for url in relays {
        client
            .add_relay(url.as_str())
            .await
            .map_err(|e| format!("failed to add relay {url}: {e}"))?;
    }
    client.connect().await;
    Ok(client)
}

/// Publish an event to the connected relays.
pub async fn publish_event(client: &Client, event: Event) -> Result<EventId, String> {
    let output = client
        .send_event(event)
        .await
        .map_err(|e| format!("failed to send event: {e}"))?;
    Ok(*output.id())
}
