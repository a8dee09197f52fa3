use async_trait::async_trait;
use nostr_sdk::prelude::*;

use crate::error::ServiceError;
use crate::option::NftOption;
use crate::service::{AddressResolver, OptionService};

use super::config::DiscoveryConfig;
use super::option_event::{
    build_option_event, build_option_filter, event_network, parse_option_event,
};
use super::{connect_client, publish_event};

/// `OptionService` backed by Nostr relays.
///
/// Created options are signed with `keys` and published under the configured
/// network tag. Listing returns the announcements for that network only, in
/// the order the relays return them.
pub struct NostrOptionService {
    client: Client,
    keys: Keys,
    config: DiscoveryConfig,
}

impl NostrOptionService {
    /// Wrap an already connected client.
    pub fn new(client: Client, keys: Keys, config: DiscoveryConfig) -> Self {
        Self {
            client,
            keys,
            config,
        }
    }

    /// Connect to the configured relays.
    pub async fn connect(keys: Keys, config: DiscoveryConfig) -> Result<Self, ServiceError> {
        let client = connect_client(&config.relays)
            .await
            .map_err(ServiceError::Transport)?;
        Ok(Self::new(client, keys, config))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn disconnect(&self) {
        if let Err(e) = self.client.disconnect().await {
            log::warn!("failed to disconnect nostr client: {e}");
        }
    }
}

#[async_trait]
impl OptionService for NostrOptionService {
    async fn list_options(&self) -> Result<Vec<NftOption>, ServiceError> {
        let events = self
            .client
            .fetch_events(vec![build_option_filter()], self.config.fetch_timeout)
            .await
            .map_err(|e| ServiceError::Transport(format!("failed to fetch events: {e}")))?;

        let mut options = Vec::new();
        for event in events.iter() {
            let network = event_network(event);
            if !self.config.accepts_network(network) {
                log::debug!(
                    "skipping option event {} for network {:?}",
                    event.id,
                    network
                );
                continue;
            }
            match parse_option_event(event) {
                Ok(option) => options.push(option),
                Err(e) => {
                    log::warn!("skipping unparseable option event {}: {e}", event.id);
                }
            }
        }

        Ok(options)
    }

    async fn create_option(&self, option: &NftOption) -> Result<(), ServiceError> {
        let event = build_option_event(&self.keys, option, &self.config.network_tag)
            .map_err(ServiceError::Parse)?;
        let id = publish_event(&self.client, event)
            .await
            .map_err(ServiceError::Rejected)?;
        log::debug!("published option event {id}");
        Ok(())
    }
}

/// `AddressResolver` reporting the local key's npub.
#[derive(Clone)]
pub struct NostrIdentity {
    keys: Keys,
}

impl NostrIdentity {
    pub fn new(keys: Keys) -> Self {
        Self { keys }
    }
}

#[async_trait]
impl AddressResolver for NostrIdentity {
    async fn resolve_address(&self) -> Result<String, ServiceError> {
        self.keys
            .public_key()
            .to_bech32()
            .map_err(|e| ServiceError::Parse(format!("bech32 error: {e}")))
    }
}
