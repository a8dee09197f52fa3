use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::option::NftOption;

use super::{APP_EVENT_KIND, NETWORK_TAG_KEY, OPTION_TAG};

/// Current announcement payload version.
pub const ANNOUNCEMENT_VERSION: u8 = 1;

/// Event content published for each created option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionAnnouncement {
    pub version: u8,
    pub option: NftOption,
}

/// Replaceable-event identifier: distinct per publish so two identical
/// options from one author do not overwrite each other.
fn option_uid(content: &str, nonce: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hasher.update(nonce.to_be_bytes());
    hex::encode(hasher.finalize())
}

/// Build a signed Nostr event announcing a new option.
pub fn build_option_event(
    keys: &Keys,
    option: &NftOption,
    network_tag: &str,
) -> Result<Event, String> {
    let announcement = OptionAnnouncement {
        version: ANNOUNCEMENT_VERSION,
        option: option.clone(),
    };
    let content =
        serde_json::to_string(&announcement).map_err(|e| format!("failed to serialize: {e}"))?;
    let nonce = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default() as u64;
    let uid = option_uid(&content, nonce);

    let mut tags = vec![
        Tag::identifier(&uid),
        Tag::hashtag(OPTION_TAG),
        Tag::custom(TagKind::custom(NETWORK_TAG_KEY), vec![network_tag.to_string()]),
    ];
    if let Some(collection) = option.collection {
        tags.push(Tag::hashtag(collection.as_str().to_lowercase()));
    }

    let event = EventBuilder::new(APP_EVENT_KIND, &content)
        .tags(tags)
        .sign_with_keys(keys)
        .map_err(|e| format!("failed to build event: {e}"))?;

    Ok(event)
}

/// Build a Nostr filter for fetching option announcements.
///
/// Relays only index single-letter tags, so the network is not part of the
/// filter; callers check [`event_network`] on each result.
pub fn build_option_filter() -> Filter {
    Filter::new().kind(APP_EVENT_KIND).hashtag(OPTION_TAG)
}

/// The `network` tag value of an event, if it carries one.
pub fn event_network(event: &Event) -> Option<&str> {
    event.tags.iter().find_map(|t| {
        let tag_vec = t.as_slice();
        if tag_vec.len() >= 2 && tag_vec[0] == NETWORK_TAG_KEY {
            Some(tag_vec[1].as_str())
        } else {
            None
        }
    })
}

/// Parse a Nostr event into the option it announces.
pub fn parse_option_event(event: &Event) -> Result<NftOption, String> {
    let announcement: OptionAnnouncement = serde_json::from_str(&event.content)
        .map_err(|e| format!("failed to parse option announcement: {e}"))?;
    if announcement.version != ANNOUNCEMENT_VERSION {
        return Err(format!(
            "unsupported announcement version {}",
            announcement.version
        ));
    }
    Ok(announcement.option)
}
