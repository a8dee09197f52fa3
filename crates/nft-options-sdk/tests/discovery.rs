use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use nft_options_sdk::testing::{FixedClock, valid_draft};
use nft_options_sdk::{
    Collection, DirectoryState, DiscoveryConfig, NostrIdentity, NostrOptionService,
    OptionService, OptionsNode, SubmitOutcome, build_option_event,
};
use nostr_relay_builder::prelude::*;
use nostr_sdk::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

fn config_for(relay_url: impl std::fmt::Display) -> DiscoveryConfig {
    DiscoveryConfig {
        fetch_timeout: Duration::from_secs(5),
        ..DiscoveryConfig::for_relays([relay_url.to_string()])
    }
}

fn config_on(relay_url: impl std::fmt::Display, network_tag: &str) -> DiscoveryConfig {
    DiscoveryConfig {
        network_tag: network_tag.to_string(),
        ..config_for(relay_url)
    }
}

#[tokio::test]
async fn create_then_list_roundtrip() {
    let mock = MockRelay::run().await.unwrap();
    let relay_url = mock.url();

    let keys = Keys::generate();
    let service = NostrOptionService::connect(keys, config_for(&relay_url))
        .await
        .unwrap();

    let option = valid_draft(today());
    service.create_option(&option).await.unwrap();

    // Small delay to let the relay process
    tokio::time::sleep(Duration::from_millis(200)).await;

    let listed = service.list_options().await.unwrap();
    assert_eq!(listed, vec![option]);

    service.disconnect().await;
}

#[tokio::test]
async fn unparseable_events_are_skipped() {
    let mock = MockRelay::run().await.unwrap();
    let relay_url = mock.url();

    let keys = Keys::generate();
    let client = Client::new(keys.clone());
    client.add_relay(&relay_url).await.unwrap();
    client.connect().await;

    let junk = EventBuilder::new(nft_options_sdk::APP_EVENT_KIND, "not an option")
        .tags(vec![
            Tag::hashtag(nft_options_sdk::OPTION_TAG),
            Tag::custom(
                TagKind::custom(nft_options_sdk::NETWORK_TAG_KEY),
                vec![nft_options_sdk::NETWORK_TAG.to_string()],
            ),
        ])
        .sign_with_keys(&keys)
        .unwrap();
    client.send_event(junk).await.unwrap();

    let mut option = valid_draft(today());
    option.collection = Some(Collection::Goblintown);
    let good = build_option_event(&keys, &option, "ethereum").unwrap();
    client.send_event(good).await.unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;

    let service = NostrOptionService::new(client, keys, config_for(&relay_url));
    let listed = service.list_options().await.unwrap();
    assert_eq!(listed, vec![option]);

    service.disconnect().await;
}

#[tokio::test]
async fn listing_is_scoped_to_the_network_tag() {
    let mock = MockRelay::run().await.unwrap();
    let relay_url = mock.url();

    let mainnet = NostrOptionService::connect(Keys::generate(), config_for(&relay_url))
        .await
        .unwrap();
    let sepolia = NostrOptionService::connect(Keys::generate(), config_on(&relay_url, "sepolia"))
        .await
        .unwrap();

    let mut mainnet_option = valid_draft(today());
    mainnet_option.collection = Some(Collection::CryptoPunks);
    let mut sepolia_option = valid_draft(today());
    sepolia_option.collection = Some(Collection::TrollTown);

    mainnet.create_option(&mainnet_option).await.unwrap();
    sepolia.create_option(&sepolia_option).await.unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(mainnet.list_options().await.unwrap(), vec![mainnet_option]);
    assert_eq!(sepolia.list_options().await.unwrap(), vec![sepolia_option]);

    mainnet.disconnect().await;
    sepolia.disconnect().await;
}

#[tokio::test]
async fn node_over_relay() {
    let mock = MockRelay::run().await.unwrap();
    let relay_url = mock.url();

    let keys = Keys::generate();
    let npub = keys.public_key().to_bech32().unwrap();
    let service = NostrOptionService::connect(keys.clone(), config_for(&relay_url))
        .await
        .unwrap();
    let node = OptionsNode::with_clock(
        Arc::new(service),
        Arc::new(NostrIdentity::new(keys)),
        FixedClock(today()),
    );

    node.start().await.unwrap();
    assert_eq!(node.directory().current(), DirectoryState::Loaded(vec![]));
    assert_eq!(node.identity().current(), npub);

    let option = valid_draft(today());
    node.open_creation().unwrap();
    node.update_field(nft_options_sdk::FieldUpdate::Collection(option.collection))
        .unwrap();
    node.update_field(nft_options_sdk::FieldUpdate::NftOptionUrl(
        option.nft_option_url.clone(),
    ))
    .unwrap();
    node.update_field(nft_options_sdk::FieldUpdate::NftImageUrl(
        option.nft_image_url.clone(),
    ))
    .unwrap();
    node.update_field(nft_options_sdk::FieldUpdate::StrikePrice(option.strike_price))
        .unwrap();
    node.update_field(nft_options_sdk::FieldUpdate::Amount(option.amount))
        .unwrap();
    node.set_expiration(option.expiration_date).unwrap();

    assert_eq!(node.submit_creation().await.unwrap(), SubmitOutcome::Created);
    assert_eq!(
        node.directory().current(),
        DirectoryState::Loaded(vec![option])
    );

    node.service().disconnect().await;
}
