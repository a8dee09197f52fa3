use std::sync::Arc;

use chrono::NaiveDate;
use nft_options_sdk::testing::{
    FixedClock, MockOptionService, MockResolver, ServiceCall, valid_draft,
};
use nft_options_sdk::{
    Collection, DirectoryState, Field, FieldUpdate, NftOption, NodeError,
    OptionsNode, ServiceError, SubmitOutcome, WorkflowError,
};

const ADDRESS: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

type TestNode = OptionsNode<MockOptionService, MockResolver, FixedClock>;

fn node_with(service: MockOptionService, resolver: MockResolver) -> TestNode {
    OptionsNode::with_clock(Arc::new(service), Arc::new(resolver), FixedClock(today()))
}

fn node() -> TestNode {
    node_with(MockOptionService::new(), MockResolver::new(ADDRESS))
}

fn enter(node: &TestNode, draft: &NftOption) {
    node.update_field(FieldUpdate::Collection(draft.collection))
        .unwrap();
    node.update_field(FieldUpdate::NftOptionUrl(draft.nft_option_url.clone()))
        .unwrap();
    node.update_field(FieldUpdate::NftImageUrl(draft.nft_image_url.clone()))
        .unwrap();
    node.update_field(FieldUpdate::StrikePrice(draft.strike_price))
        .unwrap();
    node.update_field(FieldUpdate::Amount(draft.amount)).unwrap();
    node.set_expiration(draft.expiration_date).unwrap();
}

#[tokio::test]
async fn directory_not_loaded_until_first_refresh() {
    let node = node();
    assert_eq!(node.directory().current(), DirectoryState::NotLoaded);
    assert_eq!(node.identity().current(), "");

    assert!(node.start().await.unwrap());

    assert_eq!(node.directory().current(), DirectoryState::Loaded(vec![]));
    assert_eq!(node.identity().current(), ADDRESS);
}

#[tokio::test]
async fn start_runs_once() {
    let node = node();
    assert!(node.start().await.unwrap());
    assert!(!node.start().await.unwrap());
    assert_eq!(node.service().list_calls(), 1);
}

#[tokio::test]
async fn unresolved_address_does_not_block_listing() {
    let existing = valid_draft(today());
    let node = node_with(
        MockOptionService::with_options(vec![existing.clone()]),
        MockResolver::failing(),
    );

    node.start().await.unwrap();

    assert_eq!(node.identity().current(), "");
    assert_eq!(node.directory().current(), DirectoryState::Loaded(vec![existing]));
}

#[tokio::test]
async fn listing_failure_is_reported_and_leaves_directory_unloaded() {
    let service = MockOptionService::new();
    service.fail_list(true);
    let node = node_with(service, MockResolver::new(ADDRESS));

    let err = node.start().await.unwrap_err();

    assert!(matches!(err, NodeError::Service(ServiceError::Transport(_))));
    assert_eq!(node.directory().current(), DirectoryState::NotLoaded);
    assert_eq!(node.identity().current(), ADDRESS);
}

#[tokio::test]
async fn failed_start_can_be_retried() {
    let service = MockOptionService::with_options(vec![valid_draft(today())]);
    service.fail_list(true);
    let node = node_with(service, MockResolver::new(ADDRESS));
    assert!(node.start().await.is_err());

    node.service().fail_list(false);
    assert!(node.start().await.unwrap());
    assert!(!node.start().await.unwrap());

    assert_eq!(node.service().list_calls(), 2);
    assert_eq!(
        node.directory().current(),
        DirectoryState::Loaded(vec![valid_draft(today())])
    );
}

#[tokio::test]
async fn valid_submit_creates_then_refreshes_and_closes() {
    let node = node();
    node.start().await.unwrap();
    let mut rx = node.directory().subscribe();
    rx.borrow_and_update();

    node.open_creation().unwrap();
    let draft = NftOption {
        collection: Some(Collection::CryptoPunks),
        nft_option_url: "https://x".into(),
        nft_image_url: "https://y".into(),
        strike_price: 10,
        amount: 2,
        expiration_date: today().succ_opt(),
    };
    enter(&node, &draft);
    assert!(node.creation_view().unwrap().submittable);

    let outcome = node.submit_creation().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Created);
    assert_eq!(node.service().create_calls(), 1);
    assert_eq!(node.service().list_calls(), 2);
    assert_eq!(
        node.service().calls(),
        vec![ServiceCall::List, ServiceCall::Create, ServiceCall::List]
    );
    assert_eq!(node.service().created(), vec![draft.clone()]);
    assert!(rx.has_changed().unwrap());
    assert_eq!(node.directory().current(), DirectoryState::Loaded(vec![draft]));

    let view = node.creation_view().unwrap();
    assert!(!view.open);
    assert_eq!(view.draft, None);

    // The next dialog starts from a blank draft.
    node.open_creation().unwrap();
    assert_eq!(node.creation_view().unwrap().draft, Some(NftOption::draft()));
}

#[tokio::test]
async fn invalid_submit_makes_no_calls() {
    let node = node();
    node.open_creation().unwrap();
    let mut draft = valid_draft(today());
    draft.collection = None;
    enter(&node, &draft);

    let outcome = node.submit_creation().await.unwrap();

    let SubmitOutcome::Rejected(errors) = outcome else {
        panic!("expected rejection");
    };
    assert_eq!(errors.fields(), vec![Field::Collection]);
    assert_eq!(node.service().create_calls(), 0);
    assert_eq!(node.service().list_calls(), 0);

    let view = node.creation_view().unwrap();
    assert!(view.open);
    assert!(view.errors.collection);
    assert!(!view.errors.nft_option_url);
    assert_eq!(view.draft, Some(draft));
}

#[tokio::test]
async fn past_expiration_is_rejected() {
    let node = node();
    node.open_creation().unwrap();
    let mut draft = valid_draft(today());
    draft.expiration_date = today().pred_opt();
    enter(&node, &draft);

    let outcome = node.submit_creation().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Rejected(e) if e.expiration_date));
    assert_eq!(node.service().create_calls(), 0);
}

#[tokio::test]
async fn errors_hidden_until_first_submit() {
    let node = node();
    node.open_creation().unwrap();

    let view = node.creation_view().unwrap();
    assert!(view.open);
    assert!(view.errors.is_empty());
    assert!(!view.submittable);

    node.submit_creation().await.unwrap();
    assert!(!node.creation_view().unwrap().errors.is_empty());
}

#[tokio::test]
async fn cancel_discards_edits() {
    let node = node();
    node.open_creation().unwrap();
    enter(&node, &valid_draft(today()));

    node.cancel_creation().unwrap();
    assert!(!node.creation_view().unwrap().open);

    node.open_creation().unwrap();
    assert_eq!(node.creation_view().unwrap().draft, Some(NftOption::draft()));
    assert_eq!(node.service().create_calls(), 0);
}

#[tokio::test]
async fn create_failure_keeps_dialog_and_directory() {
    let existing = valid_draft(today());
    let service = MockOptionService::with_options(vec![existing.clone()]);
    service.fail_create(true);
    let node = node_with(service, MockResolver::new(ADDRESS));
    node.start().await.unwrap();

    node.open_creation().unwrap();
    let mut draft = valid_draft(today());
    draft.collection = Some(Collection::TrollTown);
    enter(&node, &draft);

    let err = node.submit_creation().await.unwrap_err();

    assert!(matches!(err, NodeError::Service(ServiceError::Rejected(_))));
    assert_eq!(node.service().list_calls(), 1);
    assert_eq!(
        node.directory().current(),
        DirectoryState::Loaded(vec![existing.clone()])
    );
    let view = node.creation_view().unwrap();
    assert!(view.open);
    assert!(!view.submitting);
    assert_eq!(view.draft, Some(draft.clone()));

    // Edits stay locked until the user retries or cancels.
    assert!(matches!(
        node.update_field(FieldUpdate::Amount(1)),
        Err(NodeError::Workflow(WorkflowError::NotEditing))
    ));

    node.service().fail_create(false);
    assert_eq!(node.submit_creation().await.unwrap(), SubmitOutcome::Created);
    assert_eq!(
        node.directory().current(),
        DirectoryState::Loaded(vec![existing, draft])
    );
}

#[tokio::test]
async fn refresh_failure_after_create_is_reported() {
    let node = node();
    node.start().await.unwrap();
    node.open_creation().unwrap();
    let draft = valid_draft(today());
    enter(&node, &draft);

    node.service().fail_list(true);
    let err = node.submit_creation().await.unwrap_err();

    assert!(matches!(err, NodeError::Service(ServiceError::Transport(_))));
    assert_eq!(node.service().created(), vec![draft]);
    assert!(!node.creation_view().unwrap().open);
    assert_eq!(node.directory().current(), DirectoryState::Loaded(vec![]));
}

#[tokio::test]
async fn workflow_misuse_is_an_error() {
    let node = node();
    assert!(matches!(
        node.update_field(FieldUpdate::Amount(1)),
        Err(NodeError::Workflow(WorkflowError::NotOpen))
    ));
    assert!(matches!(
        node.submit_creation().await,
        Err(NodeError::Workflow(WorkflowError::NotOpen))
    ));
    node.open_creation().unwrap();
    assert!(matches!(
        node.open_creation(),
        Err(NodeError::Workflow(WorkflowError::AlreadyOpen))
    ));
}

#[tokio::test]
async fn overlapping_refreshes_leave_a_full_snapshot() {
    let service = MockOptionService::with_options(vec![valid_draft(today())]);
    let node = node_with(service, MockResolver::new(ADDRESS));

    let (a, b) = tokio::join!(node.refresh_all(), node.refresh_all());
    a.unwrap();
    b.unwrap();

    assert_eq!(node.service().list_calls(), 2);
    assert_eq!(
        node.directory().current().options().map(|o| o.len()),
        Some(1)
    );
}
