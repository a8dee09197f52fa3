//! In-memory collaborators and fixtures for tests.
//!
//! Enabled for this crate's own tests and, through the `testing` feature,
//! for dependents that want to drive an `OptionsNode` without a relay.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ServiceError;
use crate::option::{Collection, NftOption};
use crate::service::{AddressResolver, Clock, OptionService};

/// A draft that passes validation on `today`.
pub fn valid_draft(today: NaiveDate) -> NftOption {
    NftOption {
        collection: Some(Collection::CryptoPunks),
        nft_option_url: "https://x".to_string(),
        nft_image_url: "https://y".to_string(),
        strike_price: 10,
        amount: 2,
        expiration_date: today.succ_opt(),
    }
}

/// A call received by [`MockOptionService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCall {
    List,
    Create,
}

/// Option service backed by a vector. Created options are appended so a
/// following list call sees them.
#[derive(Default)]
pub struct MockOptionService {
    options: Mutex<Vec<NftOption>>,
    created: Mutex<Vec<NftOption>>,
    calls: Mutex<Vec<ServiceCall>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
}

impl MockOptionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Vec<NftOption>) -> Self {
        let service = Self::default();
        service.set_options(options);
        service
    }

    pub fn set_options(&self, options: Vec<NftOption>) {
        *self.options.lock().expect("options lock") = options;
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Every call received, in order, including failed ones.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: ServiceCall) {
        self.calls.lock().expect("calls lock").push(call);
    }

    /// Options accepted by `create_option`, in call order.
    pub fn created(&self) -> Vec<NftOption> {
        self.created.lock().expect("created lock").clone()
    }
}

#[async_trait]
impl OptionService for MockOptionService {
    async fn list_options(&self) -> Result<Vec<NftOption>, ServiceError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.record(ServiceCall::List);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ServiceError::Transport("mock list failure".to_string()));
        }
        Ok(self.options.lock().expect("options lock").clone())
    }

    async fn create_option(&self, option: &NftOption) -> Result<(), ServiceError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.record(ServiceCall::Create);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ServiceError::Rejected("mock create failure".to_string()));
        }
        self.created
            .lock()
            .expect("created lock")
            .push(option.clone());
        self.options
            .lock()
            .expect("options lock")
            .push(option.clone());
        Ok(())
    }
}

/// Address resolver returning a fixed result and counting calls.
pub struct MockResolver {
    address: Option<String>,
    calls: AtomicUsize,
}

impl MockResolver {
    pub fn new(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            address: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressResolver for MockResolver {
    async fn resolve_address(&self) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.address
            .clone()
            .ok_or_else(|| ServiceError::Transport("wallet not connected".to_string()))
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
