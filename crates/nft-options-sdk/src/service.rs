//! Collaborator ports consumed by the node.
//!
//! The option service and the wallet address lookup live outside this crate;
//! the node only sees them through these traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ServiceError;
use crate::option::NftOption;

/// Remote store of option records.
#[async_trait]
pub trait OptionService: Send + Sync {
    /// All persisted options, in the order the service returns them.
    async fn list_options(&self) -> Result<Vec<NftOption>, ServiceError>;

    /// Persist a new option.
    async fn create_option(&self, option: &NftOption) -> Result<(), ServiceError>;
}

/// Lookup of the connected wallet's address.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve_address(&self) -> Result<String, ServiceError>;
}

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Fixed address, for setups where the wallet is known up front.
#[derive(Debug, Clone)]
pub struct StaticAddress(pub String);

#[async_trait]
impl AddressResolver for StaticAddress {
    async fn resolve_address(&self) -> Result<String, ServiceError> {
        Ok(self.0.clone())
    }
}
