//! Presentation-facing commands.
//!
//! Each command mutates the node, publishes a fresh [`AppState`] and returns
//! it. Errors cross this boundary as display strings.

use nft_options_sdk::{
    AddressResolver, Clock, FieldUpdate, OptionService, SubmitOutcome, parse_date,
};
use serde::Serialize;

use crate::state::{AppState, AppStateManager};

/// Response to `save_option`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    /// `false` when validation kept the dialog open.
    pub created: bool,
    pub state: AppState,
}

/// Initial load: resolve the address and fetch the listing once.
pub async fn initialize<S, R, C>(manager: &AppStateManager<S, R, C>) -> Result<AppState, String>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
    C: Clock,
{
    let started = manager.node().start().await;
    let state = manager.publish().map_err(|e| e.to_string())?;
    started.map_err(|e| e.to_string())?;
    Ok(state)
}

pub fn get_app_state<S, R, C>(manager: &AppStateManager<S, R, C>) -> Result<AppState, String>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
    C: Clock,
{
    manager.snapshot().map_err(|e| e.to_string())
}

pub async fn refresh_options<S, R, C>(
    manager: &AppStateManager<S, R, C>,
) -> Result<AppState, String>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
    C: Clock,
{
    manager
        .node()
        .refresh_all()
        .await
        .map_err(|e| format!("refresh failed: {e}"))?;
    manager.publish().map_err(|e| e.to_string())
}

pub fn open_create_option<S, R, C>(manager: &AppStateManager<S, R, C>) -> Result<AppState, String>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
    C: Clock,
{
    manager.node().open_creation().map_err(|e| e.to_string())?;
    manager.publish().map_err(|e| e.to_string())
}

/// Keyed form input, e.g. `("strikePrice", "150")`.
pub fn update_create_field<S, R, C>(
    manager: &AppStateManager<S, R, C>,
    name: &str,
    value: &str,
) -> Result<AppState, String>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
    C: Clock,
{
    let update = FieldUpdate::from_input(name, value).map_err(|e| e.to_string())?;
    manager
        .node()
        .update_field(update)
        .map_err(|e| e.to_string())?;
    manager.publish().map_err(|e| e.to_string())
}

/// Date picker input as `YYYY-MM-DD`; `None` or blank clears the date.
pub fn set_create_expiration<S, R, C>(
    manager: &AppStateManager<S, R, C>,
    date: Option<&str>,
) -> Result<AppState, String>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
    C: Clock,
{
    let date = parse_date(date.unwrap_or_default())
        .map_err(|e| format!("invalid expiration date: {e}"))?;
    manager
        .node()
        .set_expiration(date)
        .map_err(|e| e.to_string())?;
    manager.publish().map_err(|e| e.to_string())
}

pub fn cancel_create_option<S, R, C>(
    manager: &AppStateManager<S, R, C>,
) -> Result<AppState, String>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
    C: Clock,
{
    manager.node().cancel_creation().map_err(|e| e.to_string())?;
    manager.publish().map_err(|e| e.to_string())
}

/// Submit the open draft. A service failure is returned after the new state
/// (dialog still open, not in flight) has been published.
pub async fn save_option<S, R, C>(
    manager: &AppStateManager<S, R, C>,
) -> Result<SaveResponse, String>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
    C: Clock,
{
    let outcome = manager.node().submit_creation().await;
    let state = manager.publish().map_err(|e| e.to_string())?;
    let created = match outcome.map_err(|e| e.to_string())? {
        SubmitOutcome::Created => true,
        SubmitOutcome::Rejected(_) => false,
    };
    Ok(SaveResponse { created, state })
}
