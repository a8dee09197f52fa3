//! `OptionsNode`: root coordinator.
//!
//! Owns the option service, the address resolver, the option directory, the
//! identity binding and the creation workflow behind a single `&self` API.
//! The workflow lock is never held across an `.await`, so the `Submitting`
//! state stays observable while a create call is pending.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::directory::OptionDirectory;
use crate::error::NodeError;
use crate::identity::IdentityBinding;
use crate::option::FieldUpdate;
use crate::service::{AddressResolver, Clock, OptionService, SystemClock};
use crate::workflow::{CreationView, CreationWorkflow, SubmitOutcome, SubmitStep};

// ── Struct ──────────────────────────────────────────────────────────────────

pub struct OptionsNode<S: ?Sized, R: ?Sized, C = SystemClock> {
    service: Arc<S>,
    resolver: Arc<R>,
    clock: C,
    directory: OptionDirectory,
    identity: IdentityBinding,
    workflow: Mutex<CreationWorkflow>,
    started: AtomicBool,
}

// ── Construction ────────────────────────────────────────────────────────────

impl<S, R> OptionsNode<S, R, SystemClock>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
{
    pub fn new(service: Arc<S>, resolver: Arc<R>) -> Self {
        Self::with_clock(service, resolver, SystemClock)
    }
}

impl<S, R, C> OptionsNode<S, R, C>
where
    S: OptionService + ?Sized,
    R: AddressResolver + ?Sized,
    C: Clock,
{
    pub fn with_clock(service: Arc<S>, resolver: Arc<R>, clock: C) -> Self {
        Self {
            service,
            resolver,
            clock,
            directory: OptionDirectory::new(),
            identity: IdentityBinding::new(),
            workflow: Mutex::new(CreationWorkflow::new()),
            started: AtomicBool::new(false),
        }
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn directory(&self) -> &OptionDirectory {
        &self.directory
    }

    pub fn identity(&self) -> &IdentityBinding {
        &self.identity
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ── Loading ─────────────────────────────────────────────────────────

    /// Initial load. Runs `refresh_all` until it first succeeds and returns
    /// whether it ran. A failed load leaves the node unstarted.
    pub async fn start(&self) -> Result<bool, NodeError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Ok(false);
        }
        log::info!("starting options node");
        if let Err(e) = self.refresh_all().await {
            self.started.store(false, Ordering::SeqCst);
            return Err(e);
        }
        Ok(true)
    }

    /// Resolve the wallet address and refresh the directory concurrently.
    ///
    /// Address failures degrade to "unresolved"; a listing failure is
    /// returned and leaves the previous directory snapshot in place.
    pub async fn refresh_all(&self) -> Result<(), NodeError> {
        let ((), listed) = tokio::join!(
            self.identity.resolve(self.resolver.as_ref()),
            self.directory.refresh(self.service.as_ref()),
        );
        match listed {
            Ok(count) => {
                log::info!("loaded {count} options");
                Ok(())
            }
            Err(e) => {
                log::warn!("option listing failed: {e}");
                Err(e.into())
            }
        }
    }

    // ── Creation workflow ───────────────────────────────────────────────

    fn with_workflow<T>(&self, f: impl FnOnce(&mut CreationWorkflow) -> T) -> Result<T, NodeError> {
        let mut guard = self.workflow.lock().map_err(|_| NodeError::MutexPoisoned)?;
        Ok(f(&mut *guard))
    }

    pub fn open_creation(&self) -> Result<(), NodeError> {
        Ok(self.with_workflow(|w| w.open())??)
    }

    pub fn update_field(&self, update: FieldUpdate) -> Result<(), NodeError> {
        Ok(self.with_workflow(|w| w.apply(update))??)
    }

    pub fn set_expiration(&self, date: Option<NaiveDate>) -> Result<(), NodeError> {
        Ok(self.with_workflow(|w| w.set_expiration(date))??)
    }

    pub fn cancel_creation(&self) -> Result<(), NodeError> {
        Ok(self.with_workflow(|w| w.cancel())??)
    }

    pub fn creation_view(&self) -> Result<CreationView, NodeError> {
        let today = self.today();
        self.with_workflow(|w| w.view(today))
    }

    /// Submit the open draft.
    ///
    /// An invalid draft is flagged and nothing is sent. A valid draft is
    /// created through the option service, the dialog closes, and
    /// `refresh_all` runs.
    ///
    /// **Non-atomic:** if the create succeeds but the following refresh
    /// fails, the refresh error is returned even though the option exists
    /// and the dialog has closed. Call [`refresh_all`](Self::refresh_all)
    /// to retry the listing.
    pub async fn submit_creation(&self) -> Result<SubmitOutcome, NodeError> {
        let today = self.today();
        let draft = match self.with_workflow(|w| w.begin_submit(today))?? {
            SubmitStep::Rejected(errors) => {
                log::debug!("draft rejected: {:?}", errors.fields());
                return Ok(SubmitOutcome::Rejected(errors));
            }
            SubmitStep::Send(draft) => draft,
        };

        let result = self.service.create_option(&draft).await;
        if let Err(e) = &result {
            log::warn!("create option failed: {e}");
        }
        let outcome = self.with_workflow(|w| w.complete_submit(result))??;

        log::info!(
            "created option for {}",
            draft
                .collection
                .map(|c| c.as_str())
                .unwrap_or_default()
        );
        self.refresh_all().await?;
        Ok(outcome)
    }
}
