//! State machine behind the "create option" dialog.
//!
//! ```text
//! Closed --open--> Editing(empty)
//! Editing --edit--> Editing
//! Editing --cancel--> Closed
//! Editing --submit(invalid)--> Editing (errors shown)
//! Editing --submit(valid)--> Submitting --ok--> Closed
//!                                       --err--> Submitting (retry or cancel)
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ServiceError, WorkflowError};
use crate::option::{FieldUpdate, NftOption};
use crate::validation::{FieldErrors, validate};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CreationState {
    #[default]
    Closed,
    Editing {
        draft: NftOption,
        /// Gates field error display; cleared only when the draft is discarded.
        submit_attempted: bool,
    },
    Submitting {
        draft: NftOption,
        /// `false` once the create call has failed and awaits retry or cancel.
        in_flight: bool,
    },
}

/// First half of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStep {
    /// The draft is invalid; nothing is sent.
    Rejected(FieldErrors),
    /// Send this draft to the option service, then call `complete_submit`.
    Send(NftOption),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; the dialog stays open with these fields flagged.
    Rejected(FieldErrors),
    /// The option was persisted and the dialog closed.
    Created,
}

/// Serializable view of the dialog for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationView {
    pub open: bool,
    pub submitting: bool,
    pub draft: Option<NftOption>,
    pub errors: FieldErrors,
    pub submittable: bool,
}

#[derive(Debug, Default)]
pub struct CreationWorkflow {
    state: CreationState,
}

impl CreationWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CreationState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, CreationState::Closed)
    }

    pub fn draft(&self) -> Option<&NftOption> {
        match &self.state {
            CreationState::Closed => None,
            CreationState::Editing { draft, .. } | CreationState::Submitting { draft, .. } => {
                Some(draft)
            }
        }
    }

    pub fn open(&mut self) -> Result<(), WorkflowError> {
        if self.is_open() {
            return Err(WorkflowError::AlreadyOpen);
        }
        self.state = CreationState::Editing {
            draft: NftOption::draft(),
            submit_attempted: false,
        };
        Ok(())
    }

    pub fn apply(&mut self, update: FieldUpdate) -> Result<(), WorkflowError> {
        match &mut self.state {
            CreationState::Editing { draft, .. } => {
                draft.apply(update);
                Ok(())
            }
            CreationState::Submitting { .. } => Err(WorkflowError::NotEditing),
            CreationState::Closed => Err(WorkflowError::NotOpen),
        }
    }

    pub fn set_expiration(&mut self, date: Option<NaiveDate>) -> Result<(), WorkflowError> {
        self.apply(FieldUpdate::ExpirationDate(date))
    }

    /// Discard the draft and close. Not allowed while a create call is pending.
    pub fn cancel(&mut self) -> Result<(), WorkflowError> {
        match self.state {
            CreationState::Closed => Err(WorkflowError::NotOpen),
            CreationState::Submitting { in_flight: true, .. } => Err(WorkflowError::SubmitInFlight),
            _ => {
                self.state = CreationState::Closed;
                Ok(())
            }
        }
    }

    /// Field errors to display: all clear until a submission has been attempted.
    pub fn field_errors(&self, today: NaiveDate) -> FieldErrors {
        match &self.state {
            CreationState::Editing {
                draft,
                submit_attempted: true,
            }
            | CreationState::Submitting { draft, .. } => validate(draft, today),
            _ => FieldErrors::default(),
        }
    }

    pub fn view(&self, today: NaiveDate) -> CreationView {
        let draft = self.draft().cloned();
        CreationView {
            open: self.is_open(),
            submitting: matches!(self.state, CreationState::Submitting { in_flight: true, .. }),
            submittable: draft
                .as_ref()
                .is_some_and(|d| validate(d, today).is_empty()),
            errors: self.field_errors(today),
            draft,
        }
    }

    /// Validate and, if submittable, move to `Submitting`.
    pub fn begin_submit(&mut self, today: NaiveDate) -> Result<SubmitStep, WorkflowError> {
        let draft = match &mut self.state {
            CreationState::Closed => return Err(WorkflowError::NotOpen),
            CreationState::Submitting { in_flight: true, .. } => {
                return Err(WorkflowError::SubmitInFlight);
            }
            CreationState::Editing { draft, .. } | CreationState::Submitting { draft, .. } => {
                std::mem::take(draft)
            }
        };

        let errors = validate(&draft, today);
        if !errors.is_empty() {
            self.state = CreationState::Editing {
                draft,
                submit_attempted: true,
            };
            return Ok(SubmitStep::Rejected(errors));
        }

        self.state = CreationState::Submitting {
            draft: draft.clone(),
            in_flight: true,
        };
        Ok(SubmitStep::Send(draft))
    }

    /// Apply the result of the create call started by `begin_submit`.
    pub fn complete_submit(
        &mut self,
        result: Result<(), ServiceError>,
    ) -> Result<SubmitOutcome, ServiceError> {
        if !matches!(self.state, CreationState::Submitting { in_flight: true, .. }) {
            log::warn!("create result arrived with no submission in flight");
        }
        match result {
            Ok(()) => {
                self.state = CreationState::Closed;
                Ok(SubmitOutcome::Created)
            }
            Err(e) => {
                if let CreationState::Submitting { in_flight, .. } = &mut self.state {
                    *in_flight = false;
                }
                Err(e)
            }
        }
    }
}
