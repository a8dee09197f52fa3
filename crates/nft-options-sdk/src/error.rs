use thiserror::Error;

/// Failure reported by a collaborator (option service or address resolver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to parse service response: {0}")]
    Parse(String),

    #[error("rejected by backing store: {0}")]
    Rejected(String),
}

/// Illegal use of the creation workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("creation dialog is not open")]
    NotOpen,

    #[error("creation dialog is already open")]
    AlreadyOpen,

    #[error("draft cannot be edited while submitting")]
    NotEditing,

    #[error("a submission is already in flight")]
    SubmitInFlight,

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidFieldValue { field: &'static str, reason: String },
}

/// Errors produced by [`OptionsNode`](crate::node::OptionsNode) and workflow submissions.
#[derive(Debug)]
pub enum NodeError {
    /// The workflow mutex was poisoned by a prior panic.
    MutexPoisoned,
    /// The requested workflow transition is not legal in the current state.
    Workflow(WorkflowError),
    /// A collaborator call failed.
    Service(ServiceError),
}

impl std::fmt::Display for NodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeError::MutexPoisoned => write!(f, "internal mutex poisoned by a prior panic"),
            NodeError::Workflow(e) => write!(f, "workflow error: {e}"),
            NodeError::Service(e) => write!(f, "service error: {e}"),
        }
    }
}

impl std::error::Error for NodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NodeError::Workflow(e) => Some(e),
            NodeError::Service(e) => Some(e),
            NodeError::MutexPoisoned => None,
        }
    }
}

impl From<WorkflowError> for NodeError {
    fn from(e: WorkflowError) -> Self {
        NodeError::Workflow(e)
    }
}

impl From<ServiceError> for NodeError {
    fn from(e: ServiceError) -> Self {
        NodeError::Service(e)
    }
}
