pub mod directory;
pub mod discovery;
pub mod error;
pub mod identity;
pub mod node;
pub mod option;
pub mod service;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod validation;
pub mod workflow;

// Core types
pub use directory::{DirectoryState, OptionDirectory};
pub use error::{NodeError, ServiceError, WorkflowError};
pub use identity::{IdentityBinding, short_address};
pub use node::OptionsNode;
pub use option::{Collection, DATE_FORMAT, Field, FieldUpdate, MAX_QUANTITY, NftOption, parse_date};
pub use validation::{FieldErrors, is_valid, validate};
pub use workflow::{CreationState, CreationView, CreationWorkflow, SubmitOutcome, SubmitStep};

// Collaborator ports
pub use service::{AddressResolver, Clock, OptionService, StaticAddress, SystemClock};

// Nostr transport
pub use discovery::{
    // Constants
    APP_EVENT_KIND,
    DEFAULT_FETCH_TIMEOUT,
    DEFAULT_RELAYS,
    NETWORK_TAG,
    NETWORK_TAG_KEY,
    OPTION_TAG,
    // Types
    DiscoveryConfig,
    NostrIdentity,
    NostrOptionService,
    OptionAnnouncement,
    // Builders
    build_option_event,
    build_option_filter,
    event_network,
    parse_option_event,
    // Relay helpers
    connect_client,
    publish_event,
};

// Re-export nostr for app-layer key handling
pub use nostr_sdk;
