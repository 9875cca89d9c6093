pub mod core;
pub mod contacts;

pub use crate::core::{
    error::{self, Error},
    digest,
    config,
    default_configuration as configuration,
    http_client::{self, HttpClient},
};

pub use crate::contacts::{
    contact::{self, Contact, ContactBuilder, MatchState},
    contact_store::{self, ContactStore, Container},
    memory_store::{self, MemoryContactStore},
    sqlite_store::{self, SqliteContactStore},
    repository::{self, ContactRepository},
    workflow::{self, MatchWorkflow},
    workflow_listener::{self, WorkflowListener},
};
