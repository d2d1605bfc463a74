//! Errors returned by the VRS connection API

use thiserror::Error;

use crate::entity::{Event, EventCategory, State, SubState};
use crate::ovsdb::OvsdbError;

/// VRS API errors: local precondition failures, or an [`OvsdbError`]
/// wrapped with what was being attempted.
#[derive(Error, Debug)]
pub enum VrsError {
    // ========================================================================
    // Preconditions
    // ========================================================================
    #[error("Uuid absent")]
    MissingUuid,

    #[error("Name absent")]
    MissingName,

    #[error("{uuid} port {port} not found")]
    PortNotFound { uuid: String, port: String },

    #[error("Invalid event {event} for event category {category}")]
    InvalidEvent {
        category: EventCategory,
        event: Event,
    },

    #[error("Invalid OVSDB endpoint: {0}")]
    InvalidEndpoint(String),

    // ========================================================================
    // Connection
    // ========================================================================
    #[error("Unable to connect to VRS at {endpoint}: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: OvsdbError,
    },

    #[error("VRS does not serve the {0} database")]
    DatabaseMissing(String),

    // ========================================================================
    // Entity operations
    // ========================================================================
    #[error("Problem adding entity info to VRS: {0}")]
    CreateEntity(#[source] OvsdbError),

    #[error("Unable to delete the entity from VRS: {0}")]
    DestroyEntity(#[source] OvsdbError),

    #[error("Unable to get port information for entity {uuid}: {source}")]
    ReadPorts {
        uuid: String,
        #[source]
        source: OvsdbError,
    },

    #[error("Unable to add port {uuid} {port}: {source}")]
    AddPort {
        uuid: String,
        port: String,
        #[source]
        source: OvsdbError,
    },

    #[error("Unable to remove port {uuid} {port}: {source}")]
    RemovePort {
        uuid: String,
        port: String,
        #[source]
        source: OvsdbError,
    },

    #[error("Unable to update the state {uuid} {state} {sub_state}: {source}")]
    SetState {
        uuid: String,
        state: State,
        sub_state: SubState,
        #[source]
        source: OvsdbError,
    },

    #[error("Unable to send the event {uuid} {category} {event}: {source}")]
    PostEvent {
        uuid: String,
        category: EventCategory,
        event: Event,
        #[source]
        source: OvsdbError,
    },

    #[error("Unable to update the metadata {uuid}: {source}")]
    SetMetadata {
        uuid: String,
        #[source]
        source: OvsdbError,
    },

    #[error("Unable to obtain the entity uuids: {0}")]
    ListEntities(#[source] OvsdbError),

    // ========================================================================
    // Port operations
    // ========================================================================
    #[error("Problem adding port {name} to VRS: {source}")]
    CreatePort {
        name: String,
        #[source]
        source: OvsdbError,
    },

    #[error("Unable to delete port {name} from VRS: {source}")]
    DestroyPort {
        name: String,
        #[source]
        source: OvsdbError,
    },

    #[error("Unable to update port {name}: {source}")]
    UpdatePort {
        name: String,
        #[source]
        source: OvsdbError,
    },

    #[error("Unable to read port {name}: {source}")]
    ReadPort {
        name: String,
        #[source]
        source: OvsdbError,
    },

    #[error("Unable to obtain the port names: {0}")]
    ListPorts(#[source] OvsdbError),
}

impl VrsError {
    /// True for errors raised before anything was sent to the VRS
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            VrsError::MissingUuid
                | VrsError::MissingName
                | VrsError::PortNotFound { .. }
                | VrsError::InvalidEvent { .. }
                | VrsError::InvalidEndpoint(_)
        )
    }

    /// The underlying OVSDB failure, if any
    pub fn ovsdb_error(&self) -> Option<&OvsdbError> {
        match self {
            VrsError::Connection { source, .. }
            | VrsError::ReadPorts { source, .. }
            | VrsError::AddPort { source, .. }
            | VrsError::RemovePort { source, .. }
            | VrsError::SetState { source, .. }
            | VrsError::PostEvent { source, .. }
            | VrsError::SetMetadata { source, .. }
            | VrsError::CreatePort { source, .. }
            | VrsError::DestroyPort { source, .. }
            | VrsError::UpdatePort { source, .. }
            | VrsError::ReadPort { source, .. } => Some(source),
            VrsError::CreateEntity(source)
            | VrsError::DestroyEntity(source)
            | VrsError::ListEntities(source)
            | VrsError::ListPorts(source) => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for the VRS API
pub type Result<T> = std::result::Result<T, VrsError>;
