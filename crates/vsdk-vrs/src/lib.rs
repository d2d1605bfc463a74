//! Entity and port lifecycle management for the Nuage VRS
//!
//! Talks to the ovsdb-server of the local Virtual Routing and Switching
//! agent and manages rows in `Nuage_VM_Table` and `Nuage_Port_Table`.
//!
//! ```no_run
//! use vsdk_vrs::prelude::*;
//!
//! # async fn demo() -> vsdk_vrs::Result<()> {
//! let vrs = VrsConnection::unix("/var/run/openvswitch/db.sock").await?;
//! vrs.create_entity(&EntityInfo {
//!     uuid: "0f8b2c1e-5a34-4c1d-9a0e-2b6f7d3c8e41".into(),
//!     name: "web-1".into(),
//!     ..Default::default()
//! })
//! .await?;
//! vrs.post_entity_event(
//!     "0f8b2c1e-5a34-4c1d-9a0e-2b6f7d3c8e41",
//!     EventCategory::Started,
//!     Event::STARTED_BOOTED,
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod entity;
pub mod entity_api;
pub mod error;
pub mod ovsdb;
pub mod port_api;

pub use connection::{VrsConfig, VrsConnection};
pub use entity::{Domain, EntityType, Event, EventCategory, MetadataKey, State, SubState};
pub use entity_api::EntityInfo;
pub use error::{Result, VrsError};
pub use ovsdb::OvsdbError;
pub use port_api::{PortInfo, PortState};

pub mod prelude {
    pub use crate::connection::{VrsConfig, VrsConnection};
    pub use crate::entity::{
        validate_event, Domain, EntityType, Event, EventCategory, MetadataKey, State, SubState,
    };
    pub use crate::entity_api::EntityInfo;
    pub use crate::error::VrsError;
    pub use crate::port_api::{PortInfo, PortState};
}
