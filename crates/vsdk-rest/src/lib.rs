//! REST entity models for the VSD controller API
//!
//! Models mirror the controller's object graph. Each one knows its
//! [`Identity`] and delegates fetch / save / delete and children listing to
//! the current [`Session`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use vsdk_rest::prelude::*;
//!
//! # async fn demo() -> vsdk_rest::Result<()> {
//! let session = Arc::new(Session::from_env()?);
//! session.start().await?;
//! session.set_current();
//!
//! let me = session.root()?;
//! let mut tag = MetadataTag::new("web");
//! me.create_metadata_tag(&mut tag).await?;
//!
//! tag.description = "web tier".to_string();
//! tag.save().await?;
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod fetching;
pub mod identity;
pub mod models;
pub mod session;

pub use entity::RestEntity;
pub use error::{RestError, Result};
pub use fetching::FetchingInfo;
pub use identity::Identity;
pub use session::{clear_current_session, current_session, Session, SessionConfig};

pub mod prelude {
    pub use crate::entity::RestEntity;
    pub use crate::error::RestError;
    pub use crate::fetching::FetchingInfo;
    pub use crate::models::{Enterprise, EventLog, GlobalMetadata, Me, Metadata, MetadataTag};
    pub use crate::session::{current_session, Session, SessionConfig};
}
