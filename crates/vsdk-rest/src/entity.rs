//! Behaviour shared by every REST entity model

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::fetching::FetchingInfo;
use crate::identity::Identity;
use crate::session::current_session;

/// An object of the controller's object graph.
///
/// `fetch`, `save` and `delete` go through the current session; see
/// [`crate::Session::set_current`].
#[async_trait]
pub trait RestEntity: Serialize + DeserializeOwned + Send + Sync {
    const IDENTITY: Identity;

    /// Controller-assigned ID; empty until the entity was created
    fn identifier(&self) -> &str;

    fn set_identifier(&mut self, id: String);

    /// Whether this is the root of the object graph. Children of the root
    /// are listed directly under the API base URL.
    fn is_root(&self) -> bool {
        false
    }

    async fn fetch(&mut self) -> Result<()> {
        current_session()?.fetch_entity(self).await
    }

    async fn save(&mut self) -> Result<()> {
        current_session()?.save_entity(self).await
    }

    async fn delete(&self) -> Result<()> {
        current_session()?.delete_entity(self).await
    }
}

/// List the `C` children of `parent` through the current session
pub async fn fetch_children<P: RestEntity, C: RestEntity>(
    parent: &P,
    info: Option<&mut FetchingInfo>,
) -> Result<Vec<C>> {
    current_session()?.fetch_children(parent, info).await
}

/// Create `child` under `parent` through the current session
pub async fn create_child<P: RestEntity, C: RestEntity>(parent: &P, child: &mut C) -> Result<()> {
    current_session()?.create_child(parent, child).await
}
