use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GlobalMetadata, Metadata, MetadataTag};

/// Audit record of a change made on the controller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLog {
    #[serde(rename = "ID", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "parentID", default, skip_serializing_if = "String::is_empty")]
    pub parent_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(rename = "requestID", default, skip_serializing_if = "String::is_empty")]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub diff: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub enterprise: String,
    /// Snapshots of the objects the event touched
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Value>,
    #[serde(rename = "entityID", default, skip_serializing_if = "String::is_empty")]
    pub entity_id: String,
    #[serde(rename = "entityParentID", default, skip_serializing_if = "String::is_empty")]
    pub entity_parent_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entity_parent_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entity_scope: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_updated_by: String,
    /// Milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_received_time: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(rename = "externalID", default, skip_serializing_if = "String::is_empty")]
    pub external_id: String,
}

impl_rest_entity!(EventLog, "eventlog", "eventlogs");

impl_children!(EventLog {
    metadata_tags, create_metadata_tag => MetadataTag;
    metadatas, create_metadata => Metadata;
    global_metadatas, create_global_metadata => GlobalMetadata;
});
