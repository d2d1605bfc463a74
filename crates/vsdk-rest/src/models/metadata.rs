use serde::{Deserialize, Serialize};

use super::{EventLog, GlobalMetadata, MetadataTag};

/// Free-form blob attached to an object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(rename = "ID", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "parentID", default, skip_serializing_if = "String::is_empty")]
    pub parent_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_updated_by: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "metadataTagIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub metadata_tag_ids: Vec<String>,
    #[serde(default)]
    pub network_notification_disabled: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub blob: String,
    #[serde(default)]
    pub global_metadata: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entity_scope: String,
    #[serde(rename = "externalID", default, skip_serializing_if = "String::is_empty")]
    pub external_id: String,
}

impl_rest_entity!(Metadata, "metadata", "metadatas");

impl_children!(Metadata {
    metadata_tags, create_metadata_tag => MetadataTag;
    global_metadatas, create_global_metadata => GlobalMetadata;
    event_logs, create_event_log => EventLog;
});
