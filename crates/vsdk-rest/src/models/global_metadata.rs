use serde::{Deserialize, Serialize};

use super::{EventLog, Metadata, MetadataTag};

/// Metadata visible across enterprises
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMetadata {
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

impl_rest_entity!(GlobalMetadata, "globalmetadata", "globalmetadatas");

impl_children!(GlobalMetadata {
    metadata_tags, create_metadata_tag => MetadataTag;
    metadatas, create_metadata => Metadata;
    event_logs, create_event_log => EventLog;
});
