use serde::{Deserialize, Serialize};

use super::{Enterprise, EventLog, GlobalMetadata, MetadataTag};

/// The authenticated user; root of the object graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Me {
    #[serde(rename = "ID", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "parentID", default, skip_serializing_if = "String::is_empty")]
    pub parent_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(rename = "enterpriseID", default, skip_serializing_if = "String::is_empty")]
    pub enterprise_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub enterprise_name: String,
    #[serde(rename = "APIKey", default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    /// Expiry of the API key, milliseconds since the epoch
    #[serde(rename = "APIKeyExpiry", default, skip_serializing_if = "Option::is_none")]
    pub api_key_expiry: Option<i64>,
    #[serde(rename = "externalID", default, skip_serializing_if = "String::is_empty")]
    pub external_id: String,
}

impl_rest_entity!(root Me, "me", "me");

impl_children!(Me {
    enterprises, create_enterprise => Enterprise;
    metadata_tags, create_metadata_tag => MetadataTag;
    global_metadatas, create_global_metadata => GlobalMetadata;
    event_logs, create_event_log => EventLog;
});
