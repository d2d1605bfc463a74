use serde::{Deserialize, Serialize};

use super::{EventLog, GlobalMetadata, Metadata, MetadataTag};

/// An organization hosting domains, users and policies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enterprise {
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
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entity_scope: String,
    #[serde(rename = "enterpriseProfileID", default, skip_serializing_if = "String::is_empty")]
    pub enterprise_profile_id: String,
    #[serde(rename = "customerID", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(rename = "localAS", default, skip_serializing_if = "Option::is_none")]
    pub local_as: Option<i64>,
    #[serde(rename = "floatingIPsQuota", default, skip_serializing_if = "Option::is_none")]
    pub floating_ips_quota: Option<i64>,
    #[serde(rename = "floatingIPsUsed", default, skip_serializing_if = "Option::is_none")]
    pub floating_ips_used: Option<i64>,
    #[serde(default)]
    pub allow_gateway_management: bool,
    #[serde(default)]
    pub allow_advanced_qos_configuration: bool,
    #[serde(rename = "externalID", default, skip_serializing_if = "String::is_empty")]
    pub external_id: String,
}

impl_rest_entity!(Enterprise, "enterprise", "enterprises");

impl_children!(Enterprise {
    metadata_tags, create_metadata_tag => MetadataTag;
    metadatas, create_metadata => Metadata;
    global_metadatas, create_global_metadata => GlobalMetadata;
    event_logs, create_event_log => EventLog;
});
