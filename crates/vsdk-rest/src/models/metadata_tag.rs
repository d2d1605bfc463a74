use serde::{Deserialize, Serialize};

use super::{EventLog, GlobalMetadata, Metadata};

/// Label grouping metadata objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataTag {
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
    #[serde(
        rename = "associatedExternalServiceID",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub associated_external_service_id: String,
    #[serde(default)]
    pub auto_created: bool,
    #[serde(rename = "externalID", default, skip_serializing_if = "String::is_empty")]
    pub external_id: String,
}

impl MetadataTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl_rest_entity!(MetadataTag, "metadatatag", "metadatatags");

impl_children!(MetadataTag {
    metadatas, create_metadata => Metadata;
    global_metadatas, create_global_metadata => GlobalMetadata;
    event_logs, create_event_log => EventLog;
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::RestEntity;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let tag = MetadataTag {
            id: "8a1d".to_string(),
            parent_type: "enterprise".to_string(),
            associated_external_service_id: "svc-1".to_string(),
            ..MetadataTag::new("web")
        };

        assert_eq!(
            serde_json::to_value(&tag).unwrap(),
            json!({
                "ID": "8a1d",
                "parentType": "enterprise",
                "name": "web",
                "associatedExternalServiceID": "svc-1",
                "autoCreated": false,
            })
        );
    }

    #[test]
    fn test_decode_controller_reply() {
        let tag: MetadataTag = serde_json::from_value(json!({
            "ID": "8a1d",
            "parentID": "e-1",
            "name": "web",
            "autoCreated": true,
            "lastUpdatedBy": "u-1",
            "creationDate": 1514764800000u64,
        }))
        .unwrap();

        assert_eq!(tag.identifier(), "8a1d");
        assert_eq!(tag.parent_id, "e-1");
        assert!(tag.auto_created);
        assert_eq!(tag.last_updated_by, "u-1");
    }

    #[test]
    fn test_identity() {
        assert_eq!(MetadataTag::IDENTITY.name, "metadatatag");
        assert_eq!(MetadataTag::IDENTITY.category, "metadatatags");

        let mut tag = MetadataTag::new("web");
        assert!(!tag.is_root());
        tag.set_identifier("8a1d".to_string());
        assert_eq!(tag.id, "8a1d");
    }
}
