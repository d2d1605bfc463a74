//! Row layouts of the Nuage tables in the VRS `Open_vSwitch` database

use serde::{Deserialize, Serialize};

use super::value::{OvsMap, OvsSet};

pub const NUAGE_VM_TABLE: &str = "Nuage_VM_Table";
pub const NUAGE_PORT_TABLE: &str = "Nuage_Port_Table";

// Nuage_VM_Table columns
pub const VM_COLUMN_UUID: &str = "vm_uuid";
pub const VM_COLUMN_NAME: &str = "vm_name";
pub const VM_COLUMN_TYPE: &str = "type";
pub const VM_COLUMN_STATE: &str = "state";
pub const VM_COLUMN_REASON: &str = "reason";
pub const VM_COLUMN_EVENT_CATEGORY: &str = "event";
pub const VM_COLUMN_EVENT_TYPE: &str = "event_type";
pub const VM_COLUMN_DOMAIN: &str = "domain";
pub const VM_COLUMN_NUAGE_USER: &str = "nuage_user";
pub const VM_COLUMN_NUAGE_ENTERPRISE: &str = "nuage_enterprise";
pub const VM_COLUMN_METADATA: &str = "metadata";
pub const VM_COLUMN_PORTS: &str = "ports";

// Nuage_Port_Table columns
pub const PORT_COLUMN_NAME: &str = "name";
pub const PORT_COLUMN_MAC: &str = "mac";
pub const PORT_COLUMN_BRIDGE: &str = "bridge";
pub const PORT_COLUMN_DOMAIN: &str = "vm_domain";
pub const PORT_COLUMN_STATE: &str = "state";
pub const PORT_COLUMN_METADATA: &str = "metadata";

/// One row of `Nuage_VM_Table`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuageVmTableRow {
    #[serde(rename = "type")]
    pub entity_type: i64,
    pub event: i64,
    pub event_type: i64,
    pub state: i64,
    pub reason: i64,
    pub vm_name: String,
    pub vm_uuid: String,
    pub domain: String,
    pub nuage_user: String,
    pub nuage_enterprise: String,
    pub metadata: OvsMap,
    pub ports: OvsSet<String>,
}

/// One row of `Nuage_Port_Table`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuagePortTableRow {
    pub name: String,
    pub mac: String,
    pub bridge: String,
    pub vm_domain: String,
    pub state: i64,
    pub metadata: OvsMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vm_row_column_names() {
        let row = NuageVmTableRow {
            entity_type: 0,
            event: 0,
            event_type: 0,
            state: 1,
            reason: 0,
            vm_name: "web-1".to_string(),
            vm_uuid: "2e1c".to_string(),
            domain: "kvm".to_string(),
            nuage_user: "admin".to_string(),
            nuage_enterprise: "acme".to_string(),
            metadata: OvsMap::default(),
            ports: OvsSet(vec!["tap-web-1".to_string()]),
        };

        let value = serde_json::to_value(&row).unwrap();
        let object = value.as_object().unwrap();
        for column in [
            VM_COLUMN_UUID,
            VM_COLUMN_NAME,
            VM_COLUMN_TYPE,
            VM_COLUMN_STATE,
            VM_COLUMN_REASON,
            VM_COLUMN_EVENT_CATEGORY,
            VM_COLUMN_EVENT_TYPE,
            VM_COLUMN_DOMAIN,
            VM_COLUMN_NUAGE_USER,
            VM_COLUMN_NUAGE_ENTERPRISE,
            VM_COLUMN_METADATA,
            VM_COLUMN_PORTS,
        ] {
            assert!(object.contains_key(column), "missing column {}", column);
        }
        assert_eq!(value[VM_COLUMN_PORTS], json!(["set", ["tap-web-1"]]));
        assert_eq!(value[VM_COLUMN_METADATA], json!(["map", []]));
    }

    #[test]
    fn test_port_row_from_select() {
        let row: NuagePortTableRow = serde_json::from_value(json!({
            "name": "tap0",
            "mac": "52:54:00:12:34:56",
            "bridge": "alubr0",
            "vm_domain": "kvm",
            "state": 1,
            "metadata": ["map", [["nuage-zone", "z1"]]]
        }))
        .unwrap();
        assert_eq!(row.bridge, "alubr0");
        assert_eq!(row.metadata.get("nuage-zone"), Some("z1"));
    }
}
