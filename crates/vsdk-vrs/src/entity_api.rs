//! Entity lifecycle operations on `Nuage_VM_Table`

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::connection::VrsConnection;
use crate::entity::{
    validate_event, Domain, EntityType, Event, EventCategory, MetadataKey, State, SubState,
};
use crate::error::{Result, VrsError};
use crate::ovsdb::rows::{
    NuageVmTableRow, VM_COLUMN_EVENT_CATEGORY, VM_COLUMN_EVENT_TYPE, VM_COLUMN_METADATA,
    VM_COLUMN_PORTS, VM_COLUMN_REASON, VM_COLUMN_STATE, VM_COLUMN_UUID,
};
use crate::ovsdb::{unmarshal_string_set, Condition, OvsMap, OvsSet, OvsdbError, ReadRowArgs, Row};

/// What the caller tells the VRS about a new entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityInfo {
    pub uuid: String,
    pub name: String,
    pub entity_type: EntityType,
    pub domain: Domain,
    pub ports: Vec<String>,
    pub metadata: HashMap<MetadataKey, String>,
}

pub(crate) fn metadata_map(metadata: &HashMap<MetadataKey, String>) -> OvsMap {
    metadata
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), v.clone()))
        .collect()
}

fn by_uuid(uuid: &str) -> Condition {
    Condition::equal(VM_COLUMN_UUID, uuid)
}

fn encode<T: serde::Serialize>(value: &T) -> std::result::Result<Value, OvsdbError> {
    Ok(serde_json::to_value(value)?)
}

impl VrsConnection {
    /// Add an entity to the VRS.
    ///
    /// The user key is dropped from the metadata map since it has its own
    /// column; the enterprise is written to both.
    pub async fn create_entity(&self, info: &EntityInfo) -> Result<()> {
        if info.uuid.is_empty() {
            return Err(VrsError::MissingUuid);
        }
        if info.name.is_empty() {
            return Err(VrsError::MissingName);
        }

        let mut metadata = info.metadata.clone();
        metadata.remove(&MetadataKey::USER);

        let row = NuageVmTableRow {
            entity_type: info.entity_type.code(),
            event: EventCategory::Defined.code(),
            event_type: Event::DEFINED_ADDED.0,
            state: State::Running.code(),
            reason: SubState::RUNNING_UNKNOWN.0,
            vm_name: info.name.clone(),
            vm_uuid: info.uuid.clone(),
            domain: info.domain.to_string(),
            nuage_user: info.metadata.get(&MetadataKey::USER).cloned().unwrap_or_default(),
            nuage_enterprise: info
                .metadata
                .get(&MetadataKey::ENTERPRISE)
                .cloned()
                .unwrap_or_default(),
            metadata: metadata_map(&metadata),
            ports: OvsSet(info.ports.clone()),
        };

        self.vm_table
            .insert_row(self.client(), &row)
            .await
            .map_err(VrsError::CreateEntity)?;

        info!("Created entity {} ({})", info.name, info.uuid);
        Ok(())
    }

    /// Remove an entity from the VRS
    pub async fn destroy_entity(&self, uuid: &str) -> Result<()> {
        let removed = self
            .vm_table
            .delete_row(self.client(), by_uuid(uuid))
            .await
            .map_err(VrsError::DestroyEntity)?;

        info!("Destroyed entity {} ({} rows)", uuid, removed);
        Ok(())
    }

    /// Attach a port to the entity. Re-reads the current set and writes the
    /// whole set back.
    pub async fn add_entity_port(&self, uuid: &str, port_name: &str) -> Result<()> {
        let mut ports = self.get_entity_ports(uuid).await?;
        if ports.iter().any(|p| p == port_name) {
            debug!("Entity {} already has port {}", uuid, port_name);
        } else {
            ports.push(port_name.to_string());
        }

        self.write_ports(uuid, ports)
            .await
            .map_err(|source| VrsError::AddPort {
                uuid: uuid.to_string(),
                port: port_name.to_string(),
                source,
            })?;

        info!("Added port {} to entity {}", port_name, uuid);
        Ok(())
    }

    /// Detach a port from the entity
    pub async fn remove_entity_port(&self, uuid: &str, port_name: &str) -> Result<()> {
        let mut ports = self.get_entity_ports(uuid).await?;

        let index = ports
            .iter()
            .position(|p| p == port_name)
            .ok_or_else(|| VrsError::PortNotFound {
                uuid: uuid.to_string(),
                port: port_name.to_string(),
            })?;
        ports.remove(index);

        self.write_ports(uuid, ports)
            .await
            .map_err(|source| VrsError::RemovePort {
                uuid: uuid.to_string(),
                port: port_name.to_string(),
                source,
            })?;

        info!("Removed port {} from entity {}", port_name, uuid);
        Ok(())
    }

    /// Ports currently attached to the entity
    pub async fn get_entity_ports(&self, uuid: &str) -> Result<Vec<String>> {
        let read_ports = async {
            let row = self
                .vm_table
                .read_row(
                    self.client(),
                    ReadRowArgs::new(&[VM_COLUMN_PORTS], Some(by_uuid(uuid))),
                )
                .await?;
            let ports = row.get(VM_COLUMN_PORTS).cloned().unwrap_or(Value::Null);
            unmarshal_string_set(&ports)
        };

        read_ports.await.map_err(|source| VrsError::ReadPorts {
            uuid: uuid.to_string(),
            source,
        })
    }

    /// Record a new state and reason for the entity
    pub async fn set_entity_state(&self, uuid: &str, state: State, sub_state: SubState) -> Result<()> {
        let mut row = Row::new();
        row.insert(VM_COLUMN_STATE.to_string(), Value::from(state.code()));
        row.insert(VM_COLUMN_REASON.to_string(), Value::from(sub_state.0));

        self.vm_table
            .update_row(self.client(), row, by_uuid(uuid))
            .await
            .map_err(|source| VrsError::SetState {
                uuid: uuid.to_string(),
                state,
                sub_state,
                source,
            })?;

        debug!("Entity {} state set to {} ({})", uuid, state, sub_state);
        Ok(())
    }

    /// Post a lifecycle event to the entity
    pub async fn post_entity_event(
        &self,
        uuid: &str,
        category: EventCategory,
        event: Event,
    ) -> Result<()> {
        if !validate_event(category, event) {
            return Err(VrsError::InvalidEvent { category, event });
        }

        let mut row = Row::new();
        row.insert(VM_COLUMN_EVENT_CATEGORY.to_string(), Value::from(category.code()));
        row.insert(VM_COLUMN_EVENT_TYPE.to_string(), Value::from(event.0));

        self.vm_table
            .update_row(self.client(), row, by_uuid(uuid))
            .await
            .map_err(|source| VrsError::PostEvent {
                uuid: uuid.to_string(),
                category,
                event,
                source,
            })?;

        debug!("Entity {} event {} / {}", uuid, category, event);
        Ok(())
    }

    /// Replace the entity's metadata map
    pub async fn set_entity_metadata(
        &self,
        uuid: &str,
        metadata: &HashMap<MetadataKey, String>,
    ) -> Result<()> {
        let update = async {
            let mut row = Row::new();
            row.insert(VM_COLUMN_METADATA.to_string(), encode(&metadata_map(metadata))?);
            self.vm_table.update_row(self.client(), row, by_uuid(uuid)).await
        };

        update.await.map_err(|source| VrsError::SetMetadata {
            uuid: uuid.to_string(),
            source,
        })?;

        debug!("Entity {} metadata replaced ({} keys)", uuid, metadata.len());
        Ok(())
    }

    /// UUIDs of every entity known to the VRS
    pub async fn get_all_entities(&self) -> Result<Vec<String>> {
        let rows = self
            .vm_table
            .read_rows(self.client(), ReadRowArgs::new(&[VM_COLUMN_UUID], None))
            .await
            .map_err(VrsError::ListEntities)?;

        Ok(rows
            .iter()
            .filter_map(|row| row.get(VM_COLUMN_UUID).and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    async fn write_ports(&self, uuid: &str, ports: Vec<String>) -> std::result::Result<u64, OvsdbError> {
        let mut row = Row::new();
        row.insert(VM_COLUMN_PORTS.to_string(), encode(&OvsSet(ports))?);
        self.vm_table.update_row(self.client(), row, by_uuid(uuid)).await
    }
}
