//! Port lifecycle operations on `Nuage_Port_Table`

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::connection::VrsConnection;
use crate::entity::{Domain, MetadataKey};
use crate::entity_api::metadata_map;
use crate::error::{Result, VrsError};
use crate::ovsdb::rows::{
    NuagePortTableRow, PORT_COLUMN_METADATA, PORT_COLUMN_NAME, PORT_COLUMN_STATE,
};
use crate::ovsdb::{Condition, OvsdbError, ReadRowArgs, Row};

/// Operational state of a port as reported to the VRS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PortState {
    #[default]
    Down,
    Up,
}

impl PortState {
    pub fn code(self) -> i64 {
        match self {
            PortState::Down => 0,
            PortState::Up => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(PortState::Down),
            1 => Some(PortState::Up),
            _ => None,
        }
    }
}

/// What the caller tells the VRS about a port
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortInfo {
    pub name: String,
    pub mac: String,
    pub bridge: String,
    pub domain: Domain,
    pub metadata: HashMap<MetadataKey, String>,
}

impl TryFrom<NuagePortTableRow> for PortInfo {
    type Error = OvsdbError;

    fn try_from(row: NuagePortTableRow) -> std::result::Result<Self, Self::Error> {
        Ok(PortInfo {
            domain: row.vm_domain.parse().map_err(OvsdbError::Decode)?,
            name: row.name,
            mac: row.mac,
            bridge: row.bridge,
            metadata: row
                .metadata
                .into_inner()
                .into_iter()
                .map(|(k, v)| (MetadataKey::new(k), v))
                .collect(),
        })
    }
}

fn by_name(name: &str) -> Condition {
    Condition::equal(PORT_COLUMN_NAME, name)
}

impl VrsConnection {
    /// Add a port to the VRS. New ports start out [`PortState::Down`].
    pub async fn create_port(&self, info: &PortInfo) -> Result<()> {
        if info.name.is_empty() {
            return Err(VrsError::MissingName);
        }

        let row = NuagePortTableRow {
            name: info.name.clone(),
            mac: info.mac.clone(),
            bridge: info.bridge.clone(),
            vm_domain: info.domain.to_string(),
            state: PortState::Down.code(),
            metadata: metadata_map(&info.metadata),
        };

        self.port_table
            .insert_row(self.client(), &row)
            .await
            .map_err(|source| VrsError::CreatePort {
                name: info.name.clone(),
                source,
            })?;

        info!("Created port {} on bridge {}", info.name, info.bridge);
        Ok(())
    }

    /// Remove a port from the VRS
    pub async fn destroy_port(&self, name: &str) -> Result<()> {
        self.port_table
            .delete_row(self.client(), by_name(name))
            .await
            .map_err(|source| VrsError::DestroyPort {
                name: name.to_string(),
                source,
            })?;

        info!("Destroyed port {}", name);
        Ok(())
    }

    pub async fn update_port_state(&self, name: &str, state: PortState) -> Result<()> {
        let mut row = Row::new();
        row.insert(PORT_COLUMN_STATE.to_string(), Value::from(state.code()));

        self.port_table
            .update_row(self.client(), row, by_name(name))
            .await
            .map_err(|source| VrsError::UpdatePort {
                name: name.to_string(),
                source,
            })?;

        debug!("Port {} is now {:?}", name, state);
        Ok(())
    }

    /// Replace the port's metadata map
    pub async fn set_port_metadata(
        &self,
        name: &str,
        metadata: &HashMap<MetadataKey, String>,
    ) -> Result<()> {
        let update = async {
            let mut row = Row::new();
            row.insert(
                PORT_COLUMN_METADATA.to_string(),
                serde_json::to_value(metadata_map(metadata))?,
            );
            self.port_table.update_row(self.client(), row, by_name(name)).await
        };

        update.await.map_err(|source| VrsError::UpdatePort {
            name: name.to_string(),
            source,
        })?;
        Ok(())
    }

    /// Full description of one port
    pub async fn get_port_info(&self, name: &str) -> Result<PortInfo> {
        let row = self.read_port(name).await?;
        PortInfo::try_from(row).map_err(|source| VrsError::ReadPort {
            name: name.to_string(),
            source,
        })
    }

    pub async fn get_port_state(&self, name: &str) -> Result<PortState> {
        let row = self.read_port(name).await?;
        PortState::from_code(row.state).ok_or_else(|| VrsError::ReadPort {
            name: name.to_string(),
            source: OvsdbError::Decode(format!("unknown port state {}", row.state)),
        })
    }

    /// Names of every port known to the VRS
    pub async fn get_all_ports(&self) -> Result<Vec<String>> {
        let rows = self
            .port_table
            .read_rows(self.client(), ReadRowArgs::new(&[PORT_COLUMN_NAME], None))
            .await
            .map_err(VrsError::ListPorts)?;

        Ok(rows
            .iter()
            .filter_map(|row| row.get(PORT_COLUMN_NAME).and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    async fn read_port(&self, name: &str) -> Result<NuagePortTableRow> {
        let read = async {
            let row = self
                .port_table
                .read_row(self.client(), ReadRowArgs::new(&[], Some(by_name(name))))
                .await?;
            Ok::<_, OvsdbError>(serde_json::from_value(Value::Object(row))?)
        };

        read.await.map_err(|source| VrsError::ReadPort {
            name: name.to_string(),
            source,
        })
    }
}
