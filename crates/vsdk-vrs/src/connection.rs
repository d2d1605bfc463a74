//! Connection handle to the local VRS

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use vsdk_core::config::{get_config, get_config_int, get_config_opt, load_environment};

use crate::error::{Result, VrsError};
use crate::ovsdb::client::{DEFAULT_SOCKET, DEFAULT_TIMEOUT};
use crate::ovsdb::rows::{NUAGE_PORT_TABLE, NUAGE_VM_TABLE};
use crate::ovsdb::{Endpoint, NuageTable, OvsdbClient, OvsdbTransport, OPEN_VSWITCH_DB};

/// Where and how to reach the VRS ovsdb-server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VrsConfig {
    pub endpoint: Endpoint,
    pub timeout: Duration,
}

impl Default for VrsConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl VrsConfig {
    /// Read `VRS_OVSDB_ADDR` (TCP `host:port`, preferred when set),
    /// `VRS_OVSDB_SOCKET` and `VRS_OVSDB_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let endpoint = match get_config_opt("VRS_OVSDB_ADDR") {
            Some(addr) => {
                let spec = if addr.starts_with("tcp:") {
                    addr
                } else {
                    format!("tcp:{}", addr)
                };
                spec.parse().map_err(VrsError::InvalidEndpoint)?
            }
            None => get_config("VRS_OVSDB_SOCKET", DEFAULT_SOCKET)
                .parse()
                .map_err(VrsError::InvalidEndpoint)?,
        };

        let timeout_secs = get_config_int("VRS_OVSDB_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs() as i64);
        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs.max(1) as u64),
        })
    }
}

/// Handle wrapping an OVSDB client and the Nuage tables of the VRS.
///
/// Entity operations live in `entity_api`, port operations in `port_api`.
pub struct VrsConnection {
    client: Arc<dyn OvsdbTransport>,
    endpoint: String,
    pub(crate) vm_table: NuageTable,
    pub(crate) port_table: NuageTable,
}

impl VrsConnection {
    /// Connect over the VRS Unix socket
    pub async fn unix(socket_path: &str) -> Result<Self> {
        Self::connect(VrsConfig {
            endpoint: Endpoint::Unix(socket_path.into()),
            ..Default::default()
        })
        .await
    }

    /// Connect over TCP
    pub async fn tcp(address: &str, port: u16) -> Result<Self> {
        Self::connect(VrsConfig {
            endpoint: Endpoint::Tcp(format!("{}:{}", address, port)),
            ..Default::default()
        })
        .await
    }

    /// Connect using the `VRS_*` environment variables, after merging in the
    /// environment file.
    pub async fn from_env() -> Result<Self> {
        load_environment();
        Self::connect(VrsConfig::from_env()?).await
    }

    pub async fn connect(config: VrsConfig) -> Result<Self> {
        let endpoint = config.endpoint.to_string();
        let client = OvsdbClient::new(config.endpoint).with_timeout(config.timeout);
        Self::with_transport(Arc::new(client), endpoint).await
    }

    /// Wrap an existing transport. Fails unless the server hosts the
    /// `Open_vSwitch` database.
    pub async fn with_transport(
        client: Arc<dyn OvsdbTransport>,
        endpoint: impl Into<String>,
    ) -> Result<Self> {
        let endpoint = endpoint.into();
        let databases = client
            .list_dbs()
            .await
            .map_err(|source| VrsError::Connection {
                endpoint: endpoint.clone(),
                source,
            })?;
        debug!("VRS at {} serves {:?}", endpoint, databases);

        if !databases.iter().any(|db| db == OPEN_VSWITCH_DB) {
            return Err(VrsError::DatabaseMissing(OPEN_VSWITCH_DB.to_string()));
        }

        info!("Connected to VRS at {}", endpoint);
        Ok(Self {
            client,
            endpoint,
            vm_table: NuageTable::new(NUAGE_VM_TABLE),
            port_table: NuageTable::new(NUAGE_PORT_TABLE),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn client(&self) -> &dyn OvsdbTransport {
        self.client.as_ref()
    }

    /// Drop the handle. Sockets are per call, so nothing stays open.
    pub fn disconnect(self) {
        info!("Disconnected from VRS at {}", self.endpoint);
    }
}
