//! OVSDB JSON-RPC client
//!
//! Talks to ovsdb-server over its Unix socket (`/var/run/openvswitch/db.sock`)
//! or a TCP listener. Every call opens its own connection, sends one request
//! and reads the JSON stream until the matching reply arrives.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, UnixStream};
use tracing::debug;

use super::protocol::{Operation, OperationResult, RpcRequest, RpcResponse};
use super::OvsdbError;

/// Default ovsdb-server Unix socket
pub const DEFAULT_SOCKET: &str = "/var/run/openvswitch/db.sock";

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const READ_CHUNK: usize = 4096;

/// Operations a VRS connection needs from an OVSDB server.
///
/// [`OvsdbClient`] is the production implementation; tests substitute an
/// in-memory one.
#[async_trait]
pub trait OvsdbTransport: Send + Sync {
    /// Names of the databases the server hosts
    async fn list_dbs(&self) -> Result<Vec<String>, OvsdbError>;

    /// Run `operations` as one transaction against `database`
    async fn transact(
        &self,
        database: &str,
        operations: &[Operation],
    ) -> Result<Vec<OperationResult>, OvsdbError>;
}

/// Where ovsdb-server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Unix(PathBuf),
    /// `host:port`
    Tcp(String),
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::Unix(PathBuf::from(DEFAULT_SOCKET))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Unix(path) => write!(f, "unix:{}", path.display()),
            Endpoint::Tcp(addr) => write!(f, "tcp:{}", addr),
        }
    }
}

impl FromStr for Endpoint {
    type Err = String;

    /// Accepts the ovs-vsctl `--db` syntax: `unix:PATH`, `tcp:HOST:PORT`, or a
    /// bare socket path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix("unix:") {
            return Ok(Endpoint::Unix(PathBuf::from(path)));
        }
        if let Some(addr) = s.strip_prefix("tcp:") {
            if addr.rsplit_once(':').is_none() {
                return Err(format!("tcp endpoint needs host:port, got '{}'", addr));
            }
            return Ok(Endpoint::Tcp(addr.to_string()));
        }
        if s.is_empty() {
            return Err("empty OVSDB endpoint".to_string());
        }
        Ok(Endpoint::Unix(PathBuf::from(s)))
    }
}

/// OVSDB JSON-RPC client
pub struct OvsdbClient {
    endpoint: Endpoint,
    timeout: Duration,
    next_id: AtomicU64,
}

impl OvsdbClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
            next_id: AtomicU64::new(1),
        }
    }

    /// Client for a Unix socket path
    pub fn unix(path: impl Into<PathBuf>) -> Self {
        Self::new(Endpoint::Unix(path.into()))
    }

    /// Client for `address:port`
    pub fn tcp(address: &str, port: u16) -> Self {
        Self::new(Endpoint::Tcp(format!("{}:{}", address, port)))
    }

    /// Set timeout for RPC calls
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Send a JSON-RPC request and get the `result` member of the reply
    pub async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, OvsdbError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(method, params, id);
        let payload = serde_json::to_vec(&request)?;
        debug!("OVSDB request: {}", String::from_utf8_lossy(&payload));

        let response = tokio::time::timeout(self.timeout, self.send(&payload, id))
            .await
            .map_err(|_| OvsdbError::Timeout(self.timeout))??;

        debug!("OVSDB response: {}", response.result);

        if !response.error.is_null() {
            return Err(OvsdbError::Rpc(match response.error {
                Value::String(s) => s,
                other => other.to_string(),
            }));
        }

        Ok(response.result)
    }

    async fn send(&self, payload: &[u8], id: u64) -> Result<RpcResponse, OvsdbError> {
        let connect_error = |source| OvsdbError::Connect {
            endpoint: self.endpoint.to_string(),
            source,
        };

        match &self.endpoint {
            Endpoint::Unix(path) => {
                let stream = UnixStream::connect(path).await.map_err(connect_error)?;
                exchange(stream, payload, id).await
            }
            Endpoint::Tcp(addr) => {
                let stream = TcpStream::connect(addr.as_str())
                    .await
                    .map_err(connect_error)?;
                exchange(stream, payload, id).await
            }
        }
    }

    /// Get schema for a database
    pub async fn get_schema(&self, database: &str) -> Result<Value, OvsdbError> {
        self.rpc_call("get_schema", json!([database])).await
    }
}

impl Default for OvsdbClient {
    fn default() -> Self {
        Self::new(Endpoint::default())
    }
}

#[async_trait]
impl OvsdbTransport for OvsdbClient {
    async fn list_dbs(&self) -> Result<Vec<String>, OvsdbError> {
        let result = self.rpc_call("list_dbs", json!([])).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn transact(
        &self,
        database: &str,
        operations: &[Operation],
    ) -> Result<Vec<OperationResult>, OvsdbError> {
        let mut params = vec![json!(database)];
        for op in operations {
            params.push(serde_json::to_value(op)?);
        }

        let result = self.rpc_call("transact", Value::Array(params)).await?;
        let entries = match result {
            Value::Array(entries) => entries,
            other => {
                return Err(OvsdbError::UnexpectedReply(format!(
                    "transact result is not an array: {}",
                    other
                )))
            }
        };

        entries
            .into_iter()
            .map(|entry| match entry {
                Value::Null => Ok(OperationResult::default()),
                other => serde_json::from_value(other).map_err(OvsdbError::from),
            })
            .collect()
    }
}

/// Write one request and read values off the stream until the reply with
/// `id` shows up. Server-initiated `echo` requests are answered in place;
/// anything else (update notifications) is skipped.
async fn exchange<S>(mut stream: S, payload: &[u8], id: u64) -> Result<RpcResponse, OvsdbError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(payload).await?;
    stream.flush().await?;

    let mut buffer: Vec<u8> = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Err(OvsdbError::ConnectionClosed);
        }
        buffer.extend_from_slice(&chunk[..read]);

        let mut replies = Vec::new();
        let consumed = {
            let mut consumed = 0;
            let mut values = serde_json::Deserializer::from_slice(&buffer).into_iter::<Value>();
            loop {
                match values.next() {
                    Some(Ok(value)) => {
                        consumed = values.byte_offset();
                        replies.push(value);
                    }
                    Some(Err(e)) if e.is_eof() => break,
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            consumed
        };
        buffer.drain(..consumed);

        for value in replies {
            if value.get("method").and_then(Value::as_str) == Some("echo") {
                let reply = json!({
                    "result": value.get("params").cloned().unwrap_or(Value::Null),
                    "error": null,
                    "id": value.get("id").cloned().unwrap_or(Value::Null),
                });
                stream.write_all(&serde_json::to_vec(&reply)?).await?;
                continue;
            }
            if value.get("id").and_then(Value::as_u64) == Some(id) {
                return Ok(serde_json::from_value(value)?);
            }
            debug!("Skipping unsolicited OVSDB message: {}", value);
        }
    }
}
