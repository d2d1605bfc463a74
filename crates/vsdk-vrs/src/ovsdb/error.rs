//! Errors raised by the OVSDB client and table helpers

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OvsdbError {
    // ========================================================================
    // Transport
    // ========================================================================
    #[error("Failed to connect to OVSDB at {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OVSDB I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OVSDB connection closed by server")]
    ConnectionClosed,

    #[error("OVSDB response timeout after {0:?}")]
    Timeout(Duration),

    // ========================================================================
    // Protocol
    // ========================================================================
    #[error("Invalid OVSDB JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("OVSDB error: {0}")]
    Rpc(String),

    #[error("OVSDB operation failed: {error}{}", suffix(.details))]
    Operation {
        error: String,
        details: Option<String>,
    },

    #[error("Unexpected OVSDB reply: {0}")]
    UnexpectedReply(String),

    // ========================================================================
    // Table access
    // ========================================================================
    #[error("Row for table {table} must be a JSON object")]
    InvalidRow { table: String },

    #[error("Expected exactly one row in {table} matching {condition}, found {found}")]
    RowCount {
        table: String,
        condition: String,
        found: usize,
    },

    #[error("Failed to decode OVSDB value: {0}")]
    Decode(String),
}

fn suffix(details: &Option<String>) -> String {
    details
        .as_deref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default()
}

impl OvsdbError {
    /// True when the error came from reaching the server rather than from
    /// the server rejecting the request
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            OvsdbError::Connect { .. }
                | OvsdbError::Io(_)
                | OvsdbError::ConnectionClosed
                | OvsdbError::Timeout(_)
        )
    }
}
