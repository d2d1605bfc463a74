//! OVSDB access for the VRS tables
//!
//! - `client`: JSON-RPC client and the [`OvsdbTransport`] seam
//! - `protocol`: request, operation and result types
//! - `table`: one-operation insert / update / delete / select helpers
//! - `rows`: `Nuage_VM_Table` and `Nuage_Port_Table` layouts
//! - `value`: set / map / uuid encodings

pub mod client;
pub mod error;
pub mod protocol;
pub mod rows;
pub mod table;
pub mod value;

pub use client::{Endpoint, OvsdbClient, OvsdbTransport};
pub use error::OvsdbError;
pub use protocol::{Condition, Function, Operation, OperationResult, Row};
pub use table::{NuageTable, ReadRowArgs, OPEN_VSWITCH_DB};
pub use value::{unmarshal_string_set, OvsMap, OvsSet};
