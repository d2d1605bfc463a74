//! In-memory stand-in for ovsdb-server

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use vsdk_vrs::ovsdb::{
    Condition, Function, Operation, OperationResult, OvsdbError, OvsdbTransport, Row,
    OPEN_VSWITCH_DB,
};
use vsdk_vrs::VrsConnection;

/// Keeps rows per table and evaluates `==` / `!=` conditions
#[derive(Default)]
pub struct MemoryOvsdb {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    operations: AtomicUsize,
    fail: AtomicBool,
    next_uuid: AtomicUsize,
}

impl MemoryOvsdb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of operations received so far
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Make every following transaction fail with a transport error
    pub fn fail_transactions(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// The single row of `table` whose `column` equals `value`
    pub fn row(&self, table: &str, column: &str, value: &str) -> Option<Row> {
        self.rows(table)
            .into_iter()
            .find(|row| row.get(column).and_then(Value::as_str) == Some(value))
    }

    pub fn insert(&self, table: &str, row: Row) {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    fn apply(&self, tables: &mut HashMap<String, Vec<Row>>, op: &Operation) -> OperationResult {
        let rows = tables.entry(op.table().to_string()).or_default();
        match op {
            Operation::Insert { row, .. } => {
                let id = self.next_uuid.fetch_add(1, Ordering::SeqCst);
                rows.push(row.clone());
                OperationResult {
                    uuid: Some(json!(["uuid", format!("row-{}", id)])),
                    ..Default::default()
                }
            }
            Operation::Select {
                conditions,
                columns,
                ..
            } => {
                let selected = rows
                    .iter()
                    .filter(|row| matches_all(row, conditions))
                    .map(|row| project(row, columns.as_deref()))
                    .collect();
                OperationResult::with_rows(selected)
            }
            Operation::Update {
                conditions, row, ..
            } => {
                let mut count = 0;
                for existing in rows.iter_mut().filter(|r| matches_all(r, conditions)) {
                    for (column, value) in row {
                        existing.insert(column.clone(), value.clone());
                    }
                    count += 1;
                }
                OperationResult::with_count(count)
            }
            Operation::Delete { conditions, .. } => {
                let before = rows.len();
                rows.retain(|r| !matches_all(r, conditions));
                OperationResult::with_count((before - rows.len()) as u64)
            }
        }
    }
}

fn matches_all(row: &Row, conditions: &[Condition]) -> bool {
    conditions.iter().all(|c| {
        let actual = row.get(&c.column).unwrap_or(&Value::Null);
        match c.function {
            Function::Equal => *actual == c.value,
            Function::NotEqual => *actual != c.value,
            Function::Includes | Function::Excludes => false,
        }
    })
}

fn project(row: &Row, columns: Option<&[String]>) -> Row {
    match columns {
        Some(columns) => row
            .iter()
            .filter(|(k, _)| columns.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        None => row.clone(),
    }
}

#[async_trait]
impl OvsdbTransport for MemoryOvsdb {
    async fn list_dbs(&self) -> Result<Vec<String>, OvsdbError> {
        Ok(vec![OPEN_VSWITCH_DB.to_string()])
    }

    async fn transact(
        &self,
        database: &str,
        operations: &[Operation],
    ) -> Result<Vec<OperationResult>, OvsdbError> {
        assert_eq!(database, OPEN_VSWITCH_DB);
        self.operations.fetch_add(operations.len(), Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(OvsdbError::ConnectionClosed);
        }

        let mut tables = self.tables.lock().unwrap();
        Ok(operations.iter().map(|op| self.apply(&mut tables, op)).collect())
    }
}

/// A connection backed by a fresh in-memory database
pub async fn connect() -> (VrsConnection, Arc<MemoryOvsdb>) {
    let db = MemoryOvsdb::new();
    let vrs = VrsConnection::with_transport(db.clone(), "memory")
        .await
        .expect("in-memory transport serves Open_vSwitch");
    (vrs, db)
}
