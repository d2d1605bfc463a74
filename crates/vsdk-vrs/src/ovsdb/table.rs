//! Single-operation row access to one OVSDB table

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::protocol::{Condition, Operation, OperationResult, Row};
use super::value::parse_uuid_atom;
use super::{OvsdbError, OvsdbTransport};

/// Database every Nuage table lives in
pub const OPEN_VSWITCH_DB: &str = "Open_vSwitch";

/// Columns and filter for a select
#[derive(Debug, Clone, Default)]
pub struct ReadRowArgs {
    /// Columns to return; empty means all of them
    pub columns: Vec<String>,
    /// `None` selects every row
    pub condition: Option<Condition>,
}

impl ReadRowArgs {
    pub fn new(columns: &[&str], condition: Option<Condition>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            condition,
        }
    }
}

/// Handle on one table of the `Open_vSwitch` database
#[derive(Debug, Clone)]
pub struct NuageTable {
    name: String,
}

impl NuageTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert `row`, returning the UUID ovsdb-server assigned to it.
    pub async fn insert_row<R: Serialize + ?Sized>(
        &self,
        client: &dyn OvsdbTransport,
        row: &R,
    ) -> Result<String, OvsdbError> {
        let row = self.to_row(row)?;
        let result = self
            .execute(
                client,
                Operation::Insert {
                    table: self.name.clone(),
                    row,
                },
            )
            .await?;

        result
            .uuid
            .as_ref()
            .and_then(parse_uuid_atom)
            .ok_or_else(|| OvsdbError::UnexpectedReply(format!("insert into {} returned no uuid", self.name)))
    }

    /// Delete the rows matching `condition`. Returns how many went away.
    pub async fn delete_row(
        &self,
        client: &dyn OvsdbTransport,
        condition: Condition,
    ) -> Result<u64, OvsdbError> {
        let result = self
            .execute(
                client,
                Operation::Delete {
                    table: self.name.clone(),
                    conditions: vec![condition],
                },
            )
            .await?;
        Ok(result.count.unwrap_or(0))
    }

    /// Overwrite the given columns of the rows matching `condition`.
    /// Returns how many rows were touched.
    pub async fn update_row(
        &self,
        client: &dyn OvsdbTransport,
        row: Row,
        condition: Condition,
    ) -> Result<u64, OvsdbError> {
        let result = self
            .execute(
                client,
                Operation::Update {
                    table: self.name.clone(),
                    conditions: vec![condition],
                    row,
                },
            )
            .await?;
        Ok(result.count.unwrap_or(0))
    }

    /// Select exactly one row; zero or several matches are an error.
    pub async fn read_row(
        &self,
        client: &dyn OvsdbTransport,
        args: ReadRowArgs,
    ) -> Result<Row, OvsdbError> {
        let condition = args
            .condition
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "<all rows>".to_string());

        let mut rows = self.read_rows(client, args).await?;
        if rows.len() != 1 {
            return Err(OvsdbError::RowCount {
                table: self.name.clone(),
                condition,
                found: rows.len(),
            });
        }
        Ok(rows.remove(0))
    }

    /// Select all rows matching the arguments
    pub async fn read_rows(
        &self,
        client: &dyn OvsdbTransport,
        args: ReadRowArgs,
    ) -> Result<Vec<Row>, OvsdbError> {
        let result = self
            .execute(
                client,
                Operation::Select {
                    table: self.name.clone(),
                    conditions: args.condition.into_iter().collect(),
                    columns: (!args.columns.is_empty()).then_some(args.columns),
                },
            )
            .await?;

        result
            .rows
            .ok_or_else(|| OvsdbError::UnexpectedReply(format!("select on {} returned no rows member", self.name)))
    }

    async fn execute(
        &self,
        client: &dyn OvsdbTransport,
        operation: Operation,
    ) -> Result<OperationResult, OvsdbError> {
        debug!("{} on {}", operation.name(), self.name);
        let results = client
            .transact(OPEN_VSWITCH_DB, std::slice::from_ref(&operation))
            .await?;
        single_result(results)
    }

    fn to_row<R: Serialize + ?Sized>(&self, row: &R) -> Result<Row, OvsdbError> {
        match serde_json::to_value(row)? {
            Value::Object(map) => Ok(map),
            _ => Err(OvsdbError::InvalidRow {
                table: self.name.clone(),
            }),
        }
    }
}

/// Pick the result of a one-operation transaction, surfacing any error
/// ovsdb-server attached to it or to the commit.
fn single_result(results: Vec<OperationResult>) -> Result<OperationResult, OvsdbError> {
    if let Some(failed) = results.iter().find(|r| r.error.is_some()) {
        return Err(OvsdbError::Operation {
            error: failed.error.clone().unwrap_or_default(),
            details: failed.details.clone(),
        });
    }

    results
        .into_iter()
        .next()
        .ok_or_else(|| OvsdbError::UnexpectedReply("empty transact result".to_string()))
}
