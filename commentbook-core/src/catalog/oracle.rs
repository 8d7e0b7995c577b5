//! Oracle catalog adapter.
//!
//! Reads table and column comments of the connected user's schema from the
//! `USER_*` dictionary views. The `oracle` driver is blocking, so every call
//! runs on the blocking thread pool against a single mutex-guarded session.
//!
//! # Note
//!
//! This adapter requires Oracle Instant Client to be installed on the system.

use super::{CatalogSource, ColumnRow};
use crate::error::CommentBookError;
use crate::models::{TableDescriptor, TableKind};
use crate::security::{ConnectionInfo, Credentials};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Lists every table and view of the current user with its comment.
pub const TABLES_QUERY: &str = "SELECT TABLE_NAME, TABLE_TYPE, COMMENTS \
     FROM USER_TAB_COMMENTS \
     ORDER BY TABLE_TYPE, TABLE_NAME";

/// Lists the columns of the table bound to `:1`, in column order.
pub const COLUMNS_QUERY: &str = "SELECT c.COLUMN_NAME, c.DATA_TYPE, c.DATA_LENGTH, \
     c.DATA_PRECISION, c.DATA_SCALE, m.COMMENTS \
     FROM USER_TAB_COLUMNS c \
     LEFT JOIN USER_COL_COMMENTS m \
     ON m.TABLE_NAME = c.TABLE_NAME AND m.COLUMN_NAME = c.COLUMN_NAME \
     WHERE c.TABLE_NAME = :1 \
     ORDER BY c.COLUMN_ID";

type TableTuple = (String, String, Option<String>);
type ColumnTuple = (
    String,
    String,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<String>,
);

fn table_from_row((name, kind, comment): TableTuple) -> TableDescriptor {
    TableDescriptor::new(name, TableKind::from_catalog(&kind), comment)
}

fn column_from_row(
    (name, data_type, data_length, data_precision, data_scale, comment): ColumnTuple,
) -> ColumnRow {
    ColumnRow {
        name,
        data_type,
        data_length,
        data_precision,
        data_scale,
        comment,
    }
}

/// Oracle session holding one connection for the whole export.
pub struct OracleCatalog {
    connection: Arc<Mutex<oracle::Connection>>,
    target: ConnectionInfo,
}

impl OracleCatalog {
    /// Connects to `target` as the given user.
    ///
    /// # Security
    ///
    /// - The password is only handed to the driver, never logged
    /// - Connection errors name the target in its credential-free form
    ///
    /// # Errors
    ///
    /// Returns a connection error if the driver cannot log on, e.g. wrong
    /// credentials, unreachable listener or missing Instant Client.
    pub async fn connect(
        credentials: &Credentials,
        target: &ConnectionInfo,
    ) -> crate::Result<Self> {
        let credentials = credentials.clone();
        let connect_string = target.to_safe_string();

        tracing::debug!(
            "Opening Oracle session for {} at {}",
            credentials.username(),
            connect_string
        );

        let connection = tokio::task::spawn_blocking(move || {
            oracle::Connection::connect(
                credentials.username(),
                credentials.password(),
                &connect_string,
            )
        })
        .await
        .map_err(|e| {
            CommentBookError::connection_failed(
                format!("Connection task for {} failed", target),
                e,
            )
        })?
        .map_err(|e| {
            CommentBookError::connection_failed(format!("Failed to connect to {}", target), e)
        })?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            target: target.clone(),
        })
    }

    /// Runs `work` against the session on the blocking pool.
    async fn with_connection<T, F>(&self, context: String, work: F) -> crate::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&oracle::Connection) -> oracle::Result<T> + Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        let task_context = context.clone();

        tokio::task::spawn_blocking(move || {
            let guard = connection.lock().map_err(|_| {
                CommentBookError::query_message(format!(
                    "{}: session lock poisoned",
                    task_context
                ))
            })?;
            work(&guard).map_err(|e| CommentBookError::query_failed(task_context, e))
        })
        .await
        .map_err(|e| CommentBookError::query_failed(context, e))?
    }
}

#[async_trait]
impl CatalogSource for OracleCatalog {
    fn database_type(&self) -> &'static str {
        "oracle"
    }

    async fn list_tables(&self) -> crate::Result<Vec<TableDescriptor>> {
        self.with_connection("Listing tables".to_string(), |conn| {
            conn.query_as::<TableTuple>(TABLES_QUERY, &[])?
                .map(|row| row.map(table_from_row))
                .collect()
        })
        .await
    }

    async fn list_columns(&self, table_name: &str) -> crate::Result<Vec<ColumnRow>> {
        let table_name = table_name.to_string();
        let context = format!("Listing columns of {}", table_name);

        self.with_connection(context, move |conn| {
            conn.query_as::<ColumnTuple>(COLUMNS_QUERY, &[&table_name])?
                .map(|row| row.map(column_from_row))
                .collect()
        })
        .await
    }

    async fn close(&self) -> crate::Result<()> {
        tracing::debug!("Closing Oracle session to {}", self.target);
        self.with_connection("Closing session".to_string(), |conn| conn.close())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_query_binds_table_name() {
        assert!(COLUMNS_QUERY.contains("WHERE c.TABLE_NAME = :1"));
        assert!(COLUMNS_QUERY.ends_with("ORDER BY c.COLUMN_ID"));
        assert!(!COLUMNS_QUERY.contains('\''));
    }

    #[test]
    fn test_tables_query_ordering() {
        assert!(TABLES_QUERY.contains("FROM USER_TAB_COMMENTS"));
        assert!(TABLES_QUERY.ends_with("ORDER BY TABLE_TYPE, TABLE_NAME"));
    }

    #[test]
    fn test_row_conversion() {
        let table = table_from_row((
            "EMP".to_string(),
            "TABLE".to_string(),
            Some("employee records".to_string()),
        ));
        assert_eq!(table.kind, TableKind::Table);
        assert_eq!(table.comment.as_deref(), Some("employee records"));

        let view = table_from_row(("V1".to_string(), "VIEW".to_string(), None));
        assert_eq!(view.kind, TableKind::View);

        let column = column_from_row((
            "SAL".to_string(),
            "NUMBER".to_string(),
            Some(22),
            Some(7),
            Some(2),
            None,
        ));
        assert_eq!(column.into_descriptor().type_expression, "NUMBER(7,2)");
    }
}
