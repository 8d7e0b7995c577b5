//! Catalog access: the trait every metadata source implements and the
//! factory that opens the configured one.
//!
//! Adapters only list raw rows. The empty-result rule and the composition of
//! column type expressions live in the provided trait methods, so every
//! adapter gets them the same way.

use crate::error::CommentBookError;
use crate::models::{ColumnDescriptor, TableDescriptor};
use crate::security::{ConnectionInfo, Credentials};
use async_trait::async_trait;

#[cfg(feature = "oracle")]
pub mod oracle;

/// Catalog view listing tables and their comments.
pub const TABLE_COMMENTS_VIEW: &str = "USER_TAB_COMMENTS";

/// One column row as read from the catalog, before type composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub name: String,
    pub data_type: String,
    pub data_length: Option<i64>,
    pub data_precision: Option<i64>,
    pub data_scale: Option<i64>,
    pub comment: Option<String>,
}

impl ColumnRow {
    /// Converts the raw row into a descriptor with a composed type.
    pub fn into_descriptor(self) -> ColumnDescriptor {
        let type_expression = compose_type_expression(
            &self.data_type,
            self.data_length,
            self.data_precision,
            self.data_scale,
        );
        ColumnDescriptor {
            name: self.name,
            type_expression,
            comment: self.comment,
        }
    }
}

/// Builds a readable type such as `NUMBER(10,2)` or `VARCHAR2(50)`.
///
/// Precision (with scale when present) wins over length; length is used for
/// everything without a precision.
///
/// # Example
/// ```rust
/// use commentbook_core::catalog::compose_type_expression;
///
/// assert_eq!(compose_type_expression("NUMBER", Some(22), Some(10), Some(2)), "NUMBER(10,2)");
/// assert_eq!(compose_type_expression("VARCHAR2", Some(50), None, None), "VARCHAR2(50)");
/// ```
pub fn compose_type_expression(
    data_type: &str,
    length: Option<i64>,
    precision: Option<i64>,
    scale: Option<i64>,
) -> String {
    match (precision, scale, length) {
        (Some(precision), Some(scale), _) => format!("{}({},{})", data_type, precision, scale),
        (Some(precision), None, _) => format!("{}({})", data_type, precision),
        (None, _, Some(length)) => format!("{}({})", data_type, length),
        (None, _, None) => data_type.to_string(),
    }
}

/// Read-only source of table and column metadata.
///
/// One instance owns one database session; calls are made one at a time and
/// never overlap.
///
/// # Object Safety
/// This trait is object-safe, allowing for dynamic dispatch through
/// `Box<dyn CatalogSource>`.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short identifier of the backing database
    fn database_type(&self) -> &'static str;

    /// Lists all tables and views with kind and comment, ordered by kind
    /// then name.
    ///
    /// # Errors
    /// Returns a query error if the catalog cannot be read.
    async fn list_tables(&self) -> crate::Result<Vec<TableDescriptor>>;

    /// Lists the columns of one table in ordinal position order.
    ///
    /// # Errors
    /// Returns a query error if the catalog cannot be read.
    async fn list_columns(&self, table_name: &str) -> crate::Result<Vec<ColumnRow>>;

    /// Fetches the table list for the export.
    ///
    /// # Errors
    /// Returns `EmptyResult` when the schema has no tables or views.
    async fn fetch_tables(&self) -> crate::Result<Vec<TableDescriptor>> {
        let tables = self.list_tables().await?;
        if tables.is_empty() {
            return Err(CommentBookError::empty_result(TABLE_COMMENTS_VIEW));
        }
        tracing::debug!("Catalog lists {} tables and views", tables.len());
        Ok(tables)
    }

    /// Fetches one table's columns, preserving their order.
    ///
    /// # Errors
    /// Returns `EmptyResult` when the table has no columns, e.g. because it
    /// was dropped after the table list was read.
    async fn fetch_columns(&self, table_name: &str) -> crate::Result<Vec<ColumnDescriptor>> {
        let rows = self.list_columns(table_name).await?;
        if rows.is_empty() {
            return Err(CommentBookError::empty_result(format!(
                "columns of {}",
                table_name
            )));
        }
        Ok(rows.into_iter().map(ColumnRow::into_descriptor).collect())
    }

    /// Releases the session.
    ///
    /// # Errors
    /// Returns an error if the driver fails to close cleanly.
    async fn close(&self) -> crate::Result<()> {
        Ok(())
    }
}

/// Opens a catalog session for the given target.
///
/// # Errors
/// Returns error if:
/// - The password is empty
/// - The connection cannot be established
/// - The Oracle driver is not compiled in
///
/// # Example
/// ```rust,no_run
/// use commentbook_core::catalog::create_catalog;
/// use commentbook_core::security::{Credentials, parse_connect_string};
///
/// # async fn example() -> commentbook_core::Result<()> {
/// let credentials = Credentials::new("scott".to_string(), "tiger".to_string());
/// let target = parse_connect_string("127.0.0.1:1521/orcl")?;
/// let catalog = create_catalog(&credentials, &target).await?;
/// let tables = catalog.fetch_tables().await?;
/// println!("Found {} tables", tables.len());
/// # Ok(())
/// # }
/// ```
pub async fn create_catalog(
    credentials: &Credentials,
    target: &ConnectionInfo,
) -> crate::Result<Box<dyn CatalogSource>> {
    if !credentials.has_password() {
        return Err(CommentBookError::configuration(format!(
            "Password for {} must not be empty",
            credentials.username()
        )));
    }

    #[cfg(feature = "oracle")]
    {
        let catalog = oracle::OracleCatalog::connect(credentials, target).await?;
        Ok(Box::new(catalog))
    }
    #[cfg(not(feature = "oracle"))]
    {
        let _ = (credentials, target);
        Err(CommentBookError::unsupported_feature(
            "Oracle adapter",
            "Compile with --features oracle to enable Oracle support",
        ))
    }
}
