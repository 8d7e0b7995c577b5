//! The export pipeline: fetch, build, write.
//!
//! Steps run strictly one after another on a single catalog session. Any
//! failure aborts the run before the output file is touched.

use crate::catalog::CatalogSource;
use crate::config::ExportConfig;
use crate::models::WorkbookSpec;
use crate::workbook::{WorkbookBuilder, output_path, write_workbook};
use std::path::PathBuf;
use tracing::{debug, info};

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Path of the written workbook
    pub path: PathBuf,
    /// Number of sheets in the workbook, contents included
    pub sheets: usize,
    /// Number of per-table sheets
    pub table_sheets: usize,
    /// Number of entries listed on the contents sheet
    pub contents_rows: usize,
}

impl ExportSummary {
    /// File name of the written workbook, for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Fetches the catalog and builds the in-memory workbook.
///
/// All sheet titles are checked for collisions while building the contents
/// sheet, before any column is fetched.
///
/// # Errors
/// Returns the first fetch or build error: empty catalog, a table without
/// columns, a failed query or a duplicate sheet title.
pub async fn export_workbook(
    catalog: &dyn CatalogSource,
    builder: &WorkbookBuilder,
) -> crate::Result<WorkbookSpec> {
    let tables = catalog.fetch_tables().await?;

    info!("Exporting toc ...");
    let contents = builder.build_contents_sheet(&tables)?;
    let mut workbook = WorkbookSpec::new(contents);

    for table in tables.iter().filter(|table| table.kind.is_table()) {
        info!("Exporting {} ...", table.name);
        let columns = catalog.fetch_columns(&table.name).await?;
        debug!("{} has {} columns", table.name, columns.len());
        workbook
            .tables
            .push(builder.build_table_sheet(table, &columns));
    }

    Ok(workbook)
}

/// Runs a full export and writes `<identifier>.xlsx` into the configured
/// output directory.
///
/// # Errors
/// Returns a configuration error for an invalid config or identifier, any
/// error from [`export_workbook`], or a workbook/I/O error from the write.
///
/// # Example
/// ```rust,no_run
/// use commentbook_core::catalog::create_catalog;
/// use commentbook_core::config::ExportConfig;
/// use commentbook_core::export::run_export;
/// use commentbook_core::security::{Credentials, parse_connect_string};
///
/// # async fn example() -> commentbook_core::Result<()> {
/// let credentials = Credentials::new("scott".to_string(), "tiger".to_string());
/// let target = parse_connect_string("127.0.0.1:1521/orcl")?;
/// let catalog = create_catalog(&credentials, &target).await?;
///
/// let summary = run_export(catalog.as_ref(), &ExportConfig::new(), "scott").await?;
/// println!("{} exported successfully", summary.file_name());
/// # Ok(())
/// # }
/// ```
pub async fn run_export(
    catalog: &dyn CatalogSource,
    config: &ExportConfig,
    identifier: &str,
) -> crate::Result<ExportSummary> {
    config.validate()?;
    let path = output_path(&config.output_dir, identifier)?;

    debug!(
        "Exporting {} catalog to {}",
        catalog.database_type(),
        path.display()
    );

    let builder = WorkbookBuilder::from_config(config);
    let workbook = export_workbook(catalog, &builder).await?;
    write_workbook(&workbook, builder.style(), &path).await?;

    let summary = ExportSummary {
        path,
        sheets: workbook.sheet_count(),
        table_sheets: workbook.tables.len(),
        contents_rows: workbook.contents.rows.len(),
    };
    info!("{} exported successfully", summary.file_name());

    Ok(summary)
}
