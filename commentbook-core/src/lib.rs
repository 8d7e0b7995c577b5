//! Core library for commentbook.
//!
//! Exports the table and column comments of an Oracle schema into a single
//! xlsx workbook: a contents sheet listing every table and view, and one
//! sheet per table with its columns, types and comments.
//!
//! # Security Guarantees
//! - Catalog access is read-only and limited to the `USER_*` views
//! - Table names reach SQL only as bind values
//! - Passwords are zeroized on drop and never logged
//!
//! # Architecture
//! - `catalog`: the [`CatalogSource`] trait and its Oracle adapter
//! - `workbook`: pure sheet building, sizing and title rules, plus the writer
//! - `export`: the sequential fetch, build and write pipeline

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod security;
pub mod workbook;

// Re-export commonly used types
pub use catalog::{CatalogSource, ColumnRow, create_catalog};
pub use config::{BuilderOptions, ExportConfig, SheetLabels, StyleConfig, TitleFormat};
pub use error::{CommentBookError, Result};
pub use export::{ExportSummary, export_workbook, run_export};
pub use logging::init_logging;
pub use models::{
    ColumnDescriptor, SheetLink, SheetRow, SheetSpec, TableDescriptor, TableKind, WorkbookSpec,
};
pub use workbook::WorkbookBuilder;
