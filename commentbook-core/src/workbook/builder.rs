//! Turns catalog descriptors into sheet specs.
//!
//! The builder is pure: it never touches the database or the filesystem.
//! Hyperlink anchors and sheet titles both come from
//! [`derive_sheet_title`], so a contents link always names an existing sheet.

use super::sizing::sheet_widths;
use super::titles::{TitleRegistry, derive_sheet_title};
use crate::config::{BuilderOptions, ExportConfig, SheetLabels, StyleConfig};
use crate::models::{ColumnDescriptor, SheetLink, SheetRow, SheetSpec, TableDescriptor};

/// Builds the contents sheet and the per-table sheets.
#[derive(Debug, Clone)]
pub struct WorkbookBuilder {
    style: StyleConfig,
    labels: SheetLabels,
    options: BuilderOptions,
}

impl WorkbookBuilder {
    pub fn new(style: StyleConfig, labels: SheetLabels, options: BuilderOptions) -> Self {
        Self {
            style,
            labels,
            options,
        }
    }

    /// Creates a builder from the style, label and option parts of a config.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.style.clone(), config.labels.clone(), config.options)
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Title (and link anchor) of a table's sheet.
    pub fn sheet_title(&self, table: &TableDescriptor) -> String {
        derive_sheet_title(table, self.options.title_format)
    }

    /// Builds the navigation sheet: one row per catalog entry, in catalog
    /// order, with a link on every `TABLE` row.
    ///
    /// # Errors
    /// Returns `DuplicateSheetTitle` if two tables (or a table and the
    /// contents sheet) would get the same sheet title.
    pub fn build_contents_sheet(&self, tables: &[TableDescriptor]) -> crate::Result<SheetSpec> {
        let title = self.labels.contents_title.clone();
        let mut registry = TitleRegistry::new();
        registry.claim(&title)?;

        let mut rows = Vec::with_capacity(tables.len());
        for table in tables {
            let cells = [
                table.name.clone(),
                table.kind.to_string(),
                table.comment.clone().unwrap_or_default(),
            ];

            if table.kind.is_table() {
                let target = self.sheet_title(table);
                registry.claim(&target)?;
                rows.push(SheetRow::linked(cells, target));
            } else {
                rows.push(SheetRow::plain(cells));
            }
        }

        let header_labels = self.labels.contents_headers.clone();
        let column_widths = sheet_widths(&header_labels, &rows, &self.style);

        Ok(SheetSpec {
            banner: self.options.include_title_row.then(|| title.clone()),
            title,
            header_labels,
            rows,
            backlink: None,
            column_widths,
        })
    }

    /// Builds one table's sheet with its columns in the order given.
    pub fn build_table_sheet(
        &self,
        table: &TableDescriptor,
        columns: &[ColumnDescriptor],
    ) -> SheetSpec {
        let title = self.sheet_title(table);

        let rows: Vec<SheetRow> = columns
            .iter()
            .map(|column| {
                SheetRow::plain([
                    column.name.clone(),
                    column.type_expression.clone(),
                    column.comment.clone().unwrap_or_default(),
                ])
            })
            .collect();

        let header_labels = self.labels.table_headers.clone();
        let column_widths = sheet_widths(&header_labels, &rows, &self.style);

        SheetSpec {
            banner: self.options.include_title_row.then(|| title.clone()),
            title,
            header_labels,
            rows,
            backlink: Some(SheetLink {
                text: self.labels.backlink_text.clone(),
                target: self.labels.contents_title.clone(),
            }),
            column_widths,
        }
    }
}

impl Default for WorkbookBuilder {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}
