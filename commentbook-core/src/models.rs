//! Data model shared by the catalog fetcher, the workbook builder and the
//! output writer.
//!
//! Descriptors come straight from catalog rows. Sheet specs are the
//! intermediate, in-memory shape of each worksheet; nothing here is persisted
//! on its own.

use serde::{Deserialize, Serialize};

/// Kind of a catalog object as reported by `USER_TAB_COMMENTS.TABLE_TYPE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Table,
    View,
    /// Any other object type, kept verbatim
    Other(String),
}

impl TableKind {
    /// Maps the raw catalog value to a kind.
    pub fn from_catalog(raw: &str) -> Self {
        match raw {
            "TABLE" => Self::Table,
            "VIEW" => Self::View,
            other => Self::Other(other.to_string()),
        }
    }

    /// Text shown in the contents sheet.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Other(raw) => raw,
        }
    }

    /// Only tables get a sheet of their own.
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table)
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One table or view listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub kind: TableKind,
    pub comment: Option<String>,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>, kind: TableKind, comment: Option<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            comment,
        }
    }

    /// Comment with surrounding whitespace removed, `None` when blank.
    pub fn comment_text(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// One column of a table, in ordinal position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Composed type such as `VARCHAR2(50)` or `NUMBER(10,2)`
    pub type_expression: String,
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(
        name: impl Into<String>,
        type_expression: impl Into<String>,
        comment: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_expression: type_expression.into(),
            comment,
        }
    }
}

/// A same-workbook hyperlink to cell A1 of another sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLink {
    /// Text displayed in the cell
    pub text: String,
    /// Exact title of the target sheet
    pub target: String,
}

/// One body row of a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    /// Cell texts; missing comments are empty strings
    pub cells: [String; 3],
    /// Target sheet title when the first cell is a link
    pub link: Option<String>,
}

impl SheetRow {
    pub fn plain(cells: [String; 3]) -> Self {
        Self { cells, link: None }
    }

    pub fn linked(cells: [String; 3], target: impl Into<String>) -> Self {
        Self {
            cells,
            link: Some(target.into()),
        }
    }
}

/// In-memory description of one worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSpec {
    /// Worksheet name, unique within the workbook
    pub title: String,
    /// Merged title row above the header, if enabled
    pub banner: Option<String>,
    pub header_labels: [String; 3],
    pub rows: Vec<SheetRow>,
    /// Link back to the contents sheet
    pub backlink: Option<SheetLink>,
    /// Final widths of the three data columns
    pub column_widths: [f64; 3],
}

impl SheetSpec {
    /// Zero-based row index of the header row.
    pub fn header_row(&self) -> u32 {
        u32::from(self.banner.is_some())
    }

    /// Rows carrying a hyperlink in their first cell.
    pub fn linked_rows(&self) -> impl Iterator<Item = &SheetRow> {
        self.rows.iter().filter(|row| row.link.is_some())
    }
}

/// The contents sheet plus one sheet per table, in output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookSpec {
    pub contents: SheetSpec,
    pub tables: Vec<SheetSpec>,
}

impl WorkbookSpec {
    pub fn new(contents: SheetSpec) -> Self {
        Self {
            contents,
            tables: Vec::new(),
        }
    }

    /// All sheets, contents first.
    pub fn sheets(&self) -> impl Iterator<Item = &SheetSpec> {
        std::iter::once(&self.contents).chain(self.tables.iter())
    }

    /// Looks a sheet up by its exact title.
    pub fn sheet(&self, title: &str) -> Option<&SheetSpec> {
        self.sheets().find(|sheet| sheet.title == title)
    }

    pub fn sheet_count(&self) -> usize {
        self.tables.len().saturating_add(1)
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
