//! Sheet title derivation and the hyperlink anchors built from titles.
//!
//! A table sheet's title is also its hyperlink anchor, so both are produced
//! here from the same string.

use crate::config::TitleFormat;
use crate::error::CommentBookError;
use crate::models::TableDescriptor;
use std::collections::HashSet;

/// Longest worksheet name the xlsx format accepts, in characters.
pub const MAX_SHEET_TITLE_CHARS: usize = 31;

const INVALID_TITLE_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

// Excel keeps this name for its own change-tracking sheet.
const RESERVED_TITLE: &str = "History";

/// Computes the sheet title for a table.
pub fn derive_sheet_title(table: &TableDescriptor, format: TitleFormat) -> String {
    let raw = match (format, table.comment_text()) {
        (TitleFormat::NameWithComment, Some(comment)) => format!("{}({})", table.name, comment),
        _ => table.name.clone(),
    };
    sanitize_sheet_title(&raw)
}

/// Turns arbitrary text into a legal worksheet name.
///
/// Invalid characters become `_`, surrounding apostrophes are dropped and the
/// result is cut to [`MAX_SHEET_TITLE_CHARS`].
pub fn sanitize_sheet_title(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| {
            if INVALID_TITLE_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let truncated: String = replaced
        .trim_matches('\'')
        .chars()
        .take(MAX_SHEET_TITLE_CHARS)
        .collect();
    let title = truncated.trim_end_matches('\'');

    if title.is_empty() {
        "_".to_string()
    } else if title.eq_ignore_ascii_case(RESERVED_TITLE) {
        format!("{}_", title)
    } else {
        title.to_string()
    }
}

/// Checks whether a string can be used as a worksheet name as-is.
pub fn is_valid_sheet_title(title: &str) -> bool {
    !title.is_empty()
        && title.chars().count() <= MAX_SHEET_TITLE_CHARS
        && !title
            .chars()
            .any(|c| INVALID_TITLE_CHARS.contains(&c) || c.is_control())
        && !title.starts_with('\'')
        && !title.ends_with('\'')
        && !title.eq_ignore_ascii_case(RESERVED_TITLE)
}

/// Builds the in-workbook hyperlink target pointing at cell A1 of a sheet.
pub fn internal_link(title: &str) -> String {
    format!("internal:'{}'!A1", title.replace('\'', "''"))
}

/// Tracks sheet titles already handed out.
///
/// Worksheet names compare case-insensitively, so `emp` and `EMP` collide.
#[derive(Debug, Default)]
pub struct TitleRegistry {
    seen: HashSet<String>,
}

impl TitleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a title.
    ///
    /// # Errors
    /// Returns `DuplicateSheetTitle` if an equal title was recorded before.
    pub fn claim(&mut self, title: &str) -> crate::Result<()> {
        if self.seen.insert(title.to_lowercase()) {
            Ok(())
        } else {
            Err(CommentBookError::DuplicateSheetTitle {
                title: title.to_string(),
            })
        }
    }
}
