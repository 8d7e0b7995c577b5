//! Export configuration.
//!
//! `ExportConfig` gathers everything that shapes the workbook: styling
//! constants, sheet labels, the builder option set and the output directory.
//! It is built once from CLI arguments and handed to the builder and writer
//! by reference.
//!
//! # Security
//! Credentials are not part of this configuration; see [`crate::security`].

use crate::error::CommentBookError;
use crate::workbook::titles::is_valid_sheet_title;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the maximum text length of a column becomes its final width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WidthScale {
    /// Add a fixed padding
    Pad(f64),
    /// Use the maximum unchanged
    Identity,
    /// Multiply by a factor
    Multiply(f64),
}

impl WidthScale {
    /// Applies the scaling to a maximum text length.
    pub fn apply(self, max: f64) -> f64 {
        match self {
            Self::Pad(padding) => max + padding,
            Self::Identity => max,
            Self::Multiply(factor) => max * factor,
        }
    }

    fn is_widening(self) -> bool {
        match self {
            Self::Pad(padding) => padding.is_finite() && padding >= 0.0,
            Self::Identity => true,
            Self::Multiply(factor) => factor.is_finite() && factor >= 1.0,
        }
    }
}

/// Styling constants shared by every sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Header and banner font color (RGB)
    pub header_font_color: u32,
    /// Banner background (RGB); the banner sits outside the styled table
    pub banner_fill_color: u32,
    pub header_bold: bool,
    pub header_font_size: f64,
    /// Hyperlink font color (RGB); links are also underlined and italic
    pub link_color: u32,
    /// Width floor applied before any scaling
    pub min_column_width: f64,
    /// Scaling for the name, type and comment columns
    pub column_scales: [WidthScale; 3],
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            header_font_color: 0x00ED_ECF9,
            banner_fill_color: 0x0044_72C4,
            header_bold: true,
            header_font_size: 14.0,
            link_color: 0x0057_80C7,
            min_column_width: 12.0,
            column_scales: [
                WidthScale::Pad(4.0),
                WidthScale::Identity,
                WidthScale::Multiply(1.5),
            ],
        }
    }
}

impl StyleConfig {
    /// Validates the styling constants.
    ///
    /// # Errors
    /// Returns error if a color is outside the RGB range, the width floor is
    /// not positive, or a width scale would shrink a column.
    pub fn validate(&self) -> crate::Result<()> {
        for (name, color) in [
            ("header_font_color", self.header_font_color),
            ("banner_fill_color", self.banner_fill_color),
            ("link_color", self.link_color),
        ] {
            if color > 0x00FF_FFFF {
                return Err(CommentBookError::configuration(format!(
                    "{} must be a 24-bit RGB value",
                    name
                )));
            }
        }

        if !(self.header_font_size.is_finite() && self.header_font_size > 0.0) {
            return Err(CommentBookError::configuration(
                "header_font_size must be positive",
            ));
        }

        if !(self.min_column_width.is_finite() && self.min_column_width > 0.0) {
            return Err(CommentBookError::configuration(
                "min_column_width must be positive",
            ));
        }

        if let Some(scale) = self.column_scales.iter().find(|s| !s.is_widening()) {
            return Err(CommentBookError::configuration(format!(
                "column scale {:?} would shrink a column below its content",
                scale
            )));
        }

        Ok(())
    }
}

/// Fixed texts written into the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLabels {
    /// Name of the contents sheet
    pub contents_title: String,
    pub contents_headers: [String; 3],
    pub table_headers: [String; 3],
    /// Text of the link back to the contents sheet
    pub backlink_text: String,
}

impl Default for SheetLabels {
    fn default() -> Self {
        Self {
            contents_title: "目录".to_string(),
            contents_headers: ["表名".to_string(), "类型".to_string(), "注释".to_string()],
            table_headers: [
                "字段名".to_string(),
                "字段类型".to_string(),
                "注释".to_string(),
            ],
            backlink_text: "返回目录".to_string(),
        }
    }
}

impl SheetLabels {
    /// Validates the labels.
    ///
    /// # Errors
    /// Returns error if the contents title is not a usable worksheet name or
    /// any label is empty.
    pub fn validate(&self) -> crate::Result<()> {
        if !is_valid_sheet_title(&self.contents_title) {
            return Err(CommentBookError::configuration(format!(
                "'{}' is not a valid worksheet name",
                self.contents_title
            )));
        }

        let all_labels = self
            .contents_headers
            .iter()
            .chain(self.table_headers.iter())
            .chain(std::iter::once(&self.backlink_text));
        for label in all_labels {
            if label.trim().is_empty() {
                return Err(CommentBookError::configuration(
                    "sheet labels must not be empty",
                ));
            }
        }

        Ok(())
    }
}

/// How a table sheet's title is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TitleFormat {
    /// Bare table name
    NameOnly,
    /// `NAME(comment)`, falling back to the bare name without a comment
    #[default]
    NameWithComment,
}

/// Layout options selecting between the plain and the annotated workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderOptions {
    /// Put a merged title row above each sheet's header
    pub include_title_row: bool,
    pub title_format: TitleFormat,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            include_title_row: true,
            title_format: TitleFormat::NameWithComment,
        }
    }
}

/// Complete configuration of one export run.
///
/// # Example
/// ```rust
/// use commentbook_core::config::{ExportConfig, TitleFormat};
///
/// let config = ExportConfig::new()
///     .with_title_format(TitleFormat::NameOnly)
///     .with_title_row(false);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    pub style: StyleConfig,
    pub labels: SheetLabels,
    pub options: BuilderOptions,
    /// Directory receiving `<identifier>.xlsx`; empty means the working directory
    pub output_dir: PathBuf,
}

impl ExportConfig {
    /// Creates a config with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the whole configuration.
    ///
    /// # Errors
    /// Returns the first style or label problem found.
    pub fn validate(&self) -> crate::Result<()> {
        self.style.validate()?;
        self.labels.validate()?;
        Ok(())
    }

    /// Builder method to set the styling constants.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Builder method to set the sheet labels.
    pub fn with_labels(mut self, labels: SheetLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Builder method to toggle the merged title row.
    pub fn with_title_row(mut self, include: bool) -> Self {
        self.options.include_title_row = include;
        self
    }

    /// Builder method to choose how table sheet titles are derived.
    pub fn with_title_format(mut self, format: TitleFormat) -> Self {
        self.options.title_format = format;
        self
    }

    /// Builder method to set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
