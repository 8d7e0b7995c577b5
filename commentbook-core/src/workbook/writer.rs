//! Renders a [`WorkbookSpec`] to xlsx and writes it to disk.
//!
//! Rendering happens fully in memory; the file is only created once the
//! whole package has been produced.

use super::titles::internal_link;
use crate::config::StyleConfig;
use crate::error::CommentBookError;
use crate::models::{SheetSpec, WorkbookSpec};
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatUnderline, Table, TableColumn, TableStyle, Url, Workbook,
    Worksheet,
};
use std::path::{Path, PathBuf};

/// Column receiving the backlink, right of the three data columns.
const BACKLINK_COLUMN: u16 = 3;

// Blue header band matching the banner fill.
const TABLE_STYLE: TableStyle = TableStyle::Medium2;

/// File name for an export named after `identifier`.
pub fn output_file_name(identifier: &str) -> String {
    format!("{}.xlsx", identifier)
}

/// Full output path for `identifier` inside `dir`.
///
/// # Errors
/// Returns a configuration error if the identifier is empty or would escape
/// the output directory.
pub fn output_path(dir: &Path, identifier: &str) -> crate::Result<PathBuf> {
    let identifier = identifier.trim();
    if identifier.is_empty()
        || identifier == "."
        || identifier == ".."
        || identifier.contains(['/', '\\'])
    {
        return Err(CommentBookError::configuration(format!(
            "'{}' cannot be used as an output file name",
            identifier
        )));
    }
    Ok(dir.join(output_file_name(identifier)))
}

/// Cell formats derived once from the style config.
struct Formats {
    header: Format,
    banner: Format,
    link: Format,
}

impl Formats {
    fn new(style: &StyleConfig) -> Self {
        let mut header = Format::new()
            .set_font_color(Color::RGB(style.header_font_color))
            .set_font_size(style.header_font_size)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        if style.header_bold {
            header = header.set_bold();
        }
        let banner = header
            .clone()
            .set_background_color(Color::RGB(style.banner_fill_color));

        let link = Format::new()
            .set_font_color(Color::RGB(style.link_color))
            .set_underline(FormatUnderline::Single)
            .set_italic();

        Self {
            header,
            banner,
            link,
        }
    }
}

/// Renders the workbook into an xlsx byte buffer.
///
/// # Errors
/// Returns a workbook error if a sheet cannot be named or a cell cannot be
/// written, e.g. for an invalid sheet title.
pub fn render_workbook(workbook: &WorkbookSpec, style: &StyleConfig) -> crate::Result<Vec<u8>> {
    let formats = Formats::new(style);
    let mut book = Workbook::new();

    for sheet in workbook.sheets() {
        let worksheet = book.add_worksheet();
        render_sheet(worksheet, sheet, &formats)?;
    }

    book.save_to_buffer()
        .map_err(|e| CommentBookError::workbook("Failed to assemble xlsx package", e))
}

fn render_sheet(
    worksheet: &mut Worksheet,
    sheet: &SheetSpec,
    formats: &Formats,
) -> crate::Result<()> {
    let context = |what: &str| format!("{} on sheet '{}'", what, sheet.title);

    worksheet
        .set_name(&sheet.title)
        .map_err(|e| CommentBookError::workbook(context("Failed to name sheet"), e))?;

    if let Some(banner) = &sheet.banner {
        worksheet
            .merge_range(0, 0, 0, 2, banner, &formats.banner)
            .map_err(|e| CommentBookError::workbook(context("Failed to write title row"), e))?;
    }

    let header_row = sheet.header_row();
    let row_count = u32::try_from(sheet.rows.len())
        .map_err(|_| CommentBookError::configuration(context("Too many rows")))?;
    let last_row = header_row.saturating_add(row_count);

    let columns: Vec<TableColumn> = sheet
        .header_labels
        .iter()
        .map(|label| {
            TableColumn::new()
                .set_header(label)
                .set_header_format(&formats.header)
        })
        .collect();
    let table = Table::new().set_style(TABLE_STYLE).set_columns(&columns);
    worksheet
        .add_table(header_row, 0, last_row, 2, &table)
        .map_err(|e| CommentBookError::workbook(context("Failed to add data table"), e))?;

    for (row_index, row) in (header_row.saturating_add(1)..).zip(&sheet.rows) {
        for (col_index, text) in (0u16..).zip(&row.cells) {
            match (&row.link, col_index) {
                (Some(target), 0) => {
                    let url = Url::new(internal_link(target)).set_text(text);
                    worksheet
                        .write_url_with_format(row_index, col_index, url, &formats.link)
                        .map_err(|e| {
                            CommentBookError::workbook(context("Failed to write link"), e)
                        })?;
                }
                _ if text.is_empty() => {}
                _ => {
                    worksheet
                        .write_string(row_index, col_index, text)
                        .map_err(|e| {
                            CommentBookError::workbook(context("Failed to write cell"), e)
                        })?;
                }
            }
        }
    }

    if let Some(backlink) = &sheet.backlink {
        let url = Url::new(internal_link(&backlink.target)).set_text(&backlink.text);
        worksheet
            .write_url_with_format(0, BACKLINK_COLUMN, url, &formats.link)
            .map_err(|e| CommentBookError::workbook(context("Failed to write backlink"), e))?;
    }

    for (col_index, width) in (0u16..).zip(sheet.column_widths) {
        worksheet
            .set_column_width(col_index, width)
            .map_err(|e| CommentBookError::workbook(context("Failed to size column"), e))?;
    }

    Ok(())
}

/// Renders the workbook and writes it to `path`.
///
/// # Errors
/// Returns a workbook error if rendering fails (nothing is written then), or
/// an I/O error if the file cannot be written; a failed write may leave a
/// truncated file behind.
pub async fn write_workbook(
    workbook: &WorkbookSpec,
    style: &StyleConfig,
    path: &Path,
) -> crate::Result<()> {
    let buffer = render_workbook(workbook, style)?;

    tokio::fs::write(path, buffer)
        .await
        .map_err(|e| CommentBookError::Io {
            context: format!("Failed to write to {}", path.display()),
            source: e,
        })?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{SheetLink, SheetRow};
    use std::io::Read;

    fn contents() -> SheetSpec {
        SheetSpec {
            title: "目录".to_string(),
            banner: None,
            header_labels: ["表名".to_string(), "类型".to_string(), "注释".to_string()],
            rows: vec![SheetRow::linked(
                ["EMP".to_string(), "TABLE".to_string(), String::new()],
                "EMP",
            )],
            backlink: None,
            column_widths: [12.0, 12.0, 12.0],
        }
    }

    fn emp() -> SheetSpec {
        SheetSpec {
            title: "EMP".to_string(),
            banner: Some("EMP".to_string()),
            header_labels: [
                "字段名".to_string(),
                "字段类型".to_string(),
                "注释".to_string(),
            ],
            rows: vec![SheetRow::plain([
                "ID".to_string(),
                "NUMBER(10,0)".to_string(),
                "primary key".to_string(),
            ])],
            backlink: Some(SheetLink {
                text: "返回目录".to_string(),
                target: "目录".to_string(),
            }),
            column_widths: [12.0, 12.0, 12.0],
        }
    }

    fn read_part(buffer: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(buffer)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut xml = String::new();
        part.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("/tmp/out"), "scott").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/out/scott.xlsx"));

        assert!(output_path(Path::new("."), "").is_err());
        assert!(output_path(Path::new("."), "..").is_err());
        assert!(output_path(Path::new("."), "a/b").is_err());
    }

    #[test]
    fn test_render_produces_named_sheets() {
        let mut workbook = WorkbookSpec::new(contents());
        workbook.tables.push(emp());

        let buffer = render_workbook(&workbook, &StyleConfig::default()).unwrap();
        let book_xml = read_part(&buffer, "xl/workbook.xml");
        let contents_pos = book_xml.find("name=\"目录\"").unwrap();
        let emp_pos = book_xml.find("name=\"EMP\"").unwrap();
        assert!(contents_pos < emp_pos);
    }

    #[test]
    fn test_render_writes_links_and_merged_banner() {
        let mut workbook = WorkbookSpec::new(contents());
        workbook.tables.push(emp());

        let buffer = render_workbook(&workbook, &StyleConfig::default()).unwrap();

        let contents_xml = read_part(&buffer, "xl/worksheets/sheet1.xml");
        assert!(contents_xml.contains("<hyperlink ref=\"A2\""));
        assert!(contents_xml.contains("EMP"));
        assert!(!contents_xml.contains("<mergeCell "));

        let emp_xml = read_part(&buffer, "xl/worksheets/sheet2.xml");
        assert!(emp_xml.contains("<mergeCell ref=\"A1:C1\"/>"));
        assert!(emp_xml.contains("<hyperlink ref=\"D1\""));
        assert!(emp_xml.contains("目录"));
    }

    #[test]
    fn test_invalid_title_is_a_workbook_error() {
        let mut sheet = contents();
        sheet.title = "bad/title".to_string();
        let workbook = WorkbookSpec::new(sheet);

        let err = render_workbook(&workbook, &StyleConfig::default()).unwrap_err();
        assert!(matches!(err, CommentBookError::Workbook { .. }));
    }

    #[tokio::test]
    async fn test_write_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("scott.xlsx");
        let workbook = WorkbookSpec::new(contents());

        let err = write_workbook(&workbook, &StyleConfig::default(), &path)
            .await
            .unwrap_err();
        assert!(matches!(err, CommentBookError::Io { .. }));
        assert!(!path.exists());
    }
}
