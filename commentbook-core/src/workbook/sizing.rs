//! Column auto-sizing.
//!
//! A column's width comes from the longest cell text in it, header included.
//! Below the floor the floor wins; otherwise the column's scale is applied.

use crate::config::{StyleConfig, WidthScale};
use crate::models::SheetRow;

/// Length of a cell's text in characters.
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

/// Width of one column given all of its cell texts.
pub fn column_width<'a>(
    cells: impl IntoIterator<Item = &'a str>,
    scale: WidthScale,
    min_width: f64,
) -> f64 {
    let longest = cells.into_iter().map(text_length).max().unwrap_or(0);
    let longest = f64::from(u32::try_from(longest).unwrap_or(u32::MAX));

    if longest < min_width {
        min_width
    } else {
        scale.apply(longest)
    }
}

/// Widths of the three data columns of a sheet.
pub fn sheet_widths(
    header_labels: &[String; 3],
    rows: &[SheetRow],
    style: &StyleConfig,
) -> [f64; 3] {
    std::array::from_fn(|col| {
        let cells = std::iter::once(header_labels[col].as_str())
            .chain(rows.iter().map(|row| row.cells[col].as_str()));
        column_width(cells, style.column_scales[col], style.min_column_width)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(a: &str, b: &str, c: &str) -> SheetRow {
        SheetRow::plain([a.to_string(), b.to_string(), c.to_string()])
    }

    fn headers() -> [String; 3] {
        ["字段名".to_string(), "字段类型".to_string(), "注释".to_string()]
    }

    #[test]
    fn test_floor_applies_to_short_columns() {
        let width = column_width(["ID", "NAME"], WidthScale::Pad(4.0), 12.0);
        assert_eq!(width, 12.0);

        let width = column_width(std::iter::empty(), WidthScale::Multiply(1.5), 12.0);
        assert_eq!(width, 12.0);
    }

    #[test]
    fn test_scaling_per_column() {
        let long = "X".repeat(20);
        assert_eq!(column_width([long.as_str()], WidthScale::Pad(4.0), 12.0), 24.0);
        assert_eq!(column_width([long.as_str()], WidthScale::Identity, 12.0), 20.0);
        assert_eq!(column_width([long.as_str()], WidthScale::Multiply(1.5), 12.0), 30.0);
    }

    #[test]
    fn test_exactly_at_floor_is_scaled() {
        let twelve = "X".repeat(12);
        assert_eq!(column_width([twelve.as_str()], WidthScale::Pad(4.0), 12.0), 16.0);
        assert_eq!(column_width([twelve.as_str()], WidthScale::Identity, 12.0), 12.0);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert_eq!(text_length("注释"), 2);
        assert_eq!(text_length("EMP"), 3);
        assert_eq!(text_length(""), 0);
    }

    #[test]
    fn test_sheet_widths_include_header_and_empty_comments() {
        let style = StyleConfig::default();
        let rows = vec![
            row("CUSTOMER_REFERENCE_ID", "VARCHAR2(50)", ""),
            row("ID", "NUMBER(10,0)", "primary key of the order table"),
        ];

        let widths = sheet_widths(&headers(), &rows, &style);
        assert_eq!(widths[0], 21.0 + 4.0);
        assert_eq!(widths[1], 12.0);
        assert_eq!(widths[2], 30.0 * 1.5);
    }

    #[test]
    fn test_widths_never_below_floor_or_content() {
        let style = StyleConfig::default();
        let samples = [
            "",
            "a",
            "NUMBER(10,2)",
            "a much longer comment text here",
            "注释注释注释注释注释注释注释",
        ];

        for a in samples {
            for c in samples {
                let rows = vec![row(a, c, c)];
                let widths = sheet_widths(&headers(), &rows, &style);
                for (col, width) in widths.iter().enumerate() {
                    assert!(*width >= style.min_column_width);
                    let longest = rows[0].cells[col].chars().count() as f64;
                    assert!(*width >= longest);
                }
                assert_eq!(widths, sheet_widths(&headers(), &rows, &style));
            }
        }
    }
}
