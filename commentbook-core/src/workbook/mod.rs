//! Workbook construction and output.
//!
//! - `builder`: descriptors to [`SheetSpec`](crate::models::SheetSpec)s
//! - `sizing`: column auto-sizing
//! - `titles`: sheet titles, link anchors and title uniqueness
//! - `writer`: xlsx rendering and the file write

pub mod builder;
pub mod sizing;
pub mod titles;
pub mod writer;

pub use builder::WorkbookBuilder;
pub use writer::{output_file_name, output_path, render_workbook, write_workbook};
