//! # sheetconf
//!
//! Writer configuration, header descriptors and typed lookup errors for
//! Excel workbooks.
//!
//! ## Features
//!
//! - **Writer Configuration**: Override sheet names, cell styles, header row,
//!   row height, time format and time zone, keeping defaults for the rest
//! - **Header Descriptors**: Immutable header rows assembled with a builder
//! - **Typed Lookup Errors**: Missing sheets, rows, columns and cells report
//!   what was looked up, how, and with which keys
//! - **Workbook-Owned Styles**: Style handles are scoped to the workbook that
//!   created them
//!
//! ## Quick Start
//!
//! ### Writing with a configuration
//!
//! ```rust
//! use sheetconf::config::WriterConfiguration;
//! use sheetconf::header::ExcelHeader;
//! use sheetconf::workbook::{MemoryWorkbook, Workbook};
//! use sheetconf::writer::ExcelWriter;
//!
//! struct Orders;
//!
//! impl WriterConfiguration for Orders {
//!     fn sheet_name(&self, index: usize) -> String {
//!         format!("Orders {}", index)
//!     }
//!
//!     fn header(&self, workbook: &mut dyn Workbook) -> Option<ExcelHeader> {
//!         let style = workbook.create_cell_style();
//!         Some(ExcelHeader::builder().headers(["ID", "Item"]).style(style).build())
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut workbook = MemoryWorkbook::new();
//! let mut writer = ExcelWriter::new(&mut workbook, Orders);
//! writer.write_row(["1", "Keyboard"])?;
//! writer.write_row(["2", "Mouse"])?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Handling lookup failures
//!
//! ```rust
//! use sheetconf::loader::ExcelLoader;
//! use sheetconf::types::ElementKind;
//! use sheetconf::workbook::MemoryWorkbook;
//!
//! let workbook = MemoryWorkbook::new();
//! let loader = ExcelLoader::new(&workbook);
//!
//! match loader.sheet_by_name("Report") {
//!     Ok(sheet) => println!("found {}", sheet.name()),
//!     Err(err) => match err.as_element_not_found() {
//!         Some(missing) if missing.element() == ElementKind::Sheet => {
//!             println!("{}", missing);
//!         }
//!         _ => panic!("unexpected error: {}", err),
//!     },
//! }
//! ```

pub mod config;
pub mod error;
pub mod header;
pub mod loader;
pub mod types;
pub mod workbook;
pub mod writer;

pub use config::{DefaultConfiguration, WriterConfiguration, WriterSettings, ZoneId};
pub use error::{ElementNotFoundError, ExcelError, Result};
pub use header::{ExcelHeader, ExcelHeaderBuilder};
pub use loader::ExcelLoader;
pub use types::{CellFormat, CellStyle, CellValue, ElementKind, IdentifierKind, StylePreset};
pub use workbook::{MemoryWorkbook, Workbook};
pub use writer::ExcelWriter;
