//! Resolving sheets, rows, columns and cells
//!
//! Every lookup that cannot be resolved fails with
//! [`ExcelError::ElementNotFound`], carrying the element kind, how it was
//! addressed and the keys that were supplied.

use crate::error::{ElementNotFoundError, ExcelError, Result};
use crate::types::{
    format_reference, parse_reference, CellValue, ElementKind, IdentifierKind, Row,
};
use crate::workbook::{Sheet, SheetRow, Workbook};

/// Read access to a workbook with typed lookup failures
///
/// # Examples
///
/// ```
/// use sheetconf::loader::ExcelLoader;
/// use sheetconf::types::ElementKind;
/// use sheetconf::workbook::MemoryWorkbook;
///
/// let workbook = MemoryWorkbook::new();
/// let loader = ExcelLoader::new(&workbook);
///
/// let err = loader.sheet_by_name("Report").unwrap_err();
/// assert_eq!(err.as_element_not_found().unwrap().element(), ElementKind::Sheet);
/// assert_eq!(err.to_string(), "There is no SHEET-NAME with '[Report]'");
/// ```
pub struct ExcelLoader<'w, W: Workbook> {
    workbook: &'w W,
}

impl<'w, W: Workbook> ExcelLoader<'w, W> {
    pub fn new(workbook: &'w W) -> Self {
        ExcelLoader { workbook }
    }

    /// Get list of sheet names in the workbook
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Find a sheet by its exact name
    pub fn sheet_by_name(&self, name: &str) -> Result<&'w Sheet> {
        self.workbook
            .sheet_index(name)
            .and_then(|i| self.workbook.sheet(i))
            .ok_or_else(|| not_found(ElementKind::Sheet, IdentifierKind::Name, [name]))
    }

    /// Find a sheet by 0-based index
    pub fn sheet_by_index(&self, index: usize) -> Result<&'w Sheet> {
        self.workbook
            .sheet(index)
            .ok_or_else(|| not_found(ElementKind::Sheet, IdentifierKind::Index, [index]))
    }

    /// Find a row of a sheet by 0-based index
    pub fn row(&self, sheet_name: &str, index: u32) -> Result<&'w SheetRow> {
        let sheet = self.sheet_by_name(sheet_name)?;
        sheet.row(index).ok_or_else(|| {
            not_found(
                ElementKind::Row,
                IdentifierKind::Index,
                [CellValue::from(sheet_name), CellValue::from(index)],
            )
        })
    }

    /// Find a column by its label in the first row
    pub fn column_by_header(&self, sheet_name: &str, header: &str) -> Result<usize> {
        let sheet = self.sheet_by_name(sheet_name)?;
        sheet
            .row(0)
            .and_then(|row| {
                row.cells
                    .iter()
                    .position(|c| matches!(&c.value, CellValue::String(s) if s == header))
            })
            .ok_or_else(|| {
                not_found(
                    ElementKind::Column,
                    IdentifierKind::Name,
                    [sheet_name, header],
                )
            })
    }

    /// Read a cell by 0-based row and column
    pub fn cell(&self, sheet_name: &str, row: u32, col: u32) -> Result<&'w CellValue> {
        let sheet = self.sheet_by_name(sheet_name)?;
        sheet
            .row(row)
            .and_then(|r| r.cells.get(col as usize))
            .map(|c| &c.value)
            .ok_or_else(|| {
                not_found(
                    ElementKind::Cell,
                    IdentifierKind::Index,
                    [
                        CellValue::from(sheet_name),
                        CellValue::from(row),
                        CellValue::from(col),
                    ],
                )
            })
    }

    /// Read a cell by A1-style reference. Misses report the canonical form
    /// of the reference (`b2` is reported as `B2`).
    pub fn cell_by_reference(&self, sheet_name: &str, reference: &str) -> Result<&'w CellValue> {
        let (row, col) = parse_reference(reference)
            .ok_or_else(|| ExcelError::InvalidCell(reference.to_string()))?;
        let sheet = self.sheet_by_name(sheet_name)?;
        sheet
            .row(row)
            .and_then(|r| r.cells.get(col as usize))
            .map(|c| &c.value)
            .ok_or_else(|| {
                not_found(
                    ElementKind::Cell,
                    IdentifierKind::Address,
                    [sheet_name.to_string(), format_reference(row, col)],
                )
            })
    }

    /// Read all rows of a sheet as plain values
    pub fn rows(&self, sheet_name: &str) -> Result<Vec<Row>> {
        let sheet = self.sheet_by_name(sheet_name)?;
        Ok(sheet
            .rows()
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Row::new(
                    i as u32,
                    r.cells.iter().map(|c| c.value.clone()).collect(),
                )
            })
            .collect())
    }
}

fn not_found<I, V>(element: ElementKind, identifier: IdentifierKind, position: I) -> ExcelError
where
    I: IntoIterator<Item = V>,
    V: Into<CellValue>,
{
    let err = ElementNotFoundError::new(element, identifier, position);
    tracing::debug!(%element, %identifier, "{}", err);
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::MemoryWorkbook;
    use crate::writer::ExcelWriter;

    fn sample() -> MemoryWorkbook {
        let mut wb = MemoryWorkbook::new();
        {
            let mut writer = ExcelWriter::with_defaults(&mut wb);
            writer.write_row(["ID", "Name"]).unwrap();
            writer
                .write_row([CellValue::Int(1), CellValue::from("Alice")])
                .unwrap();
        }
        wb
    }

    fn lookup_error(err: ExcelError) -> ElementNotFoundError {
        err.as_element_not_found().cloned().unwrap()
    }

    #[test]
    fn test_sheet_lookup() {
        let wb = sample();
        let loader = ExcelLoader::new(&wb);

        assert_eq!(loader.sheet_by_name("Data 0").unwrap().name(), "Data 0");
        assert_eq!(loader.sheet_by_index(0).unwrap().name(), "Data 0");

        let err = lookup_error(loader.sheet_by_index(5).unwrap_err());
        assert_eq!(err.element(), ElementKind::Sheet);
        assert_eq!(err.identifier(), IdentifierKind::Index);
        assert_eq!(err.position(), &[CellValue::Int(5)]);
    }

    #[test]
    fn test_row_lookup() {
        let wb = sample();
        let loader = ExcelLoader::new(&wb);

        assert_eq!(loader.row("Data 0", 1).unwrap().cells.len(), 2);

        let err = loader.row("Data 0", 9).unwrap_err();
        assert_eq!(err.to_string(), "There is no ROW-INDEX with '[Data 0, 9]'");
    }

    #[test]
    fn test_missing_sheet_wins_over_missing_row() {
        let wb = sample();
        let loader = ExcelLoader::new(&wb);

        let err = lookup_error(loader.row("Other", 0).unwrap_err());
        assert_eq!(err.element(), ElementKind::Sheet);
    }

    #[test]
    fn test_column_by_header() {
        let wb = sample();
        let loader = ExcelLoader::new(&wb);

        assert_eq!(loader.column_by_header("Data 0", "Name").unwrap(), 1);

        let err = lookup_error(loader.column_by_header("Data 0", "Email").unwrap_err());
        assert_eq!(err.element(), ElementKind::Column);
        assert_eq!(err.identifier(), IdentifierKind::Name);
        assert_eq!(
            err.message(),
            "There is no COLUMN-NAME with '[Data 0, Email]'"
        );
    }

    #[test]
    fn test_cell_lookup() {
        let wb = sample();
        let loader = ExcelLoader::new(&wb);

        assert_eq!(loader.cell("Data 0", 1, 1).unwrap(), &CellValue::from("Alice"));
        assert_eq!(
            loader.cell_by_reference("Data 0", "A2").unwrap(),
            &CellValue::Int(1)
        );

        let err = lookup_error(loader.cell("Data 0", 1, 4).unwrap_err());
        assert_eq!(err.message(), "There is no CELL-INDEX with '[Data 0, 1, 4]'");

        let err = lookup_error(loader.cell_by_reference("Data 0", "C1").unwrap_err());
        assert_eq!(err.identifier(), IdentifierKind::Address);
        assert_eq!(err.message(), "There is no CELL-ADDRESS with '[Data 0, C1]'");

        let err = lookup_error(loader.cell_by_reference("Data 0", "aa7").unwrap_err());
        assert_eq!(err.position()[1], CellValue::from("AA7"));
    }

    #[test]
    fn test_malformed_reference() {
        let wb = sample();
        let loader = ExcelLoader::new(&wb);

        let err = loader.cell_by_reference("Data 0", "1A").unwrap_err();
        assert!(matches!(err, ExcelError::InvalidCell(_)));
        assert!(err.as_element_not_found().is_none());
    }

    #[test]
    fn test_rows() {
        let wb = sample();
        let loader = ExcelLoader::new(&wb);

        let rows = loader.rows("Data 0").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].to_strings(), vec!["ID", "Name"]);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].get(0).unwrap().as_i64(), Some(1));
    }
}
