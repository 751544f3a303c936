//! Header row descriptor

use crate::types::CellStyle;
use crate::workbook::DEFAULT_ROW_HEIGHT;

/// Immutable description of a header row: labels, style, height and the
/// sheet it applies to.
///
/// Built with [`ExcelHeaderBuilder`]:
///
/// ```
/// use sheetconf::header::ExcelHeader;
///
/// let header = ExcelHeader::builder()
///     .headers(["ID", "Name"])
///     .height(400)
///     .build();
///
/// assert_eq!(header.headers(), ["ID", "Name"]);
/// assert_eq!(header.sheet_index(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcelHeader {
    headers: Vec<String>,
    style: Option<CellStyle>,
    height: i16,
    sheet_index: usize,
}

impl ExcelHeader {
    /// Start a new builder with default values
    pub fn builder() -> ExcelHeaderBuilder {
        ExcelHeaderBuilder::new()
    }

    /// Column labels, empty if never set
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Style owned by the workbook that created it
    pub fn style(&self) -> Option<CellStyle> {
        self.style
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    /// Sheet the header is written to
    pub fn sheet_index(&self) -> usize {
        self.sheet_index
    }
}

/// Builder for [`ExcelHeader`].
///
/// Setters overwrite earlier values. `build` does not consume the builder and
/// performs no validation.
#[derive(Debug, Clone)]
pub struct ExcelHeaderBuilder {
    headers: Vec<String>,
    style: Option<CellStyle>,
    height: i16,
    sheet_index: usize,
}

impl ExcelHeaderBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        ExcelHeaderBuilder {
            headers: Vec::new(),
            style: None,
            height: DEFAULT_ROW_HEIGHT,
            sheet_index: 0,
        }
    }

    /// Set the column labels
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.headers = headers
            .into_iter()
            .map(|h| h.as_ref().to_string())
            .collect();
        self
    }

    /// Set the header cell style
    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the header row height
    pub fn height(mut self, height: i16) -> Self {
        self.height = height;
        self
    }

    /// Set the target sheet index
    pub fn sheet_index(mut self, sheet_index: usize) -> Self {
        self.sheet_index = sheet_index;
        self
    }

    /// Snapshot the current state
    pub fn build(&self) -> ExcelHeader {
        ExcelHeader {
            headers: self.headers.clone(),
            style: self.style,
            height: self.height,
            sheet_index: self.sheet_index,
        }
    }
}

impl Default for ExcelHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::{MemoryWorkbook, Workbook};

    #[test]
    fn test_builder_defaults() {
        let header = ExcelHeaderBuilder::new().build();
        assert!(header.headers().is_empty());
        assert_eq!(header.style(), None);
        assert_eq!(header.height(), -1);
        assert_eq!(header.sheet_index(), 0);
    }

    #[test]
    fn test_builder_overwrite() {
        let header = ExcelHeader::builder()
            .headers(["A", "B"])
            .headers(["X"])
            .build();
        assert_eq!(header.headers(), ["X"]);
    }

    #[test]
    fn test_build_twice_yields_equal_snapshots() {
        let mut wb = MemoryWorkbook::new();
        let style = wb.create_cell_style();
        let builder = ExcelHeader::builder()
            .headers(vec!["ID".to_string(), "Name".to_string()])
            .style(style)
            .height(500)
            .sheet_index(2);

        let first = builder.build();
        let second = builder.build();
        assert_eq!(first, second);
        assert_eq!(first.style(), Some(style));
        assert_eq!(first.height(), 500);
        assert_eq!(first.sheet_index(), 2);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_setters() {
        let builder = ExcelHeader::builder().headers(["A"]);
        let before = builder.build();
        let after = builder.headers(["B"]).sheet_index(1).build();

        assert_eq!(before.headers(), ["A"]);
        assert_eq!(before.sheet_index(), 0);
        assert_eq!(after.headers(), ["B"]);
        assert_eq!(after.sheet_index(), 1);
    }
}
