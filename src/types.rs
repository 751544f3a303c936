//! Type definitions for workbook data

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structural spreadsheet elements that can be looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ElementKind {
    Sheet,
    Row,
    Column,
    Cell,
}

impl ElementKind {
    /// Upper-case name used in messages (e.g. `SHEET`)
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Sheet => "SHEET",
            ElementKind::Row => "ROW",
            ElementKind::Column => "COLUMN",
            ElementKind::Cell => "CELL",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Addressing scheme used for a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum IdentifierKind {
    /// By name (sheet name, header label)
    Name,
    /// By 0-based index
    Index,
    /// By A1-style reference
    Address,
}

impl IdentifierKind {
    /// Upper-case name used in messages (e.g. `NAME`)
    pub fn name(&self) -> &'static str {
        match self {
            IdentifierKind::Name => "NAME",
            IdentifierKind::Index => "INDEX",
            IdentifierKind::Address => "ADDRESS",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formatting presets a [`CellFormat`] starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum StylePreset {
    /// No formatting
    #[default]
    Default,
    /// Bold header text
    HeaderBold,
    /// `#,##0`
    NumberInteger,
    /// `#,##0.00`
    NumberDecimal,
    /// `$#,##0.00`
    NumberCurrency,
    /// `0.00%`
    NumberPercentage,
    /// `MM/DD/YYYY`
    DateDefault,
    /// `MM/DD/YYYY HH:MM:SS`
    DateTimestamp,
    TextBold,
    TextItalic,
    HighlightYellow,
    HighlightGreen,
    HighlightRed,
    /// Thin borders on all sides
    BorderThin,
}

/// Handle to a cell style owned by a workbook.
///
/// The handle is only meaningful for the workbook that created it; the
/// formatting data itself lives in that workbook (see
/// [`Workbook::cell_format`](crate::workbook::Workbook::cell_format)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellStyle {
    workbook: u64,
    index: u32,
}

impl CellStyle {
    pub(crate) fn new(workbook: u64, index: u32) -> Self {
        CellStyle { workbook, index }
    }

    /// Identifier of the owning workbook
    pub fn workbook_id(&self) -> u64 {
        self.workbook
    }

    /// Position of the style in the owning workbook's style table
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Formatting attached to a [`CellStyle`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellFormat {
    /// Base preset
    pub preset: StylePreset,
    /// Custom number format code, overriding the preset's
    pub num_format: Option<String>,
}

impl CellFormat {
    /// True when nothing has been customized
    pub fn is_unstyled(&self) -> bool {
        self.preset == StylePreset::Default && self.num_format.is_none()
    }
}

/// Styled cell value (combines value with formatting)
#[derive(Debug, Clone, PartialEq)]
pub struct StyledCell {
    /// The cell value
    pub value: CellValue,
    /// The cell style, `None` for the workbook default
    pub style: Option<CellStyle>,
}

impl From<CellValue> for StyledCell {
    fn from(value: CellValue) -> Self {
        StyledCell { value, style: None }
    }
}

/// Represents a single cell value in a worksheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Local date-time
    DateTime(NaiveDateTime),
    /// Date-time with a UTC offset; writers convert it to a local
    /// [`CellValue::DateTime`] in the configured zone
    ZonedDateTime(DateTime<FixedOffset>),
    /// Time of day; writers render it with the configured time format
    Time(NaiveTime),
}

impl CellValue {
    /// Convert cell value to string
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::ZonedDateTime(d) => d.to_rfc3339(),
            CellValue::Time(t) => t.format("%H:%M:%S").to_string(),
        }
    }

    /// Check if cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to convert to integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) => Some(*f as i64),
            CellValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<u32> for CellValue {
    fn from(i: u32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<usize> for CellValue {
    fn from(i: usize) -> Self {
        CellValue::Int(i as i64)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveTime> for CellValue {
    fn from(t: NaiveTime) -> Self {
        CellValue::Time(t)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(d: NaiveDateTime) -> Self {
        CellValue::DateTime(d)
    }
}

impl From<DateTime<FixedOffset>> for CellValue {
    fn from(d: DateTime<FixedOffset>) -> Self {
        CellValue::ZonedDateTime(d)
    }
}

/// Column letters for a 0-based index (0 -> A, 25 -> Z, 26 -> AA)
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut col = col + 1;

    while col > 0 {
        col -= 1;
        result.insert(0, (b'A' + (col % 26) as u8) as char);
        col /= 26;
    }

    result
}

/// Canonical A1-style reference for 0-based `(row, col)`
pub fn format_reference(row: u32, col: u32) -> String {
    format!("{}{}", col_to_letter(col), row + 1)
}

/// Parse an A1-style reference into 0-based `(row, col)`.
///
/// Returns `None` for anything that is not letters followed by a positive
/// row number (`$` anchors are not accepted).
pub fn parse_reference(reference: &str) -> Option<(u32, u32)> {
    let split = reference
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(reference.len());
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || letters.len() > 3 || digits.is_empty() {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut col: u32 = 0;
    for b in letters.bytes() {
        col = col * 26 + u32::from(b.to_ascii_uppercase() - b'A') + 1;
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }

    Some((row - 1, col - 1))
}

/// Represents a row of cells
#[derive(Debug, Clone)]
pub struct Row {
    /// Row index (0-based)
    pub index: u32,
    /// Cells in this row
    pub cells: Vec<CellValue>,
}

impl Row {
    /// Create a new row
    pub fn new(index: u32, cells: Vec<CellValue>) -> Self {
        Row { index, cells }
    }

    /// Get cell at column index
    pub fn get(&self, col: usize) -> Option<&CellValue> {
        self.cells.get(col)
    }

    /// Get number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if row is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() || self.cells.iter().all(|c| c.is_empty())
    }

    /// Convert row to vector of strings
    pub fn to_strings(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.as_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reference() {
        assert_eq!(format_reference(0, 0), "A1");
        assert_eq!(format_reference(0, 25), "Z1");
        assert_eq!(format_reference(9, 26), "AA10");
        assert_eq!(format_reference(1, 701), "ZZ2");
        assert_eq!(format_reference(1, 702), "AAA2");
    }

    #[test]
    fn test_parse_reference() {
        assert_eq!(parse_reference("A1"), Some((0, 0)));
        assert_eq!(parse_reference("b2"), Some((1, 1)));
        assert_eq!(parse_reference("AA10"), Some((9, 26)));
        assert_eq!(parse_reference("A0"), None);
        assert_eq!(parse_reference("12"), None);
        assert_eq!(parse_reference("B"), None);
        assert_eq!(parse_reference("B2C"), None);
        assert_eq!(parse_reference(""), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ElementKind::Sheet.to_string(), "SHEET");
        assert_eq!(ElementKind::Column.to_string(), "COLUMN");
        assert_eq!(IdentifierKind::Address.to_string(), "ADDRESS");
    }

    #[test]
    fn test_cell_value_display() {
        let time = NaiveTime::from_hms_opt(8, 5, 0).unwrap();
        assert_eq!(CellValue::from(time).to_string(), "08:05:00");
        assert_eq!(CellValue::from(7usize).to_string(), "7");
        assert_eq!(CellValue::from("Report").to_string(), "Report");
    }

    #[test]
    fn test_unstyled_format() {
        assert!(CellFormat::default().is_unstyled());
        let fmt = CellFormat {
            preset: StylePreset::HeaderBold,
            num_format: None,
        };
        assert!(!fmt.is_unstyled());
    }
}
