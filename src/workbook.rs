//! In-memory workbook model
//!
//! [`Workbook`] is the collaborator that writer configurations and loaders
//! operate on: it owns sheets, rows and the style table. [`MemoryWorkbook`]
//! is the bundled implementation.

use indexmap::IndexMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ElementNotFoundError, ExcelError, Result};
use crate::types::{CellFormat, CellStyle, ElementKind, IdentifierKind, StyledCell};

/// Excel sheet name maximum length.
pub const MAX_SHEET_NAME_LEN: usize = 31;
/// Characters not allowed in sheet names.
pub const ILLEGAL_SHEET_NAME_CHARS: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];
/// Row height meaning "use the library default".
pub const DEFAULT_ROW_HEIGHT: i16 = -1;

static NEXT_WORKBOOK_ID: AtomicU64 = AtomicU64::new(1);

/// Spreadsheet document that owns sheets and cell styles
pub trait Workbook {
    /// Allocate a new, unstyled cell style owned by this workbook
    fn create_cell_style(&mut self) -> CellStyle;

    /// Formatting of a style, `None` if the handle belongs to another workbook
    fn cell_format(&self, style: CellStyle) -> Option<&CellFormat>;

    /// Mutable formatting of a style, `None` if the handle belongs to another workbook
    fn cell_format_mut(&mut self, style: CellStyle) -> Option<&mut CellFormat>;

    /// Create a sheet and return its 0-based index
    fn create_sheet(&mut self, name: &str) -> Result<usize>;

    /// Append a row to a sheet and return its 0-based row index
    fn append_row(&mut self, sheet: usize, row: SheetRow) -> Result<u32>;

    fn sheet_count(&self) -> usize;

    fn sheet(&self, index: usize) -> Option<&Sheet>;

    /// Index of the sheet with the given name (exact match)
    fn sheet_index(&self, name: &str) -> Option<usize>;

    /// Names of all sheets in creation order
    fn sheet_names(&self) -> Vec<String> {
        (0..self.sheet_count())
            .filter_map(|i| self.sheet(i).map(|s| s.name().to_string()))
            .collect()
    }
}

/// A row as stored in a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// Row height in twips, [`DEFAULT_ROW_HEIGHT`] for the default
    pub height: i16,
    pub cells: Vec<StyledCell>,
}

impl SheetRow {
    /// Create a row with the default height
    pub fn new(cells: Vec<StyledCell>) -> Self {
        SheetRow {
            height: DEFAULT_ROW_HEIGHT,
            cells,
        }
    }

    /// Set the row height
    pub fn with_height(mut self, height: i16) -> Self {
        self.height = height;
        self
    }

    /// Explicit height, `None` when the default applies
    pub fn custom_height(&self) -> Option<i16> {
        (self.height != DEFAULT_ROW_HEIGHT).then_some(self.height)
    }
}

/// A named worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<SheetRow>,
}

impl Sheet {
    fn new(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn row(&self, index: u32) -> Option<&SheetRow> {
        self.rows.get(index as usize)
    }

    /// Number of rows written
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }
}

/// Workbook held entirely in memory
#[derive(Debug)]
pub struct MemoryWorkbook {
    id: u64,
    sheets: IndexMap<String, Sheet>,
    styles: Vec<CellFormat>,
}

impl MemoryWorkbook {
    /// Create an empty workbook
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetconf::workbook::{MemoryWorkbook, Workbook};
    ///
    /// let mut workbook = MemoryWorkbook::new();
    /// workbook.create_sheet("Sheet1").unwrap();
    /// assert_eq!(workbook.sheet_names(), vec!["Sheet1"]);
    /// ```
    pub fn new() -> Self {
        MemoryWorkbook {
            id: NEXT_WORKBOOK_ID.fetch_add(1, Ordering::Relaxed),
            sheets: IndexMap::new(),
            styles: Vec::new(),
        }
    }

    /// Unique identifier stamped on every style this workbook creates
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Number of styles allocated so far
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    fn owns(&self, style: CellStyle) -> bool {
        style.workbook_id() == self.id
    }
}

impl Default for MemoryWorkbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbook for MemoryWorkbook {
    fn create_cell_style(&mut self) -> CellStyle {
        self.styles.push(CellFormat::default());
        CellStyle::new(self.id, (self.styles.len() - 1) as u32)
    }

    fn cell_format(&self, style: CellStyle) -> Option<&CellFormat> {
        if !self.owns(style) {
            return None;
        }
        self.styles.get(style.index() as usize)
    }

    fn cell_format_mut(&mut self, style: CellStyle) -> Option<&mut CellFormat> {
        if !self.owns(style) {
            return None;
        }
        self.styles.get_mut(style.index() as usize)
    }

    fn create_sheet(&mut self, name: &str) -> Result<usize> {
        validate_sheet_name(name)?;

        let lower = name.to_lowercase();
        if self.sheets.keys().any(|k| k.to_lowercase() == lower) {
            return Err(ExcelError::DuplicateSheet(name.to_string()));
        }

        let (index, _) = self.sheets.insert_full(name.to_string(), Sheet::new(name));
        tracing::debug!(sheet = name, index, "created sheet");
        Ok(index)
    }

    fn append_row(&mut self, sheet: usize, row: SheetRow) -> Result<u32> {
        let (_, target) = self.sheets.get_index_mut(sheet).ok_or_else(|| {
            ElementNotFoundError::new(ElementKind::Sheet, IdentifierKind::Index, [sheet])
        })?;
        target.rows.push(row);
        Ok(target.row_count() - 1)
    }

    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get_index(index).map(|(_, s)| s)
    }

    fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.get_index_of(name)
    }
}

/// Check a sheet name against Excel's naming rules
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty".to_string())
    } else if name.chars().count() > MAX_SHEET_NAME_LEN {
        Some(format!("longer than {} characters", MAX_SHEET_NAME_LEN))
    } else if let Some(c) = name.chars().find(|c| ILLEGAL_SHEET_NAME_CHARS.contains(c)) {
        Some(format!("contains '{}'", c))
    } else if name.starts_with('\'') || name.ends_with('\'') {
        Some("starts or ends with an apostrophe".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ExcelError::InvalidSheetName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
