//! Error types for the sheetconf library

use thiserror::Error;

use crate::types::{CellValue, ElementKind, IdentifierKind};

/// Result type alias for sheetconf operations
pub type Result<T> = std::result::Result<T, ExcelError>;

/// Main error type for all workbook operations
#[derive(Error, Debug)]
pub enum ExcelError {
    /// A sheet, row, column or cell could not be resolved
    #[error(transparent)]
    ElementNotFound(#[from] ElementNotFoundError),

    /// Time pattern that cannot render a time of day (e.g. it has date fields)
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// Error occurred while writing a row
    #[error("Failed to write row {row} to sheet '{sheet}': {source}")]
    WriteRowError {
        row: u32,
        sheet: String,
        #[source]
        source: Box<ExcelError>,
    },

    /// Sheet name rejected by Excel naming rules
    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: String },

    /// A sheet with the same name already exists
    #[error("Sheet '{0}' already exists")]
    DuplicateSheet(String),

    /// Invalid cell reference
    #[error("Invalid cell reference: {0}")]
    InvalidCell(String),
}

impl ExcelError {
    /// Returns the lookup failure if this error is one, looking through
    /// [`ExcelError::WriteRowError`] wrappers.
    pub fn as_element_not_found(&self) -> Option<&ElementNotFoundError> {
        match self {
            ExcelError::ElementNotFound(err) => Some(err),
            ExcelError::WriteRowError { source, .. } => source.as_element_not_found(),
            _ => None,
        }
    }
}

/// Raised when a loader cannot locate a requested element.
///
/// The message is rendered once, at construction, from the element kind,
/// the identifier kind and the lookup keys:
///
/// ```
/// use sheetconf::error::ElementNotFoundError;
/// use sheetconf::types::{ElementKind, IdentifierKind};
///
/// let err = ElementNotFoundError::new(ElementKind::Sheet, IdentifierKind::Name, ["Report"]);
/// assert_eq!(err.to_string(), "There is no SHEET-NAME with '[Report]'");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ElementNotFoundError {
    element: ElementKind,
    identifier: IdentifierKind,
    position: Vec<CellValue>,
    message: String,
}

impl ElementNotFoundError {
    /// Create a new lookup failure.
    pub fn new<I, V>(element: ElementKind, identifier: IdentifierKind, position: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let position: Vec<CellValue> = position.into_iter().map(Into::into).collect();
        let rendered = position
            .iter()
            .map(render_position)
            .collect::<Vec<_>>()
            .join(", ");
        let message = format!("There is no {element}-{identifier} with '[{rendered}]'");

        ElementNotFoundError {
            element,
            identifier,
            position,
            message,
        }
    }

    /// Kind of element that was looked up
    pub fn element(&self) -> ElementKind {
        self.element
    }

    /// How the element was addressed
    pub fn identifier(&self) -> IdentifierKind {
        self.identifier
    }

    /// Lookup keys, in the order they were supplied
    pub fn position(&self) -> &[CellValue] {
        &self.position
    }

    /// Message rendered at construction
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Lookup keys render like a list of boxed values: whole floats keep their
/// fractional digit (`1.0`) and empty cells show as `null`.
fn render_position(value: &CellValue) -> String {
    match value {
        CellValue::Empty => "null".to_string(),
        CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.1}", f),
        other => other.to_string(),
    }
}
