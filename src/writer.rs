//! Configuration-driven workbook writing
//!
//! [`ExcelWriter`] appends rows to a [`Workbook`], consulting a
//! [`WriterConfiguration`] for sheet names, styles, the header row, row
//! height and date/time rendering.

use crate::config::{format_time, DefaultConfiguration, WriterConfiguration};
use crate::error::{ExcelError, Result};
use crate::header::ExcelHeader;
use crate::types::{CellStyle, CellValue, StyledCell};
use crate::workbook::{SheetRow, Workbook};

/// Workbook writer driven by a [`WriterConfiguration`]
///
/// # Examples
///
/// ```
/// use sheetconf::types::CellValue;
/// use sheetconf::workbook::{MemoryWorkbook, Workbook};
/// use sheetconf::writer::ExcelWriter;
///
/// let mut workbook = MemoryWorkbook::new();
/// {
///     let mut writer = ExcelWriter::with_defaults(&mut workbook);
///     writer.write_row(["Alice", "30"]).unwrap();
///     writer.write_row([CellValue::Int(1), CellValue::Bool(true)]).unwrap();
/// }
///
/// assert_eq!(workbook.sheet_names(), vec!["Data 0"]);
/// assert_eq!(workbook.sheet(0).unwrap().row_count(), 2);
/// ```
pub struct ExcelWriter<'w, W: Workbook, C: WriterConfiguration = DefaultConfiguration> {
    workbook: &'w mut W,
    config: C,
    time_format: String,
    header: Option<Option<ExcelHeader>>,
    current_sheet: Option<usize>,
    current_sheet_name: String,
    body_style: Option<CellStyle>,
    current_row: u32,
}

impl<'w, W: Workbook> ExcelWriter<'w, W, DefaultConfiguration> {
    /// Create a writer using [`DefaultConfiguration`]
    pub fn with_defaults(workbook: &'w mut W) -> Self {
        ExcelWriter::new(workbook, DefaultConfiguration)
    }
}

impl<'w, W: Workbook, C: WriterConfiguration> ExcelWriter<'w, W, C> {
    /// Create a writer over `workbook`. No sheet is created until the first
    /// [`add_sheet`](Self::add_sheet) or write.
    pub fn new(workbook: &'w mut W, config: C) -> Self {
        let time_format = config.time_format();
        ExcelWriter {
            workbook,
            config,
            time_format,
            header: None,
            current_sheet: None,
            current_sheet_name: String::new(),
            body_style: None,
            current_row: 0,
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Add the next sheet and switch to it.
    ///
    /// The sheet is named by the configuration from the workbook's current
    /// sheet count. If the configured header targets this sheet index, the
    /// header row is written first. Returns the new sheet index.
    pub fn add_sheet(&mut self) -> Result<usize> {
        let index = self.workbook.sheet_count();
        let name = self.config.sheet_name(index);
        let sheet = self.workbook.create_sheet(&name)?;

        self.current_sheet = Some(sheet);
        self.current_sheet_name = name;
        self.current_row = 0;
        self.body_style = Some(self.config.cell_style(&mut *self.workbook));

        if self.header.is_none() {
            self.header = Some(self.config.header(&mut *self.workbook));
        }

        let header = match &self.header {
            Some(Some(header)) if header.sheet_index() == sheet => Some(header.clone()),
            _ => None,
        };
        if let Some(header) = header {
            tracing::debug!(
                sheet = %self.current_sheet_name,
                columns = header.headers().len(),
                "writing header row"
            );
            let cells = header
                .headers()
                .iter()
                .map(|h| StyledCell {
                    value: CellValue::String(h.clone()),
                    style: header.style(),
                })
                .collect();
            self.append(sheet, SheetRow::new(cells).with_height(header.height()))?;
        }

        Ok(sheet)
    }

    /// Write a row of values to the current sheet (adding one if needed)
    pub fn write_row<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let sheet = match self.current_sheet {
            Some(sheet) => sheet,
            None => self.add_sheet()?,
        };

        let cells = values
            .into_iter()
            .map(|v| {
                Ok(StyledCell {
                    value: self.normalize(v.into())?,
                    style: self.body_style,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|e| self.row_error(e))?;
        self.append(sheet, SheetRow::new(cells).with_height(self.config.row_height()))
    }

    /// Write multiple rows at once (batch operation)
    pub fn write_rows<I, R, V>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Get current row number (0-based) in the current sheet
    pub fn current_row(&self) -> u32 {
        self.current_row
    }

    /// Index of the sheet being written, if any
    pub fn current_sheet(&self) -> Option<usize> {
        self.current_sheet
    }

    /// Name of the sheet being written, empty before the first sheet
    pub fn current_sheet_name(&self) -> &str {
        &self.current_sheet_name
    }

    fn normalize(&self, value: CellValue) -> Result<CellValue> {
        Ok(match value {
            CellValue::Time(t) => CellValue::String(format_time(&t, &self.time_format)?),
            CellValue::ZonedDateTime(dt) => {
                CellValue::DateTime(self.config.zone_id().to_local_datetime(&dt))
            }
            other => other,
        })
    }

    fn row_error(&self, source: ExcelError) -> ExcelError {
        ExcelError::WriteRowError {
            row: self.current_row,
            sheet: self.current_sheet_name.clone(),
            source: Box::new(source),
        }
    }

    fn append(&mut self, sheet: usize, row: SheetRow) -> Result<()> {
        if let Err(e) = self.workbook.append_row(sheet, row) {
            return Err(self.row_error(e));
        }
        self.current_row += 1;
        Ok(())
    }
}
