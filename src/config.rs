//! Writer configuration
//!
//! [`WriterConfiguration`] is the set of customization points an
//! [`ExcelWriter`](crate::writer::ExcelWriter) consults while materializing a
//! workbook. Every method has a default, so implementors override only what
//! they need. [`DefaultConfiguration`] overrides nothing and
//! [`WriterSettings`] is a plain-data implementation suited to loading from
//! configuration files.

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, TimeZone};
use std::fmt::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ExcelError, Result};
use crate::header::ExcelHeader;
use crate::types::{CellStyle, StylePreset};
use crate::workbook::{Workbook, DEFAULT_ROW_HEIGHT};

/// Time pattern used when a configuration does not override it
pub const DEFAULT_TIME_FORMAT: &str = "HH:mm:ss";
/// Sheet name prefix used when a configuration does not override it
pub const DEFAULT_SHEET_NAME_PREFIX: &str = "Data";

/// Customization points for writing a workbook
///
/// # Examples
///
/// ```
/// use sheetconf::config::WriterConfiguration;
/// use sheetconf::types::{CellStyle, StylePreset};
/// use sheetconf::workbook::Workbook;
///
/// struct Report;
///
/// impl WriterConfiguration for Report {
///     fn sheet_name(&self, index: usize) -> String {
///         format!("Report {}", index + 1)
///     }
///
///     fn cell_style(&self, workbook: &mut dyn Workbook) -> CellStyle {
///         let style = workbook.create_cell_style();
///         if let Some(format) = workbook.cell_format_mut(style) {
///             format.preset = StylePreset::BorderThin;
///         }
///         style
///     }
/// }
///
/// assert_eq!(Report.sheet_name(0), "Report 1");
/// assert_eq!(Report.time_format(), "HH:mm:ss");
/// ```
pub trait WriterConfiguration {
    /// Sheet name for the sheet at `index`
    fn sheet_name(&self, index: usize) -> String {
        format!("{} {}", DEFAULT_SHEET_NAME_PREFIX, index)
    }

    /// Pattern for time-of-day values (`HH:mm:ss` by default)
    fn time_format(&self) -> String {
        DEFAULT_TIME_FORMAT.to_string()
    }

    /// Zone used to turn offset date-times into local ones
    fn zone_id(&self) -> ZoneId {
        ZoneId::system_default()
    }

    /// Style for body cells. The default allocates a new, unstyled style in
    /// `workbook`; the workbook owns it.
    fn cell_style(&self, workbook: &mut dyn Workbook) -> CellStyle {
        workbook.create_cell_style()
    }

    /// Custom header row, `None` for no header
    fn header(&self, _workbook: &mut dyn Workbook) -> Option<ExcelHeader> {
        None
    }

    /// Body row height, `-1` for the library default
    fn row_height(&self) -> i16 {
        DEFAULT_ROW_HEIGHT
    }
}

impl<C: WriterConfiguration + ?Sized> WriterConfiguration for &C {
    fn sheet_name(&self, index: usize) -> String {
        (**self).sheet_name(index)
    }

    fn time_format(&self) -> String {
        (**self).time_format()
    }

    fn zone_id(&self) -> ZoneId {
        (**self).zone_id()
    }

    fn cell_style(&self, workbook: &mut dyn Workbook) -> CellStyle {
        (**self).cell_style(workbook)
    }

    fn header(&self, workbook: &mut dyn Workbook) -> Option<ExcelHeader> {
        (**self).header(workbook)
    }

    fn row_height(&self) -> i16 {
        (**self).row_height()
    }
}

/// Configuration with no overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultConfiguration;

impl WriterConfiguration for DefaultConfiguration {}

/// Time zone used for date-time conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneId {
    /// The system's local zone
    Local,
    Utc,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl ZoneId {
    /// The system's local zone
    pub fn system_default() -> Self {
        ZoneId::Local
    }

    /// Fixed offset east of UTC, `None` if out of range (±24h)
    pub fn from_offset_seconds(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(ZoneId::Fixed)
    }

    /// Wall-clock time of `datetime` in this zone
    pub fn to_local_datetime<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> NaiveDateTime {
        match self {
            ZoneId::Local => datetime.with_timezone(&chrono::Local).naive_local(),
            ZoneId::Utc => datetime.naive_utc(),
            ZoneId::Fixed(offset) => datetime.with_timezone(offset).naive_local(),
        }
    }
}

impl Default for ZoneId {
    fn default() -> Self {
        Self::system_default()
    }
}

/// Render a time of day with a `HH:mm:ss`-style pattern.
///
/// ```
/// use chrono::NaiveTime;
/// use sheetconf::config::format_time;
///
/// let t = NaiveTime::from_hms_opt(13, 5, 9).unwrap();
/// assert_eq!(format_time(&t, "HH:mm:ss").unwrap(), "13:05:09");
/// assert_eq!(format_time(&t, "hh:mm a").unwrap(), "01:05 PM");
///
/// // a time of day has no date fields
/// assert!(format_time(&t, "yyyy-MM-dd HH:mm").is_err());
/// ```
pub fn format_time(time: &NaiveTime, pattern: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", time.format(&to_strftime(pattern)))
        .map_err(|_| ExcelError::InvalidTimeFormat(pattern.to_string()))?;
    Ok(out)
}

/// Translate a date/time pattern (`yyyy-MM-dd HH:mm:ss.SSS`, `'quoted'`
/// literals) into chrono's strftime syntax.
pub fn to_strftime(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // '' is an escaped quote, otherwise everything up to the next quote is literal
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        let mut run = 1;
        while chars.get(i + run) == Some(&c) {
            run += 1;
        }

        let spec = match (c, run) {
            ('y', 2) => Some("%y"),
            ('y', _) => Some("%Y"),
            ('M', 1) => Some("%-m"),
            ('M', 2) => Some("%m"),
            ('M', 3) => Some("%b"),
            ('M', _) => Some("%B"),
            ('d', 1) => Some("%-d"),
            ('d', _) => Some("%d"),
            ('E', 1..=3) => Some("%a"),
            ('E', _) => Some("%A"),
            ('H', 1) => Some("%-H"),
            ('H', _) => Some("%H"),
            ('h', 1) => Some("%-I"),
            ('h', _) => Some("%I"),
            ('m', 1) => Some("%-M"),
            ('m', _) => Some("%M"),
            ('s', 1) => Some("%-S"),
            ('s', _) => Some("%S"),
            ('S', 1..=3) => Some("%3f"),
            ('S', 4..=6) => Some("%6f"),
            ('S', _) => Some("%9f"),
            ('a', _) => Some("%p"),
            _ => None,
        };

        match spec {
            Some(spec) => out.push_str(spec),
            None => (0..run).for_each(|_| push_literal(&mut out, c)),
        }
        i += run;
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Header part of [`WriterSettings`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeaderSettings {
    pub labels: Vec<String>,
    pub style: StylePreset,
    pub height: i16,
    pub sheet_index: usize,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        HeaderSettings {
            labels: Vec::new(),
            style: StylePreset::HeaderBold,
            height: DEFAULT_ROW_HEIGHT,
            sheet_index: 0,
        }
    }
}

/// Plain-data writer configuration.
///
/// Every field defaults to the same value [`DefaultConfiguration`] yields,
/// so partially specified settings behave like the defaults for the rest.
///
/// # Examples
///
/// ```
/// use sheetconf::config::{WriterConfiguration, WriterSettings};
///
/// let settings = WriterSettings {
///     sheet_name_prefix: "Export".to_string(),
///     row_height: 320,
///     ..Default::default()
/// };
///
/// assert_eq!(settings.sheet_name(2), "Export 2");
/// assert_eq!(settings.row_height(), 320);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterSettings {
    pub sheet_name_prefix: String,
    pub time_format: String,
    /// Offset east of UTC in seconds, `None` for the system zone
    pub utc_offset_seconds: Option<i32>,
    pub row_height: i16,
    /// Preset applied to the body cell style
    pub body_style: StylePreset,
    pub header: Option<HeaderSettings>,
}

impl Default for WriterSettings {
    fn default() -> Self {
        WriterSettings {
            sheet_name_prefix: DEFAULT_SHEET_NAME_PREFIX.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            utc_offset_seconds: None,
            row_height: DEFAULT_ROW_HEIGHT,
            body_style: StylePreset::Default,
            header: None,
        }
    }
}

impl WriterSettings {
    fn styled(workbook: &mut dyn Workbook, preset: StylePreset) -> CellStyle {
        let style = workbook.create_cell_style();
        if let Some(format) = workbook.cell_format_mut(style) {
            format.preset = preset;
        }
        style
    }
}

impl WriterConfiguration for WriterSettings {
    fn sheet_name(&self, index: usize) -> String {
        format!("{} {}", self.sheet_name_prefix, index)
    }

    fn time_format(&self) -> String {
        self.time_format.clone()
    }

    fn zone_id(&self) -> ZoneId {
        match self.utc_offset_seconds {
            None => ZoneId::system_default(),
            Some(seconds) => ZoneId::from_offset_seconds(seconds).unwrap_or_else(|| {
                tracing::warn!(seconds, "UTC offset out of range, using system zone");
                ZoneId::system_default()
            }),
        }
    }

    fn cell_style(&self, workbook: &mut dyn Workbook) -> CellStyle {
        Self::styled(workbook, self.body_style)
    }

    fn header(&self, workbook: &mut dyn Workbook) -> Option<ExcelHeader> {
        let settings = self.header.as_ref()?;
        let style = Self::styled(workbook, settings.style);

        Some(
            ExcelHeader::builder()
                .headers(&settings.labels)
                .style(style)
                .height(settings.height)
                .sheet_index(settings.sheet_index)
                .build(),
        )
    }

    fn row_height(&self) -> i16 {
        self.row_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::MemoryWorkbook;
    use chrono::NaiveDate;

    #[test]
    fn test_default_sheet_names() {
        let config = DefaultConfiguration;
        assert_eq!(config.sheet_name(0), "Data 0");
        assert_eq!(config.sheet_name(7), "Data 7");
    }

    #[test]
    fn test_default_values() {
        let config = DefaultConfiguration;
        assert_eq!(config.time_format(), "HH:mm:ss");
        assert_eq!(config.row_height(), -1);
        assert_eq!(config.zone_id(), ZoneId::Local);
    }

    #[test]
    fn test_default_header_is_none() {
        let mut wb = MemoryWorkbook::new();
        assert!(DefaultConfiguration.header(&mut wb).is_none());
        assert_eq!(wb.style_count(), 0);
    }

    #[test]
    fn test_default_cell_style_is_fresh_and_unstyled() {
        let mut wb = MemoryWorkbook::new();
        let first = DefaultConfiguration.cell_style(&mut wb);
        let second = DefaultConfiguration.cell_style(&mut wb);

        assert_ne!(first, second);
        assert_eq!(first.workbook_id(), wb.id());
        assert!(wb.cell_format(first).unwrap().is_unstyled());
        assert_eq!(wb.style_count(), 2);
    }

    #[test]
    fn test_reference_forwards_overrides() {
        let settings = WriterSettings {
            sheet_name_prefix: "Sheet".to_string(),
            ..Default::default()
        };
        let by_ref = &settings;
        assert_eq!(by_ref.sheet_name(3), "Sheet 3");
    }

    #[test]
    fn test_to_strftime() {
        assert_eq!(to_strftime("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(to_strftime("yyyy-MM-dd"), "%Y-%m-%d");
        assert_eq!(to_strftime("HH'h'mm"), "%Hh%M");
        assert_eq!(to_strftime("HH 'o''clock'"), "%H o'clock");
        assert_eq!(to_strftime("ss.SSS"), "%S.%3f");
        assert_eq!(to_strftime("100%"), "100%%");
    }

    #[test]
    fn test_format_time() {
        let t = NaiveTime::from_hms_milli_opt(8, 5, 9, 123).unwrap();
        assert_eq!(format_time(&t, "HH:mm:ss").unwrap(), "08:05:09");
        assert_eq!(format_time(&t, "H:m:s").unwrap(), "8:5:9");
        assert_eq!(format_time(&t, "HH:mm:ss.SSS").unwrap(), "08:05:09.123");
        assert_eq!(format_time(&t, "HH'h'mm").unwrap(), "08h05");
    }

    #[test]
    fn test_format_time_rejects_date_fields() {
        let t = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        for pattern in ["yyyy-MM-dd HH:mm", "EEE HH:mm"] {
            let err = format_time(&t, pattern).unwrap_err();
            assert!(matches!(&err, ExcelError::InvalidTimeFormat(p) if p == pattern));
        }
    }

    #[test]
    fn test_zone_conversion() {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let dt = offset
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 3, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
            )
            .unwrap();

        let utc = ZoneId::Utc.to_local_datetime(&dt);
        assert_eq!(utc.format("%Y-%m-%d %H:%M").to_string(), "2024-03-01 02:00");

        let tokyo = ZoneId::from_offset_seconds(9 * 3600).unwrap();
        let local = tokyo.to_local_datetime(&dt);
        assert_eq!(local.format("%H:%M").to_string(), "11:00");

        assert!(ZoneId::from_offset_seconds(25 * 3600).is_none());
    }

    #[test]
    fn test_settings_defaults_match_default_configuration() {
        let settings = WriterSettings::default();
        let mut wb = MemoryWorkbook::new();

        assert_eq!(settings.sheet_name(4), DefaultConfiguration.sheet_name(4));
        assert_eq!(settings.time_format(), DefaultConfiguration.time_format());
        assert_eq!(settings.row_height(), DefaultConfiguration.row_height());
        assert_eq!(settings.zone_id(), ZoneId::Local);
        assert!(settings.header(&mut wb).is_none());

        let style = settings.cell_style(&mut wb);
        assert!(wb.cell_format(style).unwrap().is_unstyled());
    }

    #[test]
    fn test_settings_invalid_offset_falls_back() {
        let settings = WriterSettings {
            utc_offset_seconds: Some(100_000),
            ..Default::default()
        };
        assert_eq!(settings.zone_id(), ZoneId::Local);
    }

    #[test]
    fn test_settings_header() {
        let settings = WriterSettings {
            header: Some(HeaderSettings {
                labels: vec!["ID".to_string(), "Name".to_string()],
                height: 450,
                sheet_index: 1,
                ..Default::default()
            }),
            body_style: StylePreset::BorderThin,
            ..Default::default()
        };
        let mut wb = MemoryWorkbook::new();

        let header = settings.header(&mut wb).unwrap();
        assert_eq!(header.headers(), ["ID", "Name"]);
        assert_eq!(header.height(), 450);
        assert_eq!(header.sheet_index(), 1);
        let style = header.style().unwrap();
        assert_eq!(wb.cell_format(style).unwrap().preset, StylePreset::HeaderBold);

        let body = settings.cell_style(&mut wb);
        assert_eq!(wb.cell_format(body).unwrap().preset, StylePreset::BorderThin);
    }
}
