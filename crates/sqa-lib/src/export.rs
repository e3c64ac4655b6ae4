//! Tabular export of issue lists to CSV and XLSX.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, info};

use crate::error::{Result, SqaError};
use crate::model::Issue;

/// Column headers, in output order.
pub const COLUMNS: [&str; 18] = [
    "ID",
    "Test Type",
    "Date Reported",
    "Reporter",
    "Page/Screen",
    "Test Case",
    "Issue Title",
    "Description",
    "Steps to Reproduce",
    "Expected Behavior",
    "Actual Behavior",
    "Severity",
    "Priority",
    "Status",
    "Browser/Device",
    "Assigned To",
    "Date Fixed",
    "Comments",
];

/// Worksheet name used in XLSX output.
pub const SHEET_NAME: &str = "Issues";

/// File base name used when none is configured.
pub const DEFAULT_BASENAME: &str = "sqa-issues";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = SqaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            _ => Err(SqaError::InvalidValue {
                field: "export format",
                value: s.to_string(),
            }),
        }
    }
}

/// `<dir>/<basename>.<ext>`
#[must_use]
pub fn output_path(dir: &Path, basename: &str, format: ExportFormat) -> PathBuf {
    dir.join(format!("{basename}.{}", format.extension()))
}

fn opt(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// One issue as a row of cells matching [`COLUMNS`]. Absent values are empty.
#[must_use]
pub fn issue_row(issue: &Issue) -> [String; 18] {
    [
        issue.id.clone(),
        issue.test_type.to_string(),
        issue.date_reported.to_string(),
        issue.reporter.clone(),
        issue.page_screen.clone(),
        issue.test_case.clone(),
        issue.title.clone(),
        opt(issue.description.as_ref()),
        opt(issue.steps_to_reproduce.as_ref()),
        opt(issue.expected_behavior.as_ref()),
        opt(issue.actual_behavior.as_ref()),
        issue.severity.to_string(),
        issue.priority.to_string(),
        issue.status.to_string(),
        opt(issue.browser_device.as_ref()),
        opt(issue.assigned_to.as_ref()),
        issue.date_fixed.map(|d| d.to_string()).unwrap_or_default(),
        opt(issue.comments.as_ref()),
    ]
}

/// Write a header row plus one row per issue as CSV.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn render_csv<W: Write>(issues: &[&Issue], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(COLUMNS)?;
    for issue in issues {
        csv.write_record(issue_row(issue))?;
    }
    csv.flush()?;
    Ok(())
}

fn write_csv(issues: &[&Issue], path: &Path) -> Result<()> {
    let file = fs::File::create(path)?;
    render_csv(issues, file)
}

fn write_xlsx(issues: &[&Issue], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }
    for (row, issue) in (1u32..).zip(issues) {
        for (col, cell) in (0u16..).zip(issue_row(issue)) {
            sheet.write_string(row, col, cell)?;
        }
    }
    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();

    workbook.save(path)?;
    Ok(())
}

/// Export `issues` to `path` in `format`.
///
/// # Errors
///
/// Returns `NothingToExport` for an empty list (no file is created), or an
/// I/O or writer error.
pub fn export(issues: &[&Issue], format: ExportFormat, path: &Path) -> Result<PathBuf> {
    if issues.is_empty() {
        return Err(SqaError::NothingToExport);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    debug!(rows = issues.len(), %format, path = %path.display(), "Exporting issues");
    match format {
        ExportFormat::Csv => write_csv(issues, path)?,
        ExportFormat::Xlsx => write_xlsx(issues, path)?,
    }
    info!(rows = issues.len(), path = %path.display(), "Export written");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Severity, Status, TestType};
    use chrono::NaiveDate;

    fn sample() -> Issue {
        Issue {
            id: "API-001".to_string(),
            test_type: TestType::Api,
            date_reported: NaiveDate::from_ymd_opt(2023, 10, 24).unwrap(),
            reporter: "Frank".to_string(),
            page_screen: "Profile API".to_string(),
            test_case: "GET /user".to_string(),
            title: "Leaks data, badly".to_string(),
            severity: Severity::Critical,
            status: Status::Fixed,
            date_fixed: NaiveDate::from_ymd_opt(2023, 10, 25),
            ..Default::default()
        }
    }

    #[test]
    fn row_matches_columns() {
        let row = issue_row(&sample());
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], "API-001");
        assert_eq!(row[1], "API Testing");
        assert_eq!(row[2], "2023-10-24");
        assert_eq!(row[7], "");
        assert_eq!(row[11], "Critical");
        assert_eq!(row[13], "Fixed");
        assert_eq!(row[16], "2023-10-25");
    }

    #[test]
    fn csv_has_header_and_quotes() {
        let issue = sample();
        let mut out = Vec::new();
        render_csv(&[&issue], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("ID,Test Type,Date Reported,Reporter"));
        assert!(lines.next().unwrap().contains("\"Leaks data, badly\""));
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_export_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), DEFAULT_BASENAME, ExportFormat::Csv);
        let err = export(&[], ExportFormat::Csv, &path).unwrap_err();
        assert!(matches!(err, SqaError::NothingToExport));
        assert!(!path.exists());
    }

    #[test]
    fn csv_export_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let issue = sample();
        let path = output_path(dir.path(), "report", ExportFormat::Csv);
        let written = export(&[&issue], ExportFormat::Csv, &path).unwrap();
        assert_eq!(written, dir.path().join("report.csv"));
        let text = fs::read_to_string(&written).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn xlsx_export_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let issue = sample();
        let path = output_path(dir.path(), DEFAULT_BASENAME, ExportFormat::Xlsx);
        export(&[&issue], ExportFormat::Xlsx, &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("excel".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
