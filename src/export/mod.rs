//! Export adapter: writes a snapshot of the records to a file.
//!
//! Two independent formats are supported, a spreadsheet-style CSV table and a
//! paginated plain-text document. Both take the same column list and both
//! export every record in the store, not just the visible ones.
//!
//! # Example
//!
//! ```no_run
//! use petdesk::domain::Pet;
//! use petdesk::export::{default_columns, export_to_dir, ExportFormat};
//!
//! let pets = vec![Pet::new("Fido", "dog").with_id(1)];
//! let path = export_to_dir(".", ExportFormat::Spreadsheet, &pets, &default_columns(), chrono::Utc::now())?;
//! println!("wrote {}", path.display());
//! # Ok::<(), petdesk::PetdeskError>(())
//! ```

pub mod document;
pub mod spreadsheet;

use crate::domain::error::{PetdeskError, Result};
use crate::domain::{Pet, PetField};
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use document::DocumentExporter;
pub use spreadsheet::SpreadsheetExporter;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Tabular CSV file.
    Spreadsheet,
    /// Paginated plain-text report.
    Document,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Spreadsheet => "csv",
            Self::Document => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Spreadsheet => "spreadsheet",
            Self::Document => "document",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = PetdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" | "excel" | "xlsx" | "spreadsheet" => Ok(Self::Spreadsheet),
            "pdf" | "txt" | "document" => Ok(Self::Document),
            other => Err(PetdeskError::Export(format!("unknown export format: {other}"))),
        }
    }
}

/// One exported column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub field: PetField,
    pub header: String,
}

/// `[{id, Id}, {name, Name}, {description, Description}]`.
#[must_use]
pub fn default_columns() -> Vec<Column> {
    PetField::ALL
        .iter()
        .map(|field| Column {
            field: *field,
            header: field.header().to_string(),
        })
        .collect()
}

/// Serializes records in one format.
pub trait Exporter {
    /// Writes `pets` as described by `columns` to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Export`] or [`PetdeskError::Io`] if writing fails.
    fn write(&self, pets: &[Pet], columns: &[Column], out: &mut dyn Write) -> Result<()>;
}

/// Exporter for `format`.
#[must_use]
pub fn exporter(format: ExportFormat) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Spreadsheet => Box::new(SpreadsheetExporter),
        ExportFormat::Document => Box::new(DocumentExporter::default()),
    }
}

/// `Pets_export_<unix millis>.<ext>`.
#[must_use]
pub fn file_name(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!("Pets_export_{}.{}", at.timestamp_millis(), format.extension())
}

/// Writes an export file into `dir` and returns its path.
///
/// # Errors
///
/// Returns an error if the directory does not exist or the file cannot be
/// written.
pub fn export_to_dir(
    dir: impl AsRef<Path>,
    format: ExportFormat,
    pets: &[Pet],
    columns: &[Column],
    at: DateTime<Utc>,
) -> Result<PathBuf> {
    let _span = tracing::debug_span!("export", format = %format, pet_count = pets.len()).entered();

    let path = dir.as_ref().join(file_name(format, at));
    let file = File::create(&path)
        .map_err(|e| PetdeskError::Export(format!("cannot create {}: {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    exporter(format).write(pets, columns, &mut out)?;
    out.flush()?;

    tracing::info!(path = %path.display(), "export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_uses_unix_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            file_name(ExportFormat::Spreadsheet, at),
            "Pets_export_1700000000123.csv"
        );
        assert_eq!(file_name(ExportFormat::Document, at), "Pets_export_1700000000123.txt");
    }

    #[test]
    fn parses_format_aliases() {
        assert_eq!("excel".parse::<ExportFormat>().unwrap(), ExportFormat::Spreadsheet);
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Document);
        assert!("docx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn writes_file_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let pets = vec![Pet::new("Fido", "dog").with_id(1)];

        let path = export_to_dir(
            dir.path(),
            ExportFormat::Spreadsheet,
            &pets,
            &default_columns(),
            Utc::now(),
        )
        .unwrap();

        assert!(path.starts_with(dir.path()));
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("Fido"));
    }

    #[test]
    fn missing_directory_is_an_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = export_to_dir(missing, ExportFormat::Document, &[], &default_columns(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, PetdeskError::Export(_)));
    }
}
