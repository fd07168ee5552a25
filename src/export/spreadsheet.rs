//! Spreadsheet export as CSV.
//!
//! The header row uses the record keys (`id`, `name`, `description`), matching
//! how the records look on the wire.

use crate::domain::error::{PetdeskError, Result};
use crate::domain::Pet;
use crate::export::{Column, Exporter};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetExporter;

impl Exporter for SpreadsheetExporter {
    fn write(&self, pets: &[Pet], columns: &[Column], out: &mut dyn Write) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        let csv_error = |e: csv::Error| PetdeskError::Export(format!("csv: {e}"));

        writer
            .write_record(columns.iter().map(|column| column.field.as_str()))
            .map_err(csv_error)?;

        for pet in pets {
            writer
                .write_record(columns.iter().map(|column| pet.field(column.field).into_owned()))
                .map_err(csv_error)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::default_columns;

    #[test]
    fn writes_keyed_header_and_quotes_when_needed() {
        let pets = vec![
            Pet::new("Fido", "dog").with_id(1),
            Pet::new("Rex", "cat, mostly").with_id(2),
            Pet::new("Nameless", ""),
        ];
        let mut out = Vec::new();

        SpreadsheetExporter.write(&pets, &default_columns(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "id,name,description\n1,Fido,dog\n2,Rex,\"cat, mostly\"\n,Nameless,\n"
        );
    }
}
