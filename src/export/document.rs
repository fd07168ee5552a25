//! Paginated plain-text document export.
//!
//! Produces a fixed-width table split into pages. Every page repeats the
//! column headers and ends with a `Page x of y` footer; pages are separated
//! by a form feed so printers and pagers break them correctly.

use crate::domain::error::Result;
use crate::domain::Pet;
use crate::export::{Column, Exporter};
use std::io::Write;
use unicode_width::UnicodeWidthStr;

const PAGE_BREAK: char = '\u{000c}';
const COLUMN_GAP: usize = 2;

/// Document exporter with a fixed number of rows per page.
#[derive(Debug, Clone, Copy)]
pub struct DocumentExporter {
    rows_per_page: usize,
}

impl Default for DocumentExporter {
    fn default() -> Self {
        Self { rows_per_page: 40 }
    }
}

impl DocumentExporter {
    /// Creates an exporter; `rows_per_page` is raised to at least one.
    #[must_use]
    pub fn with_rows_per_page(rows_per_page: usize) -> Self {
        Self {
            rows_per_page: rows_per_page.max(1),
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let gap = " ".repeat(COLUMN_GAP);
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(&gap)
        .trim_end()
        .to_string()
}

impl Exporter for DocumentExporter {
    fn write(&self, pets: &[Pet], columns: &[Column], out: &mut dyn Write) -> Result<()> {
        let headers: Vec<String> = columns.iter().map(|c| c.header.clone()).collect();
        let rows: Vec<Vec<String>> = pets
            .iter()
            .map(|pet| {
                columns
                    .iter()
                    .map(|column| pet.field(column.field).replace(['\n', '\r'], " "))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = (0..columns.len())
            .map(|i| {
                rows.iter()
                    .map(|row| row[i].width())
                    .chain(std::iter::once(headers[i].width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header_line = format_line(&headers, &widths);
        let rule = "-".repeat(widths.iter().sum::<usize>() + COLUMN_GAP * widths.len().saturating_sub(1));

        let pages: Vec<&[Vec<String>]> = if rows.is_empty() {
            vec![&rows[..]]
        } else {
            rows.chunks(self.rows_per_page).collect()
        };
        let page_count = pages.len();

        for (index, page) in pages.iter().enumerate() {
            if index > 0 {
                write!(out, "{PAGE_BREAK}")?;
            }
            writeln!(out, "{header_line}")?;
            writeln!(out, "{rule}")?;
            for row in *page {
                writeln!(out, "{}", format_line(row, &widths))?;
            }
            writeln!(out)?;
            writeln!(out, "Page {} of {page_count}", index + 1)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::default_columns;

    fn render(exporter: DocumentExporter, pets: &[Pet]) -> String {
        let mut out = Vec::new();
        exporter.write(pets, &default_columns(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn aligns_columns_on_a_single_page() {
        let pets = vec![
            Pet::new("Fido", "dog").with_id(1),
            Pet::new("Rex", "cat").with_id(22),
        ];

        let text = render(DocumentExporter::default(), &pets);

        assert_eq!(
            text,
            "Id  Name  Description\n\
             ---------------------\n\
             1   Fido  dog\n\
             22  Rex   cat\n\
             \n\
             Page 1 of 1\n"
        );
    }

    #[test]
    fn splits_pages_and_repeats_headers() {
        let pets: Vec<Pet> = (1..=5_i64).map(|i| Pet::new(format!("Pet{i}"), "").with_id(i)).collect();

        let text = render(DocumentExporter::with_rows_per_page(2), &pets);
        let pages: Vec<&str> = text.split(PAGE_BREAK).collect();

        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|page| page.starts_with("Id")));
        assert!(pages[2].contains("Pet5"));
        assert!(pages[2].ends_with("Page 3 of 3\n"));
    }

    #[test]
    fn empty_export_still_has_one_page() {
        let text = render(DocumentExporter::default(), &[]);
        assert!(text.ends_with("Page 1 of 1\n"));
    }
}
