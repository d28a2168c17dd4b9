// src/csv.rs
use std::io::{self, Write};

use crate::model::EnrichedDocument;

pub const HEADERS: [&str; 7] = ["category", "days", "date", "deadline", "subject", "subjectUrl", "attachments"];

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Flatten one document into the export column order of [`HEADERS`].
pub fn build_export_row(doc: &EnrichedDocument) -> Vec<String> {
    let attachments = doc
        .raw
        .attachments
        .iter()
        .enumerate()
        .map(|(i, a)| join!(&a.display_label(i), " ", &a.url))
        .collect::<Vec<_>>()
        .join(" | ");

    vec![
        s!(doc.deadline_category.as_str()),
        doc.days_until_deadline.map(|d| d.to_string()).unwrap_or_default(),
        doc.raw.date.clone(),
        doc.raw.deadline.clone(),
        doc.raw.subject.clone(),
        doc.raw.subject_url.clone().unwrap_or_default(),
        attachments,
    ]
}

/// Whole export as a string, header line first.
pub fn to_export_string<'a>(docs: impl IntoIterator<Item = &'a EnrichedDocument>, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    let _ = write_row(&mut buf, &HEADERS, sep);
    for doc in docs {
        let _ = write_row(&mut buf, &build_export_row(doc), sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
