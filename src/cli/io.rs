//! Output writers
//!
//! Records go to stdout as fixed-width rows or JSON lines. Logs never
//! share this stream.

use std::io::Write;

use serde::Serialize;

use crate::catalog::{CatalogStats, Record};
use crate::ingest::LoadReport;

use super::args::OutputFormat;
use super::errors::CliResult;

const ID_WIDTH: usize = 10;
const TITLE_WIDTH: usize = 40;
const DATE_WIDTH: usize = 12;
const SCORE_WIDTH: usize = 6;

/// Everything the `stats` command prints
#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub load: LoadReport,
    pub catalog: CatalogStats,
}

/// Write records in the requested format
pub fn write_records<W: Write>(
    out: &mut W,
    records: &[&Record],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            for record in records {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<iw$} {:<tw$} {:<dw$} {:>sw$}",
                "id",
                "title",
                "release_date",
                "vote",
                iw = ID_WIDTH,
                tw = TITLE_WIDTH,
                dw = DATE_WIDTH,
                sw = SCORE_WIDTH,
            )?;
            for record in records {
                writeln!(out, "{}", table_row(record))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// One fixed-width row; absent fields print as blanks
fn table_row(record: &Record) -> String {
    let date = record
        .release_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let score = record
        .vote_average
        .map(|s| format!("{:.1}", s.value()))
        .unwrap_or_default();

    let line = format!(
        "{:<iw$} {:<tw$} {:<dw$} {:>sw$}",
        record.id,
        truncate(&record.title, TITLE_WIDTH),
        date,
        score,
        iw = ID_WIDTH,
        tw = TITLE_WIDTH,
        dw = DATE_WIDTH,
        sw = SCORE_WIDTH,
    );
    line.trim_end().to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('~');
    cut
}

/// Write the load report and index statistics
pub fn write_stats<W: Write>(out: &mut W, stats: &StatsOutput, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, stats)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            let value = serde_json::to_value(stats)?;
            write_flat(out, "", &value)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// `a.b.c: value` lines for nested objects
fn write_flat<W: Write>(out: &mut W, prefix: &str, value: &serde_json::Value) -> CliResult<()> {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                write_flat(out, &path, child)?;
            }
        }
        serde_json::Value::Null => writeln!(out, "{}: -", prefix)?,
        serde_json::Value::String(s) => writeln!(out, "{}: {}", prefix, s)?,
        other => writeln!(out, "{}: {}", prefix, other)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Score;
    use chrono::NaiveDate;

    fn halloween() -> Record {
        Record::new("1", "Halloween")
            .with_release_date(NaiveDate::from_ymd_opt(1978, 10, 25))
            .with_vote_average(Score::new(7.6))
    }

    fn render(records: &[&Record], format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_records(&mut buf, records, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_row_fields() {
        let record = halloween();
        let text = render(&[&record], OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id"));
        assert!(lines[1].starts_with("1 "));
        assert!(lines[1].contains("Halloween"));
        assert!(lines[1].contains("1978-10-25"));
        assert!(lines[1].ends_with("7.6"));
    }

    #[test]
    fn test_table_absent_fields_blank() {
        let record = Record::new("7", "Unknown");
        let text = render(&[&record], OutputFormat::Table);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, format!("{:<10} Unknown", "7"));
    }

    #[test]
    fn test_json_lines() {
        let a = halloween();
        let b = Record::new("2", "Blank");
        let text = render(&[&a, &b], OutputFormat::Json);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], "1");
        assert_eq!(first["release_date"], "1978-10-25");
        assert_eq!(first["vote_average"], 7.6);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert!(second["release_date"].is_null());
    }

    #[test]
    fn test_truncate_long_title() {
        let long = "x".repeat(50);
        let cut = truncate(&long, TITLE_WIDTH);
        assert_eq!(cut.chars().count(), TITLE_WIDTH);
        assert!(cut.ends_with('~'));
        assert_eq!(truncate("short", TITLE_WIDTH), "short");
    }
}
