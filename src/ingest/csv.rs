//! RFC 4180 record reader
//!
//! Reads comma-separated rows from an in-memory string:
//! - Fields may be wrapped in double quotes; inside quotes `""` is a literal
//!   quote and commas and line breaks are data
//! - Rows end at `\n` or `\r\n`
//! - A quote that does not open a field is kept literally
//! - Blank lines are skipped
//! - An unterminated quoted field is `REEL_MALFORMED_SOURCE`

use std::iter::Peekable;
use std::str::Chars;

use super::errors::{IngestError, IngestResult};

/// One parsed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    /// 1-based line where the row starts
    pub line: usize,
    pub cells: Vec<String>,
}

impl CsvRow {
    fn is_blank(&self) -> bool {
        self.cells.len() == 1 && self.cells[0].is_empty()
    }
}

/// Streaming row iterator over CSV text
pub struct CsvReader<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> CsvReader<'a> {
    /// Creates a reader; a leading UTF-8 byte-order mark is dropped.
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn read_row(&mut self) -> IngestResult<CsvRow> {
        let line = self.line;
        let mut cells = Vec::new();
        let mut cell = String::new();
        let mut in_quotes = false;
        let mut quoted_cell = false;

        loop {
            let Some(c) = self.chars.next() else {
                if in_quotes {
                    return Err(IngestError::malformed(line, "unterminated quoted field"));
                }
                cells.push(cell);
                break;
            };

            if in_quotes {
                match c {
                    '"' if self.chars.peek() == Some(&'"') => {
                        self.chars.next();
                        cell.push('"');
                    }
                    '"' => in_quotes = false,
                    '\n' => {
                        self.line += 1;
                        cell.push('\n');
                    }
                    other => cell.push(other),
                }
                continue;
            }

            match c {
                '"' if cell.is_empty() && !quoted_cell => {
                    in_quotes = true;
                    quoted_cell = true;
                }
                ',' => {
                    cells.push(std::mem::take(&mut cell));
                    quoted_cell = false;
                }
                '\r' if self.chars.peek() == Some(&'\n') => {}
                '\n' => {
                    self.line += 1;
                    cells.push(cell);
                    break;
                }
                other => cell.push(other),
            }
        }

        Ok(CsvRow { line, cells })
    }
}

impl<'a> Iterator for CsvReader<'a> {
    type Item = IngestResult<CsvRow>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.chars.peek().is_some() {
            match self.read_row() {
                Ok(row) if row.is_blank() => continue,
                other => return Some(other),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(input: &str) -> Vec<Vec<String>> {
        CsvReader::new(input)
            .map(|r| r.unwrap().cells)
            .collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_rows() {
        assert_eq!(
            rows("id,title\n1,Alien\n2,Scream\n"),
            vec![row(&["id", "title"]), row(&["1", "Alien"]), row(&["2", "Scream"])]
        );
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        assert_eq!(
            rows("a,b\r\n1,2"),
            vec![row(&["a", "b"]), row(&["1", "2"])]
        );
    }

    #[test]
    fn test_quoted_fields() {
        let parsed = rows("id,title\n1,\"Night, of the \"\"Dead\"\"\"\n");
        assert_eq!(parsed[1], row(&["1", "Night, of the \"Dead\""]));
    }

    #[test]
    fn test_newline_inside_quotes_tracks_lines() {
        let mut reader = CsvReader::new("id,title\n1,\"two\nlines\"\n2,x\n");
        let header = reader.next().unwrap().unwrap();
        let first = reader.next().unwrap().unwrap();
        let second = reader.next().unwrap().unwrap();

        assert_eq!(header.line, 1);
        assert_eq!(first.line, 2);
        assert_eq!(first.cells, row(&["1", "two\nlines"]));
        assert_eq!(second.line, 4);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_empty_cells_and_blank_lines() {
        assert_eq!(
            rows("a,b,c\n\n,,\n"),
            vec![row(&["a", "b", "c"]), row(&["", "", ""])]
        );
    }

    #[test]
    fn test_bom_stripped() {
        assert_eq!(rows("\u{feff}id\n5\n")[0], row(&["id"]));
    }

    #[test]
    fn test_stray_quote_kept_literally() {
        assert_eq!(rows("a\"b,c\n")[0], row(&["a\"b", "c"]));
    }

    #[test]
    fn test_unterminated_quote_is_malformed() {
        let result: Vec<_> = CsvReader::new("id\n\"open\n").collect();
        let err = result[1].as_ref().unwrap_err();
        assert_eq!(err.code(), "REEL_MALFORMED_SOURCE");
    }
}
