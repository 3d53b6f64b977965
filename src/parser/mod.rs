//! Delimited-text parsing for published roster exports.
//!
//! Converts the CSV text of a published spreadsheet into an ordered table
//! of string fields. Parsing is total: malformed quoting degrades
//! gracefully and never produces an error.

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::RosterResult;

/// A parsed roster: header row plus data rows.
///
/// Field order within a row matches header order. Data rows are
/// normalized to the header width, so a short row carries empty strings
/// for its missing trailing fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterTable {
    /// Column names from the first row.
    pub headers: Vec<String>,
    /// Data rows, each as wide as `headers`.
    pub rows: Vec<Vec<String>>,
}

impl RosterTable {
    /// Whether the table holds no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Render rows as JSON objects keyed by column header.
    pub fn records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (i, header) in self.headers.iter().enumerate() {
                    let value = row.get(i).map(String::as_str).unwrap_or("");
                    obj.insert(header.clone(), json!(value));
                }
                Value::Object(obj)
            })
            .collect()
    }
}

/// Result of parsing a roster export with decoding metadata.
#[derive(Debug, Clone)]
pub struct ParsedRoster {
    /// The parsed table.
    pub table: RosterTable,
    /// Detected encoding of the source bytes.
    pub encoding: String,
}

/// Parse delimited text into rows of fields.
///
/// Single left-to-right scan with an in-quotes flag. A quote toggles the
/// flag, except a doubled quote inside a quoted field, which emits one
/// literal quote. A comma outside quotes ends the field; `\n` or `\r\n`
/// outside quotes ends the row. Fields are trimmed, rows whose fields are
/// all blank are dropped, and the final row is emitted even without a
/// trailing terminator. An unterminated quoted field consumes the rest of
/// the input.
///
/// # Example
/// ```
/// use rostersync::parse_table;
///
/// let rows = parse_table("name,email\nAda,ada@rit.edu");
/// assert_eq!(rows, vec![
///     vec!["name".to_string(), "email".to_string()],
///     vec!["Ada".to_string(), "ada@rit.edu".to_string()],
/// ]);
/// ```
pub fn parse_table(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if chars.peek() == Some(&'"') {
                        // Escaped quote: emit one literal quote
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            '\r' if !in_quotes => {
                // \r\n counts as a single terminator
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_row(&mut rows, &mut fields, &mut current);
            }
            '\n' if !in_quotes => {
                end_row(&mut rows, &mut fields, &mut current);
            }
            _ => current.push(ch),
        }
    }

    // Final row has no trailing terminator
    if !current.is_empty() || !fields.is_empty() {
        end_row(&mut rows, &mut fields, &mut current);
    }

    rows
}

/// Close the current row, dropping it if every field is blank.
fn end_row(rows: &mut Vec<Vec<String>>, fields: &mut Vec<String>, current: &mut String) {
    fields.push(current.trim().to_string());
    current.clear();
    if fields.iter().any(|f| !f.is_empty()) {
        rows.push(std::mem::take(fields));
    } else {
        fields.clear();
    }
}

/// Parse roster text into a header row plus normalized data rows.
///
/// The first row supplies column names positionally. Data rows shorter
/// than the header gain empty trailing fields; fields beyond the header
/// width are ignored. Empty input yields an empty table.
pub fn parse_roster(input: &str) -> RosterTable {
    let mut parsed = parse_table(input);
    if parsed.is_empty() {
        return RosterTable::default();
    }

    let headers = parsed.remove(0);
    let width = headers.len();
    let rows = parsed
        .into_iter()
        .map(|mut row| {
            row.truncate(width);
            row.resize(width, String::new());
            row
        })
        .collect();

    RosterTable { headers, rows }
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to text using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8, so decoding never fails.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Parse roster bytes with encoding auto-detection.
pub fn parse_roster_bytes(bytes: &[u8]) -> ParsedRoster {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    ParsedRoster {
        table: parse_roster(&content),
        encoding,
    }
}

/// Parse a roster export file with encoding auto-detection.
pub fn parse_roster_file<P: AsRef<Path>>(path: P) -> RosterResult<ParsedRoster> {
    let bytes = std::fs::read(path.as_ref())?;
    Ok(parse_roster_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table() {
        let rows = parse_table("a,b\nc,d");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_quoted_comma_not_a_separator() {
        let rows = parse_table("a,\"b,c\"\n");
        assert_eq!(rows, vec![vec!["a", "b,c"]]);
    }

    #[test]
    fn test_escaped_quote_unescapes() {
        let rows = parse_table("a,\"b\"\"c\"\n");
        assert_eq!(rows, vec![vec!["a", "b\"c"]]);
    }

    #[test]
    fn test_quoted_newline_stays_in_field() {
        let rows = parse_table("\"line 1\nline 2\",x");
        assert_eq!(rows, vec![vec!["line 1\nline 2", "x"]]);
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        let rows = parse_table("a,b\r\nc,d\r\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_blank_rows_dropped() {
        let rows = parse_table("a,b\n\n  ,  \nc,d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        assert!(parse_table("").is_empty());
        assert!(parse_roster("").headers.is_empty());
        assert!(parse_roster("").rows.is_empty());
    }

    #[test]
    fn test_final_row_without_terminator() {
        let rows = parse_table("a,b\nc,d");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_unterminated_quote_consumes_rest() {
        let rows = parse_table("a,\"b,c\nd");
        assert_eq!(rows, vec![vec!["a", "b,c\nd"]]);
    }

    #[test]
    fn test_fields_trimmed() {
        let rows = parse_table("  a  , b \n");
        assert_eq!(rows, vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_short_row_padded_to_header_width() {
        let table = parse_roster("name,email,major\nAda,ada@rit.edu");
        assert_eq!(table.headers, vec!["name", "email", "major"]);
        assert_eq!(table.rows, vec![vec!["Ada", "ada@rit.edu", ""]]);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let table = parse_roster("a,b\n1,2,3,4");
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_records_keyed_by_header() {
        let table = parse_roster("name,email\nAda,ada@rit.edu\nBob,");
        let records = table.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "Ada");
        assert_eq!(records[0]["email"], "ada@rit.edu");
        assert_eq!(records[1]["email"], "");
    }

    #[test]
    fn test_quoted_empty_row_dropped() {
        let rows = parse_table("\"\",\"\"\na,b");
        assert_eq!(rows, vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_parse_roster_bytes_utf8() {
        let parsed = parse_roster_bytes("name\nAda".as_bytes());
        assert_eq!(parsed.encoding, "utf-8");
        assert_eq!(parsed.table.row_count(), 1);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert!(decoded.contains("Soci"));
    }

    #[test]
    fn test_parse_roster_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name,email\nAda,ada@rit.edu\n").unwrap();

        let parsed = parse_roster_file(file.path()).unwrap();
        assert_eq!(parsed.table.headers, vec!["name", "email"]);
        assert_eq!(parsed.table.row_count(), 1);
    }
}
