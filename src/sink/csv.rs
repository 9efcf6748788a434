//! Minimal CSV encoding for the file sink.
//!
//! Fields holding a comma, quote, CR or LF are quoted and inner quotes are
//! doubled, so a row always reads back with the same field count.

/// Encode one row, including the trailing newline
pub fn encode_row(fields: &[String]) -> String {
    let mut line = fields
        .iter()
        .map(|f| encode_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

fn encode_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parse a whole CSV document into rows
pub fn parse(content: &str) -> Result<Vec<Vec<String>>, String> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_started = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                c => field.push(c),
            }
            continue;
        }

        match c {
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                field_started = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                field_started = false;
            }
            c => {
                field.push(c);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    if field_started || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_fields_unquoted() {
        assert_eq!(encode_row(&row(&["a", "b", "c"])), "a,b,c\n");
    }

    #[test]
    fn test_special_fields_quoted() {
        let line = encode_row(&row(&["2025-01-01 10:00:00", "one, two", "say \"hi\""]));
        assert_eq!(line, "2025-01-01 10:00:00,\"one, two\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_parse_quoted_newline() {
        let content = encode_row(&row(&["t", "line1\nline2", "College"]));
        let rows = parse(&content).unwrap();
        assert_eq!(rows, vec![row(&["t", "line1\nline2", "College"])]);
    }

    #[test]
    fn test_parse_multiple_rows_and_crlf() {
        let rows = parse("a,b,c\r\nd,,f\n").unwrap();
        assert_eq!(rows, vec![row(&["a", "b", "c"]), row(&["d", "", "f"])]);
    }

    #[test]
    fn test_parse_unterminated_quote() {
        assert!(parse("a,\"b,c\n").is_err());
    }
}
