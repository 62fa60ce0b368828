/// Split one raw CSV line into fields.
///
/// Single left-to-right scan with an in-quotes flag: a double quote toggles
/// the flag and is consumed, a delimiter outside quotes closes the current
/// field, everything else goes into the accumulator. The final accumulator
/// is always flushed, so an empty line yields one empty field and a
/// trailing delimiter yields a trailing empty field.
///
/// Known limitation: RFC 4180 `""` escaping is not handled. A doubled quote
/// is seen as two consecutive toggles, so an embedded literal quote does
/// not survive tokenization. The published sheets this service reads never
/// use escaped quotes.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut buf = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut buf));
        } else {
            buf.push(ch);
        }
    }
    fields.push(buf);

    // Strip any surrounding bare quotes that survived the scan.
    fields
        .into_iter()
        .map(|f| f.trim_matches('"').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_delimiter_is_not_a_separator() {
        assert_eq!(split_line(r#"a,"b,c",d"#, ','), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn empty_line_yields_one_empty_field() {
        assert_eq!(split_line("", ','), vec![""]);
    }

    #[test]
    fn trailing_delimiter_keeps_trailing_empty_field() {
        assert_eq!(split_line("a,b,", ','), vec!["a", "b", ""]);
    }

    #[test]
    fn fully_empty_fields_survive() {
        assert_eq!(
            split_line(r#",,,,"15/03/2024",,"#, ','),
            vec!["", "", "", "", "15/03/2024", "", ""]
        );
    }

    #[test]
    fn quotes_are_consumed_not_kept() {
        assert_eq!(split_line(r#""a","b""#, ','), vec!["a", "b"]);
    }
}
