//! Parsing for the badge catalog sheet.
//!
//! Columns: `sizeInMm, catalogNumber, title, bandName`, header row first.

use std::collections::HashMap;

use tracing::debug;

use super::types::BadgeMetadata;

/// Split one line into trimmed fields.
///
/// Double quotes toggle a quoted span in which commas are literal. A doubled
/// quote inside a quoted span yields a single `"`.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Reorder "Last, First" into "First Last". Blank input yields `None`.
pub fn normalize_band_name(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.split_once(',') {
        Some((last, first)) => {
            let (last, first) = (last.trim(), first.trim());
            let name = match (first.is_empty(), last.is_empty()) {
                (false, false) => format!("{} {}", first, last),
                (true, _) => last.to_string(),
                (false, true) => first.to_string(),
            };
            (!name.is_empty()).then_some(name)
        }
        None => Some(raw.to_string()),
    }
}

/// Parse the whole sheet into a catalog-number keyed map.
///
/// The first row for a catalog number wins; later duplicates are ignored.
pub fn parse_table(content: &str) -> HashMap<String, BadgeMetadata> {
    let mut entries = HashMap::new();

    for line in content.lines().skip(1) {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = parse_csv_line(line).into_iter();
        let size_in_mm = fields.next().unwrap_or_default();
        let catalog_number = fields.next().unwrap_or_default();
        let title = fields.next().unwrap_or_default();
        let band_name = fields.next().and_then(|b| normalize_band_name(&b));

        if catalog_number.is_empty() {
            continue;
        }

        if entries.contains_key(&catalog_number) {
            debug!(catalog_number = %catalog_number, "Ignoring duplicate metadata row");
            continue;
        }

        entries.insert(
            catalog_number.clone(),
            BadgeMetadata {
                size_in_mm,
                catalog_number,
                title,
                band_name,
            },
        );
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line_plain() {
        assert_eq!(
            parse_csv_line("25,B001,Anarchy,Sex Pistols"),
            vec!["25", "B001", "Anarchy", "Sex Pistols"]
        );
    }

    #[test]
    fn test_parse_csv_line_quoted_fields() {
        let fields = parse_csv_line(r#""10, mm",B007,"Title, With Comma","#);
        assert_eq!(fields, vec!["10, mm", "B007", "Title, With Comma", ""]);
    }

    #[test]
    fn test_parse_csv_line_escaped_quote() {
        let fields = parse_csv_line(r#"25,B002,"The ""Clash"" badge",Clash"#);
        assert_eq!(fields[2], r#"The "Clash" badge"#);
    }

    #[test]
    fn test_parse_csv_line_trims_fields() {
        assert_eq!(parse_csv_line(" 25 , B003 ,x"), vec!["25", "B003", "x"]);
    }

    #[test]
    fn test_normalize_band_name() {
        assert_eq!(
            normalize_band_name("Ramones, Joey").as_deref(),
            Some("Joey Ramones")
        );
        assert_eq!(
            normalize_band_name("Sid Vicious").as_deref(),
            Some("Sid Vicious")
        );
        assert_eq!(normalize_band_name(""), None);
        assert_eq!(normalize_band_name("   "), None);
    }

    #[test]
    fn test_normalize_band_name_splits_on_first_comma() {
        assert_eq!(
            normalize_band_name("Strummer, Joe, Mr").as_deref(),
            Some("Joe, Mr Strummer")
        );
    }

    #[test]
    fn test_parse_table_quoted_row_without_band() {
        let content = "sizeInMm,catalogNumber,title,bandName\n\"10, mm\",B007,\"Title, With Comma\",\n";
        let table = parse_table(content);
        let row = table.get("B007").unwrap();
        assert_eq!(row.size_in_mm, "10, mm");
        assert_eq!(row.catalog_number, "B007");
        assert_eq!(row.title, "Title, With Comma");
        assert_eq!(row.band_name, None);
    }

    #[test]
    fn test_parse_table_skips_header_and_blank_lines() {
        let content = "sizeInMm,catalogNumber,title,bandName\r\n25,B001,Anarchy,\"Ramones, Joey\"\r\n\r\n32,B002,Spiral,\n";
        let table = parse_table(content);
        assert_eq!(table.len(), 2);
        assert!(!table.contains_key("catalogNumber"));
        assert_eq!(
            table["B001"].band_name.as_deref(),
            Some("Joey Ramones")
        );
    }

    #[test]
    fn test_parse_table_first_duplicate_wins() {
        let content = "header\n25,B001,First,\n32,B001,Second,\n";
        let table = parse_table(content);
        assert_eq!(table.len(), 1);
        assert_eq!(table["B001"].title, "First");
    }
}
