use crate::error::Result;

/// Split a Sheets CSV export into trimmed cells.
///
/// Rows may be ragged. Blank lines are dropped, but rows of empty cells
/// (`,,,`) are kept since they terminate sections.
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_fields_with_commas() {
        let rows = parse_csv("\"Cold Emails\",\"Commodity Brokers, EU\",\"9,997\"\n").unwrap();
        assert_eq!(rows, vec![vec!["Cold Emails", "Commodity Brokers, EU", "9,997"]]);
    }

    #[test]
    fn test_blank_lines_skipped_and_cells_trimmed() {
        let rows = parse_csv("a , b\n\n   \n c,d,e\r\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["a", "b"]);
        assert_eq!(rows[1], vec!["c", "d", "e"]);
    }

    #[test]
    fn test_rows_of_empty_cells_are_kept() {
        let rows = parse_csv("x,1\n,,\ny,2\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].iter().all(String::is_empty));
    }
}
