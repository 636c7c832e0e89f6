// Spreadsheet extraction (csv/xlsx): first sheet by position, each row
// converted to an ordered header -> cell mapping. An empty sheet yields an
// empty sequence, not a failure.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;
use serde_json::Value;

use crate::types::{AnalystError, AnalystResult, ExtractedContent, Row};

pub fn extract_csv(payload: &[u8]) -> AnalystResult<ExtractedContent> {
    let mut rdr = ReaderBuilder::new().from_reader(payload);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| AnalystError::Extraction(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows: Vec<Row> = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| AnalystError::Extraction(e.to_string()))?;
        let mut row = Row::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if header.is_empty() || cell.is_empty() {
                continue;
            }
            // csv carries no cell types; cells stay strings and the chart
            // deriver re-parses them, unlike the typed xlsx cells below.
            row.insert(header.clone(), Value::String(cell.to_string()));
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(ExtractedContent::Rows(rows))
}

pub fn extract_xlsx(payload: &[u8]) -> AnalystResult<ExtractedContent> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(payload))
        .map_err(|e| AnalystError::Extraction(e.to_string()))?;

    // First sheet by position, never by name lookup.
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| AnalystError::Extraction(e.to_string()))?,
        None => return Ok(ExtractedContent::Rows(Vec::new())),
    };

    let mut row_iter = range.rows();
    let headers: Vec<String> = match row_iter.next() {
        Some(header_row) => header_row.iter().map(cell_to_header).collect(),
        None => return Ok(ExtractedContent::Rows(Vec::new())),
    };

    let mut rows: Vec<Row> = Vec::new();
    for cells in row_iter {
        let mut row = Row::new();
        for (header, cell) in headers.iter().zip(cells.iter()) {
            if header.is_empty() {
                continue;
            }
            if let Some(value) = cell_to_value(cell) {
                row.insert(header.clone(), value);
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(ExtractedContent::Rows(rows))
}

fn cell_to_header(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Typed cell conversion; empty and error cells drop out of the row mapping.
fn cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Float(f) => Some(Value::from(*f)),
        Data::Int(i) => Some(Value::from(*i)),
        Data::Bool(b) => Some(Value::Bool(*b)),
        other => Some(Value::String(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn csv_rows_keep_header_order() {
        let content = extract_csv(b"a,b\n1,x\n2,y\n").unwrap();
        let rows = match content {
            ExtractedContent::Rows(rows) => rows,
            _ => panic!("expected rows"),
        };
        assert_eq!(rows.len(), 2);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(rows[0]["a"], json!("1"));
        assert_eq!(rows[1]["b"], json!("y"));
    }

    #[test]
    fn csv_preview_is_first_five_rows() {
        let mut data = String::from("n\n");
        for i in 0..10 {
            data.push_str(&format!("{i}\n"));
        }
        let content = extract_csv(data.as_bytes()).unwrap();
        match content.preview() {
            crate::types::ContentPreview::Rows(p) => {
                assert_eq!(p.len(), 5);
                assert_eq!(p[4]["n"], json!("4"));
            }
            _ => panic!("expected rows preview"),
        }
    }

    #[test]
    fn empty_csv_yields_empty_sequence() {
        let content = extract_csv(b"").unwrap();
        assert_eq!(content, ExtractedContent::Rows(Vec::new()));
    }

    #[test]
    fn blank_cells_are_omitted_from_row_mapping() {
        let content = extract_csv(b"a,b\n1,\n").unwrap();
        let rows = match content {
            ExtractedContent::Rows(rows) => rows,
            _ => panic!("expected rows"),
        };
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains_key("a"));
        assert!(!rows[0].contains_key("b"));
    }

    #[test]
    fn csv_string_cells_classify_like_typed_numeric_cells() {
        let content = extract_csv(b"n\n1\n2\n3\n").unwrap();
        let rows = match content {
            ExtractedContent::Rows(rows) => rows,
            _ => panic!("expected rows"),
        };
        let charts = crate::charts::derive_charts(&rows);
        match &charts[0] {
            crate::charts::ColumnChart::Histogram { stats, .. } => {
                assert_eq!(stats.count, 3);
                assert_eq!(stats.mean, 2.0);
            }
            other => panic!("expected histogram, got {other:?}"),
        }
    }

    #[test]
    fn xlsx_garbage_payload_is_an_extraction_error() {
        let err = extract_xlsx(b"not a workbook").unwrap_err();
        assert!(matches!(err, AnalystError::Extraction(_)));
    }

    #[test]
    fn typed_cells_convert_to_json_scalars() {
        assert_eq!(cell_to_value(&Data::Float(1.5)), Some(json!(1.5)));
        assert_eq!(cell_to_value(&Data::Int(2)), Some(json!(2)));
        assert_eq!(cell_to_value(&Data::Bool(true)), Some(json!(true)));
        assert_eq!(
            cell_to_value(&Data::String("x".into())),
            Some(json!("x"))
        );
        assert_eq!(cell_to_value(&Data::Empty), None);
    }
}
