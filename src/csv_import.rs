use crate::attendance::AttendanceError;
use std::collections::HashMap;

/// A data row of an attendance import, numbered by its 1-based line in the
/// source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRow {
    Fields {
        line: usize,
        roll_no: String,
        status: String,
    },
    /// Fewer cells than the header's required columns need.
    Short { line: usize },
}

const ROLL_NO_HEADERS: [&str; 2] = ["rollNo", "rollNumber"];
const STATUS_HEADER: &str = "status";

pub fn parse_csv_record(line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut buf = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                buf.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => out.push(std::mem::take(&mut buf)),
            _ => buf.push(ch),
        }
    }
    out.push(buf);
    out
}

/// Splits import text into rows keyed by the `rollNo` and `status` header
/// columns. Blank lines are ignored. Cells are read positionally, so extra
/// columns may appear in any order around the required ones.
pub fn parse_attendance_csv(text: &str) -> Result<Vec<ImportRow>, AttendanceError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(AttendanceError::ImportFormat(
            "CSV file is empty".to_string(),
        ));
    };

    let mut idx = HashMap::<String, usize>::new();
    for (i, f) in parse_csv_record(header).into_iter().enumerate() {
        idx.entry(f.trim().to_string()).or_insert(i);
    }
    let roll_col = ROLL_NO_HEADERS.iter().find_map(|h| idx.get(*h).copied());
    let status_col = idx.get(STATUS_HEADER).copied();
    let (Some(roll_col), Some(status_col)) = (roll_col, status_col) else {
        return Err(AttendanceError::ImportFormat(
            "CSV must contain rollNo and status columns".to_string(),
        ));
    };
    let min_cells = roll_col.max(status_col) + 1;

    let rows = lines
        .map(|(i, raw)| {
            let line = i + 1;
            let cells = parse_csv_record(raw.trim_end_matches('\r'));
            if cells.len() < min_cells {
                return ImportRow::Short { line };
            }
            ImportRow::Fields {
                line,
                roll_no: cells[roll_col].trim().to_string(),
                status: cells[status_col].trim().to_string(),
            }
        })
        .collect();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_splitter_honours_quotes() {
        assert_eq!(
            parse_csv_record(r#"S001,"Smith, Alice","say ""hi""""#),
            vec!["S001", "Smith, Alice", r#"say "hi""#]
        );
        assert_eq!(parse_csv_record(""), vec![""]);
        assert_eq!(parse_csv_record("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn locates_columns_by_header_name() {
        let text = "name,status,rollNo\r\nAlice,Present,S001\r\n\r\nBob,absent, S002 \r\n";
        let rows = parse_attendance_csv(text).expect("parse");
        assert_eq!(
            rows,
            vec![
                ImportRow::Fields {
                    line: 2,
                    roll_no: "S001".to_string(),
                    status: "Present".to_string()
                },
                ImportRow::Fields {
                    line: 4,
                    roll_no: "S002".to_string(),
                    status: "absent".to_string()
                },
            ]
        );
    }

    #[test]
    fn short_rows_are_kept_as_rejections() {
        let rows = parse_attendance_csv("name,rollNo,status\nAlice,S001").expect("parse");
        assert_eq!(rows, vec![ImportRow::Short { line: 2 }]);
    }

    #[test]
    fn roll_number_alias_is_accepted() {
        let rows = parse_attendance_csv("rollNumber,status\nS003,leave").expect("parse");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_columns_or_empty_text_fail_the_batch() {
        assert!(matches!(
            parse_attendance_csv(""),
            Err(AttendanceError::ImportFormat(m)) if m == "CSV file is empty"
        ));
        assert!(matches!(
            parse_attendance_csv("   \n\n"),
            Err(AttendanceError::ImportFormat(_))
        ));
        assert!(matches!(
            parse_attendance_csv("rollNo,state\nS001,present"),
            Err(AttendanceError::ImportFormat(m)) if m.contains("rollNo and status")
        ));
    }
}
