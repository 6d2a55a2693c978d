//! Record-level parsing and formatting: one line of whitespace-separated
//! integers or, for `coord_data`, two floats.

use crate::error::ArchiveError;

/// Parse a line as a whitespace-separated list of decimal integers.
pub fn parse_int_record(section: &str, line_no: usize, line: &str) -> Result<Vec<i64>, ArchiveError> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<i64>().map_err(|e| ArchiveError::MalformedRecord {
                section: section.to_string(),
                line: line_no,
                detail: format!("`{tok}` is not a decimal integer: {e}"),
            })
        })
        .collect()
}

/// Parse a line as exactly `n` decimal integers.
pub fn parse_int_record_exact(
    section: &str,
    line_no: usize,
    line: &str,
    n: usize,
) -> Result<Vec<i64>, ArchiveError> {
    let fields = parse_int_record(section, line_no, line)?;
    if fields.len() != n {
        return Err(ArchiveError::WrongFieldCount {
            section: section.to_string(),
            line: line_no,
            expected: n,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// Parse a line as two whitespace-separated floating-point values.
pub fn parse_float_pair(section: &str, line_no: usize, line: &str) -> Result<(f64, f64), ArchiveError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(ArchiveError::WrongFieldCount {
            section: section.to_string(),
            line: line_no,
            expected: 2,
            found: fields.len(),
        });
    }
    let parse_one = |s: &str| {
        s.parse::<f64>().map_err(|e| ArchiveError::MalformedRecord {
            section: section.to_string(),
            line: line_no,
            detail: format!("`{s}` is not a float: {e}"),
        })
    };
    Ok((parse_one(fields[0])?, parse_one(fields[1])?))
}

/// Format a record as whitespace-separated decimal integers.
pub fn format_int_record(fields: &[i64]) -> String {
    fields
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a coordinate pair as two space-separated floats.
pub fn format_float_pair(x: f64, y: f64) -> String {
    format!("{x} {y}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_well_formed_int_record() {
        let got = parse_int_record("node_to_node", 0, "3 1 4 1 5").unwrap();
        assert_eq!(got, vec![3, 1, 4, 1, 5]);
    }

    #[test]
    fn rejects_non_integer_token() {
        let err = parse_int_record("node_to_node", 2, "3 abc 5").unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = parse_int_record_exact("cell_to_ord_nodes", 4, "1 2 3", 4).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::WrongFieldCount {
                expected: 4,
                found: 3,
                line: 4,
                ..
            }
        ));
    }

    #[test]
    fn parses_float_pair() {
        let got = parse_float_pair("coord_data", 0, "1.5 -2.25").unwrap();
        assert_eq!(got, (1.5, -2.25));
    }

    #[test]
    fn rejects_malformed_float() {
        let err = parse_float_pair("coord_data", 1, "1.5 notafloat").unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn int_record_round_trips_through_format() {
        let fields = vec![7, -3, 0, 42];
        let text = format_int_record(&fields);
        let parsed = parse_int_record("x", 0, &text).unwrap();
        assert_eq!(fields, parsed);
    }

    proptest! {
        #[test]
        fn int_records_round_trip_through_text(fields in prop::collection::vec(any::<i64>(), 0..16)) {
            let text = format_int_record(&fields);
            let parsed = parse_int_record("x", 0, &text).unwrap();
            prop_assert_eq!(fields, parsed);
        }

        #[test]
        fn float_pairs_round_trip_through_text(x in any::<i32>(), y in any::<i32>()) {
            // Whole-valued floats only: `format_float_pair`'s `{x}` formatting
            // isn't required to be exact for arbitrary f64 bit patterns, only
            // to reproduce values the writer itself ever emits.
            let (x, y) = (x as f64, y as f64);
            let text = format_float_pair(x, y);
            let (px, py) = parse_float_pair("coord_data", 0, &text).unwrap();
            prop_assert_eq!(x, px);
            prop_assert_eq!(y, py);
        }
    }
}
