//! Yearly diabetes case counts for the informational chart.
//!
//! A read-only tabular dataset (`year,cases_millions`) consumed solely by
//! the presentation layer's chart rendering. The prediction core never
//! touches this data; the adapter only parses it.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// One row of the prevalence dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyCases {
    pub year: u16,
    pub cases_millions: f64,
}

/// Error type for prevalence dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum PrevalenceError {
    #[error("Failed to read prevalence dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prevalence dataset line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Load the prevalence CSV from disk.
///
/// # Errors
/// Returns error if the file is unreadable or any row is malformed.
pub fn load_yearly_cases(path: &Path) -> Result<Vec<YearlyCases>, PrevalenceError> {
    let content = std::fs::read_to_string(path)?;
    parse_yearly_cases(&content)
}

/// Parse CSV text with the header `year,cases_millions`.
///
/// # Errors
/// Returns error on a missing/wrong header or any unparseable row. The
/// chart is informational, but silently dropping rows would misrepresent
/// the trend, so parsing is strict.
pub fn parse_yearly_cases(text: &str) -> Result<Vec<YearlyCases>, PrevalenceError> {
    let mut lines = text.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim() == "year,cases_millions" => {}
        Some((_, header)) => {
            return Err(PrevalenceError::Malformed {
                line: 1,
                reason: format!("unexpected header {:?}", header.trim()),
            })
        }
        None => {
            return Err(PrevalenceError::Malformed {
                line: 1,
                reason: "empty dataset".into(),
            })
        }
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (year, cases) = line.split_once(',').ok_or_else(|| PrevalenceError::Malformed {
            line: idx + 1,
            reason: "expected two comma-separated columns".into(),
        })?;

        let year = year
            .trim()
            .parse::<u16>()
            .map_err(|e| PrevalenceError::Malformed {
                line: idx + 1,
                reason: format!("bad year {:?}: {e}", year.trim()),
            })?;
        let cases_millions =
            cases
                .trim()
                .parse::<f64>()
                .map_err(|e| PrevalenceError::Malformed {
                    line: idx + 1,
                    reason: format!("bad case count {:?}: {e}", cases.trim()),
                })?;

        rows.push(YearlyCases {
            year,
            cases_millions,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_dataset() {
        let csv = "year,cases_millions\n2019,463\n2021,537\n2024,588.7\n";
        let rows = parse_yearly_cases(csv).expect("Should parse");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].year, 2019);
        assert!((rows[2].cases_millions - 588.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = "year,cases_millions\n2019,463\n\n2021,537\n";
        let rows = parse_yearly_cases(csv).expect("Should parse");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_wrong_header_is_rejected() {
        let err = parse_yearly_cases("tahun,kasus\n2019,463\n").expect_err("must fail");
        assert!(matches!(err, PrevalenceError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_bad_row_names_its_line() {
        let csv = "year,cases_millions\n2019,463\ntwenty,537\n";
        match parse_yearly_cases(csv) {
            Err(PrevalenceError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("cases.csv");
        std::fs::write(&path, "year,cases_millions\n2024,588.7\n").expect("write");

        let rows = load_yearly_cases(&path).expect("Should load");
        assert_eq!(rows, vec![YearlyCases { year: 2024, cases_millions: 588.7 }]);
    }
}
