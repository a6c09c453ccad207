//! # Submission Record
//!
//! What the persistence layer receives: who answered, about what, and each
//! criterion's weight as a percentage. Flattened, a record is one sheet row:
//!
//! ```text
//! [respondent, phenomenon, criterion_1, percent_1, criterion_2, percent_2, ...]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A criterion and its weight expressed in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub criterion: String,
    pub percent: f64,
}

/// One saved questionnaire result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub respondent: String,
    pub phenomenon: String,
    pub entries: Vec<RecordEntry>,
}

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

impl SubmissionRecord {
    /// Flatten into row cells.
    #[must_use]
    pub fn to_row(&self) -> Vec<Cell> {
        let mut row = Vec::with_capacity(2 + self.entries.len() * 2);
        row.push(Cell::Text(self.respondent.clone()));
        row.push(Cell::Text(self.phenomenon.clone()));
        for entry in &self.entries {
            row.push(Cell::Text(entry.criterion.clone()));
            row.push(Cell::Number(entry.percent));
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_layout() {
        let record = SubmissionRecord {
            respondent: "ana".into(),
            phenomenon: "mining".into(),
            entries: vec![
                RecordEntry {
                    criterion: "Cost".into(),
                    percent: 75.0,
                },
                RecordEntry {
                    criterion: "Time".into(),
                    percent: 25.0,
                },
            ],
        };

        let row: Vec<String> = record.to_row().iter().map(ToString::to_string).collect();
        assert_eq!(row, vec!["ana", "mining", "Cost", "75", "Time", "25"]);
    }
}
