//! Plain-text interval records
//!
//! One record per line: `beg end [label...]`, whitespace separated, unsigned
//! 64-bit positions. Blank lines and `#` comments are skipped.

use std::fmt;
use std::io::BufRead;

use thiserror::Error;

use crate::interval::Interval;

/// A labelled half-open interval read from text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Inclusive start.
    pub beg: u64,
    /// Exclusive end.
    pub end: u64,
    /// Remaining fields of the line, joined by single spaces.
    pub label: Option<String>,
}

impl Record {
    /// Unlabelled record.
    pub fn new(beg: u64, end: u64) -> Self {
        Self {
            beg,
            end,
            label: None,
        }
    }
}

impl Interval for Record {
    type Pos = u64;

    #[inline]
    fn beg(&self) -> u64 {
        self.beg
    }

    #[inline]
    fn end(&self) -> u64 {
        self.end
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.beg, self.end)?;
        if let Some(label) = &self.label {
            write!(f, "\t{label}")?;
        }
        Ok(())
    }
}

/// Errors raised while reading records.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Line has fewer than two fields.
    #[error("line {line}: expected `beg end [label]`")]
    MissingField {
        /// 1-based line number.
        line: usize,
    },

    /// A position is not an unsigned integer.
    #[error("line {line}: invalid position '{value}'")]
    InvalidPosition {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        value: String,
    },

    /// `beg` lies after `end`.
    #[error("line {line}: interval begins at {beg} after it ends at {end}")]
    Reversed {
        /// 1-based line number.
        line: usize,
        /// Parsed start.
        beg: u64,
        /// Parsed end.
        end: u64,
    },

    /// Underlying reader failure.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a single non-comment line.
pub fn parse_line(text: &str, line: usize) -> Result<Record, ParseError> {
    let record = parse_query_line(text, line)?;
    if record.beg > record.end {
        return Err(ParseError::Reversed {
            line,
            beg: record.beg,
            end: record.end,
        });
    }
    Ok(record)
}

/// Parse a query line. Reversed intervals are kept; they match nothing.
pub fn parse_query_line(text: &str, line: usize) -> Result<Record, ParseError> {
    let mut fields = text.split_whitespace();
    let (Some(beg), Some(end)) = (fields.next(), fields.next()) else {
        return Err(ParseError::MissingField { line });
    };
    let beg = parse_position(beg, line)?;
    let end = parse_position(end, line)?;
    let label = fields.collect::<Vec<_>>().join(" ");
    Ok(Record {
        beg,
        end,
        label: (!label.is_empty()).then_some(label),
    })
}

fn parse_position(value: &str, line: usize) -> Result<u64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidPosition {
        line,
        value: value.to_string(),
    })
}

fn parse_lines<R: BufRead>(
    reader: R,
    parse: fn(&str, usize) -> Result<Record, ParseError>,
) -> Result<Vec<Record>, ParseError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        records.push(parse(trimmed, idx + 1)?);
    }
    Ok(records)
}

/// Read every record from `reader`.
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<Record>, ParseError> {
    parse_lines(reader, parse_line)
}

/// Read query intervals from `reader`, accepting reversed ones.
pub fn parse_queries<R: BufRead>(reader: R) -> Result<Vec<Record>, ParseError> {
    parse_lines(reader, parse_query_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_skips_comments() {
        let text = "# header\n10 20 geneA exon1\n\n5\t8\n";
        let records = parse_records(text.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                Record {
                    beg: 10,
                    end: 20,
                    label: Some("geneA exon1".to_string()),
                },
                Record::new(5, 8),
            ]
        );
        assert_eq!(records[0].to_string(), "10\t20\tgeneA exon1");
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse_records("1 2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::MissingField { line: 2 }));

        let err = parse_records("1 x\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "line 1: invalid position 'x'");

        let err = parse_line("9 3", 7).unwrap_err();
        assert!(matches!(err, ParseError::Reversed { line: 7, beg: 9, end: 3 }));
    }

    #[test]
    fn queries_keep_reversed_intervals() {
        let queries = parse_queries("9 3\n1 2\n".as_bytes()).unwrap();
        assert_eq!(queries, vec![Record::new(9, 3), Record::new(1, 2)]);
        assert!(parse_records("9 3\n".as_bytes()).is_err());

        let err = parse_queries("9\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::MissingField { line: 1 }));
    }
}
