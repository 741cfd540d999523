//! Golden fixture reader.
//!
//! # Format
//!
//! Pairs of lines: a JSON document, then its expected lowercase hex digest.
//! Blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! # Lists of strings
//! ["foo", "bar"]
//! 32ae896c413cfdc79eec68be9139c86ded8b279238467c216cf2bec4d5f1e4a2
//! ```

use crate::digest::Digest;
use crate::error::ObjectHashError;
use crate::json::json_hash;
use crate::value::JsonMode;
use std::io::BufRead;
use thiserror::Error;

/// Error returned when a fixture file cannot be read as line pairs.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("IO error reading line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("premature end of fixture: JSON on line {line} has no digest line")]
    MissingDigest { line: usize },
}

/// One JSON document and the digest it must hash to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenCase {
    /// 1-indexed line of the JSON document.
    pub line: usize,
    pub json: String,
    pub expected: String,
}

#[derive(Debug)]
pub enum GoldenOutcome {
    Pass,
    Mismatch { actual: Digest },
    Error(ObjectHashError),
}

impl GoldenOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, GoldenOutcome::Pass)
    }
}

impl GoldenCase {
    /// Hash the document and compare against the expected digest.
    pub fn check(&self, mode: JsonMode) -> GoldenOutcome {
        match json_hash(&self.json, mode) {
            Ok(actual) if actual.to_hex() == self.expected => GoldenOutcome::Pass,
            Ok(actual) => GoldenOutcome::Mismatch { actual },
            Err(e) => GoldenOutcome::Error(e),
        }
    }
}

/// Iterator over the cases of a fixture.
///
/// Reading stops after the first error.
pub struct GoldenCases<R: BufRead> {
    reader: R,
    line_buffer: String,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> GoldenCases<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_buffer: String::new(),
            line_number: 0,
            done: false,
        }
    }

    /// Next raw line without its terminator, or `None` at EOF.
    fn read_line(&mut self) -> Result<Option<String>, FixtureError> {
        self.line_buffer.clear();
        match self.reader.read_line(&mut self.line_buffer) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.line_number += 1;
                Ok(Some(
                    self.line_buffer
                        .trim_end_matches(['\n', '\r'])
                        .to_string(),
                ))
            }
            Err(source) => Err(FixtureError::Io {
                line: self.line_number + 1,
                source,
            }),
        }
    }

    fn next_case(&mut self) -> Result<Option<GoldenCase>, FixtureError> {
        let json = loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() || line.starts_with('#') => continue,
                Some(line) => break line,
            }
        };
        let line = self.line_number;
        let expected = self
            .read_line()?
            .ok_or(FixtureError::MissingDigest { line })?;
        tracing::trace!(line, "read golden case");
        Ok(Some(GoldenCase {
            line,
            json,
            expected: expected.trim().to_string(),
        }))
    }
}

impl<R: BufRead> Iterator for GoldenCases<R> {
    type Item = Result<GoldenCase, FixtureError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_case() {
            Ok(Some(case)) => Some(Ok(case)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cases(text: &str) -> Vec<Result<GoldenCase, FixtureError>> {
        GoldenCases::new(Cursor::new(text.as_bytes())).collect()
    }

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let text = "# header\n\n[]\nacac86c0e609ca906f632b0e2dacccb2b77d22b0621f20ebece1a4835b93f6f0\n\n# tail\n";
        let parsed = cases(text);
        assert_eq!(parsed.len(), 1);
        let case = parsed[0].as_ref().unwrap();
        assert_eq!(case.line, 3);
        assert_eq!(case.json, "[]");
        assert!(case.check(JsonMode::Common).is_pass());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "[\"foo\"]\r\n268bc27d4974d9d576222e4cdbb8f7c6bd6791894098645a19eeca9c102d0964\r\n";
        let parsed = cases(text);
        let case = parsed[0].as_ref().unwrap();
        assert!(case.check(JsonMode::Common).is_pass());
    }

    #[test]
    fn test_missing_digest_is_error() {
        let parsed = cases("# one case\n[]\n");
        assert_eq!(parsed.len(), 1);
        match &parsed[0] {
            Err(FixtureError::MissingDigest { line }) => assert_eq!(*line, 2),
            other => panic!("expected MissingDigest, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatch_reports_actual() {
        let text = format!("[]\n{}\n", "00".repeat(32));
        let parsed = cases(&text);
        match parsed[0].as_ref().unwrap().check(JsonMode::Common) {
            GoldenOutcome::Mismatch { actual } => assert_eq!(
                actual.to_hex(),
                "acac86c0e609ca906f632b0e2dacccb2b77d22b0621f20ebece1a4835b93f6f0"
            ),
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_json_reports_error() {
        let parsed = cases("[\"foo\", bar]\n00\n");
        match parsed[0].as_ref().unwrap().check(JsonMode::Common) {
            GoldenOutcome::Error(e) => assert_eq!(e.kind(), "json_syntax"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_has_no_cases() {
        assert!(cases("").is_empty());
        assert!(cases("# only comments\n\n").is_empty());
    }
}
