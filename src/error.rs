use core::fmt;
use thiserror::Error;

/// A byte offset into the parsed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    pub offset: usize,
}

impl SourcePosition {
    pub const fn new(offset: usize) -> Self {
        SourcePosition { offset }
    }

    /// Converts the offset into a 1-based `(line, column)` pair within `input`.
    ///
    /// `\n`, `\r` and `\r\n` each end a line. Columns count bytes.
    pub fn line_column<T: AsRef<[u8]>>(&self, input: T) -> (usize, usize) {
        let input = input.as_ref();
        let end = self.offset.min(input.len());

        let mut line = 1;
        let mut line_start = 0;
        let mut i = 0;

        while i < end {
            match input[i] {
                b'\n' => {
                    line += 1;
                    line_start = i + 1;
                }
                b'\r' => {
                    if i + 1 < end && input[i + 1] == b'\n' {
                        i += 1;
                    }
                    line += 1;
                    line_start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }

        (line, self.offset - line_start + 1)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}

impl From<usize> for SourcePosition {
    fn from(offset: usize) -> Self {
        SourcePosition { offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("expected ':' record mark")]
    ExpectedColon,
    #[error("expected {count} hex digits")]
    ExpectedHexDigits { count: usize },
    #[error("invalid record type 0x{0:02X}")]
    InvalidRecordType(u8),
    #[error("expected line break or end of input")]
    ExpectedLineBreak,
    #[error("invalid checksum")]
    InvalidChecksum,
    #[error("expected byte count {expected}, found {actual}")]
    ExpectedDifferentByteCount { expected: u8, actual: u8 },
}

impl ErrorKind {
    /// Stable numeric discriminant for programmatic matching.
    pub fn code(&self) -> u8 {
        match self {
            ErrorKind::ExpectedColon => 1,
            ErrorKind::ExpectedHexDigits { .. } => 2,
            ErrorKind::InvalidRecordType(_) => 3,
            ErrorKind::ExpectedLineBreak => 4,
            ErrorKind::InvalidChecksum => 5,
            ErrorKind::ExpectedDifferentByteCount { .. } => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{kind} at offset {position}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: SourcePosition,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        ParseError {
            kind,
            position: SourcePosition::new(offset),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn position(&self) -> SourcePosition {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn codes_are_distinct() {
        let kinds = [
            ErrorKind::ExpectedColon,
            ErrorKind::ExpectedHexDigits { count: 2 },
            ErrorKind::InvalidRecordType(6),
            ErrorKind::ExpectedLineBreak,
            ErrorKind::InvalidChecksum,
            ErrorKind::ExpectedDifferentByteCount {
                expected: 2,
                actual: 4,
            },
        ];

        for (i, kind) in kinds.iter().enumerate() {
            assert_eq!(kind.code() as usize, i + 1);
        }
    }

    #[test]
    fn display() {
        let error = ParseError::new(ErrorKind::InvalidRecordType(6), 7);
        assert_eq!(error.to_string(), "invalid record type 0x06 at offset 7");

        let error = ParseError::new(
            ErrorKind::ExpectedDifferentByteCount {
                expected: 4,
                actual: 2,
            },
            1,
        );
        assert_eq!(
            error.to_string(),
            "expected byte count 4, found 2 at offset 1"
        );
    }

    #[test]
    fn line_column_first_line() {
        assert_eq!(SourcePosition::new(0).line_column(":00000001FF"), (1, 1));
        assert_eq!(SourcePosition::new(9).line_column(":00000001FF"), (1, 10));
    }

    #[test]
    fn line_column_mixed_terminators() {
        let text = ":00000001FF\n:00000001FF\r\n:00000001FF\r:00000001FF";
        assert_eq!(SourcePosition::new(12).line_column(text), (2, 1));
        assert_eq!(SourcePosition::new(15).line_column(text), (2, 4));
        assert_eq!(SourcePosition::new(25).line_column(text), (3, 1));
        assert_eq!(SourcePosition::new(37).line_column(text), (4, 1));
        assert_eq!(SourcePosition::new(text.len()).line_column(text), (4, 12));
    }

    #[test]
    fn line_column_past_end() {
        assert_eq!(SourcePosition::new(5).line_column("ab\ncd"), (2, 3));
    }
}
