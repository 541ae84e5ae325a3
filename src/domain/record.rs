use crate::domain::format;
use crate::error::{RemessaError, Result};

/// Fixed length of every CNAB 400 record.
pub const RECORD_LEN: usize = 400;

/// Column range (1-based, inclusive) holding the record sequence number.
pub const SEQUENCE_START: usize = 395;
pub const SEQUENCE_WIDTH: usize = 6;

/// Line terminator between records.
pub const LINE_TERMINATOR: &str = "\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Header,
    Detail,
    /// Auxiliary detail carrying messages or extra discounts.
    Message,
    Trailer,
}

impl RecordKind {
    pub fn code(self) -> char {
        match self {
            RecordKind::Header => '0',
            RecordKind::Detail => '1',
            RecordKind::Message => '2',
            RecordKind::Trailer => '9',
        }
    }
}

/// One rendered line of a remittance file, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    kind: RecordKind,
    line: String,
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    pub fn len(&self) -> usize {
        self.line.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Sequence number stored in the last six columns, if readable.
    pub fn sequence(&self) -> Option<u32> {
        self.line
            .get(SEQUENCE_START - 1..SEQUENCE_START - 1 + SEQUENCE_WIDTH)?
            .parse()
            .ok()
    }

    /// Wraps a line without any geometry check.
    #[cfg(test)]
    pub(crate) fn unchecked(kind: RecordKind, line: String) -> Self {
        Self { kind, line }
    }

    /// Fails unless the line is exactly [`RECORD_LEN`] characters.
    pub fn check_length(&self) -> Result<()> {
        let length = self.len();
        if length == RECORD_LEN {
            Ok(())
        } else {
            Err(RemessaError::layout(
                self.kind.code(),
                &self.line,
                format!("expected {RECORD_LEN}"),
            ))
        }
    }
}

/// Builds a record field by field against its declared column map.
///
/// Each call to [`RecordWriter::field`] names the 1-based inclusive column
/// range the value occupies. The range must start right after the previous
/// field and the value must fill it exactly; the first violation is kept and
/// reported by [`RecordWriter::finish`].
pub struct RecordWriter {
    kind: RecordKind,
    line: String,
    drift: Option<String>,
}

impl RecordWriter {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            line: String::with_capacity(RECORD_LEN),
            drift: None,
        }
    }

    pub fn field(&mut self, start: usize, end: usize, value: impl AsRef<str>) -> &mut Self {
        let value = value.as_ref();
        if self.drift.is_none() {
            let expected_start = self.line.chars().count() + 1;
            let width = (end + 1).saturating_sub(start);
            let actual = value.chars().count();
            if start != expected_start {
                self.drift = Some(format!(
                    "field {start}-{end} starts at column {start}, writer is at {expected_start}"
                ));
            } else if actual != width {
                self.drift = Some(format!(
                    "field {start}-{end} expects {width} characters, got {actual}"
                ));
            }
        }
        self.line.push_str(value);
        self
    }

    pub fn blank(&mut self, start: usize, end: usize) -> &mut Self {
        self.field(start, end, format::blank((end + 1).saturating_sub(start)))
    }

    pub fn zeros(&mut self, start: usize, end: usize) -> &mut Self {
        self.field(start, end, format::zeros((end + 1).saturating_sub(start)))
    }

    /// Writes the sequence number into columns 395-400.
    pub fn sequence(&mut self, sequence: u32) -> &mut Self {
        self.field(
            SEQUENCE_START,
            RECORD_LEN,
            format::numeric(&sequence.to_string(), SEQUENCE_WIDTH),
        )
    }

    pub fn finish(self) -> Result<Record> {
        if let Some(detail) = self.drift {
            return Err(RemessaError::layout(self.kind.code(), &self.line, detail));
        }
        if !self.line.starts_with(self.kind.code()) {
            return Err(RemessaError::layout(
                self.kind.code(),
                &self.line,
                "first column does not hold the record type",
            ));
        }
        Ok(Record {
            kind: self.kind,
            line: self.line,
        })
    }
}

/// The ordered records of one remittance plus its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemittanceFile {
    pub file_name: String,
    pub records: Vec<Record>,
}

impl RemittanceFile {
    /// Every record followed by CRLF.
    pub fn contents(&self) -> String {
        render(&self.records)
    }

    pub fn sequences(&self) -> Vec<Option<u32>> {
        self.records.iter().map(Record::sequence).collect()
    }
}

pub fn render(records: &[Record]) -> String {
    let mut out = String::with_capacity(records.len() * (RECORD_LEN + LINE_TERMINATOR.len()));
    for record in records {
        out.push_str(record.as_str());
        out.push_str(LINE_TERMINATOR);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trailer(sequence: u32) -> Result<Record> {
        let mut w = RecordWriter::new(RecordKind::Trailer);
        w.field(1, 1, "9").blank(2, 394).sequence(sequence);
        w.finish()
    }

    #[test]
    fn test_writer_builds_full_record() {
        let record = trailer(12).unwrap();
        assert_eq!(record.len(), RECORD_LEN);
        assert!(record.check_length().is_ok());
        assert_eq!(record.kind(), RecordKind::Trailer);
        assert_eq!(record.sequence(), Some(12));
        assert!(record.as_str().ends_with("000012"));
    }

    #[test]
    fn test_writer_detects_width_mismatch() {
        let mut w = RecordWriter::new(RecordKind::Header);
        w.field(1, 1, "0").field(2, 5, "ABC").blank(5, 394).sequence(1);
        assert!(matches!(
            w.finish(),
            Err(RemessaError::LayoutConsistencyError { kind: '0', .. })
        ));
    }

    #[test]
    fn test_writer_detects_gap() {
        let mut w = RecordWriter::new(RecordKind::Header);
        w.field(1, 1, "0").blank(3, 394).sequence(1);
        assert!(w.finish().is_err());
    }

    #[test]
    fn test_writer_requires_type_in_first_column() {
        let mut w = RecordWriter::new(RecordKind::Detail);
        w.field(1, 1, "2").blank(2, 394).sequence(2);
        assert!(w.finish().is_err());
    }

    #[test]
    fn test_short_record_fails_length_check() {
        let mut w = RecordWriter::new(RecordKind::Trailer);
        w.field(1, 1, "9").blank(2, 100);
        let record = w.finish().unwrap();
        match record.check_length() {
            Err(RemessaError::LayoutConsistencyError {
                length, excerpt, ..
            }) => {
                assert_eq!(length, 100);
                assert_eq!(excerpt.len(), 100);
            }
            other => panic!("expected layout error, got {other:?}"),
        }
    }

    #[test]
    fn test_render_uses_crlf() {
        let records = vec![trailer(1).unwrap(), trailer(2).unwrap()];
        let out = render(&records);
        assert_eq!(out.len(), 2 * 402);
        assert_eq!(&out[400..402], "\r\n");
        assert!(out.ends_with("000002\r\n"));
    }
}
