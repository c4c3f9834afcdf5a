use crate::error::ParseError;
use crate::parser::Parser;
use crate::record::Record;

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// The contents of an Intel Hexadecimal Object File (.hex).
///
/// Each line of the file corresponds to one record, in input order. Address
/// records are kept as they are and never folded into the data records that
/// follow them.
///
/// ```
/// use ihex_records::{HexFile, Record};
///
/// let file: HexFile = ":0200000212FEEC\n:00000001FF\n".parse().unwrap();
///
/// assert_eq!(file.len(), 2);
/// assert_eq!(file.records()[1], Record::EndOfFile);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HexFile {
    records: Vec<Record>,
}

impl HexFile {
    /// Parses the text contents of a .hex file.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        Self::from_bytes(text)
    }

    /// Parses ASCII bytes. Error positions are byte offsets into `bytes`.
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> Result<Self, ParseError> {
        let records = Parser::from_bytes(bytes.as_ref()).parse()?;
        Ok(HexFile { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromStr for HexFile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HexFile::from_text(s)
    }
}

impl TryFrom<&str> for HexFile {
    type Error = ParseError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        HexFile::from_text(text)
    }
}

impl TryFrom<&[u8]> for HexFile {
    type Error = ParseError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        HexFile::from_bytes(bytes)
    }
}

impl IntoIterator for HexFile {
    type Item = Record;
    type IntoIter = alloc::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a HexFile {
    type Item = &'a Record;
    type IntoIter = core::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// `HEXFile (N records)`. The alternate form `{:#}` lists every record on
/// its own indented line.
impl fmt::Display for HexFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HEXFile ({} records)", self.records.len())?;

        if f.alternate() {
            for record in &self.records {
                write!(f, "\n  {}", record)?;
            }
        }

        Ok(())
    }
}
