use crate::address::{Address16, Address32};
use crate::checksum::verify;
use crate::error::{ErrorKind, ParseError};
use crate::record::{Kind, Record};

use alloc::vec::Vec;
use core::iter::FusedIterator;
use log::{debug, trace};

const COLON: u8 = b':';
const CARRIAGE_RETURN: u8 = b'\r';
const LINE_FEED: u8 = b'\n';

/// Byte count, two address bytes and record type.
const HEADER_LENGTH: usize = 4;
const MAX_RECORD_LENGTH: usize = HEADER_LENGTH + 0xFF + 1;

type ParseResult<T> = Result<T, ParseError>;

/// A parser for the Intel Hexadecimal Object File Format.
///
/// Record format:
///
/// ```text
/// | Record mark | Length (n)   | Address      | Type         | Data          | Checksum     |
/// | ----------- | ------------ | ------------ | ------------ | ------------- | ------------ |
/// | ':' (colon) | 2 hex digits | 4 hex digits | 2 hex digits | 2n hex digits | 2 hex digits |
/// ```
///
/// Each record ends with `\n`, `\r`, `\r\n` or the end of the input.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    text: &'a [u8],
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Parser {
            text: text.as_bytes(),
        }
    }

    /// Parses `bytes` as ASCII text. Anything outside the record grammar,
    /// including non-ASCII bytes, is reported at its byte offset.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Parser { text: bytes }
    }

    /// Iterates over the records one at a time. The iterator ends after the
    /// first error.
    pub fn records(&self) -> Records<'a> {
        Records {
            cursor: Cursor {
                text: self.text,
                offset: 0,
            },
            done: false,
        }
    }

    /// Parses the whole input, stopping at the first invalid record.
    pub fn parse(&self) -> ParseResult<Vec<Record>> {
        let records = self.records().collect::<ParseResult<Vec<Record>>>()?;
        debug!("parsed {} records from {} bytes", records.len(), self.text.len());
        Ok(records)
    }
}

pub struct Records<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = ParseResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.is_empty() {
            return None;
        }

        let result = parse_record(&mut self.cursor);
        if result.is_err() {
            self.done = true;
        }

        Some(result)
    }
}

impl<'a> FusedIterator for Records<'a> {}

fn parse_record(cursor: &mut Cursor<'_>) -> ParseResult<Record> {
    let start = cursor.offset;
    cursor.record_mark()?;

    let mut bytes = [0; MAX_RECORD_LENGTH];

    let byte_count_offset = cursor.offset;
    bytes[0] = cursor.hex_byte()?;
    bytes[1] = cursor.hex_byte()?;
    bytes[2] = cursor.hex_byte()?;
    let kind = cursor.record_type()?;
    bytes[3] = kind.code();

    let byte_count = bytes[0];
    let data_end = HEADER_LENGTH + byte_count as usize;
    cursor.hex_bytes(&mut bytes[HEADER_LENGTH..data_end])?;

    let checksum_offset = cursor.offset;
    bytes[data_end] = cursor.hex_byte()?;
    cursor.line_break_or_end()?;

    if !verify(&bytes[..=data_end]) {
        return Err(ParseError::new(ErrorKind::InvalidChecksum, checksum_offset));
    }

    if let Some(expected) = kind.expected_byte_count() {
        if byte_count != expected {
            return Err(ParseError::new(
                ErrorKind::ExpectedDifferentByteCount {
                    expected,
                    actual: byte_count,
                },
                byte_count_offset,
            ));
        }
    }

    trace!("{} record at offset {}", kind.name(), start);

    let data = &bytes[HEADER_LENGTH..data_end];

    let record = match kind {
        Kind::Data => Record::Data {
            address: Address16::new(u16::from_be_bytes([bytes[1], bytes[2]])),
            bytes: data.to_vec(),
        },
        Kind::EndOfFile => Record::EndOfFile,
        Kind::ExtendedSegmentAddress => {
            Record::ExtendedSegmentAddress(Address16::new(u16::from_be_bytes([data[0], data[1]])))
        }
        Kind::StartSegmentAddress => Record::StartSegmentAddress {
            cs: Address16::new(u16::from_be_bytes([data[0], data[1]])),
            ip: Address16::new(u16::from_be_bytes([data[2], data[3]])),
        },
        Kind::ExtendedLinearAddress => {
            Record::ExtendedLinearAddress(Address16::new(u16::from_be_bytes([data[0], data[1]])))
        }
        Kind::StartLinearAddress => Record::StartLinearAddress(Address32::new(
            u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
        )),
    };

    Ok(record)
}

/// Read position into the complete input. Offsets are never rebased, so
/// every error refers to the original input.
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    text: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn is_empty(&self) -> bool {
        self.offset >= self.text.len()
    }

    fn peek(&self) -> Option<u8> {
        self.text.get(self.offset).copied()
    }

    fn record_mark(&mut self) -> ParseResult<()> {
        if self.peek() != Some(COLON) {
            return Err(ParseError::new(ErrorKind::ExpectedColon, self.offset));
        }

        self.offset += 1;
        Ok(())
    }

    fn record_type(&mut self) -> ParseResult<Kind> {
        let offset = self.offset;
        let code = self.hex_byte()?;

        Kind::from_code(code)
            .ok_or_else(|| ParseError::new(ErrorKind::InvalidRecordType(code), offset))
    }

    fn line_break_or_end(&mut self) -> ParseResult<()> {
        match self.peek() {
            None => {}
            Some(LINE_FEED) => self.offset += 1,
            Some(CARRIAGE_RETURN) => {
                self.offset += 1;
                if self.peek() == Some(LINE_FEED) {
                    self.offset += 1;
                }
            }
            Some(_) => return Err(ParseError::new(ErrorKind::ExpectedLineBreak, self.offset)),
        }

        Ok(())
    }

    fn hex_bytes(&mut self, buffer: &mut [u8]) -> ParseResult<()> {
        for byte in buffer.iter_mut() {
            *byte = self.hex_byte()?;
        }

        Ok(())
    }

    /// Two hex digits as one byte.
    fn hex_byte(&mut self) -> ParseResult<u8> {
        let error = ParseError::new(ErrorKind::ExpectedHexDigits { count: 2 }, self.offset);

        let digits = self.text.get(self.offset..self.offset + 2).ok_or(error)?;

        let mut byte = [0; 1];
        hex::decode_to_slice(digits, &mut byte).map_err(|_| error)?;

        self.offset += 2;
        Ok(byte[0])
    }
}
