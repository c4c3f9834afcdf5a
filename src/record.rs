use crate::address::{Address16, Address32};
use crate::checksum::checksum;
use crate::types;

use alloc::vec::Vec;
use core::fmt;

/// The record type field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    /// Data bytes and the 16-bit address of the first byte.
    Data = types::DATA,
    /// Terminates the file. The data field is empty by convention.
    EndOfFile = types::END_OF_FILE,
    /// 16-bit segment base, multiplied by 16 and added to subsequent data
    /// record addresses (80x86 real mode addressing).
    ExtendedSegmentAddress = types::EXTENDED_SEGMENT_ADDRESS,
    /// Initial CS:IP register contents.
    StartSegmentAddress = types::START_SEGMENT_ADDRESS,
    /// Upper 16 bits of the 32-bit address of subsequent data records.
    ExtendedLinearAddress = types::EXTENDED_LINEAR_ADDRESS,
    /// Initial EIP register contents.
    StartLinearAddress = types::START_LINEAR_ADDRESS,
}

impl Kind {
    pub fn from_code(code: u8) -> Option<Kind> {
        match code {
            types::DATA => Some(Kind::Data),
            types::END_OF_FILE => Some(Kind::EndOfFile),
            types::EXTENDED_SEGMENT_ADDRESS => Some(Kind::ExtendedSegmentAddress),
            types::START_SEGMENT_ADDRESS => Some(Kind::StartSegmentAddress),
            types::EXTENDED_LINEAR_ADDRESS => Some(Kind::ExtendedLinearAddress),
            types::START_LINEAR_ADDRESS => Some(Kind::StartLinearAddress),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Data => "data",
            Kind::EndOfFile => "end of file",
            Kind::ExtendedSegmentAddress => "extended segment address",
            Kind::StartSegmentAddress => "start segment address",
            Kind::ExtendedLinearAddress => "extended linear address",
            Kind::StartLinearAddress => "start linear address",
        }
    }

    /// The byte count a record of this kind must declare, if it is fixed.
    ///
    /// End of file records conventionally declare zero bytes, but this is
    /// not enforced.
    pub fn expected_byte_count(self) -> Option<u8> {
        match self {
            Kind::ExtendedSegmentAddress | Kind::ExtendedLinearAddress => Some(2),
            Kind::StartSegmentAddress | Kind::StartLinearAddress => Some(4),
            Kind::Data | Kind::EndOfFile => None,
        }
    }
}

impl TryFrom<u8> for Kind {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Kind::from_code(code).ok_or(code)
    }
}

/// One decoded line of a HEX file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Record {
    Data {
        address: Address16,
        bytes: Vec<u8>,
    },
    EndOfFile,
    ExtendedSegmentAddress(Address16),
    StartSegmentAddress {
        cs: Address16,
        ip: Address16,
    },
    /// Upper 16 bits of a 32-bit address.
    ExtendedLinearAddress(Address16),
    StartLinearAddress(Address32),
}

impl Record {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Data { .. } => Kind::Data,
            Self::EndOfFile => Kind::EndOfFile,
            Self::ExtendedSegmentAddress(_) => Kind::ExtendedSegmentAddress,
            Self::StartSegmentAddress { .. } => Kind::StartSegmentAddress,
            Self::ExtendedLinearAddress(_) => Kind::ExtendedLinearAddress,
            Self::StartLinearAddress(_) => Kind::StartLinearAddress,
        }
    }

    pub fn record_type(&self) -> u8 {
        self.kind().code()
    }

    /// The data field, big-endian, as it appears in the record.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::Data { bytes, .. } => bytes.clone(),
            Self::EndOfFile => Vec::new(),
            Self::ExtendedSegmentAddress(address) | Self::ExtendedLinearAddress(address) => {
                address.value().to_be_bytes().to_vec()
            }
            Self::StartSegmentAddress { cs, ip } => {
                let mut word = Vec::with_capacity(4);
                word.extend_from_slice(&cs.value().to_be_bytes());
                word.extend_from_slice(&ip.value().to_be_bytes());
                word
            }
            Self::StartLinearAddress(address) => address.value().to_be_bytes().to_vec(),
        }
    }

    /// Recomputes the checksum byte of this record.
    ///
    /// Only data records keep their address field; every other kind is
    /// checksummed with `address_field`, which is usually `0x0000`.
    ///
    /// Returns `None` for a data record holding more than 255 bytes, which
    /// no byte count field can describe.
    pub fn checksum(&self, address_field: u16) -> Option<u8> {
        let address = match self {
            Self::Data { address, .. } => address.value(),
            _ => address_field,
        };
        let payload = self.payload();
        let byte_count = u8::try_from(payload.len()).ok()?;

        let mut header = [0; 4];
        header[0] = byte_count;
        header[1..3].copy_from_slice(&address.to_be_bytes());
        header[3] = self.record_type();

        let mut bytes = Vec::with_capacity(header.len() + payload.len());
        bytes.extend_from_slice(&header);
        bytes.extend_from_slice(&payload);
        Some(checksum(&bytes))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {}", self.record_type(), self.kind().name())?;

        match self {
            Self::Data { address, bytes } => {
                write!(f, " – address: {:X}, data: ", address)?;
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{:02X}", byte)?;
                }
                Ok(())
            }
            Self::EndOfFile => Ok(()),
            Self::ExtendedSegmentAddress(address) | Self::ExtendedLinearAddress(address) => {
                write!(f, " – {:X}", address)
            }
            Self::StartSegmentAddress { cs, ip } => write!(f, " – CS: {:X}, IP: {:X}", cs, ip),
            Self::StartLinearAddress(address) => write!(f, " – {:X}", address),
        }
    }
}
