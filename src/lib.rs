//! Intel HEX object file parsing.
//!
//! A HEX file is ASCII text with one checksum-protected record per line.
//! [`HexFile`] parses a whole file into its ordered [`Record`]s, or fails at
//! the first invalid record with a [`ParseError`] carrying the byte offset
//! where the failing field starts.
//!
//! ```
//! use ihex_records::{Address16, HexFile, Record};
//!
//! let file = HexFile::from_text(":0201FE00FF0FF1\n:00000001FF\n").unwrap();
//!
//! assert_eq!(
//!     file.records(),
//!     &[
//!         Record::Data {
//!             address: Address16::new(0x01FE),
//!             bytes: vec![0xFF, 0x0F],
//!         },
//!         Record::EndOfFile,
//!     ]
//! );
//! ```

#![no_std]

extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod address;
pub mod checksum;
pub mod error;
pub mod file;
pub mod parser;
pub mod record;
pub mod types;

#[cfg(all(test, feature = "std"))]
mod proptests;

pub use address::{Address16, Address32};
pub use error::{ErrorKind, ParseError, SourcePosition};
pub use file::HexFile;
pub use parser::{Parser, Records};
pub use record::{Kind, Record};
