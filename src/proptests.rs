use crate::checksum::{checksum, verify};
use crate::{Address16, Address32, ErrorKind, HexFile, Kind, Parser, Record};
use proptest::prelude::*;
use std::{format, string::String, vec::Vec};

fn encode(record_type: u8, address: u16, data: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(data.len() + 5);
    bytes.push(data.len() as u8);
    bytes.extend_from_slice(&address.to_be_bytes());
    bytes.push(record_type);
    bytes.extend_from_slice(data);
    bytes.push(checksum(&bytes));

    format!(":{}", hex::encode_upper(bytes))
}

fn line(record: &Record, address_field: u16) -> String {
    let address = match record {
        Record::Data { address, .. } => address.value(),
        _ => address_field,
    };

    encode(record.record_type(), address, &record.payload())
}

fn record_strategy() -> impl Strategy<Value = Record> {
    prop_oneof![
        (any::<u16>(), prop::collection::vec(any::<u8>(), 0..=255)).prop_map(
            |(address, bytes)| Record::Data {
                address: Address16::new(address),
                bytes,
            }
        ),
        Just(Record::EndOfFile),
        any::<u16>().prop_map(|base| Record::ExtendedSegmentAddress(Address16::new(base))),
        (any::<u16>(), any::<u16>()).prop_map(|(cs, ip)| Record::StartSegmentAddress {
            cs: Address16::new(cs),
            ip: Address16::new(ip),
        }),
        any::<u16>().prop_map(|upper| Record::ExtendedLinearAddress(Address16::new(upper))),
        any::<u32>().prop_map(|eip| Record::StartLinearAddress(Address32::new(eip))),
    ]
}

fn terminator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\n"), Just("\r"), Just("\r\n")]
}

fn fixed_kind_strategy() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::ExtendedSegmentAddress),
        Just(Kind::StartSegmentAddress),
        Just(Kind::ExtendedLinearAddress),
        Just(Kind::StartLinearAddress),
    ]
}

proptest! {
    #[test]
    fn checksum_law(record in record_strategy(), address_field in any::<u16>()) {
        let text = line(&record, address_field);
        let bytes = hex::decode(&text[1..]).unwrap();

        prop_assert!(verify(&bytes));
        prop_assert_eq!(record.checksum(address_field), Some(bytes[bytes.len() - 1]));

        let parsed = Parser::new(&text).parse().unwrap();
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(parsed[0].checksum(address_field), Some(bytes[bytes.len() - 1]));
        prop_assert_eq!(&parsed[0], &record);
    }

    #[test]
    fn parsing_is_idempotent(records in prop::collection::vec(record_strategy(), 0..16)) {
        let text = records
            .iter()
            .map(|record| line(record, 0))
            .collect::<Vec<_>>()
            .join("\n");

        let first = HexFile::from_text(&text).unwrap();
        let second = HexFile::from_text(&text).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.into_records(), records);
    }

    #[test]
    fn terminators_are_interchangeable(
        lines in prop::collection::vec((record_strategy(), terminator_strategy()), 1..8),
        trailing in any::<bool>(),
    ) {
        let records: Vec<Record> = lines.iter().map(|(record, _)| record.clone()).collect();

        let mut text = String::new();
        for (i, (record, terminator)) in lines.iter().enumerate() {
            text.push_str(&line(record, 0));
            if trailing || i + 1 < lines.len() {
                text.push_str(terminator);
            }
        }

        prop_assert_eq!(Parser::new(&text).parse(), Ok(records));
    }

    #[test]
    fn fixed_length_enforced(
        kind in fixed_kind_strategy(),
        data in prop::collection::vec(any::<u8>(), 0..=255),
    ) {
        let expected = kind.expected_byte_count().unwrap();
        prop_assume!(data.len() != expected as usize);

        let error = Parser::new(&encode(kind.code(), 0, &data)).parse().unwrap_err();

        prop_assert_eq!(
            error.kind,
            ErrorKind::ExpectedDifferentByteCount {
                expected,
                actual: data.len() as u8,
            }
        );
        prop_assert_eq!(error.position.offset, 1);
    }

    #[test]
    fn corrupted_checksum_rejected(record in record_strategy(), delta in 1u8..=255) {
        let text = line(&record, 0);
        let mut bytes = hex::decode(&text[1..]).unwrap();
        let last = bytes.len() - 1;
        bytes[last] = bytes[last].wrapping_add(delta);
        let text = format!(":{}", hex::encode_upper(&bytes));

        let error = Parser::new(&text).parse().unwrap_err();

        prop_assert_eq!(error.kind, ErrorKind::InvalidChecksum);
        prop_assert_eq!(error.position.offset, text.len() - 2);
    }
}
