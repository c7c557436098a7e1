//! Fuzz target for wire field boundary conditions
//!
//! # Strategy
//!
//! - Declared lengths: zero, exact, one past the buffer, at the cap, just
//!   over the cap, `u32::MAX`
//! - Field sequences: arbitrary interleavings of every reader operation
//!
//! # Invariants
//!
//! - A declared length past the remaining buffer or `MAX_DATA_LEN` MUST
//!   return `ProtocolError::MalformedLength`
//! - A fixed-width field past the end MUST return
//!   `ProtocolError::TruncatedInput`
//! - Errors never consume more than the buffer holds (never panic)

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use otr_proto::{MAX_DATA_LEN, ProtocolError, WireReader};

#[derive(Debug, Clone, Arbitrary)]
enum DeclaredLength {
    Zero,
    Exact,
    OnePastEnd,
    AtCap,
    OverCap,
    Max,
    Random(u32),
}

#[derive(Debug, Clone, Arbitrary)]
enum Field {
    Short,
    Byte,
    Int,
    Data,
    Mac,
    Mpi,
}

#[derive(Debug, Clone, Arbitrary)]
struct Input {
    declared: DeclaredLength,
    body: Vec<u8>,
    fields: Vec<Field>,
    tail: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let declared = match input.declared {
        DeclaredLength::Zero => 0,
        DeclaredLength::Exact => input.body.len() as u32,
        DeclaredLength::OnePastEnd => input.body.len() as u32 + 1,
        DeclaredLength::AtCap => MAX_DATA_LEN as u32,
        DeclaredLength::OverCap => MAX_DATA_LEN as u32 + 1,
        DeclaredLength::Max => u32::MAX,
        DeclaredLength::Random(n) => n,
    };

    let mut buf = declared.to_be_bytes().to_vec();
    buf.extend_from_slice(&input.body);

    let mut reader = WireReader::new(&buf);
    match reader.read_data() {
        Ok(data) => assert_eq!(data.len(), declared as usize),
        Err(ProtocolError::MalformedLength { declared: d, limit, .. }) => assert!(d > limit),
        Err(other) => panic!("unexpected error for length-prefixed field: {other:?}"),
    }

    let mut reader = WireReader::new(&input.tail);
    for field in input.fields {
        let before = reader.remaining();
        let result = match field {
            Field::Short => reader.read_short().map(drop),
            Field::Byte => reader.read_byte().map(drop),
            Field::Int => reader.read_int().map(drop),
            Field::Data => reader.read_data().map(drop),
            Field::Mac => reader.read_mac().map(drop),
            Field::Mpi => reader.read_mpi().map(drop),
        };
        assert!(reader.remaining() <= before);
        if result.is_err() {
            break;
        }
    }
});
