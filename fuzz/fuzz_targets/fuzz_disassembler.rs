//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary ROM images to the disassembler and checks
//! the listing against the decoder word by word.

#![no_main]

use arbitrary::Arbitrary;
use chip8_pulse::{
    decode_with, disassemble, format_descriptor, history_row, Base, DecodeOptions,
    DisassemblyOptions, Opcode, ZeroGroupPolicy,
};
use libfuzzer_sys::fuzz_target;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u16,
    low_nibble_zero_group: bool,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let decode = DecodeOptions {
        zero_group: if input.low_nibble_zero_group {
            ZeroGroupPolicy::LowNibble
        } else {
            ZeroGroupPolicy::FullByte
        },
    };
    let options = DisassemblyOptions {
        start_address: input.start_address,
        decode,
    };

    let listing = disassemble(&input.bytes, options);

    // One instruction per complete word
    assert_eq!(listing.instructions.len(), input.bytes.len() / 2);
    assert_eq!(
        listing.trailing_byte,
        (input.bytes.len() % 2 == 1).then(|| input.bytes[input.bytes.len() - 1])
    );

    let mut expected_address = input.start_address;
    for (instr, word) in listing.instructions.iter().zip(input.bytes.chunks_exact(2)) {
        assert_eq!(instr.address, expected_address);

        let opcode = Opcode::from_be_bytes(word[0], word[1]);
        assert_eq!(instr.descriptor, decode_with(opcode, decode));

        // Formatting must never panic
        let _ = format_descriptor(&instr.descriptor, Base::Decimal);
        let _ = history_row(&instr.descriptor);

        expected_address = expected_address.wrapping_add(2);
    }
});
