#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: varint encode->decode roundtrip.
//
// Takes 8 bytes of fuzz input as a u64, encodes it through both varint
// widths (truncating for the 32-bit one), decodes, and asserts the value
// and consumed length match.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let value = u64::from_le_bytes(data[..8].try_into().unwrap());

    let mut buf64 = [0u8; 9];
    let len = sbf_wire::varint::encode_varint64(value, &mut buf64);
    let (decoded, consumed) = sbf_wire::varint::decode_varint64(&buf64[..len]).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(consumed, len);

    let value32 = value as u32;
    let mut buf32 = [0u8; 5];
    let len = sbf_wire::varint::encode_varint32(value32, &mut buf32);
    let (decoded, consumed) = sbf_wire::varint::decode_varint32(&buf32[..len]).unwrap();
    assert_eq!(decoded, value32);
    assert_eq!(consumed, len);

    // Zig-zag is a bijection.
    let signed = value as i64;
    assert_eq!(
        sbf_wire::varint::zigzag_decode64(sbf_wire::varint::zigzag_encode64(signed)),
        signed
    );
});
