//! Boundary tests pinning exact wire sizes and encodings: varint byte
//! counts at every length transition, zig-zag's single-byte -1, the
//! string marker bytes, and byte-order mismatch detection.

use sbf_reader::{ByteOrder, Reader};
use sbf_wire::varint::{encode_varint32, encode_varint64};
use sbf_writer::Writer;

// ── Varint byte counts ───────────────────────────────────────────────────

#[test]
fn varint32_byte_count_transitions() {
    let cases: &[(u32, usize)] = &[
        (0, 1),
        (127, 1),
        (128, 2),
        (16_383, 2),
        (16_384, 3),
        (0x001F_FFFF, 3),
        (0x0FFF_FFFF, 4),
        (0xFFFF_FFFF, 5),
    ];
    for &(value, expected) in cases {
        let mut writer = Writer::new();
        writer.write_var_u32(value);
        assert_eq!(writer.len(), expected, "wire size for {value:#X}");

        let mut buf = [0u8; 5];
        assert_eq!(encode_varint32(value, &mut buf), expected);

        let mut reader = Reader::from_bytes(writer.finish());
        assert_eq!(reader.read_var_u32().unwrap(), value);
        assert_eq!(reader.position(), expected);
    }
}

#[test]
fn varint64_byte_count_transitions() {
    let mut buf = [0u8; 9];
    assert_eq!(encode_varint64(0x7F, &mut buf), 1);
    assert_eq!(encode_varint64(0x7FFF_FFFF_FFFF_FFFF, &mut buf), 9);

    let mut writer = Writer::new();
    writer.write_var_u64(0x7FFF_FFFF_FFFF_FFFF);
    assert_eq!(writer.len(), 9);
    let mut reader = Reader::from_bytes(writer.finish());
    assert_eq!(reader.read_var_u64().unwrap(), 0x7FFF_FFFF_FFFF_FFFF);
}

// ── Zig-zag ──────────────────────────────────────────────────────────────

#[test]
fn minus_one_encodes_to_single_0x01() {
    let mut writer = Writer::new();
    writer.write_var_i32(-1);
    let wire = writer.finish();
    assert_eq!(wire, vec![0x01]);

    let mut reader = Reader::from_bytes(wire);
    assert_eq!(reader.read_var_i32().unwrap(), -1);
}

#[test]
fn minus_one_64_matches() {
    let mut writer = Writer::new();
    writer.write_var_i64(-1);
    let wire = writer.finish();
    assert_eq!(wire, vec![0x01]);
    let mut reader = Reader::from_bytes(wire);
    assert_eq!(reader.read_var_i64().unwrap(), -1);
}

// ── String markers ───────────────────────────────────────────────────────

#[test]
fn null_string_is_one_byte() {
    let mut writer = Writer::new();
    writer.write_string(None);
    let wire = writer.finish();
    assert_eq!(wire, vec![0x80]);
    let mut reader = Reader::from_bytes(wire);
    assert_eq!(reader.read_string().unwrap(), None);
}

#[test]
fn empty_string_is_one_byte() {
    let mut writer = Writer::new();
    writer.write_string(Some(""));
    let wire = writer.finish();
    assert_eq!(wire, vec![0x81]);
    let mut reader = Reader::from_bytes(wire);
    assert_eq!(reader.read_string().unwrap(), Some(String::new()));
}

#[test]
fn one_char_ascii_string_is_two_bytes() {
    let mut writer = Writer::new();
    writer.write_string(Some("a"));
    let wire = writer.finish();
    assert_eq!(wire.len(), 2);
    assert_eq!(wire[0], 0x82);
    let mut reader = Reader::from_bytes(wire);
    assert_eq!(reader.read_string().unwrap().unwrap(), "a");
}

#[test]
fn two_char_ascii_string_is_two_bytes_terminated() {
    let mut writer = Writer::new();
    writer.write_string(Some("ab"));
    let wire = writer.finish();
    assert_eq!(wire, vec![b'a', b'b' | 0x80]);
}

// ── Byte order ───────────────────────────────────────────────────────────

#[test]
fn mismatched_order_reads_different_float() {
    let mut writer = Writer::new();
    writer.write_f32(1.5); // asymmetric byte pattern
    let wire = writer.finish();

    let mut wrong = Reader::from_slice(&wire);
    wrong.set_order(ByteOrder::Little);
    let misread = wrong.read_f32().unwrap();
    assert_ne!(misread.to_bits(), 1.5f32.to_bits());

    let mut right = Reader::from_slice(&wire);
    assert_eq!(right.read_f32().unwrap().to_bits(), 1.5f32.to_bits());
}

#[test]
fn varints_ignore_byte_order() {
    let mut writer = Writer::new();
    writer.set_order(ByteOrder::Little);
    writer.write_var_u32(624_485);
    let wire = writer.finish();
    assert_eq!(wire, vec![0xE5, 0x8E, 0x26]);

    let mut reader = Reader::from_bytes(wire);
    reader.set_order(ByteOrder::Little);
    assert_eq!(reader.read_var_u32().unwrap(), 624_485);
}
