#![no_main]

use libfuzzer_sys::fuzz_target;
use sbf_reader::Reader;
use sbf_writer::Writer;

// Fuzz target: string write->read roundtrip.
//
// Interprets the fuzz input as UTF-8 (lossily) and roundtrips it through
// the two-mode string encoding, both fully resident and through a tiny
// streamed window.
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).into_owned();

    let mut writer = Writer::new();
    writer.write_string(Some(&text));
    writer.write_string(None);
    writer.write_string(Some(""));
    let wire = writer.finish();

    let mut reader = Reader::from_slice(&wire);
    assert_eq!(reader.read_string().unwrap().unwrap(), text);
    assert_eq!(reader.read_string().unwrap(), None);
    assert_eq!(reader.read_string().unwrap().unwrap(), "");

    let mut streamed = Reader::from_stream(std::io::Cursor::new(wire), 8);
    assert_eq!(streamed.read_string().unwrap().unwrap(), text);
    assert_eq!(streamed.read_string().unwrap(), None);
    assert_eq!(streamed.read_string().unwrap().unwrap(), "");
});
