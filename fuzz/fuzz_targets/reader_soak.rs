#![no_main]

use libfuzzer_sys::fuzz_target;
use sbf_reader::Reader;

// Fuzz target: arbitrary bytes through every typed read.
//
// The first input byte picks the window capacity, the rest is the stream.
// Every outcome is acceptable except a panic: malformed input must only
// ever surface typed errors.
fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let capacity = 8 + usize::from(first % 64);
    let mut reader = Reader::from_stream(std::io::Cursor::new(rest.to_vec()), capacity);

    let _ = reader.read_var_u32();
    let _ = reader.read_string();
    let _ = reader.read_i32();
    let _ = reader.read_var_i64();
    let _ = reader.can_read_var32();
    let _ = reader.read_f64();
    let _ = reader.read_i16s(3);
    let _ = reader.skip(5);
    let _ = reader.read_string();
    let _ = reader.read();
});
