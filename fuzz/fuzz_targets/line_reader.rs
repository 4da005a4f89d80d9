#![no_main]

use ldif_wire::{LineReader, ParsedLine};
use libfuzzer_sys::fuzz_target;

// Fuzz target: physical-to-logical line joining and line classification.
//
// Drains a `LineReader` over the input and classifies every logical
// line. Line numbers must never go backwards.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut reader = LineReader::new(text.as_bytes());
    let mut last = 0;
    while let Ok(Some(line)) = reader.next_line() {
        assert!(line.line_number >= last, "line numbers went backwards");
        last = line.line_number;
        let _ = ParsedLine::parse(&line.text);
    }
});
