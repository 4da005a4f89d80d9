#![no_main]

use ldif_decoder::{DecoderConfig, LdifDecoder};
use ldif_types::SchemaMap;
use libfuzzer_sys::fuzz_target;

// Fuzz target: whole-file decode from raw bytes.
//
// Runs the byte-level entry point twice, with and without a schema map,
// so both the BOM sniffing / transcoding path and the binary value
// conversion path see arbitrary input. Any panic is a bug; diagnostics
// and errors are expected.
fuzz_target!(|data: &[u8]| {
    let _ = LdifDecoder::decode_bytes(data, DecoderConfig::default());

    let map: SchemaMap = [("description", "2.5.5.12"), ("jpegPhoto", "2.5.5.10")]
        .into_iter()
        .collect();
    let config = DecoderConfig::default()
        .with_schema_map(map)
        .with_max_line_length(4096);
    let _ = LdifDecoder::decode_bytes(data, config);
});
