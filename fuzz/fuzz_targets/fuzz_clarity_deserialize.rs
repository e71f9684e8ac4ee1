#![no_main]

use ballot_clarity::ClarityValue;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Node responses are untrusted: decoding must never panic, and anything
    // that decodes must re-encode to the same bytes.
    if let Ok(value) = ClarityValue::deserialize(data) {
        assert_eq!(value.serialize(), data);

        let _ = value.expect_u64();
        let _ = value.expect_text();
        let _ = value.expect_principal();
        let _ = value.field("title");
    }
});
