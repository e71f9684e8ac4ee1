#![no_main]

use ballot_clarity::{c32_address, c32_address_decode};
use ballot_types::Principal;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Whatever decodes must re-encode to a valid principal.
    if let Ok((version, hash160)) = c32_address_decode(text) {
        let encoded = c32_address(version, &hash160).expect("decoded version is in range");
        assert!(Principal::parse(encoded.as_str()).is_ok());
    }
    let _ = Principal::parse(text);
});
