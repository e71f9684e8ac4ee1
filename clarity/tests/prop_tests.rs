use proptest::prelude::*;

use ballot_clarity::{c32_address, c32_address_decode, c32_decode, c32_encode, ClarityValue};

proptest! {
    /// Arbitrary input never panics the decoder.
    #[test]
    fn decoder_total_on_garbage(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = ClarityValue::deserialize(&bytes);
    }

    /// c32 preserves every byte string, including leading zero bytes.
    #[test]
    fn c32_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = c32_encode(&bytes);
        prop_assert_eq!(c32_decode(&encoded).unwrap(), bytes);
    }

    /// Any version/hash pair yields an address that decodes back to itself.
    #[test]
    fn address_roundtrip(version in 0u8..32, hash in prop::array::uniform20(any::<u8>())) {
        let address = c32_address(version, &hash).unwrap();
        prop_assert!(address.starts_with('S'));
        prop_assert_eq!(c32_address_decode(&address).unwrap(), (version, hash));
    }

    /// Proposal-shaped tuples survive the wire unchanged.
    #[test]
    fn proposal_tuple_survives_wire(
        title in "[ -~]{0,64}",
        votes_for in any::<u64>(),
        executed in any::<bool>(),
    ) {
        let value = ClarityValue::ok(ClarityValue::tuple([
            ("title", ClarityValue::string_utf8(title.clone())),
            ("votes-for", ClarityValue::uint(votes_for)),
            ("executed", ClarityValue::Bool(executed)),
        ]));
        let decoded = ClarityValue::from_hex(&value.to_hex()).unwrap();
        prop_assert_eq!(decoded, value);
    }
}
