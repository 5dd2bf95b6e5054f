//! Property-based tests for the codec guarantees: round trips, canonical
//! dictionary ordering and independence from how the input is fragmented.

use std::collections::BTreeMap;

use bencodex::{decode_all_bytes, decoding::Decoder, encode, encode_to_bytes, Dict, Key, Value};
use num_bigint::{BigInt, Sign};
use proptest::{collection::vec, prelude::*, sample::Index};

fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        vec(any::<u8>(), 0..8).prop_map(Key::Bytes),
        ".{0,8}".prop_map(Key::Text),
    ]
}

fn arb_integer() -> impl Strategy<Value = BigInt> {
    prop_oneof![
        any::<i64>().prop_map(BigInt::from),
        (any::<bool>(), vec(any::<u8>(), 1..32)).prop_map(|(negative, magnitude)| {
            let sign = if negative { Sign::Minus } else { Sign::Plus };
            BigInt::from_bytes_be(sign, &magnitude)
        }),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        arb_integer().prop_map(Value::Integer),
        vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
        ".{0,16}".prop_map(Value::Text),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..8).prop_map(Value::List),
            vec((arb_key(), inner), 0..8)
                .prop_map(|entries| Value::Dict(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_round_trip(value in arb_value()) {
        let encoded = encode_to_bytes(&value);
        prop_assert_eq!(decode_all_bytes(&encoded)?, value);
    }

    #[test]
    fn prop_reencoding_is_stable(value in arb_value()) {
        let encoded = encode_to_bytes(&value);
        let decoded = decode_all_bytes(&encoded)?;
        prop_assert_eq!(encode_to_bytes(&decoded), encoded);
    }

    #[test]
    fn prop_chunks_concatenate_to_the_encoding(value in arb_value()) {
        let chunks: Vec<_> = encode(&value).collect();
        prop_assert_eq!(chunks.concat(), encode_to_bytes(&value));
    }

    #[test]
    fn prop_insertion_order_is_irrelevant(
        entries in vec((arb_key(), arb_value()), 0..12)
    ) {
        let unique: BTreeMap<Key, Value> = entries.into_iter().collect();

        let forward: Dict = unique.clone().into_iter().collect();
        let backward: Dict = unique.into_iter().rev().collect();

        prop_assert_eq!(
            encode_to_bytes(&Value::Dict(forward)),
            encode_to_bytes(&Value::Dict(backward))
        );
    }

    #[test]
    fn prop_fragmentation_is_irrelevant(
        value in arb_value(),
        split in any::<Index>(),
        read_size in 1usize..16,
    ) {
        let encoded = encode_to_bytes(&value);
        let split = split.index(encoded.len() + 1);

        let decoded = Decoder::new(&encoded[split..])
            .with_buffered(&encoded[..split])
            .with_read_size(read_size)
            .decode()?;
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_truncation_is_detected(value in arb_value(), cut in any::<Index>()) {
        let encoded = encode_to_bytes(&value);
        let cut = cut.index(encoded.len());
        prop_assert!(decode_all_bytes(&encoded[..cut]).is_err());
    }
}
