//! Randomized contract checks: generated values round-trip, and arbitrary
//! input never panics a decoder.

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use scale_types_codec::{
    check_all, create_type, BareOpts, Codec, CodecInput, RegistryRef, TypeRegistry,
};
use serde_json::{json, Value};

fn registry() -> RegistryRef {
    let mut registry = TypeRegistry::new();
    registry
        .register_struct("Entry", &[("id", "u64"), ("label", "Text"), ("data", "Bytes")])
        .register_enum("Op", &[("Nop", "Null"), ("Put", "Entry"), ("Del", "Compact<u64>")])
        .unwrap();
    registry.into_ref()
}

fn entry() -> impl Strategy<Value = Value> {
    (any::<u64>(), "[a-z]{0,12}", proptest::collection::vec(any::<u8>(), 0..32)).prop_map(
        |(id, label, data)| json!({"id": id.to_string(), "label": label, "data": data}),
    )
}

fn op() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!("Nop")),
        entry().prop_map(|e| json!({ "Put": e })),
        any::<u64>().prop_map(|n| json!({ "Del": n.to_string() })),
    ]
}

fn check(registry: &RegistryRef, ty: &str, primitive: &Value) -> Result<(), TestCaseError> {
    let value = create_type(registry, ty, CodecInput::Primitive(primitive))
        .map_err(|err| TestCaseError::fail(format!("{ty}: {err}")))?;
    check_all(registry, &*value).map_err(|v| TestCaseError::fail(v.to_string()))?;
    prop_assert_eq!(value.encoded_length(), value.to_bytes(&BareOpts::No).len());
    Ok(())
}

proptest! {
    #[test]
    fn uints_roundtrip(n in any::<u64>(), wide in any::<u128>()) {
        let registry = registry();
        check(&registry, "u64", &json!(n.to_string()))?;
        check(&registry, "u128", &json!(wide.to_string()))?;
        check(&registry, "Compact<u128>", &json!(wide.to_string()))?;
        check(&registry, "Compact<u64>", &json!(n))?;
    }

    #[test]
    fn text_and_bytes_roundtrip(s in "\\PC{0,40}", data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let registry = registry();
        check(&registry, "Text", &json!(s))?;
        check(&registry, "Bytes", &json!(data))?;
        check(&registry, "Vec<u8>", &json!(data))?;
    }

    #[test]
    fn ops_roundtrip(ops in proptest::collection::vec(op(), 0..8)) {
        let registry = registry();
        check(&registry, "Vec<Op>", &Value::Array(ops))?;
    }

    #[test]
    fn optional_entries_roundtrip(e in proptest::option::of(entry())) {
        let registry = registry();
        check(&registry, "Option<Entry>", &e.unwrap_or(Value::Null))?;
    }

    #[test]
    fn equal_content_hashes_equal(e in entry()) {
        let registry = registry();
        let a = create_type(&registry, "Entry", CodecInput::Primitive(&e)).unwrap();
        let b = create_type(&registry, "Entry", CodecInput::Bytes(&a.to_bytes(&BareOpts::No))).unwrap();
        prop_assert!(a.eq_codec(&*b));
        prop_assert_eq!(a.hash(), b.hash());
        prop_assert_eq!(a.to_json(), b.to_json());
    }

    #[test]
    fn decoders_never_panic(input in proptest::collection::vec(any::<u8>(), 0..48)) {
        let registry = registry();
        for ty in ["Op", "Vec<Op>", "Option<Entry>", "Text", "Compact<u32>"] {
            if let Ok(value) = create_type(&registry, ty, CodecInput::Bytes(&input)) {
                let consumed = value.initial_u8a_length().unwrap();
                prop_assert!(consumed <= input.len());
                prop_assert_eq!(value.to_bytes(&BareOpts::No), input[..consumed].to_vec());
            }
        }
    }
}

#[test]
fn seeded_garbage_sweep() {
    let registry = registry();
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5ca1e);
    let mut decoded = 0;
    for _ in 0..2_000 {
        let len = rng.gen_range(0..24);
        let input: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        if let Ok(value) = create_type(&registry, "Op", CodecInput::Bytes(&input)) {
            decoded += 1;
            check_all(&registry, &*value).unwrap();
        }
    }
    assert!(decoded > 0);
}
