//! Property-based tests for the containers and the JSON text round trip.

use plaindoc::json::{self, Array, Object, Value};
use plaindoc::{DynamicArray, HashTable};
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_primitive() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        // Quarter steps survive six fractional digits exactly.
        (-4_000_000i64..4_000_000).prop_map(|q| Value::Decimal(q as f64 / 4.0)),
        "[a-zA-Z0-9 _.-]{0,12}".prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_primitive().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6)
                .prop_map(|items| Value::Array(items.into_iter().collect::<Array>())),
            prop::collection::vec(("[a-z_]{1,8}", inner), 0..6)
                .prop_map(|members| Value::Object(members.into_iter().collect::<Object>())),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec(arb_value(), 0..6)
            .prop_map(|items| Value::Array(items.into_iter().collect::<Array>())),
        prop::collection::vec(("[a-z_]{1,8}", arb_value()), 0..6)
            .prop_map(|members| Value::Object(members.into_iter().collect::<Object>())),
    ]
}

proptest! {
    #[test]
    fn prop_table_holds_every_distinct_key(keys in prop::collection::vec("[a-z0-9]{1,10}", 0..300)) {
        let mut table = HashTable::new();
        let mut distinct = HashSet::new();
        for (i, key) in keys.iter().enumerate() {
            let inserted = table.add(key, i).is_ok();
            prop_assert_eq!(inserted, distinct.insert(key.clone()));
        }
        prop_assert_eq!(table.len(), distinct.len());
        prop_assert!(table.len() <= table.capacity());
        for key in &distinct {
            prop_assert!(table.contains_key(key));
        }
        prop_assert_eq!(table.iter().count(), distinct.len());
    }

    #[test]
    fn prop_table_first_insert_wins(key in "[a-z]{1,6}", first in any::<i32>(), second in any::<i32>()) {
        let mut table = HashTable::new();
        prop_assert!(table.add(&key, first).is_ok());
        prop_assert_eq!(table.add(&key, second), Err(second));
        prop_assert_eq!(table.get(&key), Some(&first));
    }

    #[test]
    fn prop_iterator_counts_every_entry(n in 0usize..200) {
        let table: HashTable<usize> = (0..n).map(|i| (format!("k{}", i), i)).collect();
        let mut it = table.iter();
        let mut seen = 0;
        while it.next().is_some() {
            seen += 1;
            prop_assert_eq!(it.yielded(), seen);
        }
        prop_assert_eq!(seen, n);
    }

    #[test]
    fn prop_array_preserves_order(values in prop::collection::vec(any::<i64>(), 0..300)) {
        let array: DynamicArray<i64> = values.iter().copied().collect();
        prop_assert_eq!(array.len(), values.len());
        prop_assert!(array.capacity() >= values.len());
        for (i, value) in values.iter().enumerate() {
            prop_assert_eq!(array.get(i), Some(value));
        }
        prop_assert_eq!(array.get(values.len()), None);
    }

    #[test]
    fn prop_json_round_trip(value in arb_document()) {
        let text = json::to_string(&value);
        let parsed = json::from_str(&text);
        prop_assert_eq!(parsed, Ok(value));
    }

    #[test]
    fn prop_json_round_trip_spaces(value in arb_document(), width in 1usize..6) {
        let options = plaindoc::WriteOptions::new().with_indent(plaindoc::Indent::Spaces(width));
        let text = json::to_string_with_options(&value, &options);
        prop_assert_eq!(json::from_str(&text), Ok(value));
    }
}
