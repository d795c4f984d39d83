use proptest::prelude::*;
use valadata_core::{FieldValue, NormalizedBag, ProvenanceSource, ServiceField};

fn source() -> impl Strategy<Value = ProvenanceSource> {
    prop_oneof![
        Just(ProvenanceSource::Manual),
        Just(ProvenanceSource::Crawl),
        Just(ProvenanceSource::PrimaryApi),
    ]
}

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        any::<bool>().prop_map(FieldValue::Present),
        Just(FieldValue::ExplicitUnknown),
        Just(FieldValue::Absent),
    ]
}

proptest! {
    #[test]
    fn sorting_sources_follows_priority(mut sources in prop::collection::vec(source(), 0..10)) {
        sources.sort();
        prop_assert!(sources.windows(2).all(|w| w[0].rank() <= w[1].rank()));
    }

    #[test]
    fn bag_get_returns_last_set(ops in prop::collection::vec((0usize..7, field_value()), 0..30)) {
        let mut bag = NormalizedBag::new();
        let mut expected = [FieldValue::Absent; 7];
        for (idx, value) in &ops {
            bag.set(ServiceField::ALL[*idx], *value);
            expected[*idx] = *value;
        }
        for (idx, field) in ServiceField::ALL.into_iter().enumerate() {
            prop_assert_eq!(bag.get(field), expected[idx]);
        }
        prop_assert_eq!(bag.len(), expected.iter().filter(|v| !v.is_absent()).count());
    }

    #[test]
    fn bag_json_never_holds_absent(ops in prop::collection::vec((0usize..7, field_value()), 0..30)) {
        let bag: NormalizedBag = ops
            .iter()
            .map(|(idx, value)| (ServiceField::ALL[*idx], *value))
            .collect();
        let json = serde_json::to_string(&bag).unwrap();
        let back: NormalizedBag = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, bag);
    }
}
