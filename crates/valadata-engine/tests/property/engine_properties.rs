use proptest::prelude::*;
use valadata_core::{ComponentName, FieldValue, NormalizedBag, ProvenanceSource, ServiceField};
use valadata_engine::energy::{compute, EnergyComponents};
use valadata_engine::resolve::resolve;
use valadata_engine::signals::RawSignals;
use valadata_engine::tags;

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Present(true)),
        Just(FieldValue::Present(false)),
        Just(FieldValue::ExplicitUnknown),
        Just(FieldValue::Absent),
    ]
}

fn bag() -> impl Strategy<Value = NormalizedBag> {
    prop::collection::vec(field_value(), ServiceField::ALL.len()).prop_map(|values| {
        ServiceField::ALL.into_iter().zip(values).collect()
    })
}

fn source_bags() -> impl Strategy<Value = Vec<(ProvenanceSource, NormalizedBag)>> {
    (bag(), bag(), bag()).prop_map(|(m, c, p)| {
        vec![
            (ProvenanceSource::Manual, m),
            (ProvenanceSource::Crawl, c),
            (ProvenanceSource::PrimaryApi, p),
        ]
    })
}

fn component() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(-1000.0f64..1000.0)
}

fn components() -> impl Strategy<Value = EnergyComponents> {
    (component(), component(), component(), component()).prop_map(|(p, l, f, s)| {
        EnergyComponents {
            popularity: p,
            language: l,
            flags: f,
            sensory: s,
        }
    })
}

proptest! {
    #[test]
    fn resolution_ignores_input_order(inputs in source_bags()) {
        let forward = serde_json::to_string(&resolve(&inputs)).unwrap();
        let mut reversed = inputs.clone();
        reversed.reverse();
        let backward = serde_json::to_string(&resolve(&reversed)).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn canonical_value_is_highest_priority_informative(inputs in source_bags()) {
        let resolution = resolve(&inputs);
        for field in ServiceField::ALL {
            let expected = inputs.iter().find_map(|(_, b)| b.get(field).as_bool());
            prop_assert_eq!(resolution.canonical.get(field), expected);
            if let Some(conflict) = resolution.conflicts.get(field) {
                prop_assert!(conflict.sources.len() >= 2);
                prop_assert!(conflict.sources.windows(2).all(|w| w[0] < w[1]));
                prop_assert_eq!(conflict.values.len(), conflict.sources.len());
            }
        }
    }

    #[test]
    fn composite_is_bounded(c in components()) {
        let score = compute(&c);
        prop_assert!((0.0..=100.0).contains(&score.overall));
        prop_assert!((0.0..=1.0).contains(&score.confidence));
    }

    #[test]
    fn adding_a_component_never_lowers_confidence(c in components(), idx in 0usize..4, v in -100.0f64..100.0) {
        let name = ComponentName::ALL[idx];
        prop_assume!(c.get(name).is_none());
        let before = compute(&c).confidence;
        let after = compute(&c.with(name, v)).confidence;
        prop_assert!(after >= before);
    }

    #[test]
    fn tag_scores_are_bounded(text in ".{0,200}", energy in -50.0f64..150.0, confidence in 0.0f64..1.0) {
        let registry = valadata_core::VersionRegistry::default();
        let version = registry.tag("tags_v1").unwrap();
        let signals = RawSignals { about_text: text, ..Default::default() };
        let record = tags::compute_with(&"v".into(), &version, &signals, energy, confidence)
            .depending_on("energy_v1");
        prop_assert!(record.scores.values().all(|s| (0.0..=1.0).contains(s)));
    }
}
