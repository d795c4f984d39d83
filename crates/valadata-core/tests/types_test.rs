//! Tests for the shared value types.

use std::collections::BTreeMap;

use valadata_core::types::*;

#[test]
fn provenance_priority_order_is_manual_crawl_primary() {
    assert_eq!(
        ProvenanceSource::PRIORITY,
        [
            ProvenanceSource::Manual,
            ProvenanceSource::Crawl,
            ProvenanceSource::PrimaryApi
        ]
    );
    assert!(ProvenanceSource::Manual.outranks(ProvenanceSource::Crawl));
    assert!(ProvenanceSource::Crawl.outranks(ProvenanceSource::PrimaryApi));
    assert!(!ProvenanceSource::PrimaryApi.outranks(ProvenanceSource::Manual));

    let mut sources = vec![
        ProvenanceSource::PrimaryApi,
        ProvenanceSource::Manual,
        ProvenanceSource::Crawl,
    ];
    sources.sort();
    assert_eq!(sources, ProvenanceSource::PRIORITY.to_vec());
}

#[test]
fn provenance_wire_names() {
    let json = serde_json::to_string(&ProvenanceSource::PrimaryApi).unwrap();
    assert_eq!(json, "\"PRIMARY_API\"");
    assert_eq!(
        "scrape".parse::<ProvenanceSource>().unwrap(),
        ProvenanceSource::Crawl
    );
    assert_eq!(
        "google".parse::<ProvenanceSource>().unwrap(),
        ProvenanceSource::PrimaryApi
    );
    assert_eq!(
        "MANUAL".parse::<ProvenanceSource>().unwrap(),
        ProvenanceSource::Manual
    );
    assert!("yelp".parse::<ProvenanceSource>().is_err());
}

#[test]
fn bag_drops_absent_and_serializes_unknown_as_null() {
    let mut bag = NormalizedBag::new()
        .with(ServiceField::Takeout, true)
        .with(ServiceField::Delivery, FieldValue::ExplicitUnknown);
    bag.set(ServiceField::DineIn, FieldValue::Absent);

    assert_eq!(bag.len(), 2);
    assert_eq!(bag.get(ServiceField::DineIn), FieldValue::Absent);
    assert_eq!(
        serde_json::to_string(&bag).unwrap(),
        r#"{"takeout":true,"delivery":null}"#
    );

    // Setting a field back to Absent removes the key entirely.
    bag.set(ServiceField::Takeout, FieldValue::Absent);
    assert_eq!(
        serde_json::to_string(&bag).unwrap(),
        r#"{"delivery":null}"#
    );
}

#[test]
fn bag_deserializes_null_as_explicit_unknown() {
    let bag: NormalizedBag =
        serde_json::from_str(r#"{"reservable":null,"curbside_pickup":false}"#).unwrap();
    assert_eq!(bag.get(ServiceField::Reservable), FieldValue::ExplicitUnknown);
    assert_eq!(
        bag.get(ServiceField::CurbsidePickup),
        FieldValue::Present(false)
    );
    assert_eq!(bag.get(ServiceField::Takeout), FieldValue::Absent);
}

#[test]
fn field_value_accessors() {
    assert_eq!(FieldValue::Present(true).as_bool(), Some(true));
    assert_eq!(FieldValue::ExplicitUnknown.as_bool(), None);
    assert!(FieldValue::Present(false).is_informative());
    assert!(!FieldValue::ExplicitUnknown.is_informative());
    assert!(FieldValue::default().is_absent());
}

#[test]
fn service_field_names_round_trip_through_from_str() {
    for field in ServiceField::ALL {
        assert_eq!(field.name().parse::<ServiceField>().unwrap(), field);
        assert_eq!(
            serde_json::to_string(&field).unwrap(),
            format!("\"{}\"", field.name())
        );
    }
}

#[test]
fn empty_resolution_serializes_as_two_empty_objects() {
    let resolution = Resolution::default();
    assert_eq!(
        serde_json::to_string(&resolution).unwrap(),
        r#"{"canonical":{},"conflicts":{}}"#
    );
}

#[test]
fn conflict_entry_values_key_by_wire_name() {
    let mut values = BTreeMap::new();
    values.insert(ProvenanceSource::PrimaryApi, true);
    values.insert(ProvenanceSource::Crawl, false);
    let entry = ConflictEntry {
        sources: vec![ProvenanceSource::Crawl, ProvenanceSource::PrimaryApi],
        values,
    };
    assert_eq!(entry.winner(), Some(ProvenanceSource::Crawl));
    assert_eq!(
        serde_json::to_string(&entry).unwrap(),
        r#"{"sources":["CRAWL","PRIMARY_API"],"values":{"CRAWL":false,"PRIMARY_API":true}}"#
    );
}

#[test]
fn component_reading_constructors() {
    assert_eq!(
        ComponentReading::present(12.0),
        ComponentReading {
            value: Some(12.0),
            present: true
        }
    );
    assert_eq!(
        serde_json::to_string(&ComponentReading::absent()).unwrap(),
        r#"{"value":null,"present":false}"#
    );
}
