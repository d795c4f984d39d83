//! Source normalizer: raw provider objects → [`NormalizedBag`].
//!
//! Each source names fields differently. Every canonical field has an
//! ordered alias list per source; this module is the only place that knows
//! provider key spellings.

use serde_json::{Map, Value};
use valadata_core::{FieldValue, NormalizedBag, ProvenanceSource, ServiceField};

const UNKNOWN_SENTINEL: &str = "unknown";

/// Provider keys for `field` as emitted by `source`, in precedence order.
pub fn aliases(source: ProvenanceSource, field: ServiceField) -> &'static [&'static str] {
    match (field, source) {
        (ServiceField::Takeout, ProvenanceSource::PrimaryApi) => &["takeout"],
        (ServiceField::Takeout, ProvenanceSource::Crawl | ProvenanceSource::Manual) => {
            &["takeout", "take_out"]
        }
        (ServiceField::Delivery, _) => &["delivery"],
        (ServiceField::DineIn, _) => &["dine_in", "dineIn"],
        (ServiceField::Reservable, _) => &["reservable"],
        (ServiceField::CurbsidePickup, _) => &["curbside_pickup", "curbsidePickup"],
        (ServiceField::LiveMusic, _) => &["live_music", "liveMusic"],
        (ServiceField::GoodForGroups, _) => &["good_for_groups", "goodForGroups"],
    }
}

/// Normalize one provider object from `source`.
///
/// Non-object input yields an empty bag. Unrecognized values (numbers,
/// other strings, arrays, objects) leave the field absent.
pub fn normalize(raw: &Value, source: ProvenanceSource) -> NormalizedBag {
    let Some(object) = raw.as_object() else {
        return NormalizedBag::new();
    };
    ServiceField::ALL
        .into_iter()
        .map(|field| (field, read_field(object, aliases(source, field))))
        .collect()
}

/// Normalize a batch of provider objects, keeping input order.
pub fn normalize_all(inputs: &[(ProvenanceSource, &Value)]) -> Vec<(ProvenanceSource, NormalizedBag)> {
    inputs
        .iter()
        .map(|(source, raw)| (*source, normalize(raw, *source)))
        .collect()
}

/// Walk the aliases in order. A `null` falls through to the next alias;
/// the first non-null value decides the field.
fn read_field(object: &Map<String, Value>, aliases: &[&str]) -> FieldValue {
    let mut saw_null = false;
    for alias in aliases {
        match object.get(*alias) {
            None => continue,
            Some(Value::Null) => saw_null = true,
            Some(value) => return interpret(value),
        }
    }
    if saw_null {
        FieldValue::ExplicitUnknown
    } else {
        FieldValue::Absent
    }
}

fn interpret(value: &Value) -> FieldValue {
    match value {
        Value::Bool(b) => FieldValue::Present(*b),
        Value::String(s) if s.eq_ignore_ascii_case(UNKNOWN_SENTINEL) => {
            FieldValue::ExplicitUnknown
        }
        _ => FieldValue::Absent,
    }
}
