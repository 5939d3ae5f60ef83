//! Helpers for turning SDK response values into owned, serializable data

use std::collections::{BTreeMap, HashMap};

use aws_smithy_types::date_time::Format;
use aws_smithy_types::{DateTime, Document, Number};
use serde_json::Value;

/// Owned string from an SDK getter.
///
/// SDK getters return `&T` for required members and `Option<&T>` for
/// optional ones; both forms convert here. Enums go through `AsRef<str>`.
pub(crate) trait StrField {
    fn owned(self) -> Option<String>;
}

impl<T: AsRef<str> + ?Sized> StrField for &T {
    fn owned(self) -> Option<String> {
        Some(self.as_ref().to_string())
    }
}

impl<T: AsRef<str> + ?Sized> StrField for Option<&T> {
    fn owned(self) -> Option<String> {
        self.map(|v| v.as_ref().to_string())
    }
}

/// RFC 3339 timestamp from an SDK `DateTime` getter
pub(crate) trait TimeField {
    fn rfc3339(self) -> Option<String>;
}

impl TimeField for &DateTime {
    fn rfc3339(self) -> Option<String> {
        self.fmt(Format::DateTime).ok()
    }
}

impl TimeField for Option<&DateTime> {
    fn rfc3339(self) -> Option<String> {
        self.and_then(|dt| dt.fmt(Format::DateTime).ok())
    }
}

/// Copy an SDK string map into a sorted map
pub(crate) fn string_map(map: Option<&HashMap<String, String>>) -> BTreeMap<String, String> {
    map.map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

/// Copy a sorted map into the `HashMap` the SDK builders take
pub(crate) fn to_hash_map<V: Clone>(map: &BTreeMap<String, V>) -> HashMap<String, V> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

pub(crate) fn document_to_json(doc: &Document) -> Value {
    match doc {
        Document::Null => Value::Null,
        Document::Bool(b) => Value::Bool(*b),
        Document::Number(n) => match n {
            Number::PosInt(i) => serde_json::json!(*i),
            Number::NegInt(i) => serde_json::json!(*i),
            Number::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        },
        Document::String(s) => Value::String(s.clone()),
        Document::Array(arr) => Value::Array(arr.iter().map(document_to_json).collect()),
        Document::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), document_to_json(v)))
                .collect(),
        ),
    }
}
