//! OVSDB data encodings
//!
//! OVSDB wraps compound column values in tagged arrays:
//! `["set", [a, b]]`, `["map", [[k, v], ...]]` and `["uuid", "..."]`.
//! A set with exactly one element may also come back as the bare atom.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

use super::OvsdbError;

/// An OVSDB set column. Always encoded in the tagged `["set", [...]]` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvsSet<T>(pub Vec<T>);

impl<T> Default for OvsSet<T> {
    fn default() -> Self {
        OvsSet(Vec::new())
    }
}

impl<T> OvsSet<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<Vec<T>> for OvsSet<T> {
    fn from(items: Vec<T>) -> Self {
        OvsSet(items)
    }
}

impl<T: Serialize> Serialize for OvsSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element("set")?;
        tuple.serialize_element(&self.0)?;
        tuple.end()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for OvsSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_set(value).map(OvsSet).map_err(D::Error::custom)
    }
}

/// An OVSDB `map` column with string keys and values, the only kind the
/// Nuage tables use.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OvsMap(pub BTreeMap<String, String>);

impl OvsMap {
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OvsMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OvsMap(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for OvsMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let pairs: Vec<(&String, &String)> = self.0.iter().collect();
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element("map")?;
        tuple.serialize_element(&pairs)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for OvsMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let pairs = match tagged(&value, "map") {
            Some(inner) => inner.clone(),
            None => return Err(D::Error::custom(format!("expected OVSDB map, got {}", value))),
        };
        let pairs: Vec<(String, String)> =
            serde_json::from_value(pairs).map_err(D::Error::custom)?;
        Ok(OvsMap(pairs.into_iter().collect()))
    }
}

/// Decode a row UUID reference, `["uuid", "<uuid>"]`.
pub fn parse_uuid_atom(value: &Value) -> Option<String> {
    tagged(value, "uuid")?.as_str().map(str::to_string)
}

/// Decode a string set column, accepting either the bare atom or the
/// tagged set form.
pub fn unmarshal_string_set(value: &Value) -> Result<Vec<String>, OvsdbError> {
    decode_set(value.clone()).map_err(OvsdbError::Decode)
}

fn tagged<'a>(value: &'a Value, tag: &str) -> Option<&'a Value> {
    match value.as_array() {
        Some(items) if items.len() == 2 && items[0] == tag => Some(&items[1]),
        _ => None,
    }
}

fn decode_set<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, String> {
    if let Some(inner) = tagged(&value, "set") {
        return serde_json::from_value(inner.clone()).map_err(|e| format!("invalid set: {}", e));
    }
    serde_json::from_value(value.clone())
        .map(|atom| vec![atom])
        .map_err(|_| format!("expected OVSDB set or atom, got {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_always_tagged() {
        let set = OvsSet(vec!["tap0".to_string()]);
        assert_eq!(serde_json::to_value(&set).unwrap(), json!(["set", ["tap0"]]));

        let empty: OvsSet<String> = OvsSet::default();
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!(["set", []]));
    }

    #[test]
    fn test_set_accepts_bare_atom() {
        let set: OvsSet<String> = serde_json::from_value(json!("tap0")).unwrap();
        assert_eq!(set.0, vec!["tap0"]);

        let set: OvsSet<String> = serde_json::from_value(json!(["set", ["a", "b"]])).unwrap();
        assert_eq!(set.0, vec!["a", "b"]);
    }

    #[test]
    fn test_map_encoding() {
        let map: OvsMap = [("nuage-zone", "z1"), ("nuage-domain", "d1")]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!(["map", [["nuage-domain", "d1"], ["nuage-zone", "z1"]]])
        );

        let decoded: OvsMap =
            serde_json::from_value(json!(["map", [["nuage-zone", "z1"]]])).unwrap();
        assert_eq!(decoded.get("nuage-zone"), Some("z1"));
    }

    #[test]
    fn test_map_rejects_untagged() {
        assert!(serde_json::from_value::<OvsMap>(json!({"a": "b"})).is_err());
    }

    #[test]
    fn test_unmarshal_string_set() {
        assert_eq!(unmarshal_string_set(&json!("p1")).unwrap(), vec!["p1"]);
        assert_eq!(
            unmarshal_string_set(&json!(["set", ["p1", "p2"]])).unwrap(),
            vec!["p1", "p2"]
        );
        assert!(unmarshal_string_set(&json!(["set", []])).unwrap().is_empty());
        assert!(unmarshal_string_set(&json!(42)).is_err());
    }

    #[test]
    fn test_parse_uuid_atom() {
        assert_eq!(parse_uuid_atom(&json!(["uuid", "abc"])), Some("abc".to_string()));
        assert_eq!(parse_uuid_atom(&json!(["named-uuid", "abc"])), None);
        assert_eq!(parse_uuid_atom(&json!("abc")), None);
    }
}
