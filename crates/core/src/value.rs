use serde::{Serialize, ser::SerializeMap};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(i64),
    String(String),
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(v) => *v,
            Value::Number(v) => *v != 0,
            Value::String(v) => !v.is_empty(),
        }
    }

    /// Text shown in place of a placeholder, `None` when there is nothing to show.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Bool(true) => Some("True".to_string()),
            Value::Bool(false) => None,
            Value::Number(v) => Some(v.to_string()),
            Value::String(v) if v.is_empty() => None,
            Value::String(v) => Some(v.clone()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Number(v) => serializer.serialize_i64(*v),
            Value::String(v) => serializer.serialize_str(v),
        }
    }
}

/// Insertion-ordered set of placeholder bindings. Inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, Value)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Fields {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Fields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = Fields::new();
        fields.extend(iter);
        fields
    }
}

impl Serialize for Fields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut fields = Fields::new();
        fields.insert("status", "playing");
        fields.insert("artist", "Foo");
        fields.insert("status", "paused");

        let keys = fields.iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, ["status", "artist"]);
        assert_eq!(fields.get("status"), Some(&Value::from("paused")));
    }

    #[test]
    fn truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(!Value::Number(0).is_truthy());
        assert_eq!(Value::Bool(true).as_text().as_deref(), Some("True"));
        assert_eq!(Value::Bool(false).as_text(), None);
        assert_eq!(Value::Number(90).as_text().as_deref(), Some("90"));
    }

    #[test]
    fn serializes_as_ordered_map() {
        let fields = Fields::from_iter([
            ("title", Value::from("Bar")),
            ("is_playing", Value::Bool(true)),
            ("vol_left", Value::Number(90)),
        ]);
        assert_eq!(
            serde_json::to_string(&fields).unwrap(),
            r#"{"title":"Bar","is_playing":true,"vol_left":90}"#
        );
    }
}
