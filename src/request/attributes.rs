//! Loosely-typed request payloads.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::BrktError;
use crate::types::{Timestamp, to_snake_case};

/// A partial create/update payload.
///
/// Maps wire field names to JSON values. Keys are translated to
/// lower-case-with-underscores form on insertion, so `requestedState` and
/// `requested_state` address the same field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestAttributes(Map<String, Value>);

impl RequestAttributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(to_snake_case(name), value.into())
    }

    /// Set a field from any serializable value.
    pub fn insert_serialized<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<Option<Value>, BrktError> {
        let value = serde_json::to_value(value)?;
        Ok(self.insert(name, value))
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(&to_snake_case(name))
    }

    /// Whether the field is set.
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(&to_snake_case(name))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the wire field names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consume into the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Parse `name=value` arguments into string attributes.
    ///
    /// Arguments before `start` are skipped (they typically hold resource
    /// ids). An argument without `=` is rejected.
    ///
    /// ```rust
    /// use brkt_api_client::request::RequestAttributes;
    ///
    /// let args = ["id123", "a=b", "maxCost=12.5"];
    /// let attrs = RequestAttributes::split_attrs(&args, 1).unwrap();
    /// assert_eq!(attrs.get("a").unwrap(), "b");
    /// assert_eq!(attrs.get("max_cost").unwrap(), "12.5");
    /// ```
    pub fn split_attrs<S: AsRef<str>>(args: &[S], start: usize) -> Result<Self, BrktError> {
        let mut attrs = Self::new();
        for arg in args.iter().skip(start) {
            let arg = arg.as_ref();
            let (name, value) = arg.split_once('=').ok_or_else(|| {
                BrktError::Configuration(format!("Invalid attribute (expected name=value): {arg}"))
            })?;
            attrs.insert(name, value);
        }
        Ok(attrs)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::String(ts.to_string())
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for RequestAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name.as_ref(), value);
        }
        attrs
    }
}
