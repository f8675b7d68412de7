//! Generic request builder with required-field validation.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::MissingFieldsError;
use crate::request::RequestAttributes;
use crate::types::to_snake_case;

/// Accumulates attributes for a create or update request.
///
/// Required fields are checked once, in [`RequestBuilder::build`], never by
/// the individual setters. Update requests usually have no required fields;
/// create requests name the fields the server insists on.
///
/// # Example
///
/// ```rust
/// use brkt_api_client::request::RequestBuilder;
///
/// let attrs = RequestBuilder::with_required(["name", "billing_group", "zone"])
///     .attr("name", "web tier")
///     .attr("billing_group", "1")
///     .build();
/// let err = attrs.unwrap_err();
/// assert_eq!(err.missing, vec!["zone".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    attrs: RequestAttributes,
    required: BTreeSet<String>,
}

impl RequestBuilder {
    /// Create a builder without required fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that requires the given fields.
    pub fn with_required<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            attrs: RequestAttributes::new(),
            required: required
                .into_iter()
                .map(|name| to_snake_case(name.as_ref()))
                .collect(),
        }
    }

    /// Add an attribute to this request.
    pub fn attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    /// Add an attribute only if a value is present.
    pub fn attr_opt(self, name: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Validate required fields and return the assembled attributes.
    pub fn build(self) -> Result<RequestAttributes, MissingFieldsError> {
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|name| !self.attrs.contains_key(name))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(self.attrs)
        } else {
            Err(MissingFieldsError { missing })
        }
    }
}
