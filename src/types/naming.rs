//! Wire field naming.
//!
//! The API names every JSON key in lower case with underscores. Typed models
//! get this for free from Rust field names; loosely-typed attribute maps go
//! through [`to_snake_case`].

/// Translate a field name to lower-case-with-underscores form.
///
/// An underscore is inserted before each upper-case letter that is not the
/// first character. Names that are already lower case pass through.
///
/// ```rust
/// use brkt_api_client::types::to_snake_case;
///
/// assert_eq!(to_snake_case("requestedState"), "requested_state");
/// assert_eq!(to_snake_case("AttrTwo"), "attr_two");
/// assert_eq!(to_snake_case("billing_group"), "billing_group");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
