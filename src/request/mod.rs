//! Request payload construction.
//!
//! - [`RequestAttributes`] - the loosely-typed body sent by create/update calls
//! - [`RequestBuilder`] - accumulates attributes and validates required fields

mod attributes;
mod builder;

pub use attributes::RequestAttributes;
pub use builder::RequestBuilder;
