//! Common types used across the Bracket client library.

pub mod naming;
pub mod serde_helpers;
pub mod timestamp;

pub use naming::to_snake_case;
pub use timestamp::Timestamp;
