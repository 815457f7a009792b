//! Medical event classification and stored-value codecs.
//!
//! # Responsibility
//! - Map free-form category labels onto [`MedicalEventType`].
//! - Encode/decode the category and vaccine sub-kind stored per event.
//!
//! # Invariants
//! - Classification and decoding are total: unknown, empty or corrupt input
//!   yields `Other` (category) or `None` (sub-kind), never an error.
//!
//! [`MedicalEventType`]: crate::model::event_type::MedicalEventType

pub mod codec;
pub mod label;

pub use codec::{decode_category, deserialize_sub_kind, encode_category, serialize_sub_kind};
pub use label::{classify, classify_optional};
