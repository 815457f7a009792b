//! Structured (JSON) encoding for the category and sub-kind columns.
//!
//! Both values are stored as JSON strings so the column format can evolve
//! without a schema migration. Decoding never fails.

use crate::model::event_type::MedicalEventType;
use crate::model::medical_event::normalize_sub_kind;
use serde_json::Value;

/// Encodes a category as a JSON string of its canonical label.
pub fn encode_category(category: MedicalEventType) -> Vec<u8> {
    Value::String(category.label().to_string())
        .to_string()
        .into_bytes()
}

/// Decodes a stored category. Missing or undecodable bytes yield `Other`.
pub fn decode_category(bytes: Option<&[u8]>) -> MedicalEventType {
    bytes
        .and_then(|raw| serde_json::from_slice::<MedicalEventType>(raw).ok())
        .unwrap_or_default()
}

/// Encodes an optional sub-kind. Blank values encode to `None`.
pub fn serialize_sub_kind(value: Option<&str>) -> Option<Vec<u8>> {
    normalize_sub_kind(value).map(|sub_kind| Value::String(sub_kind).to_string().into_bytes())
}

/// Decodes a stored sub-kind. Missing, undecodable or blank values yield
/// `None`.
pub fn deserialize_sub_kind(bytes: Option<&[u8]>) -> Option<String> {
    let decoded = bytes.and_then(|raw| serde_json::from_slice::<String>(raw).ok())?;
    normalize_sub_kind(Some(decoded.as_str()))
}

#[cfg(test)]
mod tests {
    use super::{decode_category, deserialize_sub_kind, encode_category, serialize_sub_kind};
    use crate::model::event_type::MedicalEventType;

    #[test]
    fn category_encoding_is_a_json_label() {
        assert_eq!(
            encode_category(MedicalEventType::HeartwormTreatment),
            b"\"Heartworm Treatment\"".to_vec()
        );
    }

    #[test]
    fn category_decoding_tolerates_legacy_and_corrupt_values() {
        assert_eq!(
            decode_category(Some(b"\"Flea Treatment\"".as_slice())),
            MedicalEventType::FleaPreventative
        );
        assert_eq!(decode_category(Some(b"42".as_slice())), MedicalEventType::Other);
        assert_eq!(decode_category(Some(b"\xff\xfe".as_slice())), MedicalEventType::Other);
        assert_eq!(decode_category(None), MedicalEventType::Other);
    }

    #[test]
    fn sub_kind_blank_values_are_absent() {
        assert_eq!(serialize_sub_kind(Some("   ")), None);
        assert_eq!(serialize_sub_kind(None), None);
        assert_eq!(deserialize_sub_kind(Some(b"\"  \"".as_slice())), None);
        assert_eq!(deserialize_sub_kind(Some(b"{not json".as_slice())), None);
        assert_eq!(deserialize_sub_kind(Some(b"null".as_slice())), None);
    }

    #[test]
    fn sub_kind_survives_encoding_with_quotes() {
        let encoded = serialize_sub_kind(Some("Bordetella \"kennel cough\""))
            .expect("non-blank sub-kind should encode");
        assert_eq!(
            deserialize_sub_kind(Some(encoded.as_slice())).as_deref(),
            Some("Bordetella \"kennel cough\"")
        );
    }
}
