//! Object strings: serde values packed into printable text
//!
//! Values are encoded as MessagePack inside a small versioned envelope and then
//! base64-encoded, so they can live in text columns of a metadata table.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

const MAGIC: &[u8; 2] = b"XK";
const VERSION: u8 = 1;
const HEADER_LEN: usize = MAGIC.len() + 1;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to serialize object: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("object string is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("object string has no envelope header")]
    MissingHeader,

    #[error("unsupported object string version {0}")]
    UnsupportedVersion(u8),

    #[error("failed to deserialize object: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("{0} trailing bytes after object")]
    TrailingBytes(usize),
}

/// A value that may still be in its encoded form.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Nothing stored.
    Empty,
    /// Text that is, or may be, an object string.
    Text(String),
    /// An already decoded object.
    Object(T),
}

impl<T> Field<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Field::Empty)
    }
}

impl<T> From<Option<String>> for Field<T> {
    fn from(value: Option<String>) -> Self {
        value.map_or(Field::Empty, Field::Text)
    }
}

impl<T> From<String> for Field<T> {
    fn from(value: String) -> Self {
        Field::Text(value)
    }
}

impl<T> From<&str> for Field<T> {
    fn from(value: &str) -> Self {
        Field::Text(value.to_string())
    }
}

/// Encode `obj` as an object string.
pub fn obj_to_string<T: Serialize>(obj: &T) -> Result<String, CodecError> {
    let payload = rmp_serde::to_vec_named(obj)?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.push(VERSION);
    bytes.extend_from_slice(&payload);
    Ok(STANDARD.encode(bytes))
}

/// Decode an object string, reporting why decoding failed.
pub fn try_string_to_obj<T: DeserializeOwned>(s: &str) -> Result<T, CodecError> {
    let bytes = STANDARD.decode(s.trim())?;
    if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
        return Err(CodecError::MissingHeader);
    }
    let version = bytes[MAGIC.len()];
    if version != VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let mut payload = &bytes[HEADER_LEN..];
    let obj = rmp_serde::from_read(&mut payload)?;
    if !payload.is_empty() {
        return Err(CodecError::TrailingBytes(payload.len()));
    }
    Ok(obj)
}

/// Decode `field` if it holds an object string.
///
/// Empty input yields [`Field::Empty`], decoded objects pass through unchanged,
/// and text that does not decode is returned as is.
pub fn string_to_obj<T: DeserializeOwned>(field: impl Into<Field<T>>) -> Field<T> {
    match field.into() {
        Field::Empty => Field::Empty,
        Field::Text(s) if s.is_empty() => Field::Empty,
        Field::Text(s) => match try_string_to_obj(&s) {
            Ok(obj) => Field::Object(obj),
            Err(_) => Field::Text(s),
        },
        Field::Object(obj) => Field::Object(obj),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Schedule {
        name: String,
        milestones: Vec<u32>,
        gamma: f64,
        warmup: Option<u32>,
    }

    #[test]
    fn test_struct_round_trip() {
        let schedule = Schedule {
            name: "step".to_string(),
            milestones: vec![30, 60, 90],
            gamma: 0.1,
            warmup: None,
        };
        let encoded = obj_to_string(&schedule).expect("encode");
        assert!(encoded.is_ascii());

        assert_eq!(string_to_obj::<Schedule>(encoded), Field::Object(schedule));
    }

    #[test]
    fn test_json_value_round_trip() {
        let value = json!({"layers": [64, 128], "activation": "relu", "bias": true, "skip": null});
        let encoded = obj_to_string(&value).expect("encode");
        assert_eq!(try_string_to_obj::<Value>(&encoded).expect("decode"), value);
    }

    #[test]
    fn test_empty_input_is_null_sentinel() {
        assert_eq!(string_to_obj::<Value>(""), Field::Empty);
        assert_eq!(string_to_obj::<Value>(None::<String>), Field::Empty);
        assert!(string_to_obj::<Value>(Field::Empty).is_empty());
    }

    #[test]
    fn test_decoded_object_passes_through() {
        let obj: BTreeMap<String, i64> = [("a".to_string(), 1)].into_iter().collect();
        let field = string_to_obj::<BTreeMap<String, i64>>(Field::Object(obj.clone()));
        assert_eq!(field, Field::Object(obj));
    }

    #[test]
    fn test_corrupted_input_returned_unchanged() {
        for input in ["not base64 at all!", "abcd", "resnet50", "WEsCkw=="] {
            assert_eq!(
                string_to_obj::<Value>(input),
                Field::Text(input.to_string()),
                "input {input:?}"
            );
        }

        let mut encoded = obj_to_string(&vec![1, 2, 3]).expect("encode");
        encoded.truncate(encoded.len() - 4);
        assert_eq!(string_to_obj::<Vec<i32>>(encoded.as_str()), Field::Text(encoded.clone()));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let encoded = STANDARD.encode([b'X', b'K', 9, 0x01]);
        assert!(matches!(
            try_string_to_obj::<u8>(&encoded),
            Err(CodecError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let encoded = STANDARD.encode([b'X', b'K', VERSION, 0x01, 0x02]);
        assert!(matches!(try_string_to_obj::<u8>(&encoded), Err(CodecError::TrailingBytes(1))));
    }
}
