//! JSON form of a buffer: `{"type":"Buffer","data":[1,2,3]}`.

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Unexpected},
    ser::SerializeStruct,
};

use crate::buffer::Buffer;

const TYPE_TAG: &str = "Buffer";

impl Serialize for Buffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Buffer", 2)?;
        state.serialize_field("type", TYPE_TAG)?;
        state.serialize_field("data", &self.to_vec())?;
        state.end()
    }
}

#[derive(Deserialize)]
struct BufferRepr {
    #[serde(rename = "type")]
    tag: String,
    data: Vec<u8>,
}

impl<'de> Deserialize<'de> for Buffer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = BufferRepr::deserialize(deserializer)?;
        if repr.tag != TYPE_TAG {
            return Err(de::Error::invalid_value(
                Unexpected::Str(&repr.tag),
                &"\"Buffer\"",
            ));
        }
        Ok(Buffer::from(repr.data))
    }
}

impl Buffer {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "type": TYPE_TAG,
            "data": self.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json() {
        let buf = Buffer::from_slice(&[1, 2, 255]);
        assert_eq!(
            serde_json::to_string(&buf).unwrap(),
            r#"{"type":"Buffer","data":[1,2,255]}"#
        );
        assert_eq!(buf.to_json()["data"][2], 255);
        assert_eq!(buf.to_json(), serde_json::to_value(&buf).unwrap());
    }

    #[test]
    fn test_from_json() {
        let buf: Buffer = serde_json::from_str(r#"{"type":"Buffer","data":[104,105]}"#).unwrap();
        assert_eq!(buf.to_vec(), b"hi".to_vec());

        let view = Buffer::from_slice(b"xhiy").subarray(1, 3);
        let back: Buffer = serde_json::from_value(view.to_json()).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(serde_json::from_str::<Buffer>(r#"{"type":"Blob","data":[]}"#).is_err());
        assert!(serde_json::from_str::<Buffer>(r#"{"type":"Buffer","data":[256]}"#).is_err());
        assert!(serde_json::from_str::<Buffer>(r#"{"data":[1]}"#).is_err());
    }
}
