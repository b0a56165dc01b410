use crate::{TextCodec, utf16_len};

/// ISO-8859-1 ("binary"). Each UTF-16 code unit is stored as its low byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1;

impl TextCodec for Latin1 {
    fn byte_length(&self, s: &str) -> usize {
        utf16_len(s)
    }

    fn encode(&self, s: &str) -> Vec<u8> {
        encode_low_bytes(s)
    }

    fn decode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| char::from(b)).collect()
    }
}

/// 7-bit ASCII. Encodes like [`Latin1`]; decoding clears the high bit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascii;

impl TextCodec for Ascii {
    fn byte_length(&self, s: &str) -> usize {
        utf16_len(s)
    }

    fn encode(&self, s: &str) -> Vec<u8> {
        encode_low_bytes(s)
    }

    fn decode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| char::from(b & 0x7F)).collect()
    }
}

fn encode_low_bytes(s: &str) -> Vec<u8> {
    s.encode_utf16().map(|unit| (unit & 0xFF) as u8).collect()
}
