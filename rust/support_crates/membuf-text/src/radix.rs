use base64::{
    Engine,
    alphabet,
    engine::{
        DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig,
        general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    },
};

use crate::{TextCodec, utf16_len};

/// Hexadecimal, two digits per byte. Encoding stops at the first pair that
/// is not a valid hex byte; decoding produces lowercase digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hex;

impl TextCodec for Hex {
    fn byte_length(&self, s: &str) -> usize {
        utf16_len(s) >> 1
    }

    fn encode(&self, s: &str) -> Vec<u8> {
        decode_hex_prefix(s)
    }

    fn decode(&self, bytes: &[u8]) -> String {
        hex::encode(bytes)
    }
}

/// Parses `s` as consecutive hex pairs, stopping at the first invalid pair
/// or at a dangling final digit.
pub fn decode_hex_prefix(s: &str) -> Vec<u8> {
    let digits = s.as_bytes();
    let mut out = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let mut byte = [0u8; 1];
        if hex::decode_to_slice(pair, &mut byte).is_err() {
            break;
        }
        out.push(byte[0]);
    }
    out
}

/// Standard base64. Decoding also accepts the URL-safe alphabet, skips
/// characters outside both alphabets and stops at the first `=`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64;

impl TextCodec for Base64 {
    fn byte_length(&self, s: &str) -> usize {
        base64_byte_length(s)
    }

    fn encode(&self, s: &str) -> Vec<u8> {
        decode_base64_lenient(s)
    }

    fn decode(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }
}

/// URL-safe base64 without padding. Decoding is as lenient as [`Base64`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Url;

impl TextCodec for Base64Url {
    fn byte_length(&self, s: &str) -> usize {
        base64_byte_length(s)
    }

    fn encode(&self, s: &str) -> Vec<u8> {
        decode_base64_lenient(s)
    }

    fn decode(&self, bytes: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

/// Expected decoded size of a base64 string: every `=` removes one
/// character (while more than one remains), then `floor(chars * 3 / 4)`.
pub fn base64_byte_length(s: &str) -> usize {
    let mut chars = utf16_len(s);
    for _ in s.bytes().filter(|&b| b == b'=') {
        if chars <= 1 {
            break;
        }
        chars -= 1;
    }
    (chars * 3) >> 2
}

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

fn decode_base64_lenient(s: &str) -> Vec<u8> {
    let mut symbols: Vec<u8> = s
        .bytes()
        .take_while(|&b| b != b'=')
        .filter_map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' => Some(b),
            b'-' => Some(b'+'),
            b'_' => Some(b'/'),
            _ => None,
        })
        .collect();
    // A single trailing symbol carries fewer than 8 bits.
    if symbols.len() % 4 == 1 {
        symbols.pop();
    }
    LENIENT.decode(&symbols).unwrap_or_default()
}
