//! String to byte transcoding for the text encodings understood by membuf
//! buffers.
//!
//! Each encoding is a zero-sized type implementing [`TextCodec`]. Decoding is
//! lenient: malformed input never fails, it is either replaced (utf8, utf16le)
//! or truncated at the first invalid element (hex, base64).

pub mod radix;
pub mod single_byte;
pub mod unicode;

pub use radix::{Base64, Base64Url, Hex};
pub use single_byte::{Ascii, Latin1};
pub use unicode::{Utf8, Utf16Le};

/// Conversion between strings and bytes under one text encoding.
pub trait TextCodec: Send + Sync {
    /// Number of bytes `s` is expected to occupy once encoded.
    ///
    /// For hex and base64 this is computed from the string length alone and
    /// may overestimate the number of bytes [`TextCodec::encode`] produces for
    /// malformed input.
    fn byte_length(&self, s: &str) -> usize;

    /// Encodes `s` into bytes.
    fn encode(&self, s: &str) -> Vec<u8>;

    /// Encodes as much of `s` as fits into `dst`, returning the number of
    /// bytes written.
    fn encode_into(&self, s: &str, dst: &mut [u8]) -> usize {
        let bytes = self.encode(s);
        let n = bytes.len().min(dst.len());
        dst[..n].copy_from_slice(&bytes[..n]);
        n
    }

    /// Decodes `bytes` into a string.
    fn decode(&self, bytes: &[u8]) -> String;
}

/// Length of `s` in UTF-16 code units.
#[inline]
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
