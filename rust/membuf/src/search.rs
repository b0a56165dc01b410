//! Forward and backward subsequence search.

use crate::{buffer::Buffer, encoding::Encoding};

/// The value searched for by [`Buffer::index_of`] and friends.
#[derive(Debug, Clone, Copy)]
pub enum Needle<'a> {
    /// Encoded under the search encoding first.
    Str(&'a str),
    /// A single byte; values outside `0..=255` never match.
    Byte(i64),
    Bytes(&'a [u8]),
    Buffer(&'a Buffer),
}

impl Needle<'_> {
    /// The literal byte pattern to look for, `None` if nothing can match.
    fn pattern(&self, encoding: Encoding) -> Option<Vec<u8>> {
        match *self {
            Needle::Str(s) => Some(encoding.encode(s)),
            Needle::Byte(v) => u8::try_from(v).ok().map(|b| vec![b]),
            Needle::Bytes(bytes) => Some(bytes.to_vec()),
            Needle::Buffer(buf) => Some(buf.to_vec()),
        }
    }
}

impl<'a> From<&'a str> for Needle<'a> {
    fn from(s: &'a str) -> Self {
        Needle::Str(s)
    }
}

impl<'a> From<&'a [u8]> for Needle<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Needle::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Needle<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Needle::Bytes(bytes)
    }
}

impl<'a> From<&'a Buffer> for Needle<'a> {
    fn from(buf: &'a Buffer) -> Self {
        Needle::Buffer(buf)
    }
}

impl From<i64> for Needle<'_> {
    fn from(v: i64) -> Self {
        Needle::Byte(v)
    }
}

impl From<i32> for Needle<'_> {
    fn from(v: i32) -> Self {
        Needle::Byte(v.into())
    }
}

impl From<u8> for Needle<'_> {
    fn from(v: u8) -> Self {
        Needle::Byte(v.into())
    }
}

impl Buffer {
    /// Position of the first occurrence of `needle` at or after `byte_offset`.
    ///
    /// A negative offset counts from the end and is clamped to zero; an
    /// offset past the end finds nothing. An empty needle matches at the
    /// normalized offset.
    pub fn index_of<'a>(
        &self,
        needle: impl Into<Needle<'a>>,
        byte_offset: i64,
        encoding: Encoding,
    ) -> Option<usize> {
        let pattern = needle.into().pattern(encoding)?;
        let start = forward_start(byte_offset, self.len())?;
        if pattern.is_empty() {
            return Some(start);
        }
        self.with_bytes(|bytes| {
            bytes[start..]
                .windows(pattern.len())
                .position(|w| w == pattern.as_slice())
                .map(|pos| pos + start)
        })
    }

    /// Position of the last occurrence of `needle` that starts at or before
    /// `byte_offset` (default: the end of the buffer).
    ///
    /// A negative offset counts from the end. An empty needle finds nothing.
    pub fn last_index_of<'a>(
        &self,
        needle: impl Into<Needle<'a>>,
        byte_offset: Option<i64>,
        encoding: Encoding,
    ) -> Option<usize> {
        let pattern = needle.into().pattern(encoding)?;
        let len = self.len();
        if pattern.is_empty() || pattern.len() > len {
            return None;
        }
        let last = backward_start(byte_offset, len)?.min(len - pattern.len());
        self.with_bytes(|bytes| {
            (0..=last)
                .rev()
                .find(|&pos| bytes[pos..pos + pattern.len()] == pattern[..])
        })
    }

    /// Returns `true` if `needle` occurs at or after `byte_offset`.
    pub fn includes<'a>(
        &self,
        needle: impl Into<Needle<'a>>,
        byte_offset: i64,
        encoding: Encoding,
    ) -> bool {
        self.index_of(needle, byte_offset, encoding).is_some()
    }
}

fn forward_start(offset: i64, len: usize) -> Option<usize> {
    if offset < 0 {
        let back = usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX);
        return Some(len.saturating_sub(back));
    }
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    (offset <= len).then_some(offset)
}

fn backward_start(offset: Option<i64>, len: usize) -> Option<usize> {
    match offset {
        None => Some(len),
        Some(offset) if offset < 0 => {
            let back = usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX);
            len.checked_sub(back)
        }
        Some(offset) => Some(usize::try_from(offset).unwrap_or(usize::MAX).min(len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(s: &str) -> Buffer {
        Buffer::from_slice(s.as_bytes())
    }

    #[test]
    fn test_index_of_strings() {
        let b = buf("this is a buffer");
        assert_eq!(b.index_of("this", 0, Encoding::Utf8), Some(0));
        assert_eq!(b.index_of("is", 0, Encoding::Utf8), Some(2));
        assert_eq!(b.index_of("is", 3, Encoding::Utf8), Some(5));
        assert_eq!(b.index_of("buffer", 0, Encoding::Utf8), Some(10));
        assert_eq!(b.index_of("buffers", 0, Encoding::Utf8), None);
        assert_eq!(b.index_of("6973", 0, Encoding::Hex), Some(2));
    }

    #[test]
    fn test_index_of_offsets() {
        let b = buf("abcabc");
        assert_eq!(b.index_of("a", -3, Encoding::Utf8), Some(3));
        assert_eq!(b.index_of("a", -100, Encoding::Utf8), Some(0));
        assert_eq!(b.index_of("a", 7, Encoding::Utf8), None);
        assert_eq!(b.index_of("", 6, Encoding::Utf8), Some(6));
        assert_eq!(b.index_of("", 7, Encoding::Utf8), None);
        assert_eq!(b.index_of("", -2, Encoding::Utf8), Some(4));
    }

    #[test]
    fn test_index_of_bytes_and_numbers() {
        let b = Buffer::from_slice(&[1, 2, 3, 2, 3]);
        assert_eq!(b.index_of(3, 0, Encoding::Utf8), Some(2));
        assert_eq!(b.index_of(256, 0, Encoding::Utf8), None);
        assert_eq!(b.index_of(-1, 0, Encoding::Utf8), None);
        assert_eq!(b.index_of(&[2u8, 3], 2, Encoding::Utf8), Some(3));
        let needle = Buffer::from_slice(&[3, 2]);
        assert_eq!(b.index_of(&needle, 0, Encoding::Utf8), Some(2));
        // Byte sequences match as a whole, not as digit strings.
        assert_eq!(Buffer::from_slice(&[12, 3]).index_of(&[1u8, 2], 0, Encoding::Utf8), None);
    }

    #[test]
    fn test_last_index_of() {
        let b = buf("this buffer is a buffer");
        assert_eq!(b.last_index_of("buffer", None, Encoding::Utf8), Some(17));
        assert_eq!(b.last_index_of("buffer", Some(16), Encoding::Utf8), Some(5));
        assert_eq!(b.last_index_of("buffer", Some(-7), Encoding::Utf8), Some(5));
        assert_eq!(b.last_index_of("buffer", Some(4), Encoding::Utf8), None);
        assert_eq!(b.last_index_of("buffer", Some(-100), Encoding::Utf8), None);
        assert_eq!(b.last_index_of("", None, Encoding::Utf8), None);
        assert_eq!(b.last_index_of(b'b', Some(100), Encoding::Utf8), Some(17));
    }

    #[test]
    fn test_last_index_of_encoded_needle() {
        let b = Buffer::from_slice(&[0x61, 0x00, 0x62, 0x00, 0x61, 0x00]);
        assert_eq!(b.last_index_of("a", None, Encoding::Utf16Le), Some(4));
        assert_eq!(b.last_index_of("b", None, Encoding::Utf16Le), Some(2));
        assert_eq!(b.last_index_of("ab", None, Encoding::Utf16Le), Some(0));
    }

    #[test]
    fn test_includes() {
        let b = buf("hello");
        assert!(b.includes("ell", 0, Encoding::Utf8));
        assert!(!b.includes("ell", 2, Encoding::Utf8));
        assert!(b.includes(b'o', -1, Encoding::Utf8));
    }
}
