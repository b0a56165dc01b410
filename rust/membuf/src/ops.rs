//! Compare, fill, copy, write and byte-swap operations of [`Buffer`].

use std::cmp::Ordering;

use membuf_common::{
    Result,
    error::Error,
    result::{MAX_LENGTH, verify_lower_bound, verify_multiple_of, verify_range},
};
use membuf_text::radix::decode_hex_prefix;

use crate::{buffer::Buffer, encoding::Encoding};

/// Either a buffer or a plain byte slice.
#[derive(Debug, Clone, Copy)]
pub enum BytesLike<'a> {
    Buffer(&'a Buffer),
    Slice(&'a [u8]),
}

impl BytesLike<'_> {
    pub fn len(&self) -> usize {
        match self {
            BytesLike::Buffer(buf) => buf.len(),
            BytesLike::Slice(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        match self {
            BytesLike::Buffer(buf) => buf.with_bytes(f),
            BytesLike::Slice(s) => f(s),
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.with_bytes(<[u8]>::to_vec)
    }
}

impl<'a> From<&'a Buffer> for BytesLike<'a> {
    fn from(buf: &'a Buffer) -> Self {
        BytesLike::Buffer(buf)
    }
}

impl<'a> From<&'a [u8]> for BytesLike<'a> {
    fn from(s: &'a [u8]) -> Self {
        BytesLike::Slice(s)
    }
}

impl<'a> From<&'a Vec<u8>> for BytesLike<'a> {
    fn from(v: &'a Vec<u8>) -> Self {
        BytesLike::Slice(v)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for BytesLike<'a> {
    fn from(s: &'a [u8; N]) -> Self {
        BytesLike::Slice(s)
    }
}

/// Lexicographic byte order; a proper prefix sorts first.
pub(crate) fn cmp_bytes(a: BytesLike<'_>, b: BytesLike<'_>) -> Ordering {
    match (a, b) {
        (BytesLike::Slice(a), b) => b.with_bytes(|b| a.cmp(b)),
        (a, BytesLike::Slice(b)) => a.with_bytes(|a| a.cmp(b)),
        // Both may alias one storage; never hold two guards at once.
        (a, b) => {
            let a = a.to_vec();
            b.with_bytes(|b| a.as_slice().cmp(b))
        }
    }
}

/// The value a buffer is filled with.
#[derive(Debug, Clone, Copy)]
pub enum FillValue<'a> {
    /// Encoded under the fill encoding, then repeated.
    Str(&'a str),
    /// Only the low 8 bits are used.
    Byte(i64),
    Bytes(&'a [u8]),
    Buffer(&'a Buffer),
}

impl<'a> From<&'a str> for FillValue<'a> {
    fn from(s: &'a str) -> Self {
        FillValue::Str(s)
    }
}

impl From<i64> for FillValue<'_> {
    fn from(v: i64) -> Self {
        FillValue::Byte(v)
    }
}

impl From<i32> for FillValue<'_> {
    fn from(v: i32) -> Self {
        FillValue::Byte(v.into())
    }
}

impl From<u8> for FillValue<'_> {
    fn from(v: u8) -> Self {
        FillValue::Byte(v.into())
    }
}

impl<'a> From<&'a [u8]> for FillValue<'a> {
    fn from(s: &'a [u8]) -> Self {
        FillValue::Bytes(s)
    }
}

impl<'a> From<&'a Buffer> for FillValue<'a> {
    fn from(buf: &'a Buffer) -> Self {
        FillValue::Buffer(buf)
    }
}

impl Buffer {
    /// Compares `self[source_start..source_end]` with
    /// `target[target_start..target_end]`.
    ///
    /// `None` ends default to the respective lengths. Starts must lie in
    /// `[0, 2^32]` and ends in `[0, len]`. An empty source range sorts before
    /// any non-empty target range; two empty ranges compare equal.
    pub fn compare<'a>(
        &self,
        target: impl Into<BytesLike<'a>>,
        target_start: i64,
        target_end: Option<i64>,
        source_start: i64,
        source_end: Option<i64>,
    ) -> Result<Ordering> {
        let target = target.into();
        let target_len = target.len() as i128;
        let source_len = self.len() as i128;
        let target_end = target_end.map_or(target_len, i128::from);
        let source_end = source_end.map_or(source_len, i128::from);
        let (target_start, source_start) = (i128::from(target_start), i128::from(source_start));

        verify_range(target_start, "targetStart", 0, MAX_LENGTH)?;
        verify_range(source_start, "sourceStart", 0, MAX_LENGTH)?;
        verify_range(target_end, "targetEnd", 0, target_len)?;
        verify_range(source_end, "sourceEnd", 0, source_len)?;

        if source_start >= source_end {
            return Ok(if target_start >= target_end {
                Ordering::Equal
            } else {
                Ordering::Less
            });
        }
        if target_start >= target_end {
            return Ok(Ordering::Greater);
        }

        let source = self.subarray(source_start as i64, source_end as i64).to_vec();
        let (ts, te) = (target_start as usize, target_end as usize);
        Ok(target.with_bytes(|t| source.as_slice().cmp(&t[ts..te])))
    }

    /// Returns `true` if `other` holds exactly the same bytes.
    pub fn equals<'a>(&self, other: impl Into<BytesLike<'a>>) -> bool {
        cmp_bytes(BytesLike::Buffer(self), other.into()) == Ordering::Equal
    }

    /// Fills `[offset, end)` with `value`, repeated as needed.
    ///
    /// `offset` must lie in `[0, 2^32]` and `end` (default: the length) in
    /// `[0, len]`; `offset >= end` and empty buffers are left untouched.
    /// Hex strings are decoded pair by pair up to the first invalid pair;
    /// a string whose first pair is invalid is rejected. An empty pattern
    /// fills with zeros.
    pub fn fill<'a>(
        &self,
        value: impl Into<FillValue<'a>>,
        offset: i64,
        end: Option<i64>,
        encoding: Encoding,
    ) -> Result<&Self> {
        if self.is_empty() {
            return Ok(self);
        }
        let len = self.len() as i128;
        let end = end.map_or(len, i128::from);
        verify_range(offset.into(), "offset", 0, MAX_LENGTH)?;
        verify_range(end, "end", 0, len)?;
        if i128::from(offset) >= end {
            return Ok(self);
        }

        let pattern = match value.into() {
            FillValue::Str(s) if encoding == Encoding::Hex => {
                let bytes = decode_hex_prefix(s);
                if bytes.is_empty() && !s.is_empty() {
                    return Err(Error::invalid_value("value", s));
                }
                bytes
            }
            FillValue::Str(s) => encoding.encode(s),
            FillValue::Byte(v) => vec![(v & 0xFF) as u8],
            FillValue::Bytes(bytes) => bytes.to_vec(),
            FillValue::Buffer(buf) => buf.to_vec(),
        };

        let range = offset as usize..end as usize;
        self.with_bytes_mut(|bytes| repeat_into(&mut bytes[range], &pattern));
        Ok(self)
    }

    /// Fills the whole buffer with `value`; strings are utf8.
    pub fn fill_all<'a>(&self, value: impl Into<FillValue<'a>>) -> Result<&Self> {
        self.fill(value, 0, None, Encoding::Utf8)
    }

    /// Copies `self[source_start..source_end]` into `target` at `target_start`
    /// and returns the number of bytes copied.
    ///
    /// The source range is clamped to this buffer and to the room left in
    /// `target`. Overlapping views of one storage copy as if through an
    /// intermediate buffer.
    pub fn copy(
        &self,
        target: &Buffer,
        target_start: i64,
        source_start: i64,
        source_end: Option<i64>,
    ) -> Result<usize> {
        let Some((ts, ss, count)) =
            self.plan_copy(target.len(), target_start, source_start, source_end)?
        else {
            return Ok(0);
        };

        if self.shares_storage(target) {
            self.storage().copy_within(
                self.byte_offset() + ss,
                target.byte_offset() + ts,
                count,
            );
        } else {
            let data = self.subarray(ss as i64, (ss + count) as i64).to_vec();
            target.with_bytes_mut(|t| t[ts..ts + count].copy_from_slice(&data));
        }
        Ok(count)
    }

    /// Like [`Buffer::copy`], with a plain mutable slice as the target.
    pub fn copy_to_slice(
        &self,
        target: &mut [u8],
        target_start: i64,
        source_start: i64,
        source_end: Option<i64>,
    ) -> Result<usize> {
        let Some((ts, ss, count)) =
            self.plan_copy(target.len(), target_start, source_start, source_end)?
        else {
            return Ok(0);
        };
        self.with_bytes(|s| target[ts..ts + count].copy_from_slice(&s[ss..ss + count]));
        Ok(count)
    }

    /// Writes `s` as utf8 from the start of the buffer, as many whole
    /// characters as fit. Returns the number of bytes written.
    pub fn write(&self, s: &str) -> usize {
        self.with_bytes_mut(|dst| Encoding::Utf8.encode_into(s, dst))
    }

    /// Writes `s` under `encoding` at `offset`, at most `length` bytes
    /// (default: the rest of the buffer).
    ///
    /// `offset` must lie in `[0, len - 1]` and `length` in `[0, len]`; the
    /// length is clamped to the room left after `offset`. Utf8 and utf16le
    /// never write a partial character or code unit.
    pub fn write_at(
        &self,
        s: &str,
        offset: usize,
        length: Option<usize>,
        encoding: Encoding,
    ) -> Result<usize> {
        let len = self.len();
        verify_range(offset as i128, "offset", 0, len as i128 - 1)?;
        let room = len - offset;
        let length = match length {
            Some(length) => {
                verify_range(length as i128, "length", 0, len as i128)?;
                length.min(room)
            }
            None => room,
        };
        Ok(self.with_bytes_mut(|dst| encoding.encode_into(s, &mut dst[offset..offset + length])))
    }

    /// Copies as much of `src` as fits into the buffer at `offset`.
    pub fn write_bytes<'a>(&self, src: impl Into<BytesLike<'a>>, offset: usize) -> Result<usize> {
        verify_range(offset as i128, "offset", 0, self.len() as i128)?;
        let data = src.into().to_vec();
        let count = data.len().min(self.len() - offset);
        self.with_bytes_mut(|dst| dst[offset..offset + count].copy_from_slice(&data[..count]));
        Ok(count)
    }

    /// Reverses the byte order within every 2-byte group.
    pub fn swap16(&self) -> Result<&Self> {
        self.swap_groups(2)
    }

    /// Reverses the byte order within every 4-byte group.
    pub fn swap32(&self) -> Result<&Self> {
        self.swap_groups(4)
    }

    /// Reverses the byte order within every 8-byte group.
    pub fn swap64(&self) -> Result<&Self> {
        self.swap_groups(8)
    }
}

impl Buffer {
    /// Validates copy bounds and returns `(target_start, source_start, count)`,
    /// or `None` when nothing is to be copied.
    fn plan_copy(
        &self,
        target_len: usize,
        target_start: i64,
        source_start: i64,
        source_end: Option<i64>,
    ) -> Result<Option<(usize, usize, usize)>> {
        let source_end = source_end.unwrap_or(self.len() as i64);
        verify_lower_bound(target_start.into(), "targetStart", 0)?;
        verify_lower_bound(source_start.into(), "sourceStart", 0)?;
        verify_lower_bound(source_end.into(), "sourceEnd", 0)?;

        let ts = to_index(target_start);
        let ss = to_index(source_start);
        let se = to_index(source_end);
        if ts >= target_len || se <= ss || ss >= self.len() {
            return Ok(None);
        }
        let count = (se.min(self.len()) - ss).min(target_len - ts);
        Ok(Some((ts, ss, count)))
    }

    fn swap_groups(&self, group: usize) -> Result<&Self> {
        verify_multiple_of(self.len(), group)?;
        self.with_bytes_mut(|bytes| bytes.chunks_exact_mut(group).for_each(<[u8]>::reverse));
        Ok(self)
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Buffer) -> bool {
        self.equals(other)
    }
}

impl Eq for Buffer {}

impl PartialOrd for Buffer {
    fn partial_cmp(&self, other: &Buffer) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Buffer {
    fn cmp(&self, other: &Buffer) -> Ordering {
        cmp_bytes(BytesLike::Buffer(self), BytesLike::Buffer(other))
    }
}

fn repeat_into(dst: &mut [u8], pattern: &[u8]) {
    if pattern.is_empty() {
        dst.fill(0);
        return;
    }
    for (chunk, src) in dst.chunks_mut(pattern.len()).zip(std::iter::repeat(pattern)) {
        chunk.copy_from_slice(&src[..chunk.len()]);
    }
}

#[inline]
fn to_index(v: i64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}
