//! The buffer view: a fixed-length window over shared backing storage.

use std::{ops::Range, str::FromStr};

use membuf_bytes::SharedBytes;
use membuf_common::{
    Result,
    error::Error,
    result::{verify_range, verify_size},
};

use crate::{encoding::Encoding, pool::BufferPool};

/// A fixed-length, mutable view over a region of [`SharedBytes`].
///
/// Several views may alias the same storage: sub-views created by
/// [`Buffer::subarray`], buffers sliced out of the same pool slab, and
/// buffers wrapping a caller-supplied region. A write through any of them is
/// visible through all the others. `Clone` creates another alias of the same
/// bytes; use [`Buffer::copy_from`] for an independent copy.
#[derive(Clone)]
pub struct Buffer {
    storage: SharedBytes,
    offset: usize,
    len: usize,
}

impl Buffer {
    /// Allocates a standalone, zero-filled buffer of `len` bytes.
    ///
    /// Fails when `len >= 2^32`.
    pub fn new(len: usize) -> Result<Buffer> {
        let len = verify_size(len as i128, "size")?;
        Ok(Buffer::zeroed(len))
    }

    /// Allocates a standalone buffer holding a copy of `data`.
    pub fn from_slice(data: &[u8]) -> Buffer {
        Buffer {
            storage: SharedBytes::copy_from_slice(data),
            offset: 0,
            len: data.len(),
        }
    }

    /// Allocates a standalone buffer holding a copy of `other`'s bytes.
    pub fn copy_from(other: &Buffer) -> Buffer {
        other.with_bytes(Buffer::from_slice)
    }

    /// Wraps `length` bytes of `region` starting at `byte_offset` without
    /// copying; the buffer aliases the caller's region.
    ///
    /// `length` defaults to the rest of the region.
    pub fn from_region(
        region: &SharedBytes,
        byte_offset: usize,
        length: Option<usize>,
    ) -> Result<Buffer> {
        let region_len = region.len();
        verify_range(byte_offset as i128, "byteOffset", 0, region_len as i128)?;
        let max_len = region_len - byte_offset;
        let len = match length {
            Some(len) => {
                verify_range(len as i128, "length", 0, max_len as i128)?;
                len
            }
            None => max_len,
        };
        Ok(Buffer {
            storage: region.clone(),
            offset: byte_offset,
            len,
        })
    }

    /// Encodes `s` under `encoding` into a buffer taken from the global pool.
    pub fn from_string(s: &str, encoding: Encoding) -> Result<Buffer> {
        Self::from_string_in(BufferPool::global(), s, encoding)
    }

    /// Encodes `s` under `encoding` into a buffer taken from `pool`.
    ///
    /// The encoding's byte length estimate sizes the allocation; the returned
    /// view covers only the bytes the codec actually produced.
    pub fn from_string_in(pool: &BufferPool, s: &str, encoding: Encoding) -> Result<Buffer> {
        let estimate = encoding.byte_length(s);
        let mut buf = pool.alloc(estimate)?;
        let written = buf.with_bytes_mut(|dst| encoding.encode_into(s, dst));
        buf.len = written;
        Ok(buf)
    }

    pub(crate) fn zeroed(len: usize) -> Buffer {
        Buffer {
            storage: SharedBytes::zeroed(len),
            offset: 0,
            len,
        }
    }

    pub(crate) fn from_pool_slice(slab: SharedBytes, offset: usize, len: usize) -> Buffer {
        debug_assert!(offset + len <= slab.len());
        Buffer {
            storage: slab,
            offset,
            len,
        }
    }
}

impl Buffer {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset of the first byte of this view within its backing storage.
    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.offset
    }

    /// Handle to the entire backing storage, including bytes outside this view.
    pub fn buffer(&self) -> SharedBytes {
        self.storage.clone()
    }

    /// Returns `true` if both views index into the same backing storage.
    pub fn shares_storage(&self, other: &Buffer) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    /// Reads the byte at `index`.
    pub fn get(&self, index: usize) -> Result<u8> {
        self.verify_index(index)?;
        Ok(self.storage.get(self.offset + index))
    }

    /// Stores the low 8 bits of `value` at `index`.
    pub fn set(&self, index: usize, value: i64) -> Result<()> {
        self.verify_index(index)?;
        self.storage.set(self.offset + index, (value & 0xFF) as u8);
        Ok(())
    }

    /// Runs `f` over the bytes of this view while the storage is read-locked.
    /// `f` must not write through any buffer sharing this storage.
    pub(crate) fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        self.storage.read(self.storage_range(), f)
    }

    pub(crate) fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        self.storage.write(self.storage_range(), f)
    }

    /// Copies the bytes of this view into a vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.storage.to_vec(self.storage_range())
    }

    /// Returns a zero-copy view of `[start, end)` sharing this buffer's storage.
    ///
    /// `end` is clamped to the buffer length. A negative bound, or
    /// `end <= start`, yields an empty buffer.
    pub fn subarray(&self, start: i64, end: i64) -> Buffer {
        let end = end.min(self.len as i64);
        if start < 0 || end < 0 || end <= start {
            return Buffer::zeroed(0);
        }
        self.view(start as usize..end as usize)
    }

    /// Byte positions of this buffer.
    pub fn keys(&self) -> Range<usize> {
        0..self.len
    }

    /// Snapshot of the bytes of this buffer.
    pub fn values(&self) -> std::vec::IntoIter<u8> {
        self.to_vec().into_iter()
    }

    /// Snapshot of `(position, byte)` pairs.
    pub fn entries(&self) -> std::iter::Enumerate<std::vec::IntoIter<u8>> {
        self.values().enumerate()
    }

    /// Decodes the whole buffer under `encoding`.
    pub fn to_encoded_string(&self, encoding: Encoding) -> String {
        self.with_bytes(|bytes| encoding.decode(bytes))
    }

    /// Decodes `[start, end)` under `encoding`.
    ///
    /// A negative `start` is treated as zero and `end` is clamped to the
    /// buffer length; `start >= len` or `start > end` yields an empty string.
    pub fn to_encoded_string_range(&self, encoding: Encoding, start: i64, end: i64) -> String {
        let start = start.max(0);
        let len = self.len as i64;
        if start >= len || start > end {
            return String::new();
        }
        let end = end.min(len);
        self.with_bytes(|bytes| encoding.decode(&bytes[start as usize..end as usize]))
    }

    /// Reads one of the buffer's properties.
    pub fn get_property(&self, property: Property) -> Result<PropertyValue> {
        Ok(match property {
            Property::Index(index) => PropertyValue::Byte(self.get(index)?),
            Property::Length => PropertyValue::Length(self.len),
            Property::ByteOffset => PropertyValue::ByteOffset(self.offset),
            Property::Buffer => PropertyValue::Buffer(self.buffer()),
        })
    }

    /// Assigns `value` to a property. Only byte positions are writable.
    pub fn set_property(&self, property: Property, value: i64) -> Result<()> {
        match property {
            Property::Index(index) => self.set(index, value),
            other => Err(Error::read_only(other.name())),
        }
    }
}

impl Buffer {
    pub(crate) fn view(&self, range: Range<usize>) -> Buffer {
        debug_assert!(range.start <= range.end && range.end <= self.len);
        Buffer {
            storage: self.storage.clone(),
            offset: self.offset + range.start,
            len: range.end - range.start,
        }
    }

    pub(crate) fn storage(&self) -> &SharedBytes {
        &self.storage
    }

    #[inline]
    pub(crate) fn storage_range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    fn verify_index(&self, index: usize) -> Result<()> {
        verify_range(index as i128, "index", 0, self.len as i128 - 1)
    }
}

/// The accessible properties of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// A byte position; writable.
    Index(usize),
    Length,
    ByteOffset,
    Buffer,
}

impl Property {
    pub fn name(&self) -> String {
        match self {
            Property::Index(index) => index.to_string(),
            Property::Length => "length".to_string(),
            Property::ByteOffset => "byteOffset".to_string(),
            Property::Buffer => "buffer".to_string(),
        }
    }
}

impl FromStr for Property {
    type Err = Error;

    /// Parses `length`, `byteOffset`, `buffer` or a decimal byte position.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "length" => Ok(Property::Length),
            "byteOffset" => Ok(Property::ByteOffset),
            "buffer" => Ok(Property::Buffer),
            _ => s.parse::<usize>().map(Property::Index).map_err(|_| {
                Error::type_mismatch("property", &["number", "length", "byteOffset", "buffer"], s)
            }),
        }
    }
}

/// Value read through [`Buffer::get_property`].
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Byte(u8),
    Length(usize),
    ByteOffset(usize),
    Buffer(SharedBytes),
}

impl From<&[u8]> for Buffer {
    fn from(data: &[u8]) -> Buffer {
        Buffer::from_slice(data)
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Buffer {
        Buffer::from_slice(&data)
    }
}

impl<const N: usize> From<[u8; N]> for Buffer {
    fn from(data: [u8; N]) -> Buffer {
        Buffer::from_slice(&data)
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer::zeroed(0)
    }
}
