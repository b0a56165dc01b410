//! Free functions that create and compare buffers.

use std::cmp::Ordering;

use membuf_bytes::SharedBytes;
use membuf_common::{
    Result,
    result::{MAX_LENGTH, verify_range},
};

use crate::{
    buffer::Buffer,
    encoding::Encoding,
    ops::{BytesLike, FillValue, cmp_bytes},
    pool::BufferPool,
};

/// Input accepted by [`from`].
#[derive(Debug, Clone, Copy)]
pub enum BufferSource<'a> {
    /// Copied.
    Buffer(&'a Buffer),
    /// Copied.
    Bytes(&'a [u8]),
    /// Copied; only the low 8 bits of each value are kept.
    Array(&'a [i64]),
    /// Encoded under the given encoding.
    Str(&'a str, Encoding),
    /// Aliased without copying.
    Region {
        region: &'a SharedBytes,
        byte_offset: usize,
        length: Option<usize>,
    },
}

/// Input accepted by [`byte_length`].
#[derive(Debug, Clone, Copy)]
pub enum ByteLengthInput<'a> {
    Str(&'a str),
    Bytes(&'a [u8]),
    Buffer(&'a Buffer),
    Region(&'a SharedBytes),
}

/// Allocates a standalone, zero-filled buffer of `size` bytes.
pub fn alloc(size: usize) -> Result<Buffer> {
    Buffer::new(size)
}

/// Allocates a buffer of `size` bytes filled with `fill`.
pub fn alloc_filled<'a>(
    size: usize,
    fill: impl Into<FillValue<'a>>,
    encoding: Encoding,
) -> Result<Buffer> {
    let buf = Buffer::new(size)?;
    buf.fill(fill, 0, None, encoding)?;
    Ok(buf)
}

/// Takes `size` bytes from the global pool.
///
/// The content is unspecified: slabs are zeroed when created, but callers
/// must not rely on it.
pub fn alloc_uninitialized_from_pool(size: usize) -> Result<Buffer> {
    BufferPool::global().alloc(size)
}

/// Allocates standalone storage of `size` bytes, bypassing the pool.
pub fn alloc_uninitialized(size: usize) -> Result<Buffer> {
    Buffer::new(size)
}

/// Creates a buffer from `source`. Only [`BufferSource::Region`] aliases the
/// input. A [`BufferSource::Buffer`] is copied into standalone storage; every
/// other source is copied into pooled storage.
pub fn from(source: BufferSource<'_>) -> Result<Buffer> {
    match source {
        BufferSource::Buffer(buf) => Ok(Buffer::copy_from(buf)),
        BufferSource::Bytes(bytes) => from_bytes(bytes),
        BufferSource::Array(values) => {
            let data = values.iter().map(|&v| (v & 0xFF) as u8).collect::<Vec<_>>();
            from_bytes(&data)
        }
        BufferSource::Str(s, encoding) => Buffer::from_string(s, encoding),
        BufferSource::Region {
            region,
            byte_offset,
            length,
        } => Buffer::from_region(region, byte_offset, length),
    }
}

/// Encodes `s` under `encoding` into a new pooled buffer.
pub fn from_str(s: &str, encoding: Encoding) -> Result<Buffer> {
    Buffer::from_string(s, encoding)
}

fn from_bytes(data: &[u8]) -> Result<Buffer> {
    let buf = BufferPool::global().alloc(data.len())?;
    buf.with_bytes_mut(|dst| dst.copy_from_slice(data));
    Ok(buf)
}

/// Concatenates `list` into a new pooled buffer.
///
/// Without `total_length` (or with zero), the length is the sum of the item
/// lengths. A smaller total truncates the result; a larger one leaves the
/// tail zero-filled.
pub fn concat(list: &[BytesLike<'_>], total_length: Option<usize>) -> Result<Buffer> {
    if list.is_empty() {
        return Buffer::new(0);
    }
    let total = match total_length {
        Some(total) if total != 0 => {
            verify_range(total as i128, "totalLength", 0, MAX_LENGTH)?;
            total
        }
        _ => list.iter().map(BytesLike::len).sum(),
    };

    let buf = BufferPool::global().alloc(total)?;
    let mut pos = 0;
    for item in list {
        if pos >= total {
            break;
        }
        let data = item.to_vec();
        let count = data.len().min(total - pos);
        buf.with_bytes_mut(|dst| dst[pos..pos + count].copy_from_slice(&data[..count]));
        pos += count;
    }
    Ok(buf)
}

/// Orders two byte sequences lexicographically.
pub fn compare<'a, 'b>(a: impl Into<BytesLike<'a>>, b: impl Into<BytesLike<'b>>) -> Ordering {
    cmp_bytes(a.into(), b.into())
}

/// Number of bytes `input` occupies; strings are measured under `encoding`.
pub fn byte_length(input: ByteLengthInput<'_>, encoding: Encoding) -> usize {
    match input {
        ByteLengthInput::Str(s) => encoding.byte_length(s),
        ByteLengthInput::Bytes(bytes) => bytes.len(),
        ByteLengthInput::Buffer(buf) => buf.len(),
        ByteLengthInput::Region(region) => region.len(),
    }
}

/// Re-encodes `source` from one text encoding to another.
pub fn transcode<'a>(
    source: impl Into<BytesLike<'a>>,
    from: Encoding,
    to: Encoding,
) -> Result<Buffer> {
    let text = source.into().with_bytes(|bytes| from.decode(bytes));
    Buffer::from_string(&text, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use membuf_common::error::ErrorCategory;

    #[test]
    fn test_alloc_is_zeroed_and_standalone() {
        let buf = alloc(10).unwrap();
        assert_eq!(buf.to_vec(), vec![0; 10]);
        assert_eq!(buf.buffer().len(), 10);
        assert!(alloc(0).unwrap().is_empty());
        let e = alloc(1usize << 32).unwrap_err();
        assert_eq!(e.category(), ErrorCategory::Type);
        assert!(e.to_string().contains("\"size\""));
    }

    #[test]
    fn test_alloc_filled() {
        let buf = alloc_filled(5, "ab", Encoding::Utf8).unwrap();
        assert_eq!(buf.to_vec(), b"ababa".to_vec());
        let buf = alloc_filled(3, 0x101, Encoding::Utf8).unwrap();
        assert_eq!(buf.to_vec(), vec![1, 1, 1]);
        let buf = alloc_filled(4, "aGk=", Encoding::Base64).unwrap();
        assert_eq!(buf.to_vec(), b"hihi".to_vec());
        assert!(alloc_filled(0, "zz", Encoding::Hex).unwrap().is_empty());
    }

    #[test]
    fn test_alloc_uninitialized() {
        let pooled = alloc_uninitialized_from_pool(16).unwrap();
        assert_eq!(pooled.len(), 16);
        assert_eq!(pooled.byte_offset() % 8, 0);
        let standalone = alloc_uninitialized(16).unwrap();
        assert_eq!(standalone.buffer().len(), 16);
    }

    #[test]
    fn test_from_sources_copy() {
        let original = Buffer::from_slice(&[1, 2, 3]);
        let copy = from(BufferSource::Buffer(&original)).unwrap();
        copy.set(0, 9).unwrap();
        assert_eq!(original.get(0).unwrap(), 1);
        assert!(!copy.shares_storage(&original));
        assert_eq!(copy.byte_offset(), 0);
        assert_eq!(copy.buffer().len(), 3);

        let buf = from(BufferSource::Array(&[1, 256, -1, 0x1FF])).unwrap();
        assert_eq!(buf.to_vec(), vec![1, 0, 255, 255]);

        let buf = from(BufferSource::Bytes(b"xyz")).unwrap();
        assert_eq!(buf.to_encoded_string(Encoding::Latin1), "xyz");

        let buf = from(BufferSource::Str("00ff", Encoding::Hex)).unwrap();
        assert_eq!(buf.to_vec(), vec![0, 255]);
    }

    #[test]
    fn test_from_region_aliases() {
        let region = SharedBytes::from(vec![0u8; 8]);
        let buf = from(BufferSource::Region {
            region: &region,
            byte_offset: 2,
            length: Some(4),
        })
        .unwrap();
        assert_eq!(buf.len(), 4);
        buf.set(0, 7).unwrap();
        assert_eq!(region.get(2), 7);

        let e = from(BufferSource::Region {
            region: &region,
            byte_offset: 9,
            length: None,
        })
        .unwrap_err();
        assert_eq!(e.kind().argument(), Some("byteOffset"));
    }

    #[test]
    fn test_concat() {
        let a = Buffer::from_slice(&[1, 2]);
        let b = Buffer::from_slice(&[3, 4]);
        let joined = concat(&[(&a).into(), (&b).into()], None).unwrap();
        assert_eq!(joined.len(), 4);
        assert_eq!(joined.to_vec(), vec![1, 2, 3, 4]);

        let truncated = concat(&[(&a).into(), (&b).into()], Some(3)).unwrap();
        assert_eq!(truncated.to_vec(), vec![1, 2, 3]);

        let padded = concat(&[(&a).into(), BytesLike::Slice(&[5])], Some(6)).unwrap();
        assert_eq!(padded.to_vec(), vec![1, 2, 5, 0, 0, 0]);

        assert!(concat(&[], Some(5)).unwrap().is_empty());
        let e = concat(&[(&a).into()], Some((1usize << 32) + 1)).unwrap_err();
        assert_eq!(e.kind().argument(), Some("totalLength"));
    }

    #[test]
    fn test_compare_and_byte_length() {
        assert_eq!(compare(&[1u8, 2], &[1u8, 3]), Ordering::Less);
        let a = Buffer::from_slice(&[1, 2]);
        assert_eq!(compare(&a, &a.subarray(0, 2)), Ordering::Equal);
        assert_eq!(compare(&a, &[1u8]), Ordering::Greater);

        assert_eq!(byte_length(ByteLengthInput::Str("€"), Encoding::Utf8), 3);
        assert_eq!(byte_length(ByteLengthInput::Str("abcd"), Encoding::Hex), 2);
        assert_eq!(byte_length(ByteLengthInput::Buffer(&a), Encoding::Hex), 2);
        let region = SharedBytes::zeroed(12);
        assert_eq!(byte_length(ByteLengthInput::Region(&region), Encoding::Utf8), 12);
    }

    #[test]
    fn test_transcode() {
        let utf8 = Buffer::from_slice("héllo".as_bytes());
        let latin1 = transcode(&utf8, Encoding::Utf8, Encoding::Latin1).unwrap();
        assert_eq!(latin1.to_vec(), vec![b'h', 0xE9, b'l', b'l', b'o']);
        let utf16 = transcode(&latin1, Encoding::Latin1, Encoding::Utf16Le).unwrap();
        assert_eq!(utf16.len(), 10);
        assert_eq!(utf16.to_encoded_string(Encoding::Utf16Le), "héllo");
        let hex = transcode(b"ab", Encoding::Utf8, Encoding::Hex).unwrap();
        assert_eq!(hex.to_vec(), vec![0xAB]);
    }
}
