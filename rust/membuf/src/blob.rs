//! Immutable byte containers assembled from strings, bytes, buffers and
//! other blobs.

use std::{fmt, str::FromStr, sync::Arc};

use membuf_common::{Result, error::Error};

use crate::buffer::Buffer;

/// Line terminator mode. Both modes store strings as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEndings {
    #[default]
    Transparent,
    Native,
}

impl FromStr for LineEndings {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "transparent" => Ok(LineEndings::Transparent),
            "native" => Ok(LineEndings::Native),
            _ => Err(Error::invalid_choice("endings", "transparent", "native")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobOptions {
    pub mime_type: String,
    pub endings: LineEndings,
}

impl BlobOptions {
    /// Builds options from their textual form; `endings` must be
    /// `"transparent"` or `"native"`.
    pub fn new(mime_type: impl Into<String>, endings: &str) -> Result<BlobOptions> {
        Ok(BlobOptions {
            mime_type: mime_type.into(),
            endings: endings.parse()?,
        })
    }
}

/// One source of bytes for [`Blob::new`].
#[derive(Debug, Clone, Copy)]
pub enum BlobPart<'a> {
    /// Stored as utf8.
    Str(&'a str),
    Bytes(&'a [u8]),
    Buffer(&'a Buffer),
    Blob(&'a Blob),
}

impl<'a> From<&'a str> for BlobPart<'a> {
    fn from(s: &'a str) -> Self {
        BlobPart::Str(s)
    }
}

impl<'a> From<&'a [u8]> for BlobPart<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        BlobPart::Bytes(bytes)
    }
}

impl<'a> From<&'a Buffer> for BlobPart<'a> {
    fn from(buf: &'a Buffer) -> Self {
        BlobPart::Buffer(buf)
    }
}

impl<'a> From<&'a Blob> for BlobPart<'a> {
    fn from(blob: &'a Blob) -> Self {
        BlobPart::Blob(blob)
    }
}

/// An immutable sequence of bytes with a MIME type.
///
/// The content is copied once on construction; [`Blob::slice`] and `Clone`
/// share it.
#[derive(Clone)]
pub struct Blob {
    data: Arc<[u8]>,
    start: usize,
    end: usize,
    mime_type: String,
}

impl Blob {
    pub fn new(parts: &[BlobPart<'_>], options: BlobOptions) -> Blob {
        let mut data = Vec::new();
        for part in parts {
            match part {
                BlobPart::Str(s) => data.extend_from_slice(s.as_bytes()),
                BlobPart::Bytes(bytes) => data.extend_from_slice(bytes),
                BlobPart::Buffer(buf) => buf.with_bytes(|bytes| data.extend_from_slice(bytes)),
                BlobPart::Blob(blob) => data.extend_from_slice(blob.as_bytes()),
            }
        }
        let end = data.len();
        Blob {
            data: data.into(),
            start: 0,
            end,
            mime_type: options.mime_type,
        }
    }

    pub fn size(&self) -> usize {
        self.end - self.start
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[self.start..self.end]
    }

    /// Copies the content into a new standalone buffer.
    pub fn to_buffer(&self) -> Buffer {
        Buffer::from_slice(self.as_bytes())
    }

    /// The content decoded as utf8; invalid sequences become U+FFFD.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }

    /// Returns a blob over `[start, end)` of this one without copying.
    ///
    /// Negative bounds count from the end and every bound is clamped to the
    /// size. Without `start`, with `start > end`, or with bounds of opposite
    /// signs the whole content is kept. `mime_type` replaces the type of
    /// the result when given.
    pub fn slice(&self, start: Option<i64>, end: Option<i64>, mime_type: Option<&str>) -> Blob {
        let mut blob = self.clone();
        if let Some(mime_type) = mime_type {
            blob.mime_type = mime_type.to_string();
        }
        let Some(start) = start else {
            return blob;
        };
        if let Some(end) = end {
            if start > end || (start > 0 && end < 0) || (start < 0 && end > 0) {
                return blob;
            }
        }

        let size = self.size();
        let from = relative_position(start, size);
        let to = end.map_or(size, |end| relative_position(end, size)).max(from);
        blob.start = self.start + from;
        blob.end = self.start + to;
        blob
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("size", &self.size())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

fn relative_position(pos: i64, size: usize) -> usize {
    let magnitude = usize::try_from(pos.unsigned_abs()).unwrap_or(usize::MAX);
    if pos < 0 {
        size.saturating_sub(magnitude)
    } else {
        magnitude.min(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use membuf_common::error::ErrorCategory;

    fn sample() -> Blob {
        let buf = Buffer::from_slice(b"de");
        let inner = Blob::new(&["fg".into()], BlobOptions::default());
        Blob::new(
            &["abc".into(), (&buf).into(), (&inner).into(), BlobPart::Bytes(b"hij")],
            BlobOptions::new("text/plain", "transparent").unwrap(),
        )
    }

    #[test]
    fn test_blob_concatenates_parts() {
        let blob = sample();
        assert_eq!(blob.size(), 10);
        assert_eq!(blob.text(), "abcdefghij");
        assert_eq!(blob.mime_type(), "text/plain");
        assert_eq!(blob.to_buffer().to_vec(), b"abcdefghij".to_vec());
    }

    #[test]
    fn test_blob_options() {
        let e = BlobOptions::new("", "unix").unwrap_err();
        assert_eq!(e.category(), ErrorCategory::Type);
        assert_eq!(
            e.to_string(),
            "Parameter error. The value of endings is neither \"transparent\" nor \"native\""
        );
        let options = BlobOptions::new("", "native").unwrap();
        assert_eq!(options.endings, LineEndings::Native);
        let blob = Blob::new(&["a\r\nb".into()], options);
        assert_eq!(blob.text(), "a\r\nb");
    }

    #[test]
    fn test_slice_positive_and_negative() {
        let blob = sample();
        assert_eq!(blob.slice(Some(2), Some(5), None).text(), "cde");
        assert_eq!(blob.slice(Some(7), None, None).text(), "hij");
        assert_eq!(blob.slice(Some(-3), None, None).text(), "hij");
        assert_eq!(blob.slice(Some(-4), Some(-1), None).text(), "ghi");
        assert_eq!(blob.slice(Some(8), Some(100), None).text(), "ij");
        assert_eq!(blob.slice(Some(-100), Some(-8), None).text(), "ab");
        assert_eq!(blob.slice(Some(3), Some(3), None).size(), 0);
    }

    #[test]
    fn test_slice_keeps_whole_blob_for_degenerate_bounds() {
        let blob = sample();
        assert_eq!(blob.slice(None, Some(3), None).size(), 10);
        assert_eq!(blob.slice(Some(5), Some(2), None).size(), 10);
        assert_eq!(blob.slice(Some(2), Some(-2), None).size(), 10);
        assert_eq!(blob.slice(Some(-2), Some(2), None).size(), 10);
        let typed = blob.slice(None, None, Some("application/octet-stream"));
        assert_eq!(typed.mime_type(), "application/octet-stream");
        assert_eq!(blob.mime_type(), "text/plain");
    }

    #[test]
    fn test_nested_slices() {
        let blob = sample().slice(Some(2), Some(8), None);
        let inner = blob.slice(Some(-5), Some(-1), None);
        assert_eq!(inner.text(), "defg");
        assert_eq!(Blob::new(&[(&inner).into()], BlobOptions::default()).text(), "defg");
    }
}
