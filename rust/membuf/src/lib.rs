//! Fixed-length, mutable byte buffers with pooled allocation, aliasing
//! sub-views, binary codecs for integers and IEEE floats, and text encodings.
//!
//! The main entry points are the free functions in [`factory`] (re-exported
//! here) and the methods of [`Buffer`]:
//!
//! ```
//! use membuf::{Encoding, Needle};
//!
//! let buf = membuf::from_str("abc", Encoding::Utf8).unwrap();
//! assert_eq!(buf.index_of(Needle::from("b"), 0, Encoding::Utf8), Some(1));
//!
//! buf.write_uint16_be(0x6162, 1).unwrap();
//! assert_eq!(buf.to_encoded_string(Encoding::Latin1), "aab");
//! ```

pub mod blob;
pub mod buffer;
pub mod codec;
pub mod config;
pub mod encoding;
pub mod factory;
pub mod inspect;
pub mod json;
pub mod ops;
pub mod pool;
pub mod search;


pub use blob::{Blob, BlobOptions, BlobPart, LineEndings};
pub use buffer::{Buffer, Property, PropertyValue};
pub use codec::Endian;
pub use config::{InspectOptions, PoolConfig};
pub use encoding::{Encoding, EncodingDescriptor, is_encoding, normalize_encoding};
pub use factory::{
    BufferSource, ByteLengthInput, alloc, alloc_filled, alloc_uninitialized,
    alloc_uninitialized_from_pool, byte_length, compare, concat, from, from_str, transcode,
};
pub use membuf_bytes::SharedBytes;
pub use membuf_common::{
    Result,
    error::{Error, ErrorCategory, ErrorKind},
};
pub use ops::{BytesLike, FillValue};
pub use pool::{BufferPool, PoolStats};
pub use search::Needle;
