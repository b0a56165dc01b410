//! Fixed and variable width integer and IEEE-754 accessors of [`Buffer`].
//!
//! Every accessor validates that `[offset, offset + width)` lies within the
//! buffer, and every write validates that the value is representable in the
//! target width, before any byte is touched. Writes return the offset just
//! past the bytes written.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use membuf_common::{Result, result::verify_range};

use crate::buffer::Buffer;

/// Byte order of a multi-byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

impl Endian {
    #[inline]
    fn read_uint(self, bytes: &[u8]) -> u64 {
        match self {
            Endian::Big => BigEndian::read_uint(bytes, bytes.len()),
            Endian::Little => LittleEndian::read_uint(bytes, bytes.len()),
        }
    }

    #[inline]
    fn read_int(self, bytes: &[u8]) -> i64 {
        match self {
            Endian::Big => BigEndian::read_int(bytes, bytes.len()),
            Endian::Little => LittleEndian::read_int(bytes, bytes.len()),
        }
    }

    /// Stores the low `bytes.len()` bytes of `value`.
    #[inline]
    fn write_low_bytes(self, bytes: &mut [u8], value: u64) {
        let width = bytes.len();
        let masked = if width == 8 {
            value
        } else {
            value & ((1u64 << (8 * width)) - 1)
        };
        match self {
            Endian::Big => BigEndian::write_uint(bytes, masked, width),
            Endian::Little => LittleEndian::write_uint(bytes, masked, width),
        }
    }
}

macro_rules! fixed_width_accessors {
    ($(($bits:literal, $uty:ty, $ity:ty)),*) => {
        paste::paste! {
            $(
                #[doc = concat!("Reads an unsigned ", stringify!($bits), "-bit big-endian integer.")]
                pub fn [<read_uint $bits _be>](&self, offset: usize) -> Result<$uty> {
                    self.read_unsigned(offset, $bits / 8, Endian::Big).map(|v| v as $uty)
                }

                #[doc = concat!("Reads an unsigned ", stringify!($bits), "-bit little-endian integer.")]
                pub fn [<read_uint $bits _le>](&self, offset: usize) -> Result<$uty> {
                    self.read_unsigned(offset, $bits / 8, Endian::Little).map(|v| v as $uty)
                }

                #[doc = concat!("Reads a signed ", stringify!($bits), "-bit big-endian integer.")]
                pub fn [<read_int $bits _be>](&self, offset: usize) -> Result<$ity> {
                    self.read_signed(offset, $bits / 8, Endian::Big).map(|v| v as $ity)
                }

                #[doc = concat!("Reads a signed ", stringify!($bits), "-bit little-endian integer.")]
                pub fn [<read_int $bits _le>](&self, offset: usize) -> Result<$ity> {
                    self.read_signed(offset, $bits / 8, Endian::Little).map(|v| v as $ity)
                }

                pub fn [<write_uint $bits _be>](&self, value: i64, offset: usize) -> Result<usize> {
                    self.write_unsigned(value.into(), offset, $bits / 8, Endian::Big)
                }

                pub fn [<write_uint $bits _le>](&self, value: i64, offset: usize) -> Result<usize> {
                    self.write_unsigned(value.into(), offset, $bits / 8, Endian::Little)
                }

                pub fn [<write_int $bits _be>](&self, value: i64, offset: usize) -> Result<usize> {
                    self.write_signed(value.into(), offset, $bits / 8, Endian::Big)
                }

                pub fn [<write_int $bits _le>](&self, value: i64, offset: usize) -> Result<usize> {
                    self.write_signed(value.into(), offset, $bits / 8, Endian::Little)
                }
            )*
        }
    };
}

macro_rules! big_int_accessors {
    ($($suffix:ident => $endian:ident),*) => {
        paste::paste! {
            $(
                pub fn [<read_big_int64_ $suffix>](&self, offset: usize) -> Result<i64> {
                    self.read_signed(offset, 8, Endian::$endian)
                }

                pub fn [<read_big_uint64_ $suffix>](&self, offset: usize) -> Result<u64> {
                    self.read_unsigned(offset, 8, Endian::$endian)
                }

                /// `value` must lie in `[-2^63, 2^63 - 1]`.
                pub fn [<write_big_int64_ $suffix>](&self, value: i128, offset: usize) -> Result<usize> {
                    self.write_signed(value, offset, 8, Endian::$endian)
                }

                /// `value` must lie in `[0, 2^64 - 1]`.
                pub fn [<write_big_uint64_ $suffix>](&self, value: i128, offset: usize) -> Result<usize> {
                    self.write_unsigned(value, offset, 8, Endian::$endian)
                }
            )*
        }
    };
}

macro_rules! float_accessors {
    ($(($name:ident, $fty:ty, $bits_ty:ty, $width:literal)),*) => {
        paste::paste! {
            $(
                pub fn [<read_ $name _be>](&self, offset: usize) -> Result<$fty> {
                    self.read_unsigned(offset, $width, Endian::Big)
                        .map(|bits| <$fty>::from_bits(bits as $bits_ty))
                }

                pub fn [<read_ $name _le>](&self, offset: usize) -> Result<$fty> {
                    self.read_unsigned(offset, $width, Endian::Little)
                        .map(|bits| <$fty>::from_bits(bits as $bits_ty))
                }

                pub fn [<write_ $name _be>](&self, value: $fty, offset: usize) -> Result<usize> {
                    self.verify_access(offset, $width)?;
                    Ok(self.store(value.to_bits() as u64, offset, $width, Endian::Big))
                }

                pub fn [<write_ $name _le>](&self, value: $fty, offset: usize) -> Result<usize> {
                    self.verify_access(offset, $width)?;
                    Ok(self.store(value.to_bits() as u64, offset, $width, Endian::Little))
                }
            )*
        }
    };
}

macro_rules! variable_width_accessors {
    ($($suffix:ident => $endian:ident),*) => {
        paste::paste! {
            $(
                /// Reads a signed integer of `byte_length` bytes, 1 to 6.
                pub fn [<read_int_ $suffix>](&self, offset: usize, byte_length: usize) -> Result<i64> {
                    verify_byte_length(byte_length)?;
                    self.read_signed(offset, byte_length, Endian::$endian)
                }

                /// Reads an unsigned integer of `byte_length` bytes, 1 to 6.
                pub fn [<read_uint_ $suffix>](&self, offset: usize, byte_length: usize) -> Result<u64> {
                    verify_byte_length(byte_length)?;
                    self.read_unsigned(offset, byte_length, Endian::$endian)
                }

                /// Writes a signed integer of `byte_length` bytes, 1 to 6.
                pub fn [<write_int_ $suffix>](
                    &self,
                    value: i64,
                    offset: usize,
                    byte_length: usize,
                ) -> Result<usize> {
                    verify_byte_length(byte_length)?;
                    self.write_signed(value.into(), offset, byte_length, Endian::$endian)
                }

                /// Writes an unsigned integer of `byte_length` bytes, 1 to 6.
                pub fn [<write_uint_ $suffix>](
                    &self,
                    value: i64,
                    offset: usize,
                    byte_length: usize,
                ) -> Result<usize> {
                    verify_byte_length(byte_length)?;
                    self.write_unsigned(value.into(), offset, byte_length, Endian::$endian)
                }
            )*
        }
    };
}

/// Widths accepted by the generic accessors.
const MAX_WIDTH: usize = 8;

/// Widths accepted by the `byteLength`-parameterized accessors.
const MAX_VARIABLE_WIDTH: usize = 6;

impl Buffer {
    /// Reads an unsigned integer of `width` bytes (1 to 8) at `offset`.
    pub fn read_unsigned(&self, offset: usize, width: usize, endian: Endian) -> Result<u64> {
        self.verify_access(offset, width)?;
        Ok(self.with_bytes(|b| endian.read_uint(&b[offset..offset + width])))
    }

    /// Reads a two's-complement integer of `width` bytes (1 to 8) at `offset`,
    /// sign-extended from its top bit.
    pub fn read_signed(&self, offset: usize, width: usize, endian: Endian) -> Result<i64> {
        self.verify_access(offset, width)?;
        Ok(self.with_bytes(|b| endian.read_int(&b[offset..offset + width])))
    }

    /// Writes `value` as an unsigned integer of `width` bytes (1 to 8).
    ///
    /// `value` must lie in `[0, 2^(8*width) - 1]`.
    pub fn write_unsigned(
        &self,
        value: i128,
        offset: usize,
        width: usize,
        endian: Endian,
    ) -> Result<usize> {
        self.verify_access(offset, width)?;
        verify_range(value, "value", 0, (1i128 << (8 * width)) - 1)?;
        Ok(self.store(value as u64, offset, width, endian))
    }

    /// Writes `value` as a two's-complement integer of `width` bytes (1 to 8).
    ///
    /// `value` must lie in `[-2^(8*width-1), 2^(8*width-1) - 1]`.
    pub fn write_signed(
        &self,
        value: i128,
        offset: usize,
        width: usize,
        endian: Endian,
    ) -> Result<usize> {
        self.verify_access(offset, width)?;
        let half = 1i128 << (8 * width - 1);
        verify_range(value, "value", -half, half - 1)?;
        Ok(self.store(value as i64 as u64, offset, width, endian))
    }

    pub fn read_uint8(&self, offset: usize) -> Result<u8> {
        self.read_unsigned(offset, 1, Endian::Big).map(|v| v as u8)
    }

    pub fn read_int8(&self, offset: usize) -> Result<i8> {
        self.read_signed(offset, 1, Endian::Big).map(|v| v as i8)
    }

    pub fn write_uint8(&self, value: i64, offset: usize) -> Result<usize> {
        self.write_unsigned(value.into(), offset, 1, Endian::Big)
    }

    pub fn write_int8(&self, value: i64, offset: usize) -> Result<usize> {
        self.write_signed(value.into(), offset, 1, Endian::Big)
    }

    fixed_width_accessors!((16, u16, i16), (32, u32, i32));

    big_int_accessors!(be => Big, le => Little);

    float_accessors!((float, f32, u32, 4), (double, f64, u64, 8));

    variable_width_accessors!(be => Big, le => Little);
}

impl Buffer {
    fn verify_access(&self, offset: usize, width: usize) -> Result<()> {
        verify_range(width as i128, "byteLength", 1, MAX_WIDTH as i128)?;
        verify_range(
            offset as i128,
            "offset",
            0,
            self.len() as i128 - width as i128,
        )
    }

    fn store(&self, value: u64, offset: usize, width: usize, endian: Endian) -> usize {
        self.with_bytes_mut(|b| endian.write_low_bytes(&mut b[offset..offset + width], value));
        offset + width
    }
}

fn verify_byte_length(byte_length: usize) -> Result<()> {
    verify_range(
        byte_length as i128,
        "byteLength",
        1,
        MAX_VARIABLE_WIDTH as i128,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use membuf_common::error::ErrorCategory;

    #[test]
    fn test_uint16_endianness() {
        let buf = Buffer::new(4).unwrap();
        assert_eq!(buf.write_uint16_be(0x1234, 0).unwrap(), 2);
        assert_eq!(buf.write_uint16_le(0x1234, 2).unwrap(), 4);
        assert_eq!(buf.to_vec(), vec![0x12, 0x34, 0x34, 0x12]);
        assert_eq!(buf.read_uint16_be(0).unwrap(), 0x1234);
        assert_eq!(buf.read_uint16_le(2).unwrap(), 0x1234);
        assert_eq!(buf.read_uint16_le(0).unwrap(), 0x3412);
    }

    #[test]
    fn test_int32_sign() {
        let buf = Buffer::new(8).unwrap();
        buf.write_int32_be(-2, 0).unwrap();
        buf.write_int32_le(i32::MIN as i64, 4).unwrap();
        assert_eq!(buf.to_vec(), vec![0xFF, 0xFF, 0xFF, 0xFE, 0x00, 0x00, 0x00, 0x80]);
        assert_eq!(buf.read_int32_be(0).unwrap(), -2);
        assert_eq!(buf.read_uint32_be(0).unwrap(), 0xFFFF_FFFE);
        assert_eq!(buf.read_int32_le(4).unwrap(), i32::MIN);
    }

    #[test]
    fn test_int8() {
        let buf = Buffer::new(2).unwrap();
        buf.write_int8(-128, 0).unwrap();
        buf.write_uint8(255, 1).unwrap();
        assert_eq!(buf.read_int8(0).unwrap(), -128);
        assert_eq!(buf.read_uint8(0).unwrap(), 0x80);
        assert_eq!(buf.read_int8(1).unwrap(), -1);
        assert!(buf.write_int8(128, 0).is_err());
        assert!(buf.write_uint8(-1, 0).is_err());
    }

    #[test]
    fn test_value_range_is_checked_before_write() {
        let buf = Buffer::from_slice(&[0xAA; 4]);
        let e = buf.write_uint16_be(0x10000, 0).unwrap_err();
        assert_eq!(e.category(), ErrorCategory::Range);
        assert_eq!(e.kind().argument(), Some("value"));
        assert_eq!(
            e.to_string(),
            "The value of \"value\" is out of range. It must be >= 0 and <= 65535. \
             Received value is: 65536"
        );
        assert!(buf.write_int16_le(-32769, 0).is_err());
        assert_eq!(buf.to_vec(), vec![0xAA; 4]);
    }

    #[test]
    fn test_offset_range_is_checked() {
        let buf = Buffer::new(4).unwrap();
        assert!(buf.read_uint32_be(0).is_ok());
        let e = buf.read_uint32_be(1).unwrap_err();
        assert_eq!(e.kind().argument(), Some("offset"));
        assert!(
            e.to_string()
                .contains("It must be >= 0 and <= 0. Received value is: 1")
        );
        assert!(buf.write_double_le(1.0, 0).is_err());
        assert!(Buffer::new(0).unwrap().read_uint8(0).is_err());
    }

    #[test]
    fn test_variable_width() {
        let buf = Buffer::new(6).unwrap();
        assert_eq!(buf.write_uint_be(0x123456, 0, 3).unwrap(), 3);
        assert_eq!(buf.write_int_le(-0x123456, 3, 3).unwrap(), 6);
        assert_eq!(buf.read_uint_be(0, 3).unwrap(), 0x123456);
        assert_eq!(buf.read_int_le(3, 3).unwrap(), -0x123456);
        assert_eq!(&buf.to_vec()[..3], &[0x12, 0x34, 0x56]);

        buf.write_int_be(-1, 0, 6).unwrap();
        assert_eq!(buf.to_vec(), vec![0xFF; 6]);
        assert_eq!(buf.read_uint_le(0, 6).unwrap(), 0xFFFF_FFFF_FFFF);
        assert_eq!(buf.read_int_be(0, 6).unwrap(), -1);

        buf.write_uint_le(0x0102_0304_0506, 0, 6).unwrap();
        assert_eq!(buf.to_vec(), vec![6, 5, 4, 3, 2, 1]);
        assert!(buf.write_int_be(1 << 47, 0, 6).is_err());
        assert!(buf.write_uint_be(1 << 48, 0, 6).is_err());
    }

    #[test]
    fn test_sign_extension_uses_top_bit_of_width() {
        let buf = Buffer::from_slice(&[0x80, 0x00, 0x00, 0x7F, 0xFF, 0xFF]);
        assert_eq!(buf.read_int_be(0, 3).unwrap(), -(1 << 23));
        assert_eq!(buf.read_int_be(3, 3).unwrap(), (1 << 23) - 1);
        assert_eq!(buf.read_int_le(0, 1).unwrap(), -128);
    }

    #[test]
    fn test_byte_length_must_be_one_to_six() {
        let buf = Buffer::new(8).unwrap();
        for byte_length in [0, 7, 8] {
            let e = buf.read_int_be(0, byte_length).unwrap_err();
            assert_eq!(e.kind().argument(), Some("byteLength"));
            assert!(buf.write_uint_le(0, 0, byte_length).is_err());
        }
    }

    #[test]
    fn test_big_int64() {
        let buf = Buffer::new(16).unwrap();
        buf.write_big_int64_be(i64::MIN as i128, 0).unwrap();
        buf.write_big_uint64_le(u64::MAX as i128, 8).unwrap();
        assert_eq!(buf.read_big_int64_be(0).unwrap(), i64::MIN);
        assert_eq!(buf.read_big_uint64_be(0).unwrap(), 1 << 63);
        assert_eq!(buf.read_big_uint64_le(8).unwrap(), u64::MAX);
        assert_eq!(buf.read_big_int64_le(8).unwrap(), -1);

        buf.write_big_uint64_be(0x0102_0304_0506_0708, 0).unwrap();
        assert_eq!(&buf.to_vec()[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);

        assert!(buf.write_big_int64_le(i64::MAX as i128 + 1, 0).is_err());
        assert!(buf.write_big_uint64_be(u64::MAX as i128 + 1, 0).is_err());
        assert!(buf.write_big_uint64_be(-1, 0).is_err());
    }

    #[test]
    fn test_floats() {
        let buf = Buffer::new(12).unwrap();
        assert_eq!(buf.write_float_be(1.5, 0).unwrap(), 4);
        assert_eq!(buf.to_vec()[..4], [0x3F, 0xC0, 0x00, 0x00]);
        assert_eq!(buf.write_double_le(-0.1, 4).unwrap(), 12);
        assert_eq!(buf.read_float_be(0).unwrap(), 1.5);
        assert_eq!(buf.read_float_le(0).unwrap(), f32::from_bits(0x0000_C03F));
        assert_eq!(buf.read_double_le(4).unwrap(), -0.1);

        buf.write_double_be(f64::NAN, 4).unwrap();
        assert!(buf.read_double_be(4).unwrap().is_nan());
        buf.write_float_le(f32::INFINITY, 0).unwrap();
        assert_eq!(buf.read_float_le(0).unwrap(), f32::INFINITY);
    }
}
