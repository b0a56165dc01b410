use crate::error::Error;

pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Upper bound (exclusive for sizes, inclusive for start offsets) of any
/// length or position accepted by the public API.
pub const MAX_LENGTH: i128 = 1 << 32;

/// Verifies that `min <= value <= max`.
#[inline]
pub fn verify_range(value: i128, argument: &str, min: i128, max: i128) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        out_of_range(argument, min, max, value)
    }
}

/// Verifies that `value >= min`.
#[inline]
pub fn verify_lower_bound(value: i128, argument: &str, min: i128) -> Result<()> {
    if value >= min {
        Ok(())
    } else {
        below_lower_bound(argument, min, value)
    }
}

/// Verifies that `size` is a valid length, `0 <= size < 2^32`, and returns it as `usize`.
#[inline]
pub fn verify_size(size: i128, argument: &str) -> Result<usize> {
    if (0..MAX_LENGTH).contains(&size) {
        Ok(size as usize)
    } else {
        negative_size(argument, size)
    }
}

/// Verifies that `len` is a multiple of `block` bytes.
#[inline]
pub fn verify_multiple_of(len: usize, block: usize) -> Result<()> {
    if len % block == 0 {
        Ok(())
    } else {
        not_a_multiple(block)
    }
}

#[cold]
pub fn out_of_range(argument: &str, min: i128, max: i128, value: i128) -> Result<()> {
    Err(Error::out_of_range(argument, min, max, value))
}

#[cold]
pub fn below_lower_bound(argument: &str, min: i128, value: i128) -> Result<()> {
    Err(Error::below_lower_bound(argument, min, value))
}

#[cold]
fn negative_size(argument: &str, size: i128) -> Result<usize> {
    Err(Error::negative_size(argument, &["number"], size.to_string()))
}

#[cold]
fn not_a_multiple(block: usize) -> Result<()> {
    Err(Error::buffer_size(format!("{}-bits", block * 8)))
}
