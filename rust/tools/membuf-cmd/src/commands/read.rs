//! Read command implementation

use anyhow::{Result, bail};
use clap::ValueEnum;
use membuf::{Buffer, Encoding, Endian};

/// Numeric value types understood by the read command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    Double,
    /// Signed integer of `--width` bytes
    Int,
    /// Unsigned integer of `--width` bytes
    Uint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ByteOrder {
    Be,
    Le,
}

impl From<ByteOrder> for Endian {
    fn from(order: ByteOrder) -> Endian {
        match order {
            ByteOrder::Be => Endian::Big,
            ByteOrder::Le => Endian::Little,
        }
    }
}

pub fn run(
    hex: &str,
    kind: ValueKind,
    order: ByteOrder,
    offset: usize,
    width: usize,
) -> Result<()> {
    let buf = parse_hex(hex)?;
    println!("{}", decode(&buf, kind, order, offset, width)?);
    Ok(())
}

/// Parses hex digits, ignoring whitespace. Unlike the lenient buffer codec,
/// any invalid digit is an error.
fn parse_hex(hex: &str) -> Result<Buffer> {
    let digits: String = hex.split_whitespace().collect();
    let buf = Buffer::from_string(&digits, Encoding::Hex)?;
    if buf.len() * 2 != digits.len() {
        bail!("Invalid hex input: {hex}");
    }
    log::debug!("parsed {} input bytes", buf.len());
    Ok(buf)
}

fn decode(
    buf: &Buffer,
    kind: ValueKind,
    order: ByteOrder,
    offset: usize,
    width: usize,
) -> membuf::Result<String> {
    let endian = Endian::from(order);
    let be = endian == Endian::Big;
    Ok(match kind {
        ValueKind::Int8 => buf.read_int8(offset)?.to_string(),
        ValueKind::Uint8 => buf.read_uint8(offset)?.to_string(),
        ValueKind::Int16 if be => buf.read_int16_be(offset)?.to_string(),
        ValueKind::Int16 => buf.read_int16_le(offset)?.to_string(),
        ValueKind::Uint16 if be => buf.read_uint16_be(offset)?.to_string(),
        ValueKind::Uint16 => buf.read_uint16_le(offset)?.to_string(),
        ValueKind::Int32 if be => buf.read_int32_be(offset)?.to_string(),
        ValueKind::Int32 => buf.read_int32_le(offset)?.to_string(),
        ValueKind::Uint32 if be => buf.read_uint32_be(offset)?.to_string(),
        ValueKind::Uint32 => buf.read_uint32_le(offset)?.to_string(),
        ValueKind::Int64 if be => buf.read_big_int64_be(offset)?.to_string(),
        ValueKind::Int64 => buf.read_big_int64_le(offset)?.to_string(),
        ValueKind::Uint64 if be => buf.read_big_uint64_be(offset)?.to_string(),
        ValueKind::Uint64 => buf.read_big_uint64_le(offset)?.to_string(),
        ValueKind::Float if be => buf.read_float_be(offset)?.to_string(),
        ValueKind::Float => buf.read_float_le(offset)?.to_string(),
        ValueKind::Double if be => buf.read_double_be(offset)?.to_string(),
        ValueKind::Double => buf.read_double_le(offset)?.to_string(),
        ValueKind::Int if be => buf.read_int_be(offset, width)?.to_string(),
        ValueKind::Int => buf.read_int_le(offset, width)?.to_string(),
        ValueKind::Uint if be => buf.read_uint_be(offset, width)?.to_string(),
        ValueKind::Uint => buf.read_uint_le(offset, width)?.to_string(),
    })
}
