use crate::{TextCodec, utf16_len};

/// UTF-8. Invalid sequences decode to U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8;

impl TextCodec for Utf8 {
    fn byte_length(&self, s: &str) -> usize {
        s.len()
    }

    fn encode(&self, s: &str) -> Vec<u8> {
        s.as_bytes().to_vec()
    }

    /// Never writes a partial character.
    fn encode_into(&self, s: &str, dst: &mut [u8]) -> usize {
        let mut n = s.len().min(dst.len());
        while !s.is_char_boundary(n) {
            n -= 1;
        }
        dst[..n].copy_from_slice(&s.as_bytes()[..n]);
        n
    }

    fn decode(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// UTF-16, little endian. Unpaired surrogates decode to U+FFFD and a trailing
/// odd byte is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf16Le;

impl TextCodec for Utf16Le {
    fn byte_length(&self, s: &str) -> usize {
        utf16_len(s) * 2
    }

    fn encode(&self, s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    /// Writes whole code units only.
    fn encode_into(&self, s: &str, dst: &mut [u8]) -> usize {
        let mut written = 0;
        for (unit, out) in s.encode_utf16().zip(dst.chunks_exact_mut(2)) {
            out.copy_from_slice(&unit.to_le_bytes());
            written += 2;
        }
        written
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let units = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        char::decode_utf16(units)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }
}
