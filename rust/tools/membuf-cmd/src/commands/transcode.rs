//! Transcode command implementation

use anyhow::{Context, Result};
use membuf::{Buffer, Encoding};

pub fn run(input: &str, from: Encoding, to: Encoding) -> Result<()> {
    println!("{}", convert(input, from, to)?);
    Ok(())
}

fn convert(input: &str, from: Encoding, to: Encoding) -> Result<String> {
    let buf = Buffer::from_string(input, from)
        .with_context(|| format!("Failed to encode input as {from}"))?;
    log::debug!("transcoding {} bytes from {from} to {to}", buf.len());
    Ok(buf.to_encoded_string(to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert() {
        assert_eq!(convert("hello", Encoding::Utf8, Encoding::Base64).unwrap(), "aGVsbG8=");
        assert_eq!(convert("aGVsbG8", Encoding::Base64Url, Encoding::Hex).unwrap(), "68656c6c6f");
        assert_eq!(convert("e282ac", Encoding::Hex, Encoding::Utf8).unwrap(), "€");
    }
}
