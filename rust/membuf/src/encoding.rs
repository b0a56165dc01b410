//! Registry of the text encodings a buffer can be converted from and to.

use std::{fmt, str::FromStr};

use membuf_common::{Result, error::Error};
use membuf_text::{Ascii, Base64, Base64Url, Hex, Latin1, TextCodec, Utf8, Utf16Le};

/// A supported text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    Ascii,
    #[default]
    Utf8,
    /// UTF-16 little endian; also known as `ucs2`.
    Utf16Le,
    /// ISO-8859-1; also known as `binary`.
    Latin1,
    Hex,
    Base64,
    Base64Url,
}

impl Encoding {
    pub const ALL: [Encoding; 7] = [
        Encoding::Ascii,
        Encoding::Utf8,
        Encoding::Utf16Le,
        Encoding::Latin1,
        Encoding::Hex,
        Encoding::Base64,
        Encoding::Base64Url,
    ];

    /// Returns the registry entry of this encoding.
    pub fn descriptor(self) -> &'static EncodingDescriptor {
        match self {
            Encoding::Ascii => &ASCII,
            Encoding::Utf8 => &UTF8,
            Encoding::Utf16Le => &UTF16LE,
            Encoding::Latin1 => &LATIN1,
            Encoding::Hex => &HEX,
            Encoding::Base64 => &BASE64,
            Encoding::Base64Url => &BASE64URL,
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    #[inline]
    pub fn byte_length(self, s: &str) -> usize {
        self.descriptor().byte_length(s)
    }

    #[inline]
    pub fn encode(self, s: &str) -> Vec<u8> {
        self.descriptor().encode(s)
    }

    #[inline]
    pub fn encode_into(self, s: &str, dst: &mut [u8]) -> usize {
        self.descriptor().encode_into(s, dst)
    }

    #[inline]
    pub fn decode(self, bytes: &[u8]) -> String {
        self.descriptor().decode(bytes)
    }
}

/// Static description of one encoding: its names and its codec.
pub struct EncodingDescriptor {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    codec: &'static dyn TextCodec,
}

impl EncodingDescriptor {
    /// Returns `true` if `lowercase_name` names this encoding.
    pub fn matches(&self, lowercase_name: &str) -> bool {
        self.name == lowercase_name || self.aliases.contains(&lowercase_name)
    }

    pub fn byte_length(&self, s: &str) -> usize {
        self.codec.byte_length(s)
    }

    pub fn encode(&self, s: &str) -> Vec<u8> {
        self.codec.encode(s)
    }

    pub fn encode_into(&self, s: &str, dst: &mut [u8]) -> usize {
        self.codec.encode_into(s, dst)
    }

    pub fn decode(&self, bytes: &[u8]) -> String {
        self.codec.decode(bytes)
    }
}

impl fmt::Debug for EncodingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingDescriptor")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

static ASCII: EncodingDescriptor = EncodingDescriptor {
    name: "ascii",
    aliases: &[],
    codec: &Ascii,
};

static UTF8: EncodingDescriptor = EncodingDescriptor {
    name: "utf8",
    aliases: &["utf-8"],
    codec: &Utf8,
};

static UTF16LE: EncodingDescriptor = EncodingDescriptor {
    name: "utf16le",
    aliases: &["utf-16le", "ucs2", "ucs-2"],
    codec: &Utf16Le,
};

static LATIN1: EncodingDescriptor = EncodingDescriptor {
    name: "latin1",
    aliases: &["binary"],
    codec: &Latin1,
};

static HEX: EncodingDescriptor = EncodingDescriptor {
    name: "hex",
    aliases: &[],
    codec: &Hex,
};

static BASE64: EncodingDescriptor = EncodingDescriptor {
    name: "base64",
    aliases: &[],
    codec: &Base64,
};

static BASE64URL: EncodingDescriptor = EncodingDescriptor {
    name: "base64url",
    aliases: &[],
    codec: &Base64Url,
};

/// Resolves a case-insensitive encoding name or alias.
///
/// Returns `None` for names outside the supported set.
pub fn normalize_encoding(name: &str) -> Option<Encoding> {
    let lowercase = name.to_ascii_lowercase();
    Encoding::ALL
        .into_iter()
        .find(|enc| enc.descriptor().matches(&lowercase))
}

/// Returns `true` if `name` is a supported encoding name or alias.
pub fn is_encoding(name: &str) -> bool {
    normalize_encoding(name).is_some()
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        normalize_encoding(s).ok_or_else(|| Error::unknown_encoding("encoding", s))
    }
}

impl TryFrom<&str> for Encoding {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
