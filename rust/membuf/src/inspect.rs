//! Diagnostic rendering of buffers, e.g. `<Buffer 61 62 63>`.

use std::fmt::{self, Write};

use crate::{
    buffer::Buffer,
    config::{INSPECT_MAX_BYTES, InspectOptions},
};

impl Buffer {
    /// Renders at most `max_bytes` leading bytes as hex pairs; the remainder
    /// is summarized as `... N more bytes`.
    pub fn inspect(&self, max_bytes: usize) -> String {
        let mut out = String::with_capacity(10 + 3 * self.len().min(max_bytes));
        // Writing into a String never fails.
        let _ = self.render(&mut out, max_bytes);
        out
    }

    pub fn inspect_with(&self, options: &InspectOptions) -> String {
        self.inspect(options.max_bytes)
    }

    fn render(&self, out: &mut impl Write, max_bytes: usize) -> fmt::Result {
        let shown = self.len().min(max_bytes);
        out.write_str("<Buffer ")?;
        self.with_bytes(|bytes| {
            for (i, b) in bytes[..shown].iter().enumerate() {
                if i > 0 {
                    out.write_char(' ')?;
                }
                write!(out, "{b:02x}")?;
            }
            Ok(())
        })?;
        let rest = self.len() - shown;
        if rest > 0 {
            write!(out, " ... {rest} more byte{}", if rest == 1 { "" } else { "s" })?;
        }
        out.write_char('>')
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, INSPECT_MAX_BYTES)
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, INSPECT_MAX_BYTES)
    }
}
