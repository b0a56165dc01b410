//! Inspect command implementation

use anyhow::{Context, Result};
use membuf::{Buffer, Encoding, InspectOptions};
use serde::Serialize;

#[derive(Serialize)]
struct InspectSummary<'a> {
    encoding: &'static str,
    length: usize,
    buffer: &'a Buffer,
}

pub fn run(input: &str, encoding: Encoding, max_bytes: Option<usize>, json: bool) -> Result<()> {
    println!("{}", render(input, encoding, max_bytes, json)?);
    Ok(())
}

fn render(
    input: &str,
    encoding: Encoding,
    max_bytes: Option<usize>,
    json: bool,
) -> Result<String> {
    let buf = Buffer::from_string(input, encoding)
        .with_context(|| format!("Failed to encode input as {encoding}"))?;
    log::debug!("encoded {} input chars into {} bytes", input.chars().count(), buf.len());

    if json {
        let summary = InspectSummary {
            encoding: encoding.name(),
            length: buf.len(),
            buffer: &buf,
        };
        return serde_json::to_string_pretty(&summary).context("Failed to serialize summary");
    }

    let options = max_bytes.map_or_else(InspectOptions::default, |max_bytes| InspectOptions {
        max_bytes,
    });
    Ok(buf.inspect_with(&options))
}
