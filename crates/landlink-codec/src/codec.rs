//! Blob encoding and decoding.
//!
//! Format: one comma-separated record. Bare version number, quoted
//! `name`, quoted `description` (embedded `"` doubled), bare `ipns`
//! token, then any opaque tail fields carried verbatim. The `ipns`
//! reference is URI-shaped and never contains a comma, so it needs no
//! quoting.

use crate::data::LandData;

/// Decode failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Blob is empty or whitespace
    #[error("empty metadata blob")]
    Empty,
    /// Record ends before a required field
    #[error("missing field: {0}")]
    MissingField(&'static str),
    /// Leading field is not a version number
    #[error("invalid version: '{0}'")]
    InvalidVersion(String),
    /// A quoted field never closes
    #[error("unterminated quote in metadata blob")]
    UnterminatedQuote,
}

/// Encode metadata into its on-chain blob form.
///
/// Deterministic: equal [`LandData`] values encode to equal blobs. The
/// version written is `data.version`, so metadata decoded from a newer
/// blob re-encodes at that same version with its opaque tail intact.
#[must_use]
pub fn encode(data: &LandData) -> String {
    let mut out = String::new();
    out.push_str(&data.version.to_string());
    out.push(',');
    push_quoted(&mut out, &data.name);
    out.push(',');
    push_quoted(&mut out, &data.description);
    out.push(',');
    out.push_str(&data.ipns);
    for extra in &data.extras {
        out.push(',');
        out.push_str(extra);
    }
    out
}

/// Decode an on-chain blob.
///
/// Fails on malformed input; callers recover by treating the failure as
/// "no prior data" ([`LandData::default`]).
pub fn decode(blob: &str) -> Result<LandData, DecodeError> {
    let blob = blob.trim();
    if blob.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut fields = split_record(blob)?.into_iter();
    let version_raw = fields.next().ok_or(DecodeError::MissingField("version"))?;
    let version = version_raw
        .parse::<u8>()
        .map_err(|_| DecodeError::InvalidVersion(version_raw))?;
    let name = unquote(&fields.next().ok_or(DecodeError::MissingField("name"))?);
    let description = unquote(&fields.next().ok_or(DecodeError::MissingField("description"))?);
    let ipns = fields.next().ok_or(DecodeError::MissingField("ipns"))?;

    Ok(LandData {
        version,
        name,
        description,
        ipns,
        extras: fields.collect(),
    })
}

fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}

fn unquote(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw[1..raw.len() - 1].replace("\"\"", "\"")
    } else {
        raw.to_string()
    }
}

/// Split at top-level commas, leaving quoted segments intact.
fn split_record(blob: &str) -> Result<Vec<String>, DecodeError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = blob.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // escaped quote, kept doubled until unquote()
                current.push('"');
                current.push('"');
                chars.next();
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push('"');
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if in_quotes {
        return Err(DecodeError::UnterminatedQuote);
    }
    fields.push(current);
    Ok(fields)
}
