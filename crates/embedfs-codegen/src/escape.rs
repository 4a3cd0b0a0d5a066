//! Byte escaping for generated literals.
//!
//! Every byte is written as a fixed-width `\xNN` escape with lowercase hex
//! digits, inside a Rust byte-string literal. No byte is ever emitted
//! literally, so the text is independent of the content's encoding and the
//! literal compiles back to exactly the original bytes.
//!
//! # Examples
//!
//! ```
//! use embedfs_codegen::escape::{constant_name, escape, unescape};
//!
//! assert_eq!(escape(b"hi\0"), r"\x68\x69\x00");
//! assert_eq!(unescape(r"\x68\x69\x00")?, b"hi\0");
//! assert_eq!(constant_name("embed", "a.txt"), "EMBED_612E747874");
//! # Ok::<(), embedfs_core::Error>(())
//! ```

use embedfs_core::{Error, Result};

const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";
const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Width of one escaped byte.
pub const ESCAPE_WIDTH: usize = 4;

/// Escapes every byte of `bytes` as `\xNN`.
#[must_use]
pub fn escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * ESCAPE_WIDTH);
    escape_into(bytes, &mut out);
    out
}

/// Appends the escaped form of `bytes` to `out`.
pub fn escape_into(bytes: &[u8], out: &mut String) {
    out.reserve(bytes.len() * ESCAPE_WIDTH);
    for &byte in bytes {
        out.push('\\');
        out.push('x');
        out.push(char::from(HEX_LOWER[usize::from(byte >> 4)]));
        out.push(char::from(HEX_LOWER[usize::from(byte & 0x0f)]));
    }
}

/// Decodes text produced by [`escape`].
///
/// Upper- and lowercase hex digits are both accepted.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the text is not a sequence of
/// `\xNN` escapes.
pub fn unescape(text: &str) -> Result<Vec<u8>> {
    let raw = text.as_bytes();
    if raw.len() % ESCAPE_WIDTH != 0 {
        return Err(Error::InvalidArgument(format!(
            "escaped text has length {}, not a multiple of {ESCAPE_WIDTH}",
            raw.len()
        )));
    }

    raw.chunks_exact(ESCAPE_WIDTH)
        .enumerate()
        .map(|(index, chunk)| match chunk {
            [b'\\', b'x', high, low] => match (hex_value(*high), hex_value(*low)) {
                (Some(high), Some(low)) => Ok((high << 4) | low),
                _ => Err(malformed(index)),
            },
            _ => Err(malformed(index)),
        })
        .collect()
}

/// Name of the constant that holds the file at `path`.
///
/// The upper-cased prefix is followed by `_` and the upper-case hex of the
/// path bytes, which keeps the name a valid identifier and distinct for
/// distinct paths.
#[must_use]
pub fn constant_name(prefix: &str, path: &str) -> String {
    let mut name = String::with_capacity(prefix.len() + 1 + path.len() * 2);
    name.push_str(&prefix.to_uppercase());
    name.push('_');
    for byte in path.bytes() {
        name.push(char::from(HEX_UPPER[usize::from(byte >> 4)]));
        name.push(char::from(HEX_UPPER[usize::from(byte & 0x0f)]));
    }
    name
}

const fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

fn malformed(index: usize) -> Error {
    Error::InvalidArgument(format!(
        "malformed escape at offset {}",
        index * ESCAPE_WIDTH
    ))
}
