//! C-style escaping of byte strings, used to pass payloads on the command line.
//!
//! Recognized sequences: `\n`, `\r`, `\t`, `\\`, `\'`, `\"`, `\xHH` (one or two hex digits) and
//! `\NNN` (one to three octal digits).

use crate::Error;

/// Decodes an escaped string into raw bytes.
///
/// Characters outside an escape sequence contribute their UTF-8 encoding.
pub fn unescape(input: &str) -> Result<Vec<u8>, Error> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        i += 1;
        if b != b'\\' {
            out.push(b);
            continue;
        }
        let Some(&c) = bytes.get(i) else {
            return Err(Error::InvalidEscape("trailing backslash".into()));
        };
        i += 1;
        match c {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'\\' | b'\'' | b'"' => out.push(c),
            b'x' => {
                let digits = take_digits(&bytes[i..], 2, 16);
                if digits.is_empty() {
                    return Err(Error::InvalidEscape(format!(
                        "\\x without hex digits at offset {}",
                        i - 2
                    )));
                }
                i += digits.len();
                out.push(parse_digits(digits, 16)? as u8);
            }
            b'0'..=b'7' => {
                let digits = take_digits(&bytes[i - 1..], 3, 8);
                i += digits.len() - 1;
                let value = parse_digits(digits, 8)?;
                let value = u8::try_from(value).map_err(|_| {
                    Error::InvalidEscape(format!("octal escape \\{value:o} out of range"))
                })?;
                out.push(value);
            }
            other => {
                return Err(Error::InvalidEscape(format!(
                    "unknown escape \\{}",
                    other.escape_ascii()
                )))
            }
        }
    }
    Ok(out)
}

/// Encodes raw bytes so that the result only contains printable ASCII.
pub fn escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'"' => out.push_str("\\\""),
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\{b:03o}")),
        }
    }
    out
}

fn take_digits(bytes: &[u8], max: usize, radix: u32) -> &[u8] {
    let len = bytes
        .iter()
        .take(max)
        .take_while(|b| (**b as char).is_digit(radix))
        .count();
    &bytes[..len]
}

fn parse_digits(digits: &[u8], radix: u32) -> Result<u32, Error> {
    let text = std::str::from_utf8(digits).map_err(|e| Error::InvalidEscape(e.to_string()))?;
    u32::from_str_radix(text, radix).map_err(|e| Error::InvalidEscape(e.to_string()))
}
