//! Lexical elements shared by the encoder and decoder: the compiled key and
//! number patterns, and the backslash escape alphabet.
//!
//! Escapes cover `\t`, `\n`, `\f`, `\r`, `\\`, and `\uXXXX` (exactly four
//! hex digits). The encoder only ever produces `\\`, `\r`, and `\n`; the
//! decoder accepts the full set.

use crate::{Error, Result};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Record keys that can be written inline without `@` escaping.
pub(crate) fn is_plain_key(key: &str) -> bool {
    static PLAIN_KEY: OnceLock<Regex> = OnceLock::new();
    let re = PLAIN_KEY
        .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("invalid key regex"));
    re.is_match(key)
}

/// Number literals: optional sign, no leading zeros, optional fraction and
/// exponent.
pub(crate) fn is_number_literal(content: &str) -> bool {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let re = NUMBER.get_or_init(|| {
        Regex::new(r"^-?(0|[1-9]\d*)(\.\d+)?([eE][-+]?\d+)?$").expect("invalid number regex")
    });
    re.is_match(content)
}

/// True if `line` contains a character the raw `text` block cannot carry.
pub(crate) fn needs_escape(line: &str) -> bool {
    line.contains(['\\', '\r', '\n'])
}

/// Escapes backslashes, carriage returns, and line feeds.
pub(crate) fn escape(raw: &str) -> Cow<'_, str> {
    if !needs_escape(raw) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Reverses [`escape`], plus the escapes the format accepts but never emits.
///
/// `line` and `column` locate the first character of `raw` in the source;
/// errors point at the offending escape.
pub(crate) fn unescape(raw: &str, line: usize, column: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut col = column;
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            col += 1;
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{000C}'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('u') => {
                let mut code = 0u32;
                for _ in 0..4 {
                    match chars.next().and_then(|h| h.to_digit(16)) {
                        Some(digit) => code = code * 16 + digit,
                        None => {
                            return Err(Error::syntax(
                                line,
                                col,
                                "expected four hex digits after `\\u`",
                            ))
                        }
                    }
                }
                match char::from_u32(code) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        return Err(Error::syntax(
                            line,
                            col,
                            format!("`\\u{:04x}` is not a valid code point", code),
                        ))
                    }
                }
                col += 4;
            }
            Some(other) => {
                return Err(Error::syntax(
                    line,
                    col + 1,
                    format!("unrecognized escape character `{}`", other),
                ))
            }
            None => return Err(Error::syntax(line, col + 1, "expected escape character")),
        }
        col += 2;
    }
    Ok(out)
}
