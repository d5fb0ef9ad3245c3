// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Legacy escaped-unicode text decoding
//!
//! Entity names and textual property values may embed extended characters as
//! `\X2\<hex>\X0\` runs, where `<hex>` is the hexadecimal code point between
//! the two sentinel markers. [`decode`] replaces each run with the character
//! it encodes and leaves everything else untouched.

use std::borrow::Cow;

/// Check for a `\X<digit>\` marker at byte offset `i`
///
/// The marker letter matches case-insensitively.
fn marker_at(bytes: &[u8], i: usize, digit: u8) -> bool {
    bytes.len() >= i + 4
        && bytes[i] == b'\\'
        && (bytes[i + 1] == b'X' || bytes[i + 1] == b'x')
        && bytes[i + 2] == digit
        && bytes[i + 3] == b'\\'
}

/// Find the closing `\X0\` for a run opened at `from` and decode the
/// hex digits in between
///
/// The nearest closing marker wins. Returns the closing marker offset and
/// the decoded character, or `None` when the run is unterminated or the hex
/// does not name a valid code point.
fn parse_run(bytes: &[u8], from: usize) -> Option<(usize, char)> {
    let mut j = from;
    while j + 4 <= bytes.len() {
        if marker_at(bytes, j, b'0') {
            let hex = std::str::from_utf8(&bytes[from..j]).ok()?;
            let code = u32::from_str_radix(hex, 16).ok()?;
            return char::from_u32(code).map(|ch| (j, ch));
        }
        j += 1;
    }
    None
}

/// Decode all `\X2\<hex>\X0\` runs in a string
///
/// Text without runs is returned borrowed. Malformed runs (unterminated,
/// non-hex digits, invalid code point) are left in place; the scan always
/// advances past each consumed run, so identical match text later in the
/// string is decoded independently.
pub fn decode(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut i = 0;

    while i + 4 <= bytes.len() {
        if marker_at(bytes, i, b'2') {
            if let Some((close, ch)) = parse_run(bytes, i + 4) {
                let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
                buf.push_str(&text[copied..i]);
                buf.push(ch);
                i = close + 4;
                copied = i;
                continue;
            }
        }
        i += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

/// Decode an optional string, passing absence through unchanged
pub fn decode_opt(text: Option<&str>) -> Option<Cow<'_, str>> {
    text.map(decode)
}
