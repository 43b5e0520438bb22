//! Byte input helpers.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (e.g. from `<meta charset>`)
/// 3. Falls back to Windows-1252 (common in legacy user content)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        log::debug!("input is not UTF-8, decoding as {}", encoding.name());
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    log::debug!("input is not UTF-8, falling back to windows-1252");
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the charset declared by a `<meta charset="...">` tag.
///
/// Only the first 1024 bytes are checked, as browsers do.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(1024);
    let prefix = &bytes[..check_len];

    let meta_start = prefix
        .windows(5)
        .position(|w| w.eq_ignore_ascii_case(b"<meta"))?;
    let after_meta = &prefix[meta_start..];

    let cs_pos = after_meta
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let after_cs = &after_meta[cs_pos + 8..];

    let (value_start, terminator): (usize, &[u8]) = match *after_cs.first()? {
        b'"' => (1, &b"\""[..]),
        b'\'' => (1, &b"'"[..]),
        _ => (0, &b" \t\n;/>\"'"[..]),
    };
    let value = &after_cs[value_start..];
    let value_end = value
        .iter()
        .position(|b| terminator.contains(b))
        .unwrap_or(value.len());

    let charset = std::str::from_utf8(&value[..value_end]).ok()?;
    (!charset.is_empty()).then_some(charset)
}
