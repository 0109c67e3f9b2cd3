use std::borrow::Cow;

use crate::chariter::error_range_of;
use crate::error::SyntaxError;
use crate::error::SyntaxError::UnknownReference;
use crate::textrange::TextRange;
use crate::xmlchar::XmlChar;

/// Decode a character reference body (the part between `&#` and `;`).
///
/// CharRef ::= '&#' [0-9]+ ';' | '&#x' [0-9a-fA-F]+ ';'
/// [https://www.w3.org/TR/xml/#NT-CharRef]
pub fn decode_char_reference(reference: &str) -> Option<char> {
    let code = match reference.strip_prefix('x') {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => u32::from_str_radix(hex, 16).ok()?,
        Some(_) => return None,
        None if !reference.is_empty() && reference.bytes().all(|b| b.is_ascii_digit()) => reference.parse::<u32>().ok()?,
        None => return None,
    };
    let c = char::from_u32(code)?;
    if !c.is_xml_char() {
        return None;
    }
    Some(c)
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name.strip_prefix('#').and_then(decode_char_reference),
    }
}

/// Decode the references inside a text or attribute range of `xml`.
///
/// Line breaks are normalized first: `\r\n` and a lone `\r` both become `\n`. With
/// `normalize_spaces` literal tabs and line breaks then become spaces, as attribute values
/// require. Whitespace produced by character references is kept.
pub fn unescape<'a>(xml: &str, range: TextRange<'a>, normalize_spaces: bool) -> Result<Cow<'a, str>, SyntaxError> {
    let raw = range.slice;
    let needs_spaces = normalize_spaces && raw.contains(|c: char| matches!(c, '\t' | '\n'));
    if !raw.contains(|c: char| matches!(c, '&' | '\r')) && !needs_spaces {
        return Ok(Cow::Borrowed(raw));
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        match c {
            '&' => {
                let offset = range.start + (raw.len() - rest.len());
                let end = rest.find(';').unwrap_or(0);
                let resolved = if end > 1 { decode_entity(&rest[1..end]) } else { None };
                match resolved {
                    Some(resolved) => {
                        decoded.push(resolved);
                        rest = &rest[end + 1..];
                    }
                    None => {
                        let len = if end > 0 { end + 1 } else { 1 };
                        return Err(UnknownReference { range: error_range_of(xml, offset..offset + len) });
                    }
                }
            }
            '\r' => {
                decoded.push(if normalize_spaces { ' ' } else { '\n' });
                rest = rest.strip_prefix("\r\n").unwrap_or(&rest[1..]);
            }
            '\t' | '\n' if normalize_spaces => {
                decoded.push(' ');
                rest = &rest[1..];
            }
            _ => {
                decoded.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    Ok(Cow::Owned(decoded))
}

/// `\r\n` and a lone `\r` become `\n`, for character data that is not unescaped (CDATA).
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Escape character data for use between tags.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text, false)
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value, true)
}

fn escape(text: &str, attribute: bool) -> Cow<'_, str> {
    let special = |c: char| match c {
        '&' | '<' | '>' | '\r' => true,
        '"' | '\t' | '\n' => attribute,
        _ => false,
    };
    if !text.contains(special) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            '\t' if attribute => escaped.push_str("&#9;"),
            '\n' if attribute => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
