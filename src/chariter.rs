use std::ops::Range;

use crate::error::{ErrorPos, ErrorRange, SyntaxError};
use crate::error::SyntaxError::{IllegalToken, UnexpectedEndOfFile};
use crate::textrange::TextRange;
use crate::xmlchar::{XmlByte, XmlChar};

pub struct CharIter<'a> {
    pub(crate) pos: usize,
    pub(crate) text: &'a str,
}

impl Default for CharIter<'_> {
    fn default() -> Self {
        CharIter { pos: 0, text: "" }
    }
}

impl<'a> CharIter<'a> {
    pub fn new(text: &'a str) -> Self {
        CharIter { pos: 0, text }
    }

    /// Get the current position as an index in the underlying string slice
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// If the iterator has more elements
    pub fn has_next(&self) -> bool {
        self.pos < self.text.len()
    }

    /// Get the current character and advance the iterator by the length of that character.
    /// Returns an error if the character is not a valid XML char.
    pub fn next_xml_char(&mut self) -> Result<char, SyntaxError> {
        let c = self.peek_xml_char()?; // error check performed inside peek
        self.pos += c.len_utf8();
        Ok(c)
    }

    /// Get the current character without advancing the iterator.
    /// Returns an error if the character is not a valid XML char.
    pub fn peek_xml_char(&self) -> Result<char, SyntaxError> {
        let c = self.text[self.pos..].chars().next().ok_or(UnexpectedEndOfFile)?;
        if !c.is_xml_char() {
            return Err(IllegalToken {
                range: self.error_range(self.pos..self.pos + c.len_utf8()),
                expected: None,
            });
        }
        Ok(c)
    }

    /// Get the current byte without advancing the iterator.
    /// Does NOT check for char boundaries
    pub fn peek_byte(&self) -> Result<u8, SyntaxError> {
        self.text.as_bytes().get(self.pos).copied().ok_or(UnexpectedEndOfFile)
    }

    /// Advance the iterator by n bytes
    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.text.len());
    }

    /// Advance the iterator by the length of a byte slice
    pub fn skip_over(&mut self, expected: &[u8]) {
        self.advance_n(expected.len())
    }

    /// Advance the iterator while the current byte is a whitespace. Stops silently at the end of input.
    pub fn skip_spaces(&mut self) {
        while let Ok(byte) = self.peek_byte() {
            if !byte.is_xml_whitespace() {
                break;
            }
            self.pos += 1; // every whitespace is one byte long
        }
    }

    /// Test if a specified byte slice starts at the current iterator position
    pub fn upcoming(&self, test: &[u8]) -> bool {
        self.text.as_bytes()[self.pos..].starts_with(test)
    }

    /// Test if the current byte equals the expected, return an error if it doesn't.
    pub fn expect_byte(&mut self, expected: u8) -> Result<(), SyntaxError> {
        if self.peek_byte()? != expected {
            return Err(self.illegal_here(Some(char::from(expected).to_string())));
        }
        self.pos += 1;
        Ok(())
    }

    /// Like [skip_spaces](CharIter::skip_spaces) but returns an error if no space is skipped.
    pub fn expect_spaces(&mut self) -> Result<(), SyntaxError> {
        if !self.peek_byte()?.is_xml_whitespace() {
            return Err(self.illegal_here(Some("Any space".to_string())));
        }
        self.skip_spaces();
        Ok(())
    }

    /// Name ::= NameStartChar (NameChar)*
    /// [https://www.w3.org/TR/xml/#sec-common-syn]
    pub fn consume_name(&mut self) -> Result<TextRange<'a>, SyntaxError> {
        let start = self.pos;
        if !self.peek_xml_char()?.is_xml_name_start_char() {
            return Err(self.illegal_here(None));
        }
        self.next_xml_char()?;
        while self.has_next() && self.peek_xml_char()?.is_xml_name_char() {
            self.next_xml_char()?;
        }
        Ok(self.slice(start..self.pos))
    }

    /// Consume character data up to (not including) `delimiter` or the end of input.
    /// References are left undecoded, `]]>` is rejected.
    pub fn consume_character_data_until(&mut self, delimiter: u8) -> Result<TextRange<'a>, SyntaxError> {
        let start = self.pos;
        while self.has_next() && self.peek_byte()? != delimiter {
            if self.upcoming(b"]]>") {
                return Err(IllegalToken { range: self.error_range(self.pos..self.pos + 3), expected: None });
            }
            self.next_xml_char()?;
        }
        Ok(self.slice(start..self.pos))
    }

    /// Consume an attribute value up to the closing `quote`, which is not consumed.
    pub fn consume_attribute_value(&mut self, quote: u8) -> Result<TextRange<'a>, SyntaxError> {
        let start = self.pos;
        loop {
            let byte = self.peek_byte()?;
            if byte == quote {
                break;
            }
            if byte == b'<' {
                return Err(self.illegal_here(Some(char::from(quote).to_string())));
            }
            self.next_xml_char()?;
        }
        Ok(self.slice(start..self.pos))
    }

    /// Consume valid chars until `terminator` starts; the terminator itself is not consumed.
    pub fn consume_chars_until(&mut self, terminator: &[u8]) -> Result<TextRange<'a>, SyntaxError> {
        let start = self.pos;
        while !self.upcoming(terminator) {
            self.next_xml_char()?;
        }
        Ok(self.slice(start..self.pos))
    }

    /// Comment content: like [consume_chars_until](CharIter::consume_chars_until) with `-->`,
    /// but a `--` anywhere inside the comment is illegal.
    pub fn consume_comment(&mut self) -> Result<TextRange<'a>, SyntaxError> {
        let start = self.pos;
        while !self.upcoming(b"-->") {
            if self.upcoming(b"--") {
                return Err(IllegalToken { range: self.error_range(self.pos..self.pos + 2), expected: None });
            }
            self.next_xml_char()?;
        }
        Ok(self.slice(start..self.pos))
    }

    /// Create a TextRange using a byte range of the underlying text.
    pub fn slice(&self, range: Range<usize>) -> TextRange<'a> {
        TextRange { start: range.start, end: range.end, slice: &self.text[range] }
    }

    /// Capture the text region that caused an error as an owned string
    pub fn error_range(&self, range: Range<usize>) -> ErrorRange {
        error_range_of(self.text, range)
    }

    /// IllegalToken pointing at the character under the cursor
    fn illegal_here(&self, expected: Option<String>) -> SyntaxError {
        match self.text[self.pos..].chars().next() {
            Some(c) => IllegalToken { range: self.error_range(self.pos..self.pos + c.len_utf8()), expected },
            None => UnexpectedEndOfFile,
        }
    }
}

/// Row and column of a byte offset, counting columns in chars.
pub fn error_pos_of(text: &str, pos: usize) -> ErrorPos {
    let before = &text[..pos.min(text.len())];
    let row = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    ErrorPos { row, col: before[line_start..].chars().count() + 1 }
}

pub fn error_range_of(text: &str, range: Range<usize>) -> ErrorRange {
    let end = range.end.min(text.len());
    let start = range.start.min(end);
    ErrorRange { pos: error_pos_of(text, start), text: text[start..end].to_string() }
}
