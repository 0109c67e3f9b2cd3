/// Character classes of the XML grammar.
pub trait XmlChar {
    fn is_xml_char(&self) -> bool;

    fn is_xml_name_start_char(&self) -> bool;

    fn is_xml_name_char(&self) -> bool;
}

/// Byte-level shortcuts for the ASCII part of the grammar.
pub trait XmlByte {
    fn is_xml_whitespace(&self) -> bool;

    fn is_xml_quote(&self) -> bool;
}

impl XmlChar for char {
    /// Char ::= #x9 | #xA | #xD | #x20-#xD7FF | #xE000-#xFFFD | #x10000-#x10FFFF
    /// [https://www.w3.org/TR/xml/#charsets]
    fn is_xml_char(&self) -> bool {
        matches!(self,
            '\u{9}' |
            '\u{A}' |
            '\u{D}' |
            '\u{20}'..='\u{D7FF}' |
            '\u{E000}'..='\u{FFFD}' |
            '\u{10000}'..='\u{10FFFF}')
    }

    /// NameStartChar ::= ":" | \[A-Z\] | "_" | \[a-z\] |
    /// \[#xC0-#xD6\] | \[#xD8-#xF6\] | \[#xF8-#x2FF | \[#x370-#x37D\] |
    /// \[#x37F-#x1FFF\] | \[#x200C-#x200D\] | \[#x2070-#x218F\] |
    /// \[#x2C00-#x2FEF\] | \[#x3001-#xD7FF\] | \[#xF900-#xFDCF\] |
    /// \[#xFDF0-#xFFFD\] | \[#x10000-#xEFFFF\]
    /// [https://www.w3.org/TR/xml/#sec-common-syn]
    fn is_xml_name_start_char(&self) -> bool {
        matches!(self,
            ':' | 'A'..='Z' | '_' | 'a'..='z' |
            '\u{C0}'..='\u{D6}' |
            '\u{D8}'..='\u{F6}' |
            '\u{F8}'..='\u{2FF}' |
            '\u{370}'..='\u{37D}' |
            '\u{37F}'..='\u{1FFF}' |
            '\u{200C}'..='\u{200D}' |
            '\u{2070}'..='\u{218F}' |
            '\u{2C00}'..='\u{2FEF}' |
            '\u{3001}'..='\u{D7FF}' |
            '\u{F900}'..='\u{FDCF}' |
            '\u{FDF0}'..='\u{FFFD}' |
            '\u{10000}'..='\u{EFFFF}')
    }

    /// NameChar ::= NameStartChar | "-" | "." | 0-9 |
    /// #xB7 | #x0300-#x036F | [#x203F-#x2040]
    /// [https://www.w3.org/TR/xml/#sec-common-syn]
    fn is_xml_name_char(&self) -> bool {
        self.is_xml_name_start_char() || matches!(self,
            '-' | '.' | '0'..='9' |
            '\u{B7}' |
            '\u{0300}'..='\u{036F}' |
            '\u{203F}'..='\u{2040}')
    }
}

impl XmlByte for u8 {
    /// S ::= (#x20 | #x9 | #xD | #xA)+
    /// [https://www.w3.org/TR/xml/#sec-common-syn]
    fn is_xml_whitespace(&self) -> bool {
        matches!(self, b' ' | b'\n' | b'\t' | b'\r')
    }

    /// AttValue ::= '"' ([^<&"] | Reference)* '"'| "'" ([^<&'] | Reference)* "'"
    /// [https://www.w3.org/TR/xml/#NT-AttValue]
    fn is_xml_quote(&self) -> bool {
        matches!(self, b'"' | b'\'')
    }
}

/// Whether `name` is a valid XML Name, used for tags and attribute keys outside the tokenizer.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_xml_name_start_char() => chars.all(|c| c.is_xml_name_char()),
        _ => false,
    }
}

/// Whether `text` consists of XML whitespace only (true for the empty string).
pub fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| b.is_xml_whitespace())
}
