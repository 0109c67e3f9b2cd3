use log::trace;

use crate::chariter::CharIter;
use crate::error::SyntaxError;
use crate::error::SyntaxError::UnexpectedXmlToken;
use crate::token::XmlToken;
use crate::token::XmlToken::*;
use crate::xmlchar::XmlByte;

#[derive(Default)]
pub struct XmlTokenizer<'a> {
    pub(crate) cs: CharIter<'a>,
}

impl<'a> XmlTokenizer<'a> {
    pub fn tokenize(&mut self, xml: &'a str) -> Result<Vec<XmlToken<'a>>, SyntaxError> {
        self.cs = CharIter::new(xml);
        let tokens = self.tokenize_markup()?;
        trace!("tokenized {} bytes into {} tokens", xml.len(), tokens.len());
        Ok(tokens)
    }

    /// Aka element content
    /// content	:= CharData? ((element | Reference | CDSect | PI | Comment) CharData?)*
    /// [https://www.w3.org/TR/xml/#sec-starttags]
    fn tokenize_markup(&mut self) -> Result<Vec<XmlToken<'a>>, SyntaxError> {
        let cs = &mut self.cs;
        // average token length of ~20 bytes
        let mut tokens = Vec::with_capacity(cs.text.len() / 20);
        while cs.has_next() {
            let text_range = cs.consume_character_data_until(b'<')?;
            if !text_range.is_empty() {
                tokens.push(Text(text_range));
            }
            if !cs.has_next() {
                break;
            }
            if cs.upcoming(b"</") {
                tokens.push(Self::tokenize_end_tag(cs)?);
            } else if cs.upcoming(b"<!--") {
                tokens.push(Self::tokenize_comment(cs)?);
            } else if cs.upcoming(b"<![CDATA[") {
                tokens.push(Self::tokenize_cdata_section(cs)?);
            } else if cs.upcoming(b"<!") {
                // DOCTYPE and friends are not supported
                let start = cs.pos();
                return Err(UnexpectedXmlToken { range: cs.error_range(start..start + 2) });
            } else if cs.upcoming(b"<?") {
                tokens.push(Self::tokenize_processing_instruction(cs)?);
            } else {
                Self::tokenize_start_tag(cs, &mut tokens)?;
            }
        }
        Ok(tokens)
    }

    /// STag ::= '<' Name (S Attribute)* S? '>'
    /// EmptyElemTag ::= '<' Name (S Attribute)* S? '/>'
    /// [https://www.w3.org/TR/xml/#sec-starttags]
    fn tokenize_start_tag(cs: &mut CharIter<'a>, tokens: &mut Vec<XmlToken<'a>>) -> Result<(), SyntaxError> {
        // tag start has already been identified
        cs.skip_over(b"<");
        let name_range = cs.consume_name()?;
        let tag_index = tokens.len();
        tokens.push(StartTag(name_range));

        let mut spaced = Self::skip_spaces_counted(cs);
        while !cs.upcoming(b"/>") && !cs.upcoming(b">") {
            if !spaced {
                // attributes must be separated from the name and from each other
                cs.expect_spaces()?;
            }
            tokens.push(Self::tokenize_attribute(cs)?);
            spaced = Self::skip_spaces_counted(cs);
        }

        if cs.upcoming(b"/>") {
            cs.skip_over(b"/>");
            tokens[tag_index] = EmptyElementTag(name_range);
        } else {
            cs.expect_byte(b'>')?;
        }
        Ok(())
    }

    /// ETag ::= '</' Name S? '>'
    /// [https://www.w3.org/TR/xml/#sec-starttags]
    fn tokenize_end_tag(cs: &mut CharIter<'a>) -> Result<XmlToken<'a>, SyntaxError> {
        cs.skip_over(b"</");
        let name_range = cs.consume_name()?;
        cs.skip_spaces();
        cs.expect_byte(b'>')?;
        Ok(EndTag(name_range))
    }

    /// Attribute ::= Name Eq AttValue
    /// Eq ::= S? '=' S?
    /// [https://www.w3.org/TR/xml/#sec-starttags]
    fn tokenize_attribute(cs: &mut CharIter<'a>) -> Result<XmlToken<'a>, SyntaxError> {
        // spaces have already been skipped
        let name_range = cs.consume_name()?;
        cs.skip_spaces();
        cs.expect_byte(b'=')?;
        cs.skip_spaces();
        let quote = cs.peek_byte()?;
        if !quote.is_xml_quote() {
            return Err(SyntaxError::IllegalToken {
                range: cs.error_range(cs.pos()..cs.pos() + 1),
                expected: Some("\"".to_string()),
            });
        }
        cs.skip_over(b"\"");
        let value_range = cs.consume_attribute_value(quote)?;
        cs.skip_over(b"\"");
        Ok(Attribute { name_range, value_range })
    }

    /// CDSect ::= CDStart CData CDEnd
    /// CDStart	::= '<![CDATA['
    /// CData ::= (Char* - (Char* ']]>' Char*))
    /// CDEnd ::= ']]>'
    /// [https://www.w3.org/TR/xml/#sec-cdata-sect]
    fn tokenize_cdata_section(cs: &mut CharIter<'a>) -> Result<XmlToken<'a>, SyntaxError> {
        cs.skip_over(b"<![CDATA[");
        let value_range = cs.consume_chars_until(b"]]>")?;
        cs.skip_over(b"]]>");
        Ok(CdataSection(value_range))
    }

    /// Comment ::= '<!--' ((Char - '-') | ('-' (Char - '-')))* '-->'
    /// [https://www.w3.org/TR/xml/#sec-comments]
    fn tokenize_comment(cs: &mut CharIter<'a>) -> Result<XmlToken<'a>, SyntaxError> {
        cs.skip_over(b"<!--");
        let value_range = cs.consume_comment()?;
        cs.skip_over(b"-->");
        Ok(Comment(value_range))
    }

    /// PI ::= '<?' PITarget (S (Char* - (Char* '?>' Char*)))? '?>'
    /// [https://www.w3.org/TR/xml/#sec-pi]
    ///
    /// The XML declaration has the same shape and is tokenized as a PI with target `xml`.
    fn tokenize_processing_instruction(cs: &mut CharIter<'a>) -> Result<XmlToken<'a>, SyntaxError> {
        cs.skip_over(b"<?");
        let target_range = cs.consume_name()?;
        cs.skip_spaces();

        let mut opt_value_range = None;
        if !cs.upcoming(b"?>") {
            opt_value_range = Some(cs.consume_chars_until(b"?>")?);
        }

        cs.skip_over(b"?>");
        Ok(ProcessingInstruction { target_range, opt_value_range })
    }

    fn skip_spaces_counted(cs: &mut CharIter<'a>) -> bool {
        let start = cs.pos();
        cs.skip_spaces();
        cs.pos() != start
    }
}
