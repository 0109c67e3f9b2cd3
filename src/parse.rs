use std::fs;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::attributes::Attributes;
use crate::chariter::error_range_of;
use crate::error::{ErrorRange, Result, SyntaxError};
use crate::error::SyntaxError::{DuplicateAttribute, MissingRootElement, NonMatchingTags, UnexpectedEndOfFile, UnexpectedXmlToken};
use crate::node::{Element, XmlNode};
use crate::textrange::TextRange;
use crate::token::XmlToken;
use crate::tokenize::XmlTokenizer;
use crate::tokenstream::TokenStream;
use crate::util::{normalize_line_endings, unescape};
use crate::xmlchar::is_blank;

/// Builds an element tree from its textual form.
///
/// Comments are recognized and dropped, so the returned tree never contains comment nodes.
/// Processing instructions (including the XML declaration) are dropped as well.
#[derive(Debug, Default)]
pub struct XmlParser {}

/// A run of character data inside one element.
struct TextRun {
    text: String,
    cdata: bool,
}

/// An element whose end tag has not been reached yet.
struct OpenElement<'a> {
    name: TextRange<'a>,
    element: Element,
    runs: Vec<TextRun>,
    has_markup: bool,
}

impl XmlParser {
    pub fn parse(&self, xml: &str) -> Result<XmlNode> {
        let tokens = XmlTokenizer::default().tokenize(xml)?;
        let root = Self::parse_document(xml, &mut TokenStream::from(tokens))?;
        debug!("parsed document <{}> with {} nodes", root.tag(), root.walk().count());
        Ok(root)
    }

    /// document ::= prolog element Misc*
    /// [https://www.w3.org/TR/xml/#sec-documents]
    fn parse_document<'a>(xml: &'a str, tokens: &mut TokenStream<'a>) -> std::result::Result<XmlNode, SyntaxError> {
        let mut root = None;
        while let Some(token) = tokens.next() {
            match token {
                XmlToken::StartTag(name) | XmlToken::EmptyElementTag(name) if root.is_none() => {
                    let is_empty = matches!(token, XmlToken::EmptyElementTag(_));
                    root = Some(Self::parse_element(xml, tokens, name, is_empty)?);
                }
                XmlToken::Comment(_) | XmlToken::ProcessingInstruction { .. } => {}
                XmlToken::Text(range) if is_blank(range.slice) => {}
                XmlToken::Text(range) |
                XmlToken::StartTag(range) |
                XmlToken::EmptyElementTag(range) |
                XmlToken::EndTag(range) |
                XmlToken::CdataSection(range) |
                XmlToken::Attribute { name_range: range, .. } => {
                    return Err(UnexpectedXmlToken { range: error_range(xml, range) });
                }
            }
        }
        root.ok_or(MissingRootElement)
    }

    /// element ::= EmptyElemTag | STag content ETag
    /// [https://www.w3.org/TR/xml/#NT-element]
    ///
    /// Nested elements are kept on an explicit stack, so nesting depth is bounded by memory
    /// rather than by the call stack.
    fn parse_element<'a>(xml: &'a str, tokens: &mut TokenStream<'a>, name: TextRange<'a>, is_empty: bool) -> std::result::Result<XmlNode, SyntaxError> {
        let mut open = OpenElement::new(name, Self::parse_attributes(xml, tokens)?);
        if is_empty {
            return Ok(open.close());
        }
        let mut ancestors: Vec<OpenElement> = vec![];
        loop {
            Self::parse_element_content(xml, tokens, &mut open)?;
            // parse_element_content stops at a start tag or at the end tag of `open`
            match tokens.next().ok_or(UnexpectedEndOfFile)? {
                XmlToken::StartTag(child_name) => {
                    let child = OpenElement::new(child_name, Self::parse_attributes(xml, tokens)?);
                    ancestors.push(std::mem::replace(&mut open, child));
                }
                XmlToken::EndTag(end_name) => {
                    if end_name.slice != open.name.slice {
                        return Err(NonMatchingTags {
                            start_tag: error_range(xml, open.name),
                            end_tag: error_range(xml, end_name),
                        });
                    }
                    let closed = open.close();
                    match ancestors.pop() {
                        Some(parent) => {
                            open = parent;
                            open.element.children.push(closed);
                        }
                        None => return Ok(closed),
                    }
                }
                token => return Err(UnexpectedXmlToken { range: error_range(xml, token_range(token)) }),
            }
        }
    }

    fn parse_attributes<'a>(xml: &'a str, tokens: &mut TokenStream<'a>) -> std::result::Result<Attributes, SyntaxError> {
        let mut attributes = Attributes::new();
        while let Some(XmlToken::Attribute { name_range, value_range }) = tokens.peek() {
            tokens.next();
            if attributes.contains_key(name_range.slice) {
                return Err(DuplicateAttribute { range: error_range(xml, name_range) });
            }
            let value = unescape(xml, value_range, true)?;
            attributes.set(name_range.slice, value);
        }
        Ok(attributes)
    }

    /// content ::= CharData? ((element | Reference | CDSect | PI | Comment) CharData?)*
    /// [https://www.w3.org/TR/xml/#sec-starttags]
    ///
    /// Consumes content of `open` up to, not including, the next start tag or end tag.
    fn parse_element_content<'a>(xml: &'a str, tokens: &mut TokenStream<'a>, open: &mut OpenElement<'a>) -> std::result::Result<(), SyntaxError> {
        loop {
            match tokens.peek().ok_or(UnexpectedEndOfFile)? {
                XmlToken::StartTag(_) => {
                    open.has_markup = true;
                    return Ok(());
                }
                XmlToken::EndTag(_) => return Ok(()),
                XmlToken::EmptyElementTag(child_name) => {
                    tokens.next();
                    let child = OpenElement::new(child_name, Self::parse_attributes(xml, tokens)?);
                    open.element.children.push(child.close());
                    open.has_markup = true;
                }
                XmlToken::Text(range) => {
                    tokens.next();
                    open.runs.push(TextRun { text: unescape(xml, range, false)?.into_owned(), cdata: false });
                }
                XmlToken::CdataSection(range) => {
                    tokens.next();
                    open.runs.push(TextRun { text: normalize_line_endings(range.slice).into_owned(), cdata: true });
                }
                XmlToken::Comment(_) | XmlToken::ProcessingInstruction { .. } => {
                    tokens.next();
                    open.has_markup = true;
                }
                XmlToken::Attribute { name_range, .. } => {
                    return Err(UnexpectedXmlToken { range: error_range(xml, name_range) });
                }
            }
        }
    }
}

impl<'a> OpenElement<'a> {
    fn new(name: TextRange<'a>, attributes: Attributes) -> Self {
        OpenElement {
            name,
            element: Element {
                tag: name.slice.to_string(),
                attributes,
                text: None,
                children: vec![],
            },
            runs: vec![],
            has_markup: false,
        }
    }

    fn close(self) -> XmlNode {
        let OpenElement { mut element, runs, has_markup, .. } = self;
        // between child markup, whitespace-only character data is formatting
        let text: String = runs.into_iter()
            .filter(|run| run.cdata || !has_markup || !is_blank(&run.text))
            .map(|run| run.text)
            .collect();
        if !text.is_empty() {
            element.text = Some(text);
        }
        XmlNode::Element(element)
    }
}

fn token_range(token: XmlToken) -> TextRange {
    match token {
        XmlToken::Text(range) |
        XmlToken::StartTag(range) |
        XmlToken::EmptyElementTag(range) |
        XmlToken::EndTag(range) |
        XmlToken::CdataSection(range) |
        XmlToken::Comment(range) => range,
        XmlToken::ProcessingInstruction { target_range, .. } => target_range,
        XmlToken::Attribute { name_range, .. } => name_range,
    }
}

fn error_range(xml: &str, range: TextRange) -> ErrorRange {
    error_range_of(xml, range.start..range.end)
}

/// Parse a textual form into its root element.
pub fn parse(xml: &str) -> Result<XmlNode> {
    XmlParser::default().parse(xml)
}

/// Read all of `reader` and parse it.
pub fn read_from<R: Read>(mut reader: R) -> Result<XmlNode> {
    let mut xml = String::new();
    reader.read_to_string(&mut xml)?;
    parse(&xml)
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<XmlNode> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    debug!("loaded {} bytes from {}", xml.len(), path.display());
    parse(&xml)
}
