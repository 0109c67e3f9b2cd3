use crate::textrange::TextRange;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XmlToken<'a> {
    Text(TextRange<'a>),
    StartTag(TextRange<'a>),
    EmptyElementTag(TextRange<'a>),
    EndTag(TextRange<'a>),
    CdataSection(TextRange<'a>),
    Comment(TextRange<'a>),
    ProcessingInstruction { target_range: TextRange<'a>, opt_value_range: Option<TextRange<'a>> },
    Attribute { name_range: TextRange<'a>, value_range: TextRange<'a> },
}
