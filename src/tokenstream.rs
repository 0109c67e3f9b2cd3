use crate::token::XmlToken;

pub struct TokenStream<'a> {
    pos: usize,
    tokens: Vec<XmlToken<'a>>,
}

impl Default for TokenStream<'_> {
    fn default() -> Self {
        TokenStream { pos: 0, tokens: vec![] }
    }
}

impl<'a> From<Vec<XmlToken<'a>>> for TokenStream<'a> {
    fn from(tokens: Vec<XmlToken<'a>>) -> Self {
        TokenStream { pos: 0, tokens }
    }
}

impl<'a> TokenStream<'a> {
    pub fn next(&mut self) -> Option<XmlToken<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    pub fn peek(&self) -> Option<XmlToken<'a>> {
        self.tokens.get(self.pos).copied()
    }
}
