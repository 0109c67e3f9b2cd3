/// A slice of the tokenizer input together with its byte offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextRange<'a> {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) slice: &'a str,
}

impl<'a> TextRange<'a> {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
