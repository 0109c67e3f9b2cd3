use std::iter::FusedIterator;

use crate::node::XmlNode;

/// Lazy depth-first pre-order iterator over a subtree, created by [XmlNode::walk].
///
/// Each walk owns its own stack, so walks over the same tree are independent.
pub struct Walk<'a> {
    stack: Vec<&'a XmlNode>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(root: &'a XmlNode) -> Self {
        Walk { stack: vec![root] }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a XmlNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // reversed, so the first child is popped next
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

impl FusedIterator for Walk<'_> {}
