use crate::attributes::Attributes;
use crate::error::{Result, XmlError};
use crate::path::PathQuery;
use crate::walk::Walk;
use crate::xmlchar::{is_xml_name, XmlChar};

static NO_ATTRIBUTES: Attributes = Attributes::new();

/// A node of an element tree: either an element or a comment.
///
/// Children are owned by value, so a tree can never contain cycles or shared nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(Element),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) attributes: Attributes,
    pub(crate) text: Option<String>,
    pub(crate) children: Vec<XmlNode>,
}

impl Drop for Element {
    // flatten the subtree first, so dropping deep trees does not recurse
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            if let XmlNode::Element(element) = &mut node {
                pending.append(&mut element.children);
            }
        }
    }
}

impl XmlNode {
    pub fn element(tag: impl Into<String>, attributes: impl Into<Attributes>) -> XmlNode {
        XmlNode::Element(Element {
            tag: tag.into(),
            attributes: attributes.into(),
            text: None,
            children: vec![],
        })
    }

    pub fn comment(text: impl Into<String>) -> XmlNode {
        XmlNode::Comment(text.into())
    }

    /// Create an element, append it to `self` and return it.
    pub fn sub_element(&mut self, tag: impl Into<String>, attributes: impl Into<Attributes>) -> Result<&mut XmlNode> {
        let child = XmlNode::element(tag, attributes);
        let children = self.children_vec_mut()?;
        child.validate()?;
        children.push(child);
        let last = children.len() - 1;
        Ok(&mut children[last])
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, XmlNode::Comment(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, XmlNode::Element(_))
    }

    /// Tag name of an element, the empty string for comments.
    pub fn tag(&self) -> &str {
        match self {
            XmlNode::Element(element) => &element.tag,
            XmlNode::Comment(_) => "",
        }
    }

    /// Direct text content of an element. Always `None` for comments, see [comment_text](XmlNode::comment_text).
    pub fn text(&self) -> Option<&str> {
        match self {
            XmlNode::Element(element) => element.text.as_deref(),
            XmlNode::Comment(_) => None,
        }
    }

    pub fn comment_text(&self) -> Option<&str> {
        match self {
            XmlNode::Comment(text) => Some(text.as_str()),
            XmlNode::Element(_) => None,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let element = self.element_mut()?;
        check_chars(&text)?;
        element.text = Some(text);
        Ok(())
    }

    pub fn clear_text(&mut self) -> Result<()> {
        self.element_mut()?.text = None;
        Ok(())
    }

    /// Attributes of an element; comments have none.
    pub fn attributes(&self) -> &Attributes {
        match self {
            XmlNode::Element(element) => &element.attributes,
            XmlNode::Comment(_) => &NO_ATTRIBUTES,
        }
    }

    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes().get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let (key, value) = (key.into(), value.into());
        let element = self.element_mut()?;
        check_name(&key)?;
        check_chars(&value)?;
        element.attributes.set(key, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.element_mut()?.attributes.remove(key))
    }

    /// Immediate children in insertion order.
    pub fn children(&self) -> &[XmlNode] {
        match self {
            XmlNode::Element(element) => &element.children,
            XmlNode::Comment(_) => &[],
        }
    }

    /// Number of immediate children.
    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    pub fn child_at(&self, index: usize) -> Result<&XmlNode> {
        let children = self.children();
        children.get(index).ok_or(XmlError::IndexOutOfRange { index, len: children.len() })
    }

    pub fn child_at_mut(&mut self, index: usize) -> Result<&mut XmlNode> {
        let len = self.len();
        match self {
            XmlNode::Element(element) => element.children.get_mut(index).ok_or(XmlError::IndexOutOfRange { index, len }),
            XmlNode::Comment(_) => Err(XmlError::IndexOutOfRange { index, len }),
        }
    }

    pub fn append(&mut self, child: XmlNode) -> Result<()> {
        let children = self.children_vec_mut()?;
        child.validate()?;
        children.push(child);
        Ok(())
    }

    /// Insert `child` before the child currently at `index`. An index equal to the child count appends.
    pub fn insert_child(&mut self, index: usize, child: XmlNode) -> Result<()> {
        let children = self.children_vec_mut()?;
        if index > children.len() {
            return Err(XmlError::IndexOutOfRange { index, len: children.len() });
        }
        child.validate()?;
        children.insert(index, child);
        Ok(())
    }

    /// Detach and return the child at `index`.
    pub fn remove_child_at(&mut self, index: usize) -> Result<XmlNode> {
        let len = self.len();
        match self {
            XmlNode::Element(element) if index < len => Ok(element.children.remove(index)),
            _ => Err(XmlError::IndexOutOfRange { index, len }),
        }
    }

    /// Check that this node, not counting its children, can be written out and parsed back:
    /// tag and attribute keys are XML names, text and values hold only XML characters and a
    /// comment neither contains `--` nor ends in `-`.
    ///
    /// Nodes are checked whenever they are attached to a parent, so only a root made with
    /// [element](XmlNode::element) or [comment](XmlNode::comment) needs an explicit call.
    pub fn validate(&self) -> Result<()> {
        match self {
            XmlNode::Element(element) => {
                check_name(&element.tag)?;
                for (key, value) in &element.attributes {
                    check_name(key)?;
                    check_chars(value)?;
                }
                element.text.as_deref().map_or(Ok(()), check_chars)
            }
            XmlNode::Comment(text) => {
                check_chars(text)?;
                if text.contains("--") || text.ends_with('-') {
                    return Err(XmlError::InvalidComment { text: text.clone() });
                }
                Ok(())
            }
        }
    }

    /// Depth-first pre-order traversal of this node and all its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// First node matching `path` in document order. An invalid path matches nothing.
    pub fn find_first(&self, path: &str) -> Option<&XmlNode> {
        PathQuery::compile_lenient(path)?.find_first(self)
    }

    pub fn find_first_mut(&mut self, path: &str) -> Option<&mut XmlNode> {
        let ordinal = PathQuery::compile_lenient(path)?.first_ordinal(self)?;
        self.nth_in_document_order_mut(ordinal)
    }

    /// Every node matching `path`, in document order. An invalid path matches nothing.
    pub fn find_all(&self, path: &str) -> Vec<&XmlNode> {
        match PathQuery::compile_lenient(path) {
            Some(query) => query.find_all(self),
            None => vec![],
        }
    }

    /// The node [walk](XmlNode::walk) yields at position `n`.
    pub(crate) fn nth_in_document_order_mut(&mut self, mut n: usize) -> Option<&mut XmlNode> {
        if n == 0 {
            return Some(self);
        }
        n -= 1;
        match self {
            XmlNode::Element(element) => {
                for child in element.children.iter_mut() {
                    let size = child.walk().count();
                    if n < size {
                        return child.nth_in_document_order_mut(n);
                    }
                    n -= size;
                }
                None
            }
            XmlNode::Comment(_) => None,
        }
    }

    fn element_mut(&mut self) -> Result<&mut Element> {
        match self {
            XmlNode::Element(element) => Ok(element),
            XmlNode::Comment(_) => Err(XmlError::InvalidTarget),
        }
    }

    fn children_vec_mut(&mut self) -> Result<&mut Vec<XmlNode>> {
        match self {
            XmlNode::Element(element) => Ok(&mut element.children),
            XmlNode::Comment(_) => Err(XmlError::InvalidParent),
        }
    }
}

fn check_name(name: &str) -> Result<()> {
    if !is_xml_name(name) {
        return Err(XmlError::InvalidName { name: name.to_string() });
    }
    Ok(())
}

fn check_chars(text: &str) -> Result<()> {
    match text.chars().find(|c| !c.is_xml_char()) {
        Some(c) => Err(XmlError::InvalidCharacter { c }),
        None => Ok(()),
    }
}
