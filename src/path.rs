//! A restricted path language for finding nodes in a tree.
//!
//! ```text
//! path      ::= ('/' | '//')? step (('/' | '//') step)*
//! step      ::= test predicate*
//! test      ::= '.' | '*' | 'comment()' | Name
//! predicate ::= '[' ( '@' Name ( '=' quoted )? | Name | position ) ']'
//! ```
//!
//! `//` selects descendants at any depth. A path with a leading `/` or `//` is absolute: it is
//! evaluated from a virtual document node whose only child is the node the query runs on.
//! Relative paths start at the node itself. Results come in document order, without duplicates.

use std::collections::HashSet;
use std::ptr;

use log::warn;

use crate::error::{Result, XmlError};
use crate::node::XmlNode;
use crate::xmlchar::is_xml_name;

#[derive(Debug, Clone, PartialEq)]
pub struct PathQuery {
    absolute: bool,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq)]
struct Step {
    descendants: bool,
    test: NodeTest,
    predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, PartialEq)]
enum NodeTest {
    Tag(String),
    AnyElement,
    SelfNode,
    Comment,
}

#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    HasAttribute(String),
    AttributeEquals(String, String),
    HasChild(String),
    /// 1-based
    Position(usize),
}

/// Where a step is evaluated: the virtual document above the root, or a real node.
#[derive(Clone, Copy)]
enum Context<'a> {
    Document(&'a XmlNode),
    Node(&'a XmlNode),
}

impl PathQuery {
    pub fn compile(path: &str) -> Result<PathQuery> {
        PathCompiler { path, pos: 0 }.compile()
    }

    /// Compile for lookups that treat a bad path as "no match".
    pub(crate) fn compile_lenient(path: &str) -> Option<PathQuery> {
        match PathQuery::compile(path) {
            Ok(query) => Some(query),
            Err(err) => {
                warn!("{}, matching nothing", err);
                None
            }
        }
    }

    pub fn find_all<'a>(&self, root: &'a XmlNode) -> Vec<&'a XmlNode> {
        let mut contexts = vec![if self.absolute { Context::Document(root) } else { Context::Node(root) }];
        for step in &self.steps {
            let mut matched = HashSet::new();
            for context in contexts {
                step.select(context, &mut matched);
            }
            contexts = in_document_order(root, &matched).into_iter().map(Context::Node).collect();
            if contexts.is_empty() {
                break;
            }
        }
        contexts.into_iter()
            .filter_map(|context| match context {
                Context::Node(node) => Some(node),
                Context::Document(_) => None,
            })
            .collect()
    }

    pub fn find_first<'a>(&self, root: &'a XmlNode) -> Option<&'a XmlNode> {
        self.find_all(root).into_iter().next()
    }

    /// Position of the first match in a walk of `root`.
    pub(crate) fn first_ordinal(&self, root: &XmlNode) -> Option<usize> {
        let first = self.find_first(root)?;
        root.walk().position(|node| ptr::eq(node, first))
    }
}

impl Step {
    fn select<'a>(&self, context: Context<'a>, matched: &mut HashSet<*const XmlNode>) {
        let parents = if self.descendants { descendants_or_self(context) } else { vec![context] };
        for parent in parents {
            let mut candidates: Vec<&XmlNode> = match (&self.test, parent) {
                (NodeTest::SelfNode, Context::Node(node)) => vec![node],
                (NodeTest::SelfNode, Context::Document(_)) => vec![],
                (test, parent) => children_of(parent).filter(|child| test.matches(child)).collect(),
            };
            for predicate in &self.predicates {
                candidates = predicate.filter(candidates);
            }
            matched.extend(candidates.into_iter().map(|node| node as *const XmlNode));
        }
    }
}

impl NodeTest {
    fn matches(&self, node: &XmlNode) -> bool {
        match self {
            NodeTest::Tag(tag) => node.is_element() && node.tag() == tag,
            NodeTest::AnyElement => node.is_element(),
            NodeTest::Comment => node.is_comment(),
            NodeTest::SelfNode => true,
        }
    }
}

impl Predicate {
    fn filter<'a>(&self, candidates: Vec<&'a XmlNode>) -> Vec<&'a XmlNode> {
        match self {
            Predicate::Position(position) => candidates.into_iter().nth(position - 1).into_iter().collect(),
            Predicate::HasAttribute(key) => candidates.into_iter()
                .filter(|node| node.get_attribute(key).is_some())
                .collect(),
            Predicate::AttributeEquals(key, value) => candidates.into_iter()
                .filter(|node| node.get_attribute(key) == Some(value.as_str()))
                .collect(),
            Predicate::HasChild(tag) => candidates.into_iter()
                .filter(|node| node.children().iter().any(|child| child.is_element() && child.tag() == tag))
                .collect(),
        }
    }
}

fn children_of<'a>(context: Context<'a>) -> impl Iterator<Item = &'a XmlNode> {
    let children = match context {
        Context::Document(root) => std::slice::from_ref(root),
        Context::Node(node) => node.children(),
    };
    children.iter()
}

fn descendants_or_self<'a>(context: Context<'a>) -> Vec<Context<'a>> {
    match context {
        Context::Document(root) => std::iter::once(context)
            .chain(root.walk().map(Context::Node))
            .collect(),
        Context::Node(node) => node.walk().map(Context::Node).collect(),
    }
}

fn in_document_order<'a>(root: &'a XmlNode, matched: &HashSet<*const XmlNode>) -> Vec<&'a XmlNode> {
    if matched.is_empty() {
        return vec![];
    }
    root.walk()
        .filter(|node| matched.contains(&(*node as *const XmlNode)))
        .collect()
}

struct PathCompiler<'a> {
    path: &'a str,
    pos: usize,
}

impl<'a> PathCompiler<'a> {
    fn compile(mut self) -> Result<PathQuery> {
        if self.path.is_empty() {
            return Err(self.error("empty path"));
        }
        let mut absolute = false;
        let mut descendants = false;
        if self.eat("//") {
            absolute = true;
            descendants = true;
        } else if self.eat("/") {
            absolute = true;
        }

        let mut steps = vec![];
        loop {
            steps.push(self.step(descendants)?);
            if self.rest().is_empty() {
                break;
            }
            if self.eat("//") {
                descendants = true;
            } else if self.eat("/") {
                descendants = false;
            } else {
                return Err(self.error(&format!("unexpected `{}`", self.rest())));
            }
        }
        Ok(PathQuery { absolute, steps })
    }

    fn step(&mut self, descendants: bool) -> Result<Step> {
        let test = if self.eat("comment()") {
            NodeTest::Comment
        } else if self.rest().starts_with("..") {
            return Err(self.error("parent steps are not supported"));
        } else if self.eat(".") {
            NodeTest::SelfNode
        } else if self.eat("*") {
            NodeTest::AnyElement
        } else {
            NodeTest::Tag(self.name()?)
        };

        let mut predicates = vec![];
        while self.eat("[") {
            predicates.push(self.predicate()?);
            if !self.eat("]") {
                return Err(self.error("missing `]`"));
            }
        }
        Ok(Step { descendants, test, predicates })
    }

    fn predicate(&mut self) -> Result<Predicate> {
        if self.eat("@") {
            let key = self.name()?;
            if !self.eat("=") {
                return Ok(Predicate::HasAttribute(key));
            }
            let quote = match self.rest().chars().next() {
                Some(quote @ '\'') | Some(quote @ '"') => quote,
                _ => return Err(self.error("attribute value must be quoted")),
            };
            self.pos += 1;
            let len = self.rest().find(quote).ok_or_else(|| self.error("unterminated attribute value"))?;
            let value = self.rest()[..len].to_string();
            self.pos += len + 1;
            return Ok(Predicate::AttributeEquals(key, value));
        }

        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            let position = self.rest()[..digits].parse::<usize>()
                .map_err(|_| self.error("position out of range"))?;
            if position == 0 {
                return Err(self.error("positions start at 1"));
            }
            self.pos += digits;
            return Ok(Predicate::Position(position));
        }
        Ok(Predicate::HasChild(self.name()?))
    }

    fn name(&mut self) -> Result<String> {
        let len = self.rest()
            .find(|c: char| matches!(c, '/' | '[' | ']' | '=' | '@'))
            .unwrap_or_else(|| self.rest().len());
        let name = &self.rest()[..len];
        if !is_xml_name(name) {
            return Err(self.error(&format!("`{}` is not a valid name", name)));
        }
        self.pos += len;
        Ok(name.to_string())
    }

    fn rest(&self) -> &'a str {
        &self.path[self.pos..]
    }

    fn eat(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn error(&self, reason: &str) -> XmlError {
        XmlError::InvalidPath { path: self.path.to_string(), reason: reason.to_string() }
    }
}
