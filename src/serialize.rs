use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::node::XmlNode;
use crate::util::{escape_attribute, escape_text};

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Options controlling the textual form.
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Emit the XML declaration line. Defaults to `true`.
    pub declaration: bool,
    /// Indentation per nesting level; `None` writes the tree on a single line.
    pub indent: Option<String>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions { declaration: true, indent: None }
    }
}

impl SerializeOptions {
    /// Canonical single-line form.
    pub fn compact() -> Self {
        SerializeOptions::default()
    }

    /// One tab per nesting level.
    pub fn pretty() -> Self {
        SerializeOptions::default().indent("\t")
    }

    #[must_use]
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    #[must_use]
    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = Some(indent.to_string());
        self
    }
}

/// Canonical textual form of the subtree at `node`.
pub fn serialize(node: &XmlNode) -> String {
    serialize_with_options(node, &SerializeOptions::compact())
}

/// Like [serialize], with newlines and one tab per nesting level.
/// Only whitespace between markup differs from the canonical form.
pub fn pretty_print(node: &XmlNode) -> String {
    serialize_with_options(node, &SerializeOptions::pretty())
}

pub fn serialize_with_options(node: &XmlNode, options: &SerializeOptions) -> String {
    let mut out = String::new();
    if options.declaration {
        out.push_str(XML_DECLARATION);
        out.push('\n');
    }
    write_node(node, &mut out, options.indent.as_deref(), 0);
    out
}

/// Write the textual form of `node` into `writer`.
pub fn write_to<W: Write>(node: &XmlNode, mut writer: W, options: &SerializeOptions) -> Result<()> {
    let text = serialize_with_options(node, options);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    debug!("wrote {} bytes", text.len());
    Ok(())
}

/// Create (or truncate) the file at `path` and write `node` into it.
pub fn write_file(node: &XmlNode, path: impl AsRef<Path>, options: &SerializeOptions) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_to(node, BufWriter::new(file), options)?;
    debug!("saved document to {}", path.display());
    Ok(())
}

fn write_node(node: &XmlNode, out: &mut String, indent: Option<&str>, depth: usize) {
    match node {
        XmlNode::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        XmlNode::Element(_) => {
            let tag = node.tag();
            out.push('<');
            out.push_str(tag);
            for (key, value) in node.attributes() {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
            out.push('>');

            let text = node.text();
            if let Some(text) = text {
                out.push_str(&escape_text(text));
            }
            for (i, child) in node.children().iter().enumerate() {
                // the first child follows non-empty text directly, so the text stays untouched
                let glued = i == 0 && text.map_or(false, |text| !text.is_empty());
                if let (Some(indent), false) = (indent, glued) {
                    newline(out, indent, depth + 1);
                }
                write_node(child, out, indent, depth + 1);
            }
            if let (Some(indent), false) = (indent, node.is_empty()) {
                newline(out, indent, depth);
            }

            // never the `<tag/>` shorthand
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn newline(out: &mut String, indent: &str, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(indent);
    }
}
