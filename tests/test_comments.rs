use etree_rust::parse::XmlParser;
use etree_rust::{parse, serialize, Attributes, XmlError, XmlNode};

fn commented_tree() -> XmlNode {
    let mut root = XmlNode::element("root", Attributes::new());
    root.append(XmlNode::comment(" first ")).unwrap();
    let child = root.sub_element("child", [("k", "v")]).unwrap();
    child.append(XmlNode::comment("nested")).unwrap();
    child.sub_element("leaf", Attributes::new()).unwrap().set_text("text").unwrap();
    root.append(XmlNode::comment("last")).unwrap();
    root
}

#[test]
pub fn test_comment_is_serialized() {
    let xml = serialize(&commented_tree());
    assert!(xml.contains("<!-- first -->"));
    assert!(xml.contains("<!--nested-->"));
    assert!(xml.contains("<!--last-->"));
}

#[test]
pub fn test_parser_drops_comments() {
    let parsed = parse(&serialize(&commented_tree())).unwrap();
    assert!(parsed.walk().all(|node| !node.is_comment()));
    assert!(parsed.find_all(".//comment()").is_empty());

    let mut expected = XmlNode::element("root", Attributes::new());
    expected.sub_element("child", [("k", "v")]).unwrap()
        .sub_element("leaf", Attributes::new()).unwrap()
        .set_text("text").unwrap();
    assert_eq!(expected, parsed);
}

#[test]
pub fn test_comments_outside_root_are_dropped() {
    let xml = "<!-- before --><root><!-- inside --></root><!-- after -->";
    let root = XmlParser::default().parse(xml).unwrap();
    assert_eq!(XmlNode::element("root", Attributes::new()), root);
}

#[test]
pub fn test_whitespace_around_comments_is_formatting() {
    let root = XmlParser::default().parse("<root>\n\t<!-- note -->\n</root>").unwrap();
    assert_eq!(None, root.text());
    assert!(root.is_empty());
}

#[test]
pub fn test_double_hyphen_is_illegal() {
    let err = XmlParser::default().parse("<root><!-- a -- b --></root>").unwrap_err();
    assert_eq!("--", err.syntax().unwrap().target());
}

#[test]
pub fn test_comment_node_shape() {
    let comment = XmlNode::comment("note");
    assert!(comment.is_comment());
    assert!(!comment.is_element());
    assert_eq!("", comment.tag());
    assert_eq!(None, comment.text());
    assert_eq!(Some("note"), comment.comment_text());
    assert!(comment.attributes().is_empty());
    assert!(comment.children().is_empty());
    assert_eq!(None, comment.get_attribute("any"));
    assert_eq!(1, comment.walk().count());
}

#[test]
pub fn test_comment_rejects_element_operations() {
    let mut comment = XmlNode::comment("note");
    assert!(matches!(comment.set_attribute("k", "v"), Err(XmlError::InvalidTarget)));
    assert!(matches!(comment.remove_attribute("k"), Err(XmlError::InvalidTarget)));
    assert!(matches!(comment.set_text("text"), Err(XmlError::InvalidTarget)));
    assert!(matches!(comment.clear_text(), Err(XmlError::InvalidTarget)));
    assert!(matches!(comment.sub_element("child", Attributes::new()), Err(XmlError::InvalidParent)));
    assert!(matches!(comment.append(XmlNode::comment("x")), Err(XmlError::InvalidParent)));
    assert!(matches!(comment.insert_child(0, XmlNode::comment("x")), Err(XmlError::InvalidParent)));
    assert!(matches!(comment.remove_child_at(0), Err(XmlError::IndexOutOfRange { index: 0, len: 0 })));
    assert!(matches!(comment.child_at(0), Err(XmlError::IndexOutOfRange { index: 0, len: 0 })));

    // nothing changed
    assert_eq!(XmlNode::comment("note"), comment);
}
