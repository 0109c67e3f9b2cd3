use std::fs;

use xmlparser::{ElementEnd, Token, Tokenizer};

use etree_rust::{parse, parse_file, pretty_print, read_from, serialize, serialize_with_options, write_file, write_to};
use etree_rust::{Attributes, SerializeOptions, XmlNode};

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

fn sample() -> XmlNode {
    let mut root = XmlNode::element("a", [("z", "1"), ("b", "2")]);
    root.sub_element("b", Attributes::new()).unwrap().set_text("x").unwrap();
    root.sub_element("c", Attributes::new()).unwrap();
    root.append(XmlNode::comment("note")).unwrap();
    root
}

#[test]
pub fn test_canonical_form() {
    let expected = format!("{}<a z=\"1\" b=\"2\"><b>x</b><c></c><!--note--></a>", DECLARATION);
    assert_eq!(expected, serialize(&sample()));
}

#[test]
pub fn test_pretty_form() {
    let expected = format!("{}<a z=\"1\" b=\"2\">\n\t<b>x</b>\n\t<c></c>\n\t<!--note-->\n</a>", DECLARATION);
    assert_eq!(expected, pretty_print(&sample()));
}

#[test]
pub fn test_pretty_nesting() {
    let mut root = XmlNode::element("a", Attributes::new());
    root.sub_element("b", Attributes::new()).unwrap()
        .sub_element("c", Attributes::new()).unwrap();
    let expected = format!("{}<a>\n\t<b>\n\t\t<c></c>\n\t</b>\n</a>", DECLARATION);
    assert_eq!(expected, pretty_print(&root));
}

#[test]
pub fn test_pretty_keeps_text_untouched() {
    let mut root = XmlNode::element("a", Attributes::new());
    root.set_text("t").unwrap();
    root.sub_element("b", Attributes::new()).unwrap();
    root.sub_element("c", Attributes::new()).unwrap();
    let pretty = pretty_print(&root);
    assert_eq!(format!("{}<a>t<b></b>\n\t<c></c>\n</a>", DECLARATION), pretty);
    assert_eq!(root, parse(&pretty).unwrap());
}

#[test]
pub fn test_pretty_and_canonical_parse_to_same_tree() {
    let expected = parse(&serialize(&sample())).unwrap();
    assert_eq!(expected, parse(&pretty_print(&sample())).unwrap());
}

#[test]
pub fn test_empty_element_is_never_self_closing() {
    let root = XmlNode::element("empty", Attributes::new());
    assert_eq!(format!("{}<empty></empty>", DECLARATION), serialize(&root));

    let xml = serialize(&sample());
    for token in Tokenizer::from(xml.as_str()) {
        if let Token::ElementEnd { end: ElementEnd::Empty, .. } = token.unwrap() {
            panic!("self-closing tag in canonical form");
        }
    }
}

#[test]
pub fn test_tokens_of_canonical_form() {
    let xml = serialize(&sample());
    let mut comments = vec![];
    let mut declarations = 0;
    for token in Tokenizer::from(xml.as_str()) {
        match token.unwrap() {
            Token::Comment { text, .. } => comments.push(text.as_str().to_string()),
            Token::Declaration { .. } => declarations += 1,
            _ => {}
        }
    }
    assert_eq!(vec!["note".to_string()], comments);
    assert_eq!(1, declarations);
}

#[test]
pub fn test_escaping() {
    let mut root = XmlNode::element("a", [("q", "say \"hi\" & <bye>\n")]);
    root.set_text("1 < 2 && 3 > 2").unwrap();
    let xml = serialize(&root);
    assert!(xml.contains("q=\"say &quot;hi&quot; &amp; &lt;bye&gt;&#10;\""));
    assert!(xml.contains(">1 &lt; 2 &amp;&amp; 3 &gt; 2<"));
    assert_eq!(root, parse(&xml).unwrap());
}

#[test]
pub fn test_other_parsers_agree() {
    let xml = pretty_print(&sample());
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let root = doc.root_element();
    assert_eq!("a", root.tag_name().name());
    assert_eq!(Some("1"), root.attribute("z"));
    assert_eq!(Some("2"), root.attribute("b"));

    let tree = sample();
    let theirs: Vec<&str> = root.descendants().filter(|n| n.is_element()).map(|n| n.tag_name().name()).collect();
    let ours: Vec<&str> = tree.walk().filter(|n| n.is_element()).map(|n| n.tag()).collect();
    assert_eq!(vec!["a", "b", "c"], theirs);
    assert_eq!(ours, theirs);
    assert_eq!(1, root.descendants().filter(|n| n.is_comment()).count());
}

#[test]
pub fn test_without_declaration() {
    let options = SerializeOptions::default().declaration(false);
    assert_eq!("<a z=\"1\" b=\"2\"><b>x</b><c></c><!--note--></a>", serialize_with_options(&sample(), &options));

    let options = SerializeOptions::compact().declaration(false).indent("  ");
    assert_eq!("<c></c>", serialize_with_options(&XmlNode::element("c", Attributes::new()), &options));
}

#[test]
pub fn test_comment_alone() {
    assert_eq!(format!("{}<!--only-->", DECLARATION), serialize(&XmlNode::comment("only")));
}

#[test]
pub fn test_write_to_and_read_from() {
    let mut buffer = vec![];
    write_to(&sample(), &mut buffer, &SerializeOptions::pretty()).unwrap();
    assert_eq!(pretty_print(&sample()).into_bytes(), buffer);

    let parsed = read_from(buffer.as_slice()).unwrap();
    assert_eq!(parse(&serialize(&sample())).unwrap(), parsed);
}

#[test]
pub fn test_file_round_trip() {
    let path = std::env::temp_dir().join(format!("etree_rust_{}_round_trip.xml", std::process::id()));
    write_file(&sample(), &path, &SerializeOptions::pretty()).unwrap();
    let loaded = parse_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(parse(&serialize(&sample())).unwrap(), loaded);
}

#[test]
pub fn test_missing_file() {
    let path = std::env::temp_dir().join(format!("etree_rust_{}_missing.xml", std::process::id()));
    assert!(matches!(parse_file(&path), Err(etree_rust::XmlError::Io(_))));
}
