use etree_rust::{parse, serialize, Attributes, XmlError, XmlNode};

fn leaf(tag: &str) -> XmlNode {
    XmlNode::element(tag, Attributes::new())
}

fn tags(node: &XmlNode) -> Vec<&str> {
    node.children().iter().map(|child| child.tag()).collect()
}

fn abc() -> XmlNode {
    let mut root = leaf("root");
    for tag in ["a", "b", "c"] {
        root.append(leaf(tag)).unwrap();
    }
    root
}

#[test]
pub fn test_insert_at_front_and_middle() {
    let mut root = abc();
    root.insert_child(0, leaf("first")).unwrap();
    root.insert_child(2, leaf("middle")).unwrap();
    assert_eq!(vec!["first", "a", "middle", "b", "c"], tags(&root));
}

#[test]
pub fn test_insert_at_len_appends() {
    let mut root = abc();
    root.insert_child(3, leaf("d")).unwrap();
    assert_eq!(vec!["a", "b", "c", "d"], tags(&root));

    let mut empty = leaf("empty");
    empty.insert_child(0, leaf("only")).unwrap();
    assert_eq!(vec!["only"], tags(&empty));
}

#[test]
pub fn test_insert_past_end() {
    let mut root = abc();
    let err = root.insert_child(4, leaf("d")).unwrap_err();
    assert!(matches!(err, XmlError::IndexOutOfRange { index: 4, len: 3 }));
    assert_eq!(abc(), root);
}

#[test]
pub fn test_remove_returns_detached_child() {
    let mut root = abc();
    root.child_at_mut(1).unwrap().set_text("inner").unwrap();

    let removed = root.remove_child_at(1).unwrap();
    assert_eq!("b", removed.tag());
    assert_eq!(Some("inner"), removed.text());
    assert_eq!(vec!["a", "c"], tags(&root));
}

#[test]
pub fn test_remove_out_of_range() {
    let mut root = abc();
    assert!(matches!(root.remove_child_at(3), Err(XmlError::IndexOutOfRange { index: 3, len: 3 })));
    assert!(matches!(leaf("empty").remove_child_at(0), Err(XmlError::IndexOutOfRange { index: 0, len: 0 })));
    assert_eq!(abc(), root);
}

#[test]
pub fn test_remove_then_insert_restores() {
    let mut root = abc();
    for index in 0..3 {
        let child = root.remove_child_at(index).unwrap();
        root.insert_child(index, child).unwrap();
        assert_eq!(abc(), root);
    }
}

#[test]
pub fn test_child_at() {
    let mut root = abc();
    assert_eq!("c", root.child_at(2).unwrap().tag());
    assert!(matches!(root.child_at(3), Err(XmlError::IndexOutOfRange { index: 3, len: 3 })));
    assert!(matches!(root.child_at_mut(5), Err(XmlError::IndexOutOfRange { index: 5, len: 3 })));
}

#[test]
pub fn test_subtree_moves_between_parents() {
    let mut source = abc();
    source.child_at_mut(0).unwrap().append(leaf("grandchild")).unwrap();
    let mut target = leaf("target");

    let moved = source.remove_child_at(0).unwrap();
    target.append(moved).unwrap();

    assert_eq!(vec!["b", "c"], tags(&source));
    assert_eq!(vec!["a", "grandchild"], target.find_all(".//*").iter().map(|node| node.tag()).collect::<Vec<_>>());
}

#[test]
pub fn test_set_attribute_overwrites_in_place() {
    let mut node = XmlNode::element("item", [("first", "1"), ("second", "2")]);
    node.set_attribute("first", "one").unwrap();
    node.set_attribute("third", "3").unwrap();

    assert_eq!(Some("one"), node.get_attribute("first"));
    assert_eq!(3, node.attributes().len());
    assert_eq!("<item first=\"one\" second=\"2\" third=\"3\"></item>", serialize(&node).lines().last().unwrap());
}

#[test]
pub fn test_remove_attribute() {
    let mut node = XmlNode::element("item", [("key", "value")]);
    assert_eq!(Some("value".to_string()), node.remove_attribute("key").unwrap());
    assert_eq!(None, node.remove_attribute("key").unwrap());
    assert!(node.attributes().is_empty());
}

#[test]
pub fn test_set_and_clear_text() {
    let mut node = leaf("item");
    assert_eq!(None, node.text());
    node.set_text("").unwrap();
    assert_eq!(Some(""), node.text());
    node.set_text("value").unwrap();
    assert_eq!(Some("value"), node.text());
    node.clear_text().unwrap();
    assert_eq!(None, node.text());
}

#[test]
pub fn test_sub_element_returns_new_child() {
    let mut root = leaf("root");
    root.sub_element("child", [("id", "1")]).unwrap()
        .sub_element("grandchild", Attributes::new()).unwrap();

    let child = root.child_at(0).unwrap();
    assert_eq!(Some("1"), child.get_attribute("id"));
    assert_eq!(vec!["grandchild"], tags(child));
}

#[test]
pub fn test_find_first_mut_edits_match() {
    let mut root = parse("<root><a><b/></a><b id=\"2\"/></root>").unwrap();
    root.find_first_mut("b").unwrap().set_attribute("seen", "yes").unwrap();
    root.find_first_mut("//b").unwrap().set_text("deep").unwrap();

    assert_eq!(Some("yes"), root.child_at(1).unwrap().get_attribute("seen"));
    assert_eq!(Some("deep"), root.find_first("a/b").unwrap().text());
    assert!(root.find_first_mut("missing").is_none());
    assert!(root.find_first_mut("a[").is_none());
}

#[test]
pub fn test_find_first_mut_self() {
    let mut root = leaf("root");
    root.find_first_mut(".").unwrap().set_text("self").unwrap();
    assert_eq!(Some("self"), root.text());
}

#[test]
pub fn test_usage_purposes_rearranged() {
    let mut usage = leaf("usage-information");
    for purpose in ["manufacturing", "high precision operations", "micro mechanics"] {
        usage.sub_element("usage-purpose", Attributes::new()).unwrap().set_text(purpose).unwrap();
    }

    usage.remove_child_at(2).unwrap();
    usage.remove_child_at(1).unwrap();
    let mut health = leaf("usage-purpose");
    health.set_text("health").unwrap();
    usage.insert_child(0, health).unwrap();
    usage.sub_element("usage-purpose", Attributes::new()).unwrap().set_text("robotics").unwrap();

    let purposes: Vec<_> = usage.children().iter().filter_map(|child| child.text()).collect();
    assert_eq!(vec!["health", "manufacturing", "robotics"], purposes);
}
