use std::env;

use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use etree_rust::{parse_file, pretty_print, write_file, Attributes, Result, SerializeOptions, XmlNode};

/// Builds the robot specification document, saves it, loads it back and edits it.
fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Debug).init().ok();

    let path = env::args().nth(1).unwrap_or_else(|| "robot-specification.xml".to_string());

    let mut root = XmlNode::element("robot-specification", [("version", "1.0"), ("creation-date", "01/12/2023")]);
    root.sub_element("serial-number", Attributes::new())?
        .set_text("09372937-3bf1-454b-857b-ecca1dbe87a0")?;
    let usage = root.sub_element("usage-information", [("restricted-usage", "false"), ("standard-compliance", "high")])?;
    for purpose in ["manufacturing", "high precision operations", "micro mechanics"] {
        usage.sub_element("usage-purpose", Attributes::new())?.set_text(purpose)?;
    }
    root.append(XmlNode::comment("all purposes were tested on the production line"))?;

    write_file(&root, &path, &SerializeOptions::pretty())?;
    println!("{}", pretty_print(&root));

    let mut loaded = parse_file(&path)?;
    for purpose in loaded.find_all(".//usage-information/*") {
        info!("usage purpose: {}", purpose.text().unwrap_or_default());
    }
    info!("comments after reload: {}", loaded.find_all(".//comment()").len());

    if let Some(usage) = loaded.find_first_mut("usage-information") {
        usage.remove_child_at(2)?;
        usage.remove_child_at(1)?;
        let mut health = XmlNode::element("usage-purpose", Attributes::new());
        health.set_text("health")?;
        usage.insert_child(0, health)?;
        usage.sub_element("usage-purpose", Attributes::new())?.set_text("robotics")?;
        usage.set_attribute("restricted-usage", "true")?;
    }
    println!("{}", pretty_print(&loaded));
    Ok(())
}
