//! Response parsing
//!
//! Elements are matched on local names only, so the parser does not care which
//! prefix the service picked for its namespace.

use crate::error::Result;
use crate::models::{SoapUser, UsersPage};
use quick_xml::events::Event;
use quick_xml::Reader;

const UNKNOWN_FAULT: &str = "Unknown SOAP fault";

/// Minimal element tree of a response
#[derive(Debug, Default)]
struct Node {
    name: String,
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn find(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find_map(|child| if child.name == name { Some(child) } else { child.find(name) })
    }

    fn find_all<'a>(&'a self, name: &str, found: &mut Vec<&'a Node>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            } else {
                child.find_all(name, found);
            }
        }
    }

    fn child_text(&self, name: &str) -> Option<String> {
        self.children
            .iter()
            .find(|child| child.name == name)
            .map(|child| child.text.clone())
            .filter(|text| !text.is_empty())
    }
}

fn parse_tree(xml: &str) -> Result<Node> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Node::default()];
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Node {
                name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
                ..Default::default()
            }),
            Event::Empty(empty) => {
                let node = Node {
                    name: String::from_utf8_lossy(empty.local_name().as_ref()).into_owned(),
                    ..Default::default()
                };
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    if let Some(node) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(node);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // Unclosed elements still count
    while stack.len() > 1 {
        if let Some(node) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                parent.children.push(node);
            }
        }
    }
    Ok(stack.pop().unwrap_or_default())
}

fn user_from(node: &Node) -> SoapUser {
    SoapUser {
        id: node.child_text("id"),
        username: node.child_text("username"),
        currency: node.child_text("currency"),
        firstname: node.child_text("firstname"),
        surname: node.child_text("surname"),
        photo: node.child_text("photo"),
        photo_small: node.child_text("photoSmall"),
        full_name: node.child_text("fullName"),
        friendship_status: node.child_text("friendshipStatus"),
    }
}

/// First `user` element of the response
pub fn parse_user(xml: &str) -> Result<Option<SoapUser>> {
    Ok(parse_tree(xml)?.find("user").map(user_from))
}

/// Every `user` element of the response, in document order
pub fn parse_users(xml: &str) -> Result<Vec<SoapUser>> {
    let root = parse_tree(xml)?;
    let mut nodes = Vec::new();
    root.find_all("user", &mut nodes);
    Ok(nodes.into_iter().map(user_from).collect())
}

/// Users plus paging counters; a missing counter reads as 0
pub fn parse_users_page(xml: &str) -> Result<UsersPage> {
    let root = parse_tree(xml)?;
    let mut nodes = Vec::new();
    root.find_all("user", &mut nodes);

    let number = |name: &str| {
        root.find(name)
            .and_then(|node| node.text.trim().parse::<i64>().ok())
            .unwrap_or(0)
    };

    Ok(UsersPage {
        users: nodes.into_iter().map(user_from).collect(),
        size: number("size"),
        number: number("number"),
        total_elements: number("totalElements"),
        total_pages: number("totalPages"),
    })
}

/// Fault string of a SOAP fault, `None` when the response is not a fault
pub fn parse_fault(xml: &str) -> Result<Option<String>> {
    let root = parse_tree(xml)?;
    Ok(root.find("Fault").map(|fault| {
        fault
            .child_text("faultstring")
            .unwrap_or_else(|| UNKNOWN_FAULT.to_string())
    }))
}
