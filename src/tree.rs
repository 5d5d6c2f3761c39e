//! The DOM: a tree of tagged nodes and the event sink that builds it.

use alloc::{
    borrow::ToOwned,
    string::String,
    vec,
    vec::Vec,
};
use core::fmt::{self, Write};
use core::str::FromStr;

use crate::{
    error::ParseError,
    event::{EventSink, ScalarKind},
    parser::{ParseStatus, Parser},
};

/// A node of the materialized document tree.
///
/// Composites exclusively own their children; the tree is finite and never
/// shares nodes. Object entries keep their source order, and duplicate keys
/// are retained — [`get`](Node::get) resolves to the first occurrence, while
/// serialization prints them all.
///
/// Parsing a complete document from a string goes through [`FromStr`]:
///
/// ```
/// use jsonbaud::Node;
///
/// let root: Node = r#"{ "a" : [1, true] }"#.parse().unwrap();
/// assert_eq!(root.get("a").and_then(|a| a.as_array()).map(Vec::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl Default for Node {
    fn default() -> Self {
        Self::Null
    }
}

impl Node {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Node>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Vec<(String, Node)>> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks a key up in an object node. With duplicate keys the first
    /// occurrence wins. Returns `None` on non-objects.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Escapes a string for inclusion in a serialized string literal: quote,
/// backslash, the short control escapes, and `\uXXXX` for the remaining
/// ASCII controls.
fn write_escaped(src: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{0008}' => f.write_str("\\b")?,
            '\u{000C}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_ascii_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Node::Number(n) => write!(f, "{n}"),
            Node::String(s) => {
                f.write_str("\"")?;
                write_escaped(s, f)?;
                f.write_str("\"")
            }
            Node::Array(items) => {
                f.write_str("[")?;
                let mut first = true;
                for item in items {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Node::Object(entries) => {
                f.write_str("{")?;
                let mut first = true;
                for (key, value) in entries {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped(key, f)?;
                    f.write_str("\" : ")?;
                    write!(f, "{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// One-shot convenience over the whole stack: feed, close, and drive the
/// parser with a [`TreeBuilder`] until a decision is reached.
impl FromStr for Node {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new();
        let mut tree = TreeBuilder::new();
        parser.feed(text);
        parser.close();
        loop {
            match parser.parse(&mut tree)? {
                ParseStatus::Complete => return Ok(tree.into_root().unwrap_or(Node::Null)),
                ParseStatus::Pending => {}
            }
        }
    }
}

/// A frame of the build stack: the composite currently accepting children,
/// or the key of an object entry waiting for its value.
#[derive(Debug)]
enum Frame {
    /// The preloaded wrapper that ends up holding the document root.
    Root(Option<Node>),
    Object(Vec<(String, Node)>),
    /// A key whose value has not been attached yet.
    Entry(String),
    Array(Vec<Node>),
}

/// [`EventSink`] that assembles a [`Node`] tree.
///
/// The builder keeps an explicit stack of nodes under construction, rooted
/// in a wrapper frame. An entry frame pushed by a key is popped as soon as
/// its value attaches, so the top of the stack is always the composite
/// currently accepting children; after a successful parse the stack is back
/// to the root wrapper alone, now holding one child.
///
/// Events must arrive in the order the parser produces them; the builder
/// panics on sequences no parse can generate.
#[derive(Debug)]
pub struct TreeBuilder {
    stack: Vec<Frame>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![Frame::Root(None)],
        }
    }

    /// The completed document, if a parse has attached one.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        match self.stack.first() {
            Some(Frame::Root(slot)) => slot.as_ref(),
            _ => None,
        }
    }

    /// Consumes the builder and hands the document over.
    #[must_use]
    pub fn into_root(mut self) -> Option<Node> {
        match self.stack.drain(..).next() {
            Some(Frame::Root(slot)) => slot,
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Hands a finished node to the frame below; a pending entry frame is
    /// popped so the enclosing object is back on top afterwards.
    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(Frame::Root(slot)) => *slot = Some(node),
            Some(Frame::Array(items)) => items.push(node),
            Some(Frame::Entry(_)) => {
                let Some(Frame::Entry(key)) = self.stack.pop() else {
                    unreachable!()
                };
                match self.stack.last_mut() {
                    Some(Frame::Object(entries)) => entries.push((key, node)),
                    _ => unreachable!("entry frames sit on object frames"),
                }
            }
            Some(Frame::Object(_)) => unreachable!("object values are keyed"),
            None => unreachable!("the root frame outlives the build"),
        }
    }
}

/// Classifies a scalar event into a leaf node: quoted text stays a string;
/// bare literals resolve case-insensitively to the keyword constants, and
/// anything else is read as an IEEE-754 double (unparseable text degrades
/// to 0.0, as `strtod` would).
fn scalar(text: &str, kind: ScalarKind) -> Node {
    match kind {
        ScalarKind::String => Node::String(text.to_owned()),
        ScalarKind::Literal => {
            if text.eq_ignore_ascii_case("true") {
                Node::Bool(true)
            } else if text.eq_ignore_ascii_case("false") {
                Node::Bool(false)
            } else if text.eq_ignore_ascii_case("null") {
                Node::Null
            } else {
                Node::Number(text.parse().unwrap_or(0.0))
            }
        }
    }
}

impl EventSink for TreeBuilder {
    fn object_start(&mut self) {
        self.stack.push(Frame::Object(Vec::new()));
    }

    fn key(&mut self, name: &str) {
        self.stack.push(Frame::Entry(name.to_owned()));
    }

    fn object_value(&mut self, text: &str, kind: ScalarKind) {
        self.attach(scalar(text, kind));
    }

    fn object_end(&mut self) {
        let Some(Frame::Object(entries)) = self.stack.pop() else {
            unreachable!("object end without an open object")
        };
        self.attach(Node::Object(entries));
    }

    fn array_start(&mut self) {
        self.stack.push(Frame::Array(Vec::new()));
    }

    fn array_value(&mut self, text: &str, kind: ScalarKind) {
        self.attach(scalar(text, kind));
    }

    fn array_end(&mut self) {
        let Some(Frame::Array(items)) = self.stack.pop() else {
            unreachable!("array end without an open array")
        };
        self.attach(Node::Array(items));
    }
}
