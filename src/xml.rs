//! Minimal XML element tree for registry responses.
//!
//! Responses are small, so the whole body is read into an in-memory tree
//! built from the `quick-xml` event stream and then queried by element
//! name. Only elements and text are kept; declarations, comments,
//! processing instructions and attributes are dropped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

/// Errors raised while building an [`XmlDocument`].
#[derive(Debug, Clone, Error)]
pub enum XmlParseError {
    /// The underlying reader rejected the input.
    #[error("XML syntax error: {reason}")]
    Syntax {
        /// Reader message including byte position
        reason: String,
    },

    /// Input contained no element at all.
    #[error("XML document has no root element")]
    NoRootElement,

    /// A second top-level element or stray text followed the root.
    #[error("unexpected content outside the root element: {content}")]
    ContentOutsideRoot {
        /// Offending element name or text preview
        content: String,
    },

    /// Input ended while an element was still open.
    #[error("element <{name}> is never closed")]
    Unclosed {
        /// Name of the innermost open element
        name: String,
    },
}

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Nested element.
    Element(XmlElement),
    /// Character data (text or CDATA), already unescaped.
    Text(String),
}

/// An element with its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Creates an element with no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Appends a child element, returning `self` for chaining.
    #[must_use]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Appends a text node, returning `self` for chaining.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Qualified element name as written in the source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Direct child elements in document order (text nodes skipped).
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Concatenated text of this element and all of its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Element(element) => element.collect_text(out),
                XmlNode::Text(text) => out.push_str(text),
            }
        }
    }

    /// This element and its descendants named `name`, in document order.
    #[must_use]
    pub fn elements_by_name<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            out.push(self);
        }
        for child in self.child_elements() {
            child.collect_named(name, out);
        }
    }
}

/// A parsed, well-formed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Wraps an already-built element tree.
    #[must_use]
    pub fn from_root(root: XmlElement) -> Self {
        Self { root }
    }

    /// Parses a complete XML document.
    ///
    /// # Errors
    ///
    /// Returns [`XmlParseError`] when the input is not a single well-formed
    /// element tree.
    pub fn parse(source: &str) -> Result<Self, XmlParseError> {
        let mut reader = Reader::from_str(source);
        let mut open: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event().map_err(|e| XmlParseError::Syntax {
                reason: format!("{e} (at byte {})", reader.buffer_position()),
            })?;

            match event {
                Event::Start(start) => {
                    let element = XmlElement::new(element_name(&start)?);
                    if open.is_empty() && root.is_some() {
                        return Err(XmlParseError::ContentOutsideRoot {
                            content: format!("<{}>", element.name),
                        });
                    }
                    open.push(element);
                }
                Event::Empty(start) => {
                    let element = XmlElement::new(element_name(&start)?);
                    attach(&mut open, &mut root, element)?;
                }
                Event::End(_) => {
                    let Some(element) = open.pop() else {
                        return Err(XmlParseError::Syntax {
                            reason: "closing tag without matching opening tag".to_string(),
                        });
                    };
                    attach(&mut open, &mut root, element)?;
                }
                Event::Text(text) => {
                    let value = text.unescape().map_err(|e| XmlParseError::Syntax {
                        reason: e.to_string(),
                    })?;
                    push_text(&mut open, &value)?;
                }
                Event::CData(cdata) => {
                    let value = String::from_utf8(cdata.into_inner().into_owned()).map_err(|e| {
                        XmlParseError::Syntax {
                            reason: format!("CDATA is not valid UTF-8: {e}"),
                        }
                    })?;
                    push_text(&mut open, &value)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(element) = open.pop() {
            return Err(XmlParseError::Unclosed { name: element.name });
        }

        root.map(Self::from_root).ok_or(XmlParseError::NoRootElement)
    }

    /// The document element.
    #[must_use]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Every element named `name`, in document order.
    #[must_use]
    pub fn elements_by_name<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        self.root.elements_by_name(name)
    }
}

fn element_name(start: &BytesStart<'_>) -> Result<String, XmlParseError> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|e| XmlParseError::Syntax {
            reason: format!("element name is not valid UTF-8: {e}"),
        })
}

fn attach(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlParseError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(XmlNode::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlParseError::ContentOutsideRoot {
            content: format!("<{}>", element.name),
        });
    }
    *root = Some(element);
    Ok(())
}

fn push_text(open: &mut [XmlElement], text: &str) -> Result<(), XmlParseError> {
    match open.last_mut() {
        Some(parent) => {
            // Adjacent text and CDATA runs merge into one node.
            if let Some(XmlNode::Text(existing)) = parent.children.last_mut() {
                existing.push_str(text);
            } else {
                parent.children.push(XmlNode::Text(text.to_string()));
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlParseError::ContentOutsideRoot {
            content: text.trim().chars().take(40).collect(),
        }),
    }
}
