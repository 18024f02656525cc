//! Element trees for XML transcripts.
//!
//! [`TagTree`] mirrors the shape of the source markup: each element keeps
//! its attributes, its child elements, the text that immediately follows
//! its start tag, and the tail text between its end tag and the next
//! sibling. Keeping the tail on the child rather than the parent is what
//! lets the page walker decide how a run of text joins the page: a tail
//! that begins with punctuation belongs to the word before it.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ExtractError, ExtractResult};

/// One element of a parsed document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagTree {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<TagTree>,
    pub text: Option<String>,
    pub tail: Option<String>,
}

impl TagTree {
    pub fn new(tag: impl Into<String>) -> Self {
        TagTree {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: set the text following the start tag.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: set the tail following the end tag.
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    /// Builder: append a child element.
    pub fn child(mut self, child: TagTree) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute lookup by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Parses an XML document into its element tree.
    ///
    /// Text between elements is attached in document order: to the parent's
    /// `text` slot while the parent has no children yet, afterwards to the
    /// last child's `tail`. Comments, processing instructions and the
    /// prolog are skipped; text outside the root element is dropped.
    pub fn parse(xml: &str) -> ExtractResult<TagTree> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<TagTree> = Vec::new();
        let mut root: Option<TagTree> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    stack.push(element_from(&e));
                }
                Ok(Event::Empty(e)) => {
                    let node = element_from(&e);
                    close_element(node, &mut stack, &mut root)?;
                }
                Ok(Event::End(_)) => {
                    let node = stack.pop().ok_or_else(|| {
                        ExtractError::Parse("close tag without matching open".to_string())
                    })?;
                    close_element(node, &mut stack, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| ExtractError::Parse(format!("bad text node: {}", err)))?;
                    append_text(&mut stack, &text);
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    append_text(&mut stack, &text);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => return Err(ExtractError::Parse(format!("xml error: {}", err))),
            }
        }

        if let Some(open) = stack.last() {
            return Err(ExtractError::Parse(format!(
                "unclosed element: {}",
                open.tag
            )));
        }
        root.ok_or_else(|| ExtractError::Parse("no root element".to_string()))
    }
}

fn element_from(e: &BytesStart) -> TagTree {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut node = TagTree::new(tag);
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        node.attributes.insert(key, value);
    }
    node
}

fn close_element(
    node: TagTree,
    stack: &mut Vec<TagTree>,
    root: &mut Option<TagTree>,
) -> ExtractResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None => {
            if root.is_some() {
                return Err(ExtractError::Parse("multiple root elements".to_string()));
            }
            *root = Some(node);
            Ok(())
        }
    }
}

fn append_text(stack: &mut [TagTree], text: &str) {
    if let Some(parent) = stack.last_mut() {
        let slot = match parent.children.last_mut() {
            Some(last_child) => &mut last_child.tail,
            None => &mut parent.text,
        };
        match slot {
            Some(existing) => existing.push_str(text),
            None => *slot = Some(text.to_string()),
        }
    }
}
