//! Event stream production for opinion documents.
//!
//! The scanner consumes a flat stream of start/end/text events rather than
//! a DOM; this module produces that stream with the html5ever tokenizer.
//! Two normalizations happen here so the scanner never thinks about them:
//! adjacent character tokens merge into one `Text` event, and a
//! self-closing start tag expands into a start event followed by an end
//! event for the same name. Tag and attribute names arrive already
//! lowercased by the tokenizer.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// One flat markup event.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupEvent {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Text(String),
}

impl MarkupEvent {
    pub fn start(name: &str, attrs: &[(&str, &str)]) -> Self {
        MarkupEvent::Start {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn end(name: &str) -> Self {
        MarkupEvent::End {
            name: name.to_string(),
        }
    }

    pub fn text(text: &str) -> Self {
        MarkupEvent::Text(text.to_string())
    }
}

/// Attribute lookup by name.
pub fn attr_value<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[derive(Default)]
struct EventCollector {
    events: RefCell<Vec<MarkupEvent>>,
}

impl EventCollector {
    fn push_text(&self, text: &str) {
        let mut events = self.events.borrow_mut();
        if let Some(MarkupEvent::Text(existing)) = events.last_mut() {
            existing.push_str(text);
            return;
        }
        events.push(MarkupEvent::Text(text.to_string()));
    }

    fn push_tag(&self, tag: Tag) {
        let name = tag.name.to_string();
        match tag.kind {
            TagKind::StartTag => {
                let attrs = tag
                    .attrs
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                let mut events = self.events.borrow_mut();
                events.push(MarkupEvent::Start {
                    name: name.clone(),
                    attrs,
                });
                if tag.self_closing {
                    events.push(MarkupEvent::End { name });
                }
            }
            TagKind::EndTag => {
                self.events.borrow_mut().push(MarkupEvent::End { name });
            }
        }
    }
}

impl TokenSink for EventCollector {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        log::trace!(target: "folio.opinion", "token: {:?}", token);
        match token {
            Token::CharacterTokens(text) => self.push_text(&text),
            Token::TagToken(tag) => self.push_tag(tag),
            // Recoverable tokenizer complaints; the source is sloppy and
            // the reference renderer shrugs these off too.
            Token::ParseError(_) => {}
            Token::NullCharacterToken
            | Token::DoctypeToken(_)
            | Token::CommentToken(_)
            | Token::EOFToken => {}
        }
        TokenSinkResult::Continue
    }
}

/// Tokenizes an HTML document into scanner events.
pub fn tokenize(html: &str) -> Vec<MarkupEvent> {
    let tokenizer = Tokenizer::new(EventCollector::default(), TokenizerOpts::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&input);
    tokenizer.end();
    tokenizer.sink.events.into_inner()
}
