//! Page buffers for the transcript walker.

use std::collections::BTreeMap;

/// Reconstructed page text, keyed by facsimile pointer or printed page
/// number. Ordered so persisted output is deterministic.
pub type PageMap = BTreeMap<String, String>;

/// Accumulates page text while a transcript tree is walked.
///
/// One of these is owned by a single extraction call and threaded through
/// the recursion; nothing about the accumulation is ambient. Until the
/// first page boundary arrives there is no current page and incoming text
/// is dropped.
///
/// The buffers hold normalized text between calls: words separated by
/// single spaces, paragraph breaks as single newlines, no trailing
/// whitespace. The append methods maintain that invariant so a finished
/// page needs only a final trim.
#[derive(Debug, Default)]
pub struct PageAccumulator {
    pages: PageMap,
    current: Option<String>,
}

impl PageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the page for `pointer` and makes it current. Seeing the same
    /// pointer twice restarts that page from empty.
    pub fn open_page(&mut self, pointer: &str) {
        self.pages.insert(pointer.to_string(), String::new());
        self.current = Some(pointer.to_string());
    }

    pub fn current_page(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Records a paragraph boundary. Boundaries before any content, and
    /// runs of consecutive boundaries, leave no mark.
    pub fn paragraph_break(&mut self) {
        if let Some(buf) = self.current_buffer() {
            if !buf.is_empty() && !buf.ends_with('\n') {
                buf.push('\n');
            }
        }
    }

    /// Appends a run of element text, collapsing its whitespace.
    pub fn push_words(&mut self, text: &str) {
        if let Some(buf) = self.current_buffer() {
            append_words(buf, text, true);
        }
    }

    /// Appends a run of tail text. In paragraph context a tail that starts
    /// with punctuation joins the preceding word directly (`, there` after
    /// `world` reads `world, there`); any other tail is a fresh word.
    pub fn push_tail(&mut self, text: &str, in_paragraph: bool) {
        if let Some(buf) = self.current_buffer() {
            let joins = in_paragraph
                && text
                    .trim_start()
                    .starts_with(|c: char| c.is_ascii_punctuation());
            if joins {
                truncate_trailing_whitespace(buf);
            }
            append_words(buf, text, !joins);
        }
    }

    /// Finalizes every page buffer.
    pub fn finish(mut self) -> PageMap {
        for text in self.pages.values_mut() {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
        }
        self.pages
    }

    fn current_buffer(&mut self) -> Option<&mut String> {
        match &self.current {
            Some(key) => self.pages.get_mut(key),
            None => None,
        }
    }
}

/// Appends `text` word by word. `separate` controls whether the first word
/// gets a separating space; words after a paragraph break never do.
fn append_words(buf: &mut String, text: &str, separate: bool) {
    let mut first = true;
    for word in text.split_whitespace() {
        let needs_space = if first {
            separate && !buf.is_empty() && !buf.ends_with('\n')
        } else {
            true
        };
        if needs_space {
            buf.push(' ');
        }
        buf.push_str(word);
        first = false;
    }
}

fn truncate_trailing_whitespace(buf: &mut String) {
    let trimmed = buf.trim_end().len();
    buf.truncate(trimmed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_before_first_page_is_dropped() {
        let mut acc = PageAccumulator::new();
        acc.push_words("preamble noise");
        acc.open_page("001");
        acc.push_words("kept");

        let pages = acc.finish();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages["001"], "kept");
    }

    #[test]
    fn test_words_are_space_joined() {
        let mut acc = PageAccumulator::new();
        acc.open_page("001");
        acc.push_words("  Hello \n  old  ");
        acc.push_words("friend");

        assert_eq!(acc.finish()["001"], "Hello old friend");
    }

    #[test]
    fn test_punctuation_tail_joins_previous_word() {
        let mut acc = PageAccumulator::new();
        acc.open_page("001");
        acc.push_words("Hello");
        acc.push_words("world");
        acc.push_tail(", there", true);

        assert_eq!(acc.finish()["001"], "Hello world, there");
    }

    #[test]
    fn test_punctuation_tail_outside_paragraph_stays_separate() {
        let mut acc = PageAccumulator::new();
        acc.open_page("001");
        acc.push_words("world");
        acc.push_tail(", there", false);

        assert_eq!(acc.finish()["001"], "world , there");
    }

    #[test]
    fn test_paragraph_breaks_do_not_stack() {
        let mut acc = PageAccumulator::new();
        acc.open_page("001");
        acc.paragraph_break();
        acc.push_words("one");
        acc.paragraph_break();
        acc.paragraph_break();
        acc.push_words("two");

        assert_eq!(acc.finish()["001"], "one\ntwo");
    }

    #[test]
    fn test_reopening_a_page_resets_it() {
        let mut acc = PageAccumulator::new();
        acc.open_page("001");
        acc.push_words("first pass");
        acc.open_page("002");
        acc.open_page("001");
        acc.push_words("second pass");

        let pages = acc.finish();
        assert_eq!(pages["001"], "second pass");
        assert_eq!(pages["002"], "");
    }

    #[test]
    fn test_empty_pages_survive() {
        let mut acc = PageAccumulator::new();
        acc.open_page("001");

        let pages = acc.finish();
        assert_eq!(pages["001"], "");
    }
}
