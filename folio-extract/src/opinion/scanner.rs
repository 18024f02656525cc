//! Event-driven scanner for opinion documents.
//!
//! # The High-Level Concept
//!
//! An opinion page renders the same case twice: once as a syllabus header
//! and once in full, each wrapped in a `div` whose id starts with the
//! region prefix. The scanner walks the flat event stream, ignores
//! everything outside those regions, and inside them attributes paragraph
//! text to printed pages. Page boundaries are `<a class="page-number">`
//! anchors: either the page id sits in a `name` attribute, or the anchor
//! wraps citation text (`Page 10 U. S. 207`) the scanner has to read.
//!
//! # State
//!
//! Everything that only means something inside a region lives in
//! [`RegionState`], carried by the [`Mode`] union, so a paragraph flag or
//! a pending page id cannot outlive its region. Tag balance is the one
//! piece of whole-document state: every tracked tag seen inside a region
//! counts up and down, and [`OpinionScanner::finish`] insists the books
//! balance before it hands over any text.

use std::collections::HashMap;

use crate::error::{ExtractError, ExtractResult};
use crate::opinion::events::{attr_value, MarkupEvent};
use crate::opinion::tags::{
    IGNORED_TAGS, LITERAL_TEXT_TAGS, PAGE_ANCHOR_CLASS, PAGE_ID_DELIMITERS, REGION_ID_PREFIX,
    TOLERANT_TAGS, TRACKED_TAGS, WILD_TAG_PREFIX,
};
use crate::pages::PageMap;

/// Regions a well-formed document renders: the syllabus duplicate and the
/// full opinion.
pub const EXPECTED_REGIONS: usize = 2;

/// Footnote references render as bracketed markers after a `</ul>`; once
/// armed, text chunks opening with `[` are cut back to their closing
/// bracket, swallowing whole chunks while the marker spans several.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FootnoteMode {
    Off,
    Armed,
    Erasing,
}

#[derive(Debug)]
struct Paragraph {
    /// No text written yet; the first write may owe a separating newline.
    first_write: bool,
}

#[derive(Debug)]
struct RegionState {
    /// `div` open count when the region began; closing back down to it
    /// ends the region.
    boundary_depth: i64,
    current_page: String,
    paragraph: Option<Paragraph>,
    /// `p` open count recorded when a bare page-number anchor started.
    /// Only text at the same count may resolve it.
    pending_page: Option<i64>,
    /// Inside a page-number anchor; its text is not document text.
    in_page_anchor: bool,
    footnote: FootnoteMode,
}

#[derive(Debug)]
enum Mode {
    Idle,
    Region(RegionState),
}

/// Scans a flat event stream for opinion text, page by page.
#[derive(Debug)]
pub struct OpinionScanner {
    default_page: String,
    counts: HashMap<&'static str, i64>,
    mode: Mode,
    records: Vec<PageMap>,
}

impl OpinionScanner {
    /// `default_page` is the page id in force until an anchor says
    /// otherwise; for the reports it is the case's first page number.
    pub fn new(default_page: impl Into<String>) -> Self {
        OpinionScanner {
            default_page: default_page.into(),
            counts: TRACKED_TAGS.iter().map(|tag| (*tag, 0)).collect(),
            mode: Mode::Idle,
            records: Vec::new(),
        }
    }

    /// One-shot scan: feed every event, then validate.
    pub fn process(events: &[MarkupEvent], default_page: &str) -> ExtractResult<Vec<PageMap>> {
        let mut scanner = OpinionScanner::new(default_page);
        for event in events {
            scanner.feed(event)?;
        }
        scanner.finish()
    }

    pub fn feed(&mut self, event: &MarkupEvent) -> ExtractResult<()> {
        match event {
            MarkupEvent::Start { name, attrs } => self.start_tag(name, attrs),
            MarkupEvent::End { name } => self.end_tag(name),
            MarkupEvent::Text(text) => self.data(text),
        }
    }

    /// Terminal validation: tag balance first, then the region count.
    pub fn finish(self) -> ExtractResult<Vec<PageMap>> {
        for &tag in TRACKED_TAGS {
            let count = self.counts.get(tag).copied().unwrap_or(0);
            if count == 0 {
                continue;
            }
            if TOLERANT_TAGS.contains(&tag) {
                log::warn!(target: "folio.opinion", "unbalanced <{}> tolerated ({})", tag, count);
                continue;
            }
            return Err(ExtractError::UnclosedTag {
                tag: tag.to_string(),
                count,
            });
        }
        if self.records.len() != EXPECTED_REGIONS {
            return Err(ExtractError::RegionCount(self.records.len()));
        }
        Ok(self.records)
    }

    fn start_tag(&mut self, name: &str, attrs: &[(String, String)]) -> ExtractResult<()> {
        match &mut self.mode {
            Mode::Region(region) => {
                if LITERAL_TEXT_TAGS.contains(&name) {
                    append_record(
                        &mut self.records,
                        &region.current_page,
                        &format!("<{}>", name),
                    );
                    return Ok(());
                }
                if is_skipped(name) {
                    return Ok(());
                }
                if !TRACKED_TAGS.contains(&name) {
                    return Err(ExtractError::UnexpectedTag(name.to_string()));
                }
                if let Some(count) = self.counts.get_mut(name) {
                    *count += 1;
                }
                if name == "p" {
                    region.paragraph = Some(Paragraph { first_write: true });
                }
                if name == "a" && attr_value(attrs, "class") == Some(PAGE_ANCHOR_CLASS) {
                    region.in_page_anchor = true;
                    match attr_value(attrs, "name") {
                        Some(page) => {
                            region.current_page = page.to_string();
                            open_record_page(&mut self.records, page);
                        }
                        None => {
                            // The page id hides in the anchor's text.
                            region.pending_page =
                                Some(self.counts.get("p").copied().unwrap_or(0));
                        }
                    }
                }
                Ok(())
            }
            Mode::Idle => {
                if name == "div" {
                    if let Some(id) = attr_value(attrs, "id") {
                        if id.starts_with(REGION_ID_PREFIX) {
                            self.open_region();
                        }
                    }
                }
                Ok(())
            }
        }
    }

    fn open_region(&mut self) {
        let boundary = self.counts.get("div").copied().unwrap_or(0);
        log::debug!(target: "folio.opinion", "region open at div count {}", boundary);
        if let Some(count) = self.counts.get_mut("div") {
            *count += 1;
        }
        let mut record = PageMap::new();
        record.insert(self.default_page.clone(), String::new());
        self.records.push(record);
        self.mode = Mode::Region(RegionState {
            boundary_depth: boundary,
            current_page: self.default_page.clone(),
            paragraph: None,
            pending_page: None,
            in_page_anchor: false,
            footnote: FootnoteMode::Off,
        });
    }

    fn end_tag(&mut self, name: &str) -> ExtractResult<()> {
        let region_closed = match &mut self.mode {
            Mode::Idle => false,
            Mode::Region(region) => {
                if !is_skipped(name) && !TRACKED_TAGS.contains(&name) {
                    return Err(ExtractError::UnexpectedTag(name.to_string()));
                }
                if name == "ul" && region.footnote == FootnoteMode::Off {
                    region.footnote = FootnoteMode::Armed;
                }
                if !is_skipped(name) {
                    if let Some(count) = self.counts.get_mut(name) {
                        *count -= 1;
                    }
                }
                if name == "p" {
                    let count = self.counts.get("p").copied().unwrap_or(0);
                    if let Some(pending) = region.pending_page {
                        // The anchor's paragraph is closing and nothing
                        // resolved the page id.
                        if pending >= count {
                            return Err(ExtractError::MissingPageNumber);
                        }
                    }
                    region.paragraph = None;
                }
                if name == "a" && region.in_page_anchor {
                    region.in_page_anchor = false;
                }
                name == "div"
                    && self.counts.get("div").copied().unwrap_or(0) == region.boundary_depth
            }
        };
        if region_closed {
            log::debug!(target: "folio.opinion", "region closed");
            self.mode = Mode::Idle;
        }
        Ok(())
    }

    fn data(&mut self, text: &str) -> ExtractResult<()> {
        let region = match &mut self.mode {
            Mode::Region(region) => region,
            Mode::Idle => return Ok(()),
        };

        if let Some(pending) = region.pending_page {
            if self.counts.get("p").copied().unwrap_or(0) == pending {
                // The attempt consumes the chunk whether or not it works;
                // citation text is never document text.
                if let Some(page) = parse_page_id(text) {
                    region.current_page = page.clone();
                    open_record_page(&mut self.records, &page);
                    region.pending_page = None;
                }
                return Ok(());
            }
        }

        if region.paragraph.is_none() || region.in_page_anchor {
            return Ok(());
        }
        let text = text.replace('\r', "");
        if text.is_empty() {
            return Ok(());
        }

        let record = match self.records.last_mut() {
            Some(record) => record,
            None => return Ok(()),
        };
        let buf = record.entry(region.current_page.clone()).or_default();

        if let Some(paragraph) = &mut region.paragraph {
            if paragraph.first_write {
                if !buf.is_empty() {
                    buf.push('\n');
                }
                paragraph.first_write = false;
            }
        }

        match region.footnote {
            FootnoteMode::Off => buf.push_str(&text),
            FootnoteMode::Armed => {
                if text.starts_with('[') {
                    match text.find(']') {
                        Some(idx) => buf.push_str(&text[idx..]),
                        None => region.footnote = FootnoteMode::Erasing,
                    }
                } else {
                    buf.push_str(&text);
                }
            }
            FootnoteMode::Erasing => {
                if let Some(idx) = text.find(']') {
                    buf.push_str(&text[idx..]);
                    region.footnote = FootnoteMode::Armed;
                }
            }
        }
        Ok(())
    }
}

/// Anything skipped for counting purposes: presentation noise plus mangled
/// tags from bad scans.
fn is_skipped(name: &str) -> bool {
    IGNORED_TAGS.contains(&name) || name.starts_with(WILD_TAG_PREFIX)
}

fn append_record(records: &mut [PageMap], page: &str, text: &str) {
    if let Some(record) = records.last_mut() {
        record.entry(page.to_string()).or_default().push_str(text);
    }
}

fn open_record_page(records: &mut [PageMap], page: &str) {
    if let Some(record) = records.last_mut() {
        record.insert(page.to_string(), String::new());
    }
}

/// Digs a page id out of citation text like `Page 10 U. S. 207`.
///
/// Spaces are removed first (the rendering scatters them through the
/// citation), then the piece between the first delimiter and the next is
/// taken. `None` means no delimiter matched.
fn parse_page_id(text: &str) -> Option<String> {
    let compact = text.replace(' ', "");
    for delim in PAGE_ID_DELIMITERS {
        if compact.contains(delim) {
            return compact.split(delim).nth(1).map(str::to_string);
        }
    }
    None
}
