//! Tag catalogs for the opinion scanner.
//!
//! These lists describe one specific rendering of the reports and are a
//! compatibility surface: widening any of them changes which documents
//! fail validation downstream.

/// Tags whose open/close balance is tracked inside relevant regions.
pub const TRACKED_TAGS: &[&str] = &["div", "strong", "p", "em", "h2", "h3", "a", "b"];

/// Presentation noise, skipped entirely.
pub const IGNORED_TAGS: &[&str] = &["span", "br", "ul", "font", "symbol", "s"];

/// Tracked tags that may end a document unbalanced (usually an extra
/// closing tag).
pub const TOLERANT_TAGS: &[&str] = &["p", "a", "b"];

/// Pseudo-tags that are document text, not markup (a bond marked `<h>` and
/// the like); they are appended verbatim in angle brackets.
pub const LITERAL_TEXT_TAGS: &[&str] = &["ra", "k", "h"];

/// Mangled markup seen in the wild (`l=|<a`, `l=|255`); anything with this
/// prefix is skipped like the ignored set.
pub const WILD_TAG_PREFIX: &str = "l=|";

/// `div` id prefix marking a relevant opinion region.
pub const REGION_ID_PREFIX: &str = "tab-opinion-";

/// Anchor class marking a page boundary.
pub const PAGE_ANCHOR_CLASS: &str = "page-number";

/// Splitters for digging the page id out of citation text, tried in order.
pub const PAGE_ID_DELIMITERS: &[&str] = &["U.S.", ","];
