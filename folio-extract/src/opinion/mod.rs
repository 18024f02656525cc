//! Opinion documents: page-scoped text from rendered case reports.
//!
//! The rendering wraps each opinion in two `div` regions sharing an id
//! prefix (the first is a syllabus duplicate of the second), marks printed
//! page turns with anchors, and leaks a handful of scanning artifacts as
//! pseudo-tags. [`events`] flattens the HTML into a token stream;
//! [`scanner`] walks that stream, attributes paragraph text to printed
//! pages, and proves at the end that the document had the expected shape.

pub mod events;
pub mod scanner;
pub mod tags;

pub use events::{attr_value, tokenize, MarkupEvent};
pub use scanner::{OpinionScanner, EXPECTED_REGIONS};
