//! Page-scoped plaintext reconstruction for digitized court records.
//!
//! Two document families come in, page maps come out:
//!
//! - proceedings transcripts in XML, walked as an element tree
//!   ([`tree::TagTree`], [`transcript::extract_pages`])
//! - appellate opinions in rendered HTML, scanned as a flat event stream
//!   ([`opinion::tokenize`], [`opinion::OpinionScanner`])
//!
//! Page text is keyed by facsimile pointer or printed page number
//! ([`pages::PageMap`]). Known-bad keys are corrected afterwards
//! ([`patch::PatchTable`]), and [`naming`] turns keys into output file
//! names. Every operation here works on fully materialized inputs and does
//! no I/O; batch drivers live elsewhere.

pub mod error;
pub mod naming;
pub mod opinion;
pub mod pages;
pub mod patch;
pub mod transcript;
pub mod tree;

pub use error::{DocumentError, ExtractError, ExtractResult};
pub use pages::PageMap;
pub use patch::{PatchMiss, PatchTable};
pub use tree::TagTree;
