//! Output naming for extracted pages.
//!
//! Transcript pages persist under their facsimile pointer. Opinion pages
//! persist under the document stem plus the page's offset from the case's
//! first page: `010us006` page `7` becomes `010us006-001.txt`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExtractError, ExtractResult};

static OPINION_STEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{3})us(\d+)$").unwrap());

/// Identity of one opinion document: a three digit volume number and the
/// number of the case's first page, joined by `us`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpinionDoc {
    volume: String,
    first_page: String,
}

impl OpinionDoc {
    /// Parses a document stem such as `010us006`.
    pub fn parse(stem: &str) -> ExtractResult<OpinionDoc> {
        let caps = OPINION_STEM
            .captures(stem)
            .ok_or_else(|| ExtractError::Parse(format!("invalid opinion stem: {}", stem)))?;
        Ok(OpinionDoc {
            volume: caps[1].to_string(),
            first_page: caps[2].to_string(),
        })
    }

    pub fn volume(&self) -> &str {
        &self.volume
    }

    pub fn first_page(&self) -> &str {
        &self.first_page
    }

    /// The page id in force before any page anchor is seen.
    pub fn default_page_id(&self) -> &str {
        &self.first_page
    }

    pub fn stem(&self) -> String {
        format!("{}us{}", self.volume, self.first_page)
    }

    /// File name for one page of this document. Fails when the page key is
    /// not a number, which means a citation parse upstream went wrong.
    pub fn page_file(&self, page: &str) -> ExtractResult<String> {
        let first: i64 = self.first_page.parse().map_err(|_| {
            ExtractError::Parse(format!("non-numeric first page: {}", self.first_page))
        })?;
        let number: i64 = page
            .trim()
            .parse()
            .map_err(|_| ExtractError::Parse(format!("non-numeric page id: {}", page)))?;
        Ok(format!("{}-{:03}.txt", self.stem(), number - first))
    }
}

/// File name for one transcript page.
pub fn transcript_page_file(pointer: &str) -> String {
    format!("{}.txt", pointer)
}
