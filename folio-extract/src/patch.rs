//! Pointer and page-key corrections.
//!
//! Some source documents carry known-bad facsimile pointers; corrections
//! ship as a two column table of `erroneous,corrected` pairs. Applying a
//! table replaces pointers in a list and rekeys page maps. A correction
//! that finds nothing to correct is a warning, never an error: the tables
//! are shared across whole collections and most entries concern a handful
//! of documents.

use std::fmt;

use crate::error::{ExtractError, ExtractResult};
use crate::pages::PageMap;

/// A patch entry whose target never appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchMiss(pub String);

impl fmt::Display for PatchMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to apply patch: {}", self.0)
    }
}

/// An ordered table of `erroneous -> corrected` replacements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchTable {
    entries: Vec<(String, String)>,
}

impl PatchTable {
    /// Parses patch text. The first line is a column header and is always
    /// skipped; blank lines are ignored; fields are trimmed.
    pub fn parse(text: &str) -> ExtractResult<PatchTable> {
        let mut entries = Vec::new();
        for line in text.lines().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (erroneous, corrected) = line.split_once(',').ok_or_else(|| {
                ExtractError::Parse(format!("patch line without two columns: {}", line))
            })?;
            if corrected.contains(',') {
                return Err(ExtractError::Parse(format!(
                    "patch line with extra columns: {}",
                    line
                )));
            }
            entries.push((erroneous.trim().to_string(), corrected.trim().to_string()));
        }
        Ok(PatchTable { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Replaces the first occurrence of each erroneous pointer in place.
    pub fn apply_to_pointers(&self, pointers: &mut [String]) -> Vec<PatchMiss> {
        let mut misses = Vec::new();
        for (erroneous, corrected) in &self.entries {
            match pointers.iter().position(|pointer| pointer == erroneous) {
                Some(index) => pointers[index] = corrected.clone(),
                None => misses.push(warned(erroneous)),
            }
        }
        misses
    }

    /// Moves each erroneous page key's text to the corrected key. An
    /// existing entry under the corrected key is overwritten.
    pub fn apply_to_pages(&self, pages: &mut PageMap) -> Vec<PatchMiss> {
        let mut misses = Vec::new();
        for (erroneous, corrected) in &self.entries {
            match pages.remove(erroneous) {
                Some(text) => {
                    pages.insert(corrected.clone(), text);
                }
                None => misses.push(warned(erroneous)),
            }
        }
        misses
    }
}

fn warned(erroneous: &str) -> PatchMiss {
    let miss = PatchMiss(erroneous.to_string());
    log::warn!(target: "folio.patch", "{}", miss);
    miss
}
