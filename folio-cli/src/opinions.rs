//! Batch driver for the opinion (HTML) side.
//!
//! Each document is tokenized and scanned on its own; of the two regions a
//! well-formed page renders, the first is the syllabus duplicate, so only
//! the second one's pages are written out. File names carry the page offset
//! from the case's first page. Failures are reported per document and the
//! run continues.

use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use folio_extract::naming::OpinionDoc;
use folio_extract::opinion::{tokenize, OpinionScanner};
use folio_extract::{DocumentError, ExtractResult};

use crate::files::{display_name, documents_with_extension};

pub struct OpinionsTask {
    pub html_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Document stems whose source rendering is known to be broken.
    pub exclude: Vec<String>,
}

/// Runs the batch and returns the number of documents that failed.
pub fn run(task: &OpinionsTask) -> Result<usize, String> {
    let files = documents_with_extension(&task.html_dir, "html")?;
    fs::create_dir_all(&task.out_dir)
        .map_err(|e| format!("cannot create {}: {}", task.out_dir.display(), e))?;

    let mut processed = 0;
    let mut failed = 0;

    for path in &files {
        let stem = match path.file_stem().and_then(OsStr::to_str) {
            Some(stem) => stem,
            None => continue,
        };
        if task.exclude.iter().any(|e| e == stem) {
            continue;
        }
        let doc = match OpinionDoc::parse(stem) {
            Ok(doc) => doc,
            Err(_) => {
                println!("skipping {}: not an opinion document", display_name(path));
                continue;
            }
        };
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{}: {}", display_name(path), e);
                failed += 1;
                continue;
            }
        };
        match extract_document(&doc, &source) {
            Ok(pages) => {
                for (name, text) in pages {
                    let path = task.out_dir.join(name);
                    fs::write(&path, text)
                        .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
                }
                processed += 1;
            }
            Err(source) => {
                eprintln!("{}", DocumentError::new(display_name(path), source));
                failed += 1;
            }
        }
    }

    println!("{} documents processed, {} failed", processed, failed);
    Ok(failed)
}

/// Scans one document and names the pages of its second region.
fn extract_document(doc: &OpinionDoc, source: &str) -> ExtractResult<Vec<(String, String)>> {
    let events = tokenize(source);
    let mut records = OpinionScanner::process(&events, doc.default_page_id())?;
    let record = records.pop().unwrap_or_default();

    let mut pages = Vec::new();
    for (page, text) in record {
        pages.push((doc.page_file(&page)?, text));
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_region_pages_become_named_files() {
        let html = r#"<div id="tab-opinion-1"><p>duplicate header</p></div>
<div id="tab-opinion-2">
<p>Before the turn.<a class="page-number" name="12">Page 10 U. S. 12</a>After the turn.</p>
</div>"#;

        let doc = OpinionDoc::parse("010us011").unwrap();
        let pages = extract_document(&doc, html).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].0, "010us011-000.txt");
        assert_eq!(pages[0].1, "Before the turn.");
        assert_eq!(pages[1].0, "010us011-001.txt");
        assert_eq!(pages[1].1, "After the turn.");
    }

    #[test]
    fn test_page_id_that_is_not_a_number_fails_naming() {
        let html = r#"<div id="tab-opinion-1"></div>
<div id="tab-opinion-2">
<p><a class="page-number" name="frontis">x</a>text</p>
</div>"#;

        let doc = OpinionDoc::parse("010us011").unwrap();
        let result = extract_document(&doc, html);
        assert!(result.is_err());
    }
}
