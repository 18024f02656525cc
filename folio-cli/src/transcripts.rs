//! Batch driver for the transcript (XML) side.
//!
//! Every document in the directory is parsed once; pointers and page text
//! are pooled across documents, corrected with the patch table, and written
//! to whichever outputs the task asks for. A document that fails to parse
//! is reported and skipped; the rest of the run goes on.

use std::fs;
use std::path::{Path, PathBuf};

use folio_config::Encoding;
use folio_extract::naming::transcript_page_file;
use folio_extract::transcript::{collect_pointers, extract_pages};
use folio_extract::{DocumentError, ExtractResult, PageMap, PatchTable, TagTree};

use crate::files::{display_name, documents_with_extension};

pub struct TranscriptsTask {
    pub xml_dir: PathBuf,
    pub encoding: Encoding,
    pub patch_file: Option<PathBuf>,
    /// An explicitly flagged patch file must exist; a collection's
    /// companion file may be absent.
    pub patch_required: bool,
    pub pointers_out: Option<PathBuf>,
    pub json_out: Option<PathBuf>,
    pub pages_out: Option<PathBuf>,
    pub depth_limit: usize,
}

/// Runs the batch and returns the number of documents that failed.
pub fn run(task: &TranscriptsTask) -> Result<usize, String> {
    let table = load_patch_table(task)?;
    let files = documents_with_extension(&task.xml_dir, "xml")?;

    let mut pointers: Vec<String> = Vec::new();
    let mut pages = PageMap::new();
    let mut failed = 0;

    for path in &files {
        let source = match read_document(path, task.encoding) {
            Ok(source) => source,
            Err(message) => {
                eprintln!("{}: {}", display_name(path), message);
                failed += 1;
                continue;
            }
        };
        match extract_document(&source, task.depth_limit) {
            Ok((doc_pointers, doc_pages)) => {
                pointers.extend(doc_pointers);
                pages.extend(doc_pages);
            }
            Err(source) => {
                eprintln!("{}", DocumentError::new(display_name(path), source));
                failed += 1;
            }
        }
    }

    for miss in table.apply_to_pointers(&mut pointers) {
        eprintln!("{}", miss);
    }
    pointers.sort();

    if let Some(path) = &task.pointers_out {
        fs::write(path, pointers.join("\n"))
            .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
        println!("{} pointers -> {}", pointers.len(), path.display());
    }

    for miss in table.apply_to_pages(&mut pages) {
        eprintln!("{}", miss);
    }

    if let Some(path) = &task.json_out {
        let json = serde_json::to_string_pretty(&pages)
            .map_err(|e| format!("cannot serialize pages: {}", e))?;
        fs::write(path, json).map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
        println!("{} pages -> {}", pages.len(), path.display());
    }

    if let Some(dir) = &task.pages_out {
        fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {}", dir.display(), e))?;
        for (pointer, text) in &pages {
            let path = dir.join(transcript_page_file(pointer));
            fs::write(&path, text)
                .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
        }
        println!("{} page files -> {}", pages.len(), dir.display());
    }

    println!(
        "{} documents processed, {} failed",
        files.len() - failed,
        failed
    );
    Ok(failed)
}

/// One document: parse the tree, then collect pointers and page text.
fn extract_document(source: &str, depth_limit: usize) -> ExtractResult<(Vec<String>, PageMap)> {
    let root = TagTree::parse(source)?;
    let pointers = collect_pointers(&root, depth_limit)?;
    let pages = extract_pages(&root, depth_limit)?;
    Ok((pointers, pages))
}

fn load_patch_table(task: &TranscriptsTask) -> Result<PatchTable, String> {
    let path = match &task.patch_file {
        Some(path) => path,
        None => return Ok(PatchTable::default()),
    };
    if !path.exists() {
        if task.patch_required {
            return Err(format!("patch file not found: {}", path.display()));
        }
        return Ok(PatchTable::default());
    }
    let text =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    PatchTable::parse(&text).map_err(|e| format!("{}: {}", path.display(), e))
}

fn read_document(path: &Path, encoding: Encoding) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    decode(bytes, encoding)
}

/// Latin-1 bytes map one to one onto the first 256 Unicode scalar values,
/// so decoding is a straight cast.
fn decode(bytes: Vec<u8>, encoding: Encoding) -> Result<String, String> {
    match encoding {
        Encoding::Utf8 => String::from_utf8(bytes).map_err(|e| e.to_string()),
        Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
    }
}
