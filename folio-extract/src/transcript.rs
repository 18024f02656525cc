//! Transcript documents: page-scoped text from proceedings XML.
//!
//! The transcriptions mark page boundaries with self-closing
//! `<xptr type="pageFacsimile" doc="..."/>` elements whose `doc` attribute
//! names the facsimile image, and paragraphs with `<p>`. Everything else
//! in the markup (speaker labels, emphasis, corrections) only contributes
//! its text. Both walkers below recurse through the element tree in
//! document order and give up silently past a depth ceiling, so a
//! degenerate document cannot blow the stack.

use crate::error::{ExtractError, ExtractResult};
use crate::pages::{PageAccumulator, PageMap};
use crate::tree::TagTree;

/// Recursion ceiling used by the batch tooling.
pub const DEFAULT_DEPTH_LIMIT: usize = 50;

const PAGE_BREAK_TAG: &str = "xptr";
const PAGE_FACSIMILE: &str = "pageFacsimile";
const PARAGRAPH_TAG: &str = "p";

/// Reconstructs the text of every page in one document.
///
/// Returns one entry per page boundary encountered, keyed by the boundary's
/// facsimile pointer. Text before the first boundary is dropped; a pointer
/// seen twice restarts its page. Elements nested deeper than `depth_limit`
/// are skipped.
pub fn extract_pages(root: &TagTree, depth_limit: usize) -> ExtractResult<PageMap> {
    let mut acc = PageAccumulator::new();
    walk(root, 0, depth_limit, &mut acc)?;
    Ok(acc.finish())
}

/// Collects every facsimile pointer in document order, duplicates included.
pub fn collect_pointers(root: &TagTree, depth_limit: usize) -> ExtractResult<Vec<String>> {
    let mut pointers = Vec::new();
    collect(root, 0, depth_limit, &mut pointers)?;
    Ok(pointers)
}

/// Reads the facsimile pointer off a page-boundary element, if it is one.
///
/// A `xptr` with no `type` at all, or a facsimile one with no `doc`, is
/// malformed markup rather than a page to skip.
fn page_pointer(node: &TagTree) -> ExtractResult<Option<&str>> {
    if node.tag != PAGE_BREAK_TAG {
        return Ok(None);
    }
    let kind = node
        .attr("type")
        .ok_or_else(|| ExtractError::Parse("xptr without type attribute".to_string()))?;
    if kind != PAGE_FACSIMILE {
        return Ok(None);
    }
    let pointer = node.attr("doc").ok_or_else(|| {
        ExtractError::Parse("page boundary without doc attribute".to_string())
    })?;
    Ok(Some(pointer))
}

fn walk(
    node: &TagTree,
    depth: usize,
    limit: usize,
    acc: &mut PageAccumulator,
) -> ExtractResult<()> {
    if depth >= limit {
        return Ok(());
    }
    for child in &node.children {
        if let Some(pointer) = page_pointer(child)? {
            log::debug!(target: "folio.transcript", "page boundary: {}", pointer);
            acc.open_page(pointer);
        }
        if child.tag == PARAGRAPH_TAG {
            acc.paragraph_break();
        }
        if let Some(text) = &child.text {
            acc.push_words(text);
        }
        walk(child, depth + 1, limit, acc)?;
        if let Some(tail) = &child.tail {
            acc.push_tail(tail, node.tag == PARAGRAPH_TAG);
        }
    }
    Ok(())
}

fn collect(
    node: &TagTree,
    depth: usize,
    limit: usize,
    out: &mut Vec<String>,
) -> ExtractResult<()> {
    if depth >= limit {
        return Ok(());
    }
    for child in &node.children {
        if let Some(pointer) = page_pointer(child)? {
            out.push(pointer.to_string());
        }
        collect(child, depth + 1, limit, out)?;
    }
    Ok(())
}
