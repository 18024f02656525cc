//! Error types shared across the extraction pipeline.

use std::fmt;

/// Error type for document extraction
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// Malformed input: bad markup, a bad patch line, a bad document stem
    Parse(String),
    /// A tag the scanner does not know appeared inside a relevant region
    UnexpectedTag(String),
    /// A bare page-number anchor ended without yielding a page id
    MissingPageNumber,
    /// A tracked, non-tolerant tag was left unbalanced at end of input
    UnclosedTag { tag: String, count: i64 },
    /// The document did not contain the expected number of opinion regions
    RegionCount(usize),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Parse(msg) => write!(f, "parse error: {}", msg),
            ExtractError::UnexpectedTag(tag) => write!(f, "unexpected tag: {}", tag),
            ExtractError::MissingPageNumber => {
                write!(f, "expected a page number to be set")
            }
            ExtractError::UnclosedTag { tag, count } => {
                write!(f, "tag is not closed: {} ({})", tag, count)
            }
            ExtractError::RegionCount(found) => {
                write!(f, "unexpected number of opinion regions: {}", found)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// An extraction failure tied to the document it came from.
///
/// The library itself works on already-loaded text and never knows file
/// names; callers processing whole directories attach them with this so a
/// failing batch names its offender.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentError {
    pub document: String,
    pub source: ExtractError,
}

impl DocumentError {
    pub fn new(document: impl Into<String>, source: ExtractError) -> Self {
        DocumentError {
            document: document.into(),
            source,
        }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.document, self.source)
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unclosed_tag() {
        let err = ExtractError::UnclosedTag {
            tag: "strong".to_string(),
            count: 2,
        };
        assert_eq!(err.to_string(), "tag is not closed: strong (2)");
    }

    #[test]
    fn test_document_error_carries_source() {
        use std::error::Error;

        let err = DocumentError::new("010us006.html", ExtractError::RegionCount(1));
        assert_eq!(
            err.to_string(),
            "010us006.html: unexpected number of opinion regions: 1"
        );
        assert!(err.source().is_some());
    }
}
