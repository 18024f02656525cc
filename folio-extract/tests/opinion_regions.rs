//! End-to-end checks for opinion extraction: HTML text in, two region
//! records out, page anchors splitting the text.

use folio_extract::naming::OpinionDoc;
use folio_extract::opinion::{tokenize, OpinionScanner};
use folio_extract::ExtractError;

const CASE_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>Faw v. Marsteller :: 10 U.S. 11 (1810)</title></head>
<body>
<div id="header"><span>Case law portal</span></div>
<ul id="tabs"><li>Syllabus</li><li>Opinion</li></ul>
<div id="tab-opinion-1952296">
<p><b>U.S. Supreme Court</b></p>
<p><em>Faw v. Marsteller</em>, 10 U.S. 6 Cranch 11 11 (1810)</p>
<p>The value of dollars in current money is fixed by law.</p>
</div>
<div id="tab-opinion-1952297">
<p><strong>MR. CHIEF JUSTICE MARSHALL</strong> delivered the opinion of the Court.</p>
<p>This suit was brought in the Circuit Court of the District of Columbia.<br/>
</p>
<p>The rent reserved was payable in other money.<a href="#12" class="page-number" name="12">Page 10 U. S. 12</a>That money had ceased to circulate.</p>
<p><a class="page-number">Page 10 U. S. 13</a></p>
<p>The decree must be reversed.</p>
</div>
</body>
</html>"##;

#[test]
fn test_case_page_yields_two_region_records() {
    let doc = OpinionDoc::parse("010us011").unwrap();
    let events = tokenize(CASE_PAGE);
    let records = OpinionScanner::process(&events, doc.default_page_id()).unwrap();

    assert_eq!(records.len(), 2);
}

#[test]
fn test_syllabus_region_collects_under_the_default_page() {
    let events = tokenize(CASE_PAGE);
    let records = OpinionScanner::process(&events, "011").unwrap();

    let syllabus = &records[0];
    assert_eq!(syllabus.len(), 1);
    assert_eq!(
        syllabus["011"],
        "U.S. Supreme Court\n\
         Faw v. Marsteller, 10 U.S. 6 Cranch 11 11 (1810)\n\
         The value of dollars in current money is fixed by law."
    );
}

#[test]
fn test_opinion_region_splits_at_page_anchors() {
    let events = tokenize(CASE_PAGE);
    let records = OpinionScanner::process(&events, "011").unwrap();

    let opinion = &records[1];
    assert_eq!(
        opinion.keys().collect::<Vec<_>>(),
        vec!["011", "12", "13"]
    );
    assert_eq!(
        opinion["011"],
        "MR. CHIEF JUSTICE MARSHALL delivered the opinion of the Court.\n\
         This suit was brought in the Circuit Court of the District of Columbia.\n\
         \nThe rent reserved was payable in other money."
    );
    // The named anchor's citation text is suppressed; the following text
    // lands on the new page.
    assert_eq!(opinion["12"], "That money had ceased to circulate.");
    // The bare anchor's page id is read out of its citation text.
    assert_eq!(opinion["13"], "The decree must be reversed.");
}

#[test]
fn test_footnote_markers_are_cut_back() {
    let html = r#"<div id="tab-opinion-1"></div>
<div id="tab-opinion-2">
<ul></ul>
<p>[Footnote 1] Reference is made to the original bond.</p>
</div>"#;

    let records = OpinionScanner::process(&tokenize(html), "001").unwrap();
    assert_eq!(records[1]["001"], "] Reference is made to the original bond.");
}

#[test]
fn test_missing_second_region_is_an_error() {
    let html = r#"<html><body>
<div id="tab-opinion-1952296"><p>Only the syllabus rendered.</p></div>
</body></html>"#;

    let result = OpinionScanner::process(&tokenize(html), "011");
    assert_eq!(result, Err(ExtractError::RegionCount(1)));
}

#[test]
fn test_table_inside_region_is_rejected() {
    let html = r#"<div id="tab-opinion-1"><table><tr><td>1797</td></tr></table></div>"#;

    let result = OpinionScanner::process(&tokenize(html), "001");
    assert_eq!(
        result,
        Err(ExtractError::UnexpectedTag("table".to_string()))
    );
}

#[test]
fn test_unclosed_emphasis_is_reported_with_its_count() {
    let html = r#"<div id="tab-opinion-1"><p><em>leaning</p></div>
<div id="tab-opinion-2"></div>"#;

    let result = OpinionScanner::process(&tokenize(html), "001");
    assert_eq!(
        result,
        Err(ExtractError::UnclosedTag {
            tag: "em".to_string(),
            count: 1,
        })
    );
}
