//! End-to-end checks for transcript extraction: XML text in, page map out.

use folio_extract::transcript::{collect_pointers, extract_pages, DEFAULT_DEPTH_LIMIT};
use folio_extract::{ExtractError, TagTree};

const ACCOUNT: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<TEI.2>
 <text>
  <body>
   <div0 type="ordinarysAccount" id="OA17070912">
    <interp inst="OA17070912" type="date" value="17070912"/>
    <xptr type="pageFacsimile" doc="OA170709120001"/>
    <p>THE ORDINARY of NEWGATE his <hi rend="italic">Account</hi>, of the
       Behaviour of the Condemn'd Criminals.</p>
    <p>On Wednesday the 10th of <hi rend="italic">September</hi>, at the
       Sessions-House in the <placeName>Old-Baily</placeName>, three Men
       received Sentence of Death.</p>
    <xptr type="pageFacsimile" doc="OA170709120002"/>
    <p>The following day <persName id="n1">William
       <interp inst="n1" type="surname" value="Jackson"/>Jackson</persName>
       made his Confession.</p>
   </div0>
  </body>
 </text>
</TEI.2>"#;

#[test]
fn test_account_splits_into_facsimile_pages() {
    let root = TagTree::parse(ACCOUNT).unwrap();
    let pages = extract_pages(&root, DEFAULT_DEPTH_LIMIT).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(
        pages["OA170709120001"],
        "THE ORDINARY of NEWGATE his Account, of the Behaviour of the \
         Condemn'd Criminals.\n\
         On Wednesday the 10th of September, at the Sessions-House in the \
         Old-Baily, three Men received Sentence of Death."
    );
    assert_eq!(
        pages["OA170709120002"],
        "The following day William Jackson made his Confession."
    );
}

#[test]
fn test_punctuation_tail_joins_the_word_before_it() {
    let root = TagTree::parse("<p>Hello<i>world</i>, there</p>").unwrap();

    // The walker looks at children, so wrap the paragraph the way the
    // source documents do.
    let body = TagTree::new("div")
        .child(
            TagTree::new("xptr")
                .with_attr("type", "pageFacsimile")
                .with_attr("doc", "001"),
        )
        .child(root);

    let pages = extract_pages(&body, DEFAULT_DEPTH_LIMIT).unwrap();
    assert_eq!(pages["001"], "Hello world, there");
}

#[test]
fn test_pointers_in_document_order_with_duplicates() {
    let root = TagTree::parse(ACCOUNT).unwrap();
    let pointers = collect_pointers(&root, DEFAULT_DEPTH_LIMIT).unwrap();
    assert_eq!(pointers, vec!["OA170709120001", "OA170709120002"]);

    let doubled = format!(
        "<body>{}{}</body>",
        r#"<xptr type="pageFacsimile" doc="SP001"/>"#,
        r#"<xptr type="pageFacsimile" doc="SP001"/>"#
    );
    let root = TagTree::parse(&doubled).unwrap();
    let pointers = collect_pointers(&root, DEFAULT_DEPTH_LIMIT).unwrap();
    assert_eq!(pointers, vec!["SP001", "SP001"]);
}

#[test]
fn test_front_matter_before_first_boundary_is_dropped() {
    let xml = r#"<body>
      <p>Proof sheet header, not part of any page.</p>
      <xptr type="pageFacsimile" doc="SP100"/>
      <p>Real content.</p>
    </body>"#;

    let root = TagTree::parse(xml).unwrap();
    let pages = extract_pages(&root, DEFAULT_DEPTH_LIMIT).unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages["SP100"], "Real content.");
}

#[test]
fn test_repeated_pointer_restarts_its_page() {
    let xml = r#"<body>
      <xptr type="pageFacsimile" doc="SP100"/>
      <p>first version</p>
      <xptr type="pageFacsimile" doc="SP100"/>
      <p>second version</p>
    </body>"#;

    let root = TagTree::parse(xml).unwrap();
    let pages = extract_pages(&root, DEFAULT_DEPTH_LIMIT).unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages["SP100"], "second version");
}

#[test]
fn test_malformed_page_boundary_names_the_problem() {
    let xml = r#"<body><xptr type="pageFacsimile"/></body>"#;
    let root = TagTree::parse(xml).unwrap();

    let err = extract_pages(&root, DEFAULT_DEPTH_LIMIT).unwrap_err();
    match err {
        ExtractError::Parse(msg) => assert!(msg.contains("doc")),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_depth_limit_prunes_runaway_nesting() {
    let mut inner = String::from("text");
    for _ in 0..80 {
        inner = format!("<hi>{}</hi>", inner);
    }
    let xml = format!(
        r#"<body><xptr type="pageFacsimile" doc="SP1"/><p>kept</p>{}</body>"#,
        inner
    );

    let root = TagTree::parse(&xml).unwrap();
    let pages = extract_pages(&root, DEFAULT_DEPTH_LIMIT).unwrap();

    assert_eq!(pages["SP1"], "kept");
}
