use crate::common::{docx_document_xml, docx_part};
use scriv_babel::{export, RenderOptions};

async fn document_xml(source: &str) -> String {
    let exported = export(source, "docx", &RenderOptions::default())
        .await
        .unwrap();
    docx_document_xml(&exported.bytes)
}

#[tokio::test]
async fn report_has_heading_empty_and_body_paragraphs() {
    let xml = document_xml("# Report\n\nBody text.").await;
    assert_eq!(xml.matches("</w:p>").count(), 3);
    assert!(xml.contains("Heading1"));
    assert!(xml.find("Report").unwrap() < xml.find("Body text.").unwrap());
}

#[tokio::test]
async fn one_paragraph_per_line() {
    let source = "# A\n## B\n### C\n- d\n* e\nplain\n**bold** tail\n";
    let xml = document_xml(source).await;
    // seven lines plus the empty one after the trailing newline
    assert_eq!(xml.matches("</w:p>").count(), 8);
    assert!(xml.contains("Heading2"));
    assert!(xml.contains("Heading3"));
}

fn attr_value<'a>(xml: &'a str, prefix: &str) -> &'a str {
    let start = xml.find(prefix).unwrap() + prefix.len();
    let len = xml[start..].find('"').unwrap();
    &xml[start..start + len]
}

#[tokio::test]
async fn list_items_reference_bullet_numbering() {
    let exported = export("- one\n- two", "docx", &RenderOptions::default())
        .await
        .unwrap();
    let document = docx_part(&exported.bytes, "word/document.xml");
    let numbering = docx_part(&exported.bytes, "word/numbering.xml");

    let num_id = attr_value(&document, "<w:numId w:val=\"");
    let num_ref = format!("<w:numId w:val=\"{num_id}\"");
    assert_eq!(document.matches(&num_ref).count(), 2);

    // the num instance is defined once and points at a bullet list
    let num_def = format!("w:numId=\"{num_id}\"");
    assert_eq!(numbering.matches(&num_def).count(), 1);
    let instance = &numbering[numbering.find(&num_def).unwrap()..];
    let abstract_id = attr_value(instance, "<w:abstractNumId w:val=\"");

    let abstract_def = format!("w:abstractNumId=\"{abstract_id}\"");
    assert_eq!(numbering.matches(&abstract_def).count(), 1);
    let start = numbering.find(&abstract_def).unwrap();
    let end = start + numbering[start..].find("</w:abstractNum>").unwrap();
    assert!(numbering[start..end].contains("w:numFmt w:val=\"bullet\""));
}

#[tokio::test]
async fn heading_with_markers_keeps_them() {
    let xml = document_xml("# **Bold** title").await;
    assert!(xml.contains("**Bold** title"));
}
