use crate::common::{count, find, lines, pdf_page_count};
use scriv_babel::formats::pdf::layout::{paginate, PdfLayoutSettings};
use scriv_babel::{export, parse, RenderOptions};

async fn pdf(source: &str) -> Vec<u8> {
    export(source, "pdf", &RenderOptions::default())
        .await
        .unwrap()
        .bytes
}

#[tokio::test]
async fn report_heading_precedes_body() {
    let bytes = pdf("# Report\n\nBody text.").await;
    assert_eq!(pdf_page_count(&bytes), 1);

    let heading = find(&bytes, b"(Report) Tj").unwrap();
    let body = find(&bytes, b"(Body text.) Tj").unwrap();
    assert!(heading < body);
    assert!(count(&bytes, b"/F2 18 Tf") == 1);
    assert!(count(&bytes, b"/F1 12 Tf") == 1);
}

#[tokio::test]
async fn thirty_six_lines_fit_on_one_page() {
    assert_eq!(pdf_page_count(&pdf(&lines(36)).await), 1);
    assert_eq!(pdf_page_count(&pdf(&lines(37)).await), 2);
}

#[tokio::test]
async fn pages_keep_source_order() {
    let bytes = pdf(&lines(80)).await;
    assert_eq!(pdf_page_count(&bytes), 3);

    let positions: Vec<usize> = (1..=80)
        .map(|i| find(&bytes, format!("(Line {i}) Tj").as_bytes()).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn blank_lines_draw_nothing() {
    let bytes = pdf("\n\n\n").await;
    assert_eq!(count(&bytes, b" Tj"), 0);
    assert_eq!(pdf_page_count(&bytes), 1);
}

#[tokio::test]
async fn unmatched_marker_is_drawn_literally() {
    let bytes = pdf("Odd ** case").await;
    assert_eq!(count(&bytes, b"(Odd ** case) Tj"), 1);
}

#[test]
fn layout_matches_rendered_page_count() {
    let doc = parse(&format!("# Title\n{}\n- a\n- b", lines(60)));
    let pages = paginate(&doc, &PdfLayoutSettings::default(), None);
    let total: usize = pages.iter().map(|p| p.ops.len()).sum();
    assert_eq!(total, 63);
    assert_eq!(pages.len(), 2);
}
