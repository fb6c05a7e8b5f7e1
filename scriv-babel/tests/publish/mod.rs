use crate::common::{count, docx_document_xml, pdf_page_count};
use scriv_babel::{publish, ExportError, InputError, PublishArtifact, PublishSpec};
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn publishes_both_formats_from_one_source() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("report");
    let source = "# Report\n\nBody text.";

    publish(PublishSpec::new(source, "docx", &base)).await.unwrap();
    publish(PublishSpec::new(source, "pdf", &base)).await.unwrap();

    let docx = fs::read(dir.path().join("report.docx")).unwrap();
    assert_eq!(docx_document_xml(&docx).matches("</w:p>").count(), 3);
    let pdf = fs::read(dir.path().join("report.pdf")).unwrap();
    assert_eq!(pdf_page_count(&pdf), 1);
}

#[tokio::test]
async fn txt_is_rejected_before_anything_is_written() {
    let dir = tempdir().unwrap();
    let err = publish(PublishSpec::new("Hello", "txt", dir.path().join("out")))
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::Input(InputError::UnsupportedFormat(_))));
    assert!(err.to_string().contains("txt"));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn no_partial_file_remains_after_success() {
    let dir = tempdir().unwrap();
    let result = publish(PublishSpec::new("x", "pdf", dir.path().join("a")))
        .await
        .unwrap();

    assert_eq!(result.artifact, PublishArtifact::File(dir.path().join("a.pdf")));
    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.pdf".to_string()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_are_independent() {
    let dir = tempdir().unwrap();
    let jobs: Vec<_> = (0..8)
        .map(|i| {
            let base = dir.path().join(format!("doc{i}"));
            let source = format!("# Doc {i}\n{}", "line\n".repeat(i * 20));
            tokio::spawn(async move {
                publish(PublishSpec::new(&source, "pdf", &base)).await.map(|_| ())
            })
        })
        .collect();

    for job in jobs {
        job.await.unwrap().unwrap();
    }
    for i in 0..8 {
        let bytes = fs::read(dir.path().join(format!("doc{i}.pdf"))).unwrap();
        let heading = format!("(Doc {i}) Tj");
        assert_eq!(count(&bytes, heading.as_bytes()), 1);
    }
}

#[tokio::test]
async fn title_only_affects_pdf() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("t");
    publish(PublishSpec::new("Body", "pdf", &base).with_title("Heading line"))
        .await
        .unwrap();
    let bytes = fs::read(dir.path().join("t.pdf")).unwrap();
    assert_eq!(count(&bytes, b"(Heading line) Tj"), 1);
}
