//! Bold run splitting shared by every renderer.
//!
//! A paragraph flagged `has_bold` keeps its raw text in the IR; each renderer
//! asks this module for the runs when it needs them. Matching is the shortest
//! non-overlapping `**...**` pair, scanned left to right. A `**` that never
//! closes stays in the surrounding plain text.

use crate::ir::nodes::{Block, InlineRun};
use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold span pattern is valid"));

/// Split paragraph text into plain and bold runs.
///
/// Empty runs are dropped, so `"****"` yields nothing and a string without
/// any closed pair yields exactly one plain run equal to the input.
pub fn split_bold_runs(text: &str) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut last = 0;

    for caps in BOLD_SPAN.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_run(&mut runs, &text[last..whole.start()], false);
        push_run(&mut runs, inner.as_str(), true);
        last = whole.end();
    }
    push_run(&mut runs, &text[last..], false);

    runs
}

/// Runs for any block that carries paragraph text.
///
/// Plain paragraphs come back as a single plain run; non-paragraph blocks
/// have no inline runs.
pub fn runs_for_block(block: &Block) -> Vec<InlineRun> {
    match block {
        Block::Paragraph {
            text,
            has_bold: true,
        } => split_bold_runs(text),
        Block::Paragraph {
            text,
            has_bold: false,
        } => {
            let mut runs = Vec::new();
            push_run(&mut runs, text, false);
            runs
        }
        Block::Heading { .. } | Block::ListItem { .. } | Block::Blank => Vec::new(),
    }
}

fn push_run(runs: &mut Vec<InlineRun>, text: &str, bold: bool) {
    if text.is_empty() {
        return;
    }
    runs.push(InlineRun {
        text: text.to_string(),
        bold,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_single_bold_span() {
        let runs = split_bold_runs("Hello **world** now");
        assert_eq!(
            runs,
            vec![
                InlineRun::plain("Hello "),
                InlineRun::bold("world"),
                InlineRun::plain(" now"),
            ]
        );
    }

    #[test]
    fn debug_form_of_runs_is_stable() {
        let runs = split_bold_runs("a **b**");
        insta::assert_snapshot!(
            format!("{runs:?}"),
            @r#"[InlineRun { text: "a ", bold: false }, InlineRun { text: "b", bold: true }]"#
        );
    }

    #[test]
    fn unmatched_marker_stays_literal() {
        let runs = split_bold_runs("Odd ** case");
        assert_eq!(runs, vec![InlineRun::plain("Odd ** case")]);
    }

    #[test]
    fn shortest_pairs_win() {
        let runs = split_bold_runs("**a** and **b**");
        assert_eq!(
            runs,
            vec![
                InlineRun::bold("a"),
                InlineRun::plain(" and "),
                InlineRun::bold("b"),
            ]
        );
    }

    #[test]
    fn trailing_unpaired_marker_after_span() {
        let runs = split_bold_runs("**x** then ** dangling");
        assert_eq!(
            runs,
            vec![InlineRun::bold("x"), InlineRun::plain(" then ** dangling")]
        );
    }

    #[test]
    fn odd_number_of_markers_leaves_last_literal() {
        let runs = split_bold_runs("**a** **b");
        assert_eq!(runs, vec![InlineRun::bold("a"), InlineRun::plain(" **b")]);
    }

    #[test]
    fn empty_span_produces_no_run() {
        assert!(split_bold_runs("****").is_empty());
        assert_eq!(
            split_bold_runs("x****y"),
            vec![InlineRun::plain("x"), InlineRun::plain("y")]
        );
    }

    #[test]
    fn whole_line_bold() {
        assert_eq!(split_bold_runs("**all**"), vec![InlineRun::bold("all")]);
    }

    #[test]
    fn plain_paragraph_is_one_run() {
        let block = Block::paragraph("just text", false);
        assert_eq!(runs_for_block(&block), vec![InlineRun::plain("just text")]);
        assert!(runs_for_block(&Block::Blank).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Stripping the markers from the runs' concatenation never loses text.
        #[test]
        fn prop_runs_preserve_text_without_paired_markers(text in "[a-z *]{0,40}") {
            let runs = split_bold_runs(&text);
            let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
            let expected = BOLD_SPAN.replace_all(&text, "$1");
            prop_assert_eq!(joined, expected.into_owned());
        }

        #[test]
        fn prop_no_empty_runs(text in "[a-z *]{0,40}") {
            for run in split_bold_runs(&text) {
                prop_assert!(!run.text.is_empty());
            }
        }

        #[test]
        fn prop_marker_free_text_is_single_plain_run(text in "[a-z ]{1,40}") {
            prop_assert_eq!(split_bold_runs(&text), vec![InlineRun::plain(text.clone())]);
        }
    }
}
