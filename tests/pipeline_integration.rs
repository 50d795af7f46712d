//! Integration tests for the full counting pipeline.
//!
//! These tests run extraction, filtering, counting, and grouping against the
//! annotated Sorter fixture in testdata and check the numbers a real run
//! would report.

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use jmltally::jml::{extract_annotations, filter_annotations, Annotation, AnnotationKind};
use jmltally::profile::Profile;
use jmltally::report;
use jmltally::stats::{self, ScriptStat};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn sorter_source() -> String {
    std::fs::read_to_string(testdata_path().join("Sorter.java")).expect("should read Sorter.java")
}

/// Run the pipeline up to the per-annotation stats.
fn run_pipeline() -> (Vec<Annotation>, Vec<ScriptStat>) {
    let source = sorter_source();
    let annotations = extract_annotations(&source).expect("fixture should scan cleanly");
    let filtered = filter_annotations(&annotations);
    let scripts: Vec<ScriptStat> = filtered
        .iter()
        .filter(|a| a.kind() == AnnotationKind::AssertScript)
        .map(|a| stats::count_commands(a, &stats::VALID_COMMANDS))
        .collect();
    (annotations, scripts)
}

#[test]
fn test_extracts_every_annotation_in_source_order() {
    let (annotations, _) = run_pipeline();

    assert_eq!(annotations.len(), 10, "fixture holds ten annotations");

    let kinds: Vec<AnnotationKind> = annotations.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AnnotationKind::GhostDecl,
            AnnotationKind::Contract,
            AnnotationKind::AssertScript,
            AnnotationKind::SetStatement,
            AnnotationKind::Contract,
            AnnotationKind::AssertScript,
            AnnotationKind::AssertScript,
            AnnotationKind::LoopInvariant,
            AnnotationKind::Contract,
            AnnotationKind::AssertScript,
        ]
    );

    let lines: Vec<usize> = annotations.iter().map(|a| a.line).collect();
    assert_eq!(lines, vec![4, 6, 12, 15, 21, 26, 30, 36, 47, 51]);
}

#[test]
fn test_signatures_track_the_enclosing_method() {
    let (annotations, _) = run_pipeline();

    // Nothing captured before the first method body opens.
    assert_eq!(annotations[0].signature, "");
    assert_eq!(annotations[1].signature, "");

    assert_eq!(annotations[2].signature, "sort(int[] values)");
    assert_eq!(annotations[3].signature, "sort(int[] values)");
    // The contract between two methods still carries the previous signature.
    assert_eq!(annotations[4].signature, "sort(int[] values)");

    assert_eq!(
        annotations[5].signature,
        "fallback_sort(int[] values, int begin, int end)"
    );
    // Runs of spaces in the declaration collapse to single spaces.
    assert_eq!(
        annotations[9].signature,
        "sample(int[] values, int begin, int end, Storage storage)"
    );
}

#[test]
fn test_script_commands_counted_per_annotation() {
    let (_, scripts) = run_pipeline();

    assert_eq!(scripts.len(), 4, "fixture holds four proof scripts");

    // sort: one auto. The opening line starts with the block marker, not
    // with a command, so "assert" stays at zero.
    assert_eq!(scripts[0].count("auto"), 1);
    assert_eq!(scripts[0].count("assert"), 0);

    // fallback_sort, first script: rule and auto.
    assert_eq!(scripts[1].count("rule"), 1);
    assert_eq!(scripts[1].count("auto"), 1);

    // fallback_sort, second script: expand, plus tryclose behind a glued
    // continuation marker.
    assert_eq!(scripts[2].count("expand"), 1);
    assert_eq!(scripts[2].count("tryclose"), 1);
    assert_eq!(scripts[2].count("auto"), 0);

    // sample: witness and auto.
    assert_eq!(scripts[3].count("witness"), 1);
    assert_eq!(scripts[3].count("auto"), 1);
}

#[test]
fn test_comment_lines_filtered_before_counting_but_kept_raw() {
    let (_, scripts) = run_pipeline();

    let stat = &scripts[2];
    let annotation = stat.annotation.as_ref().expect("per-annotation stat");
    assert!(annotation.raw.content.contains("// close remaining goals"));
    assert!(!annotation.content.contains("// close remaining goals"));
}

#[test]
fn test_groups_aggregate_matching_signatures() {
    let (_, scripts) = run_pipeline();
    let profile = Profile::default();
    let grouped = stats::group_stats(&scripts, &profile.method_groups);

    assert_eq!(grouped.len(), 4);

    assert_eq!(grouped[0].method, "sort(int[] values)");
    assert_eq!(grouped[0].scripts, 1);
    assert_eq!(grouped[0].total.count("auto"), 1);

    assert_eq!(
        grouped[1].method,
        "sample(int[] values, int begin, int end, Storage storage)"
    );
    assert_eq!(grouped[1].scripts, 1);
    assert_eq!(grouped[1].total.count("witness"), 1);
    assert_eq!(grouped[1].total.count("auto"), 1);

    assert_eq!(grouped[2].method, "fallback_sort(");
    assert_eq!(grouped[2].scripts, 2);
    assert_eq!(grouped[2].total.count("auto"), 1);
    assert_eq!(grouped[2].total.count("rule"), 1);
    assert_eq!(grouped[2].total.count("expand"), 1);
    assert_eq!(grouped[2].total.count("tryclose"), 1);

    assert_eq!(grouped[3].method, "sample_sort_recurse_on");
    assert_eq!(grouped[3].scripts, 0);
    assert_eq!(grouped[3].total.count("auto"), 0);
}

#[test]
fn test_table_matches_expected_output() {
    let (_, scripts) = run_pipeline();
    let profile = Profile::default();
    let grouped = stats::group_stats(&scripts, &profile.method_groups);
    let commands = stats::sorted_commands(&stats::VALID_COMMANDS);
    let table = report::render_table(&grouped, &commands);

    let expected = "\
method name;assert;auto;cheat;cut;expand;leave;let;macro;oss;rule;tryclose;witness\n\
sort(int[] values);0;1;0;0;0;0;0;0;0;0;0;0;\n\
sample(int[] values, int begin, int end, Storage storage);0;1;0;0;0;0;0;0;0;0;0;1;\n\
fallback_sort(;0;1;0;0;1;0;0;0;0;1;1;0;\n\
sample_sort_recurse_on;0;0;0;0;0;0;0;0;0;0;0;0;\n";
    assert_eq!(table, expected);
}

/// The smallest useful run: one method, one script, one command.
#[test]
fn test_single_method_single_auto_script() {
    let source = r#"
class Tiny {
    static void sort(int[] values) {
        /*@ assert p \by {
            auto;
        } */
    }
}
"#;

    let annotations = extract_annotations(source).expect("should scan");
    let filtered = filter_annotations(&annotations);
    let scripts: Vec<ScriptStat> = filtered
        .iter()
        .filter(|a| a.kind() == AnnotationKind::AssertScript)
        .map(|a| stats::count_commands(a, &stats::VALID_COMMANDS))
        .collect();
    let grouped = stats::group_stats(&scripts, &["sort(int[] values)".to_string()]);
    let commands = stats::sorted_commands(&stats::VALID_COMMANDS);
    let table = report::render_table(&grouped, &commands);

    let rows: Vec<&str> = table.lines().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], "sort(int[] values);0;1;0;0;0;0;0;0;0;0;0;0;");
}
