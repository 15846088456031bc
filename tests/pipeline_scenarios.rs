use std::io::{Cursor, Write};
use std::path::PathBuf;

use el_udf::{
    ErrorPolicy, FilterConfig, FilterError, FilterKind, InputEncoding, RunError, SourceName, run,
};
use serde_json::{Value, json};

fn run_on(kind: FilterKind, config: &FilterConfig, files: &[PathBuf], stdin: &[u8]) -> Result<String, RunError> {
    let mut stdin = Cursor::new(stdin.to_vec());
    let mut out = Vec::new();
    run(kind, config, files, &mut stdin, &mut out)?;
    Ok(String::from_utf8(out).expect("output is ascii"))
}

fn rows(output: &str) -> Vec<Value> {
    output
        .lines()
        .map(|line| serde_json::from_str(line).expect("each output line is json"))
        .collect()
}

fn stdin_rows(kind: FilterKind, input: &str) -> Vec<Value> {
    let out = run_on(kind, &FilterConfig::default(), &[], input.as_bytes()).unwrap();
    rows(&out)
}

#[test]
fn resolver_scenario() {
    let out = stdin_rows(
        FilterKind::LocationAmbiguous,
        r#"{"mention.id": "7", "canonical_entity.id": "12"}"#,
    );
    assert_eq!(out, [json!({"entity_id": 12, "mention_id": 7})]);
}

#[test]
fn ngram_scenario() {
    let out = stdin_rows(
        FilterKind::MentionNgram1,
        r#"{"mention.id": "3", "mention.text": "the quick fox"}"#,
    );
    assert_eq!(
        out,
        [
            json!({"mention_id": 3, "value": "the"}),
            json!({"mention_id": 3, "value": "quick"}),
            json!({"mention_id": 3, "value": "fox"}),
        ]
    );
}

#[test]
fn combiner_scenario() {
    let out = stdin_rows(
        FilterKind::CombineRound1,
        r#"{"mention_id": "5", "entity_id": "9"}"#,
    );
    assert_eq!(out, [json!({"entity_id": 9, "mention_id": 5, "is_correct": null})]);
}

#[test]
fn pass_through_scenario() {
    let out = stdin_rows(
        FilterKind::PassThroughRound2,
        r#"{"el_candidate_link.mention_id": "1", "el_candidate_link.entity_id": "2"}"#,
    );
    assert_eq!(out, [json!({"entity_id": 2, "mention_id": 1, "is_correct": null})]);
}

#[test]
fn empty_text_emits_nothing() {
    let out = stdin_rows(
        FilterKind::MentionNgram1,
        r#"{"mention.id": "3", "mention.text": ""}"#,
    );
    assert!(out.is_empty());
}

#[test]
fn numeric_fidelity() {
    let input = ["42", "-3", "0", "9223372036854775807"]
        .iter()
        .map(|raw| format!(r#"{{"mention_id": "{raw}", "entity_id": "{raw}"}}"#))
        .collect::<Vec<_>>()
        .join("\n");
    let out = stdin_rows(FilterKind::CombineRound1, &input);
    let ids: Vec<i64> = out.iter().map(|row| row["mention_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [42, -3, 0, i64::MAX]);
}

#[test]
fn combiner_output_feeds_back_unchanged() {
    let input = "{\"mention_id\": \"5\", \"entity_id\": \"9\"}\n{\"mention_id\": 6, \"entity_id\": 10}\n";
    let config = FilterConfig::default();
    let once = run_on(FilterKind::CombineRound1, &config, &[], input.as_bytes()).unwrap();
    let twice = run_on(FilterKind::CombineRound1, &config, &[], once.as_bytes()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn output_text_matches_legacy_format() {
    let out = run_on(
        FilterKind::LocationAmbiguous,
        &FilterConfig::default(),
        &[],
        b"{\"mention.id\": \"7\", \"canonical_entity.id\": \"12\"}\r\n",
    )
    .unwrap();
    assert_eq!(out, "{\"entity_id\": 12, \"mention_id\": 7}\n");
}

#[test]
fn latin1_bytes_become_escaped_code_points() {
    // 0xE9 is "é" in latin-1 and would be invalid as utf-8
    let input = b"{\"mention.id\": \"1\", \"mention.text\": \"caf\xe9 noir\"}\n";
    let out = run_on(FilterKind::MentionNgram1, &FilterConfig::default(), &[], input).unwrap();
    assert_eq!(
        out,
        "{\"mention_id\": 1, \"value\": \"caf\\u00e9\"}\n{\"mention_id\": 1, \"value\": \"noir\"}\n"
    );
}

#[test]
fn utf8_mode_rejects_latin1_bytes() {
    let config = FilterConfig {
        input_encoding: InputEncoding::Utf8,
        ..FilterConfig::default()
    };
    let input = b"{\"mention.id\": \"1\", \"mention.text\": \"caf\xe9\"}\n";
    match run_on(FilterKind::MentionNgram1, &config, &[], input) {
        Err(RunError::Line(err)) => assert!(matches!(err.error, FilterError::Transcode { .. })),
        other => panic!("expected transcode failure, got {other:?}"),
    }
}

#[test]
fn missing_field_aborts() {
    let result = run_on(
        FilterKind::LocationAmbiguous,
        &FilterConfig::default(),
        &[],
        br#"{"mention.id": "7"}"#,
    );
    match result {
        Err(RunError::Line(err)) => match err.error {
            FilterError::MissingField { field } => assert_eq!(field, "canonical_entity.id"),
            other => panic!("unexpected error: {other}"),
        },
        other => panic!("expected missing field, got {other:?}"),
    }
}

#[test]
fn files_are_read_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("part-0.json");
    let second = dir.path().join("part-1.json");
    std::fs::write(&first, "{\"mention_id\": \"1\", \"entity_id\": \"10\"}\n").unwrap();
    std::fs::write(&second, "{\"mention_id\": \"2\", \"entity_id\": \"20\"}\n").unwrap();

    let out = run_on(
        FilterKind::CombineRound1,
        &FilterConfig::default(),
        &[first, second],
        b"{\"mention_id\": \"99\", \"entity_id\": \"99\"}\n",
    )
    .unwrap();
    let ids: Vec<i64> = rows(&out).iter().map(|r| r["mention_id"].as_i64().unwrap()).collect();
    // stdin is not read when files are given
    assert_eq!(ids, [1, 2]);
}

#[test]
fn dash_reads_stdin_between_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"mention_id": "1", "entity_id": "10"}}"#).unwrap();

    let out = run_on(
        FilterKind::CombineRound1,
        &FilterConfig::default(),
        &[PathBuf::from("-"), file.path().to_path_buf()],
        b"{\"mention_id\": \"99\", \"entity_id\": \"99\"}\n",
    )
    .unwrap();
    let ids: Vec<i64> = rows(&out).iter().map(|r| r["mention_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [99, 1]);
}

#[test]
fn error_names_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"mention_id": "1", "entity_id": "10"}}"#).unwrap();
    writeln!(file, "{{broken").unwrap();

    match run_on(
        FilterKind::CombineRound1,
        &FilterConfig::default(),
        &[file.path().to_path_buf()],
        b"",
    ) {
        Err(RunError::Line(err)) => {
            assert_eq!(err.source_name, SourceName::File(file.path().to_path_buf()));
            assert_eq!(err.line, 2);
            assert!(matches!(err.error, FilterError::Json(_)));
        }
        other => panic!("expected json failure, got {other:?}"),
    }
}

#[test]
fn unreadable_file_fails_after_earlier_output() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    std::fs::write(&good, "{\"mention_id\": \"1\", \"entity_id\": \"10\"}\n").unwrap();
    let missing = dir.path().join("missing.json");

    let mut stdin = Cursor::new(Vec::new());
    let mut out = Vec::new();
    let result = run(
        FilterKind::CombineRound1,
        &FilterConfig::default(),
        &[good, missing.clone()],
        &mut stdin,
        &mut out,
    );
    match result {
        Err(RunError::Open { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected open failure, got {other:?}"),
    }
    assert_eq!(rows(&String::from_utf8(out).unwrap()).len(), 1);
}

#[test]
fn skip_policy_drops_only_bad_lines() {
    let config = FilterConfig {
        on_error: ErrorPolicy::Skip,
        ..FilterConfig::default()
    };
    let input = concat!(
        "{\"mention.id\": \"1\", \"canonical_entity.id\": \"2\"}\n",
        "{\"mention.id\": \"one\", \"canonical_entity.id\": \"2\"}\n",
        "[]\n",
        "\n",
        "{\"mention.id\": \"3\", \"canonical_entity.id\": \"4\"}\n",
    );
    let out = run_on(FilterKind::LocationAmbiguous, &config, &[], input.as_bytes()).unwrap();
    assert_eq!(
        rows(&out),
        [
            json!({"entity_id": 2, "mention_id": 1}),
            json!({"entity_id": 4, "mention_id": 3}),
        ]
    );
}
