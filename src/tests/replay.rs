use super::run;
use crate::selector::Fallback;
use crate::visibility::SectionId;
use crate::Error;
use serde_json::Value;

fn replay(input: &str, order: &[&str]) -> Vec<Value> {
    let mut out = Vec::new();
    let order = order.iter().map(|id| SectionId::from(*id)).collect();
    run(input.as_bytes(), &mut out, order, Fallback::DocumentOrder).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_tie_scenario_replayed() {
    let input = r#"{"entries":[{"id":"A","ratio":0.4,"top":10},{"id":"B","ratio":0.4,"top":-5}]}"#;
    let lines = replay(input, &["A", "B", "C"]);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["active"], "B");
    assert_eq!(lines[0]["changed"], true);
    assert_eq!(lines[0]["visible"], serde_json::json!(["A", "B"]));
}

#[test]
fn test_membership_only_entries_use_document_order() {
    let input = r#"{"entries":[{"id":"B","visible":true},{"id":"A","visible":true}]}"#;
    let lines = replay(input, &["A", "B"]);
    assert_eq!(lines[0]["active"], "A");
}

#[test]
fn test_order_record_and_blank_lines() {
    let input = concat!(
        "{\"order\":[\"x\",\"y\"]}\n",
        "\n",
        "{\"entries\":[{\"id\":\"y\",\"ratio\":0.2,\"top\":50},{\"id\":\"x\",\"ratio\":0.9,\"top\":0}]}\n",
        "{\"entries\":[{\"id\":\"x\",\"ratio\":0}]}\n",
    );
    let lines = replay(input, &[]);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["batch"], 1);
    assert_eq!(lines[0]["active"], "x");
    assert_eq!(lines[1]["active"], "y", "x left the view");
    assert_eq!(lines[1]["visited"], 2);
}

#[test]
fn test_everything_leaving_yields_null_active() {
    let input = concat!(
        "{\"entries\":[{\"id\":\"A\",\"ratio\":0.5}]}\n",
        "{\"entries\":[{\"id\":\"A\",\"ratio\":0.0,\"visible\":false}]}\n",
    );
    let lines = replay(input, &["A"]);
    assert!(lines[1]["active"].is_null());
}

#[test]
fn test_malformed_line_reports_line_number() {
    let input = "{\"entries\":[]}\nnot json\n";
    let mut out = Vec::new();
    let err = run(input.as_bytes(), &mut out, Vec::new(), Fallback::DocumentOrder).unwrap_err();
    assert!(matches!(err, Error::Replay { line: 2, .. }));
}
