#![cfg(all(unix, feature = "cli"))]

use std::process::{Command, Output};

use serde_json::Value;

fn aptlink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aptlink"))
        .args(["--log-level", "error", "--format", "json"])
        .args(args)
        .output()
        .expect("aptlink should run")
}

fn json_lines(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line should be json"))
        .collect()
}

#[test]
fn encode_header_only_frame() {
    let output = aptlink(&["encode", "MOD_IDENTIFY"]);
    assert!(output.status.success(), "{output:?}");

    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["hex"], "23 02 00 00 50 01");
    assert_eq!(lines[0]["len"], 6);
}

#[test]
fn encode_payload_frame_sets_flag() {
    let output = aptlink(&["encode", "0x0410", "1", "100", "--dest", "0x21"]);
    assert!(output.status.success(), "{output:?}");

    let lines = json_lines(&output);
    assert_eq!(lines[0]["hex"], "10 04 06 00 a1 01 01 00 64 00 00 00");
}

#[test]
fn encode_rejects_wrong_value_count() {
    let output = aptlink(&["encode", "MOT_SET_POSCOUNTER", "1"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn decode_payload_frame() {
    let output = aptlink(&["decode", "12 04 06 00 81 50 01 00 64 00 00 00"]);
    assert!(output.status.success(), "{output:?}");

    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], 0x0412);
    assert_eq!(lines[0]["dest"], 0x01);
    assert_eq!(lines[0]["source"], 0x50);
    assert_eq!(lines[0]["payload"], serde_json::json!([1, 100]));
}

#[test]
fn decode_several_frames() {
    let output = aptlink(&["decode", "230200005001", "120406008150010064000000"]);
    assert!(output.status.success(), "{output:?}");

    let lines = json_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["params"], serde_json::json!([0, 0]));
    assert_eq!(lines[1]["id"], 0x0412);
}

#[test]
fn decode_truncated_capture_is_invalid_data() {
    let output = aptlink(&["decode", "12 04 06 00 81 50 01 00"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn describe_reports_layout() {
    let output = aptlink(&["describe", "MOT_GET_VELPARAMS"]);
    assert!(output.status.success(), "{output:?}");

    let lines = json_lines(&output);
    assert_eq!(lines[0]["payload_len"], 14);
    assert_eq!(lines[0]["fields"].as_array().map(Vec::len), Some(4));
}

#[test]
fn describe_unknown_message_is_usage_error() {
    let output = aptlink(&["describe", "NOT_A_MESSAGE"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn ids_lists_every_message() {
    let output = aptlink(&["ids"]);
    assert!(output.status.success(), "{output:?}");

    let lines = json_lines(&output);
    let rows = lines[0].as_array().expect("ids output should be an array");
    assert!(rows.len() >= 140);
    assert!(rows
        .iter()
        .any(|row| row["name"] == "MGMSG_LA_SET_PARAMS" && row["variable_length"] == true));
}

#[test]
fn query_against_missing_device_is_transport_error() {
    let output = aptlink(&[
        "query",
        "/nonexistent/aptlink-device",
        "MOT_REQ_VELPARAMS",
        "MOT_GET_VELPARAMS",
    ]);
    assert_eq!(output.status.code(), Some(3));
}
