//! # Snapshot Parsing Tests
//!
//! Verifies that snapshot parsing is defensive: only structural problems are
//! errors, and every mistyped field degrades to a default.

use pipeview_core::common::SnapshotError;
use pipeview_core::history::Stage;
use pipeview_core::snapshot::coerce::{parse_int_prefix, to_bool, to_i64, to_text, to_u64};
use pipeview_core::snapshot::{ForwardSource, LatchNaming, PipelineRegister, Snapshot};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

// ══════════════════════════════════════════════════════════
// Coercion
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("42", 42)]
#[case("  7", 7)]
#[case("-3", -3)]
#[case("+9", 9)]
#[case("12abc", 12)]
#[case("0x1f", 31)]
#[case("0X10", 16)]
#[case("3.9", 3)]
#[case("", 0)]
#[case("abc", 0)]
#[case("-", 0)]
#[case("0xg", 0)]
fn test_parse_int_prefix(#[case] text: &str, #[case] expected: i64) {
    assert_eq!(parse_int_prefix(text), expected, "parsing {text:?}");
}

#[test]
fn test_parse_int_prefix_saturates() {
    assert_eq!(parse_int_prefix("99999999999999999999999"), i64::MAX);
}

#[rstest]
#[case(json!(5), 5)]
#[case(json!(-2), -2)]
#[case(json!(2.9), 2)]
#[case(json!(-2.9), -2)]
#[case(json!("15"), 15)]
#[case(json!(true), 0)]
#[case(json!(null), 0)]
#[case(json!([1]), 0)]
#[case(json!({"n": 1}), 0)]
fn test_to_i64(#[case] value: Value, #[case] expected: i64) {
    assert_eq!(to_i64(&value), expected);
}

#[test]
fn test_to_u64_clamps_negative() {
    assert_eq!(to_u64(&json!(-5)), 0);
    assert_eq!(to_u64(&json!("8")), 8);
}

#[test]
fn test_to_bool_accepts_true_and_string_true_only() {
    assert!(to_bool(&json!(true)));
    assert!(to_bool(&json!("true")));
    assert!(!to_bool(&json!("TRUE")));
    assert!(!to_bool(&json!(1)));
    assert!(!to_bool(&json!(null)));
}

#[test]
fn test_to_text() {
    assert_eq!(to_text(&json!("0x40")), Some("0x40".to_owned()));
    assert_eq!(to_text(&json!(64)), Some("64".to_owned()));
    assert_eq!(to_text(&json!("")), None);
    assert_eq!(to_text(&json!(null)), None);
}

// ══════════════════════════════════════════════════════════
// Schema
// ══════════════════════════════════════════════════════════

#[test]
fn test_parse_full_snapshot() {
    let snapshot = Snapshot::from_json(
        r#"{
            "pipeline": {
                "IF_ID": {"valid": true, "seq_id": 4, "pc": "0x10", "instr": "lw x2, 0(x1)", "line": 5, "isStalled": true},
                "ID_EX": {"valid": "true", "seq_id": "3", "forward_a": "ExMem", "forward_b": "MemWb", "forward_branch_a": "ExMem"},
                "EX_MEM": {"valid": false, "seq_id": 0},
                "Retired": {"valid": true, "seq_id": 1}
            },
            "vm": {"cycle_count": "12", "instructions_retired": 4, "stall_cycles": "2", "program_counter": "0x14"}
        }"#,
    )
    .unwrap();

    let if_id = snapshot.pipeline.register(PipelineRegister::IfId).unwrap();
    assert_eq!(if_id.sequence(), Some(4));
    assert_eq!(if_id.display_pc(), Some("0x10"));
    assert_eq!(if_id.display_instr(), Some("lw x2, 0(x1)"));
    assert_eq!(if_id.source_line(), Some(5));
    assert!(if_id.is_stalled);

    let id_ex = snapshot.pipeline.valid(PipelineRegister::IdEx).unwrap();
    assert_eq!(id_ex.seq_id, 3);
    assert_eq!(id_ex.forward_a, ForwardSource::ExMem);
    assert_eq!(id_ex.forward_b, ForwardSource::MemWb);
    assert_eq!(id_ex.forward_branch_a, ForwardSource::ExMem);
    assert_eq!(id_ex.forward_branch_b, ForwardSource::None);

    assert!(snapshot.pipeline.register(PipelineRegister::ExMem).is_some());
    assert!(snapshot.pipeline.valid(PipelineRegister::ExMem).is_none());
    assert!(snapshot.pipeline.register(PipelineRegister::MemWb).is_none());

    assert_eq!(snapshot.vm.cycle(), Some(12));
    assert_eq!(snapshot.vm.instructions_retired, 4);
    assert_eq!(snapshot.vm.stall_cycles, 2);
    assert_eq!(snapshot.vm.program_counter.as_deref(), Some("0x14"));
}

#[test]
fn test_mistyped_fields_degrade_to_defaults() {
    let snapshot = Snapshot::from_json(
        r#"{
            "pipeline": {
                "IF_ID": {"valid": 1, "seq_id": "abc", "line": "x", "forward_a": 3},
                "ID_EX": "garbage",
                "MEM_WB": null
            },
            "vm": {"cycle_count": [1], "instructions_retired": -3, "stall_cycles": {}}
        }"#,
    )
    .unwrap();

    let if_id = snapshot.pipeline.register(PipelineRegister::IfId).unwrap();
    assert!(!if_id.valid);
    assert_eq!(if_id.sequence(), None);
    assert_eq!(if_id.source_line(), None);
    assert_eq!(if_id.forward_a, ForwardSource::None);
    assert!(snapshot.pipeline.register(PipelineRegister::IdEx).is_none());
    assert!(snapshot.pipeline.register(PipelineRegister::MemWb).is_none());

    assert_eq!(snapshot.vm.cycle(), None);
    assert_eq!(snapshot.vm.instructions_retired, 0);
    assert_eq!(snapshot.vm.stall_cycles, 0);
}

#[test]
fn test_missing_sections_default() {
    let snapshot = Snapshot::from_json("{}").unwrap();
    assert_eq!(snapshot, Snapshot::default());

    let snapshot = Snapshot::from_json(r#"{"pipeline": 4, "vm": "x"}"#).unwrap();
    assert_eq!(snapshot, Snapshot::default());
}

#[test]
fn test_unknown_fields_are_ignored() {
    let snapshot =
        Snapshot::from_json(r#"{"pipeline": {"WB_X": {}}, "vm": {"cycle_count": 2, "extra": true}, "v": 2}"#)
            .unwrap();
    assert_eq!(snapshot.vm.cycle(), Some(2));
}

#[test]
fn test_current_pc_fallback_and_preference() {
    let snapshot = Snapshot::from_json(
        r#"{"pipeline": {
            "IF_ID": {"CurrentPC": "0x8"},
            "ID_EX": {"pc": "0x4", "CurrentPC": "0x8"}
        }}"#,
    )
    .unwrap();
    let pc = |register| {
        snapshot
            .pipeline
            .register(register)
            .and_then(|occupant| occupant.display_pc())
    };
    assert_eq!(pc(PipelineRegister::IfId), Some("0x8"));
    assert_eq!(pc(PipelineRegister::IdEx), Some("0x4"));
}

#[rstest]
#[case("[]", "an array")]
#[case("null", "null")]
#[case("3", "a number")]
#[case("\"x\"", "a string")]
#[case("false", "a boolean")]
fn test_non_object_is_rejected(#[case] text: &str, #[case] kind: &str) {
    let err = Snapshot::from_json(text).unwrap_err();
    assert!(matches!(err, SnapshotError::NotAnObject(found) if found == kind));
    assert!(err.to_string().contains(kind));
}

#[test]
fn test_invalid_json_is_rejected() {
    let err = Snapshot::from_json("{\"vm\":").unwrap_err();
    assert!(matches!(err, SnapshotError::Json(_)));
}

// ══════════════════════════════════════════════════════════
// Latches
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(LatchNaming::Consumer, [Stage::Decode, Stage::Execute, Stage::Memory, Stage::Writeback, Stage::Writeback])]
#[case(LatchNaming::Producer, [Stage::Fetch, Stage::Decode, Stage::Execute, Stage::Memory, Stage::Writeback])]
fn test_latch_naming(#[case] naming: LatchNaming, #[case] expected: [Stage; 5]) {
    let stages = PipelineRegister::ALL.map(|register| naming.stage_for(register));
    assert_eq!(stages, expected);
}

#[test]
fn test_forward_source_parse() {
    assert_eq!(ForwardSource::parse("ExMem"), ForwardSource::ExMem);
    assert_eq!(ForwardSource::parse("MemWb"), ForwardSource::MemWb);
    assert_eq!(ForwardSource::parse("None"), ForwardSource::None);
    assert_eq!(ForwardSource::parse("exmem"), ForwardSource::None);
    assert!(!ForwardSource::None.is_forwarded());
    assert!(ForwardSource::MemWb.is_forwarded());
}
