// tests/golden_smoke.rs
use std::process::Command;

#[test]
fn golden_smoke_runs_load_ndjson() {
    let tmp = tempfile::tempdir().unwrap();
    let in_path = tmp.path().join("tiny.ndjson");
    let out_path = tmp.path().join("out.json");

    std::fs::write(
        &in_path,
        r#"
{"customer":1,"delta":"100"}
{"customer":2,"delta":"200.5"}
{"customer":3,"delta":"200.5"}
{"customer":1,"delta":"-100"}
"#,
    )
    .unwrap();

    let exe = env!("CARGO_BIN_EXE_rankboard");
    let status = Command::new(exe)
        .args([
            "load",
            "--file",
            in_path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
        ])
        .status()
        .unwrap();

    assert!(status.success());
    let out = std::fs::read_to_string(&out_path).unwrap();
    assert!(out.contains(r#""type":"final""#));
    // tie on 200.5 breaks toward customer 2; customer 1 netted to zero
    assert!(out.contains(r#"{"customer_id":2,"score":"200.5","rank":1}"#));
    assert!(out.contains(r#"{"customer_id":3,"score":"200.5","rank":2}"#));
    assert!(!out.contains(r#""customer_id":1"#));
}
