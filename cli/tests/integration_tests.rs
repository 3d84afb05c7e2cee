use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Spec document shared by most tests.
fn write_spec(dir: &Path, file: &str) -> PathBuf {
    let yaml = r#"name: greet
description: Say hello
example: greet --name world
help: true
switches:
  - name: name
    type: string
    description: Who to greet
    aliases: [n]
    required: true
  - name: times
    type: integer
    description: Repetitions
    default: 1
"#;
    let path = dir.join(file);
    fs::write(&path, yaml).expect("failed to write spec");
    path
}

fn commando(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_commando"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run commando")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_prints_values_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), "greet.yaml");

    let out = commando(&["run", "--spec", spec.to_str().unwrap(), "--", "-n", "world"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let values: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(values, serde_json::json!({ "name": "world", "times": 1 }));
}

#[test]
fn run_help_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), "greet.yaml");

    let out = commando(&["run", "--spec", spec.to_str().unwrap(), "--", "--help", "--bogus"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).starts_with("greet - Say hello\n\nArguments:\n"));
}

#[test]
fn run_unknown_option_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), "greet.yaml");

    let out = commando(&["run", "--spec", spec.to_str().unwrap(), "--", "--bogus"]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(stderr(&out).trim(), "Unknown options: --bogus");
}

#[test]
fn run_missing_required_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), "greet.yaml");

    let out = commando(&["run", "--spec", spec.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(stderr(&out).trim(), "Missing required options: --name");
}

#[test]
fn run_yaml_output() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), "greet.yaml");

    let out = commando(&[
        "run",
        "--spec",
        spec.to_str().unwrap(),
        "--format",
        "yaml",
        "--",
        "--name=x",
        "--times",
        "3",
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "name: x\ntimes: 3");
}

// ---------------------------------------------------------------------------
// render / validate
// ---------------------------------------------------------------------------

#[test]
fn render_prints_help_text() {
    let dir = tempfile::tempdir().unwrap();
    let spec = write_spec(dir.path(), "greet.yaml");

    let out = commando(&["render", "--spec", spec.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "greet - Say hello\n\
         \n\
         Arguments:\n\
         \x20 --name, -n : (Required) Who to greet\n\
         \x20 --times : Repetitions (Default: 1)\n\
         \x20 --help, -h : Print help message\n\
         \n\
         Example: greet --name world\n"
    );
}

#[test]
fn validate_reports_issues() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_spec(dir.path(), "good.yaml");
    let bad = dir.path().join("bad.json");
    fs::write(
        &bad,
        r#"{"name":"tool","switches":[{"name":"mode","type":"string","default":"x","required":true}]}"#,
    )
    .unwrap();

    let ok = commando(&["validate", "--spec", good.to_str().unwrap()]);
    assert!(ok.status.success());
    assert!(stdout(&ok).contains("Validated 1 spec file(s)."));

    let out = commando(&[
        "validate",
        "--spec",
        good.to_str().unwrap(),
        "--spec",
        bad.to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("required switch has an unreachable default: mode"));
}

#[test]
fn unsupported_spec_format_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spec.toml");
    fs::write(&path, "name = 'x'").unwrap();

    let out = commando(&["render", "--spec", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("error: Failed to load"));
}
