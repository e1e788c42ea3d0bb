use assert_cmd::Command;

fn boxfish() -> Command {
    Command::cargo_bin("boxfish").expect("binary builds")
}

#[test]
fn renders_stdin_to_ascii() {
    boxfish()
        .write_stdin("[ A ] -> [ B ]")
        .assert()
        .success()
        .stdout(predicates::str::contains("| A |"))
        .stdout(predicates::str::contains(">"));
}

#[test]
fn renders_a_file_argument() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.txt");
    std::fs::write(&path, "digraph { a -> b; }").unwrap();
    boxfish()
        .arg(path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicates::str::contains("| a |"));
}

#[test]
fn writes_the_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    boxfish()
        .args(["-o", out.to_str().unwrap()])
        .write_stdin("[X] -> [Y]")
        .assert()
        .success();
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("| X |"));
}

#[test]
fn json_format_dumps_the_cell_map() {
    let output = boxfish()
        .args(["--format", "json"])
        .write_stdin("[A] -> [B]")
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(v["edges"][0]["from"], "A");
    assert!(!v["cells"].as_array().unwrap().is_empty());
    assert!(v["report"]["score"].as_u64().unwrap() > 0);
}

#[test]
fn boxart_format_uses_unicode() {
    boxfish()
        .args(["-f", "boxart"])
        .write_stdin("[A] -> [B]")
        .assert()
        .success()
        .stdout(predicates::str::contains("│ A │"));
}

#[test]
fn flow_override_rotates_the_layout() {
    let east = boxfish().write_stdin("[A] -> [B]").output().unwrap();
    let south = boxfish()
        .args(["--flow", "south"])
        .write_stdin("[A] -> [B]")
        .output()
        .unwrap();
    let east_lines = east.stdout.iter().filter(|&&b| b == b'\n').count();
    let south_lines = south.stdout.iter().filter(|&&b| b == b'\n').count();
    assert!(south_lines > east_lines);
}

#[test]
fn parse_errors_exit_nonzero() {
    boxfish()
        .write_stdin("[A] ->")
        .assert()
        .failure()
        .stderr(predicates::str::contains("parse error"));
}

#[test]
fn stats_go_to_stderr() {
    boxfish()
        .arg("--stats")
        .write_stdin("[A] -> [B]")
        .assert()
        .success()
        .stderr(predicates::str::contains("score"));
}
