use std::process::{Command, Output};

fn argot() -> Command {
    Command::new(env!("CARGO_BIN_EXE_argot"))
}

fn run(args: &[&str]) -> Output {
    argot()
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to run argot {args:?}: {e}"))
}

fn assert_success(out: &Output, what: &str) -> String {
    assert!(
        out.status.success(),
        "{what} failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn assert_parse_error(args: &[&str], expected: &str) {
    let out = run(args);
    assert_eq!(
        out.status.code(),
        Some(1),
        "argot {args:?} should fail with status 1, stdout:\n{}",
        String::from_utf8_lossy(&out.stdout),
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.starts_with("Error: ") && stderr.contains(expected),
        "unexpected stderr for {args:?}:\n{stderr}"
    );
    assert!(out.stdout.is_empty(), "nothing should reach stdout on error");
}

#[test]
fn help_works() {
    let stdout = assert_success(&run(&["--help"]), "argot --help");
    assert!(
        stdout.starts_with("Usage: argot") && stdout.contains("boo"),
        "unexpected help output:\n{stdout}"
    );

    let short = assert_success(&run(&["-h"]), "argot -h");
    assert_eq!(short, stdout);
}

#[test]
fn version_works() {
    let stdout = assert_success(&run(&["--version"]), "argot --version");
    assert_eq!(stdout, format!("argot {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_command_prints_command_help() {
    let stdout = assert_success(&run(&["help", "boo"]), "argot help boo");
    assert!(
        stdout.starts_with("Usage: argot boo"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn command_help_flag_short_circuits_callback() {
    let stdout = assert_success(&run(&["boo", "--help"]), "argot boo --help");
    assert!(stdout.starts_with("Usage: argot boo"));
    assert!(!stdout.contains("callback"));
}

#[test]
fn dump_reflects_parsed_arguments() {
    let stdout = assert_success(
        &run(&["-bsif", "value", "202", "2.2", "foo", "--", "-x"]),
        "argot -bsif",
    );
    assert!(stdout.starts_with("Flags/Options:\n"), "got:\n{stdout}");
    assert!(stdout.contains("  bool: 1\n"), "got:\n{stdout}");
    assert!(stdout.contains("  string: (default) [value]\n"), "got:\n{stdout}");
    assert!(stdout.contains("  int: (123) [202]\n"), "got:\n{stdout}");
    assert!(stdout.contains("  float: (1.000000) [2.200000]\n"), "got:\n{stdout}");
    assert!(stdout.contains("Arguments:\n  foo\n  -x\n"), "got:\n{stdout}");
    assert!(stdout.ends_with("Command:\n  [none]\n"), "got:\n{stdout}");
}

#[test]
fn command_runs_callback_before_root_dump() {
    let stdout = assert_success(&run(&["boo", "-f", "--bar", "x", "arg"]), "argot boo");

    let callback = stdout
        .find("---------- callback: boo ----------")
        .expect("callback frame missing");
    let root = stdout.rfind("Flags/Options:").expect("root dump missing");
    assert!(callback < root);

    let frame = &stdout[callback..root];
    assert!(frame.contains("  foo: 1\n"), "got:\n{frame}");
    assert!(frame.contains("  bar: (default) [x]\n"), "got:\n{frame}");
    assert!(frame.contains("Arguments:\n  arg\n"), "got:\n{frame}");
    assert!(stdout.ends_with("Command:\n  boo\n"), "got:\n{stdout}");
    assert_eq!(stdout.matches("callback: boo").count(), 1);
}

#[test]
fn json_output_is_a_snapshot() {
    let stdout = assert_success(
        &run(&["--json", "--list", "a", "b", "-i", "0x10", "pos"]),
        "argot --json",
    );
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!("invalid json: {e}\n{stdout}");
    });

    let options = json["options"].as_array().expect("options array");
    let list = options
        .iter()
        .find(|o| o["name"] == "list")
        .expect("list option");
    assert_eq!(list["kind"], "str");
    assert_eq!(list["values"], serde_json::json!(["a", "b"]));

    let int = options.iter().find(|o| o["name"] == "i").expect("int alias");
    assert_eq!(int["values"], serde_json::json!([16]));
    assert_eq!(int["fallback"], 123);

    assert_eq!(json["positionals"], serde_json::json!(["pos"]));
    assert!(json.get("command").is_none());
}

#[test]
fn parse_errors_exit_with_status_one() {
    assert_parse_error(&["--nope"], "--nope is not a recognised flag or option name");
    assert_parse_error(&["-bx"], "'x' in -bx is not a recognised flag or option name");
    assert_parse_error(&["--string"], "missing argument for --string");
    assert_parse_error(&["--int=12x"], "cannot parse '12x' as an integer");
    assert_parse_error(&["--bool=1"], "--bool is a flag and cannot take a value");
    assert_parse_error(&["help", "nope"], "'nope' is not a recognised command");
    assert_parse_error(&["help"], "the help command requires an argument");
    assert_parse_error(&["boo", "--int", "1"], "--int is not a recognised flag or option name");
}
