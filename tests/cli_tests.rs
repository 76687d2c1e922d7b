//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GATES: &str = r#"
(header "symbol" (version "1.1"))
(symbol
	(rect 0 0 40 20)
	(text "inv" (rect 2 2 20 14))
	(text "inst" (rect 2 20 20 32))
	(port (pt 0 8) (input) (text "A" (rect 0 0 8 12)) (text "a" (rect 0 0 8 12)))
	(port (pt 40 8) (output) (text "Y" (rect 0 0 8 12)) (text "y" (rect 0 0 8 12)))
)
"#;

const IO: &str = r#"
(pin (input) (rect 0 0 80 16) (text "INPUT" (rect 4 0 30 12)) (text "pin_name" (rect 8 0 50 12)))
"#;

/// Build command for the netsheet binary.
fn netsheet() -> Command {
    cargo_bin_cmd!("netsheet")
}

/// Working directory with `libs.txt` -> gates.bsf and `mylibs.txt` -> io.bsf.
fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("gates.bsf"), GATES).unwrap();
    std::fs::write(dir.path().join("io.bsf"), IO).unwrap();
    std::fs::write(dir.path().join("libs.txt"), "gates.bsf\n").unwrap();
    std::fs::write(dir.path().join("mylibs.txt"), "io.bsf\n").unwrap();
    dir
}

#[test]
fn test_cli_help() {
    netsheet()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--libs"));
}

#[test]
fn test_cli_stdin_to_stdout() {
    let dir = project();
    netsheet()
        .current_dir(dir.path())
        .write_stdin("input clk\ninv g1 port { a: in1 y: out1 }\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "(header \"graphic\" (version \"1.4\"))\n",
        ))
        .stdout(predicate::str::contains("(text \"g1\" (rect 2 20 20 32 ))"))
        .stdout(predicate::str::contains("(text \"clk\" (rect 8 0 50 12 ))"))
        .stdout(predicate::str::contains("\t(pt 272 328)\n"));
}

#[test]
fn test_cli_netlist_file_and_output_file() {
    let dir = project();
    std::fs::write(dir.path().join("design.net"), "inv\nnext_col\ninv\n").unwrap();
    netsheet()
        .current_dir(dir.path())
        .args(["design.net", "-o", "design.bdf"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let sheet = std::fs::read_to_string(dir.path().join("design.bdf")).unwrap();
    assert!(sheet.contains("(text \"inv_0\" "));
    assert!(sheet.contains("\t(rect 720 320 760 340 )\n"));
}

#[test]
fn test_cli_undefined_signature_fails_without_output() {
    let dir = project();
    netsheet()
        .current_dir(dir.path())
        .write_stdin("inv\nnand2 n\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("stdin:2:1: nand2 is undefined"));
}

#[test]
fn test_cli_library_lexing_error() {
    let dir = project();
    std::fs::write(dir.path().join("io.bsf"), "(pin (input) @)\n").unwrap();
    netsheet()
        .current_dir(dir.path())
        .write_stdin("inv\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("io.bsf:1:14: unexpected char '@'"));
}

#[test]
fn test_cli_missing_library_file() {
    let dir = project();
    std::fs::write(dir.path().join("mylibs.txt"), "gone.bsf\n").unwrap();
    netsheet()
        .current_dir(dir.path())
        .write_stdin("inv\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("can't open gone.bsf"));
}

#[test]
fn test_cli_custom_list_paths() {
    let dir = project();
    std::fs::rename(dir.path().join("libs.txt"), dir.path().join("project.txt")).unwrap();
    netsheet()
        .current_dir(dir.path())
        .args(["--libs", "project.txt", "--user-libs", "none.txt"])
        .write_stdin("inv x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(text \"x\" "));
}
