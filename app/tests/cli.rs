use std::io::Write;

use assert_cmd::Command;

fn problem_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".p").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn solve_reports_equisatisfiable() {
    let file = problem_file(
        "thf(c_type, type, c: $i).
         thf(conj, conjecture, c = c).",
    );
    Command::cargo_bin("peregrine")
        .unwrap()
        .arg("solve")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("SZS status EquiSatisfiable"));
}

#[test]
fn solve_reports_syntax_errors() {
    let file = problem_file("thf(broken.");
    Command::cargo_bin("peregrine")
        .unwrap()
        .arg("solve")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicates::str::contains("SZS status SyntaxError"));
}

#[test]
fn parse_lists_inputs() {
    let file = problem_file(
        "thf(c_type, type, c: $i).
         thf(a1, axiom, c = c).",
    );
    Command::cargo_bin("peregrine")
        .unwrap()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("2 input(s)"));
}
