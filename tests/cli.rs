//! Runs the `cifxtal` binary and checks exit codes and output.

use assert_cmd::Command;
use predicates::prelude::*;

fn cifxtal() -> Command {
    let mut cmd = Command::cargo_bin("cifxtal").expect("cifxtal binary");
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    // keep the user's settings file out of the way
    cmd.args(["--config", "/nonexistent/cifxtal/settings.json"]);
    cmd
}

#[test]
fn lists_known_crystals() {
    cifxtal()
        .arg("--list-known")
        .assert()
        .success()
        .stdout(predicate::str::contains("forsterite").and(predicate::str::contains("nickel")));
}

#[test]
fn text_summary_of_a_file() {
    cifxtal()
        .arg("data/forsterite.cif")
        .assert()
        .success()
        .stdout(predicate::str::contains("Formula: Mg9 O24 Si8"))
        .stdout(predicate::str::contains("Laue mmm"));
}

#[test]
fn json_output_keeps_argument_order() {
    let output = cifxtal()
        .args(["--format", "json", "data/silicon.cif", "data/nickel.cif"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["crystal"]["name"], "Silicon");
    assert_eq!(entries[1]["crystal"]["name"], "Nickel");
    assert_eq!(entries[1]["crystal"]["sites"].as_array().unwrap().len(), 4);
}

#[test]
fn failed_load_sets_exit_status() {
    cifxtal()
        .args(["data/nickel.cif", "data/missing.cif"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Nickel"))
        .stderr(predicate::str::contains("missing.cif"));
}

#[test]
fn no_input_is_a_usage_error() {
    cifxtal().assert().failure().code(2);
}

#[test]
fn symmetry_check_on_known_crystal() {
    cifxtal()
        .args(["--known", "silicon", "--check-symmetry"])
        .assert()
        .success()
        .stdout(predicate::str::contains("matches the declared group"));
}
