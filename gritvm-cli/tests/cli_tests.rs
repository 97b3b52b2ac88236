//! Integration tests for the GritVM CLI.
//!
//! These tests invoke the `gvm` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn gvm() -> Command {
    Command::cargo_bin("gvm").unwrap()
}

/// Return the workspace root (parent of gritvm-cli/).
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Return the absolute path to a test program file.
fn test_program(name: &str) -> String {
    workspace_root()
        .join("tests/programs")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// Helper: write program text into a temp dir and return its path.
fn write_temp(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    gvm()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: gvm"));
}

#[test]
fn help_flag_exits_0() {
    gvm()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    gvm()
        .arg("assemble")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown command 'assemble'"));
}

// ---- run ----

#[test]
fn run_add_five_prints_output() {
    gvm()
        .args(["run", &test_program("add_five.gvm")])
        .assert()
        .success()
        .stdout("5");
}

#[test]
fn run_countdown_with_memory() {
    gvm()
        .args(["run", &test_program("countdown.gvm"), "--memory", "3"])
        .assert()
        .success()
        .stdout("0");
}

#[test]
fn run_factorial_with_data_dump() {
    gvm()
        .args(["run", &test_program("factorial.gvm"), "--memory", "5,1", "--dump-data"])
        .assert()
        .success()
        .stdout("120")
        .stderr(predicate::str::contains("Status: HALTED"))
        .stderr(predicate::str::contains("Location 1: 120"))
        .stderr(predicate::str::contains("*** Instruction Memory ***").not());
}

#[test]
fn run_empty_program_exits_0() {
    gvm()
        .args(["run", &test_program("empty.gvm")])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("has no instructions"));
}

#[test]
fn run_bad_mnemonic_reports_line() {
    gvm()
        .args(["run", &test_program("bad_mnemonic.gvm")])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn run_out_of_range_exits_3_with_dump() {
    gvm()
        .args(["run", &test_program("out_of_range.gvm")])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("runtime error: memory index 10 out of bounds"))
        .stderr(predicate::str::contains("--> instruction 0: AT 10"))
        .stderr(predicate::str::contains("Status: ERRORED"))
        .stderr(predicate::str::contains("Instruction 0: AT 10"));
}

#[test]
fn run_sum_memory_without_enough_cells_faults() {
    gvm()
        .args(["run", &test_program("sum_memory.gvm"), "--memory", "1,2"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("memory check failed"));
}

#[test]
fn run_spin_stops_at_step_limit() {
    gvm()
        .args(["run", &test_program("spin.gvm"), "--max-steps", "1000"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Status: ERRORED"));
}

#[test]
fn run_missing_file_exits_1() {
    gvm()
        .args(["run", "/no/such/program.gvm"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot open program"));
}

#[test]
fn run_bad_memory_flag_exits_1() {
    gvm()
        .args(["run", &test_program("add_five.gvm"), "--memory", "1,two"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid memory value 'two'"));
}

#[test]
fn run_marker_mnemonic_is_rejected_at_load() {
    // Unparseable lines are rejected at load, so they never execute.
    let dir = TempDir::new().unwrap();
    let prog = write_temp(&dir, "p.gvm", "OUTPUT\nUNKNOWN_INSTRUCTION\n");
    gvm()
        .args(["run", &prog])
        .assert()
        .failure()
        .code(2)
        .stdout("");
}

// ---- config ----

#[test]
fn run_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_temp(&dir, "run.toml", "memory = [4, 1]\ndump_data = true\n");
    gvm()
        .args(["run", &test_program("factorial.gvm"), "--config", &config])
        .assert()
        .success()
        .stdout("24")
        .stderr(predicate::str::contains("Location 0: 0"));
}

#[test]
fn flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_temp(&dir, "run.toml", "memory = [4, 1]\n");
    gvm()
        .args([
            "run",
            &test_program("factorial.gvm"),
            "--config",
            &config,
            "--memory",
            "3,1",
        ])
        .assert()
        .success()
        .stdout("6");
}

#[test]
fn config_step_limit_applies() {
    let dir = TempDir::new().unwrap();
    let config = write_temp(&dir, "run.toml", "max_steps = 10\n");
    gvm()
        .args(["run", &test_program("spin.gvm"), "--config", &config])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("step limit"));
}

#[test]
fn invalid_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let config = write_temp(&dir, "run.toml", "memory = \"lots\"\n");
    gvm()
        .args(["run", &test_program("add_five.gvm"), "--config", &config])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid config"));
}

// ---- check ----

#[test]
fn check_valid_program() {
    gvm()
        .args(["check", &test_program("countdown.gvm")])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK:"))
        .stdout(predicate::str::contains("(6 instructions)"));
}

#[test]
fn check_bad_program_exits_2() {
    gvm()
        .args(["check", &test_program("bad_mnemonic.gvm")])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown opcode 'FOOBAR'"));
}

#[test]
fn check_requires_input() {
    gvm()
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: gvm check"));
}

// ---- fmt ----

#[test]
fn fmt_prints_canonical_text() {
    let dir = TempDir::new().unwrap();
    let prog = write_temp(
        &dir,
        "messy.gvm",
        "# comment\naddconst   0x5\n\noutput\n  halt  \n",
    );
    gvm()
        .args(["fmt", &prog])
        .assert()
        .success()
        .stdout("ADDCONST 5\nOUTPUT\nHALT\n");
}

#[test]
fn fmt_output_runs_identically() {
    let dir = TempDir::new().unwrap();
    let output = gvm()
        .args(["fmt", &test_program("sum_memory.gvm")])
        .output()
        .unwrap();
    assert!(output.status.success());
    let formatted = write_temp(&dir, "sum.gvm", &String::from_utf8(output.stdout).unwrap());

    gvm()
        .args(["run", &formatted, "--memory", "1,2,3"])
        .assert()
        .success()
        .stdout("6");
}

#[test]
fn fmt_bad_program_exits_2() {
    gvm()
        .args(["fmt", &test_program("bad_mnemonic.gvm")])
        .assert()
        .failure()
        .code(2);
}
