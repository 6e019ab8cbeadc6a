mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::GoModule;

const PICK_GO: &str = "package demo

func Pick(x int) int {
	if x > 0 {
		return 1
	}
	return 0
}
";

fn goatcov(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_goatcov"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn module() -> GoModule {
    let module = GoModule::new();
    module.write("pick.go", PICK_GO);
    module.profile(
        "old.out",
        &[
            "example.com/demo/pick.go:3.22,4.11 1 1",
            "example.com/demo/pick.go:4.11,6.3 1 0",
        ],
    );
    module.profile(
        "new.out",
        &[
            "example.com/demo/pick.go:3.22,4.11 1 1",
            "example.com/demo/pick.go:4.11,6.3 1 1",
        ],
    );
    module
}

#[test]
fn report_exits_zero() {
    let module = module();
    let out = goatcov(module.root(), &["--profile", "new.out"]);

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Total: 100%\n"));
    assert!(stdout.contains("    Pick"));
    assert!(out.stderr.is_empty());
}

#[test]
fn single_dash_flags_are_accepted() {
    let module = module();
    let out = goatcov(module.root(), &["-profile", "new.out", "-diff=old.out"]);

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Total 50% → 100% (+50.00%)\n"));
}

#[test]
fn missing_profile_exits_one_with_usage() {
    let module = module();
    let out = goatcov(module.root(), &["--profile", "nope.out"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("nope.out"));
    assert!(stderr.contains("Usage:"));
}

#[test]
fn unresolvable_file_exits_one() {
    let module = module();
    module.profile("bad.out", &["example.com/demo/gone.go:1.1,2.2 1 1"]);
    let out = goatcov(module.root(), &["--profile", "bad.out"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("gone.go"));
    assert!(stderr.contains("Usage:"));
}

#[test]
fn unknown_flag_exits_one() {
    let module = module();
    let out = goatcov(module.root(), &["--bogus"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage:"));
}

#[test]
fn conflicting_formats_exit_one() {
    let module = module();
    let out = goatcov(module.root(), &["-profile", "new.out", "-html", "-json"]);

    assert_eq!(out.status.code(), Some(1));
}
