mod common;

use common::GoModule;
use goatcov::cli::cmd_diff;
use goatcov::config::Config;
use goatcov::diff::compare;
use goatcov::model::Change;
use goatcov::overview::report;
use indoc::indoc;

const A_GO: &str = indoc! {"
    package a

    func f(x int) int {
    	if x > 0 {
    		return 1
    	}
    	return 0
    }

    func g() {}
"};

const B_GO: &str = indoc! {"
    package a

    func h() {
    	println()
    }
"};

/// `f` goes from 50% to 100%.
#[test]
fn changed_function_is_reported() {
    let module = GoModule::new();
    module.write("a.go", A_GO);
    let old = module.profile(
        "old.out",
        &[
            "example.com/demo/a.go:3.19,4.11 1 1",
            "example.com/demo/a.go:4.11,6.3 1 0",
        ],
    );
    let new = module.profile(
        "new.out",
        &[
            "example.com/demo/a.go:3.19,4.11 1 1",
            "example.com/demo/a.go:4.11,6.3 1 1",
        ],
    );

    let baseline = report(&old, module.root(), &[]).unwrap();
    let current = report(&new, module.root(), &[]).unwrap();
    let diff = compare(&baseline, &current);

    assert_eq!(diff.total, Some(Change::new(50.0, 100.0)));
    assert_eq!(diff.files.len(), 1);
    let file = &diff.files[0];
    assert_eq!(file.name, "example.com/demo/a.go");
    assert_eq!(file.entries.len(), 1);
    assert_eq!(file.entries[0].name, "f");
    assert_eq!(file.entries[0].change, Change::new(50.0, 100.0));
    assert_eq!(file.entries[0].change.delta(), 50.0);

    let config = Config {
        profile: new,
        src: module.root().to_path_buf(),
        ..Config::default()
    };
    let out = cmd_diff(&config, &old).unwrap();
    assert!(out.contains("    f"));
    assert!(out.contains("50% → 100% (+50.00%)"));
    // g has no statements and is unchanged.
    assert!(!out.contains("    g"));
}

#[test]
fn file_missing_from_current_is_not_reported() {
    let module = GoModule::new();
    module.write("a.go", A_GO);
    module.write("b.go", B_GO);
    let old = module.profile(
        "old.out",
        &[
            "example.com/demo/a.go:3.19,4.11 1 1",
            "example.com/demo/b.go:3.10,5.2 1 0",
        ],
    );
    let new = module.profile("new.out", &["example.com/demo/a.go:3.19,4.11 1 1"]);

    let baseline = report(&old, module.root(), &[]).unwrap();
    let current = report(&new, module.root(), &[]).unwrap();
    let diff = compare(&baseline, &current);

    assert!(diff.files.iter().all(|f| f.name != "example.com/demo/b.go"));
    assert!(diff.files.is_empty());
    assert_eq!(diff.total, Some(Change::new(50.0, 100.0)));
}

#[test]
fn function_new_to_current_compares_against_zero() {
    let module = GoModule::new();
    module.write("a.go", A_GO);
    module.write("b.go", B_GO);
    let old = module.profile("old.out", &["example.com/demo/a.go:3.19,4.11 1 1"]);
    let new = module.profile(
        "new.out",
        &[
            "example.com/demo/a.go:3.19,4.11 1 1",
            "example.com/demo/b.go:3.10,5.2 1 1",
        ],
    );

    let baseline = report(&old, module.root(), &[]).unwrap();
    let current = report(&new, module.root(), &[]).unwrap();
    let diff = compare(&baseline, &current);

    assert!(diff.total.is_none());
    assert_eq!(diff.files.len(), 1);
    let b = &diff.files[0];
    assert!(b.added);
    assert_eq!(b.entries[0].name, "h");
    assert_eq!(b.entries[0].change.baseline, 0.0);
    assert_eq!(b.entries[0].change.current, 100.0);
}

#[test]
fn unchanged_functions_are_omitted() {
    let module = GoModule::new();
    module.write("a.go", A_GO);
    module.write("b.go", B_GO);
    let old = module.profile(
        "old.out",
        &[
            "example.com/demo/a.go:3.19,4.11 1 1",
            "example.com/demo/b.go:3.10,5.2 1 0",
        ],
    );
    let new = module.profile(
        "new.out",
        &[
            "example.com/demo/a.go:3.19,4.11 1 1",
            "example.com/demo/b.go:3.10,5.2 1 1",
        ],
    );

    let baseline = report(&old, module.root(), &[]).unwrap();
    let current = report(&new, module.root(), &[]).unwrap();
    let diff = compare(&baseline, &current);

    let names: Vec<_> = diff
        .files
        .iter()
        .flat_map(|f| f.entries.iter().map(|e| e.name.as_str()))
        .collect();
    assert_eq!(names, ["h"]);
}
