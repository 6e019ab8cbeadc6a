mod common;

use common::GoModule;
use goatcov::coverage::function_coverage;
use goatcov::funcs::find_funcs;
use goatcov::profile::{Mode, Profile};

#[test]
fn parse_and_attribute_blocks() {
    let module = GoModule::new();
    let source = module.write(
        "main.go",
        "package main\n\nfunc main() {\n\trun()\n\trun()\n}\n\nfunc run() {\n\tif false {\n\t\treturn\n\t}\n}\n",
    );
    let path = module.write(
        "coverage.out",
        "mode: count\n\
         example.com/demo/main.go:3.13,6.2 2 5\n\
         example.com/demo/main.go:8.12,9.11 1 10\n\
         example.com/demo/main.go:9.11,11.3 1 0\n",
    );

    let profile = Profile::from_path(&path).unwrap();
    assert_eq!(profile.mode, Mode::Count);
    assert_eq!(profile.files.len(), 1);
    let blocks = &profile.files[0].blocks;
    assert_eq!(blocks.len(), 3);

    let contents = std::fs::read_to_string(&source).unwrap();
    let funcs = find_funcs(&source, &contents).unwrap();
    let coverage: Vec<_> = funcs
        .iter()
        .map(|f| (f.name.as_str(), function_coverage(f, blocks)))
        .collect();
    assert_eq!(coverage, [("main", (2, 2)), ("run", (1, 2))]);
}

#[test]
fn unreadable_profile_is_an_io_error() {
    let module = GoModule::new();
    let err = Profile::from_path(&module.root().join("nope.out")).unwrap_err();
    assert!(err.to_string().contains("nope.out"), "{err}");
}
