use std::path::Path;

use tempfile::TempDir;
use version_audit::check::{BuildState, CheckKind, CheckStatus, Checker};
use version_audit::config::CheckoutLayout;

const TEMPLATED_RECIPE: &str = r#"context:
  name: my_package
  version: ${{ load_from_file("_version.json").version }}

package:
  name: ${{ name }}
  version: ${{ version }}
"#;

fn write_checkout(root: &Path, declared_version: &str) {
    std::fs::write(
        root.join("_version.json"),
        format!(r#"{{"version": "{declared_version}"}}"#),
    )
    .unwrap();
    std::fs::write(root.join("recipe.yaml"), TEMPLATED_RECIPE).unwrap();

    let package_dir = root.join("my_package");
    std::fs::create_dir(&package_dir).unwrap();
    std::fs::write(
        package_dir.join("__init__.py"),
        concat!(
            "from __future__ import annotations\n",
            "\n",
            "try:\n",
            "    from ._version import __version__\n",
            "except ModuleNotFoundError:\n",
            "    __version__ = \"0.0.0.dev0\"\n",
        ),
    )
    .unwrap();
}

fn build_package(root: &Path, version: &str) {
    std::fs::write(
        root.join("my_package").join("_version.py"),
        format!("__version__ = version = '{version}'\n"),
    )
    .unwrap();
}

fn status(report: &version_audit::check::CheckReport, kind: CheckKind) -> CheckStatus {
    report
        .outcomes
        .iter()
        .find(|outcome| outcome.kind == kind)
        .map(|outcome| outcome.status)
        .unwrap()
}

#[test]
fn unbuilt_checkout_passes_all_applicable_checks() {
    let temp = TempDir::new().unwrap();
    write_checkout(temp.path(), "1.2.3");

    let layout = CheckoutLayout::discover(temp.path(), None).unwrap();
    let report = Checker::new(layout).run();

    assert_eq!(report.build_state, BuildState::Unbuilt);
    assert!(report.passed());
    assert_eq!(status(&report, CheckKind::VersionEquality), CheckStatus::Skipped);
}

#[test]
fn built_checkout_with_matching_version_passes() {
    let temp = TempDir::new().unwrap();
    write_checkout(temp.path(), "1.2.3");
    build_package(temp.path(), "1.2.3");

    let layout = CheckoutLayout::discover(temp.path(), None).unwrap();
    let report = Checker::new(layout).run();

    assert_eq!(report.build_state, BuildState::Built);
    assert!(report.passed());
    assert_eq!(status(&report, CheckKind::FallbackVersion), CheckStatus::Skipped);
}

#[test]
fn built_checkout_with_stale_json_version_fails() {
    let temp = TempDir::new().unwrap();
    write_checkout(temp.path(), "1.3.0");
    build_package(temp.path(), "1.2.3");

    let layout = CheckoutLayout::discover(temp.path(), None).unwrap();
    let report = Checker::new(layout).run();

    assert!(!report.passed());
    assert_eq!(status(&report, CheckKind::VersionEquality), CheckStatus::Failed);
}

#[test]
fn report_serializes_to_json() {
    let temp = TempDir::new().unwrap();
    write_checkout(temp.path(), "1.2.3");

    let layout = CheckoutLayout::discover(temp.path(), None).unwrap();
    let report = Checker::new(layout).run();

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["build_state"], "unbuilt");
    assert_eq!(json["outcomes"][0]["kind"], "recipe_template");
    assert_eq!(json["outcomes"][0]["status"], "passed");
}
