//! Consistency check runner
//!
//! Runs the version consistency checks against a checkout layout. The build
//! state is probed once per run and selects which version policy applies;
//! the recipe template check runs in both states. Checks are independent:
//! each one re-reads its own sources and a failure in one never aborts the
//! others.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::check::error::CheckError;
use crate::check::pep440;
use crate::check::probe::{BuildState, probe_build_state};
use crate::check::template::TemplateChecker;
use crate::config::{CheckoutLayout, FALLBACK_VERSION, INIT_FILE, VERSION_MODULE_FILE};
use crate::parser::{
    DeclaredVersion, RecipeYamlParser, SourceParser, VersionJsonParser, VersionModuleParser,
};

/// Identity of an individual consistency check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// recipe.yaml `context.version` defers to _version.json
    RecipeTemplate,
    /// Unbuilt package reports the fallback version
    FallbackVersion,
    /// Built package version equals the _version.json version
    VersionEquality,
}

impl CheckKind {
    /// Returns the string representation of the check kind
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::RecipeTemplate => "recipe_template",
            CheckKind::FallbackVersion => "fallback_version",
            CheckKind::VersionEquality => "version_equality",
        }
    }
}

/// Result of an individual check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed,
    /// Not applicable in the probed build state
    Skipped,
}

/// Outcome of one check within a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Which check this outcome belongs to
    pub kind: CheckKind,
    /// Pass/fail/skip status
    pub status: CheckStatus,
    /// Failure or skip reason, absent for passes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckOutcome {
    fn from_result(kind: CheckKind, result: Result<(), CheckError>) -> Self {
        match result {
            Ok(()) => Self {
                kind,
                status: CheckStatus::Passed,
                message: None,
            },
            Err(error) => {
                warn!("Check {} failed: {}", kind.as_str(), error);
                Self {
                    kind,
                    status: CheckStatus::Failed,
                    message: Some(error.to_string()),
                }
            }
        }
    }

    fn skipped(kind: CheckKind, reason: &str) -> Self {
        debug!("Check {} skipped: {}", kind.as_str(), reason);
        Self {
            kind,
            status: CheckStatus::Skipped,
            message: Some(reason.to_string()),
        }
    }
}

/// Report for one check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Build state probed at the start of the run
    pub build_state: BuildState,
    /// Per-check outcomes, in execution order
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    /// True when no check failed (skipped checks do not count against this)
    pub fn passed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| outcome.status != CheckStatus::Failed)
    }
}

/// Runs the consistency checks for one checkout
pub struct Checker {
    layout: CheckoutLayout,
    template: TemplateChecker,
    recipe_parser: RecipeYamlParser,
    json_parser: VersionJsonParser,
    module_parser: VersionModuleParser,
}

impl Checker {
    pub fn new(layout: CheckoutLayout) -> Self {
        Self {
            layout,
            template: TemplateChecker::new(),
            recipe_parser: RecipeYamlParser,
            json_parser: VersionJsonParser::new(),
            module_parser: VersionModuleParser::new(),
        }
    }

    /// Run every check and collect the outcomes.
    ///
    /// Side-effect-free and deterministic: unchanged source files yield the
    /// same report on every run.
    pub fn run(&self) -> CheckReport {
        let build_state = probe_build_state(&self.layout.package_dir);
        let mut outcomes = Vec::new();

        outcomes.push(CheckOutcome::from_result(
            CheckKind::RecipeTemplate,
            self.check_recipe_template(),
        ));

        match build_state {
            BuildState::Unbuilt => {
                outcomes.push(CheckOutcome::from_result(
                    CheckKind::FallbackVersion,
                    self.check_fallback_version(),
                ));
                outcomes.push(CheckOutcome::skipped(
                    CheckKind::VersionEquality,
                    "no generated version module: package reports a fallback version",
                ));
            }
            BuildState::Built => {
                outcomes.push(CheckOutcome::skipped(
                    CheckKind::FallbackVersion,
                    "generated version module found: package is built",
                ));
                outcomes.push(CheckOutcome::from_result(
                    CheckKind::VersionEquality,
                    self.check_version_equality(),
                ));
            }
        }

        CheckReport {
            build_state,
            outcomes,
        }
    }

    /// The recipe's `context.version` must be a template expression deferring
    /// to _version.json, never a literal version.
    fn check_recipe_template(&self) -> Result<(), CheckError> {
        let version_def = self.read_source(&self.layout.recipe, &self.recipe_parser)?;

        if self.template.matches(&version_def.value) {
            Ok(())
        } else {
            Err(CheckError::Mismatch {
                message: format!(
                    "recipe.yaml context.version (line {}) does not defer to _version.json",
                    version_def.line + 1
                ),
                expected: r#"${{ load_from_file("_version.json").version ... }}"#.to_string(),
                actual: version_def.value,
            })
        }
    }

    /// An unbuilt package must report the fallback placeholder version.
    fn check_fallback_version(&self) -> Result<(), CheckError> {
        let init_path = self.layout.package_dir.join(INIT_FILE);
        let reported = self.read_source(&init_path, &self.module_parser)?;

        let version =
            pep440::parse_version(&reported.value).ok_or_else(|| CheckError::InvalidVersion {
                value: reported.value.clone(),
                source_name: INIT_FILE.to_string(),
            })?;

        if pep440::is_fallback(&version) {
            Ok(())
        } else {
            Err(CheckError::Mismatch {
                message: "Unbuilt package must report the fallback version".to_string(),
                expected: FALLBACK_VERSION.to_string(),
                actual: reported.value,
            })
        }
    }

    /// A built package must report exactly the version declared in
    /// _version.json, compared as parsed versions.
    fn check_version_equality(&self) -> Result<(), CheckError> {
        let module_path = self.layout.package_dir.join(VERSION_MODULE_FILE);
        let reported = self.read_source(&module_path, &self.module_parser)?;
        let declared = self.read_source(&self.layout.version_json, &self.json_parser)?;

        let reported_version =
            pep440::parse_version(&reported.value).ok_or_else(|| CheckError::InvalidVersion {
                value: reported.value.clone(),
                source_name: VERSION_MODULE_FILE.to_string(),
            })?;
        let declared_version =
            pep440::parse_version(&declared.value).ok_or_else(|| CheckError::InvalidVersion {
                value: declared.value.clone(),
                source_name: self.layout.version_json.display().to_string(),
            })?;

        if reported_version == declared_version {
            Ok(())
        } else {
            Err(CheckError::Mismatch {
                message: "Package version disagrees with _version.json".to_string(),
                expected: declared.value,
                actual: reported.value,
            })
        }
    }

    /// Read and parse one source file, mapping IO failures onto check errors.
    fn read_source(
        &self,
        path: &Path,
        parser: &dyn SourceParser,
    ) -> Result<DeclaredVersion, CheckError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CheckError::MissingSource {
                    path: path.to_path_buf(),
                }
            } else {
                CheckError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        parser.parse(&content).map_err(|source| CheckError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const TEMPLATED_RECIPE: &str =
        "context:\n  version: ${{ load_from_file(\"_version.json\").version }}\n";

    fn checkout(temp: &TempDir, json: Option<&str>, recipe: Option<&str>) -> CheckoutLayout {
        let root = temp.path();
        if let Some(json) = json {
            std::fs::write(root.join("_version.json"), json).unwrap();
        }
        if let Some(recipe) = recipe {
            std::fs::write(root.join("recipe.yaml"), recipe).unwrap();
        }

        let package_dir = root.join("my_package");
        std::fs::create_dir(&package_dir).unwrap();
        std::fs::write(
            package_dir.join(INIT_FILE),
            "try:\n    from ._version import __version__\nexcept ModuleNotFoundError:\n    __version__ = \"0.0.0.dev0\"\n",
        )
        .unwrap();

        CheckoutLayout::discover(root, None).unwrap()
    }

    fn mark_built(package_dir: &Path, version: &str) {
        std::fs::write(
            package_dir.join(VERSION_MODULE_FILE),
            format!("__version__ = version = '{version}'\n"),
        )
        .unwrap();
    }

    fn status_of(report: &CheckReport, kind: CheckKind) -> CheckStatus {
        report
            .outcomes
            .iter()
            .find(|outcome| outcome.kind == kind)
            .map(|outcome| outcome.status)
            .unwrap()
    }

    #[test]
    fn unbuilt_checkout_passes_fallback_and_skips_equality() {
        let temp = TempDir::new().unwrap();
        let layout = checkout(&temp, Some(r#"{"version": "1.2.3"}"#), Some(TEMPLATED_RECIPE));

        let report = Checker::new(layout).run();

        assert_eq!(report.build_state, BuildState::Unbuilt);
        assert_eq!(status_of(&report, CheckKind::RecipeTemplate), CheckStatus::Passed);
        assert_eq!(status_of(&report, CheckKind::FallbackVersion), CheckStatus::Passed);
        assert_eq!(status_of(&report, CheckKind::VersionEquality), CheckStatus::Skipped);
        assert!(report.passed());
    }

    #[test]
    fn built_checkout_passes_equality_and_skips_fallback() {
        let temp = TempDir::new().unwrap();
        let layout = checkout(&temp, Some(r#"{"version": "1.2.3"}"#), Some(TEMPLATED_RECIPE));
        mark_built(&layout.package_dir, "1.2.3");

        let report = Checker::new(layout).run();

        assert_eq!(report.build_state, BuildState::Built);
        assert_eq!(status_of(&report, CheckKind::RecipeTemplate), CheckStatus::Passed);
        assert_eq!(status_of(&report, CheckKind::FallbackVersion), CheckStatus::Skipped);
        assert_eq!(status_of(&report, CheckKind::VersionEquality), CheckStatus::Passed);
        assert!(report.passed());
    }

    #[test]
    fn built_checkout_with_equivalent_formatting_passes_equality() {
        let temp = TempDir::new().unwrap();
        let layout = checkout(&temp, Some(r#"{"version": "1.02.3"}"#), Some(TEMPLATED_RECIPE));
        mark_built(&layout.package_dir, "1.2.3");

        let report = Checker::new(layout).run();

        assert_eq!(status_of(&report, CheckKind::VersionEquality), CheckStatus::Passed);
    }

    #[test]
    fn built_checkout_with_stale_version_fails_equality() {
        let temp = TempDir::new().unwrap();
        let layout = checkout(&temp, Some(r#"{"version": "1.2.3"}"#), Some(TEMPLATED_RECIPE));
        mark_built(&layout.package_dir, "1.2.2");

        let report = Checker::new(layout).run();

        assert_eq!(status_of(&report, CheckKind::VersionEquality), CheckStatus::Failed);
        assert!(!report.passed());

        // Both conflicting values are reported for diagnosis
        let outcome = report
            .outcomes
            .iter()
            .find(|outcome| outcome.kind == CheckKind::VersionEquality)
            .unwrap();
        let message = outcome.message.as_deref().unwrap();
        assert!(message.contains("1.2.3"));
        assert!(message.contains("1.2.2"));
    }

    #[test]
    fn literal_recipe_version_fails_template_check() {
        let temp = TempDir::new().unwrap();
        let layout = checkout(
            &temp,
            Some(r#"{"version": "1.2.3"}"#),
            Some("context: {version: \"1.2.3\"}\n"),
        );

        let report = Checker::new(layout).run();

        assert_eq!(status_of(&report, CheckKind::RecipeTemplate), CheckStatus::Failed);
        // A failed recipe check does not affect the runtime checks
        assert_eq!(status_of(&report, CheckKind::FallbackVersion), CheckStatus::Passed);
    }

    #[test]
    fn missing_recipe_fails_template_check_only() {
        let temp = TempDir::new().unwrap();
        let layout = checkout(&temp, Some(r#"{"version": "1.2.3"}"#), None);

        let report = Checker::new(layout).run();

        assert_eq!(status_of(&report, CheckKind::RecipeTemplate), CheckStatus::Failed);
        assert_eq!(status_of(&report, CheckKind::FallbackVersion), CheckStatus::Passed);
    }

    #[test]
    fn missing_version_json_fails_equality_check_when_built() {
        let temp = TempDir::new().unwrap();
        let layout = checkout(&temp, None, Some(TEMPLATED_RECIPE));
        mark_built(&layout.package_dir, "1.2.3");

        let report = Checker::new(layout).run();

        assert_eq!(status_of(&report, CheckKind::VersionEquality), CheckStatus::Failed);
    }

    #[test]
    fn non_fallback_version_in_unbuilt_checkout_fails() {
        let temp = TempDir::new().unwrap();
        let layout = checkout(&temp, Some(r#"{"version": "1.2.3"}"#), Some(TEMPLATED_RECIPE));
        std::fs::write(
            layout.package_dir.join(INIT_FILE),
            "__version__ = \"1.2.3\"\n",
        )
        .unwrap();

        let report = Checker::new(layout).run();

        assert_eq!(status_of(&report, CheckKind::FallbackVersion), CheckStatus::Failed);
    }

    #[test]
    fn repeated_runs_yield_the_same_report() {
        let temp = TempDir::new().unwrap();
        let layout = checkout(&temp, Some(r#"{"version": "1.2.3"}"#), Some(TEMPLATED_RECIPE));

        let checker = Checker::new(layout);
        let first = checker.run();
        let second = checker.run();

        assert_eq!(first, second);
    }
}
