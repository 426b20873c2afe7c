//! Lint run configuration
//!
//! Inputs arrive from the hosting CI system as flags, `INPUT_*` environment
//! variables, or a partial config file. They are merged here into an
//! immutable [`LintConfig`] before the pipeline starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::PipelineError;

/// The closed set of supported lint tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintTool {
    /// flake8 style checker
    Flake8,
    /// pylint style checker
    Pylint,
    /// pycodestyle style checker
    Pycodestyle,
    /// pyflakes undefined-name checker
    Pyflakes,
    /// black formatter
    Black,
    /// mypy static type checker
    Mypy,
}

impl LintTool {
    /// All supported tools, in dispatch order.
    pub const ALL: [LintTool; 6] = [
        Self::Flake8,
        Self::Pylint,
        Self::Pycodestyle,
        Self::Pyflakes,
        Self::Black,
        Self::Mypy,
    ];

    /// Wire identifier, also the executable name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flake8 => "flake8",
            Self::Pylint => "pylint",
            Self::Pycodestyle => "pycodestyle",
            Self::Pyflakes => "pyflakes",
            Self::Black => "black",
            Self::Mypy => "mypy",
        }
    }

    /// The pip package that provides this tool.
    #[must_use]
    pub fn package(&self) -> &'static str {
        // Package names coincide with the executable names for all six.
        self.as_str()
    }
}

impl fmt::Display for LintTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LintTool {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or(())
    }
}

/// Named default sets for the two observed variants of the pipeline
///
/// The variants drifted apart over time; both are preserved rather than
/// guessing a single correct behavior. They differ in the default artifact
/// name and in whether pyflakes honors extra arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Older variant: underscore artifact name, pyflakes ignores extra
    /// arguments.
    Classic,
    /// Newer variant: hyphenated artifact name, extra arguments honored by
    /// every tool.
    #[default]
    Modern,
}

impl Profile {
    /// Default target path for this profile.
    #[must_use]
    pub fn default_path(&self) -> &'static str {
        "."
    }

    /// Default report file name for this profile.
    #[must_use]
    pub fn default_artifact_name(&self) -> &'static str {
        match self {
            Self::Classic => "lint_report.txt",
            Self::Modern => "lint-report.txt",
        }
    }

    /// Whether the pyflakes command includes the extra-argument text.
    #[must_use]
    pub fn honors_pyflakes_arguments(&self) -> bool {
        matches!(self, Self::Modern)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Modern => write!(f, "modern"),
        }
    }
}

/// Immutable configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintConfig {
    /// Raw tool identifier as supplied; validated by the driver.
    pub tool: String,

    /// Filesystem path or glob passed verbatim to the tool.
    pub path: String,

    /// Destination file name for the report.
    pub artifact_name: String,

    /// Pass the tool's verbose flag.
    pub verbose: bool,

    /// Pass the tool's color flag.
    pub color: bool,

    /// Pass the tool's statistics flags.
    pub statistics: bool,

    /// Free-form text appended to the lint command, trimmed before use.
    pub arguments: String,

    /// Default profile in effect.
    pub profile: Profile,
}

impl LintConfig {
    /// Merges configuration layers into a validated config.
    ///
    /// Layers are ordered highest precedence first; the first layer that
    /// sets a field wins. Fields no layer sets fall back to the profile
    /// defaults.
    pub fn resolve(layers: &[PartialConfig]) -> Result<Self, PipelineError> {
        let profile = layers
            .iter()
            .find_map(|layer| layer.profile)
            .unwrap_or_default();

        let config = Self {
            tool: layers
                .iter()
                .find_map(|layer| layer.tool.clone())
                .unwrap_or_default(),
            path: layers
                .iter()
                .find_map(|layer| layer.path.clone())
                .unwrap_or_else(|| profile.default_path().to_string()),
            artifact_name: layers
                .iter()
                .find_map(|layer| layer.artifact_name.clone())
                .unwrap_or_else(|| profile.default_artifact_name().to_string()),
            verbose: layers
                .iter()
                .find_map(|layer| layer.verbose)
                .unwrap_or(false),
            color: layers.iter().find_map(|layer| layer.color).unwrap_or(false),
            statistics: layers
                .iter()
                .find_map(|layer| layer.statistics)
                .unwrap_or(false),
            arguments: layers
                .iter()
                .find_map(|layer| layer.arguments.clone())
                .unwrap_or_default(),
            profile,
        };

        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that would fail mid-pipeline.
    ///
    /// Extra arguments must parse as shell words; an unbalanced quote is
    /// caught here instead of inside the spawned shell.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let trimmed = self.arguments.trim();
        if !trimmed.is_empty() {
            shell_words::split(trimmed).map_err(|e| PipelineError::InvalidArguments {
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// The selected tool, if the identifier is recognized.
    #[must_use]
    pub fn validated_tool(&self) -> Option<LintTool> {
        self.tool.parse().ok()
    }
}

/// One configuration layer with every field optional
///
/// Used for CLI flags, `INPUT_*` environment variables, and the optional
/// config file alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PartialConfig {
    /// Tool identifier.
    pub tool: Option<String>,
    /// Target path or glob.
    pub path: Option<String>,
    /// Report file name.
    pub artifact_name: Option<String>,
    /// Verbose flag.
    pub verbose: Option<bool>,
    /// Color flag.
    pub color: Option<bool>,
    /// Statistics flag.
    pub statistics: Option<bool>,
    /// Extra argument text.
    pub arguments: Option<String>,
    /// Default profile.
    pub profile: Option<Profile>,
}

/// Parses the string-encoded boolean convention used by CI inputs.
///
/// Only the spellings `true`, `True` and `TRUE` are truthy; everything else
/// is false.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    matches!(value, "true" | "True" | "TRUE")
}

/// Reads the hosting CI system's `INPUT_*` environment variables.
#[must_use]
pub fn env_inputs() -> PartialConfig {
    env_inputs_from(|name| std::env::var(name).ok())
}

/// Builds a layer from an `INPUT_*` lookup function.
pub fn env_inputs_from(lookup: impl Fn(&str) -> Option<String>) -> PartialConfig {
    PartialConfig {
        tool: lookup("INPUT_TOOL"),
        path: lookup("INPUT_PATH"),
        artifact_name: lookup("INPUT_ARTIFACT_NAME"),
        verbose: lookup("INPUT_VERBOSE").as_deref().map(is_truthy),
        color: lookup("INPUT_COLOR").as_deref().map(is_truthy),
        statistics: lookup("INPUT_STATISTICS").as_deref().map(is_truthy),
        arguments: lookup("INPUT_ARGUMENTS"),
        profile: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tool_round_trips_through_identifier() {
        for tool in LintTool::ALL {
            assert_eq!(tool.as_str().parse::<LintTool>(), Ok(tool));
        }
    }

    #[test]
    fn test_unknown_tool_is_rejected() {
        assert!("eslint".parse::<LintTool>().is_err());
        assert!("".parse::<LintTool>().is_err());
        assert!("Flake8".parse::<LintTool>().is_err());
    }

    #[test]
    fn test_is_truthy_accepts_ci_spellings() {
        assert!(is_truthy("true"));
        assert!(is_truthy("True"));
        assert!(is_truthy("TRUE"));
        assert!(!is_truthy("yes"));
        assert!(!is_truthy("1"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("tRuE"));
    }

    #[test]
    fn test_resolve_first_layer_wins() {
        let flags = PartialConfig {
            tool: Some("flake8".to_string()),
            verbose: Some(true),
            ..Default::default()
        };
        let env = PartialConfig {
            tool: Some("pylint".to_string()),
            path: Some("src/".to_string()),
            ..Default::default()
        };

        let config = LintConfig::resolve(&[flags, env]).unwrap();
        assert_eq!(config.tool, "flake8");
        assert_eq!(config.path, "src/");
        assert!(config.verbose);
        assert!(!config.color);
    }

    #[test]
    fn test_resolve_falls_back_to_profile_defaults() {
        let config = LintConfig::resolve(&[PartialConfig::default()]).unwrap();
        assert_eq!(config.profile, Profile::Modern);
        assert_eq!(config.path, ".");
        assert_eq!(config.artifact_name, "lint-report.txt");

        let classic = PartialConfig {
            profile: Some(Profile::Classic),
            ..Default::default()
        };
        let config = LintConfig::resolve(&[classic]).unwrap();
        assert_eq!(config.artifact_name, "lint_report.txt");
    }

    #[test]
    fn test_validate_accepts_whitespace_only_arguments() {
        let layer = PartialConfig {
            arguments: Some("   \t ".to_string()),
            ..Default::default()
        };
        assert!(LintConfig::resolve(&[layer]).is_ok());
    }

    #[test]
    fn test_validate_rejects_unbalanced_quotes() {
        let layer = PartialConfig {
            arguments: Some("--select 'E1".to_string()),
            ..Default::default()
        };
        let err = LintConfig::resolve(&[layer]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArguments { .. }));
    }

    #[test]
    fn test_env_inputs_from_lookup() {
        let layer = env_inputs_from(|name| match name {
            "INPUT_TOOL" => Some("mypy".to_string()),
            "INPUT_VERBOSE" => Some("True".to_string()),
            "INPUT_COLOR" => Some("no".to_string()),
            _ => None,
        });

        assert_eq!(layer.tool.as_deref(), Some("mypy"));
        assert_eq!(layer.verbose, Some(true));
        assert_eq!(layer.color, Some(false));
        assert_eq!(layer.statistics, None);
    }

    #[test]
    fn test_partial_config_from_yaml() {
        let yaml = "tool: black\nartifact-name: report.txt\nverbose: true\n";
        let layer: PartialConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(layer.tool.as_deref(), Some("black"));
        assert_eq!(layer.artifact_name.as_deref(), Some("report.txt"));
        assert_eq!(layer.verbose, Some(true));
    }

    #[test]
    fn test_validated_tool() {
        let layer = PartialConfig {
            tool: Some("pycodestyle".to_string()),
            ..Default::default()
        };
        let config = LintConfig::resolve(&[layer]).unwrap();
        assert_eq!(config.validated_tool(), Some(LintTool::Pycodestyle));

        let layer = PartialConfig {
            tool: Some("shellcheck".to_string()),
            ..Default::default()
        };
        let config = LintConfig::resolve(&[layer]).unwrap();
        assert_eq!(config.validated_tool(), None);
    }
}
