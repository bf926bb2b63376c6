//! Configuration file schema for codecoach.
//!
//! All keys are optional; a missing file means built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::authorship::AuthorshipThresholds;
use crate::detect::MistakeThresholds;
use crate::normalize::DEFAULT_DENYLIST;

/// File names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["codecoach.yaml", ".codecoach.yaml"];

/// Config schema versions this build understands.
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// The configuration written by `codecoach init`.
pub const DEFAULT_TEMPLATE: &str = include_str!("templates/codecoach.yaml");

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Schema version, checked against [`SUPPORTED_VERSIONS`].
    pub version: String,
    pub thresholds: MistakeThresholds,
    pub authorship: AuthorshipThresholds,
    pub denylist: Vec<String>,
    /// Glob patterns for paths to skip when walking directories.
    pub excluded_paths: Vec<String>,
    pub history: HistoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            thresholds: MistakeThresholds::default(),
            authorship: AuthorshipThresholds::default(),
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            excluded_paths: Vec::new(),
            history: HistoryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Directory holding `history.json`. Defaults to the platform data dir.
    pub dir: Option<PathBuf>,
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dir: None,
            enabled: true,
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty or comment-only file deserializes to unit.
        if content.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        }) {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load `explicit` if given, else the first discovered file, else defaults.
    ///
    /// Returns the path the configuration came from, if any.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(Path::new(".")),
        };
        match path {
            Some(p) => {
                let config = Self::parse_file(&p)
                    .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", p.display(), e))?;
                validate(&config)?;
                Ok((config, Some(p)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Compile `excluded_paths` into one matcher.
    pub fn exclusions(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }
}

/// Find a configuration file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if !SUPPORTED_VERSIONS.contains(&config.version.as_str()) {
        anyhow::bail!(
            "unsupported config version {:?} (supported: {})",
            config.version,
            SUPPORTED_VERSIONS.join(", ")
        );
    }

    let a = &config.authorship;
    for (name, value) in [
        ("comment_ratio", a.comment_ratio),
        ("perfection", a.perfection),
        ("complexity_mismatch", a.complexity_mismatch),
        ("pattern_repetition", a.pattern_repetition),
    ] {
        if !(0.0..=1.0).contains(&value) {
            anyhow::bail!("authorship.{} must be between 0 and 1, got {}", name, value);
        }
    }

    if config.denylist.iter().any(|p| p.trim().is_empty()) {
        anyhow::bail!("denylist entries must not be empty");
    }

    for n in &config.thresholds.allowed_numbers {
        if n.trim().is_empty() {
            anyhow::bail!("thresholds.allowed_numbers entries must not be empty");
        }
    }

    for pattern in &config.excluded_paths {
        Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_template_matches_defaults() {
        let config = Config::parse_str(DEFAULT_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
        validate(&config).unwrap();
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let yaml = r#"
thresholds:
  max_conditions: 8
authorship:
  perfection: 0.9
excluded_paths:
  - "**/vendor/**"
"#;
        let config = Config::parse_str(yaml).unwrap();
        assert_eq!(config.thresholds.max_conditions, 8);
        assert_eq!(config.thresholds.max_nested_loops, 2);
        assert_eq!(config.thresholds.allowed_numbers.len(), 6);
        assert_eq!(config.authorship.perfection, 0.9);
        assert_eq!(config.authorship.comment_ratio, 0.3);
        assert_eq!(config.denylist.len(), DEFAULT_DENYLIST.len());
        assert!(config.history.enabled);
        assert!(config
            .exclusions()
            .unwrap()
            .is_match("src/vendor/lib.c"));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse_str("").unwrap(), Config::default());
        assert_eq!(Config::parse_str("# nothing\n").unwrap(), Config::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.authorship.comment_ratio = 1.5;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.denylist.push("  ".to_string());
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.excluded_paths.push("[".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_checks_version() {
        let config = Config::parse_str("version: \"2.0\"\n").unwrap();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("unsupported config version"), "{}", err);

        let config = Config::parse_str("version: \"1.0\"\n").unwrap();
        validate(&config).unwrap();
    }

    #[test]
    fn test_discover() {
        let tmp = TempDir::new().unwrap();
        assert!(discover(tmp.path()).is_none());
        fs::write(tmp.path().join(".codecoach.yaml"), "version: \"1.0\"\n").unwrap();
        assert_eq!(
            discover(tmp.path()).unwrap(),
            tmp.path().join(".codecoach.yaml")
        );
    }
}
