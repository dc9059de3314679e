use crate::cli::OutputFormat;
use calc_expr::{ParseOptions, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default = "default_runner_schema")]
    pub schema: String,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// `null` disables the nesting limit.
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub level: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            schema: default_runner_schema(),
            limits: LimitsConfig::default(),
            output: OutputConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl RunnerConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.limits.max_depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerConfigError {
    #[error("read runner config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("runner config parse failed: {0}")]
    Parse(String),
    #[error("runner config validation failed: {}", join_issues(.0))]
    Validation(Vec<ConfigIssue>),
}

pub fn load_runner_config(path: &Path) -> Result<RunnerConfig, RunnerConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| RunnerConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_runner_config(raw.as_str(), path.extension().and_then(|ext| ext.to_str()))?;
    tracing::debug!(path = %path.display(), "loaded runner config");
    Ok(config)
}

/// Decodes config text. `extension` selects the format; anything other than
/// `json`, `yaml` or `yml` tries YAML, then JSON.
pub fn parse_runner_config(raw: &str, extension: Option<&str>) -> Result<RunnerConfig, RunnerConfigError> {
    let expanded = expand_env_placeholders(raw).map_err(RunnerConfigError::Parse)?;
    let config: RunnerConfig = match extension {
        Some("json") => serde_json::from_str(expanded.as_str())
            .map_err(|error| RunnerConfigError::Parse(format!("json decode error: {error}")))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(expanded.as_str())
            .map_err(|error| RunnerConfigError::Parse(format!("yaml decode error: {error}")))?,
        _ => serde_yaml::from_str(expanded.as_str())
            .or_else(|_| serde_json::from_str(expanded.as_str()))
            .map_err(|error| RunnerConfigError::Parse(error.to_string()))?,
    };

    let issues = validate_runner_config(&config);
    if !issues.is_empty() {
        return Err(RunnerConfigError::Validation(issues));
    }
    Ok(config)
}

pub fn validate_runner_config(config: &RunnerConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    if config.schema != default_runner_schema() {
        issues.push(ConfigIssue {
            path: "schema".to_string(),
            message: format!(
                "unsupported runner config schema `{}` (expected `{}`)",
                config.schema,
                default_runner_schema()
            ),
        });
    }
    if config.limits.max_depth == Some(0) {
        issues.push(ConfigIssue {
            path: "limits.max_depth".to_string(),
            message: "max_depth must be > 0 (use null for no limit)".to_string(),
        });
    }
    if let Some(level) = &config.log.level {
        if let Err(error) = EnvFilter::try_new(level) {
            issues.push(ConfigIssue {
                path: "log.level".to_string(),
                message: format!("invalid log filter `{level}`: {error}"),
            });
        }
    }
    issues
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn default_runner_schema() -> String {
    "calc-runner/0.0.1".to_string()
}

fn default_max_depth() -> Option<usize> {
    Some(DEFAULT_MAX_DEPTH)
}

/// Substitutes every `${NAME}` with the value of environment variable `NAME`.
/// Names are ASCII letters, digits and underscores.
fn expand_env_placeholders(raw: &str) -> Result<String, String> {
    let mut expanded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some((before, after)) = rest.split_once("${") {
        expanded.push_str(before);
        let (name, tail) = after
            .split_once('}')
            .ok_or_else(|| "config has a `${` with no closing `}`".to_string())?;
        if name.is_empty() {
            return Err("config has an empty `${}` reference".to_string());
        }
        if !name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            return Err(format!("`{name}` is not a valid environment variable name"));
        }
        let value = std::env::var(name)
            .map_err(|_| format!("environment variable `{name}` referenced by config is not set"))?;
        expanded.push_str(&value);
        rest = tail;
    }
    expanded.push_str(rest);
    Ok(expanded)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
