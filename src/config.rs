use crate::error::{ReportError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_REPORT_PATH: &str = "invitation-report.csv";
pub const DEFAULT_COMMITTER_NAME: &str = "invitation-reporter[bot]";
pub const DEFAULT_COMMITTER_EMAIL: &str = "invitation@reporter";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct AuthConfig {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ReportConfig {
    pub path: Option<String>,
    pub committer_name: Option<String>,
    pub committer_email: Option<String>,
    pub enterprise: Option<String>,
}

impl Config {
    /// Picks the flag/env token first, then the config file.
    pub fn token<'a>(&'a self, flag: Option<&'a str>) -> Result<&'a str> {
        flag.or(self.auth.token.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ReportError::NotAuthenticated)
    }

    /// An empty slug means single-organization scope.
    pub fn enterprise(&self, flag: Option<&str>) -> Option<String> {
        flag.or(self.report.enterprise.as_deref())
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
    }
}

pub fn config_path() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg)
            .join("invitation-report")
            .join("config.toml");
        return Ok(path);
    }

    let home =
        dirs::home_dir().ok_or_else(|| ReportError::Config("Cannot find home directory".into()))?;
    Ok(home
        .join(".config")
        .join("invitation-report")
        .join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Splits `owner/repo` as found in `GITHUB_REPOSITORY`.
pub fn parse_repository(value: &str) -> Result<(String, String)> {
    match value.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ReportError::Config(format!(
            "repository must be given as OWNER/REPO, got `{value}`"
        ))),
    }
}

/// Checks that `report_path` stays inside `workspace` and returns the
/// normalized, `/`-separated path to commit.
pub fn resolve_report_path(workspace: &Path, report_path: &str) -> Result<String> {
    let denied = || ReportError::InvalidReportPath(report_path.to_string());

    let relative = Path::new(report_path);
    if report_path.trim().is_empty() || relative.has_root() {
        return Err(denied());
    }

    let root = normalize(workspace);
    let joined = normalize(&root.join(relative));
    if joined == root || !joined.starts_with(&root) {
        return Err(denied());
    }

    let inside = joined.strip_prefix(&root).map_err(|_| denied())?;
    let segments: Vec<String> = inside
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(segments.join("/"))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
