//! Settings resolution: command-line flags and environment (handled by clap)
//! take precedence over the TOML config file, which takes precedence over the
//! built-in defaults.

use anyhow::{Context, Result, bail};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::github::GitHubRepo;
use crate::runtime::Runtime;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com";
pub const CONFIG_FILE_NAME: &str = ".github-release.toml";

/// Contents of `.github-release.toml`. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub user: Option<String>,
    pub repo: Option<String>,
    pub token: Option<String>,
    /// API base URL
    pub github: Option<String>,
    /// Upload host URL
    pub uploads: Option<String>,
    pub id: Option<String>,
    pub tag_name: Option<String>,
    pub target_commitish: Option<String>,
    pub name: Option<String>,
    pub body: Option<String>,
    pub draft: Option<bool>,
    pub prerelease: Option<bool>,
    pub debug: Option<bool>,
    pub verbose: Option<bool>,
    pub essential: Option<bool>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Loads the config file.
    ///
    /// An explicit path must exist and parse. Without one, the first
    /// `.github-release.toml` in [`search_paths`] is used; finding none is an
    /// error.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidates = search_paths(runtime);
                match candidates.iter().find(|candidate| runtime.exists(candidate)) {
                    Some(found) => found.clone(),
                    None => {
                        let searched: Vec<String> =
                            candidates.iter().map(|c| c.display().to_string()).collect();
                        bail!(
                            "No {} found, searched: {}",
                            CONFIG_FILE_NAME,
                            searched.join(", ")
                        );
                    }
                }
            }
        };
        debug!("Reading config file {}", path.display());

        let content = runtime
            .read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        Ok((config, path))
    }
}

/// Candidate config file locations, in lookup order.
pub fn search_paths<R: Runtime>(runtime: &R) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = runtime.current_dir() {
        dirs.push(cwd);
    }
    if let Some(home) = runtime.home_dir() {
        dirs.push(home);
    }
    dirs.push(PathBuf::from("/usr/local/etc"));
    dirs.push(PathBuf::from("/etc"));

    dirs.into_iter().map(|d| d.join(CONFIG_FILE_NAME)).collect()
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub user: Option<String>,
    pub repo: Option<String>,
    pub token: Option<String>,
    pub api_url: Option<String>,
    pub upload_url: Option<String>,
}

/// Connection and identity settings shared by every operation.
///
/// Missing identity values stay empty so that operation validation can name
/// them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Settings {
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub api_url: String,
    pub upload_url: String,
}

impl Settings {
    pub fn resolve(overrides: Overrides, file: &FileConfig) -> Self {
        let pick = |flag: Option<String>, from_file: &Option<String>| {
            flag.or_else(|| from_file.clone()).unwrap_or_default()
        };
        let url = |flag: Option<String>, from_file: &Option<String>, default: &str| {
            flag.or_else(|| from_file.clone())
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| default.to_string())
                .trim_end_matches('/')
                .to_string()
        };

        Self {
            owner: pick(overrides.user, &file.user),
            repo: pick(overrides.repo, &file.repo),
            token: pick(overrides.token, &file.token),
            api_url: url(overrides.api_url, &file.github, DEFAULT_API_URL),
            upload_url: url(overrides.upload_url, &file.uploads, DEFAULT_UPLOAD_URL),
        }
    }

    pub fn repository(&self) -> GitHubRepo {
        GitHubRepo::new(&self.owner, &self.repo)
    }
}
