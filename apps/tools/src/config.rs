use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use remote_cache::{setup, RemoteCacheConfig};
use serde::Deserialize;
use sourcerer::{DataView, SourcererState};

pub const DEFAULT_CONFIG_FILE: &str = "tools.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub repo_root: PathBuf,
    pub ci: bool,
    pub committer_email_domain: String,
    pub vault_secret_path: String,
    pub default_data_view_id: String,
    pub default_data_view_title: String,
    pub signal_index_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            ci: false,
            committer_email_domain: setup::COMMITTER_EMAIL_DOMAIN.into(),
            vault_secret_path: setup::VAULT_SECRET_PATH.into(),
            default_data_view_id: "security-solution".into(),
            default_data_view_title:
                "apm-*-transaction*,auditbeat-*,endgame-*,filebeat-*,logs-*,packetbeat-*,winlogbeat-*"
                    .into(),
            signal_index_name: None,
        }
    }
}

impl Settings {
    pub fn remote_cache_config(&self) -> RemoteCacheConfig {
        let mut config = RemoteCacheConfig::new(&self.repo_root);
        config.ci = self.ci;
        config.committer_email_domain = self.committer_email_domain.clone();
        config.vault_secret_path = self.vault_secret_path.clone();
        config
    }

    pub fn initial_sourcerer_state(&self) -> SourcererState {
        SourcererState::initial(
            DataView::from_title(
                self.default_data_view_id.as_str(),
                self.default_data_view_title.as_str(),
            ),
            self.signal_index_name.clone(),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    repo_root: Option<PathBuf>,
    committer_email_domain: Option<String>,
    vault_secret_path: Option<String>,
    default_data_view_id: Option<String>,
    default_data_view_title: Option<String>,
    signal_index_name: Option<String>,
}

/// Defaults, then `tools.toml` (or `path`), then environment overrides.
/// An explicit `path` must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let file_cfg = match path {
        Some(path) => Some(read_file_settings(path)?),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Some(read_file_settings(default_path)?)
            } else {
                None
            }
        }
    };

    if let Some(file_cfg) = file_cfg {
        if let Some(v) = file_cfg.repo_root {
            settings.repo_root = v;
        }
        if let Some(v) = file_cfg.committer_email_domain {
            settings.committer_email_domain = v;
        }
        if let Some(v) = file_cfg.vault_secret_path {
            settings.vault_secret_path = v;
        }
        if let Some(v) = file_cfg.default_data_view_id {
            settings.default_data_view_id = v;
        }
        if let Some(v) = file_cfg.default_data_view_title {
            settings.default_data_view_title = v;
        }
        if let Some(v) = file_cfg.signal_index_name {
            settings.signal_index_name = Some(v);
        }
    }

    settings.ci = env("CI").is_some_and(|v| is_ci_value(&v));

    if let Some(v) = env("APP__REPO_ROOT") {
        settings.repo_root = PathBuf::from(v);
    }
    if let Some(v) = env("APP__COMMITTER_EMAIL_DOMAIN") {
        settings.committer_email_domain = v;
    }
    if let Some(v) = env("APP__VAULT_SECRET_PATH") {
        settings.vault_secret_path = v;
    }
    if let Some(v) = env("APP__SIGNAL_INDEX_NAME") {
        settings.signal_index_name = Some(v);
    }

    Ok(settings)
}

fn read_file_settings(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))
}

// Any non-empty value counts, including "0" and "false".
fn is_ci_value(value: &str) -> bool {
    !value.is_empty()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
