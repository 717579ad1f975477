use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{error::RemoteCacheError, runner::CommandRunner};

pub const SETTINGS_FILE_NAME: &str = ".bazelrc.cache";
pub const COMMITTER_EMAIL_DOMAIN: &str = "@elastic.co";
pub const VAULT_SECRET_PATH: &str = "secret/ui-team/kibana-bazel-remote-cache";
pub const VAULT_FIELD: &str = "readonly-key";

const LOG_PREFIX: &str = "[bazel_tools]";

#[derive(Debug, Clone)]
pub struct RemoteCacheConfig {
    pub repo_root: PathBuf,
    /// Set when running under continuous integration, which configures its
    /// cache separately.
    pub ci: bool,
    pub committer_email_domain: String,
    pub vault_secret_path: String,
    pub vault_field: String,
    pub settings_file_name: String,
}

impl RemoteCacheConfig {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            ci: false,
            committer_email_domain: COMMITTER_EMAIL_DOMAIN.into(),
            vault_secret_path: VAULT_SECRET_PATH.into(),
            vault_field: VAULT_FIELD.into(),
            settings_file_name: SETTINGS_FILE_NAME.into(),
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.repo_root.join(&self.settings_file_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Ci,
    NotCommitter,
    AlreadyConfigured,
    VaultUnavailable,
    CredentialUnavailable,
    WriteFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    Written(PathBuf),
    Skipped(SkipReason),
}

/// Writes the remote cache settings file when every precondition holds.
/// Never fails: each problem is logged and reported as a skip.
pub async fn setup_remote_cache(
    config: &RemoteCacheConfig,
    runner: &dyn CommandRunner,
) -> SetupOutcome {
    if config.ci {
        return SetupOutcome::Skipped(SkipReason::Ci);
    }
    if !is_committer(runner, &config.committer_email_domain).await {
        return SetupOutcome::Skipped(SkipReason::NotCommitter);
    }

    debug!("{LOG_PREFIX} setting up remote cache settings if necessary");

    let settings_path = config.settings_path();
    if settings_exist(&settings_path).await {
        debug!("{LOG_PREFIX} remote cache settings already exist, skipping");
        return SetupOutcome::Skipped(SkipReason::AlreadyConfigured);
    }

    if !is_vault_available(runner).await {
        info!("{LOG_PREFIX} vault is not available, unable to setup remote cache settings.");
        log_slower_builds();
        return SetupOutcome::Skipped(SkipReason::VaultUnavailable);
    }

    let api_key = match read_api_key(runner, config).await {
        Ok(key) => key,
        Err(err) => {
            info!(
                "{LOG_PREFIX} unable to read bazel remote cache key from vault, are you authenticated?"
            );
            log_slower_builds();
            info!("{LOG_PREFIX} {err}");
            return SetupOutcome::Skipped(SkipReason::CredentialUnavailable);
        }
    };

    match write_settings(&settings_path, &api_key).await {
        Ok(()) => {
            info!(
                "{LOG_PREFIX} remote cache settings written to {}",
                settings_path.display()
            );
            SetupOutcome::Written(settings_path)
        }
        Err(err) => {
            info!("{LOG_PREFIX} {err}");
            SetupOutcome::Skipped(SkipReason::WriteFailed)
        }
    }
}

/// The settings file contents for `api_key`.
pub fn render_settings(api_key: &str) -> String {
    format!(
        "# V1 - This file is automatically generated by 'yarn kbn bootstrap'\n\
         # To regenerate this file, delete it and run 'yarn kbn bootstrap' again.\n\
         build --bes_results_url=https://app.buildbuddy.io/invocation/\n\
         build --bes_backend=grpcs://cloud.buildbuddy.io\n\
         build --remote_cache=grpcs://cloud.buildbuddy.io\n\
         build --remote_timeout=3600\n\
         build --remote_header={api_key}\n"
    )
}

fn log_slower_builds() {
    info!("{LOG_PREFIX} building packages will work, but will be slower in many cases.");
    info!("{LOG_PREFIX} reach out to Operations if you need assistance with this.");
}

async fn is_committer(runner: &dyn CommandRunner, email_domain: &str) -> bool {
    match runner.run("git", &["config", "user.email"]).await {
        Ok(output) => output.stdout.trim().ends_with(email_domain),
        Err(err) => {
            debug!("{LOG_PREFIX} unable to read committer email: {err}");
            false
        }
    }
}

async fn is_vault_available(runner: &dyn CommandRunner) -> bool {
    runner.run("vault", &["--version"]).await.is_ok()
}

async fn read_api_key(
    runner: &dyn CommandRunner,
    config: &RemoteCacheConfig,
) -> Result<String, RemoteCacheError> {
    let field = format!("-field={}", config.vault_field);
    let output = runner
        .run(
            "vault",
            &["read", field.as_str(), config.vault_secret_path.as_str()],
        )
        .await?;
    Ok(output.stdout.trim().to_string())
}

async fn settings_exist(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

async fn write_settings(path: &Path, api_key: &str) -> Result<(), RemoteCacheError> {
    tokio::fs::write(path, render_settings(api_key))
        .await
        .map_err(|source| RemoteCacheError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[path = "tests/setup_tests.rs"]
mod tests;
