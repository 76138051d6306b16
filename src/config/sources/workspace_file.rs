//! Per-deployment config checked into the service's working directory.
//!
//! `config/config.toml` carries settings shared by every deployment of the
//! post generator (batch limits, sheet range, provider model). A second file
//! named after the deployment, `config/production.toml` for instance, layers
//! host/port and credential overrides on top.

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use std::path::{Path, PathBuf};

/// Names the deployment whose overrides file is loaded.
pub const ENV_SELECTOR: &str = "POSTCRAFT_ENV";

const DEFAULT_DEPLOYMENT: &str = "development";

/// Deployment name from `POSTCRAFT_ENV`; blank values select `development`.
pub fn deployment_name() -> String {
    std::env::var(ENV_SELECTOR)
        .ok()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string())
}

/// Existing workspace files for `deployment`, lowest precedence first.
pub fn workspace_config_files(workspace_root: &Path, deployment: &str) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", deployment)),
    ]
    .into_iter()
    .filter(|path| path.is_file())
    .collect()
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> ConfigBuilder<DefaultState> {
    workspace_config_files(workspace_root, &deployment_name())
        .into_iter()
        .fold(builder, |builder, path| {
            builder.add_source(File::from(path.as_path()).format(FileFormat::Toml))
        })
}
