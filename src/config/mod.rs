pub mod schema;

pub use schema::MythogenConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve a path that may contain `~` to an absolute path.
pub fn resolve_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load config from the given path (or defaults when absent), then apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<MythogenConfig> {
    let mut config = if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read mythogen config file")?;
        toml::from_str(&contents).context("Failed to parse mythogen config (TOML)")?
    } else {
        MythogenConfig::default()
    };
    config.apply_env_overrides();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_returns_defaults() {
        let cfg = load_config(Path::new("/nonexistent/mythogen.toml")).unwrap();
        assert_eq!(cfg.model, MythogenConfig::default().model);
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mythogen.toml");
        std::fs::write(&path, "model = \"test-model\"\nrequest_timeout_secs = 5\n").unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.model, "test-model");
        assert_eq!(loaded.request_timeout_secs, 5);
    }
}
