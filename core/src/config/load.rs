use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default covbench data directory: ~/.covbench
pub fn covbench_data_dir() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".covbench"))
}

/// Loads one explicit config file, then applies environment overrides.
pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read config {}: {e}", path.display()))?;
    let mut cfg: AppConfig = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("parse config {}: {e}", path.display()))?;
    finalize(&mut cfg)?;
    Ok(cfg)
}

/// Resolves the config without an explicit path.
///
/// Priority: $COVBENCH_CONFIG, then ./covbench.toml, then
/// ~/.covbench/config.toml, then built-in defaults. Environment
/// overrides are applied last in every branch.
pub fn load_default() -> anyhow::Result<AppConfig> {
    if let Ok(path) = std::env::var("COVBENCH_CONFIG") {
        if !path.trim().is_empty() {
            return load_from(Path::new(path.trim()));
        }
    }

    let local_config = Path::new("covbench.toml");
    if local_config.exists() {
        return load_from(local_config);
    }

    let home_config = covbench_data_dir()?.join("config.toml");
    if home_config.exists() {
        return load_from(&home_config);
    }

    let mut cfg = AppConfig::default();
    finalize(&mut cfg)?;
    Ok(cfg)
}

fn finalize(cfg: &mut AppConfig) -> anyhow::Result<()> {
    // Environment overrides beat file values.
    if let Ok(v) = std::env::var("COVBENCH_LOG") {
        if !v.trim().is_empty() {
            cfg.logging.level = v.trim().to_string();
        }
    }
    if let Ok(v) = std::env::var("COVBENCH_TIMEOUT_MS") {
        if !v.trim().is_empty() {
            cfg.runner.timeout_ms = v
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("COVBENCH_TIMEOUT_MS: {e}"))?;
        }
    }

    // Default the log directory into the data directory when file logging
    // is on and no directory was configured.
    let dir_unset = cfg
        .logging
        .directory
        .as_deref()
        .map_or(true, |s| s.trim().is_empty());
    if cfg.logging.file && dir_unset {
        let logs_dir = covbench_data_dir()?.join("logs");
        std::fs::create_dir_all(&logs_dir)?;
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    Ok(())
}
