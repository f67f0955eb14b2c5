use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::sqlite::DEFAULT_BUSY_TIMEOUT_MS;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GrapeConfig {
    pub database: Option<String>,
    pub busy_timeout_ms: Option<u64>,
    pub server_port: Option<u16>,
}

impl GrapeConfig {
    /// Database path: explicit flag, then config, then `.grape/grape.db` under `base`
    pub fn database_path(&self, flag: Option<PathBuf>, base: &Path) -> PathBuf {
        flag.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| default_database_path_in(base))
    }

    pub fn busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS)
    }

    pub fn port(&self, flag: Option<u16>) -> u16 {
        flag.or(self.server_port).unwrap_or(DEFAULT_PORT)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("grape.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".grape").join("grape.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<GrapeConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: GrapeConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &GrapeConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Keep the local database directory out of version control
pub fn ensure_gitignore(project_root: &Path) -> anyhow::Result<bool> {
    let gitignore_path = project_root.join(".gitignore");
    let entry = ".grape/";

    let mut content = if gitignore_path.exists() {
        std::fs::read_to_string(&gitignore_path)?
    } else {
        String::new()
    };
    if content.lines().any(|line| line.trim() == entry) {
        return Ok(false);
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(entry);
    content.push('\n');
    std::fs::write(&gitignore_path, content)?;
    Ok(true)
}
