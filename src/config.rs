use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub name: String,
    pub database: DatabaseConfig,
    pub packages: PackagesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub ty: DatabaseType,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Sqlite,
    Mysql,
    Postgresql,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagesConfig {
    pub path: String,
}

impl Config {
    pub fn load_from_directory(project_root: &Path) -> Result<Self> {
        let path = project_root.join("project.yml");
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Config = serde_yml::from_str(&source)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.database.username = expand_opt(config.database.username.take())?;
        config.database.password = expand_opt(config.database.password.take())?;

        Ok(config)
    }

    pub fn packages_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.packages.path)
    }

    /// Directory holding the migration files owned by a package.
    pub fn migrations_dir(&self, project_root: &Path, package: &str) -> PathBuf {
        self.packages_dir(project_root)
            .join(package)
            .join("migrations")
    }
}

fn expand_env_vars(value: &str) -> Result<String> {
    let mut result = value.to_string();

    while let Some(start) = result.find("${") {
        let end = result[start..].find('}').ok_or_else(|| {
            anyhow::anyhow!("Unclosed environment variable reference in: {value}")
        })?;
        let end = start + end;

        let var_name = &result[start + 2..end];
        let env_value = env::var(var_name)
            .map_err(|_| anyhow::anyhow!("Environment variable not found: {var_name}"))?;

        result.replace_range(start..end + 1, &env_value);
    }

    Ok(result)
}

fn expand_opt(value: Option<String>) -> Result<Option<String>> {
    value.map(|v| expand_env_vars(&v)).transpose()
}
