//! Database location resolution.
//!
//! The record database lives in the platform data directory unless the
//! user overrides it with `--db` or `SAID_DB`.

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;

/// Database file name.
const DB_FILE: &str = "sa_id_records.db";

/// Resolve the database URL from an explicit path override or the platform
/// data directory, creating parent directories as needed.
pub fn database_url(db_path: Option<PathBuf>) -> Result<String> {
    let path = match db_path {
        Some(path) => path,
        None => default_db_path()?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(format!("sqlite://{}?mode=rwc", path.display()))
}

fn default_db_path() -> Result<PathBuf> {
    ProjectDirs::from("za", "said-registry", "said")
        .map(|dirs| dirs.data_dir().join(DB_FILE))
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_becomes_url() {
        let url = database_url(Some(PathBuf::from("records.db"))).unwrap();
        assert_eq!(url, "sqlite://records.db?mode=rwc");
    }

    #[test]
    fn test_default_path_ends_with_db_file() {
        let url = database_url(None).unwrap();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with(&format!("{DB_FILE}?mode=rwc")));
    }
}
