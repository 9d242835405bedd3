use anyhow::{Context, Result};
use std::path::PathBuf;

const DB_FILE: &str = "assetui.db";
const LOG_FILE: &str = "assetui.log";

/// Where the store and the log file live.
#[derive(Debug, Clone)]
pub(crate) struct Paths {
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

impl Paths {
    /// Platform data dir by default; `db_override` relocates the store and
    /// puts the log next to it.
    pub(crate) fn resolve(db_override: Option<PathBuf>) -> Result<Self> {
        if let Some(db_path) = db_override {
            let dir = db_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            return Ok(Self {
                log_path: dir.join(LOG_FILE),
                db_path,
            });
        }

        let proj_dirs = directories::ProjectDirs::from("com", "assetui", "AsseTUI")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self {
            db_path: data_dir.join(DB_FILE),
            log_path: data_dir.join(LOG_FILE),
        })
    }
}

/// Pull `--db <path>` out of the argument list, leaving the rest for the
/// command dispatcher.
pub(crate) fn take_db_flag(args: &mut Vec<String>) -> Result<Option<PathBuf>> {
    let Some(pos) = args.iter().position(|a| a == "--db") else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("--db requires a path");
    }
    let path = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(PathBuf::from(crate::run::shellexpand(&path))))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_take_db_flag_absent() {
        let mut a = args(&["assetui", "summary"]);
        assert!(take_db_flag(&mut a).unwrap().is_none());
        assert_eq!(a, args(&["assetui", "summary"]));
    }

    #[test]
    fn test_take_db_flag_removes_pair() {
        let mut a = args(&["assetui", "--db", "/tmp/x.db", "list"]);
        let path = take_db_flag(&mut a).unwrap().unwrap();
        assert_eq!(path, PathBuf::from("/tmp/x.db"));
        assert_eq!(a, args(&["assetui", "list"]));
    }

    #[test]
    fn test_take_db_flag_missing_value() {
        let mut a = args(&["assetui", "--db"]);
        assert!(take_db_flag(&mut a).is_err());
    }

    #[test]
    fn test_resolve_override_puts_log_beside_db() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("my.db");
        let paths = Paths::resolve(Some(db_path.clone())).unwrap();
        assert_eq!(paths.db_path, db_path);
        assert_eq!(paths.log_path, dir.path().join("nested").join(LOG_FILE));
        assert!(dir.path().join("nested").is_dir());
    }
}
