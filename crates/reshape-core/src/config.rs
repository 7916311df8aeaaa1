use crate::error::Error;
use reshape_ast::RenameOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration for the reshape CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Current working directory.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// First id handed out by the renaming counter.
    pub first_id: u64,

    /// Scope renaming options.
    pub rename: RenameOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
            first_id: 1,
            rename: RenameOptions::default(),
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Load a JSON config file. Fields missing from the file keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Set the first renaming id.
    #[must_use]
    pub fn with_first_id(mut self, first_id: u64) -> Self {
        self.first_id = first_id;
        self
    }

    /// Set renaming options.
    #[must_use]
    pub fn with_rename(mut self, rename: RenameOptions) -> Self {
        self.rename = rename;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reshape_ast::ScopeKind;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.first_id, 1);
        assert_eq!(config.rename, RenameOptions::default());
        assert!(!config.json_logs);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "first_id": 100, "rename": {{ "exempt": ["Global"] }} }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.first_id, 100);
        assert_eq!(config.rename.exempt, vec![ScopeKind::Global]);
        assert_eq!(config.verbosity, 0);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(Config::load(&missing), Err(Error::ConfigRead { .. })));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(Config::load(&bad), Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_builders() {
        let config = Config::new(PathBuf::from("/tmp"))
            .with_verbosity(2)
            .with_json_logs(true)
            .with_first_id(9);
        assert_eq!(config.cwd, PathBuf::from("/tmp"));
        assert_eq!(config.verbosity, 2);
        assert!(config.json_logs);
        assert_eq!(config.first_id, 9);
    }
}
