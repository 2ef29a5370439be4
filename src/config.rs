use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_LOG_FILTER: &str = "pyexplain=info";
pub const PYTHON_ENV: &str = "PYEXPLAIN_PYTHON";
pub const LOG_ENV: &str = "PYEXPLAIN_LOG";

/// Starter program shown before the user has typed anything.
pub const DEFAULT_EXAMPLE: &str = "# Example:\nfor i in range(3):\n    print(i)\n";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not split interpreter command `{0}`")]
    BadCommand(String),
}

/// Shape of the optional TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    python: Option<String>,
    log: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interpreter program followed by its arguments.
    pub python: Vec<String>,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            python: vec![DEFAULT_PYTHON.to_string()],
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

fn split_command(line: &str) -> Result<Vec<String>, ConfigError> {
    match shlex::split(line) {
        Some(parts) if !parts.is_empty() => Ok(parts),
        _ => Err(ConfigError::BadCommand(line.to_string())),
    }
}

impl Config {
    /// Layer a TOML file over the current values.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(python) = file.python {
            self.python = split_command(&python)?;
        }
        if let Some(log) = file.log {
            self.log_filter = log;
        }
        Ok(())
    }

    /// Layer environment overrides over the current values.
    pub fn merge_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(python) = std::env::var(PYTHON_ENV) {
            self.python = split_command(&python)?;
        }
        if let Ok(log) = std::env::var(LOG_ENV) {
            self.log_filter = log;
        }
        Ok(())
    }

    pub fn set_python_command(&mut self, line: &str) -> Result<(), ConfigError> {
        self.python = split_command(line)?;
        Ok(())
    }

    /// Defaults, then `file`, then environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if let Some(path) = file {
            config.merge_file(path)?;
        }
        config.merge_env()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "python = \"python3 -I\"\nlog = \"pyexplain=debug\"").unwrap();

        let mut config = Config::default();
        config.merge_file(file.path()).unwrap();
        assert_eq!(config.python, vec!["python3", "-I"]);
        assert_eq!(config.log_filter, "pyexplain=debug");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pythn = \"python3\"").unwrap();
        let err = Config::default().merge_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_command_is_rejected() {
        let mut config = Config::default();
        assert!(config.set_python_command("").is_err());
        assert_eq!(config.python, vec![DEFAULT_PYTHON]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::default()
            .merge_file(Path::new("/definitely/not/here.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
