//! Run configuration
//!
//! Values come from command-line flags and, when `--config` names one, a TOML
//! file. Flags take precedence. The input file name is fixed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use logsift_logs::FilterCriteria;

/// Input file, read from the working directory
pub const INPUT_FILE: &str = "logs.txt";

/// Output file used when neither the flags nor the config file name one
pub const DEFAULT_OUT: &str = "filtered_logs.txt";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of a `--config` file
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub level: Option<String>,
    pub service: Option<String>,
    pub out: Option<PathBuf>,
}

impl FileConfig {
    /// Load a config file named on the command line
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

/// Values given on the command line
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub level: Option<String>,
    pub service: Option<String>,
    pub out: Option<PathBuf>,
}

/// Everything a single run needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub criteria: FilterCriteria,
}

impl RunConfig {
    /// Merge flags over file values, relative to the working directory `dir`
    pub fn resolve(cli: CliOverrides, file: FileConfig, dir: &Path) -> Self {
        let level = cli.level.or(file.level);
        let service = cli.service.or(file.service);
        let out = cli
            .out
            .or(file.out)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT));

        Self {
            input: dir.join(INPUT_FILE),
            output: dir.join(out),
            criteria: FilterCriteria::new(level.as_deref(), service.as_deref()),
        }
    }

    /// File name shown in the run summary
    pub fn output_name(&self) -> String {
        self.output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output.display().to_string())
    }
}
