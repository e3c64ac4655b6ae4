//! Configuration management for `sqa`.
//!
//! Everything lives under one data directory (`--data-dir`, `SQA_DATA_DIR`,
//! or `./.sqa`):
//! - `store.json`: persisted projects and active selection
//! - `config.yaml`: optional user preferences

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sqa_lib::export::DEFAULT_BASENAME;
use sqa_lib::view::{SortDirection, SortField, SortState};
use sqa_lib::{FileStore, ProjectRegistry, Result, SqaError};
use tracing::debug;

use crate::logging::LogFormat;

pub const DEFAULT_DATA_DIR: &str = ".sqa";
pub const CONFIG_FILE: &str = "config.yaml";
pub const STORE_FILE: &str = "store.json";

/// Template written by `sqa init`.
pub const CONFIG_TEMPLATE: &str = r"# sqa configuration
# export_basename: sqa-issues
# default_reporter: QA Team
# default_sort: date
# default_sort_desc: true
# log_format: plain
";

/// User preferences read from `config.yaml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File name (without extension) for exports.
    pub export_basename: String,
    /// Reporter used when `issue add` gets no `--reporter`.
    pub default_reporter: Option<String>,
    /// Sort column for `list` and `export`.
    pub default_sort: String,
    pub default_sort_desc: bool,
    pub log_format: Option<LogFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_basename: DEFAULT_BASENAME.to_string(),
            default_reporter: None,
            default_sort: SortField::DateReported.as_str().to_string(),
            default_sort_desc: true,
            log_format: None,
        }
    }
}

impl Config {
    /// Load `config.yaml` from `data_dir`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file exists but cannot be read or parsed.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(SqaError::Config(format!("{}: {e}", path.display())));
            }
        };
        if !has_content(&raw) {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&raw)
            .map_err(|e| SqaError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Default table sort described by this config.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `default_sort` names an unknown column.
    pub fn sort_state(&self) -> Result<SortState> {
        let field = self.default_sort.parse::<SortField>()?;
        let direction = if self.default_sort_desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Ok(SortState::new(field, direction))
    }
}

/// Resolved data directory plus loaded config.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub data_dir: PathBuf,
    pub config: Config,
}

impl Workspace {
    #[must_use]
    pub const fn new(data_dir: PathBuf, config: Config) -> Self {
        Self { data_dir, config }
    }

    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    /// Open the registry over this workspace's store file.
    #[must_use]
    pub fn open_registry(&self) -> ProjectRegistry<FileStore> {
        ProjectRegistry::open(FileStore::new(self.store_path()))
    }

    /// Data directory for display (canonical when it exists).
    #[must_use]
    pub fn display_dir(&self) -> PathBuf {
        dunce::canonicalize(&self.data_dir).unwrap_or_else(|_| self.data_dir.clone())
    }
}

fn has_content(yaml: &str) -> bool {
    yaml.lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !line.starts_with('#'))
}

/// `--data-dir` / `SQA_DATA_DIR` if given, else `./.sqa`.
#[must_use]
pub fn resolve_data_dir(flag: Option<&Path>) -> PathBuf {
    flag.map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), Path::to_path_buf)
}
