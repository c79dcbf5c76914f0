//! Fallback settings from a `scapesettings.yaml` file.
//!
//! The file is searched for in a directory and all of its parents:
//!
//! ```yaml
//! google:
//!   clientSecretFile: ./client_secret.json
//!   accessTokenFile: /home/me/.ping_drive_token.json
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{info, warn};

use crate::error::{DriveError, Result};

/// Name of the settings file.
pub const CONFIG_FILE_NAME: &str = "scapesettings.yaml";

const SECRET_KEY: &str = "clientSecretFile";
const TOKEN_KEY: &str = "accessTokenFile";

/// Paths read from the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub client_secret_file: Option<PathBuf>,
    pub access_token_file: Option<PathBuf>,
}

impl Settings {
    /// Find the settings file starting at `directory` and read it.
    pub fn discover<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let path = find_config_file(directory)?;
        Self::from_file(path)
    }

    /// Read settings from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading options from the `{}` configuration file", path.display());

        let content = fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&content, base)
    }

    /// Parse settings YAML, resolving relative paths against `base`.
    pub fn parse(content: &str, base: &Path) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content)?;
        let google = document.get("google");

        Ok(Self {
            client_secret_file: path_option(google, SECRET_KEY, base),
            access_token_file: path_option(google, TOKEN_KEY, base),
        })
    }
}

fn path_option(section: Option<&Value>, key: &str, base: &Path) -> Option<PathBuf> {
    match section?.get(key)? {
        Value::Null => None,
        Value::String(path) => Some(full_path(base, path)),
        _ => {
            warn!(
                "The google.{} option value from the configuration file is not a string",
                key
            );
            None
        }
    }
}

fn full_path(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Find the settings file in `directory` or the nearest parent holding one.
pub fn find_config_file<P: AsRef<Path>>(directory: P) -> Result<PathBuf> {
    directory
        .as_ref()
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|file| file.is_file())
        .ok_or_else(|| DriveError::ConfigNotFound(CONFIG_FILE_NAME.to_string()))
}
