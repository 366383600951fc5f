//! # Docs Configuration
//!
//! Optional YAML file, passed with `--config`, holding the settings of
//! `dfs docs`. Command-line flags win over the file and the file wins over
//! built-in defaults.
//!
//! ```yaml
//! title: Dragonfly Model Schema
//! version: 1.8.0
//! output_dir: docs
//! inheritance: false
//! mapper: true
//! external_docs:
//!   description: See how to use these schema in action.
//!   url: https://api.pollination.cloud/
//! contact:
//!   name: Ladybug Tools
//!   email: info@ladybug.tools
//!   url: https://github.com/ladybug-tools/dragonfly-core
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use dfs_schema::document::{Contact, License, Logo};
use dfs_schema::{ExternalDocs, InfoExtras};

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `--config` names a file that does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// The requested path.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        /// The requested path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a valid configuration document.
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        /// The requested path.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// `externalDocs` override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalDocsConfig {
    /// Link text.
    pub description: String,
    /// Link target.
    pub url: Url,
}

/// `info.contact` override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactConfig {
    /// Maintainer name.
    pub name: String,
    /// Maintainer email.
    pub email: String,
    /// Project homepage.
    pub url: Url,
}

/// `info.license` override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseConfig {
    /// License name.
    pub name: String,
    /// Link to the license text.
    pub url: Url,
}

/// `info.x-logo` override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogoConfig {
    /// Image URL.
    pub url: Url,
    /// Alternative text.
    pub alt_text: String,
}

/// Settings of `dfs docs`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Document title.
    pub title: Option<String>,
    /// Document description.
    pub description: Option<String>,
    /// Document version, `MAJOR.MINOR.PATCH`.
    pub version: Option<String>,
    /// Directory the documents are written to.
    pub output_dir: Option<PathBuf>,
    /// Use the inheritance layout.
    pub inheritance: Option<bool>,
    /// Add `discriminator` objects to the inheritance layout.
    pub add_discriminator: Option<bool>,
    /// Also write the class mapper.
    pub mapper: Option<bool>,
    /// Replaces the default `externalDocs`.
    pub external_docs: Option<ExternalDocsConfig>,
    /// Replaces the default contact.
    pub contact: Option<ContactConfig>,
    /// Replaces the default license.
    pub license: Option<LicenseConfig>,
    /// Replaces the default logo.
    pub logo: Option<LogoConfig>,
}

impl DocsConfig {
    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded docs config");
        Ok(config)
    }

    /// The file at `path`, or defaults when no path is given.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// External docs link, falling back to the Pollination API.
    pub fn external_docs(&self) -> ExternalDocs {
        match &self.external_docs {
            Some(docs) => ExternalDocs {
                description: docs.description.clone(),
                url: docs.url.to_string(),
            },
            None => ExternalDocs::dragonfly(),
        }
    }

    /// Contact, license and logo, each falling back to the Ladybug Tools
    /// value.
    pub fn info_extras(&self) -> InfoExtras {
        let defaults = InfoExtras::dragonfly();
        InfoExtras {
            contact: match &self.contact {
                Some(c) => Some(Contact {
                    name: c.name.clone(),
                    email: c.email.clone(),
                    url: c.url.to_string(),
                }),
                None => defaults.contact,
            },
            license: match &self.license {
                Some(l) => Some(License {
                    name: l.name.clone(),
                    url: l.url.to_string(),
                }),
                None => defaults.license,
            },
            logo: match &self.logo {
                Some(l) => Some(Logo {
                    url: l.url.to_string(),
                    alt_text: l.alt_text.clone(),
                }),
                None => defaults.logo,
            },
        }
    }
}
