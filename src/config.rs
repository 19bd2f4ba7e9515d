use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    errors::{FileOperation, IoError},
    utils::normalize_path,
};

pub const CONFIG_FILE_NAME: &str = "site.toml";

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within config domain")]
    #[diagnostic(code(assetkiln::config::io))]
    Io(#[from] IoError),

    #[error("Unable to parse toml file at '{path}': {source}")]
    #[diagnostic(code(assetkiln::config::parse_toml), help("Review toml file"))]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid output extension: '{extension}'")]
    #[diagnostic(
        code(assetkiln::config::invalid_extension),
        help("Output extensions start with a dot, e.g. \".html\"")
    )]
    InvalidExtension { extension: String },

    #[error("invalid asset folder: '{folder}'")]
    #[diagnostic(
        code(assetkiln::config::invalid_asset_folder),
        help("The asset folder must be a non-empty path relative to the project root")
    )]
    InvalidAssetFolder { folder: String },
}

/// Settings the asset copier reads, as found in `site.toml`.
///
/// Every table and key is optional:
///
/// ```toml
/// [asset]
/// folder = "assets"
/// ignore_hidden = false
///
/// [output]
/// extension = ".html"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    pub asset: AssetSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssetSection {
    pub folder: String,
    pub ignore_hidden: bool,
}
impl Default for AssetSection {
    fn default() -> Self {
        Self {
            folder: "assets".to_string(),
            ignore_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSection {
    pub extension: String,
}
impl Default for OutputSection {
    fn default() -> Self {
        Self {
            extension: ".html".to_string(),
        }
    }
}

/// Filtering and naming policy for one `copy` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPolicy {
    pub asset_folder: PathBuf,
    pub ignore_hidden: bool,
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        toml::from_str(&content).map_err(|err| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: err,
        })
    }

    /// Reads `site.toml` from the project root, or falls back to defaults
    /// when the project has none.
    pub fn load<P: AsRef<Path>>(project_root: P) -> Result<Self, ConfigError> {
        let config_file = project_root.as_ref().join(CONFIG_FILE_NAME);

        if !config_file.is_file() {
            log::debug!(
                "no {} found in {}, using defaults",
                CONFIG_FILE_NAME,
                project_root.as_ref().display()
            );

            return Ok(Self::default());
        }

        log::debug!("loading config from {}", config_file.display());

        Self::from_file(config_file)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        lazy_static::lazy_static! {
            static ref OUTPUT_EXTENSION_REGEX: regex::Regex =
                regex::Regex::new(r"^\.[A-Za-z0-9]+$").expect("a valid regex pattern");
        }

        if !OUTPUT_EXTENSION_REGEX.is_match(&self.output.extension) {
            return Err(ConfigError::InvalidExtension {
                extension: self.output.extension.clone(),
            });
        }

        let folder = Path::new(&self.asset.folder);
        let escapes_root = folder
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes_root || normalize_path(folder).as_os_str().is_empty() {
            return Err(ConfigError::InvalidAssetFolder {
                folder: self.asset.folder.clone(),
            });
        }

        Ok(())
    }

    pub fn asset_folder(&self) -> PathBuf {
        normalize_path(Path::new(&self.asset.folder))
    }

    pub fn policy(&self) -> CopyPolicy {
        CopyPolicy {
            asset_folder: self.asset_folder(),
            ignore_hidden: self.asset.ignore_hidden,
        }
    }
}
