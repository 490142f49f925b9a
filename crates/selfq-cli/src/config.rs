use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use selfq_core::export::{DEFAULT_LAYERS, DEFAULT_VERSION, POST_TAG, STORY_TAG};
use selfq_core::EnvelopeConfig;

/// Name of the built-in story family.
pub const STORY_FAMILY: &str = "story";
/// Name of the built-in post family.
pub const POST_FAMILY: &str = "post";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelfqConfig {
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub logging: LoggingSection,
    /// User-defined families, or overrides of the built-in ones.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub families: BTreeMap<String, FamilySection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportSection {
    #[serde(default = "default_family")]
    pub default_family: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FamilySection {
    pub tag: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_layers")]
    pub layers: usize,
    /// Only for interoperating with exports written with a non-standard key cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdf_iterations: Option<u32>,
}

fn default_family() -> String {
    STORY_FAMILY.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_layers() -> usize {
    DEFAULT_LAYERS
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            default_family: default_family(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for SelfqConfig {
    fn default() -> Self {
        Self {
            export: ExportSection::default(),
            logging: LoggingSection::default(),
            families: BTreeMap::new(),
        }
    }
}

impl FamilySection {
    fn builtin(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            version: default_version(),
            layers: default_layers(),
            kdf_iterations: None,
        }
    }

    pub fn to_envelope(&self) -> EnvelopeConfig {
        let config = EnvelopeConfig::new(self.tag.clone())
            .with_version(self.version.clone())
            .with_layers(self.layers);
        match self.kdf_iterations {
            Some(iterations) => config.with_kdf_iterations(iterations),
            None => config,
        }
    }
}

impl SelfqConfig {
    /// The config written by `selfq config init`: defaults plus both built-in families.
    pub fn starter() -> Self {
        let mut config = Self::default();
        config.families.insert(
            STORY_FAMILY.to_string(),
            FamilySection::builtin(STORY_TAG),
        );
        config
            .families
            .insert(POST_FAMILY.to_string(), FamilySection::builtin(POST_TAG));
        config
    }

    /// Look up a family, falling back to the built-in story and post families.
    pub fn family(&self, name: &str) -> Option<FamilySection> {
        if let Some(section) = self.families.get(name) {
            return Some(section.clone());
        }
        match name {
            STORY_FAMILY => Some(FamilySection::builtin(STORY_TAG)),
            POST_FAMILY => Some(FamilySection::builtin(POST_TAG)),
            _ => None,
        }
    }

    /// All family names known to this config, built-ins included.
    pub fn family_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.families.keys().cloned().collect();
        for builtin in [STORY_FAMILY, POST_FAMILY] {
            if !self.families.contains_key(builtin) {
                names.push(builtin.to_string());
            }
        }
        names.sort();
        names
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<SelfqConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config, or the defaults when no file exists.
pub fn read_config_or_default(path: &Path) -> anyhow::Result<SelfqConfig> {
    if path.exists() {
        read_config(path)
    } else {
        Ok(SelfqConfig::default())
    }
}

pub fn write_config(path: &Path, config: &SelfqConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    selfq_core::fs::write_atomic(path, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("selfq"));
        }
    }
    Ok(home_dir()?.join(".config").join("selfq"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
