//! Configuration for map views and the thumbnail cache.
use crate::error::{MediamapError, Result};
use crate::view::SortStrategy;
use serde::de::Error;
use std::path::Path;

/// Library configuration
///
/// Every field has a default, so an empty JSON object (or TOML document) is a
/// valid configuration.
///
/// # Example
///
/// ```rust
/// use mediamap::Config;
///
/// let config = Config::from_json(r#"{ "view": { "page_size": 12 } }"#).unwrap();
/// assert_eq!(config.view.page_size, 12);
/// assert_eq!(config.thumbnails.capacity, 512);
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub thumbnails: ThumbnailConfig,
}

/// Defaults for the map/grid view pipeline
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    /// Resources shown per page
    #[serde(default = "ViewConfig::default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub sort_strategy: SortStrategy,

    /// How many nearest candidates per requested item the center-random
    /// strategy shuffles from
    #[serde(default = "ViewConfig::default_candidate_factor")]
    pub candidate_factor: usize,
}

impl ViewConfig {
    const fn default_page_size() -> usize {
        20
    }

    const fn default_candidate_factor() -> usize {
        2
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: Self::default_page_size(),
            sort_strategy: SortStrategy::default(),
            candidate_factor: Self::default_candidate_factor(),
        }
    }
}

/// Thumbnail cache sizing
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThumbnailConfig {
    /// Maximum number of cached thumbnail URLs
    #[serde(default = "ThumbnailConfig::default_capacity")]
    pub capacity: usize,

    /// Returned for resources without a cached thumbnail
    #[serde(default = "ThumbnailConfig::default_placeholder_url")]
    pub placeholder_url: String,
}

impl ThumbnailConfig {
    const fn default_capacity() -> usize {
        512
    }

    fn default_placeholder_url() -> String {
        "/images/no-thumbnail.png".to_string()
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
            placeholder_url: Self::default_placeholder_url(),
        }
    }
}

impl Config {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        assert!(page_size > 0, "Page size must be greater than zero");
        self.view.page_size = page_size;
        self
    }

    pub fn with_sort_strategy(mut self, strategy: SortStrategy) -> Self {
        self.view.sort_strategy = strategy;
        self
    }

    pub fn with_candidate_factor(mut self, factor: usize) -> Self {
        assert!(factor > 0, "Candidate factor must be greater than zero");
        self.view.candidate_factor = factor;
        self
    }

    pub fn with_thumbnail_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Thumbnail capacity must be greater than zero");

        if capacity > 100_000 {
            log::warn!(
                "Thumbnail capacity of {} is very large; each entry keeps a URL string in memory",
                capacity
            );
        }

        self.thumbnails.capacity = capacity;
        self
    }

    pub fn with_placeholder_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnails.placeholder_url = url.into();
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.view.page_size == 0 {
            return Err("Page size must be greater than zero".to_string());
        }

        if self.view.candidate_factor == 0 {
            return Err("Candidate factor must be greater than zero".to_string());
        }

        if self.thumbnails.capacity == 0 {
            return Err("Thumbnail capacity must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a configuration file, picking the format from its extension.
    ///
    /// `.json` is always supported, `.toml` with the `toml` feature.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::from_json(&contents)?),
            #[cfg(feature = "toml")]
            Some("toml") => Ok(Self::from_toml(&contents)?),
            other => Err(MediamapError::Config(format!(
                "Unsupported config file extension: {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.view.page_size, 20);
        assert_eq!(config.view.sort_strategy, SortStrategy::Newest);
        assert_eq!(config.view.candidate_factor, 2);
        assert_eq!(config.thumbnails.capacity, 512);
        assert_eq!(config.thumbnails.placeholder_url, "/images/no-thumbnail.png");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default()
            .with_page_size(8)
            .with_sort_strategy(SortStrategy::CenterRandom)
            .with_thumbnail_capacity(64);

        let json = config.to_json().unwrap();
        let deserialized = Config::from_json(&json).unwrap();

        assert_eq!(deserialized, config);
        assert!(json.contains("center-random"));
    }

    #[test]
    fn test_config_rejects_zero_page_size() {
        let err = Config::from_json(r#"{ "view": { "page_size": 0 } }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(Config::from_json(r#"{ "zoom": 3 }"#).is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());
        let mut config = Config::default();
        config.thumbnails.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mediamap.json");
        std::fs::write(&path, r#"{ "thumbnails": { "capacity": 3 } }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.thumbnails.capacity, 3);
    }

    #[test]
    fn test_config_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mediamap.ini");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(MediamapError::Config(_))
        ));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config::default().with_sort_strategy(SortStrategy::Center);
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }
}
