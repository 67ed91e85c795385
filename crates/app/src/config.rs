use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wishlist_core::{Coordinates, Filter, SortMode};

const APP_DIR: &str = "travel-wishlist";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the location list is stored. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
    pub default_filter: Filter,
    pub default_sort: SortMode,
    pub map: MapConfig,
}

/// Initial view handed to the map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: Coordinates,
    pub zoom: u8,
    pub min_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinates::new(20.0, 0.0),
            zoom: 2,
            min_zoom: 2,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`. A missing file gives the defaults; an unreadable or invalid one is
    /// logged and also gives the defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to read config: {}", e);
                return Self::default();
            }
        };

        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring invalid config: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Data directory to use, `override_dir` taking precedence over the config file.
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> Option<PathBuf> {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .or_else(|| dirs::data_dir().map(|p| p.join(APP_DIR)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = Config::load_from(&dir.path().join("absent.toml"));

        assert_eq!(config, Config::default());
        assert_eq!(config.map.center, Coordinates::new(20.0, 0.0));
        assert_eq!(config.map.zoom, 2);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "default_filter = \"visited\"\n\n[map]\ncenter = [48.0, 2.0]\n",
        )
        .expect("write");

        let config = Config::load_from(&path);

        assert_eq!(config.default_filter, Filter::Visited);
        assert_eq!(config.default_sort, SortMode::Newest);
        assert_eq!(config.map.center, Coordinates::new(48.0, 2.0));
        assert_eq!(config.map.zoom, 2);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_filter = \"sometimes\"").expect("write");

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/wishlist-data")),
            default_filter: Filter::Wishlist,
            default_sort: SortMode::Alphabetical,
            map: MapConfig {
                center: Coordinates::new(-15.0, -47.0),
                zoom: 4,
                min_zoom: 3,
            },
        };

        config.save_to(&path).expect("save");

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_data_dir_override_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };

        assert_eq!(
            config.resolve_data_dir(Some(Path::new("/from/flag"))),
            Some(PathBuf::from("/from/flag"))
        );
        assert_eq!(
            config.resolve_data_dir(None),
            Some(PathBuf::from("/from/config"))
        );
    }
}
