//! Filesystem layout for the tracker. Everything the application writes lives
//! beneath one data directory so a user can back it up or wipe it in one go.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".fitness-tracker";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "fitness_tracker.db";
const IMAGES_DIR_NAME: &str = "images";
const GIFS_DIR_NAME: &str = "gifs";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    /// Still images referenced by catalog entries (`images/<slug>.png`).
    pub images_dir: PathBuf,
    /// Animations referenced by catalog entries (`gifs/<slug>.gif`).
    pub gifs_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Resolve the default layout inside the user's home directory.
    pub fn resolve() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::in_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Build the same layout rooted at an arbitrary directory.
    pub fn in_dir<P: AsRef<Path>>(root: P) -> Self {
        let data_dir = root.as_ref().to_path_buf();
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            images_dir: data_dir.join(IMAGES_DIR_NAME),
            gifs_dir: data_dir.join(GIFS_DIR_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            data_dir,
        }
    }

    /// Create the data directory and its asset/log subdirectories if absent.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.data_dir, &self.images_dir, &self.gifs_dir, &self.log_dir] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Turn a stored asset reference such as `images/plank.png` into a path
    /// under the data directory.
    pub fn asset_path(&self, reference: &str) -> PathBuf {
        self.data_dir.join(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_in_data_dir() {
        let config = AppConfig::in_dir("/tmp/ft");
        assert_eq!(config.db_path, PathBuf::from("/tmp/ft/fitness_tracker.db"));
        assert_eq!(config.images_dir, PathBuf::from("/tmp/ft/images"));
        assert_eq!(config.gifs_dir, PathBuf::from("/tmp/ft/gifs"));
        assert_eq!(
            config.asset_path("gifs/plank.gif"),
            PathBuf::from("/tmp/ft/gifs/plank.gif")
        );
    }

    #[test]
    fn ensure_dirs_creates_asset_folders() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig::in_dir(tmp.path().join("data"));
        config.ensure_dirs().unwrap();
        config.ensure_dirs().unwrap();
        assert!(config.images_dir.is_dir());
        assert!(config.gifs_dir.is_dir());
        assert!(config.log_dir.is_dir());
    }
}
