//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_catalog::{CatalogStore, HttpCatalogClient};

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Store type every command works against.
pub type Store = CatalogStore<HttpCatalogClient>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&Path>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (StorefrontConfig::load(path)?, Some(path.to_path_buf())),
            None => match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "using config file");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Build a fresh catalog store from the `[api]` section.
    pub fn store(&self) -> Result<Store> {
        Ok(CatalogStore::new(self.config.catalog_client()?))
    }
}

/// Find a config file in `start` or any of its parents.
///
/// Files that fail to parse are skipped with a warning.
pub fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let path = current.join(name);
            if !path.exists() {
                continue;
            }
            match StorefrontConfig::load(&path) {
                Ok(config) => return Some((config, path)),
                Err(e) => tracing::warn!(path = %path.display(), "skipping config: {e:#}"),
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::Currency;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let mut config = StorefrontConfig::default();
        config.display.currency = Currency::EUR;
        config.save(&dir.path().join(".storefront.toml")).unwrap();

        let (found, path) = find_config(&nested).unwrap();
        assert_eq!(found.display.currency, Currency::EUR);
        assert_eq!(path, dir.path().join(".storefront.toml"));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut json = StorefrontConfig::default();
        json.display.image_urls = true;
        json.save(&dir.path().join("storefront.json")).unwrap();
        StorefrontConfig::default()
            .save(&dir.path().join("storefront.toml"))
            .unwrap();

        let (found, _) = find_config(dir.path()).unwrap();
        assert!(!found.display.image_urls);
    }

    #[test]
    fn test_find_config_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("storefront.toml"), "not = [valid").unwrap();
        let mut json = StorefrontConfig::default();
        json.display.image_urls = true;
        json.save(&dir.path().join("storefront.json")).unwrap();

        let (found, _) = find_config(dir.path()).unwrap();
        assert!(found.display.image_urls);
    }
}
