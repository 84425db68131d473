//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_catalog::{Currency, HttpCatalogClient, ProductLookup};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Build the HTTP catalog client described by `[api]`.
    pub fn catalog_client(&self) -> Result<HttpCatalogClient> {
        HttpCatalogClient::connect(&self.api.base_url, self.api.product_lookup)
            .context("Invalid [api] configuration")
    }

    /// Check the config, returning `(errors, warnings)`.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Err(e) = HttpCatalogClient::connect(&self.api.base_url, self.api.product_lookup) {
            errors.push(format!("api.base_url: {}", e));
        }

        if !self.api.image_origin.starts_with("http://")
            && !self.api.image_origin.starts_with("https://")
        {
            errors.push("api.image_origin must be an http(s) URL".to_string());
        }

        if self.api.base_url.starts_with("http://") {
            warnings.push("api.base_url uses plain http".to_string());
        }

        if !self.api.base_url.starts_with(self.api.image_origin.trim_end_matches('/')) {
            warnings.push("api.image_origin differs from the api.base_url origin".to_string());
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Catalog API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/products` paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How single-product requests carry the id.
    #[serde(default)]
    pub product_lookup: ProductLookup,

    /// Origin prepended to root-relative image references.
    #[serde(default = "default_image_origin")]
    pub image_origin: String,
}

fn default_base_url() -> String {
    "https://fakestoreapi.in/api".to_string()
}

fn default_image_origin() -> String {
    "https://fakestoreapi.in".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            product_lookup: ProductLookup::default(),
            image_origin: default_image_origin(),
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency prices are shown in. The API itself is currency-less.
    #[serde(default)]
    pub currency: Currency,

    /// Show resolved image URLs in listings.
    #[serde(default)]
    pub image_urls: bool,
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[api]
base_url = "https://fakestoreapi.in/api"
# "path" -> GET /products/{id}, "query" -> GET /product?id={id}
product_lookup = "path"
image_origin = "https://fakestoreapi.in"

[display]
currency = "USD"
image_urls = false
"#
    .to_string()
}
