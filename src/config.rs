use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

/// Site configuration, read once at boot from `tapak.toml`.
/// Every field has a default so a missing or partial file still boots.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    pub site_url: String,
    pub tagline: String,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub posts_per_page: usize,
    pub items_per_page: usize,
    pub timezone: String,
    pub seo_title_template: String,
    pub seo_default_description: String,
    pub share_facebook: bool,
    pub share_twitter: bool,
    pub share_whatsapp: bool,
    /// Google Analytics measurement id (e.g. "G-XXXXXXX"); empty disables.
    pub ga_measurement_id: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "tapak".to_string(),
            site_url: "http://localhost:8000".to_string(),
            tagline: "Perkongsian Teknologi".to_string(),
            data_dir: PathBuf::from("site/data"),
            static_dir: PathBuf::from("site/static"),
            posts_per_page: 6,
            items_per_page: 6,
            timezone: "Asia/Kuala_Lumpur".to_string(),
            seo_title_template: "{{title}} - {{site_name}}".to_string(),
            seo_default_description: "Blog teknologi dengan tips, produk affiliate, dan komuniti."
                .to_string(),
            share_facebook: true,
            share_twitter: true,
            share_whatsapp: true,
            ga_measurement_id: String::new(),
        }
    }
}

impl SiteConfig {
    /// Load from the given TOML file, falling back to defaults when the file
    /// is absent. A file that exists but fails to parse is an error.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(SiteConfig::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        let config: SiteConfig =
            toml::from_str(&raw).map_err(|e| format!("Cannot parse {}: {}", path.display(), e))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Page title per the configured template, or the bare site name for
    /// pages without their own title.
    pub fn page_title(&self, title: Option<&str>) -> String {
        match title {
            Some(t) => self
                .seo_title_template
                .replace("{{title}}", t)
                .replace("{{site_name}}", &self.site_name),
            None => self.site_name.clone(),
        }
    }

    /// Absolute canonical URL for a site path.
    pub fn canonical(&self, path: &str) -> String {
        format!("{}{}", self.site_url.trim_end_matches('/'), path)
    }
}
