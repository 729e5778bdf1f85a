use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::SiteConfig;
use crate::models::{AffiliateItem, Post, ResourceItem};
use crate::render;

/// All four collections, loaded once at boot and never mutated. Each
/// collection loads independently: a missing or malformed file logs an
/// error and leaves that region empty, it never takes the site down.
pub struct ContentStore {
    pub posts: Vec<Post>,
    pub shop: Vec<AffiliateItem>,
    pub services: Vec<AffiliateItem>,
    pub resources: Vec<ResourceItem>,
    data_dir: PathBuf,
}

impl ContentStore {
    pub fn load(config: &SiteConfig) -> Self {
        let data_dir = config.data_dir.clone();

        let mut posts: Vec<Post> =
            load_collection(&data_dir.join("posts.json")).unwrap_or_else(|e| {
                error!("Failed to load posts: {}", e);
                Vec::new()
            });
        for (i, post) in posts.iter_mut().enumerate() {
            post.id = i;
            if post.slug.is_empty() {
                post.slug = slug::slugify(&post.title);
            }
        }

        let mut shop: Vec<AffiliateItem> =
            load_collection(&data_dir.join("affiliates-shop.json")).unwrap_or_else(|e| {
                error!("Failed to load shop items: {}", e);
                Vec::new()
            });
        let mut services: Vec<AffiliateItem> =
            load_collection(&data_dir.join("affiliates-services.json")).unwrap_or_else(|e| {
                error!("Failed to load service items: {}", e);
                Vec::new()
            });
        let mut resources: Vec<ResourceItem> =
            load_collection(&data_dir.join("komuniti.json")).unwrap_or_else(|e| {
                error!("Failed to load komuniti platforms: {}", e);
                Vec::new()
            });

        for (i, item) in shop.iter_mut().enumerate() {
            item.id = i;
            check_link("shop", &item.name, &item.link);
        }
        for (i, item) in services.iter_mut().enumerate() {
            item.id = i;
            check_link("services", &item.name, &item.link);
        }
        for (i, item) in resources.iter_mut().enumerate() {
            item.id = i;
            check_link("komuniti", &item.name, &item.link);
        }

        info!(
            "Content loaded: {} posts, {} shop, {} services, {} komuniti",
            posts.len(),
            shop.len(),
            services.len(),
            resources.len()
        );

        ContentStore {
            posts,
            shop,
            services,
            resources,
            data_dir,
        }
    }

    /// Build a store directly from records, bypassing the filesystem.
    #[cfg(test)]
    pub fn from_parts(
        posts: Vec<Post>,
        shop: Vec<AffiliateItem>,
        services: Vec<AffiliateItem>,
        resources: Vec<ResourceItem>,
        data_dir: PathBuf,
    ) -> Self {
        let mut store = ContentStore {
            posts,
            shop,
            services,
            resources,
            data_dir,
        };
        for (i, post) in store.posts.iter_mut().enumerate() {
            post.id = i;
            if post.slug.is_empty() {
                post.slug = slug::slugify(&post.title);
            }
        }
        store
    }

    /// Resolve a post reference from a detail URL or a legacy `#post-…`
    /// fragment: slug first, then load-order index.
    pub fn find_post(&self, id: &str) -> Option<&Post> {
        if let Some(post) = self.posts.iter().find(|p| p.slug == id) {
            return Some(post);
        }
        let index: usize = id.parse().ok()?;
        self.posts.get(index)
    }

    /// Read a post's body resource and convert it to display HTML.
    /// Markdown posts go through the Markdown renderer; everything else is
    /// trusted pre-rendered markup and passes through verbatim.
    pub fn post_body_html(&self, post: &Post) -> Result<String, String> {
        let path = self.data_dir.join(&post.file);
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        if raw.trim().is_empty() {
            warn!("Post body {} is empty", path.display());
            return Ok("<p><em>Tiada kandungan.</em></p>".to_string());
        }
        if post.is_markdown() {
            Ok(render::markdown_to_html(&raw))
        } else {
            Ok(raw)
        }
    }

    /// The about page body, rendered from `data/about.md`.
    pub fn about_html(&self) -> Result<String, String> {
        let path = self.data_dir.join("about.md");
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        Ok(render::markdown_to_html(&raw))
    }

    /// Unique post categories, sorted, for the filter dropdown.
    pub fn categories(&self) -> Vec<String> {
        let mut cats: Vec<String> = self
            .posts
            .iter()
            .flat_map(|p| p.categories.iter().cloned())
            .collect();
        cats.sort();
        cats.dedup();
        cats
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("Cannot parse {}: {}", path.display(), e))
}

/// Outbound links come straight from the data files; a malformed one is a
/// data bug worth a warning at boot, but the record still renders.
fn check_link(kind: &str, name: &str, link: &str) {
    if Url::parse(link).is_err() {
        warn!("{}: item '{}' has an invalid link: {}", kind, name, link);
    }
}
