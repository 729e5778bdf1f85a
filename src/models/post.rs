use serde::{Deserialize, Serialize};

use crate::view::CardItem;

/// One blog post record from `data/posts.json`.
///
/// `slug` may be absent in the data file; the content loader fills it in by
/// slugifying the title so every post has a stable, URL-safe identity.
/// `id` is the load-order position and only exists to resolve legacy
/// index-based deep links.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Post {
    #[serde(default, skip_serializing)]
    pub id: usize,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    // Storage path inside the data dir, not part of the serialized surface
    #[serde(skip_serializing)]
    pub file: String,
    #[serde(default = "default_format", skip_serializing)]
    pub format: String,
    #[serde(default)]
    pub slug: String,
}

fn default_format() -> String {
    "markdown".to_string()
}

impl Post {
    pub fn is_markdown(&self) -> bool {
        self.format == "markdown"
    }

    /// Path of the detail page for this post.
    pub fn url_path(&self) -> String {
        format!("/post/{}", crate::render::urlencoding_simple(&self.slug))
    }
}

impl CardItem for Post {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.excerpt.as_str()];
        fields.extend(self.tags.iter().map(|t| t.as_str()));
        fields.extend(self.categories.iter().map(|c| c.as_str()));
        fields
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }
}
