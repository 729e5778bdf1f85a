use serde::{Deserialize, Serialize};

use crate::view::CardItem;

/// One affiliate record from `data/affiliates-shop.json` or
/// `data/affiliates-services.json`. The primary action is an outbound
/// monetized link, so cards render it with `rel="nofollow noopener"`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AffiliateItem {
    #[serde(default, skip_serializing)]
    pub id: usize,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub link: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CardItem for AffiliateItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

/// One komuniti platform record from `data/komuniti.json`. Outbound link,
/// but not monetized, so no `nofollow`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ResourceItem {
    #[serde(default, skip_serializing)]
    pub id: usize,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub link: String,
}

impl CardItem for ResourceItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}
