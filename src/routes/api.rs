use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::view;

/// One page of search results, as the JSON API returns it.
#[derive(Debug, Serialize)]
pub struct SearchPage<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: i64,
    pub total_pages: i64,
}

fn search_page<T: view::CardItem + Clone>(
    all: &[T],
    q: Option<&str>,
    category: Option<&str>,
    page: Option<i64>,
    per_page: usize,
) -> SearchPage<T> {
    let current_page = view::clamp_page(page);
    let filtered = view::filter(all, q.unwrap_or(""), category);
    let (items, info) = view::paginate(&filtered, current_page, per_page);
    SearchPage {
        items: items.into_iter().cloned().collect(),
        total: info.total,
        page: info.current,
        total_pages: info.total_pages,
    }
}

#[get("/posts?<q>&<category>&<page>")]
pub fn posts(
    config: &State<SiteConfig>,
    store: &State<ContentStore>,
    q: Option<String>,
    category: Option<String>,
    page: Option<i64>,
) -> Json<SearchPage<crate::models::Post>> {
    Json(search_page(
        &store.posts,
        q.as_deref(),
        category.as_deref(),
        page,
        config.posts_per_page,
    ))
}

#[get("/shop?<q>&<page>")]
pub fn shop(
    config: &State<SiteConfig>,
    store: &State<ContentStore>,
    q: Option<String>,
    page: Option<i64>,
) -> Json<SearchPage<crate::models::AffiliateItem>> {
    Json(search_page(
        &store.shop,
        q.as_deref(),
        None,
        page,
        config.items_per_page,
    ))
}

#[get("/services?<q>&<page>")]
pub fn services(
    config: &State<SiteConfig>,
    store: &State<ContentStore>,
    q: Option<String>,
    page: Option<i64>,
) -> Json<SearchPage<crate::models::AffiliateItem>> {
    Json(search_page(
        &store.services,
        q.as_deref(),
        None,
        page,
        config.items_per_page,
    ))
}

#[get("/komuniti?<q>&<page>")]
pub fn komuniti(
    config: &State<SiteConfig>,
    store: &State<ContentStore>,
    q: Option<String>,
    page: Option<i64>,
) -> Json<SearchPage<crate::models::ResourceItem>> {
    Json(search_page(
        &store.resources,
        q.as_deref(),
        None,
        page,
        config.items_per_page,
    ))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![posts, shop, services, komuniti]
}
