use log::error;
use rocket::response::content::{RawHtml, RawXml};
use rocket::State;

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::models::{AffiliateItem, ResourceItem};
use crate::render;
use crate::seo;
use crate::view;

// ── Blog ───────────────────────────────────────────────

#[get("/?<q>&<category>&<page>")]
pub fn blog_list(
    config: &State<SiteConfig>,
    store: &State<ContentStore>,
    q: Option<String>,
    category: Option<String>,
    page: Option<i64>,
) -> RawHtml<String> {
    let q = q.unwrap_or_default();
    let category = category.unwrap_or_default();
    let current_page = view::clamp_page(page);

    let filtered = view::filter(&store.posts, &q, Some(category.as_str()));
    let (items, info) = view::paginate(&filtered, current_page, config.posts_per_page);

    let cards = render::build_card_grid(&items, "Tiada post dijumpai.", render::post_card);
    let categories = store.categories();
    let search_form = render::build_search_form(
        "/",
        &q,
        "Cari post...",
        Some((&categories, (!category.is_empty()).then_some(category.as_str()))),
    );
    let pagination = render::build_pagination(&info, "/", &q, Some(category.as_str()), "posts-list");

    let body = render::render_list_page(
        "Blog",
        "posts-list",
        &search_form,
        &info.caption("post"),
        &cards,
        &pagination,
    );
    let meta = seo::build_meta(config, None, None, "/", "website");
    RawHtml(render::render_page(config, &meta, "blog", &body, ""))
}

#[get("/post/<id>")]
pub fn post_detail(
    config: &State<SiteConfig>,
    store: &State<ContentStore>,
    id: &str,
) -> Option<RawHtml<String>> {
    let post = store.find_post(id)?;

    let body = match store.post_body_html(post) {
        Ok(html) => render::render_post_page(config, post, &html),
        Err(e) => {
            error!("Failed to load body for post '{}': {}", post.slug, e);
            render::render_error_region("Maaf, kandungan post ini tidak dapat dimuatkan.")
        }
    };

    let meta = seo::build_meta(
        config,
        Some(&post.title),
        if post.excerpt.is_empty() {
            Some(&post.title)
        } else {
            Some(&post.excerpt)
        },
        &post.url_path(),
        "article",
    );
    Some(RawHtml(render::render_page(
        config,
        &meta,
        "blog",
        &body,
        render::copy_link_js(),
    )))
}

// ── Affiliate / resource grids ─────────────────────────

struct GridPage<'a> {
    base: &'a str,
    active: &'a str,
    heading: &'a str,
    anchor: &'a str,
    placeholder: &'a str,
    noun: &'a str,
    empty_message: &'a str,
    title: &'a str,
    description: &'a str,
}

/// One affiliate/resource list page; the card template is the only part
/// that differs between kinds.
fn grid_page<T: view::CardItem>(
    config: &SiteConfig,
    all: &[T],
    q: Option<String>,
    page: Option<i64>,
    grid: &GridPage<'_>,
    card: impl Fn(&T) -> String,
) -> RawHtml<String> {
    let q = q.unwrap_or_default();
    let current_page = view::clamp_page(page);

    let filtered = view::filter(all, &q, None);
    let (items, info) = view::paginate(&filtered, current_page, config.items_per_page);

    let cards = render::build_card_grid(&items, grid.empty_message, card);
    let search_form = render::build_search_form(grid.base, &q, grid.placeholder, None);
    let pagination = render::build_pagination(&info, grid.base, &q, None, grid.anchor);

    let body = render::render_list_page(
        grid.heading,
        grid.anchor,
        &search_form,
        &info.caption(grid.noun),
        &cards,
        &pagination,
    );
    let meta = seo::build_meta(
        config,
        Some(grid.title),
        Some(grid.description),
        grid.base,
        "website",
    );
    RawHtml(render::render_page(config, &meta, grid.active, &body, ""))
}

#[get("/shop?<q>&<page>")]
pub fn shop_list(
    config: &State<SiteConfig>,
    store: &State<ContentStore>,
    q: Option<String>,
    page: Option<i64>,
) -> RawHtml<String> {
    grid_page::<AffiliateItem>(
        config,
        &store.shop,
        q,
        page,
        &GridPage {
            base: "/shop",
            active: "shop",
            heading: "Kedai",
            anchor: "shop-products",
            placeholder: "Cari produk...",
            noun: "produk",
            empty_message: "Tiada produk dijumpai.",
            title: "Kedai Affiliate",
            description: "Senarai produk affiliate untuk teknologi.",
        },
        render::shop_card,
    )
}

#[get("/services?<q>&<page>")]
pub fn services_list(
    config: &State<SiteConfig>,
    store: &State<ContentStore>,
    q: Option<String>,
    page: Option<i64>,
) -> RawHtml<String> {
    grid_page::<AffiliateItem>(
        config,
        &store.services,
        q,
        page,
        &GridPage {
            base: "/services",
            active: "services",
            heading: "Servis",
            anchor: "services-list",
            placeholder: "Cari servis...",
            noun: "servis",
            empty_message: "Tiada servis dijumpai.",
            title: "Servis Affiliate",
            description: "Servis cloud dan tools teknologi dengan affiliate links.",
        },
        render::service_card,
    )
}

#[get("/komuniti?<q>&<page>")]
pub fn komuniti_list(
    config: &State<SiteConfig>,
    store: &State<ContentStore>,
    q: Option<String>,
    page: Option<i64>,
) -> RawHtml<String> {
    grid_page::<ResourceItem>(
        config,
        &store.resources,
        q,
        page,
        &GridPage {
            base: "/komuniti",
            active: "komuniti",
            heading: "Komuniti",
            anchor: "resources-list",
            placeholder: "Cari platform...",
            noun: "platform",
            empty_message: "Tiada platform dijumpai.",
            title: "Komuniti",
            description: "Rakan-rakan, blog, dan platform yang kami sokong.",
        },
        render::resource_card,
    )
}

// ── About ──────────────────────────────────────────────

#[get("/about")]
pub fn about(config: &State<SiteConfig>, store: &State<ContentStore>) -> RawHtml<String> {
    let body = match store.about_html() {
        Ok(html) => format!("<div id=\"about-content\">{}</div>", html),
        Err(e) => {
            error!("Failed to load about page: {}", e);
            render::render_error_region("Maaf, halaman ini tidak dapat dimuatkan.")
        }
    };
    let meta = seo::build_meta(
        config,
        Some("Hubungi"),
        Some("Hubungi kami untuk soalan, feedback, atau kerjasama."),
        "/about",
        "website",
    );
    RawHtml(render::render_page(config, &meta, "about", &body, ""))
}

// ── Feeds & crawlers ───────────────────────────────────

#[get("/feed")]
pub fn rss_feed(config: &State<SiteConfig>, store: &State<ContentStore>) -> RawXml<String> {
    RawXml(crate::rss::generate_feed(config, store))
}

#[get("/sitemap.xml")]
pub fn sitemap(config: &State<SiteConfig>, store: &State<ContentStore>) -> RawXml<String> {
    RawXml(seo::generate_sitemap(config, store))
}

#[get("/robots.txt")]
pub fn robots(config: &State<SiteConfig>) -> String {
    seo::robots_txt(config)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        blog_list,
        post_detail,
        shop_list,
        services_list,
        komuniti_list,
        about,
        rss_feed,
        sitemap,
        robots,
    ]
}
