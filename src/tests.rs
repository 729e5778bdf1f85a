#![cfg(test)]

use std::fs;
use std::path::Path;

use rocket::http::Status;
use rocket::local::blocking::Client;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::models::{AffiliateItem, Post, ResourceItem};
use crate::render;
use crate::rss;
use crate::seo;
use crate::view;

fn post(title: &str, excerpt: &str, slug: &str, cats: &[&str], tags: &[&str]) -> Post {
    Post {
        id: 0,
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        date: "2024-03-12".to_string(),
        categories: cats.iter().map(|c| c.to_string()).collect(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        file: format!("posts/{}.md", if slug.is_empty() { "body" } else { slug }),
        format: "markdown".to_string(),
        slug: slug.to_string(),
    }
}

fn affiliate(name: &str, description: &str) -> AffiliateItem {
    AffiliateItem {
        id: 0,
        name: name.to_string(),
        description: description.to_string(),
        link: "https://example.com/item".to_string(),
        image_url: None,
    }
}

fn resource(name: &str, description: &str) -> ResourceItem {
    ResourceItem {
        id: 0,
        name: name.to_string(),
        description: description.to_string(),
        link: "https://example.com/platform".to_string(),
    }
}

fn sample_posts() -> Vec<Post> {
    vec![
        post(
            "Cara Setup VPS",
            "Panduan lengkap setup VPS",
            "cara-setup-vps",
            &["Server"],
            &["vps", "linux"],
        ),
        post(
            "Review Laptop Bajet",
            "Laptop murah untuk pelajar",
            "review-laptop-bajet",
            &["Hardware"],
            &["laptop"],
        ),
        post("Phone", "Telefon pintar terbaik", "phone-terbaik", &["Hardware"], &[]),
    ]
}

/// Store with an on-disk data dir so post bodies and the about page load.
fn test_store(dir: &Path) -> ContentStore {
    fs::create_dir_all(dir.join("posts")).unwrap();
    let posts = sample_posts();
    for p in &posts {
        fs::write(
            dir.join(&p.file),
            "# Hello\n\nIni **kandungan** post.\n",
        )
        .unwrap();
    }
    fs::write(dir.join("about.md"), "## Hubungi\n\nEmel kami.\n").unwrap();

    ContentStore::from_parts(
        posts,
        vec![
            affiliate("Mouse Gaming", "Mouse murah"),
            affiliate("Laptop Stand", "Stand aluminium"),
        ],
        vec![affiliate("RunCloud", "Urus server senang")],
        vec![resource("Forum Tech", "Komuniti teknologi")],
        dir.to_path_buf(),
    )
}

fn test_config(dir: &Path) -> SiteConfig {
    SiteConfig {
        data_dir: dir.to_path_buf(),
        static_dir: dir.to_path_buf(),
        site_url: "https://tapak.example".to_string(),
        ..SiteConfig::default()
    }
}

fn test_client(dir: &Path) -> Client {
    let config = test_config(dir);
    let store = test_store(dir);
    Client::tracked(crate::build_rocket(config, store)).expect("valid rocket instance")
}

// ═══════════════════════════════════════════════════════════
// Content store
// ═══════════════════════════════════════════════════════════

#[test]
fn store_fills_slug_from_title() {
    let dir = TempDir::new().unwrap();
    let mut posts = sample_posts();
    posts.push(post("Tips Mengapa Rust Laju", "", "", &[], &[]));
    let store = ContentStore::from_parts(posts, vec![], vec![], vec![], dir.path().to_path_buf());
    assert_eq!(store.posts[3].slug, "tips-mengapa-rust-laju");
    // ids follow load order
    let ids: Vec<usize> = store.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn find_post_prefers_slug_then_index() {
    let dir = TempDir::new().unwrap();
    let store = test_store(dir.path());

    let by_slug = store.find_post("cara-setup-vps").unwrap();
    assert_eq!(by_slug.title, "Cara Setup VPS");

    let by_index = store.find_post("1").unwrap();
    assert_eq!(by_index.slug, "review-laptop-bajet");

    assert!(store.find_post("tak-wujud").is_none());
    assert!(store.find_post("99").is_none());
}

#[test]
fn post_body_renders_markdown() {
    let dir = TempDir::new().unwrap();
    let store = test_store(dir.path());
    let html = store.post_body_html(&store.posts[0]).unwrap();
    assert!(html.contains("<h1>Hello</h1>"));
    assert!(html.contains("<strong>kandungan</strong>"));
}

#[test]
fn post_body_html_format_passes_through() {
    let dir = TempDir::new().unwrap();
    let mut store = test_store(dir.path());
    store.posts[0].format = "html".to_string();
    fs::write(dir.path().join(&store.posts[0].file), "<p>siap sedia</p>").unwrap();
    let html = store.post_body_html(&store.posts[0]).unwrap();
    assert_eq!(html, "<p>siap sedia</p>");
}

#[test]
fn missing_body_is_an_error_not_a_panic() {
    let dir = TempDir::new().unwrap();
    let mut store = test_store(dir.path());
    store.posts[0].file = "posts/hilang.md".to_string();
    assert!(store.post_body_html(&store.posts[0]).is_err());
}

#[test]
fn categories_are_unique_and_sorted() {
    let dir = TempDir::new().unwrap();
    let store = test_store(dir.path());
    assert_eq!(store.categories(), vec!["Hardware", "Server"]);
}

// ═══════════════════════════════════════════════════════════
// Filter scenarios from the data files' vocabulary
// ═══════════════════════════════════════════════════════════

#[test]
fn query_matches_description_not_unrelated_title() {
    let posts = sample_posts();
    let out = view::filter(&posts, "laptop", None);
    let titles: Vec<&str> = out.iter().map(|p| p.title.as_str()).collect();
    // "Review Laptop Bajet" matches on title and excerpt ("Laptop murah"),
    // "Phone" has no matching field anywhere.
    assert_eq!(titles, vec!["Review Laptop Bajet"]);
}

#[test]
fn query_matches_tags_and_categories() {
    let posts = sample_posts();
    assert_eq!(view::filter(&posts, "linux", None).len(), 1);
    assert_eq!(view::filter(&posts, "hardware", None).len(), 2);
}

#[test]
fn category_filter_with_query() {
    let posts = sample_posts();
    let out = view::filter(&posts, "telefon", Some("Hardware"));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title, "Phone");
}

// ═══════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════

#[test]
fn script_in_title_renders_as_literal_text() {
    let p = post(
        "<script>alert(1)</script>",
        "biasa",
        "injected",
        &["Tech"],
        &[],
    );
    let card = render::post_card(&p);
    assert!(!card.contains("<script>alert(1)</script>"));
    assert!(card.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn card_grid_empty_state() {
    let items: Vec<&Post> = Vec::new();
    let html = render::build_card_grid(&items, "Tiada post dijumpai.", render::post_card);
    assert!(html.contains("Tiada post dijumpai."));
    assert!(!html.contains("card-body"));
}

#[test]
fn shop_card_marks_affiliate_links() {
    let item = affiliate("Mouse", "Mouse murah");
    let card = render::shop_card(&item);
    assert!(card.contains(r#"rel="nofollow noopener""#));
    assert!(card.contains(r#"target="_blank""#));
    assert!(card.contains("Tengok Harga"));
}

#[test]
fn resource_card_is_noopener_without_nofollow() {
    let item = resource("Forum", "Komuniti");
    let card = render::resource_card(&item);
    assert!(card.contains(r#"rel="noopener""#));
    assert!(!card.contains("nofollow"));
}

#[test]
fn pagination_empty_on_single_page() {
    let (_, info) = view::paginate::<Post>(&[], 1, 6);
    assert_eq!(render::build_pagination(&info, "/", "", None, "posts-list"), "");

    let posts = sample_posts();
    let filtered = view::filter(&posts, "", None);
    let (_, info) = view::paginate(&filtered, 1, 6);
    assert_eq!(info.total_pages, 1);
    assert_eq!(render::build_pagination(&info, "/", "", None, "posts-list"), "");
}

#[test]
fn pagination_disables_bounds_and_keeps_query() {
    let posts: Vec<Post> = (0..13)
        .map(|i| post(&format!("Post {}", i), "vps tips", &format!("post-{}", i), &[], &[]))
        .collect();
    let filtered = view::filter(&posts, "vps", None);
    let (_, info) = view::paginate(&filtered, 1, 6);
    let html = render::build_pagination(&info, "/", "vps", Some("Server"), "posts-list");

    assert!(html.contains(r#"class="page-item disabled"><a class="page-link" href="/?q=vps&category=Server&page=1#posts-list">Sebelum</a>"#));
    assert!(html.contains("page=2"));
    assert!(html.contains("Seterusnya"));
    assert!(html.contains(r#"class="page-item active""#));

    let (_, last) = view::paginate(&filtered, 3, 6);
    let html = render::build_pagination(&last, "/", "vps", None, "posts-list");
    assert!(html.contains(r#"class="page-item disabled"><a class="page-link" href="/?q=vps&page=3#posts-list">Seterusnya</a>"#));
}

#[test]
fn pagination_renders_ellipsis_for_long_runs() {
    let posts: Vec<Post> = (0..60)
        .map(|i| post(&format!("Post {}", i), "", &format!("post-{}", i), &[], &[]))
        .collect();
    let filtered = view::filter(&posts, "", None);
    let (_, info) = view::paginate(&filtered, 5, 6);
    let html = render::build_pagination(&info, "/", "", None, "posts-list");
    assert!(html.contains("<span class=\"page-link\">...</span>"));
    assert!(html.contains("page=10"));
}

#[test]
fn format_date_uses_malay_months() {
    assert_eq!(render::format_date("2024-03-12"), "12 Mac 2024");
    assert_eq!(render::format_date("2023-08-01"), "1 Ogos 2023");
    assert_eq!(render::format_date("bukan-tarikh"), "bukan-tarikh");
}

#[test]
fn urlencoding_reserves_unreserved() {
    assert_eq!(render::urlencoding_simple("abc-123_~."), "abc-123_~.");
    assert_eq!(render::urlencoding_simple("a b&c"), "a%20b%26c");
}

#[test]
fn share_buttons_encode_url_and_title() {
    let config = SiteConfig::default();
    let html = render::build_share_buttons(
        &config,
        "https://tapak.example/post/cara-setup-vps",
        "Cara Setup VPS",
    );
    assert!(html.contains("facebook.com/sharer/sharer.php?u=https%3A%2F%2Ftapak.example%2Fpost%2Fcara-setup-vps"));
    assert!(html.contains("twitter.com/intent/tweet"));
    assert!(html.contains("text=Cara%20Setup%20VPS"));
    assert!(html.contains("wa.me"));
    assert!(html.contains("copyPostLink()"));
    assert!(html.contains("Kongsi post ini:"));
}

#[test]
fn search_form_preselects_category() {
    let cats = vec!["Hardware".to_string(), "Server".to_string()];
    let html = render::build_search_form("/", "vps", "Cari post...", Some((&cats, Some("Server"))));
    assert!(html.contains("Semua Kategori"));
    assert!(html.contains(r#"<option value="Server" selected>"#));
    assert!(html.contains(r#"value="vps""#));
}

// ═══════════════════════════════════════════════════════════
// SEO / feed
// ═══════════════════════════════════════════════════════════

#[test]
fn build_meta_applies_template_and_canonical() {
    let config = SiteConfig {
        site_name: "awtekno".to_string(),
        site_url: "https://tapak.example".to_string(),
        ..SiteConfig::default()
    };
    let meta = seo::build_meta(&config, Some("Cara Setup VPS"), Some("Panduan"), "/post/cara-setup-vps", "article");
    assert!(meta.contains("<title>Cara Setup VPS - awtekno</title>"));
    assert!(meta.contains(r#"<link rel="canonical" href="https://tapak.example/post/cara-setup-vps">"#));
    assert!(meta.contains(r#"<meta property="og:type" content="article">"#));
    assert!(meta.contains(r#"<meta name="description" content="Panduan">"#));
}

#[test]
fn build_meta_escapes_values() {
    let config = SiteConfig::default();
    let meta = seo::build_meta(&config, Some(r#"a "b" <c>"#), None, "/", "website");
    assert!(meta.contains("&quot;b&quot; &lt;c&gt;"));
}

#[test]
fn sitemap_lists_pages_and_posts() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let store = test_store(dir.path());
    let xml = seo::generate_sitemap(&config, &store);
    assert!(xml.contains("<loc>https://tapak.example/</loc>"));
    assert!(xml.contains("<loc>https://tapak.example/komuniti</loc>"));
    assert!(xml.contains("<loc>https://tapak.example/post/cara-setup-vps</loc>"));
    assert!(xml.contains("<lastmod>2024-03-12</lastmod>"));
}

#[test]
fn robots_points_at_sitemap() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    assert!(seo::robots_txt(&config).contains("Sitemap: https://tapak.example/sitemap.xml"));
}

#[test]
fn rss_feed_lists_posts_with_rfc2822_dates() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let store = test_store(dir.path());
    let xml = rss::generate_feed(&config, &store);
    assert!(xml.contains("<rss version=\"2.0\""));
    assert!(xml.contains("<link>https://tapak.example/post/cara-setup-vps</link>"));
    assert!(xml.contains("<title>Cara Setup VPS</title>"));
    // 2024-03-12 midnight UTC in Asia/Kuala_Lumpur (+0800)
    assert!(xml.contains("12 Mar 2024 08:00:00 +0800"));
}

// ═══════════════════════════════════════════════════════════
// Routes (Rocket local client)
// ═══════════════════════════════════════════════════════════

#[test]
fn blog_list_shows_cards_and_caption() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());
    let response = client.get("/").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    assert!(body.contains("Cara Setup VPS"));
    assert!(body.contains("Menunjukkan 1-3 daripada 3 post"));
    assert!(body.contains("Baca Lanjut"));
    assert!(body.contains("Semua Kategori"));
}

#[test]
fn blog_search_filters_and_resets_caption() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());
    let body = client
        .get("/?q=laptop")
        .dispatch()
        .into_string()
        .unwrap();
    assert!(body.contains("Review Laptop Bajet"));
    assert!(!body.contains("Cara Setup VPS"));
    assert!(body.contains("Menunjukkan 1-1 daripada 1 post"));
}

#[test]
fn blog_huge_page_param_renders_empty_page() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());
    let response = client.get("/?page=3074457345618258604").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    assert!(body.contains("Menunjukkan 0-0 daripada 3 post"));
    assert!(body.contains("Tiada post dijumpai."));
}

#[test]
fn blog_search_no_match_shows_placeholder() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());
    let body = client
        .get("/?q=xyzzy")
        .dispatch()
        .into_string()
        .unwrap();
    assert!(body.contains("Tiada post dijumpai."));
    assert!(body.contains("Menunjukkan 0-0 daripada 0 post"));
}

#[test]
fn post_detail_by_slug_and_index() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());

    let response = client.get("/post/cara-setup-vps").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    assert!(body.contains("<h1>Hello</h1>"));
    assert!(body.contains(r#"<meta property="og:type" content="article">"#));
    assert!(body.contains("Kongsi post ini:"));
    assert!(body.contains("copyPostLink"));
    assert!(body.contains("12 Mac 2024"));

    // Legacy index-based deep link still resolves
    let response = client.get("/post/0").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert!(response.into_string().unwrap().contains("Cara Setup VPS"));
}

#[test]
fn unknown_post_is_404() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());
    let response = client.get("/post/tak-wujud").dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn post_with_missing_body_shows_failure_notice() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let mut store = test_store(dir.path());
    store.posts[0].file = "posts/hilang.md".to_string();
    let client = Client::tracked(crate::build_rocket(config, store)).unwrap();

    let response = client.get("/post/cara-setup-vps").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    assert!(body.contains("tidak dapat dimuatkan"));
}

#[test]
fn shop_page_renders_and_searches() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());

    let body = client.get("/shop").dispatch().into_string().unwrap();
    assert!(body.contains("Mouse Gaming"));
    assert!(body.contains("Menunjukkan 1-2 daripada 2 produk"));

    let body = client.get("/shop?q=stand").dispatch().into_string().unwrap();
    assert!(body.contains("Laptop Stand"));
    assert!(!body.contains("Mouse Gaming"));
}

#[test]
fn services_and_komuniti_pages_render() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());

    let body = client.get("/services").dispatch().into_string().unwrap();
    assert!(body.contains("RunCloud"));
    assert!(body.contains("Cuba Sekarang"));

    let body = client.get("/komuniti").dispatch().into_string().unwrap();
    assert!(body.contains("Forum Tech"));
    assert!(body.contains("Lawati Platform"));
}

#[test]
fn about_page_renders_markdown() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());
    let body = client.get("/about").dispatch().into_string().unwrap();
    assert!(body.contains("<h2>Hubungi</h2>"));
}

#[test]
fn list_shell_carries_theme_and_fragment_scripts() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());
    let body = client.get("/").dispatch().into_string().unwrap();
    assert!(body.contains("localStorage.getItem('theme')"));
    assert!(body.contains("'#post-'"));
    assert!(body.contains("theme-toggle"));
}

#[test]
fn feed_and_sitemap_routes_respond() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());

    let response = client.get("/feed").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert!(response.into_string().unwrap().contains("<rss"));

    let response = client.get("/sitemap.xml").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert!(response.into_string().unwrap().contains("<urlset"));

    let response = client.get("/robots.txt").dispatch();
    assert_eq!(response.status(), Status::Ok);
}

#[test]
fn api_posts_returns_page_metadata() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());
    let response = client.get("/api/posts?q=laptop").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let page: serde_json::Value =
        serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(page["total"], 1);
    assert_eq!(page["page"], 1);
    assert_eq!(page["total_pages"], 1);
    assert_eq!(page["items"][0]["slug"], "review-laptop-bajet");
}

#[test]
fn api_posts_expose_display_fields_only() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());
    let page: serde_json::Value = serde_json::from_str(
        &client.get("/api/posts").dispatch().into_string().unwrap(),
    )
    .unwrap();
    let record = page["items"][0].as_object().unwrap();
    assert!(record.contains_key("title"));
    assert!(record.contains_key("slug"));
    assert!(!record.contains_key("file"));
    assert!(!record.contains_key("id"));
    assert!(!record.contains_key("format"));

    let page: serde_json::Value = serde_json::from_str(
        &client.get("/api/shop").dispatch().into_string().unwrap(),
    )
    .unwrap();
    assert!(!page["items"][0].as_object().unwrap().contains_key("id"));
}

#[test]
fn api_out_of_range_page_is_empty() {
    let dir = TempDir::new().unwrap();
    let client = test_client(dir.path());
    let response = client.get("/api/shop?page=9").dispatch();
    let page: serde_json::Value =
        serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(page["items"].as_array().unwrap().len(), 0);
    assert_eq!(page["total"], 2);
}
