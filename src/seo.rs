use crate::config::SiteConfig;
use crate::content::ContentStore;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Build meta tags HTML string for a page.
///
/// Every page carries its own full set: title (templated), description,
/// canonical, Open Graph, and Twitter Card tags. Post pages pass
/// `og_type = "article"`, everything else `"website"`.
pub fn build_meta(
    config: &SiteConfig,
    title: Option<&str>,
    description: Option<&str>,
    path: &str,
    og_type: &str,
) -> String {
    let page_title = config.page_title(title);
    let page_desc = description.unwrap_or(&config.seo_default_description);
    let canonical = config.canonical(path);

    format!(
        r#"<title>{title}</title>
<meta name="description" content="{desc}">
<link rel="canonical" href="{url}">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{desc}">
<meta property="og:url" content="{url}">
<meta property="og:site_name" content="{site}">
<meta property="og:type" content="{og_type}">
<meta name="twitter:card" content="summary">
<meta name="twitter:title" content="{title}">
<meta name="twitter:description" content="{desc}">"#,
        title = html_escape(&page_title),
        desc = html_escape(page_desc),
        url = html_escape(&canonical),
        site = html_escape(&config.site_name),
        og_type = html_escape(og_type),
    )
}

/// Analytics script tag (GA4), injected verbatim into the shell when a
/// measurement id is configured.
pub fn build_analytics_scripts(config: &SiteConfig) -> String {
    if config.ga_measurement_id.is_empty() {
        return String::new();
    }
    let id = html_escape(&config.ga_measurement_id);
    format!(
        r#"<script async src="https://www.googletagmanager.com/gtag/js?id={id}"></script>
<script>window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}gtag('js',new Date());gtag('config','{id}');</script>
"#,
        id = id
    )
}

/// Generate sitemap.xml content: the fixed pages plus every post.
pub fn generate_sitemap(config: &SiteConfig, store: &ContentStore) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );

    xml.push_str(&format!(
        "  <url><loc>{}</loc><changefreq>daily</changefreq><priority>1.0</priority></url>\n",
        xml_escape(&config.canonical("/"))
    ));

    for path in ["/shop", "/services", "/komuniti", "/about"] {
        xml.push_str(&format!(
            "  <url><loc>{}</loc><changefreq>weekly</changefreq><priority>0.8</priority></url>\n",
            xml_escape(&config.canonical(path))
        ));
    }

    for post in &store.posts {
        let mut entry = format!("  <url><loc>{}</loc>", xml_escape(&config.canonical(&post.url_path())));
        if !post.date.is_empty() {
            entry.push_str(&format!("<lastmod>{}</lastmod>", xml_escape(&post.date)));
        }
        entry.push_str("<priority>0.6</priority></url>\n");
        xml.push_str(&entry);
    }

    xml.push_str("</urlset>\n");
    xml
}

/// robots.txt body, with the sitemap pointer appended.
pub fn robots_txt(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\nSitemap: {}\n",
        config.canonical("/sitemap.xml")
    )
}
