use pulldown_cmark::{html, Options, Parser};

use crate::config::SiteConfig;
use crate::models::{AffiliateItem, Post, ResourceItem};
use crate::view::{PageInfo, PageLink};

/// Theme persistence: light/dark stored in localStorage, default light.
/// The toggle button lives in the nav; the class lands on <html> so CSS can
/// restyle before first paint.
const THEME_JS: &str = r#"
(function(){
  function setTheme(theme){
    var dark = theme === 'dark';
    document.documentElement.classList.toggle('theme-dark', dark);
    document.body.classList.toggle('bg-dark', dark);
    var icon = document.getElementById('theme-toggle-icon');
    if (icon) icon.textContent = dark ? '☀️' : '🌙';
    var btn = document.getElementById('theme-toggle');
    if (btn) btn.setAttribute('aria-pressed', String(dark));
    try { localStorage.setItem('theme', theme); } catch (e) {}
  }
  var stored = null;
  try { stored = localStorage.getItem('theme'); } catch (e) {}
  setTheme(stored || 'light');
  var btn = document.getElementById('theme-toggle');
  if (btn) btn.addEventListener('click', function(){
    var dark = document.documentElement.classList.contains('theme-dark');
    setTheme(dark ? 'light' : 'dark');
  });
})();
"#;

/// Legacy deep links used a `#post-<slug>` fragment on the list page.
/// Resolve them (on load and on back/forward hash navigation) by replacing
/// the location with the post's real URL, so no history entry is added.
const FRAGMENT_JS: &str = r#"
(function(){
  function resolve(){
    var hash = window.location.hash;
    if (hash.indexOf('#post-') !== 0) return;
    var id = hash.slice(6);
    try { id = decodeURIComponent(id); } catch (e) {}
    window.location.replace('/post/' + encodeURIComponent(id));
  }
  resolve();
  window.addEventListener('hashchange', resolve);
})();
"#;

/// Copy-link with graceful degradation: async clipboard API, then the
/// hidden-textarea execCommand fallback, then an alert telling the reader
/// to copy manually.
const COPY_LINK_JS: &str = r#"
function copyPostLink(){
  var url = window.location.href;
  function fallback(){
    var ta = document.createElement('textarea');
    ta.value = url;
    ta.style.position = 'fixed';
    ta.style.top = '0';
    document.body.appendChild(ta);
    ta.focus();
    ta.select();
    try {
      document.execCommand('copy');
      alert('Pautan post disalin!');
    } catch (e) {
      alert('Tidak dapat menyalin. Sila salin pautan dari address bar.');
    }
    document.body.removeChild(ta);
  }
  if (navigator.clipboard) {
    navigator.clipboard.writeText(url).then(function(){
      alert('Pautan post disalin!');
    }).catch(fallback);
  } else {
    fallback();
  }
}
"#;

const BASE_CSS: &str = r#"
html { scroll-behavior: smooth; }
html.theme-dark body { background: #1a1a1a; color: #e6e6e6; }
html.theme-dark .card { background: #2d2d2d; color: #e6e6e6; }
.card-title.small-heading { font-weight: 600; font-size: 1.05rem; }
.post-body img { max-width: 100%; }
"#;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn urlencoding_simple(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(b as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", b));
            }
        }
    }
    result
}

pub fn markdown_to_html(md: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(md, options);
    let mut out = String::with_capacity(md.len() * 2);
    html::push_html(&mut out, parser);
    out
}

const MALAY_MONTHS: &[&str] = &[
    "Januari", "Februari", "Mac", "April", "Mei", "Jun", "Julai", "Ogos", "September", "Oktober",
    "November", "Disember",
];

/// Format a `YYYY-MM-DD` data-file date the way the site displays dates,
/// e.g. "12 Mac 2024". Unparseable input falls back to the raw string.
pub fn format_date(raw: &str) -> String {
    match chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => {
            use chrono::Datelike;
            let month = MALAY_MONTHS[(date.month() as usize) - 1];
            format!("{} {} {}", date.day(), month, date.year())
        }
        Err(_) => raw.to_string(),
    }
}

// ── Page shell ─────────────────────────────────────────

/// Wrap a page body in the full site shell: head with SEO meta, Bootstrap,
/// nav with theme toggle, footer, analytics, and the inline scripts.
/// `extra_js` carries page-specific script (copy-link on post pages).
pub fn render_page(
    config: &SiteConfig,
    seo_meta: &str,
    active: &str,
    body: &str,
    extra_js: &str,
) -> String {
    let nav_items = [
        ("/", "blog", "Blog"),
        ("/shop", "shop", "Kedai"),
        ("/services", "services", "Servis"),
        ("/komuniti", "komuniti", "Komuniti"),
        ("/about", "about", "Hubungi"),
    ];
    let mut nav_links = String::new();
    for (href, key, label) in nav_items {
        nav_links.push_str(&format!(
            "<li class=\"nav-item\"><a class=\"nav-link{active}\" href=\"{href}\">{label}</a></li>\n",
            active = if *key == *active { " active" } else { "" },
            href = href,
            label = label,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="ms">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    {seo_meta}
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
    <style>{base_css}</style>
{analytics}</head>
<body>
    <nav class="navbar navbar-expand-lg navbar-dark bg-dark">
        <div class="container">
            <a class="navbar-brand" href="/">{site_name}</a>
            <ul class="navbar-nav me-auto">
{nav_links}            </ul>
            <button id="theme-toggle" class="btn btn-outline-light btn-sm" aria-pressed="false" aria-label="Tukar tema">
                <span id="theme-toggle-icon">&#127769;</span>
            </button>
        </div>
    </nav>
    <main class="container py-4">
{body}
    </main>
    <footer class="text-center text-muted py-4">
        <small>{site_name} &middot; {tagline}</small>
    </footer>
    <script>{theme_js}</script>
    <script>{fragment_js}</script>
{extra_js}</body>
</html>"#,
        seo_meta = seo_meta,
        base_css = BASE_CSS,
        analytics = crate::seo::build_analytics_scripts(config),
        site_name = html_escape(&config.site_name),
        tagline = html_escape(&config.tagline),
        nav_links = nav_links,
        body = body,
        theme_js = THEME_JS,
        fragment_js = FRAGMENT_JS,
        extra_js = if extra_js.is_empty() {
            String::new()
        } else {
            format!("    <script>{}</script>\n", extra_js)
        },
    )
}

pub fn copy_link_js() -> &'static str {
    COPY_LINK_JS
}

// ── Cards ──────────────────────────────────────────────

/// Card grid: one column per item, or the kind's empty-state placeholder
/// when there is nothing to show.
pub fn build_card_grid<T>(
    items: &[&T],
    empty_message: &str,
    card: impl Fn(&T) -> String,
) -> String {
    if items.is_empty() {
        return format!(
            "<div class=\"col-12\"><p class=\"text-center text-muted\">{}</p></div>",
            html_escape(empty_message)
        );
    }
    let mut html = String::new();
    for item in items {
        html.push_str("<div class=\"col\">\n");
        html.push_str(&card(item));
        html.push_str("</div>\n");
    }
    html
}

pub fn post_card(post: &Post) -> String {
    let cats = post
        .categories
        .iter()
        .map(|c| html_escape(c))
        .collect::<Vec<_>>()
        .join(", ");
    let tags = post
        .tags
        .iter()
        .map(|t| html_escape(t))
        .collect::<Vec<_>>()
        .join(", ");
    let tags_line = if tags.is_empty() {
        String::new()
    } else {
        format!("<br>&#127991;&#65039; {}", tags)
    };

    format!(
        r#"<div class="card h-100">
    <div class="card-body d-flex flex-column">
        <div role="heading" aria-level="7" class="card-title small-heading">{title}</div>
        <p class="card-text text-muted small">
            &#128197; {date}
            <br>&#128194; {cats}{tags_line}
        </p>
        <a href="{url}" class="btn btn-primary mt-auto">Baca Lanjut</a>
    </div>
</div>"#,
        title = html_escape(&post.title),
        date = html_escape(&post.date),
        cats = cats,
        tags_line = tags_line,
        url = post.url_path(),
    )
}

pub fn shop_card(item: &AffiliateItem) -> String {
    let image = item
        .image_url
        .as_deref()
        .map(|src| {
            format!(
                "<img src=\"{}\" class=\"card-img-top\" alt=\"{}\" loading=\"lazy\" style=\"max-height: 250px; object-fit: contain;\" itemprop=\"image\">\n    ",
                html_escape(src),
                html_escape(&item.name)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<article class="card h-100" itemscope itemtype="https://schema.org/Product">
    {image}<div class="card-body d-flex flex-column">
        <h3 class="card-title h5" itemprop="name">{name}</h3>
        <p class="card-text flex-grow-1" itemprop="description">{desc}</p>
        <a href="{link}" target="_blank" rel="nofollow noopener" class="btn btn-primary mt-auto" itemprop="url">&#128722; Tengok Harga</a>
        <small class="text-muted text-center mt-1">&#128279; Affiliate link</small>
    </div>
</article>"#,
        image = image,
        name = html_escape(&item.name),
        desc = html_escape(&item.description),
        link = html_escape(&item.link),
    )
}

pub fn service_card(item: &AffiliateItem) -> String {
    format!(
        r#"<article class="card h-100" itemscope itemtype="https://schema.org/Service">
    <div class="card-body d-flex flex-column">
        <h3 class="card-title h5" itemprop="name">{name}</h3>
        <p class="card-text flex-grow-1" itemprop="description">{desc}</p>
        <div class="mt-auto">
            <a href="{link}" target="_blank" rel="nofollow noopener" class="btn btn-success w-100" itemprop="url">&#128640; Cuba Sekarang</a>
            <small class="text-muted text-center mt-1 d-block">&#128279; Affiliate link</small>
        </div>
    </div>
</article>"#,
        name = html_escape(&item.name),
        desc = html_escape(&item.description),
        link = html_escape(&item.link),
    )
}

pub fn resource_card(item: &ResourceItem) -> String {
    format!(
        r#"<article class="card h-100" itemscope itemtype="https://schema.org/WebSite">
    <div class="card-body d-flex flex-column">
        <h3 class="card-title h5" itemprop="name">{name}</h3>
        <p class="card-text flex-grow-1" itemprop="description">{desc}</p>
        <a href="{link}" target="_blank" rel="noopener" class="btn btn-primary mt-auto" itemprop="url">&#127760; Lawati Platform</a>
    </div>
</article>"#,
        name = html_escape(&item.name),
        desc = html_escape(&item.description),
        link = html_escape(&item.link),
    )
}

// ── Search form ────────────────────────────────────────

/// Search form for a list page. Posts also get the category dropdown;
/// the clear button is a plain link back to the unfiltered page.
/// Submitting carries no `page` parameter, so every search lands on page 1.
pub fn build_search_form(
    base: &str,
    q: &str,
    placeholder: &str,
    categories: Option<(&[String], Option<&str>)>,
) -> String {
    let category_select = match categories {
        Some((cats, selected)) => {
            let mut options = String::from("<option value=\"\">Semua Kategori</option>\n");
            for cat in cats {
                let sel = if Some(cat.as_str()) == selected {
                    " selected"
                } else {
                    ""
                };
                options.push_str(&format!(
                    "<option value=\"{v}\"{sel}>{v}</option>\n",
                    v = html_escape(cat),
                    sel = sel,
                ));
            }
            format!(
                "<div class=\"col-md-3\"><select name=\"category\" class=\"form-select\" onchange=\"this.form.submit()\">\n{}</select></div>\n",
                options
            )
        }
        None => String::new(),
    };

    format!(
        r#"<form method="get" action="{base}" class="row g-2 mb-3" role="search">
    <div class="col">
        <input type="search" name="q" class="form-control" placeholder="{placeholder}" value="{q}">
    </div>
{category_select}    <div class="col-auto">
        <button type="submit" class="btn btn-primary">Cari</button>
        <a href="{base}" class="btn btn-outline-secondary">Padam</a>
    </div>
</form>"#,
        base = base,
        placeholder = html_escape(placeholder),
        q = html_escape(q),
        category_select = category_select,
    )
}

// ── Pagination ─────────────────────────────────────────

fn page_href(base: &str, q: &str, category: Option<&str>, page: i64, anchor: &str) -> String {
    let mut href = format!("{}?", base);
    if !q.is_empty() {
        href.push_str(&format!("q={}&", urlencoding_simple(q)));
    }
    if let Some(cat) = category.filter(|c| !c.is_empty()) {
        href.push_str(&format!("category={}&", urlencoding_simple(cat)));
    }
    href.push_str(&format!("page={}#{}", page, anchor));
    href
}

/// Bootstrap pagination strip with prev/next and the windowed page links.
/// Empty when everything fits on one page. The active `q`/`category`
/// parameters are preserved in every link, and the anchor fragment brings
/// the list container back into view on navigation.
pub fn build_pagination(
    info: &PageInfo,
    base: &str,
    q: &str,
    category: Option<&str>,
    anchor: &str,
) -> String {
    if info.total_pages <= 1 {
        return String::new();
    }

    let mut html = String::from("<nav><ul class=\"pagination justify-content-center\">\n");

    // Prev link, visible but inert on page 1
    html.push_str(&format!(
        "<li class=\"page-item{dis}\"><a class=\"page-link\" href=\"{href}\">Sebelum</a></li>\n",
        dis = if info.current == 1 { " disabled" } else { "" },
        href = page_href(base, q, category, info.current.saturating_sub(1).max(1), anchor),
    ));

    for link in crate::view::page_links(info.current, info.total_pages) {
        match link {
            PageLink::Page(p) => html.push_str(&format!(
                "<li class=\"page-item{act}\"><a class=\"page-link\" href=\"{href}\">{p}</a></li>\n",
                act = if p == info.current { " active" } else { "" },
                href = page_href(base, q, category, p, anchor),
                p = p,
            )),
            PageLink::Ellipsis => html.push_str(
                "<li class=\"page-item disabled\"><span class=\"page-link\">...</span></li>\n",
            ),
        }
    }

    // Next link, visible but inert on the last page
    html.push_str(&format!(
        "<li class=\"page-item{dis}\"><a class=\"page-link\" href=\"{href}\">Seterusnya</a></li>\n",
        dis = if info.current == info.total_pages {
            " disabled"
        } else {
            ""
        },
        href = page_href(base, q, category, info.current.saturating_add(1).min(info.total_pages), anchor),
    ));

    html.push_str("</ul></nav>");
    html
}

// ── List page body ─────────────────────────────────────

/// Assemble one list page: heading, search form, caption, card grid,
/// pagination. The anchor id lets page links scroll back to the list.
pub fn render_list_page(
    heading: &str,
    anchor: &str,
    search_form: &str,
    caption: &str,
    cards: &str,
    pagination: &str,
) -> String {
    format!(
        r#"<h1 class="h3 mb-3">{heading}</h1>
{search_form}
<p class="text-muted small" id="results-count">{caption}</p>
<div id="{anchor}" class="row row-cols-1 row-cols-md-2 row-cols-lg-3 g-4 mb-4">
{cards}</div>
{pagination}"#,
        heading = html_escape(heading),
        search_form = search_form,
        caption = html_escape(caption),
        anchor = anchor,
        cards = cards,
        pagination = pagination,
    )
}

// ── Post page ──────────────────────────────────────────

pub fn build_share_buttons(config: &SiteConfig, page_url: &str, page_title: &str) -> String {
    let encoded_url = urlencoding_simple(page_url);
    let encoded_title = urlencoding_simple(page_title);

    let mut buttons = Vec::new();

    if config.share_facebook {
        buttons.push(format!(
            r#"<a href="https://www.facebook.com/sharer/sharer.php?u={url}" target="_blank" rel="noopener" class="btn btn-outline-primary btn-sm">Facebook</a>"#,
            url = encoded_url
        ));
    }
    if config.share_twitter {
        buttons.push(format!(
            r#"<a href="https://twitter.com/intent/tweet?url={url}&text={title}" target="_blank" rel="noopener" class="btn btn-outline-info btn-sm">Twitter</a>"#,
            url = encoded_url,
            title = encoded_title
        ));
    }
    if config.share_whatsapp {
        buttons.push(format!(
            r#"<a href="https://wa.me/?text={text}" target="_blank" rel="noopener" class="btn btn-outline-success btn-sm">WhatsApp</a>"#,
            text = urlencoding_simple(&format!("{} - {}", page_title, page_url)),
        ));
    }
    buttons.push(
        r#"<button onclick="copyPostLink()" class="btn btn-outline-secondary btn-sm">Copy Link</button>"#
            .to_string(),
    );

    format!(
        "<div class=\"post-sharing\">\n<h6 class=\"fw-bold mb-3\">Kongsi post ini:</h6>\n<div class=\"d-flex gap-2 flex-wrap\">{}</div>\n</div>",
        buttons.join("\n")
    )
}

/// Post detail page body: metadata header, excerpt lead, rendered content,
/// share actions.
pub fn render_post_page(config: &SiteConfig, post: &Post, body_html: &str) -> String {
    let mut meta_parts = vec![format!(
        "<span class=\"me-3\"><time datetime=\"{}\">{}</time></span>",
        html_escape(&post.date),
        html_escape(&format_date(&post.date)),
    )];
    if !post.categories.is_empty() {
        meta_parts.push(format!(
            "<span class=\"me-3\">&#128194; {}</span>",
            post.categories
                .iter()
                .map(|c| html_escape(c))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if !post.tags.is_empty() {
        meta_parts.push(format!(
            "<span>&#127991;&#65039; {}</span>",
            post.tags
                .iter()
                .map(|t| html_escape(t))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    let lead = if post.excerpt.is_empty() {
        String::new()
    } else {
        format!(
            "<p class=\"lead text-muted\">{}</p>\n",
            html_escape(&post.excerpt)
        )
    };

    let share = build_share_buttons(config, &config.canonical(&post.url_path()), &post.title);

    format!(
        r#"<article class="post">
<h1 class="h2">{title}</h1>
<div class="post-meta mb-4">
    <div class="d-flex flex-wrap align-items-center text-muted mb-3">{meta}</div>
    {lead}</div>
<hr class="mb-4">
<div class="post-body">
{body}
</div>
<hr class="mt-5 mb-4">
{share}
</article>"#,
        title = html_escape(&post.title),
        meta = meta_parts.join("\n    "),
        lead = lead,
        body = body_html,
        share = share,
    )
}

/// Inline failure notice for a region whose load failed.
pub fn render_error_region(message: &str) -> String {
    format!(
        "<div class=\"col-12\"><p class=\"text-center text-danger\">{}</p></div>",
        html_escape(message)
    )
}
