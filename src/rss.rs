use chrono::{DateTime, NaiveDate, Utc};

use crate::config::SiteConfig;
use crate::content::ContentStore;

/// Generate an RSS 2.0 XML feed of the blog posts.
/// Posts are listed in load order; dates come out RFC 2822 in the
/// configured timezone, as the RSS spec requires.
pub fn generate_feed(config: &SiteConfig, store: &ContentStore) -> String {
    let format_rfc2822 = |raw: &str| -> Option<String> {
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        let ndt = date.and_hms_opt(0, 0, 0)?;
        let utc: DateTime<Utc> = DateTime::from_naive_utc_and_offset(ndt, Utc);
        Some(if let Ok(tz) = config.timezone.parse::<chrono_tz::Tz>() {
            utc.with_timezone(&tz)
                .format("%a, %d %b %Y %H:%M:%S %z")
                .to_string()
        } else {
            utc.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
        })
    };

    let last_build = store
        .posts
        .first()
        .and_then(|p| format_rfc2822(&p.date))
        .map(|d| format!("    <lastBuildDate>{}</lastBuildDate>\n", d))
        .unwrap_or_default();

    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
    <title>{title}</title>
    <link>{url}</link>
    <description>{desc}</description>
    <atom:link href="{url}/feed" rel="self" type="application/rss+xml"/>
    <language>ms</language>
{last_build}"#,
        title = xml_escape(&config.site_name),
        url = xml_escape(config.site_url.trim_end_matches('/')),
        desc = xml_escape(&config.tagline),
        last_build = last_build,
    );

    for post in &store.posts {
        let pub_date = format_rfc2822(&post.date)
            .map(|d| format!("        <pubDate>{}</pubDate>\n", d))
            .unwrap_or_default();
        let link = config.canonical(&post.url_path());

        xml.push_str(&format!(
            r#"    <item>
        <title>{title}</title>
        <link>{link}</link>
        <guid isPermaLink="true">{link}</guid>
{pub_date}        <description>{desc}</description>
    </item>
"#,
            title = xml_escape(&post.title),
            link = xml_escape(&link),
            pub_date = pub_date,
            desc = xml_escape(&post.excerpt),
        ));
    }

    xml.push_str("</channel>\n</rss>");
    xml
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
