//! Generic paginated collection view.
//!
//! The four content kinds (posts, shop, services, komuniti) all display the
//! same way: free-text filter over a handful of fields, fixed-size pages,
//! a results caption, and windowed page links. This module holds that
//! pipeline once; each kind only supplies its searchable fields via
//! [`CardItem`].

/// Searchable surface of one collection item.
pub trait CardItem {
    /// Text fields the free-text query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Category memberships, for kinds that have a category filter.
    fn categories(&self) -> &[String] {
        &[]
    }
}

/// Filter a collection by free-text query and optional exact category.
///
/// The query is trimmed and lower-cased; an empty query matches everything.
/// A match is a case-insensitive substring hit on any search field. The
/// category, when non-empty, requires exact membership. Relative order from
/// `all` is preserved and a no-match result is simply empty.
pub fn filter<'a, T: CardItem>(
    all: &'a [T],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a T> {
    let term = query.trim().to_lowercase();
    let category = category.filter(|c| !c.is_empty());

    all.iter()
        .filter(|item| {
            let matches_term = term.is_empty()
                || item
                    .search_fields()
                    .iter()
                    .any(|f| f.to_lowercase().contains(&term));
            let matches_category = match category {
                Some(cat) => item.categories().iter().any(|c| c == cat),
                None => true,
            };
            matches_term && matches_category
        })
        .collect()
}

/// Page boundary metadata for one rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub current: i64,
    pub total_pages: i64,
    /// Total number of filtered items.
    pub total: usize,
    /// 1-based index of the first shown item (0 when the result is empty).
    pub start: usize,
    /// 1-based index of the last shown item (0 when the result is empty).
    pub end: usize,
}

impl PageInfo {
    /// Results caption, e.g. `Menunjukkan 1-6 daripada 7 post`.
    pub fn caption(&self, noun: &str) -> String {
        format!(
            "Menunjukkan {}-{} daripada {} {}",
            self.start, self.end, self.total, noun
        )
    }
}

/// Slice one page out of the filtered sequence.
///
/// `total_pages = ceil(total / per_page)`, 0 for an empty sequence. An
/// out-of-range page yields an empty slice, never an error, even for a
/// `page` near `i64::MAX`.
pub fn paginate<'a, T>(
    filtered: &[&'a T],
    page: i64,
    per_page: usize,
) -> (Vec<&'a T>, PageInfo) {
    let total = filtered.len();
    let total_pages = (total as f64 / per_page as f64).ceil() as i64;

    let start_index = (page.saturating_sub(1).max(0) as usize).saturating_mul(per_page);
    let items: Vec<&'a T> = filtered
        .iter()
        .skip(start_index)
        .take(per_page)
        .copied()
        .collect();

    let (start, end) = if items.is_empty() {
        (0, 0)
    } else {
        (start_index + 1, start_index + items.len())
    };

    (
        items,
        PageInfo {
            current: page,
            total_pages,
            total,
            start,
            end,
        },
    )
}

/// One entry in the rendered pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(i64),
    Ellipsis,
}

/// Windowed page-link sequence: always page 1 and the last page, pages
/// within ±2 of the current one, and a single ellipsis for each collapsed
/// run in between.
pub fn page_links(current: i64, total_pages: i64) -> Vec<PageLink> {
    let mut links = Vec::new();
    for p in 1..=total_pages {
        if p == 1
            || p == total_pages
            || (p >= current.saturating_sub(2) && p <= current.saturating_add(2))
        {
            links.push(PageLink::Page(p));
        } else if p == current.saturating_sub(3) || p == current.saturating_add(3) {
            links.push(PageLink::Ellipsis);
        }
    }
    links
}

/// Normalize a raw `page` query parameter the way every list route does.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}
