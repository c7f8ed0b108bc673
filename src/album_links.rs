//! Download-link extraction from a post page.

use crate::dom_utils::{self, get_inner_text, to_absolute_url};
use crate::error::Result;
use crate::models::{AlbumLink, Query};
use crate::options::ScoutOptions;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| dom_utils::selector("a[href]"));

/// Collect every anchor on the page that points at the download host and
/// whose text mentions the query.
///
/// The whole page is scanned, not just the post body, since download panes and
/// comment widgets carry links too. Links are returned in document order with
/// duplicates kept.
///
/// ```rust
/// use albumscout::{extract_links, Query, ScoutOptions};
/// use scraper::Html;
///
/// let html = r#"<p><a href="https://pixeldrain.com/u/k1">Artist - Album Name</a></p>"#;
/// let links = extract_links(
///     &Html::parse_document(html),
///     &Query::new("album").unwrap(),
///     &ScoutOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(links[0].text, "Artist - Album Name");
/// ```
pub fn extract_links(
    document: &Html,
    query: &Query,
    options: &ScoutOptions,
) -> Result<Vec<AlbumLink>> {
    let base = options.base()?;

    let links = document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| {
            let url = to_absolute_url(&base, anchor.value().attr("href")?)?;
            if !url.contains(&options.download_host) {
                return None;
            }

            let text = get_inner_text(anchor);
            if text.is_empty() || !query.matches(&text) {
                return None;
            }

            Some(AlbumLink { text, url })
        })
        .collect();

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(html: &str, query: &str) -> Vec<AlbumLink> {
        extract_links(
            &Html::parse_document(html),
            &Query::new(query).unwrap(),
            &ScoutOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_matches_query_case_insensitively() {
        let html = r#"
            <div class="entry-content">
                <a href="https://pixeldrain.com/u/aa11">Artist - Album Name</a>
                <a href="https://pixeldrain.com/u/bb22">Artist - Other Record</a>
            </div>
        "#;
        let found = links(html, "album");
        assert_eq!(
            found,
            vec![AlbumLink {
                text: "Artist - Album Name".to_string(),
                url: "https://pixeldrain.com/u/aa11".to_string(),
            }]
        );
    }

    #[test]
    fn test_rejects_links_off_the_download_host() {
        let html = r#"
            <a href="https://tonepoet.fans/tag/album/">Album tag</a>
            <a href="/album-archive/">Album archive</a>
            <a href="https://mega.nz/file/x">Album mirror</a>
            <a href="https://pixeldrain.com/l/list">Album list</a>
        "#;
        let found = links(html, "album");
        assert_eq!(found.len(), 1);
        assert!(found.iter().all(|link| link.url.contains("pixeldrain.com")));
    }

    #[test]
    fn test_skips_empty_text_and_keeps_duplicates() {
        let html = r#"
            <a href="https://pixeldrain.com/u/img"><img src="cover.jpg"></a>
            <div class="comments"><a href="https://pixeldrain.com/u/dup">  Kind of   Blue </a></div>
            <aside><a href="https://pixeldrain.com/u/dup">Kind of Blue</a></aside>
        "#;
        let found = links(html, "kind of blue");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "Kind of Blue");
        assert_eq!(found[0], found[1]);
    }

    #[test]
    fn test_no_matches() {
        let html = r#"<p>Nothing to see</p>"#;
        assert!(links(html, "anything").is_empty());
    }
}
