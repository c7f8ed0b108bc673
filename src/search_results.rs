//! Reading the forum's search-results page.
//!
//! Posts are located with two independent strategies tried in sequence:
//!
//! 1. [`posts_from_containers`]: entries marked up as post containers
//!    (`id="post-123"`, or failing that a `post`/`entry` class), titled by the
//!    first anchor of their heading.
//! 2. [`posts_from_headings`]: every `<h2>` with an anchor, used only when the
//!    first strategy finds no containers at all.
//!
//! [`parse_search_page`] ties both to the login-wall checks in [`crate::auth`].

use crate::auth::{self, carries_restricted_marker, AuthContext};
use crate::constants::POST_CLASS_HINTS;
use crate::dom_utils::{
    self, class_contains, find_descendant, find_next, first_anchor, get_inner_text, is_date_like,
    is_heading, to_absolute_url,
};
use crate::error::Result;
use crate::models::{Post, SearchOutcome};
use crate::options::ScoutOptions;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info};
use url::Url;

static ID_SELECTOR: Lazy<Selector> = Lazy::new(|| dom_utils::selector("[id]"));
static CLASS_CANDIDATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| dom_utils::selector("article[class], div[class]"));
static H2_SELECTOR: Lazy<Selector> = Lazy::new(|| dom_utils::selector("h2"));

/// Posts found by one strategy, plus how many of them are restricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPosts {
    pub posts: Vec<Post>,
    pub restricted: usize,
}

/// Elements that look like individual post entries, in document order.
///
/// Id-prefixed containers (`post-` followed by a number) win; the class-name
/// heuristic is only consulted when the page has none. Elements wrapping
/// another titled container are dropped, so each container is one post.
pub fn post_containers<'a>(document: &'a Html, options: &ScoutOptions) -> Vec<ElementRef<'a>> {
    let by_id: Vec<_> = document
        .select(&ID_SELECTOR)
        .filter(|el| {
            el.value()
                .attr("id")
                .and_then(|id| id.strip_prefix(options.post_id_prefix.as_str()))
                .map(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
                .unwrap_or(false)
        })
        .collect();
    if !by_id.is_empty() {
        return innermost(by_id);
    }

    innermost(
        document
            .select(&CLASS_CANDIDATE_SELECTOR)
            .filter(|el| POST_CLASS_HINTS.iter().any(|hint| class_contains(*el, hint)))
            .collect(),
    )
}

/// Drop matches that contain another match carrying a title anchor.
///
/// A headingless match such as `div.entry-content` inside `article.post`
/// does not displace its parent.
fn innermost(matched: Vec<ElementRef>) -> Vec<ElementRef> {
    let titled: HashSet<_> = matched
        .iter()
        .filter(|el| has_title_anchor(**el))
        .map(|el| el.id())
        .collect();

    matched
        .into_iter()
        .filter(|el| {
            !el.descendants()
                .skip(1)
                .any(|node| titled.contains(&node.id()))
        })
        .collect()
}

fn has_title_anchor(container: ElementRef) -> bool {
    find_descendant(container, is_heading)
        .and_then(first_anchor)
        .is_some()
}

/// Nodes the first-post login check inspects: containers, else bare headings.
pub fn candidate_nodes<'a>(document: &'a Html, options: &ScoutOptions) -> Vec<ElementRef<'a>> {
    let containers = post_containers(document, options);
    if !containers.is_empty() {
        return containers;
    }
    document.select(&H2_SELECTOR).collect()
}

/// Primary strategy: one post per container whose heading holds an anchor.
pub fn posts_from_containers(
    containers: &[ElementRef],
    base: &Url,
    options: &ScoutOptions,
) -> ExtractedPosts {
    let mut extracted = ExtractedPosts::default();
    let mut seen = HashSet::new();

    for container in containers {
        let Some(heading) = find_descendant(*container, is_heading) else {
            continue;
        };
        let Some(post) = post_from_heading(heading, base, options, container_date(*container))
        else {
            continue;
        };
        if !seen.insert(post.url.clone()) {
            continue;
        }
        if carries_restricted_marker(*container, &options.restricted_marker) {
            extracted.restricted += 1;
        }
        extracted.posts.push(post);
    }

    extracted
}

/// Fallback strategy: every `<h2>` with an anchor is a post.
pub fn posts_from_headings(document: &Html, base: &Url, options: &ScoutOptions) -> ExtractedPosts {
    let mut extracted = ExtractedPosts::default();

    for heading in document.select(&H2_SELECTOR) {
        let date = find_next(document, heading, is_date_like).map(get_inner_text);
        let Some(post) = post_from_heading(heading, base, options, date) else {
            continue;
        };
        let restricted = heading
            .parent()
            .and_then(ElementRef::wrap)
            .map(|parent| carries_restricted_marker(parent, &options.restricted_marker))
            .unwrap_or(false);
        if restricted {
            extracted.restricted += 1;
        }
        extracted.posts.push(post);
    }

    extracted
}

/// Run the primary strategy, falling back to headings when no container exists.
pub fn extract_posts(document: &Html, options: &ScoutOptions) -> Result<ExtractedPosts> {
    let base = options.base()?;
    let containers = post_containers(document, options);
    if containers.is_empty() {
        debug!("no post containers, falling back to headings");
        return Ok(posts_from_headings(document, &base, options));
    }
    Ok(posts_from_containers(&containers, &base, options))
}

/// Classify and extract a search-results response.
///
/// Page-level login checks run first; if one fires no posts are returned. After
/// extraction, a page where at least half the posts are restricted is also
/// reported as gated.
pub fn parse_search_page(
    response_url: &str,
    raw_html: &str,
    options: &ScoutOptions,
) -> Result<SearchOutcome> {
    let document = Html::parse_document(raw_html);
    let candidates = candidate_nodes(&document, options);

    let ctx = AuthContext {
        response_url,
        raw_html,
        document: &document,
        candidates: &candidates,
        restricted_marker: &options.restricted_marker,
    };
    if let Some(signal) = auth::detect(&ctx) {
        info!(%signal, url = %response_url, "search page requires login");
        return Ok(SearchOutcome::auth_required());
    }

    let extracted = extract_posts(&document, options)?;
    if auth::majority_restricted(extracted.restricted, extracted.posts.len()) {
        info!(
            restricted = extracted.restricted,
            total = extracted.posts.len(),
            "most posts restricted, search requires login"
        );
        return Ok(SearchOutcome::auth_required());
    }

    debug!(count = extracted.posts.len(), "extracted posts");
    Ok(SearchOutcome::with_posts(extracted.posts))
}

fn post_from_heading(
    heading: ElementRef,
    base: &Url,
    options: &ScoutOptions,
    raw_date: Option<String>,
) -> Option<Post> {
    let anchor = first_anchor(heading)?;
    let url = to_absolute_url(base, anchor.value().attr("href").unwrap_or(""))?;

    let title = [
        get_inner_text(anchor),
        anchor.value().attr("title").unwrap_or("").trim().to_string(),
        get_inner_text(heading),
    ]
    .into_iter()
    .find(|candidate| !candidate.is_empty())
    .unwrap_or_else(|| options.untitled_placeholder.clone());

    Some(Post {
        title,
        url,
        raw_date: raw_date.unwrap_or_default(),
    })
}

/// Date text inside the container, or in the element right after it.
fn container_date(container: ElementRef) -> Option<String> {
    if let Some(date) = find_descendant(container, is_date_like) {
        return Some(get_inner_text(date));
    }

    let next = container.next_siblings().find_map(ElementRef::wrap)?;
    if is_date_like(next) {
        return Some(get_inner_text(next));
    }
    find_descendant(next, is_date_like).map(get_inner_text)
}
