//! Small DOM helpers over `scraper` shared by the extractors.

use crate::constants::{DATE_CLASS_HINT, HEADING_TAGS};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Visible text of an element with runs of whitespace collapsed and ends trimmed.
pub fn get_inner_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-document text, lowercased, for phrase scanning.
pub fn document_text_lower(document: &Html) -> String {
    document.root_element().text().collect::<String>().to_lowercase()
}

/// Whether the element's `class` attribute contains `needle`, ignoring case.
pub fn class_contains(element: ElementRef, needle: &str) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| class.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

pub fn is_heading(element: ElementRef) -> bool {
    HEADING_TAGS.contains(&element.value().name())
}

/// `<time>` elements and anything whose class mentions a date.
pub fn is_date_like(element: ElementRef) -> bool {
    element.value().name() == "time" || class_contains(element, DATE_CLASS_HINT)
}

/// First descendant element (in document order) matching `predicate`.
pub fn find_descendant<'a, F>(element: ElementRef<'a>, predicate: F) -> Option<ElementRef<'a>>
where
    F: Fn(ElementRef<'a>) -> bool,
{
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| predicate(*el))
}

/// First element after the start of `element` in document order matching `predicate`.
///
/// Like a `find_next` walk, the element's own descendants come first, then
/// everything that follows it in the document.
pub fn find_next<'a, F>(
    document: &'a Html,
    element: ElementRef<'a>,
    predicate: F,
) -> Option<ElementRef<'a>>
where
    F: Fn(ElementRef<'a>) -> bool,
{
    let start = element.id();
    document
        .root_element()
        .descendants()
        .skip_while(|node| node.id() != start)
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| predicate(*el))
}

/// First anchor inside `element`.
pub fn first_anchor(element: ElementRef) -> Option<ElementRef> {
    find_descendant(element, |el| el.value().name() == "a")
}

/// Resolve `href` against `base`, producing an absolute URL.
pub fn to_absolute_url(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(String::from)
}

/// Compile a selector that is known to be valid at compile time.
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|_| panic!("invalid built-in selector: {css}"))
}
