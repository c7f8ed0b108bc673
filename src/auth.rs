//! Login-wall detection.
//!
//! The forum never says "you are logged out"; it renders a slightly different
//! page. Detection is an ordered list of independent checks over one
//! [`AuthContext`]. The first check that fires decides; a page none of them
//! flag is treated as public. A final, separate rule
//! ([`majority_restricted`]) runs once the post list has been built.
//!
//! ```rust
//! use albumscout::auth::{detect, AuthContext, AuthSignal};
//! use scraper::Html;
//!
//! let raw = r#"<html><body><form id="loginform" method="post"></form></body></html>"#;
//! let document = Html::parse_document(raw);
//! let ctx = AuthContext {
//!     response_url: "https://tonepoet.fans/?s=miles",
//!     raw_html: raw,
//!     document: &document,
//!     candidates: &[],
//!     restricted_marker: "restricted-content",
//! };
//! assert_eq!(detect(&ctx), Some(AuthSignal::LoginPage));
//! ```

use crate::constants::{
    LOGIN_ENDPOINT, LOGIN_FORM_ID, LOGIN_PHRASES, NO_PERMISSION_PHRASE, PERMISSION_ERROR_PHRASES,
};
use crate::dom_utils::{self, class_contains, get_inner_text};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| dom_utils::selector("title"));
static LOGIN_FORM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    dom_utils::selector(&format!(
        r#"form#{id}, form[name="{id}"]"#,
        id = LOGIN_FORM_ID
    ))
});

/// Everything the checks may look at for one response.
pub struct AuthContext<'a> {
    /// Final URL after redirects.
    pub response_url: &'a str,
    /// Response body before parsing.
    pub raw_html: &'a str,
    pub document: &'a Html,
    /// Candidate post nodes in document order.
    pub candidates: &'a [ElementRef<'a>],
    pub restricted_marker: &'a str,
}

/// Which heuristic classified a page as gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSignal {
    /// The first candidate post is restricted.
    FirstPostRestricted,
    /// Login redirect, login title, login form or login wording.
    LoginPage,
    /// A known permission error survives in the raw body.
    PermissionError,
    /// Some element carries the restricted marker class.
    RestrictedElement,
    /// Half or more of the extracted posts are restricted.
    MajorityRestricted,
}

impl fmt::Display for AuthSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthSignal::FirstPostRestricted => "first_post_restricted",
            AuthSignal::LoginPage => "login_page",
            AuthSignal::PermissionError => "permission_error",
            AuthSignal::RestrictedElement => "restricted_element",
            AuthSignal::MajorityRestricted => "majority_restricted",
        };
        f.write_str(name)
    }
}

/// A named predicate over an [`AuthContext`].
pub struct AuthCheck {
    pub signal: AuthSignal,
    pub check: fn(&AuthContext<'_>) -> bool,
}

/// Page-level checks in evaluation order.
pub const AUTH_CHECKS: [AuthCheck; 4] = [
    AuthCheck {
        signal: AuthSignal::FirstPostRestricted,
        check: first_post_restricted,
    },
    AuthCheck {
        signal: AuthSignal::LoginPage,
        check: looks_like_login_page,
    },
    AuthCheck {
        signal: AuthSignal::PermissionError,
        check: has_permission_error,
    },
    AuthCheck {
        signal: AuthSignal::RestrictedElement,
        check: has_restricted_element,
    },
];

/// Run the page-level checks in order and report the first one that fires.
pub fn detect(ctx: &AuthContext<'_>) -> Option<AuthSignal> {
    AUTH_CHECKS
        .iter()
        .find(|auth_check| (auth_check.check)(ctx))
        .map(|auth_check| auth_check.signal)
}

pub fn requires_auth(ctx: &AuthContext<'_>) -> bool {
    detect(ctx).is_some()
}

/// `true` when at least half of `total` posts are restricted.
///
/// Zero posts never count as restricted.
pub fn majority_restricted(restricted: usize, total: usize) -> bool {
    total > 0 && restricted * 2 >= total
}

/// Whether an element's markup mentions the restricted marker, ignoring case.
pub fn carries_restricted_marker(element: ElementRef, marker: &str) -> bool {
    element.html().to_lowercase().contains(&marker.to_lowercase())
}

pub fn first_post_restricted(ctx: &AuthContext<'_>) -> bool {
    let Some(first) = ctx.candidates.first() else {
        return false;
    };
    let markup = first.html().to_lowercase();
    markup.contains(&ctx.restricted_marker.to_lowercase()) || markup.contains(NO_PERMISSION_PHRASE)
}

pub fn looks_like_login_page(ctx: &AuthContext<'_>) -> bool {
    if ctx.response_url.to_lowercase().contains(LOGIN_ENDPOINT) {
        return true;
    }

    if ctx.document.select(&LOGIN_FORM_SELECTOR).next().is_some() {
        return true;
    }

    let page_text = dom_utils::document_text_lower(ctx.document);
    let title = ctx
        .document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|title| get_inner_text(title).to_lowercase())
        .unwrap_or_default();

    if title.contains("log in") || (title.contains("login") && page_text.contains("required")) {
        return true;
    }

    LOGIN_PHRASES.iter().any(|phrase| page_text.contains(phrase))
}

/// Exact phrase match on the unparsed body.
pub fn has_permission_error(ctx: &AuthContext<'_>) -> bool {
    PERMISSION_ERROR_PHRASES
        .iter()
        .any(|phrase| ctx.raw_html.contains(phrase))
}

pub fn has_restricted_element(ctx: &AuthContext<'_>) -> bool {
    ctx.document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .any(|el| class_contains(el, ctx.restricted_marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "restricted-content";

    fn context<'a>(
        url: &'a str,
        raw: &'a str,
        document: &'a Html,
        candidates: &'a [ElementRef<'a>],
    ) -> AuthContext<'a> {
        AuthContext {
            response_url: url,
            raw_html: raw,
            document,
            candidates,
            restricted_marker: MARKER,
        }
    }

    #[test]
    fn test_public_page_is_not_flagged() {
        let raw = r#"<html><head><title>Search results for miles</title></head>
            <body><article id="post-1"><h2><a href="/a/">Kind of Blue</a></h2></article></body></html>"#;
        let doc = Html::parse_document(raw);
        let ctx = context("https://tonepoet.fans/?s=miles", raw, &doc, &[]);
        assert_eq!(detect(&ctx), None);
    }

    #[test]
    fn test_login_form_fires_regardless_of_content() {
        let raw = r#"<html><body>
            <article id="post-1"><h2><a href="/a/">Kind of Blue</a></h2></article>
            <form name="loginform" action="/wp-login.php"></form></body></html>"#;
        let doc = Html::parse_document(raw);
        let ctx = context("https://tonepoet.fans/?s=miles", raw, &doc, &[]);
        assert!(looks_like_login_page(&ctx));
        assert!(requires_auth(&ctx));
    }

    #[test]
    fn test_login_redirect_url() {
        let raw = "<html><body></body></html>";
        let doc = Html::parse_document(raw);
        let ctx = context(
            "https://tonepoet.fans/wp-login.php?redirect_to=%2F%3Fs%3Dmiles",
            raw,
            &doc,
            &[],
        );
        assert_eq!(detect(&ctx), Some(AuthSignal::LoginPage));
    }

    #[test]
    fn test_login_title_and_phrases() {
        let raw = "<html><head><title>Log In &lsaquo; Tone Poet</title></head><body></body></html>";
        let doc = Html::parse_document(raw);
        assert!(looks_like_login_page(&context("u", raw, &doc, &[])));

        let raw = "<html><head><title>Members</title></head><body><p>Please register in order to view this forum.</p></body></html>";
        let doc = Html::parse_document(raw);
        assert!(looks_like_login_page(&context("u", raw, &doc, &[])));
    }

    #[test]
    fn test_first_post_restricted_takes_precedence() {
        let raw = r#"<html><body>
            <article id="post-1"><h2><a href="/a/">Kind of Blue</a></h2>
            <p>You do not have permission to view this content.</p></article></body></html>"#;
        let doc = Html::parse_document(raw);
        let candidates: Vec<ElementRef> = doc.select(&dom_utils::selector("article")).collect();
        let ctx = context("u", raw, &doc, &candidates);
        assert!(first_post_restricted(&ctx));
        assert_eq!(detect(&ctx), Some(AuthSignal::FirstPostRestricted));
    }

    #[test]
    fn test_raw_permission_error() {
        let raw = "<html><body><!-- This content is restricted to members --></body></html>";
        let doc = Html::parse_document(raw);
        let ctx = context("u", raw, &doc, &[]);
        assert!(!looks_like_login_page(&ctx));
        assert_eq!(detect(&ctx), Some(AuthSignal::PermissionError));
    }

    #[test]
    fn test_restricted_element_lookup() {
        let raw = r#"<html><body><div class="entry Restricted-Content-box">Hidden</div></body></html>"#;
        let doc = Html::parse_document(raw);
        let ctx = context("u", raw, &doc, &[]);
        assert_eq!(detect(&ctx), Some(AuthSignal::RestrictedElement));
    }

    #[test]
    fn test_majority_restricted_threshold() {
        assert!(majority_restricted(3, 3));
        assert!(majority_restricted(2, 4));
        assert!(!majority_restricted(1, 3));
        assert!(!majority_restricted(0, 1));
        assert!(!majority_restricted(0, 0));
    }
}
