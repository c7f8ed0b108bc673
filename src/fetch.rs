//! Page fetching and the caller-supplied cookie session.
//!
//! The extraction code never talks to the network directly. It asks a
//! [`Fetcher`] for a page and threads a read-only [`Session`] through every
//! call. [`HttpFetcher`] is the `reqwest` implementation; tests substitute an
//! in-memory one.

use crate::error::{AlbumScoutError, Result};
use crate::options::ScoutOptions;
use reqwest::blocking::Client;
use reqwest::header::COOKIE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// URL after redirects.
    pub final_url: String,
    pub body: String,
}

impl FetchResponse {
    /// A response served from `url` without redirects.
    pub fn ok(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            final_url: url.into(),
            body: body.into(),
        }
    }
}

/// Source of pages.
///
/// Transport failures and non-success statuses are `Err`; an empty body with a
/// success status is a valid `Ok`.
pub trait Fetcher {
    fn fetch(&self, url: &str, session: &Session) -> Result<FetchResponse>;
}

/// Cookie name to value map sent with every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    cookies: BTreeMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cookies: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a `Cookie:` header value such as `a=1; b=2`.
    ///
    /// Segments without `=` are ignored.
    pub fn parse_header(header: &str) -> Self {
        Self::from_pairs(header.split(';').filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_string(), value.trim().to_string()))
        }))
    }

    /// Load a session stored as a flat JSON object of cookie names to values.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .map_err(|e| AlbumScoutError::Session(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&data)
            .map_err(|e| AlbumScoutError::Session(format!("{}: {}", path.display(), e)))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Add `other`'s cookies, overwriting on name clashes.
    pub fn merge(&mut self, other: Session) {
        self.cookies.extend(other.cookies);
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Render as a `Cookie:` header value, `None` when empty.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Blocking HTTP fetcher backed by `reqwest`.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(options: &ScoutOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(|e| AlbumScoutError::fetch(&options.base_url, e))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, session: &Session) -> Result<FetchResponse> {
        let mut request = self.client.get(url);
        if let Some(cookie) = session.cookie_header() {
            request = request.header(COOKIE, cookie);
        }

        let response = request
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| AlbumScoutError::fetch(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().map_err(|e| AlbumScoutError::fetch(url, e))?;

        debug!(%url, %final_url, status, bytes = body.len(), "fetched page");
        Ok(FetchResponse { final_url, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_round_trips_to_header() {
        let session = Session::parse_header(" wordpress_logged_in_abc=tok%7C1 ; theme=dark;junk");
        assert_eq!(session.len(), 2);
        assert_eq!(session.get("theme"), Some("dark"));
        assert_eq!(
            session.cookie_header().as_deref(),
            Some("theme=dark; wordpress_logged_in_abc=tok%7C1")
        );
    }

    #[test]
    fn test_ok_response_keeps_url_and_body() {
        let response = FetchResponse::ok("https://tonepoet.fans/p/", "");
        assert_eq!(
            response,
            FetchResponse {
                final_url: "https://tonepoet.fans/p/".to_string(),
                body: String::new(),
            }
        );
    }

    #[test]
    fn test_empty_session_sends_no_header() {
        assert_eq!(Session::new().cookie_header(), None);
    }

    #[test]
    fn test_merge_overwrites() {
        let mut session = Session::from_pairs([("a", "1"), ("b", "2")]);
        session.merge(Session::from_pairs([("b", "3")]));
        assert_eq!(session.get("a"), Some("1"));
        assert_eq!(session.get("b"), Some("3"));
    }

    #[test]
    fn test_session_deserializes_from_flat_object() {
        let session: Session = serde_json::from_str(r#"{"sid":"xyz"}"#).unwrap();
        assert_eq!(session.get("sid"), Some("xyz"));
    }
}
