//! Configuration options for forum searches.
//!
//! This module provides [`ScoutOptions`] and [`ScoutOptionsBuilder`]
//! for configuring the target forum, the heuristics' marker tokens and the
//! pacing of post fetches.
//!
//! ## Example
//!
//! ```rust
//! use albumscout::ScoutOptions;
//! use std::time::Duration;
//!
//! // Using default options
//! let options = ScoutOptions::default();
//! assert_eq!(options.base_url, "https://tonepoet.fans");
//!
//! // Using builder for custom options
//! let options = ScoutOptions::builder()
//!     .download_host("files.example.net")
//!     .post_delay(Duration::ZERO)
//!     .build();
//! assert_eq!(options.download_host, "files.example.net");
//! ```

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_DOWNLOAD_HOST, DEFAULT_POST_ID_PREFIX, DEFAULT_RESTRICTED_MARKER,
    DEFAULT_UNTITLED, DEFAULT_USER_AGENT,
};
use crate::error::{AlbumScoutError, Result};
use std::time::Duration;
use url::Url;

/// Configuration options for a search.
///
/// Controls which forum is searched, which tokens the extraction heuristics
/// look for, and how the HTTP fetcher behaves.
#[derive(Debug, Clone)]
pub struct ScoutOptions {
    /// Base origin of the forum.
    ///
    /// Every relative `href` is resolved against this origin, and the search
    /// page is requested as `<base_url>/?s=<query>`.
    ///
    /// Default: `https://tonepoet.fans`
    pub base_url: String,

    /// Host fragment a download link must contain to be reported.
    ///
    /// Default: `pixeldrain.com`
    pub download_host: String,

    /// Prefix of the `id` attribute the forum gives each post container; a digit must follow it.
    ///
    /// Default: `post-`
    pub post_id_prefix: String,

    /// Class token the forum theme puts on post bodies hidden from guests.
    ///
    /// Default: `restricted-content`
    pub restricted_marker: String,

    /// Title used for posts whose title cannot be resolved.
    ///
    /// Default: `Untitled`
    pub untitled_placeholder: String,

    /// Pause between consecutive post fetches.
    ///
    /// Default: `500ms`
    pub post_delay: Duration,

    /// Per-request timeout used by [`HttpFetcher`](crate::HttpFetcher).
    ///
    /// Default: `10s`
    pub timeout: Duration,

    /// User agent sent by [`HttpFetcher`](crate::HttpFetcher).
    pub user_agent: String,
}

impl Default for ScoutOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            download_host: DEFAULT_DOWNLOAD_HOST.to_string(),
            post_id_prefix: DEFAULT_POST_ID_PREFIX.to_string(),
            restricted_marker: DEFAULT_RESTRICTED_MARKER.to_string(),
            untitled_placeholder: DEFAULT_UNTITLED.to_string(),
            post_delay: Duration::from_millis(500),
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScoutOptions {
    /// Creates a new builder for ScoutOptions
    pub fn builder() -> ScoutOptionsBuilder {
        ScoutOptionsBuilder::default()
    }

    /// Parsed base origin.
    pub fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|_| AlbumScoutError::InvalidUrl(self.base_url.clone()))
    }

    /// URL of the forum search page for `query`.
    pub fn search_url(&self, query: &str) -> Result<String> {
        let mut url = self
            .base()?
            .join("/")
            .map_err(|_| AlbumScoutError::InvalidUrl(self.base_url.clone()))?;
        url.query_pairs_mut().append_pair("s", query);
        Ok(url.into())
    }
}

/// Builder for [`ScoutOptions`].
///
/// ## Example
///
/// ```rust
/// use albumscout::ScoutOptions;
///
/// let options = ScoutOptions::builder()
///     .base_url("https://forum.example.org")
///     .restricted_marker("members-only")
///     .build();
/// ```
#[derive(Default)]
pub struct ScoutOptionsBuilder {
    base_url: Option<String>,
    download_host: Option<String>,
    post_id_prefix: Option<String>,
    restricted_marker: Option<String>,
    untitled_placeholder: Option<String>,
    post_delay: Option<Duration>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ScoutOptionsBuilder {
    /// Set the forum base origin
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the allowlisted download host
    pub fn download_host(mut self, host: impl Into<String>) -> Self {
        self.download_host = Some(host.into());
        self
    }

    /// Set the post container id prefix
    pub fn post_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.post_id_prefix = Some(prefix.into());
        self
    }

    /// Set the restricted-content marker token
    pub fn restricted_marker(mut self, marker: impl Into<String>) -> Self {
        self.restricted_marker = Some(marker.into());
        self
    }

    /// Set the placeholder title
    pub fn untitled_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.untitled_placeholder = Some(placeholder.into());
        self
    }

    /// Set the pause between post fetches
    pub fn post_delay(mut self, delay: Duration) -> Self {
        self.post_delay = Some(delay);
        self
    }

    /// Set the HTTP timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the HTTP user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the ScoutOptions
    pub fn build(self) -> ScoutOptions {
        let defaults = ScoutOptions::default();
        ScoutOptions {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            download_host: self.download_host.unwrap_or(defaults.download_host),
            post_id_prefix: self.post_id_prefix.unwrap_or(defaults.post_id_prefix),
            restricted_marker: self.restricted_marker.unwrap_or(defaults.restricted_marker),
            untitled_placeholder: self
                .untitled_placeholder
                .unwrap_or(defaults.untitled_placeholder),
            post_delay: self.post_delay.unwrap_or(defaults.post_delay),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        let options = ScoutOptions::default();
        let url = options.search_url("Bill Evans & trio").unwrap();
        assert_eq!(url, "https://tonepoet.fans/?s=Bill+Evans+%26+trio");
    }

    #[test]
    fn test_builder_keeps_unset_defaults() {
        let options = ScoutOptions::builder().download_host("mega.nz").build();
        assert_eq!(options.download_host, "mega.nz");
        assert_eq!(options.post_id_prefix, "post-");
        assert_eq!(options.post_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_base_url() {
        let options = ScoutOptions::builder().base_url("not a url").build();
        assert!(matches!(
            options.search_url("x"),
            Err(AlbumScoutError::InvalidUrl(_))
        ));
    }
}
