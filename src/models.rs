//! Value objects flowing through the search pipeline.
//!
//! Everything here is built once by an extractor and never mutated afterwards.
//! [`SearchResponse`] is the caller-facing shape and serializes with camelCase
//! keys:
//!
//! ```rust
//! use albumscout::{ResultRecord, SearchResponse};
//!
//! let response = SearchResponse::found(vec![ResultRecord {
//!     album: "Artist - Album".to_string(),
//!     url: "https://pixeldrain.com/u/abc".to_string(),
//!     post_title: "Weekly uploads".to_string(),
//!     post_date: "April 2025".to_string(),
//! }]);
//!
//! let json = serde_json::to_value(&response).unwrap();
//! assert_eq!(json["requiresAuth"], false);
//! assert_eq!(json["results"][0]["postTitle"], "Weekly uploads");
//! ```

use crate::error::{AlbumScoutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to the forum to search";
pub const NO_POSTS_MESSAGE: &str = "No posts found for this query";

/// A validated, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trims `text` and rejects it if nothing is left.
    pub fn new(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AlbumScoutError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring test used by every matching step.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0.to_lowercase())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the forum's search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    /// Absolute URL of the post page.
    pub url: String,
    /// Date text exactly as rendered, empty when the entry shows none.
    pub raw_date: String,
}

/// A download link found on a post page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumLink {
    /// Trimmed visible text of the anchor.
    pub text: String,
    /// Absolute link target.
    pub url: String,
}

/// Result of reading a search-results page.
///
/// `requires_auth == true` always comes with an empty `posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub posts: Vec<Post>,
    pub requires_auth: bool,
}

impl SearchOutcome {
    pub fn auth_required() -> Self {
        Self {
            posts: Vec::new(),
            requires_auth: true,
        }
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts,
            requires_auth: false,
        }
    }
}

/// One matched link paired with the metadata of the post it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub album: String,
    pub url: String,
    pub post_title: String,
    /// Normalized `Month Year` form, see [`normalize_date`](crate::normalize_date).
    pub post_date: String,
}

/// Aggregate answer to a search, ready for serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<ResultRecord>,
    pub requires_auth: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    pub fn found(results: Vec<ResultRecord>) -> Self {
        Self {
            results,
            requires_auth: false,
            message: None,
        }
    }

    pub fn auth_required() -> Self {
        Self {
            results: Vec::new(),
            requires_auth: true,
            message: Some(LOGIN_REQUIRED_MESSAGE.to_string()),
        }
    }

    pub fn no_posts() -> Self {
        Self {
            results: Vec::new(),
            requires_auth: false,
            message: Some(NO_POSTS_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_rejects_blank() {
        assert!(matches!(Query::new("   "), Err(AlbumScoutError::EmptyQuery)));
        assert_eq!(Query::new("  Coltrane ").unwrap().as_str(), "Coltrane");
    }

    #[test]
    fn test_query_matches_case_insensitively() {
        let query = Query::new("album").unwrap();
        assert!(query.matches("Artist - Album Name"));
        assert!(!query.matches("Artist - Single"));
    }

    #[test]
    fn test_response_omits_missing_message() {
        let json = serde_json::to_string(&SearchResponse::found(vec![])).unwrap();
        assert_eq!(json, r#"{"results":[],"requiresAuth":false}"#);

        let json = serde_json::to_value(SearchResponse::auth_required()).unwrap();
        assert_eq!(json["message"], LOGIN_REQUIRED_MESSAGE);
    }
}
