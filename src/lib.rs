//! # albumscout
//!
//! Searches a forum's public search page and returns the album download links
//! found on the posts it turns up, whether or not the caller is logged in.
//!
//! ## Overview
//!
//! The forum has no API, only rendered HTML that differs subtly between guests
//! and members. albumscout reads that HTML and:
//!
//! - **Detects login walls** from page content alone, through an ordered set of
//!   independent heuristics (see [`auth`])
//! - **Extracts search results** with a container strategy and a heading fallback
//! - **Extracts download links** from post pages by host allowlist and query match
//! - **Normalizes dates** to a `Month Year` form
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use albumscout::{AlbumScout, HttpFetcher, Query, ScoutOptions, Session};
//!
//! let options = ScoutOptions::default();
//! let scout = AlbumScout::new(HttpFetcher::new(&options)?, options)?;
//!
//! let response = scout.run(&Query::new("blue note")?, &Session::new())?;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Working on Fetched HTML
//!
//! The extractors are plain functions over `scraper` documents, so captured
//! pages can be processed without any network access:
//!
//! ```rust
//! use albumscout::{parse_search_page, ScoutOptions};
//!
//! let html = r#"<html><body>
//!     <article id="post-9"><h2><a href="/2025/04/kind-of-blue/">Kind of Blue</a></h2>
//!     <time>April 14, 2025</time></article>
//! </body></html>"#;
//!
//! let outcome = parse_search_page("https://tonepoet.fans/?s=blue", html, &ScoutOptions::default())?;
//! assert!(!outcome.requires_auth);
//! assert_eq!(outcome.posts[0].url, "https://tonepoet.fans/2025/04/kind-of-blue/");
//! # Ok::<(), albumscout::AlbumScoutError>(())
//! ```
//!
//! ## Error Handling
//!
//! Only a failure to fetch the search page is returned as an error. Posts that
//! fail to load are skipped, and an unclear login state is reported as
//! `requires_auth` rather than as an empty result.
//!
//! ```rust,no_run
//! use albumscout::{AlbumScout, AlbumScoutError, HttpFetcher, Query, ScoutOptions, Session};
//!
//! let options = ScoutOptions::default();
//! let scout = AlbumScout::new(HttpFetcher::new(&options).unwrap(), options).unwrap();
//!
//! match scout.run(&Query::new("monk").unwrap(), &Session::new()) {
//!     Ok(response) => println!("{} results", response.results.len()),
//!     Err(AlbumScoutError::Fetch { url, message }) => eprintln!("{url}: {message}"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

mod album_links;
pub mod auth;
mod constants;
mod date;
mod dom_utils;
mod error;
mod fetch;
mod models;
mod options;
mod scout;
mod search_results;

// Public exports
pub use album_links::extract_links;
pub use auth::AuthSignal;
pub use date::normalize_date;
pub use error::{AlbumScoutError, Result};
pub use fetch::{FetchResponse, Fetcher, HttpFetcher, Session};
pub use models::{AlbumLink, Post, Query, ResultRecord, SearchOutcome, SearchResponse};
pub use options::{ScoutOptions, ScoutOptionsBuilder};
pub use scout::AlbumScout;
pub use search_results::{
    extract_posts, parse_search_page, post_containers, posts_from_containers, posts_from_headings,
    ExtractedPosts,
};
