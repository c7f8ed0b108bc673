//! Main [`AlbumScout`] struct running a whole search.
//!
//! ## Example
//!
//! ```rust,no_run
//! use albumscout::{AlbumScout, HttpFetcher, Query, ScoutOptions, Session};
//!
//! let options = ScoutOptions::default();
//! let fetcher = HttpFetcher::new(&options)?;
//! let scout = AlbumScout::new(fetcher, options)?;
//!
//! let session = Session::parse_header("wordpress_logged_in_abc=token");
//! let response = scout.run(&Query::new("coltrane")?, &session)?;
//!
//! if response.requires_auth {
//!     println!("log in first");
//! }
//! for record in response.results {
//!     println!("{} ({}) -> {}", record.album, record.post_date, record.url);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::album_links::extract_links;
use crate::date::normalize_date;
use crate::error::Result;
use crate::fetch::{Fetcher, Session};
use crate::models::{Post, Query, ResultRecord, SearchResponse};
use crate::options::ScoutOptions;
use crate::search_results::parse_search_page;
use scraper::Html;
use std::thread;
use tracing::{info, warn};

/// Runs searches against one forum.
///
/// Posts are fetched one at a time in the order the search page lists them,
/// with [`ScoutOptions::post_delay`] between consecutive fetches.
pub struct AlbumScout<F: Fetcher> {
    fetcher: F,
    options: ScoutOptions,
}

impl<F: Fetcher> AlbumScout<F> {
    /// Create a new scout, validating the configured base URL.
    pub fn new(fetcher: F, options: ScoutOptions) -> Result<Self> {
        options.base()?;
        Ok(Self { fetcher, options })
    }

    pub fn options(&self) -> &ScoutOptions {
        &self.options
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Search the forum for `query`.
    ///
    /// Only a failure to fetch the search page itself is returned as `Err`.
    /// Individual posts that fail are logged and skipped. When posts were found
    /// but none of them produced a link, the search is reported as needing
    /// login, since gated post bodies look exactly like that.
    pub fn run(&self, query: &Query, session: &Session) -> Result<SearchResponse> {
        let search_url = self.options.search_url(query.as_str())?;
        info!(%query, url = %search_url, "searching forum");

        let page = self.fetcher.fetch(&search_url, session)?;
        let outcome = parse_search_page(&page.final_url, &page.body, &self.options)?;

        if outcome.requires_auth {
            return Ok(SearchResponse::auth_required());
        }
        if outcome.posts.is_empty() {
            info!(%query, "no posts found");
            return Ok(SearchResponse::no_posts());
        }

        let mut results = Vec::new();
        for (index, post) in outcome.posts.iter().enumerate() {
            if index > 0 && !self.options.post_delay.is_zero() {
                thread::sleep(self.options.post_delay);
            }
            match self.scrape_post(post, query, session) {
                Ok(records) => results.extend(records),
                Err(e) => warn!(url = %post.url, error = %e, "skipping post"),
            }
        }

        if results.is_empty() {
            info!(
                posts = outcome.posts.len(),
                "posts found but no links extracted, assuming login required"
            );
            return Ok(SearchResponse::auth_required());
        }

        info!(%query, results = results.len(), "search finished");
        Ok(SearchResponse::found(results))
    }

    fn scrape_post(
        &self,
        post: &Post,
        query: &Query,
        session: &Session,
    ) -> Result<Vec<ResultRecord>> {
        let page = self.fetcher.fetch(&post.url, session)?;
        let document = Html::parse_document(&page.body);
        let links = extract_links(&document, query, &self.options)?;
        let post_date = normalize_date(&post.raw_date);

        Ok(links
            .into_iter()
            .map(|link| ResultRecord {
                album: link.text,
                url: link.url,
                post_title: post.title.clone(),
                post_date: post_date.clone(),
            })
            .collect())
    }
}
