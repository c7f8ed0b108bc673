//! Fixed markers, phrases and patterns the heuristics match against.

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_BASE_URL: &str = "https://tonepoet.fans";
pub const DEFAULT_DOWNLOAD_HOST: &str = "pixeldrain.com";
pub const DEFAULT_POST_ID_PREFIX: &str = "post-";
pub const DEFAULT_RESTRICTED_MARKER: &str = "restricted-content";
pub const DEFAULT_UNTITLED: &str = "Untitled";
pub const DEFAULT_USER_AGENT: &str = concat!("albumscout/", env!("CARGO_PKG_VERSION"));

/// Path fragment of the forum's login endpoint; a redirect there means the search was gated.
pub const LOGIN_ENDPOINT: &str = "wp-login.php";

/// `id` / `name` attribute of the forum's login form.
pub const LOGIN_FORM_ID: &str = "loginform";

/// Lowercase phrase shown in place of a gated post body.
pub const NO_PERMISSION_PHRASE: &str = "you do not have permission to view this content";

/// Lowercase phrases that, anywhere in the page text, indicate a login wall.
pub const LOGIN_PHRASES: [&str; 5] = [
    "you must be logged in",
    "please log in",
    "login required",
    "do not have permission",
    "please register in order to view this",
];

/// Exact, case-sensitive phrases matched against the raw response body.
pub const PERMISSION_ERROR_PHRASES: [&str; 5] = [
    "You do not have permission to view this content",
    "You don't have permission to view this content",
    "This content is restricted to members",
    "Please register in order to view this content",
    "You need to be logged in to view this content",
];

/// Class fragments that mark a post entry in the class-name heuristic.
pub const POST_CLASS_HINTS: [&str; 2] = ["post", "entry"];

/// Class fragment of date-like elements.
pub const DATE_CLASS_HINT: &str = "date";

pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Collection of regular expressions used by the date normalizer.
pub struct Regexps {
    /// An alphabetic word followed by a four digit year, with an optional day in between
    /// (`April 14, 2025`, `September 2025`). A leading numeric day (`14 April 2025`) sits
    /// outside the match and is dropped.
    pub month_year: Regex,
}

pub static REGEXPS: Lazy<Regexps> = Lazy::new(|| Regexps {
    month_year: Regex::new(r"(\p{Alphabetic}+)\s+(?:\d{1,2}(?:st|nd|rd|th)?,?\s+)?(\d{4})\b").unwrap(),
});
