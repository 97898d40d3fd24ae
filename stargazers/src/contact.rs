//! Contact normalization
//!
//! Pure helpers deriving contact details from raw profile text. None of them touch the network, and every one
//! of them returns `None` instead of failing when a signal is missing or malformed.

use derive_more::Constructor;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Suffix of the synthetic addresses GitHub hands out to users hiding their real email.
pub const NOREPLY_SUFFIX: &str = "@users.noreply.github.com";

const TWITTER_URL: &str = "https://twitter.com";

static LINKEDIN_PROFILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://[\w.-]*linkedin\.com/[\w\-/]+(?:[?#][^\s)]*)?").unwrap());

static X_PROFILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/\w+(?:[?#][^\s)]*)?").unwrap());

/// One output row. `username` is always present, every other field may be legitimately unknown.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct ContactRecord {
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub x: Option<String>,
}

/// Returns trimmed `raw` unless it is blank or a no-reply address.
pub fn normalize_email(raw: Option<&str>) -> Option<String> {
    let email = raw?.trim();
    if email.is_empty() || email.to_lowercase().ends_with(NOREPLY_SUFFIX) {
        return None;
    }
    Some(email.to_string())
}

/// Drops the fragment of `raw`. Text that does not parse as URL is returned untouched.
pub fn sanitize_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => raw.to_string(),
    }
}

/// First LinkedIn profile URL found in `candidates`, scanned in the given order.
///
/// # Arguments
/// * `candidates` - Free text fields in priority order (dedicated social field, blog URL, bio)
pub fn extract_linkedin<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    first_match(&LINKEDIN_PROFILE, candidates)
}

/// X (Twitter) profile URL. A dedicated `handle` wins over anything found in `candidates`.
pub fn extract_x<'a>(handle: Option<&str>, candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    match handle.map(str::trim).filter(|handle| !handle.is_empty()) {
        Some(handle) if handle.starts_with("http://") || handle.starts_with("https://") => Some(handle.to_string()),
        Some(handle) => Some(format!("{}/{}", TWITTER_URL, handle.trim_start_matches('@'))),
        None => first_match(&X_PROFILE, candidates),
    }
}

fn first_match<'a>(pattern: &Regex, candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find_map(|text| pattern.find(text))
        .map(|found| sanitize_url(found.as_str()))
}

/// Blank names are treated as missing.
pub fn normalize_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|name| !name.is_empty()).map(str::to_string)
}
