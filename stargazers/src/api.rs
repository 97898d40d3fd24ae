use crate::repo::RepositoryRef;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid repository reference '{0}', expected 'owner/repo'.")]
    InvalidRepository(String),
    #[error("API rate limit exceeded while {operation}. {}", reset_hint(.reset))]
    RateLimitExceeded {
        operation: String,
        reset: Option<DateTime<Utc>>,
    },
    #[error("Request failed while {operation}: {status} {body}")]
    RequestFailed { operation: String, status: u16, body: String },
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn reset_hint(reset: &Option<DateTime<Utc>>) -> String {
    match reset {
        Some(reset) => format!("Limit resets at {}.", reset.to_rfc3339()),
        None => "Reset time unknown.".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Number of the first page of any paginated listing.
pub const FIRST_PAGE_NUMBER: u32 = 1;

/// Profile fields of a single user, as returned by `GET /users/{username}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub blog: Option<String>,
    pub bio: Option<String>,
    pub twitter_username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PushCommit {
    pub author_email: Option<String>,
}

/// Entry of a user's public activity feed. Only push events carry commits.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub commits: Vec<PushCommit>,
}

#[async_trait]
pub trait Client: Send + Sync {
    /// One page of stargazer logins in the order the API returned them (oldest first).
    /// A page past the end of the list is empty, a missing repository is an error.
    async fn stargazers(&self, repo: &RepositoryRef, page: u32, per_page: u32) -> Result<Vec<String>>;

    async fn user(&self, login: &str) -> Result<Profile>;

    /// Recent public events of `login`, `None` when the feed does not exist.
    async fn public_events(&self, login: &str, per_page: u32) -> Result<Option<Vec<Event>>>;
}

#[test]
fn errors_read_as_messages() {
    let failed = Error::RequestFailed {
        operation: "fetching profile of jdoe".to_string(),
        status: 502,
        body: "Bad Gateway".to_string(),
    };
    assert_eq!(
        failed.to_string(),
        "Request failed while fetching profile of jdoe: 502 Bad Gateway"
    );

    let limited = Error::RateLimitExceeded {
        operation: "fetching stargazers page 3 of octocat/hello-world".to_string(),
        reset: None,
    };
    assert_eq!(
        limited.to_string(),
        "API rate limit exceeded while fetching stargazers page 3 of octocat/hello-world. Reset time unknown."
    );
}
