use chrono::{DateTime, TimeZone, Utc};
use derive_more::Constructor;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use stargazers::api::{Error, Result};
use std::str::FromStr;

/// Rate limit reported alongside a single response.
#[derive(Constructor, Debug, PartialEq)]
pub(crate) struct RateLimitState {
    remaining: Option<u32>,
    reset: Option<DateTime<Utc>>,
}

impl RateLimitState {
    pub(crate) fn from_headers(headers: &HeaderMap<HeaderValue>) -> Self {
        let remaining = read_header::<u32>(headers, "x-ratelimit-remaining");
        let reset = read_header::<i64>(headers, "x-ratelimit-reset").and_then(|reset| Utc.timestamp_opt(reset, 0).single());
        RateLimitState::new(remaining, reset)
    }

    fn exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

fn read_header<T: FromStr>(headers: &HeaderMap<HeaderValue>, header: &str) -> Option<T> {
    headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<T>().ok())
}

#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Success,
    RateLimited,
    Failed,
}

fn classify(status: StatusCode, limits: &RateLimitState) -> Verdict {
    match status {
        status if status.is_success() => Verdict::Success,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if limits.exhausted() => Verdict::RateLimited,
        _ => Verdict::Failed,
    }
}

/// Passes successful responses through and turns every other one into a fatal error.
///
/// # Arguments
/// * `response` - Response to inspect
/// * `operation` - Description of the attempted call, used in error messages
pub(crate) async fn guard(response: Response, operation: &str) -> Result<Response> {
    let status = response.status();
    let limits = RateLimitState::from_headers(response.headers());
    debug!("{}: {} (rate limit remaining {:?})", operation, status, limits.remaining);
    match classify(status, &limits) {
        Verdict::Success => Ok(response),
        Verdict::RateLimited => {
            warn!("Rate limit exhausted while {}", operation);
            Err(Error::RateLimitExceeded {
                operation: operation.to_string(),
                reset: limits.reset,
            })
        }
        Verdict::Failed => {
            let body = response.text().await.unwrap_or_default();
            warn!("Request failed while {}: {}", operation, status);
            Err(Error::RequestFailed {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Like [`guard`], except that 404 means there is nothing to read.
pub(crate) async fn guard_absent(response: Response, operation: &str) -> Result<Option<Response>> {
    if response.status() == StatusCode::NOT_FOUND {
        debug!("{}: not found", operation);
        return Ok(None);
    }
    guard(response, operation).await.map(Some)
}
