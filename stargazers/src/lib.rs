//! Stargazer contact export
//!
//! # Overview
//!
//! Given a repository (`owner/repo`), library lists every user who starred it, most recent stargazer first.
//! For each stargazer it then looks up the public profile and derives whatever contact details are available:
//! an email address, a LinkedIn profile and an X (Twitter) profile.
//! Profiles hiding their email behind a no-reply address get a second chance: the email of the first commit
//! found in the user's recent push events is used instead.
//! Contacts are written to a CSV output one row at a time, as soon as each one is known.
//!
//! Lookups are strictly sequential with a fixed delay between them, so the API rate limits are respected.
//! Any API failure (rate limit exhausted, unexpected status) stops the whole export; rows already written stay.

pub mod api;
pub mod contact;
pub mod repo;

#[cfg(feature = "pipeline")]
pub mod collector;
#[cfg(feature = "pipeline")]
pub mod enricher;
#[cfg(feature = "pipeline")]
pub mod pipeline;
#[cfg(feature = "pipeline")]
pub mod sink;

#[cfg(all(test, feature = "pipeline"))]
mod fake;

pub use api::{Error, Result};
pub use contact::ContactRecord;
pub use repo::RepositoryRef;

#[cfg(feature = "pipeline")]
pub use pipeline::{ContactPipeline, Progress, Summary};
#[cfg(feature = "pipeline")]
pub use sink::CsvSink;
