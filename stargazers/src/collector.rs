use crate::api::{Client, Result};
pub use crate::api::FIRST_PAGE_NUMBER;
use crate::repo::RepositoryRef;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

pub const STARGAZERS_PAGE: u32 = 100;
/// Pause between two stargazer page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(250);

pub struct StargazerCollector<CLIENT: Client> {
    client: Arc<CLIENT>,
    page_delay: Duration,
}

impl<CLIENT: Client> StargazerCollector<CLIENT> {
    pub fn new(client: Arc<CLIENT>, page_delay: Duration) -> Self {
        StargazerCollector { client, page_delay }
    }

    /// Fetches every stargazer page of `repo` and returns logins newest first.
    ///
    /// # Arguments
    /// * `repo` - Repository to list stargazers of
    /// * `max` - Optional cap on the number of returned logins
    pub async fn collect(&self, repo: &RepositoryRef, max: Option<usize>) -> Result<Vec<String>> {
        let mut pages = Vec::new();
        let mut page_no = FIRST_PAGE_NUMBER;
        loop {
            if page_no > FIRST_PAGE_NUMBER {
                tokio::time::sleep(self.page_delay).await;
            }
            let page = self.client.stargazers(repo, page_no, STARGAZERS_PAGE).await?;
            debug!("Stargazers page {} of {}: {} entries", page_no, repo, page.len());
            if page.is_empty() {
                break;
            }
            pages.push(page);
            page_no += 1;
        }
        let logins = newest_first(pages, max);
        info!("Collected {} stargazers of {}", logins.len(), repo);
        Ok(logins)
    }
}

/// Turns oldest-first pages into one newest-first list, truncated to `max` entries.
fn newest_first(pages: Vec<Vec<String>>, max: Option<usize>) -> Vec<String> {
    let limit = max.unwrap_or(usize::MAX);
    pages
        .into_iter()
        .rev()
        .flat_map(|page| page.into_iter().rev())
        .take(limit)
        .collect()
}
