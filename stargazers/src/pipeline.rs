use crate::api::{Client, Result};
use crate::collector::StargazerCollector;
use crate::contact::ContactRecord;
use crate::enricher::ContactEnricher;
use crate::repo::RepositoryRef;
use crate::sink::CsvSink;
use derive_more::Display;
use futures::{stream, Stream, StreamExt};
use log::debug;
use std::io::Write;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

pub type ContactStream = Pin<Box<dyn Stream<Item = Result<ContactRecord>> + Send>>;

/// Counters of a finished export.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "processed: {}\temails found: {}\temails missing: {}", processed, emails_found, emails_missing)]
pub struct Summary {
    pub processed: usize,
    pub emails_found: usize,
    pub emails_missing: usize,
}

impl Summary {
    fn add(&mut self, record: &ContactRecord) {
        self.processed += 1;
        if record.email.is_some() {
            self.emails_found += 1;
        } else {
            self.emails_missing += 1;
        }
    }
}

/// Observer of export progress.
pub trait Progress {
    fn collected(&mut self, _repo: &RepositoryRef, _total: usize) {}

    /// Called after `record` has been written. `position` counts from 1.
    fn written(&mut self, _record: &ContactRecord, _position: usize, _total: usize) {}
}

pub struct ContactPipeline<CLIENT: Client> {
    collector: StargazerCollector<CLIENT>,
    enricher: Arc<ContactEnricher<CLIENT>>,
    lookup_delay: Duration,
}

impl<CLIENT: 'static + Client> ContactPipeline<CLIENT> {
    /// # Arguments
    /// * `client` - API client shared by every lookup
    /// * `page_delay` - Pause between stargazer page requests
    /// * `lookup_delay` - Pause between two users and before the activity feed fallback
    pub fn new(client: CLIENT, page_delay: Duration, lookup_delay: Duration) -> Self {
        let client = Arc::new(client);
        ContactPipeline {
            collector: StargazerCollector::new(client.clone(), page_delay),
            enricher: Arc::new(ContactEnricher::new(client, lookup_delay)),
            lookup_delay,
        }
    }

    /// Stargazer logins of `repo`, newest first, at most `max` of them.
    pub async fn collect(
        &self,
        repo: &RepositoryRef,
        max: Option<usize>,
        progress: &mut impl Progress,
    ) -> Result<Vec<String>> {
        let logins = self.collector.collect(repo, max).await?;
        progress.collected(repo, logins.len());
        Ok(logins)
    }

    /// Lazily enriches `logins` one at a time, in order.
    ///
    /// A lookup starts only once the previous record has been pulled from the stream and the lookup delay has
    /// passed, so consumers control the pace.
    pub fn contacts(&self, logins: Vec<String>) -> ContactStream {
        let enricher = self.enricher.clone();
        let lookup_delay = self.lookup_delay;
        stream::iter(logins.into_iter().enumerate())
            .then(move |(index, login)| {
                let enricher = enricher.clone();
                async move {
                    if index > 0 {
                        tokio::time::sleep(lookup_delay).await;
                    }
                    debug!("Enriching {}", login);
                    enricher.enrich(&login).await
                }
            })
            .boxed()
    }

    /// Enriches `logins` and writes one row per user to `sink`. Stops at the first fatal error; rows written
    /// so far stay in the output.
    pub async fn export<W: Write>(
        &self,
        logins: Vec<String>,
        sink: &mut CsvSink<W>,
        progress: &mut impl Progress,
    ) -> Result<Summary> {
        let total = logins.len();
        let mut summary = Summary::default();
        let mut contacts = self.contacts(logins);
        while let Some(record) = contacts.next().await {
            let record = record?;
            sink.write(&record)?;
            summary.add(&record);
            progress.written(&record, summary.processed, total);
        }
        Ok(summary)
    }
}
