mod args;

pub use args::Args;

use github_client::GithubClientBuilder;
use log::info;
use stargazers::collector::DEFAULT_PAGE_DELAY;
use stargazers::{ContactPipeline, ContactRecord, CsvSink, Progress, RepositoryRef, Result, Summary};
use std::time::Duration;

/// Logs every step of the export.
struct LogProgress;

impl Progress for LogProgress {
    fn collected(&mut self, repo: &RepositoryRef, total: usize) {
        if total == 0 {
            info!("No stargazers found for {}", repo);
        } else {
            info!("Found {} stargazers for {}", total, repo);
        }
    }

    fn written(&mut self, record: &ContactRecord, position: usize, total: usize) {
        info!(
            "[{}/{}] {}\temail: {}",
            position,
            total,
            record.username,
            record.email.as_deref().unwrap_or("-")
        );
    }
}

/// Exports stargazers of `args.repository` with their contacts to `args.output`.
///
/// The output is created only if the repository has stargazers. It is flushed and closed even when the export
/// stops on an API failure.
pub async fn export_stargazers(args: Args) -> Result<Summary> {
    let mut client = GithubClientBuilder::default().with_github_url(args.api_url);
    if let Some(token) = args.api_token {
        client = client.try_with_token(token)?;
    }
    let client = client.build()?;

    let pipeline = ContactPipeline::new(client, DEFAULT_PAGE_DELAY, Duration::from_millis(args.delay));
    let mut progress = LogProgress;
    let logins = pipeline.collect(&args.repository, args.max, &mut progress).await?;
    if logins.is_empty() {
        return Ok(Summary::default());
    }

    let mut sink = CsvSink::create(&args.output)?;
    let exported = pipeline.export(logins, &mut sink, &mut progress).await;
    let closed = sink.finish();
    let summary = exported?;
    closed?;
    info!("Contacts written to {}", args.output.display());
    Ok(summary)
}
