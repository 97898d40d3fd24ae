use crate::api::{Client, Event, EventKind, Profile, Result};
use crate::contact::{extract_linkedin, extract_x, normalize_email, normalize_name, ContactRecord};
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Page size of the public activity feed. Only this single page is scanned for commit emails.
pub const EVENTS_PAGE: u32 = 100;

pub struct ContactEnricher<CLIENT: Client> {
    client: Arc<CLIENT>,
    lookup_delay: Duration,
}

impl<CLIENT: Client> ContactEnricher<CLIENT> {
    pub fn new(client: Arc<CLIENT>, lookup_delay: Duration) -> Self {
        ContactEnricher { client, lookup_delay }
    }

    /// Builds the `ContactRecord` of `login`. Missing data ends up as `None`, only API failures are errors.
    pub async fn enrich(&self, login: &str) -> Result<ContactRecord> {
        let profile = self.client.user(login).await?;
        let email = match normalize_email(profile.email.as_deref()) {
            Some(email) => Some(email),
            None => {
                tokio::time::sleep(self.lookup_delay).await;
                self.email_from_events(login).await?
            }
        };
        Ok(contact_record(login, &profile, email))
    }

    async fn email_from_events(&self, login: &str) -> Result<Option<String>> {
        match self.client.public_events(login, EVENTS_PAGE).await? {
            Some(events) => Ok(first_push_email(&events)),
            None => {
                debug!("No public activity for {}", login);
                Ok(None)
            }
        }
    }
}

fn contact_record(login: &str, profile: &Profile, email: Option<String>) -> ContactRecord {
    let blog = profile.blog.as_deref();
    let bio = profile.bio.as_deref();
    ContactRecord::new(
        login.to_string(),
        normalize_name(profile.name.as_deref()),
        email,
        extract_linkedin([blog, bio]),
        extract_x(profile.twitter_username.as_deref(), [blog, bio]),
    )
}

/// First usable commit author email of the first push event carrying one, in feed order.
fn first_push_email(events: &[Event]) -> Option<String> {
    events
        .iter()
        .filter(|event| event.kind == EventKind::Push)
        .flat_map(|event| event.commits.iter())
        .find_map(|commit| normalize_email(commit.author_email.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Error, PushCommit};
    use crate::fake::{profile, push, FakeClient};
    use tokio::time::Instant;

    fn enricher(client: FakeClient) -> (Arc<FakeClient>, ContactEnricher<FakeClient>) {
        let client = Arc::new(client);
        (client.clone(), ContactEnricher::new(client, Duration::ZERO))
    }

    #[tokio::test]
    async fn profile_email_skips_activity_feed() {
        let mut jdoe = profile("jdoe");
        jdoe.name = Some("Jane Doe".to_string());
        jdoe.email = Some(" jane@doe.dev ".to_string());
        jdoe.bio = Some("see https://www.linkedin.com/in/jdoe#about".to_string());
        jdoe.twitter_username = Some("jdoe".to_string());
        let (client, enricher) = enricher(FakeClient::default().with_profile(jdoe));

        let record = enricher.enrich("jdoe").await.unwrap();

        assert_eq!(
            record,
            ContactRecord::new(
                "jdoe".to_string(),
                Some("Jane Doe".to_string()),
                Some("jane@doe.dev".to_string()),
                Some("https://www.linkedin.com/in/jdoe".to_string()),
                Some("https://twitter.com/jdoe".to_string()),
            )
        );
        assert_eq!(client.calls(), vec!["user jdoe"]);
    }

    #[tokio::test]
    async fn email_falls_back_to_push_events() {
        let client = FakeClient::default()
            .with_profile(profile("jdoe"))
            .with_events("jdoe", vec![push(&[Some("a@b.com")])]);
        let (client, enricher) = enricher(client);

        let record = enricher.enrich("jdoe").await.unwrap();

        assert_eq!(record.email, Some("a@b.com".to_string()));
        assert_eq!(client.calls(), vec!["user jdoe", "events jdoe"]);
    }

    #[tokio::test]
    async fn missing_activity_feed_is_no_email() {
        let mut jdoe = profile("jdoe");
        jdoe.email = Some("1+jdoe@users.noreply.github.com".to_string());
        let (client, enricher) = enricher(FakeClient::default().with_profile(jdoe));

        let record = enricher.enrich("jdoe").await.unwrap();

        assert_eq!(record, ContactRecord::new("jdoe".to_string(), None, None, None, None));
        assert_eq!(client.calls(), vec!["user jdoe", "events jdoe"]);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_before_activity_feed() {
        let mut jdoe = profile("jdoe");
        jdoe.email = Some("jdoe@mail.dev".to_string());
        let client = FakeClient::default().with_profile(jdoe).with_profile(profile("ghost"));
        let enricher = ContactEnricher::new(Arc::new(client), Duration::from_millis(300));

        let start = Instant::now();
        enricher.enrich("jdoe").await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(300), "waited {:?}", start.elapsed());

        let start = Instant::now();
        enricher.enrich("ghost").await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(300), "waited {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(600), "waited {:?}", elapsed);
    }

    #[tokio::test]
    async fn missing_profile_is_fatal() {
        let (_, enricher) = enricher(FakeClient::default());
        let err = enricher.enrich("ghost").await.unwrap_err();
        assert!(matches!(err, Error::RequestFailed { status: 404, .. }));
    }

    #[test]
    fn push_scan_order() {
        let other = Event {
            kind: EventKind::Other,
            commits: vec![PushCommit {
                author_email: Some("watch@event.dev".to_string()),
            }],
        };
        let events = vec![
            other,
            push(&[None, Some("x@users.noreply.github.com")]),
            push(&[Some(" "), Some("first@push.dev"), Some("second@push.dev")]),
            push(&[Some("later@push.dev")]),
        ];
        assert_eq!(first_push_email(&events), Some("first@push.dev".to_string()));
        assert_eq!(first_push_email(&[]), None);
    }
}
