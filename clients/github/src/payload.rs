use serde::Deserialize;
use stargazers::api::{EventKind, Profile, PushCommit};

/// Stargazer entry, either the `application/vnd.github.star+json` envelope or a bare user.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Stargazer {
    Starred { user: Account },
    Plain(Account),
}

#[derive(Deserialize, Debug)]
pub struct Account {
    pub login: String,
}

impl From<Stargazer> for String {
    fn from(stargazer: Stargazer) -> Self {
        match stargazer {
            Stargazer::Starred { user } => user.login,
            Stargazer::Plain(account) => account.login,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub blog: Option<String>,
    pub bio: Option<String>,
    pub twitter_username: Option<String>,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Profile {
            login: user.login,
            name: user.name,
            email: user.email,
            blog: user.blog,
            bio: user.bio,
            twitter_username: user.twitter_username,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Option<EventPayload>,
}

#[derive(Deserialize, Debug)]
pub struct EventPayload {
    pub commits: Option<Vec<Commit>>,
}

#[derive(Deserialize, Debug)]
pub struct Commit {
    pub author: Option<CommitAuthor>,
}

#[derive(Deserialize, Debug)]
pub struct CommitAuthor {
    pub email: Option<String>,
}

impl From<Event> for stargazers::api::Event {
    fn from(event: Event) -> Self {
        let kind = match event.kind.as_str() {
            "PushEvent" => EventKind::Push,
            _ => EventKind::Other,
        };
        let commits = event
            .payload
            .and_then(|payload| payload.commits)
            .unwrap_or_default()
            .into_iter()
            .map(|commit| PushCommit {
                author_email: commit.author.and_then(|author| author.email),
            })
            .collect();
        stargazers::api::Event { kind, commits }
    }
}

#[test]
fn stargazer_forms() -> anyhow::Result<()> {
    let body = r#"[
        { "starred_at": "2020-01-01T00:00:00Z", "user": { "login": "old", "id": 1 } },
        { "login": "new", "id": 2 }
    ]"#;
    let logins: Vec<String> = serde_json::from_str::<Vec<Stargazer>>(body)?
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(logins, vec!["old", "new"]);
    Ok(())
}

#[test]
fn push_event_commits() -> anyhow::Result<()> {
    let body = r#"[
        { "type": "WatchEvent", "payload": { "action": "started" } },
        { "type": "PushEvent", "payload": { "commits": [
            { "sha": "1", "author": { "email": "a@b.com", "name": "A" } },
            { "sha": "2", "author": { "name": "B" } }
        ] } },
        { "type": "CreateEvent", "payload": null }
    ]"#;
    let events: Vec<stargazers::api::Event> = serde_json::from_str::<Vec<Event>>(body)?
        .into_iter()
        .map(Into::into)
        .collect();
    assert_eq!(events[0].kind, EventKind::Other);
    assert!(events[0].commits.is_empty());
    assert_eq!(events[1].kind, EventKind::Push);
    assert_eq!(
        events[1].commits,
        vec![
            PushCommit {
                author_email: Some("a@b.com".to_string())
            },
            PushCommit { author_email: None }
        ]
    );
    assert!(events[2].commits.is_empty());
    Ok(())
}
