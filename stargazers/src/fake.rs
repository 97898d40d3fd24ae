use crate::api::{Client, Error, Event, EventKind, Profile, PushCommit, Result};
use crate::repo::RepositoryRef;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory `Client` recording every call it receives.
#[derive(Default)]
pub(crate) struct FakeClient {
    pages: Vec<Vec<String>>,
    profiles: HashMap<String, Profile>,
    events: HashMap<String, Vec<Event>>,
    calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub(crate) fn with_page<STR: ToString>(mut self, logins: &[STR]) -> Self {
        self.pages.push(logins.iter().map(ToString::to_string).collect());
        self
    }

    pub(crate) fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles.insert(profile.login.clone(), profile);
        self
    }

    pub(crate) fn with_events(mut self, login: &str, events: Vec<Event>) -> Self {
        self.events.insert(login.to_string(), events);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Client for FakeClient {
    async fn stargazers(&self, _repo: &RepositoryRef, page: u32, _per_page: u32) -> Result<Vec<String>> {
        self.record(format!("stargazers {}", page));
        Ok(self.pages.get(page as usize - 1).cloned().unwrap_or_default())
    }

    async fn user(&self, login: &str) -> Result<Profile> {
        self.record(format!("user {}", login));
        self.profiles.get(login).cloned().ok_or_else(|| Error::RequestFailed {
            operation: format!("fetching profile of {}", login),
            status: 404,
            body: "Not Found".to_string(),
        })
    }

    async fn public_events(&self, login: &str, _per_page: u32) -> Result<Option<Vec<Event>>> {
        self.record(format!("events {}", login));
        Ok(self.events.get(login).cloned())
    }
}

pub(crate) fn profile(login: &str) -> Profile {
    Profile {
        login: login.to_string(),
        ..Profile::default()
    }
}

pub(crate) fn push(emails: &[Option<&str>]) -> Event {
    Event {
        kind: EventKind::Push,
        commits: emails
            .iter()
            .map(|email| PushCommit {
                author_email: email.map(str::to_string),
            })
            .collect(),
    }
}
