//! GitHub REST API implementation of [`stargazers::api::Client`].

mod builder;
mod guard;
mod payload;

pub use builder::{GithubClientBuilder, GITHUB_URL};

use async_trait::async_trait;
use guard::{guard, guard_absent};
use log::debug;
use reqwest::header;
use reqwest::Client;
use reqwest::Response;
use serde::de::DeserializeOwned;
use stargazers::api::{Error, Event, Profile, Result, FIRST_PAGE_NUMBER};
use stargazers::RepositoryRef;

const STAR_MEDIA_TYPE: &str = "application/vnd.github.star+json";

pub struct GithubClient {
    client: Client,
    github_url: String,
}

impl GithubClient {
    async fn get(&self, path: &str, query: &[(&str, String)], operation: &str) -> Result<Response> {
        self.client
            .get(format!("{}{}", self.github_url, path))
            .query(query)
            .send()
            .await
            .map_err(|err| transport(operation, err))
    }
}

#[async_trait]
impl stargazers::api::Client for GithubClient {
    async fn stargazers(&self, repo: &RepositoryRef, page: u32, per_page: u32) -> Result<Vec<String>> {
        let operation = format!("fetching stargazers page {} of {}", page, repo);
        let response = self
            .client
            .get(format!("{}/repos/{}/{}/stargazers", self.github_url, repo.owner(), repo.name()))
            .header(header::ACCEPT, STAR_MEDIA_TYPE)
            .query(&[("per_page", per_page.to_string()), ("page", page.to_string())])
            .send()
            .await
            .map_err(|err| transport(&operation, err))?;
        // A missing first page means a missing repository, later ones are past the end of the list.
        let response = if page == FIRST_PAGE_NUMBER {
            Some(guard(response, &operation).await?)
        } else {
            guard_absent(response, &operation).await?
        };
        match response {
            Some(response) => {
                let stargazers = read_json::<Vec<payload::Stargazer>>(response, &operation).await?;
                Ok(stargazers.into_iter().map(String::from).collect())
            }
            None => {
                debug!("Stargazers page {} of {} not found, treating as end of list", page, repo);
                Ok(Vec::new())
            }
        }
    }

    async fn user(&self, login: &str) -> Result<Profile> {
        let operation = format!("fetching profile of {}", login);
        let response = self.get(&format!("/users/{}", login), &[], &operation).await?;
        let response = guard(response, &operation).await?;
        Ok(read_json::<payload::User>(response, &operation).await?.into())
    }

    async fn public_events(&self, login: &str, per_page: u32) -> Result<Option<Vec<Event>>> {
        let operation = format!("fetching public events of {}", login);
        let path = format!("/users/{}/events/public", login);
        let response = self.get(&path, &[("per_page", per_page.to_string())], &operation).await?;
        match guard_absent(response, &operation).await? {
            Some(response) => {
                let events = read_json::<Vec<payload::Event>>(response, &operation).await?;
                Ok(Some(events.into_iter().map(Event::from).collect()))
            }
            None => Ok(None),
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
    response.json::<T>().await.map_err(|err| transport(operation, err))
}

fn transport(operation: &str, err: reqwest::Error) -> Error {
    Error::Other(anyhow::anyhow!("{} failed: {}", operation, err))
}
