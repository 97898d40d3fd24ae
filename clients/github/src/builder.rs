use crate::GithubClient;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use stargazers::api::Result;

pub const GITHUB_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "stargazer-contacts";
const V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static(V3_MEDIA_TYPE));
        Self {
            client_builder: ClientBuilder::default(),
            github_url: GITHUB_URL.to_string(),
            headers,
        }
    }
}

impl GithubClientBuilder {
    pub fn try_with_token(self, token: secrecy::SecretString) -> Result<GithubClientBuilder> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret().trim()))
            .map_err(anyhow::Error::from)?;
        value.set_sensitive(true);
        Ok(self.with_header(header::AUTHORIZATION, value))
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<GithubClientBuilder> {
        Ok(self.try_with_header(header::USER_AGENT, user_agent)?)
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().trim_end_matches('/').to_string();
        self
    }

    fn try_with_header(self, key: HeaderName, val: impl AsRef<str>) -> anyhow::Result<GithubClientBuilder> {
        let val = HeaderValue::from_str(val.as_ref())?;
        Ok(self.with_header(key, val))
    }

    fn with_header(mut self, key: HeaderName, val: HeaderValue) -> GithubClientBuilder {
        self.headers.insert(key, val);
        self
    }

    pub fn build(self) -> Result<GithubClient> {
        let client = self
            .client_builder
            .default_headers(self.headers)
            .build()
            .map_err(anyhow::Error::from)?;
        Ok(GithubClient {
            client,
            github_url: self.github_url,
        })
    }
}
