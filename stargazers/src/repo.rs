use crate::api::Error;
use std::fmt::Display;
use std::str::FromStr;

/// `owner/repo` reference of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepositoryRef {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let trimmed = trimmed.strip_prefix('@').unwrap_or(trimmed);
        match trimmed.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(RepositoryRef {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::InvalidRepository(value.to_string())),
        }
    }
}

impl Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[test]
fn parses_owner_and_name() {
    let repo: RepositoryRef = "octocat/hello-world".parse().unwrap();
    assert_eq!(repo.owner(), "octocat");
    assert_eq!(repo.name(), "hello-world");
    assert_eq!(repo.to_string(), "octocat/hello-world");
}

#[test]
fn strips_leading_at_sign() {
    let repo: RepositoryRef = "@octocat/hello-world".parse().unwrap();
    assert_eq!(repo.owner(), "octocat");
}

#[test]
fn rejects_malformed_references() {
    for value in ["", "octocat", "octocat/", "/hello-world", "a/b/c", "@"] {
        let parsed = value.parse::<RepositoryRef>();
        assert!(
            matches!(parsed, Err(Error::InvalidRepository(_))),
            "'{}' should be rejected",
            value
        );
    }
}
