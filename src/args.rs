use clap::Parser;
use secrecy::SecretString;
use stargazers::RepositoryRef;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Repository to export stargazers of, as `owner/repo`
    #[clap(env)]
    pub repository: RepositoryRef,

    /// Output CSV file
    #[clap(short, long, env, default_value = "stargazers.csv")]
    pub output: PathBuf,

    /// API OAuth access token
    #[clap(short = 't', long, env = "GITHUB_TOKEN")]
    pub api_token: Option<SecretString>,

    /// Repository API URL
    #[clap(long, env, default_value = "https://api.github.com")]
    pub api_url: String,

    /// Delay between user lookups in milliseconds
    #[clap(short, long, env, default_value_t = 500)]
    pub delay: u64,

    /// Maximal number of most recent stargazers to export
    #[clap(short, long, env, parse(try_from_str=max_in_range))]
    pub max: Option<usize>,
}

fn max_in_range(value: &str) -> clap::Result<usize, String> {
    value.parse::<usize>().map_err(|err| format!("{}", err)).and_then(|max| {
        if max == 0 {
            return Err("max must be at least 1.".to_string());
        }
        Ok(max)
    })
}

#[test]
fn parses_arguments() {
    let args = Args::try_parse_from(["stargazer_contacts", "@octocat/hello-world", "--max", "3", "-d", "0"]).unwrap();
    assert_eq!(args.repository.to_string(), "octocat/hello-world");
    assert_eq!(args.max, Some(3));
    assert_eq!(args.delay, 0);
    assert_eq!(args.output, PathBuf::from("stargazers.csv"));
}

#[test]
fn rejects_invalid_arguments() {
    assert!(Args::try_parse_from(["stargazer_contacts", "octocat"]).is_err());
    assert!(Args::try_parse_from(["stargazer_contacts", "octocat/hello-world", "--max", "0"]).is_err());
}
