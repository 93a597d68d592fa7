// src/github/repo.rs
// =============================================================================
// Repository references and the single-repository metadata query.
//
// Users can name a repository either as `owner/name` or with a URL:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo/tree/main/docs   (extra segments are ignored)
// =============================================================================

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use super::client::{GatewayError, GithubClient};

const REPOSITORY_QUERY: &str = r#"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
    name
    nameWithOwner
    description
    stargazerCount
  }
}
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    // Parses `owner/name` or a github.com URL into its two parts
    //
    // Example:
    //   "https://github.com/rust-lang/rust" -> RepoRef { owner: "rust-lang", name: "rust" }
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let without_scheme = trimmed
            .trim_start_matches("https://")
            .trim_start_matches("http://");

        // "www." only belongs to the host, never to a bare owner/name
        let host_path = without_scheme
            .strip_prefix("www.")
            .filter(|rest| rest.starts_with("github.com/"))
            .unwrap_or(without_scheme);

        let url_path = host_path.strip_prefix("github.com/");
        let path = match url_path {
            Some(rest) => rest,
            None if trimmed.contains("://") => {
                return Err(anyhow!("Not a GitHub repository: {}", input));
            }
            None => host_path,
        };

        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let (owner, name) = match (parts.next(), parts.next()) {
            (Some(owner), Some(name)) => (owner, name),
            _ => return Err(anyhow!("Expected owner/name or a GitHub URL, got: {}", input)),
        };

        // URLs may point deeper (tree/main/docs); a bare owner/name may not
        if url_path.is_none() && parts.next().is_some() {
            return Err(anyhow!("Expected owner/name or a GitHub URL, got: {}", input));
        }

        let name = name.trim_end_matches(".git");
        if name.is_empty() {
            return Err(anyhow!("Invalid repository name in: {}", input));
        }

        Ok(RepoRef {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository metadata, as printed by the `repo` and `search` commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub stargazers_count: u64,
}

// The GraphQL field names, converted into Repository below
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRepository {
    id: String,
    name: String,
    name_with_owner: String,
    description: Option<String>,
    stargazer_count: u64,
}

impl From<RawRepository> for Repository {
    fn from(raw: RawRepository) -> Self {
        Repository {
            id: raw.id,
            name: raw.name,
            full_name: raw.name_with_owner,
            description: raw.description.unwrap_or_default(),
            stargazers_count: raw.stargazer_count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RepositoryData {
    repository: Option<RawRepository>,
}

impl GithubClient {
    pub async fn get_repo(&self, repo: &RepoRef) -> Result<Repository, GatewayError> {
        let variables = json!({ "owner": repo.owner, "name": repo.name });
        let data: RepositoryData = self.query(REPOSITORY_QUERY, variables).await?;
        data.repository
            .map(Repository::from)
            .ok_or_else(|| GatewayError::NotFound(repo.to_string()))
    }
}
