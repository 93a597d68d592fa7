// src/github/search.rs
// =============================================================================
// Top-repository search: "language:<lang> sort:stars-desc", first N results.
//
// The search connection is typed as a union (repositories, issues, users...),
// so every node is decoded on its own and non-repository nodes are dropped.
// =============================================================================

use serde::Deserialize;
use serde_json::{json, Value};

use super::client::{GatewayError, GithubClient};
use super::repo::{RawRepository, Repository};

// GitHub caps `first` on connections at 100
pub const MAX_SEARCH_LIMIT: u32 = 100;

const SEARCH_QUERY: &str = r#"
query($query: String!, $limit: Int!) {
  search(query: $query, type: REPOSITORY, first: $limit) {
    nodes {
      ... on Repository {
        id
        name
        nameWithOwner
        description
        stargazerCount
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct SearchData {
    search: SearchConnection,
}

#[derive(Debug, Deserialize)]
struct SearchConnection {
    #[serde(default)]
    nodes: Vec<Option<Value>>,
}

pub fn search_query_for(language: &str) -> String {
    format!("language:{} sort:stars-desc", language)
}

impl GithubClient {
    pub async fn search_top_repos(
        &self,
        language: &str,
        limit: u32,
    ) -> Result<Vec<Repository>, GatewayError> {
        let clamped = limit.clamp(1, MAX_SEARCH_LIMIT);
        if clamped != limit {
            tracing::warn!("search limit {} out of range, using {}", limit, clamped);
        }

        let variables = json!({ "query": search_query_for(language), "limit": clamped });
        let data: SearchData = self.query(SEARCH_QUERY, variables).await?;
        Ok(collect_repositories(data))
    }
}

fn collect_repositories(data: SearchData) -> Vec<Repository> {
    data.search
        .nodes
        .into_iter()
        .flatten()
        .filter_map(|node| serde_json::from_value::<RawRepository>(node).ok())
        .map(Repository::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::{decode_envelope, envelope_from};

    #[test]
    fn test_search_query_string() {
        assert_eq!(search_query_for("rust"), "language:rust sort:stars-desc");
    }

    #[test]
    fn test_non_repository_nodes_are_skipped() {
        let envelope = envelope_from(json!({ "data": { "search": { "nodes": [
            { "id": "R_1", "name": "a", "nameWithOwner": "x/a", "description": "first", "stargazerCount": 10 },
            {},
            null,
            { "id": "R_2", "name": "b", "nameWithOwner": "y/b", "description": null, "stargazerCount": 5 }
        ] } } }));
        let data: SearchData = decode_envelope(envelope).unwrap();
        let repos = collect_repositories(data);

        let names: Vec<_> = repos.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["x/a", "y/b"]);
        assert_eq!(repos[0].stargazers_count, 10);
    }
}
