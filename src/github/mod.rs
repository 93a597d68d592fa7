// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub GraphQL API.
//
// Submodules:
// - client: authenticated HTTP transport + GraphQL envelope handling
// - tree:   one-level directory listings (used by the fetcher)
// - repo:   owner/name parsing and the repository metadata query
// - schema: schema introspection
// - search: most-starred repositories for a language
// =============================================================================

mod client;
mod repo;
mod schema;
mod search;
mod tree;

pub use client::GithubClient;
pub use repo::{RepoRef, Repository};
pub use tree::{EntryKind, TreeEntry, TreeSource};

// Only the fetcher's in-memory test tree needs these
#[cfg(test)]
pub use client::GatewayError;
#[cfg(test)]
pub use tree::{TreeListing, TREE_ENTRY_LIMIT};
