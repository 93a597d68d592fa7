// src/github/tree.rs
// =============================================================================
// Directory listings: one GraphQL call returns the immediate children of a
// tree, plus the full text of every blob among them.
//
// The fetcher only depends on the TreeSource trait below, so tests can drive
// it with an in-memory tree instead of the network.
// =============================================================================

use serde::Deserialize;
use serde_json::json;

use super::client::{GatewayError, GithubClient};

// GitHub hands back a directory's entries in one response with no cursor.
// Directories at or past this size may have been cut short.
pub const TREE_ENTRY_LIMIT: usize = 1000;

const TREE_QUERY: &str = r#"
query($owner: String!, $name: String!, $ref: String!) {
  repository(owner: $owner, name: $name) {
    object(expression: $ref) {
      ... on Tree {
        entries {
          name
          type
          object {
            ... on Blob {
              text
              isBinary
              isTruncated
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Submodules (`commit` entries) and anything GitHub adds later
    Other,
}

/// One child of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Blob text; None for directories and for binary blobs
    pub content: Option<String>,
    /// GitHub cut the blob text short
    pub truncated: bool,
}

#[cfg(test)]
impl TreeEntry {
    pub fn directory(name: impl Into<String>) -> Self {
        TreeEntry {
            name: name.into(),
            kind: EntryKind::Directory,
            content: None,
            truncated: false,
        }
    }

    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        TreeEntry {
            name: name.into(),
            kind: EntryKind::File,
            content: Some(content.into()),
            truncated: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeListing {
    pub entries: Vec<TreeEntry>,
    /// false when the listing may be missing entries
    pub complete: bool,
}

impl TreeListing {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        let complete = entries.len() < TREE_ENTRY_LIMIT;
        TreeListing { entries, complete }
    }
}

/// Anything that can list one level of a repository tree.
///
/// `expression` is a git object expression such as `HEAD:` or `HEAD:docs/api`.
pub trait TreeSource {
    async fn list_tree(
        &self,
        owner: &str,
        name: &str,
        expression: &str,
    ) -> Result<TreeListing, GatewayError>;
}

impl TreeSource for GithubClient {
    async fn list_tree(
        &self,
        owner: &str,
        name: &str,
        expression: &str,
    ) -> Result<TreeListing, GatewayError> {
        let variables = json!({ "owner": owner, "name": name, "ref": expression });
        let data: TreeData = self.query(TREE_QUERY, variables).await?;
        into_listing(data, owner, name)
    }
}

// --- raw response shapes -----------------------------------------------------

#[derive(Debug, Deserialize)]
struct TreeData {
    repository: Option<TreeRepository>,
}

#[derive(Debug, Deserialize)]
struct TreeRepository {
    object: Option<TreeObject>,
}

// A non-tree object (e.g. the expression named a file) comes back as `{}`
#[derive(Debug, Deserialize)]
struct TreeObject {
    #[serde(default)]
    entries: Option<Vec<RawEntry>>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    object: Option<RawBlob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlob {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    is_binary: Option<bool>,
    #[serde(default)]
    is_truncated: Option<bool>,
}

fn into_listing(data: TreeData, owner: &str, name: &str) -> Result<TreeListing, GatewayError> {
    let repository = data
        .repository
        .ok_or_else(|| GatewayError::NotFound(format!("{}/{}", owner, name)))?;

    // A null object means the path is not a tree (or the ref is missing):
    // treat it as an empty directory
    let raw_entries = repository
        .object
        .and_then(|object| object.entries)
        .unwrap_or_default();

    let entries = raw_entries.into_iter().map(convert_entry).collect();
    Ok(TreeListing::new(entries))
}

fn convert_entry(raw: RawEntry) -> TreeEntry {
    let kind = match raw.kind.as_str() {
        "tree" => EntryKind::Directory,
        "blob" => EntryKind::File,
        _ => EntryKind::Other,
    };

    // Directories and submodules come back with an empty `{}` object
    let blob = raw.object.unwrap_or_default();
    let content = match kind {
        // GitHub leaves `text` null for binary blobs, but check the flag too
        EntryKind::File if blob.is_binary != Some(true) => blob.text,
        _ => None,
    };

    TreeEntry {
        name: raw.name,
        kind,
        content,
        truncated: blob.is_truncated.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::{decode_envelope, envelope_from};
    use serde_json::json;

    fn listing_from(response: serde_json::Value) -> Result<TreeListing, GatewayError> {
        let data: TreeData = decode_envelope(envelope_from(response))?;
        into_listing(data, "owner", "repo")
    }

    #[test]
    fn test_entries_keep_response_order() {
        let listing = listing_from(json!({ "data": { "repository": { "object": { "entries": [
            { "name": "src", "type": "tree", "object": {} },
            { "name": "README.md", "type": "blob",
              "object": { "text": "# hi", "isBinary": false, "isTruncated": false } },
            { "name": "vendor", "type": "commit", "object": {} }
        ] } } } }))
        .unwrap();

        assert!(listing.complete);
        let names: Vec<_> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["src", "README.md", "vendor"]);
        assert_eq!(listing.entries[0].kind, EntryKind::Directory);
        assert_eq!(listing.entries[1], TreeEntry::file("README.md", "# hi"));
        assert_eq!(listing.entries[2].kind, EntryKind::Other);
    }

    #[test]
    fn test_binary_blob_has_no_content() {
        let listing = listing_from(json!({ "data": { "repository": { "object": { "entries": [
            { "name": "logo.png", "type": "blob",
              "object": { "text": null, "isBinary": true, "isTruncated": false } }
        ] } } } }))
        .unwrap();
        assert_eq!(listing.entries[0].kind, EntryKind::File);
        assert_eq!(listing.entries[0].content, None);
    }

    #[test]
    fn test_truncated_blob_is_flagged() {
        let listing = listing_from(json!({ "data": { "repository": { "object": { "entries": [
            { "name": "big.md", "type": "blob",
              "object": { "text": "partial", "isBinary": false, "isTruncated": true } }
        ] } } } }))
        .unwrap();
        assert!(listing.entries[0].truncated);
        assert_eq!(listing.entries[0].content.as_deref(), Some("partial"));
    }

    #[test]
    fn test_missing_object_is_empty_listing() {
        let listing =
            listing_from(json!({ "data": { "repository": { "object": null } } })).unwrap();
        assert!(listing.entries.is_empty());
        assert!(listing.complete);
    }

    #[test]
    fn test_missing_repository() {
        let err = listing_from(json!({ "data": { "repository": null } })).unwrap_err();
        assert_eq!(err.to_string(), "repository owner/repo not found");
    }

    #[test]
    fn test_full_page_is_incomplete() {
        let entries: Vec<_> = (0..TREE_ENTRY_LIMIT)
            .map(|i| TreeEntry::file(format!("f{}.md", i), ""))
            .collect();
        assert!(!TreeListing::new(entries).complete);
        assert!(TreeListing::new(vec![TreeEntry::directory("docs")]).complete);
    }
}
