// src/fetcher/walk.rs
// =============================================================================
// Walks a repository tree and mirrors the relevant parts to local disk.
//
// How it works:
// 1. Create <base>/<name>-relevant-files and list the repository root
// 2. Take the next entry of the directory on top of the stack
// 3. Relevant directory -> create it locally, list it, push it on the stack
//    (its children are handled before the rest of its siblings)
// 4. Relevant file -> write its text to the mirrored path
// 5. When a directory runs out of entries, pop it and resume its parent
//
// The stack makes this a depth-first walk with the exact output order of a
// recursive one, without growing the call stack. Directories deeper than
// `max_depth` are created but not listed.
//
// Any failure (remote or local) stops the whole walk. Whatever was written
// before that point stays on disk.
//
// Rust concepts:
// - Generics: RelevantFetcher works with any TreeSource (network or in-memory)
// - std::vec::IntoIter: an owned iterator we can park on the stack and resume
// =============================================================================

use anyhow::{Context as _, Result};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::classify::{classify, Decision};
use crate::github::{TreeEntry, TreeSource};

pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const OUTPUT_SUFFIX: &str = "-relevant-files";

const INDENT: &str = "│   ";
const BRANCH: &str = "├── ";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Directory in which <name>-relevant-files is created
    pub base_dir: PathBuf,
    /// Deepest directory level that is still listed (root = 0)
    pub max_depth: usize,
}

impl FetchOptions {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        FetchOptions {
            base_dir: base_dir.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// What a finished walk did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub output_dir: PathBuf,
    pub dirs_created: usize,
    pub files_written: usize,
    pub entries_skipped: usize,
    /// Directories left unlisted because they were past max_depth
    pub depth_limited: usize,
    /// Listings that may have been missing entries
    pub incomplete_listings: usize,
    pub truncated_files: usize,
    pub binary_files: usize,
}

// Where we are in the tree: one per directory on the stack
#[derive(Debug, Clone)]
struct TraversalContext {
    remote_path: String,
    local_path: PathBuf,
    depth: usize,
    is_root_level: bool,
}

impl TraversalContext {
    fn root(local_path: PathBuf) -> Self {
        TraversalContext {
            remote_path: String::new(),
            local_path,
            depth: 0,
            is_root_level: true,
        }
    }

    fn child(&self, name: &str) -> Self {
        let remote_path = if self.remote_path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.remote_path, name)
        };

        TraversalContext {
            remote_path,
            local_path: self.local_path.join(name),
            depth: self.depth + 1,
            is_root_level: false,
        }
    }
}

// A directory whose listing we are partway through
struct Frame {
    context: TraversalContext,
    entries: std::vec::IntoIter<TreeEntry>,
}

pub struct RelevantFetcher<'a, S> {
    source: &'a S,
    options: FetchOptions,
}

impl<'a, S: TreeSource> RelevantFetcher<'a, S> {
    pub fn new(source: &'a S, options: FetchOptions) -> Self {
        RelevantFetcher { source, options }
    }

    /// Mirrors the relevant files of `owner/name`, printing the tree to stdout.
    pub async fn fetch(&self, owner: &str, name: &str) -> Result<FetchSummary> {
        let mut stdout = io::stdout();
        self.fetch_into(owner, name, &mut stdout).await
    }

    /// Same as `fetch`, but writes the tree trace to `trace`.
    pub async fn fetch_into<W: Write>(
        &self,
        owner: &str,
        name: &str,
        trace: &mut W,
    ) -> Result<FetchSummary> {
        let root_name = format!("{}{}", name, OUTPUT_SUFFIX);
        let output_dir = self.options.base_dir.join(&root_name);
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("failed to create directory {}", output_dir.display()))?;

        info!(
            "Fetching relevant files from repository {}/{} into {}",
            owner,
            name,
            output_dir.display()
        );
        writeln!(trace, "{}", root_name).context("failed to write tree output")?;

        let mut summary = FetchSummary {
            output_dir: output_dir.clone(),
            ..FetchSummary::default()
        };

        let mut stack: Vec<Frame> = Vec::new();
        if let Some(frame) = self
            .open(owner, name, TraversalContext::root(output_dir), &mut summary)
            .await?
        {
            stack.push(frame);
        }

        // The top frame is always the directory we are currently inside
        while let Some(frame) = stack.last_mut() {
            let entry = match frame.entries.next() {
                Some(entry) => entry,
                None => {
                    // Directory finished: resume its parent where it left off
                    stack.pop();
                    continue;
                }
            };
            let context = &frame.context;

            match classify(
                &entry.name,
                entry.kind,
                &context.remote_path,
                context.is_root_level,
            ) {
                Decision::Descend => {
                    // Trace line first, then the directory, then its listing
                    let child = context.child(&entry.name);
                    writeln!(trace, "{}", trace_line(context.depth, &entry.name))
                        .context("failed to write tree output")?;
                    fs::create_dir_all(&child.local_path).with_context(|| {
                        format!("failed to create directory {}", child.local_path.display())
                    })?;
                    summary.dirs_created += 1;

                    // Pushing the child means its entries are handled before
                    // the remaining siblings, same order as plain recursion
                    if let Some(frame) = self.open(owner, name, child, &mut summary).await? {
                        stack.push(frame);
                    }
                }
                Decision::Materialize => {
                    write_entry(context, entry, trace, &mut summary)?;
                }
                Decision::Skip => {
                    // Rejected directories are never created locally
                    debug!("skipping {}", display_path(&context.child(&entry.name).remote_path));
                    summary.entries_skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    // Lists the directory described by `context`, or returns None when the
    // depth guard stops us
    async fn open(
        &self,
        owner: &str,
        name: &str,
        context: TraversalContext,
        summary: &mut FetchSummary,
    ) -> Result<Option<Frame>> {
        if context.depth > self.options.max_depth {
            warn!(
                "Reached maximum depth of {} at path {}. Skipping deeper levels.",
                self.options.max_depth,
                display_path(&context.remote_path)
            );
            summary.depth_limited += 1;
            return Ok(None);
        }

        // "HEAD:" alone is the root tree of the default branch
        let expression = format!("HEAD:{}", context.remote_path);
        let listing = self
            .source
            .list_tree(owner, name, &expression)
            .await
            .with_context(|| {
                format!(
                    "failed to query repository contents for path {}",
                    display_path(&context.remote_path)
                )
            })?;

        // Not fatal: we still mirror what we were given
        if !listing.complete {
            warn!(
                "Listing of {} returned {} entries and may be incomplete",
                display_path(&context.remote_path),
                listing.entries.len()
            );
            summary.incomplete_listings += 1;
        }

        Ok(Some(Frame {
            context,
            entries: listing.entries.into_iter(),
        }))
    }
}

fn write_entry<W: Write>(
    context: &TraversalContext,
    entry: TreeEntry,
    trace: &mut W,
    summary: &mut FetchSummary,
) -> Result<()> {
    let remote = context.child(&entry.name).remote_path;
    let content = match entry.content {
        Some(content) => content,
        // Only text blobs come with content
        None => {
            warn!("Skipping {}: binary content is not supported", remote);
            summary.binary_files += 1;
            return Ok(());
        }
    };

    writeln!(trace, "{}", trace_line(context.depth, &entry.name))
        .context("failed to write tree output")?;

    let path = context.local_path.join(&entry.name);
    fs::write(&path, content.as_bytes())
        .with_context(|| format!("failed to write file {}", path.display()))?;
    summary.files_written += 1;

    if entry.truncated {
        warn!("{} was truncated by the API; the local copy is incomplete", remote);
        summary.truncated_files += 1;
    }

    Ok(())
}

pub fn trace_line(depth: usize, name: &str) -> String {
    format!("{}{}{}", INDENT.repeat(depth), BRANCH, name)
}

fn display_path(remote_path: &str) -> &str {
    if remote_path.is_empty() {
        "/"
    } else {
        remote_path
    }
}
