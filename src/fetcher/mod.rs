// src/fetcher/mod.rs
// =============================================================================
// This module downloads the "relevant" part of a repository: docs, examples,
// tutorials, notebooks and the top-level project files.
//
// Submodules:
// - classify: the name/extension rules deciding what is relevant
// - walk:     the depth-first tree walk that writes files to disk
// =============================================================================

mod classify;
mod walk;

pub use walk::{FetchOptions, FetchSummary, RelevantFetcher, DEFAULT_MAX_DEPTH};
