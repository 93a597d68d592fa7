// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - fetch:  mirror the relevant files (docs, examples, notebooks...) of a repo
// - repo:   print basic metadata about one repository
// - schema: dump the type list of the GitHub GraphQL schema
// - search: list the most-starred repositories for a language
//
// Rust concepts:
// - Derive macros: clap generates the parser from these structs
// - Enums: one variant per subcommand
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::fetcher::DEFAULT_MAX_DEPTH;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "relevant-files",
    version = "0.1.0",
    about = "Mirror the documentation and examples of a GitHub repository to local disk",
    long_about = "relevant-files walks a GitHub repository through the GraphQL API and downloads \
                  only the files worth reading: READMEs, docs, examples, tutorials and notebooks. \
                  Requires a GITHUB_TOKEN environment variable."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the relevant files of a repository
    ///
    /// Example: relevant-files fetch langchain-ai/langchain
    Fetch {
        /// Repository as owner/name or a GitHub URL
        repo: String,

        /// Deepest directory level to descend into (root = 0)
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Where to create the <name>-relevant-files directory
        /// (defaults to the current directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Show name, stars and description of a repository
    ///
    /// Example: relevant-files repo octocat/Hello-World
    Repo {
        /// Repository as owner/name or a GitHub URL
        repo: String,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the type names and descriptions of the GraphQL schema as JSON
    Schema,

    /// List the most-starred repositories written in a language
    ///
    /// Example: relevant-files search rust --limit 5
    Search {
        /// Language name as GitHub spells it (rust, python, go...)
        language: String,

        /// How many repositories to return
        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does ArgAction::Count do?
//    - Each repetition of the flag adds one: -vv gives verbose = 2
//    - global = true lets the flag appear before or after the subcommand
//
// 2. Why Option<PathBuf> for --output-dir?
//    - None means "the user didn't pass it", so we fall back to the
//      current directory at runtime instead of baking it in here
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_defaults() {
        let cli = Cli::try_parse_from(["relevant-files", "fetch", "owner/name"]).unwrap();
        match cli.command {
            Commands::Fetch { repo, max_depth, output_dir } => {
                assert_eq!(repo, "owner/name");
                assert_eq!(max_depth, DEFAULT_MAX_DEPTH);
                assert!(output_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["relevant-files", "search", "rust", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Search { language, limit, json } => {
                assert_eq!(language, "rust");
                assert_eq!(limit, 10);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_fetch_requires_repo() {
        assert!(Cli::try_parse_from(["relevant-files", "fetch"]).is_err());
    }
}
