// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) based on -v / RUST_LOG
// 3. Read the configuration and build the GitHub client once
// 4. Dispatch to the appropriate subcommand handler
// 5. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: every GitHub call is a network request
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

mod cli;
mod config;
mod fetcher;
mod github;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;
use fetcher::{FetchOptions, FetchSummary, RelevantFetcher};
use github::{GithubClient, RepoRef, Repository};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins when set; otherwise -v picks the level.
// Logs go to stderr so stdout stays clean for the tree / JSON output.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    // Missing token is fatal before any request is made
    let config = Config::from_env()?;
    let client = GithubClient::new(&config).context("Error creating GitHub client")?;

    match cli.command {
        Commands::Fetch { repo, max_depth, output_dir } => {
            handle_fetch(&client, &repo, max_depth, output_dir).await
        }
        Commands::Repo { repo, json } => handle_repo(&client, &repo, json).await,
        Commands::Schema => handle_schema(&client).await,
        Commands::Search { language, limit, json } => {
            handle_search(&client, &language, limit, json).await
        }
    }
}

// Handles the 'fetch' subcommand
async fn handle_fetch(
    client: &GithubClient,
    repo: &str,
    max_depth: usize,
    output_dir: Option<std::path::PathBuf>,
) -> Result<i32> {
    let repo = RepoRef::parse(repo)?;
    let base_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to get current working directory")?,
    };

    let mut options = FetchOptions::new(base_dir);
    options.max_depth = max_depth;

    println!("🔍 Fetching documentation and examples from {}", repo);

    let summary = RelevantFetcher::new(client, options)
        .fetch(&repo.owner, &repo.name)
        .await
        .context("Failed to fetch documentation and examples")?;

    print_summary(&summary);
    Ok(0)
}

fn print_summary(summary: &FetchSummary) {
    println!();
    println!("✅ Documentation and examples fetched into {}", summary.output_dir.display());
    println!("📊 Summary:");
    println!("   📁 Directories: {}", summary.dirs_created);
    println!("   📄 Files: {}", summary.files_written);
    println!("   ⏭️  Skipped: {}", summary.entries_skipped);

    if summary.depth_limited > 0 {
        println!("   ⚠️  Depth limit reached: {}", summary.depth_limited);
    }
    if summary.incomplete_listings > 0 {
        println!("   ⚠️  Possibly incomplete listings: {}", summary.incomplete_listings);
    }
    if summary.truncated_files > 0 {
        println!("   ⚠️  Truncated files: {}", summary.truncated_files);
    }
    if summary.binary_files > 0 {
        println!("   ⚠️  Binary files skipped: {}", summary.binary_files);
    }
}

// Handles the 'repo' subcommand
async fn handle_repo(client: &GithubClient, repo: &str, json: bool) -> Result<i32> {
    let repo = RepoRef::parse(repo)?;
    let info = client
        .get_repo(&repo)
        .await
        .with_context(|| format!("Error fetching repository {}", repo))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Repository: {}", info.full_name);
        println!("Stars: {}", info.stargazers_count);
        println!("Description: {}", info.description);
    }
    Ok(0)
}

// Handles the 'schema' subcommand
async fn handle_schema(client: &GithubClient) -> Result<i32> {
    let schema = client.fetch_schema().await.context("Error fetching schema")?;
    println!("{}", schema);
    Ok(0)
}

// Handles the 'search' subcommand
async fn handle_search(client: &GithubClient, language: &str, limit: u32, json: bool) -> Result<i32> {
    let repos = client
        .search_top_repos(language, limit)
        .await
        .with_context(|| format!("Error searching {} repositories", language))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
    } else {
        print_table(&repos);
    }
    Ok(0)
}

// Prints repositories as a human-readable table in the terminal
fn print_table(repos: &[Repository]) {
    println!("{:<45} {:>10}  {}", "REPOSITORY", "STARS", "DESCRIPTION");
    println!("{}", "=".repeat(105));

    for repo in repos {
        // Keep each row on one line
        let description: String = if repo.description.chars().count() > 47 {
            let cut: String = repo.description.chars().take(47).collect();
            format!("{}...", cut)
        } else {
            repo.description.clone()
        };

        println!("{:<45} {:>10}  {}", repo.full_name, repo.stargazers_count, description);
    }

    println!();
    println!("📋 Total: {}", repos.len());
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why build the client in run() instead of a global?
//    - One client, created once, passed by reference to whoever needs it
//    - Nothing hidden: every function that talks to GitHub says so in its
//      signature
//
// 2. Why eprintln! for errors but println! for results?
//    - stdout is for output you might pipe somewhere (the tree, JSON)
//    - stderr is for diagnostics, so it never pollutes that output
//
// 3. What does .context() do?
//    - Wraps an error with a message describing what we were doing
//    - "{:#}" then prints the full chain: outer message: inner cause
// -----------------------------------------------------------------------------
