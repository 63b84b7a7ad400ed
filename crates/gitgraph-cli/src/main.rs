use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use gitgraph_core::{build_graph, compute_stats, layout, parse_git_log, parse_head, parse_refs, LayoutOptions};

mod config;
mod error;
mod git;

use git::GitRunner;

#[derive(Debug, Parser)]
#[command(name = "gitgraph")]
#[command(about = "Render a git repository's commit graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load history and print the laid-out visual graph.
    Graph(GraphCmd),
    /// Print aggregate repository stats.
    Stats(GraphCmd),
}

#[derive(Debug, Args)]
struct GraphCmd {
    #[arg(long)]
    repo: Option<PathBuf>,
    #[arg(long)]
    max_commits: Option<usize>,
    #[arg(long)]
    pretty: bool,
    /// Print a compact one-line-per-row text summary instead of JSON.
    #[arg(long)]
    text: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Graph(cmd) => run_graph(cmd),
        Commands::Stats(cmd) => run_stats(cmd),
    }
}

fn run_graph(cmd: GraphCmd) -> Result<()> {
    let config = config::load().context("failed to load config")?;
    let repo = resolve_repo(cmd.repo)?;
    let runner = GitRunner::default();
    runner.validate_repo(&repo)?;

    let max_commits = cmd.max_commits.or(config.max_commits);
    let log_buffer = runner.log_buffer(&repo, max_commits)?;
    let refs_buffer = runner.refs_buffer(&repo)?;
    let head_branch = runner.current_branch(&repo)?;
    let head_commit = runner.head_commit(&repo)?;

    let parsed = parse_git_log(&log_buffer);
    for err in &parsed.errors {
        eprintln!("warning: {} ({:?})", err.message, err.kind);
    }
    let refs = parse_refs(&refs_buffer, head_branch.as_deref());
    let head = parse_head(head_branch.as_deref(), head_commit.as_deref());

    let graph = build_graph(parsed.commits, refs, head.head_commit, head.head_ref);
    let options = LayoutOptions {
        protected_branches: config.protected_branches,
    };
    let visual = layout(&graph, &options);

    if cmd.text {
        print_text_summary(&visual);
    } else if cmd.pretty {
        println!("{}", serde_json::to_string_pretty(&visual)?);
    } else {
        println!("{}", serde_json::to_string(&visual)?);
    }

    Ok(())
}

fn run_stats(cmd: GraphCmd) -> Result<()> {
    let config = config::load().context("failed to load config")?;
    let repo = resolve_repo(cmd.repo)?;
    let runner = GitRunner::default();
    runner.validate_repo(&repo)?;

    let max_commits = cmd.max_commits.or(config.max_commits);
    let log_buffer = runner.log_buffer(&repo, max_commits)?;
    let refs_buffer = runner.refs_buffer(&repo)?;
    let head_branch = runner.current_branch(&repo)?;
    let head_commit = runner.head_commit(&repo)?;

    let parsed = parse_git_log(&log_buffer);
    let refs = parse_refs(&refs_buffer, head_branch.as_deref());
    let head = parse_head(head_branch.as_deref(), head_commit.as_deref());

    let graph = build_graph(parsed.commits, refs, head.head_commit, head.head_ref);
    let stats = compute_stats(&graph);

    if cmd.pretty {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", serde_json::to_string(&stats)?);
    }
    Ok(())
}

fn print_text_summary(visual: &gitgraph_core::VisualGraph) {
    for commit in &visual.commits {
        let marker = if commit.is_head { "*" } else { " " };
        let refs: Vec<&str> = commit.refs.iter().map(|r| r.name.as_str()).collect();
        let ref_suffix = if refs.is_empty() {
            String::new()
        } else {
            format!(" ({})", refs.join(", "))
        };
        println!(
            "{marker} row={:<4} lane={:<3} {}{ref_suffix}",
            commit.row,
            commit.lane,
            commit.hash
        );
    }
}

fn resolve_repo(cli_repo: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(repo) = cli_repo {
        return Ok(repo);
    }

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    if cwd.join(".git").exists() {
        return Ok(cwd);
    }

    Err(anyhow!(
        "current directory is not a git repository (pass --repo, or run `gitgraph` inside a git repo)"
    ))
}
