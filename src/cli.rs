use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::acquire::RepoAcquirer;
use crate::config::{Settings, StrategyKind};
use crate::keys::{mask_key, KeyGroup, KeyRotator};
use crate::load_config::load_config;

pub const DIRECTORY_TREE_FILE: &str = "directory_tree.txt";
pub const CORPUS_FILE: &str = "corpus.txt";

/// CLI for gitsummarize: acquire a GitHub repository's structure and content.
#[derive(Parser)]
#[clap(
    name = "gitsummarize",
    version,
    about = "Fetch a GitHub repository's directory tree and text corpus for LLM summarisation"
)]
pub struct Cli {
    /// Path to an optional YAML config file (secrets come from the environment)
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the repository's directory tree
    Tree {
        /// Repository URL, e.g. https://github.com/owner/repo
        url: String,
    },
    /// Build the repository's text corpus
    Corpus {
        url: String,
        /// blob, archive or auto (defaults to the configured strategy)
        #[clap(long)]
        strategy: Option<StrategyKind>,
        /// Write to this file instead of stdout
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Write directory_tree.txt and corpus.txt from one commit
    Snapshot {
        url: String,
        #[clap(long)]
        strategy: Option<StrategyKind>,
        #[clap(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Print repository metadata as JSON
    Metadata { url: String },
    /// Print popular repositories as JSON lines
    Popular {
        #[clap(long, default_value_t = 10)]
        count: usize,
    },
    /// Validate a credential group and print masked round-robin draws
    Keys {
        group: KeyGroup,
        #[clap(long, default_value_t = 3)]
        draws: usize,
    },
}

/// Async CLI entrypoint shared by main() and the integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    let settings = load_config(cli.config.as_deref())?;

    let result = execute(cli.command, &settings).await;
    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}

async fn execute(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Tree { url } => {
            let acquirer = RepoAcquirer::from_settings(settings)?;
            let tree = acquirer.directory_structure(&url).await?;
            println!("{tree}");
        }
        Commands::Corpus {
            url,
            strategy,
            output,
        } => {
            let acquirer = RepoAcquirer::from_settings(settings)?;
            let strategy = strategy.unwrap_or(settings.content.strategy);
            let corpus = acquirer.corpus(&url, strategy).await?;
            info!(files = corpus.len(), skipped = corpus.skipped_count(), "Corpus assembled");
            match output {
                Some(path) => write_file(&path, &corpus.text())?,
                None => println!("{}", corpus.text()),
            }
        }
        Commands::Snapshot {
            url,
            strategy,
            output_dir,
        } => {
            let acquirer = RepoAcquirer::from_settings(settings)?;
            let strategy = strategy.unwrap_or(settings.content.strategy);
            let snapshot = acquirer.snapshot(&url, strategy).await?;
            fs::create_dir_all(&output_dir)
                .with_context(|| format!("creating output directory {}", output_dir.display()))?;
            write_file(&output_dir.join(DIRECTORY_TREE_FILE), &snapshot.directory_tree)?;
            write_file(&output_dir.join(CORPUS_FILE), &snapshot.corpus.text())?;
            println!("{}", serde_json::to_string(&snapshot.summary())?);
        }
        Commands::Metadata { url } => {
            let acquirer = RepoAcquirer::from_settings(settings)?;
            let metadata = acquirer.metadata(&url).await?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Commands::Popular { count } => {
            let acquirer = RepoAcquirer::from_settings(settings)?;
            let repos = acquirer
                .client()
                .popular_repos(count, settings.github.search_page_delay())
                .await?;
            for repo in repos {
                println!("{}", serde_json::to_string(&repo)?);
            }
        }
        Commands::Keys { group, draws } => {
            let rotator = KeyRotator::from_settings(settings);
            rotator.require(&[group])?;
            println!("{group}: {} key(s)", rotator.key_count(group));
            for _ in 0..draws {
                println!("{}", mask_key(&rotator.next_key(group)?));
            }
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote output file");
    Ok(())
}
