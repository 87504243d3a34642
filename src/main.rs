//! # leafpress CLI
//!
//! Command-line interface for publishing content and media with leafpress.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use leafpress::{
    commands::{self, Backend, DownloadArgs, UploadArgs},
    constants::LOG_ENV,
};

const GLOBAL_HELP: &str = "\
Configuration Files:
  ~/.config/leafpress/config   Global configuration (commit author, GitHub token)
  leafpress.toml               Project configuration (workspaces, GitHub target)

Entry Files:
  YAML or JSON, holding a single entry or a list of entries.

Logging:
  LEAFPRESS_LOG=debug lp publish ...   Verbose output (default level: warn)

Getting Started:
  lp setup                      Create the global config
  lp init                       Initialize project in current directory
  lp changes about.yml          Preview what a publish would write
  lp publish about.yml          Publish entries

Learn more:
  lp <COMMAND> --help           Show detailed help for a command";

#[derive(Parser)]
#[command(name = "lp")]
#[command(author = "Dominic Rodemer")]
#[command(version)]
#[command(about = "Publish Markdown content and media to disk or GitHub")]
#[command(
    long_about = "leafpress turns structured content entries into Markdown files with YAML \
frontmatter and publishes them either to the local filesystem or as a single commit \
to a GitHub repository.\n\n\
Entries that moved since the last publish have their old files removed in the same \
operation. Media uploads get unique, time-sortable file names."
)]
#[command(after_help = GLOBAL_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One-time setup: create the global config
    Setup,

    /// Initialize a new leafpress project in the current directory
    #[command(
        long_about = "Initialize a new leafpress project in the current directory.\n\n\
Creates a leafpress.toml configuration file with a default 'main' workspace and \
its content directory. The file contains all available options with comments.",
        after_help = "Examples:\n  \
lp init                       Initialize in current directory\n  \
cd site && lp init            Initialize in a specific project"
    )]
    Init,

    /// Generate or inspect identifiers
    Id {
        #[command(subcommand)]
        command: IdCommand,
    },

    /// Show the files a publish would write and remove
    #[command(after_help = "Examples:\n  \
lp changes about.yml\n  \
lp changes posts.json pages.yml")]
    Changes {
        /// Entry files (YAML or JSON)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Publish entries
    #[command(
        long_about = "Publish entries to the filesystem or GitHub.\n\n\
With the GitHub backend the whole batch becomes one commit on the configured branch. \
With the filesystem backend files are written concurrently (see 'concurrency' in \
leafpress.toml); a failure part-way through is not rolled back.",
        after_help = "Examples:\n  \
lp publish about.yml\n  \
lp publish posts.json --backend fs"
    )]
    Publish {
        /// Entry files (YAML or JSON)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, help = "Backend (default: github if configured, else fs)")]
        backend: Option<Backend>,
    },

    /// Upload a media file
    #[command(after_help = "Examples:\n  \
lp upload main photo.jpg\n  \
lp upload main 'Team Photo.JPG' --dir team\n\n\
Output: Prints the stored location.")]
    Upload {
        /// Workspace to upload into
        workspace: String,

        /// Local file to upload
        file: PathBuf,

        #[arg(long, help = "Subdirectory inside the media directory")]
        dir: Option<String>,

        #[arg(long, value_enum, help = "Backend (default: github if configured, else fs)")]
        backend: Option<Backend>,
    },

    /// Download a media file
    #[command(after_help = "Examples:\n  \
lp download main media/photo.2YBXZHqCHEdmhp5sdLmoTEW73NQ.jpg -o photo.jpg\n  \
lp download main team/photo.2YBXZHqCHEdmhp5sdLmoTEW73NQ.jpg > photo.jpg")]
    Download {
        /// Workspace the file belongs to
        workspace: String,

        /// Location returned by upload, or a path relative to the media directory
        location: String,

        #[arg(short, long, help = "Write to this file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, value_enum, help = "Backend (default: github if configured, else fs)")]
        backend: Option<Backend>,
    },
}

#[derive(Subcommand)]
enum IdCommand {
    /// Print new identifiers
    New {
        #[arg(long, default_value_t = 1, help = "Number of identifiers to print")]
        count: usize,
    },

    /// Print the creation time and payload of an identifier
    Parse {
        /// Identifier to inspect
        id: String,
    },
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(err) = run().await {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Setup => commands::setup(),

        Commands::Init => commands::init(),

        Commands::Id { command } => match command {
            IdCommand::New { count } => commands::id_new(count),
            IdCommand::Parse { id } => commands::id_parse(&id),
        },

        Commands::Changes { files } => commands::changes(&files).await,

        Commands::Publish { files, backend } => commands::publish(&files, backend).await,

        Commands::Upload {
            workspace,
            file,
            dir,
            backend,
        } => {
            commands::upload(UploadArgs {
                workspace,
                file,
                dir,
                backend,
            })
            .await
        }

        Commands::Download {
            workspace,
            location,
            output,
            backend,
        } => {
            commands::download(DownloadArgs {
                workspace,
                location,
                output,
                backend,
            })
            .await
        }
    }
}
