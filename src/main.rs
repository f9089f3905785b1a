//! CLI entry point for postshelf

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postshelf::commands::new::NewPost;
use postshelf::content::HeaderFormat;

#[derive(Parser)]
#[command(name = "postshelf")]
#[command(version)]
#[command(about = "Load, list and publish front-matter markdown posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Create the post as a draft
        #[arg(long)]
        draft: bool,

        /// Header format (defaults to the site setting)
        #[arg(short, long, value_enum)]
        format: Option<HeaderFormat>,

        /// File name for the new post, instead of the configured pattern
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Include drafts
        #[arg(long)]
        drafts: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one post
    Show {
        /// Slug of the post
        slug: String,
    },

    /// Publish a draft
    Publish {
        /// Slug of the post
        slug: String,
    },

    /// Check every post for header problems
    Check,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postshelf=debug,info"
    } else {
        "postshelf=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            postshelf::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            draft,
            format,
            path,
        } => {
            let site = postshelf::Site::new(&base_dir)?;
            let options = NewPost {
                title: &title,
                draft,
                format,
                path: path.as_deref(),
            };
            let today = chrono::Local::now().date_naive();
            let file = postshelf::commands::new::create_post(&site, &options, today)?;
            println!("Created: {:?}", file);
        }

        Commands::List { drafts, json } => {
            let site = postshelf::Site::new(&base_dir)?;
            postshelf::commands::list::run(&site, drafts, json)?;
        }

        Commands::Show { slug } => {
            let site = postshelf::Site::new(&base_dir)?;
            postshelf::commands::show::run(&site, &slug)?;
        }

        Commands::Publish { slug } => {
            let site = postshelf::Site::new(&base_dir)?;
            let file = postshelf::commands::publish::run(&site, &slug)?;
            println!("Published: {:?}", file);
        }

        Commands::Check => {
            let site = postshelf::Site::new(&base_dir)?;
            postshelf::commands::check::run(&site)?;
        }

        Commands::Version => {
            println!("postshelf version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
