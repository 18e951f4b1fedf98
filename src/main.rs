//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio-rs")]
#[command(version)]
#[command(about = "A static site generator for personal portfolio and blog sites", long_about = None)]
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

        /// File name for the new post (without extension)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Disable watching for source changes
        #[arg(long)]
        r#static: bool,
    },

    /// Print (and optionally copy) share links for a post
    Share {
        /// Slug of the post
        slug: String,

        /// Copy the canonical link to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// List site content
    List {
        /// Type of content to list (post, tag, topic, series)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Clean the public folder
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New { title, path } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Creating new post: {}", title);
            folio_rs::commands::new::create_post(&folio, &title, path.as_deref())?;
        }

        Commands::Generate { watch } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");

            folio_rs::commands::generate::run(&folio)?;
            println!("Generated successfully!");

            if watch {
                folio_rs::commands::generate::watch(&folio).await?;
            }
        }

        Commands::Serve {
            port,
            ip,
            r#static,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;

            tracing::info!("Generating static files...");
            folio.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, &ip, port, !r#static).await?;
        }

        Commands::Share { slug, copy } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::share::run(&folio, &slug, copy)?;
        }

        Commands::List { r#type } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, &r#type)?;
        }

        Commands::Clean => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
