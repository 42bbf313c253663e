//! cvbox — upload, list, download and delete CVs.
//!
//! The storage backend is chosen by CV_STORAGE (local, s3 or signed).

use anyhow::Context;
use clap::{Parser, Subcommand};
use cvbox_cli::{init_tracing, shell, Controller};
use cvbox_core::{ClientConfig, CvId};
use cvbox_storage::create_store;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cvbox", about = "Store and manage CVs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored CVs
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload a file
    Upload {
        /// Path to the file to upload
        file: PathBuf,
    },
    /// Save a CV to disk under its stored name
    Download {
        /// CV id as shown by `list`
        id: String,
        /// Target directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Delete a CV by id
    Delete {
        /// CV id as shown by `list`
        id: String,
    },
    /// Add three sample CVs
    Seed,
    /// Interactive shell
    Shell,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize records")?;
    println!("{}", out);
    Ok(())
}

/// Print the controller state and fail if the last action did.
fn finish(controller: &Controller) -> anyhow::Result<()> {
    print!("{}", controller.render());
    match controller.error() {
        Some(error) => Err(anyhow::anyhow!("{}", error)),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("Invalid cvbox configuration")?;
    let store = create_store(&config)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("Failed to open storage")?;
    let mut controller = Controller::new(store);

    match cli.command {
        Commands::List { json } => {
            controller.refresh().await;
            if json {
                if let Some(error) = controller.error() {
                    anyhow::bail!("{}", error);
                }
                print_json(&controller.items())?;
            } else {
                finish(&controller)?;
            }
        }
        Commands::Upload { file } => {
            if let Some(id) = controller.upload_path(&file).await {
                println!("Uploaded {} as {}", file.display(), id);
            }
            finish(&controller)?;
        }
        Commands::Download { id, out } => {
            if let Some(path) = controller.download(&CvId::from(id), &out).await {
                println!("Saved {}", path.display());
            }
            if let Some(error) = controller.error() {
                anyhow::bail!("{}", error);
            }
        }
        Commands::Delete { id } => {
            controller.refresh().await;
            if controller.delete(&CvId::from(id.clone())).await {
                println!("Deleted {}", id);
            }
            finish(&controller)?;
        }
        Commands::Seed => {
            controller.add_samples().await;
            finish(&controller)?;
        }
        Commands::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            shell::run_shell(&mut controller, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
