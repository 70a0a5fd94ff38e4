//! services/catalog/src/bin/prints.rs

use std::path::PathBuf;
use std::sync::Arc;

use catalog_lib::{
    adapters::{pick_image, DataUrlEncoder, FileStorage},
    config::Config,
    error::AppError,
    render::{confirm_delete, render_labels, render_listing},
};
use chrono::Local;
use clap::{Parser, Subcommand};
use print_catalog_core::{PortError, PrintCatalog, PrintDraft, PrintFilter, PrintStore};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "prints")]
#[command(author, version, about = "Catalog photographed and scanned prints")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List prints, newest first
    List {
        /// Case-insensitive text matched against titles and labels
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only prints carrying exactly this label
        #[arg(short, long)]
        label: Option<String>,
    },
    /// Show every label, most used first
    Labels,
    /// Register a new print from an image file
    Add {
        image: PathBuf,
        #[arg(short, long)]
        title: String,
        /// Comma-separated labels, e.g. "school, april"
        #[arg(short, long, default_value = "")]
        labels: String,
    },
    /// Delete a print by id
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(data_dir = %config.data_dir.display(), "Configuration loaded");

    // --- 2. Open the Catalog ---
    let storage = Arc::new(FileStorage::new(&config.data_dir).with_quota(config.storage_quota_bytes));
    let store = PrintStore::with_key(storage, config.storage_key.clone());
    let catalog = PrintCatalog::new(store, Arc::new(DataUrlEncoder::new()))
        .with_max_image_bytes(config.max_image_bytes);
    catalog.load();

    // --- 3. Run the Command ---
    match cli.command {
        Command::List { query, label } => {
            let mut filter = PrintFilter::new().with_query(query);
            if let Some(label) = label {
                filter = filter.with_label(label);
            }
            let prints = catalog.search(&filter);
            print!("{}", render_listing(&prints, &filter, catalog.len(), &Local));
        }
        Command::Labels => {
            print!("{}", render_labels(&catalog.label_counts()));
        }
        Command::Add { image, title, labels } => {
            let image = pick_image(&image, catalog.max_image_bytes()).await?;
            let print = catalog.add_print(PrintDraft::new(title, labels, Some(image))).await?;
            println!("Registered \"{}\" [{}]", print.title, print.id);
        }
        Command::Delete { id, yes } => {
            let print = catalog
                .get(&id)
                .ok_or_else(|| PortError::NotFound(format!("Print {} not found", id)))?;
            let confirmed = yes || confirm_delete(&print.title, std::io::stdin().lock(), std::io::stdout())?;
            if confirmed {
                catalog.delete_print(&id);
                println!("Deleted \"{}\"", print.title);
            } else {
                println!("Kept \"{}\"", print.title);
            }
        }
    }

    Ok(())
}
