use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use jotlist::ListStore;
use jotlist::core::clock::SystemClock;
use jotlist::core::config::{self, CliOverrides, StorageBackend};
use jotlist::storage::{FileStore, KeyValueStore, MemoryStore};
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "jotlist", about = "Two lists, Work and Travel, in your terminal")]
struct Args {
    /// Directory where lists are stored
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep lists in memory only; nothing is saved
    #[arg(long)]
    ephemeral: bool,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    let cli = CliOverrides {
        data_dir: args.data_dir,
        log_file: args.log_file,
        ephemeral: args.ephemeral,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Some(parent) = resolved.log_file.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Jotlist starting up with {:?} storage at {}",
        resolved.backend,
        resolved.data_dir.display()
    );

    let storage: Arc<dyn KeyValueStore> = match resolved.backend {
        StorageBackend::File => Arc::new(FileStore::new(&resolved.data_dir)),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    let mut store = ListStore::load(storage, Arc::new(SystemClock), resolved.store_options()).await;

    let result = jotlist::tui::run(&mut store);
    store.flush().await;
    log::info!("Jotlist shutting down");
    result
}
