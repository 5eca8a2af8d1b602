//! LedgerPro main entry point

use clap::Parser;
use ledgerpro_api::start_server;
use ledgerpro_config::Config;
use ledgerpro_core::Ledger;
use ledgerpro_store::{JsonFileStore, JsonFlagStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "ledgerpro")]
#[command(author = "LedgerPro Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight personal and small-business ledger with a web interface", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        if !args.config.exists() {
            eprintln!(
                "[WARN] Config file not found, writing defaults: {}",
                args.config.display()
            );
            std::fs::write(&args.config, Config::generate_default())
                .expect("Failed to write default configuration");
        }

        let config = Config::load(args.config.clone()).expect("Failed to load configuration");

        eprintln!(
            "[INFO] Config loaded: data path={}, ledger_file={}",
            config.data.path.to_string_lossy(),
            config.data.ledger_file
        );

        if !config.data.path.exists() {
            std::fs::create_dir_all(&config.data.path).expect("Failed to create data directory");
        }

        let store = Arc::new(
            JsonFileStore::open(config.ledger_path())
                .await
                .expect("Failed to open ledger store"),
        );
        let flags = Arc::new(JsonFlagStore::new(config.flags_path()));

        let mut ledger = Ledger::new(store, flags);
        match ledger.load().await {
            Ok(_) => eprintln!("[INFO] Closed-account registry loaded"),
            Err(e) => eprintln!("[ERROR] Failed to load closed-account registry: {:?}", e),
        }
        let ledger = Arc::new(RwLock::new(ledger));

        start_server(config, ledger).await
    });

    Ok(())
}
