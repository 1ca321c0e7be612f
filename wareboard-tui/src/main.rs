use std::fs::{self, File};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use simplelog::{Config, LevelFilter, WriteLogger};

use wareboard_api::WarehouseClient;
use wareboard_api::cache::{CacheConfig, CacheProvider, InMemoryCache, SqliteCache};
use wareboard_api::lookups::CachedLookups;

use wareboard_tui::app::App;
use wareboard_tui::paths;
use wareboard_tui::presets::PresetStore;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const PAGE_SIZE: u32 = 25;

#[tokio::main]
async fn main() -> io::Result<()> {
    init_logging();

    let url = std::env::var("WAREBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = WarehouseClient::builder()
        .url(&url)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build();
    info!("using backend at {url}");

    let health_client = client.clone();
    tokio::spawn(async move {
        match health_client.connect().await {
            Ok(health) => info!(
                "backend status {} (version {})",
                health.status,
                health.version.as_deref().unwrap_or("unknown")
            ),
            Err(e) => warn!("backend health check failed: {e}"),
        }
    });

    let cache = open_lookup_cache().await;
    let lookups = CachedLookups::new(client.clone(), cache, CacheConfig::default());
    let presets = open_preset_store().await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = App::new(client, lookups, presets, PAGE_SIZE)
        .run(&mut terminal)
        .await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
        }
        Err(e) => eprintln!("failed to create log file {}: {e}", path.display()),
    }
}

/// Opens the persistent lookup cache, falling back to in-memory storage.
async fn open_lookup_cache() -> Arc<dyn CacheProvider> {
    if let Some(path) = paths::lookup_cache_db() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match SqliteCache::open(&path).await {
            Ok(cache) => {
                cache.gc().await;
                return Arc::new(cache);
            }
            Err(e) => warn!("lookup cache unavailable at {}: {e}", path.display()),
        }
    }
    Arc::new(InMemoryCache::new())
}

/// Opens the filter preset store; presets are simply disabled if it fails.
async fn open_preset_store() -> Option<PresetStore> {
    let path = paths::presets_db()?;
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match PresetStore::open(&path).await {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("preset store unavailable at {}: {e}", path.display());
            None
        }
    }
}
