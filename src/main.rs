//! Binary entry point: prepare the data directory, bring up logging and the
//! SQLite store, seed the catalog, then drive the Ratatui event loop.
use anyhow::Context;
use fitness_tracker::{logging, run_app, seed, App, AppConfig, Repository, Store};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::resolve()?;
    config
        .ensure_dirs()
        .with_context(|| format!("failed to create {}", config.data_dir.display()))?;
    let _log_guard = logging::init(&config)?;

    let store = Store::open(&config.db_path);
    store
        .initialize_schema()
        .context("failed to initialize database schema")?;
    let repo = Repository::new(store);
    seed::ensure_default_catalog(&repo, &config).context("failed to seed exercise catalog")?;

    info!(db = %config.db_path.display(), "starting fitness tracker");
    let mut app = App::new(repo, &config)?;
    let result = run_app(&mut app);
    info!("fitness tracker stopped");
    result
}
