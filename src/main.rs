use std::sync::Arc;

use spaserve::config::{AppState, Config};
use spaserve::error::StartupError;
use spaserve::{logger, server};

fn main() {
    if let Err(e) = run() {
        eprintln!("[FATAL] {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), StartupError> {
    let cfg = Config::load()?;
    logger::init(&cfg).map_err(StartupError::Logger)?;

    // Verify the asset directory before anything binds: a missing build
    // output is an operator error, not something to retry around.
    let asset_root = cfg.resolve_asset_root()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    runtime.block_on(async_main(cfg, asset_root))
}

async fn async_main(cfg: Config, asset_root: std::path::PathBuf) -> Result<(), StartupError> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr).map_err(StartupError::Bind)?;

    logger::log_server_start(&addr, &cfg, &asset_root);

    let state = Arc::new(AppState::new(cfg, asset_root));
    server::run(listener, state).await;
    Ok(())
}
