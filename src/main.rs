use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Files are served from wherever the server binary is installed
    let root = config::DocumentRoot::install_dir()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, root))
}

async fn async_main(
    cfg: config::Config,
    root: config::DocumentRoot,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;
    logger::log_server_start(&listener.local_addr()?, root.path());

    let state = Arc::new(config::AppState::new(cfg, root));

    server::start_server_loop(listener, state, server::shutdown_signal()).await?;

    logger::log_server_stop();
    Ok(())
}
