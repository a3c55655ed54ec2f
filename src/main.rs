use std::process::ExitCode;
use std::sync::Arc;

use static_cors_server::config::{AppState, Config};
use static_cors_server::{logger, server, StartupError};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[FATAL] {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), StartupError> {
    let cfg = Config::load()?;
    logger::init(&cfg).map_err(StartupError::LogInit)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), StartupError> {
    let addr = cfg.socket_addr()?;
    let listener = server::bind(addr)?;
    let port = listener.local_addr().map_or(addr.port(), |a| a.port());

    let state = Arc::new(AppState::new(cfg));
    logger::log_server_start(port);

    server::serve(listener, state).await;
    Ok(())
}
