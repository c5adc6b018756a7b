use std::process;

use bytes::Bytes;
use reply::{config::Config, server::Server, IntoResponse, Response, StatusCode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;
    tracing::debug!(?config, "loaded configuration");

    let state = AppState {
        keep_alive: config.keep_alive,
    };
    let server = Server::new(&config, state, hello);

    if let Err(err) = server.bind(config.bind.as_str()).await {
        tracing::error!(%err, "server failed");
        process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub keep_alive: bool,
}

async fn hello(head: Bytes, state: AppState) -> Response {
    let request_line = head.split(|&b| b == b'\r').next().unwrap_or_default();
    tracing::info!(target: "requests", request = %String::from_utf8_lossy(request_line));

    let mut response = (StatusCode::Ok, "hello").into_response();
    response.set_close_connection(!state.keep_alive);
    response
}
