use dotenvy::{dotenv, from_filename};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    cli::{run_bench, run_prompt},
    core::domain::models::AppError,
    infrastructure::{
        config::{PeerConfig, RunMode, load_peer_list},
        di::PeerModule,
    },
};

pub mod cli;
pub mod core;
pub mod infrastructure;


fn load_env_for_workspace() {
    let _ = from_filename(concat!(env!("CARGO_MANIFEST_DIR"), "/.env"));
    let _ = from_filename(".env");
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();

    load_env_for_workspace();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = PeerConfig::from_env()?;
    let peers = load_peer_list(&cfg.peers_file)?;
    let module = PeerModule::build(&cfg, peers)?;

    let listener = TcpListener::bind(cfg.bind_addr()?).await?;
    info!(role = "server", self_id = %module.self_id, mode = ?cfg.mode, "peer started");

    let listener_task = tokio::spawn(module.peer_listener.clone().run(listener));

    match cfg.mode {
        RunMode::Interactive => run_prompt(&module).await?,
        RunMode::Bench => {
            run_bench(&module, cfg.bench).await?;
        }
        RunMode::Serve => {
            tokio::signal::ctrl_c().await?;
            info!(role = "server", "shutting down");
        }
    }

    listener_task.abort();
    if let Ok(Err(e)) = listener_task.await {
        error!(role = "server", "listener stopped: {e}");
    }

    Ok(())
}
