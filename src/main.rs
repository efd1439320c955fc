use beacon::config::Config;
use beacon::server;
use beacon::static_files::storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    storage::check(&cfg.static_files).await?;

    tokio::select! {
        res = server::listener::run(&cfg) => {
            if let Err(e) = &res {
                tracing::error!("HTTP server stopped: {:#}", e);
            }
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
