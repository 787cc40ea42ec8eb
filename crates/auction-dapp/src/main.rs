//! Rollup dapp binary for the auction state machine.

use tracing::info;
use tracing_subscriber::EnvFilter;

use auction_core::AuctionEngine;
use auction_dapp::{Config, Dispatcher, HttpCoordinator, Runner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    info!(
        server = %config.server_url,
        beneficiary = %config.beneficiary,
        minimum_bid = config.initial_threshold,
        "starting auction dapp"
    );

    let engine = AuctionEngine::new(config.auction_config(), config.threshold_source()?);
    let coordinator = HttpCoordinator::new(&config.server_url, config.request_timeout)?;
    let mut runner = Runner::new(coordinator, Dispatcher::new(engine), config.retry_policy());

    let result = tokio::select! {
        res = runner.run() => res.map_err(anyhow::Error::from),
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
            Ok(())
        }
    };

    info!(stats = ?runner.stats(), "auction dapp stopped");
    result
}
