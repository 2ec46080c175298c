use std::{sync::Arc, time::Duration};

use common::config::{ExecutorConfig, LoadFromEnv};
use database::client::DbClient;
use executor_core::{gate::SubmissionGate, l2::L2Monitor, monitor::Monitor, rpc::RestChainQuery};
use eyre::Result;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cfg = ExecutorConfig::load()?;

    let db_conn = database::connect::connect(&cfg.database.url).await?;
    info!("Connected to executor DB");
    let db = Arc::new(DbClient::new(db_conn));

    let chain = Arc::new(RestChainQuery::new(
        &cfg.chain.l1_rest_url,
        &cfg.chain.l2_rest_url,
        Duration::from_millis(cfg.chain.request_timeout_ms),
    )?);
    let gate = SubmissionGate::new(cfg.settings.submission_threshold);
    let monitor = L2Monitor::new(chain, Arc::clone(&db), &cfg.chain, gate);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received");
        signal_token.cancel();
    });

    if let Err(e) = monitor.run(shutdown).await {
        error!("monitor halted: {e}");
        return Err(e.into());
    }

    Ok(())
}
