use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use database::client::DbClient;
use sea_orm::DatabaseTransaction;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::{chain::ChainEvent, error::ExecutorError};

/// Fixed control skeleton for a block monitor. Concrete monitors supply the
/// hook methods; `run` and `process_height` are the shared loop and are not
/// meant to be overridden.
///
/// Heights are processed strictly in ascending order, one at a time, and a
/// height's entire effect (event extraction, withdrawal rows, possible
/// output finalization, checkpoint advance) is one transaction. A failed
/// height rolls back whole and is replayed on the next cycle; on restart
/// the loop resumes from the persisted checkpoint.
#[async_trait]
pub trait Monitor: Send + Sync {
    /// Monitor identity, also the sync-state key.
    fn name(&self) -> String;

    fn db(&self) -> Arc<DbClient>;

    fn poll_interval(&self) -> Duration;

    /// Current tip of the watched chain.
    async fn latest_height(&self) -> Result<u64, ExecutorError>;

    async fn fetch_events(&self, height: u64) -> Result<Vec<ChainEvent>, ExecutorError>;

    /// Persist whatever the events imply. Returns `true` when at least one
    /// record was written.
    async fn handle_events(
        &self,
        txn: &DatabaseTransaction,
        height: u64,
        events: Vec<ChainEvent>,
    ) -> Result<bool, ExecutorError>;

    /// Period-boundary work for this height, e.g. output finalization.
    async fn handle_block(
        &self,
        txn: &DatabaseTransaction,
        height: u64,
    ) -> Result<(), ExecutorError>;

    #[instrument(skip_all, fields(monitor = %self.name()))]
    async fn run(&self, shutdown: CancellationToken) -> Result<(), ExecutorError> {
        let name = self.name();
        let db = self.db();
        info!("starting monitor");

        let mut last_committed: Option<i64> = None;
        while !shutdown.is_cancelled() {
            let synced = match db.last_synced_height(&db.primary, &name).await {
                Ok(h) => h,
                Err(e) => {
                    warn!(error = %e, "failed to read sync state");
                    self.idle(&shutdown).await;
                    continue;
                }
            };

            // The checkpoint may only move when this loop commits a height.
            if let Some(expected) = last_committed {
                if synced != expected {
                    return Err(ExecutorError::OrderingViolation {
                        monitor: name.clone(),
                        expected,
                        stored: synced,
                    });
                }
            }
            last_committed = Some(synced);

            let target = match self.latest_height().await {
                Ok(h) => h,
                Err(e) => {
                    warn!(error = %e, "failed to fetch chain tip");
                    self.idle(&shutdown).await;
                    continue;
                }
            };

            let next = synced as u64 + 1;
            if next > target {
                self.idle(&shutdown).await;
                continue;
            }

            match self.process_height(next).await {
                Ok(()) => {
                    last_committed = Some(next as i64);
                }
                Err(e) if e.is_fatal() => {
                    error!(height = next, error = %e, "fatal error, halting monitor");
                    return Err(e);
                }
                Err(e) => {
                    warn!(height = next, error = %e, "height aborted, will retry");
                    self.idle(&shutdown).await;
                }
            }
        }

        info!("monitor stopped");
        Ok(())
    }

    /// One height, one transaction. Nothing is observable unless every step
    /// up to and including the checkpoint advance committed.
    #[instrument(skip(self), fields(monitor = %self.name()))]
    async fn process_height(&self, height: u64) -> Result<(), ExecutorError> {
        let db = self.db();
        let txn = db.begin().await?;

        let events = self.fetch_events(height).await?;
        if events.is_empty() {
            info!(height, "no events at height");
        } else {
            self.handle_events(&txn, height, events).await?;
        }
        self.handle_block(&txn, height).await?;
        db.upsert_synced_height(&txn, &self.name(), height as i64)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Poll-interval sleep that wakes early on shutdown.
    async fn idle(&self, shutdown: &CancellationToken) {
        tokio::select! {
            _ = shutdown.cancelled() => {}
            _ = sleep(self.poll_interval()) => {}
        }
    }
}
