use std::{sync::Arc, time::Duration};

use alloy_primitives::U256;
use async_trait::async_trait;
use chrono::Utc;
use common::config::ChainConfig;
use database::{
    client::DbClient,
    entities::{output, withdrawal},
};
use sea_orm::{ActiveValue::Set, DatabaseTransaction, IntoActiveModel};
use tracing::{info, instrument};

use crate::{
    chain::{ChainEvent, ChainQuery},
    error::ExecutorError,
    events::{decode_withdrawal_event, WithdrawalEvent},
    gate::{GateState, SubmissionGate},
    merkle::{WithdrawalLeaf, WithdrawalStorage},
    monitor::Monitor,
    output::{compute_output_root, plan_output},
};

pub const L2_MONITOR_NAME: &str = "executor_l2_monitor";

/// Watches the L2 chain for withdrawal initiations and folds them into
/// periodic output commitments.
pub struct L2Monitor<C> {
    chain: Arc<C>,
    db: Arc<DbClient>,
    bridge_id: u64,
    poll_interval: Duration,
    gate: SubmissionGate,
}

impl<C: ChainQuery> L2Monitor<C> {
    pub fn new(
        chain: Arc<C>,
        db: Arc<DbClient>,
        config: &ChainConfig,
        gate: SubmissionGate,
    ) -> Self {
        Self {
            chain,
            db,
            bridge_id: config.bridge_id,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            gate,
        }
    }

    /// Pending withdrawals are tagged with the index the *next* output will
    /// carry, so the batch is already assembled when that output finalizes.
    async fn handle_withdrawal_event(
        &self,
        txn: &DatabaseTransaction,
        event: WithdrawalEvent,
    ) -> Result<(), ExecutorError> {
        let last_index = self
            .db
            .latest_output(txn)
            .await?
            .map(|o| o.output_index)
            .unwrap_or(0);
        let pair = self
            .chain
            .token_pair_by_l2_denom(self.bridge_id, &event.l2_denom)
            .await?;

        let sequence = event.sequence;
        let model = withdrawal::ActiveModel {
            bridge_id: Set(self.bridge_id as i64),
            sequence: Set(event.sequence as i64),
            sender: Set(event.sender),
            receiver: Set(event.receiver),
            l1_denom: Set(pair.l1_denom),
            l2_denom: Set(pair.l2_denom),
            amount: Set(event.amount.to_string()),
            output_index: Set(last_index + 1),
            merkle_root: Set(String::new()),
            merkle_proof: Set(serde_json::json!([])),
            created_at: Set(Utc::now().into()),
        };
        self.db.insert_withdrawal(txn, model).await?;
        info!(sequence, output_index = last_index + 1, "saved withdrawal");
        Ok(())
    }

    async fn check_submission_interval(&self) -> Result<GateState, ExecutorError> {
        let Some(last) = self.chain.last_submitted_output(self.bridge_id).await? else {
            return Ok(GateState::Eligible);
        };
        let bridge = self.chain.bridge_config(self.bridge_id).await?;
        Ok(self.gate.evaluate(
            Utc::now().timestamp(),
            Some(last.l1_block_time.timestamp()),
            bridge.submission_interval_secs,
        ))
    }

    /// Finalizes the current commitment period: computes the withdrawal-set
    /// root, writes root + proof onto every batched withdrawal, then writes
    /// the output row. All inside the caller's transaction, withdrawals
    /// strictly before the output.
    #[instrument(skip(self, txn))]
    async fn handle_output(
        &self,
        txn: &DatabaseTransaction,
        height: u64,
    ) -> Result<(), ExecutorError> {
        if self.check_submission_interval().await? == GateState::Throttled {
            info!("submission interval not reached");
            return Ok(());
        }

        let last = self.db.latest_output(txn).await?;
        let Some(window) = plan_output(
            last.map(|o| (o.output_index as u64, o.end_block_number as u64)),
            height,
        ) else {
            info!("no new block to process");
            return Ok(());
        };

        let block = self.chain.block_info(height).await?;
        let rows = self
            .db
            .withdrawals_by_output_index(txn, self.bridge_id as i64, window.output_index as i64)
            .await?;
        let leaves = rows
            .iter()
            .map(leaf_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let storage = WithdrawalStorage::new(&leaves);
        let merkle_root = storage.merkle_root();
        let root_hex = hex::encode(merkle_root);

        for (i, row) in rows.into_iter().enumerate() {
            let proof: Vec<String> = storage
                .merkle_proof(i)
                .unwrap_or_default()
                .iter()
                .map(hex::encode)
                .collect();
            let mut model = row.into_active_model();
            model.merkle_root = Set(root_hex.clone());
            model.merkle_proof = Set(serde_json::json!(proof));
            self.db.update_withdrawal_commitment(txn, model).await?;
        }

        let output_root =
            compute_output_root(window.output_index, block.state_root, merkle_root, block.block_hash);
        let model = output::ActiveModel {
            output_index: Set(window.output_index as i64),
            output_root: Set(hex::encode(output_root)),
            state_root: Set(hex::encode(block.state_root)),
            merkle_root: Set(root_hex),
            last_block_hash: Set(hex::encode(block.block_hash)),
            start_block_number: Set(window.start_block_number as i64),
            end_block_number: Set(window.end_block_number as i64),
            created_at: Set(Utc::now().into()),
        };
        self.db.insert_output(txn, model).await?;
        info!(
            output_index = window.output_index,
            start = window.start_block_number,
            end = window.end_block_number,
            leaves = storage.len(),
            "output finalized"
        );
        Ok(())
    }
}

fn leaf_from_row(row: &withdrawal::Model) -> Result<WithdrawalLeaf, ExecutorError> {
    let amount = row
        .amount
        .parse::<U256>()
        .map_err(|_| ExecutorError::InvalidAmount(row.amount.clone()))?;
    Ok(WithdrawalLeaf {
        bridge_id: row.bridge_id as u64,
        sequence: row.sequence as u64,
        sender: row.sender.clone(),
        receiver: row.receiver.clone(),
        l1_denom: row.l1_denom.clone(),
        amount,
    })
}

#[async_trait]
impl<C: ChainQuery> Monitor for L2Monitor<C> {
    fn name(&self) -> String {
        L2_MONITOR_NAME.to_owned()
    }

    fn db(&self) -> Arc<DbClient> {
        Arc::clone(&self.db)
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    async fn latest_height(&self) -> Result<u64, ExecutorError> {
        self.chain.latest_height().await
    }

    async fn fetch_events(&self, height: u64) -> Result<Vec<ChainEvent>, ExecutorError> {
        self.chain.events_at_height(height).await
    }

    async fn handle_events(
        &self,
        txn: &DatabaseTransaction,
        _height: u64,
        events: Vec<ChainEvent>,
    ) -> Result<bool, ExecutorError> {
        let mut saved = false;
        for event in &events {
            if let Some(decoded) = decode_withdrawal_event(event)? {
                self.handle_withdrawal_event(txn, decoded).await?;
                saved = true;
            }
        }
        Ok(saved)
    }

    async fn handle_block(
        &self,
        txn: &DatabaseTransaction,
        height: u64,
    ) -> Result<(), ExecutorError> {
        self.handle_output(txn, height).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::verify_proof;

    fn row(sequence: i64, amount: &str) -> withdrawal::Model {
        withdrawal::Model {
            bridge_id: 1,
            sequence,
            sender: "a".to_owned(),
            receiver: "b".to_owned(),
            l1_denom: "uusdc".to_owned(),
            l2_denom: "l2/usdc".to_owned(),
            amount: amount.to_owned(),
            output_index: 1,
            merkle_root: String::new(),
            merkle_proof: serde_json::json!([]),
            created_at: Utc::now().into(),
        }
    }

    // Height 100 emits one withdrawal and closes the first period: the
    // single-leaf batch commits to the leaf digest with an empty proof, and
    // the first output covers blocks 1..=100.
    #[test]
    fn first_period_commits_a_single_withdrawal() {
        let window = plan_output(None, 100).unwrap();
        assert_eq!(window.output_index, 1);
        assert_eq!(window.start_block_number, 1);
        assert_eq!(window.end_block_number, 100);

        let leaf = leaf_from_row(&row(1, "1000")).unwrap();
        let storage = WithdrawalStorage::new(std::slice::from_ref(&leaf));
        let root = storage.merkle_root();
        assert_eq!(root, leaf.hash());

        let proof = storage.merkle_proof(0).unwrap();
        assert!(proof.is_empty());
        assert!(verify_proof(&leaf, &proof, root));
    }

    #[test]
    fn two_withdrawals_prove_against_one_root() {
        let rows = [row(1, "1000"), row(2, "2500")];
        let leaves: Vec<_> = rows.iter().map(|r| leaf_from_row(r).unwrap()).collect();
        let storage = WithdrawalStorage::new(&leaves);
        let root = storage.merkle_root();

        for (i, leaf) in leaves.iter().enumerate() {
            let proof = storage.merkle_proof(i).unwrap();
            assert_eq!(proof.len(), 1);
            assert_eq!(proof[0], leaves[1 - i].hash());
            assert!(verify_proof(leaf, &proof, root));
        }
    }

    #[test]
    fn stored_amounts_must_be_numeric() {
        let err = leaf_from_row(&row(1, "10.5")).unwrap_err();
        assert!(matches!(err, ExecutorError::InvalidAmount(_)));
    }
}
