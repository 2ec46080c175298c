use alloy_primitives::B256;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ExecutorError;

#[derive(Debug, Clone)]
pub struct BlockInfo {
    pub height: u64,
    pub state_root: B256,
    pub block_hash: B256,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub submission_interval_secs: u64,
}

/// Last output proposal observed on L1, as far as the gate is concerned only
/// its L1 block time matters.
#[derive(Debug, Clone)]
pub struct SubmittedOutput {
    pub l1_block_time: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub l1_denom: String,
    pub l2_denom: String,
}

/// Raw chain event: a type tag plus key/value attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEvent {
    pub kind: String,
    pub attributes: Vec<(String, String)>,
}

impl ChainEvent {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Narrow view of the two chains the executor talks to. The monitor core
/// only ever calls these six operations; transport lives behind the trait.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    async fn latest_height(&self) -> Result<u64, ExecutorError>;

    async fn block_info(&self, height: u64) -> Result<BlockInfo, ExecutorError>;

    async fn events_at_height(&self, height: u64) -> Result<Vec<ChainEvent>, ExecutorError>;

    async fn bridge_config(&self, bridge_id: u64) -> Result<BridgeConfig, ExecutorError>;

    /// `None` when no output has ever been submitted for this bridge.
    async fn last_submitted_output(
        &self,
        bridge_id: u64,
    ) -> Result<Option<SubmittedOutput>, ExecutorError>;

    async fn token_pair_by_l2_denom(
        &self,
        bridge_id: u64,
        l2_denom: &str,
    ) -> Result<TokenPair, ExecutorError>;
}
