use std::time::Duration;

use alloy_primitives::B256;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{
    chain::{BlockInfo, BridgeConfig, ChainEvent, ChainQuery, SubmittedOutput, TokenPair},
    error::ExecutorError,
};

/// [`ChainQuery`] over the rollup REST endpoints: blocks and events come
/// from the L2 node, bridge parameters and submitted outputs from the L1
/// node. Every request shares one bounded-timeout client, so a hung
/// endpoint aborts the height instead of wedging the loop.
pub struct RestChainQuery {
    client: reqwest::Client,
    l1_base: String,
    l2_base: String,
}

impl RestChainQuery {
    pub fn new(
        l1_rest_url: &str,
        l2_rest_url: &str,
        timeout: Duration,
    ) -> Result<Self, ExecutorError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            l1_base: l1_rest_url.trim_end_matches('/').to_owned(),
            l2_base: l2_rest_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ExecutorError> {
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ChainQuery for RestChainQuery {
    async fn latest_height(&self) -> Result<u64, ExecutorError> {
        let res: BlockResponse = self
            .get_json(format!(
                "{}/cosmos/base/tendermint/v1beta1/blocks/latest",
                self.l2_base
            ))
            .await?;
        parse_height(&res.block.header.height)
    }

    async fn block_info(&self, height: u64) -> Result<BlockInfo, ExecutorError> {
        let res: BlockResponse = self
            .get_json(format!(
                "{}/cosmos/base/tendermint/v1beta1/blocks/{}",
                self.l2_base, height
            ))
            .await?;
        Ok(BlockInfo {
            height: parse_height(&res.block.header.height)?,
            state_root: decode_digest(&res.block.header.app_hash, "block state root")?,
            block_hash: decode_digest(&res.block_id.hash, "block hash")?,
            timestamp: res.block.header.time,
        })
    }

    async fn events_at_height(&self, height: u64) -> Result<Vec<ChainEvent>, ExecutorError> {
        let res: TxSearchResponse = self
            .get_json(format!(
                "{}/cosmos/tx/v1beta1/txs?query=tx.height%3D{}",
                self.l2_base, height
            ))
            .await?;
        let events = res
            .tx_responses
            .into_iter()
            .flat_map(|tx| tx.events)
            .map(|event| ChainEvent {
                kind: event.kind,
                attributes: event
                    .attributes
                    .into_iter()
                    .map(|attr| (attr.key, attr.value))
                    .collect(),
            })
            .collect();
        Ok(events)
    }

    async fn bridge_config(&self, bridge_id: u64) -> Result<BridgeConfig, ExecutorError> {
        let res: BridgeResponse = self
            .get_json(format!(
                "{}/rollup/bridge/v1/bridges/{}",
                self.l1_base, bridge_id
            ))
            .await?;
        Ok(BridgeConfig {
            submission_interval_secs: res.bridge_config.submission_interval_seconds,
        })
    }

    async fn last_submitted_output(
        &self,
        bridge_id: u64,
    ) -> Result<Option<SubmittedOutput>, ExecutorError> {
        let url = format!(
            "{}/rollup/bridge/v1/bridges/{}/outputs/latest",
            self.l1_base, bridge_id
        );
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let res: OutputProposalResponse = response.error_for_status()?.json().await?;
        Ok(Some(SubmittedOutput {
            l1_block_time: res.output_proposal.l1_block_time,
        }))
    }

    async fn token_pair_by_l2_denom(
        &self,
        bridge_id: u64,
        l2_denom: &str,
    ) -> Result<TokenPair, ExecutorError> {
        let res: TokenPairResponse = self
            .get_json(format!(
                "{}/rollup/bridge/v1/bridges/{}/token_pairs/by_l2_denom?denom={}",
                self.l1_base, bridge_id, l2_denom
            ))
            .await?;
        Ok(TokenPair {
            l1_denom: res.token_pair.l1_denom,
            l2_denom: res.token_pair.l2_denom,
        })
    }
}

fn parse_height(raw: &str) -> Result<u64, ExecutorError> {
    raw.parse::<u64>()
        .map_err(|e| ExecutorError::decode("block height", e))
}

/// Digest fields arrive base64-encoded and must be exactly 32 bytes.
fn decode_digest(raw: &str, context: &'static str) -> Result<B256, ExecutorError> {
    let bytes = BASE64
        .decode(raw)
        .map_err(|e| ExecutorError::decode(context, e))?;
    if bytes.len() != 32 {
        return Err(ExecutorError::decode(
            context,
            format!("expected 32 bytes, got {}", bytes.len()),
        ));
    }
    Ok(B256::from_slice(&bytes))
}

#[derive(Deserialize)]
struct BlockResponse {
    block_id: BlockId,
    block: BlockBody,
}

#[derive(Deserialize)]
struct BlockId {
    hash: String,
}

#[derive(Deserialize)]
struct BlockBody {
    header: BlockHeader,
}

#[derive(Deserialize)]
struct BlockHeader {
    height: String,
    app_hash: String,
    time: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TxSearchResponse {
    #[serde(default)]
    tx_responses: Vec<TxResponse>,
}

#[derive(Deserialize)]
struct TxResponse {
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attributes: Vec<RawAttribute>,
}

#[derive(Deserialize)]
struct RawAttribute {
    key: String,
    value: String,
}

#[derive(Deserialize)]
struct BridgeResponse {
    bridge_config: RawBridgeConfig,
}

#[derive(Deserialize)]
struct RawBridgeConfig {
    submission_interval_seconds: u64,
}

#[derive(Deserialize)]
struct OutputProposalResponse {
    output_proposal: RawOutputProposal,
}

#[derive(Deserialize)]
struct RawOutputProposal {
    l1_block_time: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenPairResponse {
    token_pair: RawTokenPair,
}

#[derive(Deserialize)]
struct RawTokenPair {
    l1_denom: String,
    l2_denom: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_block_response() {
        let payload = serde_json::json!({
            "block_id": { "hash": BASE64.encode([0xab; 32]) },
            "block": {
                "header": {
                    "height": "42",
                    "app_hash": BASE64.encode([0xcd; 32]),
                    "time": "2026-08-05T12:00:00Z",
                }
            }
        });
        let res: BlockResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(parse_height(&res.block.header.height).unwrap(), 42);
        assert_eq!(
            decode_digest(&res.block.header.app_hash, "state root").unwrap(),
            B256::repeat_byte(0xcd)
        );
        assert_eq!(
            decode_digest(&res.block_id.hash, "block hash").unwrap(),
            B256::repeat_byte(0xab)
        );
    }

    #[test]
    fn parses_tx_search_response() {
        let payload = serde_json::json!({
            "tx_responses": [
                {
                    "events": [
                        {
                            "type": "initiate_token_withdrawal",
                            "attributes": [
                                { "key": "denom", "value": "uusdc" },
                                { "key": "amount", "value": "1000" },
                            ],
                        }
                    ]
                },
                { "events": [] },
            ]
        });
        let res: TxSearchResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(res.tx_responses.len(), 2);
        assert_eq!(res.tx_responses[0].events[0].kind, "initiate_token_withdrawal");
        assert_eq!(res.tx_responses[0].events[0].attributes.len(), 2);
    }

    #[test]
    fn rejects_short_digests() {
        let short = BASE64.encode([0u8; 20]);
        assert!(decode_digest(&short, "state root").is_err());
    }

    #[test]
    fn missing_tx_responses_defaults_to_empty() {
        let res: TxSearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(res.tx_responses.is_empty());
    }
}
