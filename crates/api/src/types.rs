use database::entities::{deposit, output, withdrawal};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalResponse {
    pub bridge_id: i64,
    pub sequence: i64,
    pub sender: String,
    pub receiver: String,
    pub l1_denom: String,
    pub l2_denom: String,
    pub amount: String,
    pub output_index: i64,
    pub merkle_root: String,
    pub merkle_proof: Vec<String>,
    pub created_at: DateTimeWithTimeZone,
}

impl From<withdrawal::Model> for WithdrawalResponse {
    fn from(model: withdrawal::Model) -> Self {
        let merkle_proof = serde_json::from_value(model.merkle_proof).unwrap_or_default();
        Self {
            bridge_id: model.bridge_id,
            sequence: model.sequence,
            sender: model.sender,
            receiver: model.receiver,
            l1_denom: model.l1_denom,
            l2_denom: model.l2_denom,
            amount: model.amount,
            output_index: model.output_index,
            merkle_root: model.merkle_root,
            merkle_proof,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositResponse {
    pub bridge_id: i64,
    pub sequence: i64,
    pub sender: String,
    pub receiver: String,
    pub l1_denom: String,
    pub l2_denom: String,
    pub amount: String,
    pub l1_height: i64,
    pub created_at: DateTimeWithTimeZone,
}

impl From<deposit::Model> for DepositResponse {
    fn from(model: deposit::Model) -> Self {
        Self {
            bridge_id: model.bridge_id,
            sequence: model.sequence,
            sender: model.sender,
            receiver: model.receiver,
            l1_denom: model.l1_denom,
            l2_denom: model.l2_denom,
            amount: model.amount,
            l1_height: model.l1_height,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputResponse {
    pub output_index: i64,
    pub output_root: String,
    pub state_root: String,
    pub merkle_root: String,
    pub last_block_hash: String,
    pub start_block_number: i64,
    pub end_block_number: i64,
    pub created_at: DateTimeWithTimeZone,
}

impl From<output::Model> for OutputResponse {
    fn from(model: output::Model) -> Self {
        Self {
            output_index: model.output_index,
            output_root: model.output_root,
            state_root: model.state_root,
            merkle_root: model.merkle_root,
            last_block_hash: model.last_block_hash,
            start_block_number: model.start_block_number,
            end_block_number: model.end_block_number,
            created_at: model.created_at,
        }
    }
}
