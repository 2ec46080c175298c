use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One L2 -> L1 withdrawal intent. `merkle_root` and `merkle_proof` stay
/// empty until the batch the record belongs to is finalized; after that the
/// row is never touched again.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "withdrawal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub bridge_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub sequence: i64,
    pub sender: String,
    pub receiver: String,
    pub l1_denom: String,
    pub l2_denom: String,
    /// Decimal string of an arbitrary-precision unsigned amount.
    pub amount: String,
    pub output_index: i64,
    pub merkle_root: String,
    /// JSON array of hex-encoded sibling digests, leaf to root.
    pub merkle_proof: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
