use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Mirror-direction record (L1 -> L2), written by the deposit ingestion
/// path and read-only here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "deposit")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub bridge_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub sequence: i64,
    pub sender: String,
    pub receiver: String,
    pub l1_denom: String,
    pub l2_denom: String,
    pub amount: String,
    pub l1_height: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
