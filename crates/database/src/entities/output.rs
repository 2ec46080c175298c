use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One committed L2 checkpoint. Indices are contiguous from 1 and rows are
/// append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "output")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub output_index: i64,
    pub output_root: String,
    pub state_root: String,
    pub merkle_root: String,
    pub last_block_hash: String,
    pub start_block_number: i64,
    pub end_block_number: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
