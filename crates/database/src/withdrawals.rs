use eyre::Result;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::error;

use crate::{client::DbClient, entities::withdrawal, TxPageParams};

impl DbClient {
    /// Insert is a no-op when the (bridge_id, sequence) pair already exists,
    /// so replaying a height never duplicates a withdrawal.
    pub async fn insert_withdrawal<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: withdrawal::ActiveModel,
    ) -> Result<()> {
        let res = withdrawal::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    withdrawal::Column::BridgeId,
                    withdrawal::Column::Sequence,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(conn)
            .await;

        match res {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => {
                error!("Failed to insert withdrawal: {:?}", e);
                Err(eyre::eyre!("Failed to insert withdrawal: {:?}", e))
            }
        }
    }

    /// The batch pending under one output index, ordered by sequence so the
    /// merkle leaves are built over a stable order.
    pub async fn withdrawals_by_output_index<C: ConnectionTrait>(
        &self,
        conn: &C,
        bridge_id: i64,
        output_index: i64,
    ) -> Result<Vec<withdrawal::Model>> {
        let rows = withdrawal::Entity::find()
            .filter(withdrawal::Column::BridgeId.eq(bridge_id))
            .filter(withdrawal::Column::OutputIndex.eq(output_index))
            .order_by_asc(withdrawal::Column::Sequence)
            .all(conn)
            .await?;
        Ok(rows)
    }

    /// Attaches root + proof to a finalized withdrawal row.
    pub async fn update_withdrawal_commitment<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: withdrawal::ActiveModel,
    ) -> Result<()> {
        withdrawal::Entity::update(model)
            .exec(conn)
            .await
            .map_err(|e| {
                error!("Failed to update withdrawal commitment: {:?}", e);
                eyre::eyre!("Failed to update withdrawal commitment: {:?}", e)
            })?;

        Ok(())
    }

    pub async fn withdrawal_by_sequence(
        &self,
        bridge_id: i64,
        sequence: i64,
    ) -> Result<Option<withdrawal::Model>> {
        let row = withdrawal::Entity::find_by_id((bridge_id, sequence))
            .one(&self.primary)
            .await?;
        Ok(row)
    }

    pub async fn fetch_withdrawals_paginated(
        &self,
        params: &TxPageParams,
    ) -> Result<(u64, Vec<withdrawal::Model>)> {
        let mut query = withdrawal::Entity::find();
        if let Some(bridge_id) = params.bridge_id {
            query = query.filter(withdrawal::Column::BridgeId.eq(bridge_id));
        }
        if let Some(sequence) = params.sequence {
            query = query.filter(withdrawal::Column::Sequence.eq(sequence));
        }
        if let Some(address) = &params.address {
            query = query.filter(withdrawal::Column::Sender.eq(address.clone()));
        }

        let count = query.clone().count(&self.primary).await?;
        let order = if params.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        let items = query
            .order_by(withdrawal::Column::Sequence, order)
            .offset(params.offset * params.limit)
            .limit(params.limit)
            .all(&self.primary)
            .await?;

        Ok((count, items))
    }
}
