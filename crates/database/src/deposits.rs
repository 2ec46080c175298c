use eyre::Result;
use sea_orm::{
    ColumnTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{client::DbClient, entities::deposit, TxPageParams};

impl DbClient {
    pub async fn fetch_deposits_paginated(
        &self,
        params: &TxPageParams,
    ) -> Result<(u64, Vec<deposit::Model>)> {
        let mut query = deposit::Entity::find();
        if let Some(bridge_id) = params.bridge_id {
            query = query.filter(deposit::Column::BridgeId.eq(bridge_id));
        }
        if let Some(sequence) = params.sequence {
            query = query.filter(deposit::Column::Sequence.eq(sequence));
        }
        if let Some(address) = &params.address {
            query = query.filter(deposit::Column::Sender.eq(address.clone()));
        }

        let count = query.clone().count(&self.primary).await?;
        let order = if params.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        let items = query
            .order_by(deposit::Column::Sequence, order)
            .offset(params.offset * params.limit)
            .limit(params.limit)
            .all(&self.primary)
            .await?;

        Ok((count, items))
    }
}
