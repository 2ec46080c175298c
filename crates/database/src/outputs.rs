use eyre::Result;
use sea_orm::{
    ConnectionTrait, EntityTrait, Order, PaginatorTrait, QueryOrder, QuerySelect,
};
use tracing::error;

use crate::{client::DbClient, entities::output};

impl DbClient {
    /// Highest-index output, i.e. the last finalized checkpoint.
    pub async fn latest_output<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Option<output::Model>> {
        let row = output::Entity::find()
            .order_by_desc(output::Column::OutputIndex)
            .one(conn)
            .await?;
        Ok(row)
    }

    pub async fn output_by_index(&self, output_index: i64) -> Result<Option<output::Model>> {
        let row = output::Entity::find_by_id(output_index)
            .one(&self.primary)
            .await?;
        Ok(row)
    }

    pub async fn insert_output<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: output::ActiveModel,
    ) -> Result<()> {
        output::Entity::insert(model)
            .exec(conn)
            .await
            .map_err(|e| {
                error!("Failed to insert output: {:?}", e);
                eyre::eyre!("Failed to insert output: {:?}", e)
            })?;

        Ok(())
    }

    pub async fn fetch_outputs_paginated(
        &self,
        offset: u64,
        limit: u64,
        descending: bool,
    ) -> Result<(u64, Vec<output::Model>)> {
        let query = output::Entity::find();
        let count = query.clone().count(&self.primary).await?;
        let order = if descending { Order::Desc } else { Order::Asc };
        let items = query
            .order_by(output::Column::OutputIndex, order)
            .offset(offset * limit)
            .limit(limit)
            .all(&self.primary)
            .await?;

        Ok((count, items))
    }
}
