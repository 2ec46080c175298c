use eyre::Result;
use sea_orm::{sea_query::OnConflict, ActiveValue::Set, ConnectionTrait, EntityTrait};
use tracing::error;

use crate::{client::DbClient, entities::sync_state};

impl DbClient {
    /// Last fully processed height for a monitor identity, 0 when the
    /// monitor has never run.
    pub async fn last_synced_height<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<i64> {
        let row = sync_state::Entity::find_by_id(name.to_owned())
            .one(conn)
            .await?;
        Ok(row.map(|r| r.height).unwrap_or(0))
    }

    /// Must only be called inside the transaction that carries the rest of
    /// the height's writes.
    pub async fn upsert_synced_height<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
        height: i64,
    ) -> Result<()> {
        let model = sync_state::ActiveModel {
            name: Set(name.to_owned()),
            height: Set(height),
        };
        sync_state::Entity::insert(model)
            .on_conflict(
                OnConflict::column(sync_state::Column::Name)
                    .update_column(sync_state::Column::Height)
                    .to_owned(),
            )
            .exec(conn)
            .await
            .map_err(|e| {
                error!("Failed to upsert sync state for {}: {:?}", name, e);
                eyre::eyre!("Failed to upsert sync state for {}: {:?}", name, e)
            })?;

        Ok(())
    }
}
