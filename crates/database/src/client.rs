use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

#[derive(Clone, Debug)]
pub struct DbClient {
    pub primary: DatabaseConnection,
}

impl DbClient {
    pub fn new(primary: DatabaseConnection) -> Self {
        Self { primary }
    }

    /// Opens the atomic unit every height-scoped mutation must run inside.
    pub async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        self.primary.begin().await
    }
}
