use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deposit::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Deposit::BridgeId).big_integer().not_null())
                    .col(ColumnDef::new(Deposit::Sequence).big_integer().not_null())
                    .col(ColumnDef::new(Deposit::Sender).string().not_null())
                    .col(ColumnDef::new(Deposit::Receiver).string().not_null())
                    .col(ColumnDef::new(Deposit::L1Denom).string().not_null())
                    .col(ColumnDef::new(Deposit::L2Denom).string().not_null())
                    .col(ColumnDef::new(Deposit::Amount).string_len(80).not_null())
                    .col(ColumnDef::new(Deposit::L1Height).big_integer().not_null())
                    .col(
                        ColumnDef::new(Deposit::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(Deposit::BridgeId)
                            .col(Deposit::Sequence),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deposit::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Deposit {
    Table,
    BridgeId,
    Sequence,
    Sender,
    Receiver,
    L1Denom,
    L2Denom,
    Amount,
    L1Height,
    CreatedAt,
}
