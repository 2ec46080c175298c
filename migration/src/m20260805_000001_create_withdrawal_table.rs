use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Withdrawal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Withdrawal::BridgeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Withdrawal::Sequence)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Withdrawal::Sender).string().not_null())
                    .col(ColumnDef::new(Withdrawal::Receiver).string().not_null())
                    .col(ColumnDef::new(Withdrawal::L1Denom).string().not_null())
                    .col(ColumnDef::new(Withdrawal::L2Denom).string().not_null())
                    .col(
                        ColumnDef::new(Withdrawal::Amount)
                            .string_len(80)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Withdrawal::OutputIndex)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Withdrawal::MerkleRoot)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Withdrawal::MerkleProof)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Withdrawal::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(Withdrawal::BridgeId)
                            .col(Withdrawal::Sequence),
                    )
                    .to_owned(),
            )
            .await?;

        // period-boundary batching reads all rows pending under one index
        manager
            .create_index(
                Index::create()
                    .table(Withdrawal::Table)
                    .name("idx_withdrawal_output_index")
                    .col(Withdrawal::OutputIndex)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Withdrawal::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Withdrawal {
    Table,
    BridgeId,
    Sequence,
    Sender,
    Receiver,
    L1Denom,
    L2Denom,
    Amount,
    OutputIndex,
    MerkleRoot,
    MerkleProof,
    CreatedAt,
}
