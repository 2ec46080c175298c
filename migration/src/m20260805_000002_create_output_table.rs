use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Output::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Output::OutputIndex)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Output::OutputRoot)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Output::StateRoot)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Output::MerkleRoot)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Output::LastBlockHash)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Output::StartBlockNumber)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Output::EndBlockNumber)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Output::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Output::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Output {
    Table,
    OutputIndex,
    OutputRoot,
    StateRoot,
    MerkleRoot,
    LastBlockHash,
    StartBlockNumber,
    EndBlockNumber,
    CreatedAt,
}
