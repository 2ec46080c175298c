pub use sea_orm_migration::prelude::*;

mod m20260805_000001_create_withdrawal_table;
mod m20260805_000002_create_output_table;
mod m20260805_000003_create_deposit_table;
mod m20260805_000004_create_sync_state_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260805_000001_create_withdrawal_table::Migration),
            Box::new(m20260805_000002_create_output_table::Migration),
            Box::new(m20260805_000003_create_deposit_table::Migration),
            Box::new(m20260805_000004_create_sync_state_table::Migration),
        ]
    }
}
