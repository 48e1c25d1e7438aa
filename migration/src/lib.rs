pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_stores;
mod m20260301_000003_create_items_and_categories;
mod m20260301_000004_create_price_observations;
mod m20260301_000005_create_shopping_lists;
mod m20260301_000006_create_price_alerts;
mod m20260301_000007_create_inflation_reports;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_stores::Migration),
            Box::new(m20260301_000003_create_items_and_categories::Migration),
            Box::new(m20260301_000004_create_price_observations::Migration),
            Box::new(m20260301_000005_create_shopping_lists::Migration),
            Box::new(m20260301_000006_create_price_alerts::Migration),
            Box::new(m20260301_000007_create_inflation_reports::Migration),
        ]
    }
}
