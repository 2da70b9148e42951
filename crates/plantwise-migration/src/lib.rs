//! Plantwise Migration - schema migrations for the Plantwise tables
//!
//! Foreign keys carry the ownership rules: deleting a client removes its plants
//! and devices, deleting a plant removes its assets, deleting an asset removes
//! its descendants and sensor tags, and deleting a template or device only
//! clears the reference on the assets that used it.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_schema;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_schema::Migration)]
    }
}
