use std::sync::Arc;

use clap::Parser;
use tracing::info;

use plantwise_core::service::seed;
use plantwise_migration::{Migrator, MigratorTrait};
use plantwise_server::{AppState, Cli, Configuration, startup};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let configuration = Configuration::load(&cli)?;

    let logging_config = configuration.logging_config();
    let _logging_guard = startup::init_logging(&logging_config)?;

    let db = configuration.database_connection().await?;

    if configuration.auto_migrate() {
        Migrator::up(&db, None).await?;
        info!("Database schema is up to date");
    }

    if cli.seed {
        let report = seed::seed_demo_data(&db).await?;
        info!(
            client_id = report.client_id,
            plant_id = report.plant_id,
            created = report.created,
            "Demo data ready"
        );
    }

    let address = configuration.server_address();
    let port = configuration.server_port();
    let context_path = configuration.server_context_path();

    let app_state = Arc::new(AppState::new(configuration, db));

    info!(%address, port, %context_path, "Starting Plantwise server");

    startup::main_server(app_state, context_path, address, port)?.await?;

    Ok(())
}
