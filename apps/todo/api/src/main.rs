use axum_helpers::health_router;
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_tasks::TaskRepository;
use domain_todolists::TodoListRepository;
use domain_users::UserRepository;
use migration::Migrator;
use sea_orm::DatabaseConnection;
use tracing::info;

mod api;
mod config;
mod openapi;
mod seed;
mod state;

use config::{Config, StorageConfig};
use state::{InMemoryServices, PgServices, Services};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    match config.storage.clone() {
        StorageConfig::Memory => {
            info!("Using in-memory storage");
            serve(config, InMemoryServices::in_memory(), None).await
        }
        StorageConfig::Postgres(pg) => {
            let db = connect_from_config_with_retry(pg, None).await?;
            run_migrations::<Migrator>(&db, config.app.name).await?;

            let services = PgServices::postgres(&db);
            serve(config, services, Some(db)).await
        }
    }
}

async fn serve<U, T, L>(
    config: Config,
    services: Services<U, T, L>,
    db: Option<DatabaseConnection>,
) -> eyre::Result<()>
where
    U: UserRepository + Clone + 'static,
    T: TaskRepository + Clone + 'static,
    L: TodoListRepository + Clone + 'static,
{
    if config.seed_data {
        info!("Seeding sample data");
        seed::seed(&services).await?;
    }

    let router = axum_helpers::create_router::<openapi::ApiDoc>(
        api::routes(services),
        config.cors_allowed_origin.as_deref(),
    )?;

    let app = router
        .merge(health_router(config.app))
        .merge(api::health::ready_router(db.clone()));

    info!("Starting {} v{}", config.app.name, config.app.version);

    axum_helpers::create_app(app, &config.server, async move {
        if let Some(db) = db {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(()) => info!("Database connection closed successfully"),
                Err(e) => tracing::error!("Failed to close database connection: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Todo API shutdown complete");
    Ok(())
}
