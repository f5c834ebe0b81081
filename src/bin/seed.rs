use chrono::Utc;

use mylist_api::{
    config::Config,
    db::{create_pool, run_migrations},
    models::UserId,
    seed::{sample_data, seed_database},
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    tracing::info!("Connecting to database");
    let pool = create_pool(&config.database_url, 1).await?;
    run_migrations(&pool).await?;

    let user_id = UserId::new(config.mock_user_id.clone());
    let data = sample_data(&user_id, Utc::now());

    if let Err(e) = seed_database(&pool, &data).await {
        tracing::error!(error = %e, "Database seeding failed");
        pool.close().await;
        return Err(e);
    }

    tracing::info!(user_id = %user_id, "Database seeding complete");
    pool.close().await;
    Ok(())
}
