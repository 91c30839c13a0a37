use sqlx::{
    ConnectOptions, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::time::Duration;

mod model_airline;
mod model_airport;
mod model_flight;
mod model_ticket;
mod model_user;

pub use model_airline::ModelAirline;
pub use model_airport::ModelAirport;
pub use model_flight::{FlightFilter, ModelFlight};
pub use model_ticket::ModelTicket;
pub use model_user::ModelUser;

use crate::{api::AppError, parse_env::AppEnv};

const SCHEMA: &str = include_str!("./schema.sql");

/// Open, creating if missing, the database file, and make sure every table exists
pub async fn get_pool(app_env: &AppEnv) -> Result<SqlitePool, AppError> {
    let mut options = SqliteConnectOptions::new()
        .filename(&app_env.location_database)
        .create_if_missing(true)
        .foreign_keys(true);

    match app_env.log_level {
        tracing::Level::TRACE | tracing::Level::DEBUG => (),
        _ => options = options.disable_statement_logging(),
    }

    let acquire_timeout = Duration::from_secs(5);
    let idle_timeout = Duration::from_secs(30);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .idle_timeout(idle_timeout)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await?;
    create_tables(&pool).await?;
    Ok(pool)
}

/// Every statement is `CREATE TABLE IF NOT EXISTS`, so safe to run against an existing database
async fn create_tables(db: &SqlitePool) -> Result<(), AppError> {
    let mut transaction = db.begin().await?;
    for command in SCHEMA.split(';').map(str::trim).filter(|i| !i.is_empty()) {
        sqlx::query(command).execute(&mut *transaction).await?;
    }
    transaction.commit().await?;
    tracing::debug!("schema ready");
    Ok(())
}
