use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use sqlx::SqlitePool;
use std::{fmt, time::Instant};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;

mod api_routes;
mod app_error;
mod auth_routes;
mod input;
mod response;

use crate::{S, parse_env::AppEnv};
pub use app_error::{AppError, Taken, UnknownRow};

#[derive(Clone)]
pub struct ApplicationState {
    sqlite: SqlitePool,
    uptime: Instant,
}

impl ApplicationState {
    pub fn new(sqlite: SqlitePool) -> Self {
        Self {
            sqlite,
            uptime: Instant::now(),
        }
    }
}

/// Create a /v[x] prefix for all api routes, where x is the current major version
fn get_api_version() -> String {
    format!(
        "/v{}",
        env!("CARGO_PKG_VERSION")
            .split('.')
            .take(1)
            .collect::<String>()
    )
}

enum Routes {
    Airline,
    Airlines,
    Airport,
    Flights,
    Login,
    Online,
    Register,
    Tickets,
}

impl fmt::Display for Routes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let disp = match self {
            Self::Airline => "airline/{airline_id}",
            Self::Airlines => "airlines",
            Self::Airport => "airport/{airport_id}",
            Self::Flights => "flights",
            Self::Login => "login",
            Self::Online => "online",
            Self::Register => "register",
            Self::Tickets => "tickets",
        };
        write!(f, "/{disp}")
    }
}

/// Every route nested under the version prefix, with the shared layers applied
fn get_router(application_state: ApplicationState) -> Router {
    let api_routes = Router::new()
        .route(&Routes::Airline.to_string(), get(api_routes::airline_get))
        .route(&Routes::Airlines.to_string(), get(api_routes::airlines_get))
        .route(&Routes::Airport.to_string(), get(api_routes::airport_get))
        .route(&Routes::Flights.to_string(), get(api_routes::flights_get))
        .route(&Routes::Login.to_string(), post(auth_routes::login_post))
        .route(&Routes::Online.to_string(), get(api_routes::online_get))
        .route(&Routes::Register.to_string(), post(auth_routes::register_post))
        .route(&Routes::Tickets.to_string(), get(api_routes::tickets_get));

    let prefix = get_api_version();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any);

    Router::new()
        .nest(&prefix, api_routes)
        .fallback(api_routes::fallback)
        .with_state(application_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(4096))
                .layer(cors),
        )
}

pub async fn serve(app_env: AppEnv, sqlite: SqlitePool) -> Result<(), AppError> {
    let app = get_router(ApplicationState::new(sqlite));

    let listener =
        match tokio::net::TcpListener::bind((app_env.api_host.as_str(), app_env.api_port)).await {
            Ok(listener) => listener,
            Err(e) => return Err(AppError::Internal(e.to_string())),
        };

    match listener.local_addr() {
        Ok(addr) => info!("starting server @ {addr}{}", get_api_version()),
        Err(e) => return Err(AppError::Internal(e.to_string())),
    }

    match axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        Ok(()) => Ok(()),
        Err(_) => Err(AppError::Internal(S!("api_server"))),
    }
}

#[expect(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("signal received, starting graceful shutdown");
}
