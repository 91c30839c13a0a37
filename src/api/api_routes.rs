use axum::{extract::State, http::StatusCode};

use crate::db_sqlite::{FlightFilter, ModelAirline, ModelAirport, ModelFlight, ModelTicket};

use super::{
    AppError, ApplicationState, UnknownRow,
    input::RowId,
    response::{AsJsonRes, Online, ResponseJson},
};

/// Flights matching one of the supported query param combinations
pub async fn flights_get(
    State(state): State<ApplicationState>,
    filter: FlightFilter,
) -> Result<(StatusCode, AsJsonRes<Vec<ModelFlight>>), AppError> {
    Ok((
        StatusCode::OK,
        ResponseJson::new(ModelFlight::get(&state.sqlite, &filter).await?),
    ))
}

/// Every booked ticket
pub async fn tickets_get(
    State(state): State<ApplicationState>,
) -> Result<(StatusCode, AsJsonRes<Vec<ModelTicket>>), AppError> {
    Ok((
        StatusCode::OK,
        ResponseJson::new(ModelTicket::get_all(&state.sqlite).await?),
    ))
}

pub async fn airlines_get(
    State(state): State<ApplicationState>,
) -> Result<(StatusCode, AsJsonRes<Vec<ModelAirline>>), AppError> {
    Ok((
        StatusCode::OK,
        ResponseJson::new(ModelAirline::get_all(&state.sqlite).await?),
    ))
}

pub async fn airline_get(
    State(state): State<ApplicationState>,
    RowId(airline_id): RowId,
) -> Result<(StatusCode, AsJsonRes<ModelAirline>), AppError> {
    let Some(airline) = ModelAirline::get(&state.sqlite, airline_id).await? else {
        return Err(AppError::UnknownInDb(UnknownRow::Airline));
    };
    Ok((StatusCode::OK, ResponseJson::new(airline)))
}

pub async fn airport_get(
    State(state): State<ApplicationState>,
    RowId(airport_id): RowId,
) -> Result<(StatusCode, AsJsonRes<ModelAirport>), AppError> {
    let Some(airport) = ModelAirport::get(&state.sqlite, airport_id).await? else {
        return Err(AppError::UnknownInDb(UnknownRow::Airport));
    };
    Ok((StatusCode::OK, ResponseJson::new(airport)))
}

/// Return a simple online status response
pub async fn online_get(State(state): State<ApplicationState>) -> (StatusCode, AsJsonRes<Online>) {
    (
        StatusCode::OK,
        ResponseJson::new(Online {
            uptime: state.uptime.elapsed().as_secs(),
            api_version: env!("CARGO_PKG_VERSION").into(),
        }),
    )
}

/// return a unknown endpoint response
pub async fn fallback(uri: axum::http::Uri) -> (StatusCode, AsJsonRes<String>) {
    (
        StatusCode::NOT_FOUND,
        ResponseJson::new(format!("unknown endpoint: {uri}")),
    )
}
