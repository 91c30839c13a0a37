use std::error::Error;

use axum::{
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonDataError, JsonRejection},
    },
    http::{Request, request::Parts},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{S, db_sqlite::FlightFilter};

use super::AppError;

/// attempt to downcast `err` into a `T` and if that fails recursively try and
/// downcast `err`'s source
fn find_error_source<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a T>
where
    T: Error + 'static,
{
    err.downcast_ref::<T>().map_or_else(
        || err.source().and_then(|source| find_error_source(source)),
        Some,
    )
}

/// attempt to extract the inner `serde_json::Error`, if that succeeds we can
/// provide a more specific error
// see https://docs.rs/axum/latest/axum/extract/index.html#accessing-inner-errors
fn extract_serde_error<E>(e: E) -> AppError
where
    E: Error + 'static,
{
    if let Some(err) = find_error_source::<JsonDataError>(&e) {
        let text = err.body_text();
        if text.contains("missing field") {
            return AppError::Body(S!(text
                .split_once("missing field `")
                .map_or("", |f| f.1)
                .split_once('`')
                .map_or("", |f| f.0.trim())));
        } else if text.contains("unknown field") {
            return AppError::Body(S!("invalid input"));
        } else if text.contains("at line") {
            return AppError::Body(S!(text
                .split_once("at line")
                .map_or("", |f| f.0)
                .split_once(':')
                .map_or("", |f| f.1)
                .split_once(':')
                .map_or("", |f| f.1.trim())));
        }
    }
    AppError::Internal(S!("downcast error"))
}

pub struct IncomingJson<T>(pub T);

/// Either return valid json, deserialized into T, or an AppError describing what was wrong with the body
impl<S, T> FromRequest<S> for IncomingJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(
        req: Request<axum::body::Body>,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => match rejection {
                JsonRejection::JsonDataError(e) => Err(extract_serde_error(e)),
                JsonRejection::JsonSyntaxError(_) => Err(AppError::Body(S!("JSON syntax"))),
                JsonRejection::MissingJsonContentType(e) => {
                    tracing::trace!("{e:?}");
                    Err(AppError::Body(S!("\"application/json\" header")))
                }
                JsonRejection::BytesRejection(e) => {
                    tracing::trace!("{e:?}");
                    Err(AppError::Body(S!("Bytes Rejected")))
                }
                _ => Err(AppError::Body(S!("IncomingJson from_request error"))),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoginBody {
    pub login: String,
    pub password: String,
}

impl LoginBody {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.login.is_empty() || self.password.is_empty() {
            Err(AppError::EmptyFields)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RegisterBody {
    pub login: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterBody {
    /// Every field present, then the two passwords equal
    pub fn validate(&self) -> Result<(), AppError> {
        if [
            &self.login,
            &self.email,
            &self.password,
            &self.confirm_password,
        ]
        .iter()
        .any(|i| i.is_empty())
        {
            Err(AppError::EmptyFields)
        } else if self.password != self.confirm_password {
            Err(AppError::PasswordMismatch)
        } else {
            Ok(())
        }
    }
}

/// Raw `/flights` query params, only certain combinations are a valid `FlightFilter`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FlightQuery {
    pub airline: Option<i64>,
    pub city: Option<i64>,
    pub country: Option<i64>,
    pub date: Option<String>,
}

fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| AppError::Query(S!("date")))
}

impl TryFrom<FlightQuery> for FlightFilter {
    type Error = AppError;
    fn try_from(query: FlightQuery) -> Result<Self, AppError> {
        let date = query.date.as_deref().map(parse_date).transpose()?;
        match (query.airline, query.city, query.country, date) {
            (Some(airline_id), None, None, None) => Ok(Self::Airline(airline_id)),
            (None, None, None, Some(date)) => Ok(Self::Date(date)),
            (None, Some(city_id), None, None) => Ok(Self::City(city_id)),
            (None, None, Some(country_id), None) => Ok(Self::Country(country_id)),
            (Some(airline_id), Some(city_id), None, None) => Ok(Self::AirlineCity {
                airline_id,
                city_id,
            }),
            (Some(airline_id), None, Some(country_id), None) => Ok(Self::AirlineCountry {
                airline_id,
                country_id,
            }),
            (None, Some(city_id), None, Some(date)) => Ok(Self::CityDate { city_id, date }),
            _ => Err(AppError::Query(S!("unsupported filter combination"))),
        }
    }
}

impl<S> FromRequestParts<S> for FlightFilter
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<FlightQuery>::from_request_parts(parts, state).await {
            Ok(value) => Self::try_from(value.0),
            Err(e) => {
                tracing::trace!("{e:?}");
                Err(AppError::Query(S!("invalid parameter")))
            }
        }
    }
}

/// A numeric id taken from the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowId(pub i64);

impl<S> FromRequestParts<S> for RowId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<i64>::from_request_parts(parts, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(_) => Err(AppError::Path(S!("id"))),
        }
    }
}
