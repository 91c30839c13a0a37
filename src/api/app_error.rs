use std::fmt;

use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use super::response::ResponseJson;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnknownRow {
    Airline,
    Airport,
}

impl fmt::Display for UnknownRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let disp = match self {
            Self::Airline => "airline",
            Self::Airport => "airport",
        };
        write!(f, "{disp}")
    }
}

/// Which uniqueness check a registration failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Taken {
    Login,
    Email,
}

impl fmt::Display for Taken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let disp = match self {
            Self::Login => "user with this login already exists",
            Self::Email => "user with this email already exists",
        };
        write!(f, "{disp}")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid login or password")]
    Authorization,
    #[error("invalid body:")]
    Body(String),
    #[error("please fill in all fields")]
    EmptyFields,
    #[error("internal error:")]
    Internal(String),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("invalid path:")]
    Path(String),
    #[error("invalid query:")]
    Query(String),
    #[error("registration failed")]
    RegistrationFailed,
    #[error("internal error")]
    SqlxError(#[from] sqlx::Error),
    #[error("conflict")]
    Taken(Taken),
    #[error("unknown")]
    UnknownInDb(UnknownRow),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let prefix = self.to_string();
        let (status, body) = match self {
            Self::Authorization => (axum::http::StatusCode::UNAUTHORIZED, ResponseJson::new(prefix)),
            Self::Body(err) | Self::Path(err) | Self::Query(err) => (
                axum::http::StatusCode::BAD_REQUEST,
                ResponseJson::new(format!("{prefix} {err}")),
            ),
            Self::EmptyFields | Self::PasswordMismatch => {
                (axum::http::StatusCode::BAD_REQUEST, ResponseJson::new(prefix))
            }
            Self::Internal(e) => {
                error!("internal: {:?}", e);
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    ResponseJson::new(format!("{prefix} {e}")),
                )
            }
            Self::RegistrationFailed => (axum::http::StatusCode::CONFLICT, ResponseJson::new(prefix)),
            Self::SqlxError(e) => {
                error!("{:?}", e);
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    ResponseJson::new(prefix),
                )
            }
            Self::Taken(taken) => (
                axum::http::StatusCode::CONFLICT,
                ResponseJson::new(taken.to_string()),
            ),
            Self::UnknownInDb(variety) => (
                axum::http::StatusCode::NOT_FOUND,
                ResponseJson::new(format!("{prefix} {variety}")),
            ),
        };

        (status, body).into_response()
    }
}
