use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db_sqlite::ModelUser;

pub type AsJsonRes<T> = Json<ResponseJson<T>>;

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq, PartialOrd)]
pub struct ResponseJson<T> {
    pub response: T,
}

impl<T> ResponseJson<T> {
    pub const fn new(response: T) -> Json<Self> {
        Json(Self { response })
    }
}

/// Response for the /online api route
#[derive(Serialize, Deserialize)]
pub struct Online {
    pub uptime: u64,
    pub api_version: String,
}

/// A user, as seen by the client, the password hash never leaves the database layer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResponseUser {
    pub login: String,
    pub email: String,
}

impl From<ModelUser> for ResponseUser {
    fn from(model: ModelUser) -> Self {
        Self {
            login: model.login,
            email: model.email,
        }
    }
}
