use axum::{extract::State, http::StatusCode};
use tracing::info;

use crate::db_sqlite::ModelUser;

use super::{
    AppError, ApplicationState, Taken,
    input::{IncomingJson, LoginBody, RegisterBody},
    response::{AsJsonRes, ResponseJson, ResponseUser},
};

/// Fetch the freshly verified user, a missing row at this point is an internal error
async fn get_user(state: &ApplicationState, login: &str) -> Result<ResponseUser, AppError> {
    ModelUser::get(&state.sqlite, login)
        .await?
        .map(ResponseUser::from)
        .ok_or_else(|| AppError::Internal(format!("user {login} missing")))
}

/// Check a login & password pair, return the user on success
pub async fn login_post(
    State(state): State<ApplicationState>,
    IncomingJson(body): IncomingJson<LoginBody>,
) -> Result<(StatusCode, AsJsonRes<ResponseUser>), AppError> {
    body.validate()?;
    if !ModelUser::check_user_exists(&state.sqlite, &body.login, &body.password).await? {
        return Err(AppError::Authorization);
    }
    let user = get_user(&state, &body.login).await?;
    info!("login: {}", user.login);
    Ok((StatusCode::OK, ResponseJson::new(user)))
}

/// Create a new user, login & email must both be unused
pub async fn register_post(
    State(state): State<ApplicationState>,
    IncomingJson(body): IncomingJson<RegisterBody>,
) -> Result<(StatusCode, AsJsonRes<ResponseUser>), AppError> {
    body.validate()?;
    if ModelUser::check_login_exists(&state.sqlite, &body.login).await? {
        return Err(AppError::Taken(Taken::Login));
    }
    if ModelUser::check_email_exists(&state.sqlite, &body.email).await? {
        return Err(AppError::Taken(Taken::Email));
    }
    if !ModelUser::register_user(&state.sqlite, &body.login, &body.email, &body.password).await? {
        return Err(AppError::RegistrationFailed);
    }
    let user = get_user(&state, &body.login).await?;
    info!("registered: {}", user.login);
    Ok((StatusCode::CREATED, ResponseJson::new(user)))
}
