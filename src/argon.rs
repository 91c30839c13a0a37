use argon2::{
    Algorithm::Argon2id,
    Argon2, Params, ParamsBuilder, PasswordHash,
    Version::V0x13,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use std::{fmt, sync::LazyLock};

use crate::{S, api::AppError};

#[expect(clippy::unwrap_used)]
#[cfg(debug_assertions)]
static PARAMS: LazyLock<Params> = LazyLock::new(|| {
    ParamsBuilder::new()
        .m_cost(4096)
        .t_cost(1)
        .p_cost(1)
        .build()
        .unwrap()
});

#[expect(clippy::unwrap_used)]
#[cfg(not(debug_assertions))]
static PARAMS: LazyLock<Params> = LazyLock::new(|| {
    ParamsBuilder::new()
        .m_cost(19 * 1024)
        .t_cost(2)
        .p_cost(1)
        .build()
        .unwrap()
});

fn get_hasher() -> Argon2<'static> {
    Argon2::new(Argon2id, V0x13, PARAMS.clone())
}

/// A PHC formatted argon2id hash, the only form a user password is ever stored in
#[derive(Clone, PartialEq, Eq)]
pub struct ArgonHash(String);

impl fmt::Debug for ArgonHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", "*".repeat(self.0.len()))
    }
}

#[cfg(test)]
impl fmt::Display for ArgonHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ArgonHash {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if PasswordHash::new(&value).is_ok() {
            Ok(Self(value))
        } else {
            Err(S!("argon hash invalid"))
        }
    }
}

impl ArgonHash {
    /// Hash a password with a freshly generated salt, on a blocking thread
    pub async fn new(password: &str) -> Result<Self, AppError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || -> Result<Self, AppError> {
            let salt = SaltString::generate(&mut OsRng);
            get_hasher()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| Self(hash.to_string()))
                .map_err(|e| AppError::Internal(format!("hash_password: {e}")))
        })
        .await
        .map_err(|_| AppError::Internal(S!("Join error")))?
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub async fn verify_password(&self, password: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let argon_hash = self.clone();
        tokio::task::spawn_blocking(move || -> Result<bool, AppError> {
            PasswordHash::new(&argon_hash.0).map_or(
                Err(AppError::Internal(S!("verify_password::new_hash"))),
                |hash| match hash.verify_password(&[&get_hasher()], password) {
                    Ok(()) => Ok(true),
                    Err(e) => match e {
                        argon2::password_hash::Error::Password => Ok(false),
                        _ => Err(AppError::Internal(S!("verify_password"))),
                    },
                },
            )
        })
        .await
        .map_err(|_| AppError::Internal(S!("Join error")))?
    }
}
