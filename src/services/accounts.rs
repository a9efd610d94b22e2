use crate::{
    auth::AuthService,
    entities::{user, Operator, User},
    errors::ServiceError,
    events::{Event, EventSender},
    ids,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserInput {
    #[validate(length(min = 1))]
    pub nama: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginUserInput {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginOperatorInput {
    #[validate(length(min = 1))]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub user_id: String,
    pub nama: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserSession {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct OperatorSession {
    pub nama: String,
    pub access_token: String,
}

/// Registration and login for both account kinds.
#[derive(Clone)]
pub struct AccountService {
    db: Arc<DatabaseConnection>,
    auth: AuthService,
    event_sender: EventSender,
}

impl AccountService {
    pub fn new(db: Arc<DatabaseConnection>, auth: AuthService, event_sender: EventSender) -> Self {
        Self {
            db,
            auth,
            event_sender,
        }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register_user(
        &self,
        input: RegisterUserInput,
    ) -> Result<RegisteredUser, ServiceError> {
        input.validate()?;

        let taken = User::find()
            .filter(user::Column::Email.eq(input.email.as_str()))
            .one(&*self.db)
            .await?
            .is_some();
        if taken {
            return Err(ServiceError::BadRequest(
                "Email already registered".to_string(),
            ));
        }

        let now = Utc::now();
        let created = user::ActiveModel {
            user_id: Set(ids::row_id()),
            nama: Set(input.nama),
            email: Set(input.email),
            no_telpon: Set(None),
            password_hash: Set(hash_password(&input.password)?),
            tanggal_lahir: Set(None),
            jenis_kelamin: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        self.event_sender
            .send_or_log(Event::UserRegistered {
                user_id: created.user_id.clone(),
            })
            .await;

        info!(user_id = %created.user_id, "user registered");
        Ok(RegisteredUser {
            user_id: created.user_id,
            nama: created.nama,
            email: created.email,
        })
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login_user(&self, input: LoginUserInput) -> Result<UserSession, ServiceError> {
        input.validate()?;

        let user = User::find()
            .filter(user::Column::Email.eq(input.email.as_str()))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Email or password wrong".to_string()))?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(ServiceError::NotFound("Email or password wrong".to_string()));
        }

        Ok(UserSession {
            access_token: self.auth.issue_user_token(&user.user_id)?,
        })
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login_operator(
        &self,
        input: LoginOperatorInput,
    ) -> Result<OperatorSession, ServiceError> {
        input.validate()?;

        let operator = Operator::find_by_id(input.username.as_str())
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::BadRequest("Username or password wrong".to_string())
            })?;

        if !verify_password(&input.password, &operator.password_hash) {
            return Err(ServiceError::BadRequest(
                "Username or password wrong".to_string(),
            ));
        }

        Ok(OperatorSession {
            access_token: self.auth.issue_operator_token(&operator.username)?,
            nama: operator.nama,
        })
    }
}

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Hash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trips() {
        let hash = hash_password("kata-sandi-rahasia").unwrap();
        assert!(verify_password("kata-sandi-rahasia", &hash));
        assert!(!verify_password("salah", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
