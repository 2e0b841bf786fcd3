use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::auth::domain::{Identity, NewIdentity};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_identity(u: models::user::Model) -> Identity {
    Identity {
        id: u.id,
        name: u.name,
        email: u.email,
        password_hash: u.password_hash,
        fitness_level: u.fitness_level,
        created_at: u.created_at.with_timezone(&Utc),
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AuthError> {
        let res = models::user::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_identity))
    }

    async fn create(&self, new: NewIdentity) -> Result<Identity, AuthError> {
        let created = models::user::create(&self.db, &new.name, &new.email, &new.password_hash, &new.fitness_level)
            .await
            .map_err(|e| match e {
                models::errors::ModelError::Duplicate => AuthError::DuplicateEmail,
                models::errors::ModelError::Validation(msg) => AuthError::Validation(msg),
                other => AuthError::Repository(other.to_string()),
            })?;
        Ok(to_identity(created))
    }
}
