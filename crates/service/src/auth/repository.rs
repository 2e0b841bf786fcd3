use async_trait::async_trait;

use super::domain::{Identity, NewIdentity};
use super::errors::AuthError;

/// Repository abstraction for the credential store.
///
/// `create` maps a unique-key violation to [`AuthError::DuplicateEmail`]:
/// under concurrent registrations for the same address, the store's
/// constraint decides which insert wins.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AuthError>;
    async fn create(&self, new: NewIdentity) -> Result<Identity, AuthError>;
}

/// Simple in-memory mock repository for tests, doc examples, and benches.
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, Identity>>, // key: email
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(email).cloned())
        }

        // Check-and-insert under one lock, so two racing creates resolve the
        // same way the database unique key would.
        async fn create(&self, new: NewIdentity) -> Result<Identity, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&new.email) {
                return Err(AuthError::DuplicateEmail);
            }
            let identity = Identity {
                id: Uuid::new_v4(),
                name: new.name,
                email: new.email.clone(),
                password_hash: new.password_hash,
                fitness_level: new.fitness_level,
                created_at: Utc::now(),
            };
            users.insert(new.email, identity.clone());
            Ok(identity)
        }
    }
}
