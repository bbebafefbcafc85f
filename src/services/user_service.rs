use std::sync::Arc;

use crate::dto::user_dto::{CreateUserPayload, UpdateUserPayload};
use crate::error::Result;
use crate::models::user::{NewUser, User, UserChanges};
use crate::repositories::user_repository::UserRepository;
use crate::utils::crypto::{hash_password, verify_password};

/// User CRUD on top of a [`UserRepository`].
///
/// Passwords are hashed here; the repository only ever sees hashes.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.fetch_by_email(email).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        self.repository.fetch_by_id(id).await
    }

    pub async fn list(&self, skip: i64, limit: i64, active_only: bool) -> Result<Vec<User>> {
        self.repository
            .fetch_page(skip.max(0), limit.max(0), active_only)
            .await
    }

    pub async fn create(&self, payload: CreateUserPayload) -> Result<User> {
        let password_hash = hash_password(&payload.senha)?;
        let user = self
            .repository
            .insert(NewUser {
                email: payload.email,
                name: payload.nome,
                password_hash,
                access_level: payload.nivel_acesso,
            })
            .await?;

        tracing::info!(user_id = user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// Applies the fields present in `payload`. An empty payload writes nothing.
    pub async fn update(&self, id: i64, payload: UpdateUserPayload) -> Result<Option<User>> {
        if payload.is_empty() {
            return self.repository.fetch_by_id(id).await;
        }

        let password_hash = payload
            .senha
            .into_value()
            .map(|senha| hash_password(&senha))
            .transpose()?;
        let changes = UserChanges {
            email: payload.email.into_value(),
            name: payload.nome.into_value(),
            password_hash,
            access_level: payload.nivel_acesso.into_value(),
            active: payload.ativo.into_value(),
        };

        let updated = self.repository.update(id, changes).await?;
        if let Some(user) = &updated {
            tracing::info!(user_id = user.id, "User updated");
        }
        Ok(updated)
    }

    /// Marks the user inactive. The row is kept.
    pub async fn soft_delete(&self, id: i64) -> Result<bool> {
        let changes = UserChanges {
            active: Some(false),
            ..Default::default()
        };
        let deactivated = self.repository.update(id, changes).await?.is_some();
        if deactivated {
            tracing::info!(user_id = id, "User deactivated");
        }
        Ok(deactivated)
    }

    /// `None` for unknown email, wrong password or inactive account.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.repository.fetch_by_email(email).await? else {
            return Ok(None);
        };
        if !verify_password(password, &user.password_hash)? {
            return Ok(None);
        }
        if !user.active {
            return Ok(None);
        }
        Ok(Some(user))
    }
}
