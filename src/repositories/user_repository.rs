use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{Error, Result, EMAIL_TAKEN};
use crate::models::user::{NewUser, User, UserChanges};
use crate::utils::time::now;

/// Storage for user records.
///
/// Implementations own email uniqueness: `insert` and `update` fail with
/// [`Error::Conflict`] when the email already belongs to another user,
/// active or not.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn fetch_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn fetch_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Users ordered by id, `skip` rows dropped, at most `limit` returned.
    async fn fetch_page(&self, skip: i64, limit: i64, active_only: bool) -> Result<Vec<User>>;

    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Returns `None` when no user has this id.
    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>>;
}

const USER_COLUMNS: &str =
    "id, email, nome, senha_hash, nivel_acesso, ativo, created_at, updated_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    nome: String,
    senha_hash: String,
    nivel_acesso: String,
    ativo: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = Error;

    fn try_from(row: UserRow) -> Result<Self> {
        let access_level = row.nivel_acesso.parse().map_err(Error::Internal)?;
        Ok(User {
            id: row.id,
            email: row.email,
            name: row.nome,
            password_hash: row.senha_hash,
            access_level,
            active: row.ativo,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn fetch_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn fetch_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn fetch_page(&self, skip: i64, limit: i64, active_only: bool) -> Result<Vec<User>> {
        let where_clause = if active_only { "WHERE ativo = TRUE" } else { "" };
        let query = format!(
            "SELECT {} FROM users {} ORDER BY id LIMIT $1 OFFSET $2",
            USER_COLUMNS, where_clause
        );

        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(limit.max(0))
            .bind(skip.max(0))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, nome, senha_hash, nivel_acesso, ativo)
             VALUES ($1, $2, $3, $4, TRUE)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.email)
        .bind(user.name)
        .bind(user.password_hash)
        .bind(user.access_level.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(email) = changes.email {
                set.push("email = ").push_bind_unseparated(email);
            }
            if let Some(name) = changes.name {
                set.push("nome = ").push_bind_unseparated(name);
            }
            if let Some(password_hash) = changes.password_hash {
                set.push("senha_hash = ").push_bind_unseparated(password_hash);
            }
            if let Some(access_level) = changes.access_level {
                set.push("nivel_acesso = ")
                    .push_bind_unseparated(access_level.as_str());
            }
            if let Some(active) = changes.active {
                set.push("ativo = ").push_bind_unseparated(active);
            }
            set.push("updated_at = NOW()");
        }
        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING ").push(USER_COLUMNS);

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }
}

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, User>,
}

/// Process-local repository for tests and local runs without a database.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn fetch_by_id(&self, id: i64) -> Result<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn fetch_by_email(&self, email: &str) -> Result<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }

    async fn fetch_page(&self, skip: i64, limit: i64, active_only: bool) -> Result<Vec<User>> {
        let table = self.table.read().await;
        let users = table
            .rows
            .values()
            .filter(|u| !active_only || u.active)
            .skip(usize::try_from(skip).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect();
        Ok(users)
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|u| u.email == user.email) {
            return Err(Error::Conflict(EMAIL_TAKEN.to_string()));
        }

        table.last_id += 1;
        let stored = User {
            id: table.last_id,
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            access_level: user.access_level,
            active: true,
            created_at: now(),
            updated_at: None,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        let mut table = self.table.write().await;
        if let Some(email) = &changes.email {
            if table.rows.values().any(|u| u.id != id && &u.email == email) {
                return Err(Error::Conflict(EMAIL_TAKEN.to_string()));
            }
        }

        let Some(user) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(user);
        user.updated_at = Some(now());
        Ok(Some(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::AccessLevel;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Ana".to_string(),
            password_hash: "hash".to_string(),
            access_level: AccessLevel::Registrar,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();
        let a = repo.insert(new_user("a@x.com")).await.unwrap();
        let b = repo.insert(new_user("b@x.com")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert!(a.active);
        assert!(a.updated_at.is_none());
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email_even_when_inactive() {
        let repo = InMemoryUserRepository::new();
        let a = repo.insert(new_user("a@x.com")).await.unwrap();
        repo.update(
            a.id,
            UserChanges {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = repo.insert(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(repo.fetch_page(0, 100, false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_allows_keeping_own_email() {
        let repo = InMemoryUserRepository::new();
        let a = repo.insert(new_user("a@x.com")).await.unwrap();
        let changes = UserChanges {
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        let updated = repo.update(a.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.email, "a@x.com");
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_none() {
        let repo = InMemoryUserRepository::new();
        assert!(repo
            .update(42, UserChanges::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn page_respects_skip_limit_and_active_filter() {
        let repo = InMemoryUserRepository::new();
        for i in 0..5 {
            repo.insert(new_user(&format!("u{}@x.com", i))).await.unwrap();
        }
        repo.update(
            2,
            UserChanges {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let active: Vec<i64> = repo
            .fetch_page(1, 2, true)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(active, vec![3, 4]);

        let all = repo.fetch_page(0, 100, false).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(repo.fetch_page(-3, -1, false).await.unwrap().is_empty());
    }
}
