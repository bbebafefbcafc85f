use metas_backend::{
    config::Config,
    database::pool::{create_pool, run_migrations},
    error::Error,
    models::user::{AccessLevel, NewUser, UserChanges},
    repositories::user_repository::{PgUserRepository, UserRepository},
};

async fn setup_repository() -> PgUserRepository {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("config");
    let pool = create_pool(&config).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");
    PgUserRepository::new(pool)
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: "Ana Souza".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        access_level: AccessLevel::Registrar,
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn unique_email_is_enforced_by_storage() {
    let repo = setup_repository().await;
    let suffix = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let email = format!("dup{}@x.com", suffix);
    let other_email = format!("other{}@x.com", suffix);

    let first = repo.insert(new_user(&email)).await.expect("first insert");
    assert!(first.active);
    assert!(first.updated_at.is_none());

    let duplicate = repo.insert(new_user(&email)).await;
    assert!(matches!(duplicate, Err(Error::Conflict(_))));

    let other = repo.insert(new_user(&other_email)).await.expect("second insert");
    let taken = repo
        .update(
            other.id,
            UserChanges {
                email: Some(email.clone()),
                ..UserChanges::default()
            },
        )
        .await;
    assert!(matches!(taken, Err(Error::Conflict(_))));

    let unchanged = repo.fetch_by_id(other.id).await.unwrap().unwrap();
    assert_eq!(unchanged.email, other_email);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn partial_update_touches_only_given_columns() {
    let repo = setup_repository().await;
    let suffix = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let user = repo
        .insert(new_user(&format!("patch{}@x.com", suffix)))
        .await
        .unwrap();

    let updated = repo
        .update(
            user.id,
            UserChanges {
                name: Some("Bia".to_string()),
                access_level: Some(AccessLevel::Admin),
                ..UserChanges::default()
            },
        )
        .await
        .unwrap()
        .expect("user exists");
    assert_eq!(updated.name, "Bia");
    assert_eq!(updated.access_level, AccessLevel::Admin);
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.password_hash, user.password_hash);
    assert!(updated.active);
    assert!(updated.updated_at.is_some());

    let missing = repo
        .update(
            -1,
            UserChanges {
                name: Some("Nobody".to_string()),
                ..UserChanges::default()
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn soft_deleted_users_leave_active_pages() {
    let repo = setup_repository().await;
    let suffix = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let kept = repo
        .insert(new_user(&format!("kept{}@x.com", suffix)))
        .await
        .unwrap();
    let gone = repo
        .insert(new_user(&format!("gone{}@x.com", suffix)))
        .await
        .unwrap();

    let deactivated = repo
        .update(
            gone.id,
            UserChanges {
                active: Some(false),
                ..UserChanges::default()
            },
        )
        .await
        .unwrap()
        .expect("user exists");
    assert!(!deactivated.active);

    let active = repo.fetch_page(0, i64::MAX, true).await.unwrap();
    assert!(active.iter().all(|u| u.active));
    assert!(active.iter().any(|u| u.id == kept.id));
    assert!(!active.iter().any(|u| u.id == gone.id));

    let everyone = repo.fetch_page(0, i64::MAX, false).await.unwrap();
    assert!(everyone.windows(2).all(|w| w[0].id < w[1].id));
    let position = everyone
        .iter()
        .position(|u| u.id == gone.id)
        .expect("inactive user is still stored");

    let page = repo.fetch_page(position as i64, 1, false).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, gone.id);

    assert!(repo.fetch_page(0, 0, false).await.unwrap().is_empty());
}
