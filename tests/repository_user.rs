mod common;

use sqlx::PgPool;
use std::sync::Arc;

use car_rental::domain::entities::{NewUser, Role};
use car_rental::domain::repositories::UserRepository;
use car_rental::infrastructure::persistence::PgUserRepository;

fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        role,
    }
}

#[sqlx::test]
async fn test_create_and_find_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("admin@bcr.io", Role::Admin)).await.unwrap();
    assert!(user.is_admin());

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    let by_email = repo.find_by_email("admin@bcr.io").await.unwrap().unwrap();
    assert_eq!(by_id, user);
    assert_eq!(by_email, user);

    assert!(repo.find_by_email("nobody@bcr.io").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_duplicate_email_rejected(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(new_user("dup@bcr.io", Role::Customer)).await.unwrap();

    assert!(repo.create(new_user("dup@bcr.io", Role::Customer)).await.is_err());
}

#[sqlx::test]
async fn test_list_users(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("a@bcr.io", Role::Customer)).await.unwrap();
    repo.create(new_user("b@bcr.io", Role::Admin)).await.unwrap();

    let users = repo.list().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "a@bcr.io");
}
