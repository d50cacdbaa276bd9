//! Behaviour every [`UserStore`] implementation must share.
//!
//! Each check starts from an empty store.
#![allow(clippy::unwrap_used)]

use super::{StoreError, UserStore};
use crate::users::NewUser;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: String::new(),
        password: "!unusable".to_string(),
        is_active: true,
        is_staff: false,
        is_superuser: false,
    }
}

pub async fn insert_assigns_increasing_ids(store: &dyn UserStore) {
    let a = store.insert_user(new_user("a@example.com")).await.unwrap();
    let b = store.insert_user(new_user("b@example.com")).await.unwrap();
    assert!(b.id > a.id);
    assert_eq!(a.email, "a@example.com");
    assert!(a.is_active);
    assert!(!a.is_staff);
    assert!(!a.is_superuser);
}

pub async fn duplicate_email_conflicts(store: &dyn UserStore) {
    store.insert_user(new_user("a@example.com")).await.unwrap();
    let err = store.insert_user(new_user("a@example.com")).await;
    assert!(matches!(err, Err(StoreError::Conflict)));
}

pub async fn save_updates_flags(store: &dyn UserStore) {
    let mut user = store.insert_user(new_user("a@example.com")).await.unwrap();
    user.is_staff = true;
    user.is_superuser = true;
    user.name = "Wee".to_string();
    store.save_user(&user).await.unwrap();

    let found = store.find_user_by_id(user.id).await.unwrap().unwrap();
    assert!(found.is_staff);
    assert!(found.is_superuser);
    assert_eq!(found.name, "Wee");
}

/// An unknown id wins over an email that collides with a stored row.
pub async fn save_unknown_user_is_not_found(store: &dyn UserStore) {
    let mut user = store.insert_user(new_user("a@example.com")).await.unwrap();
    user.id += 100;
    assert!(matches!(
        store.save_user(&user).await,
        Err(StoreError::NotFound)
    ));
}

pub async fn save_taken_email_conflicts(store: &dyn UserStore) {
    store.insert_user(new_user("a@example.com")).await.unwrap();
    let mut b = store.insert_user(new_user("b@example.com")).await.unwrap();
    b.email = "a@example.com".to_string();
    assert!(matches!(
        store.save_user(&b).await,
        Err(StoreError::Conflict)
    ));

    let stored = store.find_user_by_id(b.id).await.unwrap().unwrap();
    assert_eq!(stored.email, "b@example.com");
}

pub async fn lookups_by_email_and_id(store: &dyn UserStore) {
    let user = store.insert_user(new_user("a@example.com")).await.unwrap();

    let by_email = store
        .find_user_by_email("a@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, user.id);
    assert_eq!(by_email.password, "!unusable");

    assert!(store.email_exists("a@example.com").await.unwrap());
    assert!(!store.email_exists("b@example.com").await.unwrap());
    assert!(store
        .find_user_by_email("b@example.com")
        .await
        .unwrap()
        .is_none());
    assert!(store.find_user_by_id(user.id + 100).await.unwrap().is_none());
}

pub async fn token_is_created_once(store: &dyn UserStore) {
    let user = store.insert_user(new_user("a@example.com")).await.unwrap();
    let first = store.get_or_create_token(user.id).await.unwrap();
    let second = store.get_or_create_token(user.id).await.unwrap();
    assert_eq!(first.key, second.key);
    assert_eq!(first.key.len(), 40);

    let (token, owner) = store.find_token(&first.key).await.unwrap().unwrap();
    assert_eq!(token.key, first.key);
    assert_eq!(token.user_id, user.id);
    assert_eq!(owner.email, "a@example.com");
    assert!(store.find_token("missing").await.unwrap().is_none());
}

pub async fn token_for_unknown_user_is_not_found(store: &dyn UserStore) {
    assert!(matches!(
        store.get_or_create_token(i64::MAX).await,
        Err(StoreError::NotFound)
    ));
}
