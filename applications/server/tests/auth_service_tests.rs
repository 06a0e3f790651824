/// Auth service integration tests
mod common;

use shelf_server::services::AuthService;

#[test]
fn tokens_from_a_different_secret_are_rejected() {
    let issuing = AuthService::new("secret-a".to_string(), 1, 1);
    let verifying = AuthService::new("secret-b".to_string(), 1, 1);

    let token = issuing.create_access_token("alice").unwrap();
    assert!(verifying.verify_access_token(&token).is_err());
}

#[test]
fn garbage_tokens_are_rejected() {
    let auth = AuthService::new("secret".to_string(), 1, 1);
    assert!(auth.verify_access_token("not-a-jwt").is_err());
    assert!(auth.verify_refresh_token("").is_err());
}

#[tokio::test]
async fn stored_hash_authenticates_through_storage() {
    let (pool, _temp_dir) = common::create_test_pool().await;
    let auth = AuthService::new("secret".to_string(), 1, 1);

    let hash = auth.hash_password("hunter2").unwrap();
    shelf_storage::users::create(
        &pool,
        shelf_core::types::NewUser {
            username: "alice".to_string(),
            name: "Alice".to_string(),
            surname: "Amber".to_string(),
            email: "alice@example.com".to_string(),
            national_id: "nid-alice".to_string(),
        },
        &hash,
    )
    .await
    .unwrap();

    let stored = shelf_storage::users::get_password_hash(&pool, "alice")
        .await
        .unwrap()
        .expect("hash should be stored");

    assert!(auth.verify_password("hunter2", &stored).unwrap());
    assert!(!auth.verify_password("wrong", &stored).unwrap());
}
