//! Integration tests for the libraries vertical slice
//!
//! Covers name uniqueness per owner, membership idempotence, insertion
//! ordering, rename, and cascade on delete.


use test_helpers::*;

#[tokio::test]
async fn create_then_name_exists_then_duplicate_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;

    let library = shelf_storage::libraries::create(pool, &alice, "SciFi")
        .await
        .expect("Failed to create library");
    assert_eq!(library.name, "SciFi");
    assert_eq!(library.owner_id, alice);

    assert!(shelf_storage::libraries::name_exists(pool, &alice, "SciFi")
        .await
        .unwrap());

    let err = shelf_storage::libraries::create(pool, &alice, "SciFi")
        .await
        .unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::Duplicate(_)));
}

#[tokio::test]
async fn same_name_allowed_for_different_owners() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;

    create_test_library(pool, &alice, "Favorites").await;
    create_test_library(pool, &bob, "Favorites").await;

    assert_eq!(
        shelf_storage::libraries::list_names(pool, &alice).await.unwrap(),
        vec!["Favorites".to_string()]
    );
    assert_eq!(
        shelf_storage::libraries::list_names(pool, &bob).await.unwrap(),
        vec!["Favorites".to_string()]
    );
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;

    let err = shelf_storage::libraries::create(pool, &alice, "  ")
        .await
        .unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::InvalidInput(_)));
}

#[tokio::test]
async fn add_book_is_idempotent() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let library_id = create_test_library(pool, &alice, "SciFi").await;
    let book = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;

    shelf_storage::libraries::add_book(pool, &alice, "SciFi", book)
        .await
        .expect("First add should succeed");

    // Second add of the same pair succeeds without changing membership
    shelf_storage::libraries::add_book(pool, &alice, "SciFi", book)
        .await
        .expect("Repeated add should succeed");

    let books = shelf_storage::libraries::get_books(pool, &alice, "SciFi")
        .await
        .unwrap();
    assert_eq!(books.len(), 1);
    assert!(
        shelf_storage::libraries::contains_book(pool, library_id, book)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn add_book_to_missing_library_fails() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let book = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;

    let err = shelf_storage::libraries::add_book(pool, &alice, "Nope", book)
        .await
        .unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::NotFound { .. }));
}

#[tokio::test]
async fn add_unknown_book_fails() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    create_test_library(pool, &alice, "SciFi").await;

    let err = shelf_storage::libraries::add_book(pool, &alice, "SciFi", 9999)
        .await
        .unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::NotFound { .. }));
}

#[tokio::test]
async fn books_listed_in_insertion_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    create_test_library(pool, &alice, "SciFi").await;

    let dune = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;
    let foundation = create_test_book(pool, "Foundation", "Isaac Asimov", Some(1951)).await;
    let anathem = create_test_book(pool, "Anathem", "Neal Stephenson", Some(2008)).await;

    for book in [foundation, anathem, dune] {
        shelf_storage::libraries::add_book(pool, &alice, "SciFi", book)
            .await
            .unwrap();
    }

    let books = shelf_storage::libraries::get_books(pool, &alice, "SciFi")
        .await
        .unwrap();
    let ids: Vec<_> = books.iter().map(|b| b.book_id).collect();
    assert_eq!(ids, vec![foundation, anathem, dune]);
    assert_eq!(books[0].title.as_deref(), Some("Foundation"));
}

#[tokio::test]
async fn remove_book_requires_membership() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    create_test_library(pool, &alice, "SciFi").await;
    let book = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;

    let err = shelf_storage::libraries::remove_book(pool, &alice, "SciFi", book)
        .await
        .unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::NotFound { .. }));

    shelf_storage::libraries::add_book(pool, &alice, "SciFi", book)
        .await
        .unwrap();
    shelf_storage::libraries::remove_book(pool, &alice, "SciFi", book)
        .await
        .expect("Removing a member should succeed");

    let books = shelf_storage::libraries::get_books(pool, &alice, "SciFi")
        .await
        .unwrap();
    assert!(books.is_empty());
}

#[tokio::test]
async fn delete_cascades_to_memberships() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let library_id = create_test_library(pool, &alice, "SciFi").await;
    let book = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;

    shelf_storage::libraries::add_book(pool, &alice, "SciFi", book)
        .await
        .unwrap();

    shelf_storage::libraries::delete(pool, &alice, "SciFi")
        .await
        .expect("Failed to delete library");

    assert!(
        shelf_storage::libraries::resolve_id(pool, &alice, "SciFi")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        !shelf_storage::libraries::contains_book(pool, library_id, book)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn rename_preserves_membership() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    create_test_library(pool, &alice, "SciFi").await;
    create_test_library(pool, &alice, "History").await;
    let book = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;

    shelf_storage::libraries::add_book(pool, &alice, "SciFi", book)
        .await
        .unwrap();

    // Renaming onto an existing name is a duplicate
    let err = shelf_storage::libraries::rename(pool, &alice, "SciFi", "History")
        .await
        .unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::Duplicate(_)));

    shelf_storage::libraries::rename(pool, &alice, "SciFi", "Space Opera")
        .await
        .expect("Failed to rename library");

    let books = shelf_storage::libraries::get_books(pool, &alice, "Space Opera")
        .await
        .unwrap();
    assert_eq!(books.len(), 1);
}

#[tokio::test]
async fn list_names_is_name_ordered() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    for name in ["Westerns", "Classics", "Mystery"] {
        create_test_library(pool, &alice, name).await;
    }

    let names = shelf_storage::libraries::list_names(pool, &alice)
        .await
        .unwrap();
    assert_eq!(names, vec!["Classics", "Mystery", "Westerns"]);
}

#[tokio::test]
async fn resolve_id_returns_none_for_missing() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;

    assert!(
        shelf_storage::libraries::resolve_id(pool, &alice, "Nope")
            .await
            .unwrap()
            .is_none()
    );
}
