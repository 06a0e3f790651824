//! Integration tests for the recommendations vertical slice
//!
//! Covers the self-recommendation rule, the per-(user, read book) cap,
//! duplicate rejection, grouped counting, and the detailed listing.


use shelf_core::types::{NewRecommendation, RecommendationKey, MAX_RECOMMENDATIONS_PER_READ_BOOK};
use test_helpers::*;

fn recommendation(
    user_id: &str,
    library_id: i64,
    read: i64,
    recommended: i64,
    comment: &str,
) -> NewRecommendation {
    NewRecommendation {
        user_id: user_id.to_string(),
        library_id,
        read_book_id: read,
        recommended_book_id: recommended,
        comment: comment.to_string(),
    }
}

#[tokio::test]
async fn self_recommendation_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let bob = create_test_user(pool, "bob").await;
    let library = create_test_library(pool, &bob, "SciFi").await;
    let dune = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;

    let err = shelf_storage::recommendations::add(
        pool,
        recommendation(&bob, library, dune, dune, "read it again"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::InvalidInput(_)));
}

#[tokio::test]
async fn cap_of_three_distinct_recommendations_per_read_book() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let bob = create_test_user(pool, "bob").await;
    let library = create_test_library(pool, &bob, "SciFi").await;
    let read = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;

    let mut suggested = Vec::new();
    for i in 0..4 {
        suggested
            .push(create_test_book(pool, &format!("Book {i}"), "Author", None).await);
    }

    for book in &suggested[..3] {
        shelf_storage::recommendations::add(pool, recommendation(&bob, library, read, *book, ""))
            .await
            .expect("Recommendations under the cap should succeed");
    }

    assert_eq!(
        shelf_storage::recommendations::count_given(pool, &bob, read)
            .await
            .unwrap(),
        MAX_RECOMMENDATIONS_PER_READ_BOOK
    );

    let err =
        shelf_storage::recommendations::add(pool, recommendation(&bob, library, read, suggested[3], ""))
            .await
            .unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::LimitExceeded(_)));
}

#[tokio::test]
async fn duplicate_quadruple_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let bob = create_test_user(pool, "bob").await;
    let library = create_test_library(pool, &bob, "SciFi").await;
    let read = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;
    let suggested = create_test_book(pool, "Foundation", "Isaac Asimov", Some(1951)).await;

    shelf_storage::recommendations::add(pool, recommendation(&bob, library, read, suggested, "a"))
        .await
        .unwrap();

    let err = shelf_storage::recommendations::add(
        pool,
        recommendation(&bob, library, read, suggested, "b"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::Duplicate(_)));

    // The failed duplicate did not consume cap headroom
    assert_eq!(
        shelf_storage::recommendations::count_given(pool, &bob, read)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn with_count_groups_across_users_and_orders_by_count() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let bob = create_test_user(pool, "bob").await;
    let carol = create_test_user(pool, "carol").await;
    let library = create_test_library(pool, &bob, "SciFi").await;

    let read = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;
    let foundation = create_test_book(pool, "Foundation", "Isaac Asimov", Some(1951)).await;
    let anathem = create_test_book(pool, "Anathem", "Neal Stephenson", Some(2008)).await;

    shelf_storage::recommendations::add(
        pool,
        recommendation(&bob, library, read, foundation, "loved it"),
    )
    .await
    .unwrap();

    let counts = shelf_storage::recommendations::find_recommended_with_count(pool, library, read)
        .await
        .unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].book_id, foundation);
    assert_eq!(counts[0].times_recommended, 1);

    // A second user recommending the same pair raises the count to 2
    shelf_storage::recommendations::add(
        pool,
        recommendation(&carol, library, read, foundation, "me too"),
    )
    .await
    .unwrap();
    shelf_storage::recommendations::add(pool, recommendation(&carol, library, read, anathem, ""))
        .await
        .unwrap();

    let counts = shelf_storage::recommendations::find_recommended_with_count(pool, library, read)
        .await
        .unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].book_id, foundation);
    assert_eq!(counts[0].times_recommended, 2);
    assert_eq!(counts[1].book_id, anathem);
    assert_eq!(counts[1].times_recommended, 1);
}

#[tokio::test]
async fn with_count_all_aggregates_across_libraries() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let bob = create_test_user(pool, "bob").await;
    let carol = create_test_user(pool, "carol").await;
    let bob_library = create_test_library(pool, &bob, "SciFi").await;
    let carol_library = create_test_library(pool, &carol, "ToRead").await;

    let read = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;
    let foundation = create_test_book(pool, "Foundation", "Isaac Asimov", Some(1951)).await;

    shelf_storage::recommendations::add(
        pool,
        recommendation(&bob, bob_library, read, foundation, ""),
    )
    .await
    .unwrap();
    shelf_storage::recommendations::add(
        pool,
        recommendation(&carol, carol_library, read, foundation, ""),
    )
    .await
    .unwrap();

    // Scoped to one library each pair counts once
    let scoped = shelf_storage::recommendations::find_recommended_with_count(pool, bob_library, read)
        .await
        .unwrap();
    assert_eq!(scoped[0].times_recommended, 1);

    // Across all libraries the counts add up
    let all = shelf_storage::recommendations::find_recommended_with_count_all(pool, read)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].times_recommended, 2);
}

#[tokio::test]
async fn detailed_listing_is_ordered_and_joined() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let bob = create_test_user(pool, "bob").await;
    let scifi = create_test_library(pool, &bob, "SciFi").await;
    let classics = create_test_library(pool, &bob, "Classics").await;

    let dune = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;
    let foundation = create_test_book(pool, "Foundation", "Isaac Asimov", Some(1951)).await;
    let iliad = create_test_book(pool, "The Iliad", "Homer", None).await;

    shelf_storage::recommendations::add(pool, recommendation(&bob, scifi, dune, foundation, "x"))
        .await
        .unwrap();
    shelf_storage::recommendations::add(pool, recommendation(&bob, classics, iliad, dune, "y"))
        .await
        .unwrap();

    let detailed = shelf_storage::recommendations::list_detailed_by_user(pool, &bob)
        .await
        .unwrap();
    assert_eq!(detailed.len(), 2);

    // Ordered by library name first: Classics before SciFi
    assert_eq!(detailed[0].library_name, "Classics");
    assert_eq!(detailed[0].read_title, "The Iliad");
    assert_eq!(detailed[0].recommended_title, "Dune");
    assert_eq!(detailed[1].library_name, "SciFi");
    assert_eq!(detailed[1].recommended_author, "Isaac Asimov");
}

#[tokio::test]
async fn update_comment_and_delete_require_existing_key() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let bob = create_test_user(pool, "bob").await;
    let library = create_test_library(pool, &bob, "SciFi").await;
    let read = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;
    let suggested = create_test_book(pool, "Foundation", "Isaac Asimov", Some(1951)).await;

    let key = RecommendationKey {
        user_id: bob.clone(),
        library_id: library,
        read_book_id: read,
        recommended_book_id: suggested,
    };

    // Nothing stored yet: both mutations are not-found
    let err = shelf_storage::recommendations::update_comment(pool, &key, "new")
        .await
        .unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::NotFound { .. }));
    let err = shelf_storage::recommendations::delete(pool, &key).await.unwrap_err();
    assert!(matches!(err, shelf_core::ShelfError::NotFound { .. }));

    shelf_storage::recommendations::add(pool, recommendation(&bob, library, read, suggested, "old"))
        .await
        .unwrap();

    shelf_storage::recommendations::update_comment(pool, &key, "new")
        .await
        .expect("Failed to update comment");

    let listed = shelf_storage::recommendations::list_by_user(pool, &bob)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].comment, "new");

    shelf_storage::recommendations::delete(pool, &key)
        .await
        .expect("Failed to delete recommendation");
    assert!(shelf_storage::recommendations::list_by_user(pool, &bob)
        .await
        .unwrap()
        .is_empty());
}
